//! Session credential storage and retrieval.
//!
//! Persists the signed-in session in `<base>/session.json` with restricted
//! permissions (0600). Tokens are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Organizer,
    Customer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Role::Admin => "admin",
            Role::Organizer => "organizer",
            Role::Customer => "customer",
        };
        f.write_str(label)
    }
}

/// Cached identity of the signed-in user.
///
/// Created or overwritten on login, cleared on logout or irrecoverable
/// auth failure. It has no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Persisted session credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The access token (short-lived, bearer-style)
    pub token: String,
    /// The refresh token (longer-lived)
    #[serde(rename = "refreshToken", skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Identity cached alongside the tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

/// File-backed session storage.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Opens the store at the default session path.
    pub fn open_default() -> Self {
        Self {
            path: paths::session_path(),
        }
    }

    /// Opens the store at a specific path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the persisted session.
    /// Returns `None` if no session file exists.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        let session = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;
        Ok(Some(session))
    }

    /// Saves the session to disk with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, session: &Session) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the persisted session. Safe to call when none exists.
    /// Returns whether a session was present.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err).with_context(|| {
                format!("Failed to remove session at {}", self.path.display())
            }),
        }
    }
}

/// Owner of the session state.
///
/// All reads and writes of the persisted token pair go through this one
/// interface. The in-memory copy exists only as a cache; `reload` reconciles
/// it with the persisted copy so the token attached to an outgoing request is
/// always the most recently issued one, even when another process rotated it.
#[derive(Debug)]
pub struct SessionManager {
    store: SessionStore,
    current: RwLock<Option<Session>>,
}

impl SessionManager {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// Re-reads the persisted session and updates the in-memory copy.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn reload(&self) -> Result<Option<Session>> {
        let session = self.store.load()?;
        *self.write_guard() = session.clone();
        Ok(session)
    }

    /// Returns the in-memory copy without touching disk.
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the cached identity record, if signed in.
    pub fn user(&self) -> Option<SessionUser> {
        self.current().and_then(|session| session.user)
    }

    /// Persists a freshly issued session (login/registration).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn establish(&self, session: Session) -> Result<()> {
        self.store.save(&session)?;
        *self.write_guard() = Some(session);
        Ok(())
    }

    /// Replaces the access token after a refresh, keeping the refresh token
    /// and cached identity.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn rotate_access_token(&self, token: &str) -> Result<()> {
        let mut session = self
            .store
            .load()?
            .context("No session to rotate access token for")?;
        session.token = token.to_string();
        self.store.save(&session)?;
        *self.write_guard() = Some(session);
        Ok(())
    }

    /// Tears the session down: clears the persisted credentials and the
    /// cached identity. Idempotent.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn clear(&self) -> Result<bool> {
        let existed = self.store.clear()?;
        *self.write_guard() = None;
        Ok(existed)
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns a masked version of a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 12 {
        return "***".to_string();
    }
    format!("{}...", &token[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session {
            token: "access-token".to_string(),
            refresh_token: Some("refresh-token".to_string()),
            user: Some(SessionUser {
                id: 7,
                email: "ana@example.com".to_string(),
                name: "Ana".to_string(),
                role: Role::Organizer,
            }),
        }
    }

    /// Test: persisted JSON uses the fixed storage keys.
    #[test]
    fn test_session_storage_keys() {
        let json = serde_json::to_value(sample_session()).unwrap();
        assert!(json.get("token").is_some());
        assert!(json.get("refreshToken").is_some());
        assert!(json.get("user").is_some());
        assert_eq!(json["user"]["role"], "organizer");
    }

    /// Test: store round-trip through disk.
    #[test]
    fn test_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());

        store.save(&sample_session()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, sample_session());
    }

    /// Test: clearing twice leaves the same cleared state as clearing once.
    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"));

        store.save(&sample_session()).unwrap();
        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    /// Test: manager reload picks up out-of-band writes.
    #[test]
    fn test_manager_reload_reconciles_external_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let manager = SessionManager::new(SessionStore::at(path.clone()));

        manager.establish(sample_session()).unwrap();

        // Another process rotates the token behind our back.
        let other = SessionStore::at(path);
        let mut rotated = sample_session();
        rotated.token = "rotated".to_string();
        other.save(&rotated).unwrap();

        assert_eq!(manager.current().unwrap().token, "access-token");
        let reloaded = manager.reload().unwrap().unwrap();
        assert_eq!(reloaded.token, "rotated");
        assert_eq!(manager.current().unwrap().token, "rotated");
    }

    /// Test: rotating keeps the refresh token and identity.
    #[test]
    fn test_rotate_access_token_keeps_identity() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SessionManager::new(SessionStore::at(dir.path().join("session.json")));

        manager.establish(sample_session()).unwrap();
        manager.rotate_access_token("fresh").unwrap();

        let current = manager.current().unwrap();
        assert_eq!(current.token, "fresh");
        assert_eq!(current.refresh_token.as_deref(), Some("refresh-token"));
        assert_eq!(current.user.unwrap().email, "ana@example.com");
    }

    /// Test: manager teardown is idempotent.
    #[test]
    fn test_manager_clear_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SessionManager::new(SessionStore::at(dir.path().join("session.json")));

        manager.establish(sample_session()).unwrap();
        assert!(manager.clear().unwrap());
        assert!(!manager.clear().unwrap());
        assert!(manager.current().is_none());
        assert!(manager.user().is_none());
    }

    /// Test: token masking.
    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("tq-access-token-value"), "tq-acces...");
        assert_eq!(mask_token("short"), "***");
    }
}
