//! Authentication endpoints and session lifecycle.

use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionUser};

use super::client::ApiClient;
use super::error::ApiError;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Credentials issued by the server on login or registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssuedSession {
    token: String,
    refresh_token: String,
    user: SessionUser,
}

impl ApiClient {
    /// Signs in and persists the issued session.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ApiError> {
        let issued: IssuedSession = self
            .post("/auth/login", &LoginRequest { email, password })
            .await?;
        self.store_issued(issued)
    }

    /// Creates an account and persists the issued session.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, ApiError> {
        let issued: IssuedSession = self
            .post(
                "/auth/register",
                &RegisterRequest {
                    name,
                    email,
                    password,
                },
            )
            .await?;
        self.store_issued(issued)
    }

    /// Fetches the server's view of the signed-in user.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn me(&self) -> Result<SessionUser, ApiError> {
        self.get("/auth/me").await
    }

    /// Signs out locally: clears the persisted tokens and cached identity.
    /// Returns whether a session was present.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn logout(&self) -> Result<bool, ApiError> {
        self.session().clear().map_err(ApiError::storage)
    }

    fn store_issued(&self, issued: IssuedSession) -> Result<SessionUser, ApiError> {
        let session = Session {
            token: issued.token,
            refresh_token: Some(issued.refresh_token),
            user: Some(issued.user.clone()),
        };
        self.session()
            .establish(session)
            .map_err(ApiError::storage)?;
        Ok(issued.user)
    }
}
