//! Session command handlers.

use anyhow::{Context, Result, anyhow};
use taquilla_core::api::{ApiClient, ApiError};
use taquilla_core::session::SessionStore;

pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<()> {
    let user = client
        .login(email, password)
        .await
        .map_err(flatten_auth_error)?;
    println!("Logged in as {} ({})", user.name, user.email);
    Ok(())
}

pub async fn register(client: &ApiClient, name: &str, email: &str, password: &str) -> Result<()> {
    let user = client
        .register(name, email, password)
        .await
        .map_err(flatten_auth_error)?;
    println!("Registered {} ({})", user.name, user.email);
    Ok(())
}

pub fn logout() -> Result<()> {
    let store = SessionStore::open_default();
    let had_session = store.clear().context("clear session")?;
    if had_session {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn whoami() -> Result<()> {
    let store = SessionStore::open_default();
    let Some(session) = store.load().context("load session")? else {
        println!("Not logged in.");
        return Ok(());
    };

    match session.user {
        Some(user) => println!("{} <{}> [{}]", user.name, user.email, user.role),
        None => println!("Logged in (no cached profile)."),
    }
    Ok(())
}

/// Rejections from the sign-in endpoints stay plain errors, so the
/// session-expired hint is never shown for the auth commands themselves.
fn flatten_auth_error(err: ApiError) -> anyhow::Error {
    match err {
        ApiError::Unauthorized { message } => anyhow!(message),
        other => other.into(),
    }
}
