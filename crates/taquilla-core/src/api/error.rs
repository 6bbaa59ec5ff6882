//! Error taxonomy for the API client.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by [`super::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (unreachable host, DNS, TLS). Propagated as-is
    /// and never retried.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Authorization failure that survived the one-shot refresh protocol.
    /// The session has already been torn down by the time this is returned.
    #[error("{message}")]
    Unauthorized { message: String },

    /// Non-2xx application response, carrying the server message verbatim
    /// when one was supplied.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A nominally successful response whose body is not valid JSON.
    #[error("invalid JSON in response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Session persistence failed.
    #[error("session storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub(crate) fn storage(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Extracts the server-supplied error message from a response body.
///
/// Errors are expected as `{ error: { message } }` or `{ message }`; absent
/// both, a synthesized status message is used.
pub(crate) fn server_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        let message = parsed
            .error
            .and_then(|detail| detail.message)
            .or(parsed.message);
        if let Some(message) = message.filter(|message| !message.trim().is_empty()) {
            return message;
        }
    }

    format!("request failed with status {}", status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: nested error shape wins.
    #[test]
    fn test_server_message_nested_shape() {
        let body = r#"{"error":{"message":"Credenciales inválidas"}}"#;
        assert_eq!(
            server_message(StatusCode::UNAUTHORIZED, body),
            "Credenciales inválidas"
        );
    }

    /// Test: flat message shape.
    #[test]
    fn test_server_message_flat_shape() {
        let body = r#"{"message":"Evento no encontrado"}"#;
        assert_eq!(
            server_message(StatusCode::NOT_FOUND, body),
            "Evento no encontrado"
        );
    }

    /// Test: synthesized fallback for non-JSON and empty messages.
    #[test]
    fn test_server_message_fallback() {
        assert_eq!(
            server_message(StatusCode::BAD_GATEWAY, "<html>nope</html>"),
            "request failed with status 502"
        );
        assert_eq!(
            server_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"  "}"#),
            "request failed with status 500"
        );
        assert_eq!(
            server_message(StatusCode::INTERNAL_SERVER_ERROR, "{}"),
            "request failed with status 500"
        );
    }
}
