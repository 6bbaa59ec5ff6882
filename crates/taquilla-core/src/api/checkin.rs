//! Door check-in endpoint.
//!
//! The QR decoding itself happens in the scanning device; this only submits
//! the decoded ticket code.

use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::CheckIn;

#[derive(Debug, Serialize)]
struct CheckInRequest<'a> {
    code: &'a str,
}

impl ApiClient {
    /// Redeems a scanned ticket code.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn check_in(&self, code: &str) -> Result<CheckIn, ApiError> {
        self.post("/tickets/check-in", &CheckInRequest { code })
            .await
    }
}
