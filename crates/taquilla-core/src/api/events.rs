//! Public event browsing endpoints.

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{Event, EventSummary};

impl ApiClient {
    /// Lists published events.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn list_events(&self) -> Result<Vec<EventSummary>, ApiError> {
        self.get("/events").await
    }

    /// Fetches one event with its ticket types.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn event(&self, id: i64) -> Result<Event, ApiError> {
        self.get(&format!("/events/{id}")).await
    }
}
