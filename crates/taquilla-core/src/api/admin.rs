//! Organizer dashboard endpoints (event management).

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{
    Attendee, Event, EventPatch, EventStats, EventSummary, NewEvent, NewTicketType, TicketType,
};

impl ApiClient {
    /// Lists the organizer's own events, drafts included.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn my_events(&self) -> Result<Vec<EventSummary>, ApiError> {
        self.get("/admin/events").await
    }

    /// Creates an event (as a draft).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn create_event(&self, event: &NewEvent) -> Result<Event, ApiError> {
        self.post("/admin/events", event).await
    }

    /// Applies a partial update to an event (e.g. publishing it).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn update_event(&self, id: i64, patch: &EventPatch) -> Result<Event, ApiError> {
        self.put(&format!("/admin/events/{id}"), patch).await
    }

    /// Adds a ticket type to an event.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn add_ticket_type(
        &self,
        event_id: i64,
        ticket_type: &NewTicketType,
    ) -> Result<TicketType, ApiError> {
        self.post(&format!("/admin/events/{event_id}/ticket-types"), ticket_type)
            .await
    }

    /// Fetches sales counters for an event.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn event_stats(&self, id: i64) -> Result<EventStats, ApiError> {
        self.get(&format!("/admin/events/{id}/stats")).await
    }

    /// Lists attendees of an event.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn attendees(&self, id: i64) -> Result<Vec<Attendee>, ApiError> {
        self.get(&format!("/admin/events/{id}/attendees")).await
    }
}
