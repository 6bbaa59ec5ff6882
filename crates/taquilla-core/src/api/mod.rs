//! Authenticated API client for the Taquilla platform.
//!
//! Wraps outbound requests with bearer-token injection, a one-shot
//! refresh-and-retry on authorization failure, and session teardown when
//! recovery is impossible. Endpoint wrappers are grouped by surface.

mod admin;
mod auth;
mod checkin;
mod client;
mod error;
mod events;
mod orders;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
