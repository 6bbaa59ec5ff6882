//! Door check-in command handler.

use anyhow::{Context, Result};
use taquilla_core::api::ApiClient;

pub async fn run(client: &ApiClient, code: &str) -> Result<()> {
    let outcome = client.check_in(code).await.context("check in ticket")?;

    if outcome.already_checked_in {
        println!(
            "ALREADY USED  {}  {}  ({})",
            outcome.ticket_code, outcome.attendee_name, outcome.event_name
        );
    } else {
        println!(
            "OK  {}  {}  ({})",
            outcome.ticket_code, outcome.attendee_name, outcome.event_name
        );
    }
    Ok(())
}
