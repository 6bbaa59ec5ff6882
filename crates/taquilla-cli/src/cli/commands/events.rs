//! Event browsing command handlers.

use anyhow::{Context, Result};
use taquilla_core::api::ApiClient;

use super::format_cents;

pub async fn list(client: &ApiClient) -> Result<()> {
    let events = client.list_events().await.context("list events")?;
    if events.is_empty() {
        println!("No events found.");
        return Ok(());
    }

    for event in events {
        println!(
            "{:>5}  {}  {}  {} [{}]",
            event.id,
            event.starts_at.format("%Y-%m-%d %H:%M"),
            event.name,
            event.venue,
            event.status
        );
    }
    Ok(())
}

pub async fn show(client: &ApiClient, id: i64) -> Result<()> {
    let event = client
        .event(id)
        .await
        .with_context(|| format!("load event {id}"))?;

    println!("{} [{}]", event.name, event.status);
    println!(
        "{}  {}",
        event.venue,
        event.starts_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(description) = &event.description {
        println!("\n{description}");
    }

    if event.ticket_types.is_empty() {
        println!("\nNo tickets on sale.");
    } else {
        println!();
        for ticket_type in &event.ticket_types {
            println!(
                "  {}  {}  ({} available)",
                ticket_type.name,
                format_cents(ticket_type.price_cents),
                ticket_type.quantity_available
            );
        }
    }
    Ok(())
}
