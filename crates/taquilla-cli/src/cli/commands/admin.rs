//! Organizer dashboard command handlers.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use taquilla_core::api::ApiClient;
use taquilla_core::api::types::{EventPatch, EventStatus, NewEvent, NewTicketType};

use super::format_cents;

pub async fn events(client: &ApiClient) -> Result<()> {
    let events = client.my_events().await.context("list your events")?;
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

pub async fn create(
    client: &ApiClient,
    name: &str,
    venue: &str,
    starts_at: &str,
    description: Option<String>,
) -> Result<()> {
    let starts_at = DateTime::parse_from_rfc3339(starts_at)
        .map(|when| when.with_timezone(&Utc))
        .with_context(|| format!("parse start time '{starts_at}'"))?;

    let event = client
        .create_event(&NewEvent {
            name: name.to_string(),
            description,
            venue: venue.to_string(),
            starts_at,
        })
        .await
        .context("create event")?;

    println!("Created event {} ({}) [{}]", event.id, event.name, event.status);
    Ok(())
}

pub async fn publish(client: &ApiClient, id: i64) -> Result<()> {
    let patch = EventPatch {
        status: Some(EventStatus::Published),
        ..EventPatch::default()
    };
    let event = client
        .update_event(id, &patch)
        .await
        .with_context(|| format!("publish event {id}"))?;

    println!("Published event {} ({})", event.id, event.name);
    Ok(())
}

pub async fn add_tickets(
    client: &ApiClient,
    event: i64,
    name: &str,
    price: i64,
    quantity: i64,
) -> Result<()> {
    let ticket_type = client
        .add_ticket_type(
            event,
            &NewTicketType {
                name: name.to_string(),
                price_cents: price,
                quantity,
            },
        )
        .await
        .with_context(|| format!("add ticket type to event {event}"))?;

    println!(
        "Added {} at {} ({} on sale)",
        ticket_type.name,
        format_cents(ticket_type.price_cents),
        ticket_type.quantity_available
    );
    Ok(())
}

pub async fn stats(client: &ApiClient, id: i64) -> Result<()> {
    let stats = client
        .event_stats(id)
        .await
        .with_context(|| format!("load stats for event {id}"))?;

    println!("Tickets sold  {}", stats.tickets_sold);
    println!("Revenue       {}", format_cents(stats.revenue_cents));
    println!("Checked in    {}", stats.checked_in);
    Ok(())
}

pub async fn attendees(client: &ApiClient, id: i64) -> Result<()> {
    let attendees = client
        .attendees(id)
        .await
        .with_context(|| format!("load attendees for event {id}"))?;

    if attendees.is_empty() {
        println!("No attendees yet.");
        return Ok(());
    }

    for attendee in attendees {
        let state = if attendee.checked_in { "in" } else { "-" };
        println!(
            "{}  {}  {}  [{}]",
            attendee.ticket_code, attendee.name, attendee.email, state
        );
    }
    Ok(())
}
