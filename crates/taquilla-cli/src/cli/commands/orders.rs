//! Order command handlers.

use anyhow::{Context, Result};
use taquilla_core::api::ApiClient;
use taquilla_core::api::types::NewOrder;

use super::format_cents;

pub async fn list(client: &ApiClient) -> Result<()> {
    let orders = client.my_orders().await.context("list orders")?;
    if orders.is_empty() {
        println!("No orders found.");
        return Ok(());
    }

    for order in orders {
        println!(
            "{:>5}  {}  {}  x{}  {}  [{}]",
            order.id,
            order.created_at.format("%Y-%m-%d"),
            order.event_name,
            order.quantity,
            format_cents(order.total_cents),
            order.status
        );
    }
    Ok(())
}

pub async fn show(client: &ApiClient, id: i64) -> Result<()> {
    let order = client
        .order(id)
        .await
        .with_context(|| format!("load order {id}"))?;

    println!(
        "Order {}: {} x{}  {} [{}]",
        order.id,
        order.event_name,
        order.quantity,
        format_cents(order.total_cents),
        order.status
    );
    for ticket in &order.tickets {
        let state = if ticket.checked_in { "used" } else { "valid" };
        println!("  {}  {}", ticket.code, state);
    }
    Ok(())
}

pub async fn buy(
    client: &ApiClient,
    event: i64,
    ticket_type: Option<i64>,
    quantity: u32,
) -> Result<()> {
    let order = client
        .create_order(&NewOrder {
            event_id: event,
            ticket_type_id: ticket_type,
            quantity,
        })
        .await
        .context("place order")?;

    println!(
        "Order {} placed: {} x{}  {} [{}]",
        order.id,
        order.event_name,
        order.quantity,
        format_cents(order.total_cents),
        order.status
    );
    Ok(())
}
