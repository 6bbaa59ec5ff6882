//! Customer order endpoints (checkout and history).

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{NewOrder, Order};

impl ApiClient {
    /// Lists the signed-in customer's orders.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/orders/my").await
    }

    /// Fetches one order with its tickets.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn order(&self, id: i64) -> Result<Order, ApiError> {
        self.get(&format!("/orders/{id}")).await
    }

    /// Places an order for an event.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        self.post("/orders", order).await
    }
}
