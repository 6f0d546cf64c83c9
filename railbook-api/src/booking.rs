//! `/booking/*` operations: orders and passenger types.

use crate::client::ApiClient;
use crate::error::ApiResult;
use railbook_shared::{CreateOrderRequest, Order, PassengerType};
use reqwest::Method;

impl ApiClient {
    pub async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        let rb = self.authed(Method::GET, "/booking/orders/").await?;
        self.execute(rb).await
    }

    pub async fn get_order(&self, id: i64) -> ApiResult<Order> {
        let rb = self
            .authed(Method::GET, &format!("/booking/orders/{}/", id))
            .await?;
        self.execute(rb).await
    }

    /// Submit one order with one ticket record per selected seat. The CSRF
    /// cookie value, when the backend has handed one out, rides along in the
    /// `X-CSRFToken` header.
    pub async fn create_order(&self, req: &CreateOrderRequest) -> ApiResult<Order> {
        let mut rb = self.authed(Method::POST, "/booking/orders/").await?.json(req);
        if let Some(token) = self.csrf_token() {
            rb = rb.header("X-CSRFToken", token);
        }
        let order: Order = self.execute(rb).await?;
        tracing::info!(order_id = order.id, tickets = order.tickets.len(), "order created");
        Ok(order)
    }

    pub async fn list_passenger_types(&self) -> ApiResult<Vec<PassengerType>> {
        self.get_json("/booking/passenger-types/").await
    }
}
