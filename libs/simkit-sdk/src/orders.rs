//! Order endpoints.

use crate::types::{Order, OrderPage};
use crate::{decode, decode_owned};
use serde_json::json;
use simkit_http::{ApiError, DataClient, GetOptions, Params};

/// Query options for the order list.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl OrderFilter {
    fn into_params(self) -> Params {
        let mut params = Params::new();
        if let Some(status) = self.status {
            params.insert("status".to_owned(), status);
        }
        if let Some(limit) = self.limit {
            params.insert("limit".to_owned(), limit.to_string());
        }
        if let Some(offset) = self.offset {
            params.insert("offset".to_owned(), offset.to_string());
        }
        params
    }
}

/// List the user's orders.
///
/// Order state changes server-side (payment, provisioning), so the list is
/// cached only briefly.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn list(client: &DataClient, filter: OrderFilter) -> Result<OrderPage, ApiError> {
    decode(
        client
            .get_with(
                "/orders",
                &filter.into_params(),
                GetOptions::with_ttl(std::time::Duration::from_secs(30)),
            )
            .await?,
    )
}

/// Fetch one order by id.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn by_id(client: &DataClient, id: &str) -> Result<Order, ApiError> {
    decode(client.get(&format!("/orders/{id}"), &Params::new()).await?)
}

/// Create an order for a product.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn create(
    client: &DataClient,
    product_id: i64,
    payment_method: &str,
) -> Result<Order, ApiError> {
    decode_owned(
        client
            .post(
                "/orders",
                &json!({
                    "product_id": product_id,
                    "payment_method": payment_method,
                }),
            )
            .await?,
    )
}

/// Cancel a pending order.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn cancel(client: &DataClient, id: &str) -> Result<Order, ApiError> {
    decode_owned(client.post(&format!("/orders/{id}/cancel"), &json!({})).await?)
}
