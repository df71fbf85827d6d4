//! Wallet endpoints.

use crate::types::{RechargeOrder, WalletBalance};
use crate::{decode, decode_owned};
use serde_json::json;
use simkit_http::{ApiError, DataClient, GetOptions, Params};
use std::time::Duration;

/// Fetch the wallet balance. Cached briefly; mutations should
/// [`invalidate_balance`] afterwards.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn balance(client: &DataClient) -> Result<WalletBalance, ApiError> {
    decode(
        client
            .get_with(
                "/wallet/balance",
                &Params::new(),
                GetOptions::with_ttl(Duration::from_secs(30)),
            )
            .await?,
    )
}

/// Drop the cached balance (after a recharge or purchase).
pub fn invalidate_balance(client: &DataClient) {
    // Empty params always serialize, so the key is always computable.
    let _ = client.invalidate("/wallet/balance", &Params::new());
}

/// Create a recharge order for `amount`.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn create_recharge(client: &DataClient, amount: f64) -> Result<RechargeOrder, ApiError> {
    let order = decode_owned::<RechargeOrder>(
        client
            .post("/wallet/recharge", &json!({ "amount": amount }))
            .await?,
    )?;
    invalidate_balance(client);
    Ok(order)
}

/// Fetch one recharge order by its order number.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn recharge_order(
    client: &DataClient,
    order_no: &str,
) -> Result<RechargeOrder, ApiError> {
    decode(
        client
            .get(&format!("/wallet/recharge/{order_no}"), &Params::new())
            .await?,
    )
}
