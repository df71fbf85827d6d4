//! eSIM profile and usage endpoints.

use crate::decode;
use crate::types::{EsimInfo, EsimUsage};
use simkit_http::{ApiError, DataClient, GetOptions, Params};
use std::time::Duration;

/// Fetch the eSIM profile issued for an order.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn profile(client: &DataClient, order_id: &str) -> Result<EsimInfo, ApiError> {
    decode(
        client
            .get(&format!("/orders/{order_id}/esim"), &Params::new())
            .await?,
    )
}

/// Fetch live usage for an installed eSIM. Usage moves constantly, so the
/// cache window is short.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn usage(client: &DataClient, iccid: &str) -> Result<EsimUsage, ApiError> {
    decode(
        client
            .get_with(
                &format!("/esim/{iccid}/usage"),
                &Params::new(),
                GetOptions::with_ttl(Duration::from_secs(15)),
            )
            .await?,
    )
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::testutil::client_for;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_profile_and_usage() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/orders/8/esim");
            then.status(200).json_body(json!({
                "code": 0,
                "data": {
                    "iccid": "8988247000001234567",
                    "activation_code": "LPA:1$rsp.example$X",
                    "qr_code": "data:image/png;base64,AAAA"
                }
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/esim/8988247000001234567/usage");
            then.status(200).json_body(json!({
                "code": 0,
                "data": {
                    "iccid": "8988247000001234567",
                    "data_used": 1024,
                    "data_remaining": 4096
                }
            }));
        });

        let client = client_for(&server);
        let info = profile(&client, "8").await.unwrap();
        assert!(info.activation_code.starts_with("LPA:1$"));

        let usage = usage(&client, &info.iccid).await.unwrap();
        assert_eq!(usage.data_remaining, 4096);
    }
}
