//! Region and country endpoints.

use crate::decode;
use crate::types::{Country, Region};
use simkit_http::{ApiError, DataClient, Params};

/// List all coverage regions.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn list(client: &DataClient) -> Result<Vec<Region>, ApiError> {
    decode(client.get("/regions", &Params::new()).await?)
}

/// List the countries of one region.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn countries(client: &DataClient, region: &str) -> Result<Vec<Country>, ApiError> {
    decode(
        client
            .get(&format!("/regions/{region}/countries"), &Params::new())
            .await?,
    )
}
