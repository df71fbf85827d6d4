//! User profile endpoints.

use crate::decode;
use crate::types::{DashboardStats, UserProfile, UserProfileUpdate};
use simkit_http::{ApiError, DataClient, Params};

/// Fetch the current user's profile.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn profile(client: &DataClient) -> Result<UserProfile, ApiError> {
    decode(client.get("/user/profile", &Params::new()).await?)
}

/// Update profile fields. Returns nothing on success.
///
/// # Errors
/// Propagates the client's typed failure.
pub async fn update_profile(
    client: &DataClient,
    update: &UserProfileUpdate,
) -> Result<(), ApiError> {
    let body = serde_json::to_value(update)
        .map_err(|e| ApiError::Protocol(format!("unserializable update: {e}")))?;
    client.put("/user/profile", &body).await?;
    let _ = client.invalidate("/user/profile", &Params::new());
    Ok(())
}

/// Fetch the user's dashboard statistics.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn stats(client: &DataClient) -> Result<DashboardStats, ApiError> {
    decode(client.get("/user/stats", &Params::new()).await?)
}
