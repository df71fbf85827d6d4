//! Wire DTOs.
//!
//! Field names follow the backend's snake_case payloads; everything the
//! backend may omit is optional or defaulted so older responses keep
//! deserializing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub retail_price: Option<f64>,
    /// Coverage type: `local`, `regional` or `global`
    #[serde(rename = "type", default)]
    pub product_type: Option<String>,
    /// Bundled data volume in megabytes
    #[serde(default)]
    pub data_size: i64,
    #[serde(default)]
    pub valid_days: i64,
    /// JSON-encoded list of covered countries, passed through verbatim
    #[serde(default)]
    pub countries: Option<String>,
    /// JSON-encoded feature list, passed through verbatim
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub product_id: i64,
    #[serde(default)]
    pub product_name: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub esim_info: Option<EsimInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderStats {
    #[serde(default)]
    pub total_orders: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPage {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub stats: OrderStats,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EsimInfo {
    pub iccid: String,
    #[serde(default)]
    pub activation_code: String,
    #[serde(default)]
    pub qr_code: String,
    #[serde(default)]
    pub apn_type: Option<String>,
    #[serde(default)]
    pub is_roaming: bool,
    #[serde(default)]
    pub activated_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub data_used: Option<i64>,
    #[serde(default)]
    pub data_remaining: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EsimUsage {
    pub iccid: String,
    #[serde(default)]
    pub data_used: i64,
    #[serde(default)]
    pub data_remaining: i64,
    #[serde(default)]
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletBalance {
    pub balance: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RechargeOrder {
    pub order_no: String,
    pub amount: f64,
    pub status: String,
    #[serde(default)]
    pub pay_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub telegram_id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub active_esims: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

fn default_currency() -> String {
    "USD".to_owned()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_deserializes_sparse_payload() {
        let product: Product = serde_json::from_value(json!({
            "id": 3,
            "name": "Japan 10GB",
            "price": 12.9
        }))
        .unwrap();
        assert_eq!(product.id, 3);
        assert_eq!(product.data_size, 0);
        assert!(!product.is_hot);
        assert!(product.countries.is_none());
    }

    #[test]
    fn test_order_defaults_currency() {
        let order: Order = serde_json::from_value(json!({
            "id": 1,
            "order_number": "SO-1001",
            "product_id": 3,
            "amount": 12.9,
            "status": "pending"
        }))
        .unwrap();
        assert_eq!(order.currency, "USD");
        assert!(order.esim_info.is_none());
    }

    #[test]
    fn test_profile_update_skips_missing_fields() {
        let update = UserProfileUpdate {
            first_name: Some("Ada".to_owned()),
            last_name: None,
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"first_name": "Ada"})
        );
    }
}
