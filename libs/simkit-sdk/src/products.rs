//! Product catalog endpoints.

use crate::decode;
use crate::types::{Product, ProductPage};
use simkit_http::{ApiError, DataClient, Params};

/// Query options for the product list.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Coverage type: `local`, `regional` or `global`
    pub product_type: Option<String>,
    /// Two-letter country code
    pub country: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ProductFilter {
    fn into_params(self) -> Params {
        let mut params = Params::new();
        if let Some(product_type) = self.product_type {
            params.insert("type".to_owned(), product_type);
        }
        if let Some(country) = self.country {
            params.insert("country".to_owned(), country);
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

/// List products matching `filter`.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn list(client: &DataClient, filter: ProductFilter) -> Result<ProductPage, ApiError> {
    decode(client.get("/products", &filter.into_params()).await?)
}

/// Fetch one product by id.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn by_id(client: &DataClient, id: &str) -> Result<Product, ApiError> {
    decode(client.get(&format!("/products/{id}"), &Params::new()).await?)
}

/// List the curated hot products.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn hot(client: &DataClient) -> Result<Vec<Product>, ApiError> {
    decode(client.get("/products/hot", &Params::new()).await?)
}
