use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{ConsumerPrice, CreateProduct, Product};

/// Repository trait for Product persistence.
///
/// Implementations sit between the service layer and raw storage and own
/// the catalog invariants: id assignment, code-value uniqueness, and the
/// consumer-price aggregation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product, assigning its id.
    /// Fails when another product already uses the payload's code value.
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get the full catalog, insertion order preserved
    async fn get_all(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by id
    async fn get_by_id(&self, id: u64) -> ProductResult<Product>;

    /// Get the products whose price is strictly greater than `price_gt`,
    /// in catalog order. An empty result is not an error.
    async fn search_by_price(&self, price_gt: f64) -> ProductResult<Vec<Product>>;

    /// Replace an existing product. The id must already exist, and the
    /// code value must not collide with any *other* product.
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by id
    async fn delete(&self, id: u64) -> ProductResult<()>;

    /// Price a shopping list of product ids. A repeated id requests one
    /// more unit of that product.
    async fn consumer_price(&self, ids: Vec<u64>) -> ProductResult<ConsumerPrice>;
}
