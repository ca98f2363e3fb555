//! Product Service - orchestration layer
//!
//! Gates payloads through validation and forwards operations to the
//! repository, passing every result and error through unchanged in kind.

use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{ConsumerPrice, CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service decoupling the HTTP boundary from the repository's concrete
/// type. Payload validation happens here, before anything reaches storage.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Get the full catalog
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.get_all().await
    }

    /// Get a product by id
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: u64) -> ProductResult<Product> {
        self.repository.get_by_id(id).await
    }

    /// Get the products priced strictly above the threshold
    #[instrument(skip(self))]
    pub async fn search_products(&self, price_gt: f64) -> ProductResult<Vec<Product>> {
        self.repository.search_by_price(price_gt).await
    }

    /// Replace an existing product with the given payload
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: u64, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.update(Product::new(id, input)).await
    }

    /// Merge a partial update into an existing product.
    ///
    /// The merged record is re-validated before it is stored, so a patch
    /// cannot leave the catalog holding a record a create would reject.
    #[instrument(skip(self, patch))]
    pub async fn patch_product(&self, id: u64, patch: UpdateProduct) -> ProductResult<Product> {
        let mut product = self.repository.get_by_id(id).await?;
        product.apply_update(patch);
        product.validate()?;
        self.repository.update(product).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: u64) -> ProductResult<()> {
        self.repository.delete(id).await
    }

    /// Price a shopping list of product ids
    #[instrument(skip(self))]
    pub async fn consumer_price(&self, ids: Vec<u64>) -> ProductResult<ConsumerPrice> {
        self.repository.consumer_price(ids).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn valid_payload() -> CreateProduct {
        CreateProduct {
            name: "Wine - Sherry Dry Sack".to_string(),
            quantity: 304,
            code_value: "S23453B".to_string(),
            is_published: true,
            expiration: "30/11/2028".to_string(),
            price: 81.31,
        }
    }

    #[tokio::test]
    async fn test_create_delegates_after_validation() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .returning(|input| Ok(Product::new(1, input)));

        let service = ProductService::new(mock_repo);
        let product = service.create_product(valid_payload()).await.unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.code_value, "S23453B");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload_before_the_repository() {
        // No expectations: the repository must never be reached.
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let input = CreateProduct {
            name: String::new(),
            ..valid_payload()
        };
        let err = service.create_product(input).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation { field: "name", .. }));
    }

    #[tokio::test]
    async fn test_update_builds_record_with_the_path_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_update()
            .withf(|product| product.id == 9 && product.name == "Wine - Sherry Dry Sack")
            .returning(|product| Ok(product));

        let service = ProductService::new(mock_repo);
        let updated = service.update_product(9, valid_payload()).await.unwrap();
        assert_eq!(updated.id, 9);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_payload() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let input = CreateProduct {
            expiration: "soon".to_string(),
            ..valid_payload()
        };
        let err = service.update_product(9, input).await.unwrap_err();
        assert!(matches!(
            err,
            ProductError::Validation {
                field: "expiration",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_patch_merges_into_the_existing_record() {
        let existing = Product::new(3, valid_payload());

        let mut mock_repo = MockProductRepository::new();
        let fetched = existing.clone();
        mock_repo
            .expect_get_by_id()
            .with(eq(3u64))
            .returning(move |_| Ok(fetched.clone()));
        mock_repo
            .expect_update()
            .withf(|product| {
                product.id == 3 && product.price == 12.0 && product.name == "Wine - Sherry Dry Sack"
            })
            .returning(|product| Ok(product));

        let service = ProductService::new(mock_repo);
        let patch = UpdateProduct {
            price: Some(12.0),
            ..Default::default()
        };
        let patched = service.patch_product(3, patch).await.unwrap();
        assert_eq!(patched.price, 12.0);
    }

    #[tokio::test]
    async fn test_patch_of_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Err(ProductError::NotFound(id)));

        let service = ProductService::new(mock_repo);
        let err = service
            .patch_product(42, UpdateProduct::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_patch_producing_an_invalid_record_is_rejected() {
        let existing = Product::new(3, valid_payload());

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(existing.clone()));
        // update must never run: the merged record fails validation

        let service = ProductService::new(mock_repo);
        let patch = UpdateProduct {
            price: Some(-5.0),
            ..Default::default()
        };
        let err = service.patch_product(3, patch).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation { field: "price", .. }));
    }

    #[tokio::test]
    async fn test_errors_pass_through_unchanged() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .returning(|input| Err(ProductError::DuplicateCodeValue(input.code_value)));

        let service = ProductService::new(mock_repo);
        let err = service.create_product(valid_payload()).await.unwrap_err();
        assert!(matches!(err, ProductError::DuplicateCodeValue(_)));
    }

    #[tokio::test]
    async fn test_consumer_price_delegates() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_consumer_price()
            .with(eq(vec![1u64, 2, 2]))
            .returning(|_| {
                Ok(ConsumerPrice {
                    products: Vec::new(),
                    total_price: 60.5,
                })
            });

        let service = ProductService::new(mock_repo);
        let result = service.consumer_price(vec![1, 2, 2]).await.unwrap();
        assert_eq!(result.total_price, 60.5);
    }
}
