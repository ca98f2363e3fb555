//! JSON-file implementation of ProductRepository

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{ConsumerPrice, CreateProduct, Product};
use crate::pricing;
use crate::repository::ProductRepository;
use crate::store::{self, StoreError};

/// File-backed repository holding an in-memory mirror of the catalog.
///
/// The mirror is loaded once when the repository is opened. Every mutation
/// builds the next collection state, persists it, and only then commits it
/// to the mirror, so the file and memory never diverge after a successful
/// call. A single mutex serializes every read-modify-persist sequence.
pub struct JsonProductRepository {
    path: PathBuf,
    products: Mutex<Vec<Product>>,
}

impl JsonProductRepository {
    /// Open the repository over the given file.
    ///
    /// A missing file starts an empty catalog; unreadable or malformed
    /// content is an error.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let products = store::load(&path).await?;

        tracing::info!(
            path = %path.display(),
            count = products.len(),
            "Product store loaded"
        );

        Ok(Self {
            path,
            products: Mutex::new(products),
        })
    }

    /// Next available id. Ids of deleted records are never handed out
    /// again while a later record holds a higher one.
    fn next_id(products: &[Product]) -> u64 {
        products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}

#[async_trait]
impl ProductRepository for JsonProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.lock().await;

        if products.iter().any(|p| p.code_value == input.code_value) {
            return Err(ProductError::DuplicateCodeValue(input.code_value));
        }

        let product = Product::new(Self::next_id(&products), input);

        let mut next = products.clone();
        next.push(product.clone());
        store::save(&self.path, &next).await?;
        *products = next;

        tracing::info!(product_id = product.id, "Product created");
        Ok(product)
    }

    async fn get_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.lock().await.clone())
    }

    async fn get_by_id(&self, id: u64) -> ProductResult<Product> {
        self.products
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ProductError::NotFound(id))
    }

    async fn search_by_price(&self, price_gt: f64) -> ProductResult<Vec<Product>> {
        Ok(self
            .products
            .lock()
            .await
            .iter()
            .filter(|p| p.price > price_gt)
            .cloned()
            .collect())
    }

    #[instrument(skip(self, product), fields(product_id = product.id))]
    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.lock().await;

        let index = products
            .iter()
            .position(|p| p.id == product.id)
            .ok_or(ProductError::NotFound(product.id))?;

        // A record keeping its own code value is not a collision.
        if products
            .iter()
            .any(|p| p.id != product.id && p.code_value == product.code_value)
        {
            return Err(ProductError::DuplicateCodeValue(product.code_value));
        }

        let mut next = products.clone();
        next[index] = product.clone();
        store::save(&self.path, &next).await?;
        *products = next;

        tracing::info!("Product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: u64) -> ProductResult<()> {
        let mut products = self.products.lock().await;

        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(ProductError::NotFound(id))?;

        let mut next = products.clone();
        next.remove(index);
        store::save(&self.path, &next).await?;
        *products = next;

        tracing::info!("Product deleted");
        Ok(())
    }

    async fn consumer_price(&self, ids: Vec<u64>) -> ProductResult<ConsumerPrice> {
        let products = self.products.lock().await;
        pricing::consumer_price(&products, &ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, code_value: &str, price: f64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            quantity: 10,
            code_value: code_value.to_string(),
            is_published: true,
            expiration: "01/01/2030".to_string(),
            price,
        }
    }

    async fn open_repository(dir: &tempfile::TempDir) -> JsonProductRepository {
        JsonProductRepository::open(dir.path().join("products.json"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get_by_id_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        let created = repository
            .create(payload("Salmon", "S0001", 12.5))
            .await
            .unwrap();
        let fetched = repository.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Salmon");
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        let a = repository.create(payload("A", "A1", 1.0)).await.unwrap();
        let b = repository.create(payload("B", "B1", 2.0)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_code_value() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        repository.create(payload("A", "DUP", 1.0)).await.unwrap();
        let err = repository
            .create(payload("B", "DUP", 2.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::DuplicateCodeValue(code) if code == "DUP"));
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reassigned() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        repository.create(payload("A", "A1", 1.0)).await.unwrap();
        let b = repository.create(payload("B", "B1", 2.0)).await.unwrap();
        repository.create(payload("C", "C1", 3.0)).await.unwrap();

        repository.delete(b.id).await.unwrap();
        let d = repository.create(payload("D", "D1", 4.0)).await.unwrap();

        // the highest id so far is 3, so the new record gets 4
        assert_eq!(d.id, 4);
    }

    #[tokio::test]
    async fn test_get_by_id_unknown_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        let err = repository.get_by_id(42).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_get_all_preserves_insertion_order_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        repository.create(payload("A", "A1", 1.0)).await.unwrap();
        repository.create(payload("B", "B1", 2.0)).await.unwrap();
        repository.create(payload("C", "C1", 3.0)).await.unwrap();

        let first = repository.get_all().await.unwrap();
        let second = repository.get_all().await.unwrap();

        let names: Vec<_> = first.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_search_by_price_returns_strictly_greater() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        repository.create(payload("A", "A1", 5.0)).await.unwrap();
        repository.create(payload("B", "B1", 10.0)).await.unwrap();
        repository.create(payload("C", "C1", 15.0)).await.unwrap();

        let found = repository.search_by_price(10.0).await.unwrap();
        let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["C"]);

        // searching above the maximum price yields an empty, non-error result
        let empty = repository.search_by_price(15.0).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_record_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        let created = repository.create(payload("A", "A1", 1.0)).await.unwrap();

        let mut replacement = created.clone();
        replacement.name = "A renamed".to_string();
        replacement.price = 99.0;
        repository.update(replacement.clone()).await.unwrap();

        let fetched = repository.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, replacement);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        let product = Product::new(42, payload("Ghost", "G1", 1.0));
        let err = repository.update(product).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_update_keeping_own_code_value_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        let created = repository.create(payload("A", "A1", 1.0)).await.unwrap();

        let mut replacement = created.clone();
        replacement.price = 2.0;
        // same code_value as before: colliding only with itself is fine
        assert!(repository.update(replacement).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_stealing_another_code_value_fails() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        repository.create(payload("A", "A1", 1.0)).await.unwrap();
        let b = repository.create(payload("B", "B1", 2.0)).await.unwrap();

        let mut replacement = b.clone();
        replacement.code_value = "A1".to_string();
        let err = repository.update(replacement).await.unwrap_err();
        assert!(matches!(err, ProductError::DuplicateCodeValue(code) if code == "A1"));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        let created = repository.create(payload("A", "A1", 1.0)).await.unwrap();
        repository.delete(created.id).await.unwrap();

        let err = repository.get_by_id(created.id).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_first_record_works() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        let first = repository.create(payload("A", "A1", 1.0)).await.unwrap();
        repository.create(payload("B", "B1", 2.0)).await.unwrap();

        repository.delete(first.id).await.unwrap();

        let remaining = repository.get_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "B");
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        let err = repository.delete(42).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_mutations_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        {
            let repository = JsonProductRepository::open(&path).await.unwrap();
            repository.create(payload("A", "A1", 1.0)).await.unwrap();
            repository.create(payload("B", "B1", 2.0)).await.unwrap();
            repository.delete(1).await.unwrap();
        }

        let reopened = JsonProductRepository::open(&path).await.unwrap();
        let products = reopened.get_all().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "B");
    }

    #[tokio::test]
    async fn test_code_values_stay_unique_after_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        repository.create(payload("A", "A1", 1.0)).await.unwrap();
        repository.create(payload("B", "B1", 2.0)).await.unwrap();
        let _ = repository.create(payload("C", "A1", 3.0)).await;

        let products = repository.get_all().await.unwrap();
        let mut codes: Vec<_> = products.iter().map(|p| p.code_value.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), products.len());
    }

    #[tokio::test]
    async fn test_consumer_price_reads_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let repository = open_repository(&dir).await;

        let mut cheap = payload("Cheap", "CH1", 10.0);
        cheap.quantity = 1;
        let mut bulk = payload("Bulk", "BU1", 20.0);
        bulk.quantity = 5;

        let a = repository.create(cheap).await.unwrap();
        let b = repository.create(bulk).await.unwrap();

        let result = repository
            .consumer_price(vec![a.id, b.id, b.id])
            .await
            .unwrap();
        assert!((result.total_price - 60.5).abs() < 1e-9);
        assert_eq!(result.products.len(), 2);
    }
}
