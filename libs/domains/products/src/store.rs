//! Raw JSON-file persistence for the product collection.
//!
//! No business rules live here: the store reads and writes the ordered
//! list of records and reports failures verbatim.

use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;

use crate::models::Product;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("The store file could not be accessed: {0}")]
    Io(#[from] std::io::Error),

    #[error("The store file contains malformed data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Load the full collection from `path`.
///
/// A missing file is an empty catalog. Any other I/O failure, and any
/// malformed content, is surfaced as-is.
pub async fn load(path: &Path) -> Result<Vec<Product>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    Ok(serde_json::from_slice(&bytes)?)
}

/// Persist the full collection to `path`, replacing previous contents.
pub async fn save(path: &Path, products: &[Product]) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(products)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;

    fn sample(id: u64, code_value: &str) -> Product {
        Product::new(
            id,
            CreateProduct {
                name: format!("Product {}", id),
                quantity: 10,
                code_value: code_value.to_string(),
                is_published: true,
                expiration: "01/01/2030".to_string(),
                price: 9.99,
            },
        )
    }

    #[tokio::test]
    async fn test_missing_file_is_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        let products = load(&path).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let products = vec![sample(1, "A0001"), sample(2, "A0002")];

        save(&path, &products).await.unwrap();
        let loaded = load(&path).await.unwrap();
        assert_eq!(loaded, products);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        save(&path, &[sample(1, "A0001"), sample(2, "A0002")])
            .await
            .unwrap();
        save(&path, &[sample(1, "A0001")]).await.unwrap();

        let loaded = load(&path).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 1);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let err = load(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
