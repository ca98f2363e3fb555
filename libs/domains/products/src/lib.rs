//! Products Domain
//!
//! This module provides a complete domain implementation for managing a
//! product catalog persisted to a JSON file.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, orchestration
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← Catalog invariants, pricing (trait + JSON-file impl)
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │    Store    │  ← Raw file persistence
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::TokenAuth;
//! use domain_products::{handlers, JsonProductRepository, ProductService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Open the file-backed repository and wrap it in a service
//! let repository = JsonProductRepository::open("products.json").await?;
//! let service = ProductService::new(repository);
//!
//! // Create the Axum router; mutating routes require the token
//! let router = handlers::router(service, TokenAuth::new("secret"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod json;
pub mod models;
mod pricing;
pub mod repository;
pub mod service;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use json::JsonProductRepository;
pub use models::{ConsumerPrice, CreateProduct, Product, UpdateProduct};
pub use repository::ProductRepository;
pub use service::ProductService;
pub use store::StoreError;
