//! API routes module

pub mod products;

use axum::Router;
use domain_products::{ProductRepository, ProductService};

use crate::config::Config;

/// Create all API routes
pub fn routes<R: ProductRepository + 'static>(
    service: ProductService<R>,
    config: &Config,
) -> Router {
    Router::new().nest("/products", products::router(service, config))
}
