//! Products API routes

use axum::Router;
use axum_helpers::TokenAuth;
use domain_products::{handlers, ProductRepository, ProductService};

use crate::config::Config;

/// Create the products router, wiring the token gate from configuration
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    config: &Config,
) -> Router {
    let auth = TokenAuth::new(config.auth.token.clone());
    handlers::router(service, auth)
}
