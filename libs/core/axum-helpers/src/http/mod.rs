//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - CORS configuration
//! - Security headers
//! - Shared-secret token authentication
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_permissive_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_permissive_cors_layer());
//! ```

pub mod cors;
pub mod security;
pub mod token;

// Re-export commonly used functions
pub use cors::create_permissive_cors_layer;
pub use security::security_headers;
pub use token::{require_token, TokenAuth};
