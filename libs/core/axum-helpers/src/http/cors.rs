use tower_http::cors::CorsLayer;

/// Creates a permissive CORS layer.
///
/// Allows any origin. Suitable for token-gated APIs that do not rely on
/// cookies or other ambient browser credentials.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
