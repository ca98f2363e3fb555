//! Shared-secret token authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;

/// Header carrying the shared secret.
pub const TOKEN_HEADER: &str = "token";

/// State for [`require_token`], holding the configured shared secret.
///
/// # Example
/// ```ignore
/// use axum::{middleware, Router};
/// use axum_helpers::http::{require_token, TokenAuth};
///
/// let auth = TokenAuth::new("secret");
/// let router: Router = Router::new()
///     .route_layer(middleware::from_fn_with_state(auth, require_token));
/// ```
#[derive(Clone)]
pub struct TokenAuth {
    secret: String,
}

impl TokenAuth {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn matches(&self, presented: &[u8]) -> bool {
        presented == self.secret.as_bytes()
    }
}

/// Middleware rejecting requests whose `TOKEN` header does not match the
/// configured secret. Returns a 401 error envelope on mismatch.
pub async fn require_token(
    State(auth): State<TokenAuth>,
    request: Request,
    next: Next,
) -> Response {
    match request.headers().get(TOKEN_HEADER) {
        Some(value) if auth.matches(value.as_bytes()) => next.run(request).await,
        _ => AppError::Unauthorized("The user token is not valid".to_string()).into_response(),
    }
}
