//! HTTP handlers for the Products API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
        UnprocessableEntityResponse,
    },
    http::{require_token, TokenAuth},
    AppJson, IdPath,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{ConsumerPrice, CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        patch_product,
        delete_product,
        search_products,
        consumer_price,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, ConsumerPrice),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            UnauthorizedResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints.
///
/// Mutating routes are gated by the shared-secret token middleware.
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    auth: TokenAuth,
) -> Router {
    let shared_service = Arc::new(service);

    let mutating = Router::new()
        .route("/", post(create_product))
        .route(
            "/{id}",
            put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(auth, require_token));

    Router::new()
        .route("/", get(list_products))
        .route("/search", get(search_products))
        .route("/consumer_price", get(consumer_price))
        .route("/{id}", get(get_product))
        .merge(mutating)
        .with_state(shared_service)
}

/// List the full catalog
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products, in catalog order", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AppJson(input): AppJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = u64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = u64, Path, description = "Product id")
    ),
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product replaced successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    AppJson(input): AppJson<CreateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Partially update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = u64, Path, description = "Product id")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    AppJson(patch): AppJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.patch_product(id, patch).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = u64, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Price search query parameters
#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Lower price bound, exclusive
    #[serde(rename = "priceGt")]
    pub price_gt: f64,
}

/// Search products by price
#[utoipa::path(
    get,
    path = "/search",
    tag = "Products",
    params(SearchQuery),
    responses(
        (status = 200, description = "Products priced above the bound", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<SearchQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.search_products(query.price_gt).await?;
    Ok(Json(products))
}

/// Consumer price query parameters
#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
pub struct ConsumerPriceQuery {
    /// Bracketed, comma-separated product ids, e.g. `[1,2,2,3]`.
    /// A repeated id requests one more unit.
    pub list: String,
}

/// Price a shopping list of product ids
#[utoipa::path(
    get,
    path = "/consumer_price",
    tag = "Products",
    params(ConsumerPriceQuery),
    responses(
        (status = 200, description = "Surcharged total and distinct products", body = ConsumerPrice),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn consumer_price<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<ConsumerPriceQuery>,
) -> ProductResult<Json<ConsumerPrice>> {
    let ids = parse_id_list(&query.list)?;
    let result = service.consumer_price(ids).await?;
    Ok(Json(result))
}

/// Parse a `[1,2,3]`-style id list.
fn parse_id_list(raw: &str) -> ProductResult<Vec<u64>> {
    let inner = raw
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| {
            ProductError::validation("list", "The id list must be bracketed, e.g. [1,2,3]")
        })?;

    if inner.trim().is_empty() {
        return Err(ProductError::validation(
            "list",
            "The id list must not be empty",
        ));
    }

    inner
        .split(',')
        .map(|part| {
            part.trim().parse::<u64>().map_err(|_| {
                ProductError::validation(
                    "list",
                    format!("'{}' is not a valid product id", part.trim()),
                )
            })
        })
        .collect()
}
