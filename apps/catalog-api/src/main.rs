//! Catalog API - REST server for the product catalog

use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::{JsonProductRepository, ProductService};
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Opening product store at {}", config.store.path.display());

    let repository = JsonProductRepository::open(&config.store.path).await?;
    let service = ProductService::new(repository);

    let api_routes = api::routes(service, &config);
    let router = create_router::<openapi::ApiDoc>(api_routes);
    let app = router.merge(health_router(config.app));

    info!(
        "Starting {} on port {}",
        config.app.name, config.server.port
    );

    create_app(app, &config.server).await?;

    info!("Catalog API shutdown complete");
    Ok(())
}
