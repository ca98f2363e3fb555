//! Configuration for the Catalog API

use core_config::{
    app_info, auth::AuthConfig, server::ServerConfig, store::StoreConfig, AppInfo, FromEnv,
};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let store = StoreConfig::from_env()?;
        let auth = AuthConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            store,
            auth,
            environment,
        })
    }
}
