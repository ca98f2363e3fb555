use crate::{env_or_default, ConfigError, FromEnv};
use std::path::PathBuf;

/// Configuration for the JSON file backing the catalog.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FromEnv for StoreConfig {
    /// Reads from environment variables:
    /// - STORE_PATH: defaults to "products.json" in the working directory
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            path: PathBuf::from(env_or_default("STORE_PATH", "products.json")),
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("products.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_default_path() {
        temp_env::with_var_unset("STORE_PATH", || {
            let config = StoreConfig::from_env().unwrap();
            assert_eq!(config.path, PathBuf::from("products.json"));
        });
    }

    #[test]
    fn test_from_env_custom_path() {
        temp_env::with_var("STORE_PATH", Some("/var/lib/catalog/products.json"), || {
            let config = StoreConfig::from_env().unwrap();
            assert_eq!(config.path, PathBuf::from("/var/lib/catalog/products.json"));
        });
    }
}
