pub mod sqlite;

use std::sync::Arc;

use crate::config::{StorageConfig, resolve_path};
use async_trait::async_trait;
use eyre::{Context, Result};
use sqlite::Sqlite;

pub const THEME_KEY: &str = "theme";
pub const LOCALE_KEY: &str = "locale";
pub const TOKEN_KEY: &str = "fnchatbot_token";

/// Client-side key/value state that survives restarts.
#[async_trait]
pub trait Storage {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

pub type ArcStorage = Arc<dyn Storage + Send + Sync>;

pub async fn new_storage(config: &StorageConfig) -> Result<ArcStorage> {
    let storage = match config {
        StorageConfig::Sqlite(sqlite_config) => {
            let path = match sqlite_config.path() {
                Some(path) => Some(resolve_path(path).wrap_err("resolving state db path")?),
                None => None,
            };
            Arc::new(Sqlite::new(path.as_deref()).await?)
        }
    };
    Ok(storage)
}
