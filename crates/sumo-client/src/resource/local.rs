use std::path::PathBuf;

use async_trait::async_trait;
use sumo_core::{ResourceKey, SliConfigStore, StoreError};
use sumo_model::SliConfig;
use tracing::debug;

/// [`SliConfigStore`] reading resources below a local directory.
///
/// Project, stage and service are ignored; every task sees the same file.
#[derive(Debug, Clone)]
pub struct LocalResourceStore {
    base_dir: PathBuf,
}

impl LocalResourceStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl SliConfigStore for LocalResourceStore {
    async fn fetch(&self, key: &ResourceKey) -> Result<SliConfig, StoreError> {
        let path = self.base_dir.join(&key.path);
        debug!(path = %path.display(), "reading local resource");

        let content = tokio::fs::read_to_string(&path).await?;
        Ok(SliConfig::from_yaml(&content)?)
    }
}
