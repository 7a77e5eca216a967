use async_trait::async_trait;
use sumo_model::{SliConfig, TaskRequest};

use crate::error::StoreError;

/// Address of a configuration resource of one service in one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceKey {
    pub project: String,
    pub stage: String,
    pub service: String,
    pub path: String,
}

impl ResourceKey {
    pub fn for_request(req: &TaskRequest, path: impl Into<String>) -> Self {
        Self {
            project: req.project.clone(),
            stage: req.stage.clone(),
            service: req.service.clone(),
            path: path.into(),
        }
    }
}

/// Source of per-service indicator definitions.
#[async_trait]
pub trait SliConfigStore: Send + Sync + 'static {
    async fn fetch(&self, key: &ResourceKey) -> Result<SliConfig, StoreError>;
}
