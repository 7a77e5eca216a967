use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Url;
use serde::Deserialize;
use sumo_core::{ResourceKey, SliConfigStore, StoreError};
use sumo_model::SliConfig;
use tracing::{debug, instrument};

use crate::error::ClientError;

/// Resource as returned by the configuration service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Resource {
    #[serde(default, rename = "resourceURI")]
    resource_uri: String,
    /// Base64 of the file content.
    resource_content: String,
}

/// [`SliConfigStore`] reading resources from the Keptn configuration service.
pub struct ConfigServiceStore {
    http: reqwest::Client,
    base_url: String,
}

impl ConfigServiceStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// `{base}/v1/project/{p}/stage/{s}/service/{svc}/resource/{path}` with the
    /// resource path escaped as a single segment.
    fn resource_url(&self, key: &ResourceKey) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend([
                "v1",
                "project",
                key.project.as_str(),
                "stage",
                key.stage.as_str(),
                "service",
                key.service.as_str(),
                "resource",
                key.path.as_str(),
            ]);
        Ok(url)
    }

    async fn content(&self, key: &ResourceKey) -> Result<String, ClientError> {
        let response = self.http.get(self.resource_url(key)?).send().await?;
        let resource: Resource = ClientError::check(response).await?.json().await?;
        debug!(uri = %resource.resource_uri, "resource fetched");

        let bytes = STANDARD
            .decode(resource.resource_content.trim())
            .map_err(|e| ClientError::InvalidResponse(format!("resource content is not base64: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("resource content is not utf-8: {e}")))
    }
}

#[async_trait]
impl SliConfigStore for ConfigServiceStore {
    #[instrument(level = "debug", skip_all, fields(project = %key.project, stage = %key.stage, service = %key.service))]
    async fn fetch(&self, key: &ResourceKey) -> Result<SliConfig, StoreError> {
        let content = self.content(key).await?;
        Ok(SliConfig::from_yaml(&content)?)
    }
}
