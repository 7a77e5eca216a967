use async_trait::async_trait;
use sumo_core::{ExecutorError, MetricsExecutor, MetricsQuery};
use tracing::{debug, instrument};

use crate::{config::SumoConfig, error::ClientError};

mod wire;
use wire::{MetricsQueryRequest, MetricsQueryResponse};

/// [`MetricsExecutor`] backed by the Sumo Logic metrics query API.
pub struct SumoMetricsClient {
    http: reqwest::Client,
    cfg: SumoConfig,
}

impl SumoMetricsClient {
    pub fn new(cfg: SumoConfig) -> Self {
        Self::with_client(reqwest::Client::new(), cfg)
    }

    pub fn with_client(http: reqwest::Client, cfg: SumoConfig) -> Self {
        Self { http, cfg }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/metricsQueries",
            self.cfg.endpoint.trim_end_matches('/')
        )
    }

    async fn post(&self, query: &MetricsQuery) -> Result<MetricsQueryResponse, ClientError> {
        let response = self
            .http
            .post(self.url())
            .basic_auth(&self.cfg.access_id, Some(&self.cfg.access_key))
            .json(&MetricsQueryRequest::from(query))
            .send()
            .await?;
        let body = ClientError::check(response).await?.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            ClientError::InvalidResponse(format!("failed to parse response: {e}, body: {body}"))
        })
    }
}

#[async_trait]
impl MetricsExecutor for SumoMetricsClient {
    #[instrument(level = "debug", skip_all, fields(row = %query.row_id))]
    async fn run_query(&self, query: &MetricsQuery) -> Result<f64, ExecutorError> {
        let response = self.post(query).await?;
        debug!(rows = response.query_result.len(), "metrics query answered");

        response.first_value().ok_or_else(|| {
            let detail = response
                .errors
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| format!("no data for '{}'", query.query));
            ExecutorError::EmptyResult(detail)
        })
    }
}
