use async_trait::async_trait;

use crate::{error::ExecutorError, quantize::Rollup, timestamp::ResolvedWindow};

/// Row id used for the single query sent per indicator.
pub const DEFAULT_ROW_ID: &str = "A";

/// One metrics query, already rendered and stripped of its quantize clause.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsQuery {
    pub query: String,
    pub row_id: String,
    pub quantization_millis: i64,
    pub rollup: Rollup,
    pub window: ResolvedWindow,
}

impl MetricsQuery {
    pub fn new(
        query: impl Into<String>,
        quantization_millis: i64,
        rollup: Rollup,
        window: ResolvedWindow,
    ) -> Self {
        Self {
            query: query.into(),
            row_id: DEFAULT_ROW_ID.to_string(),
            quantization_millis,
            rollup,
            window,
        }
    }
}

/// Metrics backend able to reduce a query to a single value.
#[async_trait]
pub trait MetricsExecutor: Send + Sync + 'static {
    /// First data point of the first series of the query's row.
    async fn run_query(&self, query: &MetricsQuery) -> Result<f64, ExecutorError>;
}
