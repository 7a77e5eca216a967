//! JSON bodies of `POST /v1/metricsQueries`.

use serde::{Deserialize, Serialize};
use sumo_core::MetricsQuery;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetricsQueryRequest<'a> {
    pub queries: Vec<QueryRow<'a>>,
    pub time_range: TimeRange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryRow<'a> {
    pub row_id: &'a str,
    pub query: &'a str,
    pub quantization: i64,
    pub rollup: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TimeRange {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub from: Boundary,
    pub to: Boundary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Boundary {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub epoch_millis: i64,
    pub range_name: &'static str,
}

impl Boundary {
    fn epoch(epoch_millis: i64, range_name: &'static str) -> Self {
        Self {
            kind: "EpochTimeRangeBoundary",
            epoch_millis,
            range_name,
        }
    }
}

impl<'a> From<&'a MetricsQuery> for MetricsQueryRequest<'a> {
    fn from(q: &'a MetricsQuery) -> Self {
        Self {
            queries: vec![QueryRow {
                row_id: &q.row_id,
                query: &q.query,
                quantization: q.quantization_millis,
                rollup: q.rollup.as_str(),
            }],
            time_range: TimeRange {
                kind: "BeginBoundedTimeRange",
                from: Boundary::epoch(q.window.start_millis(), "from"),
                to: Boundary::epoch(q.window.end_millis(), "to"),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetricsQueryResponse {
    #[serde(default)]
    pub query_result: Vec<QueryResult>,
    /// Present when some rows failed; shape varies, only logged.
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryResult {
    #[serde(default)]
    pub time_series_list: TimeSeriesList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimeSeriesList {
    #[serde(default)]
    pub time_series: Vec<TimeSeries>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TimeSeries {
    #[serde(default)]
    pub points: Points,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Points {
    #[serde(default)]
    pub values: Vec<f64>,
}

impl MetricsQueryResponse {
    /// First value of the first series of the first row.
    pub fn first_value(&self) -> Option<f64> {
        self.query_result
            .first()?
            .time_series_list
            .time_series
            .first()?
            .points
            .values
            .first()
            .copied()
    }
}
