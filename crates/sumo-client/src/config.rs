/// Region served by the default endpoint.
pub const DEFAULT_REGION: &str = "us1";

/// Credentials and endpoint of a Sumo Logic deployment.
#[derive(Clone)]
pub struct SumoConfig {
    /// API root, e.g. `https://api.sumologic.com/api`.
    pub endpoint: String,
    pub access_id: String,
    pub access_key: String,
}

impl SumoConfig {
    pub fn new(
        endpoint: impl Into<String>,
        access_id: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_id: access_id.into(),
            access_key: access_key.into(),
        }
    }
}

impl std::fmt::Debug for SumoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SumoConfig")
            .field("endpoint", &self.endpoint)
            .field("access_id", &self.access_id)
            .field("access_key", &"***")
            .finish()
    }
}

/// API root for `region`; empty or `us1` keeps `fallback`.
pub fn endpoint_for_region(region: &str, fallback: &str) -> String {
    let region = region.trim().to_lowercase();
    if region.is_empty() || region == DEFAULT_REGION {
        fallback.to_string()
    } else {
        format!("https://api.{region}.sumologic.com/api")
    }
}
