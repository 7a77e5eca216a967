use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Location of the indicator definitions inside a service's configuration resources.
pub const SLI_RESOURCE_PATH: &str = "sumologic-service/sli.yaml";

/// Indicator name → raw query template, as stored in `sli.yaml`.
///
/// ```yaml
/// spec_version: '1.0'
/// indicators:
///   throughput: "metric=requests service=$SERVICE | quantize to 1m using sum"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<String>,
    #[serde(default)]
    pub indicators: BTreeMap<String, String>,
}

impl SliConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ModelError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Template for `indicator`, if the document defines one.
    pub fn query(&self, indicator: &str) -> Option<&str> {
        self.indicators.get(indicator).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for SliConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            spec_version: None,
            indicators: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keptn_sli_document() {
        let cfg = SliConfig::from_yaml(
            r#"---
spec_version: '1.0'
indicators:
  throughput: "metric=requests service=$SERVICE | quantize to 1m using sum"
  errorrate: metric=errors | quantize to 30s using avg
"#,
        )
        .unwrap();

        assert_eq!(cfg.spec_version.as_deref(), Some("1.0"));
        assert_eq!(
            cfg.query("throughput"),
            Some("metric=requests service=$SERVICE | quantize to 1m using sum")
        );
        assert_eq!(cfg.query("errorrate"), Some("metric=errors | quantize to 30s using avg"));
        assert_eq!(cfg.query("latency"), None);
    }

    #[test]
    fn missing_indicators_section_is_empty() {
        let cfg = SliConfig::from_yaml("spec_version: '1.0'\n").unwrap();
        assert!(cfg.indicators.is_empty());
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = SliConfig::from_yaml("indicators: [unclosed").unwrap_err();
        assert!(matches!(err, ModelError::SliConfig(_)));
    }
}
