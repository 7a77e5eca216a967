use serde::{Deserialize, Serialize};

/// Whether the task itself ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    Succeeded,
    Errored,
}

/// Verdict attached to a finished task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultType {
    #[serde(rename = "pass")]
    Pass,
    #[serde(rename = "fail")]
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_the_bus() {
        assert_eq!(serde_json::to_string(&StatusType::Succeeded).unwrap(), r#""succeeded""#);
        assert_eq!(serde_json::to_string(&StatusType::Errored).unwrap(), r#""errored""#);
        assert_eq!(serde_json::to_string(&ResultType::Pass).unwrap(), r#""pass""#);
        assert_eq!(serde_json::to_string(&ResultType::Failed).unwrap(), r#""fail""#);
    }

    #[test]
    fn decodes_failed_result() {
        let r: ResultType = serde_json::from_str(r#""fail""#).unwrap();
        assert_eq!(r, ResultType::Failed);
    }
}
