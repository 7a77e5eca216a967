//! Event type naming on the bus: `sh.keptn.event.<task>.<phase>`.

const PREFIX: &str = "sh.keptn.event.";

pub const GET_SLI_TASK: &str = "get-sli";
pub const CONFIGURE_MONITORING_TASK: &str = "configure-monitoring";

/// Pre-0.8 type still sent by the CLI for `keptn configure monitoring`.
pub const LEGACY_CONFIGURE_MONITORING: &str = "sh.keptn.event.monitoring.configure";

pub fn triggered_type(task: &str) -> String {
    format!("{PREFIX}{task}.triggered")
}

pub fn started_type(task: &str) -> String {
    format!("{PREFIX}{task}.started")
}

pub fn finished_type(task: &str) -> String {
    format!("{PREFIX}{task}.finished")
}

/// Map legacy event types onto their task-based equivalent.
pub fn normalize_type(event_type: &str) -> String {
    if event_type == LEGACY_CONFIGURE_MONITORING {
        triggered_type(CONFIGURE_MONITORING_TASK)
    } else {
        event_type.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_bus_convention() {
        assert_eq!(triggered_type(GET_SLI_TASK), "sh.keptn.event.get-sli.triggered");
        assert_eq!(started_type(GET_SLI_TASK), "sh.keptn.event.get-sli.started");
        assert_eq!(finished_type(GET_SLI_TASK), "sh.keptn.event.get-sli.finished");
    }

    #[test]
    fn legacy_monitoring_type_is_normalized() {
        assert_eq!(
            normalize_type(LEGACY_CONFIGURE_MONITORING),
            "sh.keptn.event.configure-monitoring.triggered"
        );
        assert_eq!(
            normalize_type("sh.keptn.event.get-sli.triggered"),
            "sh.keptn.event.get-sli.triggered"
        );
    }
}
