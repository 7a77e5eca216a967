use sumo_model::TaskRequest;

use crate::timestamp::ResolvedWindow;

/// Substitute task placeholders into a raw query template.
///
/// Replacement is literal and covers every occurrence of `$PROJECT`, `$STAGE`,
/// `$SERVICE` (also in lowercase) and `$DURATION`, the window length in whole
/// seconds rounded up.
pub fn render_query(template: &str, req: &TaskRequest, window: &ResolvedWindow) -> String {
    let duration = window.duration_secs().to_string();

    [
        ("$PROJECT", req.project.as_str()),
        ("$STAGE", req.stage.as_str()),
        ("$SERVICE", req.service.as_str()),
        ("$project", req.project.as_str()),
        ("$stage", req.stage.as_str()),
        ("$service", req.service.as_str()),
        ("$DURATION", duration.as_str()),
    ]
    .into_iter()
    .fold(template.to_string(), |query, (placeholder, value)| {
        query.replace(placeholder, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TaskRequest {
        TaskRequest {
            provider: "sumologic".into(),
            project: "sockshop".into(),
            stage: "staging".into(),
            service: "carts".into(),
            indicators: vec![],
            start: "0".into(),
            end: "300".into(),
            labels: None,
        }
    }

    fn window(start: &str, end: &str) -> ResolvedWindow {
        ResolvedWindow::resolve(start, end).unwrap()
    }

    #[test]
    fn replaces_every_placeholder_in_any_multiplicity() {
        let out = render_query(
            "$SERVICE $project/$PROJECT $stage $STAGE $service $SERVICE window=$DURATION $DURATION",
            &request(),
            &window("0", "300"),
        );
        assert_eq!(
            out,
            "carts sockshop/sockshop staging staging carts carts window=300 300"
        );
        assert!(!out.contains('$'));
    }

    #[test]
    fn duration_has_no_lowercase_alias() {
        let out = render_query("$duration", &request(), &window("0", "300"));
        assert_eq!(out, "$duration");
    }

    #[test]
    fn negative_and_zero_durations_are_rendered_verbatim() {
        assert_eq!(render_query("$DURATION", &request(), &window("300", "0")), "-300");
        assert_eq!(render_query("$DURATION", &request(), &window("5", "5")), "0");
    }

    #[test]
    fn fractional_window_rounds_up() {
        let w = window("2021-01-02T15:00:00Z", "2021-01-02T15:00:59.001Z");
        assert_eq!(render_query("last $DURATIONs", &request(), &w), "last 60s");
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        let q = "metric=cpu | quantize to 1m using avg";
        assert_eq!(render_query(q, &request(), &window("0", "1")), q);
    }
}
