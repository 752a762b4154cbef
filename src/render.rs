use chrono::{DateTime, SecondsFormat, Utc};

use crate::alert::{Alert, AlertStatus};

/// Renders a single alert into chat markdown.
///
/// Pure and deterministic: header line with a status glyph, a timing
/// sentence, then severity and description lines. The severity comes from
/// the `severity` label and the summary and description from the matching
/// annotations, each degrading to an empty string when absent.
pub fn render_message(alert: &Alert) -> String {
    let status = alert.status().as_str().to_uppercase();
    let severity = alert.label("severity").unwrap_or_default().to_uppercase();
    let summary = alert.annotation("summary").unwrap_or_default();
    let description = alert.annotation("description").unwrap_or_default();

    let emoji = match alert.status() {
        AlertStatus::Firing => ":bangbang:",
        AlertStatus::Resolved => ":white_check_mark:",
    };

    let started = format_timestamp(alert.starts_at());
    let timing = match alert.status() {
        AlertStatus::Firing => format!("The alert fired at **{started}**"),
        AlertStatus::Resolved => {
            let ended = alert.ends_at().map(format_timestamp).unwrap_or_default();
            format!("The alert which fired at **{started}** was resolved at **{ended}**")
        }
    };

    format!(
        "{emoji} **{status}** - {summary} {emoji}\n{timing}\n**Severity: **{severity}\n**Description: **{description}\n"
    )
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_time() -> DateTime<Utc> {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    fn end_time() -> DateTime<Utc> {
        "2024-01-01T02:15:00Z".parse().unwrap()
    }

    #[test]
    fn test_render_firing_alert() {
        let alert = Alert::builder()
            .status(AlertStatus::Firing)
            .starts_at(start_time())
            .label("severity", "critical")
            .annotation("summary", "disk full")
            .annotation("description", "/var is at 100%")
            .build();

        let message = render_message(&alert);

        assert!(message.contains(":bangbang:"));
        assert!(message.contains("FIRING"));
        assert!(message.contains("CRITICAL"));
        assert!(message.contains("disk full"));
        assert!(message.contains("The alert fired at **2024-01-01T00:00:00Z**"));
        assert!(message.contains("**Description: **/var is at 100%"));
        assert!(!message.contains("was resolved at"));
    }

    #[test]
    fn test_render_resolved_alert() {
        let alert = Alert::builder()
            .status(AlertStatus::Resolved)
            .starts_at(start_time())
            .ends_at(end_time())
            .label("severity", "warning")
            .annotation("summary", "disk almost full")
            .build();

        let message = render_message(&alert);

        assert!(message.contains(":white_check_mark:"));
        assert!(message.contains("RESOLVED"));
        assert!(message.contains(
            "The alert which fired at **2024-01-01T00:00:00Z** was resolved at **2024-01-01T02:15:00Z**"
        ));
    }

    #[test]
    fn test_render_is_deterministic() {
        let alert = Alert::builder()
            .starts_at(start_time())
            .label("severity", "critical")
            .annotation("summary", "disk full")
            .build();

        assert_eq!(render_message(&alert), render_message(&alert));
    }

    #[test]
    fn test_render_without_severity_label() {
        let alert = Alert::builder()
            .starts_at(start_time())
            .annotation("summary", "disk full")
            .build();

        let message = render_message(&alert);

        assert!(message.contains("**Severity: **\n"));
    }
}
