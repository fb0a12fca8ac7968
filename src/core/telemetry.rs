//! Usage telemetry.
//!
//! Events are posted fire-and-forget as URL-encoded form fields to a
//! configured collection form. Telemetry is opt-in: without a configured
//! endpoint the app uses [`NoopTelemetry`].

use reqwest::Client;
use tracing::{debug, warn};

use crate::fs::settings::TelemetryConfig;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A task's initial prompt was sent.
    TaskStarted,
    /// The user marked a reply as helpful.
    PositiveFeedback,
    /// The user marked a reply as unhelpful.
    NegativeFeedback,
}

impl EventKind {
    /// Returns the label recorded in the collection form.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TaskStarted => "実行",
            Self::PositiveFeedback => "フィードバック👍",
            Self::NegativeFeedback => "フィードバック👎",
        }
    }
}

/// A single usage event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryEvent {
    /// Display name of the task in use.
    pub task_name: String,
    /// Event kind.
    pub kind: EventKind,
    /// Free-text comment attached to negative feedback.
    pub feedback: Option<String>,
    /// Model identifier in use.
    pub model: String,
}

/// Destination for usage events.
///
/// Implementations must not block and must never surface failures to the user.
pub trait TelemetrySink: Send + Sync {
    /// Records an event.
    fn log_event(&self, event: TelemetryEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn log_event(&self, event: TelemetryEvent) {
        debug!(kind = event.kind.label(), "telemetry disabled, event dropped");
    }
}

/// Sink posting events to a web form endpoint.
#[derive(Debug, Clone)]
pub struct FormTelemetry {
    http: Client,
    config: TelemetryConfig,
}

impl FormTelemetry {
    /// Creates a sink for the given form.
    #[must_use]
    pub fn new(config: TelemetryConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }
}

impl TelemetrySink for FormTelemetry {
    fn log_event(&self, event: TelemetryEvent) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime, telemetry event dropped");
            return;
        };

        let fields = form_fields(&self.config, &event);
        let request = self.http.post(&self.config.endpoint).form(&fields);
        handle.spawn(async move {
            match request.send().await {
                Ok(resp) => debug!(status = %resp.status(), kind = event.kind.label(), "telemetry sent"),
                Err(e) => warn!(error = %e, "telemetry post failed"),
            }
        });
    }
}

/// Maps an event onto the form's entry ids.
///
/// The feedback entry is always present, empty when there is no comment.
#[must_use]
pub fn form_fields(config: &TelemetryConfig, event: &TelemetryEvent) -> Vec<(String, String)> {
    vec![
        (config.task_entry.clone(), event.task_name.clone()),
        (config.event_entry.clone(), event.kind.label().to_string()),
        (
            config.feedback_entry.clone(),
            event.feedback.clone().unwrap_or_default(),
        ),
        (config.model_entry.clone(), event.model.clone()),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn config() -> TelemetryConfig {
        TelemetryConfig {
            endpoint: "http://127.0.0.1:9/formResponse".to_string(),
            ..TelemetryConfig::default()
        }
    }

    fn event(kind: EventKind, feedback: Option<&str>) -> TelemetryEvent {
        TelemetryEvent {
            task_name: "文章の校正".to_string(),
            kind,
            feedback: feedback.map(str::to_string),
            model: "gemini-2.5-flash".to_string(),
        }
    }

    #[test]
    fn labels_match_form_values() {
        assert_eq!(EventKind::TaskStarted.label(), "実行");
        assert_eq!(EventKind::PositiveFeedback.label(), "フィードバック👍");
        assert_eq!(EventKind::NegativeFeedback.label(), "フィードバック👎");
    }

    #[test]
    fn form_fields_use_configured_entries() {
        let config = config();
        let fields = form_fields(&config, &event(EventKind::NegativeFeedback, Some("長すぎる")));
        assert_eq!(
            fields,
            vec![
                (config.task_entry.clone(), "文章の校正".to_string()),
                (config.event_entry.clone(), "フィードバック👎".to_string()),
                (config.feedback_entry.clone(), "長すぎる".to_string()),
                (config.model_entry.clone(), "gemini-2.5-flash".to_string()),
            ]
        );
    }

    #[test]
    fn feedback_entry_is_always_sent() {
        let config = config();
        let fields = form_fields(&config, &event(EventKind::TaskStarted, None));
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[2], (config.feedback_entry.clone(), String::new()));
    }

    #[test]
    fn logging_without_runtime_does_not_panic() {
        FormTelemetry::new(config()).log_event(event(EventKind::TaskStarted, None));
        NoopTelemetry.log_event(event(EventKind::TaskStarted, None));
    }

    #[tokio::test]
    async fn logging_inside_runtime_returns_immediately() {
        FormTelemetry::new(config()).log_event(event(EventKind::PositiveFeedback, None));
    }
}
