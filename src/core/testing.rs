//! In-memory test doubles for the gateway and telemetry seams.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::gateway::{AiGateway, ChatTurn, GatewayError};
use super::telemetry::{TelemetryEvent, TelemetrySink};

/// Gateway answering from queued scripts.
///
/// Replies are consumed in order; an empty reply queue yields
/// [`GatewayError::EmptyResponse`]. Suggestions default to an empty list.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    suggestions: Mutex<VecDeque<Result<Vec<String>, GatewayError>>>,
    histories: Arc<Mutex<Vec<Vec<ChatTurn>>>>,
    models: Arc<Mutex<Vec<String>>>,
    call_count: AtomicU32,
}

#[allow(clippy::unwrap_used)]
impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn push_reply(&self, text: &str) {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
    }

    /// Queues a failed reply.
    pub fn push_error(&self, error: GatewayError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Queues a suggestion answer.
    pub fn push_suggestions<const N: usize>(&self, items: [&str; N]) {
        self.suggestions
            .lock()
            .unwrap()
            .push_back(Ok(items.iter().map(ToString::to_string).collect()));
    }

    /// Queues a failed suggestion answer.
    pub fn fail_suggestions(&self, error: GatewayError) {
        self.suggestions.lock().unwrap().push_back(Err(error));
    }

    /// Histories passed to `generate`, in call order.
    pub fn histories(&self) -> Vec<Vec<ChatTurn>> {
        self.histories.lock().unwrap().clone()
    }

    /// Model names passed to `generate`, in call order.
    pub fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }

    /// Number of `generate` calls.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
#[allow(clippy::unwrap_used)]
impl AiGateway for ScriptedGateway {
    async fn generate(&self, model: &str, history: &[ChatTurn]) -> Result<String, GatewayError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.histories.lock().unwrap().push(history.to_vec());
        self.models.lock().unwrap().push(model.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayError::EmptyResponse))
    }

    async fn suggest_follow_ups(
        &self,
        _model: &str,
        _text: &str,
    ) -> Result<Vec<String>, GatewayError> {
        self.suggestions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Telemetry sink that records every event.
#[derive(Default, Clone)]
pub struct RecordingTelemetry {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
}

#[allow(clippy::unwrap_used)]
impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    #[allow(clippy::unwrap_used)]
    fn log_event(&self, event: TelemetryEvent) {
        self.events.lock().unwrap().push(event);
    }
}
