//! Core business logic: the model gateway, form and conversation state.

pub mod conversation;
pub mod feedback;
pub mod gateway;
pub mod gemini;
pub mod runner;
pub mod segments;
pub mod setup_form;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

pub use conversation::{
    ChatMessage, Conversation, ConversationError, FeedbackEvent, PendingTurn, Phase, Reply,
    TurnOutcome, round_trip,
};
pub use feedback::{FeedbackState, FeedbackVerdict};
pub use gateway::{AiGateway, ChatTurn, GatewayError, MAX_SUGGESTIONS, Role};
pub use gemini::GeminiGateway;
pub use runner::{OneShotRequest, OneShotResult, run_once};
pub use segments::{Segment, code_blocks, split_segments};
pub use setup_form::{FileTicket, SetupForm, Submission, ValidationError};
pub use telemetry::{EventKind, FormTelemetry, NoopTelemetry, TelemetryEvent, TelemetrySink};

/// Gemini model presets offered by the settings overlay.
///
/// Any other model id can still be set in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    /// Fast general-purpose model.
    #[default]
    GeminiFlash,
    /// Slower, stronger reasoning model.
    GeminiPro,
    /// Cheapest and fastest model.
    GeminiFlashLite,
}

impl Model {
    /// Returns the display name for the model.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GeminiFlash => "Gemini 2.5 Flash",
            Self::GeminiPro => "Gemini 2.5 Pro",
            Self::GeminiFlashLite => "Gemini 2.5 Flash-Lite",
        }
    }

    /// Returns the API model id.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::GeminiFlash => "gemini-2.5-flash",
            Self::GeminiPro => "gemini-2.5-pro",
            Self::GeminiFlashLite => "gemini-2.5-flash-lite",
        }
    }

    /// Returns a short description of the model.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::GeminiFlash => "バランス型（既定）",
            Self::GeminiPro => "高精度・低速",
            Self::GeminiFlashLite => "軽量・高速",
        }
    }

    /// Looks up a preset by API id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.id() == id)
    }

    /// Returns the next model in the cycle.
    ///
    /// Cycles: Flash -> Pro -> Flash-Lite -> Flash
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::GeminiFlash => Self::GeminiPro,
            Self::GeminiPro => Self::GeminiFlashLite,
            Self::GeminiFlashLite => Self::GeminiFlash,
        }
    }

    /// Returns the previous model in the cycle.
    #[must_use]
    pub const fn prev(&self) -> Self {
        match self {
            Self::GeminiFlash => Self::GeminiFlashLite,
            Self::GeminiPro => Self::GeminiFlash,
            Self::GeminiFlashLite => Self::GeminiPro,
        }
    }

    /// Returns all presets.
    #[must_use]
    pub const fn all() -> &'static [Model] {
        &[Model::GeminiFlash, Model::GeminiPro, Model::GeminiFlashLite]
    }
}
