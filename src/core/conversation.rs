//! Conversation controller.
//!
//! Owns the message list for one chat session and moves between three
//! phases:
//!
//! ```text
//! Setup --start--> Starting --reply--> Chatting --send/reply--> Chatting
//!   ^                 |  error                                     |
//!   +-----------------+-------------------- reset -----------------+
//! ```
//!
//! The controller never awaits. [`Conversation::start`] and
//! [`Conversation::send_message`] return a [`PendingTurn`] carrying the full
//! history; the caller runs [`round_trip`] elsewhere and feeds the
//! [`TurnOutcome`] back through [`Conversation::apply`]. Every outcome carries
//! the session number it was started in, so replies that arrive after a
//! reset are ignored.

use std::sync::Arc;

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::feedback::{FeedbackState, FeedbackVerdict};
use super::gateway::{AiGateway, ChatTurn, GatewayError, Role, follow_ups};
use super::telemetry::EventKind;
use crate::catalog::{Catalog, FieldValues, TaskDefinition};

/// Conversation lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No conversation; the setup form is shown.
    #[default]
    Setup,
    /// The first round trip is in flight.
    Starting,
    /// The conversation is live.
    Chatting,
}

/// One message in the conversation.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Position in the conversation.
    pub id: usize,
    /// Author.
    pub role: Role,
    /// Message text.
    pub text: String,
    /// Follow-up suggestions (model messages only).
    pub suggestions: Vec<String>,
    /// Feedback capture state (model messages only).
    pub feedback: FeedbackState,
    /// When the message was added.
    pub created_at: DateTime<Local>,
}

/// A round trip waiting to be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    /// Session the turn belongs to.
    pub session: u64,
    /// Full conversation history, oldest first.
    pub history: Vec<ChatTurn>,
}

/// A successful round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Generated text.
    pub text: String,
    /// Follow-up suggestions, at most three.
    pub suggestions: Vec<String>,
}

/// Result of a round trip, tagged with its session.
#[derive(Debug)]
pub struct TurnOutcome {
    /// Session the turn was started in.
    pub session: u64,
    /// Reply or failure.
    pub result: Result<Reply, GatewayError>,
}

/// Feedback to report as telemetry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEvent {
    /// Event kind.
    pub kind: EventKind,
    /// Comment for negative feedback.
    pub comment: Option<String>,
}

/// Errors from conversation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    /// The operation needs a live conversation.
    #[error("会話が開始されていません")]
    NotChatting,
    /// The message was empty or whitespace.
    #[error("メッセージが空です")]
    EmptyMessage,
    /// The task key is not in the catalog.
    #[error("タスクが見つかりません。")]
    UnknownTask,
    /// No message (or no model message) has this id.
    #[error("メッセージが見つかりません")]
    UnknownMessage,
    /// The message has no suggestion at this index.
    #[error("提案が見つかりません")]
    UnknownSuggestion,
    /// Feedback for this message was already sent.
    #[error("フィードバックは送信済みです")]
    FeedbackLocked,
}

/// State of one chat session.
#[derive(Debug, Clone)]
pub struct Conversation {
    catalog: Arc<Catalog>,
    phase: Phase,
    task: Option<&'static TaskDefinition>,
    messages: Vec<ChatMessage>,
    session: u64,
    in_flight: usize,
    error_banner: Option<String>,
}

impl Conversation {
    /// Creates an empty conversation in the `Setup` phase.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            phase: Phase::Setup,
            task: None,
            messages: Vec::new(),
            session: 0,
            in_flight: 0,
            error_banner: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Task the conversation was started for.
    #[must_use]
    pub fn task(&self) -> Option<&'static TaskDefinition> {
        self.task
    }

    /// Messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Looks up a message by id.
    #[must_use]
    pub fn message(&self, id: usize) -> Option<&ChatMessage> {
        self.messages.get(id)
    }

    /// Current session number.
    #[must_use]
    pub const fn session(&self) -> u64 {
        self.session
    }

    /// Returns true while a round trip is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Error from the last failed start, shown on the setup screen.
    #[must_use]
    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    /// Clears the setup error banner.
    pub fn dismiss_error(&mut self) {
        self.error_banner = None;
    }

    /// Starts a conversation with the task's initial prompt.
    ///
    /// Any previous conversation is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::UnknownTask`] if `task_key` is not in the
    /// catalog.
    pub fn start(
        &mut self,
        task_key: &str,
        values: &FieldValues,
    ) -> Result<PendingTurn, ConversationError> {
        let task = self
            .catalog
            .get(task_key)
            .ok_or(ConversationError::UnknownTask)?;
        let prompt = task.build_prompt(values);

        self.session += 1;
        self.task = Some(task);
        self.messages.clear();
        self.error_banner = None;
        self.in_flight = 1;
        self.phase = Phase::Starting;
        self.push(Role::User, prompt, Vec::new());

        info!(task = task.key, session = self.session, "conversation started");
        Ok(self.pending())
    }

    /// Appends a user message and returns the turn to run.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::NotChatting`] outside the `Chatting` phase
    /// and [`ConversationError::EmptyMessage`] for blank text.
    pub fn send_message(&mut self, text: &str) -> Result<PendingTurn, ConversationError> {
        if self.phase != Phase::Chatting {
            return Err(ConversationError::NotChatting);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ConversationError::EmptyMessage);
        }

        self.push(Role::User, text.to_string(), Vec::new());
        self.in_flight += 1;
        debug!(messages = self.messages.len(), "user message queued");
        Ok(self.pending())
    }

    /// Sends the `index`th suggestion of model message `message_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::UnknownMessage`] or
    /// [`ConversationError::UnknownSuggestion`] for bad references, otherwise
    /// the same errors as [`Conversation::send_message`].
    pub fn select_suggestion(
        &mut self,
        message_id: usize,
        index: usize,
    ) -> Result<PendingTurn, ConversationError> {
        let message = self
            .message(message_id)
            .ok_or(ConversationError::UnknownMessage)?;
        let text = message
            .suggestions
            .get(index)
            .cloned()
            .ok_or(ConversationError::UnknownSuggestion)?;
        self.send_message(&text)
    }

    /// Applies a finished round trip. Returns false if it was ignored.
    pub fn apply(&mut self, outcome: TurnOutcome) -> bool {
        if outcome.session != self.session || self.phase == Phase::Setup {
            debug!(
                outcome = outcome.session,
                current = self.session,
                "ignoring stale turn outcome"
            );
            return false;
        }
        self.in_flight = self.in_flight.saturating_sub(1);

        match (self.phase, outcome.result) {
            (Phase::Starting, Ok(reply)) => {
                self.push(Role::Model, reply.text, reply.suggestions);
                self.phase = Phase::Chatting;
            }
            (Phase::Starting, Err(e)) => {
                warn!(error = %e, "first turn failed");
                self.messages.clear();
                self.task = None;
                self.in_flight = 0;
                self.phase = Phase::Setup;
                self.error_banner = Some(format!("エラーが発生しました: {e}"));
            }
            (_, Ok(reply)) => {
                self.push(Role::Model, reply.text, reply.suggestions);
            }
            (_, Err(e)) => {
                warn!(error = %e, "turn failed");
                self.push(Role::Model, format!("エラー: {e}"), Vec::new());
            }
        }
        true
    }

    /// Discards the conversation and returns to `Setup`. Idempotent.
    pub fn reset(&mut self) {
        self.session += 1;
        self.phase = Phase::Setup;
        self.task = None;
        self.messages.clear();
        self.in_flight = 0;
        self.error_banner = None;
    }

    /// Marks a model message as helpful.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::UnknownMessage`] or
    /// [`ConversationError::FeedbackLocked`].
    pub fn give_positive(&mut self, message_id: usize) -> Result<FeedbackEvent, ConversationError> {
        let message = self.open_feedback_target(message_id)?;
        message.feedback = FeedbackState::Sent(FeedbackVerdict::Helpful);
        Ok(FeedbackEvent {
            kind: EventKind::PositiveFeedback,
            comment: None,
        })
    }

    /// Opens the comment box for unhelpful feedback.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::UnknownMessage`] or
    /// [`ConversationError::FeedbackLocked`].
    pub fn open_negative(&mut self, message_id: usize) -> Result<(), ConversationError> {
        let message = self.open_feedback_target(message_id)?;
        if !message.feedback.is_commenting() {
            message.feedback = FeedbackState::Commenting(String::new());
        }
        Ok(())
    }

    /// Updates the draft comment of an open comment box.
    pub fn update_comment(&mut self, message_id: usize, comment: &str) {
        if let Some(message) = self.messages.get_mut(message_id)
            && message.feedback.is_commenting()
        {
            message.feedback = FeedbackState::Commenting(comment.to_string());
        }
    }

    /// Closes the comment box without sending.
    pub fn cancel_feedback(&mut self, message_id: usize) {
        if let Some(message) = self.messages.get_mut(message_id) {
            message.feedback.cancel();
        }
    }

    /// Sends unhelpful feedback with `comment`.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::UnknownMessage`] or
    /// [`ConversationError::FeedbackLocked`].
    pub fn submit_negative(
        &mut self,
        message_id: usize,
        comment: &str,
    ) -> Result<FeedbackEvent, ConversationError> {
        let message = self.open_feedback_target(message_id)?;
        message.feedback = FeedbackState::Sent(FeedbackVerdict::Unhelpful);
        let comment = comment.trim();
        Ok(FeedbackEvent {
            kind: EventKind::NegativeFeedback,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        })
    }

    fn open_feedback_target(
        &mut self,
        message_id: usize,
    ) -> Result<&mut ChatMessage, ConversationError> {
        let message = self
            .messages
            .get_mut(message_id)
            .filter(|m| m.role == Role::Model)
            .ok_or(ConversationError::UnknownMessage)?;
        if message.feedback.is_open() {
            Ok(message)
        } else {
            Err(ConversationError::FeedbackLocked)
        }
    }

    fn push(&mut self, role: Role, text: String, suggestions: Vec<String>) {
        let id = self.messages.len();
        self.messages.push(ChatMessage {
            id,
            role,
            text,
            suggestions,
            feedback: FeedbackState::default(),
            created_at: Local::now(),
        });
    }

    fn pending(&self) -> PendingTurn {
        PendingTurn {
            session: self.session,
            history: self
                .messages
                .iter()
                .map(|m| ChatTurn {
                    role: m.role,
                    text: m.text.clone(),
                })
                .collect(),
        }
    }
}

/// Runs one round trip: generate a reply, then ask for follow-ups on it.
///
/// Suggestion failures yield an empty list; only generation errors fail the
/// turn.
pub async fn round_trip(gateway: &dyn AiGateway, model: &str, turn: PendingTurn) -> TurnOutcome {
    let result = match gateway.generate(model, &turn.history).await {
        Ok(text) => {
            let suggestions = follow_ups(gateway, model, &text).await;
            Ok(Reply { text, suggestions })
        }
        Err(e) => Err(e),
    };
    TurnOutcome {
        session: turn.session,
        result,
    }
}
