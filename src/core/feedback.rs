//! Per-message feedback state.
//!
//! Feedback moves one way: `Pending` to `Sent`, optionally through
//! `Commenting` for negative feedback. Once sent, the feedback controls for
//! the message are gone.

/// The verdict recorded for a model message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackVerdict {
    /// Marked helpful.
    Helpful,
    /// Marked unhelpful.
    Unhelpful,
}

/// Feedback capture state of a model message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedbackState {
    /// No feedback given yet.
    #[default]
    Pending,
    /// The unhelpful comment box is open with the draft comment.
    Commenting(String),
    /// Feedback was sent and is locked.
    Sent(FeedbackVerdict),
}

impl FeedbackState {
    /// Returns true if feedback can still be given.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Sent(_))
    }

    /// Returns true while the comment box is open.
    #[must_use]
    pub const fn is_commenting(&self) -> bool {
        matches!(self, Self::Commenting(_))
    }

    /// Closes the comment box without sending anything.
    pub fn cancel(&mut self) {
        if self.is_commenting() {
            *self = Self::Pending;
        }
    }

    /// Short label for the message footer.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "",
            Self::Commenting(_) => "コメントを入力中",
            Self::Sent(FeedbackVerdict::Helpful) => "👍 フィードバック送信済み",
            Self::Sent(FeedbackVerdict::Unhelpful) => "👎 フィードバック送信済み",
        }
    }
}
