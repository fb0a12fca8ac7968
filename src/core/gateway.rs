//! Text-generation gateway abstraction.
//!
//! The conversation and one-shot runner talk to the model only through the
//! [`AiGateway`] trait, so tests can substitute a scripted implementation.
//!
//! Two operations are exposed:
//! - `generate`: the full conversation so far in, one reply out
//! - `suggest_follow_ups`: up to [`MAX_SUGGESTIONS`] short follow-up
//!   instructions for a reply, requested as a JSON array of strings

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Maximum number of follow-up suggestions kept per reply.
pub const MAX_SUGGESTIONS: usize = 3;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The person using the app.
    User,
    /// The language model.
    Model,
}

impl Role {
    /// Returns the wire name of the role.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One turn of conversation history as sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// Who produced the turn.
    pub role: Role,
    /// Plain text of the turn.
    pub text: String,
}

impl ChatTurn {
    /// Creates a user turn.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Creates a model turn.
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Errors produced while talking to the model service.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No API key was configured.
    #[error("APIキーが設定されていません (GEMINI_API_KEY)")]
    MissingApiKey,
    /// The HTTP request could not be completed.
    #[error("通信エラー: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("APIエラー ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },
    /// The service answered without any text.
    #[error("モデルから空の応答が返されました")]
    EmptyResponse,
    /// The response body could not be interpreted.
    #[error("応答を解析できませんでした: {0}")]
    MalformedResponse(String),
}

/// A text-generation backend.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Generates the next model reply for `history`, oldest turn first.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the request fails or yields no text.
    async fn generate(&self, model: &str, history: &[ChatTurn]) -> Result<String, GatewayError>;

    /// Proposes follow-up instructions for a model reply.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the request fails or the answer is not a
    /// JSON array of strings.
    async fn suggest_follow_ups(&self, model: &str, text: &str)
    -> Result<Vec<String>, GatewayError>;
}

/// Requests follow-up suggestions, swallowing failures.
///
/// Suggestions are decoration: any error is logged and yields an empty list.
pub async fn follow_ups(gateway: &dyn AiGateway, model: &str, text: &str) -> Vec<String> {
    match gateway.suggest_follow_ups(model, text).await {
        Ok(mut suggestions) => {
            suggestions.truncate(MAX_SUGGESTIONS);
            suggestions
        }
        Err(e) => {
            warn!(error = %e, "follow-up suggestions unavailable");
            Vec::new()
        }
    }
}

/// Builds the prompt asking the model for follow-up instructions.
#[must_use]
pub fn suggestion_prompt(text: &str) -> String {
    format!(
        "以下の文章を分析し、ユーザーが次に行いそうな追加の指示を3つ、簡潔な動詞を含むフレーズで提案してください。例:「箇条書きで要約して」「表形式でまとめて」「もっと簡潔に」。出力は [\"提案1\", \"提案2\", \"提案3\"] というJSON形式の配列のみとしてください。\n\n\
         # 分析対象の文章\n{text}"
    )
}

/// Parses a suggestion answer into at most [`MAX_SUGGESTIONS`] strings.
///
/// Accepts a bare JSON array or one wrapped in a Markdown code fence. Blank
/// entries are dropped.
///
/// # Errors
///
/// Returns [`GatewayError::MalformedResponse`] if the text is not a JSON array
/// of strings.
pub fn parse_suggestions(raw: &str) -> Result<Vec<String>, GatewayError> {
    let body = strip_code_fence(raw.trim());
    let parsed: Vec<String> = serde_json::from_str(body)
        .map_err(|e| GatewayError::MalformedResponse(format!("suggestions: {e}")))?;
    Ok(parsed
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect())
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip an optional language tag on the opening line.
    let rest = rest.find('\n').map_or(rest, |i| &rest[i + 1..]);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
