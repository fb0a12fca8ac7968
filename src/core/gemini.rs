//! Gemini REST client.
//!
//! Implements [`AiGateway`] over `POST {base}/models/{model}:generateContent`.
//! Requests carry the API key in the `x-goog-api-key` header and the sampling
//! parameters from [`GenerationSettings`]. Follow-up suggestions are requested
//! in JSON mode with an array-of-strings response schema.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use super::gateway::{AiGateway, ChatTurn, GatewayError, parse_suggestions, suggestion_prompt};
use crate::fs::settings::{GenerationSettings, Settings};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiGateway {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    generation: GenerationSettings,
}

impl GeminiGateway {
    /// Creates a client for `base_url`.
    #[must_use]
    pub fn new(base_url: &str, api_key: Option<String>, generation: GenerationSettings) -> Self {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            generation,
        }
    }

    /// Creates a client from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.api_base,
            settings.api_key().map(str::to_string),
            settings.generation,
        )
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    async fn call(&self, model: &str, request: &GenerateRequest) -> Result<String, GatewayError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(GatewayError::MissingApiKey);
        };

        let resp = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        let payload: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        extract_text(payload)
    }
}

#[async_trait]
impl AiGateway for GeminiGateway {
    async fn generate(&self, model: &str, history: &[ChatTurn]) -> Result<String, GatewayError> {
        let total_chars: usize = history.iter().map(|t| t.text.chars().count()).sum();
        info!(model, turns = history.len(), total_chars, "generate request");

        let request = build_generate_request(history, &self.generation);
        let text = self.call(model, &request).await?;
        debug!(chars = text.chars().count(), "generate response");
        Ok(text)
    }

    async fn suggest_follow_ups(
        &self,
        model: &str,
        text: &str,
    ) -> Result<Vec<String>, GatewayError> {
        debug!(model, "suggestion request");
        let request = build_suggestion_request(text);
        let raw = self.call(model, &request).await?;
        parse_suggestions(&raw)
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

fn build_generate_request(history: &[ChatTurn], generation: &GenerationSettings) -> GenerateRequest {
    GenerateRequest {
        contents: history
            .iter()
            .map(|turn| Content {
                role: Some(turn.role.name().to_string()),
                parts: vec![Part {
                    text: Some(turn.text.clone()),
                }],
            })
            .collect(),
        generation_config: Some(GenerationConfig {
            temperature: Some(generation.temperature),
            top_k: Some(generation.top_k),
            top_p: Some(generation.top_p),
            max_output_tokens: Some(generation.max_output_tokens),
            ..GenerationConfig::default()
        }),
    }
}

fn build_suggestion_request(text: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(suggestion_prompt(text)),
            }],
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(json!({
                "type": "ARRAY",
                "items": { "type": "STRING" }
            })),
            ..GenerationConfig::default()
        }),
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(payload: GenerateResponse) -> Result<String, GatewayError> {
    let text: String = payload
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(GatewayError::EmptyResponse)
    } else {
        Ok(text)
    }
}

/// Builds an API error, preferring the message inside a JSON error body.
fn api_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorBody>(body).map_or_else(
        |_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "(no body)".to_string()
            } else {
                trimmed.to_string()
            }
        },
        |parsed| parsed.error.message,
    );
    GatewayError::Api { status, message }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::Value;

    #[test]
    fn generate_request_carries_history_and_sampling() -> Result<()> {
        let history = vec![ChatTurn::user("質問"), ChatTurn::model("回答"), ChatTurn::user("続き")];
        let request = build_generate_request(&history, &GenerationSettings::default());
        let value: Value = serde_json::to_value(&request)?;

        assert_eq!(value["contents"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][1]["role"], "model");
        assert_eq!(value["contents"][2]["parts"][0]["text"], "続き");

        let config = &value["generationConfig"];
        assert_eq!(config["topK"], 40);
        assert_eq!(config["maxOutputTokens"], 8192);
        assert!(config.get("responseMimeType").is_none());
        Ok(())
    }

    #[test]
    fn suggestion_request_uses_json_schema() -> Result<()> {
        let value: Value = serde_json::to_value(build_suggestion_request("本文"))?;
        let config = &value["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "ARRAY");
        assert_eq!(config["responseSchema"]["items"]["type"], "STRING");
        assert!(config.get("temperature").is_none());
        Ok(())
    }

    #[test]
    fn extract_text_joins_parts() -> Result<()> {
        let payload: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"前半"},{"text":"後半"}]}}]}"#,
        )?;
        assert_eq!(extract_text(payload)?, "前半後半");
        Ok(())
    }

    #[test]
    fn extract_text_rejects_empty_candidates() -> Result<()> {
        let payload: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)?;
        assert!(matches!(extract_text(payload), Err(GatewayError::EmptyResponse)));
        Ok(())
    }

    #[test]
    fn api_error_prefers_json_message() {
        let err = api_error(400, r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#);
        match err {
            GatewayError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        let err = api_error(503, "  upstream unavailable ");
        assert_eq!(err.to_string(), "APIエラー (503): upstream unavailable");
        assert_eq!(api_error(500, "").to_string(), "APIエラー (500): (no body)");
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let gateway = GeminiGateway::new("https://example.test/v1beta/", None, GenerationSettings::default());
        assert_eq!(
            gateway.endpoint("gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        let gateway = GeminiGateway::new("http://127.0.0.1:9", None, GenerationSettings::default());
        let err = gateway
            .generate("gemini-2.5-flash", &[ChatTurn::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiKey));
    }
}
