//! Non-interactive task execution.
//!
//! `taskpilot run` fills a task's form from command-line assignments, runs
//! the first round trip and prints the reply. It goes through the same
//! [`SetupForm`] validation and [`Conversation`] state machine as the TUI.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;

use super::conversation::{Conversation, Phase, round_trip};
use super::gateway::AiGateway;
use super::setup_form::SetupForm;
use super::telemetry::{EventKind, TelemetryEvent, TelemetrySink};
use crate::catalog::{Catalog, FieldKind};
use crate::fs::attachment::read_attachment;

/// Inputs for a single non-interactive run.
#[derive(Debug, Clone, Default)]
pub struct OneShotRequest {
    /// Task key.
    pub task: String,
    /// `(field id, value)` pairs for text and choice fields.
    pub fields: Vec<(String, String)>,
    /// `(field id, path)` pairs for file fields.
    pub attachments: Vec<(String, PathBuf)>,
}

/// Reply of a non-interactive run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShotResult {
    /// Generated text.
    pub reply: String,
    /// Follow-up suggestions.
    pub suggestions: Vec<String>,
}

/// Runs one task to its first reply.
///
/// The form is validated before the gateway is contacted, and a
/// `TaskStarted` event is logged once the prompt is sent.
///
/// # Errors
///
/// Returns an error for unknown tasks or fields, unreadable attachments,
/// validation failures and gateway failures.
pub async fn run_once(
    catalog: Arc<Catalog>,
    gateway: &dyn AiGateway,
    telemetry: &dyn TelemetrySink,
    model: &str,
    request: OneShotRequest,
) -> Result<OneShotResult> {
    let mut form = SetupForm::new(Arc::clone(&catalog));
    form.select_task(&request.task)
        .with_context(|| format!("unknown task '{}'", request.task))?;
    let Some(task) = form.task() else {
        bail!("unknown task '{}'", request.task);
    };

    for (id, value) in &request.fields {
        let Some(field) = task.field(id) else {
            bail!("task '{}' has no field '{id}'", task.key);
        };
        if field.kind == FieldKind::Choice && !field.choices.contains(&value.as_str()) {
            bail!(
                "'{value}' is not a choice of '{id}' (choices: {})",
                field.choices.join(", ")
            );
        }
        form.set_field_value(id, value);
    }

    for (id, path) in &request.attachments {
        let Some(field) = task.field(id).filter(|f| f.kind == FieldKind::File) else {
            bail!("task '{}' has no file field '{id}'", task.key);
        };
        let Some(ticket) = form.begin_file_read(id) else {
            bail!("task '{}' has no file field '{id}'", task.key);
        };
        let attachment = read_attachment(path, field.accepted_extensions()).await?;
        form.complete_file_read(ticket, &attachment.name, &attachment.content);
    }

    let submission = form.submit()?;

    let mut conversation = Conversation::new(catalog);
    let turn = conversation.start(submission.task.key, &submission.values)?;
    info!(task = submission.task.key, model, "running task");
    telemetry.log_event(TelemetryEvent {
        task_name: submission.task.display_name.to_string(),
        kind: EventKind::TaskStarted,
        feedback: None,
        model: model.to_string(),
    });

    let outcome = round_trip(gateway, model, turn).await;
    conversation.apply(outcome);

    if conversation.phase() != Phase::Chatting {
        bail!(
            "{}",
            conversation
                .error_banner()
                .unwrap_or("エラーが発生しました")
        );
    }
    let Some(last) = conversation.messages().last() else {
        bail!("no reply received");
    };
    Ok(OneShotResult {
        reply: last.text.clone(),
        suggestions: last.suggestions.clone(),
    })
}
