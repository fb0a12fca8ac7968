//! Setup form controller.
//!
//! Tracks the selected task and the values entered for it, decides which
//! fields are visible and required, and validates before a conversation
//! starts. File reads are two-step: [`SetupForm::begin_file_read`] hands out a
//! ticket and only the newest ticket for a field may complete, so a slow read
//! can never overwrite a newer one.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::catalog::{Catalog, FieldDefinition, FieldValues, Requirement, TaskDefinition};

/// Why a form cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No task is selected, or the key is not in the catalog.
    #[error("タスクが見つかりません。")]
    UnknownTask,
    /// A "fill at least one" group is entirely empty.
    #[error("必須項目（※どちらか必須）を入力またはアップロードしてください。")]
    MissingChoice {
        /// The empty group.
        group: &'static str,
    },
    /// A required field is empty.
    #[error("必須項目をすべて入力してください。")]
    MissingRequired {
        /// First empty required field.
        field: &'static str,
    },
}

/// Proof that a file read was started for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTicket {
    /// Field the read is for.
    pub field_id: &'static str,
    generation: u64,
    task_generation: u64,
}

/// A validated form, ready to start a conversation.
#[derive(Debug, Clone)]
pub struct Submission {
    /// The selected task.
    pub task: &'static TaskDefinition,
    /// Snapshot of the entered values.
    pub values: FieldValues,
}

/// State of the setup form.
#[derive(Debug, Clone)]
pub struct SetupForm {
    catalog: Arc<Catalog>,
    task: Option<&'static TaskDefinition>,
    values: FieldValues,
    file_generations: HashMap<&'static str, u64>,
    task_generation: u64,
}

impl SetupForm {
    /// Creates a form with the catalog's first task selected.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let task = catalog.first();
        Self {
            catalog,
            task,
            values: FieldValues::new(),
            file_generations: HashMap::new(),
            task_generation: 0,
        }
    }

    /// Returns the selected task.
    #[must_use]
    pub fn task(&self) -> Option<&'static TaskDefinition> {
        self.task
    }

    /// Returns the entered values.
    #[must_use]
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Selects a task and clears every entered value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownTask`] if `key` is not in the catalog.
    pub fn select_task(&mut self, key: &str) -> Result<(), ValidationError> {
        let task = self.catalog.get(key).ok_or(ValidationError::UnknownTask)?;
        debug!(task = task.key, "task selected");
        self.task = Some(task);
        self.values.clear();
        self.file_generations.clear();
        self.task_generation += 1;
        Ok(())
    }

    /// Stores a text value. An empty string clears the field.
    ///
    /// Clearing a file field also invalidates any read in flight for it.
    pub fn set_field_value(&mut self, id: &str, value: &str) {
        let Some(field) = self.field(id) else {
            debug!(field = id, "ignoring value for unknown field");
            return;
        };
        if value.is_empty() {
            self.bump_file_generation(field.id);
        }
        self.values.insert_text(field.id, value);
    }

    /// Starts a file read for `id` and returns its ticket.
    ///
    /// Any earlier ticket for the same field becomes stale. Returns `None` for
    /// unknown fields.
    pub fn begin_file_read(&mut self, id: &str) -> Option<FileTicket> {
        let field = self.field(id)?;
        let generation = self.bump_file_generation(field.id);
        Some(FileTicket {
            field_id: field.id,
            generation,
            task_generation: self.task_generation,
        })
    }

    /// Completes a file read.
    ///
    /// Stores the content only if `ticket` is still the newest for its field
    /// and the task has not changed. Returns whether it was stored.
    pub fn complete_file_read(&mut self, ticket: FileTicket, name: &str, content: &str) -> bool {
        if !self.ticket_is_current(ticket) {
            debug!(field = ticket.field_id, "dropping stale file read");
            return false;
        }
        self.values.insert_file(ticket.field_id, name, content);
        true
    }

    /// Returns true if `ticket` is the newest for its field and task.
    #[must_use]
    pub fn ticket_is_current(&self, ticket: FileTicket) -> bool {
        ticket.task_generation == self.task_generation
            && self.file_generations.get(ticket.field_id) == Some(&ticket.generation)
    }

    /// Returns true if `field` should be shown.
    #[must_use]
    pub fn is_visible(&self, field: &FieldDefinition) -> bool {
        match field.requirement {
            Requirement::When(condition) => condition.is_met(&self.values),
            _ => true,
        }
    }

    /// Returns true if `field` must be filled on its own.
    ///
    /// Members of a one-of group are never individually required.
    #[must_use]
    pub fn is_required(&self, field: &FieldDefinition) -> bool {
        match field.requirement {
            Requirement::Required => true,
            Requirement::When(condition) => condition.is_met(&self.values),
            Requirement::OneOf(_) | Requirement::Optional => false,
        }
    }

    /// Returns the selected task's currently visible fields, in order.
    #[must_use]
    pub fn visible_fields(&self) -> Vec<&'static FieldDefinition> {
        self.task
            .map(|task| task.fields.iter().filter(|f| self.is_visible(f)).collect())
            .unwrap_or_default()
    }

    /// Checks the form.
    ///
    /// One-of groups are checked before individually required fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let task = self.task.ok_or(ValidationError::UnknownTask)?;

        for field in task.fields {
            if let Requirement::OneOf(group) = field.requirement {
                let satisfied = task
                    .fields
                    .iter()
                    .filter(|f| f.requirement == Requirement::OneOf(group))
                    .any(|f| self.values.has_value(f.id));
                if !satisfied {
                    return Err(ValidationError::MissingChoice { group });
                }
            }
        }

        if let Some(field) = task
            .fields
            .iter()
            .find(|f| self.is_required(f) && !self.values.has_value(f.id))
        {
            return Err(ValidationError::MissingRequired { field: field.id });
        }

        Ok(())
    }

    /// Validates and snapshots the form.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn submit(&self) -> Result<Submission, ValidationError> {
        self.validate()?;
        let task = self.task.ok_or(ValidationError::UnknownTask)?;
        Ok(Submission {
            task,
            values: self.values.clone(),
        })
    }

    fn field(&self, id: &str) -> Option<&'static FieldDefinition> {
        self.task.and_then(|task| task.field(id))
    }

    fn bump_file_generation(&mut self, id: &'static str) -> u64 {
        let generation = self.file_generations.entry(id).or_insert(0);
        *generation += 1;
        *generation
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn form() -> SetupForm {
        SetupForm::new(Arc::new(Catalog::builtin()))
    }

    fn form_for(key: &str) -> SetupForm {
        let mut form = form();
        form.select_task(key).unwrap();
        form
    }

    #[test]
    fn first_task_is_preselected() {
        let form = form();
        assert_eq!(form.task().map(|t| t.key), Some("proofread"));
        assert!(form.values().is_empty());
    }

    #[test]
    fn unknown_task_is_rejected() {
        let mut form = form();
        assert_eq!(form.select_task("nope"), Err(ValidationError::UnknownTask));
        assert_eq!(form.task().map(|t| t.key), Some("proofread"));
        assert_eq!(
            ValidationError::UnknownTask.to_string(),
            "タスクが見つかりません。"
        );
    }

    #[test]
    fn switching_task_clears_values() {
        let mut form = form_for("brainstorm");
        form.set_field_value("theme", "テーマ");
        form.select_task("translate").unwrap();
        assert!(form.values().is_empty());

        form.select_task("brainstorm").unwrap();
        assert_eq!(form.values().text("theme"), "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut form = form_for("brainstorm");
        form.set_field_value("not_a_field", "x");
        assert!(form.values().is_empty());
    }

    #[test]
    fn conditional_field_follows_controller() {
        let mut form = form_for("proofread");
        let custom = form.task().unwrap().field("recipient_type_custom").unwrap();

        assert!(!form.is_visible(custom));
        assert!(!form.is_required(custom));
        assert_eq!(form.visible_fields().len(), 3);

        form.set_field_value("recipient_type_select", "その他");
        assert!(form.is_visible(custom));
        assert!(form.is_required(custom));
        assert_eq!(form.visible_fields().len(), 4);
    }

    #[test]
    fn one_of_groups_are_checked_first() {
        let form = form_for("summarize");
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingChoice {
                group: "summary_source"
            })
        );
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "必須項目（※どちらか必須）を入力またはアップロードしてください。"
        );
    }

    #[test]
    fn one_of_satisfied_by_either_member() {
        let mut form = form_for("summarize");
        form.set_field_value("format_select", "箇条書きで");
        form.set_field_value("text", "本文");
        assert!(form.validate().is_ok());

        let mut form = form_for("summarize");
        form.set_field_value("format_select", "箇条書きで");
        let ticket = form.begin_file_read("file_upload").unwrap();
        assert!(form.complete_file_read(ticket, "a.txt", "中身"));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn missing_required_reports_first_field() {
        let mut form = form_for("brainstorm");
        form.set_field_value("theme", "テーマ");
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingRequired { field: "count" })
        );
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "必須項目をすべて入力してください。"
        );
    }

    #[test]
    fn whitespace_does_not_satisfy_required() {
        let mut form = form_for("journal_entry");
        form.set_field_value("transaction", "   ");
        assert!(matches!(
            form.validate(),
            Err(ValidationError::MissingRequired { .. })
        ));
    }

    #[test]
    fn visible_conditional_field_is_required() {
        let mut form = form_for("proofread");
        form.set_field_value("original_text", "本文");
        form.set_field_value("recipient_type_select", "その他");
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingRequired {
                field: "recipient_type_custom"
            })
        );

        form.set_field_value("recipient_type_custom", "株主");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn hidden_conditional_field_is_not_required() {
        let mut form = form_for("proofread");
        form.set_field_value("original_text", "本文");
        form.set_field_value("recipient_type_select", "社内");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn stale_file_read_is_dropped() {
        let mut form = form_for("code_review");
        let first = form.begin_file_read("file_upload").unwrap();
        let second = form.begin_file_read("file_upload").unwrap();

        assert!(form.complete_file_read(second, "new.py", "new"));
        assert!(!form.complete_file_read(first, "old.py", "old"));
        assert_eq!(form.values().text("file_upload"), "new");
        assert_eq!(form.values().file_name("file_upload"), Some("new.py"));
    }

    #[test]
    fn file_read_across_task_switch_is_dropped() {
        let mut form = form_for("code_review");
        let ticket = form.begin_file_read("file_upload").unwrap();
        form.select_task("log_analysis").unwrap();

        assert!(!form.complete_file_read(ticket, "x.log", "log"));
        assert!(form.values().is_empty());
    }

    #[test]
    fn clearing_a_file_field_invalidates_reads() {
        let mut form = form_for("code_review");
        let ticket = form.begin_file_read("file_upload").unwrap();
        form.set_field_value("file_upload", "");
        assert!(!form.complete_file_read(ticket, "a.py", "code"));
    }

    #[test]
    fn submit_snapshots_values() {
        let mut form = form_for("journal_entry");
        form.set_field_value("transaction", "売掛金の入金");

        let submission = form.submit().unwrap();
        assert_eq!(submission.task.key, "journal_entry");
        assert_eq!(submission.values.text("transaction"), "売掛金の入金");
    }

    #[test]
    fn submit_refuses_invalid_form() {
        assert!(form_for("journal_entry").submit().is_err());
    }
}
