//! Form field definitions.
//!
//! Every task declares an ordered list of [`FieldDefinition`]s. Definitions are
//! plain `'static` data built with `const fn` builders so the whole catalog can
//! live in statics.
//!
//! ## Requirements
//!
//! A field carries exactly one [`Requirement`]:
//! - **`Optional`** / **`Required`**: plain requiredness
//! - **`OneOf(group)`**: satisfied when any field of the same group has a value
//! - **`When(condition)`**: the field is shown, and required, only while the
//!   controlling choice field holds one of the condition's values

use super::values::FieldValues;

/// Choice values that reveal a free-text companion field.
pub const OTHER_SENTINELS: &[&str] = &["その他", "その他（自由入力）"];

/// File extensions accepted when a file field does not override them.
pub const DEFAULT_ACCEPT: &str = ".txt,.log,.js,.py,.html,.css,.sql,.csv,.md,.xls,.xlsx";

/// The kind of input control a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    Multiline,
    /// One value from a fixed list of choices.
    Choice,
    /// Numeric text.
    Number,
    /// A text file read from disk.
    File,
}

impl FieldKind {
    /// Returns a short label for the kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Multiline => "multiline",
            Self::Choice => "choice",
            Self::Number => "number",
            Self::File => "file",
        }
    }
}

/// Visibility predicate tying a field to a controlling choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    /// Id of the controlling field.
    pub field: &'static str,
    /// Values of the controlling field that satisfy the condition.
    pub any_of: &'static [&'static str],
}

impl Condition {
    /// Condition met when `field` holds one of the [`OTHER_SENTINELS`].
    #[must_use]
    pub const fn other_selected(field: &'static str) -> Self {
        Self {
            field,
            any_of: OTHER_SENTINELS,
        }
    }

    /// Returns true when the controlling field's current value matches.
    #[must_use]
    pub fn is_met(&self, values: &FieldValues) -> bool {
        let current = values.text(self.field);
        self.any_of.contains(&current)
    }
}

/// How a field participates in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requirement {
    /// May be left empty.
    #[default]
    Optional,
    /// Must be filled.
    Required,
    /// At least one field sharing this group tag must be filled.
    OneOf(&'static str),
    /// Visible and required only while the condition holds.
    When(Condition),
}

/// Definition of a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Identifier, unique within its task.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Input control kind.
    pub kind: FieldKind,
    /// Hint shown while the field is empty.
    pub placeholder: Option<&'static str>,
    /// Validation rule.
    pub requirement: Requirement,
    /// Ordered choices (only meaningful for [`FieldKind::Choice`]).
    pub choices: &'static [&'static str],
    /// Comma-separated accepted extensions (only meaningful for [`FieldKind::File`]).
    pub accept: Option<&'static str>,
}

impl FieldDefinition {
    const fn base(id: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            label,
            kind,
            placeholder: None,
            requirement: Requirement::Optional,
            choices: &[],
            accept: None,
        }
    }

    /// Single-line text field.
    #[must_use]
    pub const fn text(id: &'static str, label: &'static str) -> Self {
        Self::base(id, label, FieldKind::Text)
    }

    /// Multi-line text field.
    #[must_use]
    pub const fn multiline(id: &'static str, label: &'static str) -> Self {
        Self::base(id, label, FieldKind::Multiline)
    }

    /// Numeric field.
    #[must_use]
    pub const fn number(id: &'static str, label: &'static str) -> Self {
        Self::base(id, label, FieldKind::Number)
    }

    /// Choice field over a fixed list of values.
    #[must_use]
    pub const fn choice(
        id: &'static str,
        label: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        Self {
            choices,
            ..Self::base(id, label, FieldKind::Choice)
        }
    }

    /// File field.
    #[must_use]
    pub const fn file(id: &'static str, label: &'static str) -> Self {
        Self::base(id, label, FieldKind::File)
    }

    /// Sets the placeholder hint.
    #[must_use]
    pub const fn placeholder(self, placeholder: &'static str) -> Self {
        Self {
            placeholder: Some(placeholder),
            ..self
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            requirement: Requirement::Required,
            ..self
        }
    }

    /// Puts the field into a "fill at least one" group.
    #[must_use]
    pub const fn one_of(self, group: &'static str) -> Self {
        Self {
            requirement: Requirement::OneOf(group),
            ..self
        }
    }

    /// Shows (and requires) the field only when `controlling` holds an "other" value.
    #[must_use]
    pub const fn when_other(self, controlling: &'static str) -> Self {
        Self {
            requirement: Requirement::When(Condition::other_selected(controlling)),
            ..self
        }
    }

    /// Overrides the accepted file extensions.
    #[must_use]
    pub const fn accept(self, accept: &'static str) -> Self {
        Self {
            accept: Some(accept),
            ..self
        }
    }

    /// Returns the accepted extensions for a file field.
    #[must_use]
    pub fn accepted_extensions(&self) -> &'static str {
        self.accept.unwrap_or(DEFAULT_ACCEPT)
    }

    /// Returns the label suffix marking how the field must be filled.
    #[must_use]
    pub const fn requirement_marker(&self) -> Option<&'static str> {
        match self.requirement {
            Requirement::Required | Requirement::When(_) => Some("※必須"),
            Requirement::OneOf(_) => Some("※どちらか必須"),
            Requirement::Optional => None,
        }
    }
}

/// Returns true if `file_name` ends with one of the comma-separated extensions.
///
/// Matching is case-insensitive. An empty accept list accepts everything.
#[must_use]
pub fn extension_accepted(file_name: &str, accept: &str) -> bool {
    let lower = file_name.to_lowercase();
    let mut any = false;
    for ext in accept.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        any = true;
        if lower.ends_with(&ext.to_lowercase()) {
            return true;
        }
    }
    !any
}
