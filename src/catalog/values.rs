//! Collected form values.

use std::collections::BTreeMap;

use super::fields::OTHER_SENTINELS;

/// Marker substituted into prompts for optional fields left empty.
pub const UNSPECIFIED: &str = "指定なし";

/// A single collected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Raw text typed or chosen by the user.
    Text(String),
    /// Text content extracted from a file, with the original file name.
    File {
        /// File name as shown to the user.
        name: String,
        /// Extracted text content.
        content: String,
    },
}

impl FieldValue {
    /// Returns the text this value contributes to a prompt.
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::File { content, .. } => content,
        }
    }

    /// Returns true if the value carries no meaningful text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.as_text().trim().is_empty()
    }
}

/// Field id to value mapping for one task's form.
///
/// Lookups of absent ids return empty strings so prompt builders stay total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    entries: BTreeMap<String, FieldValue>,
}

impl FieldValues {
    /// Creates an empty value set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a text value. An empty string removes the entry.
    pub fn insert_text(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        if value.is_empty() {
            self.entries.remove(&id);
        } else {
            self.entries.insert(id, FieldValue::Text(value));
        }
    }

    /// Stores file content together with its original name.
    pub fn insert_file(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) {
        self.entries.insert(
            id.into(),
            FieldValue::File {
                name: name.into(),
                content: content.into(),
            },
        );
    }

    /// Removes a value.
    pub fn remove(&mut self, id: &str) -> Option<FieldValue> {
        self.entries.remove(id)
    }

    /// Returns the raw value for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.entries.get(id)
    }

    /// Returns the text for `id`, or an empty string.
    #[must_use]
    pub fn text(&self, id: &str) -> &str {
        self.entries.get(id).map_or("", FieldValue::as_text)
    }

    /// Returns the original file name stored for a file field.
    #[must_use]
    pub fn file_name(&self, id: &str) -> Option<&str> {
        match self.entries.get(id) {
            Some(FieldValue::File { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Returns the text for `id`, or `fallback` when it is blank.
    #[must_use]
    pub fn text_or<'a>(&'a self, id: &str, fallback: &'a str) -> &'a str {
        if self.has_value(id) {
            self.text(id)
        } else {
            fallback
        }
    }

    /// Returns the text for `id`, or [`UNSPECIFIED`] when it is blank.
    #[must_use]
    pub fn or_unspecified(&self, id: &str) -> &str {
        self.text_or(id, UNSPECIFIED)
    }

    /// Resolves a choice field with a free-text companion.
    ///
    /// When the choice holds an "other" sentinel, the companion's text is used.
    #[must_use]
    pub fn choice_or_custom(&self, choice_id: &str, custom_id: &str) -> &str {
        let choice = self.text(choice_id);
        if OTHER_SENTINELS.contains(&choice) {
            self.or_unspecified(custom_id)
        } else {
            self.or_unspecified(choice_id)
        }
    }

    /// Returns the first non-blank text among `ids`, or an empty string.
    #[must_use]
    pub fn first_of(&self, ids: &[&str]) -> &str {
        ids.iter()
            .copied()
            .find(|id| self.has_value(id))
            .map_or("", |id| self.text(id))
    }

    /// Returns true if `id` holds a non-blank value.
    #[must_use]
    pub fn has_value(&self, id: &str) -> bool {
        self.entries.get(id).is_some_and(|v| !v.is_blank())
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates values in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for FieldValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (id, value) in iter {
            values.insert_text(id, value);
        }
        values
    }
}
