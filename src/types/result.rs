use std::collections::{HashMap, HashSet};
use std::fmt;

use super::FieldValue;

/// Accumulated effects of one evaluation pass.
///
/// `hidden_fields` and `shown_fields` are independent; a field can appear in
/// both when two rules disagree. [`is_hidden`](Self::is_hidden) applies the
/// rendering policy (hidden wins).
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct RuleEvaluationResult {
    assignments: HashMap<String, FieldValue>,
    hidden_fields: HashSet<String>,
    shown_fields: HashSet<String>,
    messages: Vec<String>,
    warnings: Vec<String>,
}

impl RuleEvaluationResult {
    /// Field assignments. Later rules in the pass overwrite earlier ones.
    #[must_use]
    pub fn assignments(&self) -> &HashMap<String, FieldValue> {
        &self.assignments
    }

    #[must_use]
    pub fn assignment(&self, field: &str) -> Option<&FieldValue> {
        self.assignments.get(field)
    }

    #[must_use]
    pub fn hidden_fields(&self) -> &HashSet<String> {
        &self.hidden_fields
    }

    #[must_use]
    pub fn shown_fields(&self) -> &HashSet<String> {
        &self.shown_fields
    }

    /// Display texts and `Error: `-prefixed error texts, in firing order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Whether the form should leave this field out. A hidden field stays
    /// hidden even if another rule also showed it.
    #[must_use]
    pub fn is_hidden(&self, field: &str) -> bool {
        self.hidden_fields.contains(field)
    }

    /// Filter a section's fields down to the ones that should be rendered,
    /// preserving their order.
    pub fn visible<'a, I>(&'a self, fields: I) -> impl Iterator<Item = &'a str> + 'a
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
    {
        fields.into_iter().filter(move |f| !self.is_hidden(f))
    }

    /// `true` if no rule contributed anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
            && self.hidden_fields.is_empty()
            && self.shown_fields.is_empty()
            && self.messages.is_empty()
            && self.warnings.is_empty()
    }

    pub(crate) fn assign(&mut self, field: &str, value: FieldValue) {
        self.assignments.insert(field.to_owned(), value);
    }

    pub(crate) fn hide(&mut self, field: &str) {
        self.hidden_fields.insert(field.to_owned());
        self.assign(field, FieldValue::Text(String::new()));
    }

    pub(crate) fn show(&mut self, field: &str) {
        self.shown_fields.insert(field.to_owned());
    }

    pub(crate) fn push_message(&mut self, message: String) {
        self.messages.push(message);
    }

    pub(crate) fn push_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl fmt::Display for RuleEvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} assignments, {} hidden, {} shown, {} messages, {} warnings",
            self.assignments.len(),
            self.hidden_fields.len(),
            self.shown_fields.len(),
            self.messages.len(),
            self.warnings.len(),
        )
    }
}
