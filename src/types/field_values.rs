use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{FieldValue, RuleEvaluationResult};

/// Snapshot of form field values keyed by data element id.
///
/// The engine only ever reads a snapshot. The form layer owns it and is
/// expected to push each pass's assignments back in with [`apply`](Self::apply)
/// before the next evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues {
    data: HashMap<String, FieldValue>,
}

impl FieldValues {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    #[must_use]
    pub fn set(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value.into());
        self
    }

    /// Set a field value (mutable reference version).
    pub fn insert(&mut self, field: &str, value: FieldValue) {
        self.data.insert(field.to_owned(), value);
    }

    /// Look up a field. Returns `None` if the field is absent.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.data.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.data.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Write every assignment from an evaluation pass into this snapshot.
    pub fn apply(&mut self, result: &RuleEvaluationResult) {
        for (field, value) in result.assignments() {
            self.data.insert(field.clone(), value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
