use std::fmt;

use super::ValueKind;

/// A declarative program rule: a textual condition plus the actions to apply
/// when it holds.
///
/// The condition references rule variables as `#{variable name}`. `priority`
/// is carried from the platform but does not affect evaluation order; rules
/// run in the order they were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    pub condition: String,
    pub actions: Vec<RuleAction>,
    pub priority: Option<i64>,
}

/// An effect declared by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    /// Set a field's effective value. `None` clears it.
    Assign { field: String, value: Option<String> },
    /// Hide a field and clear its value.
    HideField { field: String },
    /// Mark a field as explicitly shown.
    ShowField { field: String },
    /// Informational message.
    DisplayText { value: String },
    /// Advisory error message. Never blocks submission.
    Error { value: String },
    /// Warning message.
    ShowWarning { value: String },
    /// An action type this crate does not handle. Ignored during evaluation.
    Unknown { kind: String },
}

impl RuleAction {
    /// Platform action type code.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            RuleAction::Assign { .. } => "ASSIGN",
            RuleAction::HideField { .. } => "HIDEFIELD",
            RuleAction::ShowField { .. } => "SHOWFIELD",
            RuleAction::DisplayText { .. } => "DISPLAYTEXT",
            RuleAction::Error { .. } => "ERROR",
            RuleAction::ShowWarning { .. } => "SHOWWARNING",
            RuleAction::Unknown { kind } => kind,
        }
    }

    /// The field this action targets, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            RuleAction::Assign { field, .. }
            | RuleAction::HideField { field }
            | RuleAction::ShowField { field } => Some(field),
            _ => None,
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleAction::Assign {
                field,
                value: Some(v),
            } => write!(f, "ASSIGN {field} := \"{v}\""),
            RuleAction::Assign { field, value: None } => write!(f, "ASSIGN {field} := null"),
            RuleAction::HideField { field } => write!(f, "HIDEFIELD {field}"),
            RuleAction::ShowField { field } => write!(f, "SHOWFIELD {field}"),
            RuleAction::DisplayText { value } => write!(f, "DISPLAYTEXT \"{value}\""),
            RuleAction::Error { value } => write!(f, "ERROR \"{value}\""),
            RuleAction::ShowWarning { value } => write!(f, "SHOWWARNING \"{value}\""),
            RuleAction::Unknown { kind } => write!(f, "{kind}"),
        }
    }
}

/// Binds a human-readable variable name to a data element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleVariable {
    /// Name used inside `#{...}` placeholders. May contain spaces.
    pub name: String,
    pub data_element: String,
    pub kind: ValueKind,
}

impl RuleVariable {
    #[must_use]
    pub fn new(name: &str, data_element: &str, kind: ValueKind) -> Self {
        Self {
            name: name.to_owned(),
            data_element: data_element.to_owned(),
            kind,
        }
    }
}
