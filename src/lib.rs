//! Program-rule evaluation for dynamically configured case forms.
//!
//! Rules are declarative condition/action pairs fetched from a health-information
//! platform. Each pass resolves rule variables against the current form values,
//! evaluates every rule's condition, and accumulates the actions of the rules
//! that hold into a [`RuleEvaluationResult`]: field assignments, hidden and
//! shown fields, messages, and warnings.
//!
//! ```
//! use signal_rules::{execute_program_rules, FieldValues, Rule, RuleAction, RuleVariable, ValueKind};
//!
//! let rules = vec![Rule {
//!     name: "escalate".into(),
//!     condition: "#{Risk} == 'High'".into(),
//!     actions: vec![RuleAction::Assign { field: "fieldA".into(), value: Some("Escalate".into()) }],
//!     priority: None,
//! }];
//! let variables = vec![RuleVariable::new("Risk", "de1", ValueKind::Text)];
//! let values = FieldValues::new().set("de1", "High");
//!
//! let result = execute_program_rules(&rules, &variables, &values);
//! assert_eq!(result.assignment("fieldA").and_then(|v| v.as_text()), Some("Escalate"));
//! ```

mod compile;
pub mod condition;
pub mod config;
pub mod diagnostics;
mod error;
mod evaluate;
pub mod parse;
mod types;

pub use condition::{evaluate_condition, normalize_operators, substitute_variables, VariableValues};
pub use diagnostics::{DiagnosticSink, NoopSink, TracingSink};
pub use error::RulesError;
pub use types::{
    CompareOp, ConfigError, EvaluationReport, Expr, FieldValue, FieldValues, Rule, RuleAction,
    RuleBuilder, RuleEngine, RuleEngineBuilder, RuleEvaluationResult, RuleVariable, Value,
    ValueKind,
};

/// Run one evaluation pass over `rules` for a field value snapshot.
///
/// Rules run in the order given. Diagnostics go to `tracing`.
pub fn execute_program_rules(
    rules: &[Rule],
    variables: &[RuleVariable],
    values: &FieldValues,
) -> RuleEvaluationResult {
    evaluate::evaluate(rules, variables, values, &TracingSink)
}

/// Resolve rule variables to their current values, keyed by variable name.
///
/// A variable whose data element is absent from `values` resolves to null.
#[must_use]
pub fn resolve_variables(variables: &[RuleVariable], values: &FieldValues) -> VariableValues {
    evaluate::resolve_variables(variables, values)
}
