use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::error::ConfigError;
use super::evaluation_report::EvaluationReport;
use super::field_values::FieldValues;
use super::result::RuleEvaluationResult;
use super::rule::{Rule, RuleAction, RuleVariable};
use super::ValueKind;
use crate::diagnostics::{DiagnosticSink, TracingSink};

/// Builder for constructing a [`RuleEngine`].
///
/// # Example
///
/// ```
/// use signal_rules::{FieldValues, RuleEngineBuilder, ValueKind};
///
/// let engine = RuleEngineBuilder::new()
///     .variable("Risk", "de1", ValueKind::Text)
///     .rule("escalate", "#{Risk} == 'High'", |r| r.assign("fieldA", "Escalate"))
///     .build()
///     .unwrap();
///
/// let result = engine.evaluate(&FieldValues::new().set("de1", "High"));
/// assert_eq!(result.assignment("fieldA").and_then(|v| v.as_text()), Some("Escalate"));
/// ```
#[derive(Default)]
pub struct RuleEngineBuilder {
    rules: Vec<Rule>,
    variables: Vec<RuleVariable>,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

/// Intermediate builder passed to the rule definition closure.
#[derive(Debug, Default)]
pub struct RuleBuilder {
    actions: Vec<RuleAction>,
    priority: Option<i64>,
}

impl RuleEngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a rule variable bound to a data element.
    #[must_use]
    pub fn variable(mut self, name: &str, data_element: &str, kind: ValueKind) -> Self {
        self.variables
            .push(RuleVariable::new(name, data_element, kind));
        self
    }

    /// Define a rule. The closure declares the rule's actions in order.
    #[must_use]
    pub fn rule(
        mut self,
        name: &str,
        condition: &str,
        f: impl FnOnce(RuleBuilder) -> RuleBuilder,
    ) -> Self {
        let builder = f(RuleBuilder::default());
        self.rules.push(Rule {
            name: name.to_owned(),
            condition: condition.to_owned(),
            actions: builder.actions,
            priority: builder.priority,
        });
        self
    }

    /// Append already-assembled rules, e.g. ones decoded from a platform payload.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Append already-assembled rule variables.
    #[must_use]
    pub fn variables(mut self, variables: impl IntoIterator<Item = RuleVariable>) -> Self {
        self.variables.extend(variables);
        self
    }

    /// Route diagnostics to `sink` instead of `tracing`.
    #[must_use]
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate the configuration and build an immutable `RuleEngine`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a rule variable name is empty or duplicated.
    pub fn build(self) -> Result<RuleEngine, ConfigError> {
        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink));
        crate::compile::compile(self.rules, self.variables, sink)
    }
}

impl fmt::Debug for RuleEngineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngineBuilder")
            .field("rules", &self.rules)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}

impl RuleBuilder {
    /// Assign a literal value to a field.
    #[must_use]
    pub fn assign(self, field: &str, value: &str) -> Self {
        self.action(RuleAction::Assign {
            field: field.to_owned(),
            value: Some(value.to_owned()),
        })
    }

    /// Assign no value to a field, clearing it.
    #[must_use]
    pub fn clear(self, field: &str) -> Self {
        self.action(RuleAction::Assign {
            field: field.to_owned(),
            value: None,
        })
    }

    #[must_use]
    pub fn hide(self, field: &str) -> Self {
        self.action(RuleAction::HideField {
            field: field.to_owned(),
        })
    }

    #[must_use]
    pub fn show(self, field: &str) -> Self {
        self.action(RuleAction::ShowField {
            field: field.to_owned(),
        })
    }

    #[must_use]
    pub fn display_text(self, value: &str) -> Self {
        self.action(RuleAction::DisplayText {
            value: value.to_owned(),
        })
    }

    #[must_use]
    pub fn error(self, value: &str) -> Self {
        self.action(RuleAction::Error {
            value: value.to_owned(),
        })
    }

    #[must_use]
    pub fn warning(self, value: &str) -> Self {
        self.action(RuleAction::ShowWarning {
            value: value.to_owned(),
        })
    }

    #[must_use]
    pub fn action(mut self, action: RuleAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Record the rule's platform priority. Evaluation order is unaffected.
    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// An immutable rule configuration. Thread-safe and designed to live behind `Arc`.
///
/// A refetched configuration replaces the engine wholesale; there is no way to
/// mutate one in place.
///
/// # Condition limits
///
/// A condition nested more than 64 parentheses deep, or containing more than
/// 512 operators once its placeholders are substituted, does not parse. Like
/// any other malformed condition it evaluates to `false`, is reported to the
/// [`DiagnosticSink`], and is listed in [`EvaluationReport::failed`].
pub struct RuleEngine {
    pub(crate) rules: Vec<Rule>,
    pub(crate) variables: Vec<RuleVariable>,
    pub(crate) sink: Arc<dyn DiagnosticSink>,
}

impl RuleEngine {
    /// Run every rule against a field value snapshot.
    pub fn evaluate(&self, values: &FieldValues) -> RuleEvaluationResult {
        crate::evaluate::evaluate(&self.rules, &self.variables, values, self.sink.as_ref())
    }

    /// Evaluate with diagnostics.
    ///
    /// Returns an [`EvaluationReport`] with the result, the rules that fired,
    /// the rules whose condition could not be evaluated, and timing information.
    pub fn evaluate_detailed(&self, values: &FieldValues) -> EvaluationReport {
        crate::evaluate::evaluate_detailed(
            &self.rules,
            &self.variables,
            values,
            self.sink.as_ref(),
        )
    }

    /// Parse platform rule and variable payloads and build an engine.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`](crate::RulesError) on malformed JSON or an
    /// invalid variable set.
    pub fn from_json(rules_json: &str, variables_json: &str) -> Result<Self, crate::RulesError> {
        let rules = crate::config::rules_from_json(rules_json)?;
        let variables = crate::config::variables_from_json(variables_json)?;
        let engine = RuleEngineBuilder::new()
            .rules(rules)
            .variables(variables)
            .build()?;
        Ok(engine)
    }

    /// Read platform rule and variable payloads from files and build an engine.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`](crate::RulesError) on I/O, JSON, or validation failure.
    pub fn from_files(
        rules_path: impl AsRef<std::path::Path>,
        variables_path: impl AsRef<std::path::Path>,
    ) -> Result<Self, crate::RulesError> {
        let rules_json = std::fs::read_to_string(rules_path)?;
        let variables_json = std::fs::read_to_string(variables_path)?;
        Self::from_json(&rules_json, &variables_json)
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn variables(&self) -> &[RuleVariable] {
        &self.variables
    }

    /// Returns the variable names a rule's condition references.
    ///
    /// Returns `None` if the rule name is not found.
    #[must_use]
    pub fn variables_of(&self, rule_name: &str) -> Option<Vec<&str>> {
        self.rules
            .iter()
            .find(|r| r.name == rule_name)
            .map(|r| crate::condition::placeholder_names(&r.condition).collect())
    }

    /// Placeholder names used by some rule but not declared as variables.
    /// They always resolve to the empty string.
    #[must_use]
    pub fn undeclared_variables(&self) -> Vec<&str> {
        let declared: HashSet<&str> = self.variables.iter().map(|v| v.name.as_str()).collect();
        let mut seen = HashSet::new();
        self.rules
            .iter()
            .flat_map(|r| crate::condition::placeholder_names(&r.condition))
            .filter(|name| !declared.contains(name) && seen.insert(*name))
            .collect()
    }
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rules)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuleEngine({} rules, {} variables)",
            self.rules.len(),
            self.variables.len(),
        )
    }
}
