//! Decoding of the health-information platform's rule configuration payloads.
//!
//! Rules come from `programRules.json` (with `programRuleActions[*]` expanded)
//! and variables from `programRuleVariables.json`. Either payload may be the
//! platform's wrapped object or a bare array. Fields this crate does not use
//! are ignored.
//!
//! Decoding runs before any engine (and so any [`DiagnosticSink`]) exists, so
//! dropped actions and variables are logged to `tracing` at `debug`.
//!
//! [`DiagnosticSink`]: crate::DiagnosticSink

use serde::Deserialize;

use crate::{Rule, RuleAction, RuleVariable, RulesError, ValueKind};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RulesPayload {
    Wrapped {
        #[serde(rename = "programRules")]
        program_rules: Vec<ProgramRule>,
    },
    Bare(Vec<ProgramRule>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VariablesPayload {
    Wrapped {
        #[serde(rename = "programRuleVariables")]
        program_rule_variables: Vec<ProgramRuleVariable>,
    },
    Bare(Vec<ProgramRuleVariable>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgramRule {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    condition: String,
    #[serde(default)]
    priority: Option<i64>,
    #[serde(default)]
    program_rule_actions: Vec<ProgramRuleAction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgramRuleAction {
    program_rule_action_type: String,
    #[serde(default)]
    data_element: Option<Reference>,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgramRuleVariable {
    name: String,
    #[serde(default)]
    data_element: Option<Reference>,
    #[serde(default)]
    value_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Reference {
    id: String,
}

/// Decode a `programRules` payload into rules, preserving payload order.
///
/// Field actions without a data element are dropped.
///
/// # Errors
///
/// Returns [`RulesError::Json`] if the payload is not valid JSON of the
/// expected shape.
pub fn rules_from_json(json: &str) -> Result<Vec<Rule>, RulesError> {
    let payload: RulesPayload = serde_json::from_str(json)?;
    let rules = match payload {
        RulesPayload::Wrapped { program_rules } | RulesPayload::Bare(program_rules) => {
            program_rules
        }
    };
    Ok(rules.into_iter().map(ProgramRule::into_rule).collect())
}

/// Decode a `programRuleVariables` payload into rule variables.
///
/// Variables that are not bound to a data element are dropped; placeholders
/// naming them resolve to the empty string.
///
/// # Errors
///
/// Returns [`RulesError::Json`] if the payload is not valid JSON of the
/// expected shape.
pub fn variables_from_json(json: &str) -> Result<Vec<RuleVariable>, RulesError> {
    let payload: VariablesPayload = serde_json::from_str(json)?;
    let variables = match payload {
        VariablesPayload::Wrapped {
            program_rule_variables,
        }
        | VariablesPayload::Bare(program_rule_variables) => program_rule_variables,
    };
    Ok(variables
        .into_iter()
        .filter_map(ProgramRuleVariable::into_variable)
        .collect())
}

impl ProgramRule {
    fn into_rule(self) -> Rule {
        let name = self
            .name
            .or(self.display_name)
            .or(self.id)
            .unwrap_or_default();
        let actions = self
            .program_rule_actions
            .into_iter()
            .filter_map(|a| a.into_action(&name))
            .collect();
        Rule {
            name,
            condition: self.condition,
            actions,
            priority: self.priority,
        }
    }
}

impl ProgramRuleAction {
    fn into_action(self, rule: &str) -> Option<RuleAction> {
        let field = self.data_element.map(|r| r.id);
        let value = self.value;
        let action = match self.program_rule_action_type.as_str() {
            "ASSIGN" => RuleAction::Assign {
                field: field?,
                value,
            },
            "HIDEFIELD" => RuleAction::HideField { field: field? },
            "SHOWFIELD" => RuleAction::ShowField { field: field? },
            "DISPLAYTEXT" => RuleAction::DisplayText {
                value: value.unwrap_or_default(),
            },
            "ERROR" => RuleAction::Error {
                value: value.unwrap_or_default(),
            },
            "SHOWWARNING" => RuleAction::ShowWarning {
                value: value.unwrap_or_default(),
            },
            other => {
                tracing::debug!(rule, kind = other, "unhandled rule action type");
                RuleAction::Unknown {
                    kind: other.to_owned(),
                }
            }
        };
        Some(action)
    }
}

impl ProgramRuleVariable {
    fn into_variable(self) -> Option<RuleVariable> {
        let Some(data_element) = self.data_element else {
            tracing::debug!(variable = %self.name, "rule variable has no data element");
            return None;
        };
        Some(RuleVariable {
            name: self.name,
            data_element: data_element.id,
            kind: self
                .value_type
                .as_deref()
                .map_or(ValueKind::Text, ValueKind::from_code),
        })
    }
}
