use std::time::Instant;

use crate::condition::{check_condition, VariableValues};
use crate::diagnostics::DiagnosticSink;
use crate::{
    EvaluationReport, FieldValue, FieldValues, Rule, RuleAction, RuleEvaluationResult,
    RuleVariable,
};

/// Outcome of one pass before it is reduced to a result or a report.
struct Pass {
    result: RuleEvaluationResult,
    fired: Vec<String>,
    failed: Vec<String>,
}

/// Resolve each rule variable to the current value of its data element,
/// keyed by variable name. Absent fields resolve to null.
pub(crate) fn resolve_variables(variables: &[RuleVariable], values: &FieldValues) -> VariableValues {
    variables
        .iter()
        .map(|v| {
            let value = values.get(&v.data_element).cloned().unwrap_or_default();
            (v.name.clone(), value)
        })
        .collect()
}

pub(crate) fn evaluate(
    rules: &[Rule],
    variables: &[RuleVariable],
    values: &FieldValues,
    sink: &dyn DiagnosticSink,
) -> RuleEvaluationResult {
    run(rules, variables, values, sink).result
}

pub(crate) fn evaluate_detailed(
    rules: &[Rule],
    variables: &[RuleVariable],
    values: &FieldValues,
    sink: &dyn DiagnosticSink,
) -> EvaluationReport {
    let start = Instant::now();
    let pass = run(rules, variables, values, sink);
    let duration = start.elapsed();
    let evaluation_order = rules.iter().map(|r| r.name.clone()).collect();
    EvaluationReport::new(
        pass.result,
        pass.fired,
        pass.failed,
        evaluation_order,
        duration,
    )
}

fn run(
    rules: &[Rule],
    variables: &[RuleVariable],
    values: &FieldValues,
    sink: &dyn DiagnosticSink,
) -> Pass {
    let resolved = resolve_variables(variables, values);
    let mut pass = Pass {
        result: RuleEvaluationResult::default(),
        fired: Vec::new(),
        failed: Vec::new(),
    };

    // Supplied order, not priority order.
    for rule in rules {
        match check_condition(&rule.condition, &resolved, sink) {
            Ok(true) => {
                for action in &rule.actions {
                    apply_action(&mut pass.result, &rule.name, action, sink);
                }
                pass.fired.push(rule.name.clone());
            }
            Ok(false) => {}
            Err(_) => pass.failed.push(rule.name.clone()),
        }
    }

    pass
}

fn apply_action(
    result: &mut RuleEvaluationResult,
    rule: &str,
    action: &RuleAction,
    sink: &dyn DiagnosticSink,
) {
    match action {
        RuleAction::Assign { field, value } => {
            result.assign(field, value.clone().map_or(FieldValue::Null, FieldValue::Text));
        }
        RuleAction::HideField { field } => result.hide(field),
        RuleAction::ShowField { field } => result.show(field),
        RuleAction::DisplayText { value } if !value.is_empty() => {
            result.push_message(value.clone());
        }
        RuleAction::Error { value } if !value.is_empty() => {
            result.push_message(format!("Error: {value}"));
        }
        RuleAction::ShowWarning { value } if !value.is_empty() => {
            result.push_warning(value.clone());
        }
        // Empty texts and unhandled action types have no effect.
        _ => return,
    }
    sink.action_applied(rule, action);
}
