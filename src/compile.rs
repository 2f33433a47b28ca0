use std::collections::HashSet;
use std::sync::Arc;

use crate::diagnostics::DiagnosticSink;
use crate::{ConfigError, Rule, RuleEngine, RuleVariable};

pub(crate) fn compile(
    rules: Vec<Rule>,
    variables: Vec<RuleVariable>,
    sink: Arc<dyn DiagnosticSink>,
) -> Result<RuleEngine, ConfigError> {
    check_variables(&variables)?;

    let engine = RuleEngine {
        rules,
        variables,
        sink,
    };

    for name in engine.undeclared_variables() {
        engine.sink.undeclared_variable(name);
    }
    tracing::debug!(
        rules = engine.rules.len(),
        variables = engine.variables.len(),
        "built rule engine"
    );

    Ok(engine)
}

fn check_variables(variables: &[RuleVariable]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for variable in variables {
        if variable.name.is_empty() {
            return Err(ConfigError::EmptyVariableName {
                data_element: variable.data_element.clone(),
            });
        }
        if !seen.insert(variable.name.as_str()) {
            return Err(ConfigError::DuplicateVariable {
                name: variable.name.clone(),
            });
        }
    }
    Ok(())
}
