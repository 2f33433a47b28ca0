//! Diagnostic side channel for rule evaluation.
//!
//! Evaluation never fails from the caller's point of view. Everything worth
//! knowing about a pass (malformed conditions, what each rule did) goes to a
//! [`DiagnosticSink`] instead.

use crate::parse::ParseError;
use crate::RuleAction;

/// Receives diagnostics emitted while evaluating rules.
///
/// Implementations must be cheap: the engine calls them on every field change.
pub trait DiagnosticSink: Send + Sync {
    /// A condition could not be parsed and was treated as `false`.
    fn condition_failed(&self, condition: &str, normalized: &str, error: &ParseError);

    /// A condition was substituted and normalized, just before parsing.
    fn condition_normalized(&self, _condition: &str, _normalized: &str) {}

    /// A fired rule applied one of its actions.
    fn action_applied(&self, _rule: &str, _action: &RuleAction) {}

    /// A rule condition names a variable that was not declared. Reported once
    /// per name when the engine is built.
    fn undeclared_variable(&self, _name: &str) {}
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn condition_failed(&self, condition: &str, normalized: &str, error: &ParseError) {
        tracing::warn!(condition, normalized, error = %error, "invalid rule condition");
    }

    fn condition_normalized(&self, condition: &str, normalized: &str) {
        tracing::trace!(condition, normalized, "normalized rule condition");
    }

    fn action_applied(&self, rule: &str, action: &RuleAction) {
        tracing::debug!(
            rule,
            kind = action.kind(),
            field = action.field(),
            "applied rule action"
        );
    }

    fn undeclared_variable(&self, name: &str) {
        tracing::warn!(variable = name, "rule condition references an undeclared variable");
    }
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn condition_failed(&self, _condition: &str, _normalized: &str, _error: &ParseError) {}
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recording {
        failures: Mutex<Vec<String>>,
    }

    impl DiagnosticSink for Recording {
        fn condition_failed(&self, condition: &str, _normalized: &str, _error: &ParseError) {
            self.failures.lock().unwrap().push(condition.to_owned());
        }
    }

    #[test]
    fn default_methods_are_optional() {
        let sink = Recording::default();
        sink.condition_normalized("#{a} == 1", "'' === 1");
        sink.action_applied(
            "r",
            &RuleAction::ShowField {
                field: "de1".into(),
            },
        );
        sink.condition_failed("bad", "bad", &ParseError::new("x", 0));
        assert_eq!(*sink.failures.lock().unwrap(), vec!["bad".to_owned()]);
    }

    #[test]
    fn builtin_sinks_accept_every_event() {
        let err = ParseError::new("x", 0);
        let action = RuleAction::HideField {
            field: "de1".into(),
        };
        for sink in [&TracingSink as &dyn DiagnosticSink, &NoopSink] {
            sink.condition_failed("bad", "bad", &err);
            sink.condition_normalized("a", "a");
            sink.action_applied("r", &action);
            sink.undeclared_variable("Ghost");
        }
    }
}
