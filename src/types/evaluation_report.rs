use std::fmt;
use std::time::Duration;

use super::result::RuleEvaluationResult;

/// Detailed evaluation report returned by
/// [`RuleEngine::evaluate_detailed()`](super::engine::RuleEngine::evaluate_detailed).
///
/// Contains the result, which rules fired, which rules had a condition that
/// could not be evaluated, the evaluation order, and the wall-clock duration.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    result: RuleEvaluationResult,
    fired: Vec<String>,
    failed: Vec<String>,
    evaluation_order: Vec<String>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(
        result: RuleEvaluationResult,
        fired: Vec<String>,
        failed: Vec<String>,
        evaluation_order: Vec<String>,
        duration: Duration,
    ) -> Self {
        Self {
            result,
            fired,
            failed,
            evaluation_order,
            duration,
        }
    }

    /// The evaluation result, same as [`RuleEngine::evaluate()`](super::engine::RuleEngine::evaluate).
    pub fn result(&self) -> &RuleEvaluationResult {
        &self.result
    }

    pub fn into_result(self) -> RuleEvaluationResult {
        self.result
    }

    /// Names of rules whose condition held, in evaluation order.
    #[must_use]
    pub fn fired(&self) -> &[String] {
        &self.fired
    }

    /// Names of rules whose condition failed to parse and was treated as false.
    #[must_use]
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    /// All rule names in the order they were evaluated.
    #[must_use]
    pub fn evaluation_order(&self) -> &[String] {
        &self.evaluation_order
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fired: [{}]", self.fired.join(", "))?;
        if !self.failed.is_empty() {
            write!(f, ", failed: [{}]", self.failed.join(", "))?;
        }
        write!(f, ", result: {}", self.result)?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
