mod engine;
mod error;
mod evaluation_report;
mod expr;
mod field_value;
mod field_values;
mod result;
mod rule;
mod value;

pub use engine::{RuleBuilder, RuleEngine, RuleEngineBuilder};
pub use error::ConfigError;
pub use evaluation_report::EvaluationReport;
pub use expr::{CompareOp, Expr};
pub use field_value::{FieldValue, ValueKind};
pub use field_values::FieldValues;
pub use result::RuleEvaluationResult;
pub use rule::{Rule, RuleAction, RuleVariable};
pub use value::Value;
