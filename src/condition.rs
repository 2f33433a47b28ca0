//! Rule condition evaluation.
//!
//! A condition such as `#{Risk level} == 'High' && #{Age} >= 18` goes through
//! three stages:
//!
//! 1. [`substitute_variables`] replaces each `#{name}` placeholder with a
//!    literal for the variable's current value.
//! 2. [`normalize_operators`] rewrites loose equality to strict equality
//!    outside of quoted literals.
//! 3. The result is parsed by [`parse`](crate::parse::parse) into a closed
//!    [`Expr`](crate::Expr) and reduced to its truthiness.
//!
//! The grammar only knows literals and operators, so a substituted value can
//! never introduce anything executable. Quoting keeps each value a single
//! literal; it is not what keeps evaluation safe.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::parse::{parse, quoted_len, ParseError};
use crate::FieldValue;

/// Resolved rule-variable values keyed by variable name.
pub type VariableValues = HashMap<String, FieldValue>;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Operator spellings and their strict replacements, longest first.
const OPERATOR_REWRITES: [(&str, &str); 7] = [
    ("!==", "!=="),
    ("===", "==="),
    ("<=", "<="),
    (">=", ">="),
    ("!=", "!=="),
    ("==", "==="),
    ("=", "==="),
];

/// Replace every `#{name}` placeholder with the literal form of the named
/// variable's value. Unknown names and null values become `''`.
#[must_use]
pub fn substitute_variables(condition: &str, variables: &VariableValues) -> String {
    PLACEHOLDER
        .replace_all(condition, |caps: &Captures<'_>| {
            variables
                .get(&caps[1])
                .map_or_else(|| FieldValue::Null.to_literal(), FieldValue::to_literal)
        })
        .into_owned()
}

/// Rewrite `==` and `=` to `===` and `!=` to `!==`, leaving quoted literals
/// and already-strict operators untouched.
#[must_use]
pub fn normalize_operators(expression: &str) -> String {
    let mut out = String::with_capacity(expression.len() + 8);
    let mut offset = 0;
    'scan: while offset < expression.len() {
        let rest = &expression[offset..];
        if let Some(len) = quoted_len(rest) {
            out.push_str(&rest[..len]);
            offset += len;
            continue;
        }
        for (from, to) in OPERATOR_REWRITES {
            if rest.starts_with(from) {
                out.push_str(to);
                offset += from.len();
                continue 'scan;
            }
        }
        let Some(c) = rest.chars().next() else { break };
        out.push(c);
        offset += c.len_utf8();
    }
    out
}

/// Evaluate a condition against resolved variable values.
///
/// Never fails: a condition that cannot be parsed is `false`, and the failure
/// is logged through `tracing`. That includes conditions past the parser's
/// limits of 64 nested parentheses or 512 operators.
#[must_use]
pub fn evaluate_condition(condition: &str, variables: &VariableValues) -> bool {
    evaluate_condition_with(condition, variables, &TracingSink)
}

/// [`evaluate_condition`] with an explicit diagnostic sink.
#[must_use]
pub fn evaluate_condition_with(
    condition: &str,
    variables: &VariableValues,
    sink: &dyn DiagnosticSink,
) -> bool {
    check_condition(condition, variables, sink).unwrap_or(false)
}

/// Evaluate a condition, reporting a parse failure both to the sink and to the
/// caller.
pub(crate) fn check_condition(
    condition: &str,
    variables: &VariableValues,
    sink: &dyn DiagnosticSink,
) -> Result<bool, ParseError> {
    let substituted = substitute_variables(condition, variables);
    let normalized = normalize_operators(&substituted);
    sink.condition_normalized(condition, &normalized);
    match parse(&normalized) {
        Ok(expr) => Ok(expr.holds()),
        Err(err) => {
            sink.condition_failed(condition, &normalized, &err);
            Err(err)
        }
    }
}

/// Names referenced by `#{...}` placeholders, in order of appearance.
pub(crate) fn placeholder_names(condition: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER
        .captures_iter(condition)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}
