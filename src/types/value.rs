use std::cmp::Ordering;
use std::fmt;

use super::expr::CompareOp;

/// A literal value inside a rule condition.
///
/// Conditions are closed formulas: after variable substitution every operand is
/// one of these literals, and the logical operators yield operands rather than
/// coercing to `bool` (`'' || 'x'` evaluates to `'x'`).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A double-precision number. `NaN` and the infinities are valid.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// A UTF-8 string.
    String(String),
}

impl Value {
    /// Truthiness as used by `!`, `&&`, `||` and by the final rule decision.
    ///
    /// `false`, `0`, `NaN` and the empty string are falsy; everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
        }
    }

    /// Compare this value to another using the given operator.
    ///
    /// Equality is strict: values of different types are never equal. Relational
    /// operators compare two strings by UTF-16 code units and convert every
    /// other pairing to numbers first. Any comparison involving `NaN` is `false`.
    #[must_use]
    pub fn compare(&self, op: CompareOp, other: &Value) -> bool {
        match op {
            CompareOp::StrictEq => self.strict_eq(other),
            CompareOp::StrictNeq => !self.strict_eq(other),
            CompareOp::Gt => self.relational(other) == Some(Ordering::Greater),
            CompareOp::Gte => matches!(
                self.relational(other),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            CompareOp::Lt => self.relational(other) == Some(Ordering::Less),
            CompareOp::Lte => matches!(
                self.relational(other),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }

    /// Numeric conversion used by relational comparisons.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(true) => 1.0,
            Value::Bool(false) => 0.0,
            Value::String(s) => string_to_number(s),
        }
    }

    fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            #[allow(clippy::float_cmp)]
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }

    fn relational(&self, other: &Value) -> Option<Ordering> {
        if let (Value::String(a), Value::String(b)) = (self, other) {
            return Some(a.encode_utf16().cmp(b.encode_utf16()));
        }
        self.to_number().partial_cmp(&other.to_number())
    }
}

/// Convert a string to a number the way the condition language does:
/// surrounding whitespace is ignored, the empty string is `0`, and anything
/// that is not a complete numeric literal is `NaN`.
pub(crate) fn string_to_number(raw: &str) -> f64 {
    let s = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).map_or(f64::NAN, |n| n as f64);
    }
    // `f64::from_str` also accepts spellings such as "inf" and "nan".
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// Render a number the way it appears when substituted into a condition.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_owned()
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        format!("{n}")
    }
}

/// Quote and escape a string so it reads back as exactly one string literal.
/// Backslashes are escaped before quotes.
pub(crate) fn quote_string(raw: &str) -> String {
    let escaped = raw.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => f.write_str(&format_number(*v)),
            Value::Bool(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(&quote_string(v)),
        }
    }
}
