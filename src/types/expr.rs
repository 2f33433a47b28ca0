use std::fmt;

use super::Value;

/// Comparison operators supported in rule conditions.
///
/// Equality is always strict; loose spellings (`==`, `=`, `!=`) are rewritten
/// to these before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    StrictEq,
    StrictNeq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Parsed condition. Every leaf is a literal, so an `Expr` is a closed
/// formula that evaluates without any environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Compare {
        left: Box<Expr>,
        op: CompareOp,
        right: Box<Expr>,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    #[must_use]
    pub fn compare(left: Expr, op: CompareOp, right: Expr) -> Expr {
        Expr::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(other))
    }

    /// Evaluate to a value. `&&` and `||` short-circuit and yield the
    /// deciding operand; `!` and comparisons yield booleans.
    #[must_use]
    pub fn eval(&self) -> Value {
        match self {
            Expr::Literal(v) => v.clone(),
            Expr::Compare { left, op, right } => {
                Value::Bool(left.eval().compare(*op, &right.eval()))
            }
            Expr::And(a, b) => {
                let lhs = a.eval();
                if lhs.is_truthy() { b.eval() } else { lhs }
            }
            Expr::Or(a, b) => {
                let lhs = a.eval();
                if lhs.is_truthy() { lhs } else { b.eval() }
            }
            Expr::Not(inner) => Value::Bool(!inner.eval().is_truthy()),
        }
    }

    /// Evaluate and reduce to the rule decision.
    #[must_use]
    pub fn holds(&self) -> bool {
        self.eval().is_truthy()
    }
}

impl std::ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::StrictEq => write!(f, "==="),
            CompareOp::StrictNeq => write!(f, "!=="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(v) => write!(f, "{v}"),
            Expr::Compare { left, op, right } => write!(f, "({left} {op} {right})"),
            Expr::And(a, b) => write!(f, "({a} && {b})"),
            Expr::Or(a, b) => write!(f, "({a} || {b})"),
            Expr::Not(inner) => write!(f, "!{inner}"),
        }
    }
}
