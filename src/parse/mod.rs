mod error;
mod grammar;

pub use error::ParseError;

use crate::Expr;

/// Deepest parenthesis nesting accepted.
const MAX_NESTING: usize = 64;
/// Most operator tokens accepted in one condition.
const MAX_OPERATORS: usize = 512;

/// Parse a normalized condition into an [`Expr`].
///
/// The input must already use strict equality (`===`/`!==`); loose spellings
/// are rejected. Conditions nested or chained beyond fixed limits are rejected
/// before parsing so that parsing and evaluation stay within a bounded depth.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a closed boolean formula.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    use winnow::Parser;
    check_limits(input)?;
    grammar::parse_condition
        .parse(input)
        .map_err(|e| ParseError::new(e.inner().to_string(), e.offset()))
}

/// Length in bytes of the quoted literal at the start of `s`, including both
/// quotes. Backslash escapes are honored. `None` if `s` does not start with a
/// quote; an unterminated literal runs to the end of `s`.
pub(crate) fn quoted_len(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    let (_, quote) = chars.next().filter(|&(_, c)| c == '\'' || c == '"')?;
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            return Some(i + c.len_utf8());
        }
    }
    Some(s.len())
}

fn check_limits(input: &str) -> Result<(), ParseError> {
    let mut depth = 0_usize;
    let mut operators = 0_usize;
    let mut in_operator = false;
    let mut offset = 0;
    while offset < input.len() {
        let rest = &input[offset..];
        if let Some(len) = quoted_len(rest) {
            offset += len;
            in_operator = false;
            continue;
        }
        let Some(c) = rest.chars().next() else { break };
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(ParseError::new("condition nested too deeply", offset));
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        // Each `!` counts on its own; other operator characters count once per run.
        let starts_operator = c == '!' || (matches!(c, '<' | '>' | '&' | '|' | '=') && !in_operator);
        if starts_operator {
            operators += 1;
            if operators > MAX_OPERATORS {
                return Err(ParseError::new("too many operators in condition", offset));
            }
        }
        in_operator = matches!(c, '<' | '>' | '&' | '|' | '=');
        offset += c.len_utf8();
    }
    Ok(())
}
