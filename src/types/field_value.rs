use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::{format_number, quote_string};

/// Declared value type of a rule variable's data element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    #[default]
    Text,
    Number,
    Boolean,
    Date,
}

impl ValueKind {
    /// Map a platform `valueType` code to a kind. Codes outside the four
    /// supported kinds are treated as text.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "NUMBER" => ValueKind::Number,
            "BOOLEAN" => ValueKind::Boolean,
            "DATE" => ValueKind::Date,
            _ => ValueKind::Text,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ValueKind::Text => "TEXT",
            ValueKind::Number => "NUMBER",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Date => "DATE",
        };
        f.write_str(code)
    }
}

/// A raw form field value as held by the form layer.
///
/// Deserializes from plain JSON scalars, so a `{"de1": "High", "de2": true}`
/// object maps directly onto [`FieldValues`](super::FieldValues).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value. Also what an absent field resolves to.
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Hydrate a persisted string value for display in the form.
    ///
    /// Booleans are stored as text; `"true"` becomes `true` and any other text
    /// becomes `false`. Every other kind keeps its stored text unchanged.
    #[must_use]
    pub fn from_stored(raw: &str, kind: ValueKind) -> Self {
        match kind {
            ValueKind::Boolean => FieldValue::Bool(raw == "true"),
            ValueKind::Text | ValueKind::Number | ValueKind::Date => {
                FieldValue::Text(raw.to_owned())
            }
        }
    }

    /// The text of a [`FieldValue::Text`], if that is what this is.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render this value as a condition literal.
    ///
    /// Null becomes `''`, booleans and numbers are emitted bare, and text is
    /// quoted with backslashes and single quotes escaped so it can never close
    /// its own literal.
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            FieldValue::Null => "''".to_owned(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Text(s) => quote_string(s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<i64> for FieldValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: i64) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(n) => f.write_str(&format_number(*n)),
            FieldValue::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_for_null_is_empty_string() {
        assert_eq!(FieldValue::Null.to_literal(), "''");
    }

    #[test]
    fn literal_for_scalars_is_bare() {
        assert_eq!(FieldValue::Bool(false).to_literal(), "false");
        assert_eq!(FieldValue::Number(18.0).to_literal(), "18");
        assert_eq!(FieldValue::Number(-2.25).to_literal(), "-2.25");
    }

    #[test]
    fn literal_for_text_is_quoted() {
        assert_eq!(FieldValue::from("High").to_literal(), "'High'");
        assert_eq!(FieldValue::from("2024-01-15T10:30:00").to_literal(), "'2024-01-15T10:30:00'");
        assert_eq!(FieldValue::from("O'Brien").to_literal(), r"'O\'Brien'");
    }

    #[test]
    fn from_stored_boolean() {
        assert_eq!(FieldValue::from_stored("true", ValueKind::Boolean), FieldValue::Bool(true));
        assert_eq!(FieldValue::from_stored("false", ValueKind::Boolean), FieldValue::Bool(false));
        assert_eq!(FieldValue::from_stored("yes", ValueKind::Boolean), FieldValue::Bool(false));
    }

    #[test]
    fn from_stored_keeps_text_for_other_kinds() {
        assert_eq!(FieldValue::from_stored("15", ValueKind::Number), FieldValue::from("15"));
        assert_eq!(
            FieldValue::from_stored("2024-01-15", ValueKind::Date),
            FieldValue::from("2024-01-15")
        );
    }

    #[test]
    fn from_option() {
        assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::from("x"));
    }

    #[test]
    fn value_kind_codes() {
        assert_eq!(ValueKind::from_code("BOOLEAN"), ValueKind::Boolean);
        assert_eq!(ValueKind::from_code("LONG_TEXT"), ValueKind::Text);
        assert_eq!(ValueKind::Date.to_string(), "DATE");
    }

    #[test]
    fn deserializes_json_scalars() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[null, true, 3, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Null,
                FieldValue::Bool(true),
                FieldValue::Number(3.0),
                FieldValue::from("x"),
            ]
        );
    }
}
