//! Parsed declaration values.

use std::fmt;

use serde::Serialize;

use crate::tables::KnownValue;
use crate::values::Color;

/// One term of a declaration's value list.
///
/// Each variant carries exactly the payload its kind needs. Slash and comma
/// operators are kept as marker values between real terms so shorthand
/// extractors can split compound values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    /// Placeholder for an unparsed value.
    #[default]
    Unknown,
    /// A plain number.
    Number(f64),
    /// A percentage, stored without the `%`.
    Percentage(f64),
    /// A length with its unit suffix, kept as written (`4px`, `-2un`).
    Length(String),
    /// A quoted string, quotes removed.
    String(String),
    /// An identifier that is not a known keyword.
    Identifier(String),
    /// A known keyword and the literal text it was written as.
    KnownIdentifier {
        /// Keyword id.
        id: KnownValue,
        /// Source spelling.
        original: String,
    },
    /// A `url(...)` reference, resolved against the sheet's directory.
    Uri(String),
    /// A hex color.
    Color(Color),
    /// Any other function call.
    Function {
        /// Function name without the parenthesis.
        name: String,
        /// Raw argument text.
        args: String,
    },
    /// `/` between terms.
    TermOperatorSlash,
    /// `,` between terms.
    TermOperatorComma,
    /// `var(name)`
    Variable(String),
    /// `-var(name)`
    VariableNegative(String),
    /// `expr(...)` with its raw expression text.
    Expression(String),
    /// `-expr(...)`
    ExpressionNegative(String),
}

impl Value {
    /// Keyword id of a [`Value::KnownIdentifier`], otherwise
    /// [`KnownValue::Unknown`].
    #[must_use]
    pub const fn known(&self) -> KnownValue {
        match self {
            Self::KnownIdentifier { id, .. } => *id,
            _ => KnownValue::Unknown,
        }
    }

    /// Whether this is the keyword `id`.
    #[must_use]
    pub fn is_known(&self, id: KnownValue) -> bool {
        matches!(self, Self::KnownIdentifier { id: known, .. } if *known == id)
    }

    /// The textual payload: the string of a string-like value, the original
    /// spelling of a keyword, or the name/text of a variable or expression.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Length(text)
            | Self::String(text)
            | Self::Identifier(text)
            | Self::Uri(text)
            | Self::Variable(text)
            | Self::VariableNegative(text)
            | Self::Expression(text)
            | Self::ExpressionNegative(text) => Some(text),
            Self::KnownIdentifier { original, .. } => Some(original),
            _ => None,
        }
    }

    /// Whether this value is a slash or comma marker.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::TermOperatorSlash | Self::TermOperatorComma)
    }

    /// Numeric payload of a number or percentage.
    #[must_use]
    pub const fn number(&self) -> Option<f64> {
        match self {
            Self::Number(n) | Self::Percentage(n) => Some(*n),
            _ => None,
        }
    }

    /// Integer conversion with the usual truncation; `None` for non-numeric
    /// values and for lengths whose number part does not parse.
    #[must_use]
    pub fn to_int(&self) -> Option<i32> {
        match self {
            Self::Number(n) | Self::Percentage(n) => Some(*n as i32),
            Self::Length(text) => split_length(text).map(|(n, _)| n as i32),
            _ => None,
        }
    }
}

/// Split a length such as `4.5px` into its number and unit suffix.
///
/// The unit is whatever follows the numeric prefix.
#[must_use]
pub fn split_length(text: &str) -> Option<(f64, &str)> {
    let unit_start = text
        .char_indices()
        .find(|&(i, c)| {
            !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0))
        })
        .map_or(text.len(), |(i, _)| i);
    let number = text[..unit_start].parse().ok()?;
    Some((number, &text[unit_start..]))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Percentage(n) => write!(f, "{n}%"),
            Self::Length(text) | Self::Identifier(text) => f.write_str(text),
            Self::String(text) => write!(f, "\"{text}\""),
            Self::KnownIdentifier { original, .. } => f.write_str(original),
            Self::Uri(uri) => write!(f, "url({uri})"),
            Self::Color(color) => write!(f, "{color}"),
            Self::Function { name, args } => write!(f, "{name}({args})"),
            Self::TermOperatorSlash => f.write_str("/"),
            Self::TermOperatorComma => f.write_str(","),
            Self::Variable(name) => write!(f, "var({name})"),
            Self::VariableNegative(name) => write!(f, "-var({name})"),
            Self::Expression(text) => write!(f, "expr({text})"),
            Self::ExpressionNegative(text) => write!(f, "-expr({text})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_length() {
        assert_eq!(split_length("4px"), Some((4.0, "px")));
        assert_eq!(split_length("-2.5un"), Some((-2.5, "un")));
        assert_eq!(split_length("px"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::VariableNegative("gap".into()).to_string(), "-var(gap)");
        assert_eq!(Value::Percentage(50.0).to_string(), "50%");
    }
}
