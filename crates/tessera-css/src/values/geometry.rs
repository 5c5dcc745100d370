//! Plain geometry and layout-mode types produced by the extractor.

use serde::Serialize;
use strum_macros::Display;

use crate::model::Value;
use crate::tables::KnownValue;

/// A width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Size {
    /// A size of `width` by `height`.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangle in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// How a widget grows and shrinks along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum SizePolicy {
    Fixed,
    Minimum,
    Maximum,
    #[default]
    Preferred,
    Expanding,
    MinimumExpanding,
    Ignored,
}

impl SizePolicy {
    /// Policy named by `value`; anything unrecognized is
    /// [`SizePolicy::Preferred`].
    #[must_use]
    pub const fn from_value(value: &Value) -> Self {
        match value.known() {
            KnownValue::Fixed => Self::Fixed,
            KnownValue::Minimum => Self::Minimum,
            KnownValue::Maximum => Self::Maximum,
            KnownValue::Expanding => Self::Expanding,
            KnownValue::MinimumExpanding => Self::MinimumExpanding,
            KnownValue::Ignored => Self::Ignored,
            _ => Self::Preferred,
        }
    }
}

/// How an image is scaled into its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum AspectRatioMode {
    Ignore,
    #[default]
    Keep,
    KeepExpand,
}

impl AspectRatioMode {
    /// Mode named by `value`, [`AspectRatioMode::Keep`] by default.
    #[must_use]
    pub const fn from_value(value: &Value) -> Self {
        match value.known() {
            KnownValue::Ignore => Self::Ignore,
            KnownValue::KeepExpand => Self::KeepExpand,
            _ => Self::Keep,
        }
    }
}

/// Text wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum TextWrapMode {
    #[default]
    NoWrap,
    WordWrap,
    WrapAnywhere,
    WrapAtWordBoundaryOrAnywhere,
}

impl TextWrapMode {
    /// Mode named by `value`, [`TextWrapMode::NoWrap`] by default.
    #[must_use]
    pub const fn from_value(value: &Value) -> Self {
        match value.known() {
            KnownValue::WordWrap => Self::WordWrap,
            KnownValue::WrapAnywhere => Self::WrapAnywhere,
            KnownValue::WrapAtWordBoundaryOrAnywhere => Self::WrapAtWordBoundaryOrAnywhere,
            _ => Self::NoWrap,
        }
    }
}

/// Where text that does not fit is elided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ElideMode {
    Left,
    Right,
    Middle,
    #[default]
    None,
}

impl ElideMode {
    /// Mode named by `value`, [`ElideMode::None`] by default.
    #[must_use]
    pub const fn from_value(value: &Value) -> Self {
        match value.known() {
            KnownValue::Left => Self::Left,
            KnownValue::Right => Self::Right,
            KnownValue::Middle => Self::Middle,
            _ => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(id: KnownValue) -> Value {
        Value::KnownIdentifier {
            id,
            original: id.to_string(),
        }
    }

    #[test]
    fn test_policy_defaults_to_preferred() {
        assert_eq!(SizePolicy::from_value(&keyword(KnownValue::Fixed)), SizePolicy::Fixed);
        assert_eq!(
            SizePolicy::from_value(&Value::Identifier("stretchy".into())),
            SizePolicy::Preferred
        );
    }

    #[test]
    fn test_modes_from_keywords() {
        assert_eq!(
            AspectRatioMode::from_value(&keyword(KnownValue::KeepExpand)),
            AspectRatioMode::KeepExpand
        );
        assert_eq!(
            TextWrapMode::from_value(&keyword(KnownValue::WordWrap)),
            TextWrapMode::WordWrap
        );
        assert_eq!(ElideMode::from_value(&keyword(KnownValue::Middle)), ElideMode::Middle);
        assert_eq!(ElideMode::from_value(&Value::Number(1.0)), ElideMode::None);
    }
}
