//! Font extraction.

use serde::Serialize;
use strum_macros::Display;

use super::ValueExtractor;
use crate::model::{Declaration, Value};
use crate::tables::{KnownValue, Property};
use crate::values::profile::LengthUnit;

/// Weight of `font-weight: normal`.
pub const WEIGHT_NORMAL: i32 = 50;
/// Weight of `font-weight: bold`.
pub const WEIGHT_BOLD: i32 = 75;
/// Largest weight a numeric `font-weight` maps to.
pub const WEIGHT_MAX: i32 = 99;

/// Slant of a font.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Letter case rendering, from `font-variant` and `text-transform`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Capitalization {
    #[default]
    MixedCase,
    AllUppercase,
    AllLowercase,
    SmallCaps,
}

/// Toolkit font roles selectable through `font-variant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum FontRole {
    Primary,
    Secondary,
    Title,
    PrimarySmall,
    Digital,
}

/// Font attributes set by the declarations. `None` means not set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontValues {
    /// Family name.
    pub family: Option<String>,
    /// Size from a `pt` length.
    pub point_size: Option<f64>,
    /// Size from a `px`, `un` or `mm` length, in pixels.
    pub pixel_size: Option<i32>,
    /// Relative step from a size keyword: `small` is -1, `medium` 0 and
    /// each larger keyword one more.
    pub size_adjustment: Option<i32>,
    /// Slant.
    pub style: Option<FontStyle>,
    /// Weight on the 0..=99 scale.
    pub weight: Option<i32>,
    /// Underlined.
    pub underline: Option<bool>,
    /// Overlined.
    pub overline: Option<bool>,
    /// Struck out.
    pub strike_out: Option<bool>,
    /// Letter case.
    pub capitalization: Option<Capitalization>,
    /// Font role.
    pub role: Option<FontRole>,
    /// Text height in pixels.
    pub text_height: Option<f64>,
}

impl FontValues {
    fn set_size(&mut self, value: &Value, extractor: &ValueExtractor<'_>) -> bool {
        let adjustment = match value.known() {
            KnownValue::Small => Some(-1),
            KnownValue::Medium => Some(0),
            KnownValue::Large => Some(1),
            KnownValue::XLarge => Some(2),
            KnownValue::XxLarge => Some(3),
            _ => None,
        };
        if adjustment.is_some() {
            self.size_adjustment = adjustment;
            return true;
        }

        let Value::Length(text) = value else {
            return false;
        };
        let split = text.len().saturating_sub(2);
        if let Some(points) = text
            .get(split..)
            .filter(|unit| unit.eq_ignore_ascii_case("pt"))
            .and_then(|_| text[..split].parse::<f64>().ok())
        {
            self.point_size = Some(points);
            return true;
        }
        let (number, unit) = LengthUnit::split(text);
        match number.parse::<f64>() {
            Ok(number) => {
                self.pixel_size = Some(extractor.profile.to_pixels(number, unit).round() as i32);
                true
            }
            Err(_) => false,
        }
    }

    fn set_style(&mut self, value: &Value) -> bool {
        self.style = Some(match value.known() {
            KnownValue::Normal => FontStyle::Normal,
            KnownValue::Italic => FontStyle::Italic,
            KnownValue::Oblique => FontStyle::Oblique,
            _ => return false,
        });
        true
    }

    fn set_weight(&mut self, value: &Value) -> bool {
        self.weight = Some(match value {
            Value::Number(n) => (*n as i32 / 8).min(WEIGHT_MAX),
            _ => match value.known() {
                KnownValue::Normal => WEIGHT_NORMAL,
                KnownValue::Bold => WEIGHT_BOLD,
                _ => return false,
            },
        });
        true
    }

    fn set_family(&mut self, values: &[Value]) -> bool {
        let family = values
            .iter()
            .take_while(|value| **value != Value::TermOperatorComma)
            .map_while(Value::text)
            .collect::<Vec<_>>()
            .join(" ");
        let family = family.split_whitespace().collect::<Vec<_>>().join(" ");
        if family.is_empty() {
            return false;
        }
        self.family = Some(family);
        true
    }

    fn set_decoration(&mut self, values: &[Value]) {
        for value in values {
            match value.known() {
                KnownValue::Underline => self.underline = Some(true),
                KnownValue::Overline => self.overline = Some(true),
                KnownValue::LineThrough => self.strike_out = Some(true),
                KnownValue::None => {
                    self.underline = Some(false);
                    self.overline = Some(false);
                    self.strike_out = Some(false);
                }
                _ => {}
            }
        }
    }

    /// `font: [style | weight]* size family`
    fn set_shorthand(&mut self, decl: &Declaration, extractor: &ValueExtractor<'_>) {
        self.style = Some(FontStyle::Normal);
        self.weight = Some(WEIGHT_NORMAL);

        let values = decl.values.as_slice();
        let mut i = 0;
        while i < values.len() && (self.set_style(&values[i]) || self.set_weight(&values[i])) {
            i += 1;
        }
        if let Some(size) = values.get(i) {
            let _ = self.set_size(size, extractor);
            i += 1;
        }
        if let Some(rest) = values.get(i..) {
            let _ = self.set_family(rest);
        }
    }

    fn set_variant(&mut self, value: &Value) {
        match value.known() {
            KnownValue::Normal => self.capitalization = Some(Capitalization::MixedCase),
            KnownValue::SmallCaps => self.capitalization = Some(Capitalization::SmallCaps),
            KnownValue::Primary => self.role = Some(FontRole::Primary),
            KnownValue::Secondary => self.role = Some(FontRole::Secondary),
            KnownValue::Title => self.role = Some(FontRole::Title),
            KnownValue::PrimarySmall => self.role = Some(FontRole::PrimarySmall),
            KnownValue::Digital => self.role = Some(FontRole::Digital),
            _ => {}
        }
    }

    fn set_transform(&mut self, value: &Value) {
        self.capitalization = match value.known() {
            KnownValue::None => Some(Capitalization::MixedCase),
            KnownValue::Uppercase => Some(Capitalization::AllUppercase),
            KnownValue::Lowercase => Some(Capitalization::AllLowercase),
            _ => return,
        };
    }
}

impl ValueExtractor<'_> {
    /// Font attributes, computed once per extractor.
    ///
    /// A `fixed-height` (or `fixed-length`) also sets the text height
    /// unless a `text-height` came before it.
    pub fn extract_font(&self, font: &mut FontValues) -> bool {
        match self.font.get_or_init(|| self.compute_font()) {
            Some(found) => {
                font.clone_from(found);
                true
            }
            None => false,
        }
    }

    fn compute_font(&self) -> Option<FontValues> {
        let mut font = FontValues::default();
        let mut hit = false;
        let mut text_height_set = false;
        for decl in self.declarations {
            let Some(first) = decl.values.first() else {
                continue;
            };
            match decl.property_id {
                Property::FontSize => {
                    let _ = font.set_size(first, self);
                }
                Property::FontStyle => {
                    let _ = font.set_style(first);
                }
                Property::FontWeight => {
                    let _ = font.set_weight(first);
                }
                Property::FontFamily => {
                    let _ = font.set_family(&decl.values);
                }
                Property::TextDecoration => font.set_decoration(&decl.values),
                Property::Font => font.set_shorthand(decl, self),
                Property::FontVariant => font.set_variant(first),
                Property::TextTransform => font.set_transform(first),
                Property::TextHeight => {
                    text_height_set = true;
                    font.text_height = Some(self.real_value(decl));
                }
                Property::FixedHeight | Property::FixedLength if !text_height_set => {
                    font.text_height = Some(self.real_value(decl));
                }
                _ => continue,
            }
            hit = true;
        }
        hit.then_some(font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::DeviceProfile;

    fn kw(id: KnownValue, text: &str) -> Value {
        Value::KnownIdentifier {
            id,
            original: text.to_string(),
        }
    }

    fn font_of(decls: &[Declaration]) -> Option<FontValues> {
        let extractor = ValueExtractor::new(decls, DeviceProfile::new(2.0, 1.0));
        let mut font = FontValues::default();
        extractor.extract_font(&mut font).then_some(font)
    }

    #[test]
    fn test_shorthand() {
        let font = font_of(&[Declaration::new(
            "font",
            vec![
                kw(KnownValue::Italic, "italic"),
                kw(KnownValue::Bold, "bold"),
                Value::Length("12pt".into()),
                Value::Identifier("Nokia".into()),
                Value::Identifier("Sans".into()),
            ],
        )])
        .unwrap();
        assert_eq!(font.style, Some(FontStyle::Italic));
        assert_eq!(font.weight, Some(WEIGHT_BOLD));
        assert_eq!(font.point_size, Some(12.0));
        assert_eq!(font.family.as_deref(), Some("Nokia Sans"));
    }

    #[test]
    fn test_numeric_weight_is_clamped() {
        let font = font_of(&[Declaration::new("font-weight", vec![Value::Number(900.0)])]).unwrap();
        assert_eq!(font.weight, Some(WEIGHT_MAX));
        let font = font_of(&[Declaration::new("font-weight", vec![Value::Number(400.0)])]).unwrap();
        assert_eq!(font.weight, Some(50));
    }

    #[test]
    fn test_family_stops_at_comma() {
        let font = font_of(&[Declaration::new(
            "font-family",
            vec![
                Value::String("Nokia Sans".into()),
                Value::TermOperatorComma,
                Value::Identifier("serif".into()),
            ],
        )])
        .unwrap();
        assert_eq!(font.family.as_deref(), Some("Nokia Sans"));
    }

    #[test]
    fn test_sizes_and_roles() {
        let font = font_of(&[
            Declaration::new("font-size", vec![Value::Length("3un".into())]),
            Declaration::new("font-variant", vec![kw(KnownValue::Title, "title")]),
            Declaration::new("text-transform", vec![kw(KnownValue::Uppercase, "uppercase")]),
        ])
        .unwrap();
        assert_eq!(font.pixel_size, Some(6));
        assert_eq!(font.role, Some(FontRole::Title));
        assert_eq!(font.capitalization, Some(Capitalization::AllUppercase));

        let font = font_of(&[Declaration::new("font-size", vec![kw(KnownValue::XLarge, "x-large")])])
            .unwrap();
        assert_eq!(font.size_adjustment, Some(2));
    }

    #[test]
    fn test_text_height_precedence() {
        let font = font_of(&[
            Declaration::new("text-height", vec![Value::Length("5px".into())]),
            Declaration::new("fixed-height", vec![Value::Length("9px".into())]),
        ])
        .unwrap();
        assert_eq!(font.text_height, Some(5.0));

        let font = font_of(&[Declaration::new("fixed-height", vec![Value::Length("9px".into())])])
            .unwrap();
        assert_eq!(font.text_height, Some(9.0));
    }

    #[test]
    fn test_no_font_declarations() {
        assert_eq!(font_of(&[Declaration::new("width", vec![Value::Number(1.0)])]), None);
    }
}
