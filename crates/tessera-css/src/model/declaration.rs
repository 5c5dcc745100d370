//! Declarations and their typed accessors.

use serde::Serialize;

use super::value::Value;
use crate::tables::{
    ATTACHMENTS, Attachment, BORDER_STYLES, BorderStyle, KnownValue, ORIGINS, Origin,
    POSITION_MODES, PROPERTIES, PositionMode, Property, REPEATS, Repeat, STYLE_FEATURES, TILE_MODES,
    TileMode, find_known_value,
};
use crate::values::paint::{Brush, Palette, parse_brush_value, parse_color_value};
use crate::values::{Alignment, Color, Rect, Size, parse_alignment};

/// Expand a one- to four-item list into `[top, right, bottom, left]`.
///
/// One item fills all edges, two set `top = bottom` and `right = left`, three
/// set `top`, `right = left` and `bottom`, four map verbatim. Items past the
/// fourth are ignored; an empty list yields `None`.
#[must_use]
pub fn expand_box<T: Clone>(items: &[T]) -> Option<[T; 4]> {
    match items {
        [] => None,
        [all] => Some([all.clone(), all.clone(), all.clone(), all.clone()]),
        [vertical, horizontal] => Some([
            vertical.clone(),
            horizontal.clone(),
            vertical.clone(),
            horizontal.clone(),
        ]),
        [top, horizontal, bottom] => Some([
            top.clone(),
            horizontal.clone(),
            bottom.clone(),
            horizontal.clone(),
        ]),
        [top, right, bottom, left, ..] => {
            Some([top.clone(), right.clone(), bottom.clone(), left.clone()])
        }
    }
}

/// Image and slicing parameters of a `border-image` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorderImage {
    /// Image reference, empty when the first value is not a `url()`.
    pub image: String,
    /// Slice offsets `[top, right, bottom, left]`, -1 when not given.
    pub cuts: [i32; 4],
    /// Horizontal tiling.
    pub horizontal: TileMode,
    /// Vertical tiling.
    pub vertical: TileMode,
}

/// `property: values [!important]`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Declaration {
    /// Property name as written.
    pub property: String,
    /// Property id, [`Property::Unknown`] if the name is not recognized.
    pub property_id: Property,
    /// Value terms, with operator markers between them.
    pub values: Vec<Value>,
    /// Whether `!important` was given.
    pub important: bool,
}

impl Declaration {
    /// Build a declaration, looking the property id up from its name.
    #[must_use]
    pub fn new(property: impl Into<String>, values: Vec<Value>) -> Self {
        let property = property.into();
        let property_id = find_known_value(&property, PROPERTIES);
        Self {
            property,
            property_id,
            values,
            important: false,
        }
    }

    /// True for a declaration that was never filled in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.property.is_empty() && self.property_id == Property::Unknown
    }

    /// The single value as a color; `None` when there is not exactly one
    /// value or it is not a color.
    #[must_use]
    pub fn color_value(&self, palette: &Palette) -> Option<Color> {
        match self.values.as_slice() {
            [value] => parse_color_value(value).map(|data| data.resolve(palette)),
            _ => None,
        }
    }

    /// Up to four colors, box-expanded.
    #[must_use]
    pub fn color_values(&self, palette: &Palette) -> [Option<Color>; 4] {
        let colors: Vec<Option<Color>> = self
            .values
            .iter()
            .take(4)
            .map(|value| parse_color_value(value).map(|data| data.resolve(palette)))
            .collect();
        expand_box(&colors).unwrap_or_default()
    }

    /// The single value as a brush, [`Brush::None`] otherwise.
    #[must_use]
    pub fn brush_value(&self, palette: &Palette) -> Brush {
        match self.values.as_slice() {
            [value] => parse_brush_value(value, palette),
            _ => Brush::None,
        }
    }

    /// Up to four brushes, box-expanded.
    #[must_use]
    pub fn brush_values(&self, palette: &Palette) -> [Brush; 4] {
        let brushes: Vec<Brush> = self
            .values
            .iter()
            .take(4)
            .map(|value| parse_brush_value(value, palette))
            .collect();
        expand_box(&brushes).unwrap_or_default()
    }

    /// The single value as a border style. Anything but exactly one value
    /// gives [`BorderStyle::None`].
    #[must_use]
    pub fn style_value(&self) -> BorderStyle {
        match self.values.as_slice() {
            [value] => parse_style_value(value),
            _ => BorderStyle::None,
        }
    }

    /// Up to four border styles, box-expanded.
    #[must_use]
    pub fn style_values(&self) -> [BorderStyle; 4] {
        let styles: Vec<BorderStyle> = self.values.iter().take(4).map(parse_style_value).collect();
        expand_box(&styles).unwrap_or([BorderStyle::Unknown; 4])
    }

    /// The single value as a box origin.
    #[must_use]
    pub fn origin_value(&self) -> Origin {
        self.single_lookup(ORIGINS)
    }

    /// The single value as a repeat mode.
    #[must_use]
    pub fn repeat_value(&self) -> Repeat {
        self.single_lookup(REPEATS)
    }

    /// The single value as a position mode.
    #[must_use]
    pub fn position_value(&self) -> PositionMode {
        self.single_lookup(POSITION_MODES)
    }

    /// The single value as an attachment mode.
    #[must_use]
    pub fn attachment_value(&self) -> Attachment {
        self.single_lookup(ATTACHMENTS)
    }

    /// One or two alignment keywords.
    #[must_use]
    pub fn alignment_value(&self) -> Alignment {
        parse_alignment(&self.values)
    }

    /// All style-feature names OR-ed into a bitmask.
    #[must_use]
    pub fn style_features_value(&self) -> u32 {
        self.values
            .iter()
            .filter_map(Value::text)
            .map(|name| find_known_value(name, STYLE_FEATURES).bits())
            .fold(0, |acc, bits| acc | bits)
    }

    /// The single value as an integer. With a `unit`, the value must be a
    /// length ending in that unit.
    #[must_use]
    pub fn int_value(&self, unit: Option<&str>) -> Option<i32> {
        match self.values.as_slice() {
            [value] => int_value_helper(value, unit),
            _ => None,
        }
    }

    /// The single value as a real number. With a `unit`, the value must be a
    /// length ending in that unit.
    #[must_use]
    pub fn real_value(&self, unit: Option<&str>) -> Option<f64> {
        match self.values.as_slice() {
            [value] => {
                let text = numeric_text(value, unit)?;
                text.parse().ok()
            }
            _ => None,
        }
    }

    /// One or two `px` lengths; a missing second value repeats the first.
    #[must_use]
    pub fn size_value(&self) -> Size {
        let first = self
            .values
            .first()
            .and_then(|v| int_value_helper(v, Some("px")))
            .unwrap_or(0);
        let second = match self.values.get(1) {
            Some(v) => int_value_helper(v, Some("px")).unwrap_or(0),
            None => first,
        };
        Size {
            width: f64::from(first),
            height: f64::from(second),
        }
    }

    /// `rect(x y width height)`
    #[must_use]
    pub fn rect_value(&self) -> Option<Rect> {
        let [Value::Function { name, args }] = self.values.as_slice() else {
            return None;
        };
        if name != "rect" {
            return None;
        }
        let parts: Vec<i32> = args
            .split_whitespace()
            .map(|part| part.parse().unwrap_or(0))
            .collect();
        let [x, y, width, height] = parts.as_slice() else {
            return None;
        };
        Some(Rect {
            x: f64::from(*x),
            y: f64::from(*y),
            width: f64::from(*width),
            height: f64::from(*height),
        })
    }

    /// The first value's `url()` reference.
    #[must_use]
    pub fn uri_value(&self) -> Option<&str> {
        match self.values.first() {
            Some(Value::Uri(uri)) => Some(uri),
            _ => None,
        }
    }

    /// `border-image: url(...) [cuts...] [h-tile [v-tile]]`
    #[must_use]
    pub fn border_image_value(&self) -> BorderImage {
        let mut result = BorderImage {
            image: self.uri_value().unwrap_or_default().to_string(),
            cuts: [-1; 4],
            horizontal: TileMode::Stretch,
            vertical: TileMode::Stretch,
        };
        let count = self.values.len();
        if count < 2 {
            return result;
        }

        if matches!(self.values[1], Value::Number(_)) {
            let cuts: Vec<i32> = self.values[1..]
                .iter()
                .take(4)
                .map_while(|value| match value {
                    Value::Number(n) => Some(*n as i32),
                    _ => None,
                })
                .collect();
            if let Some(expanded) = expand_box(&cuts) {
                result.cuts = expanded;
            }
        }

        if let Some(name) = keyword_text(&self.values[count - 1]) {
            result.vertical = find_known_value(name, TILE_MODES);
        }
        result.horizontal = keyword_text(&self.values[count - 2])
            .map_or(result.vertical, |name| find_known_value(name, TILE_MODES));
        result
    }

    fn single_lookup<T: Copy + Default>(&self, table: &[(&str, T)]) -> T {
        match self.values.as_slice() {
            [value] => value
                .text()
                .map_or_else(T::default, |text| find_known_value(text, table)),
            _ => T::default(),
        }
    }
}

fn keyword_text(value: &Value) -> Option<&str> {
    match value {
        Value::Identifier(name) | Value::KnownIdentifier { original: name, .. } => Some(name),
        _ => None,
    }
}

pub(crate) fn parse_style_value(value: &Value) -> BorderStyle {
    if value.is_known(KnownValue::None) {
        return BorderStyle::None;
    }
    value
        .text()
        .map_or(BorderStyle::Unknown, |text| find_known_value(text, BORDER_STYLES))
}

/// Text of a numeric value with `unit` stripped, if the value qualifies.
fn numeric_text(value: &Value, unit: Option<&str>) -> Option<String> {
    match unit {
        Some(unit) => {
            let Value::Length(text) = value else {
                return None;
            };
            let split = text.len().checked_sub(unit.len())?;
            let (number, suffix) = (text.get(..split)?, text.get(split..)?);
            suffix.eq_ignore_ascii_case(unit).then(|| number.to_string())
        }
        None => match value {
            Value::Number(n) | Value::Percentage(n) => Some(n.to_string()),
            other => other.text().map(str::to_string),
        },
    }
}

fn int_value_helper(value: &Value, unit: Option<&str>) -> Option<i32> {
    numeric_text(value, unit)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_box() {
        assert_eq!(expand_box(&[1]), Some([1, 1, 1, 1]));
        assert_eq!(expand_box(&[1, 2]), Some([1, 2, 1, 2]));
        assert_eq!(expand_box(&[1, 2, 3]), Some([1, 2, 3, 2]));
        assert_eq!(expand_box(&[1, 2, 3, 4, 5]), Some([1, 2, 3, 4]));
        assert_eq!(expand_box::<i32>(&[]), None);
    }

    #[test]
    fn test_int_value_with_unit() {
        let decl = Declaration::new("width", vec![Value::Length("12px".into())]);
        assert_eq!(decl.int_value(Some("px")), Some(12));
        assert_eq!(decl.int_value(Some("un")), None);
        let number = Declaration::new("width", vec![Value::Number(7.0)]);
        assert_eq!(number.int_value(None), Some(7));
        assert_eq!(number.int_value(Some("px")), None);
    }

    #[test]
    fn test_size_value_repeats_first() {
        let decl = Declaration::new("icon-size", vec![Value::Length("16px".into())]);
        assert_eq!(decl.size_value(), Size { width: 16.0, height: 16.0 });
    }

    #[test]
    fn test_rect_value() {
        let decl = Declaration::new(
            "clip",
            vec![Value::Function {
                name: "rect".into(),
                args: "1 2 30 40".into(),
            }],
        );
        assert_eq!(
            decl.rect_value(),
            Some(Rect {
                x: 1.0,
                y: 2.0,
                width: 30.0,
                height: 40.0
            })
        );
    }

    #[test]
    fn test_border_image_defaults() {
        let decl = Declaration::new(
            "border-image",
            vec![
                Value::Uri("frame.png".into()),
                Value::Number(4.0),
                Value::Number(8.0),
                Value::Identifier("round".into()),
            ],
        );
        let image = decl.border_image_value();
        assert_eq!(image.image, "frame.png");
        assert_eq!(image.cuts, [4, 8, 4, 8]);
        assert_eq!(image.vertical, TileMode::Round);
        assert_eq!(image.horizontal, TileMode::Round);
    }
}
