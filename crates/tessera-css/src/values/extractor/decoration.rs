//! Border, outline, background and image extraction.

use serde::Serialize;

use super::ValueExtractor;
use crate::model::{Declaration, Value, expand_box, parse_style_value};
use crate::tables::{
    Attachment, BorderStyle, KnownValue, Origin, Property, REPEATS, Repeat, find_known_value,
};
use crate::values::paint::{Brush, parse_brush_value};
use crate::values::{Alignment, Color, Size, parse_alignment};

/// Border edges as `[top, right, bottom, left]` and corner radii as
/// `[top-left, top-right, bottom-right, bottom-left]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BorderValues {
    /// Edge widths in pixels.
    pub widths: [f64; 4],
    /// Edge brushes.
    pub brushes: [Brush; 4],
    /// Edge styles.
    pub styles: [BorderStyle; 4],
    /// Corner radii, horizontal and vertical.
    pub radii: [Size; 4],
}

/// An outline: a border plus per-edge offsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutlineValues {
    /// Width, brush, style and radius of each edge.
    pub border: BorderValues,
    /// Distance from the border box, `[top, right, bottom, left]`.
    pub offsets: [f64; 4],
}

/// Background paint and image placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct BackgroundValues {
    pub brush: Brush,
    pub image: String,
    pub repeat: Repeat,
    pub alignment: Alignment,
    pub origin: Origin,
    pub attachment: Attachment,
    pub clip: Origin,
}

/// A foreground image and where it sits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageValues {
    /// Image reference.
    pub image: String,
    /// Position within the widget.
    pub alignment: Alignment,
}

const TOP_LEFT: usize = 0;
const TOP_RIGHT: usize = 1;
const BOTTOM_RIGHT: usize = 2;
const BOTTOM_LEFT: usize = 3;

/// Which edge a longhand property addresses.
const fn edge_of(id: Property) -> Option<usize> {
    match id {
        Property::BorderTop
        | Property::BorderTopWidth
        | Property::BorderWidthTop
        | Property::BorderTopColor
        | Property::BorderTopStyle => Some(0),
        Property::BorderRight
        | Property::BorderRightWidth
        | Property::BorderWidthRight
        | Property::BorderRightColor
        | Property::BorderRightStyle => Some(1),
        Property::BorderBottom
        | Property::BorderBottomWidth
        | Property::BorderWidthBottom
        | Property::BorderBottomColor
        | Property::BorderBottomStyle => Some(2),
        Property::BorderLeft
        | Property::BorderLeftWidth
        | Property::BorderWidthLeft
        | Property::BorderLeftColor
        | Property::BorderLeftStyle => Some(3),
        _ => None,
    }
}

impl ValueExtractor<'_> {
    /// `width style brush`, each part optional but in that order.
    fn border_value(&self, decl: &Declaration) -> (f64, BorderStyle, Brush) {
        let mut values = decl.values.iter().peekable();
        let mut width = 0.0;
        let mut style = BorderStyle::None;
        let mut brush = Brush::None;

        if let Some(real) = values.peek().and_then(|value| self.as_real(value)) {
            width = real;
            let _ = values.next();
        }
        if let Some(value) = values.peek() {
            let parsed = parse_style_value(value);
            if parsed != BorderStyle::Unknown {
                style = parsed;
                let _ = values.next();
            }
        }
        if let Some(value) = values.next() {
            brush = self.brush(value);
        }
        (width, style, brush)
    }

    fn brush(&self, value: &Value) -> Brush {
        match value {
            Value::Variable(_) => self.color(value).map_or(Brush::None, Brush::Solid),
            other => parse_brush_value(other, &self.palette),
        }
    }

    fn brushes(&self, decl: &Declaration) -> [Brush; 4] {
        let brushes: Vec<Brush> = decl.values.iter().take(4).map(|v| self.brush(v)).collect();
        expand_box(&brushes).unwrap_or_default()
    }

    /// `border-radius: h1 [h2 [h3 [h4]]] [/ v1 [v2 [v3 [v4]]]]`
    fn radii(&self, decl: &Declaration) -> [Size; 4] {
        let mut parts = decl.values.split(|value| *value == Value::TermOperatorSlash);
        let expand = |values: Option<&[Value]>| {
            let reals: Vec<f64> = values
                .unwrap_or_default()
                .iter()
                .filter(|value| !value.is_operator())
                .take(4)
                .map(|value| self.as_real(value).unwrap_or_default())
                .collect();
            expand_box(&reals)
        };
        let horizontal = expand(parts.next()).unwrap_or_default();
        let vertical = expand(parts.next()).unwrap_or(horizontal);
        std::array::from_fn(|corner| Size::new(horizontal[corner], vertical[corner]))
    }

    fn corner_radius(&self, decl: &Declaration) -> Size {
        let (horizontal, vertical) = self.pair(decl);
        Size::new(horizontal, vertical)
    }

    fn apply_corner(&self, decl: &Declaration, radii: &mut [Size; 4]) -> bool {
        let corner = match decl.property_id {
            Property::BorderRadius | Property::OutlineRadius => {
                *radii = self.radii(decl);
                return true;
            }
            Property::BorderTopLeftRadius | Property::OutlineTopLeftRadius => TOP_LEFT,
            Property::BorderTopRightRadius | Property::OutlineTopRightRadius => TOP_RIGHT,
            Property::BorderBottomRightRadius | Property::OutlineBottomRightRadius => BOTTOM_RIGHT,
            Property::BorderBottomLeftRadius | Property::OutlineBottomLeftRadius => BOTTOM_LEFT,
            _ => return false,
        };
        radii[corner] = self.corner_radius(decl);
        true
    }

    /// Border widths, brushes, styles and radii. Shorthands apply to every
    /// edge, longhands to one.
    pub fn extract_border(&self, border: &mut BorderValues) -> bool {
        let mut hit = false;
        for decl in self.declarations {
            if matches!(
                decl.property_id,
                Property::BorderRadius
                    | Property::BorderTopLeftRadius
                    | Property::BorderTopRightRadius
                    | Property::BorderBottomRightRadius
                    | Property::BorderBottomLeftRadius
            ) {
                hit |= self.apply_corner(decl, &mut border.radii);
                continue;
            }
            match decl.property_id {
                Property::BorderWidth => self.reals_into(decl, &mut border.widths),
                Property::BorderColor => border.brushes = self.brushes(decl),
                Property::BorderStyle => border.styles = decl.style_values(),
                Property::Border => {
                    let (width, style, brush) = self.border_value(decl);
                    border.widths = [width; 4];
                    border.styles = [style; 4];
                    border.brushes = std::array::from_fn(|_| brush.clone());
                }
                id => {
                    let Some(edge) = edge_of(id) else {
                        continue;
                    };
                    match id {
                        Property::BorderTop
                        | Property::BorderRight
                        | Property::BorderBottom
                        | Property::BorderLeft => {
                            let (width, style, brush) = self.border_value(decl);
                            border.widths[edge] = width;
                            border.styles[edge] = style;
                            border.brushes[edge] = brush;
                        }
                        Property::BorderTopColor
                        | Property::BorderRightColor
                        | Property::BorderBottomColor
                        | Property::BorderLeftColor => {
                            border.brushes[edge] =
                                decl.values.first().map_or(Brush::None, |v| self.brush(v));
                        }
                        Property::BorderTopStyle
                        | Property::BorderRightStyle
                        | Property::BorderBottomStyle
                        | Property::BorderLeftStyle => border.styles[edge] = decl.style_value(),
                        _ => border.widths[edge] = self.real_value(decl),
                    }
                }
            }
            hit = true;
        }
        hit
    }

    /// Outline widths, brushes, styles, radii and offsets.
    pub fn extract_outline(&self, outline: &mut OutlineValues) -> bool {
        let mut hit = false;
        for decl in self.declarations {
            let border = &mut outline.border;
            if matches!(
                decl.property_id,
                Property::OutlineRadius
                    | Property::OutlineTopLeftRadius
                    | Property::OutlineTopRightRadius
                    | Property::OutlineBottomRightRadius
                    | Property::OutlineBottomLeftRadius
            ) {
                hit |= self.apply_corner(decl, &mut border.radii);
                continue;
            }
            match decl.property_id {
                Property::OutlineWidth => self.reals_into(decl, &mut border.widths),
                Property::OutlineColor => border.brushes = self.brushes(decl),
                Property::OutlineStyle => border.styles = decl.style_values(),
                Property::OutlineOffset => self.reals_into(decl, &mut outline.offsets),
                Property::Outline => {
                    let (width, style, brush) = self.border_value(decl);
                    border.widths = [width; 4];
                    border.styles = [style; 4];
                    border.brushes = std::array::from_fn(|_| brush.clone());
                }
                _ => continue,
            }
            hit = true;
        }
        hit
    }

    /// Background brush, image and its placement.
    pub fn extract_background(&self, background: &mut BackgroundValues) -> bool {
        let mut hit = false;
        for decl in self.declarations {
            match decl.property_id {
                Property::BackgroundColor => {
                    background.brush = decl.values.first().map_or(Brush::None, |v| self.brush(v));
                }
                Property::BackgroundImage => {
                    background.image = decl.uri_value().unwrap_or_default().to_string();
                }
                Property::BackgroundRepeat => background.repeat = decl.repeat_value(),
                Property::BackgroundPosition => background.alignment = decl.alignment_value(),
                Property::BackgroundOrigin => background.origin = decl.origin_value(),
                Property::BackgroundAttachment => background.attachment = decl.attachment_value(),
                Property::BackgroundClip => background.clip = decl.origin_value(),
                Property::Background => self.background_shorthand(decl, background),
                _ => continue,
            }
            hit = true;
        }
        hit
    }

    /// `background: [url() | none] [repeat] [position] [brush]` in any
    /// order.
    fn background_shorthand(&self, decl: &Declaration, background: &mut BackgroundValues) {
        let values = &decl.values;
        let mut i = 0;
        while i < values.len() {
            let value = &values[i];
            i += 1;
            match value {
                Value::Uri(uri) => {
                    background.image.clone_from(uri);
                    continue;
                }
                _ if value.is_known(KnownValue::None) => {
                    background.image.clear();
                    continue;
                }
                _ if value.is_known(KnownValue::Transparent) => {
                    background.brush = Brush::Solid(Color::TRANSPARENT);
                    continue;
                }
                _ => {}
            }

            let repeat = value
                .text()
                .map_or(Repeat::Unknown, |text| find_known_value(text, REPEATS));
            if repeat != Repeat::Unknown {
                background.repeat = repeat;
                continue;
            }

            if matches!(
                value.known(),
                KnownValue::Left
                    | KnownValue::Right
                    | KnownValue::Top
                    | KnownValue::Bottom
                    | KnownValue::Center
            ) {
                let count = if matches!(values.get(i), Some(Value::KnownIdentifier { .. })) {
                    2
                } else {
                    1
                };
                let alignment = parse_alignment(&values[i - 1..i - 1 + count]);
                if !alignment.is_empty() {
                    background.alignment = alignment;
                    i += count - 1;
                    continue;
                }
            }

            background.brush = self.brush(value);
        }
    }

    /// `image` and `image-position`.
    pub fn extract_image(&self, image: &mut ImageValues) -> bool {
        let mut hit = false;
        for decl in self.declarations {
            match decl.property_id {
                Property::Image => {
                    image.image = decl
                        .uri_value()
                        .or_else(|| decl.values.first().and_then(Value::text))
                        .unwrap_or_default()
                        .to_string();
                }
                Property::ImagePosition => image.alignment = decl.alignment_value(),
                _ => continue,
            }
            hit = true;
        }
        hit
    }
}
