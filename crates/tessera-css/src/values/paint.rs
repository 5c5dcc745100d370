//! Colors, palette roles and gradient brushes.

use std::collections::HashMap;

use serde::Serialize;
use strum_macros::Display;

use super::Color;
use crate::model::Value;
use crate::parser::Parser;
use crate::scanner::TokenType;
use crate::tables::{ColorRole, KNOWN_VALUES, KnownValue, find_known_value};

/// Colors for every [`ColorRole`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    colors: [Color; ColorRole::COUNT],
}

impl Default for Palette {
    fn default() -> Self {
        Self::filled(Color::BLACK)
    }
}

impl Palette {
    /// A palette with every role set to `color`.
    #[must_use]
    pub const fn filled(color: Color) -> Self {
        Self {
            colors: [color; ColorRole::COUNT],
        }
    }

    /// Color of `role`.
    #[must_use]
    pub const fn color(&self, role: ColorRole) -> Color {
        self.colors[role.index()]
    }

    /// Set the color of `role`.
    pub const fn set_color(&mut self, role: ColorRole, color: Color) {
        self.colors[role.index()] = color;
    }
}

/// A color that is either literal or taken from the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorData {
    /// A literal color.
    Color(Color),
    /// A palette role, resolved late.
    Role(ColorRole),
}

impl ColorData {
    /// The concrete color against `palette`.
    #[must_use]
    pub const fn resolve(self, palette: &Palette) -> Color {
        match self {
            Self::Color(color) => color,
            Self::Role(role) => palette.color(role),
        }
    }
}

/// How a gradient continues past its end points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Spread {
    #[default]
    Pad,
    Reflect,
    Repeat,
}

/// One color stop of a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    /// Position in `0.0..=1.0`.
    pub offset: f64,
    /// Color at the position.
    pub color: Color,
}

/// A fill.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum Brush {
    /// No fill.
    #[default]
    None,
    /// A single color.
    Solid(Color),
    /// `qlineargradient(x1:, y1:, x2:, y2:, stop: ...)`
    Linear {
        /// Start point.
        start: (f64, f64),
        /// End point.
        end: (f64, f64),
        /// Color stops in source order.
        stops: Vec<GradientStop>,
        /// Spread mode.
        spread: Spread,
    },
    /// `qradialgradient(cx:, cy:, radius:, fx:, fy:, stop: ...)`
    Radial {
        /// Center.
        center: (f64, f64),
        /// Radius.
        radius: f64,
        /// Focal point.
        focal: (f64, f64),
        /// Color stops in source order.
        stops: Vec<GradientStop>,
        /// Spread mode.
        spread: Spread,
    },
    /// `qconicalgradient(cx:, cy:, angle:, stop: ...)`
    Conical {
        /// Center.
        center: (f64, f64),
        /// Start angle in degrees.
        angle: f64,
        /// Color stops in source order.
        stops: Vec<GradientStop>,
        /// Spread mode.
        spread: Spread,
    },
}

impl Brush {
    /// Whether this brush paints anything.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Interpret a single value as a color.
///
/// Names, strings and hex colors resolve directly, `transparent` is special
/// cased, `palette(role)` names a palette role and `rgb[a](...)` or
/// `hsv[a](...)` take three channels plus an optional alpha, given as
/// numbers or percentages.
#[must_use]
pub fn parse_color_value(value: &Value) -> Option<ColorData> {
    match value {
        Value::Identifier(text) | Value::String(text) => Color::parse(text).map(ColorData::Color),
        Value::Color(color) => Some(ColorData::Color(*color)),
        Value::KnownIdentifier {
            id: KnownValue::Transparent,
            ..
        } => Some(ColorData::Color(Color::TRANSPARENT)),
        Value::Function { name, args } => parse_color_function(name, args),
        _ => None,
    }
}

fn parse_color_function(name: &str, args: &str) -> Option<ColorData> {
    if name == "palette" {
        return find_known_value(args.trim(), KNOWN_VALUES)
            .color_role()
            .map(ColorData::Role);
    }

    let rgb = name.starts_with("rgb");
    if !rgb && !name.starts_with("hsv") {
        return None;
    }

    let mut parser = Parser::new(args);
    if !parser.test_expr() {
        return None;
    }
    let digits = parser.parse_expr().ok()?;
    if digits.len() < 5 {
        return None;
    }
    let mut channels = [0_i32, 0, 0, 255];
    for (slot, digit) in channels.iter_mut().zip(digits.iter().step_by(2).take(4)) {
        *slot = match digit {
            Value::Number(n) => *n as i32,
            Value::Percentage(p) => (p * 255.0 / 100.0) as i32,
            _ => return None,
        };
    }
    let [c1, c2, c3, alpha] = channels;
    let color = if rgb {
        Color::from_rgb_checked(c1, c2, c3, alpha)
    } else {
        Color::from_hsv(c1, c2, c3, alpha)
    };
    color.map(ColorData::Color)
}

/// Interpret a single value as a brush: any color, or one of the gradient
/// functions. Anything else is [`Brush::None`].
#[must_use]
pub fn parse_brush_value(value: &Value, palette: &Palette) -> Brush {
    if let Some(color) = parse_color_value(value) {
        return Brush::Solid(color.resolve(palette));
    }
    let Value::Function { name, args } = value else {
        return Brush::None;
    };
    let kind = match name.to_ascii_lowercase().as_str() {
        "qlineargradient" => GradientKind::Linear,
        "qradialgradient" => GradientKind::Radial,
        "qconicalgradient" => GradientKind::Conical,
        _ => return Brush::None,
    };
    parse_gradient(kind, args, palette).unwrap_or_default()
}

enum GradientKind {
    Linear,
    Radial,
    Conical,
}

/// Comma separated `key: value` pairs; `stop: offset color` may repeat.
fn parse_gradient(kind: GradientKind, args: &str, palette: &Palette) -> Option<Brush> {
    let mut vars: HashMap<String, f64> = HashMap::new();
    let mut stops = Vec::new();
    let mut spread = Spread::Pad;

    let mut parser = Parser::new(args);
    while parser.has_next() {
        parser.skip_space();
        if !parser.test(TokenType::Ident) {
            return None;
        }
        let attr = parser.lexem();
        parser.skip_space();
        if !parser.test(TokenType::Colon) {
            return None;
        }
        parser.skip_space();
        if attr.eq_ignore_ascii_case("stop") {
            let _ = parser.advance();
            let offset = parser.parse_term().ok()?;
            parser.skip_space();
            let _ = parser.advance();
            let color = parser.parse_term().ok()?;
            stops.push(GradientStop {
                offset: offset.number().unwrap_or_default(),
                color: parse_color_value(&color)?.resolve(palette),
            });
        } else {
            let _ = parser.advance();
            let value = parser.parse_term().unwrap_or_default();
            if attr.eq_ignore_ascii_case("spread") {
                spread = match value.text() {
                    Some("reflect") => Spread::Reflect,
                    Some("repeat") => Spread::Repeat,
                    _ => Spread::Pad,
                };
            } else {
                let _ = vars.insert(attr.to_ascii_lowercase(), value.number().unwrap_or_default());
            }
        }
        parser.skip_space();
        let _ = parser.test(TokenType::Comma);
    }

    let var = |name: &str| vars.get(name).copied().unwrap_or_default();
    Some(match kind {
        GradientKind::Linear => Brush::Linear {
            start: (var("x1"), var("y1")),
            end: (var("x2"), var("y2")),
            stops,
            spread,
        },
        GradientKind::Radial => Brush::Radial {
            center: (var("cx"), var("cy")),
            radius: var("radius"),
            focal: (var("fx"), var("fy")),
            stops,
            spread,
        },
        GradientKind::Conical => Brush::Conical {
            center: (var("cx"), var("cy")),
            angle: var("angle"),
            stops,
            spread,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(name: &str, args: &str) -> Value {
        Value::Function {
            name: name.into(),
            args: args.into(),
        }
    }

    #[test]
    fn test_rgb_with_percentages() {
        assert_eq!(
            parse_color_value(&function("rgb", "100%, 0, 51")),
            Some(ColorData::Color(Color::rgb(255, 0, 51)))
        );
        assert_eq!(
            parse_color_value(&function("rgba", "1, 2, 3, 4")),
            Some(ColorData::Color(Color::rgba(1, 2, 3, 4)))
        );
        assert_eq!(parse_color_value(&function("rgb", "1, 2")), None);
        assert_eq!(parse_color_value(&function("rgb", "300, 0, 0")), None);
    }

    #[test]
    fn test_palette_role() {
        let mut palette = Palette::default();
        palette.set_color(ColorRole::Highlight, Color::WHITE);
        let data = parse_color_value(&function("palette", " highlight ")).unwrap();
        assert_eq!(data, ColorData::Role(ColorRole::Highlight));
        assert_eq!(data.resolve(&palette), Color::WHITE);
        assert_eq!(parse_color_value(&function("palette", "bold")), None);
    }

    #[test]
    fn test_linear_gradient() {
        let brush = parse_brush_value(
            &function(
                "qlineargradient",
                "x1: 0, y1: 0, x2: 1, y2: 0, stop: 0 #ff0000, stop: 1 blue, spread: reflect",
            ),
            &Palette::default(),
        );
        let Brush::Linear {
            start,
            end,
            stops,
            spread,
        } = brush
        else {
            panic!("expected a linear gradient, got {brush:?}");
        };
        assert_eq!((start, end), ((0.0, 0.0), (1.0, 0.0)));
        assert_eq!(spread, Spread::Reflect);
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].color, Color::rgb(255, 0, 0));
        assert_eq!(stops[1].color, Color::rgb(0, 0, 255));
    }

    #[test]
    fn test_unknown_function_is_no_brush() {
        assert!(parse_brush_value(&function("qgradient", "x"), &Palette::default()).is_none());
        assert!(parse_brush_value(&Value::Number(3.0), &Palette::default()).is_none());
    }
}
