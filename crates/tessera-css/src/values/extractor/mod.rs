//! Typed value extraction over a declaration list.
//!
//! A [`ValueExtractor`] wraps the ordered declarations produced by the
//! cascade and turns them into unit-resolved geometry, box, border, font
//! and color values. Declarations are applied in order, so a later
//! declaration of the same property overrides an earlier one.
//!
//! Every `extract_*` method returns whether any relevant declaration was
//! found and writes through its output argument. A missing or malformed
//! declaration leaves the caller's value alone; malformed numbers resolve
//! to `0`.
//!
//! ```
//! use tessera_css::parser::Parser;
//! use tessera_css::values::{BoxValues, DeviceProfile, ValueExtractor};
//!
//! let mut parser = Parser::new(".box { margin: 2un 4px; }");
//! let sheet = parser.parse_sheet(Default::default()).unwrap();
//! let rule = &sheet.widget_rules["*"].style_rules[0];
//!
//! let profile = DeviceProfile::new(3.0, 1.0);
//! let extractor = ValueExtractor::new(&rule.declarations, profile);
//! let mut values = BoxValues::default();
//! assert!(extractor.extract_box(&mut values));
//! assert_eq!(values.margins, [6.0, 4.0, 6.0, 4.0]);
//! ```

mod decoration;
mod font;
mod layout;

use std::cell::OnceCell;
use std::collections::HashMap;

use serde::Serialize;

pub use decoration::{BackgroundValues, BorderValues, ImageValues, OutlineValues};
pub use font::{
    Capitalization, FontRole, FontStyle, FontValues, WEIGHT_BOLD, WEIGHT_MAX, WEIGHT_NORMAL,
};
pub use layout::{BoxValues, GeometryValues, PositionValues, TextValues};

use super::expression;
use super::paint::{Palette, parse_color_value};
use super::profile::{DeviceProfile, LengthUnit};
use super::{AspectRatioMode, Color};
use crate::model::{Declaration, Value, expand_box};
use crate::tables::{ColorRole, Property};

/// Longest `var()` chain followed before giving up.
pub const MAX_VARIABLE_DEPTH: usize = 16;

/// A source of `@variables` definitions.
pub trait VariableLookup {
    /// The declaration defining `name`, if any.
    fn find_variable(&self, name: &str) -> Option<&Declaration>;
}

/// Ordered definitions: the last declaration of a name wins.
impl VariableLookup for [Declaration] {
    fn find_variable(&self, name: &str) -> Option<&Declaration> {
        self.iter().rev().find(|decl| decl.property == name)
    }
}

impl VariableLookup for Vec<Declaration> {
    fn find_variable(&self, name: &str) -> Option<&Declaration> {
        self.as_slice().find_variable(name)
    }
}

/// Keyed definitions: the last insert of a name wins.
impl VariableLookup for HashMap<String, Declaration> {
    fn find_variable(&self, name: &str) -> Option<&Declaration> {
        self.get(name)
    }
}

/// A value read by [`ValueExtractor::extract_parameters`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParameterValue {
    /// A length, percentage, variable or expression resolved to pixels.
    Real(f64),
    /// A keyword, as written.
    Text(String),
    /// Anything else, unconverted.
    Value(Value),
}

/// Typed extraction over one declaration list.
pub struct ValueExtractor<'a> {
    declarations: &'a [Declaration],
    profile: DeviceProfile,
    palette: Palette,
    variables: Option<&'a dyn VariableLookup>,
    defaults: Option<&'a dyn VariableLookup>,
    font: OnceCell<Option<FontValues>>,
}

impl<'a> ValueExtractor<'a> {
    /// An extractor over `declarations`, resolving `un` and `mm` through
    /// `profile`.
    #[must_use]
    pub fn new(declarations: &'a [Declaration], profile: DeviceProfile) -> Self {
        Self {
            declarations,
            profile,
            palette: Palette::default(),
            variables: None,
            defaults: None,
            font: OnceCell::new(),
        }
    }

    /// An extractor for reading variables only.
    #[must_use]
    pub fn for_variables(variables: &'a dyn VariableLookup, profile: DeviceProfile) -> Self {
        Self::new(&[], profile).with_variables(variables)
    }

    /// Resolve `var()` through `variables`.
    #[must_use]
    pub fn with_variables(mut self, variables: &'a dyn VariableLookup) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Fall back to `defaults` for variables `with_variables` does not
    /// define.
    #[must_use]
    pub fn with_defaults(mut self, defaults: &'a dyn VariableLookup) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Resolve `palette(role)` colors against `palette`.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// The wrapped declarations.
    #[must_use]
    pub const fn declarations(&self) -> &'a [Declaration] {
        self.declarations
    }

    /// The profile lengths are resolved with.
    #[must_use]
    pub const fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    fn variable(&self, name: &str) -> Option<&'a Declaration> {
        self.variables
            .and_then(|lookup| lookup.find_variable(name))
            .or_else(|| self.defaults.and_then(|lookup| lookup.find_variable(name)))
            .filter(|decl| !decl.values.is_empty())
    }

    /// The first value of variable `name`.
    pub fn extract_variable_value(&self, name: &str, value: &mut Value) -> bool {
        match self.variable(name).and_then(|decl| decl.values.first()) {
            Some(found) => {
                value.clone_from(found);
                true
            }
            None => false,
        }
    }

    /// Variable `name` resolved to pixels, following `var()` chains.
    pub fn extract_variable_real(&self, name: &str, value: &mut f64) -> bool {
        self.variable_real(name, 0).map(|real| *value = real).is_some()
    }

    /// Evaluate an `expr()` body to pixels.
    pub fn extract_expression_value(&self, text: &str, value: &mut f64) -> bool {
        self.expression_real(text, 0).map(|real| *value = real).is_some()
    }

    /// A single value in pixels: lengths are scaled by the profile,
    /// percentages divided by 100, and variables and expressions resolved.
    #[must_use]
    pub fn as_real(&self, value: &Value) -> Option<f64> {
        self.real_at_depth(value, 0)
    }

    /// The first value of `decl` in pixels, `0` when it does not resolve.
    #[must_use]
    pub fn real_value(&self, decl: &Declaration) -> f64 {
        decl.values
            .first()
            .and_then(|value| self.as_real(value))
            .unwrap_or_default()
    }

    /// Up to four values of `decl` in pixels, box-expanded into
    /// `[top, right, bottom, left]`. `None` if any of them does not resolve.
    #[must_use]
    pub fn as_reals(&self, decl: &Declaration) -> Option<[f64; 4]> {
        let reals = decl
            .values
            .iter()
            .take(4)
            .map(|value| self.as_real(value))
            .collect::<Option<Vec<f64>>>()?;
        Some(expand_box(&reals).unwrap_or_default())
    }

    fn real_at_depth(&self, value: &Value, depth: usize) -> Option<f64> {
        match value {
            Value::Number(n) => Some(*n),
            Value::Percentage(p) => Some(p / 100.0),
            Value::Length(text) | Value::String(text) | Value::Identifier(text) => {
                self.length(text)
            }
            Value::Variable(name) => self.variable_real(name, depth),
            Value::VariableNegative(name) => self.variable_real(name, depth).map(|v| -v),
            Value::Expression(text) => self.expression_real(text, depth),
            Value::ExpressionNegative(text) => self.expression_real(text, depth).map(|v| -v),
            _ => None,
        }
    }

    fn length(&self, text: &str) -> Option<f64> {
        let (number, unit) = LengthUnit::split(text.trim());
        let number: f64 = number.parse().ok()?;
        Some(self.profile.to_pixels(number, unit))
    }

    fn variable_real(&self, name: &str, depth: usize) -> Option<f64> {
        if depth >= MAX_VARIABLE_DEPTH {
            tracing::debug!(name, "variable chain too deep");
            return None;
        }
        let value = self.variable(name)?.values.first()?;
        self.real_at_depth(value, depth + 1)
    }

    fn expression_real(&self, text: &str, depth: usize) -> Option<f64> {
        if depth >= MAX_VARIABLE_DEPTH {
            return None;
        }
        expression::evaluate(text, &self.profile, &mut |name| {
            self.variable_real(name, depth + 1)
        })
    }

    /// A color from one value, following a variable to its definition.
    fn color(&self, value: &Value) -> Option<Color> {
        let value = match value {
            Value::Variable(name) => self.variable(name)?.values.first()?,
            other => other,
        };
        parse_color_value(value).map(|data| data.resolve(&self.palette))
    }

    /// The first value of the last `color` declaration.
    pub fn extract_color(&self, color: &mut Color) -> bool {
        let mut hit = false;
        for decl in self.with_property(Property::Color) {
            if let Some(value) = decl.values.first() {
                if let Some(resolved) = self.color(value) {
                    *color = resolved;
                }
                hit = true;
            }
        }
        hit
    }

    /// Write the text and selection colors into `palette`.
    ///
    /// `color` sets the window-text, text and button-text roles,
    /// `selection-color` the highlighted-text role,
    /// `selection-background-color` the highlight role and
    /// `alternate-background-color` the alternate-base role.
    pub fn extract_palette(&self, palette: &mut Palette) -> bool {
        let mut hit = false;
        for decl in self.declarations {
            let roles: &[ColorRole] = match decl.property_id {
                Property::Color => &[ColorRole::WindowText, ColorRole::Text, ColorRole::ButtonText],
                Property::SelectionColor => &[ColorRole::HighlightedText],
                Property::SelectionBackgroundColor => &[ColorRole::Highlight],
                Property::AlternateBackgroundColor => &[ColorRole::AlternateBase],
                _ => continue,
            };
            let Some(color) = decl.values.first().and_then(|value| self.color(value)) else {
                continue;
            };
            for role in roles {
                palette.set_color(*role, color);
            }
            hit = true;
        }
        hit
    }

    /// `layout` and `section` names. A section without a layout is not a
    /// hit and leaves `section` alone.
    pub fn extract_layout(&self, layout: &mut String, section: &mut String) -> bool {
        let mut hit = false;
        let mut found_section = None;
        for decl in self.declarations {
            let [value] = decl.values.as_slice() else {
                continue;
            };
            match decl.property_id {
                Property::Layout => {
                    *layout = value.text().unwrap_or_default().to_string();
                    hit = true;
                }
                Property::Section => found_section = value.text(),
                _ => {}
            }
        }
        if hit {
            *section = found_section.unwrap_or_default().to_string();
        }
        hit
    }

    /// The `aspect-ratio` mode.
    pub fn extract_aspect_ratio_mode(&self, mode: &mut AspectRatioMode) -> bool {
        let mut hit = false;
        for decl in self.with_property(Property::AspectRatio) {
            if let Some(value) = decl.values.first() {
                *mode = AspectRatioMode::from_value(value);
                hit = true;
            }
        }
        hit
    }

    /// All `-qt-style-features` flags OR-ed together.
    #[must_use]
    pub fn extract_style_features(&self) -> u32 {
        self.with_property(Property::StyleFeatures)
            .map(Declaration::style_features_value)
            .fold(0, |acc, bits| acc | bits)
    }

    /// Values of arbitrary properties by name.
    ///
    /// For each key the last value of the last declaration named by it is
    /// stored in the matching slot of `values`. Lengths, percentages,
    /// variables and expressions resolve to [`ParameterValue::Real`] (or
    /// `None` when they do not resolve), keywords to their spelling. Returns
    /// `false` only when the two slices differ in length.
    pub fn extract_parameters(&self, keys: &[&str], values: &mut [Option<ParameterValue>]) -> bool {
        if keys.len() != values.len() {
            return false;
        }
        for decl in self.declarations {
            let Some(slot) = keys.iter().position(|key| decl.property == *key) else {
                continue;
            };
            let Some(value) = decl.values.last() else {
                continue;
            };
            values[slot] = match value {
                Value::Length(_)
                | Value::Percentage(_)
                | Value::Variable(_)
                | Value::VariableNegative(_)
                | Value::Expression(_)
                | Value::ExpressionNegative(_) => self.as_real(value).map(ParameterValue::Real),
                Value::KnownIdentifier { original, .. } => Some(ParameterValue::Text(original.clone())),
                other => Some(ParameterValue::Value(other.clone())),
            };
        }
        true
    }

    fn with_property(&self, id: Property) -> impl Iterator<Item = &'a Declaration> + use<'a> {
        self.declarations
            .iter()
            .filter(move |decl| decl.property_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::KnownValue;

    fn decl(property: &str, values: Vec<Value>) -> Declaration {
        Declaration::new(property, values)
    }

    fn px(text: &str) -> Value {
        Value::Length(text.to_string())
    }

    #[test]
    fn test_variable_chain() {
        let variables = vec![
            decl("a", vec![Value::Variable("b".into())]),
            decl("b", vec![px("5px")]),
        ];
        let extractor = ValueExtractor::for_variables(&variables, DeviceProfile::default());
        let mut real = 0.0;
        assert!(extractor.extract_variable_real("a", &mut real));
        assert_eq!(real, 5.0);
        assert!(!extractor.extract_variable_real("missing", &mut real));
        assert_eq!(real, 5.0);
    }

    #[test]
    fn test_last_definition_wins() {
        let variables = vec![decl("gap", vec![px("1px")]), decl("gap", vec![px("2px")])];
        let extractor = ValueExtractor::for_variables(&variables, DeviceProfile::default());
        assert_eq!(extractor.as_real(&Value::VariableNegative("gap".into())), Some(-2.0));
    }

    #[test]
    fn test_cyclic_variables_do_not_recurse_forever() {
        let variables = vec![
            decl("a", vec![Value::Variable("b".into())]),
            decl("b", vec![Value::Variable("a".into())]),
        ];
        let extractor = ValueExtractor::for_variables(&variables, DeviceProfile::default());
        assert_eq!(extractor.as_real(&Value::Variable("a".into())), None);
    }

    #[test]
    fn test_defaults_are_a_fallback() {
        let local = vec![decl("gap", vec![px("3px")])];
        let mut defaults = HashMap::new();
        let _ = defaults.insert("gap".to_string(), decl("gap", vec![px("9px")]));
        let _ = defaults.insert("wide".to_string(), decl("wide", vec![px("2un")]));
        let extractor = ValueExtractor::for_variables(&local, DeviceProfile::new(4.0, 1.0))
            .with_defaults(&defaults);
        assert_eq!(extractor.as_real(&Value::Variable("gap".into())), Some(3.0));
        assert_eq!(extractor.as_real(&Value::Variable("wide".into())), Some(8.0));
    }

    #[test]
    fn test_expression_with_variables() {
        let variables = vec![decl("gap", vec![px("2un")])];
        let extractor = ValueExtractor::for_variables(&variables, DeviceProfile::new(3.0, 1.0));
        let mut real = 0.0;
        assert!(extractor.extract_expression_value("var(gap) * 2 + 1", &mut real));
        assert_eq!(real, 13.0);
        assert!(!extractor.extract_expression_value("var(gap) / 0", &mut real));
        assert_eq!(
            extractor.as_real(&Value::ExpressionNegative("var(gap)".into())),
            Some(-6.0)
        );
    }

    #[test]
    fn test_layout_needs_layout_name() {
        let decls = vec![decl("section", vec![Value::Identifier("top".into())])];
        let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
        let (mut layout, mut section) = (String::new(), "keep".to_string());
        assert!(!extractor.extract_layout(&mut layout, &mut section));
        assert_eq!(section, "keep");

        let decls = vec![
            decl("section", vec![Value::Identifier("top".into())]),
            decl("layout", vec![Value::Identifier("grid".into())]),
        ];
        let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
        assert!(extractor.extract_layout(&mut layout, &mut section));
        assert_eq!((layout.as_str(), section.as_str()), ("grid", "top"));
    }

    #[test]
    fn test_parameters() {
        let decls = vec![
            decl("icon-size", vec![px("2un")]),
            decl(
                "mode",
                vec![Value::KnownIdentifier {
                    id: KnownValue::Bold,
                    original: "Bold".into(),
                }],
            ),
            decl("label", vec![Value::String("hi".into())]),
        ];
        let extractor = ValueExtractor::new(&decls, DeviceProfile::new(2.0, 1.0));
        let mut values = vec![None; 4];
        assert!(extractor.extract_parameters(&["icon-size", "mode", "label", "other"], &mut values));
        assert_eq!(
            values,
            vec![
                Some(ParameterValue::Real(4.0)),
                Some(ParameterValue::Text("Bold".into())),
                Some(ParameterValue::Value(Value::String("hi".into()))),
                None,
            ]
        );
        assert!(!extractor.extract_parameters(&["icon-size"], &mut values));
    }

    #[test]
    fn test_palette_roles() {
        let decls = vec![
            decl("color", vec![Value::Identifier("red".into())]),
            decl("selection-background-color", vec![Value::Color(Color::WHITE)]),
        ];
        let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
        let mut palette = Palette::default();
        assert!(extractor.extract_palette(&mut palette));
        assert_eq!(palette.color(ColorRole::ButtonText), Color::rgb(255, 0, 0));
        assert_eq!(palette.color(ColorRole::Highlight), Color::WHITE);
        assert_eq!(palette.color(ColorRole::Window), Color::BLACK);
    }
}
