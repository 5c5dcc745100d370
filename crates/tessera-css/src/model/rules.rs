//! Rule kinds and per-class rule buckets.

use serde::Serialize;

use super::declaration::Declaration;
use super::selector::Selector;
use super::value::Value;
use crate::tables::PseudoClass;
use crate::values::expression;

/// Selectors plus the declarations they apply.
///
/// The parser files one rule per selector; a rule built by hand may carry
/// several.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleRule {
    /// Selectors of the rule.
    pub selectors: Vec<Selector>,
    /// Declarations applied by the rule.
    pub declarations: Vec<Declaration>,
}

impl StyleRule {
    /// Whether any declaration reads the screen size through `var()` or
    /// `expr()`.
    #[must_use]
    pub fn depends_on_screen(&self) -> bool {
        self.declarations
            .iter()
            .flat_map(|decl| &decl.values)
            .any(|value| match value {
                Value::Variable(name) | Value::VariableNegative(name) => is_screen_parameter(name),
                Value::Expression(text) | Value::ExpressionNegative(text) => {
                    expression::variable_names(text)
                        .iter()
                        .any(|name| is_screen_parameter(name))
                }
                _ => false,
            })
    }
}

/// Whether `name` names the screen width or height parameter.
#[must_use]
pub fn is_screen_parameter(name: &str) -> bool {
    ["screen-width", "screen-height"].iter().any(|param| {
        name == *param
            || name
                .strip_suffix(param)
                .is_some_and(|prefix| prefix.ends_with('-'))
    })
}

/// `@variables { name: value; ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariableRule {
    /// Variable definitions.
    pub declarations: Vec<Declaration>,
}

/// `@media name, ... { rules }`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaRule {
    /// Media names the rules apply to.
    pub media: Vec<String>,
    /// Gated rules.
    pub style_rules: Vec<StyleRule>,
}

impl MediaRule {
    /// Whether `medium` is one of this rule's media, ignoring case.
    #[must_use]
    pub fn applies_to(&self, medium: &str) -> bool {
        self.media.iter().any(|m| m.eq_ignore_ascii_case(medium))
    }
}

/// `@page [:name] { declarations }`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageRule {
    /// Page pseudo name, empty if none.
    pub selector: String,
    /// Page declarations.
    pub declarations: Vec<Declaration>,
}

/// `@import url(...) media;`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportRule {
    /// Imported sheet reference, quotes removed.
    pub href: String,
    /// Media list.
    pub media: Vec<String>,
}

/// Rules whose last compound selector names one widget class.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WidgetStyleRules {
    /// Class name, or `*` for rules without an element name.
    pub class_name: String,
    /// Rules valid in either orientation.
    pub style_rules: Vec<StyleRule>,
    /// Rules gated on portrait orientation.
    pub portrait_rules: Vec<StyleRule>,
    /// Rules gated on landscape orientation.
    pub landscape_rules: Vec<StyleRule>,
    /// Whether any rule reads the screen size.
    pub depends_on_screen: bool,
}

impl WidgetStyleRules {
    /// An empty bucket for `class_name`.
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// The list a rule belongs in, judged by its last selector's
    /// orientation pseudo-classes.
    pub fn list_for(&mut self, rule: &StyleRule) -> &mut Vec<StyleRule> {
        let (pseudo, negated) = rule
            .selectors
            .last()
            .map_or((PseudoClass::UNSPECIFIED, PseudoClass::UNKNOWN), Selector::pseudo_class);
        let gated = |on: PseudoClass, off: PseudoClass| {
            (pseudo.intersects(on) && !negated.intersects(on)) || negated.intersects(off)
        };
        if gated(PseudoClass::PORTRAIT, PseudoClass::LANDSCAPE) {
            &mut self.portrait_rules
        } else if gated(PseudoClass::LANDSCAPE, PseudoClass::PORTRAIT) {
            &mut self.landscape_rules
        } else {
            &mut self.style_rules
        }
    }

    /// Total number of rules in all three lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.style_rules.len() + self.portrait_rules.len() + self.landscape_rules.len()
    }

    /// Whether the bucket holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_parameter_names() {
        assert!(is_screen_parameter("screen-width"));
        assert!(is_screen_parameter("hb-param-screen-height"));
        assert!(!is_screen_parameter("offscreen-width"));
        assert!(!is_screen_parameter("screen-widths"));
    }
}
