//! The cascade engine.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::Orientation;
use super::matching::{DepthMemo, MatchContext};
use super::node::StyleNode;
use crate::model::{
    Declaration, GLOBAL_SELECTOR, Selector, SheetOrigin, StyleRule, StyleSheet,
};
use crate::tables::PseudoClass;

/// Weight added per inheritance level of the matched class.
const LEVEL_WEIGHT: i64 = 0x1000;
/// Weight added per nesting level of an inline sheet.
const INLINE_WEIGHT: i64 = 0x10000;

/// Pseudo-classes the static declaration query treats as active.
const STATIC_PSEUDO_CLASSES: [PseudoClass; 4] = [
    PseudoClass::ENABLED,
    PseudoClass::UNSPECIFIED,
    PseudoClass::LANDSCAPE,
    PseudoClass::PORTRAIT,
];

/// Identifies a sheet registered with a [`StyleSelector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SheetId(pub u64);

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sheet#{}", self.0)
    }
}

/// A matched rule and its cascade weight. The rule carries exactly one
/// selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedRule {
    /// Cascade weight; higher wins.
    pub weight: i64,
    /// The matched rule.
    pub rule: StyleRule,
}

/// A declaration of a matched rule and the rule's cascade weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedDeclaration {
    /// Cascade weight; higher wins.
    pub weight: i64,
    /// The declaration.
    pub declaration: Declaration,
}

/// Which pseudo-classes count as active when collecting declarations.
#[derive(Debug, Clone, Copy)]
enum PseudoFilter {
    /// Only the fixed static set.
    Static,
    /// The given interactive state plus the orientation bit.
    State(PseudoClass),
}

/// Resolves which rules of a set of stylesheets apply to a node, in cascade
/// order.
///
/// Sheets are indexed by the class names of their rule buckets, so a lookup
/// only visits the buckets of the node's inheritance chain and the wildcard
/// bucket.
#[derive(Debug, Default)]
pub struct StyleSelector {
    sheets: Vec<(SheetId, Arc<StyleSheet>)>,
    widget_sheets: HashMap<String, Vec<SheetId>>,
    next_id: u64,
    medium: String,
    memo: DepthMemo,
}

impl StyleSelector {
    /// An empty selector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sheet after the ones already present.
    pub fn add_style_sheet(&mut self, sheet: impl Into<Arc<StyleSheet>>) -> SheetId {
        let sheet = sheet.into();
        let id = SheetId(self.next_id);
        self.next_id += 1;

        for class_name in sheet.widget_rules.keys() {
            self.widget_sheets
                .entry(class_name.clone())
                .or_default()
                .push(id);
        }
        // Media rules are matched from the wildcard bucket.
        if !sheet.media_rules.is_empty() && !sheet.widget_rules.contains_key(GLOBAL_SELECTOR) {
            self.widget_sheets
                .entry(GLOBAL_SELECTOR.to_string())
                .or_default()
                .push(id);
        }
        tracing::debug!(
            %id,
            buckets = sheet.widget_rules.len(),
            rules = sheet.style_rule_count(),
            "added stylesheet"
        );
        self.sheets.push((id, sheet));
        self.memo.clear();
        id
    }

    /// Unregister a sheet, purging it from every class bucket.
    pub fn remove_style_sheet(&mut self, id: SheetId) -> bool {
        let Some(position) = self.sheets.iter().position(|(sheet_id, _)| *sheet_id == id) else {
            return false;
        };
        let _ = self.sheets.remove(position);
        self.widget_sheets.retain(|_, ids| {
            ids.retain(|sheet_id| *sheet_id != id);
            !ids.is_empty()
        });
        self.memo.clear();
        tracing::debug!(%id, "removed stylesheet");
        true
    }

    /// Unregister every sheet.
    pub fn clear(&mut self) {
        self.sheets.clear();
        self.widget_sheets.clear();
        self.memo.clear();
    }

    /// The registered sheet with `id`.
    #[must_use]
    pub fn style_sheet(&self, id: SheetId) -> Option<&Arc<StyleSheet>> {
        self.sheets
            .iter()
            .find(|(sheet_id, _)| *sheet_id == id)
            .map(|(_, sheet)| sheet)
    }

    /// Registered sheets in registration order.
    pub fn style_sheets(&self) -> impl Iterator<Item = &StyleSheet> {
        self.sheets.iter().map(|(_, sheet)| sheet.as_ref())
    }

    /// Number of registered sheets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Whether no sheet is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// The medium `@media` blocks are matched against.
    #[must_use]
    pub fn medium(&self) -> &str {
        &self.medium
    }

    /// Set the current medium. An empty medium disables `@media` blocks.
    pub fn set_medium(&mut self, medium: impl Into<String>) {
        self.medium = medium.into();
    }

    /// Matching rules and their weights, unsorted.
    ///
    /// Buckets are visited from the wildcard through the base classes to the
    /// most-derived class. Portrait and landscape rules are only matched for
    /// the corresponding orientation.
    #[must_use]
    pub fn weighted_style_rules_for_node<N: StyleNode>(
        &self,
        node: N,
        orientation: Orientation,
    ) -> Vec<WeightedRule> {
        let mut matched = Vec::new();
        if self.sheets.is_empty() {
            return matched;
        }
        node.init_node();
        let mut context = MatchContext::new(&self.memo);

        for (pass, class_name) in Self::bucket_names(node).into_iter().enumerate() {
            let Some(ids) = self.widget_sheets.get(&class_name) else {
                continue;
            };
            for sheet in ids.iter().filter_map(|id| self.style_sheet(*id)) {
                if let Some(bucket) = sheet.widget_stack(&class_name) {
                    let orientation_rules = match orientation {
                        Orientation::Vertical => &bucket.portrait_rules,
                        Orientation::Horizontal => &bucket.landscape_rules,
                    };
                    for rules in [&bucket.style_rules, orientation_rules] {
                        Self::match_rules(&mut context, node, rules, sheet, false, &mut matched);
                    }
                }
                if pass == 0 && !self.medium.is_empty() {
                    for media in &sheet.media_rules {
                        if media.applies_to(&self.medium) {
                            Self::match_rules(
                                &mut context,
                                node,
                                &media.style_rules,
                                sheet,
                                true,
                                &mut matched,
                            );
                        }
                    }
                }
            }
        }
        context.finish();
        matched
    }

    /// Matching rules in ascending weight order, each with exactly one
    /// selector.
    #[must_use]
    pub fn style_rules_for_node<N: StyleNode>(
        &self,
        node: N,
        orientation: Orientation,
    ) -> Vec<StyleRule> {
        let mut weighted = self.weighted_style_rules_for_node(node, orientation);
        weighted.sort_by_key(|rule| rule.weight);
        weighted.into_iter().map(|weighted| weighted.rule).collect()
    }

    /// Declarations of the matching rules active in the static pass, with
    /// their weights, unsorted.
    ///
    /// A rule naming a pseudo-element is kept only when `extra_pseudo`
    /// requests that element. Otherwise only rules without pseudo-classes or
    /// gated on `:enabled`, `:landscape` or `:portrait` are active.
    #[must_use]
    pub fn weighted_declarations_for_node<N: StyleNode>(
        &self,
        node: N,
        orientation: Orientation,
        extra_pseudo: Option<&str>,
    ) -> Vec<WeightedDeclaration> {
        self.weighted_declarations(node, orientation, extra_pseudo, PseudoFilter::Static)
    }

    /// Declarations active in the static pass, in cascade order: applying
    /// them first to last with "last write wins" per property yields the
    /// cascaded style.
    #[must_use]
    pub fn declarations_for_node<N: StyleNode>(
        &self,
        node: N,
        orientation: Orientation,
        extra_pseudo: Option<&str>,
    ) -> Vec<Declaration> {
        sorted(self.weighted_declarations_for_node(node, orientation, extra_pseudo))
    }

    /// Declarations of the matching rules active for an interactive `state`,
    /// with their weights, unsorted.
    ///
    /// A rule is active when every pseudo-class it requires is in `state`
    /// (plus the bit of `orientation`) and none it negates is.
    #[must_use]
    pub fn weighted_declarations_for_state<N: StyleNode>(
        &self,
        node: N,
        orientation: Orientation,
        extra_pseudo: Option<&str>,
        state: PseudoClass,
    ) -> Vec<WeightedDeclaration> {
        let state = state | orientation.pseudo_class();
        self.weighted_declarations(node, orientation, extra_pseudo, PseudoFilter::State(state))
    }

    /// Declarations active for an interactive `state`, in cascade order.
    #[must_use]
    pub fn declarations_for_state<N: StyleNode>(
        &self,
        node: N,
        orientation: Orientation,
        extra_pseudo: Option<&str>,
        state: PseudoClass,
    ) -> Vec<Declaration> {
        sorted(self.weighted_declarations_for_state(node, orientation, extra_pseudo, state))
    }

    /// Whether any bucket of the node's class chain has portrait or
    /// landscape rules, or reads the screen size.
    #[must_use]
    pub fn has_orientation_specific_style_rules<N: StyleNode>(&self, node: N) -> bool {
        Self::bucket_names(node).into_iter().any(|class_name| {
            self.widget_sheets
                .get(&class_name)
                .into_iter()
                .flatten()
                .filter_map(|id| self.style_sheet(*id))
                .filter_map(|sheet| sheet.widget_stack(&class_name))
                .any(|bucket| {
                    !bucket.portrait_rules.is_empty()
                        || !bucket.landscape_rules.is_empty()
                        || bucket.depends_on_screen
                })
        })
    }

    /// Add the `@variables` declarations of every sheet to `variables`,
    /// keyed by name. Later sheets replace earlier definitions.
    pub fn variable_rule_sets(&self, variables: &mut HashMap<String, Declaration>) {
        for (_, sheet) in &self.sheets {
            for rule in &sheet.variable_rules {
                for decl in &rule.declarations {
                    let _ = variables.insert(decl.property.clone(), decl.clone());
                }
            }
        }
    }

    /// Wildcard first, then the class chain from the base class to the
    /// most-derived class.
    fn bucket_names<N: StyleNode>(node: N) -> Vec<String> {
        let mut names = vec![GLOBAL_SELECTOR.to_string()];
        names.extend(
            node.class_chain()
                .into_iter()
                .rev()
                .filter(|class_name| *class_name != GLOBAL_SELECTOR)
                .map(ToString::to_string),
        );
        names
    }

    fn match_rules<N: StyleNode>(
        context: &mut MatchContext<'_, N>,
        node: N,
        rules: &[StyleRule],
        sheet: &StyleSheet,
        name_check_needed: bool,
        matched: &mut Vec<WeightedRule>,
    ) {
        for rule in rules {
            for selector in &rule.selectors {
                let Some(level) = context.selector_matches(selector, node, name_check_needed)
                else {
                    continue;
                };
                let weight = weight(selector, level, sheet);
                tracing::trace!(weight, bucket = selector.bucket_name(), "rule matched");
                let rule = if rule.selectors.len() > 1 {
                    StyleRule {
                        selectors: vec![selector.clone()],
                        declarations: rule.declarations.clone(),
                    }
                } else {
                    rule.clone()
                };
                matched.push(WeightedRule { weight, rule });
            }
        }
    }

    fn weighted_declarations<N: StyleNode>(
        &self,
        node: N,
        orientation: Orientation,
        extra_pseudo: Option<&str>,
        filter: PseudoFilter,
    ) -> Vec<WeightedDeclaration> {
        self.weighted_style_rules_for_node(node, orientation)
            .into_iter()
            .filter(|weighted| {
                weighted
                    .rule
                    .selectors
                    .first()
                    .is_some_and(|selector| is_active(selector, extra_pseudo, filter))
            })
            .flat_map(|WeightedRule { weight, rule }| {
                rule.declarations
                    .into_iter()
                    .map(move |declaration| WeightedDeclaration {
                        weight,
                        declaration,
                    })
            })
            .collect()
    }
}

/// `specificity + 0x1000 * level`, plus `0x10000 * depth` for inline sheets.
fn weight(selector: &Selector, level: u32, sheet: &StyleSheet) -> i64 {
    let inline = if sheet.origin == SheetOrigin::Inline {
        INLINE_WEIGHT * i64::from(sheet.depth)
    } else {
        0
    };
    i64::from(selector.specificity()) + LEVEL_WEIGHT * i64::from(level) + inline
}

fn sorted(mut weighted: Vec<WeightedDeclaration>) -> Vec<Declaration> {
    weighted.sort_by_key(|decl| decl.weight);
    weighted
        .into_iter()
        .map(|weighted| weighted.declaration)
        .collect()
}

fn has_unknown_pseudo_class(selector: &Selector) -> bool {
    let Some(last) = selector.basic_selectors.last() else {
        return false;
    };
    let skip = usize::from(!selector.pseudo_element().is_empty());
    last.pseudos
        .iter()
        .skip(skip)
        .any(|pseudo| pseudo.kind == PseudoClass::UNKNOWN)
}

fn is_active(selector: &Selector, extra_pseudo: Option<&str>, filter: PseudoFilter) -> bool {
    let pseudo_element = selector.pseudo_element();
    let element_requested = extra_pseudo.is_some_and(|extra| extra == pseudo_element);
    if !pseudo_element.is_empty() && !element_requested {
        return false;
    }
    let unknown = has_unknown_pseudo_class(selector);
    let (positive, negated) = selector.pseudo_class();

    match filter {
        PseudoFilter::Static => {
            let orientation_only = positive.is_empty()
                && !negated.is_empty()
                && (PseudoClass::LANDSCAPE | PseudoClass::PORTRAIT).contains(negated);
            element_requested
                || (!unknown && (STATIC_PSEUDO_CLASSES.contains(&positive) || orientation_only))
        }
        PseudoFilter::State(state) => {
            let active = state | PseudoClass::UNSPECIFIED;
            !unknown && active.contains(positive) && !active.intersects(negated)
        }
    }
}
