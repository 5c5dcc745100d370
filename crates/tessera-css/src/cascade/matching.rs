//! Selector matching against a [`StyleNode`].

use std::cell::RefCell;
use std::collections::HashMap;

use super::node::StyleNode;
use crate::model::{BasicSelector, GLOBAL_SELECTOR, Relation, Selector};

const CLASS_ATTRIBUTE: &str = "class";

/// Memo of inheritance levels keyed by (most-derived class, element name).
///
/// Owned by one selector and cleared whenever its sheets change.
#[derive(Debug, Default)]
pub(super) struct DepthMemo {
    levels: RefCell<HashMap<(String, String), Option<u32>>>,
}

impl DepthMemo {
    pub(super) fn clear(&self) {
        self.levels.borrow_mut().clear();
    }

    fn level<N: StyleNode>(&self, node: N, name: &str) -> Option<u32> {
        let class = node.class_chain().first().map(ToString::to_string)?;
        let key = (class, name.to_string());
        if let Some(level) = self.levels.borrow().get(&key) {
            return *level;
        }
        let level = node.name_equals(name);
        let _ = self.levels.borrow_mut().insert(key, level);
        level
    }
}

/// State shared by the matches of one lookup.
pub(super) struct MatchContext<'m, N> {
    memo: &'m DepthMemo,
    /// Nodes whose attributes were read, cleaned up after the lookup.
    dirty: Vec<N>,
}

impl<'m, N: StyleNode> MatchContext<'m, N> {
    pub(super) const fn new(memo: &'m DepthMemo) -> Self {
        Self {
            memo,
            dirty: Vec::new(),
        }
    }

    pub(super) fn finish(self) {
        for node in self.dirty {
            node.cleanup_node();
        }
    }

    /// Match level of `selector` against `node`, `None` for no match.
    ///
    /// The last compound must match `node`. The walk then moves left through
    /// the chain: an ancestor step keeps climbing until some ancestor
    /// matches, while parent and sibling steps must match in one step.
    pub(super) fn selector_matches(
        &mut self,
        selector: &Selector,
        node: N,
        name_check_needed: bool,
    ) -> Option<u32> {
        let compounds = &selector.basic_selectors;
        let first = compounds.first()?;
        if first.relation_to_next == Relation::None {
            if compounds.len() != 1 {
                return None;
            }
            return self.basic_selector_matches(first, node, name_check_needed);
        }
        if compounds.len() <= 1 {
            return None;
        }

        let mut i = compounds.len() - 1;
        let mut node = node;
        let mut compound = &compounds[i];
        let mut first_level = None;
        let mut first_loop = true;
        let level = loop {
            let level =
                self.basic_selector_matches(compound, node, name_check_needed || !first_loop);
            if first_loop {
                first_level = level;
            }
            if level.is_some() {
                if i == 0 {
                    break level;
                }
                i -= 1;
            } else if compound.relation_to_next != Relation::Ancestor {
                break None;
            }

            compound = &compounds[i];
            let next = match compound.relation_to_next {
                Relation::PrecedingSibling => node.previous_sibling(),
                _ => node.parent(),
            };
            let Some(next) = next else {
                break None;
            };
            node = next;
            first_loop = false;
        };
        tracing::trace!(matched = level.is_some(), "combinator chain");
        level.and(first_level)
    }

    /// Match level of one compound against `node`.
    ///
    /// A `class` attribute predicate stands in for the element name, so
    /// `.foo` matches by class membership alone.
    fn basic_selector_matches(
        &mut self,
        compound: &BasicSelector,
        node: N,
        name_check_needed: bool,
    ) -> Option<u32> {
        let mut element_name = compound.element_name.as_str();

        if !compound.attribute_selectors.is_empty() {
            if !node.has_attributes() {
                return None;
            }
            if !self.dirty.contains(&node) {
                self.dirty.push(node);
            }
            for attribute in &compound.attribute_selectors {
                // `[!class~=foo]` excludes a class; it never names the element
                if attribute.name == CLASS_ATTRIBUTE && !attribute.negated {
                    element_name = attribute.value.as_str();
                }
                if !node.attribute_matches(attribute) {
                    return None;
                }
            }
        }

        let mut level = 0;
        if !element_name.is_empty() && element_name != GLOBAL_SELECTOR {
            level = if name_check_needed {
                node.name_equals(element_name)?
            } else {
                self.memo.level(node, element_name)?
            };
        }

        if !compound.ids.is_empty() && !compound.ids.iter().map(String::as_str).eq(node.ids()) {
            return None;
        }
        Some(level)
    }
}
