//! [`StyleNode`] for the reference widget tree.

use std::ptr;

use tessera_tree::{Widget, WidgetId, WidgetTree};

use super::node::StyleNode;
use crate::model::{AttributeSelector, GLOBAL_SELECTOR, ValueMatch};

/// A widget of a [`WidgetTree`] as a cascade node.
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'a> {
    tree: &'a WidgetTree,
    id: WidgetId,
}

impl<'a> TreeNode<'a> {
    /// The node for `id` in `tree`.
    #[must_use]
    pub const fn new(tree: &'a WidgetTree, id: WidgetId) -> Self {
        Self { tree, id }
    }

    /// The widget id.
    #[must_use]
    pub const fn id(&self) -> WidgetId {
        self.id
    }

    fn widget(&self) -> Option<&'a Widget> {
        self.tree.widget(self.id)
    }

    fn property(&self, name: &str) -> Option<&'a str> {
        self.tree.property(self.id, name)
    }
}

impl PartialEq for TreeNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl StyleNode for TreeNode<'_> {
    fn class_chain(&self) -> Vec<&str> {
        self.widget()
            .map(|widget| widget.class_chain.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Type names match at their inheritance level; a style class matches
    /// at the most-derived level.
    fn name_equals(&self, name: &str) -> Option<u32> {
        let widget = self.widget()?;
        if name == GLOBAL_SELECTOR {
            return Some(0);
        }
        widget.inheritance_level(name).or_else(|| {
            widget
                .style_classes()
                .any(|class| class == name)
                .then_some(widget.class_chain.len().saturating_sub(1) as u32)
        })
    }

    fn attribute_matches(&self, attribute: &AttributeSelector) -> bool {
        let value = self.property(&attribute.name);
        let matched = match attribute.match_kind {
            ValueMatch::NoMatch => {
                value.is_some_and(|value| !value.is_empty() && value != "false")
            }
            ValueMatch::Equal => value == Some(attribute.value.as_str()),
            ValueMatch::Contains => value.is_some_and(|value| {
                value
                    .split_whitespace()
                    .any(|word| word == attribute.value)
            }),
            ValueMatch::BeginsWith => {
                value.is_some_and(|value| value.starts_with(attribute.value.as_str()))
            }
        };
        matched != attribute.negated
    }

    fn ids(&self) -> Vec<&str> {
        self.widget()
            .and_then(|widget| widget.object_name.as_deref())
            .into_iter()
            .collect()
    }

    fn has_attributes(&self) -> bool {
        self.widget().is_some()
    }

    fn parent(&self) -> Option<Self> {
        self.tree.parent(self.id).map(|id| Self::new(self.tree, id))
    }

    fn previous_sibling(&self) -> Option<Self> {
        self.tree
            .prev_sibling(self.id)
            .map(|id| Self::new(self.tree, id))
    }
}
