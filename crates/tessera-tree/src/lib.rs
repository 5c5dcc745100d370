//! Widget tree implementation for the Tessera stylesheet engine.
//!
//! The cascade engine never owns UI objects; it walks whatever tree the host
//! toolkit exposes through a small capability trait. This crate provides a
//! reference tree that hosts, tests and the command-line tool use directly.
//!
//! # Design
//!
//! The tree uses arena allocation with [`WidgetId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Each [`Widget`] records its type-inheritance chain (most-derived
//! class first), an optional object name (matched by `#id` selectors) and a
//! map of dynamic properties (matched by `[attr]` and `.class` selectors).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Map of dynamic property names to values for a widget.
pub type PropertyMap = BTreeMap<String, String>;

/// Name of the dynamic property holding space-separated style classes.
pub const CLASS_PROPERTY: &str = "class";

/// A type-safe index into the widget tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetId(pub usize);

/// A styled UI object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    /// Type-inheritance chain, most-derived class first
    /// (e.g. `["PushButton", "AbstractButton", "Widget"]`).
    pub class_chain: Vec<String>,
    /// Object name, exposed to selectors as the widget's id.
    pub object_name: Option<String>,
    /// Dynamic properties.
    pub properties: PropertyMap,
}

impl Widget {
    /// Create a widget with the given inheritance chain, most-derived first.
    #[must_use]
    pub fn new<I, S>(class_chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class_chain: class_chain.into_iter().map(Into::into).collect(),
            object_name: None,
            properties: PropertyMap::new(),
        }
    }

    /// Builder: set the object name.
    #[must_use]
    pub fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }

    /// Builder: set a dynamic property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.properties.insert(name.into(), value.into());
        self
    }

    /// The most-derived class name, if any.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_chain.first().map(String::as_str)
    }

    /// Number of classes above `name` in the inheritance chain, or `None`
    /// if the widget does not inherit `name`.
    ///
    /// A `PushButton : AbstractButton : Widget` widget reports level 2 for
    /// `PushButton` and level 0 for `Widget`.
    #[must_use]
    pub fn inheritance_level(&self, name: &str) -> Option<u32> {
        let position = self.class_chain.iter().position(|class| class == name)?;
        u32::try_from(self.class_chain.len() - 1 - position).ok()
    }

    /// Style classes from the space-separated `class` property.
    pub fn style_classes(&self) -> impl Iterator<Item = &str> {
        self.properties
            .get(CLASS_PROPERTY)
            .map(String::as_str)
            .unwrap_or_default()
            .split_whitespace()
    }
}

/// Arena slot: a widget plus its relationships.
#[derive(Debug, Clone)]
pub struct Node {
    /// The widget data.
    pub widget: Widget,
    /// Parent widget, `None` for top-level widgets.
    pub parent: Option<WidgetId>,
    /// Children in insertion order.
    pub children: Vec<WidgetId>,
    /// Next sibling under the same parent.
    pub next_sibling: Option<WidgetId>,
    /// Previous sibling under the same parent.
    pub prev_sibling: Option<WidgetId>,
}

/// Arena-based widget tree with O(1) node access and traversal.
#[derive(Debug, Clone, Default)]
pub struct WidgetTree {
    nodes: Vec<Node>,
}

impl WidgetTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the widget stored at `id`.
    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.get(id).map(|n| &n.widget)
    }

    /// Get a mutable reference to the widget stored at `id`.
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.nodes.get_mut(id.0).map(|n| &mut n.widget)
    }

    /// Get the number of widgets in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds no widgets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new top-level widget and return its ID.
    pub fn alloc(&mut self, widget: Widget) -> WidgetId {
        let id = WidgetId(self.nodes.len());
        self.nodes.push(Node {
            widget,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Allocate `widget` and append it as the last child of `parent`.
    pub fn add_child(&mut self, parent: WidgetId, widget: Widget) -> WidgetId {
        let id = self.alloc(widget);
        self.append_child(parent, id);
        id
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    ///
    /// Does nothing if either id is out of range.
    pub fn append_child(&mut self, parent: WidgetId, child: WidgetId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() || parent == child {
            return;
        }
        self.detach(child);

        let prev_last_child = self.nodes[parent.0].children.last().copied();
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Remove `child` from its parent, making it a top-level widget.
    pub fn detach(&mut self, child: WidgetId) {
        let Some(node) = self.nodes.get(child.0) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if let Some(parent) = parent {
            self.nodes[parent.0].children.retain(|&c| c != child);
        }
        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = next;
        }
        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = prev;
        }
        let node = &mut self.nodes[child.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// Get the parent of a widget.
    #[must_use]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a widget.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the next sibling of a widget.
    #[must_use]
    pub fn next_sibling(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a widget.
    #[must_use]
    pub fn prev_sibling(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a widget, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: WidgetId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Set (or replace) a dynamic property, returning the previous value.
    pub fn set_property(
        &mut self,
        id: WidgetId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.widget_mut(id)
            .and_then(|w| w.properties.insert(name.into(), value.into()))
    }

    /// Read a dynamic property.
    #[must_use]
    pub fn property(&self, id: WidgetId, name: &str) -> Option<&str> {
        self.widget(id)
            .and_then(|w| w.properties.get(name))
            .map(String::as_str)
    }
}

/// Iterator over ancestors of a widget.
pub struct AncestorIterator<'a> {
    tree: &'a WidgetTree,
    current: Option<WidgetId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
