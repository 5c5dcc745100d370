//! The node capability interface the cascade walks.

use crate::model::{AttributeSelector, GLOBAL_SELECTOR};

/// A styled node as seen by the cascade.
///
/// The cascade never owns UI objects. Hosts implement this trait once for a
/// cheap handle into their own tree (an index plus a tree reference, or a
/// pointer wrapper); the handle is copied freely during a lookup and a
/// missing parent or sibling is `None`.
pub trait StyleNode: Copy + PartialEq {
    /// Type-inheritance chain, most-derived class first.
    fn class_chain(&self) -> Vec<&str>;

    /// Inheritance level at which the node is a `name`: the number of
    /// classes above `name` in the chain, so a more-derived match reports a
    /// higher level. `None` if the node is not a `name`.
    fn name_equals(&self, name: &str) -> Option<u32> {
        if name == GLOBAL_SELECTOR {
            return Some(0);
        }
        let chain = self.class_chain();
        let position = chain.iter().position(|class| *class == name)?;
        u32::try_from(chain.len() - 1 - position).ok()
    }

    /// Whether the attribute predicate holds, negation included.
    fn attribute_matches(&self, attribute: &AttributeSelector) -> bool;

    /// The node's id set, compared as an exact list.
    fn ids(&self) -> Vec<&str>;

    /// Whether attribute predicates can be evaluated on this node at all.
    fn has_attributes(&self) -> bool {
        true
    }

    /// The parent node.
    fn parent(&self) -> Option<Self>;

    /// The sibling immediately before this node.
    fn previous_sibling(&self) -> Option<Self>;

    /// Called once before a node is matched.
    fn init_node(&self) {}

    /// Called once after a lookup for every node whose attributes were read.
    fn cleanup_node(&self) {}
}
