//! Cascade resolution.
//!
//! A [`StyleSelector`] holds registered stylesheets and answers, for one
//! node at a time, which rules apply and in which order. Hosts expose their
//! UI objects through the [`StyleNode`] trait; [`TreeNode`] implements it for
//! the reference widget tree.
//!
//! Every matching rule gets a weight:
//!
//! ```text
//! specificity + 0x1000 * inheritance level + 0x10000 * inline depth
//! ```
//!
//! where the inheritance level is the number of classes above the matched
//! class in the node's type chain and the inline term only applies to sheets
//! of [`SheetOrigin::Inline`](crate::model::SheetOrigin::Inline). Results
//! are stable-sorted by ascending weight, so applying declarations in order
//! with "last write wins" per property gives the cascaded value.
//!
//! ```
//! use tessera_css::cascade::{Orientation, StyleSelector, TreeNode};
//! use tessera_css::model::StorageKind;
//! use tessera_css::parser::Parser;
//! use tessera_tree::{Widget, WidgetTree};
//!
//! let css = "Widget { width: 10px; } PushButton { width: 20px; }";
//! let sheet = Parser::new(css).parse_sheet(StorageKind::Heap).unwrap();
//! let mut selector = StyleSelector::new();
//! let _ = selector.add_style_sheet(sheet);
//!
//! let mut tree = WidgetTree::new();
//! let button = tree.alloc(Widget::new(["PushButton", "Widget"]));
//! let decls = selector.declarations_for_node(
//!     TreeNode::new(&tree, button),
//!     Orientation::Horizontal,
//!     None,
//! );
//! let widths: Vec<String> = decls.iter().map(|d| d.values[0].to_string()).collect();
//! assert_eq!(widths, ["10px", "20px"]);
//! ```

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::tables::PseudoClass;

mod matching;
mod node;
mod selector;
mod tree;

pub use node::StyleNode;
pub use selector::{SheetId, StyleSelector, WeightedDeclaration, WeightedRule};
pub use tree::TreeNode;

/// Screen orientation a lookup is made for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Landscape.
    #[default]
    Horizontal,
    /// Portrait.
    Vertical,
}

impl Orientation {
    /// The pseudo-class bit active in this orientation.
    #[must_use]
    pub const fn pseudo_class(self) -> PseudoClass {
        match self {
            Self::Horizontal => PseudoClass::LANDSCAPE,
            Self::Vertical => PseudoClass::PORTRAIT,
        }
    }
}
