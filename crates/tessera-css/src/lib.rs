//! Stylesheet scanner, parser, cascade and value extraction for the Tessera
//! widget styling engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner**
//!   - Escape preprocessing
//!   - A table-driven lexer producing typed symbols that span the source
//!
//! - **Parser**
//!   - Style rules, `@variables`, `@media`, `@page`, `@import` and `@charset`
//!   - Selector chains with ids, classes, attribute and pseudo predicates
//!   - Per-declaration error recovery; allocation failure is the only hard
//!     abort
//!
//! - **Cascade**
//!   - Rule buckets keyed by widget class name
//!   - Inheritance-aware weighting and orientation-specific rules
//!   - Static and interactive-state declaration queries
//!   - Layered loading with a shared sheet pool
//!
//! - **Value extraction**
//!   - `un`/`mm`/`px` lengths resolved through a [`values::DeviceProfile`]
//!   - `var()` chains and `expr()` arithmetic
//!   - Geometry, position, box, border, background, font, palette and more
//!
//! # Example
//!
//! ```
//! use tessera_css::cascade::{Orientation, StyleSelector, TreeNode};
//! use tessera_css::model::StorageKind;
//! use tessera_css::parser::Parser;
//! use tessera_css::values::{BoxValues, DeviceProfile, ValueExtractor};
//! use tessera_tree::{Widget, WidgetTree};
//!
//! let css = "@variables { gap: 4px; } .box { margin: var(gap); }";
//! let sheet = Parser::new(css).parse_sheet(StorageKind::Heap).unwrap();
//! let mut variables = std::collections::HashMap::new();
//!
//! let mut selector = StyleSelector::new();
//! let _ = selector.add_style_sheet(sheet);
//! selector.variable_rule_sets(&mut variables);
//!
//! let mut tree = WidgetTree::new();
//! let id = tree.alloc(Widget::new(["Frame"]).with_property("class", "box"));
//! let decls = selector.declarations_for_node(TreeNode::new(&tree, id), Orientation::Horizontal, None);
//!
//! let extractor = ValueExtractor::new(&decls, DeviceProfile::default()).with_variables(&variables);
//! let mut values = BoxValues::default();
//! assert!(extractor.extract_box(&mut values));
//! assert_eq!(values.margins, [4.0; 4]);
//! ```

/// Selector cascade over a host node tree.
pub mod cascade;
/// Layered stylesheet loading.
pub mod loader;
/// Parsed rule model.
pub mod model;
/// Recursive-descent stylesheet parser.
pub mod parser;
/// Stylesheet scanner.
pub mod scanner;
/// Known-value tables.
pub mod tables;
/// Typed values and the declaration value extractor.
pub mod values;
