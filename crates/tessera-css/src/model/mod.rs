//! The parsed rule model.
//!
//! Everything here is plain owned data produced by the parser: values,
//! declarations, selectors, rules and stylesheets. Declarations expose pure
//! typed accessors over their value lists.

mod declaration;
mod rules;
mod selector;
mod stylesheet;
mod value;

pub use declaration::{BorderImage, Declaration, expand_box};
pub(crate) use declaration::parse_style_value;
pub use rules::{
    ImportRule, MediaRule, PageRule, StyleRule, VariableRule, WidgetStyleRules,
    is_screen_parameter,
};
pub use selector::{AttributeSelector, BasicSelector, Pseudo, Relation, Selector, ValueMatch};
pub use stylesheet::{SharedSheetPool, SheetOrigin, StorageKind, StyleSheet};
pub use value::{Value, split_length};

/// Bucket name for rules whose last compound has no element name.
pub const GLOBAL_SELECTOR: &str = "*";
