//! Integration tests for layered stylesheet loading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tessera_css::cascade::{Orientation, TreeNode};
use tessera_css::loader::{
    Concern, ConcernStacks, LayerPriority, LayeredStyleLoader, LoadError, StackView,
};
use tessera_css::model::{Declaration, SharedSheetPool, StorageKind};
use tessera_css::parser::ParseError;
use tessera_tree::{Widget, WidgetId, WidgetTree};

/// A scratch directory unique to one test.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("tessera-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        Self(dir)
    }

    fn write(&self, file: &str, css: &str) -> PathBuf {
        let path = self.0.join(file);
        std::fs::write(&path, css).expect("write stylesheet");
        path
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn label() -> (WidgetTree, WidgetId) {
    let mut tree = WidgetTree::new();
    let id = tree.alloc(Widget::new(["Label", "Widget"]).with_object_name("ok"));
    (tree, id)
}

fn widths(loader: &LayeredStyleLoader) -> Vec<String> {
    let (tree, id) = label();
    let decls: Vec<Declaration> =
        loader.declarations_for_node(TreeNode::new(&tree, id), Orientation::Horizontal, None);
    decls
        .iter()
        .filter(|decl| decl.property == "width")
        .map(|decl| decl.values[0].to_string())
        .collect()
}

#[test]
fn test_shared_layers_reuse_pooled_sheets() {
    let dir = ScratchDir::new("pool");
    let path = dir.write("theme.css", "Label { width: 1px; }");
    let pool = Arc::new(SharedSheetPool::new());

    let mut first = LayeredStyleLoader::with_pool(Arc::clone(&pool));
    let mut second = LayeredStyleLoader::with_pool(Arc::clone(&pool));
    let a = first.load(&path, LayerPriority::Theme).expect("load");
    let b = second.load(&path, LayerPriority::Theme).expect("load");
    assert_eq!(pool.len(), 1);

    let sheet_a = first.layer(LayerPriority::Theme).style_sheet(a.id()).expect("sheet");
    let sheet_b = second.layer(LayerPriority::Theme).style_sheet(b.id()).expect("sheet");
    assert!(Arc::ptr_eq(sheet_a, sheet_b));
    assert_eq!(sheet_a.storage, StorageKind::Shared);
}

#[test]
fn test_application_layer_gets_private_copies() {
    let dir = ScratchDir::new("heap");
    let path = dir.write("app.css", "Label { width: 1px; }");
    let mut loader = LayeredStyleLoader::new();
    let handle = loader.load(&path, LayerPriority::Application).expect("load");
    assert!(loader.pool().is_empty());
    let sheet = loader
        .layer(LayerPriority::Application)
        .style_sheet(handle.id())
        .expect("sheet");
    assert_eq!(sheet.storage, StorageKind::Heap);
    assert!(sheet.file_name.as_ref().is_some_and(|name| name.ends_with("app.css")));
}

#[test]
fn test_load_dir_in_file_name_order() {
    let dir = ScratchDir::new("dir");
    let _ = dir.write("b.css", "Label { width: 2px; }");
    let _ = dir.write("a.css", "Label { width: 1px; }");
    let _ = dir.write("c.CSS", "Label { width: 3px; }");
    let _ = dir.write("notes.txt", "Label { width: 9px; }");

    let mut loader = LayeredStyleLoader::new();
    let handles = loader.load_dir(dir.path(), LayerPriority::Theme).expect("load dir");
    assert_eq!(handles.len(), 3);
    assert_eq!(widths(&loader), ["1px", "2px", "3px"]);
}

#[test]
fn test_higher_layer_wins_ties() {
    let mut loader = LayeredStyleLoader::new();
    let _ = loader
        .load_str("Label { width: 2px; }", LayerPriority::Application)
        .expect("parse");
    let _ = loader
        .load_str("Label { width: 1px; }", LayerPriority::Theme)
        .expect("parse");
    assert_eq!(widths(&loader), ["1px", "2px"]);
}

#[test]
fn test_weight_beats_layer() {
    let mut loader = LayeredStyleLoader::new();
    let _ = loader
        .load_str("Label#ok { width: 9px; }", LayerPriority::Core)
        .expect("parse");
    let _ = loader
        .load_str("Label { width: 5px; }", LayerPriority::Operator)
        .expect("parse");
    assert_eq!(widths(&loader), ["5px", "9px"]);
}

#[test]
fn test_default_variables_come_from_core() {
    let mut loader = LayeredStyleLoader::new();
    let _ = loader
        .load_str("@variables { gap: 1px; }", LayerPriority::Core)
        .expect("parse");
    let _ = loader
        .load_str("@variables { gap: 2px; pad: 3px; }", LayerPriority::Theme)
        .expect("parse");
    let _ = loader
        .load_str("@variables { pad: 4px; }", LayerPriority::Operator)
        .expect("parse");

    let variables = loader.variable_rule_sets();
    assert_eq!(variables["gap"].values[0].to_string(), "2px");
    assert_eq!(variables["pad"].values[0].to_string(), "4px");

    let defaults = loader.default_variables();
    assert_eq!(defaults.len(), 1);
    assert!(
        loader
            .find_in_default_variables("gap")
            .is_some_and(|decl| decl.values[0].to_string() == "1px")
    );
    assert!(loader.find_in_default_variables("pad").is_none());
}

#[test]
fn test_unload_and_clear() {
    let dir = ScratchDir::new("unload");
    let path = dir.write("theme.css", "Label { width: 1px; }");
    let mut loader = LayeredStyleLoader::new();
    let theme = loader.load(&path, LayerPriority::Theme).expect("load");
    let app = loader
        .load_str("Label { width: 2px; }", LayerPriority::Application)
        .expect("parse");

    assert!(loader.unload(theme, LayerPriority::Theme));
    assert!(!loader.unload(theme, LayerPriority::Theme));
    // the pooled copy outlives the unload
    assert_eq!(loader.pool().len(), 1);
    assert_eq!(widths(&loader), ["2px"]);

    loader.unload_all([app], LayerPriority::Application);
    assert!(widths(&loader).is_empty());

    let _ = loader
        .load_str("Label { width: 3px; }", LayerPriority::Operator)
        .expect("parse");
    loader.clear_layer(LayerPriority::Theme);
    assert_eq!(widths(&loader), ["3px"]);
    loader.clear();
    assert!(loader.layer(LayerPriority::Operator).is_empty());
}

#[test]
fn test_load_all_stops_at_first_failure() {
    let dir = ScratchDir::new("all");
    let good = dir.write("good.css", "Label { width: 1px; }");
    let bad = dir.write("bad.css", "Label { width: 1px; } }");
    let later = dir.write("later.css", "Label { width: 2px; }");

    let mut loader = LayeredStyleLoader::new();
    let result = loader.load_all([&good, &bad, &later], LayerPriority::Theme);
    assert!(matches!(
        result,
        Err(LoadError::Parse(ParseError::Syntax { .. }))
    ));
    assert_eq!(widths(&loader), ["1px"]);
}

#[test]
fn test_missing_files_and_directories() {
    let dir = ScratchDir::new("missing");
    let mut loader = LayeredStyleLoader::new();
    let missing = loader.load(dir.path().join("nope.css"), LayerPriority::Theme);
    assert!(matches!(missing, Err(LoadError::Parse(ParseError::Io { .. }))));

    let missing_dir = loader.load_dir(dir.path().join("nope"), LayerPriority::Theme);
    assert!(matches!(missing_dir, Err(LoadError::Io { .. })));
}

#[test]
fn test_medium_applies_to_every_layer() {
    let mut loader = LayeredStyleLoader::new();
    let _ = loader
        .load_str("@media print { Label { width: 1px; } }", LayerPriority::Theme)
        .expect("parse");
    let _ = loader
        .load_str("@media print { Label { width: 2px; } }", LayerPriority::Application)
        .expect("parse");
    assert!(widths(&loader).is_empty());
    loader.set_medium("print");
    assert_eq!(widths(&loader), ["1px", "2px"]);
}

#[test]
fn test_orientation_rules_in_any_layer() {
    let mut loader = LayeredStyleLoader::new();
    let (tree, id) = label();
    assert!(!loader.has_orientation_specific_style_rules(TreeNode::new(&tree, id)));
    let _ = loader
        .load_str("Label:portrait { width: 1px; }", LayerPriority::Operator)
        .expect("parse");
    assert!(loader.has_orientation_specific_style_rules(TreeNode::new(&tree, id)));
    let rules = loader.style_rules_for_node(TreeNode::new(&tree, id), Orientation::Vertical);
    assert_eq!(rules.len(), 1);
}

fn styled(view: StackView<'_>) -> Vec<String> {
    let (tree, id) = label();
    view.declarations_for_node(TreeNode::new(&tree, id), Orientation::Horizontal, None)
        .iter()
        .map(|decl| format!("{}: {}", decl.property, decl.values[0]))
        .collect()
}

#[test]
fn test_concern_sheet_stays_in_its_stack() {
    let mut stacks = ConcernStacks::new();
    let _ = stacks
        .stack_mut(Concern::Colors)
        .load_str("Label { color: red; }", LayerPriority::Theme)
        .expect("parse");
    let _ = stacks
        .stack_mut(Concern::Layouts)
        .load_str("Label { width: 1px; }", LayerPriority::Theme)
        .expect("parse");

    assert_eq!(styled(stacks.view(Concern::Colors)), ["color: red"]);
    assert_eq!(styled(stacks.view(Concern::Layouts)), ["width: 1px"]);
    assert!(styled(stacks.view(Concern::All)).is_empty());
}

#[test]
fn test_all_stack_reaches_every_concern() {
    let mut stacks = ConcernStacks::new();
    let _ = stacks
        .stack_mut(Concern::Layouts)
        .load_str("Label { width: 1px; }", LayerPriority::Operator)
        .expect("parse");
    let shared = stacks
        .stack_mut(Concern::All)
        .load_str("Label { width: 2px; }", LayerPriority::Theme)
        .expect("parse");

    // within a weight tie the layer decides before the stack
    assert_eq!(styled(stacks.view(Concern::Layouts)), ["width: 2px", "width: 1px"]);
    // a concern nothing was loaded for still reads the shared stack
    assert_eq!(styled(stacks.view(Concern::Colors)), ["width: 2px"]);
    assert!(stacks.stack(Concern::Colors).is_none());

    assert!(stacks.stack_mut(Concern::All).unload(shared, LayerPriority::Theme));
    assert_eq!(styled(stacks.view(Concern::Layouts)), ["width: 1px"]);
    assert!(styled(stacks.view(Concern::Colors)).is_empty());
}

#[test]
fn test_all_stack_follows_concern_stack_within_a_layer() {
    let mut stacks = ConcernStacks::new();
    let _ = stacks
        .stack_mut(Concern::All)
        .load_str("@variables { gap: 2px; } Label { width: 2px; }", LayerPriority::Theme)
        .expect("parse");
    let _ = stacks
        .stack_mut(Concern::Layouts)
        .load_str("@variables { gap: 1px; } Label { width: 1px; }", LayerPriority::Theme)
        .expect("parse");

    let view = stacks.view(Concern::Layouts);
    assert_eq!(styled(view), ["width: 1px", "width: 2px"]);
    assert_eq!(view.variable_rule_sets()["gap"].values[0].to_string(), "2px");
}

#[test]
fn test_concern_stacks_share_pool_and_medium() {
    let dir = ScratchDir::new("concerns");
    let path = dir.write("theme.css", "@media print { Label { width: 1px; } }");
    let mut stacks = ConcernStacks::new();
    stacks.set_medium("print");

    let _ = stacks
        .stack_mut(Concern::Colors)
        .load(&path, LayerPriority::Theme)
        .expect("load");
    let _ = stacks
        .stack_mut(Concern::Layouts)
        .load(&path, LayerPriority::Theme)
        .expect("load");
    assert_eq!(stacks.pool().len(), 1);
    assert_eq!(styled(stacks.view(Concern::Layouts)), ["width: 1px"]);

    stacks.clear();
    assert!(styled(stacks.view(Concern::Colors)).is_empty());
}
