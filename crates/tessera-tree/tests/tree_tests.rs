//! Tests for widget tree construction and traversal.

use tessera_tree::{Widget, WidgetId, WidgetTree};

fn window_with_buttons() -> (WidgetTree, WidgetId, Vec<WidgetId>) {
    let mut tree = WidgetTree::new();
    let window = tree.alloc(Widget::new(["MainWindow", "Widget"]));
    let buttons = (0..3)
        .map(|i| {
            tree.add_child(
                window,
                Widget::new(["PushButton", "AbstractButton", "Widget"])
                    .with_object_name(format!("button{i}")),
            )
        })
        .collect();
    (tree, window, buttons)
}

#[test]
fn test_sibling_links() {
    let (tree, window, buttons) = window_with_buttons();
    assert_eq!(tree.children(window), buttons.as_slice());
    assert_eq!(tree.prev_sibling(buttons[0]), None);
    assert_eq!(tree.prev_sibling(buttons[1]), Some(buttons[0]));
    assert_eq!(tree.next_sibling(buttons[1]), Some(buttons[2]));
    assert_eq!(tree.next_sibling(buttons[2]), None);
    assert_eq!(tree.parent(buttons[2]), Some(window));
}

#[test]
fn test_detach_relinks_siblings() {
    let (mut tree, window, buttons) = window_with_buttons();
    tree.detach(buttons[1]);

    assert_eq!(tree.children(window), &[buttons[0], buttons[2]]);
    assert_eq!(tree.next_sibling(buttons[0]), Some(buttons[2]));
    assert_eq!(tree.prev_sibling(buttons[2]), Some(buttons[0]));
    assert_eq!(tree.parent(buttons[1]), None);
}

#[test]
fn test_reparent_moves_widget() {
    let (mut tree, window, buttons) = window_with_buttons();
    let panel = tree.add_child(window, Widget::new(["Frame", "Widget"]));
    tree.append_child(panel, buttons[0]);

    assert_eq!(tree.parent(buttons[0]), Some(panel));
    assert_eq!(tree.children(window), &[buttons[1], buttons[2], panel]);
    assert_eq!(tree.ancestors(buttons[0]).collect::<Vec<_>>(), vec![panel, window]);
}

#[test]
fn test_inheritance_level() {
    let widget = Widget::new(["PushButton", "AbstractButton", "Widget"]);
    assert_eq!(widget.inheritance_level("PushButton"), Some(2));
    assert_eq!(widget.inheritance_level("AbstractButton"), Some(1));
    assert_eq!(widget.inheritance_level("Widget"), Some(0));
    assert_eq!(widget.inheritance_level("Label"), None);
    assert_eq!(widget.class_name(), Some("PushButton"));
}

#[test]
fn test_properties_and_style_classes() {
    let mut tree = WidgetTree::new();
    let id = tree.alloc(Widget::new(["Label"]).with_property("class", " title  big "));
    assert_eq!(
        tree.widget(id).map(|w| w.style_classes().collect::<Vec<_>>()),
        Some(vec!["title", "big"])
    );

    assert_eq!(tree.set_property(id, "flat", "true"), None);
    assert_eq!(tree.set_property(id, "flat", "false").as_deref(), Some("true"));
    assert_eq!(tree.property(id, "flat"), Some("false"));
    assert_eq!(tree.property(id, "missing"), None);
}
