//! Value extraction over declarations produced by the parser and cascade.

use tessera_css::cascade::{Orientation, StyleSelector, TreeNode};
use tessera_css::model::{Declaration, StorageKind};
use tessera_css::parser::Parser;
use tessera_css::tables::{BorderStyle, Repeat};
use tessera_css::values::expression::{ExpressionError, evaluate, tokenize};
use tessera_css::values::{
    BackgroundValues, BorderValues, BoxValues, Brush, Color, DeviceProfile, FontStyle,
    FontValues, GeometryValues, Size, SizePolicy, ValueExtractor, WEIGHT_BOLD,
};
use tessera_tree::{Widget, WidgetTree};

/// Cascaded declarations for a lone `Label` and the sheet's variables.
fn resolve(css: &str) -> (Vec<Declaration>, Vec<Declaration>) {
    let sheet = Parser::new(css)
        .parse_sheet(StorageKind::Heap)
        .expect("stylesheet should parse");
    let variables: Vec<Declaration> = sheet
        .variable_rules
        .iter()
        .flat_map(|rule| rule.declarations.clone())
        .collect();
    let mut selector = StyleSelector::new();
    let _ = selector.add_style_sheet(sheet);

    let mut tree = WidgetTree::new();
    let id = tree.alloc(Widget::new(["Label", "Widget"]));
    let decls = selector.declarations_for_node(TreeNode::new(&tree, id), Orientation::Horizontal, None);
    (decls, variables)
}

#[test]
fn test_border_shorthand_and_radius() {
    let (decls, _) = resolve("Label { border: 2px solid #ff0000; border-radius: 4px / 2px; }");
    let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
    let mut border = BorderValues::default();
    assert!(extractor.extract_border(&mut border));
    assert_eq!(border.widths, [2.0; 4]);
    assert_eq!(border.styles, [BorderStyle::Solid; 4]);
    assert!(
        border
            .brushes
            .iter()
            .all(|brush| *brush == Brush::Solid(Color::rgb(255, 0, 0)))
    );
    assert_eq!(border.radii, [Size::new(4.0, 2.0); 4]);
}

#[test]
fn test_border_longhand_after_shorthand() {
    let (decls, _) = resolve("Label { border-width: 1px 2px; border-left-width: 5px; }");
    let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
    let mut border = BorderValues::default();
    assert!(extractor.extract_border(&mut border));
    assert_eq!(border.widths, [1.0, 2.0, 1.0, 5.0]);
}

#[test]
fn test_font_shorthand() {
    let (decls, _) = resolve(
        "Label { font: italic bold 12pt \"Nokia Sans\"; text-decoration: underline; }",
    );
    let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
    let mut font = FontValues::default();
    assert!(extractor.extract_font(&mut font));
    assert_eq!(font.style, Some(FontStyle::Italic));
    assert_eq!(font.weight, Some(WEIGHT_BOLD));
    assert_eq!(font.point_size, Some(12.0));
    assert_eq!(font.family.as_deref(), Some("Nokia Sans"));
    assert_eq!(font.underline, Some(true));
}

#[test]
fn test_font_pixel_size_uses_profile() {
    let (decls, _) = resolve("Label { font-size: 3un; }");
    let extractor = ValueExtractor::new(&decls, DeviceProfile::new(4.0, 1.0));
    let mut font = FontValues::default();
    assert!(extractor.extract_font(&mut font));
    assert_eq!(font.pixel_size, Some(12));
    assert_eq!(font.point_size, None);
}

#[test]
fn test_background_shorthand() {
    let (decls, _) = resolve("Label { background: url(bg.png) repeat-x #00ff00; }");
    let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
    let mut background = BackgroundValues::default();
    assert!(extractor.extract_background(&mut background));
    assert_eq!(background.image, "bg.png");
    assert_eq!(background.repeat, Repeat::X);
    assert_eq!(background.brush, Brush::Solid(Color::rgb(0, 255, 0)));
}

#[test]
fn test_fixed_size_in_units() {
    let (decls, _) = resolve("Label { fixed-size: 2un 3un; size-policy: expanding; }");
    let extractor = ValueExtractor::new(&decls, DeviceProfile::new(5.0, 1.0));
    let mut geometry = GeometryValues::default();
    assert!(extractor.extract_geometry(&mut geometry));
    assert_eq!(geometry.pref_width, Some(10.0));
    assert_eq!(geometry.pref_height, Some(15.0));
    assert_eq!(geometry.horizontal_policy, Some(SizePolicy::Expanding));
    assert_eq!(geometry.vertical_policy, Some(SizePolicy::Expanding));
}

#[test]
fn test_variable_chain_in_declaration() {
    let (decls, variables) =
        resolve("@variables { a: var(b); b: 5px; } Label { min-width: var(a); }");
    let extractor = ValueExtractor::new(&decls, DeviceProfile::default()).with_variables(&variables);
    let mut geometry = GeometryValues::default();
    assert!(extractor.extract_geometry(&mut geometry));
    assert_eq!(geometry.min_width, Some(5.0));
}

#[test]
fn test_unresolved_variable_is_zero() {
    let (decls, _) = resolve("Label { min-width: var(missing); }");
    let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
    let mut geometry = GeometryValues::default();
    assert!(extractor.extract_geometry(&mut geometry));
    assert_eq!(geometry.min_width, Some(0.0));
}

#[test]
fn test_expression_margin() {
    let (decls, _) = resolve("Label { margin: expr(2 + 3 * 4); padding: -expr((2 + 3) * 4); }");
    let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
    let mut values = BoxValues::default();
    assert!(extractor.extract_box(&mut values));
    assert_eq!(values.margins, [14.0; 4]);
    assert_eq!(values.paddings, [-20.0; 4]);
}

#[test]
fn test_color_through_variable() {
    let (decls, variables) = resolve("@variables { accent: #0000ff; } Label { color: var(accent); }");
    let extractor = ValueExtractor::new(&decls, DeviceProfile::default()).with_variables(&variables);
    let mut color = Color::BLACK;
    assert!(extractor.extract_color(&mut color));
    assert_eq!(color, Color::rgb(0, 0, 255));
}

#[test]
fn test_property_names_are_case_insensitive() {
    let (decls, _) = resolve("Label { MARGIN-Top: 3px; }");
    let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
    let mut values = BoxValues::default();
    assert!(extractor.extract_box(&mut values));
    assert_eq!(values.margins, [3.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_later_declaration_overrides() {
    let (decls, _) = resolve("Widget { margin: 1px; } Label { margin: 2px; }");
    let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
    let mut values = BoxValues::default();
    assert!(extractor.extract_box(&mut values));
    assert_eq!(values.margins, [2.0; 4]);
}

fn eval(text: &str) -> Option<f64> {
    evaluate(text, &DeviceProfile::default(), &mut |_| None)
}

#[test]
fn test_expression_evaluation() {
    assert_eq!(eval("2 + 3 * 4"), Some(14.0));
    assert_eq!(eval("(2 + 3) * 4"), Some(20.0));
    assert_eq!(eval("-5 + 2"), Some(-3.0));
    assert_eq!(eval("10 / 4"), Some(2.5));
    assert_eq!(eval("4 / 0"), None);
    assert_eq!(eval("round(2.4) * 2"), Some(4.0));
}

#[test]
fn test_expression_rejects_operand_before_parenthesis() {
    assert!(matches!(tokenize("2 (3)"), Err(ExpressionError::MissingOperator(_))));
    assert_eq!(tokenize("2 round(3)"), Err(ExpressionError::MissingOperator(2)));
    assert_eq!(tokenize("(1) floor(3)"), Err(ExpressionError::MissingOperator(4)));
    assert_eq!(tokenize("1 + 2)"), Err(ExpressionError::UnbalancedParentheses));
}
