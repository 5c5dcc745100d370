//! Integration tests for the stylesheet parser.

use tessera_css::model::{Declaration, StorageKind, StyleSheet, Value};
use tessera_css::parser::{ErrorCode, ParseError, Parser};
use tessera_css::scanner::TokenType;
use tessera_css::tables::{KnownValue, Property};

fn parse_css(css: &str) -> StyleSheet {
    Parser::new(css)
        .parse_sheet(StorageKind::Heap)
        .expect("stylesheet should parse")
}

/// Declarations of the only rule in `class_name`'s bucket.
fn bucket_declarations<'a>(sheet: &'a StyleSheet, class_name: &str) -> &'a [Declaration] {
    let bucket = sheet
        .widget_stack(class_name)
        .unwrap_or_else(|| panic!("no bucket for {class_name}"));
    assert_eq!(bucket.style_rules.len(), 1);
    &bucket.style_rules[0].declarations
}

fn property_names(decls: &[Declaration]) -> Vec<&str> {
    decls.iter().map(|decl| decl.property.as_str()).collect()
}

#[test]
fn test_rules_bucketed_by_last_compound() {
    let sheet = parse_css(
        "Dialog PushButton { width: 1px; } \
         .primary { width: 2px; } \
         #ok { width: 3px; } \
         * { width: 4px; } \
         Label:hover { width: 5px; }",
    );
    let buckets: Vec<&str> = sheet.widget_rules.keys().map(String::as_str).collect();
    assert_eq!(buckets, ["*", "Label", "PushButton"]);
    assert_eq!(sheet.widget_stack("*").map(|b| b.style_rules.len()), Some(3));
    assert_eq!(sheet.style_rule_count(), 5);
}

#[test]
fn test_multi_selector_rules_are_split() {
    let sheet = parse_css("Label, PushButton { color: red; }");
    for name in ["Label", "PushButton"] {
        let bucket = sheet.widget_stack(name).expect("bucket");
        assert_eq!(bucket.style_rules.len(), 1);
        assert_eq!(bucket.style_rules[0].selectors.len(), 1);
        assert_eq!(property_names(&bucket.style_rules[0].declarations), ["color"]);
    }
}

#[test]
fn test_orientation_rules_are_filed_separately() {
    let sheet = parse_css(
        "Label:portrait { width: 1px; } Label:landscape { width: 2px; } Label { width: 3px; }",
    );
    let bucket = sheet.widget_stack("Label").expect("bucket");
    assert_eq!(bucket.portrait_rules.len(), 1);
    assert_eq!(bucket.landscape_rules.len(), 1);
    assert_eq!(bucket.style_rules.len(), 1);
    assert_eq!(bucket.len(), 3);
}

#[test]
fn test_screen_variables_mark_bucket() {
    let sheet = parse_css("Label { width: var(screen-height); } Frame { width: var(gap); }");
    assert!(sheet.widget_stack("Label").is_some_and(|b| b.depends_on_screen));
    assert!(!sheet.widget_stack("Frame").is_some_and(|b| b.depends_on_screen));
}

#[test]
fn test_declaration_values() {
    let sheet = parse_css(
        "Label { margin: 1px 2un; opacity: 50%; font-family: \"Nokia Sans\"; \
         color: #ff0000; text-align: center; background-image: url(bg.png); }",
    );
    let decls = bucket_declarations(&sheet, "Label");
    assert_eq!(
        property_names(decls),
        ["margin", "opacity", "font-family", "color", "text-align", "background-image"]
    );
    assert_eq!(decls[0].property_id, Property::Margin);
    assert_eq!(
        decls[0].values,
        [Value::Length("1px".into()), Value::Length("2un".into())]
    );
    assert_eq!(decls[1].values, [Value::Percentage(50.0)]);
    assert_eq!(decls[2].values, [Value::String("Nokia Sans".into())]);
    assert!(matches!(decls[3].values[0], Value::Color(_)));
    assert_eq!(decls[4].values[0].known(), KnownValue::Center);
    assert!(matches!(&decls[5].values[0], Value::Uri(uri) if uri.ends_with("bg.png")));
}

#[test]
fn test_variables_and_expressions() {
    let sheet = parse_css("Label { width: var(gap); height: -var(gap); top: expr(2 + 3); }");
    let decls = bucket_declarations(&sheet, "Label");
    assert_eq!(decls[0].values, [Value::Variable("gap".into())]);
    assert_eq!(decls[1].values, [Value::VariableNegative("gap".into())]);
    assert_eq!(decls[2].values, [Value::Expression("2 + 3".into())]);
}

#[test]
fn test_invalid_expression_drops_declaration() {
    let sheet = parse_css("Label { top: expr(2 +); width: 1px; }");
    assert_eq!(property_names(bucket_declarations(&sheet, "Label")), ["width"]);
}

#[test]
fn test_important_flag() {
    let sheet = parse_css("Label { color: red ! IMPORTANT; width: 1px; }");
    let decls = bucket_declarations(&sheet, "Label");
    assert!(decls[0].important);
    assert!(!decls[1].important);
    assert_eq!(decls[0].values.len(), 1);
}

#[test]
fn test_malformed_declaration_is_dropped() {
    let sheet = parse_css("Label { width: ; height: 2px; }");
    assert_eq!(property_names(bucket_declarations(&sheet, "Label")), ["height"]);

    let sheet = parse_css("Label { width 1px; height: 2px; } Frame { width: 3px; }");
    assert_eq!(property_names(bucket_declarations(&sheet, "Label")), ["height"]);
    assert_eq!(property_names(bucket_declarations(&sheet, "Frame")), ["width"]);
}

#[test]
fn test_recovery_does_not_depend_on_whitespace() {
    let sheet = parse_css("Label {width: ; height: 2px; } Frame { width: 3px; }");
    assert_eq!(property_names(bucket_declarations(&sheet, "Label")), ["height"]);
    assert_eq!(property_names(bucket_declarations(&sheet, "Frame")), ["width"]);

    let sheet = parse_css("Label{width:;height:2px}Frame{width:3px}");
    assert_eq!(property_names(bucket_declarations(&sheet, "Label")), ["height"]);
    assert_eq!(property_names(bucket_declarations(&sheet, "Frame")), ["width"]);

    let sheet = parse_css("Label{width:1px;top:;height:2px}");
    assert_eq!(property_names(bucket_declarations(&sheet, "Label")), ["width", "height"]);
}

#[test]
fn test_malformed_declaration_with_nested_block_resyncs_after_it() {
    let sheet = parse_css("Label{width:{;};height:2px}");
    assert_eq!(property_names(bucket_declarations(&sheet, "Label")), ["height"]);
}

#[test]
fn test_malformed_last_declaration_keeps_earlier_ones() {
    let sheet = parse_css("Label { width: 1px; height: }");
    assert_eq!(property_names(bucket_declarations(&sheet, "Label")), ["width"]);
}

#[test]
fn test_variables_block() {
    let sheet = parse_css("@variables { gap: 4px; accent: #00ff00; }");
    assert_eq!(sheet.variable_rules.len(), 1);
    assert_eq!(
        property_names(&sheet.variable_rules[0].declarations),
        ["gap", "accent"]
    );
    assert!(sheet.widget_rules.is_empty());
}

#[test]
fn test_media_block() {
    let sheet = parse_css("@media print, screen { Label, Frame { width: 1px; } }");
    assert_eq!(sheet.media_rules.len(), 1);
    let media = &sheet.media_rules[0];
    assert_eq!(media.media, ["print", "screen"]);
    assert_eq!(media.style_rules.len(), 1);
    // rules inside media blocks keep all selectors
    assert_eq!(media.style_rules[0].selectors.len(), 2);
    assert!(media.applies_to("Print"));
    assert!(!media.applies_to("tv"));
}

#[test]
fn test_page_block() {
    let sheet = parse_css("@page :first { margin: 1px; }");
    assert_eq!(sheet.page_rules.len(), 1);
    assert_eq!(sheet.page_rules[0].selector, "first");
    assert_eq!(property_names(&sheet.page_rules[0].declarations), ["margin"]);
}

#[test]
fn test_charset_and_imports() {
    let sheet = parse_css(
        "@charset \"utf-8\"; \
         @import \"base.css\"; \
         @import url(\"theme.css\") screen, print; \
         Label { width: 1px; }",
    );
    assert_eq!(sheet.import_rules.len(), 2);
    assert_eq!(sheet.import_rules[0].href, "base.css");
    assert!(sheet.import_rules[0].media.is_empty());
    assert_eq!(sheet.import_rules[1].href, "theme.css");
    assert_eq!(sheet.import_rules[1].media, ["screen", "print"]);
    assert!(sheet.widget_stack("Label").is_some());
}

#[test]
fn test_unknown_at_rule_is_skipped() {
    let sheet = parse_css("@font-face { src: x; } Label { width: 1px; }");
    assert_eq!(property_names(bucket_declarations(&sheet, "Label")), ["width"]);
}

#[test]
fn test_markup_delimiters_are_ignored() {
    let sheet = parse_css("<!-- Label { width: 1px; } -->");
    assert!(sheet.widget_stack("Label").is_some());
}

#[test]
fn test_stray_brace_is_a_syntax_error() {
    let mut parser = Parser::new("Label { width: 1px; } }");
    let mut sheet = StyleSheet::new(StorageKind::Heap);
    let err = parser.parse(&mut sheet).expect_err("stray brace");
    assert!(matches!(
        err,
        ParseError::Syntax {
            token: TokenType::RBrace,
            ..
        }
    ));
    assert_eq!(parser.error_code(), ErrorCode::UnknownError);
    let symbol = parser.error_symbol().expect("error symbol");
    assert_eq!(symbol.token, TokenType::RBrace);
    assert_eq!(symbol.raw(parser.text()), "}");
    // rules before the failure are kept
    assert!(sheet.widget_stack("Label").is_some());
}

#[test]
fn test_successful_parse_resets_error_state() {
    let mut parser = Parser::new("Label { width: 1px; }");
    assert!(parser.parse_sheet(StorageKind::Heap).is_ok());
    assert_eq!(parser.error_code(), ErrorCode::NoError);
    assert!(parser.error_symbol().is_none());
    // a parser can run again over the same input
    assert!(parser.parse_sheet(StorageKind::Shared).is_ok());
}

#[test]
fn test_empty_input() {
    let sheet = parse_css("");
    assert_eq!(sheet.style_rule_count(), 0);
    let sheet = parse_css("  /* only a comment */ ");
    assert_eq!(sheet.style_rule_count(), 0);
}

#[test]
fn test_from_file_records_file_name() {
    let dir = std::env::temp_dir().join(format!("tessera-parser-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("sheet.css");
    std::fs::write(&path, "Label { background-image: url(images/bg.png); }").expect("write");

    let sheet = Parser::from_file(&path)
        .expect("readable")
        .parse_sheet(StorageKind::Heap)
        .expect("parses");
    assert!(
        sheet
            .file_name
            .as_ref()
            .is_some_and(|name| name.ends_with("sheet.css"))
    );
    let decls = bucket_declarations(&sheet, "Label");
    let Value::Uri(uri) = &decls[0].values[0] else {
        panic!("expected a uri, got {:?}", decls[0].values);
    };
    assert!(uri.starts_with(dir.to_string_lossy().as_ref()));
    assert!(uri.ends_with("bg.png"));

    let missing = Parser::from_file(dir.join("missing.css"));
    assert!(matches!(missing, Err(ParseError::Io { .. })));
    let _ = std::fs::remove_dir_all(&dir);
}
