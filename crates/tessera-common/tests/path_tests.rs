//! Tests for `url(...)` reference resolution.

use std::path::Path;

use tessera_common::path::{is_absolute_reference, resolve_reference};

#[test]
fn test_relative_reference_joins_base() {
    let resolved = resolve_reference("images/bg.png", Some(Path::new("/themes/dark")));
    assert_eq!(resolved, "/themes/dark/images/bg.png");
}

#[test]
fn test_parent_components_are_collapsed() {
    let resolved = resolve_reference("../shared/./bg.png", Some(Path::new("/themes/dark")));
    assert_eq!(resolved, "/themes/shared/bg.png");
}

#[test]
fn test_absolute_references_untouched() {
    let base = Some(Path::new("/themes"));
    assert_eq!(resolve_reference("/abs/icon.svg", base), "/abs/icon.svg");
    assert_eq!(resolve_reference(":/res/icon.svg", base), ":/res/icon.svg");
    assert_eq!(
        resolve_reference("file:///tmp/icon.svg", base),
        "file:///tmp/icon.svg"
    );
}

#[test]
fn test_no_base_keeps_reference() {
    assert_eq!(resolve_reference("bg.png", None), "bg.png");
}

#[test]
fn test_scheme_detection() {
    assert!(is_absolute_reference("data:image/png;base64,AAAA"));
    assert!(!is_absolute_reference("c:/themes/bg.png") || cfg!(windows));
    assert!(!is_absolute_reference("icons/close.svg"));
}
