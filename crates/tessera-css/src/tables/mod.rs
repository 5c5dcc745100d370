//! Static known-value tables.
//!
//! Every table is a slice of `(name, id)` pairs sorted by ASCII
//! case-insensitive name and searched with a binary search. A miss yields the
//! id type's default (its `Unknown` variant) and is never a hard error.

use std::cmp::Ordering;

mod modes;
mod properties;
mod pseudo;
mod values;

pub use modes::{
    ATTACHMENTS, Attachment, BORDER_STYLES, BorderStyle, LAYOUT_DIRECTIONS, LayoutDirection,
    ORIGINS, Origin, POSITION_MODES, PositionMode, REPEATS, Repeat, STYLE_FEATURES,
    StyleFeature, TILE_MODES, TileMode,
};
pub use properties::{PROPERTIES, Property};
pub use pseudo::{PSEUDO_CLASSES, PseudoClass};
pub use values::{ColorRole, KNOWN_VALUES, KnownValue};

/// Compare two names ignoring ASCII case.
#[must_use]
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// Look `name` up in a sorted table, returning `T::default()` on a miss.
///
/// ```
/// use tessera_css::tables::{KNOWN_VALUES, KnownValue, find_known_value};
///
/// assert_eq!(find_known_value("BOLD", KNOWN_VALUES), KnownValue::Bold);
/// assert_eq!(find_known_value("boldest", KNOWN_VALUES), KnownValue::Unknown);
/// ```
#[must_use]
pub fn find_known_value<T: Copy + Default>(name: &str, table: &[(&str, T)]) -> T {
    table
        .binary_search_by(|(entry, _)| compare_ignore_case(entry, name))
        .map_or_else(|_| T::default(), |found| table[found].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted<T>(table: &[(&str, T)]) {
        for pair in table.windows(2) {
            assert_eq!(
                compare_ignore_case(pair[0].0, pair[1].0),
                Ordering::Less,
                "{} must sort before {}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn test_tables_are_sorted() {
        assert_sorted(PROPERTIES);
        assert_sorted(KNOWN_VALUES);
        assert_sorted(PSEUDO_CLASSES);
        assert_sorted(BORDER_STYLES);
        assert_sorted(TILE_MODES);
        assert_sorted(REPEATS);
        assert_sorted(ORIGINS);
        assert_sorted(POSITION_MODES);
        assert_sorted(ATTACHMENTS);
        assert_sorted(STYLE_FEATURES);
        assert_sorted(LAYOUT_DIRECTIONS);
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(
            find_known_value("Background-Color", PROPERTIES),
            Property::BackgroundColor
        );
        assert_eq!(find_known_value("HOVER", PSEUDO_CLASSES), PseudoClass::HOVER);
    }

    #[test]
    fn test_lookup_miss_is_default() {
        assert_eq!(find_known_value("", PROPERTIES), Property::Unknown);
        assert_eq!(find_known_value("zzz", BORDER_STYLES), BorderStyle::Unknown);
    }
}
