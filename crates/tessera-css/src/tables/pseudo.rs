use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::Serialize;

/// A set of pseudo-class bits.
///
/// Selectors OR together the bits of their `:pseudo` entries; the cascade
/// compares those masks against a node's current state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PseudoClass(pub u64);

#[allow(missing_docs)]
impl PseudoClass {
    pub const UNKNOWN: Self = Self(0x0000_0000_0000_0000);
    pub const ENABLED: Self = Self(0x0000_0000_0000_0001);
    pub const DISABLED: Self = Self(0x0000_0000_0000_0002);
    pub const PRESSED: Self = Self(0x0000_0000_0000_0004);
    pub const FOCUS: Self = Self(0x0000_0000_0000_0008);
    pub const HOVER: Self = Self(0x0000_0000_0000_0010);
    pub const CHECKED: Self = Self(0x0000_0000_0000_0020);
    pub const UNCHECKED: Self = Self(0x0000_0000_0000_0040);
    pub const INDETERMINATE: Self = Self(0x0000_0000_0000_0080);
    pub const UNSPECIFIED: Self = Self(0x0000_0000_0000_0100);
    pub const SELECTED: Self = Self(0x0000_0000_0000_0200);
    pub const HORIZONTAL: Self = Self(0x0000_0000_0000_0400);
    pub const VERTICAL: Self = Self(0x0000_0000_0000_0800);
    pub const WINDOW: Self = Self(0x0000_0000_0000_1000);
    pub const CHILDREN: Self = Self(0x0000_0000_0000_2000);
    pub const SIBLING: Self = Self(0x0000_0000_0000_4000);
    pub const DEFAULT: Self = Self(0x0000_0000_0000_8000);
    pub const FIRST: Self = Self(0x0000_0000_0001_0000);
    pub const LAST: Self = Self(0x0000_0000_0002_0000);
    pub const MIDDLE: Self = Self(0x0000_0000_0004_0000);
    pub const ONLY_ONE: Self = Self(0x0000_0000_0008_0000);
    pub const PREVIOUS_SELECTED: Self = Self(0x0000_0000_0010_0000);
    pub const NEXT_SELECTED: Self = Self(0x0000_0000_0020_0000);
    pub const FLAT: Self = Self(0x0000_0000_0040_0000);
    pub const LEFT: Self = Self(0x0000_0000_0080_0000);
    pub const RIGHT: Self = Self(0x0000_0000_0100_0000);
    pub const TOP: Self = Self(0x0000_0000_0200_0000);
    pub const BOTTOM: Self = Self(0x0000_0000_0400_0000);
    pub const EXCLUSIVE: Self = Self(0x0000_0000_0800_0000);
    pub const NON_EXCLUSIVE: Self = Self(0x0000_0000_1000_0000);
    pub const FRAMELESS: Self = Self(0x0000_0000_2000_0000);
    pub const READ_ONLY: Self = Self(0x0000_0000_4000_0000);
    pub const ACTIVE: Self = Self(0x0000_0000_8000_0000);
    pub const CLOSABLE: Self = Self(0x0000_0001_0000_0000);
    pub const MOVABLE: Self = Self(0x0000_0002_0000_0000);
    pub const FLOATABLE: Self = Self(0x0000_0004_0000_0000);
    pub const MINIMIZED: Self = Self(0x0000_0008_0000_0000);
    pub const MAXIMIZED: Self = Self(0x0000_0010_0000_0000);
    pub const ON: Self = Self(0x0000_0020_0000_0000);
    pub const OFF: Self = Self(0x0000_0040_0000_0000);
    pub const EDITABLE: Self = Self(0x0000_0080_0000_0000);
    pub const ITEM: Self = Self(0x0000_0100_0000_0000);
    pub const CLOSED: Self = Self(0x0000_0200_0000_0000);
    pub const OPEN: Self = Self(0x0000_0400_0000_0000);
    pub const EDIT_FOCUS: Self = Self(0x0000_0800_0000_0000);
    pub const ALTERNATE: Self = Self(0x0000_1000_0000_0000);
    pub const LANDSCAPE: Self = Self(0x0000_2000_0000_0000);
    pub const PORTRAIT: Self = Self(0x0000_4000_0000_0000);
    pub const LEFT_TO_RIGHT: Self = Self(0x0000_8000_0000_0000);
    pub const RIGHT_TO_LEFT: Self = Self(0x0001_0000_0000_0000);
    pub const ANY: Self = Self(0x0002_0000_0000_0000);
}

impl PseudoClass {
    /// Whether no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether `self` and `other` share a bit.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Parse a comma- or space-separated list of pseudo-class names, ignoring
    /// unknown names.
    #[must_use]
    pub fn from_names(names: &str) -> Self {
        names
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|name| !name.is_empty())
            .map(|name| super::find_known_value(name, PSEUDO_CLASSES))
            .fold(Self::UNKNOWN, |acc, bit| acc | bit)
    }
}

impl BitOr for PseudoClass {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PseudoClass {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PseudoClass {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for PseudoClass {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Pseudo-class names, sorted for [`find_known_value`](super::find_known_value).
pub static PSEUDO_CLASSES: &[(&str, PseudoClass)] = &[
    ("active", PseudoClass::ACTIVE),
    ("adjoins-item", PseudoClass::ITEM),
    ("alternate", PseudoClass::ALTERNATE),
    ("bottom", PseudoClass::BOTTOM),
    ("checked", PseudoClass::CHECKED),
    ("closable", PseudoClass::CLOSABLE),
    ("closed", PseudoClass::CLOSED),
    ("default", PseudoClass::DEFAULT),
    ("disabled", PseudoClass::DISABLED),
    ("edit-focus", PseudoClass::EDIT_FOCUS),
    ("editable", PseudoClass::EDITABLE),
    ("enabled", PseudoClass::ENABLED),
    ("exclusive", PseudoClass::EXCLUSIVE),
    ("first", PseudoClass::FIRST),
    ("flat", PseudoClass::FLAT),
    ("floatable", PseudoClass::FLOATABLE),
    ("focus", PseudoClass::FOCUS),
    ("has-children", PseudoClass::CHILDREN),
    ("has-siblings", PseudoClass::SIBLING),
    ("horizontal", PseudoClass::HORIZONTAL),
    ("hover", PseudoClass::HOVER),
    ("indeterminate", PseudoClass::INDETERMINATE),
    ("landscape", PseudoClass::LANDSCAPE),
    ("last", PseudoClass::LAST),
    ("left", PseudoClass::LEFT),
    ("left-to-right", PseudoClass::LEFT_TO_RIGHT),
    ("maximized", PseudoClass::MAXIMIZED),
    ("middle", PseudoClass::MIDDLE),
    ("minimized", PseudoClass::MINIMIZED),
    ("movable", PseudoClass::MOVABLE),
    ("next-selected", PseudoClass::NEXT_SELECTED),
    ("no-frame", PseudoClass::FRAMELESS),
    ("non-exclusive", PseudoClass::NON_EXCLUSIVE),
    ("off", PseudoClass::OFF),
    ("on", PseudoClass::ON),
    ("only-one", PseudoClass::ONLY_ONE),
    ("open", PseudoClass::OPEN),
    ("portrait", PseudoClass::PORTRAIT),
    ("pressed", PseudoClass::PRESSED),
    ("previous-selected", PseudoClass::PREVIOUS_SELECTED),
    ("read-only", PseudoClass::READ_ONLY),
    ("right", PseudoClass::RIGHT),
    ("right-to-left", PseudoClass::RIGHT_TO_LEFT),
    ("selected", PseudoClass::SELECTED),
    ("top", PseudoClass::TOP),
    ("unchecked", PseudoClass::UNCHECKED),
    ("vertical", PseudoClass::VERTICAL),
    ("window", PseudoClass::WINDOW),
];
