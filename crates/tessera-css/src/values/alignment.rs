//! Alignment flags and their keyword parsing.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::Serialize;

use crate::model::Value;
use crate::tables::KnownValue;

/// Horizontal and vertical alignment flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Alignment(pub u32);

impl Alignment {
    /// No alignment.
    pub const NONE: Self = Self(0);
    /// Align with the left edge.
    pub const LEFT: Self = Self(0x0001);
    /// Align with the right edge.
    pub const RIGHT: Self = Self(0x0002);
    /// Center horizontally.
    pub const HCENTER: Self = Self(0x0004);
    /// Align with the top edge.
    pub const TOP: Self = Self(0x0020);
    /// Align with the bottom edge.
    pub const BOTTOM: Self = Self(0x0040);
    /// Center vertically.
    pub const VCENTER: Self = Self(0x0080);
    /// Center in both dimensions.
    pub const CENTER: Self = Self(Self::HCENTER.0 | Self::VCENTER.0);

    /// Whether every flag of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Alignment {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Alignment {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::LEFT, "left"),
            (Self::RIGHT, "right"),
            (Self::HCENTER, "hcenter"),
            (Self::TOP, "top"),
            (Self::BOTTOM, "bottom"),
            (Self::VCENTER, "vcenter"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if set.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&set.join("|"))
        }
    }
}

/// Combine one or two alignment keywords.
///
/// A lone `center` next to a horizontal keyword becomes vertical centering
/// and vice versa; a single edge keyword is completed with centering on the
/// other axis. Empty lists and lists longer than two yield `LEFT | TOP`.
#[must_use]
pub fn parse_alignment(values: &[Value]) -> Alignment {
    if values.is_empty() || values.len() > 2 {
        return Alignment::LEFT | Alignment::TOP;
    }

    let mut a = [Alignment::NONE; 2];
    for (slot, value) in a.iter_mut().zip(values) {
        let Value::KnownIdentifier { id, .. } = value else {
            break;
        };
        *slot = match id {
            KnownValue::Left => Alignment::LEFT,
            KnownValue::Right => Alignment::RIGHT,
            KnownValue::Top => Alignment::TOP,
            KnownValue::Bottom => Alignment::BOTTOM,
            KnownValue::Center => Alignment::CENTER,
            _ => Alignment::NONE,
        };
    }

    let horizontal = |x: Alignment| x == Alignment::LEFT || x == Alignment::RIGHT;
    if a[0] == Alignment::CENTER && !a[1].is_empty() && a[1] != Alignment::CENTER {
        a[0] = if horizontal(a[1]) {
            Alignment::VCENTER
        } else {
            Alignment::HCENTER
        };
    }
    if (a[1].is_empty() || a[1] == Alignment::CENTER) && a[0] != Alignment::CENTER {
        a[1] = if horizontal(a[0]) {
            Alignment::VCENTER
        } else {
            Alignment::HCENTER
        };
    }
    a[0] | a[1]
}
