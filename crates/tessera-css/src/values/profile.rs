//! Device profile used to resolve `un` and `mm` lengths.

use serde::{Deserialize, Serialize};

/// Scale factors of the display a style is resolved for.
///
/// Deserializable so a profile can be kept next to the sheets it is used
/// with:
///
/// ```
/// use tessera_css::values::DeviceProfile;
///
/// let profile: DeviceProfile =
///     serde_json::from_str(r#"{ "unit_value": 6.7, "ppm_value": 9.2 }"#).unwrap();
/// assert_eq!(profile.unit_value, 6.7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// Pixels per `un`.
    pub unit_value: f64,
    /// Pixels per millimeter.
    pub ppm_value: f64,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            unit_value: 1.0,
            ppm_value: 1.0,
        }
    }
}

impl DeviceProfile {
    /// A profile with the given scale factors.
    #[must_use]
    pub const fn new(unit_value: f64, ppm_value: f64) -> Self {
        Self {
            unit_value,
            ppm_value,
        }
    }

    /// Convert `value` in `unit` to pixels. Unknown units are treated as
    /// pixels.
    #[must_use]
    pub fn to_pixels(&self, value: f64, unit: LengthUnit) -> f64 {
        match unit {
            LengthUnit::Px => value,
            LengthUnit::Un => value * self.unit_value,
            LengthUnit::Mm => value * self.ppm_value,
        }
    }
}

/// Length units understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LengthUnit {
    /// Pixels.
    Px,
    /// Abstract units scaled by [`DeviceProfile::unit_value`].
    Un,
    /// Millimeters scaled by [`DeviceProfile::ppm_value`].
    Mm,
}

impl LengthUnit {
    /// Split a two-letter unit suffix (any case) off `text`. Text without a
    /// known suffix is returned whole, in pixels.
    #[must_use]
    pub fn split(text: &str) -> (&str, Self) {
        let Some(split) = text.len().checked_sub(2).filter(|&at| text.is_char_boundary(at))
        else {
            return (text, Self::Px);
        };
        let (number, suffix) = text.split_at(split);
        if suffix.eq_ignore_ascii_case("un") {
            (number, Self::Un)
        } else if suffix.eq_ignore_ascii_case("mm") {
            (number, Self::Mm)
        } else if suffix.eq_ignore_ascii_case("px") {
            (number, Self::Px)
        } else {
            (text, Self::Px)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_units() {
        assert_eq!(LengthUnit::split("4PX"), ("4", LengthUnit::Px));
        assert_eq!(LengthUnit::split("-2un"), ("-2", LengthUnit::Un));
        assert_eq!(LengthUnit::split("1.5mm"), ("1.5", LengthUnit::Mm));
        assert_eq!(LengthUnit::split("7"), ("7", LengthUnit::Px));
        assert_eq!(LengthUnit::split("3pt"), ("3pt", LengthUnit::Px));
    }

    #[test]
    fn test_to_pixels() {
        let profile = DeviceProfile::new(2.0, 10.0);
        assert_eq!(profile.to_pixels(3.0, LengthUnit::Un), 6.0);
        assert_eq!(profile.to_pixels(3.0, LengthUnit::Mm), 30.0);
        assert_eq!(profile.to_pixels(3.0, LengthUnit::Px), 3.0);
    }
}
