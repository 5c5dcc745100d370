//! Geometry, position, text and box extraction.

use serde::Serialize;

use super::ValueExtractor;
use crate::model::{Declaration, Value};
use crate::tables::{KnownValue, LayoutDirection, Property};
use crate::values::{Alignment, ElideMode, SizePolicy, TextWrapMode};

/// Size hints and size policies. `None` means not set by any declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct GeometryValues {
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
    pub pref_width: Option<f64>,
    pub pref_height: Option<f64>,
    pub horizontal_policy: Option<SizePolicy>,
    pub vertical_policy: Option<SizePolicy>,
}

/// Anchoring offsets and alignment. `None` means not set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct PositionValues {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub center_horizontal: Option<f64>,
    pub center_vertical: Option<f64>,
    pub z_value: Option<f64>,
    /// From `alignment`.
    pub alignment: Option<Alignment>,
    /// From `text-align`.
    pub text_alignment: Option<Alignment>,
    /// From `layout-direction` or the legacy `mirroring`.
    pub layout_direction: Option<LayoutDirection>,
    pub text_wrap_mode: Option<TextWrapMode>,
}

/// Text line limits and eliding. `None` means not set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct TextValues {
    pub line_count_min: Option<i32>,
    pub line_count_max: Option<i32>,
    pub elide_mode: Option<ElideMode>,
}

/// Margins and paddings as `[top, right, bottom, left]`, spacing as
/// `[horizontal, vertical]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct BoxValues {
    pub margins: [f64; 4],
    pub paddings: [f64; 4],
    pub spacing: [f64; 2],
}

const TOP: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const LEFT: usize = 3;

/// `layout-direction` keywords, with the legacy `mirroring` ones folded
/// in: `disabled` means left-to-right and `mirrored` follows the parent.
const fn layout_direction(value: &Value) -> LayoutDirection {
    match value.known() {
        KnownValue::RightToLeft => LayoutDirection::RightToLeft,
        KnownValue::LeftToRight | KnownValue::Disabled => LayoutDirection::LeftToRight,
        _ => LayoutDirection::Parent,
    }
}

impl ValueExtractor<'_> {
    /// One or two values as a `(width, height)` pair, the second
    /// defaulting to the first.
    pub(super) fn pair(&self, decl: &Declaration) -> (f64, f64) {
        let first = self.real_value(decl);
        let second = decl
            .values
            .get(1)
            .map_or(first, |value| self.as_real(value).unwrap_or_default());
        (first, second)
    }

    /// Size hints and policies.
    ///
    /// `fixed-*` properties set the preferred size and a fixed policy;
    /// `*-length` properties are aliases of the matching height.
    pub fn extract_geometry(&self, geometry: &mut GeometryValues) -> bool {
        let mut hit = false;
        for decl in self.declarations {
            let Some(first) = decl.values.first() else {
                continue;
            };
            match decl.property_id {
                Property::MinWidth => geometry.min_width = Some(self.real_value(decl)),
                Property::MinHeight | Property::MinLength => {
                    geometry.min_height = Some(self.real_value(decl));
                }
                Property::MaxWidth => geometry.max_width = Some(self.real_value(decl)),
                Property::MaxHeight | Property::MaxLength => {
                    geometry.max_height = Some(self.real_value(decl));
                }
                Property::PrefWidth => geometry.pref_width = Some(self.real_value(decl)),
                Property::PrefHeight | Property::PrefLength => {
                    geometry.pref_height = Some(self.real_value(decl));
                }
                Property::FixedWidth => {
                    geometry.pref_width = Some(self.real_value(decl));
                    geometry.horizontal_policy = Some(SizePolicy::Fixed);
                }
                Property::FixedHeight | Property::FixedLength => {
                    geometry.pref_height = Some(self.real_value(decl));
                    geometry.vertical_policy = Some(SizePolicy::Fixed);
                }
                Property::MinSize => {
                    let (width, height) = self.pair(decl);
                    geometry.min_width = Some(width);
                    geometry.min_height = Some(height);
                }
                Property::MaxSize => {
                    let (width, height) = self.pair(decl);
                    geometry.max_width = Some(width);
                    geometry.max_height = Some(height);
                }
                Property::PrefSize => {
                    let (width, height) = self.pair(decl);
                    geometry.pref_width = Some(width);
                    geometry.pref_height = Some(height);
                }
                Property::FixedSize => {
                    let (width, height) = self.pair(decl);
                    geometry.pref_width = Some(width);
                    geometry.pref_height = Some(height);
                    geometry.horizontal_policy = Some(SizePolicy::Fixed);
                    geometry.vertical_policy = Some(SizePolicy::Fixed);
                }
                Property::SizePolicy => {
                    let horizontal = SizePolicy::from_value(first);
                    geometry.horizontal_policy = Some(horizontal);
                    geometry.vertical_policy =
                        Some(decl.values.get(1).map_or(horizontal, SizePolicy::from_value));
                }
                Property::SizePolicyHorizontal => {
                    geometry.horizontal_policy = Some(SizePolicy::from_value(first));
                }
                Property::SizePolicyVertical => {
                    geometry.vertical_policy = Some(SizePolicy::from_value(first));
                }
                _ => continue,
            }
            hit = true;
        }
        hit
    }

    /// Anchoring offsets, z-value, alignments, layout direction and text
    /// wrapping.
    pub fn extract_position(&self, position: &mut PositionValues) -> bool {
        let mut hit = false;
        for decl in self.declarations {
            let Some(first) = decl.values.first() else {
                continue;
            };
            match decl.property_id {
                Property::Left => position.left = Some(self.real_value(decl)),
                Property::Top => position.top = Some(self.real_value(decl)),
                Property::Right => position.right = Some(self.real_value(decl)),
                Property::Bottom => position.bottom = Some(self.real_value(decl)),
                Property::CenterHorizontal => {
                    position.center_horizontal = Some(self.real_value(decl));
                }
                Property::CenterVertical => position.center_vertical = Some(self.real_value(decl)),
                Property::Zvalue => position.z_value = Some(self.real_value(decl)),
                Property::Alignment => position.alignment = Some(decl.alignment_value()),
                Property::TextAlign => position.text_alignment = Some(decl.alignment_value()),
                Property::LayoutDirection | Property::Mirroring => {
                    position.layout_direction = Some(layout_direction(first));
                }
                Property::TextWrapMode => {
                    position.text_wrap_mode = Some(TextWrapMode::from_value(first));
                }
                _ => continue,
            }
            hit = true;
        }
        hit
    }

    /// Line-count limits and elide mode.
    pub fn extract_text_values(&self, text: &mut TextValues) -> bool {
        let mut hit = false;
        for decl in self.declarations {
            let Some(first) = decl.values.first() else {
                continue;
            };
            match decl.property_id {
                Property::TextLineCountMin => text.line_count_min = Some(first.to_int().unwrap_or(0)),
                Property::TextLineCountMax => text.line_count_max = Some(first.to_int().unwrap_or(0)),
                Property::TextElideMode => text.elide_mode = Some(ElideMode::from_value(first)),
                _ => continue,
            }
            hit = true;
        }
        hit
    }

    /// Margins, paddings and spacing, box shorthands expanded.
    pub fn extract_box(&self, values: &mut BoxValues) -> bool {
        let mut hit = false;
        for decl in self.declarations {
            match decl.property_id {
                Property::Margin => self.reals_into(decl, &mut values.margins),
                Property::MarginTop => values.margins[TOP] = self.real_value(decl),
                Property::MarginRight => values.margins[RIGHT] = self.real_value(decl),
                Property::MarginBottom => values.margins[BOTTOM] = self.real_value(decl),
                Property::MarginLeft => values.margins[LEFT] = self.real_value(decl),
                Property::Padding => self.reals_into(decl, &mut values.paddings),
                Property::PaddingTop => values.paddings[TOP] = self.real_value(decl),
                Property::PaddingRight => values.paddings[RIGHT] = self.real_value(decl),
                Property::PaddingBottom => values.paddings[BOTTOM] = self.real_value(decl),
                Property::PaddingLeft => values.paddings[LEFT] = self.real_value(decl),
                Property::Spacing => {
                    let (horizontal, vertical) = self.pair(decl);
                    values.spacing = [horizontal, vertical];
                }
                Property::SpacingHorizontal => values.spacing[0] = self.real_value(decl),
                Property::SpacingVertical => values.spacing[1] = self.real_value(decl),
                _ => continue,
            }
            hit = true;
        }
        hit
    }

    /// Box-expanded reals of `decl`, or all zero if any value fails to
    /// resolve.
    pub(super) fn reals_into(&self, decl: &Declaration, edges: &mut [f64; 4]) {
        *edges = self.as_reals(decl).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::DeviceProfile;

    fn decl(property: &str, values: Vec<Value>) -> Declaration {
        Declaration::new(property, values)
    }

    fn len(text: &str) -> Value {
        Value::Length(text.to_string())
    }

    fn kw(id: KnownValue, text: &str) -> Value {
        Value::KnownIdentifier {
            id,
            original: text.to_string(),
        }
    }

    #[test]
    fn test_fixed_height_sets_policy() {
        let decls = vec![decl("fixed-height", vec![len("2un")]), decl("min-width", vec![len("5px")])];
        let extractor = ValueExtractor::new(&decls, DeviceProfile::new(4.0, 1.0));
        let mut geometry = GeometryValues::default();
        assert!(extractor.extract_geometry(&mut geometry));
        assert_eq!(geometry.pref_height, Some(8.0));
        assert_eq!(geometry.vertical_policy, Some(SizePolicy::Fixed));
        assert_eq!(geometry.min_width, Some(5.0));
        assert_eq!(geometry.horizontal_policy, None);
    }

    #[test]
    fn test_size_policy_pair() {
        let decls = vec![decl("size-policy", vec![kw(KnownValue::Expanding, "expanding")])];
        let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
        let mut geometry = GeometryValues::default();
        assert!(extractor.extract_geometry(&mut geometry));
        assert_eq!(geometry.horizontal_policy, Some(SizePolicy::Expanding));
        assert_eq!(geometry.vertical_policy, Some(SizePolicy::Expanding));
    }

    #[test]
    fn test_mirroring_keywords() {
        let decls = vec![decl("mirroring", vec![kw(KnownValue::Disabled, "disabled")])];
        let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
        let mut position = PositionValues::default();
        assert!(extractor.extract_position(&mut position));
        assert_eq!(position.layout_direction, Some(LayoutDirection::LeftToRight));

        let decls = vec![decl("mirroring", vec![kw(KnownValue::Mirrored, "mirrored")])];
        let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
        assert!(extractor.extract_position(&mut position));
        assert_eq!(position.layout_direction, Some(LayoutDirection::Parent));
    }

    #[test]
    fn test_box_longhand_overrides_shorthand() {
        let decls = vec![
            decl("padding", vec![len("1px"), len("2px"), len("3px")]),
            decl("padding-left", vec![len("9px")]),
            decl("spacing", vec![len("4px")]),
        ];
        let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
        let mut values = BoxValues::default();
        assert!(extractor.extract_box(&mut values));
        assert_eq!(values.paddings, [1.0, 2.0, 3.0, 9.0]);
        assert_eq!(values.spacing, [4.0, 4.0]);
        assert_eq!(values.margins, [0.0; 4]);
    }

    #[test]
    fn test_no_hit_leaves_values() {
        let decls = vec![decl("color", vec![Value::Identifier("red".into())])];
        let extractor = ValueExtractor::new(&decls, DeviceProfile::default());
        let mut text = TextValues {
            line_count_max: Some(3),
            ..TextValues::default()
        };
        assert!(!extractor.extract_text_values(&mut text));
        assert_eq!(text.line_count_max, Some(3));
    }
}
