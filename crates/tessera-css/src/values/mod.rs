//! Typed values: colors, brushes, lengths, alignment, `expr()` arithmetic
//! and the declaration value extractor.

mod alignment;
mod color;
pub mod expression;
mod extractor;
mod geometry;
pub mod paint;
mod profile;

pub use alignment::{Alignment, parse_alignment};
pub use color::Color;
pub use extractor::{
    BackgroundValues, BorderValues, BoxValues, Capitalization, FontRole, FontStyle, FontValues,
    GeometryValues, ImageValues, MAX_VARIABLE_DEPTH, OutlineValues, ParameterValue,
    PositionValues, TextValues, ValueExtractor, VariableLookup, WEIGHT_BOLD, WEIGHT_MAX,
    WEIGHT_NORMAL,
};
pub use geometry::{AspectRatioMode, ElideMode, Rect, Size, SizePolicy, TextWrapMode};
pub use paint::{Brush, ColorData, GradientStop, Palette, Spread};
pub use profile::{DeviceProfile, LengthUnit};
