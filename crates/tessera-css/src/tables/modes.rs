use serde::Serialize;
use strum_macros::Display;

/// Border and outline line styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum BorderStyle {
    #[default]
    Unknown,
    None,
    Dotted,
    Dashed,
    Solid,
    Double,
    DotDash,
    DotDotDash,
    Groove,
    Ridge,
    Inset,
    Outset,
    Native,
}

/// Border-image tiling modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum TileMode {
    #[default]
    Unknown,
    Round,
    Stretch,
    Repeat,
}

/// Background repeat modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Repeat {
    #[default]
    Unknown,
    None,
    X,
    Y,
    XY,
}

/// Box an image or sub-control is positioned against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Origin {
    #[default]
    Unknown,
    Padding,
    Border,
    Content,
    Margin,
}

/// `position` modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum PositionMode {
    #[default]
    Unknown,
    Static,
    Relative,
    Absolute,
    Fixed,
}

/// Background attachment modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Attachment {
    #[default]
    Unknown,
    Fixed,
    Scroll,
}

/// Layout direction of a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum LayoutDirection {
    LeftToRight,
    RightToLeft,
    #[default]
    Parent,
}

/// Style feature flags, combined as a bitmask by
/// `-qt-style-features`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum StyleFeature {
    #[default]
    None = 0,
    BackgroundColor = 1,
    BackgroundGradient = 2,
}

impl StyleFeature {
    /// The feature's bit.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

/// Border style names.
pub static BORDER_STYLES: &[(&str, BorderStyle)] = &[
    ("dashed", BorderStyle::Dashed),
    ("dot-dash", BorderStyle::DotDash),
    ("dot-dot-dash", BorderStyle::DotDotDash),
    ("dotted", BorderStyle::Dotted),
    ("double", BorderStyle::Double),
    ("groove", BorderStyle::Groove),
    ("inset", BorderStyle::Inset),
    ("native", BorderStyle::Native),
    ("none", BorderStyle::None),
    ("outset", BorderStyle::Outset),
    ("ridge", BorderStyle::Ridge),
    ("solid", BorderStyle::Solid),
];

/// Tile mode names.
pub static TILE_MODES: &[(&str, TileMode)] = &[
    ("repeat", TileMode::Repeat),
    ("round", TileMode::Round),
    ("stretch", TileMode::Stretch),
];

/// Repeat mode names.
pub static REPEATS: &[(&str, Repeat)] = &[
    ("no-repeat", Repeat::None),
    ("repeat", Repeat::XY),
    ("repeat-x", Repeat::X),
    ("repeat-xy", Repeat::XY),
    ("repeat-y", Repeat::Y),
];

/// Origin names.
pub static ORIGINS: &[(&str, Origin)] = &[
    ("border", Origin::Border),
    ("content", Origin::Content),
    ("margin", Origin::Margin),
    ("padding", Origin::Padding),
];

/// Position mode names.
pub static POSITION_MODES: &[(&str, PositionMode)] = &[
    ("absolute", PositionMode::Absolute),
    ("fixed", PositionMode::Fixed),
    ("relative", PositionMode::Relative),
    ("static", PositionMode::Static),
];

/// Attachment names.
pub static ATTACHMENTS: &[(&str, Attachment)] = &[
    ("fixed", Attachment::Fixed),
    ("scroll", Attachment::Scroll),
];

/// Style feature names.
pub static STYLE_FEATURES: &[(&str, StyleFeature)] = &[
    ("background-color", StyleFeature::BackgroundColor),
    ("background-gradient", StyleFeature::BackgroundGradient),
];

/// Layout direction names.
pub static LAYOUT_DIRECTIONS: &[(&str, LayoutDirection)] = &[
    ("left-to-right", LayoutDirection::LeftToRight),
    ("parent", LayoutDirection::Parent),
    ("right-to-left", LayoutDirection::RightToLeft),
];
