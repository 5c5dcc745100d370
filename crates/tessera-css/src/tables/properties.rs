use serde::Serialize;
use strum_macros::Display;

/// Recognized property names.
///
/// Unknown property names are kept on the declaration with
/// [`Property::Unknown`] and never take part in value extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Property {
    #[default]
    Unknown,
    #[strum(serialize = "-qt-background-role")]
    BackgroundRole,
    #[strum(serialize = "-qt-style-features")]
    StyleFeatures,
    Alignment,
    AlternateBackgroundColor,
    AspectRatio,
    Background,
    BackgroundAttachment,
    BackgroundClip,
    BackgroundColor,
    BackgroundImage,
    BackgroundOrigin,
    BackgroundPosition,
    BackgroundRepeat,
    Border,
    BorderBottom,
    BorderBottomColor,
    BorderBottomLeftRadius,
    BorderBottomRightRadius,
    BorderBottomStyle,
    BorderBottomWidth,
    BorderColor,
    BorderImage,
    BorderLeft,
    BorderLeftColor,
    BorderLeftStyle,
    BorderLeftWidth,
    BorderRadius,
    BorderRight,
    BorderRightColor,
    BorderRightStyle,
    BorderRightWidth,
    BorderStyle,
    BorderTop,
    BorderTopColor,
    BorderTopLeftRadius,
    BorderTopRightRadius,
    BorderTopStyle,
    BorderTopWidth,
    BorderWidth,
    BorderWidthBottom,
    BorderWidthLeft,
    BorderWidthRight,
    BorderWidthTop,
    Bottom,
    CenterHorizontal,
    CenterVertical,
    Color,
    FixedHeight,
    FixedLength,
    FixedSize,
    FixedWidth,
    Float,
    Font,
    FontFamily,
    FontSize,
    FontStyle,
    FontVariant,
    FontWeight,
    Height,
    Image,
    ImagePosition,
    Layout,
    LayoutDirection,
    Left,
    ListStyle,
    ListStyleType,
    Margin,
    MarginBottom,
    MarginLeft,
    MarginRight,
    MarginTop,
    MaxHeight,
    MaxLength,
    MaxSize,
    MaxWidth,
    MinHeight,
    MinLength,
    MinSize,
    MinWidth,
    Mirroring,
    Outline,
    OutlineBottomLeftRadius,
    OutlineBottomRightRadius,
    OutlineColor,
    OutlineOffset,
    OutlineRadius,
    OutlineStyle,
    OutlineTopLeftRadius,
    OutlineTopRightRadius,
    OutlineWidth,
    Padding,
    PaddingBottom,
    PaddingLeft,
    PaddingRight,
    PaddingTop,
    PageBreakAfter,
    PageBreakBefore,
    Position,
    PrefHeight,
    PrefLength,
    PrefSize,
    PrefWidth,
    Right,
    Section,
    SelectionBackgroundColor,
    SelectionColor,
    SizePolicy,
    SizePolicyHorizontal,
    SizePolicyVertical,
    Spacing,
    SpacingHorizontal,
    SpacingVertical,
    SubcontrolOrigin,
    SubcontrolPosition,
    TextAlign,
    TextDecoration,
    TextElideMode,
    TextHeight,
    TextIndent,
    TextLineCountMax,
    TextLineCountMin,
    TextTransform,
    TextUnderlineStyle,
    TextWrapMode,
    Top,
    VerticalAlign,
    WhiteSpace,
    Width,
    Zvalue,
}

/// Property names, sorted for [`find_known_value`](super::find_known_value).
pub static PROPERTIES: &[(&str, Property)] = &[
    ("-qt-background-role", Property::BackgroundRole),
    ("-qt-style-features", Property::StyleFeatures),
    ("alignment", Property::Alignment),
    ("alternate-background-color", Property::AlternateBackgroundColor),
    ("aspect-ratio", Property::AspectRatio),
    ("background", Property::Background),
    ("background-attachment", Property::BackgroundAttachment),
    ("background-clip", Property::BackgroundClip),
    ("background-color", Property::BackgroundColor),
    ("background-image", Property::BackgroundImage),
    ("background-origin", Property::BackgroundOrigin),
    ("background-position", Property::BackgroundPosition),
    ("background-repeat", Property::BackgroundRepeat),
    ("border", Property::Border),
    ("border-bottom", Property::BorderBottom),
    ("border-bottom-color", Property::BorderBottomColor),
    ("border-bottom-left-radius", Property::BorderBottomLeftRadius),
    ("border-bottom-right-radius", Property::BorderBottomRightRadius),
    ("border-bottom-style", Property::BorderBottomStyle),
    ("border-bottom-width", Property::BorderBottomWidth),
    ("border-color", Property::BorderColor),
    ("border-image", Property::BorderImage),
    ("border-left", Property::BorderLeft),
    ("border-left-color", Property::BorderLeftColor),
    ("border-left-style", Property::BorderLeftStyle),
    ("border-left-width", Property::BorderLeftWidth),
    ("border-radius", Property::BorderRadius),
    ("border-right", Property::BorderRight),
    ("border-right-color", Property::BorderRightColor),
    ("border-right-style", Property::BorderRightStyle),
    ("border-right-width", Property::BorderRightWidth),
    ("border-style", Property::BorderStyle),
    ("border-top", Property::BorderTop),
    ("border-top-color", Property::BorderTopColor),
    ("border-top-left-radius", Property::BorderTopLeftRadius),
    ("border-top-right-radius", Property::BorderTopRightRadius),
    ("border-top-style", Property::BorderTopStyle),
    ("border-top-width", Property::BorderTopWidth),
    ("border-width", Property::BorderWidth),
    ("border-width-bottom", Property::BorderWidthBottom),
    ("border-width-left", Property::BorderWidthLeft),
    ("border-width-right", Property::BorderWidthRight),
    ("border-width-top", Property::BorderWidthTop),
    ("bottom", Property::Bottom),
    ("center-horizontal", Property::CenterHorizontal),
    ("center-vertical", Property::CenterVertical),
    ("color", Property::Color),
    ("fixed-height", Property::FixedHeight),
    ("fixed-length", Property::FixedLength),
    ("fixed-size", Property::FixedSize),
    ("fixed-width", Property::FixedWidth),
    ("float", Property::Float),
    ("font", Property::Font),
    ("font-family", Property::FontFamily),
    ("font-size", Property::FontSize),
    ("font-style", Property::FontStyle),
    ("font-variant", Property::FontVariant),
    ("font-weight", Property::FontWeight),
    ("height", Property::Height),
    ("image", Property::Image),
    ("image-position", Property::ImagePosition),
    ("layout", Property::Layout),
    ("layout-direction", Property::LayoutDirection),
    ("left", Property::Left),
    ("list-style", Property::ListStyle),
    ("list-style-type", Property::ListStyleType),
    ("margin", Property::Margin),
    ("margin-bottom", Property::MarginBottom),
    ("margin-left", Property::MarginLeft),
    ("margin-right", Property::MarginRight),
    ("margin-top", Property::MarginTop),
    ("max-height", Property::MaxHeight),
    ("max-length", Property::MaxLength),
    ("max-size", Property::MaxSize),
    ("max-width", Property::MaxWidth),
    ("min-height", Property::MinHeight),
    ("min-length", Property::MinLength),
    ("min-size", Property::MinSize),
    ("min-width", Property::MinWidth),
    ("mirroring", Property::Mirroring),
    ("outline", Property::Outline),
    ("outline-bottom-left-radius", Property::OutlineBottomLeftRadius),
    ("outline-bottom-right-radius", Property::OutlineBottomRightRadius),
    ("outline-color", Property::OutlineColor),
    ("outline-offset", Property::OutlineOffset),
    ("outline-radius", Property::OutlineRadius),
    ("outline-style", Property::OutlineStyle),
    ("outline-top-left-radius", Property::OutlineTopLeftRadius),
    ("outline-top-right-radius", Property::OutlineTopRightRadius),
    ("outline-width", Property::OutlineWidth),
    ("padding", Property::Padding),
    ("padding-bottom", Property::PaddingBottom),
    ("padding-left", Property::PaddingLeft),
    ("padding-right", Property::PaddingRight),
    ("padding-top", Property::PaddingTop),
    ("page-break-after", Property::PageBreakAfter),
    ("page-break-before", Property::PageBreakBefore),
    ("position", Property::Position),
    ("pref-height", Property::PrefHeight),
    ("pref-length", Property::PrefLength),
    ("pref-size", Property::PrefSize),
    ("pref-width", Property::PrefWidth),
    ("right", Property::Right),
    ("section", Property::Section),
    ("selection-background-color", Property::SelectionBackgroundColor),
    ("selection-color", Property::SelectionColor),
    ("size-policy", Property::SizePolicy),
    ("size-policy-horizontal", Property::SizePolicyHorizontal),
    ("size-policy-vertical", Property::SizePolicyVertical),
    ("spacing", Property::Spacing),
    ("spacing-horizontal", Property::SpacingHorizontal),
    ("spacing-vertical", Property::SpacingVertical),
    ("subcontrol-origin", Property::SubcontrolOrigin),
    ("subcontrol-position", Property::SubcontrolPosition),
    ("text-align", Property::TextAlign),
    ("text-decoration", Property::TextDecoration),
    ("text-elide-mode", Property::TextElideMode),
    ("text-height", Property::TextHeight),
    ("text-indent", Property::TextIndent),
    ("text-line-count-max", Property::TextLineCountMax),
    ("text-line-count-min", Property::TextLineCountMin),
    ("text-transform", Property::TextTransform),
    ("text-underline-style", Property::TextUnderlineStyle),
    ("text-wrap-mode", Property::TextWrapMode),
    ("top", Property::Top),
    ("vertical-align", Property::VerticalAlign),
    ("white-space", Property::WhiteSpace),
    ("width", Property::Width),
    ("zvalue", Property::Zvalue),
];
