use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Recognized keyword values.
///
/// Variants from [`KnownValue::WindowText`] through
/// [`KnownValue::AlternateBase`] form the contiguous color-role range used by
/// `palette(role)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum KnownValue {
    /// Not a known keyword.
    #[default]
    Unknown,
    /// `normal`
    Normal,
    /// `pre`
    Pre,
    /// `small`
    Small,
    /// `medium`
    Medium,
    /// `large`
    Large,
    /// `x-large`
    #[strum(serialize = "x-large")]
    XLarge,
    /// `xx-large`
    #[strum(serialize = "xx-large")]
    XxLarge,
    /// `italic`
    Italic,
    /// `oblique`
    Oblique,
    /// `bold`
    Bold,
    /// `underline`
    Underline,
    /// `overline`
    Overline,
    /// `line-through`
    LineThrough,
    /// `sub`
    Sub,
    /// `super`
    Super,
    /// `left`
    Left,
    /// `right`
    Right,
    /// `top`
    Top,
    /// `bottom`
    Bottom,
    /// `center`
    Center,
    /// `native`
    Native,
    /// `solid`
    Solid,
    /// `dotted`
    Dotted,
    /// `dashed`
    Dashed,
    /// `dot-dash`
    DotDash,
    /// `dot-dot-dash`
    DotDotDash,
    /// `double`
    Double,
    /// `groove`
    Groove,
    /// `ridge`
    Ridge,
    /// `inset`
    Inset,
    /// `outset`
    Outset,
    /// `wave`
    Wave,
    /// `middle`
    Middle,
    /// `auto`
    Auto,
    /// `always`
    Always,
    /// `none`
    None,
    /// `transparent`
    Transparent,
    /// `disc`
    Disc,
    /// `circle`
    Circle,
    /// `square`
    Square,
    /// `decimal`
    Decimal,
    /// `lower-alpha`
    LowerAlpha,
    /// `upper-alpha`
    UpperAlpha,
    /// `small-caps`
    SmallCaps,
    /// `uppercase`
    Uppercase,
    /// `lowercase`
    Lowercase,
    /// `window-text`
    WindowText,
    /// `button`
    Button,
    /// `light`
    Light,
    /// `midlight`
    Midlight,
    /// `dark`
    Dark,
    /// `mid`
    Mid,
    /// `text`
    Text,
    /// `bright-text`
    BrightText,
    /// `button-text`
    ButtonText,
    /// `base`
    Base,
    /// `window`
    Window,
    /// `shadow`
    Shadow,
    /// `highlight`
    Highlight,
    /// `highlighted-text`
    HighlightedText,
    /// `link`
    Link,
    /// `link-visited`
    LinkVisited,
    /// `alternate-base`
    AlternateBase,
    /// `disabled`
    Disabled,
    /// `active`
    Active,
    /// `selected`
    Selected,
    /// `on`
    On,
    /// `off`
    Off,
    /// `ignore`
    Ignore,
    /// `keep`
    Keep,
    /// `keep-expand`
    KeepExpand,
    /// `primary`
    Primary,
    /// `secondary`
    Secondary,
    /// `title`
    Title,
    /// `primary-small`
    PrimarySmall,
    /// `digital`
    Digital,
    /// `fixed`
    Fixed,
    /// `minimum`
    Minimum,
    /// `maximum`
    Maximum,
    /// `preferred`
    Preferred,
    /// `expanding`
    Expanding,
    /// `minimum-expanding`
    MinimumExpanding,
    /// `ignored`
    Ignored,
    /// `mirrored`
    Mirrored,
    /// `left-to-right`
    LeftToRight,
    /// `right-to-left`
    RightToLeft,
    /// `parent`
    Parent,
    /// `no-wrap`
    NoWrap,
    /// `word-wrap`
    WordWrap,
    /// `wrap-anywhere`
    WrapAnywhere,
    /// `wrap-at-word-boundary-or-anywhere`
    WrapAtWordBoundaryOrAnywhere,
    /// `negative`
    Negative,
    /// `positive`
    Positive,
}

impl KnownValue {
    /// Whether this keyword names a palette color role.
    #[must_use]
    pub fn is_color_role(self) -> bool {
        (Self::WindowText..=Self::AlternateBase).contains(&self)
    }

    /// The palette role named by this keyword, if it is in the color-role
    /// range.
    #[must_use]
    pub const fn color_role(self) -> Option<ColorRole> {
        Some(match self {
            Self::WindowText => ColorRole::WindowText,
            Self::Button => ColorRole::Button,
            Self::Light => ColorRole::Light,
            Self::Midlight => ColorRole::Midlight,
            Self::Dark => ColorRole::Dark,
            Self::Mid => ColorRole::Mid,
            Self::Text => ColorRole::Text,
            Self::BrightText => ColorRole::BrightText,
            Self::ButtonText => ColorRole::ButtonText,
            Self::Base => ColorRole::Base,
            Self::Window => ColorRole::Window,
            Self::Shadow => ColorRole::Shadow,
            Self::Highlight => ColorRole::Highlight,
            Self::HighlightedText => ColorRole::HighlightedText,
            Self::Link => ColorRole::Link,
            Self::LinkVisited => ColorRole::LinkVisited,
            Self::AlternateBase => ColorRole::AlternateBase,
            _ => return None,
        })
    }
}

/// Palette color roles, in palette index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ColorRole {
    WindowText,
    Button,
    Light,
    Midlight,
    Dark,
    Mid,
    Text,
    BrightText,
    ButtonText,
    Base,
    Window,
    Shadow,
    Highlight,
    HighlightedText,
    Link,
    LinkVisited,
    AlternateBase,
}

impl ColorRole {
    /// Number of palette roles.
    pub const COUNT: usize = 17;

    /// Index of this role in a palette.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Keyword names, sorted for [`find_known_value`](super::find_known_value).
pub static KNOWN_VALUES: &[(&str, KnownValue)] = &[
    ("active", KnownValue::Active),
    ("alternate-base", KnownValue::AlternateBase),
    ("always", KnownValue::Always),
    ("auto", KnownValue::Auto),
    ("base", KnownValue::Base),
    ("bold", KnownValue::Bold),
    ("bottom", KnownValue::Bottom),
    ("bright-text", KnownValue::BrightText),
    ("button", KnownValue::Button),
    ("button-text", KnownValue::ButtonText),
    ("center", KnownValue::Center),
    ("circle", KnownValue::Circle),
    ("dark", KnownValue::Dark),
    ("dashed", KnownValue::Dashed),
    ("decimal", KnownValue::Decimal),
    ("digital", KnownValue::Digital),
    ("disabled", KnownValue::Disabled),
    ("disc", KnownValue::Disc),
    ("dot-dash", KnownValue::DotDash),
    ("dot-dot-dash", KnownValue::DotDotDash),
    ("dotted", KnownValue::Dotted),
    ("double", KnownValue::Double),
    ("expanding", KnownValue::Expanding),
    ("fixed", KnownValue::Fixed),
    ("groove", KnownValue::Groove),
    ("highlight", KnownValue::Highlight),
    ("highlighted-text", KnownValue::HighlightedText),
    ("ignore", KnownValue::Ignore),
    ("ignored", KnownValue::Ignored),
    ("inset", KnownValue::Inset),
    ("italic", KnownValue::Italic),
    ("keep", KnownValue::Keep),
    ("keep-expand", KnownValue::KeepExpand),
    ("large", KnownValue::Large),
    ("left", KnownValue::Left),
    ("left-to-right", KnownValue::LeftToRight),
    ("light", KnownValue::Light),
    ("line-through", KnownValue::LineThrough),
    ("link", KnownValue::Link),
    ("link-visited", KnownValue::LinkVisited),
    ("lower-alpha", KnownValue::LowerAlpha),
    ("lowercase", KnownValue::Lowercase),
    ("maximum", KnownValue::Maximum),
    ("medium", KnownValue::Medium),
    ("mid", KnownValue::Mid),
    ("middle", KnownValue::Middle),
    ("midlight", KnownValue::Midlight),
    ("minimum", KnownValue::Minimum),
    ("minimum-expanding", KnownValue::MinimumExpanding),
    ("mirrored", KnownValue::Mirrored),
    ("native", KnownValue::Native),
    ("negative", KnownValue::Negative),
    ("no-wrap", KnownValue::NoWrap),
    ("none", KnownValue::None),
    ("normal", KnownValue::Normal),
    ("oblique", KnownValue::Oblique),
    ("off", KnownValue::Off),
    ("on", KnownValue::On),
    ("outset", KnownValue::Outset),
    ("overline", KnownValue::Overline),
    ("parent", KnownValue::Parent),
    ("positive", KnownValue::Positive),
    ("pre", KnownValue::Pre),
    ("preferred", KnownValue::Preferred),
    ("primary", KnownValue::Primary),
    ("primary-small", KnownValue::PrimarySmall),
    ("ridge", KnownValue::Ridge),
    ("right", KnownValue::Right),
    ("right-to-left", KnownValue::RightToLeft),
    ("secondary", KnownValue::Secondary),
    ("selected", KnownValue::Selected),
    ("shadow", KnownValue::Shadow),
    ("small", KnownValue::Small),
    ("small-caps", KnownValue::SmallCaps),
    ("solid", KnownValue::Solid),
    ("square", KnownValue::Square),
    ("sub", KnownValue::Sub),
    ("super", KnownValue::Super),
    ("text", KnownValue::Text),
    ("title", KnownValue::Title),
    ("top", KnownValue::Top),
    ("transparent", KnownValue::Transparent),
    ("underline", KnownValue::Underline),
    ("upper-alpha", KnownValue::UpperAlpha),
    ("uppercase", KnownValue::Uppercase),
    ("wave", KnownValue::Wave),
    ("window", KnownValue::Window),
    ("window-text", KnownValue::WindowText),
    ("word-wrap", KnownValue::WordWrap),
    ("wrap-anywhere", KnownValue::WrapAnywhere),
    ("wrap-at-word-boundary-or-anywhere", KnownValue::WrapAtWordBoundaryOrAnywhere),
    ("x-large", KnownValue::XLarge),
    ("xx-large", KnownValue::XxLarge),
];

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_color_roles_follow_palette_order() {
        assert_eq!(ColorRole::iter().count(), ColorRole::COUNT);
        for (index, role) in ColorRole::iter().enumerate() {
            assert_eq!(role.index(), index);
        }
    }

    #[test]
    fn test_color_role_range() {
        assert!(KnownValue::Highlight.is_color_role());
        assert_eq!(KnownValue::Highlight.color_role(), Some(ColorRole::Highlight));
        assert!(!KnownValue::Bold.is_color_role());
        assert_eq!(KnownValue::Bold.color_role(), None);
    }
}
