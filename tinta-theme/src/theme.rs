//! # Theme Assembly
//!
//! A [Theme] is the complete set of colors applied to one gallery item. It is
//! built in a single step from a [Palette] and never changes afterwards; a new
//! palette produces a new theme.
//!
//! | field | source | alpha |
//! |---|---|---|
//! | background | DarkVibrant, else Vibrant | 0.75 |
//! | border | LightVibrant, else Vibrant | 0.5 |
//! | shadow | DarkVibrant, else Vibrant | 1.0 |
//! | sidebar fill | Vibrant | 0.9 |
//! | primary text | LightVibrant, else Vibrant, contrast-adjusted | 1.0 |
//! | secondary text | same as primary text, lighter mix | 1.0 |
//!
//! ```rust
//! use tinta_theme::palette::{Palette, SwatchRole};
//! use tinta_theme::swatch::Swatch;
//! use tinta_theme::theme::derive_theme;
//!
//! let palette = Palette::new().with(SwatchRole::Vibrant, Swatch::rgb8(100, 100, 100));
//! let theme = derive_theme(&palette).unwrap();
//! assert_eq!(theme.sidebar_fill().to_css(), "rgba(100, 100, 100, 0.9)");
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::contrast::{select_text, ContrastConfig};
use crate::error::{ThemeError, ThemeResult};
use crate::palette::{Palette, SwatchRole};
use crate::resolve::resolve;
use crate::swatch::Swatch;

/// Opacity of the container background tint.
pub const BACKGROUND_ALPHA: f32 = 0.75;
/// Opacity of the container border.
pub const BORDER_ALPHA: f32 = 0.5;
/// Opacity of the projected shadow.
pub const SHADOW_ALPHA: f32 = 1.0;
/// Opacity of the sidebar fill.
pub const SIDEBAR_ALPHA: f32 = 0.9;

/// Names the fields of a [Theme].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeField {
    /// Container background tint.
    Background,
    /// Container border.
    Border,
    /// Projected shadow.
    Shadow,
    /// Sidebar fill.
    SidebarFill,
    /// Main text color.
    PrimaryText,
    /// Secondary text color.
    SecondaryText,
}

impl ThemeField {
    /// All fields, in display order.
    pub const ALL: [Self; 6] = [
        Self::Background,
        Self::Border,
        Self::Shadow,
        Self::SidebarFill,
        Self::PrimaryText,
        Self::SecondaryText,
    ];

    /// The field's key in serialized themes.
    pub fn key(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Border => "border",
            Self::Shadow => "shadow",
            Self::SidebarFill => "sidebarFill",
            Self::PrimaryText => "primaryText",
            Self::SecondaryText => "secondaryText",
        }
    }

    /// The palette role this field prefers.
    pub fn source_role(self) -> SwatchRole {
        match self {
            Self::Background | Self::Shadow => SwatchRole::DarkVibrant,
            Self::Border | Self::PrimaryText | Self::SecondaryText => SwatchRole::LightVibrant,
            Self::SidebarFill => SwatchRole::Vibrant,
        }
    }
}

impl fmt::Display for ThemeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fully resolved colors for one gallery item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    background: Swatch,
    border: Swatch,
    shadow: Swatch,
    sidebar_fill: Swatch,
    primary_text: Swatch,
    secondary_text: Swatch,
}

impl Theme {
    /// Container background tint.
    pub fn background(&self) -> Swatch {
        self.background
    }

    /// Container border.
    pub fn border(&self) -> Swatch {
        self.border
    }

    /// Projected shadow, at full intensity.
    pub fn shadow(&self) -> Swatch {
        self.shadow
    }

    /// Sidebar fill.
    pub fn sidebar_fill(&self) -> Swatch {
        self.sidebar_fill
    }

    /// Main text color.
    pub fn primary_text(&self) -> Swatch {
        self.primary_text
    }

    /// Secondary text color.
    pub fn secondary_text(&self) -> Swatch {
        self.secondary_text
    }

    /// Look a field up by name.
    pub fn get(&self, field: ThemeField) -> Swatch {
        match field {
            ThemeField::Background => self.background,
            ThemeField::Border => self.border,
            ThemeField::Shadow => self.shadow,
            ThemeField::SidebarFill => self.sidebar_fill,
            ThemeField::PrimaryText => self.primary_text,
            ThemeField::SecondaryText => self.secondary_text,
        }
    }

    /// Every field with its color, in display order.
    pub fn fields(&self) -> impl Iterator<Item = (ThemeField, Swatch)> + '_ {
        ThemeField::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// Field keys mapped to CSS color strings.
    pub fn to_css_map(&self) -> IndexMap<&'static str, String> {
        self.fields()
            .map(|(field, swatch)| (field.key(), swatch.to_css()))
            .collect()
    }
}

impl Theme {
    /// Pretty-printed JSON object of CSS color strings.
    pub fn to_json(&self) -> ThemeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Theme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(ThemeField::ALL.len()))?;
        for (field, swatch) in self.fields() {
            map.serialize_entry(field.key(), &swatch.to_css())?;
        }
        map.end()
    }
}

/// Derives themes with a fixed contrast configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThemeDeriver {
    contrast: ContrastConfig,
}

impl ThemeDeriver {
    /// Create a deriver, rejecting an invalid configuration.
    pub fn new(contrast: ContrastConfig) -> ThemeResult<Self> {
        contrast.validate()?;
        Ok(Self { contrast })
    }

    /// The contrast configuration in use.
    pub fn contrast(&self) -> &ContrastConfig {
        &self.contrast
    }

    /// Build the theme for `palette`.
    ///
    /// Fails with [ThemeError::MissingPrimarySwatch] when the palette has no
    /// vibrant swatch; no partial theme is ever returned.
    pub fn derive(&self, palette: &Palette) -> ThemeResult<Theme> {
        let vibrant = palette.primary().ok_or_else(ThemeError::missing_primary)?;
        let dark = resolve(palette, SwatchRole::DarkVibrant)?;
        let light = resolve(palette, SwatchRole::LightVibrant)?;

        let text = select_text(light, &self.contrast);

        let theme = Theme {
            background: dark.with_alpha(BACKGROUND_ALPHA),
            border: light.with_alpha(BORDER_ALPHA),
            shadow: dark.with_alpha(SHADOW_ALPHA),
            sidebar_fill: vibrant.with_alpha(SIDEBAR_ALPHA),
            primary_text: text.primary,
            secondary_text: text.secondary,
        };
        log::debug!(
            "Derived theme from {} of {} swatches",
            palette.len(),
            SwatchRole::ALL.len()
        );
        Ok(theme)
    }
}

/// Build the theme for `palette` with the default contrast configuration.
pub fn derive_theme(palette: &Palette) -> ThemeResult<Theme> {
    ThemeDeriver::default().derive(palette)
}
