#![warn(missing_docs)]

//! Per-image color themes derived from extracted palettes.

pub use tinta_services as services;
pub use tinta_theme as theme;

pub mod render;

/// A "prelude" for users of tinta.
///
/// Importing this module brings into scope the most common types
/// needed to theme a gallery.
///
/// ```rust
/// use tinta::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::theme::config::ThemeConfig;
    pub use crate::theme::contrast::{select_text, ContrastConfig, Lightness, TextColors};
    pub use crate::theme::error::{ThemeError, ThemeResult};
    pub use crate::theme::palette::{Palette, SwatchRole};
    pub use crate::theme::resolve::resolve;
    pub use crate::theme::swatch::{with_alpha, Swatch};
    pub use crate::theme::theme::{derive_theme, Theme, ThemeDeriver, ThemeField};

    // Services
    pub use crate::services::{
        ApplyOutcome, ExecutorOptions, ExtractError, Gallery, GalleryItem, ItemKey,
        PaletteExtractor, QuantizeOptions, SettingsRegistry, ThemeEvent, ThemeExecutor,
        ThemeRequest, ThemeState, ThemeTicket, VibrantExtractor,
    };
}
