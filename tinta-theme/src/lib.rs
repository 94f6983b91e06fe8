#![warn(missing_docs)]

//! # Tinta Theme Engine
//!
//! Turns the swatches extracted from an image into a complete, consistent
//! [Theme](theme::Theme) for the container that displays it.
//!
//! ## Overview
//!
//! - **[Swatch](swatch::Swatch)**: an sRGB color with alpha, plus mixing and
//!   lightness classification
//! - **[Palette](palette::Palette)**: extracted swatches keyed by
//!   [SwatchRole](palette::SwatchRole); any role but `Vibrant` may be missing
//! - **[resolve](resolve::resolve)**: the fallback chain from a preferred role to `Vibrant`
//! - **[select_text](contrast::select_text)**: contrast-aware text colors
//! - **[derive_theme](theme::derive_theme)**: everything above, assembled
//! - **[ThemeConfig](config::ThemeConfig)**: tunable thresholds and mix ratios
//!
//! ## Quick Start
//!
//! ```rust
//! use tinta_theme::palette::{Palette, SwatchRole};
//! use tinta_theme::swatch::Swatch;
//! use tinta_theme::theme::derive_theme;
//!
//! let palette = Palette::new()
//!     .with(SwatchRole::Vibrant, Swatch::rgb8(200, 50, 50))
//!     .with(SwatchRole::DarkVibrant, Swatch::rgb8(80, 10, 10))
//!     .with(SwatchRole::LightVibrant, Swatch::rgb8(240, 180, 180));
//!
//! let theme = derive_theme(&palette).unwrap();
//! assert_eq!(theme.background().to_css(), "rgba(80, 10, 10, 0.75)");
//! ```
//!
//! ## Errors
//!
//! Derivation is total for every palette that carries a `Vibrant` swatch.
//! Without one it fails with
//! [ThemeError::MissingPrimarySwatch](error::ThemeError::MissingPrimarySwatch);
//! the engine never substitutes a color of its own.

/// Contains the [config::ThemeConfig] struct for theme configuration.
pub mod config;
/// Contains the text color selector and its constants.
pub mod contrast;
/// Contains the [error::ThemeError] type.
pub mod error;
/// Contains the [palette::Palette] and [palette::SwatchRole] types.
pub mod palette;
/// Contains the role fallback resolver.
pub mod resolve;
/// Serde support for swatches.
pub mod serde_color;
/// Contains the [swatch::Swatch] color type.
pub mod swatch;
/// Contains the [theme::Theme] record and its assembly.
pub mod theme;
/// Color parsing and formatting helpers.
pub mod util;

pub use peniko::Color;
