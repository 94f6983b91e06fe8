//! Palette extraction.
//!
//! Extraction is the only step of theming that touches pixel data. It is kept
//! behind the [PaletteExtractor] trait so the executor and gallery can be
//! driven by any quantizer; [VibrantExtractor] is the built-in one.

use std::path::Path;

use async_trait::async_trait;
use tinta_theme::palette::Palette;

pub mod error;
pub mod vibrant;

pub use error::ExtractError;
pub use vibrant::{QuantizeOptions, VibrantExtractor};

/// Trait for palette extractors.
///
/// Implementations may leave any role empty. A palette without a vibrant
/// swatch is passed on as-is; the theme engine rejects it.
#[async_trait]
pub trait PaletteExtractor: Send + Sync {
    /// Extract the palette of the image at `image`.
    ///
    /// # Arguments
    ///
    /// * `image` - Path to the image file
    ///
    /// # Returns
    ///
    /// * `Ok(Palette)` - The extracted swatches, possibly incomplete
    /// * `Err(ExtractError)` - If the image could not be read or decoded
    async fn extract(&self, image: &Path) -> Result<Palette, ExtractError>;
}
