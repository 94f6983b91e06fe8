//! # Contrast-Aware Text Selection
//!
//! Text drawn over a themed container takes its hue from the palette, but its
//! lightness is pushed away from the source swatch: light swatches are mixed
//! toward black, dark swatches toward white. Swatches that fall between the two
//! thresholds are used as they are.
//!
//! ```rust
//! use tinta_theme::contrast::{select_text, ContrastConfig};
//! use tinta_theme::swatch::Swatch;
//!
//! let text = select_text(Swatch::rgb8(240, 180, 180), &ContrastConfig::default());
//! assert_eq!(text.primary.alpha(), 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ThemeError, ThemeResult};
use crate::swatch::Swatch;

/// Default boundary between dark and light swatches, on the luma scale.
pub const DEFAULT_LIGHTNESS_THRESHOLD: f32 = 128.0 / 255.0;
/// Default share of black/white mixed into the primary text color.
pub const DEFAULT_PRIMARY_MIX: f32 = 0.8;
/// Default share of black/white mixed into the secondary text color.
pub const DEFAULT_SECONDARY_MIX: f32 = 0.7;

/// Lightness classification of a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lightness {
    /// At or above the light threshold.
    Light,
    /// Below the dark threshold.
    Dark,
    /// Between the two thresholds.
    Neutral,
}

/// The two luma thresholds used to classify swatches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightnessThresholds {
    /// Luma strictly below this value is dark.
    pub dark_below: f32,
    /// Luma at or above this value is light.
    pub light_from: f32,
}

impl LightnessThresholds {
    /// Create a threshold pair. Use [ContrastConfig::validate] to check it.
    pub fn new(dark_below: f32, light_from: f32) -> Self {
        Self {
            dark_below,
            light_from,
        }
    }

    /// Classify a luma value.
    pub fn classify(&self, luma: f32) -> Lightness {
        if luma < self.dark_below {
            Lightness::Dark
        } else if luma >= self.light_from {
            Lightness::Light
        } else {
            Lightness::Neutral
        }
    }
}

impl Default for LightnessThresholds {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHTNESS_THRESHOLD, DEFAULT_LIGHTNESS_THRESHOLD)
    }
}

/// Tunable constants of the text selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    /// Lightness thresholds.
    #[serde(flatten)]
    pub thresholds: LightnessThresholds,
    /// Mix ratio toward black/white for the primary text color.
    pub primary_mix: f32,
    /// Mix ratio toward black/white for the secondary text color.
    pub secondary_mix: f32,
}

impl ContrastConfig {
    /// Check that every value is finite and in `[0, 1]`, and that the
    /// thresholds are ordered.
    pub fn validate(&self) -> ThemeResult<()> {
        let values = [
            ("dark_below", self.thresholds.dark_below),
            ("light_from", self.thresholds.light_from),
            ("primary_mix", self.primary_mix),
            ("secondary_mix", self.secondary_mix),
        ];
        for (name, value) in values {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ThemeError::invalid_config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.thresholds.dark_below > self.thresholds.light_from {
            return Err(ThemeError::invalid_config(format!(
                "dark_below ({}) must not exceed light_from ({})",
                self.thresholds.dark_below, self.thresholds.light_from
            )));
        }
        Ok(())
    }

    /// Classify a swatch with these thresholds.
    pub fn classify(&self, swatch: Swatch) -> Lightness {
        swatch.lightness(&self.thresholds)
    }
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            thresholds: LightnessThresholds::default(),
            primary_mix: DEFAULT_PRIMARY_MIX,
            secondary_mix: DEFAULT_SECONDARY_MIX,
        }
    }
}

/// The pair of text colors derived from one source swatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    /// Main text color.
    pub primary: Swatch,
    /// Lighter variant for secondary labels.
    pub secondary: Swatch,
}

/// Derive legible text colors from `source`.
///
/// Both outputs are always fully opaque.
pub fn select_text(source: Swatch, config: &ContrastConfig) -> TextColors {
    let target = match config.classify(source) {
        Lightness::Light => Swatch::black(),
        Lightness::Dark => Swatch::white(),
        Lightness::Neutral => {
            let text = source.opaque();
            return TextColors {
                primary: text,
                secondary: text,
            };
        }
    };

    TextColors {
        primary: source.mix(target, config.primary_mix).opaque(),
        secondary: source.mix(target, config.secondary_mix).opaque(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banded() -> ContrastConfig {
        ContrastConfig {
            thresholds: LightnessThresholds::new(0.3, 0.7),
            ..ContrastConfig::default()
        }
    }

    #[test]
    fn test_default_thresholds_split_at_midpoint() {
        let config = ContrastConfig::default();
        assert_eq!(config.classify(Swatch::rgb8(240, 180, 180)), Lightness::Light);
        assert_eq!(config.classify(Swatch::rgb8(80, 10, 10)), Lightness::Dark);
        assert_eq!(config.classify(Swatch::rgb8(100, 100, 100)), Lightness::Dark);
    }

    #[test]
    fn test_light_mixes_toward_black() {
        let text = select_text(Swatch::rgb8(240, 180, 180), &ContrastConfig::default());
        assert_eq!(text.primary.to_rgba8(), [48, 36, 36, 255]);
        assert_eq!(text.secondary.to_rgba8(), [72, 54, 54, 255]);
    }

    #[test]
    fn test_dark_mixes_toward_white() {
        let source = Swatch::rgb8(80, 10, 10);
        let text = select_text(source, &ContrastConfig::default());
        assert!(text.primary.luma() > source.luma());
        assert!(text.primary.luma() > text.secondary.luma());
    }

    #[test]
    fn test_neutral_is_unmodified() {
        let source = Swatch::rgba8(128, 128, 128, 64);
        let config = banded();
        assert_eq!(config.classify(source), Lightness::Neutral);

        let text = select_text(source, &config);
        assert_eq!(text.primary, source.opaque());
        assert_eq!(text.secondary, source.opaque());
    }

    #[test]
    fn test_text_is_opaque() {
        for source in [
            Swatch::rgba8(250, 250, 250, 10),
            Swatch::rgba8(5, 5, 5, 0),
            Swatch::rgba8(128, 128, 128, 200),
        ] {
            for config in [ContrastConfig::default(), banded()] {
                let text = select_text(source, &config);
                assert_eq!(text.primary.alpha(), 1.0);
                assert_eq!(text.secondary.alpha(), 1.0);
            }
        }
    }

    #[test]
    fn test_validate() {
        assert!(ContrastConfig::default().validate().is_ok());
        assert!(banded().validate().is_ok());

        let inverted = ContrastConfig {
            thresholds: LightnessThresholds::new(0.8, 0.2),
            ..ContrastConfig::default()
        };
        assert!(inverted.validate().is_err());

        let nan = ContrastConfig {
            primary_mix: f32::NAN,
            ..ContrastConfig::default()
        };
        assert!(nan.validate().is_err());
    }
}
