//! # Theme Configuration
//!
//! The derivation engine has four tunable constants, the two lightness
//! thresholds and the two text mix ratios (see [ContrastConfig]). This module
//! loads them from TOML, from the environment, or programmatically.
//!
//! ## Configuration File Format
//!
//! ```toml
//! [contrast]
//! dark_below = 0.45
//! light_from = 0.55
//! primary_mix = 0.8
//! secondary_mix = 0.7
//! ```
//!
//! Any key may be omitted; omitted keys keep their current value.
//!
//! ## Environment Variables
//!
//! - `TINTA_THEME_CONFIG`: path to a theme configuration file
//!
//! ```rust
//! use tinta_theme::config::ThemeConfig;
//!
//! let config = ThemeConfig::from_toml("[contrast]\nprimary_mix = 0.6").unwrap();
//! assert_eq!(config.contrast.primary_mix, 0.6);
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::contrast::ContrastConfig;
use crate::error::{ThemeError, ThemeResult};
use crate::theme::ThemeDeriver;

/// Environment variable naming a theme configuration file.
pub const THEME_CONFIG_ENV: &str = "TINTA_THEME_CONFIG";

/// Partial contrast settings, as read from one configuration source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContrastOverrides {
    /// Overrides [LightnessThresholds::dark_below](crate::contrast::LightnessThresholds::dark_below).
    pub dark_below: Option<f32>,
    /// Overrides [LightnessThresholds::light_from](crate::contrast::LightnessThresholds::light_from).
    pub light_from: Option<f32>,
    /// Overrides [ContrastConfig::primary_mix].
    pub primary_mix: Option<f32>,
    /// Overrides [ContrastConfig::secondary_mix].
    pub secondary_mix: Option<f32>,
}

/// Partial theme settings, as read from one configuration source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ThemeOverrides {
    /// The `[contrast]` table.
    #[serde(default)]
    pub contrast: ContrastOverrides,
}

impl ThemeOverrides {
    /// Parse overrides from TOML content.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        toml::from_str(content).map_err(|e| ThemeError::Serialization(e.to_string()))
    }

    /// Layer `other` over `self`; values set in `other` win.
    pub fn merge(&mut self, other: ThemeOverrides) {
        let ours = &mut self.contrast;
        let theirs = other.contrast;
        ours.dark_below = theirs.dark_below.or(ours.dark_below);
        ours.light_from = theirs.light_from.or(ours.light_from);
        ours.primary_mix = theirs.primary_mix.or(ours.primary_mix);
        ours.secondary_mix = theirs.secondary_mix.or(ours.secondary_mix);
    }
}

/// Resolved theme configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThemeConfig {
    /// Text selection constants.
    pub contrast: ContrastConfig,
}

impl ThemeConfig {
    /// Configuration with the default constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the contrast constants.
    pub fn with_contrast(mut self, contrast: ContrastConfig) -> Self {
        self.contrast = contrast;
        self
    }

    /// Apply overrides on top of the current values.
    pub fn apply(&mut self, overrides: &ThemeOverrides) {
        let o = &overrides.contrast;
        let c = &mut self.contrast;
        if let Some(value) = o.dark_below {
            c.thresholds.dark_below = value;
        }
        if let Some(value) = o.light_from {
            c.thresholds.light_from = value;
        }
        if let Some(value) = o.primary_mix {
            c.primary_mix = value;
        }
        if let Some(value) = o.secondary_mix {
            c.secondary_mix = value;
        }
    }

    /// Defaults with `overrides` applied, validated.
    pub fn from_overrides(overrides: &ThemeOverrides) -> ThemeResult<Self> {
        let mut config = Self::new();
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML content.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        Self::from_overrides(&ThemeOverrides::from_toml(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThemeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ThemeError::ConfigFileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let overrides = toml::from_str::<ThemeOverrides>(&content)
            .map_err(|e| ThemeError::parse_error(path, e.to_string()))?;
        Self::from_overrides(&overrides)
    }

    /// Load from the file named by `TINTA_THEME_CONFIG`, or use the defaults.
    ///
    /// A file that cannot be loaded is logged and ignored.
    pub fn from_env_or_default() -> Self {
        match env::var(THEME_CONFIG_ENV) {
            Ok(path) => match Self::from_file(&path) {
                Ok(config) => {
                    log::info!("Loaded theme config from {}", path);
                    config
                },
                Err(e) => {
                    log::warn!("Ignoring theme config {}: {}", path, e);
                    Self::new()
                },
            },
            Err(_) => Self::new(),
        }
    }

    /// Check the contrast constants.
    pub fn validate(&self) -> ThemeResult<()> {
        self.contrast.validate()
    }

    /// A deriver using this configuration.
    pub fn deriver(&self) -> ThemeResult<ThemeDeriver> {
        ThemeDeriver::new(self.contrast)
    }
}
