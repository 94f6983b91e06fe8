// SPDX-License-Identifier: MIT OR Apache-2.0
use anyhow::{Context, Result};
use serde::Deserialize;
use smol::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tinta_theme::config::{ThemeConfig, ThemeOverrides, THEME_CONFIG_ENV};
use xdg::BaseDirectories;

use crate::executor::ExecutorOptions;
use crate::extract::QuantizeOptions;

/// The main configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,
    /// Extraction scheduling and quantization
    #[serde(default)]
    pub extraction: ExtractionSettings,
    /// Theme derivation constants
    #[serde(default)]
    pub theme: ThemeOverrides,
}

/// `[general]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeneralSettings {
    /// Log filter, e.g. `info` or `tinta_services=debug`.
    pub log_level: Option<String>,
}

/// `[extraction]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractionSettings {
    /// Maximum number of extractions running at once.
    pub max_concurrent: Option<usize>,
    /// Time allowed for one extraction, in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Candidate colors kept after quantization.
    pub color_count: Option<usize>,
    /// Pixel sampling step.
    pub quality: Option<u32>,
    /// Palettes kept in the cache.
    pub cache_capacity: Option<usize>,
}

impl Config {
    /// Parse a configuration from TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid tinta configuration")
    }
}

/// Registry for managing application settings.
///
/// Loading happens before logging is set up, so every file read is recorded
/// and can be reported later with [SettingsRegistry::log_sources].
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    config: Config,
    sources: Vec<PathBuf>,
    skipped: Vec<(PathBuf, String)>,
}

impl SettingsRegistry {
    /// A registry holding only the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry and load configuration from standard locations.
    pub async fn load_default() -> Result<Self> {
        let mut registry = Self::new();
        registry.load().await?;
        Ok(registry)
    }

    /// Load configuration from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/tinta/config.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/tinta/config.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/tinta/config.toml (XDG_CONFIG_HOME)
    /// 4. `theme.toml` from the same locations, then `TINTA_THEME_CONFIG`
    pub async fn load(&mut self) -> Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix("tinta")?;

        for path in Self::candidate_paths(&xdg_dirs, "config.toml") {
            self.load_file(&path).await;
        }

        for path in Self::candidate_paths(&xdg_dirs, "theme.toml") {
            self.load_theme_file(&path).await;
        }

        if let Ok(path) = std::env::var(THEME_CONFIG_ENV) {
            self.load_theme_file(Path::new(&path)).await;
        }

        Ok(())
    }

    fn candidate_paths(xdg_dirs: &BaseDirectories, filename: &str) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = xdg_dirs.find_data_files(filename).collect();
        paths.reverse();

        let mut config_paths: Vec<PathBuf> = xdg_dirs.find_config_files(filename).collect();
        config_paths.reverse();
        paths.extend(config_paths);

        let user_config_path = xdg_dirs.get_config_home().join(filename);
        if user_config_path.exists() && !paths.contains(&user_config_path) {
            paths.push(user_config_path);
        }
        paths
    }

    /// Load a standalone theme file (top-level `[contrast]` table).
    pub async fn load_theme_file(&mut self, path: &Path) {
        log::debug!("Loading theme config from: {:?}", path);
        let loaded = match fs::read_to_string(path).await {
            Ok(content) => ThemeOverrides::from_toml(&content)
                .map(|overrides| self.config.theme.merge(overrides))
                .map_err(|e| format!("failed to parse theme config: {}", e)),
            Err(e) => Err(format!("failed to read theme config: {}", e)),
        };
        self.record(path, loaded);
    }

    /// Load one configuration file, recording instead of failing.
    pub async fn load_file(&mut self, path: &Path) {
        log::debug!("Loading config from: {:?}", path);
        let loaded = match fs::read_to_string(path).await {
            Ok(content) => Config::from_toml(&content)
                .map(|loaded_config| self.merge(loaded_config))
                .map_err(|e| format!("failed to parse config file: {:#}", e)),
            Err(e) => Err(format!("failed to read config file: {}", e)),
        };
        self.record(path, loaded);
    }

    fn record(&mut self, path: &Path, loaded: std::result::Result<(), String>) {
        match loaded {
            Ok(()) => self.sources.push(path.to_path_buf()),
            Err(reason) => self.skipped.push((path.to_path_buf(), reason)),
        }
    }

    /// Files merged into the configuration, in load order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Files that could not be read or parsed, with the reason.
    pub fn skipped(&self) -> &[(PathBuf, String)] {
        &self.skipped
    }

    /// Log the loaded and skipped files.
    pub fn log_sources(&self) {
        for path in &self.sources {
            log::info!("Loaded settings from {:?}", path);
        }
        for (path, reason) in &self.skipped {
            log::warn!("Skipped settings file {:?}: {}", path, reason);
        }
    }

    /// Load configuration from multiple custom paths asynchronously.
    pub async fn load_from_paths_async(&mut self, paths: Vec<PathBuf>) -> Vec<Result<()>> {
        let mut results = Vec::new();

        for path in paths {
            let result = async {
                let content = fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read config file {:?}", path))?;
                let loaded_config = Config::from_toml(&content)
                    .with_context(|| format!("Failed to parse config file {:?}", path))?;
                self.merge(loaded_config);
                Ok(())
            }
            .await;

            results.push(result);
        }

        results
    }

    /// Merge a loaded config into the current config.
    ///
    /// Every value set in `other` replaces the current one.
    pub fn merge(&mut self, other: Config) {
        let general = &mut self.config.general;
        if other.general.log_level.is_some() {
            general.log_level = other.general.log_level;
        }

        let ours = &mut self.config.extraction;
        let theirs = other.extraction;
        ours.max_concurrent = theirs.max_concurrent.or(ours.max_concurrent);
        ours.timeout_ms = theirs.timeout_ms.or(ours.timeout_ms);
        ours.color_count = theirs.color_count.or(ours.color_count);
        ours.quality = theirs.quality.or(ours.quality);
        ours.cache_capacity = theirs.cache_capacity.or(ours.cache_capacity);

        self.config.theme.merge(other.theme);
    }

    /// Get the current configuration.
    pub fn get(&self) -> &Config {
        &self.config
    }

    /// The configured log filter, if any.
    pub fn log_level(&self) -> Option<&str> {
        self.config.general.log_level.as_deref()
    }

    /// Executor limits, with defaults for unset values.
    pub fn executor_options(&self) -> ExecutorOptions {
        let defaults = ExecutorOptions::default();
        let extraction = &self.config.extraction;
        ExecutorOptions {
            max_concurrent: extraction.max_concurrent.unwrap_or(defaults.max_concurrent),
            timeout: extraction
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            cache_capacity: extraction.cache_capacity.unwrap_or(defaults.cache_capacity),
        }
    }

    /// Quantization settings, with defaults for unset values.
    pub fn quantize_options(&self) -> QuantizeOptions {
        let defaults = QuantizeOptions::default();
        let extraction = &self.config.extraction;
        QuantizeOptions {
            color_count: extraction.color_count.unwrap_or(defaults.color_count),
            quality: extraction.quality.unwrap_or(defaults.quality),
        }
    }

    /// The validated theme configuration.
    pub fn theme_config(&self) -> Result<ThemeConfig> {
        ThemeConfig::from_overrides(&self.config.theme).context("invalid [theme] settings")
    }
}
