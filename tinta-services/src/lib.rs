// SPDX-License-Identifier: MIT OR Apache-2.0
//! Services around the tinta theme engine: palette extraction, the bounded
//! theme executor, gallery state and user settings.
pub mod cache;
pub mod events;
pub mod executor;
pub mod extract;
pub mod gallery;
pub mod settings;

// Re-export commonly used types
pub use events::ThemeEvent;
pub use executor::{ExecutorOptions, ThemeExecutor, ThemeTicket};
pub use extract::{ExtractError, PaletteExtractor, QuantizeOptions, VibrantExtractor};
pub use gallery::{ApplyOutcome, Gallery, GalleryItem, ItemKey, ThemeRequest, ThemeState};
pub use settings::SettingsRegistry;
