//! Event system for theme notifications.

use tinta_theme::theme::Theme;
use tokio::sync::broadcast;

use crate::gallery::ItemKey;

/// Buffered events per subscriber before it starts lagging.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Events emitted by the theme executor.
#[derive(Debug, Clone)]
pub enum ThemeEvent {
    /// A palette was extracted and a theme derived from it.
    ThemeReady {
        /// The item the request was made for.
        key: ItemKey,
        /// Generation of the request.
        generation: u64,
        /// The derived theme.
        theme: Theme,
    },
    /// Extraction or derivation failed; the item stays untinted.
    ThemeFailed {
        /// The item the request was made for.
        key: ItemKey,
        /// Generation of the request.
        generation: u64,
        /// Error that occurred.
        error: String,
    },
}

impl ThemeEvent {
    /// The item this event belongs to.
    pub fn key(&self) -> &ItemKey {
        match self {
            Self::ThemeReady { key, .. } | Self::ThemeFailed { key, .. } => key,
        }
    }

    /// Generation of the request that produced this event.
    pub fn generation(&self) -> u64 {
        match self {
            Self::ThemeReady { generation, .. } | Self::ThemeFailed { generation, .. } => {
                *generation
            },
        }
    }

    /// The theme, if the request succeeded.
    pub fn theme(&self) -> Option<&Theme> {
        match self {
            Self::ThemeReady { theme, .. } => Some(theme),
            Self::ThemeFailed { .. } => None,
        }
    }
}

/// Create a new broadcast channel for theme events.
pub fn create_theme_event_channel() -> broadcast::Sender<ThemeEvent> {
    broadcast::channel(EVENT_CHANNEL_CAPACITY).0
}
