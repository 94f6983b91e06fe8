// SPDX-License-Identifier: MIT OR Apache-2.0
//! Gallery state.
//!
//! [Gallery] is a plain reducer: it hands out [ThemeRequest]s when items are
//! added or refreshed and folds the resulting [ThemeEvent]s back in. Each
//! request carries a generation; an event whose generation no longer matches
//! its item, or whose item was removed, is discarded as stale. An item's theme
//! is only ever replaced whole.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tinta_theme::theme::Theme;

use crate::events::ThemeEvent;

/// Identity of one gallery item: its image plus its display index.
///
/// The key labels the item and guards against stale results; it plays no part
/// in theme derivation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    /// The image shown by the item.
    pub image: PathBuf,
    /// Ordinal position at insertion time.
    pub index: usize,
}

impl ItemKey {
    /// Create a key.
    pub fn new(image: impl Into<PathBuf>, index: usize) -> Self {
        Self {
            image: image.into(),
            index,
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index, self.image.display())
    }
}

/// A request to theme one item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeRequest {
    /// The item to theme.
    pub key: ItemKey,
    /// Generation the result must match to be applied.
    pub generation: u64,
    /// Extract again even if a palette for the image is cached.
    pub fresh: bool,
}

impl ThemeRequest {
    /// The image to extract from.
    pub fn image(&self) -> &Path {
        &self.key.image
    }
}

/// Theme state of one item.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeState {
    /// Extraction has not resolved yet.
    Pending,
    /// A theme was derived.
    Themed(Theme),
    /// Extraction or derivation failed; render with default styling.
    Untinted(String),
}

impl ThemeState {
    /// The theme, if any.
    pub fn theme(&self) -> Option<&Theme> {
        match self {
            Self::Themed(theme) => Some(theme),
            _ => None,
        }
    }

    /// Whether the item is still waiting for its first result.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// One item of the gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    key: ItemKey,
    generation: u64,
    state: ThemeState,
}

impl GalleryItem {
    /// The item's key.
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    /// Generation of the latest request for this item.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current theme state.
    pub fn state(&self) -> &ThemeState {
        &self.state
    }
}

/// What [Gallery::apply] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The item's state was replaced.
    Applied,
    /// The item is gone or was re-requested; the event was discarded.
    Stale,
}

/// Ordered collection of themed items.
#[derive(Debug, Default)]
pub struct Gallery {
    items: IndexMap<ItemKey, GalleryItem>,
    next_index: usize,
    next_generation: u64,
}

impl Gallery {
    /// Create an empty gallery.
    pub fn new() -> Self {
        Self::default()
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Add an image and return the request that themes it.
    pub fn push(&mut self, image: impl Into<PathBuf>) -> ThemeRequest {
        let key = ItemKey::new(image, self.next_index);
        self.next_index += 1;
        let generation = self.bump_generation();

        self.items.insert(
            key.clone(),
            GalleryItem {
                key: key.clone(),
                generation,
                state: ThemeState::Pending,
            },
        );
        ThemeRequest {
            key,
            generation,
            fresh: false,
        }
    }

    /// Re-request the theme of an existing item.
    ///
    /// The image is extracted again rather than served from the palette
    /// cache. The current state stays visible until the new result is
    /// applied; results of earlier requests become stale.
    pub fn refresh(&mut self, key: &ItemKey) -> Option<ThemeRequest> {
        if !self.items.contains_key(key) {
            return None;
        }
        let generation = self.bump_generation();
        let item = self.items.get_mut(key)?;
        item.generation = generation;
        Some(ThemeRequest {
            key: key.clone(),
            generation,
            fresh: true,
        })
    }

    /// Remove an item. Results still in flight for it will be discarded.
    pub fn remove(&mut self, key: &ItemKey) -> Option<GalleryItem> {
        self.items.shift_remove(key)
    }

    /// Fold a theme event into the gallery.
    pub fn apply(&mut self, event: ThemeEvent) -> ApplyOutcome {
        let Some(item) = self.items.get_mut(event.key()) else {
            log::debug!("Discarding result for removed item {}", event.key());
            return ApplyOutcome::Stale;
        };
        if item.generation != event.generation() {
            log::debug!(
                "Discarding stale result for {} (generation {}, current {})",
                item.key,
                event.generation(),
                item.generation
            );
            return ApplyOutcome::Stale;
        }

        item.state = match event {
            ThemeEvent::ThemeReady { theme, .. } => ThemeState::Themed(theme),
            ThemeEvent::ThemeFailed { error, .. } => {
                log::warn!("Rendering {} untinted: {}", item.key, error);
                ThemeState::Untinted(error)
            },
        };
        ApplyOutcome::Applied
    }

    /// Look an item up.
    pub fn get(&self, key: &ItemKey) -> Option<&GalleryItem> {
        self.items.get(key)
    }

    /// Items in display order.
    pub fn items(&self) -> impl Iterator<Item = &GalleryItem> {
        self.items.values()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the gallery has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items still waiting for their first result.
    pub fn pending_count(&self) -> usize {
        self.items().filter(|item| item.state.is_pending()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinta_theme::palette::{Palette, SwatchRole};
    use tinta_theme::swatch::Swatch;
    use tinta_theme::theme::derive_theme;

    fn theme(r: u8) -> Theme {
        derive_theme(&Palette::new().with(SwatchRole::Vibrant, Swatch::rgb8(r, 40, 40))).unwrap()
    }

    fn ready(request: &ThemeRequest, r: u8) -> ThemeEvent {
        ThemeEvent::ThemeReady {
            key: request.key.clone(),
            generation: request.generation,
            theme: theme(r),
        }
    }

    #[test]
    fn test_push_assigns_indices() {
        let mut gallery = Gallery::new();
        let a = gallery.push("a.jpg");
        let b = gallery.push("b.jpg");
        assert_eq!(a.key.index, 0);
        assert_eq!(b.key.index, 1);
        assert_ne!(a.generation, b.generation);
        assert_eq!(gallery.pending_count(), 2);
    }

    #[test]
    fn test_apply_ready() {
        let mut gallery = Gallery::new();
        let request = gallery.push("a.jpg");
        assert_eq!(gallery.apply(ready(&request, 200)), ApplyOutcome::Applied);
        let item = gallery.get(&request.key).unwrap();
        assert_eq!(item.state().theme(), Some(&theme(200)));
    }

    #[test]
    fn test_failure_leaves_item_untinted() {
        let mut gallery = Gallery::new();
        let request = gallery.push("a.jpg");
        let outcome = gallery.apply(ThemeEvent::ThemeFailed {
            key: request.key.clone(),
            generation: request.generation,
            error: "decode failed".to_string(),
        });
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(
            gallery.get(&request.key).unwrap().state(),
            &ThemeState::Untinted("decode failed".to_string())
        );
    }

    #[test]
    fn test_removed_item_discards_result() {
        let mut gallery = Gallery::new();
        let request = gallery.push("a.jpg");
        gallery.remove(&request.key);
        assert_eq!(gallery.apply(ready(&request, 200)), ApplyOutcome::Stale);
        assert!(gallery.is_empty());
    }

    #[test]
    fn test_refresh_makes_old_results_stale() {
        let mut gallery = Gallery::new();
        let first = gallery.push("a.jpg");
        assert_eq!(gallery.apply(ready(&first, 100)), ApplyOutcome::Applied);

        let second = gallery.refresh(&first.key).unwrap();
        // The previous theme stays until the new one lands.
        assert_eq!(gallery.get(&first.key).unwrap().state().theme(), Some(&theme(100)));
        assert!(!first.fresh);
        assert!(second.fresh);

        assert_eq!(gallery.apply(ready(&first, 150)), ApplyOutcome::Stale);
        assert_eq!(gallery.apply(ready(&second, 250)), ApplyOutcome::Applied);
        assert_eq!(gallery.get(&first.key).unwrap().state().theme(), Some(&theme(250)));
    }

    #[test]
    fn test_refresh_unknown_key() {
        let mut gallery = Gallery::new();
        assert!(gallery.refresh(&ItemKey::new("missing.jpg", 7)).is_none());
    }
}
