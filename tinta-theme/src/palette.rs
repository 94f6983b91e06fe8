use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::swatch::Swatch;

/// The roles an extracted swatch can fill, in fallback priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SwatchRole {
    /// The primary vibrant color. Every themeable palette has one.
    Vibrant,
    /// A dark vibrant color.
    DarkVibrant,
    /// A light vibrant color.
    LightVibrant,
}

impl SwatchRole {
    /// The role every fallback chain ends at.
    pub const PRIMARY: Self = Self::Vibrant;

    /// All roles, in priority order.
    pub const ALL: [Self; 3] = [Self::Vibrant, Self::DarkVibrant, Self::LightVibrant];

    fn index(self) -> usize {
        match self {
            Self::Vibrant => 0,
            Self::DarkVibrant => 1,
            Self::LightVibrant => 2,
        }
    }

    /// The role's canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Vibrant => "Vibrant",
            Self::DarkVibrant => "DarkVibrant",
            Self::LightVibrant => "LightVibrant",
        }
    }
}

impl fmt::Display for SwatchRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SwatchRole {
    type Err = ThemeError;

    /// Accepts `DarkVibrant`, `dark-vibrant` and `dark_vibrant` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "vibrant" => Ok(Self::Vibrant),
            "darkvibrant" => Ok(Self::DarkVibrant),
            "lightvibrant" => Ok(Self::LightVibrant),
            _ => Err(ThemeError::UnknownRole(s.to_string())),
        }
    }
}

/// Swatches extracted from one image, keyed by role.
///
/// Any role may be missing. A palette without [SwatchRole::Vibrant] comes
/// from a failed extraction and cannot be themed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<SwatchRole, Swatch>", into = "BTreeMap<SwatchRole, Swatch>")]
pub struct Palette {
    swatches: [Option<Swatch>; 3],
}

impl Palette {
    /// An empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, role: SwatchRole, swatch: Swatch) -> Self {
        self.insert(role, swatch);
        self
    }

    /// Set the swatch for `role`, returning the previous one.
    pub fn insert(&mut self, role: SwatchRole, swatch: Swatch) -> Option<Swatch> {
        self.swatches[role.index()].replace(swatch)
    }

    /// Clear the swatch for `role`, returning it.
    pub fn remove(&mut self, role: SwatchRole) -> Option<Swatch> {
        self.swatches[role.index()].take()
    }

    /// The swatch for `role`, if extracted.
    pub fn get(&self, role: SwatchRole) -> Option<Swatch> {
        self.swatches[role.index()]
    }

    /// The primary swatch.
    pub fn primary(&self) -> Option<Swatch> {
        self.get(SwatchRole::PRIMARY)
    }

    /// Whether the palette carries its primary swatch.
    pub fn is_themeable(&self) -> bool {
        self.primary().is_some()
    }

    /// Present swatches in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (SwatchRole, Swatch)> + '_ {
        SwatchRole::ALL
            .into_iter()
            .filter_map(move |role| self.get(role).map(|swatch| (role, swatch)))
    }

    /// Number of present swatches.
    pub fn len(&self) -> usize {
        self.swatches.iter().flatten().count()
    }

    /// Whether no swatch is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<BTreeMap<SwatchRole, Swatch>> for Palette {
    fn from(map: BTreeMap<SwatchRole, Swatch>) -> Self {
        map.into_iter()
            .fold(Palette::new(), |palette, (role, swatch)| palette.with(role, swatch))
    }
}

impl From<Palette> for BTreeMap<SwatchRole, Swatch> {
    fn from(palette: Palette) -> Self {
        palette.iter().collect()
    }
}
