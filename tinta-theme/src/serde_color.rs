//! Hex string serialization for [Swatch].

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::swatch::Swatch;
use crate::util::parse_hex_color;

impl Serialize for Swatch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Swatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        parse_hex_color(&hex).map(Swatch::new).map_err(Error::custom)
    }
}

