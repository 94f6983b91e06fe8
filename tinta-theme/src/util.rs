//! Shared utility functions for color parsing and formatting.

use peniko::Color;

use crate::error::{ThemeError, ThemeResult};

/// Parse a hex color string with optional alpha channel.
///
/// Supports both RGB and RGBA formats:
/// - `#rrggbb` - 6 characters, opaque
/// - `#rrggbbaa` - 8 characters, with alpha channel (0-255)
///
/// The leading `#` is optional.
pub fn parse_hex_color(hex: &str) -> ThemeResult<Color> {
    let digits = hex.trim().trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| ThemeError::InvalidColor(hex.to_string()))
    };

    match digits.len() {
        6 => Ok(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => Ok(Color::from_rgba8(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => Err(ThemeError::InvalidColor(format!(
            "Hex color must be 6 or 8 characters: {}",
            hex
        ))),
    }
}

/// Convert a normalized component into an 8-bit channel.
pub fn component_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Format a color as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
pub fn to_hex(color: Color) -> String {
    let [r, g, b, a] = color.components.map(component_to_u8);
    if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}
