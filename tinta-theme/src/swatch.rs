//! # Swatches
//!
//! A [Swatch] is a single sRGB color with an independent alpha channel. It is
//! the unit every other part of the engine works with: palettes map roles to
//! swatches, and a [Theme](crate::theme::Theme) is a fixed set of swatches with
//! baked-in opacities.
//!
//! Components are kept as normalized `f32` values, so alpha replacement and
//! mixing never lose precision. Renderers that want 8-bit channels or a CSS
//! string can use [Swatch::to_rgba8] and [Swatch::to_css].

use std::fmt;
use std::str::FromStr;

use peniko::Color;

use crate::contrast::{LightnessThresholds, Lightness};
use crate::error::ThemeError;
use crate::util::{component_to_u8, parse_hex_color, to_hex};

/// Luma weights for the red, green and blue channels.
const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// An sRGB color with an alpha channel.
#[derive(Debug, Clone, Copy)]
pub struct Swatch {
    color: Color,
}

impl Swatch {
    /// Wrap an existing color.
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// Create an opaque swatch from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(Color::from_rgb8(r, g, b))
    }

    /// Create a swatch from 8-bit channels, including alpha.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(Color::from_rgba8(r, g, b, a))
    }

    /// Create a swatch from normalized `[r, g, b, a]` components.
    pub fn from_components(components: [f32; 4]) -> Self {
        Self::new(Color::new(components))
    }

    /// Opaque black.
    pub fn black() -> Self {
        Self::from_components([0.0, 0.0, 0.0, 1.0])
    }

    /// Opaque white.
    pub fn white() -> Self {
        Self::from_components([1.0, 1.0, 1.0, 1.0])
    }

    /// The underlying color.
    pub fn color(self) -> Color {
        self.color
    }

    /// Normalized `[r, g, b, a]` components.
    pub fn components(self) -> [f32; 4] {
        self.color.components
    }

    /// Red channel, rounded to 8 bits.
    pub fn red(self) -> u8 {
        component_to_u8(self.color.components[0])
    }

    /// Green channel, rounded to 8 bits.
    pub fn green(self) -> u8 {
        component_to_u8(self.color.components[1])
    }

    /// Blue channel, rounded to 8 bits.
    pub fn blue(self) -> u8 {
        component_to_u8(self.color.components[2])
    }

    /// Alpha channel in `[0, 1]`.
    pub fn alpha(self) -> f32 {
        self.color.components[3]
    }

    /// All four channels rounded to 8 bits.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.color.components.map(component_to_u8)
    }

    /// Replace the alpha channel.
    ///
    /// The existing alpha is discarded, not multiplied. `alpha` is clamped into
    /// `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.color.components;
        Self::from_components([r, g, b, alpha.clamp(0.0, 1.0)])
    }

    /// The same color at full opacity.
    pub fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }

    /// Linearly interpolate every channel toward `target`.
    ///
    /// `ratio` is the share of `target` in the result: `0.0` returns `self`,
    /// `1.0` returns `target`. Values outside `[0, 1]` are clamped.
    pub fn mix(self, target: Swatch, ratio: f32) -> Self {
        let t = ratio.clamp(0.0, 1.0);
        let from = self.color.components;
        let to = target.color.components;
        let mut mixed = [0.0; 4];
        for (i, channel) in mixed.iter_mut().enumerate() {
            *channel = from[i] * (1.0 - t) + to[i] * t;
        }
        Self::from_components(mixed)
    }

    /// Perceptual lightness in `[0, 1]`, weighting the gamma-encoded channels.
    ///
    /// Alpha does not take part.
    pub fn luma(self) -> f32 {
        let c = self.color.components;
        LUMA_WEIGHTS[0] * c[0] + LUMA_WEIGHTS[1] * c[1] + LUMA_WEIGHTS[2] * c[2]
    }

    /// Classify this swatch against a pair of lightness thresholds.
    pub fn lightness(self, thresholds: &LightnessThresholds) -> Lightness {
        thresholds.classify(self.luma())
    }

    /// `#rrggbb`, or `#rrggbbaa` when translucent.
    pub fn to_hex(self) -> String {
        to_hex(self.color)
    }

    /// CSS serialization: `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(self) -> String {
        let alpha = self.alpha();
        if alpha >= 1.0 {
            format!("rgb({}, {}, {})", self.red(), self.green(), self.blue())
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.red(),
                self.green(),
                self.blue(),
                alpha
            )
        }
    }
}

/// Replace the alpha channel of `swatch` with `alpha`.
///
/// Free-function form of [Swatch::with_alpha].
pub fn with_alpha(swatch: Swatch, alpha: f32) -> Swatch {
    swatch.with_alpha(alpha)
}

impl PartialEq for Swatch {
    fn eq(&self, other: &Self) -> bool {
        self.color.components == other.color.components
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Swatch {
    type Err = ThemeError;

    /// Parse `#rrggbb` or `#rrggbbaa`; the `#` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s).map(Self::new)
    }
}

impl From<Color> for Swatch {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}

impl From<Swatch> for Color {
    fn from(swatch: Swatch) -> Self {
        swatch.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_replaces() {
        let half = Swatch::rgba8(10, 20, 30, 128);
        let themed = half.with_alpha(0.75);
        assert_eq!(themed.alpha(), 0.75);
        assert_eq!(themed.to_rgba8()[..3], [10, 20, 30]);

        // Replacing with a higher alpha must not be limited by the old one.
        assert_eq!(half.with_alpha(1.0).alpha(), 1.0);
    }

    #[test]
    fn test_with_alpha_clamps() {
        let swatch = Swatch::rgb8(1, 2, 3);
        assert_eq!(swatch.with_alpha(1.5).alpha(), 1.0);
        assert_eq!(swatch.with_alpha(-0.2).alpha(), 0.0);
    }

    #[test]
    fn test_mix_endpoints() {
        let red = Swatch::rgb8(255, 0, 0);
        assert_eq!(red.mix(Swatch::black(), 0.0), red);
        assert_eq!(red.mix(Swatch::black(), 1.0), Swatch::black());
    }

    #[test]
    fn test_mix_toward_black() {
        let mixed = Swatch::rgb8(240, 180, 180).mix(Swatch::black(), 0.8);
        assert_eq!(mixed.to_rgba8(), [48, 36, 36, 255]);
    }

    #[test]
    fn test_mix_toward_white() {
        let mixed = Swatch::rgb8(80, 10, 10).mix(Swatch::white(), 0.7);
        // 80 * 0.3 + 255 * 0.7 = 202.5
        let [r, g, b, a] = mixed.to_rgba8();
        assert!((202..=203).contains(&r));
        assert!((181..=182).contains(&g));
        assert_eq!(g, b);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_luma_extremes() {
        assert!(Swatch::black().luma().abs() < 1e-6);
        assert!((Swatch::white().luma() - 1.0).abs() < 1e-5);
        assert!(Swatch::rgb8(0, 255, 0).luma() > Swatch::rgb8(255, 0, 0).luma());
    }

    #[test]
    fn test_css() {
        assert_eq!(Swatch::rgb8(80, 10, 10).to_css(), "rgb(80, 10, 10)");
        assert_eq!(
            Swatch::rgb8(80, 10, 10).with_alpha(0.75).to_string(),
            "rgba(80, 10, 10, 0.75)"
        );
    }

    #[test]
    fn test_parse() {
        let swatch: Swatch = "#c83232".parse().unwrap();
        assert_eq!(swatch, Swatch::rgb8(200, 50, 50));
        assert!("nope".parse::<Swatch>().is_err());
    }
}
