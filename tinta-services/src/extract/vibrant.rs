//! Built-in vibrant palette extractor.
//!
//! Pixels are bucketed into a 5-bit-per-channel histogram, the most populated
//! buckets become candidate swatches, and each role picks the candidate whose
//! HSL saturation and lightness sit closest to the role's target. Roles left
//! empty are then filled from a picked one by moving it to the role's target
//! lightness.

use std::path::Path;

use async_trait::async_trait;
use image::{DynamicImage, RgbaImage};
use serde::Deserialize;
use tinta_theme::palette::{Palette, SwatchRole};
use tinta_theme::swatch::Swatch;

use super::{ExtractError, PaletteExtractor};

const CHANNEL_BITS: u32 = 5;
const CHANNEL_SHIFT: u32 = 8 - CHANNEL_BITS;
const BUCKET_COUNT: usize = 1 << (CHANNEL_BITS * 3);

/// Pixels with less alpha than this are skipped.
const MIN_ALPHA: u8 = 125;
/// Pixels with every channel above this are skipped as near-white.
const NEAR_WHITE: u8 = 250;

const WEIGHT_SATURATION: f32 = 3.0;
const WEIGHT_LIGHTNESS: f32 = 6.5;
const WEIGHT_POPULATION: f32 = 0.5;

/// Quantization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuantizeOptions {
    /// Maximum number of candidate colors kept after quantization.
    pub color_count: usize,
    /// Sample every n-th pixel; `1` samples all of them.
    pub quality: u32,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            color_count: 256,
            quality: 1,
        }
    }
}

/// Saturation and lightness window a role accepts, with its ideal point.
#[derive(Debug, Clone, Copy)]
struct RoleTarget {
    role: SwatchRole,
    min_lightness: f32,
    target_lightness: f32,
    max_lightness: f32,
    min_saturation: f32,
    target_saturation: f32,
}

const TARGETS: [RoleTarget; 3] = [
    RoleTarget {
        role: SwatchRole::Vibrant,
        min_lightness: 0.3,
        target_lightness: 0.5,
        max_lightness: 0.7,
        min_saturation: 0.35,
        target_saturation: 1.0,
    },
    RoleTarget {
        role: SwatchRole::DarkVibrant,
        min_lightness: 0.0,
        target_lightness: 0.26,
        max_lightness: 0.45,
        min_saturation: 0.35,
        target_saturation: 1.0,
    },
    RoleTarget {
        role: SwatchRole::LightVibrant,
        min_lightness: 0.55,
        target_lightness: 0.74,
        max_lightness: 1.0,
        min_saturation: 0.35,
        target_saturation: 1.0,
    },
];

/// One quantized color and how many sampled pixels fell into it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    rgb: [u8; 3],
    population: u32,
    saturation: f32,
    lightness: f32,
}

impl Candidate {
    fn new(rgb: [u8; 3], population: u32) -> Self {
        let (_, saturation, lightness) = rgb_to_hsl(rgb);
        Self {
            rgb,
            population,
            saturation,
            lightness,
        }
    }

    fn fits(&self, target: &RoleTarget) -> bool {
        (target.min_lightness..=target.max_lightness).contains(&self.lightness)
            && self.saturation >= target.min_saturation
    }

    fn score(&self, target: &RoleTarget, max_population: u32) -> f32 {
        let saturation = 1.0 - (self.saturation - target.target_saturation).abs();
        let lightness = 1.0 - (self.lightness - target.target_lightness).abs();
        let population = if max_population == 0 {
            0.0
        } else {
            self.population as f32 / max_population as f32
        };
        (saturation * WEIGHT_SATURATION
            + lightness * WEIGHT_LIGHTNESS
            + population * WEIGHT_POPULATION)
            / (WEIGHT_SATURATION + WEIGHT_LIGHTNESS + WEIGHT_POPULATION)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    count: u32,
    sum: [u64; 3],
}

/// Extracts palettes by histogram quantization on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct VibrantExtractor {
    options: QuantizeOptions,
}

impl VibrantExtractor {
    /// Create an extractor with the given quantization settings.
    pub fn new(options: QuantizeOptions) -> Self {
        Self { options }
    }

    /// The quantization settings.
    pub fn options(&self) -> QuantizeOptions {
        self.options
    }
}

#[async_trait]
impl PaletteExtractor for VibrantExtractor {
    async fn extract(&self, image: &Path) -> Result<Palette, ExtractError> {
        let path = image.to_path_buf();
        let options = self.options;

        tokio::task::spawn_blocking(move || {
            log::debug!("Decoding {:?} for palette extraction", path);
            let decoded = image::open(&path)?;
            palette_from_image(&decoded, &options)
        })
        .await?
    }
}

/// Extract a palette from decoded image data.
pub fn palette_from_image(
    image: &DynamicImage,
    options: &QuantizeOptions,
) -> Result<Palette, ExtractError> {
    let candidates = quantize(&image.to_rgba8(), options);
    if candidates.is_empty() {
        return Err(ExtractError::NoPixels);
    }
    Ok(generate(&candidates))
}

fn quantize(pixels: &RgbaImage, options: &QuantizeOptions) -> Vec<Candidate> {
    let mut buckets = vec![Bucket::default(); BUCKET_COUNT];
    let step = options.quality.max(1) as usize;

    for pixel in pixels.pixels().step_by(step) {
        let [r, g, b, a] = pixel.0;
        if a < MIN_ALPHA || (r > NEAR_WHITE && g > NEAR_WHITE && b > NEAR_WHITE) {
            continue;
        }
        let index = ((r as usize >> CHANNEL_SHIFT) << (2 * CHANNEL_BITS))
            | ((g as usize >> CHANNEL_SHIFT) << CHANNEL_BITS)
            | (b as usize >> CHANNEL_SHIFT);
        let bucket = &mut buckets[index];
        bucket.count += 1;
        bucket.sum[0] += r as u64;
        bucket.sum[1] += g as u64;
        bucket.sum[2] += b as u64;
    }

    let mut candidates: Vec<Candidate> = buckets
        .into_iter()
        .filter(|bucket| bucket.count > 0)
        .map(|bucket| {
            let count = bucket.count as u64;
            let average = bucket.sum.map(|sum| ((sum + count / 2) / count) as u8);
            Candidate::new(average, bucket.count)
        })
        .collect();

    candidates.sort_by(|a, b| b.population.cmp(&a.population));
    candidates.truncate(options.color_count.max(1));
    candidates
}

fn generate(candidates: &[Candidate]) -> Palette {
    let max_population = candidates.iter().map(|c| c.population).max().unwrap_or(0);
    let mut used = vec![false; candidates.len()];
    let mut palette = Palette::new();

    for target in &TARGETS {
        let best = candidates
            .iter()
            .enumerate()
            .filter(|(i, candidate)| !used[*i] && candidate.fits(target))
            .map(|(i, candidate)| (i, candidate.score(target, max_population)))
            .max_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((index, _)) = best {
            used[index] = true;
            let [r, g, b] = candidates[index].rgb;
            palette.insert(target.role, Swatch::rgb8(r, g, b));
        }
    }

    fill_empty(&mut palette);
    palette
}

fn target_lightness(role: SwatchRole) -> f32 {
    TARGETS
        .iter()
        .find(|target| target.role == role)
        .map_or(0.5, |target| target.target_lightness)
}

/// The same hue and saturation at the target lightness of `role`.
fn relit(swatch: Swatch, role: SwatchRole) -> Swatch {
    let (hue, saturation, _) = rgb_to_hsl([swatch.red(), swatch.green(), swatch.blue()]);
    let [r, g, b] = hsl_to_rgb(hue, saturation, target_lightness(role));
    Swatch::rgb8(r, g, b)
}

/// Derive missing roles from the ones quantization found.
///
/// Vibrant comes from DarkVibrant, or else LightVibrant. The dark and light
/// roles then come from Vibrant.
fn fill_empty(palette: &mut Palette) {
    if palette.get(SwatchRole::Vibrant).is_none() {
        let source = palette
            .get(SwatchRole::DarkVibrant)
            .or_else(|| palette.get(SwatchRole::LightVibrant));
        if let Some(source) = source {
            palette.insert(SwatchRole::Vibrant, relit(source, SwatchRole::Vibrant));
        }
    }

    let Some(vibrant) = palette.get(SwatchRole::Vibrant) else {
        return;
    };
    for role in [SwatchRole::DarkVibrant, SwatchRole::LightVibrant] {
        if palette.get(role).is_none() {
            palette.insert(role, relit(vibrant, role));
        }
    }
}

/// Convert 8-bit RGB to `(hue, saturation, lightness)`, each in `[0, 1]`.
fn rgb_to_hsl(rgb: [u8; 3]) -> (f32, f32, f32) {
    let [r, g, b] = rgb.map(|c| c as f32 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, lightness);
    }

    let delta = max - min;
    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };
    let hue = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (hue / 6.0, saturation, lightness)
}

/// Convert `(hue, saturation, lightness)` in `[0, 1]` back to 8-bit RGB.
fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    if saturation == 0.0 {
        let v = (lightness * 255.0).round() as u8;
        return [v, v, v];
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;
    [hue + 1.0 / 3.0, hue, hue - 1.0 / 3.0]
        .map(|t| (hue_to_channel(p, q, t) * 255.0).round() as u8)
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
