//! Fallback resolution of palette roles.

use crate::error::{ThemeError, ThemeResult};
use crate::palette::{Palette, SwatchRole};
use crate::swatch::Swatch;

/// Resolve the swatch for `preferred`, falling back to the primary swatch.
///
/// The primary swatch must be present even when `preferred` is: a palette
/// without it is the product of a failed extraction, and is rejected with
/// [ThemeError::MissingPrimarySwatch].
pub fn resolve(palette: &Palette, preferred: SwatchRole) -> ThemeResult<Swatch> {
    let primary = palette.primary().ok_or_else(ThemeError::missing_primary)?;
    Ok(palette.get(preferred).unwrap_or(primary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vibrant() -> Swatch {
        Swatch::rgb8(200, 50, 50)
    }

    #[test]
    fn test_present_role_wins() {
        let dark = Swatch::rgb8(80, 10, 10);
        let palette = Palette::new()
            .with(SwatchRole::Vibrant, vibrant())
            .with(SwatchRole::DarkVibrant, dark);
        assert_eq!(resolve(&palette, SwatchRole::DarkVibrant).unwrap(), dark);
    }

    #[test]
    fn test_absent_role_falls_back_to_vibrant() {
        let palette = Palette::new()
            .with(SwatchRole::Vibrant, vibrant())
            .with(SwatchRole::DarkVibrant, Swatch::rgb8(80, 10, 10));
        assert_eq!(resolve(&palette, SwatchRole::LightVibrant).unwrap(), vibrant());
    }

    #[test]
    fn test_missing_primary_is_fatal() {
        let palette = Palette::new()
            .with(SwatchRole::DarkVibrant, Swatch::rgb8(80, 10, 10))
            .with(SwatchRole::LightVibrant, Swatch::rgb8(240, 180, 180));
        for role in SwatchRole::ALL {
            let err = resolve(&palette, role).unwrap_err();
            assert!(err.is_input_error());
        }
    }
}
