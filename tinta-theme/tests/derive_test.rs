use tinta_theme::contrast::{ContrastConfig, LightnessThresholds};
use tinta_theme::error::ThemeError;
use tinta_theme::palette::{Palette, SwatchRole};
use tinta_theme::swatch::Swatch;
use tinta_theme::theme::{derive_theme, ThemeDeriver};

fn full_palette() -> Palette {
    Palette::new()
        .with(SwatchRole::Vibrant, Swatch::rgb8(200, 50, 50))
        .with(SwatchRole::DarkVibrant, Swatch::rgb8(80, 10, 10))
        .with(SwatchRole::LightVibrant, Swatch::rgb8(240, 180, 180))
}

#[test]
fn test_end_to_end_example() {
    let theme = derive_theme(&full_palette()).unwrap();

    assert_eq!(theme.background().to_rgba8()[..3], [80, 10, 10]);
    assert_eq!(theme.background().alpha(), 0.75);
    assert_eq!(theme.border().to_rgba8()[..3], [240, 180, 180]);
    assert_eq!(theme.border().alpha(), 0.5);
    assert_eq!(theme.shadow().to_rgba8()[..3], [80, 10, 10]);
    assert_eq!(theme.shadow().alpha(), 1.0);
    assert_eq!(theme.sidebar_fill().to_rgba8()[..3], [200, 50, 50]);
    assert_eq!(theme.sidebar_fill().alpha(), 0.9);

    let light = Swatch::rgb8(240, 180, 180);
    assert_eq!(theme.primary_text(), light.mix(Swatch::black(), 0.8).opaque());
    assert_eq!(theme.secondary_text(), light.mix(Swatch::black(), 0.7).opaque());
    assert_eq!(theme.primary_text().to_rgba8(), [48, 36, 36, 255]);
    assert_eq!(theme.secondary_text().to_rgba8(), [72, 54, 54, 255]);
}

#[test]
fn test_end_to_end_css() {
    let theme = derive_theme(&full_palette()).unwrap();
    let css = theme.to_css_map();
    assert_eq!(css["background"], "rgba(80, 10, 10, 0.75)");
    assert_eq!(css["border"], "rgba(240, 180, 180, 0.5)");
    assert_eq!(css["shadow"], "rgb(80, 10, 10)");
    assert_eq!(css["sidebarFill"], "rgba(200, 50, 50, 0.9)");
    assert_eq!(css["primaryText"], "rgb(48, 36, 36)");
}

#[test]
fn test_missing_secondary_roles_fall_back() {
    let vibrant = Swatch::rgb8(100, 100, 100);
    let theme = derive_theme(&Palette::new().with(SwatchRole::Vibrant, vibrant)).unwrap();

    assert_eq!(theme.background(), vibrant.with_alpha(0.75));
    assert_eq!(theme.border(), vibrant.with_alpha(0.5));
    assert_eq!(theme.shadow(), vibrant.with_alpha(1.0));
    assert_eq!(theme.sidebar_fill().to_css(), "rgba(100, 100, 100, 0.9)");

    // Gray 100 is dark under the default thresholds, so text mixes toward white.
    assert_eq!(theme.primary_text(), vibrant.mix(Swatch::white(), 0.8).opaque());
    assert_eq!(theme.secondary_text(), vibrant.mix(Swatch::white(), 0.7).opaque());
}

#[test]
fn test_missing_vibrant_fails_for_every_combination() {
    let dark = Swatch::rgb8(80, 10, 10);
    let light = Swatch::rgb8(240, 180, 180);
    let palettes = [
        Palette::new(),
        Palette::new().with(SwatchRole::DarkVibrant, dark),
        Palette::new().with(SwatchRole::LightVibrant, light),
        Palette::new()
            .with(SwatchRole::DarkVibrant, dark)
            .with(SwatchRole::LightVibrant, light),
    ];

    for palette in palettes {
        match derive_theme(&palette) {
            Err(ThemeError::MissingPrimarySwatch { role }) => assert_eq!(role, SwatchRole::Vibrant),
            other => panic!("expected missing primary swatch, got {:?}", other),
        }
    }
}

#[test]
fn test_neutral_text_uses_source() {
    let deriver = ThemeDeriver::new(ContrastConfig {
        thresholds: LightnessThresholds::new(0.2, 0.9),
        ..ContrastConfig::default()
    })
    .unwrap();

    let light = Swatch::rgb8(240, 180, 180);
    let theme = deriver.derive(&full_palette()).unwrap();
    assert_eq!(theme.primary_text(), light);
    assert_eq!(theme.secondary_text(), light);
}

#[test]
fn test_derivation_is_deterministic() {
    let palette = full_palette();
    assert_eq!(derive_theme(&palette).unwrap(), derive_theme(&palette).unwrap());
}

#[test]
fn test_theme_json() {
    let theme = derive_theme(&full_palette()).unwrap();
    let json: serde_json::Value = serde_json::to_value(theme).unwrap();
    assert_eq!(json["sidebarFill"], "rgba(200, 50, 50, 0.9)");
    assert_eq!(json.as_object().unwrap().len(), 6);

    let text = theme.to_json().unwrap();
    assert!(text.contains("\"background\": \"rgba(80, 10, 10, 0.75)\""));
}
