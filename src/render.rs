//! Text renderings of a themed gallery.
//!
//! Each item is drawn as four nested boxes: the padded outer container, the
//! bordered frame, the sidebar and the caption. [item_rules] maps a theme onto
//! the declarations of those boxes; items without a theme get no declarations
//! and fall back to the stylesheet's defaults.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde_json::{json, Value};
use tinta_services::gallery::{Gallery, GalleryItem, ThemeState};
use tinta_theme::palette::{Palette, SwatchRole};
use tinta_theme::theme::Theme;

/// One CSS rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Selector the declarations apply to.
    pub selector: String,
    /// Property and value pairs, in output order.
    pub declarations: IndexMap<&'static str, String>,
}

impl Rule {
    fn new(selector: String) -> Self {
        Self {
            selector,
            declarations: IndexMap::new(),
        }
    }

    fn with(mut self, property: &'static str, value: String) -> Self {
        self.declarations.insert(property, value);
        self
    }

    /// Write the rule as CSS.
    pub fn to_css(&self) -> String {
        let mut out = format!("{} {{\n", self.selector);
        for (property, value) in &self.declarations {
            let _ = writeln!(out, "  {}: {};", property, value);
        }
        out.push('}');
        out
    }
}

/// Rules for the container of item `index`.
pub fn item_rules(index: usize, theme: &Theme) -> Vec<Rule> {
    let root = format!(".item-{}", index);
    vec![
        Rule::new(root.clone())
            .with("background-color", theme.background().to_css())
            .with("color", theme.primary_text().to_css()),
        Rule::new(format!("{} .frame", root))
            .with("border", format!(".2vmin solid {}", theme.border().to_css()))
            .with("box-shadow", format!("0 0 1vmin 0 {}", theme.shadow().to_css())),
        Rule::new(format!("{} .sidebar", root))
            .with("background-color", theme.sidebar_fill().to_css()),
        Rule::new(format!("{} .caption", root))
            .with("color", theme.secondary_text().to_css()),
    ]
}

/// CSS for one gallery item, headed by a comment naming it.
pub fn item_css(item: &GalleryItem) -> String {
    let key = item.key();
    match item.state() {
        ThemeState::Themed(theme) => {
            let mut out = format!("/* {} */\n", key);
            let rules: Vec<String> = item_rules(key.index, theme)
                .iter()
                .map(Rule::to_css)
                .collect();
            out.push_str(&rules.join("\n"));
            out
        },
        ThemeState::Untinted(reason) => format!("/* {} untinted: {} */", key, reason),
        ThemeState::Pending => format!("/* {} pending */", key),
    }
}

/// CSS for every item, in display order.
pub fn gallery_css(gallery: &Gallery) -> String {
    gallery
        .items()
        .map(item_css)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// JSON description of one item.
pub fn item_json(item: &GalleryItem) -> Value {
    let key = item.key();
    let mut value = json!({
        "index": key.index,
        "image": key.image.display().to_string(),
    });
    let (state, extra) = match item.state() {
        ThemeState::Themed(theme) => ("themed", Some(("theme", json!(theme)))),
        ThemeState::Untinted(reason) => ("untinted", Some(("reason", json!(reason)))),
        ThemeState::Pending => ("pending", None),
    };
    value["state"] = json!(state);
    if let Some((name, extra)) = extra {
        value[name] = extra;
    }
    value
}

/// JSON array describing every item, in display order.
pub fn gallery_json(gallery: &Gallery) -> Value {
    Value::Array(gallery.items().map(item_json).collect())
}

/// Theme fields as `key: value` lines.
pub fn theme_text(theme: &Theme) -> String {
    theme
        .to_css_map()
        .iter()
        .map(|(key, value)| format!("{:<14} {}", format!("{}:", key), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Palette swatches as `role hex` lines; missing roles are marked.
pub fn palette_text(palette: &Palette) -> String {
    SwatchRole::ALL
        .iter()
        .map(|role| match palette.get(*role) {
            Some(swatch) => format!("{:<13} {}", role.name(), swatch.to_hex()),
            None => format!("{:<13} -", role.name()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinta_services::events::ThemeEvent;
    use tinta_theme::swatch::Swatch;
    use tinta_theme::theme::derive_theme;

    fn palette() -> Palette {
        Palette::new()
            .with(SwatchRole::Vibrant, Swatch::rgb8(200, 50, 50))
            .with(SwatchRole::DarkVibrant, Swatch::rgb8(80, 10, 10))
            .with(SwatchRole::LightVibrant, Swatch::rgb8(240, 180, 180))
    }

    #[test]
    fn test_item_rules() {
        let theme = derive_theme(&palette()).unwrap();
        let rules = item_rules(3, &theme);
        assert_eq!(rules.len(), 4);
        assert_eq!(rules[0].selector, ".item-3");
        assert_eq!(rules[0].declarations["background-color"], "rgba(80, 10, 10, 0.75)");
        assert_eq!(
            rules[1].declarations["box-shadow"],
            "0 0 1vmin 0 rgb(80, 10, 10)"
        );
        assert_eq!(rules[2].declarations["background-color"], "rgba(200, 50, 50, 0.9)");
        assert!(rules[3].to_css().starts_with(".item-3 .caption {\n  color: rgb("));
    }

    #[test]
    fn test_gallery_rendering() {
        let mut gallery = Gallery::new();
        let themed = gallery.push("a.jpg");
        let failed = gallery.push("b.jpg");
        gallery.push("c.jpg");

        gallery.apply(ThemeEvent::ThemeReady {
            key: themed.key.clone(),
            generation: themed.generation,
            theme: derive_theme(&palette()).unwrap(),
        });
        gallery.apply(ThemeEvent::ThemeFailed {
            key: failed.key.clone(),
            generation: failed.generation,
            error: "no vibrant swatch".to_string(),
        });

        let css = gallery_css(&gallery);
        assert!(css.starts_with("/* #0 a.jpg */\n.item-0 {"));
        assert!(css.contains("/* #1 b.jpg untinted: no vibrant swatch */"));
        assert!(css.ends_with("/* #2 c.jpg pending */"));

        let json = gallery_json(&gallery);
        assert_eq!(json[0]["state"], "themed");
        assert_eq!(json[0]["theme"]["background"], "rgba(80, 10, 10, 0.75)");
        assert_eq!(json[1]["state"], "untinted");
        assert_eq!(json[1]["reason"], "no vibrant swatch");
        assert_eq!(json[2]["state"], "pending");
        assert!(json[2].get("theme").is_none());
    }

    #[test]
    fn test_palette_text_marks_missing_roles() {
        let palette = Palette::new().with(SwatchRole::Vibrant, Swatch::rgb8(200, 50, 50));
        let text = palette_text(&palette);
        assert!(text.contains("Vibrant       #c83232"));
        assert!(text.contains("DarkVibrant   -"));
    }
}
