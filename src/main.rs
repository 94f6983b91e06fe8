use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::Builder;
use futures::stream::{FuturesUnordered, StreamExt};
use log::LevelFilter;
use tinta::render;
use tinta::services::{
    ApplyOutcome, Gallery, PaletteExtractor, SettingsRegistry, ThemeExecutor, ThemeTicket,
    VibrantExtractor,
};
use tinta::theme::config::{ThemeConfig, ThemeOverrides};
use tinta::theme::error::ThemeError;
use tinta::theme::palette::{Palette, SwatchRole};
use tinta::theme::swatch::Swatch;

#[derive(Parser, Debug)]
#[command(name = "tinta")]
#[command(about = "Derive per-image color themes from extracted palettes")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Theme configuration file, layered over the user settings
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Theme every image and print the container styles
    Gallery {
        /// Images to theme, in display order
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Maximum number of extractions running at once
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Print JSON instead of CSS
        #[arg(long)]
        json: bool,
    },
    /// Print the palette extracted from an image
    Palette {
        /// Image to extract from
        image: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Derive a theme from hex colors
    Derive {
        /// Vibrant swatch, e.g. #c83232
        #[arg(long, value_parser = parse_swatch)]
        vibrant: Swatch,
        /// DarkVibrant swatch
        #[arg(long, value_parser = parse_swatch)]
        dark_vibrant: Option<Swatch>,
        /// LightVibrant swatch
        #[arg(long, value_parser = parse_swatch)]
        light_vibrant: Option<Swatch>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn parse_swatch(value: &str) -> Result<Swatch, ThemeError> {
    value.parse()
}

/// Pick the log filter: `-v` first, then the configured `log_level`, then
/// `RUST_LOG`, then `warn`.
fn log_filters(verbose: u8, configured: Option<&str>, env: Option<&str>) -> String {
    match verbose {
        0 => configured.or(env).unwrap_or("warn").to_string(),
        1 => LevelFilter::Info.to_string(),
        2 => LevelFilter::Debug.to_string(),
        _ => LevelFilter::Trace.to_string(),
    }
}

fn init_logger(verbose: u8, configured: Option<&str>) {
    let env = std::env::var("RUST_LOG").ok();
    Builder::new()
        .parse_filters(&log_filters(verbose, configured, env.as_deref()))
        .init();
}

async fn theme_config(settings: &SettingsRegistry, path: Option<&PathBuf>) -> Result<ThemeConfig> {
    let mut config = settings.theme_config()?;
    if let Some(path) = path {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read theme config {:?}", path))?;
        let overrides = ThemeOverrides::from_toml(&content)
            .with_context(|| format!("Failed to parse theme config {:?}", path))?;
        config.apply(&overrides);
        config.validate()?;
    }
    Ok(config)
}

async fn run_gallery(
    settings: &SettingsRegistry,
    config: ThemeConfig,
    images: Vec<PathBuf>,
    jobs: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut options = settings.executor_options();
    if let Some(jobs) = jobs {
        options.max_concurrent = jobs;
    }
    let extractor = Arc::new(VibrantExtractor::new(settings.quantize_options()));
    let executor = ThemeExecutor::new(extractor, config.deriver()?, options);

    let mut gallery = Gallery::new();
    let requests: Vec<_> = images.into_iter().map(|image| gallery.push(image)).collect();
    let mut pending: FuturesUnordered<_> = requests
        .into_iter()
        .map(|request| executor.request(request).map(ThemeTicket::resolve))
        .collect::<Result<_, _>>()?;

    while let Some(event) = pending.next().await {
        let key = event.key().clone();
        if gallery.apply(event) == ApplyOutcome::Applied {
            log::debug!(
                "Applied theme for {} ({} still pending)",
                key,
                gallery.pending_count()
            );
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&render::gallery_json(&gallery))?);
    } else {
        println!("{}", render::gallery_css(&gallery));
    }
    Ok(())
}

async fn run_palette(settings: &SettingsRegistry, image: PathBuf, json: bool) -> Result<()> {
    let extractor = VibrantExtractor::new(settings.quantize_options());
    let palette = extractor
        .extract(&image)
        .await
        .with_context(|| format!("Failed to extract a palette from {:?}", image))?;
    if !palette.is_themeable() {
        log::warn!("{:?} has no vibrant swatch and cannot be themed", image);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&palette)?);
    } else {
        println!("{}", render::palette_text(&palette));
    }
    Ok(())
}

fn run_derive(config: ThemeConfig, palette: Palette, json: bool) -> Result<()> {
    let theme = config.deriver()?.derive(&palette)?;
    if json {
        println!("{}", theme.to_json()?);
    } else {
        println!("{}", render::theme_text(&theme));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (settings, load_error) = match SettingsRegistry::load_default().await {
        Ok(settings) => (settings, None),
        Err(e) => (SettingsRegistry::new(), Some(e)),
    };
    init_logger(cli.verbose, settings.log_level());
    if let Some(e) = load_error {
        log::warn!("Failed to load settings, using defaults: {:#}", e);
    }
    settings.log_sources();

    let config = theme_config(&settings, cli.config.as_ref()).await?;

    match cli.command {
        Command::Gallery { images, jobs, json } => {
            run_gallery(&settings, config, images, jobs, json).await
        },
        Command::Palette { image, json } => run_palette(&settings, image, json).await,
        Command::Derive {
            vibrant,
            dark_vibrant,
            light_vibrant,
            json,
        } => {
            let mut palette = Palette::new().with(SwatchRole::Vibrant, vibrant);
            if let Some(swatch) = dark_vibrant {
                palette.insert(SwatchRole::DarkVibrant, swatch);
            }
            if let Some(swatch) = light_vibrant {
                palette.insert(SwatchRole::LightVibrant, swatch);
            }
            run_derive(config, palette, json)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_precedence() {
        assert_eq!(log_filters(0, None, None), "warn");
        assert_eq!(log_filters(0, None, Some("tinta=trace")), "tinta=trace");
        assert_eq!(log_filters(0, Some("debug"), Some("tinta=trace")), "debug");
        assert_eq!(log_filters(1, Some("debug"), Some("trace")), "INFO");
        assert_eq!(log_filters(3, None, Some("off")), "TRACE");
    }
}
