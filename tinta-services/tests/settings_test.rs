use std::fs;
use std::time::Duration;

use tinta_services::SettingsRegistry;

#[tokio::test]
async fn test_load_from_paths_later_wins() {
    let test_dir = std::env::temp_dir().join("tinta_settings_test_paths");
    if test_dir.exists() {
        fs::remove_dir_all(&test_dir).unwrap();
    }
    fs::create_dir_all(&test_dir).unwrap();

    let system = test_dir.join("system.toml");
    fs::write(
        &system,
        r#"
[general]
log_level = "warn"

[extraction]
max_concurrent = 3
timeout_ms = 2500
color_count = 64

[theme.contrast]
light_from = 0.6
"#,
    )
    .unwrap();

    let user = test_dir.join("user.toml");
    fs::write(
        &user,
        r#"
[extraction]
max_concurrent = 8

[theme.contrast]
secondary_mix = 0.5
"#,
    )
    .unwrap();

    let mut registry = SettingsRegistry::new();
    let results = registry.load_from_paths_async(vec![system, user]).await;
    assert!(results.iter().all(|result| result.is_ok()));

    assert_eq!(registry.log_level(), Some("warn"));
    let options = registry.executor_options();
    assert_eq!(options.max_concurrent, 8);
    assert_eq!(options.timeout, Duration::from_millis(2500));
    assert_eq!(registry.quantize_options().color_count, 64);

    let theme = registry.theme_config().unwrap();
    assert_eq!(theme.contrast.thresholds.light_from, 0.6);
    assert_eq!(theme.contrast.secondary_mix, 0.5);

    fs::remove_dir_all(&test_dir).unwrap();
}

#[tokio::test]
async fn test_bad_file_is_reported_and_ignored() {
    let test_dir = std::env::temp_dir().join("tinta_settings_test_bad");
    if test_dir.exists() {
        fs::remove_dir_all(&test_dir).unwrap();
    }
    fs::create_dir_all(&test_dir).unwrap();

    let good = test_dir.join("good.toml");
    fs::write(&good, "[extraction]\nquality = 4\n").unwrap();
    let bad = test_dir.join("bad.toml");
    fs::write(&bad, "[extraction\nquality = ").unwrap();
    let missing = test_dir.join("missing.toml");

    let mut registry = SettingsRegistry::new();
    let results = registry.load_from_paths_async(vec![good, bad, missing]).await;

    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_err());
    assert_eq!(registry.quantize_options().quality, 4);

    fs::remove_dir_all(&test_dir).unwrap();
}

#[tokio::test]
async fn test_standalone_theme_file() {
    let test_dir = std::env::temp_dir().join("tinta_settings_test_theme");
    if test_dir.exists() {
        fs::remove_dir_all(&test_dir).unwrap();
    }
    fs::create_dir_all(&test_dir).unwrap();

    let theme = test_dir.join("theme.toml");
    fs::write(&theme, "[contrast]\nprimary_mix = 0.9\n").unwrap();

    let mut registry = SettingsRegistry::new();
    registry.load_theme_file(&theme).await;
    assert_eq!(registry.theme_config().unwrap().contrast.primary_mix, 0.9);

    // Unreadable files leave the current values alone.
    registry.load_theme_file(&test_dir.join("missing.toml")).await;
    assert_eq!(registry.theme_config().unwrap().contrast.primary_mix, 0.9);

    fs::remove_dir_all(&test_dir).unwrap();
}

#[tokio::test]
async fn test_loaded_and_skipped_files_are_recorded() {
    let test_dir = std::env::temp_dir().join("tinta_settings_test_sources");
    if test_dir.exists() {
        fs::remove_dir_all(&test_dir).unwrap();
    }
    fs::create_dir_all(&test_dir).unwrap();

    let good = test_dir.join("config.toml");
    fs::write(&good, "[general]\nlog_level = \"debug\"\n").unwrap();
    let bad = test_dir.join("broken.toml");
    fs::write(&bad, "[general\n").unwrap();
    let theme = test_dir.join("theme.toml");
    fs::write(&theme, "[contrast]\nsecondary_mix = 0.4\n").unwrap();
    let missing = test_dir.join("missing.toml");

    let mut registry = SettingsRegistry::new();
    registry.load_file(&good).await;
    registry.load_file(&bad).await;
    registry.load_theme_file(&theme).await;
    registry.load_theme_file(&missing).await;

    assert_eq!(registry.sources(), &[good, theme]);
    let skipped: Vec<_> = registry.skipped().iter().map(|(path, _)| path.clone()).collect();
    assert_eq!(skipped, vec![bad, missing]);
    assert!(registry.skipped()[0].1.contains("parse"));
    assert!(registry.skipped()[1].1.contains("read"));
    assert_eq!(registry.log_level(), Some("debug"));

    fs::remove_dir_all(&test_dir).unwrap();
}
