use glance_panel::core::config::{Settings, DEFAULT_GLANCES_PORT};
use glance_panel::core::theme::{Rgb, ThemeColors};
use tempfile::TempDir;

#[test]
fn test_settings_default() {
    let settings = Settings::default();
    assert!(settings.glances_host.is_empty());
    assert_eq!(settings.glances_port, DEFAULT_GLANCES_PORT);
    assert!(settings.dark_mode);
    assert!(!settings.host_configured());
}

#[test]
fn test_missing_file_loads_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");

    let settings = Settings::load_from_path(&path).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_settings_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("settings.json");

    let mut settings = Settings::default();
    settings.set_glances_host("nas.local");
    settings.set_glances_port(61209);
    settings.update_theme_color("cpu_color", 0x123456).unwrap();
    settings.save_to_path(&path).unwrap();

    let loaded = Settings::load_from_path(&path).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(loaded.active_theme().cpu_color, Rgb(0x123456));
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, r#"{"glances_host": "10.0.0.5", "dark_mode": false}"#).unwrap();

    let settings = Settings::load_from_path(&path).unwrap();
    assert_eq!(settings.glances_host, "10.0.0.5");
    assert_eq!(settings.glances_port, DEFAULT_GLANCES_PORT);
    assert_eq!(settings.active_theme(), ThemeColors::LIGHT);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, "{not json").unwrap();

    assert!(Settings::load_from_path(&path).is_err());
}

#[test]
fn test_reset_theme_restores_defaults() {
    let mut settings = Settings::default();
    settings.update_theme_color("bg_color", 0x111111).unwrap();
    settings.set_dark_mode(false);
    settings.update_theme_color("text_color", 0x222222).unwrap();

    settings.reset_theme();
    assert_eq!(settings.active_theme(), ThemeColors::LIGHT);
    settings.set_dark_mode(true);
    assert_eq!(settings.active_theme(), ThemeColors::DARK);
}

#[test]
fn test_unknown_theme_color_rejected() {
    let mut settings = Settings::default();
    assert!(settings.update_theme_color("accent", 0xFFFFFF).is_err());
}
