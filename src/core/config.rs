use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::theme::{Rgb, ThemeColors, ThemeOverrides, ThemeSlot};

pub const DEFAULT_GLANCES_PORT: u16 = 61208;
pub const DEFAULT_INTERFACE: &str = "eth0";
pub const DEFAULT_SENSOR_LABEL: &str = "Package id 0";
pub const DEFAULT_WEB_PORT: u16 = 8080;

/// Environment variable that overrides the settings file location
pub const CONFIG_PATH_ENV: &str = "GLANCE_PANEL_CONFIG";

/// Settings shared between the panel loop and the web handlers.
pub type SharedSettings = Arc<parking_lot::Mutex<Settings>>;

const APP_DIR_NAME: &str = "glance-panel";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Persisted panel settings.
///
/// Every field has a serde default so older or hand-edited files still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub glances_host: String,
    #[serde(default = "default_glances_port")]
    pub glances_port: u16,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default, skip_serializing_if = "ThemeOverrides::is_empty")]
    pub dark_theme: ThemeOverrides,
    #[serde(default, skip_serializing_if = "ThemeOverrides::is_empty")]
    pub light_theme: ThemeOverrides,
    #[serde(default = "default_interface")]
    pub interface_name: String,
    #[serde(default = "default_sensor_label")]
    pub sensor_label: String,
    #[serde(default = "default_web_port")]
    pub web_port: u16,
    /// Directory holding the dashboard assets (index.html, css/, js/)
    #[serde(default)]
    pub assets_dir: Option<String>,
}

fn default_glances_port() -> u16 {
    DEFAULT_GLANCES_PORT
}

fn default_true() -> bool {
    true
}

fn default_interface() -> String {
    DEFAULT_INTERFACE.to_string()
}

fn default_sensor_label() -> String {
    DEFAULT_SENSOR_LABEL.to_string()
}

fn default_web_port() -> u16 {
    DEFAULT_WEB_PORT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            glances_host: String::new(),
            glances_port: DEFAULT_GLANCES_PORT,
            dark_mode: true,
            debug_mode: false,
            dark_theme: ThemeOverrides::default(),
            light_theme: ThemeOverrides::default(),
            interface_name: default_interface(),
            sensor_label: default_sensor_label(),
            web_port: DEFAULT_WEB_PORT,
            assets_dir: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let path = Self::get_config_path()?;
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        // An empty file counts as "never saved"
        if data.trim().is_empty() {
            return Ok(Settings::default());
        }

        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::get_config_path()?;
        self.save_to_path(&path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, data)
            .with_context(|| format!("Failed to write settings file: {:?}", path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Default log file location, next to the settings file.
    pub fn log_path() -> Result<PathBuf> {
        let settings = Self::get_config_path()?;
        let dir = settings
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(std::env::temp_dir);
        Ok(dir.join("panel.log"))
    }

    /// Theme for the current mode, defaults plus saved overrides.
    pub fn active_theme(&self) -> ThemeColors {
        let base = ThemeColors::defaults(self.dark_mode);
        self.active_overrides().apply(base)
    }

    fn active_overrides(&self) -> &ThemeOverrides {
        if self.dark_mode {
            &self.dark_theme
        } else {
            &self.light_theme
        }
    }

    /// Override one color of the active theme. Unknown names are rejected.
    pub fn update_theme_color(&mut self, name: &str, color: u32) -> Result<()> {
        let slot = ThemeSlot::from_key(name)
            .with_context(|| format!("Unknown theme color '{}'", name))?;
        let overrides = if self.dark_mode {
            &mut self.dark_theme
        } else {
            &mut self.light_theme
        };
        overrides.set(slot, Rgb::from_hex(color));
        Ok(())
    }

    /// Drop every saved color so both modes fall back to their defaults.
    pub fn reset_theme(&mut self) {
        self.dark_theme = ThemeOverrides::default();
        self.light_theme = ThemeOverrides::default();
    }

    pub fn set_glances_host(&mut self, host: impl Into<String>) {
        self.glances_host = host.into().trim().to_string();
    }

    pub fn set_glances_port(&mut self, port: u16) {
        self.glances_port = port;
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
    }

    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug_mode = enabled;
    }

    pub fn into_shared(self) -> SharedSettings {
        Arc::new(parking_lot::Mutex::new(self))
    }

    pub fn host_configured(&self) -> bool {
        !self.glances_host.is_empty()
    }
}
