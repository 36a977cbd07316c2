use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::config::Settings;
use crate::core::theme::ThemeSlot;

/// Settings that can be changed from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingKey {
    Host,
    Port,
    Interface,
    Sensor,
}

impl SettingKey {
    fn name(&self) -> &'static str {
        match self {
            SettingKey::Host => "Glances host",
            SettingKey::Port => "Glances port",
            SettingKey::Interface => "Network interface",
            SettingKey::Sensor => "Temperature sensor",
        }
    }

    /// Validate `value` and store it on `settings`
    fn apply(&self, settings: &mut Settings, value: &str) -> Result<()> {
        match self {
            SettingKey::Host => {
                let host = value.trim();
                if host.is_empty() || host.contains('/') || host.contains(' ') {
                    anyhow::bail!("Invalid host '{}': expected a hostname or IP address", value);
                }
                settings.set_glances_host(host);
            }
            SettingKey::Port => {
                let port: u16 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid port '{}'", value))?;
                if port == 0 {
                    anyhow::bail!("Port must be between 1 and 65535");
                }
                settings.set_glances_port(port);
            }
            SettingKey::Interface => settings.interface_name = value.trim().to_string(),
            SettingKey::Sensor => settings.sensor_label = value.to_string(),
        }
        Ok(())
    }
}

pub fn handle_set(matches: &clap::ArgMatches) -> Result<()> {
    let key = match matches.subcommand() {
        Some(("host", sub_matches)) => (SettingKey::Host, sub_matches),
        Some(("port", sub_matches)) => (SettingKey::Port, sub_matches),
        Some(("interface", sub_matches)) => (SettingKey::Interface, sub_matches),
        Some(("sensor", sub_matches)) => (SettingKey::Sensor, sub_matches),
        _ => {
            println!("Use 'glance-panel set --help' for more information.");
            return Ok(());
        }
    };
    set_value(key.1, key.0)
}

fn set_value(matches: &clap::ArgMatches, key: SettingKey) -> Result<()> {
    let value = matches
        .get_one::<String>("value")
        .context("Value argument is required")?;

    let mut settings = Settings::load()?;
    key.apply(&mut settings, value)?;
    settings.save()?;

    println!(
        "{} {}",
        format!("✓ {} set to:", key.name()).green(),
        value.trim()
    );

    Ok(())
}

pub fn handle_get() -> Result<()> {
    let settings = Settings::load()?;
    let path = Settings::get_config_path()?;

    println!("{}", "Panel settings:".white().bold());
    println!("  {:<20} {}", "Settings file", path.display().to_string().dimmed());

    if settings.host_configured() {
        println!(
            "  {:<20} {}",
            "Glances host",
            settings.glances_host.cyan().bold()
        );
    } else {
        println!("  {:<20} {}", "Glances host", "not set".yellow());
    }
    println!("  {:<20} {}", "Glances port", settings.glances_port);
    println!("  {:<20} {}", "Network interface", settings.interface_name);
    println!("  {:<20} {}", "Temperature sensor", settings.sensor_label);
    println!("  {:<20} {}", "Web port", settings.web_port);
    println!(
        "  {:<20} {}",
        "Mode",
        if settings.dark_mode { "dark" } else { "light" }
    );
    println!("  {:<20} {}", "Debug logging", settings.debug_mode);

    let theme = settings.active_theme();
    println!();
    println!("{}", "Active theme:".white().bold());
    for slot in ThemeSlot::ALL {
        println!("  {:<20} {}", slot.key(), theme.get(slot).to_hex_string());
    }

    Ok(())
}

pub fn handle_reset_theme() -> Result<()> {
    let mut settings = Settings::load()?;
    settings.reset_theme();
    settings.save()?;

    println!("{}", "✓ Theme reset to defaults".green());
    Ok(())
}
