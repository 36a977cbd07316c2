use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::config::Settings;
use crate::ui::panel::{run_panel, LoopExit, PanelOptions};
use crate::web::{DeviceStatus, WebRuntime, WebState};

/// Grace period for the restart reply to reach the browser
const RESTART_DELAY: Duration = Duration::from_millis(500);

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let headless = matches.get_flag("headless");
    let no_web = matches.get_flag("no-web");
    let web_port = matches.get_one::<u16>("web-port").copied();

    if headless {
        crate::init_logging();
    } else {
        let log_path = Settings::log_path()?;
        crate::init_file_logging(&log_path);
        println!("{} {}", "Logging to".dimmed(), log_path.display());
    }

    // ctrlc accepts a single handler per process, so it outlives every restart
    let running = Arc::new(AtomicBool::new(true));
    if headless {
        let flag = Arc::clone(&running);
        ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
            .context("Failed to set Ctrl-C handler")?;
    }

    loop {
        let settings = Settings::load().context("Failed to load settings")?;
        crate::apply_debug_mode(settings.debug_mode);

        if settings.host_configured() {
            log::info!(
                "Polling Glances at {}:{}",
                settings.glances_host,
                settings.glances_port
            );
        } else {
            log::warn!("Glances host not configured; every fetch will fail until it is set");
            println!(
                "{}",
                "⚠️  Glances host not configured. Use 'glance-panel set host <HOST>'".yellow()
            );
        }

        let port = web_port.unwrap_or(settings.web_port);
        let assets_dir = settings.assets_dir.clone().map(PathBuf::from);
        let settings = settings.into_shared();
        let status = DeviceStatus::shared();

        let (web, commands) = if no_web {
            (None, None)
        } else {
            let (tx, rx) = mpsc::channel();
            let state = WebState {
                settings: settings.clone(),
                settings_path: None,
                commands: tx,
                status: status.clone(),
                assets_dir,
            };
            let web = WebRuntime::start(state, port).context("Failed to start web server")?;
            println!(
                "{} http://{}",
                "✓ Web control surface on".green(),
                web.local_addr()
            );
            (Some(web), Some(rx))
        };

        let exit = run_panel(PanelOptions {
            headless,
            settings,
            commands,
            status,
            running: Arc::clone(&running),
        });

        if matches!(exit, Ok(LoopExit::Restart)) {
            std::thread::sleep(RESTART_DELAY);
        }
        if let Some(web) = web {
            web.shutdown();
        }

        match exit? {
            LoopExit::Quit => break,
            LoopExit::Restart => {
                log::info!("Restarting panel");
                println!("{}", "Restarting...".cyan());
            }
        }
    }

    Ok(())
}
