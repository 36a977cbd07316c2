use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::config::Settings;
use crate::core::extract::CardKind;
use crate::core::glances::GlancesClient;
use crate::core::presentation::PresentationAdapter;
use crate::core::scheduler::{ExtractionConfig, PollScheduler, PollStep};
use crate::ui::formatters::format_outcome;
use crate::ui::panel::{build_widgets, PanelModel};

/// Run a single poll cycle and print what the panel would show
pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    crate::init_logging();
    let as_json = matches.get_flag("json");
    let settings = Settings::load().context("Failed to load settings")?;

    if !settings.host_configured() && !as_json {
        println!(
            "{}",
            "⚠️  Glances host not configured. Use 'glance-panel set host <HOST>'".yellow()
        );
    }

    let mut source = GlancesClient::from_settings(&settings)?;
    let theme = settings.active_theme();
    let mut model = PanelModel::new();
    let widgets = build_widgets(&mut model, &theme);
    let mut adapter = PresentationAdapter::new(model, widgets, theme);

    let mut scheduler = PollScheduler::new(ExtractionConfig::from_settings(&settings));
    let report = scheduler.run_cycle(&mut source, &mut adapter);

    if as_json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    println!(
        "{} {}:{}",
        "Glances host:".white(),
        settings.glances_host.cyan().bold(),
        settings.glances_port
    );
    println!();

    for (kind, gauge) in &report.gauges {
        let secondary = gauge.secondary.as_deref().unwrap_or("");
        println!(
            "  {:<12} {:>3}%  {}",
            format!("{:?}", kind),
            gauge.value(),
            secondary.dimmed()
        );
    }
    for kind in CardKind::ALL {
        let text = adapter.card_text(kind).unwrap_or("");
        println!("  {:<12} {}", format!("{:?}", kind), text);
    }

    println!();
    for step in PollStep::SEQUENCE {
        if let Some(outcome) = report.outcome(step) {
            let line = format!("  {:<12} {}", format!("{:?}", step), format_outcome(outcome));
            if outcome.is_failure() {
                println!("{}", line.red());
            } else {
                println!("{}", line.dimmed());
            }
        }
    }

    Ok(())
}
