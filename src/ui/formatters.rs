use chrono::{DateTime, Local, Utc};
use ratatui::style::Color;

use crate::core::scheduler::{CycleReport, EndpointOutcome};
use crate::core::theme::Rgb;

/// Map a panel color onto a true-color terminal color
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r(), rgb.g(), rgb.b())
}

/// Format a poll timestamp in local time (HH:MM:SS)
pub fn format_time(time: DateTime<Utc>) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%H:%M:%S").to_string()
}

/// Short status word for a step outcome
pub fn format_outcome(outcome: &EndpointOutcome) -> String {
    match outcome {
        EndpointOutcome::Updated => "updated".to_string(),
        EndpointOutcome::Unchanged => "unchanged".to_string(),
        EndpointOutcome::Failed(reason) => format!("failed ({})", reason),
    }
}

/// One-line summary of a cycle for logs
pub fn summarize_cycle(report: &CycleReport) -> String {
    let texts: Vec<&str> = report.cards.iter().map(|card| card.text.as_str()).collect();
    let gauges: Vec<String> = report
        .gauges
        .iter()
        .map(|(kind, gauge)| format!("{:?} {}%", kind, gauge.value()))
        .collect();

    format!(
        "[{}] {} | {} | {} failed",
        format_time(report.started_at),
        gauges.join(", "),
        texts.join(" | "),
        report.failures()
    )
}
