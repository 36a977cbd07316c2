use serde::Serialize;

use crate::core::glances::MetricSnapshot;
use crate::core::icons;
use crate::error::FieldMissing;

use super::{array_entries, CardKind, CompactMetric};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureReading {
    pub label: String,
    pub degrees: i64,
}

impl TemperatureReading {
    pub fn metric(&self) -> CompactMetric {
        CompactMetric::new(
            CardKind::Temperature,
            format!("{} Temp: {}°C", icons::TEMPERATURE, self.degrees),
        )
    }
}

/// Finds the first sensor whose label equals `label` exactly.
///
/// Returns `Ok(None)` when no entry matches; the card keeps its text.
pub fn extract_temperature(
    snapshot: &MetricSnapshot,
    label: &str,
) -> Result<Option<TemperatureReading>, FieldMissing> {
    let entries = array_entries(snapshot.value(), "sensors")?;

    let Some(entry) = entries
        .iter()
        .find(|entry| entry.get("label").and_then(|l| l.as_str()) == Some(label))
    else {
        log::debug!("No sensor labelled '{}'", label);
        return Ok(None);
    };

    let value = entry
        .get("value")
        .and_then(|v| v.as_f64())
        .ok_or_else(|| FieldMissing::new("sensors", "value"))?;

    Ok(Some(TemperatureReading {
        label: label.to_string(),
        degrees: value.trunc() as i64,
    }))
}
