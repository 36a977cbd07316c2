use serde::Serialize;

use crate::core::glances::MetricSnapshot;
use crate::core::icons;
use crate::error::FieldMissing;

use super::{array_entries, f64_field, CardKind, CompactMetric};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Format a byte rate with a single-letter unit suffix.
pub fn format_speed(bytes_per_sec: f64) -> String {
    if bytes_per_sec > MIB {
        format!("{:.1}M", bytes_per_sec / MIB)
    } else if bytes_per_sec > KIB {
        format!("{:.1}K", bytes_per_sec / KIB)
    } else {
        format!("{:.0}B", bytes_per_sec)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkRates {
    pub interface: String,
    pub rx_per_sec: f64,
    pub tx_per_sec: f64,
}

impl NetworkRates {
    pub fn metric(&self) -> CompactMetric {
        CompactMetric::new(
            CardKind::Network,
            format!(
                "{} {}    {} {}",
                icons::DOWNLOAD,
                format_speed(self.rx_per_sec),
                icons::UPLOAD,
                format_speed(self.tx_per_sec)
            ),
        )
    }
}

/// Rates of the interface named `interface`, or `None` if it is not listed.
pub fn extract_network(
    snapshot: &MetricSnapshot,
    interface: &str,
) -> Result<Option<NetworkRates>, FieldMissing> {
    let entries = array_entries(snapshot.value(), "network")?;

    let Some(entry) = entries
        .iter()
        .find(|entry| entry.get("interface_name").and_then(|n| n.as_str()) == Some(interface))
    else {
        log::debug!("Interface '{}' not reported", interface);
        return Ok(None);
    };

    Ok(Some(NetworkRates {
        interface: interface.to_string(),
        rx_per_sec: f64_field(entry, "network", "bytes_recv_rate_per_sec")?,
        tx_per_sec: f64_field(entry, "network", "bytes_sent_rate_per_sec")?,
    }))
}
