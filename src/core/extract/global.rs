use serde::Serialize;

use crate::core::glances::MetricSnapshot;
use crate::core::icons;
use crate::error::FieldMissing;

use super::{f64_field, CardKind, CompactMetric};

/// `/api/4/uptime` returns a bare JSON string such as `"3 days, 4:05:06"`.
pub fn extract_uptime(snapshot: &MetricSnapshot) -> Result<CompactMetric, FieldMissing> {
    let raw = snapshot
        .value()
        .as_str()
        .ok_or_else(|| FieldMissing::new("uptime", "<string>"))?;
    let uptime: String = raw.chars().filter(|c| *c != '"').collect();

    Ok(CompactMetric::new(
        CardKind::Uptime,
        format!("{} {}", icons::POWER, uptime.trim()),
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReading {
    pub min1: f64,
}

impl LoadReading {
    pub fn metric(&self) -> CompactMetric {
        CompactMetric::new(
            CardKind::Load,
            format!("{} Load: {:.1}", icons::LOAD, self.min1),
        )
    }
}

pub fn extract_load(snapshot: &MetricSnapshot) -> Result<LoadReading, FieldMissing> {
    Ok(LoadReading {
        min1: f64_field(snapshot.value(), "load", "min1")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_uptime_strips_quotes() {
        let snapshot = MetricSnapshot::parse(r#""3 days, \"4:05:06\"""#).unwrap();
        let metric = extract_uptime(&snapshot).unwrap();
        assert_eq!(metric.text, "⏻ 3 days, 4:05:06");
    }

    #[test]
    fn test_uptime_requires_string() {
        let snapshot = MetricSnapshot::new(json!({"seconds": 100}));
        assert!(extract_uptime(&snapshot).is_err());
    }

    #[test]
    fn test_load_one_decimal() {
        let snapshot = MetricSnapshot::new(json!({"min1": 0.4567, "min5": 1.0, "cpucore": 4}));
        let metric = extract_load(&snapshot).unwrap().metric();
        assert_eq!(metric.text, "⚡ Load: 0.5");
        assert_eq!(metric.kind, CardKind::Load);
    }

    #[test]
    fn test_load_missing() {
        let snapshot = MetricSnapshot::new(json!({"min5": 1.0}));
        assert_eq!(
            extract_load(&snapshot).unwrap_err(),
            FieldMissing::new("load", "min1")
        );
    }
}
