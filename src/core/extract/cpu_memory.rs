use serde::Serialize;

use crate::core::glances::MetricSnapshot;
use crate::error::FieldMissing;

use super::{f64_field, u64_field, GaugeValue};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuReading {
    pub percent: f64,
    pub cores: u64,
}

impl CpuReading {
    pub fn gauge(&self) -> GaugeValue {
        GaugeValue::from_percent(self.percent, Some(format!("{} cores", self.cores)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryReading {
    pub percent: f64,
    pub total_bytes: u64,
}

impl MemoryReading {
    pub fn total_gb(&self) -> f64 {
        self.total_bytes as f64 / GIB
    }

    pub fn gauge(&self) -> GaugeValue {
        GaugeValue::from_percent(self.percent, Some(format!("{:.1} GB", self.total_gb())))
    }
}

/// Reads `total` and `cpucore` from `/api/4/cpu`.
pub fn extract_cpu(snapshot: &MetricSnapshot) -> Result<CpuReading, FieldMissing> {
    let value = snapshot.value();
    Ok(CpuReading {
        percent: f64_field(value, "cpu", "total")?,
        cores: u64_field(value, "cpu", "cpucore")?,
    })
}

/// Reads `percent` and `total` from `/api/4/mem`.
pub fn extract_memory(snapshot: &MetricSnapshot) -> Result<MemoryReading, FieldMissing> {
    let value = snapshot.value();
    Ok(MemoryReading {
        percent: f64_field(value, "mem", "percent")?,
        total_bytes: u64_field(value, "mem", "total")?,
    })
}
