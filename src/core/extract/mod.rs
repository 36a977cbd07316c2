//! Field extractors.
//!
//! One pure function per endpoint. Each takes a parsed snapshot and either
//! produces a reading or reports the single field it could not find; a
//! failure never touches the other metrics of the same poll cycle.

mod cpu_memory;
mod disks;
mod global;
mod network;
mod temperatures;

pub use cpu_memory::{extract_cpu, extract_memory, CpuReading, MemoryReading};
pub use disks::{
    aggregate_array, classify_mount, select_cache, ArrayUsage, CacheUsage, InclusionRule,
    MountPolicy, ARRAY_DISK_PREFIX, CACHE_PATHS, EXCLUDED_MOUNT_FRAGMENTS,
};
pub use global::{extract_load, extract_uptime, LoadReading};
pub use network::{extract_network, format_speed, NetworkRates};
pub use temperatures::{extract_temperature, TemperatureReading};

use serde::Serialize;
use serde_json::Value;

use crate::error::FieldMissing;

/// Which arc gauge a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GaugeKind {
    Cpu,
    Ram,
}

/// Which compact card a metric belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CardKind {
    Temperature,
    Load,
    Uptime,
    Disk,
    Cache,
    Network,
}

impl CardKind {
    pub const ALL: [CardKind; 6] = [
        CardKind::Temperature,
        CardKind::Load,
        CardKind::Uptime,
        CardKind::Disk,
        CardKind::Cache,
        CardKind::Network,
    ];
}

/// Clamp a percentage to the range an arc can show.
pub fn clamp_percent(value: i32) -> i32 {
    value.clamp(0, 100)
}

/// Arc gauge payload: a percentage in [0,100] plus an optional caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GaugeValue {
    value: i32,
    pub secondary: Option<String>,
}

impl GaugeValue {
    pub fn new(value: i32, secondary: Option<String>) -> Self {
        Self {
            value: clamp_percent(value),
            secondary,
        }
    }

    /// Round a float percentage to the nearest integer before clamping.
    pub fn from_percent(percent: f64, secondary: Option<String>) -> Self {
        let rounded = if percent.is_finite() {
            percent.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
        } else {
            0
        };
        Self::new(rounded, secondary)
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

/// Compact card payload: `"<glyph> <text>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompactMetric {
    pub kind: CardKind,
    pub text: String,
}

impl CompactMetric {
    pub fn new(kind: CardKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

pub(crate) fn f64_field(
    object: &Value,
    endpoint: &'static str,
    field: &'static str,
) -> Result<f64, FieldMissing> {
    object
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| FieldMissing::new(endpoint, field))
}

pub(crate) fn u64_field(
    object: &Value,
    endpoint: &'static str,
    field: &'static str,
) -> Result<u64, FieldMissing> {
    let value = object
        .get(field)
        .ok_or_else(|| FieldMissing::new(endpoint, field))?;
    // Glances reports sizes as integers, but some exporters send floats
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64))
        .ok_or_else(|| FieldMissing::new(endpoint, field))
}

pub(crate) fn str_field<'a>(
    object: &'a Value,
    endpoint: &'static str,
    field: &'static str,
) -> Result<&'a str, FieldMissing> {
    object
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| FieldMissing::new(endpoint, field))
}

pub(crate) fn array_entries<'a>(
    value: &'a Value,
    endpoint: &'static str,
) -> Result<&'a [Value], FieldMissing> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| FieldMissing::new(endpoint, "[]"))
}
