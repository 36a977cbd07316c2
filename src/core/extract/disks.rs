//! Filesystem classification for the array and cache cards.
//!
//! The array card sums every included mount. Inclusion is decided by the
//! first rule that matches, in this order:
//!
//! 1. options carry both `fixed` and `rw`
//! 2. the mount point starts with [`ARRAY_DISK_PREFIX`]
//! 3. any absolute mount point other than `/` that contains none of
//!    [`EXCLUDED_MOUNT_FRAGMENTS`]
//!
//! The cache card is a separate pass that picks a single mount.

use serde::Serialize;
use serde_json::Value;

use crate::core::glances::MetricSnapshot;
use crate::core::icons;
use crate::error::FieldMissing;

use super::{array_entries, f64_field, str_field, u64_field, CardKind, CompactMetric};

pub const ARRAY_DISK_PREFIX: &str = "/rootfs/mnt/disk";
pub const CACHE_PATHS: &[&str] = &["/rootfs/mnt/cache", "/cache", "/var/cache"];
pub const EXCLUDED_MOUNT_FRAGMENTS: &[&str] = &["/boot", "/snap", "/sys", "/proc", "/dev"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountPolicy {
    pub array_prefix: &'static str,
    pub cache_paths: &'static [&'static str],
    pub excluded: &'static [&'static str],
}

impl MountPolicy {
    pub const STANDARD: MountPolicy = MountPolicy {
        array_prefix: ARRAY_DISK_PREFIX,
        cache_paths: CACHE_PATHS,
        excluded: EXCLUDED_MOUNT_FRAGMENTS,
    };
}

impl Default for MountPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// The rule that admitted a mount into the array aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionRule {
    FixedReadWrite,
    ArrayDisk,
    GeneralMount,
}

pub fn classify_mount(
    policy: &MountPolicy,
    mount_point: &str,
    options: &str,
) -> Option<InclusionRule> {
    let mut fixed = false;
    let mut rw = false;
    for option in options.split(',').map(str::trim) {
        match option {
            "fixed" => fixed = true,
            "rw" => rw = true,
            _ => {}
        }
    }

    if fixed && rw {
        return Some(InclusionRule::FixedReadWrite);
    }

    if mount_point.starts_with(policy.array_prefix) {
        return Some(InclusionRule::ArrayDisk);
    }

    if mount_point.starts_with('/')
        && mount_point != "/"
        && !policy
            .excluded
            .iter()
            .any(|fragment| mount_point.contains(fragment))
    {
        return Some(InclusionRule::GeneralMount);
    }

    None
}

/// Summed capacity of every included mount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArrayUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub mounts: usize,
}

impl ArrayUsage {
    /// `None` when nothing with a size was included.
    pub fn percent(&self) -> Option<f64> {
        if self.total_bytes == 0 {
            return None;
        }
        Some(self.used_bytes as f64 * 100.0 / self.total_bytes as f64)
    }

    pub fn metric(&self) -> Option<CompactMetric> {
        self.percent().map(|percent| {
            CompactMetric::new(
                CardKind::Disk,
                format!("{} Array: {:.1}%", icons::DRIVE, percent),
            )
        })
    }
}

struct MountEntry<'a> {
    mount_point: &'a str,
    options: &'a str,
    size: u64,
    used: u64,
}

fn mount_entry(entry: &Value) -> Result<MountEntry<'_>, FieldMissing> {
    Ok(MountEntry {
        mount_point: str_field(entry, "fs", "mnt_point")?,
        options: entry.get("options").and_then(Value::as_str).unwrap_or(""),
        size: u64_field(entry, "fs", "size")?,
        used: u64_field(entry, "fs", "used")?,
    })
}

pub fn aggregate_array(
    snapshot: &MetricSnapshot,
    policy: &MountPolicy,
) -> Result<ArrayUsage, FieldMissing> {
    let entries = array_entries(snapshot.value(), "fs")?;
    let mut usage = ArrayUsage::default();

    for entry in entries {
        let mount = match mount_entry(entry) {
            Ok(mount) => mount,
            Err(e) => {
                log::debug!("Skipping mount entry: {}", e);
                continue;
            }
        };

        if let Some(rule) = classify_mount(policy, mount.mount_point, mount.options) {
            log::debug!(
                "Including {} ({:?}): {} / {} bytes",
                mount.mount_point,
                rule,
                mount.used,
                mount.size
            );
            usage.total_bytes = usage.total_bytes.saturating_add(mount.size);
            usage.used_bytes = usage.used_bytes.saturating_add(mount.used);
            usage.mounts += 1;
        }
    }

    Ok(usage)
}

fn mount_point(entry: &Value) -> Option<&str> {
    entry.get("mnt_point").and_then(Value::as_str)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheUsage {
    pub mount_point: String,
    pub percent: f64,
}

impl CacheUsage {
    pub fn metric(&self) -> CompactMetric {
        CompactMetric::new(
            CardKind::Cache,
            format!("{} Cache: {:.1}%", icons::SAVE, self.percent),
        )
    }
}

/// Picks the cache mount: an exact known path first, then the first mount
/// point containing `cache`.
pub fn select_cache(
    snapshot: &MetricSnapshot,
    policy: &MountPolicy,
) -> Result<Option<CacheUsage>, FieldMissing> {
    let entries = array_entries(snapshot.value(), "fs")?;

    let selected = entries
        .iter()
        .find(|entry| mount_point(entry).is_some_and(|p| policy.cache_paths.contains(&p)))
        .or_else(|| {
            entries
                .iter()
                .find(|entry| mount_point(entry).is_some_and(|p| p.contains("cache")))
        });

    let Some(entry) = selected else {
        return Ok(None);
    };

    Ok(Some(CacheUsage {
        mount_point: str_field(entry, "fs", "mnt_point")?.to_string(),
        percent: f64_field(entry, "fs", "percent")?,
    }))
}
