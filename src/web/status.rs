//! Device status reported by the control surface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use serde::Serialize;
use sysinfo::{Components, System};
use tokio::sync::broadcast;
use tokio::time::{interval, Duration, MissedTickBehavior};

const LOAD_SAMPLES: usize = 10;

/// Smoothed busy estimate of the panel loop.
///
/// Each loop iteration records the time since the previous one. The usage
/// figure is the mean interval over the last samples relative to the
/// largest, blended into the running value at 0.8 old / 0.2 new.
#[derive(Debug, Clone)]
pub struct LoadEstimator {
    samples: [u64; LOAD_SAMPLES],
    index: usize,
    last: Option<Instant>,
    usage: f64,
}

impl LoadEstimator {
    pub fn new() -> Self {
        Self {
            samples: [0; LOAD_SAMPLES],
            index: 0,
            last: None,
            usage: 0.0,
        }
    }

    pub fn record(&mut self, now: Instant) -> f64 {
        if let Some(last) = self.last {
            let delta = now.saturating_duration_since(last).as_micros() as u64;
            self.samples[self.index] = delta;
            self.index = (self.index + 1) % LOAD_SAMPLES;

            let max = self.samples.iter().copied().max().unwrap_or(0);
            if max > 0 {
                let avg = self.samples.iter().sum::<u64>() / LOAD_SAMPLES as u64;
                let sample = avg as f64 / max as f64 * 100.0;
                self.usage = (self.usage * 0.8 + sample * 0.2).clamp(0.0, 100.0);
            }
        }
        self.last = Some(now);
        self.usage
    }

    pub fn usage(&self) -> f64 {
        self.usage
    }
}

impl Default for LoadEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Readings from the machine running the panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HostVitals {
    pub temperature_c: Option<f32>,
    pub total_memory_kb: u64,
    pub free_memory_kb: u64,
    pub hostname: Option<String>,
}

/// Temperature is the hottest component reading.
pub fn collect_vitals(system: &System, components: &Components) -> HostVitals {
    let temperature_c = components
        .iter()
        .filter_map(|component| component.temperature())
        .filter(|t| t.is_finite())
        .fold(None, |hottest: Option<f32>, t| {
            Some(hottest.map_or(t, |h| h.max(t)))
        });

    HostVitals {
        temperature_c,
        total_memory_kb: system.total_memory() / 1024,
        free_memory_kb: system.available_memory() / 1024,
        hostname: System::host_name(),
    }
}

/// Status shared between the panel loop, the vitals task and the handlers.
#[derive(Debug)]
pub struct DeviceStatus {
    started: Instant,
    vitals: Mutex<HostVitals>,
    load: Mutex<LoadEstimator>,
    display_awake: AtomicBool,
}

impl DeviceStatus {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            vitals: Mutex::new(HostVitals::default()),
            load: Mutex::new(LoadEstimator::new()),
            display_awake: AtomicBool::new(true),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn record_loop_tick(&self, now: Instant) {
        self.load.lock().record(now);
    }

    pub fn cpu_usage(&self) -> f64 {
        self.load.lock().usage()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn vitals(&self) -> HostVitals {
        self.vitals.lock().clone()
    }

    pub fn set_vitals(&self, vitals: HostVitals) {
        *self.vitals.lock() = vitals;
    }

    pub fn display_awake(&self) -> bool {
        self.display_awake.load(Ordering::Relaxed)
    }

    pub fn set_display_awake(&self, awake: bool) {
        self.display_awake.store(awake, Ordering::Relaxed);
    }
}

impl Default for DeviceStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Refreshes host vitals every two seconds until shutdown.
pub async fn vitals_task(status: Arc<DeviceStatus>, mut shutdown: broadcast::Receiver<()>) {
    let mut system = System::new();
    let mut components = Components::new_with_refreshed_list();

    let mut ticker = interval(Duration::from_secs(2));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                system.refresh_memory();
                components.refresh(true);
                status.set_vitals(collect_vitals(&system, &components));
            }
            _ = shutdown.recv() => {
                log::debug!("Vitals task shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_loop_converges_to_full() {
        let mut estimator = LoadEstimator::new();
        let mut now = Instant::now();
        let mut last = 0.0;
        for _ in 0..100 {
            last = estimator.record(now);
            now += Duration::from_millis(5);
        }
        assert!(last > 95.0 && last <= 100.0, "usage {}", last);
    }

    #[test]
    fn test_first_record_has_no_sample() {
        let mut estimator = LoadEstimator::new();
        assert_eq!(estimator.record(Instant::now()), 0.0);
    }

    #[test]
    fn test_usage_stays_in_range() {
        let mut estimator = LoadEstimator::new();
        let mut now = Instant::now();
        for i in 0..50u64 {
            now += Duration::from_millis(1 + (i % 7) * 40);
            let usage = estimator.record(now);
            assert!((0.0..=100.0).contains(&usage));
        }
    }

    #[test]
    fn test_display_flag() {
        let status = DeviceStatus::new();
        assert!(status.display_awake());
        status.set_display_awake(false);
        assert!(!status.display_awake());
    }
}
