//! Poll scheduler.
//!
//! A timestamp gate in front of one synchronous fetch-extract-present pass
//! over every endpoint. The pass always runs to completion; any endpoint may
//! fail without affecting the others.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use crate::core::config::Settings;
use crate::core::extract::{
    aggregate_array, extract_cpu, extract_load, extract_memory, extract_network,
    extract_temperature, extract_uptime, select_cache, CompactMetric, GaugeKind, GaugeValue,
    MountPolicy,
};
use crate::core::glances::{Endpoint, MetricSnapshot, MetricSource};
use crate::core::presentation::{PresentationAdapter, RenderTarget};
use crate::error::FieldMissing;

pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock(Arc<Mutex<Instant>>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Instant::now())))
    }

    pub fn advance(&self, by: Duration) {
        *self.0.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.0.lock()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PollState {
    last_poll: Option<Instant>,
    first_run: bool,
}

impl PollState {
    pub fn new() -> Self {
        Self {
            last_poll: None,
            first_run: true,
        }
    }

    /// Never polled counts as due.
    pub fn is_due(&self, now: Instant, interval: Duration) -> bool {
        match self.last_poll {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= interval,
        }
    }

    pub fn last_poll(&self) -> Option<Instant> {
        self.last_poll
    }

    pub fn first_run(&self) -> bool {
        self.first_run
    }

    fn complete(&mut self, at: Instant) {
        self.last_poll = Some(at);
        self.first_run = false;
    }
}

impl Default for PollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings the extractors need on every cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub interface: String,
    pub sensor_label: String,
    pub mount_policy: MountPolicy,
}

impl ExtractionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            interface: settings.interface_name.clone(),
            sensor_label: settings.sensor_label.clone(),
            mount_policy: MountPolicy::default(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// One step of a poll cycle, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStep {
    Cpu,
    Memory,
    Sensors,
    FsArray,
    FsCache,
    Uptime,
    Network,
    Load,
}

impl PollStep {
    pub const SEQUENCE: [PollStep; 8] = [
        PollStep::Cpu,
        PollStep::Memory,
        PollStep::Sensors,
        PollStep::FsArray,
        PollStep::FsCache,
        PollStep::Uptime,
        PollStep::Network,
        PollStep::Load,
    ];

    pub fn endpoint(self) -> Endpoint {
        match self {
            PollStep::Cpu => Endpoint::Cpu,
            PollStep::Memory => Endpoint::Mem,
            PollStep::Sensors => Endpoint::Sensors,
            PollStep::FsArray | PollStep::FsCache => Endpoint::Fs,
            PollStep::Uptime => Endpoint::Uptime,
            PollStep::Network => Endpoint::Network,
            PollStep::Load => Endpoint::Load,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum EndpointOutcome {
    Updated,
    /// Valid payload without anything to show, e.g. no matching sensor.
    Unchanged,
    Failed(String),
}

impl EndpointOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, EndpointOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: PollStep,
    pub outcome: EndpointOutcome,
}

/// What one poll cycle did.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
    pub gauges: Vec<(GaugeKind, GaugeValue)>,
    pub cards: Vec<CompactMetric>,
}

impl CycleReport {
    fn new() -> Self {
        Self {
            started_at: Utc::now(),
            steps: Vec::with_capacity(PollStep::SEQUENCE.len()),
            gauges: Vec::new(),
            cards: Vec::new(),
        }
    }

    pub fn outcome(&self, step: PollStep) -> Option<&EndpointOutcome> {
        self.steps
            .iter()
            .find(|report| report.step == step)
            .map(|report| &report.outcome)
    }

    pub fn failures(&self) -> usize {
        self.steps
            .iter()
            .filter(|report| report.outcome.is_failure())
            .count()
    }
}

enum Presented {
    Gauge(GaugeKind, GaugeValue),
    Card(CompactMetric),
    Nothing,
}

pub struct PollScheduler<C: Clock = SystemClock> {
    clock: C,
    interval: Duration,
    state: PollState,
    extraction: ExtractionConfig,
}

impl PollScheduler<SystemClock> {
    pub fn new(extraction: ExtractionConfig) -> Self {
        Self::with_clock(SystemClock, extraction)
    }
}

impl<C: Clock> PollScheduler<C> {
    pub fn with_clock(clock: C, extraction: ExtractionConfig) -> Self {
        Self {
            clock,
            interval: POLL_INTERVAL,
            state: PollState::new(),
            extraction,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn set_extraction(&mut self, extraction: ExtractionConfig) {
        self.extraction = extraction;
    }

    /// Run a cycle if the interval has elapsed since the last one.
    pub fn tick<S, R>(
        &mut self,
        source: &mut S,
        adapter: &mut PresentationAdapter<R>,
    ) -> Option<CycleReport>
    where
        S: MetricSource + ?Sized,
        R: RenderTarget,
    {
        if !self.state.is_due(self.clock.now(), self.interval) {
            return None;
        }
        Some(self.run_cycle(source, adapter))
    }

    /// Run one full cycle regardless of the gate.
    pub fn run_cycle<S, R>(
        &mut self,
        source: &mut S,
        adapter: &mut PresentationAdapter<R>,
    ) -> CycleReport
    where
        S: MetricSource + ?Sized,
        R: RenderTarget,
    {
        if self.state.first_run() {
            log::info!("Starting first poll cycle");
        }

        let mut report = CycleReport::new();
        let started = self.clock.now();

        for step in PollStep::SEQUENCE {
            let endpoint = step.endpoint();
            let outcome = match source.fetch(endpoint) {
                Err(e) => {
                    log::debug!("Skipping {:?}: {}", step, e);
                    EndpointOutcome::Failed(e.to_string())
                }
                Ok(snapshot) => match self.extract(step, &snapshot) {
                    Err(e) => {
                        log::warn!("{}", e);
                        EndpointOutcome::Failed(e.to_string())
                    }
                    Ok(Presented::Nothing) => EndpointOutcome::Unchanged,
                    Ok(Presented::Gauge(kind, gauge)) => {
                        adapter.update_gauge(kind, &gauge, started);
                        report.gauges.push((kind, gauge));
                        EndpointOutcome::Updated
                    }
                    Ok(Presented::Card(metric)) => {
                        adapter.update_card(&metric);
                        report.cards.push(metric);
                        EndpointOutcome::Updated
                    }
                },
            };
            report.steps.push(StepReport { step, outcome });
        }

        self.state.complete(self.clock.now());

        log::debug!(
            "Poll cycle finished: {} of {} steps failed",
            report.failures(),
            report.steps.len()
        );
        report
    }

    fn extract(&self, step: PollStep, snapshot: &MetricSnapshot) -> Result<Presented, FieldMissing> {
        let config = &self.extraction;
        let presented = match step {
            PollStep::Cpu => Presented::Gauge(GaugeKind::Cpu, extract_cpu(snapshot)?.gauge()),
            PollStep::Memory => {
                Presented::Gauge(GaugeKind::Ram, extract_memory(snapshot)?.gauge())
            }
            PollStep::Sensors => extract_temperature(snapshot, &config.sensor_label)?
                .map_or(Presented::Nothing, |t| Presented::Card(t.metric())),
            PollStep::FsArray => aggregate_array(snapshot, &config.mount_policy)?
                .metric()
                .map_or(Presented::Nothing, Presented::Card),
            PollStep::FsCache => select_cache(snapshot, &config.mount_policy)?
                .map_or(Presented::Nothing, |c| Presented::Card(c.metric())),
            PollStep::Uptime => Presented::Card(extract_uptime(snapshot)?),
            PollStep::Network => extract_network(snapshot, &config.interface)?
                .map_or(Presented::Nothing, |n| Presented::Card(n.metric())),
            PollStep::Load => Presented::Card(extract_load(snapshot)?.metric()),
        };
        Ok(presented)
    }
}
