use std::time::Duration;

use glance_panel::core::extract::{CardKind, GaugeKind};
use glance_panel::core::glances::{Endpoint, EndpointResult, MetricSnapshot, MetricSource};
use glance_panel::core::presentation::{card::TEMP_HOT, PresentationAdapter, ARC_ANIMATION};
use glance_panel::core::scheduler::{
    Clock, EndpointOutcome, ExtractionConfig, ManualClock, PollScheduler, PollStep,
};
use glance_panel::core::theme::ThemeColors;
use glance_panel::ui::panel::{build_widgets, PanelModel};
use glance_panel::FetchError;
use serde_json::json;

/// Answers every endpoint from fixed JSON, or HTTP 503 while `down`.
struct FixedSource {
    down: bool,
}

impl MetricSource for FixedSource {
    fn fetch(&mut self, endpoint: Endpoint) -> EndpointResult {
        if self.down {
            return Err(FetchError::HttpError(503));
        }
        let body = match endpoint {
            Endpoint::Cpu => json!({"total": 72.4, "cpucore": 4}),
            Endpoint::Mem => json!({"percent": 41.6, "total": 4294967296u64}),
            Endpoint::Sensors => json!([
                {"label": "acpitz", "value": 30.0},
                {"label": "Package id 0", "value": 55.9}
            ]),
            Endpoint::Fs => json!([
                {"mnt_point": "/rootfs/mnt/disk1", "options": "rw", "size": 400, "used": 100},
                {"mnt_point": "/boot", "options": "rw", "size": 100, "used": 90}
            ]),
            Endpoint::Uptime => json!("3:14:15"),
            Endpoint::Network => json!([
                {"interface_name": "eth0", "bytes_recv_rate_per_sec": 500.0, "bytes_sent_rate_per_sec": 1536.0}
            ]),
            Endpoint::Load => json!({"min1": 0.73, "min5": 0.5}),
        };
        Ok(MetricSnapshot::new(body))
    }
}

fn panel() -> PresentationAdapter<PanelModel> {
    let mut model = PanelModel::new();
    let widgets = build_widgets(&mut model, &ThemeColors::DARK);
    PresentationAdapter::new(model, widgets, ThemeColors::DARK)
}

#[test]
fn test_cycle_drives_panel() {
    let clock = ManualClock::new();
    let mut scheduler = PollScheduler::with_clock(clock.clone(), ExtractionConfig::default());
    let mut source = FixedSource { down: false };
    let mut adapter = panel();

    let report = scheduler.tick(&mut source, &mut adapter).unwrap();
    assert_eq!(
        report.outcome(PollStep::Cpu),
        Some(&EndpointOutcome::Updated)
    );

    assert_eq!(adapter.card_text(CardKind::Temperature), Some(" 55°C"));
    assert_eq!(adapter.card_text(CardKind::Disk), Some("Array: 25.0%"));
    assert_eq!(adapter.card_text(CardKind::Cache), Some("Cache: ---%"));
    assert_eq!(adapter.card_text(CardKind::Uptime), Some("3:14:15"));
    assert_eq!(adapter.card_text(CardKind::Network), Some("↓ 500B    ↑ 1.5K"));
    assert_eq!(adapter.card_text(CardKind::Load), Some("Load: 0.7"));

    let temp = adapter.widgets().card(CardKind::Temperature).unwrap().text;
    assert_eq!(adapter.target().label(temp).unwrap().color, TEMP_HOT);
}

#[test]
fn test_arcs_settle_after_animation() {
    let clock = ManualClock::new();
    let mut scheduler = PollScheduler::with_clock(clock.clone(), ExtractionConfig::default());
    let mut source = FixedSource { down: false };
    let mut adapter = panel();

    scheduler.tick(&mut source, &mut adapter).unwrap();
    assert!(adapter.is_animating());

    clock.advance(ARC_ANIMATION);
    adapter.advance(clock.now());
    assert!(!adapter.is_animating());

    let cpu = adapter.widgets().arc(GaugeKind::Cpu).unwrap();
    let ram = adapter.widgets().arc(GaugeKind::Ram).unwrap();
    assert_eq!(adapter.target().arc(cpu).unwrap().value, 72);
    assert_eq!(adapter.target().arc(ram).unwrap().value, 42);

    let labels = adapter.widgets().labels(cpu).unwrap();
    let caption = adapter.target().label(labels.secondary).unwrap();
    assert_eq!(caption.text, "4 cores");
}

#[test]
fn test_outage_keeps_last_values() {
    let clock = ManualClock::new();
    let mut scheduler = PollScheduler::with_clock(clock.clone(), ExtractionConfig::default());
    let mut source = FixedSource { down: false };
    let mut adapter = panel();
    scheduler.tick(&mut source, &mut adapter).unwrap();

    source.down = true;
    clock.advance(Duration::from_secs(2));
    let report = scheduler.tick(&mut source, &mut adapter).unwrap();

    assert_eq!(report.failures(), PollStep::SEQUENCE.len());
    assert_eq!(adapter.card_text(CardKind::Load), Some("Load: 0.7"));
    assert_eq!(adapter.card_text(CardKind::Uptime), Some("3:14:15"));
}
