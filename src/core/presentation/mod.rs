//! Presentation adapter.
//!
//! Turns extracted values into widget mutations on a [`RenderTarget`]. The
//! adapter is the only writer of widget state; arc sweeps are stepped by
//! [`PresentationAdapter::advance`] from the main loop.

mod animation;
pub mod card;
mod widgets;

pub use animation::{ease_out, ArcAnimation, ARC_ANIMATION};
pub use card::{plan_update, temperature_color, CardPlan, TEMP_MARKER};
pub use widgets::{
    ArcHandle, ArcLabels, CardHandle, CardWidget, LabelHandle, RenderTarget, WidgetTable,
};

use std::collections::HashMap;
use std::time::Instant;

use crate::core::extract::{clamp_percent, CardKind, CompactMetric, GaugeKind, GaugeValue};
use crate::core::theme::{Rgb, ThemeColors};

pub struct PresentationAdapter<R: RenderTarget> {
    target: R,
    widgets: WidgetTable,
    theme: ThemeColors,
    animations: HashMap<ArcHandle, ArcAnimation>,
}

impl<R: RenderTarget> PresentationAdapter<R> {
    pub fn new(target: R, widgets: WidgetTable, theme: ThemeColors) -> Self {
        let mut adapter = Self {
            target,
            widgets,
            theme,
            animations: HashMap::new(),
        };
        adapter.apply_theme(theme);
        adapter
    }

    /// Start a sweep towards `gauge` and refresh the arc's labels.
    pub fn update_gauge(&mut self, kind: GaugeKind, gauge: &GaugeValue, now: Instant) {
        let Some(arc) = self.widgets.arc(kind) else {
            log::debug!("No arc registered for {:?}", kind);
            return;
        };

        let value = clamp_percent(gauge.value());
        let current = self.target.arc_value(arc);

        if current != value || self.animations.contains_key(&arc) {
            // A new sweep replaces the running one and starts where the arc is now
            self.animations
                .insert(arc, ArcAnimation::new(current, value, now));
        }

        if let Some(labels) = self.widgets.labels(arc).copied() {
            if let Some(secondary) = &gauge.secondary {
                self.target.set_label_text(labels.secondary, secondary);
            }
            self.target
                .set_label_text(labels.tertiary, &format!("{}%", value));
        }
    }

    pub fn update_card(&mut self, metric: &CompactMetric) {
        let Some(widget) = self.widgets.card(metric.kind).copied() else {
            log::debug!("No card registered for {:?}", metric.kind);
            return;
        };

        let plan = plan_update(&metric.text);
        log::debug!("Card {:?} -> {}", metric.kind, plan.text);

        self.target.set_label_text(widget.text, &plan.text);
        if let Some(color) = plan.color {
            self.target.set_label_color(widget.text, color);
        }
    }

    /// Recolor every widget. Displayed values and temperature colors stay.
    pub fn apply_theme(&mut self, theme: ThemeColors) {
        self.theme = theme;
        self.target.set_screen_background(theme.bg_color);

        let arcs: Vec<_> = self.widgets.arcs().collect();
        for (kind, arc) in arcs {
            let indicator = match kind {
                GaugeKind::Cpu => theme.cpu_color,
                GaugeKind::Ram => theme.ram_color,
            };
            self.target
                .set_arc_colors(arc, indicator, indicator.darken());

            if let Some(labels) = self.widgets.labels(arc).copied() {
                self.target.set_label_color(labels.title, theme.text_color);
                self.target.set_label_color(labels.secondary, Rgb::GRAY);
                self.target.set_label_color(labels.tertiary, theme.text_color);
            }
        }

        let cards: Vec<_> = self.widgets.cards().map(|(_, w)| *w).collect();
        for widget in cards {
            self.target
                .set_card_style(widget.card, theme.card_bg_color, theme.border_color);
            self.target.set_label_color(widget.icon, theme.text_color);
            if !self.target.label_text(widget.text).contains("°C") {
                self.target.set_label_color(widget.text, theme.text_color);
            }
        }
    }

    /// Step running sweeps; finished ones land exactly on their target.
    pub fn advance(&mut self, now: Instant) {
        let target = &mut self.target;
        self.animations.retain(|arc, animation| {
            target.set_arc_value(*arc, animation.value_at(now));
            !animation.is_finished(now)
        });
    }

    pub fn is_animating(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn set_display_awake(&mut self, awake: bool) {
        log::info!("Display {}", if awake { "awake" } else { "asleep" });
        self.target.set_display_awake(awake);
    }

    pub fn theme(&self) -> &ThemeColors {
        &self.theme
    }

    pub fn widgets(&self) -> &WidgetTable {
        &self.widgets
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut R {
        &mut self.target
    }

    /// Text currently shown on the card for `kind`.
    pub fn card_text(&self, kind: CardKind) -> Option<&str> {
        self.widgets
            .card(kind)
            .map(|widget| self.target.label_text(widget.text))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Flat in-memory target for adapter and scheduler tests.
    #[derive(Debug, Default)]
    pub struct RecordingTarget {
        pub arcs: HashMap<ArcHandle, i32>,
        pub arc_colors: HashMap<ArcHandle, (Rgb, Rgb)>,
        pub labels: HashMap<LabelHandle, String>,
        pub label_colors: HashMap<LabelHandle, Rgb>,
        pub cards: HashMap<CardHandle, (Rgb, Rgb)>,
        pub background: Option<Rgb>,
        pub awake: bool,
    }

    impl RenderTarget for RecordingTarget {
        fn arc_value(&self, arc: ArcHandle) -> i32 {
            self.arcs.get(&arc).copied().unwrap_or(0)
        }
        fn set_arc_value(&mut self, arc: ArcHandle, value: i32) {
            self.arcs.insert(arc, value);
        }
        fn set_arc_colors(&mut self, arc: ArcHandle, indicator: Rgb, background: Rgb) {
            self.arc_colors.insert(arc, (indicator, background));
        }
        fn label_text(&self, label: LabelHandle) -> &str {
            self.labels.get(&label).map(String::as_str).unwrap_or("")
        }
        fn set_label_text(&mut self, label: LabelHandle, text: &str) {
            self.labels.insert(label, text.to_string());
        }
        fn set_label_color(&mut self, label: LabelHandle, color: Rgb) {
            self.label_colors.insert(label, color);
        }
        fn set_card_style(&mut self, card: CardHandle, background: Rgb, border: Rgb) {
            self.cards.insert(card, (background, border));
        }
        fn set_screen_background(&mut self, color: Rgb) {
            self.background = Some(color);
        }
        fn set_display_awake(&mut self, awake: bool) {
            self.awake = awake;
        }
    }

    pub const CPU_ARC: ArcHandle = ArcHandle(0);
    pub const RAM_ARC: ArcHandle = ArcHandle(1);

    /// Two arcs (labels 0..6) and one card per kind (labels from 10).
    pub fn standard_table() -> WidgetTable {
        let mut table = WidgetTable::new();
        table.register_arc(
            GaugeKind::Cpu,
            CPU_ARC,
            ArcLabels {
                title: LabelHandle(0),
                secondary: LabelHandle(1),
                tertiary: LabelHandle(2),
            },
        );
        table.register_arc(
            GaugeKind::Ram,
            RAM_ARC,
            ArcLabels {
                title: LabelHandle(3),
                secondary: LabelHandle(4),
                tertiary: LabelHandle(5),
            },
        );
        for (i, kind) in CardKind::ALL.iter().enumerate() {
            table.register_card(
                *kind,
                CardWidget {
                    card: CardHandle(i),
                    icon: LabelHandle(10 + i * 2),
                    text: LabelHandle(11 + i * 2),
                },
            );
        }
        table
    }

    pub fn adapter() -> PresentationAdapter<RecordingTarget> {
        PresentationAdapter::new(
            RecordingTarget::default(),
            standard_table(),
            ThemeColors::DARK,
        )
    }
}
