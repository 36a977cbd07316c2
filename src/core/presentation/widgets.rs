//! Render-target capabilities and the typed widget table.

use std::collections::HashMap;

use crate::core::extract::{CardKind, GaugeKind};
use crate::core::theme::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArcHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardHandle(pub usize);

/// Widget operations the adapter needs from whatever draws the panel.
///
/// Implementations own the widgets; callers only ever hold handles.
pub trait RenderTarget {
    fn arc_value(&self, arc: ArcHandle) -> i32;
    fn set_arc_value(&mut self, arc: ArcHandle, value: i32);
    fn set_arc_colors(&mut self, arc: ArcHandle, indicator: Rgb, background: Rgb);

    fn label_text(&self, label: LabelHandle) -> &str;
    fn set_label_text(&mut self, label: LabelHandle, text: &str);
    fn set_label_color(&mut self, label: LabelHandle, color: Rgb);

    fn set_card_style(&mut self, card: CardHandle, background: Rgb, border: Rgb);
    fn set_screen_background(&mut self, color: Rgb);

    fn set_display_awake(&mut self, awake: bool);
}

/// The three labels drawn around an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcLabels {
    pub title: LabelHandle,
    pub secondary: LabelHandle,
    pub tertiary: LabelHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardWidget {
    pub card: CardHandle,
    pub icon: LabelHandle,
    pub text: LabelHandle,
}

/// Maps metric kinds to the widgets that display them.
#[derive(Debug, Clone, Default)]
pub struct WidgetTable {
    arcs: HashMap<GaugeKind, ArcHandle>,
    arc_labels: HashMap<ArcHandle, ArcLabels>,
    cards: HashMap<CardKind, CardWidget>,
}

impl WidgetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_arc(&mut self, kind: GaugeKind, arc: ArcHandle, labels: ArcLabels) {
        self.arcs.insert(kind, arc);
        self.arc_labels.insert(arc, labels);
    }

    pub fn register_card(&mut self, kind: CardKind, widget: CardWidget) {
        self.cards.insert(kind, widget);
    }

    pub fn arc(&self, kind: GaugeKind) -> Option<ArcHandle> {
        self.arcs.get(&kind).copied()
    }

    pub fn labels(&self, arc: ArcHandle) -> Option<&ArcLabels> {
        self.arc_labels.get(&arc)
    }

    pub fn card(&self, kind: CardKind) -> Option<&CardWidget> {
        self.cards.get(&kind)
    }

    pub fn arcs(&self) -> impl Iterator<Item = (GaugeKind, ArcHandle)> + '_ {
        self.arcs.iter().map(|(kind, arc)| (*kind, *arc))
    }

    pub fn cards(&self) -> impl Iterator<Item = (CardKind, &CardWidget)> + '_ {
        self.cards.iter().map(|(kind, widget)| (*kind, widget))
    }
}
