//! Widget construction for the two-column panel.

use crate::core::extract::{CardKind, GaugeKind};
use crate::core::icons;
use crate::core::presentation::{ArcLabels, CardWidget, WidgetTable};
use crate::core::theme::{Rgb, ThemeColors};

use super::model::PanelModel;

/// Cards under the CPU arc, top to bottom.
pub const LEFT_CARDS: [CardKind; 3] = [CardKind::Temperature, CardKind::Load, CardKind::Uptime];
/// Cards under the RAM arc, top to bottom.
pub const RIGHT_CARDS: [CardKind; 3] = [CardKind::Disk, CardKind::Cache, CardKind::Network];

fn arc_title(kind: GaugeKind) -> &'static str {
    match kind {
        GaugeKind::Cpu => "CPU",
        GaugeKind::Ram => "RAM",
    }
}

fn arc_caption(kind: GaugeKind) -> &'static str {
    match kind {
        GaugeKind::Cpu => "-- cores",
        GaugeKind::Ram => "-- GB",
    }
}

/// Glyph and placeholder text a card starts with.
pub fn initial_card(kind: CardKind) -> (&'static str, &'static str) {
    match kind {
        CardKind::Temperature => (icons::TEMPERATURE, "Temp: -- °C"),
        CardKind::Load => (icons::LOAD, "Load: -.-"),
        CardKind::Uptime => (icons::POWER, "---"),
        CardKind::Disk => (icons::DRIVE, "Array: ---%"),
        CardKind::Cache => (icons::SAVE, "Cache: ---%"),
        // The network text carries its own arrows
        CardKind::Network => ("", "↓ --- ↑ ---"),
    }
}

/// Create every widget on `model` and return the table that addresses them.
pub fn build_widgets(model: &mut PanelModel, theme: &ThemeColors) -> WidgetTable {
    let mut table = WidgetTable::new();

    for kind in [GaugeKind::Cpu, GaugeKind::Ram] {
        let arc = model.create_arc();
        let labels = ArcLabels {
            title: model.create_label(arc_title(kind), theme.text_color),
            secondary: model.create_label(arc_caption(kind), Rgb::GRAY),
            tertiary: model.create_label("0%", theme.text_color),
        };
        table.register_arc(kind, arc, labels);
    }

    for kind in LEFT_CARDS.into_iter().chain(RIGHT_CARDS) {
        let (icon, text) = initial_card(kind);
        let card = model.create_card();
        let widget = CardWidget {
            card,
            icon: model.create_label(icon, theme.text_color),
            text: model.create_label(text, theme.text_color),
        };
        table.register_card(kind, widget);
    }

    table
}
