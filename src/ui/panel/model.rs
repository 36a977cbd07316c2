use crate::core::presentation::{ArcHandle, CardHandle, LabelHandle, RenderTarget};
use crate::core::theme::Rgb;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcState {
    pub value: i32,
    pub indicator: Rgb,
    pub background: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelState {
    pub text: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState {
    pub background: Rgb,
    pub border: Rgb,
}

/// In-memory widget tree drawn by the terminal panel.
///
/// Handles index into flat vectors; unknown handles are ignored.
#[derive(Debug, Clone)]
pub struct PanelModel {
    arcs: Vec<ArcState>,
    labels: Vec<LabelState>,
    cards: Vec<CardState>,
    background: Rgb,
    awake: bool,
}

impl PanelModel {
    pub fn new() -> Self {
        Self {
            arcs: Vec::new(),
            labels: Vec::new(),
            cards: Vec::new(),
            background: Rgb(0),
            awake: true,
        }
    }

    pub fn create_arc(&mut self) -> ArcHandle {
        self.arcs.push(ArcState {
            value: 0,
            indicator: Rgb::WHITE,
            background: Rgb::GRAY,
        });
        ArcHandle(self.arcs.len() - 1)
    }

    pub fn create_label(&mut self, text: &str, color: Rgb) -> LabelHandle {
        self.labels.push(LabelState {
            text: text.to_string(),
            color,
        });
        LabelHandle(self.labels.len() - 1)
    }

    pub fn create_card(&mut self) -> CardHandle {
        self.cards.push(CardState {
            background: Rgb(0),
            border: Rgb::GRAY,
        });
        CardHandle(self.cards.len() - 1)
    }

    pub fn arc(&self, arc: ArcHandle) -> Option<&ArcState> {
        self.arcs.get(arc.0)
    }

    pub fn label(&self, label: LabelHandle) -> Option<&LabelState> {
        self.labels.get(label.0)
    }

    pub fn card(&self, card: CardHandle) -> Option<&CardState> {
        self.cards.get(card.0)
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn is_awake(&self) -> bool {
        self.awake
    }
}

impl Default for PanelModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for PanelModel {
    fn arc_value(&self, arc: ArcHandle) -> i32 {
        self.arcs.get(arc.0).map_or(0, |a| a.value)
    }

    fn set_arc_value(&mut self, arc: ArcHandle, value: i32) {
        if let Some(state) = self.arcs.get_mut(arc.0) {
            state.value = value;
        }
    }

    fn set_arc_colors(&mut self, arc: ArcHandle, indicator: Rgb, background: Rgb) {
        if let Some(state) = self.arcs.get_mut(arc.0) {
            state.indicator = indicator;
            state.background = background;
        }
    }

    fn label_text(&self, label: LabelHandle) -> &str {
        self.labels.get(label.0).map_or("", |l| l.text.as_str())
    }

    fn set_label_text(&mut self, label: LabelHandle, text: &str) {
        if let Some(state) = self.labels.get_mut(label.0) {
            state.text.clear();
            state.text.push_str(text);
        }
    }

    fn set_label_color(&mut self, label: LabelHandle, color: Rgb) {
        if let Some(state) = self.labels.get_mut(label.0) {
            state.color = color;
        }
    }

    fn set_card_style(&mut self, card: CardHandle, background: Rgb, border: Rgb) {
        if let Some(state) = self.cards.get_mut(card.0) {
            state.background = background;
            state.border = border;
        }
    }

    fn set_screen_background(&mut self, color: Rgb) {
        self.background = color;
    }

    fn set_display_awake(&mut self, awake: bool) {
        self.awake = awake;
    }
}
