use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::core::extract::{CardKind, GaugeKind};
use crate::core::presentation::{LabelHandle, PresentationAdapter, RenderTarget};
use crate::ui::formatters::to_color;

use super::layout::{LEFT_CARDS, RIGHT_CARDS};
use super::model::PanelModel;

/// Footer contents that do not live in the widget tree.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub target: String,
    pub last_poll: Option<String>,
    pub failures: usize,
}

/// Main render function
pub fn render_panel(
    frame: &mut Frame,
    adapter: &PresentationAdapter<PanelModel>,
    status: &StatusLine,
) {
    let area = frame.area();
    let model = adapter.target();

    if !model.is_awake() {
        let blank = Block::default().style(Style::default().bg(Color::Black));
        frame.render_widget(blank, area);
        return;
    }

    let screen = Block::default().style(Style::default().bg(to_color(model.background())));
    frame.render_widget(screen, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    render_column(frame, columns[0], adapter, GaugeKind::Cpu, &LEFT_CARDS);
    render_column(frame, columns[1], adapter, GaugeKind::Ram, &RIGHT_CARDS);
    render_footer(frame, chunks[1], adapter, status);
}

fn render_column(
    frame: &mut Frame,
    area: Rect,
    adapter: &PresentationAdapter<PanelModel>,
    gauge: GaugeKind,
    cards: &[CardKind],
) {
    let mut constraints = vec![Constraint::Min(5)];
    constraints.extend(cards.iter().map(|_| Constraint::Length(3)));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_arc(frame, rows[0], adapter, gauge);
    for (i, kind) in cards.iter().enumerate() {
        render_card(frame, rows[i + 1], adapter, *kind);
    }
}

fn render_arc(
    frame: &mut Frame,
    area: Rect,
    adapter: &PresentationAdapter<PanelModel>,
    kind: GaugeKind,
) {
    let model = adapter.target();
    let widgets = adapter.widgets();

    let Some(arc) = widgets.arc(kind) else {
        return;
    };
    let (Some(state), Some(labels)) = (model.arc(arc), widgets.labels(arc)) else {
        return;
    };

    let styled = |handle: LabelHandle| {
        let color = model.label(handle).map_or(Color::Reset, |l| to_color(l.color));
        Span::styled(model.label_text(handle).to_string(), Style::default().fg(color))
    };

    let block = Block::default()
        .title(styled(labels.title).bold())
        .title_bottom(Line::from(styled(labels.secondary)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(to_color(adapter.theme().border_color)));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(to_color(state.indicator))
                .bg(to_color(state.background)),
        )
        .percent(state.value.clamp(0, 100) as u16)
        .label(styled(labels.tertiary).bold());

    frame.render_widget(gauge, area);
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    adapter: &PresentationAdapter<PanelModel>,
    kind: CardKind,
) {
    let model = adapter.target();
    let Some(widget) = adapter.widgets().card(kind) else {
        return;
    };
    let Some(card) = model.card(widget.card) else {
        return;
    };

    let mut spans = Vec::with_capacity(3);
    for handle in [widget.icon, widget.text] {
        if let Some(label) = model.label(handle) {
            if label.text.is_empty() {
                continue;
            }
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                label.text.clone(),
                Style::default().fg(to_color(label.color)),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(to_color(card.border)))
            .style(Style::default().bg(to_color(card.background))),
    );

    frame.render_widget(paragraph, area);
}

fn render_footer(
    frame: &mut Frame,
    area: Rect,
    adapter: &PresentationAdapter<PanelModel>,
    status: &StatusLine,
) {
    let theme = adapter.theme();
    let last_poll = status.last_poll.as_deref().unwrap_or("never");

    let text = format!(
        " q quit  d theme │ {} │ last poll {} │ {} failed ",
        status.target, last_poll, status.failures
    );

    let footer = Paragraph::new(text).style(
        Style::default()
            .fg(to_color(theme.text_color))
            .bg(to_color(theme.bg_color)),
    );
    frame.render_widget(footer, area);
}
