//! KPI card row: bordered cards with a small title over a bold value.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::config::Theme;

pub struct KpiCard {
    pub title: String,
    pub value: String,
}

impl KpiCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

/// Renders the cards side by side, each taking an equal share of the row.
pub fn render_kpi_row(area: Rect, buf: &mut Buffer, cards: &[KpiCard], theme: &Theme) {
    if cards.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, cell) in cards.iter().zip(layout.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.get("card_border")));
        let inner = block.inner(*cell);
        block.render(*cell, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        Paragraph::new(card.title.as_str())
            .style(Style::default().fg(theme.get("kpi_title")))
            .centered()
            .render(rows[0], buf);
        Paragraph::new(card.value.as_str())
            .style(
                Style::default()
                    .fg(theme.get("kpi_value"))
                    .add_modifier(Modifier::BOLD),
            )
            .centered()
            .render(rows[1], buf);
    }
}
