//! Horizontal bar chart for ranked category tables, with an explicit
//! "insufficient data" fallback when the table is empty.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget},
};

use crate::config::Theme;

/// Renders `entries` (label, value), already sorted descending, as
/// horizontal bars. Fractional values are scaled to integer bar lengths;
/// the printed value is the real one, via `value_fmt`.
pub fn render_category_bars(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    entries: &[(String, f64)],
    color_key: &str,
    value_fmt: fn(f64) -> String,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.get("card_border")))
        .title(format!(" {} ", title));
    let inner = block.inner(area);
    block.render(area, buf);

    if entries.is_empty() {
        Paragraph::new("Not enough valid data")
            .style(Style::default().fg(theme.get("text_secondary")))
            .centered()
            .render(inner, buf);
        return;
    }

    // One row per bar plus a gap row; show as many entries as fit
    let capacity = ((inner.height + 1) / 2) as usize;
    let visible = &entries[..entries.len().min(capacity.max(1))];
    let scaled = scaled_values(visible);

    let bars: Vec<Bar> = visible
        .iter()
        .zip(scaled)
        .map(|((label, value), length)| {
            Bar::default()
                .value(length)
                .label(Line::from(label.clone()))
                .text_value(value_fmt(*value))
        })
        .collect();

    BarChart::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.get(color_key)))
        .label_style(Style::default().fg(theme.get("text_primary")))
        .value_style(Style::default().fg(theme.get("text_primary")))
        .data(BarGroup::default().bars(&bars))
        .render(inner, buf);
}

/// Maps values to integer bar lengths proportional to the largest value.
/// Fractions (engagement ratios) would otherwise all truncate to zero.
fn scaled_values(entries: &[(String, f64)]) -> Vec<u64> {
    let max = entries.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0; entries.len()];
    }
    entries
        .iter()
        .map(|(_, v)| ((v / max) * 10_000.0).round().max(0.0) as u64)
        .collect()
}
