//! Top-videos table: rank, label, view count, and whichever of the
//! original row fields exist in the dataset.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use crate::aggregate::TopVideo;
use crate::config::Theme;
use crate::format::group_thousands;

pub fn render_video_table(area: Rect, buf: &mut Buffer, videos: &[TopVideo], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.get("card_border")))
        .title(" Top Videos by Views ");
    let inner = block.inner(area);
    block.render(area, buf);

    if videos.is_empty() {
        Paragraph::new("Not enough valid data")
            .style(Style::default().fg(theme.get("text_secondary")))
            .centered()
            .render(inner, buf);
        return;
    }

    let has_channel = videos.iter().any(|v| v.channel_title.is_some());
    let has_category = videos.iter().any(|v| v.category_id.is_some());
    let has_likes = videos.iter().any(|v| v.likes.is_some());

    let mut header = vec!["#", "Title", "Views"];
    let mut widths = vec![
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(14),
    ];
    if has_channel {
        header.push("Channel");
        widths.push(Constraint::Length(22));
    }
    if has_category {
        header.push("Category");
        widths.push(Constraint::Length(10));
    }
    if has_likes {
        header.push("Likes");
        widths.push(Constraint::Length(12));
    }

    let header = Row::new(header.into_iter().map(Cell::from)).style(
        Style::default()
            .fg(theme.get("table_header"))
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = videos
        .iter()
        .enumerate()
        .map(|(i, video)| {
            let mut cells = vec![
                Cell::from((i + 1).to_string()),
                Cell::from(video.label.clone()),
                Cell::from(group_thousands(video.views)),
            ];
            if has_channel {
                cells.push(Cell::from(
                    video.channel_title.clone().unwrap_or_else(|| "-".into()),
                ));
            }
            if has_category {
                cells.push(Cell::from(
                    video.category_id.clone().unwrap_or_else(|| "-".into()),
                ));
            }
            if has_likes {
                cells.push(Cell::from(
                    video
                        .likes
                        .map(|l| group_thousands(l.max(0.0).trunc() as u64))
                        .unwrap_or_else(|| "-".into()),
                ));
            }
            Row::new(cells).style(Style::default().fg(theme.get("text_primary")))
        })
        .collect();

    Table::new(rows, widths).header(header).render(inner, buf);
}
