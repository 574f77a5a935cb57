use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Paragraph, Widget};

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod format;
pub mod source;
pub mod widgets;

pub use cli::Args;
pub use config::{AppConfig, ConfigManager, Theme};

use aggregate::DashboardStats;
use widgets::barchart::render_category_bars;
use widgets::kpi::{render_kpi_row, KpiCard};
use widgets::video_table::render_video_table;

/// Application name used for the config directory and other app-specific paths
pub const APP_NAME: &str = "tubedash";

#[derive(Default, Clone)]
pub struct OpenOptions {
    pub delimiter: Option<u8>,
    pub has_header: Option<bool>,
    pub top: Option<usize>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = Some(top);
        self
    }
}

impl From<&cli::Args> for OpenOptions {
    fn from(args: &cli::Args) -> Self {
        let mut opts = OpenOptions::new().with_top(args.top);
        if let Some(delimiter) = args.delimiter {
            opts = opts.with_delimiter(delimiter);
        }
        if args.no_header {
            opts = opts.with_has_header(false);
        }
        opts
    }
}

pub enum AppEvent {
    Key(KeyEvent),
    Open(PathBuf, OpenOptions),
    Reload,
    Exit,
    Crash(String),
    Resize(u16, u16), // resized (width, height)
}

pub struct App {
    path: Option<PathBuf>,
    options: OpenOptions,
    stats: Option<DashboardStats>,
    events: Sender<AppEvent>,
    theme: Theme,
    debug: bool,
}

impl App {
    pub fn new(events: Sender<AppEvent>) -> App {
        Self::new_with_theme(events, Theme::default())
    }

    pub fn new_with_theme(events: Sender<AppEvent>, theme: Theme) -> App {
        App {
            path: None,
            options: OpenOptions::default(),
            stats: None,
            events,
            theme,
            debug: false,
        }
    }

    pub fn enable_debug(&mut self) {
        self.debug = true;
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn send_event(&mut self, event: AppEvent) -> Result<()> {
        self.events.send(event)?;
        Ok(())
    }

    /// Loads the CSV and recomputes every statistic from scratch. A reload
    /// repeats the whole sequence; nothing is cached between renders.
    fn load(&mut self, path: &Path, options: &OpenOptions) -> Result<()> {
        let df = source::load_dataset(path, options)?;
        let top = options.top.unwrap_or(aggregate::TOP_VIDEOS_DEFAULT);
        self.stats = Some(DashboardStats::compute(&df, top)?);
        self.path = Some(path.to_path_buf());
        self.options = options.clone();
        Ok(())
    }

    /// Handles one event, optionally producing a follow-up event for the
    /// main loop to enqueue.
    pub fn event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        match event {
            AppEvent::Key(key) => self.handle_key(*key),
            AppEvent::Open(path, options) => {
                let path = path.clone();
                let options = options.clone();
                match self.load(&path, &options) {
                    Ok(()) => None,
                    Err(e) => Some(AppEvent::Crash(format!(
                        "Failed to load {}: {}",
                        path.display(),
                        e
                    ))),
                }
            }
            AppEvent::Reload => {
                let path = self.path.clone()?;
                let options = self.options.clone();
                match self.load(&path, &options) {
                    Ok(()) => None,
                    Err(e) => Some(AppEvent::Crash(format!(
                        "Failed to reload {}: {}",
                        path.display(),
                        e
                    ))),
                }
            }
            AppEvent::Resize(_, _) => None,
            AppEvent::Exit | AppEvent::Crash(_) => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Exit),
            KeyCode::Char('r') => Some(AppEvent::Reload),
            _ => None,
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);
        Paragraph::new("YouTube Analytics Dashboard")
            .style(
                Style::default()
                    .fg(self.theme.get("title"))
                    .add_modifier(Modifier::BOLD),
            )
            .render(rows[0], buf);
        Paragraph::new("Overview of processed YouTube trending data")
            .style(Style::default().fg(self.theme.get("subtitle")))
            .render(rows[1], buf);
    }

    fn render_controls(&self, area: Rect, buf: &mut Buffer) {
        let mut line = String::from(" q: quit  r: refresh");
        if self.debug {
            if let (Some(path), Some(stats)) = (&self.path, &self.stats) {
                line.push_str(&format!(
                    "  |  {} ({} rows)",
                    path.display(),
                    stats.total_videos
                ));
            }
        }
        Paragraph::new(line)
            .style(Style::default().fg(self.theme.get("text_secondary")))
            .render(area, buf);
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // header
                Constraint::Length(4), // KPI cards
                Constraint::Fill(1),   // category charts
                Constraint::Fill(1),   // top videos
                Constraint::Length(1), // controls
            ])
            .split(area);

        self.render_header(layout[0], buf);

        let Some(stats) = &self.stats else {
            Paragraph::new("Loading data...")
                .style(Style::default().fg(self.theme.get("text_secondary")))
                .centered()
                .render(layout[2], buf);
            self.render_controls(layout[4], buf);
            return;
        };

        let cards = [
            KpiCard::new("Total Videos", stats.total_videos.to_string()),
            KpiCard::new("Total Channels", stats.total_channels.to_string()),
            KpiCard::new("Max Views", format::group_thousands(stats.max_views)),
            KpiCard::new(
                "Avg Engagement",
                format::format_engagement(stats.average_engagement),
            ),
        ];
        render_kpi_row(layout[1], buf, &cards, &self.theme);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(layout[2]);
        render_category_bars(
            charts[0],
            buf,
            "Total Views by Category",
            &stats.views_by_category,
            "bar_views",
            format_views_value,
            &self.theme,
        );
        render_category_bars(
            charts[1],
            buf,
            "Average Engagement by Category",
            &stats.engagement_by_category,
            "bar_engagement",
            format::format_engagement,
            &self.theme,
        );

        render_video_table(layout[3], buf, &stats.top_videos, &self.theme);
        self.render_controls(layout[4], buf);
    }
}

fn format_views_value(v: f64) -> String {
    format::group_thousands(v.max(0.0).trunc() as u64)
}
