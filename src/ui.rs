use ratatui::{prelude::*, widgets::*};

use crate::resource::{FetchStatus, Resource};
use crate::storage::Theme;

/// Colors for one theme
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub highlight_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Light => Palette {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::DarkGray,
                border: Color::Gray,
                accent: Color::Green,
                highlight_bg: Color::Rgb(209, 250, 229),
            },
            Theme::Dark => Palette {
                bg: Color::Rgb(2, 6, 23),
                fg: Color::Rgb(203, 213, 225),
                muted: Color::Gray,
                border: Color::Rgb(51, 65, 85),
                accent: Color::LightGreen,
                highlight_bg: Color::Rgb(6, 78, 59),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn block<'a>(&self, title: impl Into<Line<'a>>) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border))
            .title(title)
            .style(self.base())
    }
}

/// Badge color for a status or risk level
pub fn status_color(status: &str) -> Color {
    match status {
        "High Risk" | "High" => Color::Red,
        "Medium Risk" | "Medium" => Color::Yellow,
        "Anomalous" => Color::LightRed,
        "Low" | "Normal" => Color::Blue,
        "Resolved" | "Ready" => Color::Green,
        "Pending" => Color::Gray,
        _ => Color::DarkGray,
    }
}

/// Status rendered as a colored badge cell
pub fn badge(status: &str) -> Cell<'static> {
    Cell::from(Span::styled(
        format!("● {}", status),
        Style::default().fg(status_color(status)).bold(),
    ))
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize, palette: Palette) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(palette.muted).bg(palette.bg))
        .highlight_style(Style::default().fg(palette.accent).bold())
        .divider("|")
}

/// Title suffix describing a resource's fetch state
pub fn fetch_indicator<T>(resource: &Resource<T>) -> &'static str {
    match resource.status() {
        FetchStatus::Idle => "",
        FetchStatus::Pending => " [loading...]",
        FetchStatus::SettledOk => "",
        FetchStatus::SettledError => " [error]",
    }
}

/// One line explaining a failed fetch, if any
pub fn failure_line<T>(resource: &Resource<T>) -> Option<Line<'static>> {
    resource.failure().map(|message| {
        Line::from(Span::styled(
            format!("! {}", message),
            Style::default().fg(Color::Red),
        ))
    })
}

/// A stat card: title, big value, optional failure line
pub fn stat_card<'a>(
    title: &'a str,
    value: String,
    color: Color,
    palette: Palette,
) -> Paragraph<'a> {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(value, Style::default().fg(color).bold())),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(palette.block(format!(" {} ", title)))
}

/// A horizontal bar with a label and percentage
pub fn progress_item<'a>(label: &'a str, percent: f64, color: Color, palette: Palette) -> Gauge<'a> {
    Gauge::default()
        .block(Block::default().title(label).style(palette.base()))
        .gauge_style(Style::default().fg(color).bg(palette.border))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.1}%", percent))
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
