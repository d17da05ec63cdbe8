//! SATRIA TUI - Actor-based fraud-detection dashboard
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async API requests

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use satria_tui::app::state::{NoticeKind, PageView};
use satria_tui::app::{AppActor, AppState};
use satria_tui::constants::{API_BASE_URL, APP_NAME, APP_VERSION, RECENT_ALERTS_LIMIT};
use satria_tui::messages::ui_events::key_to_ui_event;
use satria_tui::messages::{NetworkCommand, NetworkResponse, Page, RenderState, UiEvent};
use satria_tui::models::{format_count, format_rupiah};
use satria_tui::network::{ApiClient, NetworkActor};
use satria_tui::storage::{SettingsStore, Theme};
use satria_tui::ui::{self, Palette};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "satria.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let settings = SettingsStore::load();
    tracing::info!(version = APP_VERSION, base_url = API_BASE_URL, theme = settings.theme().as_str(), "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(ApiClient::new(API_BASE_URL), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(settings, API_BASE_URL), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(event) =
                    key_to_ui_event(key, current_state.page(), current_state.popup_open())
                {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();
    let palette = Palette::for_theme(state.theme);
    f.render_widget(Block::default().style(palette.base()), area);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header
            Constraint::Min(0),     // Page
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_header(f, state, palette, main_chunks[0]);

    match &state.view {
        PageView::Dashboard { .. } => draw_dashboard(f, state, palette, main_chunks[1]),
        PageView::Analysis { .. } => draw_analysis(f, state, palette, main_chunks[1]),
        PageView::Alerts { .. } => draw_alerts(f, state, palette, main_chunks[1]),
        PageView::Audit { .. } => draw_audit(f, state, palette, main_chunks[1]),
        PageView::Reports { .. } => draw_reports(f, state, palette, main_chunks[1]),
        PageView::Settings { .. } => draw_settings(f, state, palette, main_chunks[1]),
    }

    draw_status_bar(f, state, palette, main_chunks[2]);

    // Popups
    if state.show_notifications {
        draw_notifications_popup(f, state, palette, area);
    }
    if state.show_help {
        draw_help_popup(f, palette, area);
    }
    if state.notice.is_some() {
        draw_notice_popup(f, state, palette, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14),
            Constraint::Min(0),
            Constraint::Length(20),
        ])
        .split(area);

    let brand = Paragraph::new(Span::styled(
        format!(" {} ", APP_NAME),
        Style::default().fg(palette.accent).bold(),
    ))
    .style(palette.base());
    f.render_widget(brand, chunks[0]);

    let titles: Vec<String> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}:{}", i + 1, p.title()))
        .collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    f.render_widget(ui::render_tabs(&titles, state.page().index(), palette), chunks[1]);

    let theme_icon = match state.theme {
        Theme::Light => "☀ light",
        Theme::Dark => "☾ dark",
    };
    let bell = if state.notifications.is_empty() {
        "🔔 0".to_string()
    } else {
        format!("🔔 {}", state.notifications.len())
    };
    let right = Paragraph::new(format!("{}  {} ", theme_icon, bell))
        .alignment(Alignment::Right)
        .style(Style::default().fg(palette.muted).bg(palette.bg));
    f.render_widget(right, chunks[2]);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let hints = match state.page() {
        Page::Reports => " g:generate  d:json  c:csv  ↑/↓:select  r:refresh  t:theme  n:alerts  ?:help  q:quit",
        Page::Settings => " t:theme  r:refresh  n:alerts  ?:help  q:quit",
        _ => " 1-6/Tab:page  ↑/↓:select  r:refresh  t:theme  n:alerts  ?:help  q:quit",
    };
    let mut spans = vec![Span::styled(hints, Style::default().fg(palette.muted))];
    if state.generating {
        spans.push(Span::styled("  [generating...]", Style::default().fg(Color::Yellow)));
    }
    if state.downloading {
        spans.push(Span::styled("  [downloading...]", Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).style(palette.base()), area);
}

/// Standard table with a highlighted selected row
fn draw_table(
    f: &mut Frame,
    area: Rect,
    palette: Palette,
    title: String,
    headers: &[&'static str],
    widths: &[Constraint],
    rows: Vec<Row<'static>>,
    selected: Option<usize>,
    footer: Option<Line<'static>>,
) {
    let empty = rows.is_empty();
    let header = Row::new(headers.iter().map(|h| Cell::from(*h)))
        .style(Style::default().fg(palette.muted).bold());

    let mut block = palette.block(title);
    if let Some(line) = footer {
        block = block.title_bottom(line);
    }

    let table = Table::new(rows, widths.to_vec())
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(palette.highlight_bg).bold())
        .highlight_symbol("› ");

    let mut table_state = TableState::default().with_selected(if empty { None } else { selected });
    f.render_stateful_widget(table, area, &mut table_state);
}

// ----------------------------------------------------------------------------
// Dashboard
// ----------------------------------------------------------------------------

fn draw_dashboard(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let PageView::Dashboard { overview, trends } = &state.view else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(9),
        ])
        .split(area);

    // Cards show zero while the overview is loading
    let stats = overview.payload();
    let loading = overview.is_loading();
    let active = if loading { 0 } else { stats.fraud_alerts.active };
    let cards = [
        ("Total Claims", format_count(if loading { 0 } else { stats.total_claims }), Color::Blue),
        ("Anomalies Detected", format_count(active), Color::Red),
        (
            "Potential Savings",
            format!("Rp {}M", if loading { 0 } else { stats.savings_millions() }),
            Color::Green,
        ),
        ("Pending Review", format_count(active), Color::Yellow),
    ];
    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);
    for ((title, value, color), card_area) in cards.into_iter().zip(card_areas.iter()) {
        f.render_widget(ui::stat_card(title, value, color, palette), *card_area);
    }

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
        .split(rows[1]);

    // Trend chart
    let points = &trends.payload().data;
    let title = format!(" Claim Trends Analysis{} ", ui::fetch_indicator(trends));
    if points.is_empty() {
        let message = match ui::failure_line(trends) {
            Some(line) => line,
            None if loading || trends.is_loading() => Line::from("Loading chart..."),
            None => Line::from("No trend data available"),
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted))
            .block(palette.block(title));
        f.render_widget(empty, middle[0]);
    } else {
        let claims: Vec<(f64, f64)> = points.iter().enumerate().map(|(i, p)| (i as f64, p.claims)).collect();
        let anomalies: Vec<(f64, f64)> = points.iter().enumerate().map(|(i, p)| (i as f64, p.anomalies)).collect();
        let max_y = points
            .iter()
            .map(|p| p.claims.max(p.anomalies))
            .fold(0.0_f64, f64::max)
            .max(1.0);
        let max_x = (points.len().saturating_sub(1)).max(1) as f64;

        let datasets = vec![
            Dataset::default()
                .name("Claims")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Blue))
                .data(&claims),
            Dataset::default()
                .name("Anomalies")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Green))
                .data(&anomalies),
        ];
        let first = points.first().map(|p| p.label().to_string()).unwrap_or_default();
        let last = points.last().map(|p| p.label().to_string()).unwrap_or_default();

        let chart = Chart::new(datasets)
            .block(palette.block(title))
            .x_axis(
                Axis::default()
                    .bounds([0.0, max_x])
                    .labels(vec![first, last])
                    .style(Style::default().fg(palette.muted)),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, max_y])
                    .labels(vec!["0".to_string(), format!("{:.0}", max_y)])
                    .style(Style::default().fg(palette.muted)),
            );
        f.render_widget(chart, middle[0]);
    }

    // System health
    let health_block = palette.block(" System Health ");
    let inner = health_block.inner(middle[1]);
    f.render_widget(health_block, middle[1]);
    let bars = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2); 3])
        .split(inner);
    for ((label, percent, color), bar_area) in [
        ("API Connection", 100.0, Color::Green),
        ("Model Confidence", 92.5, Color::Blue),
        ("Database Latency", 15.0, Color::Magenta),
    ]
    .into_iter()
    .zip(bars.iter())
    {
        f.render_widget(ui::progress_item(label, percent, color, palette), *bar_area);
    }

    // Recent alerts
    let table_rows: Vec<Row> = stats
        .recent_alerts
        .iter()
        .take(RECENT_ALERTS_LIMIT)
        .map(|alert| {
            let level = alert.level_or("High").to_string();
            Row::new(vec![
                Cell::from(format!("{}...", alert.short_id())),
                Cell::from(format!("{}...", alert.short_claim_id())),
                ui::badge(&level),
                Cell::from(alert.date()),
                Cell::from(alert.action().to_string()),
            ])
        })
        .collect();
    draw_table(
        f,
        rows[2],
        palette,
        format!(" Recent High Priority Alerts{} ", ui::fetch_indicator(overview)),
        &["Alert ID", "Klaim ID", "Risk Level", "Date", "Action"],
        &[
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
        table_rows,
        Some(state.selected_row),
        ui::failure_line(overview),
    );
}

// ----------------------------------------------------------------------------
// Claim analysis
// ----------------------------------------------------------------------------

fn draw_analysis(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let PageView::Analysis { chart, claims } = &state.view else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(6)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    // Distribution
    let slices = chart.payload().slices();
    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    let mut lines = vec![Line::from("")];
    if slices.is_empty() {
        lines.push(Line::from(Span::styled(
            "No anomaly data available",
            Style::default().fg(palette.muted),
        )));
    }
    for (name, value) in &slices {
        let color = if name.starts_with("Normal") { Color::Green } else { Color::Red };
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(color)),
            Span::raw(format!("{:<18}", name)),
            Span::styled(
                format!("{:>8} ({:.1}%)", format_count(*value as u64), value / total * 100.0),
                Style::default().bold(),
            ),
        ]));
    }
    if let Some(line) = ui::failure_line(chart) {
        lines.push(Line::from(""));
        lines.push(line);
    }
    let distribution = Paragraph::new(lines).block(palette.block(format!(
        " Claim Distribution{} ",
        ui::fetch_indicator(chart)
    )));
    f.render_widget(distribution, top[0]);

    // Per-period comparison
    let mut bar_chart = BarChart::default()
        .block(palette.block(" Anomaly Detection "))
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2);
    for point in &chart.payload().data {
        let group = BarGroup::default()
            .label(Line::from(point.label().to_string()))
            .bars(&[
                Bar::default()
                    .value(point.normal.max(0.0) as u64)
                    .style(Style::default().fg(Color::Green)),
                Bar::default()
                    .value(point.anomalous.max(0.0) as u64)
                    .style(Style::default().fg(Color::Red)),
            ]);
        bar_chart = bar_chart.data(group);
    }
    f.render_widget(bar_chart, top[1]);

    // Claims table
    let table_rows: Vec<Row> = claims
        .payload()
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(c.number().to_string()),
                Cell::from(c.provider().to_string()),
                Cell::from(c.submitted_on().to_string()),
                Cell::from(format_rupiah(c.total_cost())),
                ui::badge(c.status()),
            ])
        })
        .collect();
    draw_table(
        f,
        rows[1],
        palette,
        format!(" Recent Claims{} ", ui::fetch_indicator(claims)),
        &["Claim No.", "Provider", "Submitted", "Total Cost", "Status"],
        &[
            Constraint::Percentage(20),
            Constraint::Percentage(30),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
        ],
        table_rows,
        Some(state.selected_row),
        ui::failure_line(claims),
    );
}

// ----------------------------------------------------------------------------
// Alerts
// ----------------------------------------------------------------------------

fn draw_alerts(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let PageView::Alerts { alerts, summary } = &state.view else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(area);

    let counts = summary.payload();
    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[0]);
    for ((title, value, color), card_area) in [
        ("High Risk Alerts", counts.high_risk, Color::Red),
        ("Medium Risk Alerts", counts.medium_risk, Color::Yellow),
        ("Low Risk Alerts", counts.low_risk, Color::Blue),
    ]
    .into_iter()
    .zip(card_areas.iter())
    {
        f.render_widget(
            ui::stat_card(title, format_count(value), color, palette),
            *card_area,
        );
    }

    let table_rows: Vec<Row> = alerts
        .payload()
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::from(a.short_id()),
                Cell::from(a.short_claim_id()),
                ui::badge(a.level_or("Medium")),
                Cell::from(a.date()),
                Cell::from(a.action().to_string()),
            ])
        })
        .collect();
    let footer = ui::failure_line(alerts).or_else(|| ui::failure_line(summary));
    draw_table(
        f,
        rows[1],
        palette,
        format!(" Fraud Alerts Management{} ", ui::fetch_indicator(alerts)),
        &["Alert ID", "Klaim ID", "Risk Level", "Date", "Action"],
        &[
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
        table_rows,
        Some(state.selected_row),
        footer,
    );
}

// ----------------------------------------------------------------------------
// Audit trail
// ----------------------------------------------------------------------------

fn draw_audit(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let PageView::Audit { entries } = &state.view else {
        return;
    };

    let table_rows: Vec<Row> = entries
        .payload()
        .iter()
        .map(|log| {
            Row::new(vec![
                Cell::from(log.time()),
                Cell::from(log.user()),
                Cell::from(Span::styled(log.action().to_string(), Style::default().bold())),
                Cell::from(log.entity().to_string()),
                Cell::from(log.description().to_string()),
            ])
        })
        .collect();
    draw_table(
        f,
        area,
        palette,
        format!(" System Audit Trail{} ", ui::fetch_indicator(entries)),
        &["Timestamp", "User", "Action", "Entity", "Description"],
        &[
            Constraint::Length(20),
            Constraint::Length(10),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Min(20),
        ],
        table_rows,
        Some(state.selected_row),
        ui::failure_line(entries),
    );
}

// ----------------------------------------------------------------------------
// Reports
// ----------------------------------------------------------------------------

fn draw_reports(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let PageView::Reports { reports } = &state.view else {
        return;
    };

    let table_rows: Vec<Row> = reports
        .payload()
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.id().to_string()),
                Cell::from(r.name().to_string()),
                Cell::from(r.generated()),
                ui::badge(&r.status),
                Cell::from("d:JSON  c:CSV"),
            ])
        })
        .collect();

    let action = if state.generating {
        "Generating..."
    } else {
        "g: Generate New Report"
    };
    let footer = ui::failure_line(reports).or_else(|| {
        reports
            .is_loading()
            .then(|| Line::from("Loading reports..."))
    });
    draw_table(
        f,
        area,
        palette,
        format!(" Generated Reports{}  [{}] ", ui::fetch_indicator(reports), action),
        &["Report ID", "Name", "Generated Date", "Status", "Actions"],
        &[
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(20),
            Constraint::Percentage(12),
            Constraint::Percentage(18),
        ],
        table_rows,
        Some(state.selected_row),
        footer,
    );
}

// ----------------------------------------------------------------------------
// Settings
// ----------------------------------------------------------------------------

fn draw_settings(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let PageView::Settings { settings } = &state.view else {
        return;
    };
    let info = settings.payload();

    let (light, dark) = match state.theme {
        Theme::Light => (Style::default().fg(palette.accent).bold().reversed(), Style::default().fg(palette.muted)),
        Theme::Dark => (Style::default().fg(palette.muted), Style::default().fg(palette.accent).bold().reversed()),
    };
    let label = Style::default().fg(palette.muted);

    let mut lines = vec![
        Line::from(Span::styled("Appearance", Style::default().bold())),
        Line::from(Span::styled(
            format!("Customize how {} looks on your device. (t to switch)", APP_NAME),
            label,
        )),
        Line::from(vec![
            Span::styled(" ☀ Light ", light),
            Span::raw(" "),
            Span::styled(" ☾ Dark ", dark),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("System Name   ", label), Span::raw(info.system_name().to_string())]),
        Line::from(vec![Span::styled("API Version   ", label), Span::raw(info.version().to_string())]),
        Line::from(vec![Span::styled("API Endpoint  ", label), Span::raw(state.base_url.clone())]),
    ];
    if let Some(line) = ui::failure_line(settings) {
        lines.push(Line::from(""));
        lines.push(line);
    }

    let area = Rect {
        width: area.width.min(72),
        ..area
    };
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(palette.block(format!(" Settings{} ", ui::fetch_indicator(settings))));
    f.render_widget(panel, area);
}

// ----------------------------------------------------------------------------
// Popups
// ----------------------------------------------------------------------------

fn draw_notifications_popup(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let popup_area = ui::centered_rect(50, 50, area);
    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = Vec::new();
    if state.notifications.is_empty() {
        lines.push(Line::from(Span::styled(
            "No new notifications",
            Style::default().fg(palette.muted),
        )));
    }
    for alert in &state.notifications {
        let level = alert.level_or("High");
        lines.push(Line::from(Span::styled(
            alert.reason().to_string(),
            Style::default().bold(),
        )));
        lines.push(Line::from(vec![
            Span::styled(format!("Risk: {}", level), Style::default().fg(ui::status_color(level))),
            Span::styled(format!("  {}", alert.date()), Style::default().fg(palette.muted)),
        ]));
        lines.push(Line::from(""));
    }

    let popup = Paragraph::new(lines).block(palette.block(" Notifications (Esc to close) "));
    f.render_widget(popup, popup_area);
}

fn draw_help_popup(f: &mut Frame, palette: Palette, area: Rect) {
    let popup_area = ui::centered_rect(60, 70, area);
    f.render_widget(Clear, popup_area);

    let help_text = r#"
 SATRIA JKN - Keyboard Shortcuts

 NAVIGATION
   1-6                Jump to page
   Tab / Shift+Tab    Next / previous page
   ↑ / ↓ (k / j)      Select row

 DATA
   r                  Refresh current page

 REPORTS
   g                  Generate report (last 30 days)
   d                  Download selected report as JSON
   c                  Download selected report as CSV

 GENERAL
   t                  Toggle light / dark theme
   n                  Show notifications
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press Esc to close...
"#;

    let help = Paragraph::new(help_text)
        .block(palette.block(" Help "))
        .wrap(Wrap { trim: false });
    f.render_widget(help, popup_area);
}

fn draw_notice_popup(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let Some(notice) = &state.notice else {
        return;
    };
    let popup_area = ui::centered_rect(50, 25, area);
    f.render_widget(Clear, popup_area);

    let border = match notice.kind {
        NoticeKind::Info => palette.accent,
        NoticeKind::Error => Color::Red,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", notice.title))
        .title_bottom(Line::from(" Enter / Esc ").right_aligned())
        .style(palette.base());

    let body = Paragraph::new(notice.message.as_str())
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(body, popup_area);
}
