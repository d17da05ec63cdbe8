//! App state - pure data structure with no I/O logic

use crate::constants::endpoints;
use crate::messages::{Page, RenderState};
use crate::models::{
    Alert, AlertSummary, AnomalyChart, AuditEntry, Claim, Overview, Report, SystemSettings, Trends,
};
use crate::resource::{Resource, Tracked};
use crate::storage::SettingsStore;

/// Key of the header's overview resource, mounted for the whole session
pub const HEADER_OVERVIEW_KEY: &str = "header:/dashboard/overview";

/// Resources owned by the active page. Replaced wholesale on page switch,
/// which drops the previous page's resources.
#[derive(Clone, Debug)]
pub enum PageView {
    Dashboard {
        overview: Resource<Overview>,
        trends: Resource<Trends>,
    },
    Analysis {
        chart: Resource<AnomalyChart>,
        claims: Resource<Vec<Claim>>,
    },
    Alerts {
        alerts: Resource<Vec<Alert>>,
        summary: Resource<AlertSummary>,
    },
    Audit {
        entries: Resource<Vec<AuditEntry>>,
    },
    Reports {
        reports: Resource<Vec<Report>>,
    },
    Settings {
        settings: Resource<SystemSettings>,
    },
}

fn key(page: &str, endpoint: &str) -> String {
    format!("{}:{}", page, endpoint)
}

impl PageView {
    /// Fresh, idle resources for `page`
    pub fn mount(page: Page) -> Self {
        match page {
            Page::Dashboard => PageView::Dashboard {
                overview: Resource::new(key("dashboard", endpoints::OVERVIEW), endpoints::OVERVIEW),
                trends: Resource::new(key("dashboard", endpoints::TRENDS), endpoints::TRENDS),
            },
            Page::Analysis => PageView::Analysis {
                chart: Resource::new(
                    key("analysis", endpoints::ANOMALY_CHART),
                    endpoints::ANOMALY_CHART,
                ),
                claims: Resource::new(key("analysis", endpoints::CLAIMS), endpoints::CLAIMS),
            },
            Page::Alerts => PageView::Alerts {
                alerts: Resource::new(key("alerts", endpoints::ALERTS), endpoints::ALERTS),
                summary: Resource::new(
                    key("alerts", endpoints::ALERT_SUMMARY),
                    endpoints::ALERT_SUMMARY,
                ),
            },
            Page::Audit => PageView::Audit {
                entries: Resource::new(key("audit", endpoints::AUDIT_TRAIL), endpoints::AUDIT_TRAIL),
            },
            Page::Reports => PageView::Reports {
                reports: Resource::new(key("reports", endpoints::REPORTS), endpoints::REPORTS),
            },
            Page::Settings => PageView::Settings {
                settings: Resource::new(key("settings", endpoints::SETTINGS), endpoints::SETTINGS),
            },
        }
    }

    pub fn page(&self) -> Page {
        match self {
            PageView::Dashboard { .. } => Page::Dashboard,
            PageView::Analysis { .. } => Page::Analysis,
            PageView::Alerts { .. } => Page::Alerts,
            PageView::Audit { .. } => Page::Audit,
            PageView::Reports { .. } => Page::Reports,
            PageView::Settings { .. } => Page::Settings,
        }
    }

    pub fn resources_mut(&mut self) -> Vec<&mut dyn Tracked> {
        match self {
            PageView::Dashboard { overview, trends } => vec![overview as &mut dyn Tracked, trends],
            PageView::Analysis { chart, claims } => vec![chart as &mut dyn Tracked, claims],
            PageView::Alerts { alerts, summary } => vec![alerts as &mut dyn Tracked, summary],
            PageView::Audit { entries } => vec![entries as &mut dyn Tracked],
            PageView::Reports { reports } => vec![reports as &mut dyn Tracked],
            PageView::Settings { settings } => vec![settings as &mut dyn Tracked],
        }
    }

    /// Number of selectable rows in the page's main table
    pub fn row_count(&self) -> usize {
        match self {
            PageView::Dashboard { overview, .. } => overview
                .payload()
                .recent_alerts
                .len()
                .min(crate::constants::RECENT_ALERTS_LIMIT),
            PageView::Analysis { claims, .. } => claims.payload().len(),
            PageView::Alerts { alerts, .. } => alerts.payload().len(),
            PageView::Audit { entries } => entries.payload().len(),
            PageView::Reports { reports } => reports.payload().len(),
            PageView::Settings { .. } => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Blocking message shown after a user action
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub view: PageView,
    /// Feeds the notification list; independent of the dashboard's overview
    pub header_overview: Resource<Overview>,
    pub settings: SettingsStore,
    pub base_url: String,

    pub next_request_id: u64,
    pub pending_generate: Option<u64>,
    pub pending_download: Option<u64>,

    // Selection in the page's table
    pub selected_row: usize,

    // Popups
    pub notice: Option<Notice>,
    pub show_help: bool,
    pub show_notifications: bool,
}

impl AppState {
    pub fn new(settings: SettingsStore, base_url: impl Into<String>) -> Self {
        AppState {
            view: PageView::mount(Page::default()),
            header_overview: Resource::new(HEADER_OVERVIEW_KEY, endpoints::OVERVIEW),
            settings,
            base_url: base_url.into(),
            next_request_id: 1,
            pending_generate: None,
            pending_download: None,
            selected_row: 0,
            notice: None,
            show_help: false,
            show_notifications: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn page(&self) -> Page {
        self.view.page()
    }

    pub fn popup_open(&self) -> bool {
        self.notice.is_some() || self.show_help || self.show_notifications
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            view: self.view.clone(),
            notifications: self
                .header_overview
                .payload()
                .recent_alerts
                .iter()
                .take(crate::constants::RECENT_ALERTS_LIMIT)
                .cloned()
                .collect(),
            theme: self.settings.theme(),
            base_url: self.base_url.clone(),
            selected_row: self.selected_row,
            generating: self.pending_generate.is_some(),
            downloading: self.pending_download.is_some(),
            notice: self.notice.clone(),
            show_help: self.show_help,
            show_notifications: self.show_notifications,
        }
    }
}
