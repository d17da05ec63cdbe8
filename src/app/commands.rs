//! Command handlers - business logic for processing UI events and network responses

use chrono::NaiveDate;

use crate::app::state::{AppState, Notice, PageView, HEADER_OVERVIEW_KEY};
use crate::messages::network::UserAction;
use crate::messages::{NetworkCommand, NetworkResponse, Page};
use crate::models::ReportFormat;
use crate::reports;
use crate::resource::Tracked;

const GENERATE_FAILED: &str = "Failed to generate the report. Check the log for details.";
const DOWNLOAD_FAILED: &str =
    "Failed to download the report. Make sure the backend is running and the report exists.";

impl AppState {
    // ========================
    // Fetching
    // ========================

    /// Start a request cycle for one resource
    fn fetch(resource: &mut dyn Tracked, id: u64, token: &str) -> NetworkCommand {
        resource.begin(id);
        NetworkCommand::Fetch {
            id,
            key: resource.key().to_string(),
            endpoint: resource.endpoint().to_string(),
            token: token.to_string(),
        }
    }

    /// Fetch every resource of the active page
    fn fetch_page(&mut self) -> Vec<NetworkCommand> {
        let count = self.view.resources_mut().len();
        let ids: Vec<u64> = (0..count).map(|_| self.next_id()).collect();
        let token = self.settings.token().to_string();

        self.view
            .resources_mut()
            .into_iter()
            .zip(ids)
            .map(|(resource, id)| Self::fetch(resource, id, &token))
            .collect()
    }

    /// First render: the header's resource and the landing page's
    pub fn mount(&mut self) -> Vec<NetworkCommand> {
        let id = self.next_id();
        let token = self.settings.token().to_string();
        let mut commands = vec![Self::fetch(&mut self.header_overview, id, &token)];
        commands.extend(self.fetch_page());
        commands
    }

    /// Repeat the active page's requests now, superseding outstanding ones
    pub fn refetch(&mut self) -> Vec<NetworkCommand> {
        tracing::info!(page = ?self.page(), "Refetching");
        self.fetch_page()
    }

    /// Route a fetch outcome to the resource that issued it
    fn apply_fetch(&mut self, id: u64, key: &str, outcome: Result<serde_json::Value, crate::network::FetchError>) {
        if key == HEADER_OVERVIEW_KEY {
            self.header_overview.settle(id, outcome);
            return;
        }

        let target = self
            .view
            .resources_mut()
            .into_iter()
            .find(|resource| resource.key() == key);
        match target {
            Some(resource) => {
                resource.settle(id, outcome);
            }
            None => tracing::debug!(id, key, "Response for an unmounted resource"),
        }
        self.clamp_selection();
    }

    // ========================
    // Navigation
    // ========================

    /// Unmount the current page and mount `page`. No-op for the active page.
    pub fn switch_page(&mut self, page: Page) -> Vec<NetworkCommand> {
        if page == self.page() {
            return Vec::new();
        }

        let mut commands: Vec<NetworkCommand> = self
            .view
            .resources_mut()
            .into_iter()
            .filter(|resource| resource.pending_request().is_some())
            .map(|resource| NetworkCommand::Cancel {
                key: resource.key().to_string(),
            })
            .collect();

        self.view = PageView::mount(page);
        self.selected_row = 0;
        self.show_notifications = false;
        commands.extend(self.fetch_page());
        commands
    }

    pub fn next_page(&mut self) -> Vec<NetworkCommand> {
        let next = (self.page().index() + 1) % Page::ALL.len();
        self.switch_page(Page::ALL[next])
    }

    pub fn prev_page(&mut self) -> Vec<NetworkCommand> {
        let len = Page::ALL.len();
        let prev = (self.page().index() + len - 1) % len;
        self.switch_page(Page::ALL[prev])
    }

    pub fn select_next(&mut self) {
        let rows = self.view.row_count();
        if rows > 0 {
            self.selected_row = (self.selected_row + 1) % rows;
        }
    }

    pub fn select_prev(&mut self) {
        let rows = self.view.row_count();
        if rows > 0 {
            self.selected_row = self.selected_row.checked_sub(1).unwrap_or(rows - 1);
        }
    }

    fn clamp_selection(&mut self) {
        let rows = self.view.row_count();
        if self.selected_row >= rows {
            self.selected_row = rows.saturating_sub(1);
        }
    }

    // ========================
    // Appearance
    // ========================

    pub fn toggle_theme(&mut self) {
        match self.settings.toggle_theme() {
            Ok(theme) => tracing::info!(theme = theme.as_str(), "Theme changed"),
            Err(e) => tracing::warn!(error = ?e, "Failed to persist theme"),
        }
    }

    // ========================
    // Reports
    // ========================

    /// Ask the backend for a new report. Ignored while one is outstanding.
    pub fn generate_report(&mut self, today: NaiveDate) -> Option<NetworkCommand> {
        if self.page() != Page::Reports || self.pending_generate.is_some() {
            return None;
        }
        let id = self.next_id();
        self.pending_generate = Some(id);
        Some(NetworkCommand::GenerateReport {
            id,
            token: self.settings.token().to_string(),
            request: reports::generate_request(today),
        })
    }

    /// Download the selected report in `format`
    pub fn download_selected(&mut self, format: ReportFormat) -> Option<NetworkCommand> {
        let PageView::Reports { reports } = &self.view else {
            return None;
        };
        let report_id = reports
            .payload()
            .get(self.selected_row)
            .and_then(|r| r.report_id.clone());

        let Some(report_id) = report_id else {
            self.notice = Some(Notice::error("Download", "No report selected."));
            return None;
        };

        let id = self.next_id();
        self.pending_download = Some(id);
        Some(NetworkCommand::DownloadReport {
            id,
            token: self.settings.token().to_string(),
            report_id,
            format,
            dir: self.settings.download_dir(),
        })
    }

    // ========================
    // Network responses
    // ========================

    /// Apply a network response; may trigger follow-up requests
    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        match response {
            NetworkResponse::Fetched { id, key, outcome } => {
                self.apply_fetch(id, &key, outcome);
                Vec::new()
            }
            NetworkResponse::ReportGenerated { id } => {
                if self.pending_generate == Some(id) {
                    self.pending_generate = None;
                }
                self.notice = Some(Notice::info(
                    "Generate Report",
                    "Report generated (if the backend processed it).",
                ));
                // The list only exists while the reports page is mounted
                if self.page() == Page::Reports {
                    self.fetch_page()
                } else {
                    Vec::new()
                }
            }
            NetworkResponse::ReportSaved { id, path } => {
                if self.pending_download == Some(id) {
                    self.pending_download = None;
                }
                self.notice = Some(Notice::info(
                    "Download Report",
                    format!("Saved to {}", path.display()),
                ));
                Vec::new()
            }
            NetworkResponse::ActionFailed { id, action, message } => {
                tracing::warn!(id, ?action, error = %message, "User action failed");
                let (title, text) = match action {
                    UserAction::Generate => {
                        if self.pending_generate == Some(id) {
                            self.pending_generate = None;
                        }
                        ("Generate Report", GENERATE_FAILED)
                    }
                    UserAction::Download => {
                        if self.pending_download == Some(id) {
                            self.pending_download = None;
                        }
                        ("Download Report", DOWNLOAD_FAILED)
                    }
                };
                self.notice = Some(Notice::error(title, text));
                Vec::new()
            }
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_notifications(&mut self) {
        self.show_notifications = !self.show_notifications;
    }

    /// Close the topmost popup
    pub fn dismiss(&mut self) {
        if self.notice.take().is_some() {
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        self.show_notifications = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::NoticeKind;
    use crate::network::FetchError;
    use crate::resource::FetchStatus;
    use crate::storage::{Settings, SettingsStore};
    use serde_json::json;

    fn state() -> AppState {
        AppState::new(SettingsStore::in_memory(Settings::default()), "http://localhost:5000/api")
    }

    fn fetch_ids(commands: &[NetworkCommand]) -> Vec<(u64, String)> {
        commands
            .iter()
            .filter_map(|c| match c {
                NetworkCommand::Fetch { id, key, .. } => Some((*id, key.clone())),
                _ => None,
            })
            .collect()
    }

    fn fetched(id: u64, key: &str, outcome: Result<serde_json::Value, FetchError>) -> NetworkResponse {
        NetworkResponse::Fetched {
            id,
            key: key.to_string(),
            outcome,
        }
    }

    #[test]
    fn test_mount_fetches_header_and_dashboard() {
        let mut app = state();
        let commands = app.mount();
        let keys: Vec<String> = fetch_ids(&commands).into_iter().map(|(_, k)| k).collect();
        assert_eq!(
            keys,
            vec![
                "header:/dashboard/overview",
                "dashboard:/dashboard/overview",
                "dashboard:/dashboard/trends",
            ]
        );
        match &commands[0] {
            NetworkCommand::Fetch { token, endpoint, .. } => {
                assert_eq!(token, "dev-token-12345");
                assert_eq!(endpoint, "/dashboard/overview");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(app.header_overview.status(), FetchStatus::Pending);
    }

    #[test]
    fn test_header_and_page_resources_are_independent() {
        let mut app = state();
        let ids = fetch_ids(&app.mount());

        app.handle_response(fetched(ids[1].0, &ids[1].1, Ok(json!({ "total_claims": 9 }))));
        assert_eq!(app.header_overview.status(), FetchStatus::Pending);
        match &app.view {
            PageView::Dashboard { overview, .. } => {
                assert_eq!(overview.status(), FetchStatus::SettledOk);
                assert_eq!(overview.payload().total_claims, 9);
            }
            _ => panic!("dashboard not mounted"),
        }
    }

    #[test]
    fn test_refetch_is_pending_until_newest_response() {
        let mut app = state();
        app.switch_page(Page::Settings);
        let first = fetch_ids(&app.refetch());
        let second = fetch_ids(&app.refetch());

        app.handle_response(fetched(first[0].0, &first[0].1, Ok(json!({ "version": "old" }))));
        let PageView::Settings { settings } = &app.view else {
            panic!("settings not mounted");
        };
        assert_eq!(settings.status(), FetchStatus::Pending);
        assert_eq!(settings.payload().version(), "1.0.0");

        app.handle_response(fetched(second[0].0, &second[0].1, Ok(json!({ "version": "2.1.0" }))));
        let PageView::Settings { settings } = &app.view else {
            panic!("settings not mounted");
        };
        assert_eq!(settings.status(), FetchStatus::SettledOk);
        assert_eq!(settings.payload().version(), "2.1.0");
    }

    #[test]
    fn test_switch_page_cancels_pending_and_mounts_new() {
        let mut app = state();
        app.mount();
        let commands = app.switch_page(Page::Alerts);

        let cancelled: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                NetworkCommand::Cancel { key } => Some(key.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            cancelled,
            vec!["dashboard:/dashboard/overview", "dashboard:/dashboard/trends"]
        );
        assert_eq!(fetch_ids(&commands).len(), 2);
        assert_eq!(app.page(), Page::Alerts);
    }

    #[test]
    fn test_late_response_for_unmounted_page_is_dropped() {
        let mut app = state();
        let old = fetch_ids(&app.mount());
        app.switch_page(Page::Alerts);

        app.handle_response(fetched(old[1].0, &old[1].1, Ok(json!({ "total_claims": 3 }))));
        let PageView::Alerts { alerts, summary } = &app.view else {
            panic!("alerts not mounted");
        };
        assert_eq!(alerts.status(), FetchStatus::Pending);
        assert_eq!(summary.status(), FetchStatus::Pending);
    }

    #[test]
    fn test_remounted_page_ignores_previous_mount_response() {
        let mut app = state();
        let old = fetch_ids(&app.mount());
        app.switch_page(Page::Alerts);
        let fresh = fetch_ids(&app.switch_page(Page::Dashboard));
        assert_eq!(fresh[0].1, old[1].1);
        assert_ne!(fresh[0].0, old[1].0);

        app.handle_response(fetched(old[1].0, &old[1].1, Ok(json!({ "total_claims": 3 }))));
        let PageView::Dashboard { overview, .. } = &app.view else {
            panic!("dashboard not mounted");
        };
        assert_eq!(overview.status(), FetchStatus::Pending);
        assert_eq!(overview.payload().total_claims, 0);

        app.handle_response(fetched(fresh[0].0, &fresh[0].1, Ok(json!({ "total_claims": 8 }))));
        let PageView::Dashboard { overview, .. } = &app.view else {
            panic!("dashboard not mounted");
        };
        assert_eq!(overview.status(), FetchStatus::SettledOk);
        assert_eq!(overview.payload().total_claims, 8);
    }

    #[test]
    fn test_switch_to_same_page_is_noop() {
        let mut app = state();
        app.mount();
        assert!(app.switch_page(Page::Dashboard).is_empty());
    }

    #[test]
    fn test_fetch_error_surfaces_on_resource() {
        let mut app = state();
        app.switch_page(Page::Audit);
        let PageView::Audit { entries } = &app.view else {
            panic!("audit not mounted");
        };
        let id = entries.pending_request().unwrap();

        app.handle_response(fetched(id, "audit:/audit-trail", Err(FetchError::Unauthorized)));
        let PageView::Audit { entries } = &app.view else {
            panic!("audit not mounted");
        };
        assert_eq!(entries.status(), FetchStatus::SettledError);
        assert_eq!(
            entries.failure(),
            Some("Unauthorized: Please login or check API token")
        );
    }

    #[test]
    fn test_generate_once_then_refetch_reports() {
        let mut app = state();
        app.switch_page(Page::Reports);
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        let cmd = app.generate_report(today).unwrap();
        let NetworkCommand::GenerateReport { id, request, .. } = cmd else {
            panic!("expected generate command");
        };
        assert_eq!(request.start_date, "05/31/2024");
        assert_eq!(request.end_date, "06/30/2024");
        assert!(app.generate_report(today).is_none());

        let follow_up = app.handle_response(NetworkResponse::ReportGenerated { id });
        assert_eq!(fetch_ids(&follow_up)[0].1, "reports:/reports");
        assert!(app.pending_generate.is_none());
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Info));
    }

    #[test]
    fn test_download_uses_selected_report() {
        let mut app = state();
        app.switch_page(Page::Reports);
        let PageView::Reports { reports } = &app.view else {
            panic!("reports not mounted");
        };
        let id = reports.pending_request().unwrap();
        app.handle_response(fetched(
            id,
            "reports:/reports",
            Ok(json!([{ "report_id": "R1" }, { "id": "R2" }])),
        ));

        app.select_next();
        match app.download_selected(ReportFormat::Csv) {
            Some(NetworkCommand::DownloadReport { report_id, format, .. }) => {
                assert_eq!(report_id, "R2");
                assert_eq!(format, ReportFormat::Csv);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_download_without_reports_shows_notice() {
        let mut app = state();
        app.switch_page(Page::Reports);
        assert!(app.download_selected(ReportFormat::Json).is_none());
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn test_action_failure_shows_generic_message() {
        let mut app = state();
        app.handle_response(NetworkResponse::ActionFailed {
            id: 4,
            action: UserAction::Download,
            message: "Download failed".into(),
        });
        let notice = app.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, DOWNLOAD_FAILED);

        app.dismiss();
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = state();
        app.switch_page(Page::Alerts);
        let PageView::Alerts { alerts, .. } = &app.view else {
            panic!("alerts not mounted");
        };
        let id = alerts.pending_request().unwrap();
        app.handle_response(fetched(id, "alerts:/alerts", Ok(json!([{}, {}, {}]))));

        app.select_prev();
        assert_eq!(app.selected_row, 2);
        app.select_next();
        assert_eq!(app.selected_row, 0);
    }
}
