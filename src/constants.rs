//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Backend API base address. Not configurable at runtime.
pub const API_BASE_URL: &str = "http://localhost:5000/api";

/// Bearer token used when the settings store has none
pub const DEFAULT_TOKEN: &str = "dev-token-12345";

/// Report type requested by "generate report"
pub const REPORT_TYPE: &str = "Fraud Summary";

/// Lookback window for generated reports, in days
pub const REPORT_LOOKBACK_DAYS: i64 = 30;

/// Fallback system name shown before `/settings` answers
pub const DEFAULT_SYSTEM_NAME: &str = "SATRIA JKN";

/// Fallback API version shown before `/settings` answers
pub const DEFAULT_API_VERSION: &str = "1.0.0";

/// Number of rows shown in the recent alerts table and notification list
pub const RECENT_ALERTS_LIMIT: usize = 5;

/// Application name
pub const APP_NAME: &str = "SATRIA JKN";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend endpoints consumed by the dashboard
pub mod endpoints {
    pub const OVERVIEW: &str = "/dashboard/overview";
    pub const TRENDS: &str = "/dashboard/trends";
    pub const CLAIMS: &str = "/klaim";
    pub const ANOMALY_CHART: &str = "/klaim/anomaly-chart";
    pub const ALERTS: &str = "/alerts";
    pub const ALERT_SUMMARY: &str = "/alerts/summary";
    pub const AUDIT_TRAIL: &str = "/audit-trail";
    pub const REPORTS: &str = "/reports";
    pub const GENERATE_REPORT: &str = "/reports/generate";
    pub const SETTINGS: &str = "/settings";

    /// Download endpoint for a stored report
    pub fn report_download(report_id: &str) -> String {
        format!("/reports/{}/download", report_id)
    }
}
