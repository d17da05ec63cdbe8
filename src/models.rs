//! Endpoint records
//!
//! Every backend response is decoded into a partial record: fields the backend
//! omits (or sends as `null`) fall back to documented defaults instead of
//! failing the whole payload. Accessors apply the display fallbacks.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_VERSION, DEFAULT_SYSTEM_NAME};

/// Lenient field decoders shared by the records below
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// String or number, kept as text. Empty strings count as absent.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Number or numeric string. Anything else is zero.
    pub fn amount<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        })
    }

    /// Non-negative integer count, truncating fractions
    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        let value = amount(d)?;
        Ok(if value.is_finite() && value > 0.0 { value as u64 } else { 0 })
    }

    /// `null` behaves like a missing field
    pub fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
    }
}

const NOT_AVAILABLE: &str = "N/A";

/// `/dashboard/overview`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Overview {
    #[serde(deserialize_with = "lenient::count")]
    pub total_claims: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub detected_anomalies: u64,
    #[serde(deserialize_with = "lenient::amount")]
    pub savings: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub fraud_alerts: FraudAlertCounts,
    #[serde(deserialize_with = "lenient::or_default")]
    pub recent_alerts: Vec<Alert>,
}

impl Overview {
    /// Potential savings in whole millions (rupiah)
    pub fn savings_millions(&self) -> u64 {
        let millions = (self.savings / 1_000_000.0).floor();
        if millions.is_finite() && millions > 0.0 {
            millions as u64
        } else {
            0
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FraudAlertCounts {
    #[serde(deserialize_with = "lenient::count")]
    pub active: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub total: u64,
}

/// `/dashboard/trends`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Trends {
    #[serde(deserialize_with = "lenient::or_default")]
    pub labels: Vec<serde_json::Value>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub data: Vec<TrendPoint>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrendPoint {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub claims: f64,
    #[serde(deserialize_with = "lenient::amount")]
    pub anomalies: f64,
}

impl TrendPoint {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// `/klaim/anomaly-chart`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnomalyChart {
    #[serde(deserialize_with = "lenient::or_default")]
    pub labels: Vec<serde_json::Value>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub data: Vec<AnomalyPoint>,
}

impl AnomalyChart {
    /// Sum of normal and anomalous claims across all periods
    pub fn totals(&self) -> (f64, f64) {
        self.data.iter().fold((0.0, 0.0), |(normal, anomalous), p| {
            (normal + p.normal, anomalous + p.anomalous)
        })
    }

    /// Distribution slices for the share chart; empty slices are dropped
    pub fn slices(&self) -> Vec<(&'static str, f64)> {
        let (normal, anomalous) = self.totals();
        [("Normal Claims", normal), ("Anomalous Claims", anomalous)]
            .into_iter()
            .filter(|(_, value)| *value > 0.0)
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnomalyPoint {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub normal: f64,
    #[serde(deserialize_with = "lenient::amount")]
    pub anomalous: f64,
}

impl AnomalyPoint {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// One row of `/klaim`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Claim {
    #[serde(deserialize_with = "lenient::text")]
    pub nomor_klaim: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub provider: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub tgl_pengajuan: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub total_biaya: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
}

impl Claim {
    pub fn number(&self) -> &str {
        self.nomor_klaim.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn provider(&self) -> &str {
        self.provider.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Submission date without its time part
    pub fn submitted_on(&self) -> &str {
        match self.tgl_pengajuan.as_deref() {
            Some(raw) => raw.split(' ').next().filter(|d| !d.is_empty()).unwrap_or(raw),
            None => NOT_AVAILABLE,
        }
    }

    /// Total cost truncated to whole rupiah
    pub fn total_cost(&self) -> i64 {
        if self.total_biaya.is_finite() {
            self.total_biaya.trunc() as i64
        } else {
            0
        }
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or("Pending")
    }
}

/// One row of `/alerts`, also embedded in the overview's `recent_alerts`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Alert {
    #[serde(deserialize_with = "lenient::text")]
    pub alert_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub klaim_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub alert_level: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub action: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub reason_code: Option<String>,
}

impl Alert {
    pub fn short_id(&self) -> String {
        short_id(self.alert_id.as_deref())
    }

    pub fn short_claim_id(&self) -> String {
        short_id(self.klaim_id.as_deref())
    }

    /// Risk level, or `fallback` when the backend left it out.
    /// The alerts page assumes "Medium"; the dashboard and bell assume "High".
    pub fn level_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.alert_level.as_deref().unwrap_or(fallback)
    }

    pub fn date(&self) -> String {
        display_date(self.created_at.as_deref())
    }

    pub fn action(&self) -> &str {
        self.action.as_deref().unwrap_or("Review")
    }

    pub fn reason(&self) -> &str {
        self.reason_code.as_deref().unwrap_or("Fraud Alert")
    }
}

/// `/alerts/summary`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertSummary {
    #[serde(deserialize_with = "lenient::count")]
    pub high_risk: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub medium_risk: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub low_risk: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub total: u64,
}

/// One row of `/audit-trail`. The backend has used two field spellings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuditEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub user: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub action: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub entity_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub entity: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub details: Option<String>,
}

impl AuditEntry {
    pub fn time(&self) -> String {
        display_datetime(self.timestamp.as_deref().or(self.created_at.as_deref()))
    }

    pub fn user(&self) -> String {
        match (&self.user_id, &self.user) {
            (Some(id), _) => truncate(id, 8).to_string(),
            (None, Some(user)) => user.clone(),
            (None, None) => "System".to_string(),
        }
    }

    pub fn action(&self) -> &str {
        self.action.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn entity(&self) -> &str {
        self.entity_type
            .as_deref()
            .or(self.entity.as_deref())
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn description(&self) -> &str {
        self.description
            .as_deref()
            .or(self.details.as_deref())
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// One row of `/reports`, normalized across the backend's field spellings
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawReport")]
pub struct Report {
    pub report_id: Option<String>,
    pub kind: Option<String>,
    pub created_at: Option<String>,
    pub status: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawReport {
    #[serde(deserialize_with = "lenient::text")]
    report_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    id: Option<String>,
    #[serde(rename = "reportId", deserialize_with = "lenient::text")]
    report_id_camel: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    kind: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    created_at: Option<String>,
    #[serde(rename = "createdAt", deserialize_with = "lenient::text")]
    created_at_camel: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    status: Option<String>,
}

impl From<RawReport> for Report {
    fn from(raw: RawReport) -> Self {
        Report {
            report_id: raw.report_id.or(raw.id).or(raw.report_id_camel),
            kind: raw.kind.or(raw.name),
            created_at: raw.created_at.or(raw.created_at_camel).or(raw.date),
            status: raw.status.unwrap_or_else(|| "Ready".to_string()),
        }
    }
}

impl Report {
    pub fn id(&self) -> &str {
        self.report_id.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn name(&self) -> &str {
        self.kind.as_deref().unwrap_or("")
    }

    pub fn generated(&self) -> String {
        match self.created_at.as_deref() {
            Some(raw) => display_datetime(Some(raw)),
            None => "-".to_string(),
        }
    }
}

/// `/settings`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemSettings {
    #[serde(deserialize_with = "lenient::text")]
    pub system_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub version: Option<String>,
}

impl Default for SystemSettings {
    fn default() -> Self {
        SystemSettings {
            system_name: Some(DEFAULT_SYSTEM_NAME.to_string()),
            version: Some(DEFAULT_API_VERSION.to_string()),
        }
    }
}

impl SystemSettings {
    pub fn system_name(&self) -> &str {
        self.system_name.as_deref().unwrap_or("")
    }

    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or("")
    }
}

/// Body of `POST /reports/generate`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerateReportRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
}

/// Export format for a downloaded report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

// ============================================================================
// Display helpers
// ============================================================================

/// First `max` characters of `s`
pub fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn short_id(id: Option<&str>) -> String {
    match id {
        Some(id) => truncate(id, 8).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Parses the timestamp spellings the backend has produced
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    // RFC 2822 rejects the "GMT" zone name some servers emit
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%a, %d %b %Y %H:%M:%S GMT") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn display_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn display_datetime(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Groups digits by thousands: `1234567` -> `1,234,567`
pub fn format_thousands(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// [`format_thousands`] for counts
pub fn format_count(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Rupiah amount as shown in the claims table
pub fn format_rupiah(value: i64) -> String {
    format!("Rp {}", format_thousands(value))
}
