//! Report generation requests and report export (CSV / JSON files)

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::constants::{REPORT_LOOKBACK_DAYS, REPORT_TYPE};
use crate::models::{GenerateReportRequest, ReportFormat};

/// Request body for a report covering the lookback window ending `today`
pub fn generate_request(today: NaiveDate) -> GenerateReportRequest {
    let start = today - Duration::days(REPORT_LOOKBACK_DAYS);
    GenerateReportRequest {
        kind: REPORT_TYPE.to_string(),
        start_date: us_date(start),
        end_date: us_date(today),
    }
}

/// `MM/DD/YYYY`
fn us_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// The report body inside a download payload.
///
/// The backend stores the report under `data`, sometimes as a JSON-encoded
/// string. Strings that fail to parse are kept as-is.
pub fn extract_content(payload: Value) -> Value {
    let content = match payload {
        Value::Object(mut map) if map.get("data").is_some_and(is_truthy) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    match content {
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "Report data is not JSON, keeping string");
                Value::String(s)
            }
        },
        other => other,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Flattens an array of uniform objects into CSV.
///
/// The header comes from the first element's keys, in document order. Every
/// field is quoted with embedded quotes doubled; missing and null fields are
/// empty. Lines are joined by `\n` without a trailing newline.
pub fn json_to_csv(rows: &[Value]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let keys: Vec<&str> = match first {
        Value::Object(map) => map.keys().map(String::as_str).collect(),
        _ => Vec::new(),
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(keys.iter().map(|k| quote(k)).collect::<Vec<_>>().join(","));
    for row in rows {
        let fields: Vec<String> = keys
            .iter()
            .map(|k| quote(&field_text(row.get(*k))))
            .collect();
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// CSV rendition of arbitrary report content. Never fails.
pub fn content_to_csv(content: &Value) -> String {
    match content {
        Value::Array(rows) => json_to_csv(rows),
        Value::Object(map) => match map.values().nth(1) {
            // `{ "summary": ..., "rows": [...] }` style payloads
            Some(Value::Array(rows)) if map.len() == 2 => json_to_csv(rows),
            _ => json_to_csv(std::slice::from_ref(content)),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders report content in the requested format
pub fn render(content: &Value, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Csv => Ok(content_to_csv(content)),
        ReportFormat::Json => {
            serde_json::to_string_pretty(content).context("Failed to serialize report")
        }
    }
}

/// File name for a downloaded report, with path separators neutralized
pub fn file_name(report_id: &str, format: ReportFormat) -> String {
    let safe: String = report_id
        .chars()
        .map(|c| if matches!(c, '/' | '\\') || c.is_control() { '_' } else { c })
        .collect();
    format!("{}.{}", safe, format.extension())
}

/// Writes `contents` to `dir/{report_id}.{ext}`.
///
/// The bytes are staged in a temporary file inside `dir` and renamed into
/// place, so a failed write never leaves a partial file behind.
pub fn save(dir: &Path, report_id: &str, format: ReportFormat, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let target = dir.join(file_name(report_id, format));
    let mut staged = tempfile::NamedTempFile::new_in(dir).context("Failed to stage report file")?;
    staged.write_all(contents.as_bytes())?;
    staged.flush()?;
    staged
        .persist(&target)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    tracing::info!(path = %target.display(), "Report saved");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_request_covers_last_30_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let req = generate_request(today);
        assert_eq!(req.kind, "Fraud Summary");
        assert_eq!(req.start_date, "02/04/2024");
        assert_eq!(req.end_date, "03/05/2024");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "type": "Fraud Summary", "start_date": "02/04/2024", "end_date": "03/05/2024" })
        );
    }

    #[test]
    fn test_json_to_csv_exact_output() {
        let rows = json!([{ "a": 1, "b": 2 }, { "a": 3, "b": 4 }]);
        let csv = json_to_csv(rows.as_array().unwrap());
        assert_eq!(csv, "\"a\",\"b\"\n\"1\",\"2\"\n\"3\",\"4\"");
    }

    #[test]
    fn test_json_to_csv_escapes_and_blanks() {
        let rows = json!([
            { "name": "Klinik \"Sehat\"", "amount": 10, "note": null },
            { "name": "RS Umum" }
        ]);
        let csv = json_to_csv(rows.as_array().unwrap());
        assert_eq!(
            csv,
            "\"name\",\"amount\",\"note\"\n\"Klinik \"\"Sehat\"\"\",\"10\",\"\"\n\"RS Umum\",\"\",\"\""
        );
    }

    #[test]
    fn test_json_to_csv_empty() {
        assert_eq!(json_to_csv(&[]), "");
    }

    #[test]
    fn test_content_to_csv_bare_string() {
        assert_eq!(content_to_csv(&json!("no data")), "no data");
        assert_eq!(content_to_csv(&json!(42)), "42");
    }

    #[test]
    fn test_content_to_csv_object_shapes() {
        let wrapped = json!({ "summary": "ok", "rows": [{ "id": "A" }] });
        assert_eq!(content_to_csv(&wrapped), "\"id\"\n\"A\"");

        let single = json!({ "total": 5, "flagged": 2, "ratio": 0.4 });
        assert_eq!(
            content_to_csv(&single),
            "\"total\",\"flagged\",\"ratio\"\n\"5\",\"2\",\"0.4\""
        );
    }

    #[test]
    fn test_extract_content_parses_string_data() {
        let payload = json!({ "report_id": "R1", "data": "[{\"a\":1}]" });
        assert_eq!(extract_content(payload), json!([{ "a": 1 }]));
    }

    #[test]
    fn test_extract_content_falls_back_to_payload() {
        let payload = json!({ "report_id": "R1", "data": "" });
        assert_eq!(extract_content(payload.clone()), payload);

        let broken = json!({ "data": "{not json" });
        assert_eq!(extract_content(broken), json!("{not json"));
    }

    #[test]
    fn test_render_json_two_space_indent() {
        let out = render(&json!({ "a": [1] }), ReportFormat::Json).unwrap();
        assert_eq!(out, "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_save_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = save(dir.path(), "R-7", ReportFormat::Csv, "\"a\"\n\"1\"").unwrap();
        assert_eq!(path, dir.path().join("R-7.csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\"a\"\n\"1\"");

        // Only the final file remains
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_file_name_strips_separators() {
        assert_eq!(file_name("../etc/x", ReportFormat::Json), ".._etc_x.json");
    }
}
