//! Network messages - communication between App and Network layers

use std::path::PathBuf;

use serde_json::Value;

use crate::models::{GenerateReportRequest, ReportFormat};
use crate::network::FetchError;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// GET an endpoint on behalf of one resource. Supersedes any in-flight
    /// fetch with the same key.
    Fetch {
        id: u64,
        key: String,
        endpoint: String,
        token: String,
    },
    /// Abort the in-flight fetch for a resource that was unmounted
    Cancel { key: String },
    /// POST a report generation request
    GenerateReport {
        id: u64,
        token: String,
        request: GenerateReportRequest,
    },
    /// Download a report and save it locally
    DownloadReport {
        id: u64,
        token: String,
        report_id: String,
        format: ReportFormat,
        dir: PathBuf,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// User actions that report back through a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Generate,
    Download,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A fetch settled
    Fetched {
        id: u64,
        key: String,
        outcome: Result<Value, FetchError>,
    },
    /// The backend accepted a generation request
    ReportGenerated { id: u64 },
    /// A downloaded report was written to disk
    ReportSaved { id: u64, path: PathBuf },
    /// A generate or download action failed
    ActionFailed {
        id: u64,
        action: UserAction,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Fetched { id, .. } => *id,
            NetworkResponse::ReportGenerated { id } => *id,
            NetworkResponse::ReportSaved { id, .. } => *id,
            NetworkResponse::ActionFailed { id, .. } => *id,
        }
    }
}
