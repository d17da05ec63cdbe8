//! # SATRIA TUI
//!
//! Terminal dashboard for the SATRIA JKN fraud-detection backend.
//!
//! ## Features
//! - Dashboard overview, claim trends and system health
//! - Claim anomaly analysis
//! - Fraud alert management and audit trail
//! - Report generation and download (JSON / CSV)
//! - Light / dark theme, persisted across sessions
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod models;
pub mod resource;
pub mod reports;
pub mod storage;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{Alert, Overview, Report, ReportFormat};
pub use resource::{FetchStatus, Resource, Tracked};
pub use storage::{SettingsStore, Theme};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiClient, FetchError, NetworkActor};
