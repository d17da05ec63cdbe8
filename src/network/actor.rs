//! Network actor - runs API requests in the Tokio runtime

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinSet};

use crate::messages::network::UserAction;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::ReportFormat;
use crate::network::client::ApiClient;
use crate::reports;

/// Network actor that processes fetch, generate and download commands
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
    /// In-flight fetch per resource key
    in_flight: HashMap<String, AbortHandle>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
            in_flight: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            self.in_flight.clear();
                            break;
                        }
                        Some(cmd) => self.handle_command(cmd),
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }

    fn handle_command(&mut self, cmd: NetworkCommand) {
        match cmd {
            NetworkCommand::Fetch { id, key, endpoint, token } => {
                let response_tx = self.response_tx.clone();
                let client = self.client.clone();
                let task_key = key.clone();

                let handle = self.active_requests.spawn(async move {
                    tracing::info!(id, key = %task_key, endpoint = %endpoint, "Fetching");
                    let outcome = client.get_json(&endpoint, &token).await;
                    tracing::info!(id, ok = outcome.is_ok(), "Fetch completed");
                    let _ = response_tx.send(NetworkResponse::Fetched {
                        id,
                        key: task_key,
                        outcome,
                    });
                });

                if let Some(previous) = self.in_flight.insert(key, handle) {
                    previous.abort();
                }
            }

            NetworkCommand::Cancel { key } => {
                if let Some(previous) = self.in_flight.remove(&key) {
                    tracing::debug!(key = %key, "Cancelling fetch");
                    previous.abort();
                }
            }

            NetworkCommand::GenerateReport { id, token, request } => {
                let response_tx = self.response_tx.clone();
                let client = self.client.clone();

                self.active_requests.spawn(async move {
                    tracing::info!(id, start = %request.start_date, end = %request.end_date, "Generating report");
                    let response = match client.generate_report(&token, &request).await {
                        Ok(()) => NetworkResponse::ReportGenerated { id },
                        Err(e) => {
                            tracing::error!(id, error = ?e, "Generate failed");
                            NetworkResponse::ActionFailed {
                                id,
                                action: UserAction::Generate,
                                message: e.to_string(),
                            }
                        }
                    };
                    let _ = response_tx.send(response);
                });
            }

            NetworkCommand::DownloadReport { id, token, report_id, format, dir } => {
                let response_tx = self.response_tx.clone();
                let client = self.client.clone();

                self.active_requests.spawn(async move {
                    tracing::info!(id, report_id = %report_id, ?format, "Downloading report");
                    let result = download_and_save(&client, &token, &report_id, format, &dir).await;
                    let response = match result {
                        Ok(path) => NetworkResponse::ReportSaved { id, path },
                        Err(e) => {
                            tracing::error!(id, error = ?e, "Download failed");
                            NetworkResponse::ActionFailed {
                                id,
                                action: UserAction::Download,
                                message: e.to_string(),
                            }
                        }
                    };
                    let _ = response_tx.send(response);
                });
            }

            NetworkCommand::Shutdown => {}
        }
    }
}

/// Fetch a report, convert it and write it under `dir`
async fn download_and_save(
    client: &ApiClient,
    token: &str,
    report_id: &str,
    format: ReportFormat,
    dir: &Path,
) -> anyhow::Result<PathBuf> {
    let payload = client.download_report(token, report_id).await?;
    let content = reports::extract_content(payload);
    let rendered = reports::render(&content, format)?;
    reports::save(dir, report_id, format, &rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::client::test_server::{http_response, serve_once};

    #[tokio::test]
    async fn test_fetch_reports_outcome() {
        let (base, _server) = serve_once(http_response("200 OK", r#"[{"alert_id":"A1"}]"#)).await;
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(NetworkActor::new(ApiClient::new(base), resp_tx).run(cmd_rx));

        cmd_tx
            .send(NetworkCommand::Fetch {
                id: 1,
                key: "alerts:/alerts".into(),
                endpoint: "/alerts".into(),
                token: "t".into(),
            })
            .unwrap();

        match resp_rx.recv().await {
            Some(NetworkResponse::Fetched { id, key, outcome }) => {
                assert_eq!(id, 1);
                assert_eq!(key, "alerts:/alerts");
                assert_eq!(outcome.unwrap(), serde_json::json!([{ "alert_id": "A1" }]));
            }
            other => panic!("unexpected response: {:?}", other),
        }
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
    }

    #[tokio::test]
    async fn test_newer_fetch_supersedes_hung_one() {
        // The first server accepts but never answers
        let hung = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let hung_base = format!("http://{}/api", hung.local_addr().unwrap());
        let _hold = tokio::spawn(async move {
            let _conn = hung.accept().await;
            std::future::pending::<()>().await;
        });
        let (good_base, _server) = serve_once(http_response("200 OK", "{}")).await;

        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let mut actor = NetworkActor::new(ApiClient::new(hung_base), resp_tx);
        actor.handle_command(NetworkCommand::Fetch {
            id: 1,
            key: "settings:/settings".into(),
            endpoint: "/settings".into(),
            token: "t".into(),
        });
        actor.client = ApiClient::new(good_base);
        actor.handle_command(NetworkCommand::Fetch {
            id: 2,
            key: "settings:/settings".into(),
            endpoint: "/settings".into(),
            token: "t".into(),
        });

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(actor.run(cmd_rx));

        let first = resp_rx.recv().await.unwrap();
        assert_eq!(first.id(), 2);
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
    }

    #[tokio::test]
    async fn test_download_failure_reports_action() {
        let (base, _server) = serve_once(http_response("500 Internal Server Error", "")).await;
        let dir = tempfile::tempdir().unwrap();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(NetworkActor::new(ApiClient::new(base), resp_tx).run(cmd_rx));

        cmd_tx
            .send(NetworkCommand::DownloadReport {
                id: 9,
                token: "t".into(),
                report_id: "R1".into(),
                format: ReportFormat::Csv,
                dir: dir.path().to_path_buf(),
            })
            .unwrap();

        match resp_rx.recv().await {
            Some(NetworkResponse::ActionFailed { id, action, message }) => {
                assert_eq!(id, 9);
                assert_eq!(action, UserAction::Download);
                assert_eq!(message, "Download failed");
            }
            other => panic!("unexpected response: {:?}", other),
        }
        assert!(!dir.path().join("R1.csv").exists());
    }

    #[tokio::test]
    async fn test_download_writes_csv() {
        let body = r#"{"report_id":"R2","data":"[{\"klaim\":\"K1\",\"score\":0.9}]"}"#;
        let (base, _server) = serve_once(http_response("200 OK", body)).await;
        let dir = tempfile::tempdir().unwrap();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(NetworkActor::new(ApiClient::new(base), resp_tx).run(cmd_rx));

        cmd_tx
            .send(NetworkCommand::DownloadReport {
                id: 3,
                token: "t".into(),
                report_id: "R2".into(),
                format: ReportFormat::Csv,
                dir: dir.path().to_path_buf(),
            })
            .unwrap();

        match resp_rx.recv().await {
            Some(NetworkResponse::ReportSaved { path, .. }) => {
                assert_eq!(path, dir.path().join("R2.csv"));
                let csv = std::fs::read_to_string(path).unwrap();
                assert_eq!(csv, "\"klaim\",\"score\"\n\"K1\",\"0.9\"");
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
