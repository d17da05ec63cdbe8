//! HTTP client wrapper - authenticated requests against the dashboard API

use std::fmt;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::models::GenerateReportRequest;
use crate::constants::endpoints;

/// Why a resource fetch did not produce a payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP 401
    Unauthorized,
    /// Any other non-success status
    Http { status: u16, reason: String },
    /// No response at all
    Network(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Unauthorized => {
                write!(f, "Unauthorized: Please login or check API token")
            }
            FetchError::Http { reason, .. } => write!(f, "API Error: {}", reason),
            FetchError::Network(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for FetchError {}

/// Client for the dashboard REST API
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            client: create_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Attach the headers every dashboard request carries
    fn authorized(&self, builder: reqwest::RequestBuilder, token: &str) -> reqwest::RequestBuilder {
        builder
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", token))
    }

    /// GET an endpoint and decode its JSON body.
    ///
    /// A 2xx body that is not valid JSON is returned as a JSON string holding
    /// the raw text.
    pub async fn get_json(&self, endpoint: &str, token: &str) -> Result<Value, FetchError> {
        let url = self.url(endpoint);
        let resp = self
            .authorized(self.client.get(&url), token)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized);
        }
        if !status.is_success() {
            // reqwest does not expose the server's reason phrase
            let reason = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_u16().to_string());
            return Err(FetchError::Http {
                status: status.as_u16(),
                reason,
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        match serde_json::from_str::<Value>(&body) {
            Ok(json) => Ok(json),
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "Response body is not JSON, keeping raw text");
                Ok(Value::String(body))
            }
        }
    }

    /// POST a report generation request
    pub async fn generate_report(&self, token: &str, request: &GenerateReportRequest) -> Result<()> {
        let resp = self
            .authorized(self.client.post(self.url(endpoints::GENERATE_REPORT)), token)
            .json(request)
            .send()
            .await
            .context("Generate request failed")?;

        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            if text.trim().is_empty() {
                bail!("Generate failed");
            }
            bail!(text);
        }
        Ok(())
    }

    /// GET the stored content of a report
    pub async fn download_report(&self, token: &str, report_id: &str) -> Result<Value> {
        let resp = self
            .client
            .get(self.url(&endpoints::report_download(report_id)))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .context("Download request failed")?;

        if !resp.status().is_success() {
            bail!("Download failed");
        }

        let payload = resp
            .json::<Value>()
            .await
            .context("Download response is not JSON")?;
        Ok(payload)
    }
}

/// Create an HTTP client with default configuration.
///
/// No request timeout is set: a backend that never answers leaves the
/// request outstanding until it is superseded or cancelled.
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
pub(crate) mod test_server {
    //! A one-shot HTTP responder for exercising the client

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves `response` to the first connection and returns the raw request
    pub async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (format!("http://{}/api", addr), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(head_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..head_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= head_end + 4 + content_length
    }

    pub fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }
}
