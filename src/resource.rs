//! Resource request results
//!
//! A [`Resource`] is the observable state of one view's fetch of one endpoint:
//! the last good payload, a status, and a failure message. It moves
//! `Idle -> Pending -> {SettledOk | SettledError}` and re-enters `Pending`
//! only through an explicit refetch. Only the most recently issued request may
//! settle it; responses to superseded requests are dropped.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::network::FetchError;

/// Lifecycle of a single fetch cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Pending,
    SettledOk,
    SettledError,
}

impl FetchStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, FetchStatus::SettledOk | FetchStatus::SettledError)
    }
}

/// Per-view, per-endpoint fetch state
#[derive(Clone, Debug)]
pub struct Resource<T> {
    key: String,
    endpoint: &'static str,
    payload: T,
    status: FetchStatus,
    failure: Option<String>,
    latest_request: Option<u64>,
}

impl<T: Default> Resource<T> {
    /// A resource starting from the record's documented defaults
    pub fn new(key: impl Into<String>, endpoint: &'static str) -> Self {
        Self::with_initial(key, endpoint, T::default())
    }
}

impl<T> Resource<T> {
    pub fn with_initial(key: impl Into<String>, endpoint: &'static str, initial: T) -> Self {
        Resource {
            key: key.into(),
            endpoint,
            payload: initial,
            status: FetchStatus::Idle,
            failure: None,
            latest_request: None,
        }
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Pending
    }

    fn settle_error(&mut self, message: String) {
        tracing::warn!(key = %self.key, endpoint = self.endpoint, error = %message, "Fetch failed");
        self.status = FetchStatus::SettledError;
        self.failure = Some(message);
    }
}

/// Type-erased view of a resource, so the app layer can route responses
/// without knowing each payload type
pub trait Tracked {
    /// Identity used to supersede in-flight requests
    fn key(&self) -> &str;

    fn endpoint(&self) -> &'static str;

    /// Marks a new request as the only one allowed to settle this resource
    fn begin(&mut self, request_id: u64);

    /// Applies a response. Returns false when the response belongs to a
    /// request this resource no longer waits for.
    fn settle(&mut self, request_id: u64, outcome: Result<Value, FetchError>) -> bool;

    fn pending_request(&self) -> Option<u64>;
}

impl<T: DeserializeOwned + Default> Tracked for Resource<T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    fn begin(&mut self, request_id: u64) {
        self.status = FetchStatus::Pending;
        self.failure = None;
        self.latest_request = Some(request_id);
    }

    fn settle(&mut self, request_id: u64, outcome: Result<Value, FetchError>) -> bool {
        if self.latest_request != Some(request_id) {
            tracing::debug!(key = %self.key, request_id, "Dropping superseded response");
            return false;
        }
        self.latest_request = None;

        match outcome {
            // A `null` body means "nothing yet", same as absent fields
            Ok(Value::Null) => {
                self.payload = T::default();
                self.status = FetchStatus::SettledOk;
                self.failure = None;
            }
            Ok(value) => match serde_json::from_value::<T>(value) {
                Ok(payload) => {
                    self.payload = payload;
                    self.status = FetchStatus::SettledOk;
                    self.failure = None;
                }
                // Keep the stale payload on screen
                Err(e) => self.settle_error(format!("Unexpected response: {}", e)),
            },
            Err(e) => self.settle_error(e.to_string()),
        }
        true
    }

    fn pending_request(&self) -> Option<u64> {
        self.latest_request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Alert, Overview};
    use serde_json::json;

    fn overview() -> Resource<Overview> {
        Resource::new("dashboard/overview", "/dashboard/overview")
    }

    #[test]
    fn test_starts_idle_with_initial_payload() {
        let res = Resource::with_initial("k", "/alerts", vec![Alert::default()]);
        assert_eq!(res.status(), FetchStatus::Idle);
        assert_eq!(res.payload().len(), 1);
        assert!(res.failure().is_none());
    }

    #[test]
    fn test_success_replaces_payload() {
        let mut res = overview();
        res.begin(1);
        assert!(res.is_loading());

        assert!(res.settle(1, Ok(json!({ "total_claims": 42 }))));
        assert_eq!(res.status(), FetchStatus::SettledOk);
        assert_eq!(res.payload().total_claims, 42);
        assert!(res.failure().is_none());
    }

    #[test]
    fn test_unauthorized_message_and_stale_payload_kept() {
        let mut res = overview();
        res.begin(1);
        res.settle(1, Ok(json!({ "total_claims": 7 })));

        res.begin(2);
        res.settle(2, Err(FetchError::Unauthorized));
        assert_eq!(res.status(), FetchStatus::SettledError);
        assert_eq!(
            res.failure(),
            Some("Unauthorized: Please login or check API token")
        );
        assert_eq!(res.payload().total_claims, 7);
    }

    #[test]
    fn test_refetch_supersedes_outstanding_request() {
        let mut res = overview();
        res.begin(1);
        res.begin(2);
        assert_eq!(res.status(), FetchStatus::Pending);

        // The older request answers first and is ignored
        assert!(!res.settle(1, Ok(json!({ "total_claims": 1 }))));
        assert_eq!(res.status(), FetchStatus::Pending);
        assert_eq!(res.payload().total_claims, 0);

        assert!(res.settle(2, Ok(json!({ "total_claims": 2 }))));
        assert_eq!(res.status(), FetchStatus::SettledOk);
        assert_eq!(res.payload().total_claims, 2);
    }

    #[test]
    fn test_begin_clears_previous_failure() {
        let mut res = overview();
        res.begin(1);
        res.settle(1, Err(FetchError::Network("connection refused".into())));
        assert_eq!(res.failure(), Some("connection refused"));

        res.begin(2);
        assert!(res.failure().is_none());
        assert!(res.is_loading());
    }

    #[test]
    fn test_null_body_settles_with_defaults() {
        let mut claims: Resource<Vec<crate::models::Claim>> = Resource::new("analysis", "/klaim");
        claims.begin(1);
        assert!(claims.settle(1, Ok(Value::Null)));
        assert_eq!(claims.status(), FetchStatus::SettledOk);
        assert!(claims.payload().is_empty());
        assert!(claims.failure().is_none());

        let mut res = overview();
        res.begin(1);
        res.settle(1, Ok(json!({ "total_claims": 5 })));
        res.begin(2);
        res.settle(2, Ok(json!(null)));
        assert_eq!(res.status(), FetchStatus::SettledOk);
        assert_eq!(res.payload(), &Overview::default());
    }

    #[test]
    fn test_shape_mismatch_settles_error() {
        let mut res: Resource<Vec<Alert>> = Resource::new("alerts", "/alerts");
        res.begin(3);
        res.settle(3, Ok(json!("maintenance mode")));
        assert_eq!(res.status(), FetchStatus::SettledError);
        assert!(res.failure().unwrap_or("").starts_with("Unexpected response"));
        assert!(res.payload().is_empty());
    }
}
