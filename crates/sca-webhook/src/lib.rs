//! SCA Capture Webhook Layer
//!
//! Implementations of the `AnalysisBackend` trait from `sca-domain`.
//!
//! # Backends
//!
//! - `WebhookBackend`: HTTP POST to the configured analysis endpoint
//! - `MockBackend`: Deterministic canned responses for testing
//!
//! # Examples
//!
//! ```
//! use sca_domain::{AnalysisBackend, AnalysisRequest};
//! use sca_webhook::MockBackend;
//! use serde_json::json;
//!
//! let backend = MockBackend::new(json!({"verdict": "safe"}));
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let response = runtime
//!     .block_on(backend.analyze(AnalysisRequest::new("a.py", "x = 1", "python")))
//!     .unwrap();
//! assert_eq!(response["verdict"], "safe");
//! ```

#![warn(missing_docs)]

pub mod webhook;

use sca_domain::traits::AnalysisBackend;
use sca_domain::AnalysisRequest;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use webhook::WebhookBackend;

/// Errors that can occur while calling the analysis service
#[derive(Error, Debug)]
pub enum WebhookError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request did not complete in time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The service answered with something that is not JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The backend is misconfigured
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl WebhookError {
    pub(crate) fn from_transport(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            WebhookError::Timeout(timeout)
        } else if e.is_builder() {
            WebhookError::Configuration(e.to_string())
        } else {
            WebhookError::Communication(e.to_string())
        }
    }
}

/// Mock analysis backend for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses are keyed by the request's `file_path`.
///
/// # Examples
///
/// ```
/// use sca_webhook::MockBackend;
/// use serde_json::json;
///
/// let mut backend = MockBackend::default();
/// backend.add_response("a.py", json!({"verdict": "violation"}));
/// backend.add_error("broken.py");
/// assert_eq!(backend.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockBackend {
    default_response: Value,
    responses: Arc<Mutex<HashMap<String, Value>>>,
    failures: Arc<Mutex<HashSet<String>>>,
    requests: Arc<Mutex<Vec<AnalysisRequest>>>,
}

impl MockBackend {
    /// Create a new MockBackend answering every request with `response`
    pub fn new(response: Value) -> Self {
        Self {
            default_response: response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashSet::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given file path
    pub fn add_response(&mut self, file_path: impl Into<String>, response: Value) {
        lock(&self.responses).insert(file_path.into(), response);
    }

    /// Configure to fail with a communication error for a given file path
    pub fn add_error(&mut self, file_path: impl Into<String>) {
        lock(&self.failures).insert(file_path.into());
    }

    /// Get the number of times analyze was called
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<AnalysisRequest> {
        lock(&self.requests).clone()
    }

    fn respond(&self, request: AnalysisRequest) -> Result<Value, WebhookError> {
        let file_path = request.file_path.clone();
        lock(&self.requests).push(request);

        if lock(&self.failures).contains(&file_path) {
            return Err(WebhookError::Communication("Mock error".to_string()));
        }

        Ok(lock(&self.responses)
            .get(&file_path)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone()))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(Value::Object(Default::default()))
    }
}

impl AnalysisBackend for MockBackend {
    type Error = WebhookError;

    fn analyze(
        &self,
        request: AnalysisRequest,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send {
        let outcome = self.respond(request);
        async move { outcome }
    }
}

// A poisoned lock only means another test thread panicked mid-update
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
