//! Webhook Backend Implementation
//!
//! Sends the saved file to the configured analysis endpoint and hands back
//! whatever JSON the service answered with.
//!
//! # Features
//!
//! - Async HTTP communication with the analysis webhook
//! - Configurable endpoint and timeout
//! - A single attempt per save event (no retry, no backoff)
//!
//! # Examples
//!
//! ```no_run
//! use sca_webhook::WebhookBackend;
//!
//! let backend = WebhookBackend::new("http://localhost:5678/webhook/sca-analyze").unwrap();
//! ```

use crate::WebhookError;
use sca_domain::traits::AnalysisBackend;
use sca_domain::AnalysisRequest;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Default timeout for analysis requests (120 seconds)
///
/// The service embeds the snippet and runs two model passes, so responses
/// routinely take tens of seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// HTTP client for the remote analysis service
#[derive(Debug, Clone)]
pub struct WebhookBackend {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl WebhookBackend {
    /// Create a new backend for `endpoint` with the default timeout
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Configuration`] if the endpoint has no
    /// `http`/`https` scheme or the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, WebhookError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new backend with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WebhookError> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(WebhookError::Configuration(format!(
                "endpoint '{}' must start with http:// or https://",
                endpoint
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WebhookError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            client,
            timeout,
        })
    }

    /// The configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST one analysis request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the endpoint cannot be reached or the request times out
    /// - the service answers with a non-2xx status
    /// - the response body is not JSON
    pub async fn post(&self, request: &AnalysisRequest) -> Result<Value, WebhookError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            file = %request.file_path,
            bytes = request.code.len(),
            "sending analysis request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| WebhookError::from_transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WebhookError::from_transport(e, self.timeout))?;

        serde_json::from_str(&body)
            .map_err(|e| WebhookError::InvalidResponse(format!("Response is not JSON: {}", e)))
    }
}

impl AnalysisBackend for WebhookBackend {
    type Error = WebhookError;

    fn analyze(
        &self,
        request: AnalysisRequest,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send {
        async move { self.post(&request).await }
    }
}
