//! API client configuration.

use serde::{Deserialize, Serialize};

/// Default assessment API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://assessment.ksensetech.com/api";

/// Default page size for patient fetches.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Default retry bound per page request.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for the assessment API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Static credential sent as the `x-api-key` header. Treated as an
    /// opaque value; never logged.
    pub api_key: String,
    /// Records requested per page.
    pub page_limit: u32,
    /// Attempts per page before the fetch is abandoned.
    pub max_retries: u32,
}

impl ApiConfig {
    /// Create a config for the default endpoint with the given credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        ApiConfig {
            base_url: std::env::var("TRIAGE_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: api_key.into(),
            page_limit: DEFAULT_PAGE_LIMIT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the page size.
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    /// Override the per-page retry bound.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}
