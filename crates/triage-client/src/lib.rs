//! Triage Client - resilient access to the patient assessment API
//!
//! Provides:
//! - Configuration for the assessment endpoint and credential
//! - A paginated fetch client with bounded exponential-backoff retry
//! - Assessment submission with degraded-failure semantics
//! - Tracing initialisation shared by the triage binaries

pub mod backoff;
pub mod config;
pub mod error;
pub mod fetch;
pub mod submit;
pub mod telemetry;

pub use backoff::{RetryPolicy, Sleeper, TokioSleeper};
pub use config::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_PAGE_LIMIT};
pub use error::{FetchError, Result, SubmitError};
pub use fetch::{fetch_all, HttpPatientApi, PageFetcher, RetryingFetcher};
pub use submit::AssessmentSubmission;
pub use telemetry::init_tracing;
