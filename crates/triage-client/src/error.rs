//! Error types for API client operations.

use thiserror::Error;

/// Errors from fetching patient pages.
///
/// Any variant surfacing from the retry wrapper is fatal to the run: there
/// is no partial-success contract, and records already collected are
/// discarded by the caller.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("http status {status} fetching page {page}")]
    HttpStatus { page: u32, status: u16 },

    #[error("fetch failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },
}

// reqwest::Error is not constructible outside reqwest, so the rendered
// message is carried instead; this keeps mock transports able to produce
// transport failures in tests.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

/// Errors from submitting an assessment.
///
/// Submission failure is reported but never fatal: the run completes and
/// the computed assessment is lost for that run.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("http status {0} submitting assessment")]
    HttpStatus(u16),
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        SubmitError::Transport(err.to_string())
    }
}

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
