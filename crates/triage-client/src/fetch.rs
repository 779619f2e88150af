//! Paginated patient fetching with bounded retry.
//!
//! Three layers, each independently testable:
//! - [`HttpPatientApi`] performs one single-attempt page request
//! - [`RetryingFetcher`] wraps any [`PageFetcher`] with the backoff policy
//! - [`fetch_all`] walks pages sequentially until the data is exhausted

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};
use triage_core::Patient;

use crate::backoff::{RetryPolicy, Sleeper, TokioSleeper};
use crate::config::ApiConfig;
use crate::error::{FetchError, Result};

/// Response envelope for `GET /patients`.
#[derive(Debug, Deserialize)]
struct PatientPage {
    data: Vec<Patient>,
}

/// Injectable source of patient pages.
///
/// Implement this trait to plug in the real API or test stubs.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch page `page` (1-indexed) with up to `limit` records.
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Patient>>;
}

/// HTTP client for the assessment API. One call is one attempt; retry
/// lives in [`RetryingFetcher`].
pub struct HttpPatientApi {
    config: ApiConfig,
    http_client: reqwest::Client,
}

impl HttpPatientApi {
    /// Create a new API client.
    pub fn new(config: ApiConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent("triage-client/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        HttpPatientApi {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub(crate) fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }
}

#[async_trait]
impl PageFetcher for HttpPatientApi {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Patient>> {
        let url = format!("{}/patients", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("page", page), ("limit", limit)])
            .header("x-api-key", &self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                page,
                status: status.as_u16(),
            });
        }

        let body: PatientPage = response.json().await?;
        debug!(page = page, records = body.data.len(), "fetched patient page");
        Ok(body.data)
    }
}

/// Wraps a [`PageFetcher`] with bounded exponential-backoff retry.
///
/// A page request is attempted up to `policy.max_retries` times; after
/// failed attempt `a < max`, the fetcher sleeps `2^a` seconds before the
/// next attempt. Exhausting the bound yields
/// [`FetchError::RetriesExhausted`] wrapping the last underlying error.
pub struct RetryingFetcher<F> {
    inner: F,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl<F: PageFetcher> RetryingFetcher<F> {
    /// Wrap `inner` with `policy`, sleeping on the tokio timer.
    pub fn new(inner: F, policy: RetryPolicy) -> Self {
        Self::with_sleeper(inner, policy, Arc::new(TokioSleeper))
    }

    /// Wrap `inner` with `policy` and an explicit sleeper (for tests).
    pub fn with_sleeper(inner: F, policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        RetryingFetcher {
            inner,
            policy,
            sleeper,
        }
    }

    /// Unwrap the inner fetcher.
    pub fn into_inner(self) -> F {
        self.inner
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for RetryingFetcher<F> {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Patient>> {
        let max_attempts = self.policy.max_retries.max(1);

        for attempt in 1..=max_attempts {
            match self.inner.fetch_page(page, limit).await {
                Ok(records) => return Ok(records),
                Err(err) if attempt == max_attempts => {
                    return Err(FetchError::RetriesExhausted {
                        attempts: max_attempts,
                        source: Box::new(err),
                    });
                }
                Err(err) => {
                    let delay = self.policy.delay_after(attempt);
                    warn!(
                        page = page,
                        attempt = attempt,
                        delay_secs = delay.as_secs(),
                        error = %err,
                        "page fetch failed; retrying"
                    );
                    self.sleeper.sleep(delay).await;
                }
            }
        }

        unreachable!("retry loop always returns within max_attempts")
    }
}

/// Fetch every page of patient records, strictly sequentially.
///
/// Pages are requested for page = 1, 2, 3, …; the walk stops on an empty
/// page or a short page (`len < limit`, the final partial page, with no
/// extra round-trip). An empty first page yields an empty result. Any page
/// error aborts the whole fetch; already-collected records are discarded
/// by the caller.
pub async fn fetch_all(fetcher: &dyn PageFetcher, limit: u32) -> Result<Vec<Patient>> {
    let mut all_patients: Vec<Patient> = Vec::new();
    let mut page = 1u32;

    loop {
        let records = fetcher.fetch_page(page, limit).await?;
        if records.is_empty() {
            break;
        }
        let page_len = records.len();
        all_patients.extend(records);
        if (page_len as u32) < limit {
            break;
        }
        page += 1;
    }

    info!(
        total = all_patients.len(),
        pages = page,
        "patient fetch complete"
    );
    Ok(all_patients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted fetcher: returns the next canned result per call and counts
    /// page requests.
    struct ScriptedFetcher {
        pages: Mutex<Vec<Result<Vec<Patient>>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(pages: Vec<Result<Vec<Patient>>>) -> Self {
            ScriptedFetcher {
                pages: Mutex::new(pages),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch_page(&self, _page: u32, _limit: u32) -> Result<Vec<Patient>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                return Ok(Vec::new());
            }
            pages.remove(0)
        }
    }

    /// Sleeper that records requested durations instead of waiting.
    struct RecordingSleeper {
        slept: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn new() -> Arc<Self> {
            Arc::new(RecordingSleeper {
                slept: Mutex::new(Vec::new()),
            })
        }

        fn durations(&self) -> Vec<Duration> {
            self.slept.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    fn page_of(count: usize, prefix: &str) -> Vec<Patient> {
        (0..count)
            .map(|i| Patient::new(format!("{prefix}-{i}")))
            .collect()
    }

    #[tokio::test]
    async fn test_fetch_all_stops_on_short_page() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page_of(20, "p1")),
            Ok(page_of(20, "p2")),
            Ok(page_of(7, "p3")),
        ]);
        let patients = fetch_all(&fetcher, 20).await.unwrap();
        assert_eq!(patients.len(), 47);
        assert_eq!(fetcher.call_count(), 3);
    }

    #[tokio::test]
    async fn test_fetch_all_empty_first_page_is_ok() {
        let fetcher = ScriptedFetcher::new(vec![Ok(Vec::new())]);
        let patients = fetch_all(&fetcher, 20).await.unwrap();
        assert!(patients.is_empty());
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_full_pages_need_trailing_empty_page() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page_of(20, "p1")),
            Ok(page_of(20, "p2")),
            Ok(Vec::new()),
        ]);
        let patients = fetch_all(&fetcher, 20).await.unwrap();
        assert_eq!(patients.len(), 40);
        assert_eq!(fetcher.call_count(), 3);
    }

    #[tokio::test]
    async fn test_fetch_all_aborts_on_page_error() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page_of(20, "p1")),
            Err(FetchError::HttpStatus {
                page: 2,
                status: 500,
            }),
        ]);
        let result = fetch_all(&fetcher, 20).await;
        assert!(matches!(
            result,
            Err(FetchError::HttpStatus { page: 2, status: 500 })
        ));
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_transient_failures() {
        let inner = ScriptedFetcher::new(vec![
            Err(FetchError::Transport("connection reset".to_string())),
            Err(FetchError::HttpStatus {
                page: 1,
                status: 503,
            }),
            Ok(page_of(5, "ok")),
        ]);
        let sleeper = RecordingSleeper::new();
        let fetcher = RetryingFetcher::with_sleeper(inner, RetryPolicy::new(3), sleeper.clone());

        let records = fetcher.fetch_page(1, 20).await.unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(
            sleeper.durations(),
            vec![Duration::from_secs(2), Duration::from_secs(4)],
        );
    }

    #[tokio::test]
    async fn test_retry_exhaustion_wraps_last_error() {
        let inner = ScriptedFetcher::new(vec![
            Err(FetchError::HttpStatus {
                page: 1,
                status: 500,
            }),
            Err(FetchError::HttpStatus {
                page: 1,
                status: 502,
            }),
            Err(FetchError::HttpStatus {
                page: 1,
                status: 429,
            }),
        ]);
        let sleeper = RecordingSleeper::new();
        let fetcher = RetryingFetcher::with_sleeper(inner, RetryPolicy::new(3), sleeper.clone());

        let err = fetcher.fetch_page(1, 20).await.unwrap_err();
        match err {
            FetchError::RetriesExhausted { attempts, source } => {
                assert_eq!(attempts, 3);
                assert!(matches!(
                    *source,
                    FetchError::HttpStatus { status: 429, .. }
                ));
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
        // No backoff after the final attempt.
        assert_eq!(sleeper.durations().len(), 2);
    }

    #[tokio::test]
    async fn test_single_attempt_policy_never_sleeps() {
        let inner = ScriptedFetcher::new(vec![Err(FetchError::Transport(
            "timed out".to_string(),
        ))]);
        let sleeper = RecordingSleeper::new();
        let fetcher = RetryingFetcher::with_sleeper(inner, RetryPolicy::new(1), sleeper.clone());

        let err = fetcher.fetch_page(1, 20).await.unwrap_err();
        assert!(matches!(err, FetchError::RetriesExhausted { attempts: 1, .. }));
        assert!(sleeper.durations().is_empty());
    }
}
