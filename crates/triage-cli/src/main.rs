//! Triage - patient risk assessment runner
//!
//! One run fetches every page of patient records from the assessment API,
//! classifies each patient along the three risk dimensions, and submits
//! the aggregated lists back.
//!
//! A fetch failure (after per-page retries) aborts the run with a non-zero
//! exit and nothing is submitted. A submission failure is logged and the
//! run still exits cleanly; the computed assessment is lost for that run.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use triage_client::{
    fetch_all, init_tracing, ApiConfig, HttpPatientApi, RetryPolicy, RetryingFetcher,
    DEFAULT_MAX_RETRIES, DEFAULT_PAGE_LIMIT,
};
use triage_core::assess_patients;

#[derive(Parser)]
#[command(name = "triage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch, classify, and submit patient risk assessments", long_about = None)]
struct Cli {
    /// API key for the assessment service
    #[arg(long, env = "TRIAGE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Records to request per page
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    limit: u32,

    /// Attempts per page before the run is abandoned
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    max_retries: u32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.json, cli.verbose);

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("triage.run", run_id = %run_id);
    run(cli).instrument(span).await
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ApiConfig::new(cli.api_key)
        .with_page_limit(cli.limit)
        .with_max_retries(cli.max_retries);
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    let limit = config.page_limit;
    let policy = RetryPolicy::new(config.max_retries);
    let api = HttpPatientApi::new(config);
    let fetcher = RetryingFetcher::new(api, policy);

    let patients = fetch_all(&fetcher, limit)
        .await
        .context("failed to fetch patient records")?;

    if patients.is_empty() {
        info!("no patient data found");
        return Ok(());
    }

    let assessment = assess_patients(&patients);
    info!(
        total_processed = assessment.total_processed,
        high_risk = assessment.high_risk_count(),
        fever = assessment.fever_count(),
        data_quality_issues = assessment.data_quality_count(),
        "assessment complete"
    );

    // RetryingFetcher wraps the api by value; take it back for submission.
    let api = fetcher.into_inner();
    match api.submit_assessment(&assessment).await {
        Ok(feedback) => {
            info!("assessment submitted");
            report_feedback(&feedback);
        }
        Err(err) => {
            // No retry; the assessment is lost for this run.
            warn!(error = %err, "failed to submit assessment");
        }
    }

    Ok(())
}

/// Log feedback fields from the submission response when present. The
/// response shape is the server's business; nothing here is validated.
fn report_feedback(feedback: &serde_json::Value) {
    let fields = [
        ("strengths", "feedback.strengths"),
        ("issues", "feedback.issues"),
    ];
    for (key, label) in fields {
        if let Some(value) = feedback
            .get("results")
            .and_then(|r| r.get("feedback"))
            .and_then(|f| f.get(key))
        {
            info!(field = label, value = %value, "submission feedback");
        }
    }
}
