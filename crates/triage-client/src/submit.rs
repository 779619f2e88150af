//! Assessment submission.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use triage_core::Assessment;

use crate::error::SubmitError;
use crate::fetch::HttpPatientApi;

/// Wire body for `POST /submit-assessment`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssessmentSubmission {
    pub high_risk_patients: Vec<String>,
    pub fever_patients: Vec<String>,
    pub data_quality_issues: Vec<String>,
}

impl From<&Assessment> for AssessmentSubmission {
    fn from(assessment: &Assessment) -> Self {
        AssessmentSubmission {
            high_risk_patients: assessment.high_risk.clone(),
            fever_patients: assessment.fever.clone(),
            data_quality_issues: assessment.data_quality_issues.clone(),
        }
    }
}

impl HttpPatientApi {
    /// Submit the aggregated assessment.
    ///
    /// The response body is returned as raw JSON for the caller to report;
    /// nothing in it is interpreted or validated here. Errors are expected
    /// to be logged by the caller, not retried.
    pub async fn submit_assessment(
        &self,
        assessment: &Assessment,
    ) -> Result<Value, SubmitError> {
        let url = format!("{}/submit-assessment", self.config().base_url);
        let body = AssessmentSubmission::from(assessment);

        let response = self
            .http_client()
            .post(&url)
            .header("x-api-key", &self.config().api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::HttpStatus(status.as_u16()));
        }

        let feedback: Value = response.json().await?;
        debug!("assessment submitted");
        Ok(feedback)
    }
}
