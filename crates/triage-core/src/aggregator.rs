//! One-pass assessment aggregation.
//!
//! [`assess_patients`] classifies every patient in the fetched sequence and
//! collects the three deduplicated identifier lists the submission endpoint
//! expects. The pass is pure: the input is immutable and the result is a
//! returned value, never shared accumulator state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combiner::combine;
use crate::patient::Patient;
use crate::rules::{assess_age, assess_blood_pressure, assess_fever, FeverLevel};

/// Aggregated triage result over one full patient fetch.
///
/// Lists preserve discovery order and hold each identifier at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Patients with combined score ≥ 4.
    pub high_risk: Vec<String>,
    /// Patients with fever sub-level ≥ 1, independent of high-risk status.
    pub fever: Vec<String>,
    /// Patients with any bad-data dimension; never scored.
    pub data_quality_issues: Vec<String>,
    /// Total records processed, including duplicates and excluded patients.
    pub total_processed: usize,
    /// Timestamp when the assessment was produced.
    pub generated_at: DateTime<Utc>,
}

impl Assessment {
    /// Number of high-risk patients.
    pub fn high_risk_count(&self) -> usize {
        self.high_risk.len()
    }

    /// Number of fever patients.
    pub fn fever_count(&self) -> usize {
        self.fever.len()
    }

    /// Number of patients with data-quality issues.
    pub fn data_quality_count(&self) -> usize {
        self.data_quality_issues.len()
    }
}

/// Classify every patient and aggregate the three identifier lists.
///
/// Single pass, no revisits. A patient with any bad-data dimension lands
/// only in `data_quality_issues` and contributes to neither of the other
/// lists; otherwise the combined score decides high-risk membership and
/// the fever sub-level alone decides fever membership.
pub fn assess_patients(patients: &[Patient]) -> Assessment {
    let mut high_risk: Vec<String> = Vec::new();
    let mut fever: Vec<String> = Vec::new();
    let mut data_quality_issues: Vec<String> = Vec::new();

    for patient in patients {
        let bp_risk = assess_blood_pressure(patient.blood_pressure.as_deref());
        let fever_risk = assess_fever(patient.temperature);
        let age_risk = assess_age(patient.age);

        if bp_risk.is_bad_data() || fever_risk.is_bad_data() || age_risk.is_bad_data() {
            push_unique(&mut data_quality_issues, &patient.patient_id);
            continue;
        }

        if combine(bp_risk, fever_risk, age_risk).is_high_risk() {
            push_unique(&mut high_risk, &patient.patient_id);
        }

        // Independent of the high-risk branch above.
        if fever_risk.level().unwrap_or(0) >= FeverLevel::Low as u8 {
            push_unique(&mut fever, &patient.patient_id);
        }
    }

    Assessment {
        high_risk,
        fever,
        data_quality_issues,
        total_processed: patients.len(),
        generated_at: Utc::now(),
    }
}

/// Append `id` unless already present; list order is discovery order.
fn push_unique(list: &mut Vec<String>, id: &str) {
    if !list.iter().any(|existing| existing == id) {
        list.push(id.to_string());
    }
}
