//! Combining per-dimension outcomes into one patient-level verdict.

use crate::rules::RiskOutcome;

/// Combined score at or above this is high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 4;

/// Patient-level result of combining the three dimension outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinedRisk {
    /// Sum of the three dimension levels, range 0–8.
    Score(u8),
    /// At least one dimension was bad data; the patient is excluded from
    /// scoring and recorded only as a data-quality issue.
    Excluded,
}

impl CombinedRisk {
    /// Whether the combined score meets [`HIGH_RISK_THRESHOLD`].
    ///
    /// Always `false` for excluded patients.
    pub fn is_high_risk(&self) -> bool {
        match self {
            CombinedRisk::Score(score) => *score >= HIGH_RISK_THRESHOLD,
            CombinedRisk::Excluded => false,
        }
    }
}

/// Combine the three dimension outcomes for one patient.
///
/// Any bad-data dimension excludes the patient outright — there is no
/// partial-credit sum over the remaining dimensions. Otherwise the score
/// is the arithmetic sum of the three levels.
pub fn combine(
    blood_pressure: RiskOutcome,
    fever: RiskOutcome,
    age: RiskOutcome,
) -> CombinedRisk {
    match (
        blood_pressure.level(),
        fever.level(),
        age.level(),
    ) {
        (Some(bp), Some(fever), Some(age)) => CombinedRisk::Score(bp + fever + age),
        _ => CombinedRisk::Excluded,
    }
}
