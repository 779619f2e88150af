//! Per-dimension risk rules.
//!
//! Three independent pure classifiers, each total over its input domain:
//! anything outside the domain (missing, malformed, NaN) classifies as
//! [`RiskOutcome::BadData`] rather than erroring, so one bad record can
//! never abort a run.
//!
//! The threshold tables reproduce the upstream ruleset literally, including
//! its boundary quirks (see the notes on the diastolic scale and the fever
//! gap below). They are fixed by specification, not data-driven.

use serde::{Deserialize, Serialize};

/// Outcome of classifying one dimension: an ordinal level starting at 0,
/// or a bad-data marker for input outside the rule's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskOutcome {
    /// Dimension-specific ordinal risk level.
    Level(u8),
    /// Input was missing, malformed, or out of domain.
    BadData,
}

impl RiskOutcome {
    /// The ordinal level, or `None` for bad data.
    pub fn level(&self) -> Option<u8> {
        match self {
            RiskOutcome::Level(l) => Some(*l),
            RiskOutcome::BadData => None,
        }
    }

    /// Whether this outcome marks bad data.
    pub fn is_bad_data(&self) -> bool {
        matches!(self, RiskOutcome::BadData)
    }
}

/// Blood-pressure risk levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum BloodPressureLevel {
    Normal = 0,
    Elevated = 1,
    StageOne = 2,
    StageTwo = 3,
}

/// Fever risk levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum FeverLevel {
    Normal = 0,
    Low = 1,
    High = 2,
}

/// Age risk bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum AgeBand {
    Under40 = 0,
    FortyToSixtyFive = 1,
    OverSixtyFive = 2,
}

/// Classify a blood-pressure reading.
///
/// The reading must be a `"<systolic>/<diastolic>"` string with both halves
/// unsigned base-10 integers; any other shape (missing, no slash, empty
/// or non-numeric half) is [`RiskOutcome::BadData`]. The final level is the
/// max of the systolic and diastolic sub-scores.
pub fn assess_blood_pressure(reading: Option<&str>) -> RiskOutcome {
    let Some(reading) = reading else {
        return RiskOutcome::BadData;
    };
    let Some((systolic_str, diastolic_str)) = reading.split_once('/') else {
        return RiskOutcome::BadData;
    };

    let (Ok(systolic), Ok(diastolic)) = (
        systolic_str.parse::<u32>(),
        diastolic_str.parse::<u32>(),
    ) else {
        return RiskOutcome::BadData;
    };

    let systolic_risk = systolic_sub_score(systolic);
    let diastolic_risk = diastolic_sub_score(diastolic);

    RiskOutcome::Level(systolic_risk.max(diastolic_risk))
}

fn systolic_sub_score(systolic: u32) -> u8 {
    let level = match systolic {
        s if s < 120 => BloodPressureLevel::Normal,
        s if s < 130 => BloodPressureLevel::Elevated,
        s if s < 140 => BloodPressureLevel::StageOne,
        _ => BloodPressureLevel::StageTwo,
    };
    level as u8
}

/// Diastolic uses its own three-rung scale with no elevated step: 80–89 is
/// rung 1 and everything from 90 up caps at rung 2. Diastolic alone cannot
/// reach level 3.
fn diastolic_sub_score(diastolic: u32) -> u8 {
    match diastolic {
        d if d < 80 => 0,
        d if d < 90 => 1,
        _ => 2,
    }
}

/// Classify a body temperature (°F).
///
/// Missing or NaN readings are [`RiskOutcome::BadData`]. `≤ 99.5` is
/// normal, `[99.6, 100.9]` is low fever, everything else is high fever.
/// Readings strictly between 99.5 and 99.6 fall through to high fever;
/// the gap is part of the upstream ruleset and preserved literally.
pub fn assess_fever(temperature: Option<f64>) -> RiskOutcome {
    let Some(temperature) = temperature else {
        return RiskOutcome::BadData;
    };
    if temperature.is_nan() {
        return RiskOutcome::BadData;
    }

    let level = if temperature <= 99.5 {
        FeverLevel::Normal
    } else if (99.6..=100.9).contains(&temperature) {
        FeverLevel::Low
    } else {
        FeverLevel::High
    };
    RiskOutcome::Level(level as u8)
}

/// Classify an age in years.
///
/// Missing or NaN ages are [`RiskOutcome::BadData`]; otherwise `< 40`,
/// `[40, 65]`, and `> 65` map to bands 0, 1, 2.
pub fn assess_age(age: Option<f64>) -> RiskOutcome {
    let Some(age) = age else {
        return RiskOutcome::BadData;
    };
    if age.is_nan() {
        return RiskOutcome::BadData;
    }

    let band = if age < 40.0 {
        AgeBand::Under40
    } else if age <= 65.0 {
        AgeBand::FortyToSixtyFive
    } else {
        AgeBand::OverSixtyFive
    };
    RiskOutcome::Level(band as u8)
}
