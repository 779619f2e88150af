//! Triage Core - patient risk classification
//!
//! Pure domain logic for the triage pipeline:
//! - Patient record model with lenient field deserialization
//! - Per-dimension risk rules (blood pressure, temperature, age)
//! - Score combination with bad-data exclusion
//! - One-pass assessment aggregation into deduplicated id lists

pub mod aggregator;
pub mod combiner;
pub mod patient;
pub mod rules;

pub use aggregator::{assess_patients, Assessment};
pub use combiner::{combine, CombinedRisk, HIGH_RISK_THRESHOLD};
pub use patient::Patient;
pub use rules::{
    assess_age, assess_blood_pressure, assess_fever, AgeBand, BloodPressureLevel, FeverLevel,
    RiskOutcome,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
