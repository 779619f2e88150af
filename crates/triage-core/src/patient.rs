//! Patient record model as served by the upstream API.
//!
//! The upstream data set intentionally contains malformed records (ages as
//! prose, temperatures as booleans, missing blood pressure). Deserialization
//! is therefore lenient: a field that is not the expected JSON type becomes
//! `None` and is later classified as bad data, instead of failing the whole
//! page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One patient record, immutable once fetched.
///
/// `patient_id` is the opaque unique key for all output lists. Only
/// `age`, `blood_pressure`, and `temperature` are inspected by
/// classification; the remaining fields are descriptive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Unique patient identifier.
    pub patient_id: String,

    /// Patient name, "Lastname, Firstname".
    #[serde(default)]
    pub name: Option<String>,

    /// Age in years; `None` when missing or not a JSON number.
    #[serde(default, deserialize_with = "lenient_number")]
    pub age: Option<f64>,

    #[serde(default)]
    pub gender: Option<String>,

    /// Blood pressure reading, expected `"systolic/diastolic"`;
    /// `None` when missing or not a JSON string.
    #[serde(default, deserialize_with = "lenient_string")]
    pub blood_pressure: Option<String>,

    /// Body temperature in °F; `None` when missing or not a JSON number.
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,

    #[serde(default)]
    pub visit_date: Option<String>,

    #[serde(default)]
    pub diagnosis: Option<String>,

    #[serde(default)]
    pub medications: Option<String>,
}

impl Patient {
    /// Create a record with the given id and no vitals.
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            name: None,
            age: None,
            gender: None,
            blood_pressure: None,
            temperature: None,
            visit_date: None,
            diagnosis: None,
            medications: None,
        }
    }

    /// Create a record with the three classified vitals set.
    pub fn with_vitals(
        patient_id: impl Into<String>,
        blood_pressure: Option<&str>,
        temperature: Option<f64>,
        age: Option<f64>,
    ) -> Self {
        Self {
            blood_pressure: blood_pressure.map(str::to_string),
            temperature,
            age,
            ..Self::new(patient_id)
        }
    }
}

/// Accept only JSON numbers; anything else (string, bool, null) maps to `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Accept only JSON strings; anything else maps to `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}
