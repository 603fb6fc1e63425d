//! StudentRecord - The single domain entity
//!
//! TigerStyle: Explicit types, explicit validation, builder for inputs.
//!
//! Field names serialize in camelCase and the identifier under `_id`, the
//! shape the browser client reads.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use super::error::{StoreError, StoreResult};
use crate::constants::{GPA_MAX, GPA_MIN, TIMESTAMP_SUBSEC_DIGITS};

// =============================================================================
// StudentRecord
// =============================================================================

/// A stored student.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Store-assigned identifier (UUID v4)
    #[serde(rename = "_id")]
    pub id: String,
    /// Full name
    pub name: String,
    /// Email address, unique across the collection
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Roll number, unique across the collection
    pub roll_number: String,
    /// Enrolled course
    pub course: String,
    /// Grade point average in [0, 4]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    /// Postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// When the student enrolled (defaults to creation time)
    pub enrollment_date: DateTime<Utc>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl StudentRecord {
    /// Build a new record from create input.
    ///
    /// Assigns a fresh id and sets all three timestamps to now.
    ///
    /// # Errors
    /// Returns `StoreError::Validation` if a required field is missing or
    /// empty, or if gpa is out of range.
    pub fn create(input: NewStudent) -> StoreResult<Self> {
        validate_new(&input)?;

        let now = now();
        let record = Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            phone: input.phone.unwrap_or_default(),
            roll_number: input.roll_number.unwrap_or_default(),
            course: input.course.unwrap_or_default(),
            gpa: input.gpa,
            address: input.address.filter(|a| !a.is_empty()),
            enrollment_date: now,
            created_at: now,
            updated_at: now,
        };

        // Postcondition
        assert_eq!(record.created_at, record.updated_at);

        Ok(record)
    }

    /// Produce the updated copy of this record.
    ///
    /// Only truthy patch values overwrite: absent fields, empty strings and a
    /// gpa of exactly zero leave the stored value as it was. The merged record
    /// is validated and its `updated_at` is strictly later than before.
    ///
    /// # Errors
    /// Returns `StoreError::Validation` if the merged record is invalid.
    pub fn merge(&self, patch: &StudentPatch) -> StoreResult<Self> {
        let mut merged = self.clone();

        if let Some(name) = truthy(&patch.name) {
            merged.name = name.to_string();
        }
        if let Some(email) = truthy(&patch.email) {
            merged.email = email.to_string();
        }
        if let Some(phone) = truthy(&patch.phone) {
            merged.phone = phone.to_string();
        }
        if let Some(roll_number) = truthy(&patch.roll_number) {
            merged.roll_number = roll_number.to_string();
        }
        if let Some(course) = truthy(&patch.course) {
            merged.course = course.to_string();
        }
        if let Some(gpa) = patch.gpa.filter(|g| *g != 0.0) {
            merged.gpa = Some(gpa);
        }
        if let Some(address) = truthy(&patch.address) {
            merged.address = Some(address.to_string());
        }

        merged.validate()?;
        merged.updated_at = next_timestamp(self.updated_at);

        // Postcondition
        assert!(merged.updated_at > self.updated_at, "updated_at must advance");
        assert_eq!(merged.id, self.id, "merge must not change id");

        Ok(merged)
    }

    /// Check the record-level invariants.
    ///
    /// # Errors
    /// Returns `StoreError::Validation` naming every violated field.
    pub fn validate(&self) -> StoreResult<()> {
        let mut problems = Vec::new();
        for (field, value) in [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("rollNumber", self.roll_number.as_str()),
            ("course", self.course.as_str()),
        ] {
            if value.is_empty() {
                problems.push(format!("{field} is required"));
            }
        }
        if let Some(problem) = gpa_problem(self.gpa) {
            problems.push(problem);
        }
        into_result(problems)
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// Create payload.
///
/// Every field is optional at the decode level so that a missing field is
/// reported as a validation error naming it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    /// Full name (required)
    pub name: Option<String>,
    /// Email address (required, unique)
    pub email: Option<String>,
    /// Phone number (required)
    pub phone: Option<String>,
    /// Roll number (required, unique)
    pub roll_number: Option<String>,
    /// Course (required)
    pub course: Option<String>,
    /// Grade point average
    #[serde(default, deserialize_with = "deserialize_gpa")]
    pub gpa: Option<f64>,
    /// Postal address
    pub address: Option<String>,
}

impl NewStudent {
    /// Create a payload with every required field set.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        roll_number: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
            roll_number: Some(roll_number.into()),
            course: Some(course.into()),
            gpa: None,
            address: None,
        }
    }

    /// Set the gpa.
    #[must_use]
    pub fn with_gpa(mut self, gpa: f64) -> Self {
        self.gpa = Some(gpa);
        self
    }

    /// Set the address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Update payload. Any subset of fields; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    /// New full name
    pub name: Option<String>,
    /// New email address (must stay unique)
    pub email: Option<String>,
    /// New phone number
    pub phone: Option<String>,
    /// New roll number (must stay unique)
    pub roll_number: Option<String>,
    /// New course
    pub course: Option<String>,
    /// New grade point average
    #[serde(default, deserialize_with = "deserialize_gpa")]
    pub gpa: Option<f64>,
    /// New postal address
    pub address: Option<String>,
}

impl StudentPatch {
    /// Email this patch would write, if any.
    #[must_use]
    pub fn effective_email(&self) -> Option<&str> {
        truthy(&self.email)
    }

    /// Roll number this patch would write, if any.
    #[must_use]
    pub fn effective_roll_number(&self) -> Option<&str> {
        truthy(&self.roll_number)
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validate a create payload before anything is written.
///
/// # Errors
/// Returns `StoreError::Validation` naming every missing field and an
/// out-of-range gpa.
pub fn validate_new(input: &NewStudent) -> StoreResult<()> {
    let mut problems = Vec::new();
    for (field, value) in [
        ("name", &input.name),
        ("email", &input.email),
        ("phone", &input.phone),
        ("rollNumber", &input.roll_number),
        ("course", &input.course),
    ] {
        if truthy(value).is_none() {
            problems.push(format!("{field} is required"));
        }
    }
    if let Some(problem) = gpa_problem(input.gpa) {
        problems.push(problem);
    }
    into_result(problems)
}

fn gpa_problem(gpa: Option<f64>) -> Option<String> {
    match gpa {
        Some(g) if !(GPA_MIN..=GPA_MAX).contains(&g) => {
            Some(format!("gpa {g} is outside [{GPA_MIN}, {GPA_MAX}]"))
        }
        _ => None,
    }
}

fn into_result(problems: Vec<String>) -> StoreResult<()> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(StoreError::validation(format!(
            "student validation failed: {}",
            problems.join(", ")
        )))
    }
}

fn truthy(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// =============================================================================
// Timestamps
// =============================================================================

/// Current time at the precision the database keeps.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(TIMESTAMP_SUBSEC_DIGITS)
}

/// A timestamp strictly after `previous`.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

// =============================================================================
// gpa decoding
// =============================================================================

/// Accept a number, a numeric string, an empty string, or null.
///
/// The browser form posts gpa as text; empty text means no gpa.
fn deserialize_gpa<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum GpaInput {
        Number(f64),
        Text(String),
    }

    match Option::<GpaInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(GpaInput::Number(n)) => Ok(Some(n)),
        Some(GpaInput::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("gpa \"{text}\" is not a number")))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
