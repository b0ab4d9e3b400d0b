//! Raw skill payloads as scraped, tagged by schema generation.

use serde::{Deserialize, Serialize};

/// One entry of a scraped skill list: ratings are numbers, but the legacy
/// schema leads with a textual body-weight marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl RawField {
    /// Numeric value of the field. Text that parses as a number counts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawField::Number(n) => Some(*n),
            RawField::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for RawField {
    fn from(n: f64) -> Self {
        RawField::Number(n)
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        RawField::Text(s.to_string())
    }
}

/// A skill payload whose schema generation was decided when it was parsed.
///
/// Deserializes from a plain JSON array; a non-numeric first element marks
/// the legacy schema. Numeric strings are ratings like any other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<RawField>", into = "Vec<RawField>")]
pub enum SkillPayload {
    /// Older layout: leading body-weight text, one attribute short.
    Legacy(Vec<RawField>),
    /// Current layout: 34 ratings.
    Current(Vec<RawField>),
}

impl SkillPayload {
    /// Tags a raw field list with its schema generation.
    pub fn from_fields(fields: Vec<RawField>) -> Self {
        match fields.first() {
            Some(first) if first.as_number().is_none() => SkillPayload::Legacy(fields),
            _ => SkillPayload::Current(fields),
        }
    }

    pub fn fields(&self) -> &[RawField] {
        match self {
            SkillPayload::Legacy(f) | SkillPayload::Current(f) => f,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, SkillPayload::Legacy(_))
    }
}

impl From<Vec<RawField>> for SkillPayload {
    fn from(fields: Vec<RawField>) -> Self {
        SkillPayload::from_fields(fields)
    }
}

impl From<SkillPayload> for Vec<RawField> {
    fn from(payload: SkillPayload) -> Self {
        match payload {
            SkillPayload::Legacy(f) | SkillPayload::Current(f) => f,
        }
    }
}
