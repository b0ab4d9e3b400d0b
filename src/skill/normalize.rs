//! Schema reconciliation for skill payloads.
//!
//! Both schema generations end up as the same 34-entry vector:
//!   current: taken as is
//!   legacy:  leading weight marker dropped, placeholder 75 inserted at
//!            index 11 so the seven-stat blocks line up with the current
//!            layout

use thiserror::Error;

use super::payload::{RawField, SkillPayload};

/// Number of attributes in a normalized skill vector.
pub const SKILL_LEN: usize = 34;

/// Index at which legacy payloads are missing an attribute.
pub const LEGACY_PLACEHOLDER_INDEX: usize = 11;

/// Value filled in at [`LEGACY_PLACEHOLDER_INDEX`] for legacy payloads.
pub const LEGACY_PLACEHOLDER_VALUE: f32 = 75.0;

/// Errors for payloads that cannot produce a 34-entry vector.
#[derive(Debug, Error, PartialEq)]
pub enum SkillError {
    #[error("skill vector has {found} entries after normalization, expected 34")]
    WrongArity { found: usize },

    #[error("non-numeric skill field at index {index}: {value:?}")]
    NonNumericField { index: usize, value: String },
}

/// A fixed-length player attribute vector in current-schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSkill {
    values: [f32; SKILL_LEN],
    /// Bit `i` set when entry `i` is a schema placeholder, not a rating.
    placeholders: u64,
}

impl NormalizedSkill {
    pub fn new(values: [f32; SKILL_LEN]) -> Self {
        NormalizedSkill {
            values,
            placeholders: 0,
        }
    }

    pub fn zeros() -> Self {
        NormalizedSkill::new([0.0; SKILL_LEN])
    }

    #[inline]
    pub fn values(&self) -> &[f32; SKILL_LEN] {
        &self.values
    }

    pub fn into_values(self) -> [f32; SKILL_LEN] {
        self.values
    }

    #[inline]
    pub fn is_placeholder(&self, dim: usize) -> bool {
        dim < SKILL_LEN && self.placeholders & (1u64 << dim) != 0
    }

    /// True when both vectors carry the same ratings.
    pub fn same_values(&self, other: &NormalizedSkill) -> bool {
        self.values == other.values
    }

    pub(crate) fn mark_placeholder(&mut self, dim: usize) {
        self.placeholders |= 1u64 << dim;
    }
}

/// Normalizes a tagged payload into a 34-entry vector.
pub fn normalize(payload: &SkillPayload) -> Result<NormalizedSkill, SkillError> {
    match payload {
        SkillPayload::Current(fields) => {
            let numbers = numeric_fields(fields, 0)?;
            to_skill(numbers, None)
        }
        SkillPayload::Legacy(fields) => {
            // Element 0 is the weight marker.
            let mut numbers = numeric_fields(fields.get(1..).unwrap_or(&[]), 1)?;
            if numbers.len() < LEGACY_PLACEHOLDER_INDEX {
                return Err(SkillError::WrongArity {
                    found: numbers.len(),
                });
            }
            numbers.insert(LEGACY_PLACEHOLDER_INDEX, LEGACY_PLACEHOLDER_VALUE);
            to_skill(numbers, Some(LEGACY_PLACEHOLDER_INDEX))
        }
    }
}

/// Converts fields to numbers. `offset` is the raw index of `fields[0]`,
/// used in error messages.
fn numeric_fields(fields: &[RawField], offset: usize) -> Result<Vec<f32>, SkillError> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            field
                .as_number()
                .map(|n| n as f32)
                .ok_or_else(|| SkillError::NonNumericField {
                    index: i + offset,
                    value: match field {
                        RawField::Text(s) => s.clone(),
                        RawField::Number(n) => n.to_string(),
                    },
                })
        })
        .collect()
}

fn to_skill(numbers: Vec<f32>, placeholder: Option<usize>) -> Result<NormalizedSkill, SkillError> {
    let values: [f32; SKILL_LEN] = numbers
        .try_into()
        .map_err(|v: Vec<f32>| SkillError::WrongArity { found: v.len() })?;
    let mut skill = NormalizedSkill::new(values);
    if let Some(dim) = placeholder {
        skill.mark_placeholder(dim);
    }
    Ok(skill)
}
