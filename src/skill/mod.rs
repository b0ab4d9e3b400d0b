//! Player skill vectors.
//!
//! Scraped ratings arrive in one of two schema generations. Normalization
//! turns either into the fixed 34-entry vector every grid slot holds.

pub mod normalize;
pub mod payload;

pub use normalize::{
    normalize, NormalizedSkill, SkillError, LEGACY_PLACEHOLDER_INDEX, LEGACY_PLACEHOLDER_VALUE,
    SKILL_LEN,
};
pub use payload::{RawField, SkillPayload};
