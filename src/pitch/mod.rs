//! Pitch geometry.
//!
//! Maps formation-diagram coordinates onto the 19 tactical zones that
//! index the starting part of a team grid.

pub mod position;
pub mod zone;

pub use position::Position;
pub use zone::{classify, ZoneError, ZoneId, ZoneRect, ZoneTable, DEFAULT_ZONES, ZONE_COUNT};
