//! Slot layout of a team grid and the collision fallback table.
//!
//! Slot layout:
//!   0..19   one slot per tactical zone (slot index == zone id)
//!   19      reserve goalkeeper slot
//!   20..    bench slots, filled in roster order (only with bench enabled)

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pitch::{ZoneId, ZONE_COUNT};

/// Slots reserved for starters: 19 zones plus the reserve keeper slot.
pub const STARTING_SLOTS: usize = ZONE_COUNT + 1;

/// Slot that takes a second goalkeeper drawn on the diagram.
pub const RESERVE_KEEPER_SLOT: usize = ZONE_COUNT;

/// Bench capacity used unless configured otherwise.
pub const DEFAULT_BENCH_SLOTS: usize = 20;

/// Fixed grid dimensions for one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub include_bench: bool,
    pub bench_slots: usize,
}

impl GridLayout {
    pub const fn new(include_bench: bool, bench_slots: usize) -> Self {
        GridLayout {
            include_bench,
            bench_slots,
        }
    }

    /// Total number of slots in a grid with this layout.
    pub const fn len(&self) -> usize {
        if self.include_bench {
            STARTING_SLOTS + self.bench_slots
        } else {
            STARTING_SLOTS
        }
    }

    /// Range of bench slot indices (empty when the bench is excluded).
    pub fn bench_range(&self) -> std::ops::Range<usize> {
        STARTING_SLOTS..self.len()
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout::new(true, DEFAULT_BENCH_SLOTS)
    }
}

/// Errors from fallback-table validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FallbackError {
    #[error("fallback for zone {from} points at slot {to}, outside the 20 starting slots")]
    TargetOutOfRange { from: ZoneId, to: usize },

    #[error("zone {0} falls back onto itself")]
    SelfReference(ZoneId),

    #[error("zone {0} has more than one fallback entry")]
    Duplicate(ZoneId),

    #[error("zone id {0} is out of range")]
    ZoneOutOfRange(usize),
}

/// One collision redirect: a crowded zone and the slot that takes the overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackEntry {
    pub from: ZoneId,
    pub to: usize,
}

/// Redirects used when a zone slot is already taken by a different player.
///
/// Covers the formations that put two players into one zone, e.g. a back
/// three whose centre backs both land on the half-right band.
///
/// Validated on construction, including when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FallbackEntry>", into = "Vec<FallbackEntry>")]
pub struct FallbackTable {
    entries: Vec<FallbackEntry>,
}

/// Default `(zone, fallback slot)` pairs.
const DEFAULT_FALLBACK: [(u8, usize); 10] = [
    (0, RESERVE_KEEPER_SLOT),
    (2, 7),
    (3, 8),
    (4, 9),
    (7, 12),
    (8, 13),
    (9, 14),
    (12, 16),
    (13, 17),
    (14, 18),
];

impl Default for FallbackTable {
    fn default() -> Self {
        let entries = DEFAULT_FALLBACK
            .iter()
            .filter_map(|&(from, to)| ZoneId::new(from).map(|from| FallbackEntry { from, to }))
            .collect();
        FallbackTable { entries }
    }
}

impl FallbackTable {
    pub fn new(entries: Vec<FallbackEntry>) -> Result<Self, FallbackError> {
        let table = FallbackTable { entries };
        table.validate()?;
        Ok(table)
    }

    /// A table with no redirects: every collision drops the later player.
    pub fn empty() -> Self {
        FallbackTable {
            entries: Vec::new(),
        }
    }

    /// Fallback slot for a zone, if the zone has one.
    pub fn get(&self, zone: ZoneId) -> Option<usize> {
        self.entries.iter().find(|e| e.from == zone).map(|e| e.to)
    }

    pub fn validate(&self) -> Result<(), FallbackError> {
        let mut seen = [false; ZONE_COUNT];
        for e in &self.entries {
            let from = e.from.index();
            if from >= ZONE_COUNT {
                return Err(FallbackError::ZoneOutOfRange(from));
            }
            if e.to >= STARTING_SLOTS {
                return Err(FallbackError::TargetOutOfRange {
                    from: e.from,
                    to: e.to,
                });
            }
            if e.to == from {
                return Err(FallbackError::SelfReference(e.from));
            }
            if seen[from] {
                return Err(FallbackError::Duplicate(e.from));
            }
            seen[from] = true;
        }
        Ok(())
    }
}

impl TryFrom<Vec<FallbackEntry>> for FallbackTable {
    type Error = FallbackError;

    fn try_from(entries: Vec<FallbackEntry>) -> Result<Self, Self::Error> {
        FallbackTable::new(entries)
    }
}

impl From<FallbackTable> for Vec<FallbackEntry> {
    fn from(table: FallbackTable) -> Self {
        table.entries
    }
}
