//! Tactical zones and the geometry table that maps coordinates onto them.
//!
//! The pitch half is carved into 19 rectangles in whole-percent
//! (top, left) space. Bounds are inclusive on both ends and follow the
//! coordinates formation diagrams actually emit, so the narrow bands
//! (e.g. `33..=34`) are deliberate: moving a boundary changes whether a
//! player counts as a defender or a midfielder.
//!
//! Zone layout (top = depth, left = lateral):
//!   0       goalkeeper
//!   1..=5   back line, right to left
//!   6..=10  defensive midfield band, right to left
//!   11..=15 offensive midfield band, right to left
//!   16..=18 forwards, right to left

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::position::Position;

/// Number of tactical zones.
pub const ZONE_COUNT: usize = 19;

/// Short names for each zone, indexed by zone id.
const ZONE_NAMES: [&str; ZONE_COUNT] = [
    "GK", "RB", "RCB", "CB", "LCB", "LB", "RWB", "RDM", "CDM", "LDM", "LWB", "RM", "RAM", "CAM",
    "LAM", "LM", "RS", "ST", "LS",
];

/// Errors raised by zone lookup and zone-table validation.
#[derive(Debug, Error, PartialEq)]
pub enum ZoneError {
    #[error("position top: {top}, left: {left} has no matching zone")]
    NoZoneMatch { top: f64, left: f64 },

    #[error("zone id {0} is out of range (expected 0..19)")]
    ZoneOutOfRange(u8),

    #[error("zone {0} has an empty range (min > max)")]
    EmptyRange(ZoneId),

    #[error("zone table has no rectangle for zone {0}")]
    MissingZone(ZoneId),
}

/// Identifier of one of the 19 tactical zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ZoneId(u8);

impl ZoneId {
    pub const GOALKEEPER: ZoneId = ZoneId(0);

    /// Returns the zone with the given id, or `None` if out of range.
    pub const fn new(id: u8) -> Option<ZoneId> {
        if (id as usize) < ZONE_COUNT {
            Some(ZoneId(id))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn name(self) -> &'static str {
        ZONE_NAMES.get(self.index()).copied().unwrap_or("??")
    }
}

impl TryFrom<u8> for ZoneId {
    type Error = ZoneError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        ZoneId::new(id).ok_or(ZoneError::ZoneOutOfRange(id))
    }
}

impl From<ZoneId> for u8 {
    fn from(zone: ZoneId) -> u8 {
        zone.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.name())
    }
}

/// One inclusive rectangle of the zone table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRect {
    pub zone: ZoneId,
    /// Inclusive `[min, max]` depth range.
    pub top: [i32; 2],
    /// Inclusive `[min, max]` lateral range.
    pub left: [i32; 2],
}

impl ZoneRect {
    const fn new(zone: u8, top: [i32; 2], left: [i32; 2]) -> Self {
        ZoneRect {
            zone: ZoneId(zone),
            top,
            left,
        }
    }

    #[inline]
    fn contains(&self, top: i32, left: i32) -> bool {
        self.top[0] <= top && top <= self.top[1] && self.left[0] <= left && left <= self.left[1]
    }
}

const GK: [i32; 2] = [5, 5];
const BACK: [i32; 2] = [15, 15];
const DEF_MID: [i32; 2] = [20, 30];
const OFF_MID: [i32; 2] = [31, 40];
const FORWARD: [i32; 2] = [41, 50];

const WIDE_RIGHT: [i32; 2] = [17, 17];
const HALF_RIGHT: [i32; 2] = [33, 34];
const CENTRE: [i32; 2] = [50, 50];
const HALF_LEFT: [i32; 2] = [66, 67];
const WIDE_LEFT: [i32; 2] = [83, 83];

/// Default zone geometry, in match order.
pub const DEFAULT_ZONES: [ZoneRect; ZONE_COUNT] = [
    ZoneRect::new(0, GK, CENTRE),
    ZoneRect::new(1, BACK, WIDE_RIGHT),
    ZoneRect::new(2, BACK, HALF_RIGHT),
    ZoneRect::new(3, BACK, CENTRE),
    ZoneRect::new(4, BACK, HALF_LEFT),
    ZoneRect::new(5, BACK, WIDE_LEFT),
    ZoneRect::new(6, DEF_MID, WIDE_RIGHT),
    ZoneRect::new(7, DEF_MID, HALF_RIGHT),
    ZoneRect::new(8, DEF_MID, [40, 60]),
    ZoneRect::new(9, DEF_MID, HALF_LEFT),
    ZoneRect::new(10, DEF_MID, WIDE_LEFT),
    ZoneRect::new(11, OFF_MID, WIDE_RIGHT),
    ZoneRect::new(12, OFF_MID, HALF_RIGHT),
    ZoneRect::new(13, OFF_MID, CENTRE),
    ZoneRect::new(14, OFF_MID, HALF_LEFT),
    ZoneRect::new(15, OFF_MID, WIDE_LEFT),
    ZoneRect::new(16, FORWARD, [25, 25]),
    ZoneRect::new(17, FORWARD, CENTRE),
    ZoneRect::new(18, FORWARD, [75, 75]),
];

/// Ordered zone geometry. Lookup is first-match-wins.
///
/// Every table is validated on construction, including when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ZoneRect>", into = "Vec<ZoneRect>")]
pub struct ZoneTable {
    rects: Vec<ZoneRect>,
}

impl Default for ZoneTable {
    fn default() -> Self {
        ZoneTable {
            rects: DEFAULT_ZONES.to_vec(),
        }
    }
}

impl ZoneTable {
    /// Builds a table from custom rectangles. The table is validated.
    pub fn new(rects: Vec<ZoneRect>) -> Result<Self, ZoneError> {
        let table = ZoneTable { rects };
        table.validate()?;
        Ok(table)
    }

    /// Checks that every zone id is in range, every range is non-empty, and
    /// every zone has at least one rectangle.
    pub fn validate(&self) -> Result<(), ZoneError> {
        let mut seen = [false; ZONE_COUNT];
        for rect in &self.rects {
            if rect.zone.index() >= ZONE_COUNT {
                return Err(ZoneError::ZoneOutOfRange(rect.zone.0));
            }
            if rect.top[0] > rect.top[1] || rect.left[0] > rect.left[1] {
                return Err(ZoneError::EmptyRange(rect.zone));
            }
            seen[rect.zone.index()] = true;
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(ZoneError::MissingZone(ZoneId(missing as u8)));
        }
        Ok(())
    }

    /// Maps a position to its tactical zone.
    ///
    /// Coordinates are rounded to whole percent before matching.
    pub fn classify(&self, position: Position) -> Result<ZoneId, ZoneError> {
        lookup(&self.rects, position)
    }
}

impl TryFrom<Vec<ZoneRect>> for ZoneTable {
    type Error = ZoneError;

    fn try_from(rects: Vec<ZoneRect>) -> Result<Self, Self::Error> {
        ZoneTable::new(rects)
    }
}

impl From<ZoneTable> for Vec<ZoneRect> {
    fn from(table: ZoneTable) -> Self {
        table.rects
    }
}

/// Classifies a position against the default zone table.
pub fn classify(position: Position) -> Result<ZoneId, ZoneError> {
    lookup(&DEFAULT_ZONES, position)
}

fn lookup(rects: &[ZoneRect], position: Position) -> Result<ZoneId, ZoneError> {
    let (top, left) = position.rounded();
    rects
        .iter()
        .find(|r| r.contains(top, left))
        .map(|r| r.zone)
        .ok_or(ZoneError::NoZoneMatch {
            top: position.top,
            left: position.left,
        })
}
