//! Team grid construction.
//!
//! Every roster member lands in at most one slot:
//!   positioned players go to their zone slot, or the zone's fallback slot
//!   when a different player already holds it, or are dropped
//!   unpositioned players fill bench slots in roster order (bench enabled)
//! Players without ratings carry the team average.

use thiserror::Error;
use tracing::{debug, warn};

use super::impute::team_average;
use super::layout::{FallbackTable, GridLayout, DEFAULT_BENCH_SLOTS, STARTING_SLOTS};
use crate::pitch::{ZoneError, ZoneId, ZoneTable};
use crate::record::PlayerRecord;
use crate::skill::{normalize, NormalizedSkill, SkillError, SKILL_LEN};

/// Errors that abort a single team build.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("player '{player}': {source}")]
    Zone {
        player: String,
        #[source]
        source: ZoneError,
    },

    #[error("player '{player}': {source}")]
    Skill {
        player: String,
        #[source]
        source: SkillError,
    },
}

/// Observable events from a build. None of these abort the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// A player took the fallback slot of a crowded zone.
    Relocated {
        player: String,
        zone: ZoneId,
        slot: usize,
    },
    /// A player could not be placed, even through the fallback slot.
    SlotCollisionDropped {
        player: String,
        zone: ZoneId,
        fallback: Option<usize>,
    },
    /// An unpositioned player found every bench slot taken.
    BenchFull { player: String },
    /// A player without ratings was given the team average.
    Imputed { player: String },
}

impl GridEvent {
    /// True for events where a player is missing from the grid.
    pub fn is_drop(&self) -> bool {
        matches!(
            self,
            GridEvent::SlotCollisionDropped { .. } | GridEvent::BenchFull { .. }
        )
    }
}

/// Fixed-length sequence of skill vectors for one team. Empty slots are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamGrid {
    slots: Vec<[f32; SKILL_LEN]>,
}

impl TeamGrid {
    fn from_slots(slots: Vec<Option<Occupant<'_>>>) -> Self {
        TeamGrid {
            slots: slots
                .into_iter()
                .map(|s| s.map_or([0.0; SKILL_LEN], |o| o.skill.into_values()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<&[f32; SKILL_LEN]> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[[f32; SKILL_LEN]] {
        &self.slots
    }

    pub fn is_slot_empty(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .map_or(true, |s| s.iter().all(|&v| v == 0.0))
    }

    /// Number of slots holding a vector.
    pub fn occupied(&self) -> usize {
        (0..self.len()).filter(|&i| !self.is_slot_empty(i)).count()
    }
}

/// Result of one team build: the grid and whatever happened on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct GridBuild {
    pub grid: TeamGrid,
    pub events: Vec<GridEvent>,
}

impl GridBuild {
    /// Number of roster members missing from the grid.
    pub fn dropped(&self) -> usize {
        self.events.iter().filter(|e| e.is_drop()).count()
    }
}

/// Builds team grids from rosters. Holds only immutable tables, so one
/// builder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct TeamGridBuilder {
    zones: ZoneTable,
    fallback: FallbackTable,
    bench_slots: usize,
}

impl TeamGridBuilder {
    pub fn new(zones: ZoneTable, fallback: FallbackTable, bench_slots: usize) -> Self {
        TeamGridBuilder {
            zones,
            fallback,
            bench_slots,
        }
    }

    /// Builder with the default zone geometry, fallbacks, and bench size.
    pub fn standard() -> Self {
        TeamGridBuilder::new(
            ZoneTable::default(),
            FallbackTable::default(),
            DEFAULT_BENCH_SLOTS,
        )
    }

    pub fn layout(&self, include_bench: bool) -> GridLayout {
        GridLayout::new(include_bench, self.bench_slots)
    }

    /// Places every roster member into a fixed-length grid.
    ///
    /// Fails only on an unclassifiable position or a malformed skill
    /// payload; collisions and bench overflow are reported as events.
    pub fn build(
        &self,
        roster: &[PlayerRecord],
        include_bench: bool,
    ) -> Result<GridBuild, GridError> {
        let layout = self.layout(include_bench);
        let skills = roster
            .iter()
            .map(|p| match &p.skill {
                Some(payload) => normalize(payload).map(Some).map_err(|source| GridError::Skill {
                    player: p.name.clone(),
                    source,
                }),
                None => Ok(None),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let average = if skills.iter().any(Option::is_none) {
            Some(team_average(&skills))
        } else {
            None
        };

        let mut slots: Vec<Option<Occupant<'_>>> = vec![None; layout.len()];
        let mut events = Vec::new();
        let mut bench = layout.bench_range();

        for (player, skill) in roster.iter().zip(skills) {
            if player.position.is_none() && !include_bench {
                continue;
            }

            let skill = match (skill, &average) {
                (Some(s), _) => s,
                (None, Some(avg)) => {
                    events.push(GridEvent::Imputed {
                        player: player.name.clone(),
                    });
                    avg.clone()
                }
                (None, None) => NormalizedSkill::zeros(),
            };

            match player.position {
                Some(position) => {
                    let zone = self
                        .zones
                        .classify(position)
                        .map_err(|source| GridError::Zone {
                            player: player.name.clone(),
                            source,
                        })?;
                    self.place(&mut slots, &mut events, player, zone, skill);
                }
                None => match bench.next() {
                    Some(slot) => slots[slot] = Some(Occupant { player, skill }),
                    None => {
                        warn!(player = %player.name, "bench full, player left out of grid");
                        events.push(GridEvent::BenchFull {
                            player: player.name.clone(),
                        });
                    }
                },
            }
        }

        Ok(GridBuild {
            grid: TeamGrid::from_slots(slots),
            events,
        })
    }

    /// Puts a positioned player into its zone slot or the zone's fallback.
    fn place<'a>(
        &self,
        slots: &mut [Option<Occupant<'a>>],
        events: &mut Vec<GridEvent>,
        player: &'a PlayerRecord,
        zone: ZoneId,
        skill: NormalizedSkill,
    ) {
        if try_place(slots, zone.index(), player, &skill) {
            return;
        }

        let fallback = self.fallback.get(zone).filter(|&s| s < STARTING_SLOTS);
        if let Some(slot) = fallback {
            if try_place(slots, slot, player, &skill) {
                debug!(player = %player.name, %zone, slot, "zone taken, using fallback slot");
                events.push(GridEvent::Relocated {
                    player: player.name.clone(),
                    zone,
                    slot,
                });
                return;
            }
        }

        warn!(
            player = %player.name,
            %zone,
            ?fallback,
            "zone and fallback taken, player left out of grid"
        );
        events.push(GridEvent::SlotCollisionDropped {
            player: player.name.clone(),
            zone,
            fallback,
        });
    }
}

/// A filled slot and the roster entry that filled it.
#[derive(Clone)]
struct Occupant<'a> {
    player: &'a PlayerRecord,
    skill: NormalizedSkill,
}

impl Occupant<'_> {
    /// Same roster entry listed twice: name, number and ratings all match.
    /// Teammates sharing an imputed vector are still different players.
    fn is_duplicate_of(&self, player: &PlayerRecord, skill: &NormalizedSkill) -> bool {
        self.player.name == player.name
            && self.player.number == player.number
            && self.skill.same_values(skill)
    }
}

/// Fills an empty slot. A slot already holding the same player counts as
/// placed; any other occupant, or a slot past the grid, is a miss.
fn try_place<'a>(
    slots: &mut [Option<Occupant<'a>>],
    slot: usize,
    player: &'a PlayerRecord,
    skill: &NormalizedSkill,
) -> bool {
    match slots.get_mut(slot) {
        None => false,
        Some(Some(existing)) => existing.is_duplicate_of(player, skill),
        Some(entry) => {
            *entry = Some(Occupant {
                player,
                skill: skill.clone(),
            });
            true
        }
    }
}
