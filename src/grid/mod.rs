//! Team grids.
//!
//! A team grid is a fixed-length sequence of skill vectors indexed by
//! tactical zone, followed by optional bench slots. Every team built with
//! the same layout has the same length, whatever its roster.

pub mod builder;
pub mod impute;
pub mod layout;

pub use builder::{GridBuild, GridError, GridEvent, TeamGrid, TeamGridBuilder};
pub use impute::team_average;
pub use layout::{
    FallbackEntry, FallbackError, FallbackTable, GridLayout, DEFAULT_BENCH_SLOTS,
    RESERVE_KEEPER_SLOT, STARTING_SLOTS,
};
