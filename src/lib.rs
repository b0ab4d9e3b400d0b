//! Lineup grid library.
//!
//! Turns scraped soccer lineups into fixed-shape skill matrices with a
//! three-way outcome label: positions are classified into tactical zones,
//! ratings are normalized across schema generations, each roster is laid
//! out on a fixed slot grid, and both grids of a match are stacked into
//! one training example.

pub mod compose;
pub mod config;
pub mod dataset;
pub mod grid;
pub mod pitch;
pub mod record;
pub mod skill;
