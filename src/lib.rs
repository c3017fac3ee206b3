//! # pathboard
//!
//! A paintable grid sandbox with weighted pathfinding. Cells are painted as
//! start, end, wall or mud markers through the [Editor], or carved out of a
//! generated [Maze]. The [PathFinder] runs a best-first search over the
//! 8-neighborhood with mud cells costing extra to enter, and returns both the
//! path and the complete per-cell search state so a frontend can visualize
//! what the search did.
//!
//! Costs are integers in tenths of a unit so comparisons stay exact:
//! a straight step costs [CARDINAL_COST], a diagonal step [DIAGONAL_COST]
//! (the classic 1.4 approximation of sqrt(2)) and entering mud adds
//! [MUD_COST] on top. [cost_to_unit_float] converts back to unit costs.

pub mod editor;
pub mod error;
pub mod grid;
pub mod maze;
pub mod search;

pub use editor::{Editor, Tool};
pub use error::SearchError;
pub use grid::{CellGrid, CellKind};
pub use maze::{Maze, WallFlags};
pub use search::{path_cost, PathFinder, SearchCell, SearchGrid, SearchOutcome};

/// Cost of a cardinal (straight) step, in tenths of a unit.
pub const CARDINAL_COST: i32 = 10;
/// Cost of a diagonal step, in tenths of a unit.
pub const DIAGONAL_COST: i32 = 14;
/// Surcharge for stepping onto a mud cell.
pub const MUD_COST: i32 = 20;
/// Sentinel cost of a cell the search has not reached.
pub const UNREACHED: i32 = i32::MAX;

/// Converts an integer cost to an approximate floating point equivalent where
/// cardinal steps have cost 1.0.
pub fn cost_to_unit_float(cost: i32) -> f64 {
    (cost as f64) / (CARDINAL_COST as f64)
}
