use grid_util::point::Point;
use thiserror::Error;

use crate::grid::CellKind;

/// Precondition violations reported before a search runs. The search loop
/// itself has no failure modes: an unreachable end is a normal outcome,
/// signalled by an empty path.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("coordinate {0} lies outside the grid")]
    OutOfBounds(Point),
    #[error("start coordinate {0} holds a {1:?} cell, not the start marker")]
    StartMismatch(Point, CellKind),
}
