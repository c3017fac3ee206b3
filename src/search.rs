use std::cmp::Ordering;
use std::collections::BinaryHeap;

use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use itertools::Itertools;
use log::{info, warn};
use smallvec::SmallVec;

use crate::error::SearchError;
use crate::grid::{CellGrid, CellKind};
use crate::{cost_to_unit_float, CARDINAL_COST, DIAGONAL_COST, MUD_COST, UNREACHED};

/// Relative offsets of the 8-neighborhood paired with the step cost, cardinal
/// moves first.
const NEIGHBOR_OFFSETS: [(i32, i32, i32); 8] = [
    (-1, 0, CARDINAL_COST),
    (0, -1, CARDINAL_COST),
    (0, 1, CARDINAL_COST),
    (1, 0, CARDINAL_COST),
    (-1, -1, DIAGONAL_COST),
    (-1, 1, DIAGONAL_COST),
    (1, -1, DIAGONAL_COST),
    (1, 1, DIAGONAL_COST),
];

/// Per-cell search bookkeeping. The whole grid of these is rebuilt from
/// scratch on every [PathFinder::find_path] call and handed back to the
/// caller afterwards as a diagnostic snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchCell {
    /// Accumulated cost of the best known path from the start, [UNREACHED]
    /// until the cell is discovered.
    pub cost_to_here: i32,
    /// Euclidean lower bound on the remaining cost to the goal, computed once
    /// per search call.
    pub estimate_to_goal: i32,
    /// `cost_to_here + estimate_to_goal` once discovered, [UNREACHED] before.
    pub priority: i32,
    /// True once the cell has been expanded (or seeded, for the start cell).
    pub visited: bool,
    /// Predecessor on the best known path, set at first discovery.
    pub parent: Option<Point>,
}

impl Default for SearchCell {
    fn default() -> SearchCell {
        SearchCell {
            cost_to_here: UNREACHED,
            estimate_to_goal: 0,
            priority: UNREACHED,
            visited: false,
            parent: None,
        }
    }
}

impl SearchCell {
    /// `cost_to_here` in unit costs, infinite while unreached.
    pub fn cost_to_here_float(&self) -> f64 {
        if self.cost_to_here == UNREACHED {
            f64::INFINITY
        } else {
            cost_to_unit_float(self.cost_to_here)
        }
    }
    pub fn estimate_to_goal_float(&self) -> f64 {
        cost_to_unit_float(self.estimate_to_goal)
    }
    pub fn priority_float(&self) -> f64 {
        if self.priority == UNREACHED {
            f64::INFINITY
        } else {
            cost_to_unit_float(self.priority)
        }
    }
}

/// The full per-cell search state of one [PathFinder::find_path] call.
pub type SearchGrid = SimpleGrid<SearchCell>;

/// Frontier entry ordering candidates by ascending priority. Ties are broken
/// by insertion order so repeated searches expand cells identically.
struct FrontierEntry {
    priority: i32,
    order: usize,
    coord: Point,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.order == other.order
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so the comparison is flipped: the entry
        // with the smallest priority (earliest-inserted on ties) is on top.
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.order.cmp(&self.order),
            s => s,
        }
    }
}

/// Result of one search call: the path in start-to-end order (empty when the
/// end is unreachable) and the complete search-state grid.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub path: Vec<Point>,
    pub diagnostics: SearchGrid,
}

/// Weighted best-first search over a [CellGrid] snapshot.
///
/// The grid is cloned on construction, so edits made to the board afterwards
/// cannot touch a search. Cheaper rediscoveries of a frontier cell re-push a
/// duplicate heap entry instead of decreasing a key in place; a duplicate
/// popped after its cell was expanded only produces successors that the
/// `visited` check filters out.
#[derive(Clone, Debug)]
pub struct PathFinder {
    grid: CellGrid,
    state: SearchGrid,
}

impl PathFinder {
    pub fn new(grid: &CellGrid) -> PathFinder {
        let state = SimpleGrid::new(grid.width(), grid.height(), SearchCell::default());
        PathFinder {
            grid: grid.clone(),
            state,
        }
    }

    /// The snapshot this finder searches over.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Searches for a cheapest path from `start` to `end` and returns it
    /// together with the per-cell search state.
    ///
    /// An empty path means no path exists; that is a normal outcome, not an
    /// error. Errors are reserved for precondition violations: coordinates
    /// outside the grid, or a start coordinate whose cell is not painted as
    /// the start marker. The end coordinate's kind is deliberately not
    /// validated, so a search whose end coincides with the start runs to
    /// exhaustion and reports an empty path.
    ///
    /// The search stops as soon as a cell of kind [CellKind::End] is
    /// discovered as a successor, without waiting for it to reach the top of
    /// the frontier. When several routes to the end exist this can pick one
    /// that is slightly costlier than the optimum still sitting in the
    /// frontier; the behavior is kept because the board UI relies on it.
    pub fn find_path(&mut self, start: Point, end: Point) -> Result<SearchOutcome, SearchError> {
        if !self.grid.in_bounds(start) {
            return Err(SearchError::OutOfBounds(start));
        }
        if !self.grid.in_bounds(end) {
            return Err(SearchError::OutOfBounds(end));
        }
        let start_kind = self.grid.kind(start);
        if start_kind != CellKind::Start {
            return Err(SearchError::StartMismatch(start, start_kind));
        }
        info!("searching for a path from {} to {}", start, end);
        self.reset(end);

        // The start is marked visited at seeding time rather than on first
        // pop, so it can never be re-admitted as a successor of a neighbor.
        let mut seed = self.state.get_point(start);
        seed.cost_to_here = 0;
        seed.priority = seed.estimate_to_goal;
        seed.visited = true;
        self.state.set_point(start, seed);

        let mut pushed: usize = 0;
        let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
        frontier.push(FrontierEntry {
            priority: seed.priority,
            order: pushed,
            coord: start,
        });

        while let Some(FrontierEntry { coord: current, .. }) = frontier.pop() {
            let mut current_cell = self.state.get_point(current);
            current_cell.visited = true;
            self.state.set_point(current, current_cell);

            for (successor, step_cost) in self.successors(current) {
                if self.grid.is_end(successor) {
                    let mut end_cell = self.state.get_point(successor);
                    end_cell.parent = Some(current);
                    self.state.set_point(successor, end_cell);
                    return Ok(SearchOutcome {
                        path: self.trace_path(end),
                        diagnostics: self.state.clone(),
                    });
                }
                let extra = if self.grid.kind(successor) == CellKind::Mud {
                    MUD_COST
                } else {
                    0
                };
                let tentative_cost = current_cell.cost_to_here + step_cost + extra;
                let mut succ_cell = self.state.get_point(successor);
                let tentative_priority = tentative_cost + succ_cell.estimate_to_goal;
                if tentative_priority < succ_cell.priority {
                    succ_cell.cost_to_here = tentative_cost;
                    succ_cell.priority = tentative_priority;
                    succ_cell.parent = Some(current);
                    self.state.set_point(successor, succ_cell);
                    pushed += 1;
                    frontier.push(FrontierEntry {
                        priority: tentative_priority,
                        order: pushed,
                        coord: successor,
                    });
                }
            }
        }
        warn!("frontier exhausted before reaching {}", end);
        Ok(SearchOutcome {
            path: Vec::new(),
            diagnostics: self.state.clone(),
        })
    }

    /// Resets every cell for a new search and recomputes the heuristic
    /// estimates against the new end coordinate.
    fn reset(&mut self, end: Point) {
        for x in 0..self.grid.width() {
            for y in 0..self.grid.height() {
                let p = Point::new(x as i32, y as i32);
                let cell = SearchCell {
                    estimate_to_goal: euclidean_cost(p, end),
                    ..SearchCell::default()
                };
                self.state.set_point(p, cell);
            }
        }
    }

    /// In-bounds successors of `p` that are neither blocked nor already
    /// expanded, paired with the cost of the step onto them.
    fn successors(&self, p: Point) -> SmallVec<[(Point, i32); 8]> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy, cost)| (Point::new(p.x + dx, p.y + dy), cost))
            .filter(|&(n, _)| self.grid.in_bounds(n))
            .filter(|&(n, _)| !self.grid.is_blocked(n) && !self.state.get_point(n).visited)
            .collect()
    }

    /// Walks parent links back from the end cell and returns the coordinates
    /// in start-to-end order. The walk terminates on the cell painted as the
    /// start marker.
    fn trace_path(&self, end: Point) -> Vec<Point> {
        let mut path: Vec<Point> = itertools::unfold(Some(end), |walker| {
            let p = (*walker)?;
            *walker = if self.grid.kind(p) == CellKind::Start {
                None
            } else {
                self.state.get_point(p).parent
            };
            Some(p)
        })
        .collect();
        path.reverse();
        path
    }
}

/// Total cost of a path under the engine's accounting: a step cost per move
/// plus the mud surcharge of every cell entered.
pub fn path_cost(grid: &CellGrid, path: &[Point]) -> i32 {
    let mut total = 0;
    for (a, b) in path.iter().tuple_windows() {
        let step = if a.x != b.x && a.y != b.y {
            DIAGONAL_COST
        } else {
            CARDINAL_COST
        };
        let extra = if grid.kind(*b) == CellKind::Mud {
            MUD_COST
        } else {
            0
        };
        total += step + extra;
    }
    total
}

/// Straight-line distance between two cells in integer cost units, truncated
/// so the estimate stays a lower bound.
fn euclidean_cost(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    ((dx * dx + dy * dy).sqrt() * CARDINAL_COST as f64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a grid of the given size with start and end markers painted.
    fn marked_grid(width: usize, height: usize, start: Point, end: Point) -> CellGrid {
        let mut grid = CellGrid::new(width, height, CellKind::Empty);
        grid.set_kind(start, CellKind::Start);
        grid.set_kind(end, CellKind::End);
        grid
    }

    /// Asserts that the optimal diagonal run is found on an open grid and
    /// that accumulated costs never decrease along the path.
    #[test]
    fn open_grid_runs_diagonally() {
        let start = Point::new(0, 0);
        let end = Point::new(4, 4);
        let grid = marked_grid(5, 5, start, end);
        let outcome = PathFinder::new(&grid).find_path(start, end).unwrap();
        assert_eq!(outcome.path.len(), 5);
        assert_eq!(outcome.path[0], start);
        assert_eq!(*outcome.path.last().unwrap(), end);
        assert_eq!(path_cost(&grid, &outcome.path), 4 * DIAGONAL_COST);

        // The end cell never gets a cost of its own (the search returns at
        // discovery), so monotonicity is checked up to the cell before it.
        let mut last_cost = 0;
        for p in &outcome.path[..outcome.path.len() - 1] {
            let cell = outcome.diagnostics.get_point(*p);
            assert!(cell.cost_to_here >= last_cost);
            last_cost = cell.cost_to_here;
        }
        assert_eq!(
            outcome.diagnostics.get_point(end).cost_to_here,
            UNREACHED
        );
        assert_eq!(outcome.diagnostics.get_point(end).parent, Some(Point::new(3, 3)));
    }

    #[test]
    fn path_cells_are_adjacent_and_distinct() {
        let start = Point::new(0, 2);
        let end = Point::new(6, 2);
        let mut grid = marked_grid(7, 5, start, end);
        grid.set_kind(Point::new(3, 1), CellKind::Blocked);
        grid.set_kind(Point::new(3, 2), CellKind::Blocked);
        grid.set_kind(Point::new(3, 3), CellKind::Blocked);
        let outcome = PathFinder::new(&grid).find_path(start, end).unwrap();
        assert!(!outcome.path.is_empty());
        assert_eq!(grid.kind(outcome.path[0]), CellKind::Start);
        assert_eq!(grid.kind(*outcome.path.last().unwrap()), CellKind::End);
        for w in outcome.path.windows(2) {
            let (a, b) = (w[0], w[1]);
            assert_ne!(a, b);
            assert!((a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1);
            assert!(!grid.is_blocked(b));
        }
    }

    #[test]
    fn enclosed_end_yields_empty_path() {
        let start = Point::new(0, 0);
        let end = Point::new(4, 4);
        let mut grid = marked_grid(6, 6, start, end);
        for (x, y) in [(3, 3), (3, 4), (3, 5), (4, 3), (5, 3)] {
            grid.set_kind(Point::new(x, y), CellKind::Blocked);
        }
        let outcome = PathFinder::new(&grid).find_path(start, end).unwrap();
        assert!(outcome.path.is_empty());
        // The search still explored the reachable side of the wall.
        assert!(outcome.diagnostics.get_point(Point::new(2, 2)).visited);
        assert!(!outcome.diagnostics.get_point(end).visited);
    }

    #[test]
    fn start_equal_to_end_yields_empty_path() {
        let start = Point::new(1, 1);
        let mut grid = CellGrid::new(4, 4, CellKind::Empty);
        grid.set_kind(start, CellKind::Start);
        let outcome = PathFinder::new(&grid).find_path(start, start).unwrap();
        assert!(outcome.path.is_empty());
    }

    /// A mud cell on the only corridor makes everything beyond it strictly
    /// more expensive to reach.
    #[test]
    fn mud_raises_corridor_cost() {
        let start = Point::new(0, 0);
        let end = Point::new(4, 0);
        let clean = marked_grid(5, 1, start, end);
        let mut muddy = clean.clone();
        muddy.set_kind(Point::new(2, 0), CellKind::Mud);

        let clean_outcome = PathFinder::new(&clean).find_path(start, end).unwrap();
        let muddy_outcome = PathFinder::new(&muddy).find_path(start, end).unwrap();
        assert_eq!(clean_outcome.path, muddy_outcome.path);

        let probe = Point::new(3, 0);
        let clean_cost = clean_outcome.diagnostics.get_point(probe).cost_to_here;
        let muddy_cost = muddy_outcome.diagnostics.get_point(probe).cost_to_here;
        assert_eq!(clean_cost, 3 * CARDINAL_COST);
        assert_eq!(muddy_cost, 3 * CARDINAL_COST + MUD_COST);
        assert_eq!(
            path_cost(&muddy, &muddy_outcome.path),
            path_cost(&clean, &clean_outcome.path) + MUD_COST
        );
    }

    /// The search routes around mud when a cheaper detour exists.
    #[test]
    fn mud_is_avoided_when_detour_is_cheaper() {
        let start = Point::new(0, 1);
        let end = Point::new(2, 1);
        let mut grid = marked_grid(3, 3, start, end);
        grid.set_kind(Point::new(1, 1), CellKind::Mud);
        let outcome = PathFinder::new(&grid).find_path(start, end).unwrap();
        assert_eq!(outcome.path.len(), 3);
        assert!(!outcome.path.contains(&Point::new(1, 1)));
        assert_eq!(path_cost(&grid, &outcome.path), 2 * DIAGONAL_COST);
    }

    #[test]
    fn repeated_searches_are_deterministic() {
        let start = Point::new(0, 0);
        let end = Point::new(7, 7);
        let mut grid = marked_grid(8, 8, start, end);
        for (x, y) in [(2, 0), (2, 1), (2, 2), (5, 7), (5, 6), (5, 5), (4, 4)] {
            grid.set_kind(Point::new(x, y), CellKind::Blocked);
        }
        grid.set_kind(Point::new(3, 3), CellKind::Mud);
        let mut finder = PathFinder::new(&grid);
        let first = finder.find_path(start, end).unwrap();
        let second = finder.find_path(start, end).unwrap();
        assert!(!first.path.is_empty());
        assert_eq!(first.path, second.path);
        assert_eq!(
            first.diagnostics.get_point(Point::new(3, 3)),
            second.diagnostics.get_point(Point::new(3, 3))
        );
    }

    #[test]
    fn corner_start_generates_no_out_of_bounds_successors() {
        for corner in [
            Point::new(0, 0),
            Point::new(5, 0),
            Point::new(0, 5),
            Point::new(5, 5),
        ] {
            let end = Point::new(2, 3);
            let mut grid = CellGrid::new(6, 6, CellKind::Empty);
            grid.set_kind(corner, CellKind::Start);
            grid.set_kind(end, CellKind::End);
            let outcome = PathFinder::new(&grid).find_path(corner, end).unwrap();
            assert!(!outcome.path.is_empty());
            for p in &outcome.path {
                assert!(grid.in_bounds(*p));
            }
        }
    }

    /// 15x15 board with a fully blocked border: the expected result is a
    /// straight diagonal run of 13 coordinates costing 12 x 1.4 = 16.8.
    #[test]
    fn bordered_board_diagonal_run() {
        let start = Point::new(1, 1);
        let end = Point::new(13, 13);
        let mut grid = marked_grid(15, 15, start, end);
        for i in 0..15 {
            grid.set_kind(Point::new(i, 0), CellKind::Blocked);
            grid.set_kind(Point::new(i, 14), CellKind::Blocked);
            grid.set_kind(Point::new(0, i), CellKind::Blocked);
            grid.set_kind(Point::new(14, i), CellKind::Blocked);
        }
        let outcome = PathFinder::new(&grid).find_path(start, end).unwrap();
        assert_eq!(outcome.path.len(), 13);
        let cost = path_cost(&grid, &outcome.path);
        assert_eq!(cost, 12 * DIAGONAL_COST);
        assert!((cost_to_unit_float(cost) - 16.8).abs() < 1e-9);
    }

    #[test]
    fn out_of_bounds_coordinates_are_rejected() {
        let start = Point::new(0, 0);
        let end = Point::new(3, 3);
        let grid = marked_grid(4, 4, start, end);
        let mut finder = PathFinder::new(&grid);
        assert_eq!(
            finder.find_path(Point::new(-1, 0), end).unwrap_err(),
            SearchError::OutOfBounds(Point::new(-1, 0))
        );
        assert_eq!(
            finder.find_path(start, Point::new(4, 0)).unwrap_err(),
            SearchError::OutOfBounds(Point::new(4, 0))
        );
    }

    #[test]
    fn start_marker_mismatch_is_rejected() {
        let start = Point::new(0, 0);
        let end = Point::new(3, 3);
        let grid = marked_grid(4, 4, start, end);
        let mut finder = PathFinder::new(&grid);
        let wrong = Point::new(1, 1);
        assert_eq!(
            finder.find_path(wrong, end).unwrap_err(),
            SearchError::StartMismatch(wrong, CellKind::Empty)
        );
    }

    #[test]
    fn edits_after_snapshot_do_not_affect_search() {
        let start = Point::new(0, 0);
        let end = Point::new(4, 0);
        let mut grid = marked_grid(5, 1, start, end);
        let mut finder = PathFinder::new(&grid);
        // Wall the corridor off on the caller's copy only.
        grid.set_kind(Point::new(2, 0), CellKind::Blocked);
        let outcome = finder.find_path(start, end).unwrap();
        assert_eq!(outcome.path.len(), 5);
    }
}
