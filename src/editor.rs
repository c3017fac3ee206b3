use grid_util::grid::Grid;
use grid_util::point::Point;
use log::info;

use crate::error::SearchError;
use crate::grid::{CellGrid, CellKind};
use crate::maze::Maze;
use crate::search::{PathFinder, SearchOutcome};

/// Paintable cell kinds, mirroring the tool palette of the board UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Start,
    End,
    Blocked,
    Mud,
    Empty,
}

impl Tool {
    fn kind(self) -> CellKind {
        match self {
            Tool::Start => CellKind::Start,
            Tool::End => CellKind::End,
            Tool::Blocked => CellKind::Blocked,
            Tool::Mud => CellKind::Mud,
            Tool::Empty => CellKind::Empty,
        }
    }
}

/// Mutable board state behind the interactive editor: the painted grid, the
/// selected tool and the tracked start and end coordinates.
///
/// The start and end markers are unique by construction: painting a new one
/// erases the previous marker, and the cells currently holding them cannot be
/// painted over. That keeps the tracked coordinates consistent with the grid,
/// which [PathFinder::find_path] insists on.
#[derive(Clone, Debug)]
pub struct Editor {
    grid: CellGrid,
    tool: Tool,
    start: Point,
    end: Point,
}

impl Editor {
    /// Creates a board with the start marker in the top-left corner and the
    /// end marker in the bottom-right one.
    pub fn new(width: usize, height: usize) -> Editor {
        assert!(width >= 2 && height >= 2, "board too small for both markers");
        let mut grid = CellGrid::new(width, height, CellKind::Empty);
        let start = Point::new(0, 0);
        let end = Point::new(width as i32 - 1, height as i32 - 1);
        grid.set_kind(start, CellKind::Start);
        grid.set_kind(end, CellKind::End);
        Editor {
            grid,
            tool: Tool::Start,
            start,
            end,
        }
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn end(&self) -> Point {
        self.end
    }
    pub fn tool(&self) -> Tool {
        self.tool
    }
    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Applies the selected tool to `p`. Clicks outside the board or on the
    /// cells holding the start and end markers are rejected; painting a new
    /// start or end erases the previous marker first. Returns whether the
    /// board changed.
    pub fn paint(&mut self, p: Point) -> bool {
        if !self.grid.in_bounds(p) {
            return false;
        }
        let kind = self.grid.kind(p);
        if kind == CellKind::Start || kind == CellKind::End {
            return false;
        }
        match self.tool {
            Tool::Start => {
                self.grid.set_kind(self.start, CellKind::Empty);
                self.start = p;
            }
            Tool::End => {
                self.grid.set_kind(self.end, CellKind::Empty);
                self.end = p;
            }
            _ => {}
        }
        self.grid.set_kind(p, self.tool.kind());
        info!("painted {:?} at {}", self.tool, p);
        true
    }

    /// Runs the search engine against a snapshot of the current board.
    pub fn solve(&self) -> Result<SearchOutcome, SearchError> {
        PathFinder::new(&self.grid).find_path(self.start, self.end)
    }

    /// Stamps a solved path onto the board for display. Only empty cells are
    /// stamped; markers and mud keep their own glyphs.
    pub fn stamp_path(&mut self, path: &[Point]) {
        for &p in path {
            if self.grid.kind(p) == CellKind::Empty {
                self.grid.set_kind(p, CellKind::Path);
            }
        }
    }

    /// Removes every path stamp, leaving the painted board as it was.
    pub fn clear_path(&mut self) {
        for x in 0..self.grid.width() {
            for y in 0..self.grid.height() {
                if self.grid.get(x, y) == CellKind::Path {
                    self.grid.set(x, y, CellKind::Empty);
                }
            }
        }
    }

    /// Carves a generated maze into the board: lattice walls of the coarse
    /// maze become blocked cells on the fine grid, where coarse cell (x, y)
    /// sits at (2x + 1, 2y + 1). A w x h maze needs a board of at least
    /// (2w + 1) x (2h + 1) cells. The cells holding the start and end
    /// markers are left open so the board stays solvable.
    pub fn apply_maze(&mut self, maze: &Maze) {
        info!(
            "applying a {}x{} maze to the {}x{} board",
            maze.width(),
            maze.height(),
            self.grid.width(),
            self.grid.height()
        );
        for cy in 0..maze.height() {
            for cx in 0..maze.width() {
                let walls = maze.walls(cx, cy);
                let (fx, fy) = (2 * cx as i32 + 1, 2 * cy as i32 + 1);
                // Lattice corners are always walls.
                for corner in [
                    Point::new(fx - 1, fy - 1),
                    Point::new(fx + 1, fy - 1),
                    Point::new(fx - 1, fy + 1),
                    Point::new(fx + 1, fy + 1),
                ] {
                    self.block(corner);
                }
                if walls.top {
                    self.block(Point::new(fx, fy - 1));
                }
                if walls.left {
                    self.block(Point::new(fx - 1, fy));
                }
                if walls.bottom {
                    self.block(Point::new(fx, fy + 1));
                }
                if walls.right {
                    self.block(Point::new(fx + 1, fy));
                }
            }
        }
    }

    fn block(&mut self, p: Point) {
        if self.grid.in_bounds(p) && p != self.start && p != self.end {
            self.grid.set_kind(p, CellKind::Blocked);
        }
    }
}
