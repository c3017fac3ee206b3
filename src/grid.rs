use core::fmt;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;

/// Classification of a single board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[default]
    Empty,
    Start,
    End,
    /// Marker the editor stamps onto cells of a solved path. Purely
    /// presentational: the search treats it like [CellKind::Empty].
    Path,
    Blocked,
    Mud,
}

impl CellKind {
    /// Character used by the [fmt::Display] rendering of a [CellGrid].
    pub fn glyph(&self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Start => 'S',
            CellKind::End => 'E',
            CellKind::Path => 'o',
            CellKind::Blocked => '#',
            CellKind::Mud => '~',
        }
    }
}

/// Fixed-size grid of [CellKind] values indexed by (col, row), with col as the
/// x coordinate. Implements [Grid] by building on [SimpleGrid].
///
/// A search takes its own clone of this grid, so a board being edited can
/// never corrupt an in-flight or completed search.
#[derive(Clone, Debug)]
pub struct CellGrid {
    pub cells: SimpleGrid<CellKind>,
}

impl CellGrid {
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width() && (p.y as usize) < self.height()
    }
    /// Kind of the cell at `p`. Callers check [CellGrid::in_bounds] first.
    pub fn kind(&self, p: Point) -> CellKind {
        self.cells.get(p.x as usize, p.y as usize)
    }
    pub fn set_kind(&mut self, p: Point, kind: CellKind) {
        self.cells.set(p.x as usize, p.y as usize, kind);
    }
    pub fn is_blocked(&self, p: Point) -> bool {
        self.kind(p) == CellKind::Blocked
    }
    pub fn is_end(&self, p: Point) -> bool {
        self.kind(p) == CellKind::End
    }
    /// First cell of the given kind in column-major order, if any.
    pub fn find_kind(&self, kind: CellKind) -> Option<Point> {
        for x in 0..self.width() {
            for y in 0..self.height() {
                if self.get(x, y) == kind {
                    return Some(Point::new(x as i32, y as i32));
                }
            }
        }
        None
    }
}

impl Grid<CellKind> for CellGrid {
    fn new(width: usize, height: usize, default_value: CellKind) -> Self {
        CellGrid {
            cells: SimpleGrid::new(width, height, default_value),
        }
    }
    fn get(&self, x: usize, y: usize) -> CellKind {
        self.cells.get(x, y)
    }
    fn set(&mut self, x: usize, y: usize, value: CellKind) {
        self.cells.set(x, y, value);
    }
    fn width(&self) -> usize {
        self.cells.width
    }
    fn height(&self) -> usize {
        self.cells.height
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                write!(f, "{}", self.get(x, y).glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
