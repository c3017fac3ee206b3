use log::info;
use rand::Rng;
use smallvec::SmallVec;

/// Wall flags of one coarse maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallFlags {
    pub top: bool,
    pub left: bool,
    pub bottom: bool,
    pub right: bool,
}

impl Default for WallFlags {
    fn default() -> WallFlags {
        WallFlags {
            top: true,
            left: true,
            bottom: true,
            right: true,
        }
    }
}

/// A perfect maze on a coarse lattice. Each cell records which of its four
/// walls are still standing; [Editor::apply_maze](crate::Editor::apply_maze)
/// translates those into blocked cells on the fine board.
#[derive(Clone, Debug)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<WallFlags>,
}

impl Maze {
    /// Generates a maze with the recursive backtracker: a depth-first walk
    /// with an explicit stack that knocks down the wall between the current
    /// cell and a randomly chosen unvisited neighbour, backtracking when no
    /// unvisited neighbour is left. Every cell ends up connected to every
    /// other through exactly one corridor.
    ///
    /// The caller supplies the [Rng], so a seeded generator reproduces the
    /// same maze.
    pub fn generate<R: Rng>(width: usize, height: usize, rng: &mut R) -> Maze {
        assert!(width > 0 && height > 0, "maze dimensions must be positive");
        info!("generating a {}x{} maze", width, height);
        let mut maze = Maze {
            width,
            height,
            cells: vec![WallFlags::default(); width * height],
        };
        let mut visited = vec![false; width * height];
        let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
        visited[0] = true;
        while let Some(&(cx, cy)) = stack.last() {
            let mut candidates: SmallVec<[(usize, usize); 4]> = SmallVec::new();
            if cy > 0 && !visited[maze.ix(cx, cy - 1)] {
                candidates.push((cx, cy - 1));
            }
            if cx > 0 && !visited[maze.ix(cx - 1, cy)] {
                candidates.push((cx - 1, cy));
            }
            if cy + 1 < height && !visited[maze.ix(cx, cy + 1)] {
                candidates.push((cx, cy + 1));
            }
            if cx + 1 < width && !visited[maze.ix(cx + 1, cy)] {
                candidates.push((cx + 1, cy));
            }
            if candidates.is_empty() {
                stack.pop();
                continue;
            }
            let (nx, ny) = candidates[rng.gen_range(0..candidates.len())];
            maze.remove_wall((cx, cy), (nx, ny));
            visited[maze.ix(nx, ny)] = true;
            stack.push((nx, ny));
        }
        maze
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn walls(&self, x: usize, y: usize) -> WallFlags {
        self.cells[self.ix(x, y)]
    }

    fn ix(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Knocks down the wall between two cardinally adjacent cells, on both
    /// sides of the shared edge.
    fn remove_wall(&mut self, a: (usize, usize), b: (usize, usize)) {
        let a_ix = self.ix(a.0, a.1);
        let b_ix = self.ix(b.0, b.1);
        if b.0 == a.0 + 1 {
            self.cells[a_ix].right = false;
            self.cells[b_ix].left = false;
        } else if a.0 == b.0 + 1 {
            self.cells[a_ix].left = false;
            self.cells[b_ix].right = false;
        } else if b.1 == a.1 + 1 {
            self.cells[a_ix].bottom = false;
            self.cells[b_ix].top = false;
        } else {
            self.cells[a_ix].top = false;
            self.cells[b_ix].bottom = false;
        }
    }
}
