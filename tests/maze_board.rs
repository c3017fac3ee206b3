//! Generates mazes, carves them into boards and checks the boards stay
//! solvable: a perfect maze connects every corridor cell, so the search must
//! find a path between the corner markers.

use grid_util::point::Point;
use pathboard::{CellKind, Editor, Maze};
use rand::prelude::*;

#[test]
fn maze_boards_are_solvable() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..50 {
        let maze = Maze::generate(8, 6, &mut rng);
        let mut editor = Editor::new(17, 13);
        editor.apply_maze(&maze);
        let outcome = editor.solve().unwrap();
        assert!(!outcome.path.is_empty());
        assert_eq!(outcome.path[0], editor.start());
        assert_eq!(*outcome.path.last().unwrap(), editor.end());
        for p in &outcome.path {
            assert_ne!(editor.grid().kind(*p), CellKind::Blocked);
        }
    }
}

#[test]
fn maze_walls_land_on_the_lattice() {
    let mut rng = StdRng::seed_from_u64(5);
    let maze = Maze::generate(4, 4, &mut rng);
    let mut editor = Editor::new(9, 9);
    editor.apply_maze(&maze);
    // Corridor centres are never blocked, lattice corners always are.
    for cy in 0..4 {
        for cx in 0..4 {
            let centre = Point::new(2 * cx + 1, 2 * cy + 1);
            assert_ne!(editor.grid().kind(centre), CellKind::Blocked);
        }
    }
    let corner = Point::new(2, 2);
    assert_eq!(editor.grid().kind(corner), CellKind::Blocked);
}
