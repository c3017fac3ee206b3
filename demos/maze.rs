use pathboard::{Editor, Maze};
use rand::prelude::*;

// Generates a 10x7 maze, carves it into a 21x15 board and solves it from the
// top-left to the bottom-right corner. Pass a number as the first argument
// to seed the generator.

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let maze = Maze::generate(10, 7, &mut rng);
    let mut editor = Editor::new(21, 15);
    editor.apply_maze(&maze);
    let outcome = editor.solve().expect("markers are consistent");
    editor.stamp_path(&outcome.path);
    println!("{}", editor.grid());
    println!("path of {} cells", outcome.path.len());
}
