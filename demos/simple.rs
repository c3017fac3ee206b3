use grid_util::point::Point;
use pathboard::{Editor, Tool};

// In this demo a path is found on a 6x6 board with a wall across the middle:
//  ______
// |S..#..|
// |...#..|
// |...#..|
// |...#..|
// |......|
// |.....E|
//  ------
// The search goes around the wall through the open bottom row.

fn main() {
    let mut editor = Editor::new(6, 6);
    editor.select_tool(Tool::Blocked);
    for y in 0..4 {
        editor.paint(Point::new(3, y));
    }
    let outcome = editor.solve().expect("markers are consistent");
    editor.stamp_path(&outcome.path);
    println!("{}", editor.grid());
    println!("Path:");
    for p in &outcome.path {
        println!("{:?}", p);
    }
}
