use grid_util::grid::Grid;
use grid_util::point::Point;
use pathboard::{cost_to_unit_float, path_cost, Editor, Tool};

// A band of mud lies between the start and the end. Mud can be walked
// through at an extra cost, so the search weighs wading straight through
// against walking around. The per-cell costs of the search are printed for
// the cells on the path.

fn main() {
    let mut editor = Editor::new(8, 5);
    editor.select_tool(Tool::Mud);
    for y in 0..4 {
        editor.paint(Point::new(4, y));
    }
    let outcome = editor.solve().expect("markers are consistent");
    editor.stamp_path(&outcome.path);
    println!("{}", editor.grid());
    // The end cell keeps no cost of its own; the search stops on discovering it.
    for p in &outcome.path[..outcome.path.len() - 1] {
        let cell = outcome.diagnostics.get_point(*p);
        println!("{}: cost {:.1}", p, cell.cost_to_here_float());
    }
    let total = path_cost(editor.grid(), &outcome.path);
    println!("total cost: {:.1}", cost_to_unit_float(total));
}
