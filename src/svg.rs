use crate::patrol::{Lab, Patch};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Path, Rectangle, Text};

const CELL: f64 = 20.0;

fn center((row, col): (usize, usize)) -> (f64, f64) {
    (col as f64 * CELL + CELL / 2.0, row as f64 * CELL + CELL / 2.0)
}

fn cell_rect((row, col): (usize, usize), fill: &str) -> Rectangle {
    Rectangle::new()
        .set("x", col as f64 * CELL)
        .set("y", row as f64 * CELL)
        .set("width", CELL)
        .set("height", CELL)
        .set("fill", fill)
}

/// Draws the lab: obstacles in grey, the unmodified walk as a blue polyline,
/// the start as a circle with its facing glyph, and every cell in `loops`
/// (typically `Lab::loop_positions`) in red.
pub fn render_patrol(lab: &Lab, loops: &[(usize, usize)]) -> String {
    let width = lab.cols() as f64 * CELL;
    let height = lab.rows() as f64 * CELL;

    let mut document = Document::new()
        .set("width", width + 20.0)
        .set("height", height + 20.0)
        .set("viewBox", (-10.0, -10.0, width + 20.0, height + 20.0))
        .add(
            Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", "white")
                .set("stroke", "black"),
        );

    for row in 0..lab.rows() {
        for col in 0..lab.cols() {
            if lab.is_blocked(Patch::NONE, row, col) {
                document = document.add(cell_rect((row, col), "#808080"));
            }
        }
    }

    for &cell in loops {
        let rect = cell_rect(cell, "#ff8080").set("title", format!("O at {:?}", cell));
        document = document.add(rect);
    }

    // Consecutive states may share a cell (turns); the line just stays put.
    let mut states = lab.walk(Patch::NONE);
    let mut seen = rustc_hash::FxHashSet::default();
    if let Some(first) = states.next() {
        seen.insert(first);
        let mut data = Data::new().move_to(center(first.cell()));
        for state in states {
            if !seen.insert(state) {
                break;
            }
            data = data.line_to(center(state.cell()));
        }
        document = document.add(
            Path::new()
                .set("fill", "none")
                .set("stroke", "#4060ff")
                .set("stroke-width", 3)
                .set("d", data),
        );
    }

    let start = lab.start();
    let (cx, cy) = center(start.cell());
    document = document
        .add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", CELL * 0.4)
                .set("fill", "#ffff80")
                .set("stroke", "black"),
        )
        .add(
            Text::new(start.dir.glyph().to_string())
                .set("x", cx)
                .set("y", cy + 5.0)
                .set("text-anchor", "middle")
                .set("font-size", "14px"),
        );

    document.to_string()
}
