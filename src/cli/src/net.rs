//! Prints a state as an unfolded net: TOP above FRONT, LEFT FRONT RIGHT BACK
//! side by side, BOTTOM below.

use cube3::{
    Color, CubeState, Face,
    geometry::{SIZE, row_points},
};
use itertools::Itertools;
use owo_colors::OwoColorize;

const STICKER: &str = "■";

fn sticker(color: Color) -> String {
    match color {
        Color::Red => STICKER.red().to_string(),
        Color::Green => STICKER.green().to_string(),
        Color::Blue => STICKER.blue().to_string(),
        Color::White => STICKER.white().to_string(),
        Color::Yellow => STICKER.yellow().to_string(),
        Color::Orange => STICKER.truecolor(255, 140, 0).to_string(),
    }
}

fn face_row(state: &CubeState, face: Face, row: usize) -> String {
    row_points(row)
        .map(|point| sticker(state.face(face)[point.row][point.col]))
        .join(" ")
}

pub fn render(state: &CubeState) -> String {
    let indent = " ".repeat(2 * SIZE);
    let mut lines = Vec::with_capacity(3 * SIZE);
    for row in 0..SIZE {
        lines.push(format!("{indent}{}", face_row(state, Face::Top, row)));
    }
    for row in 0..SIZE {
        lines.push(
            [Face::Left, Face::Front, Face::Right, Face::Back]
                .into_iter()
                .map(|face| face_row(state, face, row))
                .join(" "),
        );
    }
    for row in 0..SIZE {
        lines.push(format!("{indent}{}", face_row(state, Face::Bottom, row)));
    }
    lines.join("\n")
}
