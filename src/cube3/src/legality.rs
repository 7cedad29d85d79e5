//! Checks that a state can be reached from the solved cube by turning it.
//!
//! Pieces are identified against the current centers, so the check does not
//! care how the cube is held. A reachable state has nine stickers of every
//! color, centers arranged like the standard scheme, every edge and corner
//! piece exactly once, an even number of flipped edges, corner twists summing
//! to a multiple of three, and equal corner and edge permutation parity.

use std::sync::LazyLock;

use itertools::Itertools;
use thiserror::Error;

use crate::{
    geometry::{Face, Facelet},
    locator::{CORNER_POSITIONS, EDGE_POSITIONS},
    moves::Action,
    state::{Color, CubeState},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalStateError {
    #[error("Expected 9 {color} stickers but found {count}")]
    ColorCount { color: Color, count: usize },
    #[error("The centers are not arranged like the standard color scheme")]
    CenterScheme,
    #[error("The edge at {0} is not a real edge piece or appears twice")]
    InvalidEdge(Facelet),
    #[error("The corner at {0} is not a real corner piece or appears twice")]
    InvalidCorner(Facelet),
    #[error("A single edge is flipped")]
    EdgeFlip,
    #[error("A corner is twisted in place")]
    CornerTwist,
    #[error("Two pieces are swapped")]
    PermutationParity,
}

/// The center colors, indexed by [`Face`], of all 24 ways to hold the solved
/// cube.
static CENTER_ARRANGEMENTS: LazyLock<Vec<[Color; 6]>> = LazyLock::new(|| {
    let centers = |state: &CubeState| Face::ALL.map(|face| state.center(face));

    let mut seen = vec![CubeState::solved()];
    let mut frontier = seen.clone();
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for state in frontier {
            for action in [Action::TurnClockwise, Action::TiltForward] {
                let turned = state.apply(action);
                if !seen.contains(&turned) {
                    seen.push(turned);
                    next.push(turned);
                }
            }
        }
        frontier = next;
    }
    seen.iter().map(centers).collect()
});

/// Sorted so that a piece's key does not depend on how it is twisted.
fn piece_key<const N: usize>(mut colors: [Color; N]) -> [Color; N] {
    colors.sort();
    colors
}

fn is_odd(permutation: &[usize]) -> bool {
    let mut visited = vec![false; permutation.len()];
    let mut transpositions = 0;
    for start in 0..permutation.len() {
        let mut i = start;
        let mut length = 0;
        while !visited[i] {
            visited[i] = true;
            i = permutation[i];
            length += 1;
        }
        if length > 0 {
            transpositions += length - 1;
        }
    }
    transpositions % 2 == 1
}

/// Which home slot each piece currently sits in, given the colors every slot
/// should hold.
fn identify<const N: usize>(
    state: &CubeState,
    centers: &[Color; 6],
    positions: &[[Facelet; N]],
) -> Result<Vec<usize>, usize> {
    let homes = positions
        .iter()
        .map(|slot| piece_key(slot.map(|facelet| centers[facelet.face.index()])))
        .collect_vec();

    let mut pieces = Vec::with_capacity(positions.len());
    for (i, slot) in positions.iter().enumerate() {
        let key = piece_key(slot.map(|facelet| state[facelet]));
        match homes.iter().position(|home| *home == key) {
            Some(home) if !pieces.contains(&home) => pieces.push(home),
            _ => return Err(i),
        }
    }
    Ok(pieces)
}

/// # Errors
///
/// Returns the first rule of a reachable state that `state` breaks.
pub fn check_legality(state: &CubeState) -> Result<(), IllegalStateError> {
    for (color, count) in Color::ALL.into_iter().zip(state.color_counts()) {
        if count != 9 {
            return Err(IllegalStateError::ColorCount { color, count });
        }
    }

    let centers = Face::ALL.map(|face| state.center(face));
    if !CENTER_ARRANGEMENTS.contains(&centers) {
        return Err(IllegalStateError::CenterScheme);
    }

    let edges = identify(state, &centers, &EDGE_POSITIONS)
        .map_err(|i| IllegalStateError::InvalidEdge(EDGE_POSITIONS[i][0]))?;
    let corners = identify(state, &centers, &CORNER_POSITIONS)
        .map_err(|i| IllegalStateError::InvalidCorner(CORNER_POSITIONS[i][0]))?;

    // Orientation is measured against the colors of the TOP and BOTTOM
    // centers, then FRONT and BACK for edges that have neither.
    let vertical = [centers[Face::Top.index()], centers[Face::Bottom.index()]];
    let depth = [centers[Face::Front.index()], centers[Face::Back.index()]];

    // The first facelet of every edge position is on TOP, BOTTOM, FRONT or
    // BACK, so a correctly oriented edge shows its reference color there.
    let flipped = EDGE_POSITIONS
        .iter()
        .filter(|[first, second]| {
            let (a, b) = (state[*first], state[*second]);
            let reference = if vertical.contains(&a) || vertical.contains(&b) {
                &vertical
            } else {
                &depth
            };
            !reference.contains(&a)
        })
        .count();
    if flipped % 2 != 0 {
        return Err(IllegalStateError::EdgeFlip);
    }

    let twist: usize = CORNER_POSITIONS
        .iter()
        .map(|corner| {
            corner
                .iter()
                .position(|&facelet| vertical.contains(&state[facelet]))
                .unwrap_or(0)
        })
        .sum();
    if twist % 3 != 0 {
        return Err(IllegalStateError::CornerTwist);
    }

    if is_odd(&edges) != is_odd(&corners) {
        return Err(IllegalStateError::PermutationParity);
    }

    Ok(())
}

impl CubeState {
    #[must_use]
    pub fn is_legal(&self) -> bool {
        check_legality(self).is_ok()
    }
}
