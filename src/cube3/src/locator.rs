//! Finding pieces by their colors, wherever the cube currently holds them.

use crate::{
    geometry::{Face, Facelet},
    state::{Color, CubeState},
};

use Face::{Back, Bottom, Front, Left, Right, Top};

/// The 12 edge positions, each as its two facelets.
pub const EDGE_POSITIONS: [[Facelet; 2]; 12] = [
    [Facelet::new(Top, 0, 1), Facelet::new(Back, 0, 1)],
    [Facelet::new(Top, 1, 0), Facelet::new(Left, 0, 1)],
    [Facelet::new(Top, 1, 2), Facelet::new(Right, 0, 1)],
    [Facelet::new(Top, 2, 1), Facelet::new(Front, 0, 1)],
    [Facelet::new(Bottom, 0, 1), Facelet::new(Front, 2, 1)],
    [Facelet::new(Bottom, 1, 0), Facelet::new(Left, 2, 1)],
    [Facelet::new(Bottom, 1, 2), Facelet::new(Right, 2, 1)],
    [Facelet::new(Bottom, 2, 1), Facelet::new(Back, 2, 1)],
    [Facelet::new(Front, 1, 0), Facelet::new(Left, 1, 2)],
    [Facelet::new(Front, 1, 2), Facelet::new(Right, 1, 0)],
    [Facelet::new(Back, 1, 0), Facelet::new(Right, 1, 2)],
    [Facelet::new(Back, 1, 2), Facelet::new(Left, 1, 0)],
];

/// The 8 corner positions. The first facelet is on TOP or BOTTOM and the
/// other two follow it in the same rotational direction for every corner.
pub const CORNER_POSITIONS: [[Facelet; 3]; 8] = [
    [Facelet::new(Top, 0, 0), Facelet::new(Back, 0, 2), Facelet::new(Left, 0, 0)],
    [Facelet::new(Top, 0, 2), Facelet::new(Right, 0, 2), Facelet::new(Back, 0, 0)],
    [Facelet::new(Top, 2, 0), Facelet::new(Left, 0, 2), Facelet::new(Front, 0, 0)],
    [Facelet::new(Top, 2, 2), Facelet::new(Front, 0, 2), Facelet::new(Right, 0, 0)],
    [Facelet::new(Bottom, 2, 0), Facelet::new(Left, 2, 0), Facelet::new(Back, 2, 2)],
    [Facelet::new(Bottom, 2, 2), Facelet::new(Back, 2, 0), Facelet::new(Right, 2, 2)],
    [Facelet::new(Bottom, 0, 0), Facelet::new(Front, 2, 0), Facelet::new(Left, 2, 2)],
    [Facelet::new(Bottom, 0, 2), Facelet::new(Right, 2, 0), Facelet::new(Front, 2, 2)],
];

impl CubeState {
    /// The face whose center is `color`.
    #[must_use]
    pub fn find_face(&self, color: Color) -> Option<Face> {
        Face::ALL
            .into_iter()
            .find(|&face| self.center(face) == color)
    }

    /// The facelet showing `a` on the edge piece colored `a` and `b`.
    #[must_use]
    pub fn find_edge(&self, a: Color, b: Color) -> Option<Facelet> {
        EDGE_POSITIONS.into_iter().find_map(|[p, q]| {
            if self[p] == a && self[q] == b {
                Some(p)
            } else if self[p] == b && self[q] == a {
                Some(q)
            } else {
                None
            }
        })
    }

    /// The facelet showing `a` on the corner piece colored `a`, `b` and `c`.
    #[must_use]
    pub fn find_corner(&self, a: Color, b: Color, c: Color) -> Option<Facelet> {
        CORNER_POSITIONS.into_iter().find_map(|corner| {
            (0..3).find_map(|i| {
                let x = self[corner[(i + 1) % 3]];
                let y = self[corner[(i + 2) % 3]];
                (self[corner[i]] == a && ((x == b && y == c) || (x == c && y == b)))
                    .then_some(corner[i])
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{Action, parse_sequence};

    #[test]
    fn solved_locations() {
        let solved = CubeState::solved();
        assert_eq!(solved.find_face(Color::Orange), Some(Right));
        assert_eq!(
            solved.find_corner(Color::White, Color::Blue, Color::Red),
            Some(Facelet::new(Top, 2, 0))
        );
        assert_eq!(
            solved.find_corner(Color::Blue, Color::White, Color::Red),
            Some(Facelet::new(Front, 0, 0))
        );
        assert_eq!(
            solved.find_edge(Color::White, Color::Blue),
            Some(Facelet::new(Top, 2, 1))
        );
        assert_eq!(
            solved.find_edge(Color::Blue, Color::White),
            Some(Facelet::new(Front, 0, 1))
        );
    }

    #[test]
    fn missing_pieces() {
        let solved = CubeState::solved();
        assert_eq!(solved.find_edge(Color::White, Color::Yellow), None);
        assert_eq!(
            solved.find_corner(Color::White, Color::Blue, Color::Green),
            None
        );
    }

    #[test]
    fn follows_a_move() {
        let state = CubeState::solved().apply(Action::F);
        assert_eq!(
            state.find_edge(Color::White, Color::Blue),
            Some(Facelet::new(Right, 1, 0))
        );
        let state = CubeState::solved().apply(Action::TiltForward);
        assert_eq!(state.find_face(Color::Blue), Some(Top));

        let scrambled = crate::moves::apply_sequence(
            &CubeState::solved(),
            parse_sequence("R U R' U' F2 D L'").unwrap(),
        );
        for [p, q] in EDGE_POSITIONS {
            let (a, b) = (scrambled[p], scrambled[q]);
            assert_eq!(scrambled.find_edge(a, b), Some(p));
        }
        for [p, q, r] in CORNER_POSITIONS {
            let (a, b, c) = (scrambled[p], scrambled[q], scrambled[r]);
            assert_eq!(scrambled.find_corner(a, c, b), Some(p));
        }
    }

    #[test]
    fn corner_sticker_order() {
        let solved = CubeState::solved();
        let [top, side, other] = CORNER_POSITIONS[3];
        assert_eq!(
            [solved[top], solved[side], solved[other]],
            [Color::White, Color::Blue, Color::Orange]
        );
    }
}
