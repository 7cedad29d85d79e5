//! The layer-by-layer solving pipeline.
//!
//! Small goals (holding the cube in the standard orientation, the white
//! cross, dropping a prepared corner into place) are reached by lookahead
//! search. Everything else is done with locator-guided setup moves followed by
//! fixed algorithms. The cube is solved WHITE side first, then turned upside
//! down for the middle layer and the YELLOW last layer.

use std::fmt;

use log::{debug, info};
use thiserror::Error;

use crate::{
    cube::Cube3,
    geometry::{Face, Facelet, Point},
    legality::{IllegalStateError, check_legality},
    moves::Action,
    start,
    state::{Color, CubeState, Pattern, STANDARD_SCHEME, UPSIDE_DOWN_SCHEME},
    success, working,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Orient,
    Cross,
    FirstLayerCorners,
    MiddleLayerEdges,
    LastLayerCross,
    LastLayerCornerOrientation,
    LastLayerCornerPermutation,
    LastLayerEdgePermutation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Orient => "orientation",
            Stage::Cross => "cross",
            Stage::FirstLayerCorners => "first layer corners",
            Stage::MiddleLayerEdges => "middle layer edges",
            Stage::LastLayerCross => "last layer cross",
            Stage::LastLayerCornerOrientation => "last layer corner orientation",
            Stage::LastLayerCornerPermutation => "last layer corner permutation",
            Stage::LastLayerEdgePermutation => "last layer edge permutation",
        })
    }
}

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("The cube cannot be solved: {0}; check input legality")]
    IllegalState(#[from] IllegalStateError),
    #[error("No move sequence reaches the {stage} goal; check input legality")]
    SearchExhausted { stage: Stage },
    #[error("A piece needed for the {stage} is missing; check input legality")]
    PieceNotFound { stage: Stage },
    #[error("The {stage} stage did not converge; check input legality")]
    LoopLimit { stage: Stage },
    #[error("The cube is not solved after every stage ran; check input legality")]
    NotSolved,
}

use Action::{
    B, BPrime, D, DPrime, F, FPrime, L, LPrime, R, RPrime, TurnClockwise, U, UPrime,
};
use Color::{Blue, Green, Orange, Red, White, Yellow};
use Face::{Back, Bottom, Front, Left, Right, Top};

const fn at(face: Face, row: usize, col: usize) -> Facelet {
    Facelet::new(face, row, col)
}

/// The white cross edges in solving order: the TOP facelet, the side facelet
/// and the side color.
const CROSS_EDGES: [(Facelet, Facelet, Color); 4] = [
    (at(Top, 2, 1), at(Front, 0, 1), Blue),
    (at(Top, 1, 2), at(Right, 0, 1), Orange),
    (at(Top, 0, 1), at(Back, 0, 1), Green),
    (at(Top, 1, 0), at(Left, 0, 1), Red),
];

struct CornerSlot {
    colors: (Color, Color),
    goal: [(Facelet, Color); 3],
    /// The bottom-layer positions the corner is dropped in from.
    below: [Facelet; 2],
}

const CORNER_SLOTS: [CornerSlot; 4] = [
    CornerSlot {
        colors: (Blue, Red),
        goal: [(at(Top, 2, 0), White), (at(Front, 0, 0), Blue), (at(Left, 0, 2), Red)],
        below: [at(Front, 2, 0), at(Left, 2, 2)],
    },
    CornerSlot {
        colors: (Orange, Blue),
        goal: [(at(Top, 2, 2), White), (at(Front, 0, 2), Blue), (at(Right, 0, 0), Orange)],
        below: [at(Front, 2, 2), at(Right, 2, 0)],
    },
    CornerSlot {
        colors: (Red, Green),
        goal: [(at(Top, 0, 0), White), (at(Back, 0, 2), Green), (at(Left, 0, 0), Red)],
        below: [at(Back, 2, 2), at(Left, 2, 0)],
    },
    CornerSlot {
        colors: (Green, Orange),
        goal: [(at(Top, 0, 2), White), (at(Back, 0, 0), Green), (at(Right, 0, 2), Orange)],
        below: [at(Back, 2, 0), at(Right, 2, 2)],
    },
];

/// The white corners in solving order, by their two other colors.
pub const FIRST_LAYER_CORNERS: [(Color, Color); 4] = [
    CORNER_SLOTS[0].colors,
    CORNER_SLOTS[1].colors,
    CORNER_SLOTS[2].colors,
    CORNER_SLOTS[3].colors,
];

struct EdgeSlot {
    colors: (Color, Color),
    goal: [(Facelet, Color); 2],
}

const EDGE_SLOTS: [EdgeSlot; 4] = [
    EdgeSlot {
        colors: (Red, Blue),
        goal: [(at(Left, 1, 2), Red), (at(Front, 1, 0), Blue)],
    },
    EdgeSlot {
        colors: (Blue, Orange),
        goal: [(at(Front, 1, 2), Blue), (at(Right, 1, 0), Orange)],
    },
    EdgeSlot {
        colors: (Orange, Green),
        goal: [(at(Right, 1, 2), Orange), (at(Back, 1, 0), Green)],
    },
    EdgeSlot {
        colors: (Green, Red),
        goal: [(at(Back, 1, 2), Green), (at(Left, 1, 0), Red)],
    },
];

/// The middle layer edges in solving order.
pub const MIDDLE_LAYER_EDGES: [(Color, Color); 4] = [
    EDGE_SLOTS[0].colors,
    EDGE_SLOTS[1].colors,
    EDGE_SLOTS[2].colors,
    EDGE_SLOTS[3].colors,
];

const CORNER_CYCLE: [Action; 4] = [R, D, RPrime, D];
/// Takes the top-layer edge at TOP(1,2)/RIGHT(0,1) into the FRONT/LEFT slot,
/// ejecting whatever edge sat there.
const INSERT_LEFT: [Action; 7] = [LPrime, UPrime, L, U, F, U, FPrime];
/// Takes the top-layer edge at TOP(1,0)/LEFT(0,1) into the FRONT/RIGHT slot.
const INSERT_RIGHT: [Action; 7] = [R, U, RPrime, UPrime, FPrime, UPrime, F];
const CROSS_FROM_L: [Action; 6] = [F, U, R, UPrime, RPrime, FPrime];
const CROSS_FROM_LINE: [Action; 6] = [F, R, U, RPrime, UPrime, FPrime];
const SUNE: [Action; 8] = [R, U, RPrime, U, R, U, U, RPrime];
/// Cycles three top corners, leaving the FRONT/LEFT one in place.
const CORNER_THREE_CYCLE: [Action; 12] = [RPrime, F, RPrime, B, B, R, FPrime, RPrime, B, B, R, R];
/// Cycles three top edges, keeping the BACK one.
const EDGE_THREE_CYCLE: [Action; 12] = [F, F, U, RPrime, L, F, F, R, LPrime, U, F, F];
const EDGE_THREE_CYCLE_INVERSE: [Action; 12] =
    [F, F, UPrime, RPrime, L, F, F, R, LPrime, UPrime, F, F];

/// Brings a white sticker sitting in the top row of a side face down to the
/// bottom layer.
fn lower_from_side(facelet: Facelet) -> Option<[Action; 3]> {
    let (turn, undo) = match facelet.face {
        Front => (F, FPrime),
        Right => (R, RPrime),
        Back => (B, BPrime),
        Left => (L, LPrime),
        Top | Bottom => return None,
    };
    match facelet.point {
        Point { row: 0, col: 0 } => Some([undo, DPrime, turn]),
        Point { row: 0, col: 2 } => Some([turn, D, undo]),
        _ => None,
    }
}

/// Brings a white corner out of the wrong TOP slot down to the bottom layer.
fn lower_from_top(point: Point) -> Option<[Action; 3]> {
    match point {
        Point { row: 0, col: 0 } => Some([B, D, BPrime]),
        Point { row: 0, col: 2 } => Some([BPrime, DPrime, B]),
        Point { row: 2, col: 0 } => Some([FPrime, DPrime, F]),
        Point { row: 2, col: 2 } => Some([F, D, FPrime]),
        _ => None,
    }
}

fn top_edges_yellow(state: &CubeState) -> [bool; 4] {
    [(0, 1), (1, 0), (1, 2), (2, 1)].map(|(row, col)| state[at(Top, row, col)] == Yellow)
}

fn top_corners_yellow(state: &CubeState) -> usize {
    [(0, 0), (0, 2), (2, 0), (2, 2)]
        .into_iter()
        .filter(|&(row, col)| state[at(Top, row, col)] == Yellow)
        .count()
}

struct Pipeline<'a> {
    cube: &'a mut Cube3,
    max_iterations: usize,
    cross_fallback_depth: usize,
}

impl Pipeline<'_> {
    fn state(&self) -> CubeState {
        self.cube.state()
    }

    fn perform(&mut self, actions: &[Action]) {
        self.cube.perform_sequence(actions.iter().copied());
    }

    fn lookahead(&mut self, min_depth: usize, max_depth: usize, goal: &Pattern) -> bool {
        self.cube.increment_lookahead(min_depth, max_depth, goal, false)
    }

    /// Performs `action` until `done` holds. Four quarter turns return to the
    /// start, so a fifth is never tried.
    fn turn_until(
        &mut self,
        action: Action,
        stage: Stage,
        done: impl Fn(&CubeState) -> bool,
    ) -> Result<(), SolveError> {
        for _ in 0..4 {
            if done(&self.state()) {
                return Ok(());
            }
            self.cube.perform_action(action);
        }
        if done(&self.state()) {
            Ok(())
        } else {
            Err(SolveError::LoopLimit { stage })
        }
    }

    /// Counts one more pass of a repeat-until-done loop.
    fn next_pass(&self, passes: &mut usize, stage: Stage) -> Result<(), SolveError> {
        *passes += 1;
        if *passes > self.max_iterations {
            return Err(SolveError::LoopLimit { stage });
        }
        Ok(())
    }

    fn find_corner(&self, stage: Stage, colors: (Color, Color)) -> Result<Facelet, SolveError> {
        self.state()
            .find_corner(White, colors.0, colors.1)
            .ok_or(SolveError::PieceNotFound { stage })
    }

    fn find_edge(&self, stage: Stage, colors: (Color, Color)) -> Result<Facelet, SolveError> {
        self.state()
            .find_edge(colors.0, colors.1)
            .ok_or(SolveError::PieceNotFound { stage })
    }

    /// Turns the whole cube so its centers follow `scheme`.
    fn orient(&mut self, scheme: [Color; 6]) -> Result<(), SolveError> {
        if self
            .cube
            .increment_lookahead(1, 4, &Pattern::centers(scheme), true)
        {
            Ok(())
        } else {
            Err(SolveError::SearchExhausted {
                stage: Stage::Orient,
            })
        }
    }

    fn run(&mut self) -> Result<(), SolveError> {
        debug!(working!("Holding the cube WHITE up, BLUE front"));
        self.orient(STANDARD_SCHEME)?;
        let mut goal = Pattern::centers(STANDARD_SCHEME);

        self.cross(&mut goal)?;
        for slot in &CORNER_SLOTS {
            self.first_layer_corner(&mut goal, slot)?;
        }
        for slot in &EDGE_SLOTS {
            self.middle_layer_edge(&mut goal, slot)?;
        }

        // Nothing has turned the cube over yet when every middle edge was
        // already in place.
        if self.state()[at(Top, 1, 1)] != Yellow {
            self.orient(UPSIDE_DOWN_SCHEME)?;
        }
        self.last_layer_cross()?;
        self.last_layer_corner_orientation()?;
        self.last_layer_corner_permutation()?;
        self.last_layer_edge_permutation()
    }

    fn cross(&mut self, goal: &mut Pattern) -> Result<(), SolveError> {
        debug!(working!("Building the cross"));
        for (top, side, color) in CROSS_EDGES {
            goal.require(top, White).require(side, color);
            if !self.lookahead(1, 4, goal) && !self.lookahead(5, self.cross_fallback_depth, goal) {
                return Err(SolveError::SearchExhausted { stage: Stage::Cross });
            }
        }
        Ok(())
    }

    fn first_layer_corner(&mut self, goal: &mut Pattern, slot: &CornerSlot) -> Result<(), SolveError> {
        let stage = Stage::FirstLayerCorners;
        debug!(working!("Placing the white {}/{} corner"), slot.colors.0, slot.colors.1);

        for (facelet, color) in slot.goal {
            goal.require(facelet, color);
        }
        if self.lookahead(1, 3, goal) {
            return Ok(());
        }

        let mut white = self.find_corner(stage, slot.colors)?;
        if white.face == Bottom {
            if white.point == Point::new(0, 2) {
                self.cube.perform_action(D);
            }
            let mut passes = 0;
            loop {
                white = self.find_corner(stage, slot.colors)?;
                if white.face != Bottom && white.point.row != 0 {
                    break;
                }
                self.next_pass(&mut passes, stage)?;
                self.perform(&CORNER_CYCLE);
            }
        }

        if white.face == Top {
            let setup = lower_from_top(white.point).ok_or(SolveError::PieceNotFound { stage })?;
            self.perform(&setup);
            white = self.find_corner(stage, slot.colors)?;
        }
        if white.face.is_side() && white.point.row == 0 {
            let setup = lower_from_side(white).ok_or(SolveError::PieceNotFound { stage })?;
            self.perform(&setup);
        }

        let (b, c) = slot.colors;
        self.turn_until(D, stage, |state| {
            state
                .find_corner(White, b, c)
                .is_some_and(|facelet| slot.below.contains(&facelet))
        })?;

        if self.lookahead(3, 3, goal) {
            Ok(())
        } else {
            Err(SolveError::SearchExhausted { stage })
        }
    }

    fn middle_layer_edge(&mut self, goal: &mut Pattern, slot: &EdgeSlot) -> Result<(), SolveError> {
        let stage = Stage::MiddleLayerEdges;
        for (facelet, color) in slot.goal {
            goal.require(facelet, color);
        }
        if self.state().matches(goal) {
            return Ok(());
        }
        debug!(working!("Placing the {}/{} edge"), slot.colors.0, slot.colors.1);

        self.orient(UPSIDE_DOWN_SCHEME)?;
        let (first, second) = slot.colors;

        let edge = self.find_edge(stage, slot.colors)?;
        if edge.face.is_side() && edge.point.row == 1 {
            // Stuck in the wrong middle slot or flipped in the right one.
            self.turn_until(TurnClockwise, stage, |state| {
                state
                    .find_edge(first, second)
                    .is_some_and(|facelet| facelet == at(Front, 1, 0) || facelet == at(Left, 1, 2))
            })?;
            self.perform(&INSERT_LEFT);
        }

        let edge = self.find_edge(stage, slot.colors)?;
        let first_on_top = edge.face == Top;
        let outward = if first_on_top { second } else { first };
        self.turn_until(TurnClockwise, stage, |state| {
            state.find_face(outward) == Some(Front)
        })?;

        let target = if first_on_top {
            at(Top, 1, 0)
        } else {
            at(Right, 0, 1)
        };
        self.turn_until(U, stage, |state| state.find_edge(first, second) == Some(target))?;
        if first_on_top {
            self.perform(&INSERT_RIGHT);
        } else {
            self.perform(&INSERT_LEFT);
        }
        Ok(())
    }

    fn last_layer_cross(&mut self) -> Result<(), SolveError> {
        let stage = Stage::LastLayerCross;
        debug!(working!("Building the yellow cross"));
        let mut passes = 0;
        loop {
            let [north, west, east, south] = top_edges_yellow(&self.state());
            if north && west && east && south {
                return Ok(());
            }
            self.next_pass(&mut passes, stage)?;

            if !(north || west || east || south) {
                self.perform(&CROSS_FROM_L);
            } else if (north && south) || (west && east) {
                if north && south {
                    self.cube.perform_action(U);
                }
                self.perform(&CROSS_FROM_LINE);
            } else {
                self.turn_until(U, stage, |state| {
                    let [north, west, ..] = top_edges_yellow(state);
                    north && west
                })?;
                self.perform(&CROSS_FROM_L);
            }
        }
    }

    fn last_layer_corner_orientation(&mut self) -> Result<(), SolveError> {
        let stage = Stage::LastLayerCornerOrientation;
        debug!(working!("Orienting the yellow corners"));
        let mut passes = 0;
        loop {
            let yellow = top_corners_yellow(&self.state());
            if yellow == 4 {
                return Ok(());
            }
            self.next_pass(&mut passes, stage)?;

            if yellow == 1 {
                self.turn_until(U, stage, |state| state[at(Top, 2, 0)] == Yellow)?;
            } else {
                self.turn_until(U, stage, |state| state[at(Front, 0, 0)] == Yellow)?;
            }
            self.perform(&SUNE);
        }
    }

    fn last_layer_corner_permutation(&mut self) -> Result<(), SolveError> {
        let stage = Stage::LastLayerCornerPermutation;
        debug!(working!("Placing the yellow corners"));
        self.orient(UPSIDE_DOWN_SCHEME)?;

        let goal = Pattern::dont_care()
            .with(at(Front, 0, 0), Blue)
            .with(at(Front, 0, 2), Blue)
            .with(at(Back, 0, 0), Green)
            .with(at(Back, 0, 2), Green)
            .with(at(Bottom, 0, 0), White)
            .with(at(Bottom, 0, 2), White)
            .with(at(Bottom, 2, 0), White)
            .with(at(Bottom, 2, 2), White);

        let mut passes = 0;
        while !self.lookahead(1, 2, &goal) {
            self.next_pass(&mut passes, stage)?;
            let state = self.state();
            let paired = Face::SIDES
                .into_iter()
                .any(|face| state[at(face, 0, 0)] == state[at(face, 0, 2)]);
            if paired {
                self.turn_until(U, stage, |state| state[at(Back, 0, 0)] == state[at(Back, 0, 2)])?;
            }
            self.perform(&CORNER_THREE_CYCLE);
        }
        Ok(())
    }

    fn last_layer_edge_permutation(&mut self) -> Result<(), SolveError> {
        let stage = Stage::LastLayerEdgePermutation;
        debug!(working!("Placing the yellow edges"));
        self.orient(UPSIDE_DOWN_SCHEME)?;

        let edge_matches_corner = |state: &CubeState, face: Face, col: usize| {
            state[at(face, 0, 1)] == state[at(face, 0, col)]
        };

        let mut passes = 0;
        loop {
            let state = self.state();
            if Face::SIDES
                .into_iter()
                .all(|face| edge_matches_corner(&state, face, 0))
            {
                return Ok(());
            }
            self.next_pass(&mut passes, stage)?;

            let placed = Face::SIDES
                .into_iter()
                .any(|face| edge_matches_corner(&state, face, 2));
            if placed {
                self.turn_until(TurnClockwise, stage, |state| {
                    edge_matches_corner(state, Back, 2)
                })?;
            }

            let state = self.state();
            if !placed || state[at(Right, 0, 1)] == state[at(Front, 0, 0)] {
                self.perform(&EDGE_THREE_CYCLE);
            } else {
                self.perform(&EDGE_THREE_CYCLE_INVERSE);
            }
        }
    }
}

pub(crate) fn solve(cube: &mut Cube3) -> Result<(), SolveError> {
    cube.clear_moves();
    let initial = cube.state();
    if initial.is_solved() {
        info!(success!("Already solved"));
        return Ok(());
    }
    if cube.config().check_legality {
        check_legality(&initial)?;
    }

    info!(start!("Solving {}"), initial);
    let config = *cube.config();
    Pipeline {
        cube: &mut *cube,
        max_iterations: config.max_loop_iterations,
        cross_fallback_depth: config.cross_fallback_depth,
    }
    .run()?;

    if !cube.state().is_solved() {
        return Err(SolveError::NotSolved);
    }
    info!(success!("Solved in {} moves"), cube.moves_performed().len());
    Ok(())
}
