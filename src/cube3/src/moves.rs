//! The sixteen elementary actions and how each one rearranges the stickers.

use std::{fmt, str::FromStr, sync::LazyLock};

use thiserror::Error;

use crate::{
    geometry::{
        Face, Facelet, PointMapping, Region, Rotation, orientation_mapping, rotation_mapping,
    },
    state::{CubeState, FaceletMap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Turn the whole cube clockwise, seen from above.
    TurnClockwise,
    TurnCounterClockwise,
    /// Tilt the whole cube so the FRONT face becomes the TOP face.
    TiltForward,
    TiltBackward,
    U,
    UPrime,
    D,
    DPrime,
    R,
    RPrime,
    L,
    LPrime,
    F,
    FPrime,
    B,
    BPrime,
}

impl Action {
    /// Every action, in the order searches try them.
    pub const ALL: [Action; 16] = {
        let all = [
            Action::TurnClockwise,
            Action::TurnCounterClockwise,
            Action::TiltForward,
            Action::TiltBackward,
            Action::U,
            Action::UPrime,
            Action::D,
            Action::DPrime,
            Action::R,
            Action::RPrime,
            Action::L,
            Action::LPrime,
            Action::F,
            Action::FPrime,
            Action::B,
            Action::BPrime,
        ];
        let mut i = 0;
        while i < all.len() {
            assert!(all[i] as usize == i);
            i += 1;
        }
        all
    };

    /// The twelve single-layer quarter turns.
    pub const LAYER_TURNS: [Action; 12] = {
        let mut turns = [Action::U; 12];
        let mut i = 0;
        while i < turns.len() {
            turns[i] = Action::ALL[i + 4];
            i += 1;
        }
        turns
    };

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_whole_cube_turn(self) -> bool {
        matches!(
            self,
            Action::TurnClockwise
                | Action::TurnCounterClockwise
                | Action::TiltForward
                | Action::TiltBackward
        )
    }

    /// The action that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Action::TurnClockwise => Action::TurnCounterClockwise,
            Action::TurnCounterClockwise => Action::TurnClockwise,
            Action::TiltForward => Action::TiltBackward,
            Action::TiltBackward => Action::TiltForward,
            Action::U => Action::UPrime,
            Action::UPrime => Action::U,
            Action::D => Action::DPrime,
            Action::DPrime => Action::D,
            Action::R => Action::RPrime,
            Action::RPrime => Action::R,
            Action::L => Action::LPrime,
            Action::LPrime => Action::L,
            Action::F => Action::FPrime,
            Action::FPrime => Action::F,
            Action::B => Action::BPrime,
            Action::BPrime => Action::B,
        }
    }

    #[must_use]
    pub const fn notation(self) -> &'static str {
        match self {
            Action::TurnClockwise => "TCW",
            Action::TurnCounterClockwise => "TCCW",
            Action::TiltForward => "TF",
            Action::TiltBackward => "TB",
            Action::U => "U",
            Action::UPrime => "U'",
            Action::D => "D",
            Action::DPrime => "D'",
            Action::R => "R",
            Action::RPrime => "R'",
            Action::L => "L",
            Action::LPrime => "L'",
            Action::F => "F",
            Action::FPrime => "F'",
            Action::B => "B",
            Action::BPrime => "B'",
        }
    }

    /// The face-to-face transformations that make up this action. All of
    /// them read the state from before the action.
    #[must_use]
    pub const fn transformations(self) -> &'static [Transformation] {
        match self {
            Action::TurnClockwise => &TURN_CLOCKWISE,
            Action::TurnCounterClockwise => &TURN_COUNTER_CLOCKWISE,
            Action::TiltForward => &TILT_FORWARD,
            Action::TiltBackward => &TILT_BACKWARD,
            Action::U => &U,
            Action::UPrime => &U_PRIME,
            Action::D => &D,
            Action::DPrime => &D_PRIME,
            Action::R => &R,
            Action::RPrime => &R_PRIME,
            Action::L => &L,
            Action::LPrime => &L_PRIME,
            Action::F => &F,
            Action::FPrime => &F_PRIME,
            Action::B => &B,
            Action::BPrime => &B_PRIME,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.notation())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown move {0:?}")]
pub struct ParseActionError(pub String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.replace('’', "'");
        Action::ALL
            .into_iter()
            .find(|action| action.notation() == s)
            .ok_or(ParseActionError(s))
    }
}

/// Parses a whitespace separated move sequence such as `"R U' F2 TCW"`. A
/// trailing `2` on a layer turn stands for the turn done twice.
///
/// # Errors
///
/// Returns the first token that is not a known move.
pub fn parse_sequence(s: &str) -> Result<Vec<Action>, ParseActionError> {
    let mut actions = Vec::new();
    for token in s.split_whitespace() {
        match token.strip_suffix('2') {
            Some(single) => {
                let action = single
                    .parse::<Action>()
                    .ok()
                    .filter(|action| !action.is_whole_cube_turn())
                    .ok_or_else(|| ParseActionError(token.to_owned()))?;
                actions.extend([action, action]);
            }
            None => actions.push(token.parse()?),
        }
    }
    Ok(actions)
}

/// Moves the stickers in `region` of `destination` over from `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transformation {
    pub origin: Face,
    pub destination: Face,
    pub region: Region,
    /// Overrides the orientation mapping between the two faces. Used for a
    /// face turning in place.
    pub rotation: Option<Rotation>,
}

impl Transformation {
    const fn rotate(face: Face, rotation: Rotation) -> Self {
        Self {
            origin: face,
            destination: face,
            region: Region::All,
            rotation: Some(rotation),
        }
    }

    const fn shift(origin: Face, destination: Face, region: Region) -> Self {
        Self {
            origin,
            destination,
            region,
            rotation: None,
        }
    }

    #[must_use]
    pub fn mapping(&self) -> PointMapping {
        match self.rotation {
            Some(rotation) => rotation_mapping(rotation),
            None => orientation_mapping(self.origin, self.destination),
        }
    }
}

use Face::{Back, Bottom, Front, Left, Right, Top};
use Region::{All, Col, Row};
use Rotation::{Clockwise as Cw, CounterClockwise as Ccw};

const TURN_CLOCKWISE: [Transformation; 6] = [
    Transformation::rotate(Top, Cw),
    Transformation::rotate(Bottom, Ccw),
    Transformation::shift(Right, Front, All),
    Transformation::shift(Back, Right, All),
    Transformation::shift(Left, Back, All),
    Transformation::shift(Front, Left, All),
];

const TURN_COUNTER_CLOCKWISE: [Transformation; 6] = [
    Transformation::rotate(Top, Ccw),
    Transformation::rotate(Bottom, Cw),
    Transformation::shift(Left, Front, All),
    Transformation::shift(Front, Right, All),
    Transformation::shift(Right, Back, All),
    Transformation::shift(Back, Left, All),
];

const TILT_FORWARD: [Transformation; 6] = [
    Transformation::rotate(Right, Cw),
    Transformation::rotate(Left, Ccw),
    Transformation::shift(Front, Top, All),
    Transformation::shift(Top, Back, All),
    Transformation::shift(Back, Bottom, All),
    Transformation::shift(Bottom, Front, All),
];

const TILT_BACKWARD: [Transformation; 6] = [
    Transformation::rotate(Right, Ccw),
    Transformation::rotate(Left, Cw),
    Transformation::shift(Back, Top, All),
    Transformation::shift(Bottom, Back, All),
    Transformation::shift(Front, Bottom, All),
    Transformation::shift(Top, Front, All),
];

const U: [Transformation; 5] = [
    Transformation::rotate(Top, Cw),
    Transformation::shift(Right, Front, Row(0)),
    Transformation::shift(Back, Right, Row(0)),
    Transformation::shift(Left, Back, Row(0)),
    Transformation::shift(Front, Left, Row(0)),
];

const U_PRIME: [Transformation; 5] = [
    Transformation::rotate(Top, Ccw),
    Transformation::shift(Left, Front, Row(0)),
    Transformation::shift(Front, Right, Row(0)),
    Transformation::shift(Right, Back, Row(0)),
    Transformation::shift(Back, Left, Row(0)),
];

const D: [Transformation; 5] = [
    Transformation::rotate(Bottom, Cw),
    Transformation::shift(Left, Front, Row(2)),
    Transformation::shift(Front, Right, Row(2)),
    Transformation::shift(Right, Back, Row(2)),
    Transformation::shift(Back, Left, Row(2)),
];

const D_PRIME: [Transformation; 5] = [
    Transformation::rotate(Bottom, Ccw),
    Transformation::shift(Right, Front, Row(2)),
    Transformation::shift(Back, Right, Row(2)),
    Transformation::shift(Left, Back, Row(2)),
    Transformation::shift(Front, Left, Row(2)),
];

const R: [Transformation; 5] = [
    Transformation::rotate(Right, Cw),
    Transformation::shift(Front, Top, Col(2)),
    Transformation::shift(Top, Back, Col(0)),
    Transformation::shift(Back, Bottom, Col(2)),
    Transformation::shift(Bottom, Front, Col(2)),
];

const R_PRIME: [Transformation; 5] = [
    Transformation::rotate(Right, Ccw),
    Transformation::shift(Back, Top, Col(2)),
    Transformation::shift(Bottom, Back, Col(0)),
    Transformation::shift(Front, Bottom, Col(2)),
    Transformation::shift(Top, Front, Col(2)),
];

const L: [Transformation; 5] = [
    Transformation::rotate(Left, Cw),
    Transformation::shift(Back, Top, Col(0)),
    Transformation::shift(Bottom, Back, Col(2)),
    Transformation::shift(Front, Bottom, Col(0)),
    Transformation::shift(Top, Front, Col(0)),
];

const L_PRIME: [Transformation; 5] = [
    Transformation::rotate(Left, Ccw),
    Transformation::shift(Front, Top, Col(0)),
    Transformation::shift(Top, Back, Col(2)),
    Transformation::shift(Back, Bottom, Col(0)),
    Transformation::shift(Bottom, Front, Col(0)),
];

const F: [Transformation; 5] = [
    Transformation::rotate(Front, Cw),
    Transformation::shift(Left, Top, Row(2)),
    Transformation::shift(Top, Right, Col(0)),
    Transformation::shift(Right, Bottom, Row(0)),
    Transformation::shift(Bottom, Left, Col(2)),
];

const F_PRIME: [Transformation; 5] = [
    Transformation::rotate(Front, Ccw),
    Transformation::shift(Right, Top, Row(2)),
    Transformation::shift(Bottom, Right, Col(0)),
    Transformation::shift(Left, Bottom, Row(0)),
    Transformation::shift(Top, Left, Col(2)),
];

const B: [Transformation; 5] = [
    Transformation::rotate(Back, Cw),
    Transformation::shift(Right, Top, Row(0)),
    Transformation::shift(Bottom, Right, Col(2)),
    Transformation::shift(Left, Bottom, Row(2)),
    Transformation::shift(Top, Left, Col(0)),
];

const B_PRIME: [Transformation; 5] = [
    Transformation::rotate(Back, Ccw),
    Transformation::shift(Left, Top, Row(0)),
    Transformation::shift(Top, Right, Col(2)),
    Transformation::shift(Right, Bottom, Row(2)),
    Transformation::shift(Bottom, Left, Col(0)),
];

/// Applies `transformations` as one step: every transformation reads from
/// `grid` and writes into the result. Cells no transformation writes are
/// carried over unchanged.
#[must_use]
pub fn apply_transformations<T: Copy>(
    grid: &FaceletMap<T>,
    transformations: &[Transformation],
) -> FaceletMap<T> {
    let mut next = *grid;
    for transformation in transformations {
        let mapping = transformation.mapping();
        for point in transformation.region.points() {
            let origin = mapping.origin(point);
            next[Facelet {
                face: transformation.destination,
                point,
            }] = grid[Facelet {
                face: transformation.origin,
                point: origin,
            }];
        }
    }
    next
}

/// For every action, the facelet each destination reads from.
static SOURCES: LazyLock<[FaceletMap<Facelet>; 16]> = LazyLock::new(|| {
    Action::ALL.map(|action| apply_transformations(&FaceletMap::identity(), action.transformations()))
});

impl<T: Copy> FaceletMap<T> {
    /// The result of performing `action`.
    #[must_use]
    pub fn apply(&self, action: Action) -> Self {
        let sources = &SOURCES[action.index()];
        Self::from_fn(|facelet| self[sources[facelet]])
    }
}

#[must_use]
pub fn apply_action(state: &CubeState, action: Action) -> CubeState {
    state.apply(action)
}

#[must_use]
pub fn apply_sequence(
    state: &CubeState,
    actions: impl IntoIterator<Item = Action>,
) -> CubeState {
    actions
        .into_iter()
        .fold(*state, |state, action| state.apply(action))
}
