use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{FACELET_COUNT, Face, Facelet, Point, SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    White,
    Yellow,
    Orange,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::White,
        Color::Yellow,
        Color::Orange,
    ];

    /// Parses the single-letter code used by the text format.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'r' => Some(Color::Red),
            'g' => Some(Color::Green),
            'b' => Some(Color::Blue),
            'w' => Some(Color::White),
            'y' => Some(Color::Yellow),
            'o' => Some(Color::Orange),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::White => 'w',
            Color::Yellow => 'y',
            Color::Orange => 'o',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::White => "white",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
        })
    }
}

/// One value per facelet of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceletMap<T>([[[T; SIZE]; SIZE]; 6]);

/// The colors of all 54 stickers.
pub type CubeState = FaceletMap<Color>;

/// A partial description of a [`CubeState`]; `None` cells are unconstrained.
pub type Pattern = FaceletMap<Option<Color>>;

impl<T: Copy> FaceletMap<T> {
    pub fn from_fn(mut f: impl FnMut(Facelet) -> T) -> Self {
        Self(std::array::from_fn(|face| {
            std::array::from_fn(|row| {
                std::array::from_fn(|col| f(Facelet::new(Face::ALL[face], row, col)))
            })
        }))
    }

    #[must_use]
    pub fn face(&self, face: Face) -> &[[T; SIZE]; SIZE] {
        &self.0[face.index()]
    }

    #[must_use]
    pub fn center(&self, face: Face) -> T {
        self[Facelet::new(face, 1, 1)]
    }

    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.0.iter().flatten().flatten().copied()
    }
}

impl FaceletMap<Facelet> {
    /// Every facelet holding its own position.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_fn(|facelet| facelet)
    }
}

impl<T> Index<Facelet> for FaceletMap<T> {
    type Output = T;

    fn index(&self, facelet: Facelet) -> &T {
        let Point { row, col } = facelet.point;
        &self.0[facelet.face.index()][row][col]
    }
}

impl<T> IndexMut<Facelet> for FaceletMap<T> {
    fn index_mut(&mut self, facelet: Facelet) -> &mut T {
        let Point { row, col } = facelet.point;
        &mut self.0[facelet.face.index()][row][col]
    }
}

/// Center colors of the solved cube, indexed by [`Face`].
pub const STANDARD_SCHEME: [Color; 6] = [
    Color::White,
    Color::Blue,
    Color::Orange,
    Color::Green,
    Color::Red,
    Color::Yellow,
];

/// The standard scheme after a half turn about the FRONT/BACK axis.
pub const UPSIDE_DOWN_SCHEME: [Color; 6] = [
    Color::Yellow,
    Color::Blue,
    Color::Red,
    Color::Green,
    Color::Orange,
    Color::White,
];

impl CubeState {
    /// The solved cube in the standard scheme.
    #[must_use]
    pub fn solved() -> Self {
        Self::from_fn(|facelet| STANDARD_SCHEME[facelet.face.index()])
    }

    #[must_use]
    pub fn is_face_uniform(&self, face: Face) -> bool {
        self.face(face).iter().flatten().all_equal()
    }

    /// Whether every face shows a single color.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| self.is_face_uniform(face))
    }

    #[must_use]
    pub fn matches(&self, pattern: &Pattern) -> bool {
        Facelet::all().all(|facelet| pattern[facelet].is_none_or(|color| self[facelet] == color))
    }

    /// How many stickers of each color there are, indexed like [`Color::ALL`].
    #[must_use]
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for color in self.values() {
            counts[color as usize] += 1;
        }
        counts
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

impl Pattern {
    /// The pattern every state matches.
    #[must_use]
    pub fn dont_care() -> Self {
        Self::from_fn(|_| None)
    }

    /// A pattern constraining only the six centers.
    #[must_use]
    pub fn centers(scheme: [Color; 6]) -> Self {
        Self::from_fn(|facelet| facelet.is_center().then_some(scheme[facelet.face.index()]))
    }

    pub fn require(&mut self, facelet: Facelet, color: Color) -> &mut Self {
        self[facelet] = Some(color);
        self
    }

    #[must_use]
    pub fn with(mut self, facelet: Facelet, color: Color) -> Self {
        self.require(facelet, color);
        self
    }

    pub fn relax(&mut self, facelet: Facelet) -> &mut Self {
        self[facelet] = None;
        self
    }
}

impl fmt::Display for CubeState {
    /// The 54-letter text format, one space between faces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, face) in Face::ALL.into_iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            for color in self.face(face).iter().flatten() {
                write!(f, "{}", color.code())?;
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseStateError {
    #[error("Unknown color code {code:?} at sticker {index}, expected one of w, b, g, y, o, r")]
    UnknownColor { code: char, index: usize },
    #[error("Expected 54 color codes but got {0}")]
    WrongLength(usize),
}

impl FromStr for CubeState {
    type Err = ParseStateError;

    /// Parses 54 color codes, face-major (TOP, FRONT, RIGHT, BACK, LEFT,
    /// BOTTOM) and row-major within a face. Whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colors = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(index, code)| {
                Color::from_code(code).ok_or(ParseStateError::UnknownColor { code, index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let colors: [Color; FACELET_COUNT] = colors
            .try_into()
            .map_err(|colors: Vec<Color>| ParseStateError::WrongLength(colors.len()))?;

        Ok(Self::from_fn(|facelet| colors[facelet.index()]))
    }
}
