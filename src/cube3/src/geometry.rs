//! Coordinates on the faces of the cube and the correspondences between them.
//!
//! Every face is a 3×3 grid addressed by `(row, col)`. FRONT is the reference
//! orientation; TOP, RIGHT, LEFT and BOTTOM are each one quarter turn away
//! from it, and BACK is reached by going through RIGHT. A [`PointMapping`]
//! describes, for every point of a destination grid, the point of the origin
//! grid it reads from.

use std::fmt;

/// Edge length of a face.
pub const SIZE: usize = 3;
const LAST: usize = SIZE - 1;
pub const FACELET_COUNT: usize = 6 * SIZE * SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Top,
    Front,
    Right,
    Back,
    Left,
    Bottom,
}

impl Face {
    pub const ALL: [Face; 6] = {
        let all = [
            Face::Top,
            Face::Front,
            Face::Right,
            Face::Back,
            Face::Left,
            Face::Bottom,
        ];
        let mut i = 0;
        while i < all.len() {
            assert!(all[i] as usize == i);
            i += 1;
        }
        all
    };

    /// The four faces around the vertical axis.
    pub const SIDES: [Face; 4] = [Face::Front, Face::Right, Face::Back, Face::Left];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_side(self) -> bool {
        !matches!(self, Face::Top | Face::Bottom)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Face::Top => "TOP",
            Face::Front => "FRONT",
            Face::Right => "RIGHT",
            Face::Back => "BACK",
            Face::Left => "LEFT",
            Face::Bottom => "BOTTOM",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A single sticker position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Facelet {
    pub face: Face,
    pub point: Point,
}

impl Facelet {
    #[must_use]
    pub const fn new(face: Face, row: usize, col: usize) -> Self {
        Self {
            face,
            point: Point::new(row, col),
        }
    }

    /// All 54 facelets, face-major then row-major.
    pub fn all() -> impl Iterator<Item = Facelet> {
        Face::ALL
            .into_iter()
            .flat_map(|face| all_points().map(move |point| Facelet { face, point }))
    }

    /// Position in the face-major, row-major text order.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.face.index() * SIZE + self.point.row) * SIZE + self.point.col
    }

    #[must_use]
    pub const fn is_center(self) -> bool {
        self.point.row == 1 && self.point.col == 1
    }
}

impl fmt::Display for Facelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.face, self.point.row, self.point.col)
    }
}

pub fn all_points() -> impl Iterator<Item = Point> {
    (0..SIZE).flat_map(row_points)
}

pub fn row_points(row: usize) -> impl Iterator<Item = Point> {
    (0..SIZE).map(move |col| Point::new(row, col))
}

pub fn col_points(col: usize) -> impl Iterator<Item = Point> {
    (0..SIZE).map(move |row| Point::new(row, col))
}

/// The set of destination points a transformation writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    All,
    Row(usize),
    Col(usize),
}

impl Region {
    pub fn points(self) -> impl Iterator<Item = Point> {
        all_points().filter(move |point| match self {
            Region::All => true,
            Region::Row(row) => point.row == row,
            Region::Col(col) => point.col == col,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// A bijection on the points of one face. Entry `[r][c]` holds the origin
/// point that destination `(r, c)` reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointMapping([[Point; SIZE]; SIZE]);

impl PointMapping {
    pub fn from_fn(f: impl Fn(Point) -> Point) -> Self {
        Self(std::array::from_fn(|row| {
            std::array::from_fn(|col| f(Point::new(row, col)))
        }))
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::from_fn(|point| point)
    }

    #[must_use]
    pub fn origin(&self, destination: Point) -> Point {
        self.0[destination.row][destination.col]
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        all_points().all(|point| self.origin(point) == point)
    }
}

/// The mapping of a face turned a quarter turn in place.
#[must_use]
pub fn rotation_mapping(rotation: Rotation) -> PointMapping {
    match rotation {
        Rotation::Clockwise => PointMapping::from_fn(|p| Point::new(LAST - p.col, p.row)),
        Rotation::CounterClockwise => PointMapping::from_fn(|p| Point::new(p.col, LAST - p.row)),
    }
}

fn half_turn_mapping() -> PointMapping {
    PointMapping::from_fn(|p| Point::new(LAST - p.row, LAST - p.col))
}

/// How coordinates carry over when stickers move from `origin` to
/// `destination`.
///
/// Only twelve pairs differ from the identity: those between TOP or BOTTOM and
/// one of RIGHT, BACK or LEFT. Everything involving FRONT, and every pair of
/// side faces, keeps its coordinates.
#[must_use]
pub fn orientation_mapping(origin: Face, destination: Face) -> PointMapping {
    use Face::{Back, Bottom, Left, Right, Top};

    match (origin, destination) {
        (Top, Right) | (Right, Bottom) | (Left, Top) | (Bottom, Left) => {
            rotation_mapping(Rotation::Clockwise)
        }
        (Top, Back) | (Back, Top) | (Back, Bottom) | (Bottom, Back) => half_turn_mapping(),
        (Top, Left) | (Right, Top) | (Left, Bottom) | (Bottom, Right) => {
            rotation_mapping(Rotation::CounterClockwise)
        }
        _ => PointMapping::identity(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn exactly_twelve_orientation_pairs_differ() {
        use Face::{Back, Bottom, Left, Right, Top};

        let non_identity = Face::ALL
            .into_iter()
            .flat_map(|a| Face::ALL.into_iter().map(move |b| (a, b)))
            .filter(|&(a, b)| !orientation_mapping(a, b).is_identity())
            .collect::<HashSet<_>>();
        let expected = [
            (Top, Right),
            (Top, Back),
            (Top, Left),
            (Right, Top),
            (Back, Top),
            (Left, Top),
            (Bottom, Right),
            (Bottom, Back),
            (Bottom, Left),
            (Right, Bottom),
            (Back, Bottom),
            (Left, Bottom),
        ]
        .into_iter()
        .collect::<HashSet<_>>();
        assert_eq!(non_identity, expected);

        for face in Face::ALL {
            assert!(orientation_mapping(Face::Front, face).is_identity());
            assert!(orientation_mapping(face, face).is_identity());
        }
    }

    #[test]
    fn opposite_rotations_cancel() {
        let cw = rotation_mapping(Rotation::Clockwise);
        let ccw = rotation_mapping(Rotation::CounterClockwise);
        for point in all_points() {
            assert_eq!(cw.origin(ccw.origin(point)), point);
        }
    }

    #[test]
    fn clockwise_reads_from_the_left_column() {
        let cw = rotation_mapping(Rotation::Clockwise);
        // The new top row is the old left column, read bottom to top.
        assert_eq!(cw.origin(Point::new(0, 0)), Point::new(2, 0));
        assert_eq!(cw.origin(Point::new(0, 2)), Point::new(0, 0));
        assert_eq!(cw.origin(Point::new(1, 1)), Point::new(1, 1));
    }

    #[test]
    fn regions() {
        assert_eq!(Region::All.points().count(), 9);
        assert!(Region::Row(2).points().eq(row_points(2)));
        assert!(Region::Col(0).points().eq(col_points(0)));
        assert_eq!(Facelet::all().count(), 54);
    }
}
