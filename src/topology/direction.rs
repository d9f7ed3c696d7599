//! Face directions of a hexahedral control volume.
//!
//! The six faces pair up along three axes: east/west on x, north/south on y,
//! front/back on z. Directions carry the one-letter codes used by mesh
//! configuration files (`n s e w f b`).

use crate::mesh_error::MeshError;
use std::fmt;

/// Cartesian axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index into `[x, y, z]` arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One of the six faces of a leaf cell.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Front,
    Back,
}

impl Direction {
    /// All six directions, in accumulator storage order.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Front,
        Direction::Back,
    ];

    /// One direction per axis, pointing towards increasing coordinates.
    pub const POSITIVE: [Direction; 3] = [Direction::East, Direction::North, Direction::Front];

    /// Parse a one-letter direction code.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidDirectionCode`] for anything outside `n s e w f b`.
    pub fn from_code(code: char) -> Result<Self, MeshError> {
        match code {
            'n' => Ok(Direction::North),
            's' => Ok(Direction::South),
            'e' => Ok(Direction::East),
            'w' => Ok(Direction::West),
            'f' => Ok(Direction::Front),
            'b' => Ok(Direction::Back),
            other => Err(MeshError::InvalidDirectionCode(other)),
        }
    }

    /// The one-letter code of this direction.
    pub const fn code(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
            Direction::Front => 'f',
            Direction::Back => 'b',
        }
    }

    /// The face seen from the other side of the interface.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Front => Direction::Back,
            Direction::Back => Direction::Front,
        }
    }

    /// Axis normal to this face.
    pub const fn axis(self) -> Axis {
        match self {
            Direction::East | Direction::West => Axis::X,
            Direction::North | Direction::South => Axis::Y,
            Direction::Front | Direction::Back => Axis::Z,
        }
    }

    /// Position in [`Direction::ALL`]; used to index per-face arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Front => "front",
            Direction::Back => "back",
        };
        f.write_str(name)
    }
}

impl TryFrom<char> for Direction {
    type Error = MeshError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        Direction::from_code(code)
    }
}
