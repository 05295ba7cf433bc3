//! Basic value types of the hex coordinate system. See the parent module
//! documentation for a description of the coordinate system.

use crate::{error::ArgumentError, hex::Orientation};
use derive_more::Display;
use fnv::FnvBuildHasher;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The address of a single cell in the grid, in offset coordinates. `-1` on
/// either axis is the sentinel for "outside the grid"; see
/// [HexCoordinate::OUTSIDE].
///
/// Coordinates are plain values. Whether a coordinate actually refers to a
/// cell in a particular grid is up to the [GridModel](crate::GridModel).
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", column, row)]
pub struct HexCoordinate {
    pub column: i32,
    pub row: i32,
}

impl HexCoordinate {
    /// Sentinel value for a single axis that falls outside the grid
    pub const SENTINEL: i32 = -1;
    /// A coordinate that's outside the grid on both axes
    pub const OUTSIDE: Self = Self::new(Self::SENTINEL, Self::SENTINEL);

    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Is either axis the outside sentinel? Pixel conversion produces
    /// sentinels for points above or left of the grid, so callers need to check
    /// this before using a converted coordinate as an index.
    pub fn is_outside(self) -> bool {
        self.column == Self::SENTINEL || self.row == Self::SENTINEL
    }

    /// Convert to axial coordinates `(q, r)` under the given orientation.
    /// Offset coordinates are what callers index with, but axial coordinates
    /// make distance and straight-line movement trivial.
    ///
    /// Odd columns (horizontal) or odd rows (vertical) are the shifted ones.
    /// Parity uses two's complement, so `-1` is odd.
    pub(crate) fn to_axial(self, orientation: Orientation) -> (i32, i32) {
        match orientation {
            Orientation::Horizontal => {
                let c = self.column;
                (c, self.row - (c - (c & 1)) / 2)
            }
            Orientation::Vertical => {
                let r = self.row;
                (self.column - (r - (r & 1)) / 2, r)
            }
        }
    }

    /// Inverse of [Self::to_axial]
    pub(crate) fn from_axial(orientation: Orientation, q: i32, r: i32) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(q, r + (q - (q & 1)) / 2),
            Orientation::Vertical => Self::new(q + (r - (r & 1)) / 2, r),
        }
    }
}

impl From<(i32, i32)> for HexCoordinate {
    fn from((column, row): (i32, i32)) -> Self {
        Self::new(column, row)
    }
}

impl From<HexCoordinate> for (i32, i32) {
    fn from(coord: HexCoordinate) -> Self {
        (coord.column, coord.row)
    }
}

/// One of the six directions from a cell to its neighbors. Directions are
/// indexed `0..=5`, clockwise, starting from the top of the hexagon. What
/// "top" means depends on the orientation:
///
/// | Index | Horizontal | Vertical |
/// |-------|------------|----------|
/// | 0     | N          | NE       |
/// | 1     | NE         | E        |
/// | 2     | SE         | SE       |
/// | 3     | S          | SW       |
/// | 4     | SW         | W        |
/// | 5     | NW         | NW       |
///
/// Opposite directions are always 3 apart.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "i32", into = "i32")]
pub struct HexDirection(u8);

impl HexDirection {
    pub const COUNT: usize = 6;

    /// All directions, in clockwise order
    pub const ALL: [Self; Self::COUNT] =
        [Self(0), Self(1), Self(2), Self(3), Self(4), Self(5)];

    /// Get the direction with the given index. Fails for anything outside
    /// `0..=5`.
    pub fn new(index: i32) -> Result<Self, ArgumentError> {
        if (0..Self::COUNT as i32).contains(&index) {
            Ok(Self(index as u8))
        } else {
            Err(ArgumentError::InvalidDirection(index))
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The direction pointing the opposite way
    pub fn opposite(self) -> Self {
        self.rotate_clockwise(3)
    }

    /// Rotate this direction clockwise by the given number of sixth-turns
    pub fn rotate_clockwise(self, steps: usize) -> Self {
        Self(((self.index() + steps) % Self::COUNT) as u8)
    }

    /// Iterate over all six directions, clockwise from index 0
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.iter().copied()
    }
}

impl TryFrom<i32> for HexDirection {
    type Error = ArgumentError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<HexDirection> for i32 {
    fn from(direction: HexDirection) -> Self {
        direction.0 as i32
    }
}

/// A set of hex coordinates
pub type HexCoordinateSet = HashSet<HexCoordinate, FnvBuildHasher>;
/// A map of hex coordinates to some `T`
pub type HexCoordinateMap<T> = HashMap<HexCoordinate, T, FnvBuildHasher>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_tokens, Token};
    use strum::IntoEnumIterator;

    #[test]
    fn test_sentinel() {
        assert!(HexCoordinate::OUTSIDE.is_outside());
        assert!(HexCoordinate::new(-1, 3).is_outside());
        assert!(HexCoordinate::new(3, -1).is_outside());
        assert!(!HexCoordinate::new(0, 0).is_outside());
        assert_eq!(HexCoordinate::new(4, -2).to_string(), "(4, -2)");
    }

    #[test]
    fn test_axial_round_trip() {
        for orientation in Orientation::iter() {
            for column in -5..5 {
                for row in -5..5 {
                    let coord = HexCoordinate::new(column, row);
                    let (q, r) = coord.to_axial(orientation);
                    assert_eq!(
                        HexCoordinate::from_axial(orientation, q, r),
                        coord,
                        "{} round trip failed for {}",
                        orientation,
                        coord
                    );
                }
            }
        }
    }

    #[test]
    fn test_direction() {
        assert_eq!(HexDirection::new(4).unwrap().index(), 4);
        assert_eq!(
            HexDirection::new(6),
            Err(ArgumentError::InvalidDirection(6))
        );
        assert_eq!(
            HexDirection::try_from(-1),
            Err(ArgumentError::InvalidDirection(-1))
        );
        for direction in HexDirection::iter() {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(
                direction.opposite().index(),
                (direction.index() + 3) % 6
            );
        }
        assert_eq!(HexDirection::ALL[5].rotate_clockwise(2).index(), 1);
    }

    #[test]
    fn test_serde() {
        assert_tokens(
            &HexCoordinate::new(3, -1),
            &[
                Token::Struct {
                    name: "HexCoordinate",
                    len: 2,
                },
                Token::Str("column"),
                Token::I32(3),
                Token::Str("row"),
                Token::I32(-1),
                Token::StructEnd,
            ],
        );
        assert_tokens(&HexDirection::ALL[2], &[Token::I32(2)]);
    }
}
