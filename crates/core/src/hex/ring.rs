//! Neighbor lookup and ring traversal. None of this depends on cell size or
//! scale, only on orientation, so it all hangs off [Orientation].

use crate::{
    error::ArgumentError,
    hex::{HexCoordinate, HexDirection, Orientation},
};

/// `(column, row)` steps for each direction, for cells on an even index of
/// the packed axis. Indexed by [HexDirection::index].
const HORIZONTAL_EVEN: [(i32, i32); 6] =
    [(0, -1), (1, -1), (1, 0), (0, 1), (-1, 0), (-1, -1)];
/// Odd columns sit half a cell lower, so the diagonal steps shift down
const HORIZONTAL_ODD: [(i32, i32); 6] =
    [(0, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0)];
const VERTICAL_EVEN: [(i32, i32); 6] =
    [(0, -1), (1, 0), (0, 1), (-1, 1), (-1, 0), (-1, -1)];
/// Odd rows sit half a cell to the right, so the diagonal steps shift right
const VERTICAL_ODD: [(i32, i32); 6] =
    [(1, -1), (1, 0), (1, 1), (0, 1), (-1, 0), (0, -1)];

/// Axial `(q, r)` vectors for each direction. These are constant (no parity),
/// which is what lets us jump straight to a ring's starting corner.
const HORIZONTAL_AXIAL: [(i32, i32); 6] =
    [(0, -1), (1, -1), (1, 0), (0, 1), (-1, 1), (-1, 0)];
const VERTICAL_AXIAL: [(i32, i32); 6] =
    [(1, -1), (1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1)];

impl Orientation {
    /// Get the cell adjacent to `coord` in the given direction. The step
    /// depends on the parity of the packed axis index (column for horizontal
    /// grids, row for vertical).
    pub fn neighbor(
        self,
        coord: HexCoordinate,
        direction: HexDirection,
    ) -> HexCoordinate {
        let table = match self {
            Self::Horizontal if coord.column & 1 == 0 => &HORIZONTAL_EVEN,
            Self::Horizontal => &HORIZONTAL_ODD,
            Self::Vertical if coord.row & 1 == 0 => &VERTICAL_EVEN,
            Self::Vertical => &VERTICAL_ODD,
        };
        let (dc, dr) = table[direction.index()];
        HexCoordinate::new(coord.column + dc, coord.row + dr)
    }

    /// Move `steps` cells in a straight line. This is computed in one shot via
    /// axial coordinates, rather than stepping one neighbor at a time.
    pub fn offset(
        self,
        coord: HexCoordinate,
        direction: HexDirection,
        steps: i32,
    ) -> HexCoordinate {
        let (dq, dr) = self.axial_vector(direction);
        let (q, r) = coord.to_axial(self);
        HexCoordinate::from_axial(self, q + dq * steps, r + dr * steps)
    }

    /// Number of single steps needed to get from one cell to the other
    pub fn distance(self, a: HexCoordinate, b: HexCoordinate) -> u32 {
        let (aq, ar) = a.to_axial(self);
        let (bq, br) = b.to_axial(self);
        let dq = (aq - bq).abs();
        let dr = (ar - br).abs();
        let ds = (aq + ar - bq - br).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Fill `buffer` with the ring of cells exactly `distance` steps from
    /// `center`, clockwise, starting from the cell `distance` steps away in
    /// direction 0. The buffer is cleared first, so it can be reused between
    /// calls to avoid allocating in hot loops.
    ///
    /// A distance of 0 gives just the center. Negative distances are an error,
    /// in which case the buffer is left untouched.
    pub fn ring_into(
        self,
        center: HexCoordinate,
        distance: i32,
        buffer: &mut Vec<HexCoordinate>,
    ) -> Result<(), ArgumentError> {
        if distance < 0 {
            return Err(ArgumentError::NegativeDistance(distance));
        }

        buffer.clear();
        if distance == 0 {
            buffer.push(center);
            return Ok(());
        }

        buffer.reserve(HexDirection::COUNT * distance as usize);
        let first = HexDirection::ALL[0];
        let mut cursor = self.offset(center, first, distance);
        // From the corner in direction `i`, walking in direction `i + 2` leads
        // to the next corner clockwise. Each step re-checks parity, which is
        // what keeps the legs straight on a staggered grid.
        for leg in 0..HexDirection::COUNT {
            let direction = first.rotate_clockwise(leg + 2);
            for _ in 0..distance {
                buffer.push(cursor);
                cursor = self.neighbor(cursor, direction);
            }
        }
        debug_assert_eq!(cursor, self.offset(center, first, distance));
        Ok(())
    }

    /// Allocating version of [Self::ring_into]
    pub fn ring(
        self,
        center: HexCoordinate,
        distance: i32,
    ) -> Result<Vec<HexCoordinate>, ArgumentError> {
        let mut buffer = Vec::new();
        self.ring_into(center, distance, &mut buffer)?;
        Ok(buffer)
    }

    /// All cells within `radius` steps of `center`, ring by ring outward. The
    /// result always has `3r² + 3r + 1` cells.
    pub fn spiral(
        self,
        center: HexCoordinate,
        radius: i32,
    ) -> Result<Vec<HexCoordinate>, ArgumentError> {
        if radius < 0 {
            return Err(ArgumentError::NegativeDistance(radius));
        }

        let r = radius as usize;
        let mut cells = Vec::with_capacity(3 * r * r + 3 * r + 1);
        let mut ring = Vec::new();
        for distance in 0..=radius {
            self.ring_into(center, distance, &mut ring)?;
            cells.extend_from_slice(&ring);
        }
        Ok(cells)
    }

    fn axial_vector(self, direction: HexDirection) -> (i32, i32) {
        match self {
            Self::Horizontal => HORIZONTAL_AXIAL[direction.index()],
            Self::Vertical => VERTICAL_AXIAL[direction.index()],
        }
    }
}
