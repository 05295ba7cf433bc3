use crate::hex::{HexCoordinate, HexCoordinateSet};

/// The data source behind a grid. The engine only needs to know how big the
/// grid is and which cells actually exist; everything else about the cells
/// (values, layers, colors) is none of its business.
///
/// Implementations are shared with the engine behind an `Arc`, and may be read
/// from several threads at once, so they must be `Send + Sync`. The engine
/// never mutates a model.
pub trait GridModel: Send + Sync {
    /// Number of columns in the grid
    fn column_count(&self) -> u32;

    /// Number of rows in the grid
    fn row_count(&self) -> u32;

    /// Does the given cell exist? By default, any cell within the grid's
    /// bounds is valid. Override this for grids with holes or irregular
    /// shapes. This must never return `true` for out-of-bounds coordinates.
    fn is_valid(&self, column: i32, row: i32) -> bool {
        self.in_bounds(column, row)
    }

    /// Is the cell within the rectangular extent of the grid?
    fn in_bounds(&self, column: i32, row: i32) -> bool {
        column >= 0
            && row >= 0
            && (column as u32) < self.column_count()
            && (row as u32) < self.row_count()
    }

    /// [Self::is_valid] for a coordinate
    fn contains(&self, coord: HexCoordinate) -> bool {
        self.is_valid(coord.column, coord.row)
    }
}

/// A rectangular grid, optionally with some cells knocked out
#[derive(Clone, Debug, Default)]
pub struct BoundedGrid {
    columns: u32,
    rows: u32,
    /// Cells within the bounds that don't exist
    holes: HexCoordinateSet,
}

impl BoundedGrid {
    /// Create a grid where every cell in the bounds is valid
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            holes: HexCoordinateSet::default(),
        }
    }

    /// Mark the given cells as invalid
    pub fn with_holes(
        mut self,
        holes: impl IntoIterator<Item = HexCoordinate>,
    ) -> Self {
        self.holes.extend(holes);
        self
    }

    /// The cells that have been knocked out of this grid
    pub fn holes(&self) -> &HexCoordinateSet {
        &self.holes
    }
}

impl GridModel for BoundedGrid {
    fn column_count(&self) -> u32 {
        self.columns
    }

    fn row_count(&self) -> u32 {
        self.rows
    }

    fn is_valid(&self, column: i32, row: i32) -> bool {
        self.in_bounds(column, row)
            && !self.holes.contains(&HexCoordinate::new(column, row))
    }
}
