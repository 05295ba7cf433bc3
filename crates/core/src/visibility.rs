//! Lazy enumeration of the cells in a viewport (or the whole grid).

use crate::{engine::GridSnapshot, geometry::Rect2D, hex::HexCoordinate};
use log::debug;
use std::{
    ops::Range,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

/// A shared flag that stops a [VisibleCells] enumeration early. Clones share
/// the same flag, so hand one clone to the iterator and keep another to cancel
/// from a different thread.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// An iterator over valid cells in a viewport, in row-major order (top row
/// first, left to right within each row). Cells are computed lazily as you
/// pull them, against the snapshot that was current when the iterator was
/// created.
///
/// The iterator is finite and can be restarted (or cloned) to enumerate the
/// same cells again. If a [CancellationToken] is attached, it's checked at the
/// start of each row; once cancelled, the iterator ends.
#[derive(Clone, Debug)]
pub struct VisibleCells {
    snapshot: Arc<GridSnapshot>,
    /// Viewport to cull against, and whether to use accurate culling. `None`
    /// means every valid cell is included.
    viewport: Option<(Rect2D, bool)>,
    columns: Range<i32>,
    rows: Range<i32>,
    /// Next cell to check
    cursor: HexCoordinate,
    cancellation: Option<CancellationToken>,
    cancelled: bool,
}

impl VisibleCells {
    /// Enumerate cells visible in the viewport. Only cells near the viewport
    /// are checked at all: convert its corners to hex coordinates, pad by one
    /// cell on each side (the corner conversion can land one cell off along
    /// the slanted edges and staggered lines), then clamp to the grid.
    pub(crate) fn in_viewport(
        snapshot: Arc<GridSnapshot>,
        viewport: Rect2D,
        accurate: bool,
    ) -> Self {
        let (column_count, row_count) = grid_size(&snapshot);
        let (columns, rows) = if viewport.is_empty() {
            (0..0, 0..0)
        } else {
            let top_left = snapshot.pixel_to_hex(viewport.left, viewport.top);
            let bottom_right =
                snapshot.pixel_to_hex(viewport.right(), viewport.bottom());
            (
                (top_left.column - 1).max(0)
                    ..(bottom_right.column.saturating_add(2)).min(column_count),
                (top_left.row - 1).max(0)
                    ..(bottom_right.row.saturating_add(2)).min(row_count),
            )
        };
        Self::new(snapshot, Some((viewport, accurate)), columns, rows)
    }

    /// Enumerate every valid cell in the grid
    pub(crate) fn all(snapshot: Arc<GridSnapshot>) -> Self {
        let (column_count, row_count) = grid_size(&snapshot);
        Self::new(snapshot, None, 0..column_count, 0..row_count)
    }

    fn new(
        snapshot: Arc<GridSnapshot>,
        viewport: Option<(Rect2D, bool)>,
        columns: Range<i32>,
        rows: Range<i32>,
    ) -> Self {
        debug!(
            "Enumerating columns {:?} x rows {:?} in viewport {:?}",
            columns, rows, viewport
        );
        Self {
            snapshot,
            viewport,
            cursor: HexCoordinate::new(columns.start, rows.start),
            columns,
            rows,
            cancellation: None,
            cancelled: false,
        }
    }

    /// Attach a token that can stop this enumeration from elsewhere
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Go back to the first cell. This doesn't reset a cancelled token; an
    /// iterator whose token is cancelled will end immediately again.
    pub fn restart(&mut self) {
        self.cursor = HexCoordinate::new(self.columns.start, self.rows.start);
        self.cancelled = false;
    }

    /// The columns being checked. Every cell yielded is in this range, but not
    /// every cell in the range is yielded.
    pub fn columns(&self) -> Range<i32> {
        self.columns.clone()
    }

    /// The rows being checked. See [Self::columns].
    pub fn rows(&self) -> Range<i32> {
        self.rows.clone()
    }

    /// Should the cell be yielded?
    fn accepts(&self, coord: HexCoordinate) -> bool {
        let valid = match self.snapshot.model() {
            Some(model) => model.contains(coord),
            None => false,
        };
        valid
            && self.viewport.map_or(true, |(viewport, accurate)| {
                self.snapshot.is_visible(coord, &viewport, accurate)
            })
    }
}

impl Iterator for VisibleCells {
    type Item = HexCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.columns.is_empty() {
            return None;
        }

        while !self.cancelled && self.rows.contains(&self.cursor.row) {
            let coord = self.cursor;
            if coord.column == self.columns.start {
                if let Some(token) = &self.cancellation {
                    if token.is_cancelled() {
                        debug!("Enumeration cancelled at row {}", coord.row);
                        self.cancelled = true;
                        break;
                    }
                }
            }

            // Advance first, so the cursor always points at the next unchecked
            // cell
            self.cursor.column += 1;
            if self.cursor.column >= self.columns.end {
                self.cursor = HexCoordinate::new(self.columns.start, coord.row + 1);
            }

            if self.accepts(coord) {
                return Some(coord);
            }
        }
        None
    }
}

/// Column and row counts of the bound model, as `i32`s. Zero without a model.
fn grid_size(snapshot: &GridSnapshot) -> (i32, i32) {
    let clamp = |count: u32| i32::try_from(count).unwrap_or(i32::MAX);
    match snapshot.model() {
        Some(model) => (clamp(model.column_count()), clamp(model.row_count())),
        None => (0, 0),
    }
}
