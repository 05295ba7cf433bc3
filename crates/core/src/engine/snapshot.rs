use crate::{
    error::{ArgumentError, ConfigError},
    geometry::{
        point_in_convex_polygon, point_in_triangle, segment_intersects_rect,
        Point2D, Rect2D,
    },
    hex::{
        HexCoordinate, HexDirection, Orientation, OrientationConfig,
        ScaledGeometry,
    },
    model::GridModel,
    visibility::VisibleCells,
};
use std::{fmt, sync::Arc};

/// An immutable view of the engine's full configuration: cell geometry,
/// scale, and the bound grid model. Every coordinate query is answered from a
/// snapshot, so a query never sees half of a reconfiguration.
///
/// Grab one with [CoordinateEngine::snapshot](crate::CoordinateEngine::snapshot)
/// when you need to run many queries against the same configuration (e.g. a
/// whole frame of drawing). The methods on [CoordinateEngine](crate::CoordinateEngine)
/// are shorthand for grabbing a fresh snapshot and calling the same method on
/// it.
#[derive(Clone)]
pub struct GridSnapshot {
    config: OrientationConfig,
    scaled: ScaledGeometry,
    model: Option<Arc<dyn GridModel>>,
}

/// Scaled lengths, expressed along the packed/stagger axes instead of x/y.
/// Vertical grids are transposed horizontal grids, so this lets one
/// implementation of the pixel math cover both.
#[derive(Copy, Clone, Debug)]
struct Axes {
    /// Cell size along the packed axis
    packed_size: f32,
    /// Cell size along the stagger axis
    stagger_size: f32,
    edge_offset: f32,
    half_side: f32,
}

impl GridSnapshot {
    pub(crate) fn new(
        config: OrientationConfig,
        scale_x: f32,
        scale_y: f32,
    ) -> Result<Self, ConfigError> {
        let scaled = ScaledGeometry::new(&config, scale_x, scale_y)?;
        Ok(Self {
            config,
            scaled,
            model: None,
        })
    }

    /// Copy of this snapshot with new cell geometry, keeping the current scale
    /// and model
    pub(crate) fn with_config(
        &self,
        config: OrientationConfig,
    ) -> Result<Self, ConfigError> {
        let scaled = ScaledGeometry::new(
            &config,
            self.scaled.scale_x(),
            self.scaled.scale_y(),
        )?;
        Ok(Self {
            config,
            scaled,
            model: self.model.clone(),
        })
    }

    /// Copy of this snapshot under a new scale
    pub(crate) fn with_scale(
        &self,
        scale_x: f32,
        scale_y: f32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            config: self.config,
            scaled: ScaledGeometry::new(&self.config, scale_x, scale_y)?,
            model: self.model.clone(),
        })
    }

    /// Copy of this snapshot bound to a different model (or none)
    pub(crate) fn with_model(&self, model: Option<Arc<dyn GridModel>>) -> Self {
        Self {
            config: self.config,
            scaled: self.scaled,
            model,
        }
    }

    /// The unscaled cell geometry
    pub fn config(&self) -> &OrientationConfig {
        &self.config
    }

    /// The cell geometry under the current scale. All pixel values produced by
    /// this snapshot are in this space.
    pub fn scaled(&self) -> &ScaledGeometry {
        &self.scaled
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation()
    }

    /// The bound grid model, if any
    pub fn model(&self) -> Option<&Arc<dyn GridModel>> {
        self.model.as_ref()
    }

    fn axes(&self) -> Axes {
        let s = &self.scaled;
        let (packed_size, stagger_size) = match self.orientation() {
            Orientation::Horizontal => (s.cell_width(), s.cell_height()),
            Orientation::Vertical => (s.cell_height(), s.cell_width()),
        };
        Axes {
            packed_size,
            stagger_size,
            edge_offset: s.edge_offset(),
            half_side: s.half_side(),
        }
    }

    /// Shift along the stagger axis for cells at the given packed axis index.
    /// Odd indices (including -1) are shifted by the half side.
    fn stagger_offset(&self, packed_index: i32) -> f32 {
        if packed_index & 1 == 1 {
            self.scaled.half_side()
        } else {
            0.0
        }
    }

    // ===== Hex -> pixel =====

    /// Get the top-left corner of a cell's bounding box, in scaled pixel space
    pub fn origin_of(&self, column: i32, row: i32) -> Point2D {
        let axes = self.axes();
        let step = axes.packed_size - axes.edge_offset;
        match self.orientation() {
            Orientation::Horizontal => Point2D::new(
                column as f32 * step,
                row as f32 * axes.stagger_size + self.stagger_offset(column),
            ),
            Orientation::Vertical => Point2D::new(
                column as f32 * axes.stagger_size + self.stagger_offset(row),
                row as f32 * step,
            ),
        }
    }

    /// Get the center of a cell's bounding box (which is also the center of
    /// the hexagon), in scaled pixel space
    pub fn center_of(&self, coord: HexCoordinate) -> Point2D {
        self.origin_of(coord.column, coord.row)
            + Point2D::new(
                self.scaled.cell_width() / 2.0,
                self.scaled.cell_height() / 2.0,
            )
    }

    /// Get the six corners of a cell's hexagon, clockwise, in scaled pixel
    /// space. See [OrientationConfig] for the corner order.
    pub fn corners_of(&self, coord: HexCoordinate) -> [Point2D; 6] {
        let origin = self.origin_of(coord.column, coord.row);
        let mut corners = *self.scaled.corners();
        for corner in &mut corners {
            *corner += origin;
        }
        corners
    }

    /// Does the given cell's hexagon contain the pixel? The boundary counts as
    /// inside, so a pixel exactly on a shared edge is contained by both cells.
    /// Use [Self::pixel_to_hex] when you need exactly one answer.
    pub fn contains_point(&self, coord: HexCoordinate, x: f32, y: f32) -> bool {
        point_in_convex_polygon(&self.corners_of(coord), x, y)
    }

    // ===== Pixel -> hex =====

    /// Get the column of the cell covering the pixel. Returns `-1` for any
    /// pixel left of the grid (`x < 0`).
    pub fn column_of(&self, x: f32, y: f32) -> i32 {
        match self.orientation() {
            Orientation::Horizontal => self.packed_index(x, y),
            Orientation::Vertical => {
                let row = self.packed_index(y, x);
                self.stagger_index(row, x)
            }
        }
    }

    /// Get the row of the cell covering the pixel. Returns `-1` for any pixel
    /// above the grid (`y < 0`).
    pub fn row_of(&self, x: f32, y: f32) -> i32 {
        match self.orientation() {
            Orientation::Horizontal => {
                let column = self.packed_index(x, y);
                self.stagger_index(column, y)
            }
            Orientation::Vertical => self.packed_index(y, x),
        }
    }

    /// Get the cell covering the pixel. Every pixel maps to exactly one cell.
    /// A pixel exactly on a slanted edge belongs to the cell whose near-side
    /// wedge it touches. Pixels with a negative coordinate get the `-1`
    /// sentinel on that axis, but the other axis is still resolved.
    pub fn pixel_to_hex(&self, x: f32, y: f32) -> HexCoordinate {
        match self.orientation() {
            Orientation::Horizontal => {
                let column = self.packed_index(x, y);
                HexCoordinate::new(column, self.stagger_index(column, y))
            }
            Orientation::Vertical => {
                let row = self.packed_index(y, x);
                HexCoordinate::new(self.stagger_index(row, x), row)
            }
        }
    }

    /// Resolve the index along the packed axis (column for horizontal grids,
    /// row for vertical) for a pixel at `(u, v)`, where `u` is the packed axis
    /// coordinate and `v` the stagger axis coordinate.
    ///
    /// Dividing by the step (cell size minus edge offset) gives the right
    /// answer everywhere except the slanted band at the start of each step,
    /// where two cells overlap. There we find the one candidate cell in this
    /// index whose wedge could hold the pixel, and if the pixel isn't in that
    /// wedge it belongs to the previous index.
    fn packed_index(&self, u: f32, v: f32) -> i32 {
        if u < 0.0 {
            return HexCoordinate::SENTINEL;
        }

        let axes = self.axes();
        let step = axes.packed_size - axes.edge_offset;
        let index = (u / step).floor() as i32;
        let local_u = u - index as f32 * step;
        if local_u >= axes.edge_offset {
            return index;
        }

        // In the overlap band. Find the candidate cell along the stagger axis
        // (using this index's stagger) and test against its near-side wedge.
        let stagger = self.stagger_offset(index);
        let line = ((v - stagger) / axes.stagger_size).floor();
        let local_v = v - (line * axes.stagger_size + stagger);
        let [a, b, c] = self.near_wedge();
        if point_in_triangle(a, b, c, local_u, local_v) {
            index
        } else {
            index - 1
        }
    }

    /// Resolve the index along the stagger axis, once the packed index is
    /// known. The edges perpendicular to the stagger axis are straight, so
    /// this is just a division after removing the stagger.
    fn stagger_index(&self, packed_index: i32, v: f32) -> i32 {
        if v < 0.0 {
            return HexCoordinate::SENTINEL;
        }
        let v = v - self.stagger_offset(packed_index);
        (v / self.axes().stagger_size).floor() as i32
    }

    /// The triangle between a cell's slanted near-side edges, in local
    /// `(packed, stagger)` coordinates. For horizontal grids this is the left
    /// point of the hexagon, for vertical grids the top point.
    fn near_wedge(&self) -> [Point2D; 3] {
        let [c0, c1, _, _, c4, c5] = *self.scaled.corners();
        match self.orientation() {
            Orientation::Horizontal => [c5, c0, c4],
            Orientation::Vertical => {
                [c5.transpose(), c0.transpose(), c1.transpose()]
            }
        }
    }

    // ===== Neighbors =====

    /// Get the cell adjacent to `coord` in the given direction (`0..=5`,
    /// clockwise). See [HexDirection] for what each index means. Fails for
    /// directions outside `0..=5`.
    pub fn nearest_neighbor(
        &self,
        coord: HexCoordinate,
        direction: i32,
    ) -> Result<HexCoordinate, ArgumentError> {
        Ok(self.neighbor(coord, HexDirection::new(direction)?))
    }

    /// Get the cell adjacent to `coord` in the given direction
    pub fn neighbor(
        &self,
        coord: HexCoordinate,
        direction: HexDirection,
    ) -> HexCoordinate {
        self.orientation().neighbor(coord, direction)
    }

    /// Get the ring of cells exactly `distance` steps from `center`, clockwise.
    /// See [Orientation::ring_into].
    pub fn ring(
        &self,
        center: HexCoordinate,
        distance: i32,
    ) -> Result<Vec<HexCoordinate>, ArgumentError> {
        self.orientation().ring(center, distance)
    }

    /// Reusable-buffer version of [Self::ring]
    pub fn ring_into(
        &self,
        center: HexCoordinate,
        distance: i32,
        buffer: &mut Vec<HexCoordinate>,
    ) -> Result<(), ArgumentError> {
        self.orientation().ring_into(center, distance, buffer)
    }

    /// All cells within `radius` steps of `center`, ring by ring
    pub fn spiral(
        &self,
        center: HexCoordinate,
        radius: i32,
    ) -> Result<Vec<HexCoordinate>, ArgumentError> {
        self.orientation().spiral(center, radius)
    }

    /// Number of steps between two cells
    pub fn distance(&self, a: HexCoordinate, b: HexCoordinate) -> u32 {
        self.orientation().distance(a, b)
    }

    // ===== Visibility =====

    /// Is any part of the cell visible within the viewport rectangle?
    ///
    /// The fast check only compares the cell's bounding box, so it can
    /// over-include cells whose bounding box corner pokes into the viewport
    /// while the hexagon itself doesn't. The accurate check follows the actual
    /// hexagon outline. A cell that passes the accurate check always passes
    /// the fast one.
    pub fn is_visible(
        &self,
        coord: HexCoordinate,
        viewport: &Rect2D,
        accurate: bool,
    ) -> bool {
        let origin = self.origin_of(coord.column, coord.row);
        let bounds = Rect2D::new(
            origin.x,
            origin.y,
            self.scaled.cell_width(),
            self.scaled.cell_height(),
        );
        if !bounds.intersects(viewport) {
            return false;
        }
        if !accurate {
            return true;
        }

        // The bounding box minus the slanted bands is entirely inside the
        // hexagon
        let edge_offset = self.scaled.edge_offset();
        let inner = match self.orientation() {
            Orientation::Horizontal => bounds.inset(edge_offset, 0.0),
            Orientation::Vertical => bounds.inset(0.0, edge_offset),
        };
        if inner.intersects(viewport) {
            return true;
        }

        // Only the corner wedges are left. Check the four slanted edges.
        let corners = self.corners_of(coord);
        let slanted_edges: [(usize, usize); 4] = match self.orientation() {
            Orientation::Horizontal => [(5, 0), (1, 2), (2, 3), (4, 5)],
            Orientation::Vertical => [(5, 0), (0, 1), (2, 3), (3, 4)],
        };
        if slanted_edges.iter().any(|&(from, to)| {
            segment_intersects_rect(corners[from], corners[to], viewport)
        }) {
            return true;
        }

        // No edge crosses the viewport, so it's either entirely outside the
        // hexagon or entirely inside one of the wedges
        let center = viewport.center();
        point_in_convex_polygon(&corners, center.x, center.y)
    }

    /// Lazily enumerate every valid cell that's visible in the viewport,
    /// row by row. See [VisibleCells]. Without a bound model this is empty.
    pub fn enumerate_visible(
        self: Arc<Self>,
        viewport: Rect2D,
        accurate: bool,
    ) -> VisibleCells {
        VisibleCells::in_viewport(self, viewport, accurate)
    }

    /// Lazily enumerate every valid cell in the grid, row by row. Without a
    /// bound model this is empty.
    pub fn cells(self: Arc<Self>) -> VisibleCells {
        VisibleCells::all(self)
    }

    /// The bounding box of the whole grid at the current scale. This is the
    /// full pixel size needed to draw every cell. Zero without a model or for
    /// an empty model.
    pub fn visible_extent(&self) -> Rect2D {
        let (columns, rows) = match &self.model {
            Some(model) => (model.column_count(), model.row_count()),
            None => (0, 0),
        };
        if columns == 0 || rows == 0 {
            return Rect2D::default();
        }

        let axes = self.axes();
        let step = axes.packed_size - axes.edge_offset;
        let (packed_count, stagger_count) = match self.orientation() {
            Orientation::Horizontal => (columns, rows),
            Orientation::Vertical => (rows, columns),
        };
        let packed_length =
            (packed_count - 1) as f32 * step + axes.packed_size;
        let mut stagger_length = stagger_count as f32 * axes.stagger_size;
        // Only staggered if there's at least one odd index
        if packed_count > 1 {
            stagger_length += axes.half_side;
        }

        match self.orientation() {
            Orientation::Horizontal => {
                Rect2D::new(0.0, 0.0, packed_length, stagger_length)
            }
            Orientation::Vertical => {
                Rect2D::new(0.0, 0.0, stagger_length, packed_length)
            }
        }
    }
}

impl fmt::Debug for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridSnapshot")
            .field("config", &self.config)
            .field("scaled", &self.scaled)
            .field(
                "model",
                &self
                    .model
                    .as_ref()
                    .map(|model| (model.column_count(), model.row_count())),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundedGrid;
    use assert_approx_eq::assert_approx_eq;
    use strum::IntoEnumIterator;

    fn c(column: i32, row: i32) -> HexCoordinate {
        HexCoordinate::new(column, row)
    }

    fn make_snapshot(
        width: f32,
        height: f32,
        orientation: Orientation,
    ) -> GridSnapshot {
        let config =
            OrientationConfig::new(width, height, 0.22, orientation).unwrap();
        GridSnapshot::new(config, 1.0, 1.0).unwrap()
    }

    #[test]
    fn test_origin_horizontal() {
        let snapshot = make_snapshot(32.0, 16.0, Orientation::Horizontal);
        assert_eq!(snapshot.origin_of(0, 0), Point2D::new(0.0, 0.0));
        assert_eq!(snapshot.origin_of(1, 0), Point2D::new(25.0, 8.0));
        assert_eq!(snapshot.origin_of(2, 3), Point2D::new(50.0, 48.0));
        assert_eq!(snapshot.origin_of(-1, 0), Point2D::new(-25.0, 8.0));
        assert_eq!(snapshot.center_of(c(1, 0)), Point2D::new(41.0, 16.0));
    }

    #[test]
    fn test_origin_vertical() {
        let snapshot = make_snapshot(20.0, 20.0, Orientation::Vertical);
        assert_eq!(snapshot.origin_of(0, 0), Point2D::new(0.0, 0.0));
        assert_eq!(snapshot.origin_of(0, 1), Point2D::new(10.0, 16.0));
        assert_eq!(snapshot.origin_of(3, 2), Point2D::new(60.0, 32.0));
    }

    #[test]
    fn test_pixel_to_hex_horizontal() {
        let snapshot = make_snapshot(32.0, 16.0, Orientation::Horizontal);
        assert_eq!(snapshot.pixel_to_hex(0.0, 0.0), c(-1, -1));
        assert_eq!(snapshot.pixel_to_hex(16.0, 8.0), c(0, 0));
        assert_eq!(snapshot.pixel_to_hex(48.0, 16.0), c(1, 0));
        assert_eq!(snapshot.pixel_to_hex(16.0, 24.0), c(0, 1));

        // Either side of the slanted edge between (0, 0) and (1, 0)
        assert_eq!(snapshot.pixel_to_hex(26.0, 14.0), c(0, 0));
        assert_eq!(snapshot.pixel_to_hex(26.0, 16.0), c(1, 0));
        // Top-right corner of (0, 0)'s box is in the shifted column's row -1
        assert_eq!(snapshot.pixel_to_hex(31.0, 2.0), c(1, -1));
        // Lower-left band of column 1 belongs to column 0's next row
        assert_eq!(snapshot.pixel_to_hex(26.0, 23.0), c(0, 1));

        assert_eq!(snapshot.column_of(48.0, 16.0), 1);
        assert_eq!(snapshot.row_of(48.0, 16.0), 0);
    }

    #[test]
    fn test_pixel_to_hex_vertical() {
        let snapshot = make_snapshot(20.0, 20.0, Orientation::Vertical);
        assert_eq!(snapshot.pixel_to_hex(10.0, 10.0), c(0, 0));
        // Top-left corner is outside cell (0, 0), in the row above
        assert_eq!(snapshot.pixel_to_hex(0.0, 0.0), c(-1, -1));
        assert_eq!(snapshot.pixel_to_hex(19.0, 1.0), c(0, -1));
        // Row 1 is shifted right by half a cell
        assert_eq!(snapshot.pixel_to_hex(12.0, 26.0), c(0, 1));
        assert_eq!(snapshot.pixel_to_hex(8.0, 26.0), c(-1, 1));
        assert_eq!(snapshot.column_of(8.0, 26.0), -1);
        assert_eq!(snapshot.row_of(8.0, 26.0), 1);
    }

    #[test]
    fn test_sentinels() {
        for orientation in Orientation::iter() {
            let snapshot = make_snapshot(24.0, 24.0, orientation);
            for &(x, y) in &[(-0.5, 40.0), (-100.0, 3.0), (-1.0, -1.0)] {
                assert_eq!(snapshot.column_of(x, y), -1);
                assert_eq!(snapshot.pixel_to_hex(x, y).column, -1);
            }
            for &(x, y) in &[(40.0, -0.5), (3.0, -100.0)] {
                assert_eq!(snapshot.row_of(x, y), -1);
                assert_eq!(snapshot.pixel_to_hex(x, y).row, -1);
            }
        }
    }

    #[test]
    fn test_center_round_trip() {
        for orientation in Orientation::iter() {
            for &(width, height) in &[(32.0, 16.0), (20.0, 20.0), (15.0, 31.0)]
            {
                let config =
                    OrientationConfig::new(width, height, 0.22, orientation)
                        .unwrap();
                for &(scale_x, scale_y) in &[(1.0, 1.0), (2.5, 0.75)] {
                    let snapshot =
                        GridSnapshot::new(config, scale_x, scale_y).unwrap();
                    for column in 0..12 {
                        for row in 0..12 {
                            let center = snapshot.center_of(c(column, row));
                            assert_eq!(
                                snapshot.pixel_to_hex(center.x, center.y),
                                c(column, row),
                                "{:?} at scale ({}, {})",
                                config,
                                scale_x,
                                scale_y
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_nearest_neighbor() {
        let snapshot = make_snapshot(32.0, 16.0, Orientation::Horizontal);
        assert_eq!(snapshot.nearest_neighbor(c(2, 2), 1), Ok(c(3, 1)));
        assert_eq!(
            snapshot.nearest_neighbor(c(2, 2), 6),
            Err(ArgumentError::InvalidDirection(6))
        );
        assert_eq!(
            snapshot.nearest_neighbor(c(2, 2), -1),
            Err(ArgumentError::InvalidDirection(-1))
        );
    }

    #[test]
    fn test_visibility_horizontal() {
        let snapshot = make_snapshot(32.0, 16.0, Orientation::Horizontal);
        let cell = c(0, 0);

        // Far away
        let viewport = Rect2D::new(100.0, 100.0, 10.0, 10.0);
        assert!(!snapshot.is_visible(cell, &viewport, false));
        assert!(!snapshot.is_visible(cell, &viewport, true));

        // Middle of the hexagon
        let viewport = Rect2D::new(10.0, 5.0, 4.0, 4.0);
        assert!(snapshot.is_visible(cell, &viewport, false));
        assert!(snapshot.is_visible(cell, &viewport, true));

        // Top-left corner of the bounding box, outside the hexagon
        let viewport = Rect2D::new(0.0, 0.0, 2.0, 2.0);
        assert!(snapshot.is_visible(cell, &viewport, false));
        assert!(!snapshot.is_visible(cell, &viewport, true));

        // Crosses the slanted edge
        let viewport = Rect2D::new(1.0, 3.0, 3.0, 3.0);
        assert!(snapshot.is_visible(cell, &viewport, true));

        // Tiny viewport entirely inside the left wedge
        let viewport = Rect2D::new(2.0, 7.5, 1.0, 1.0);
        assert!(snapshot.is_visible(cell, &viewport, true));
    }

    #[test]
    fn test_visibility_vertical() {
        let snapshot = make_snapshot(20.0, 20.0, Orientation::Vertical);
        let cell = c(0, 0);
        // Top-right corner of the bounding box, outside the hexagon
        let viewport = Rect2D::new(18.0, 0.0, 2.0, 1.0);
        assert!(snapshot.is_visible(cell, &viewport, false));
        assert!(!snapshot.is_visible(cell, &viewport, true));
        // Straddles the top point
        let viewport = Rect2D::new(8.0, 0.0, 4.0, 2.0);
        assert!(snapshot.is_visible(cell, &viewport, true));
    }

    #[test]
    fn test_visible_extent() {
        let snapshot = make_snapshot(32.0, 16.0, Orientation::Horizontal);
        assert_eq!(snapshot.visible_extent(), Rect2D::default());

        let snapshot =
            snapshot.with_model(Some(Arc::new(BoundedGrid::new(4, 3))));
        let extent = snapshot.visible_extent();
        // 3 steps of 25 plus one full cell, 3 rows plus the odd-column shift
        assert_approx_eq!(extent.width, 107.0);
        assert_approx_eq!(extent.height, 56.0);

        let snapshot = snapshot.with_model(Some(Arc::new(BoundedGrid::new(1, 3))));
        assert_approx_eq!(snapshot.visible_extent().height, 48.0);

        let config =
            OrientationConfig::new(20.0, 20.0, 0.22, Orientation::Vertical)
                .unwrap();
        let snapshot = GridSnapshot::new(config, 2.0, 1.0)
            .unwrap()
            .with_model(Some(Arc::new(BoundedGrid::new(5, 2))));
        let extent = snapshot.visible_extent();
        // 5 columns of 40 plus the odd-row shift of 20
        assert_approx_eq!(extent.width, 220.0);
        // One step of 16 plus one full cell
        assert_approx_eq!(extent.height, 36.0);
    }
}
