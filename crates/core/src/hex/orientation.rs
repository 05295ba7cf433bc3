//! Per-orientation geometry of a single cell: its six corners and the two
//! constants (edge offset and half side) that all the grid math is based on.

use crate::{error::ConfigError, geometry::Point2D};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Which way the hexagons point. This determines which axis the cells are
/// packed along (overlapping by the edge offset) and which axis staggers by
/// half a cell on every other index.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    /// Flat-topped hexagons. Columns are packed along the x axis, and odd
    /// columns are shifted down by half a cell.
    Horizontal,
    /// Pointy-topped hexagons. Rows are packed along the y axis, and odd rows
    /// are shifted right by half a cell.
    Vertical,
}

impl Orientation {
    /// Parse an orientation from its name (`horizontal` or `vertical`)
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        name.parse()
            .map_err(|_| ConfigError::UnsupportedOrientation(name.to_owned()))
    }
}

impl TryFrom<i32> for Orientation {
    type Error = ConfigError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::Horizontal),
            1 => Ok(Self::Vertical),
            _ => Err(ConfigError::UnsupportedOrientation(index.to_string())),
        }
    }
}

/// The unscaled geometry of one cell, derived from the cell size, form factor,
/// and orientation. This is immutable; any change in input means building a
/// whole new config.
///
/// Corners are indexed clockwise. For [Orientation::Horizontal], corners 0 and
/// 1 form the top edge, 2 is the right point, 3 and 4 form the bottom edge, and
/// 5 is the left point. For [Orientation::Vertical], 0 is the top point, 1 and
/// 2 form the right edge, 3 is the bottom point, and 4 and 5 form the left
/// edge. All corners are relative to the cell's origin (top-left of its
/// bounding box).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientationConfig {
    cell_width: f32,
    cell_height: f32,
    form_factor: f32,
    orientation: Orientation,
    corners: [Point2D; 6],
    edge_offset: f32,
    half_side: f32,
}

impl OrientationConfig {
    /// Form factor used when none is given. This gives hexagons that look
    /// about regular for roughly square cells.
    pub const DEFAULT_FORM_FACTOR: f32 = 0.22;

    /// Derive the geometry of a cell. Fails if either dimension is below one
    /// pixel, or if the form factor would make a non-convex hexagon.
    pub fn new(
        cell_width: f32,
        cell_height: f32,
        form_factor: f32,
        orientation: Orientation,
    ) -> Result<Self, ConfigError> {
        // Written this way so NaN is rejected too
        if !(cell_width >= 1.0 && cell_height >= 1.0) {
            return Err(ConfigError::InvalidCellSize {
                width: cell_width,
                height: cell_height,
            });
        }

        let invalid_form_factor = || ConfigError::InvalidFormFactor {
            coefficient: form_factor,
            width: cell_width,
            height: cell_height,
        };
        if !(0.0..0.5).contains(&form_factor) {
            return Err(invalid_form_factor());
        }

        let (packed_size, stagger_size) = match orientation {
            Orientation::Horizontal => (cell_width, cell_height),
            Orientation::Vertical => (cell_height, cell_width),
        };
        let edge_offset = (packed_size * form_factor).round();
        let half_side = (stagger_size / 2.0).round();
        // Rounding can push the offset past the midpoint for small or
        // fractional cells, which would fold the hexagon over itself
        if edge_offset * 2.0 > packed_size {
            return Err(invalid_form_factor());
        }

        let corners = match orientation {
            Orientation::Horizontal => {
                let c0 = Point2D::new(edge_offset, 0.0);
                let c1 = Point2D::new(cell_width - edge_offset, c0.y);
                let c2 = Point2D::new(cell_width, half_side);
                let c3 = Point2D::new(c1.x, cell_height);
                let c4 = Point2D::combine(c0, c3);
                let c5 = Point2D::new(0.0, c2.y);
                [c0, c1, c2, c3, c4, c5]
            }
            Orientation::Vertical => {
                let c0 = Point2D::new(half_side, 0.0);
                let c1 = Point2D::new(cell_width, edge_offset);
                let c2 = Point2D::new(c1.x, cell_height - edge_offset);
                let c3 = Point2D::new(c0.x, cell_height);
                let c4 = Point2D::new(0.0, c2.y);
                let c5 = Point2D::combine(c4, c1);
                [c0, c1, c2, c3, c4, c5]
            }
        };

        Ok(Self {
            cell_width,
            cell_height,
            form_factor,
            orientation,
            corners,
            edge_offset,
            half_side,
        })
    }

    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    pub fn form_factor(&self) -> f32 {
        self.form_factor
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The six unscaled corners, clockwise. See the struct docs for indexing.
    pub fn corners(&self) -> &[Point2D; 6] {
        &self.corners
    }

    /// How far the slanted edges reach into the cell along the packed axis.
    /// Adjacent cells along the packed axis overlap by exactly this much.
    pub fn edge_offset(&self) -> f32 {
        self.edge_offset
    }

    /// Half the cell size on the stagger axis (rounded). Every other cell along
    /// the packed axis is shifted by this much.
    pub fn half_side(&self) -> f32 {
        self.half_side
    }
}

/// An [OrientationConfig] under a particular (non-uniform) scale. This is what
/// the engine actually computes with. Like the unscaled config, it's rebuilt
/// wholesale whenever anything changes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaledGeometry {
    scale_x: f32,
    scale_y: f32,
    cell_width: f32,
    cell_height: f32,
    corners: [Point2D; 6],
    edge_offset: f32,
    half_side: f32,
}

impl ScaledGeometry {
    /// Scale the given config. Both factors must be strictly positive.
    pub fn new(
        config: &OrientationConfig,
        scale_x: f32,
        scale_y: f32,
    ) -> Result<Self, ConfigError> {
        if !(scale_x > 0.0 && scale_y > 0.0) {
            return Err(ConfigError::InvalidScale { scale_x, scale_y });
        }

        // The edge offset lives on the packed axis and the half side on the
        // stagger axis, so which factor applies depends on orientation
        let (edge_scale, half_scale) = match config.orientation {
            Orientation::Horizontal => (scale_x, scale_y),
            Orientation::Vertical => (scale_y, scale_x),
        };

        let mut corners = config.corners;
        for corner in &mut corners {
            *corner = corner.scale(scale_x, scale_y);
        }

        Ok(Self {
            scale_x,
            scale_y,
            cell_width: config.cell_width * scale_x,
            cell_height: config.cell_height * scale_y,
            corners,
            edge_offset: config.edge_offset * edge_scale,
            half_side: config.half_side * half_scale,
        })
    }

    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    pub fn corners(&self) -> &[Point2D; 6] {
        &self.corners
    }

    pub fn edge_offset(&self) -> f32 {
        self.edge_offset
    }

    pub fn half_side(&self) -> f32 {
        self.half_side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn p(x: f32, y: f32) -> Point2D {
        Point2D::new(x, y)
    }

    #[test]
    fn test_horizontal_corners() {
        let config =
            OrientationConfig::new(32.0, 16.0, 0.22, Orientation::Horizontal)
                .unwrap();
        // 32 * 0.22 = 7.04
        assert_eq!(config.edge_offset(), 7.0);
        assert_eq!(config.half_side(), 8.0);
        assert_eq!(
            config.corners(),
            &[
                p(7.0, 0.0),
                p(25.0, 0.0),
                p(32.0, 8.0),
                p(25.0, 16.0),
                p(7.0, 16.0),
                p(0.0, 8.0),
            ]
        );
    }

    #[test]
    fn test_vertical_corners() {
        let config =
            OrientationConfig::new(20.0, 20.0, 0.22, Orientation::Vertical)
                .unwrap();
        // 20 * 0.22 = 4.4
        assert_eq!(config.edge_offset(), 4.0);
        assert_eq!(config.half_side(), 10.0);
        assert_eq!(
            config.corners(),
            &[
                p(10.0, 0.0),
                p(20.0, 4.0),
                p(20.0, 16.0),
                p(10.0, 20.0),
                p(0.0, 16.0),
                p(0.0, 4.0),
            ]
        );
    }

    #[test]
    fn test_invalid_config() {
        assert_eq!(
            OrientationConfig::new(0.5, 16.0, 0.22, Orientation::Horizontal),
            Err(ConfigError::InvalidCellSize {
                width: 0.5,
                height: 16.0
            })
        );
        assert!(matches!(
            OrientationConfig::new(16.0, f32::NAN, 0.22, Orientation::Vertical),
            Err(ConfigError::InvalidCellSize { .. })
        ));
        assert!(matches!(
            OrientationConfig::new(16.0, 16.0, 0.5, Orientation::Vertical),
            Err(ConfigError::InvalidFormFactor { .. })
        ));
        assert!(matches!(
            OrientationConfig::new(16.0, 16.0, -0.1, Orientation::Horizontal),
            Err(ConfigError::InvalidFormFactor { .. })
        ));
        // Rounds to an edge offset of 2, which is past the middle of the cell
        assert!(matches!(
            OrientationConfig::new(3.2, 16.0, 0.49, Orientation::Horizontal),
            Err(ConfigError::InvalidFormFactor { .. })
        ));
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!(
            Orientation::from_name("vertical"),
            Ok(Orientation::Vertical)
        );
        assert_eq!(Orientation::Horizontal.to_string(), "horizontal");
        assert_eq!(
            Orientation::from_name("diagonal"),
            Err(ConfigError::UnsupportedOrientation("diagonal".into()))
        );
        assert_eq!(Orientation::try_from(1), Ok(Orientation::Vertical));
        assert_eq!(
            Orientation::try_from(2),
            Err(ConfigError::UnsupportedOrientation("2".into()))
        );
    }

    #[test]
    fn test_scaled_geometry() {
        let config =
            OrientationConfig::new(32.0, 16.0, 0.22, Orientation::Horizontal)
                .unwrap();
        let scaled = ScaledGeometry::new(&config, 2.0, 0.5).unwrap();
        assert_approx_eq!(scaled.cell_width(), 64.0);
        assert_approx_eq!(scaled.cell_height(), 8.0);
        assert_approx_eq!(scaled.edge_offset(), 14.0);
        assert_approx_eq!(scaled.half_side(), 4.0);
        assert_eq!(scaled.corners()[2], p(64.0, 4.0));

        let config =
            OrientationConfig::new(20.0, 20.0, 0.22, Orientation::Vertical)
                .unwrap();
        let scaled = ScaledGeometry::new(&config, 2.0, 0.5).unwrap();
        // Axes swap for vertical grids
        assert_approx_eq!(scaled.edge_offset(), 2.0);
        assert_approx_eq!(scaled.half_side(), 20.0);
        assert_eq!(scaled.corners()[1], p(40.0, 2.0));
    }

    #[test]
    fn test_invalid_scale() {
        let config =
            OrientationConfig::new(32.0, 16.0, 0.22, Orientation::Horizontal)
                .unwrap();
        assert_eq!(
            ScaledGeometry::new(&config, 0.0, 1.0),
            Err(ConfigError::InvalidScale {
                scale_x: 0.0,
                scale_y: 1.0
            })
        );
        assert!(ScaledGeometry::new(&config, 1.0, -2.0).is_err());
        assert!(ScaledGeometry::new(&config, f32::NAN, 1.0).is_err());
    }
}
