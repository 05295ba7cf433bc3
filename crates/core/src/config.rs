use crate::hex::{Orientation, OrientationConfig};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Everything needed to build a [CoordinateEngine](crate::CoordinateEngine),
/// in one serializable blob. Missing fields are filled in from the default, so
/// a config file only needs to mention what it wants to change.
///
/// Validation here only checks each field against its own bounds. Constraints
/// that involve several fields together (e.g. a form factor that rounds to an
/// edge offset wider than half the cell) are caught when the engine is built.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    /// Unscaled width of a cell's bounding box, in pixels
    #[validate(range(min = 1.0))]
    pub cell_width: f32,

    /// Unscaled height of a cell's bounding box, in pixels
    #[validate(range(min = 1.0))]
    pub cell_height: f32,

    /// Fraction of the cell's packed axis size taken up by each slanted band.
    /// 0.0 gives rectangles, values near 0.5 give diamonds.
    #[validate(range(min = 0.0, max = 0.49))]
    pub form_factor: f32,

    pub orientation: Orientation,

    /// Horizontal scale factor (zoom) applied to the cell geometry
    #[validate(range(min = 0.001))]
    pub scale_x: f32,

    /// Vertical scale factor (zoom) applied to the cell geometry
    #[validate(range(min = 0.001))]
    pub scale_y: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: 32.0,
            cell_height: 16.0,
            form_factor: OrientationConfig::DEFAULT_FORM_FACTOR,
            orientation: Orientation::Horizontal,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}
