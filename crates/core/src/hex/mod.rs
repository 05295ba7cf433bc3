//! This module holds the basic types of the hexagon grid: coordinates,
//! directions, orientations, and per-cell geometry.
//!
//! ## Coordinate Systems
//!
//! There are two coordinate systems in play:
//!
//! ### Offset Coordinates
//!
//! Cells are addressed by `(column, row)`, like a plain 2D array. Because
//! hexagons don't stack in a square pattern, every other line of cells is
//! shifted ("staggered") by half a cell:
//!
//! - With [Orientation::Horizontal] (flat-topped hexagons), odd **columns** are
//!   shifted down by half a cell
//! - With [Orientation::Vertical] (pointy-topped hexagons), odd **rows** are
//!   shifted right by half a cell
//!
//! This is what Amit Patel calls "odd-q" and "odd-r" layouts respectively, see
//! <https://www.redblobgames.com/grids/hexagons/#coordinates-offset>.
//!
//! The value `-1` on either axis is a sentinel meaning "outside the grid". It's
//! what pixel conversion gives you for points above or left of the grid.
//!
//! Internally, some operations (straight-line offsets, distance) convert to
//! axial coordinates, where those operations don't depend on parity. Axial
//! coordinates never leave this crate.
//!
//! ### Pixel Coordinates
//!
//! Pixel space has its origin at the top-left corner of cell `(0, 0)`'s
//! bounding box, with `x` growing right and `y` growing down.
//!
//! ```text
//!  o----> +x
//!  |
//!  v
//!  +y
//! ```
//!
//! Cells overlap their neighbors' bounding boxes along the **packed axis**
//! (`x` for horizontal grids, `y` for vertical) by the edge offset, which is
//! how the slanted edges interlock. Along the other axis (the **stagger
//! axis**) they line up edge to edge, shifted by the half side on every other
//! index.
//!
//! The size of a cell in pixel space is determined by the
//! [OrientationConfig] and then scaled by [ScaledGeometry]. See
//! [GridSnapshot](crate::GridSnapshot) for the conversions between the two
//! systems.

mod orientation;
mod ring;
mod unit;

pub use self::{orientation::*, unit::*};
