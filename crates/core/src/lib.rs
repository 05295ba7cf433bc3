//! Coordinate geometry for staggered hexagonal grids. This crate converts
//! between pixel space and `(column, row)` cell coordinates, finds neighbors
//! and rings of cells, and culls cells against a viewport. It never draws
//! anything and never stores per-cell data; rendering and cell contents are
//! left to the caller, which describes its grid through the [GridModel] trait.
//!
//! ```
//! use hexgrid::{BoundedGrid, CoordinateEngine, Orientation, Rect2D};
//! use std::sync::Arc;
//!
//! let engine = CoordinateEngine::new(32.0, 16.0, Orientation::Horizontal)?;
//! engine.bind_model(Arc::new(BoundedGrid::new(100, 100)));
//!
//! // Which cell did the user click on?
//! let clicked = engine.pixel_to_hex(48.0, 16.0);
//! // Which cells need to be drawn?
//! let viewport = Rect2D::new(0.0, 0.0, 640.0, 480.0);
//! for cell in engine.enumerate_visible(viewport, true) {
//!     let corners = engine.corners_of(cell);
//!     // Draw the polygon...
//! }
//! # Ok::<(), hexgrid::ConfigError>(())
//! ```
//!
//! See [hex] for how the coordinate systems are laid out, and
//! [CoordinateEngine] for the full set of queries.

mod config;
mod engine;
mod error;
pub mod geometry;
pub mod hex;
mod model;
mod util;
mod visibility;

pub use crate::{
    config::GridConfig,
    engine::{CoordinateEngine, EngineEvent, GridSnapshot, ObserverId},
    error::{ArgumentError, ConfigError},
    geometry::{Point2D, Rect2D},
    hex::{
        HexCoordinate, HexCoordinateMap, HexCoordinateSet, HexDirection,
        Orientation, OrientationConfig, ScaledGeometry,
    },
    model::{BoundedGrid, GridModel},
    visibility::{CancellationToken, VisibleCells},
};
