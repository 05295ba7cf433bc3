//! Error types for the coordinate engine. Every error here is a caller input
//! violation: nothing is retriable, and a failed call never leaves the engine
//! half-configured.

use thiserror::Error;

/// An invalid engine configuration. Returned from constructors and mutators
/// such as [CoordinateEngine::reconfigure](crate::CoordinateEngine::reconfigure)
/// and [CoordinateEngine::set_scale](crate::CoordinateEngine::set_scale). When
/// one of these is returned, the engine's previous configuration is still in
/// effect.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Both cell dimensions must be at least one pixel
    #[error("cell size must be at least 1x1, but was {width}x{height}")]
    InvalidCellSize { width: f32, height: f32 },

    /// Scale factors must be strictly positive on both axes
    #[error("scale must be positive on both axes, but was ({scale_x}, {scale_y})")]
    InvalidScale { scale_x: f32, scale_y: f32 },

    /// The form factor would produce a degenerate (non-convex) hexagon
    #[error(
        "form factor {coefficient} is invalid for a cell of {width}x{height}; \
        it must be in [0, 0.5) and leave an edge offset of at most half the cell"
    )]
    InvalidFormFactor {
        coefficient: f32,
        width: f32,
        height: f32,
    },

    /// The orientation name or index doesn't map to a known orientation
    #[error("unsupported orientation: {0}")]
    UnsupportedOrientation(String),
}

/// An invalid argument to a coordinate query. These have no side effects.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// Directions are indexed 0 through 5
    #[error("direction must be in 0..=5, but was {0}")]
    InvalidDirection(i32),

    /// Ring distances can't be negative
    #[error("ring distance must be non-negative, but was {0}")]
    NegativeDistance(i32),
}
