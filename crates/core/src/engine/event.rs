use crate::hex::Orientation;
use derive_more::Display;
use serde::Serialize;

/// Something about the engine changed. Observers get one of these after the
/// change has been applied, so any query they make from inside the callback
/// already sees the new state.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Cell size, form factor, or orientation changed. Every pixel mapping is
    /// now different.
    Reconfigured {
        orientation: Orientation,
        cell_width: f32,
        cell_height: f32,
    },
    /// The scale changed. Pixel mappings are different but cell adjacency
    /// isn't.
    ScaleChanged { scale_x: f32, scale_y: f32 },
    /// A model was bound (`bound = true`) or unbound. The set of valid cells
    /// may have changed.
    ModelChanged { bound: bool },
}

/// Handle to a registered observer, used to unsubscribe it later
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[display(fmt = "observer#{}", _0)]
pub struct ObserverId(pub(crate) u64);
