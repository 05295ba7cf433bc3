//! The stateful side of the crate. A [CoordinateEngine] holds the current
//! [GridSnapshot] and a list of observers. Every change builds a whole new
//! snapshot and swaps it in, so readers either see the old configuration or
//! the new one, never a mix.

mod event;
mod snapshot;

pub use self::{
    event::{EngineEvent, ObserverId},
    snapshot::GridSnapshot,
};

use crate::{
    config::GridConfig,
    error::{ArgumentError, ConfigError},
    geometry::{Point2D, Rect2D},
    hex::{HexCoordinate, HexDirection, Orientation, OrientationConfig},
    model::GridModel,
    util::{read_lock, write_lock},
    visibility::VisibleCells,
};
use anyhow::Context;
use log::{debug, trace};
use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, RwLock,
    },
};
use validator::Validate;

type Observer = Arc<dyn Fn(&EngineEvent) + Send + Sync>;

/// Converts between pixel space and hex coordinates for one grid, and keeps
/// track of how that grid is currently configured. This is safe to share
/// between threads (e.g. behind an `Arc`): queries from any number of threads
/// can run alongside a reconfiguration.
///
/// ```
/// use hexgrid::{CoordinateEngine, HexCoordinate, Orientation};
///
/// let engine = CoordinateEngine::new(32.0, 16.0, Orientation::Horizontal)?;
/// assert_eq!(engine.pixel_to_hex(48.0, 16.0), HexCoordinate::new(1, 0));
///
/// engine.set_scale(2.0, 2.0)?;
/// assert_eq!(engine.pixel_to_hex(48.0, 16.0), HexCoordinate::new(0, 0));
/// # Ok::<(), hexgrid::ConfigError>(())
/// ```
pub struct CoordinateEngine {
    snapshot: RwLock<Arc<GridSnapshot>>,
    observers: RwLock<Vec<(ObserverId, Observer)>>,
    next_observer_id: AtomicU64,
}

impl CoordinateEngine {
    /// Create an engine with the default form factor and a scale of 1
    pub fn new(
        cell_width: f32,
        cell_height: f32,
        orientation: Orientation,
    ) -> Result<Self, ConfigError> {
        Self::with_form_factor(
            cell_width,
            cell_height,
            orientation,
            OrientationConfig::DEFAULT_FORM_FACTOR,
        )
    }

    /// Create an engine with a custom form factor and a scale of 1
    pub fn with_form_factor(
        cell_width: f32,
        cell_height: f32,
        orientation: Orientation,
        form_factor: f32,
    ) -> Result<Self, ConfigError> {
        let config = OrientationConfig::new(
            cell_width,
            cell_height,
            form_factor,
            orientation,
        )?;
        let snapshot = GridSnapshot::new(config, 1.0, 1.0)?;
        debug!("Created engine with {:?}", snapshot);
        Ok(Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            observers: RwLock::new(Vec::new()),
            next_observer_id: AtomicU64::new(0),
        })
    }

    /// Create an engine from a full config. The config's field bounds are
    /// validated first, so a bad config file fails with a
    /// [validator::ValidationErrors] naming every bad field.
    pub fn from_config(config: GridConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid grid config")?;
        let engine = Self::with_form_factor(
            config.cell_width,
            config.cell_height,
            config.orientation,
            config.form_factor,
        )?;
        // Swap directly, there's nobody to notify yet
        let scaled = engine
            .snapshot()
            .with_scale(config.scale_x, config.scale_y)?;
        *write_lock(&engine.snapshot) = Arc::new(scaled);
        Ok(engine)
    }

    /// Get the current configuration. The returned snapshot never changes,
    /// even if the engine is reconfigured while you hold it.
    pub fn snapshot(&self) -> Arc<GridSnapshot> {
        Arc::clone(&read_lock(&self.snapshot))
    }

    // ===== Mutators =====

    /// Replace the cell geometry, keeping the current scale and model. On
    /// error, nothing changes and no event is emitted.
    pub fn reconfigure(
        &self,
        cell_width: f32,
        cell_height: f32,
        form_factor: f32,
        orientation: Orientation,
    ) -> Result<(), ConfigError> {
        let config = OrientationConfig::new(
            cell_width,
            cell_height,
            form_factor,
            orientation,
        )?;
        self.update(|snapshot| snapshot.with_config(config))?;
        self.notify(EngineEvent::Reconfigured {
            orientation,
            cell_width,
            cell_height,
        });
        Ok(())
    }

    /// Switch orientation, keeping cell size and form factor
    pub fn set_orientation(
        &self,
        orientation: Orientation,
    ) -> Result<(), ConfigError> {
        let current = *self.snapshot().config();
        self.reconfigure(
            current.cell_width(),
            current.cell_height(),
            current.form_factor(),
            orientation,
        )
    }

    /// Change the scale. Both factors must be strictly positive. On error,
    /// nothing changes and no event is emitted.
    pub fn set_scale(
        &self,
        scale_x: f32,
        scale_y: f32,
    ) -> Result<(), ConfigError> {
        self.update(|snapshot| snapshot.with_scale(scale_x, scale_y))?;
        self.notify(EngineEvent::ScaleChanged { scale_x, scale_y });
        Ok(())
    }

    /// Bind a model, replacing any previous one. The model determines which
    /// cells exist for visibility enumeration and the grid extent.
    pub fn bind_model(&self, model: Arc<dyn GridModel>) {
        self.swap_model(Some(model));
    }

    /// Unbind the current model, if any. Enumeration yields nothing after
    /// this.
    pub fn unbind_model(&self) {
        self.swap_model(None);
    }

    fn swap_model(&self, model: Option<Arc<dyn GridModel>>) {
        let bound = model.is_some();
        // Infallible, but shares the swap path with everything else
        let result: Result<(), ConfigError> =
            self.update(|snapshot| Ok(snapshot.with_model(model)));
        if result.is_ok() {
            self.notify(EngineEvent::ModelChanged { bound });
        }
    }

    /// Build a new snapshot from the current one and swap it in. The write
    /// lock is held for the whole build, which serializes writers so that no
    /// update is lost.
    fn update(
        &self,
        f: impl FnOnce(&GridSnapshot) -> Result<GridSnapshot, ConfigError>,
    ) -> Result<(), ConfigError> {
        let mut guard = write_lock(&self.snapshot);
        let next = f(&**guard)?;
        debug!("Swapping snapshot: {:?}", next);
        *guard = Arc::new(next);
        Ok(())
    }

    // ===== Observers =====

    /// Register a callback to be called after every change. Callbacks run
    /// synchronously on the thread that made the change, after the new
    /// snapshot is in place and with no engine locks held, so it's fine to
    /// query (or even reconfigure) the engine from inside one.
    pub fn subscribe(
        &self,
        observer: impl Fn(&EngineEvent) + Send + Sync + 'static,
    ) -> ObserverId {
        let id =
            ObserverId(self.next_observer_id.fetch_add(1, Ordering::Relaxed));
        write_lock(&self.observers).push((id, Arc::new(observer)));
        trace!("Subscribed {}", id);
        id
    }

    /// Remove a callback. Returns `false` if it wasn't registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = write_lock(&self.observers);
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        let removed = observers.len() != before;
        trace!("Unsubscribed {} (removed: {})", id, removed);
        removed
    }

    fn notify(&self, event: EngineEvent) {
        // Copy the list out so callbacks can subscribe/unsubscribe
        let observers: Vec<Observer> = read_lock(&self.observers)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        trace!("Notifying {} observer(s) of {:?}", observers.len(), event);
        for observer in observers {
            observer(&event);
        }
    }

    // ===== Queries =====
    // Each of these grabs the current snapshot and delegates. Use
    // [Self::snapshot] directly to run several queries against one
    // configuration.

    pub fn origin_of(&self, column: i32, row: i32) -> Point2D {
        self.snapshot().origin_of(column, row)
    }

    pub fn center_of(&self, coord: HexCoordinate) -> Point2D {
        self.snapshot().center_of(coord)
    }

    pub fn corners_of(&self, coord: HexCoordinate) -> [Point2D; 6] {
        self.snapshot().corners_of(coord)
    }

    pub fn contains_point(&self, coord: HexCoordinate, x: f32, y: f32) -> bool {
        self.snapshot().contains_point(coord, x, y)
    }

    pub fn pixel_to_hex(&self, x: f32, y: f32) -> HexCoordinate {
        self.snapshot().pixel_to_hex(x, y)
    }

    pub fn column_of(&self, x: f32, y: f32) -> i32 {
        self.snapshot().column_of(x, y)
    }

    pub fn row_of(&self, x: f32, y: f32) -> i32 {
        self.snapshot().row_of(x, y)
    }

    pub fn nearest_neighbor(
        &self,
        coord: HexCoordinate,
        direction: i32,
    ) -> Result<HexCoordinate, ArgumentError> {
        self.snapshot().nearest_neighbor(coord, direction)
    }

    pub fn neighbor(
        &self,
        coord: HexCoordinate,
        direction: HexDirection,
    ) -> HexCoordinate {
        self.snapshot().neighbor(coord, direction)
    }

    pub fn ring(
        &self,
        center: HexCoordinate,
        distance: i32,
    ) -> Result<Vec<HexCoordinate>, ArgumentError> {
        self.snapshot().ring(center, distance)
    }

    pub fn ring_into(
        &self,
        center: HexCoordinate,
        distance: i32,
        buffer: &mut Vec<HexCoordinate>,
    ) -> Result<(), ArgumentError> {
        self.snapshot().ring_into(center, distance, buffer)
    }

    pub fn spiral(
        &self,
        center: HexCoordinate,
        radius: i32,
    ) -> Result<Vec<HexCoordinate>, ArgumentError> {
        self.snapshot().spiral(center, radius)
    }

    pub fn distance(&self, a: HexCoordinate, b: HexCoordinate) -> u32 {
        self.snapshot().distance(a, b)
    }

    pub fn is_visible(
        &self,
        coord: HexCoordinate,
        viewport: &Rect2D,
        accurate: bool,
    ) -> bool {
        self.snapshot().is_visible(coord, viewport, accurate)
    }

    /// Enumerate visible cells against the current snapshot. The iterator
    /// keeps that snapshot alive, so reconfiguring mid-iteration doesn't
    /// affect it.
    pub fn enumerate_visible(
        &self,
        viewport: Rect2D,
        accurate: bool,
    ) -> VisibleCells {
        self.snapshot().enumerate_visible(viewport, accurate)
    }

    pub fn cells(&self) -> VisibleCells {
        self.snapshot().cells()
    }

    pub fn visible_extent(&self) -> Rect2D {
        self.snapshot().visible_extent()
    }
}

impl fmt::Debug for CoordinateEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinateEngine")
            .field("snapshot", &self.snapshot())
            .field("observers", &read_lock(&self.observers).len())
            .finish()
    }
}
