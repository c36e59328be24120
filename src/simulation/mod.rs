//! World - terrain grid plus the bodies moving through it
//!
//! `WorldCore` owns every piece of mutable state and only orchestrates:
//! commands edit the grid and the body table, `step` ticks each body through
//! the collision core and then applies whatever its hooks asked for.
//!
//! Bodies are stored in a slot table indexed by `BodyId`. A body is taken
//! out of its slot for its own tick, so the sweep can read the grid and the
//! occupant table while the body itself is borrowed mutably.

use thiserror::Error;

use crate::domain::{ConfigError, PhysicsConfig};
use crate::spatial::grid::{Grid, OccupantTable, SolidQuery};
use crate::systems::body::{Body, BodyId, ExplosionSpec, IVec2, Vec2};
use crate::systems::events::PhysicsEvent;

#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/random.rs"]
mod random;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "step/integrate.rs"]
mod integrate;
#[path = "step/effects.rs"]
mod effects;
#[path = "step/step.rs"]
mod step;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("unknown body {0:?}")]
    UnknownBody(BodyId),
    #[error("cell ({x}, {y}) is outside the map")]
    OutOfBounds { x: i32, y: i32 },
    #[error("invalid size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("spawn area is already solid or occupied")]
    Blocked,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The simulation world
pub struct WorldCore {
    grid: Grid,
    bodies: Vec<Option<Body>>,
    occupants: OccupantTable,
    config: PhysicsConfig,

    // State
    next_id: u32,
    live_bodies: usize,
    events: Vec<PhysicsEvent>,
    frame: u64,
    rng_state: u32,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create an empty world with given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        init::create_world_core(width, height)
    }

    /// Like `new`, but refuses a map with no cells.
    pub fn try_new(width: u32, height: u32) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidSize { width, height });
        }
        Ok(Self::new(width, height))
    }

    /// Build a world from text rows, top row first, `#` solid.
    pub fn from_rows(rows: &[&str]) -> Self {
        init::create_world_core_from_grid(Grid::from_rows(rows))
    }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn body_count(&self) -> usize { self.live_bodies }

    // === Terrain ===

    pub fn set_solid(&mut self, x: i32, y: i32, solid: bool) -> Result<(), WorldError> {
        commands::set_solid(self, x, y, solid)
    }

    /// Terrain or any body's footprint.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.grid.is_solid_for(x, y, &SolidQuery::everything(&self.occupants))
    }

    /// Paint a disc of terrain; returns the number of cells changed.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, solid: bool) -> usize {
        self.grid.fill_circle(IVec2::new(cx, cy), radius, solid)
    }

    /// Blow a hole in the terrain and push every body it reached.
    /// Returns the ids of the bodies that were hit, spawned debris included.
    pub fn explode(&mut self, cx: i32, cy: i32, spec: ExplosionSpec) -> Vec<BodyId> {
        commands::explode(self, IVec2::new(cx, cy), spec)
    }

    // === Bodies ===

    pub fn spawn_body(&mut self, body: Body) -> Result<BodyId, WorldError> {
        commands::spawn_body(self, body)
    }

    pub fn remove_body(&mut self, id: BodyId) -> Result<Body, WorldError> {
        commands::remove_body(self, id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index()).and_then(Option::as_ref)
    }

    /// Direct access to a body. Changing its size or flags here does not
    /// touch the grid until the body is next moved.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn body_ids(&self) -> Vec<BodyId> {
        commands::live_ids(self)
    }

    pub fn apply_force(&mut self, id: BodyId, force: Vec2) -> Result<(), WorldError> {
        let body = self.body_mut(id).ok_or(WorldError::UnknownBody(id))?;
        body.apply_impulse(force);
        Ok(())
    }

    // === Simulation ===

    /// Advance every body by `dt` (scaled by the config's time scale).
    pub fn step(&mut self, dt: f32) {
        step::step(self, dt);
    }

    pub fn drain_events(&mut self) -> Vec<PhysicsEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[PhysicsEvent] {
        &self.events
    }

    // === Settings ===

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PhysicsConfig) -> Result<(), WorldError> {
        settings::set_config(self, config).map_err(WorldError::from)
    }

    pub fn load_config_json(&mut self, json: &str) -> Result<(), WorldError> {
        settings::load_config_json(self, json).map_err(WorldError::from)
    }

    pub fn set_seed(&mut self, seed: u32) {
        settings::set_seed(self, seed);
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    pub fn stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
