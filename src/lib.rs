//! Crater Engine - destructible-terrain collision core in WASM
//!
//! Rectangular bodies move through a grid of solid/empty cells. Each tick a
//! body's displacement is rasterized into unit steps, swept against the grid,
//! and resolved into slides, bounces and stops.
//!
//! Architecture:
//! - core/        - Logging backend
//! - spatial/     - Terrain grid and occupancy layer
//! - domain/      - Configuration and body presets
//! - systems/     - Body model, hooks and the collision core
//! - simulation/  - World orchestration and the JS facade

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

// Short paths for the pieces most callers need
pub use spatial::grid;
pub use systems::body;
pub use systems::collision;
pub use systems::events;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    core::logging::install(log::LevelFilter::Info);

    web_sys::console::log_1(&"Crater WASM Engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::{ConfigError, PhysicsConfig};
pub use simulation::{PerfStats, World, WorldCore, WorldError};
pub use systems::body::{Body, BodyFlags, BodyId, BodyKind, ExplosionSpec, IVec2, IgnoreRule, Vec2};
pub use systems::collision::{Resolution, ResolveReport};
pub use systems::events::PhysicsEvent;
