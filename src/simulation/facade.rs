use wasm_bindgen::prelude::*;

use crate::domain::presets;
use crate::systems::body::{Body, BodyId, ExplosionSpec, Vec2};

use super::perf_stats::PerfStats;
use super::WorldCore;

/// JS handle around `WorldCore`. Body ids cross the boundary as plain `u32`;
/// a missing body reads as `NaN`.
#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a new world with given dimensions
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<World, JsValue> {
        let core = WorldCore::try_new(width, height).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    /// Enable or disable per-step counters (zeros when disabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.stats()
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.core.set_seed(seed);
    }

    pub fn load_config(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .load_config_json(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    pub fn get_config_json(&self) -> String {
        self.core.config().to_json()
    }

    // === TERRAIN API ===

    pub fn set_solid(&mut self, x: i32, y: i32, solid: bool) -> bool {
        self.core.set_solid(x, y, solid).is_ok()
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.core.is_solid(x, y)
    }

    /// Paint (or erase) terrain in radius (brush)
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, solid: bool) -> u32 {
        self.core.fill_circle(cx, cy, radius, solid) as u32
    }

    /// Blast a crater; returns the number of bodies hit
    pub fn explode(&mut self, cx: i32, cy: i32, radius: i32, max_force: f32, debris_chance: u8) -> u32 {
        let spec = ExplosionSpec { radius, max_force, debris_chance: debris_chance.min(100) };
        self.core.explode(cx, cy, spec).len() as u32
    }

    // === BODY API ===

    /// Spawn a worm at (x, y) with size (w, h). Returns the body ID.
    pub fn spawn_worm(&mut self, x: f32, y: f32, w: u32, h: u32) -> Result<u32, JsValue> {
        self.spawn(presets::worm(x, y, w, h))
    }

    /// Spawn a 1x1 projectile that explodes on its first contact
    pub fn spawn_projectile(
        &mut self,
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
        radius: i32,
        max_force: f32,
    ) -> Result<u32, JsValue> {
        let explosion = ExplosionSpec { radius, max_force, ..presets::DEFAULT_EXPLOSION };
        self.spawn(presets::projectile(x, y, vx, vy, explosion))
    }

    pub fn spawn_debris(&mut self, x: f32, y: f32, merge_on_stop: bool) -> Result<u32, JsValue> {
        self.spawn(presets::debris(x, y, merge_on_stop))
    }

    pub fn spawn_fluid(&mut self, x: f32, y: f32) -> Result<u32, JsValue> {
        self.spawn(presets::fluid(x, y))
    }

    pub fn remove_body(&mut self, id: u32) -> bool {
        self.core.remove_body(BodyId(id)).is_ok()
    }

    pub fn apply_force(&mut self, id: u32, fx: f32, fy: f32) -> bool {
        self.core.apply_force(BodyId(id), Vec2::new(fx, fy)).is_ok()
    }

    pub fn body_x(&self, id: u32) -> f32 {
        self.core.body(BodyId(id)).map_or(f32::NAN, |b| b.pos.x)
    }

    pub fn body_y(&self, id: u32) -> f32 {
        self.core.body(BodyId(id)).map_or(f32::NAN, |b| b.pos.y)
    }

    pub fn body_vx(&self, id: u32) -> f32 {
        self.core.body(BodyId(id)).map_or(f32::NAN, |b| b.velocity.x)
    }

    pub fn body_vy(&self, id: u32) -> f32 {
        self.core.body(BodyId(id)).map_or(f32::NAN, |b| b.velocity.y)
    }

    /// Get number of live bodies
    pub fn body_count(&self) -> usize {
        self.core.body_count()
    }

    /// Step the simulation forward by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.core.step(dt);
    }

    /// Events since the last drain, as a JSON array
    pub fn drain_events_json(&mut self) -> String {
        let events = self.core.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("could not serialize {} events: {}", events.len(), e);
            "[]".to_string()
        })
    }
}

impl World {
    fn spawn(&mut self, body: Body) -> Result<u32, JsValue> {
        self.core
            .spawn_body(body)
            .map(|id| id.0)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn core(&self) -> &WorldCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut WorldCore {
        &mut self.core
    }
}
