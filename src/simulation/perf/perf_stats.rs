use wasm_bindgen::prelude::*;

use crate::systems::collision::CollisionCounters;

/// Counters for the most recent `step`.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) frame: u32,
    pub(super) bodies_ticked: u32,
    pub(super) body_count: u32,
    pub(super) sweeps: u32,
    pub(super) path_steps: u32,
    pub(super) contacts: u32,
    pub(super) aborts: u32,
    pub(super) wedges: u32,
    pub(super) explosions: u32,
    pub(super) events_emitted: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    pub(super) fn absorb(&mut self, c: CollisionCounters) {
        self.sweeps = self.sweeps.saturating_add(c.sweeps as u32);
        self.path_steps = self.path_steps.saturating_add(c.path_steps as u32);
        self.contacts = self.contacts.saturating_add(c.contacts as u32);
        self.aborts = self.aborts.saturating_add(c.aborts as u32);
        self.wedges = self.wedges.saturating_add(c.wedges as u32);
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u32 { self.frame }
    #[wasm_bindgen(getter)]
    pub fn bodies_ticked(&self) -> u32 { self.bodies_ticked }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn sweeps(&self) -> u32 { self.sweeps }
    #[wasm_bindgen(getter)]
    pub fn path_steps(&self) -> u32 { self.path_steps }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn aborts(&self) -> u32 { self.aborts }
    #[wasm_bindgen(getter)]
    pub fn wedges(&self) -> u32 { self.wedges }
    #[wasm_bindgen(getter)]
    pub fn explosions(&self) -> u32 { self.explosions }
    #[wasm_bindgen(getter)]
    pub fn events_emitted(&self) -> u32 { self.events_emitted }
}
