//! Side effects produced while a body is ticked.
//!
//! Hooks never reach into the grid or other bodies. They record what
//! should happen here and the world applies it once the body's tick is done.

use serde::Serialize;

use crate::systems::body::{BodyId, ExplosionSpec, IVec2, Vec2};
use crate::systems::collision::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DestroyReason {
    FellOut,
    Impact,
    Merged,
}

/// Notifications for the game layer (turn logic, rendering, damage).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PhysicsEvent {
    Bounce {
        body: BodyId,
        position: Vec2,
        old_velocity: Vec2,
        new_velocity: Vec2,
        normal: Vec2,
        direction: Direction,
    },
    Stop {
        body: BodyId,
        position: Vec2,
    },
    Stuck {
        body: BodyId,
        position: Vec2,
    },
    Move {
        body: BodyId,
        from: Vec2,
        to: Vec2,
    },
    Tick {
        body: BodyId,
        from: Vec2,
        to: Vec2,
    },
    FallDamage {
        body: BodyId,
        amount: i32,
    },
    KnockedOut {
        body: BodyId,
        by: BodyId,
    },
    Destroyed {
        body: BodyId,
        reason: DestroyReason,
    },
    ExplosionHit {
        body: BodyId,
        force: f32,
        damage: i32,
    },
    Aborted {
        body: BodyId,
        position: Vec2,
        iterations: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionRequest {
    pub center: IVec2,
    pub spec: ExplosionSpec,
}

/// Everything a single body tick wants done to the rest of the world.
#[derive(Debug, Default)]
pub struct TickEffects {
    pub events: Vec<PhysicsEvent>,
    pub impulses: Vec<(BodyId, Vec2)>,
    pub explosions: Vec<ExplosionRequest>,
    pub merges: Vec<BodyId>,
}

impl TickEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: PhysicsEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
            && self.impulses.is_empty()
            && self.explosions.is_empty()
            && self.merges.is_empty()
    }

    pub fn count_events(&self, pred: impl Fn(&PhysicsEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}
