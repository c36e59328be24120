use bitflags::bitflags;
use serde::Serialize;

use super::kind::BodyKind;
use super::vec2::{IVec2, Vec2};

/// Handle into the world's body table. Cells store this, never the body itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BodyId(pub u32);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Per-body simulation switches
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct BodyFlags: u8 {
        const DISABLE_GRAVITY = 1 << 0;
        const DISABLE_COLLISIONS = 1 << 1;
        const DISABLE_OBJECT_COLLISIONS = 1 << 2;
        const DISABLE_HORIZONTAL_MOVEMENT = 1 << 3;
        const DISABLE_UPWARD_MOVEMENT = 1 << 4;
        /// Other bodies using `IgnoreRule::IgnoredByObjects` pass through this one.
        const IGNORED_BY_OBJECTS = 1 << 5;
    }
}

/// Which occupied cells a moving body treats as empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IgnoreRule {
    #[default]
    None,
    /// Skip occupants flagged `IGNORED_BY_OBJECTS`.
    IgnoredByObjects,
    /// Skip occupants of kind `Worm`.
    Worms,
}

/// The read-only view of a body other bodies' sweeps are allowed to see.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OccupantInfo {
    pub flags: BodyFlags,
    pub is_worm: bool,
}

/// Axis-aligned integer-sized rectangle moving in sub-cell coordinates.
///
/// `pos` is the bottom-left corner of the box. The box covers the cells
/// `pos.cell() .. pos.cell() + (width, height)`.
#[derive(Clone, Debug)]
pub struct Body {
    // === Identity ===
    pub id: BodyId,
    pub kind: BodyKind,
    /// Cleared when the body is destroyed mid-tick; the world removes it afterwards.
    pub active: bool,

    // === Physics State ===
    pub pos: Vec2,
    pub velocity: Vec2,
    pub last_pos: Vec2,
    pub last_velocity: Vec2,

    // === Shape ===
    pub width: u32,
    pub height: u32,

    // === Material ===
    pub mass: f32,
    /// 0.0 = slide along the surface, 1.0 = full reflection
    pub elasticity: f32,
    pub friction: f32,
    /// Speed above which a contact bounces instead of stopping
    pub rebound_threshold: f32,

    pub flags: BodyFlags,
    pub ignore: IgnoreRule,

    /// Integer position last written into the grid's occupancy layer.
    pub(crate) footprint: Option<IVec2>,
}

impl Body {
    /// Create a plain rectangular body at rest.
    pub fn new_rect(x: f32, y: f32, width: u32, height: u32) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            id: BodyId(0),
            kind: BodyKind::Plain,
            active: true,
            pos,
            velocity: Vec2::zero(),
            last_pos: pos,
            last_velocity: Vec2::zero(),
            width,
            height,
            mass: 1.0,
            elasticity: 0.5,
            friction: 1.0,
            rebound_threshold: 0.0,
            flags: BodyFlags::empty(),
            ignore: IgnoreRule::None,
            footprint: None,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Vec2::new(vx, vy);
        self
    }

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_flags(mut self, flags: BodyFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_elasticity(mut self, elasticity: f32) -> Self {
        self.elasticity = elasticity.clamp(0.0, 1.0);
        self
    }

    pub fn with_rebound_threshold(mut self, threshold: f32) -> Self {
        self.rebound_threshold = threshold;
        self
    }

    #[inline]
    pub fn w(&self) -> i32 {
        self.width as i32
    }

    #[inline]
    pub fn h(&self) -> i32 {
        self.height as i32
    }

    /// Integer cell of the box origin.
    #[inline]
    pub fn cell(&self) -> IVec2 {
        self.pos.cell()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + (self.width / 2) as f32,
            self.pos.y + (self.height / 2) as f32,
        )
    }

    /// Save current state as last (call before the tick's integration)
    pub fn store_last_tick(&mut self) {
        self.last_pos = self.pos;
        self.last_velocity = self.velocity;
    }

    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }

    pub fn occupant_info(&self) -> OccupantInfo {
        OccupantInfo {
            flags: self.flags,
            is_worm: matches!(self.kind, BodyKind::Worm { .. }),
        }
    }

    /// Whether this body writes itself into the grid's occupancy layer.
    pub fn registers_occupancy(&self) -> bool {
        !self.flags.contains(BodyFlags::DISABLE_OBJECT_COLLISIONS)
    }

    pub fn footprint(&self) -> Option<IVec2> {
        self.footprint
    }
}
