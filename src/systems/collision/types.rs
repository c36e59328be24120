use serde::Serialize;

use crate::systems::body::{BodyId, IVec2, Vec2};

/// Cardinal direction of the path step that produced a contact
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub fn from_step(step: IVec2) -> Option<Self> {
        match (step.x, step.y) {
            (1, 0) => Some(Direction::Right),
            (-1, 0) => Some(Direction::Left),
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Right => IVec2::RIGHT,
            Direction::Left => IVec2::LEFT,
            Direction::Up => IVec2::UP,
            Direction::Down => IVec2::DOWN,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Axis {
    X,
    Y,
}

/// Integer grid line crossed at the moment of contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Boundary {
    /// The line `x = n`, crossed by a horizontal step
    Vertical(i32),
    /// The line `y = n`, crossed by a vertical step
    Horizontal(i32),
}

impl Boundary {
    pub fn coordinate(self) -> i32 {
        match self {
            Boundary::Vertical(v) | Boundary::Horizontal(v) => v,
        }
    }
}

/// First contact found by a sweep. Lives for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CollisionRecord {
    /// The solid (or occupied) cell that stopped the body
    pub hit_cell: IVec2,
    /// Body occupying `hit_cell`, if that is what made it solid
    pub occupant: Option<BodyId>,
    /// Free cell the contacting part of the body was in, next to `hit_cell`
    pub contact_cell: IVec2,
    /// Offset of the contacting cell within the body's box
    pub hit_part: IVec2,
    pub boundary: Boundary,
    pub direction: Direction,
    /// Displacement component tangential to `direction`
    pub slide: Vec2,
}

/// How a resolution pass ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// Velocity was zero; nothing to do
    Idle,
    /// No (further) contact; the remaining displacement was applied
    Settled,
    /// Collisions disabled; the full displacement was applied without a sweep
    Unobstructed,
    /// Destination above the map; moved without testing
    ExitedTop,
    /// Contact below the rebound threshold; velocity zeroed
    Stopped,
    /// Contact consumed the whole remaining displacement
    Exhausted,
    /// Two iterations in a row produced the same contact position
    Stalled,
    /// Iteration cap reached; last contact position kept
    Aborted,
    /// Nothing stopped the body before it left the bottom of the map
    FellOut,
    /// A hook destroyed the body on contact
    Destroyed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolveReport {
    pub outcome: Resolution,
    pub iterations: u32,
    pub first_contact: Option<CollisionRecord>,
    /// `on_stop` already fired during this pass
    pub stop_fired: bool,
}

impl ResolveReport {
    pub(crate) fn new(outcome: Resolution) -> Self {
        Self {
            outcome,
            iterations: 0,
            first_contact: None,
            stop_fired: false,
        }
    }

    pub fn collided(&self) -> bool {
        self.first_contact.is_some()
    }
}
