//! Body - axis-aligned integer-sized box moving in sub-cell coordinates
//!
//! Bodies never rotate. The grid only ever sees a `BodyId`; the body itself
//! lives in the world's body table and is borrowed for its own tick.

mod body;
mod hooks;
mod kind;
mod vec2;

pub use body::{Body, BodyFlags, BodyId, IgnoreRule, OccupantInfo};
pub use hooks::BounceInfo;
pub use kind::{BodyKind, ExplosionSpec};
pub use vec2::{IVec2, Vec2};
