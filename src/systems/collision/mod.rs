//! Grid-sweep collision core.
//!
//! A body's displacement for one tick is rasterized into unit steps, the
//! leading edge of its box is tested against the grid step by step, and the
//! first contact is turned into an exact resting position and a rebound.

pub mod contact;
pub mod normal;
pub mod path;
pub mod perf;
pub mod resolve;
pub mod sweep;
mod types;

pub use contact::{ContactSolution, EPSILON};
pub use path::{rasterize, rasterize_with, Path, StepOrder};
pub use perf::{reset_collision_perf_counters, take_collision_perf_counters, CollisionCounters};
pub use resolve::{resolve_motion, TickContext, MAX_ITERATIONS};
pub use sweep::{detect, detect_with};
pub use types::{Axis, Boundary, CollisionRecord, Direction, Resolution, ResolveReport};
