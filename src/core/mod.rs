//! Engine-wide plumbing that is not physics.

pub mod logging;
