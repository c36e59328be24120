pub mod config;
pub mod presets;

pub use config::{ConfigError, PhysicsConfig};
