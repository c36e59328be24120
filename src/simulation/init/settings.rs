use crate::domain::{ConfigError, PhysicsConfig};

use super::perf_stats::PerfStats;
use super::random;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_seed(world: &mut WorldCore, seed: u32) {
    world.rng_state = random::sanitize_seed(seed);
}

pub(super) fn set_config(world: &mut WorldCore, config: PhysicsConfig) -> Result<(), ConfigError> {
    config.validate()?;
    world.config = config;
    Ok(())
}

/// Replace the physics config. On failure the current one stays in place.
pub(super) fn load_config_json(world: &mut WorldCore, json: &str) -> Result<(), ConfigError> {
    match PhysicsConfig::from_json(json) {
        Ok(config) => {
            world.config = config;
            Ok(())
        }
        Err(e) => {
            log::warn!("config rejected, keeping the previous one: {}", e);
            Err(e)
        }
    }
}
