use crate::domain::PhysicsConfig;
use crate::spatial::grid::{Grid, OccupantTable};

use super::perf_stats::PerfStats;
use super::random::DEFAULT_SEED;
use super::WorldCore;

pub(super) fn create_world_core(width: u32, height: u32) -> WorldCore {
    create_world_core_from_grid(Grid::new(width, height))
}

pub(super) fn create_world_core_from_grid(grid: Grid) -> WorldCore {
    WorldCore {
        grid,
        // slot 0 is never handed out
        bodies: vec![None],
        occupants: OccupantTable::new(),
        config: PhysicsConfig::default(),
        next_id: 1,
        live_bodies: 0,
        events: Vec::with_capacity(64),
        frame: 0,
        rng_state: DEFAULT_SEED,
        perf_enabled: true,
        perf_stats: PerfStats::default(),
    }
}
