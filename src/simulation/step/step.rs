use crate::spatial::grid::Grid;
use crate::systems::body::{Body, BodyId, BodyKind};
use crate::systems::collision::{
    reset_collision_perf_counters, resolve_motion, take_collision_perf_counters, TickContext,
};
use crate::systems::events::{PhysicsEvent, TickEffects};

use super::commands;
use super::effects;
use super::integrate;
use super::WorldCore;

pub(super) fn step(world: &mut WorldCore, dt: f32) {
    world.perf_stats.reset();
    reset_collision_perf_counters();

    let dt = dt * world.config.time_scale;
    let events_before = world.events.len();

    // Bodies spawned during the step (debris) wait for the next one.
    let ids = commands::live_ids(world);
    let mut ticked = 0u32;
    for id in ids {
        if tick_body(world, id, dt) {
            ticked += 1;
        }
    }

    world.frame += 1;

    let counters = take_collision_perf_counters();
    if world.perf_enabled {
        let stats = &mut world.perf_stats;
        stats.absorb(counters);
        stats.frame = world.frame as u32;
        stats.bodies_ticked = ticked;
        stats.body_count = world.live_bodies as u32;
        stats.events_emitted = (world.events.len() - events_before) as u32;
    } else {
        world.perf_stats.reset();
    }
}

/// One body's full tick: forces, sweep and resolve, commit, hooks, effects.
fn tick_body(world: &mut WorldCore, id: BodyId, dt: f32) -> bool {
    // Removed earlier in this step by someone else's explosion or merge
    let Some(mut body) = world.bodies.get_mut(id.index()).and_then(Option::take) else {
        return false;
    };

    body.store_last_tick();
    let mut fx = TickEffects::new();

    integrate::apply_forces(&world.grid, &world.occupants, &world.config, &mut body);

    let ctx = TickContext {
        grid: &world.grid,
        occupants: &world.occupants,
        config: &world.config,
    };
    let report = resolve_motion(&mut body, &ctx, &mut fx, dt);

    if body.active && body.kind == BodyKind::Fluid {
        integrate::flow_fluid(&world.grid, &world.occupants, &mut body, &mut world.rng_state);
    }

    if body.pos != body.last_pos {
        fx.emit(PhysicsEvent::Move { body: id, from: body.last_pos, to: body.pos });
        commit_footprint(&mut world.grid, &mut body);
    }

    if body.active
        && !report.stop_fired
        && body.velocity.is_zero()
        && !body.last_velocity.is_zero()
    {
        body.on_stop(body.pos, &mut fx);
    }

    fx.emit(PhysicsEvent::Tick { body: id, from: body.last_pos, to: body.pos });

    world.occupants.set(id, body.occupant_info());
    world.bodies[id.index()] = Some(body);

    effects::apply(world, id, fx);
    true
}

/// Move the body's claim on the occupancy layer to its current cell.
fn commit_footprint(grid: &mut Grid, body: &mut Body) {
    let cell = body.cell();
    if body.footprint == Some(cell) {
        return;
    }
    if let Some(old) = body.footprint.take() {
        grid.clear_footprint(body.id, old, body.w(), body.h());
    }
    if body.active && body.registers_occupancy() {
        grid.write_footprint(body.id, cell, body.w(), body.h());
        body.footprint = Some(cell);
    }
}
