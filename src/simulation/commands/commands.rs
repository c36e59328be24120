use crate::domain::presets;
use crate::spatial::grid::SolidQuery;
use crate::systems::body::{Body, BodyId, ExplosionSpec, IVec2};
use crate::systems::events::{DestroyReason, PhysicsEvent};

use super::random;
use super::{WorldCore, WorldError};

pub(super) fn set_solid(world: &mut WorldCore, x: i32, y: i32, solid: bool) -> Result<(), WorldError> {
    if !world.grid.set_solid(x, y, solid) {
        return Err(WorldError::OutOfBounds { x, y });
    }
    Ok(())
}

pub(super) fn live_ids(world: &WorldCore) -> Vec<BodyId> {
    world
        .bodies
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_some())
        .map(|(idx, _)| BodyId(idx as u32))
        .collect()
}

/// Validate the spawn area, hand out an id and claim the footprint.
pub(super) fn spawn_body(world: &mut WorldCore, body: Body) -> Result<BodyId, WorldError> {
    if body.width == 0 || body.height == 0 {
        return Err(WorldError::InvalidSize { width: body.width, height: body.height });
    }
    let origin = body.cell();
    if !body.pos.is_finite() || !world.grid.in_bounds_cell(origin) {
        return Err(WorldError::OutOfBounds { x: origin.x, y: origin.y });
    }
    let query = SolidQuery::everything(&world.occupants);
    if !world.grid.footprint_is_free(origin, body.w(), body.h(), &query) {
        return Err(WorldError::Blocked);
    }
    Ok(insert_body(world, body))
}

/// Store a body without checking its spawn area. Debris relies on this: it is
/// spawned into cells the blast has only just cleared.
pub(super) fn insert_body(world: &mut WorldCore, mut body: Body) -> BodyId {
    let id = BodyId(world.next_id);
    world.next_id += 1;

    body.id = id;
    body.active = true;
    body.footprint = None;
    body.store_last_tick();
    if body.registers_occupancy() {
        let origin = body.cell();
        world.grid.write_footprint(id, origin, body.w(), body.h());
        body.footprint = Some(origin);
    }
    world.occupants.set(id, body.occupant_info());

    let idx = id.index();
    if idx >= world.bodies.len() {
        world.bodies.resize_with(idx + 1, || None);
    }
    log::debug!(
        "spawned {} body {} at ({:.2}, {:.2})",
        body.kind.name(), id.0, body.pos.x, body.pos.y
    );
    world.bodies[idx] = Some(body);
    world.live_bodies += 1;
    id
}

pub(super) fn remove_body(world: &mut WorldCore, id: BodyId) -> Result<Body, WorldError> {
    let mut body = world
        .bodies
        .get_mut(id.index())
        .and_then(Option::take)
        .ok_or(WorldError::UnknownBody(id))?;

    if let Some(origin) = body.footprint.take() {
        world.grid.clear_footprint(id, origin, body.w(), body.h());
    }
    world.occupants.remove(id);
    world.live_bodies -= 1;
    Ok(body)
}

/// Clear the disc, turn some of the cleared terrain into debris and push
/// every body the blast reached away from its center.
pub(super) fn explode(world: &mut WorldCore, center: IVec2, spec: ExplosionSpec) -> Vec<BodyId> {
    let report = world.grid.explode(center, spec.radius);
    let mut hit = report.touched;

    if spec.debris_chance > 0 {
        for cell in report.cleared {
            if !random::roll_percent(&mut world.rng_state, spec.debris_chance) {
                continue;
            }
            let query = SolidQuery::everything(&world.occupants);
            if !world.grid.footprint_is_free(cell, 1, 1, &query) {
                continue;
            }
            let debris = presets::debris(cell.x as f32, cell.y as f32, true);
            hit.insert(insert_body(world, debris));
        }
    }

    let origin = center.as_vec2();
    let damage_factor = world.config.explosion_damage_factor;
    for &id in &hit {
        let Some(Some(body)) = world.bodies.get_mut(id.index()) else {
            continue;
        };
        let body_center = body.center();
        let t = if spec.radius > 0 {
            origin.distance(body_center) / spec.radius as f32
        } else {
            1.0
        };
        let force = spec.max_force * (1.0 - t.clamp(0.0, 1.0));
        body.apply_impulse((body_center - origin).normalize() * force);

        let damage = if body.kind.is_worm() {
            (force / damage_factor) as i32
        } else {
            0
        };
        world.events.push(PhysicsEvent::ExplosionHit { body: id, force, damage });
    }

    world.perf_stats.explosions += 1;
    log::debug!(
        "explosion at ({}, {}) r={} hit {} bodies",
        center.x, center.y, spec.radius, hit.len()
    );
    hit.into_iter().collect()
}

/// Turn a resting debris body back into terrain, if it lies on terrain and
/// nothing else shares its cell or the one below.
pub(super) fn merge_debris(world: &mut WorldCore, id: BodyId) -> bool {
    let Some(body) = world.body(id) else {
        return false;
    };
    let cell = body.cell();
    let below = cell + IVec2::DOWN;
    if !world.grid.in_bounds_cell(cell) || !world.grid.in_bounds_cell(below) {
        return false;
    }

    let foreign = |c: IVec2| world.grid.occupant(c.x, c.y).is_some_and(|o| o != id);
    if !world.grid.is_terrain(below.x, below.y) || foreign(below) || foreign(cell) {
        return false;
    }

    if remove_body(world, id).is_err() {
        return false;
    }
    world.grid.set_solid(cell.x, cell.y, true);
    world.events.push(PhysicsEvent::Destroyed { body: id, reason: DestroyReason::Merged });
    true
}
