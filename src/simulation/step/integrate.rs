use crate::domain::PhysicsConfig;
use crate::spatial::grid::{Grid, OccupantTable, SolidQuery};
use crate::systems::body::{Body, BodyFlags, IVec2, Vec2};

use super::random;

/// How far below the box the grounded probe looks
const GROUND_PROBE: f32 = 0.06;

/// Sideways shift a fluid body makes per tick when it finds somewhere to go
const FLOW_STEP: f32 = 0.25;

/// Cells to either side of the one below that a fluid body may flow towards
const FLOW_REACH: i32 = 3;

/// Gravity, ground friction and the dead zone on horizontal speed.
/// Runs before the sweep; returns whether the body was grounded.
pub(super) fn apply_forces(
    grid: &Grid,
    occupants: &OccupantTable,
    config: &PhysicsConfig,
    body: &mut Body,
) -> bool {
    let query = SolidQuery::for_body(body, occupants);
    let probe = body.pos - Vec2::new(0.0, GROUND_PROBE);
    let grounded = grid.any_solid_in_run(probe, IVec2::RIGHT, body.w(), &query);

    if !grounded {
        if !body.flags.contains(BodyFlags::DISABLE_GRAVITY) {
            body.velocity.y -= config.gravity * body.mass;
        }
    } else if body.velocity.y.abs() < config.ground_snap_speed {
        body.velocity.y = 0.0;
        body.velocity.x *= config.ground_friction * body.friction;
    }

    let vx = body.velocity.x.abs();
    if body.flags.contains(BodyFlags::DISABLE_HORIZONTAL_MOVEMENT)
        || (vx > 0.0 && vx < config.min_horizontal_speed)
    {
        body.velocity.x = 0.0;
    }
    grounded
}

/// Let a resting or rising fluid body trickle towards the nearest open cell
/// on the row below. The first reachable side wins; ties are broken by coin.
pub(super) fn flow_fluid(
    grid: &Grid,
    occupants: &OccupantTable,
    body: &mut Body,
    rng_state: &mut u32,
) -> bool {
    if body.velocity.y < 0.0 {
        return false;
    }

    let query = SolidQuery::for_body(body, occupants);
    let below = body.cell() + IVec2::DOWN;
    let open = |c: IVec2| grid.in_bounds_cell(c) && !grid.is_terrain(c.x, c.y);

    for reach in 1..=FLOW_REACH {
        let left = below + IVec2::new(-reach, 0);
        let right = below + IVec2::new(reach, 0);
        let (target, dir) = match (open(left), open(right)) {
            (true, true) => {
                if random::coin(rng_state) {
                    (left, -1.0)
                } else {
                    (right, 1.0)
                }
            }
            (true, false) => (left, -1.0),
            (false, true) => (right, 1.0),
            (false, false) => continue,
        };

        if grid.is_solid_for(target.x, target.y, &query)
            || grid.is_solid_for(target.x, target.y + 1, &query)
        {
            continue;
        }
        body.pos.x += dir * FLOW_STEP;
        return true;
    }
    false
}
