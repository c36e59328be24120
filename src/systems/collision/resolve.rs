use crate::domain::config::PhysicsConfig;
use crate::spatial::grid::{Grid, OccupantTable, SolidQuery};
use crate::systems::body::{Body, BodyFlags, BounceInfo, Vec2};
use crate::systems::events::{DestroyReason, PhysicsEvent, TickEffects};

use super::contact;
use super::normal;
use super::perf::{bump, PERF_ABORTS};
use super::sweep::detect;
use super::types::{Resolution, ResolveReport};

/// Sweep/solve rounds allowed per body per tick
pub const MAX_ITERATIONS: u32 = 5;

/// Read-only world state a body's tick is resolved against.
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    pub grid: &'a Grid,
    pub occupants: &'a OccupantTable,
    pub config: &'a PhysicsConfig,
}

/// Move `body` by `velocity * dt`, sliding and bouncing off whatever it meets.
///
/// Writes the body's position and velocity only; the grid footprint is left
/// for the caller to commit once this returns.
pub fn resolve_motion(
    body: &mut Body,
    ctx: &TickContext<'_>,
    fx: &mut TickEffects,
    dt: f32,
) -> ResolveReport {
    let mut report = run(body, ctx, fx, dt);

    if body.flags.contains(BodyFlags::DISABLE_HORIZONTAL_MOVEMENT) {
        body.velocity.x = 0.0;
    }
    if body.flags.contains(BodyFlags::DISABLE_UPWARD_MOVEMENT) && body.velocity.y > 0.0 {
        body.velocity.y = 0.0;
    }

    if report.outcome == Resolution::FellOut {
        log::debug!("body {} left the bottom of the map at ({:.2}, {:.2})", body.id.0, body.pos.x, body.pos.y);
        body.active = false;
        fx.emit(PhysicsEvent::Destroyed { body: body.id, reason: DestroyReason::FellOut });
    } else if !body.active {
        report.outcome = Resolution::Destroyed;
    }
    report
}

fn run(body: &mut Body, ctx: &TickContext<'_>, fx: &mut TickEffects, dt: f32) -> ResolveReport {
    let grid = ctx.grid;
    let mut vel = body.velocity;

    if vel.is_zero() || dt <= 0.0 || !dt.is_finite() {
        return ResolveReport::new(Resolution::Idle);
    }
    if !vel.is_finite() || !body.pos.is_finite() {
        log::warn!("body {} has a non-finite state; dropping its velocity", body.id.0);
        body.velocity = Vec2::zero();
        return ResolveReport::new(Resolution::Idle);
    }

    let dest = body.pos + vel * dt;
    if body.flags.contains(BodyFlags::DISABLE_COLLISIONS) {
        body.pos = dest;
        return ResolveReport::new(fell_or(body, Resolution::Unobstructed));
    }
    if dest.y >= grid.height() as f32 {
        body.pos = dest;
        return ResolveReport::new(Resolution::ExitedTop);
    }

    let query = SolidQuery::for_body(body, ctx.occupants);
    let strict = query.strict();
    let mut report = ResolveReport::new(Resolution::Aborted);
    let mut to_move = (vel * dt).length();
    let mut last_contact: Option<Vec2> = None;

    while report.iterations < MAX_ITERATIONS {
        report.iterations += 1;
        let delta = vel * dt;

        let Some(record) = detect(grid, body, &query, body.pos, delta) else {
            body.pos += delta;
            report.outcome = fell_or(body, Resolution::Settled);
            return report;
        };
        report.first_contact.get_or_insert(record);

        let solution = contact::solve(grid, body, &strict, body.pos, delta, &record);
        solution.constrain(&mut vel);
        solution.constrain(&mut body.velocity);
        let contact = solution.position;

        let normal = normal::estimate(grid, record.contact_cell, record.hit_cell);
        let rebound = vel - normal * (2.0 * vel.dot(normal));
        let mut blended = (record.slide / dt).lerp(rebound, body.elasticity);

        let old_velocity = body.velocity;
        if old_velocity.length() > body.rebound_threshold {
            let hit = BounceInfo {
                record,
                position: contact,
                old_velocity,
                normal,
                other: record.occupant.and_then(|id| ctx.occupants.get(id)),
            };
            body.on_bounce(&hit, &mut blended, ctx.config, fx);
            if !body.active {
                body.pos = contact;
                report.outcome = Resolution::Destroyed;
                return report;
            }
        } else {
            body.on_stop(contact, fx);
            report.stop_fired = true;
            body.velocity = Vec2::zero();
            body.pos = contact;
            report.outcome = Resolution::Stopped;
            return report;
        }

        vel = blended;
        let moved = body.pos.distance(contact);
        body.pos = contact;
        if moved >= to_move {
            report.outcome = Resolution::Exhausted;
            return report;
        }
        if moved > 0.0 {
            vel = vel / to_move * (to_move - moved);
            to_move = (vel * dt).length();
        }

        if last_contact == Some(contact) {
            report.outcome = Resolution::Stalled;
            return report;
        }
        last_contact = Some(contact);
    }

    bump(&PERF_ABORTS, 1);
    log::error!(
        "body {} did not settle after {} iterations at ({:.3}, {:.3})",
        body.id.0, report.iterations, body.pos.x, body.pos.y
    );
    fx.emit(PhysicsEvent::Aborted {
        body: body.id,
        position: body.pos,
        iterations: report.iterations,
    });
    report
}

#[inline]
fn fell_or(body: &Body, otherwise: Resolution) -> Resolution {
    if body.pos.y < 0.0 {
        Resolution::FellOut
    } else {
        otherwise
    }
}
