use crate::spatial::grid::{Grid, SolidQuery};
use crate::systems::body::{Body, IVec2, Vec2};

use super::perf::{bump, PERF_WEDGES};
use super::types::{Axis, CollisionRecord, Direction};

/// Clearance kept between a resting box edge and the boundary it touches
pub const EPSILON: f32 = 0.01;

/// Below this the vertical displacement is treated as exactly zero
const FLAT_DY: f32 = 0.0001;

/// Below this `|dx|` a vertical hit keeps its x instead of solving the line
const STEEP_DX: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactSolution {
    /// Box origin just short of the crossed boundary
    pub position: Vec2,
    /// Set when the box had to be snapped back onto the boundary; the
    /// velocity along this axis must be dropped.
    pub wedged: Option<Axis>,
}

impl ContactSolution {
    /// Zero the wedged component of `v`, if any.
    pub fn constrain(&self, v: &mut Vec2) {
        match self.wedged {
            Some(Axis::X) => v.x = 0.0,
            Some(Axis::Y) => v.y = 0.0,
            None => {}
        }
    }
}

/// Exact stopping position for a box that started at `pos`, was displaced
/// by `delta` this iteration and produced `record`.
///
/// The contacting corner (`pos + hit_part`) is followed along the line of
/// travel until the box edge sits `EPSILON` short of the crossed boundary.
/// `query` should be the strict variant of the body's query: the wedge test
/// counts every other occupant.
pub fn solve(
    grid: &Grid,
    body: &Body,
    query: &SolidQuery<'_>,
    pos: Vec2,
    delta: Vec2,
    record: &CollisionRecord,
) -> ContactSolution {
    let part = record.hit_part.as_vec2();
    let origin = pos + part;
    let dx = delta.x;
    let dy = if delta.y.abs() < FLAT_DY { 0.0 } else { delta.y };
    let a = dy / dx;
    let b = origin.y - a * origin.x;
    let line = record.boundary.coordinate() as f32;
    let (w, h) = (body.width as f32, body.height as f32);

    // y of the box origin once the corner has travelled to `corner_x`
    let y_at = |corner_x: f32| -> f32 {
        let y = a * corner_x + b - part.y;
        if a.is_finite() && y.is_finite() {
            y
        } else {
            pos.y
        }
    };
    // x of the box origin once the corner has travelled to `corner_y`
    let x_at = |corner_y: f32| -> f32 {
        if dx.abs() <= STEEP_DX || a == 0.0 || !a.is_finite() {
            return pos.x;
        }
        let x = (corner_y - b) / a - part.x;
        if x.is_finite() {
            x
        } else {
            pos.x
        }
    };

    let mut position = match record.direction {
        Direction::Right => {
            let x = line - w - EPSILON;
            Vec2::new(x, y_at(x + part.x))
        }
        Direction::Left => {
            let x = line + EPSILON;
            Vec2::new(x, y_at(x + part.x))
        }
        Direction::Up => {
            let y = line - h - EPSILON;
            Vec2::new(x_at(y + part.y), y)
        }
        Direction::Down => {
            let y = line + EPSILON;
            Vec2::new(x_at(y + part.y), y)
        }
    };

    // The whole edge row/column the contacting corner lies in must be clear,
    // not only the corner cell.
    let corner = position + part;
    let overlaps = if record.direction.is_horizontal() {
        grid.any_solid_in_run(Vec2::new(corner.x, position.y), IVec2::UP, body.h(), query)
    } else {
        grid.any_solid_in_run(Vec2::new(position.x, corner.y), IVec2::RIGHT, body.w(), query)
    };

    let mut wedged = None;
    if overlaps {
        match record.direction {
            Direction::Right => position.x += EPSILON,
            Direction::Left => position.x -= EPSILON,
            Direction::Up => position.y += EPSILON,
            Direction::Down => position.y -= EPSILON,
        }
        wedged = Some(if record.direction.is_horizontal() { Axis::X } else { Axis::Y });
        bump(&PERF_WEDGES, 1);
        log::debug!(
            "body {} wedged at ({:.3}, {:.3}) moving {:?}",
            body.id.0, position.x, position.y, record.direction
        );
    }

    ContactSolution { position, wedged }
}
