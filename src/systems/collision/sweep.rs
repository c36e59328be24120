use crate::spatial::grid::{Grid, SolidQuery};
use crate::systems::body::{Body, IVec2, Vec2};

use super::path::{rasterize_with, StepOrder};
use super::perf::{bump, PERF_CONTACTS, PERF_SWEEPS};
use super::types::{Boundary, CollisionRecord, Direction};

/// Walk `body` from `from` by `delta` and report the first blocking cell.
///
/// Only the leading edge is tested on each step: the column the box enters
/// for horizontal steps, the row it enters for vertical ones. The edge is
/// scanned starting from the side the trajectory leans towards, so a box
/// travelling down-right meets the lowest blocked cell of its right column
/// first.
///
/// A destination above the top of the map is never tested.
#[inline]
pub fn detect(
    grid: &Grid,
    body: &Body,
    query: &SolidQuery<'_>,
    from: Vec2,
    delta: Vec2,
) -> Option<CollisionRecord> {
    detect_with(grid, body, query, from, delta, StepOrder::FavorY)
}

pub fn detect_with(
    grid: &Grid,
    body: &Body,
    query: &SolidQuery<'_>,
    from: Vec2,
    delta: Vec2,
    order: StepOrder,
) -> Option<CollisionRecord> {
    bump(&PERF_SWEEPS, 1);

    let dest = from + delta;
    if dest.y >= grid.height() as f32 {
        return None;
    }

    let path = rasterize_with(from, dest, order);
    let (w, h) = (body.w(), body.h());
    let mut cursor = from.cell();

    for step in path.iter() {
        let Some(direction) = Direction::from_step(step) else {
            continue;
        };
        cursor += step;

        let hit = match direction {
            Direction::Right | Direction::Left => {
                let (nx, contact_x, part_x, line) = if direction == Direction::Right {
                    let nx = cursor.x + w - 1;
                    (nx, nx - 1, w - 1, nx)
                } else {
                    let nx = cursor.x;
                    (nx, nx + 1, 0, nx + 1)
                };
                let slide = Vec2::new(0.0, delta.y);
                edge_order(h, delta.y > 0.0).find_map(|y| {
                    probe(
                        grid,
                        query,
                        IVec2::new(nx, cursor.y + y),
                        IVec2::new(contact_x, cursor.y + y),
                        IVec2::new(part_x, y),
                        Boundary::Vertical(line),
                        direction,
                        slide,
                    )
                })
            }
            Direction::Up | Direction::Down => {
                let (ny, contact_y, part_y, line) = if direction == Direction::Up {
                    let ny = cursor.y + h - 1;
                    (ny, ny - 1, h - 1, ny)
                } else {
                    let ny = cursor.y;
                    (ny, ny + 1, 0, ny + 1)
                };
                let slide = Vec2::new(delta.x, 0.0);
                edge_order(w, delta.x > 0.0).find_map(|x| {
                    probe(
                        grid,
                        query,
                        IVec2::new(cursor.x + x, ny),
                        IVec2::new(cursor.x + x, contact_y),
                        IVec2::new(x, part_y),
                        Boundary::Horizontal(line),
                        direction,
                        slide,
                    )
                })
            }
        };

        if hit.is_some() {
            bump(&PERF_CONTACTS, 1);
            return hit;
        }
    }

    None
}

/// Offsets along a leading edge of length `len`, far end first when `descending`.
#[inline]
fn edge_order(len: i32, descending: bool) -> impl Iterator<Item = i32> {
    (0..len).map(move |i| if descending { len - 1 - i } else { i })
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn probe(
    grid: &Grid,
    query: &SolidQuery<'_>,
    cell: IVec2,
    contact: IVec2,
    part: IVec2,
    boundary: Boundary,
    direction: Direction,
    slide: Vec2,
) -> Option<CollisionRecord> {
    if !grid.is_solid_for(cell.x, cell.y, query) {
        return None;
    }
    let occupant = if grid.is_terrain(cell.x, cell.y) {
        None
    } else {
        grid.occupant(cell.x, cell.y)
    };
    Some(CollisionRecord {
        hit_cell: cell,
        occupant,
        contact_cell: contact,
        hit_part: part,
        boundary,
        direction,
        slide,
    })
}
