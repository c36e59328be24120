//! Approximate surface normal from a 3x3 terrain lookup.
//!
//! Not a gradient. The raw "push back the way we came" vector is bent by half
//! a unit per solid neighbour of the contact cell, which is enough to make
//! slopes and corners deflect bodies sideways.

use crate::spatial::grid::Grid;
use crate::systems::body::{IVec2, Vec2};

const NUDGE: f32 = 0.5;

/// Rebound direction for a body sitting in `contact` that ran into `hit`.
///
/// Only terrain counts; occupants are ignored. Out-of-bounds neighbours are empty.
pub fn estimate(grid: &Grid, contact: IVec2, hit: IVec2) -> Vec2 {
    let d = hit - contact;
    let mut n = Vec2::new(-d.x as f32, -d.y as f32);

    let solid = |ox: i32, oy: i32| grid.is_terrain(contact.x + ox, contact.y + oy);

    // Neighbours facing the direction of travel
    let mut east = false;
    let mut west = false;
    let mut north_east = false;
    let mut north_west = false;
    let mut south_east = false;
    let mut south_west = false;
    if d.x > 0 {
        east = solid(1, 0);
        if d.y == 0 {
            north_east = solid(1, 1);
            south_east = solid(1, -1);
        }
    } else if d.x < 0 {
        west = solid(-1, 0);
        if d.y == 0 {
            north_west = solid(-1, 1);
            south_west = solid(-1, -1);
        }
    } else {
        east = solid(1, 0);
        west = solid(-1, 0);
        if d.y > 0 {
            north_east = solid(1, 1);
            north_west = solid(-1, 1);
        } else if d.y < 0 {
            south_east = solid(1, -1);
            south_west = solid(-1, -1);
        }
    }

    let (north, south) = if d.y > 0 {
        (solid(0, 1), false)
    } else if d.y < 0 {
        (false, solid(0, -1))
    } else {
        (solid(0, 1), solid(0, -1))
    };

    if east {
        n.x -= NUDGE;
    }
    if west {
        n.x += NUDGE;
    }
    if north {
        n.y -= NUDGE;
    }
    if south {
        n.y += NUDGE;
    }

    // A diagonal bends whichever axis the travel did not already fix.
    let bend = |n: &mut Vec2, sx: f32, sy: f32| {
        if d.x != 0 {
            n.y += sy * NUDGE;
        } else if d.y != 0 {
            n.x += sx * NUDGE;
        }
    };
    if north_east {
        bend(&mut n, -1.0, -1.0);
    }
    if north_west {
        bend(&mut n, 1.0, -1.0);
    }
    if south_east {
        bend(&mut n, -1.0, 1.0);
    }
    if south_west {
        bend(&mut n, 1.0, 1.0);
    }

    n.normalize()
}
