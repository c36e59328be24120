use crate::systems::body::{IVec2, Vec2};

use super::perf::{bump, PERF_PATH_STEPS};

/// Upper bound on rasterized nodes; longer segments are refused
const MAX_PATH_NODES: i64 = 1 << 20;

/// Order in which a diagonal node-to-node gap is split into unit steps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepOrder {
    /// Vertical step first, then horizontal
    #[default]
    FavorY,
    FavorX,
}

/// Unit cardinal steps walked by a point moving along a straight segment.
///
/// A path for a segment that never leaves its starting cell is a single
/// `IVec2::ZERO` marker. An empty path means the segment was unusable
/// (non-finite or absurdly long).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<IVec2>,
}

impl Path {
    pub fn steps(&self) -> &[IVec2] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True for the "no movement" marker.
    pub fn is_stationary(&self) -> bool {
        self.steps.len() == 1 && self.steps[0] == IVec2::ZERO
    }

    pub fn iter(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.steps.iter().copied()
    }

    /// Sum of all steps: end cell minus start cell.
    pub fn offset(&self) -> IVec2 {
        self.steps.iter().fold(IVec2::ZERO, |acc, s| acc + *s)
    }
}

/// Rasterize with the default vertical-first tie-break.
pub fn rasterize(start: Vec2, end: Vec2) -> Path {
    rasterize_with(start, end, StepOrder::FavorY)
}

pub fn rasterize_with(start: Vec2, end: Vec2, order: StepOrder) -> Path {
    let nodes = collision_nodes(start, end);
    let path = nodes_to_path(&nodes, order);
    bump(&PERF_PATH_STEPS, path.len() as u64);
    path
}

/// Cells crossed by the segment `start -> end`, in travel order.
///
/// Walks the horizontal extent column by column. Inside a column the line
/// covers a contiguous run of rows; the run is emitted bottom-up or top-down
/// following the direction of travel. Where the line passes exactly through a
/// cell corner, consecutive nodes differ on both axes.
pub fn collision_nodes(start: Vec2, end: Vec2) -> Vec<IVec2> {
    if !start.is_finite() || !end.is_finite() {
        return Vec::new();
    }

    let first = start.cell();
    let last = end.cell();
    let span = (last.x as i64 - first.x as i64).abs() + (last.y as i64 - first.y as i64).abs() + 1;
    if span > MAX_PATH_NODES {
        log::warn!(
            "path from ({}, {}) to ({}, {}) spans {} cells; refusing to rasterize",
            start.x, start.y, end.x, end.y, span
        );
        return Vec::new();
    }

    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let step_y = if last.y > first.y { 1 } else if last.y < first.y { -1 } else { 0 };

    let mut nodes = Vec::with_capacity(span as usize);

    // Vertical segment (or no movement at all): a single column.
    if dx == 0.0 {
        push_rows(&mut nodes, first.x, first.y, last.y, step_y);
        return nodes;
    }

    let a = dy / dx;
    let b = start.y - a * start.x;
    let step_x = if dx > 0.0 { 1 } else { -1 };
    let columns = (last.x - first.x).abs() + 1;

    let mut row = first.y;
    for i in 0..columns {
        let column = first.x + i * step_x;
        if i == columns - 1 {
            push_rows(&mut nodes, column, row, last.y, step_y);
            break;
        }

        // Where the line leaves this column
        let exit_x = (if step_x > 0 { column + 1 } else { column }) as f32;
        let exit_y = a * exit_x + b;
        let (row_out, row_next) = if dy > 0.0 {
            (exit_y.ceil() as i32 - 1, exit_y.floor() as i32)
        } else if dy < 0.0 {
            (exit_y.floor() as i32, exit_y.ceil() as i32 - 1)
        } else {
            (first.y, first.y)
        };

        let row_out = clamp_row(row_out, row, last.y, step_y);
        push_rows(&mut nodes, column, row, row_out, step_y);
        row = clamp_row(row_next, row_out, last.y, step_y);
    }

    nodes
}

/// Keep `r` between `from` and `to` along the travel direction (float slack).
#[inline]
fn clamp_row(r: i32, from: i32, to: i32, step_y: i32) -> i32 {
    match step_y {
        1 => r.clamp(from, to),
        -1 => r.clamp(to, from),
        _ => from,
    }
}

#[inline]
fn push_rows(nodes: &mut Vec<IVec2>, column: i32, from: i32, to: i32, step_y: i32) {
    let mut y = from;
    nodes.push(IVec2::new(column, y));
    while y != to && step_y != 0 {
        y += step_y;
        nodes.push(IVec2::new(column, y));
    }
}

/// Differences between consecutive nodes, diagonals split per `order`.
///
/// No nodes gives an empty path; a single node gives the stationary marker.
pub fn nodes_to_path(nodes: &[IVec2], order: StepOrder) -> Path {
    match nodes.len() {
        0 => return Path::default(),
        1 => return Path { steps: vec![IVec2::ZERO] },
        _ => {}
    }

    let mut steps = Vec::with_capacity(nodes.len() + nodes.len() / 2);
    for pair in nodes.windows(2) {
        let d = pair[1] - pair[0];
        if d.x != 0 && d.y != 0 {
            let vertical = IVec2::new(0, d.y);
            let horizontal = IVec2::new(d.x, 0);
            match order {
                StepOrder::FavorY => steps.extend([vertical, horizontal]),
                StepOrder::FavorX => steps.extend([horizontal, vertical]),
            }
        } else if d != IVec2::ZERO {
            steps.push(d);
        }
    }

    if steps.is_empty() {
        steps.push(IVec2::ZERO);
    }
    Path { steps }
}
