//! Grid - Structure of Arrays (SoA) map of terrain cells
//!
//! Each cell is solid or empty and holds at most one occupant handle.
//! Rows are stored bottom-up: y = 0 is the floor of the map, +y is up.
//!
//! Instead of: Vec<Cell { solid, occupant }>
//! We have:    solid[], occupant[]  // the sweep reads `solid` far more often

use crate::systems::body::{BodyId, IVec2};

mod indexing;
mod occupancy;
mod terrain;

pub use occupancy::{OccupantTable, SolidQuery};
pub use terrain::ExplosionReport;

/// Snapshot of one cell, for callers that want the whole record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub position: IVec2,
    pub solid: bool,
    pub occupant: Option<BodyId>,
}

/// SoA Grid - terrain solidity and body occupancy in separate arrays
pub struct Grid {
    width: u32,
    height: u32,

    pub(crate) solid: Vec<bool>,
    pub(crate) occupant: Vec<Option<BodyId>>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            solid: vec![false; size],
            occupant: vec![None; size],
        }
    }

    /// Build a grid from text rows, top row first. `#` marks a solid cell.
    ///
    /// Rows shorter than the longest one are padded with empty cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut grid = Grid::new(width, height);
        for (row_idx, row) in rows.iter().enumerate() {
            let y = height - 1 - row_idx as u32;
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    let idx = grid.index(x as u32, y);
                    grid.solid[idx] = true;
                }
            }
        }
        grid
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = self.index(x as u32, y as u32);
        Some(Cell {
            position: IVec2::new(x, y),
            solid: self.solid[idx],
            occupant: self.occupant[idx],
        })
    }

    /// Terrain solidity only; out-of-bounds is empty.
    #[inline]
    pub fn is_terrain(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.solid[self.index(x as u32, y as u32)]
    }

    pub fn set_solid(&mut self, x: i32, y: i32, solid: bool) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x as u32, y as u32);
        self.solid[idx] = solid;
        true
    }

    #[inline]
    pub fn occupant(&self, x: i32, y: i32) -> Option<BodyId> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.occupant[self.index(x as u32, y as u32)]
    }

    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|s| **s).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_puts_last_row_at_the_bottom() {
        let grid = Grid::from_rows(&[
            "#...",
            "....",
            "..##",
        ]);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.is_terrain(0, 2));
        assert!(grid.is_terrain(2, 0));
        assert!(grid.is_terrain(3, 0));
        assert!(!grid.is_terrain(0, 0));
        assert_eq!(grid.solid_count(), 3);
    }

    #[test]
    fn out_of_bounds_cells_are_empty() {
        let grid = Grid::from_rows(&["###"]);
        assert!(!grid.is_terrain(-1, 0));
        assert!(!grid.is_terrain(3, 0));
        assert!(!grid.is_terrain(0, 1));
        assert!(grid.cell(5, 5).is_none());
        assert_eq!(grid.occupant(-3, 0), None);
    }

    #[test]
    fn cell_snapshot_reports_position_and_solidity() {
        let mut grid = Grid::new(4, 4);
        assert!(grid.set_solid(2, 3, true));
        assert!(!grid.set_solid(4, 0, true));
        let cell = grid.cell(2, 3).unwrap();
        assert_eq!(cell.position, IVec2::new(2, 3));
        assert!(cell.solid);
        assert_eq!(cell.occupant, None);
    }
}
