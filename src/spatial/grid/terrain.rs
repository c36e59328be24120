use std::collections::BTreeSet;

use super::*;

/// What a blast did to the map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExplosionReport {
    /// Cells that were solid before the blast, in scan order
    pub cleared: Vec<IVec2>,
    /// Distinct bodies whose footprint overlapped the blast
    pub touched: BTreeSet<BodyId>,
}

impl Grid {
    /// Visit every in-bounds cell of the disc around `center`.
    ///
    /// The scan box is half-open: `[c - r, c + r)` on both axes.
    fn for_each_in_disc(&self, center: IVec2, radius: i32, mut f: impl FnMut(usize, IVec2)) {
        let r2 = radius * radius;
        for x in (center.x - radius)..(center.x + radius) {
            for y in (center.y - radius)..(center.y + radius) {
                let dx = x - center.x;
                let dy = y - center.y;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                if let Some(idx) = self.checked_index(x, y) {
                    f(idx, IVec2::new(x, y));
                }
            }
        }
    }

    /// Clear terrain in a disc and report what was hit.
    ///
    /// Takes `&mut self`, so no sweep can observe a half-applied blast.
    pub fn explode(&mut self, center: IVec2, radius: i32) -> ExplosionReport {
        let mut hits: Vec<(usize, IVec2)> = Vec::new();
        self.for_each_in_disc(center, radius, |idx, cell| hits.push((idx, cell)));

        let mut report = ExplosionReport::default();
        for (idx, cell) in hits {
            if self.solid[idx] {
                report.cleared.push(cell);
                self.solid[idx] = false;
            }
            if let Some(id) = self.occupant[idx] {
                report.touched.insert(id);
            }
        }
        report
    }

    /// Paint a disc of terrain solid or empty. Returns the number of cells changed.
    pub fn fill_circle(&mut self, center: IVec2, radius: i32, solid: bool) -> usize {
        let mut targets: Vec<usize> = Vec::new();
        self.for_each_in_disc(center, radius, |idx, _| targets.push(idx));

        let mut changed = 0;
        for idx in targets {
            if self.solid[idx] != solid {
                self.solid[idx] = solid;
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explosion_clears_disc_and_lists_touched_bodies_once() {
        let mut grid = Grid::new(16, 16);
        grid.fill_circle(IVec2::new(8, 8), 8, true);
        grid.write_footprint(BodyId(4), IVec2::new(7, 7), 2, 2);

        let report = grid.explode(IVec2::new(8, 8), 3);

        assert!(!grid.is_terrain(8, 8));
        assert!(!grid.is_terrain(5, 8));
        // half-open scan box: x = c + r is never visited
        assert!(grid.is_terrain(11, 8));
        assert_eq!(report.touched.len(), 1);
        assert!(report.touched.contains(&BodyId(4)));
        assert!(report.cleared.contains(&IVec2::new(8, 8)));
        assert!(report.cleared.iter().all(|c| !grid.is_terrain(c.x, c.y)));
    }

    #[test]
    fn explosion_at_the_map_edge_stays_in_bounds() {
        let mut grid = Grid::from_rows(&["####", "####"]);
        let report = grid.explode(IVec2::new(0, 0), 2);
        assert!(!grid.is_terrain(0, 0));
        assert!(!grid.is_terrain(1, 1));
        assert!(grid.is_terrain(3, 1));
        assert!(report.touched.is_empty());
    }

    #[test]
    fn fill_circle_counts_only_changed_cells() {
        let mut grid = Grid::new(8, 8);
        let first = grid.fill_circle(IVec2::new(4, 4), 1, true);
        assert!(first > 0);
        assert_eq!(grid.fill_circle(IVec2::new(4, 4), 1, true), 0);
        assert_eq!(grid.fill_circle(IVec2::new(4, 4), 1, false), first);
    }
}
