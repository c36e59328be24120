use super::*;
use crate::systems::body::{Body, BodyFlags, IgnoreRule, OccupantInfo, Vec2};

/// Read-only occupant descriptors, indexed by `BodyId`.
///
/// Kept apart from the body table so a body can be borrowed mutably for its
/// tick while its sweep still inspects everyone else.
#[derive(Clone, Debug, Default)]
pub struct OccupantTable {
    entries: Vec<Option<OccupantInfo>>,
}

impl OccupantTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: BodyId, info: OccupantInfo) {
        let idx = id.index();
        if idx >= self.entries.len() {
            self.entries.resize(idx + 1, None);
        }
        self.entries[idx] = Some(info);
    }

    pub fn remove(&mut self, id: BodyId) {
        if let Some(slot) = self.entries.get_mut(id.index()) {
            *slot = None;
        }
    }

    pub fn get(&self, id: BodyId) -> Option<OccupantInfo> {
        self.entries.get(id.index()).copied().flatten()
    }
}

/// What counts as "solid" for one particular body.
///
/// A cell is solid if it is terrain, or if it is occupied by a different body
/// that is neither excluded by `ignore_objects` nor by the ignore rule.
#[derive(Clone, Copy)]
pub struct SolidQuery<'a> {
    pub self_id: Option<BodyId>,
    pub ignore_objects: bool,
    pub ignore: IgnoreRule,
    occupants: &'a OccupantTable,
}

impl<'a> SolidQuery<'a> {
    /// Terrain plus every occupant.
    pub fn everything(occupants: &'a OccupantTable) -> Self {
        Self {
            self_id: None,
            ignore_objects: false,
            ignore: IgnoreRule::None,
            occupants,
        }
    }

    pub fn for_body(body: &Body, occupants: &'a OccupantTable) -> Self {
        Self {
            self_id: Some(body.id),
            ignore_objects: body.flags.contains(BodyFlags::DISABLE_OBJECT_COLLISIONS),
            ignore: body.ignore,
            occupants,
        }
    }

    /// Same body, but every other occupant blocks regardless of flags or rule.
    pub fn strict(&self) -> Self {
        Self {
            self_id: self.self_id,
            ignore_objects: false,
            ignore: IgnoreRule::None,
            occupants: self.occupants,
        }
    }

    fn blocks(&self, occupant: BodyId) -> bool {
        if Some(occupant) == self.self_id || self.ignore_objects {
            return false;
        }
        let ignored = match self.ignore {
            IgnoreRule::None => false,
            IgnoreRule::IgnoredByObjects => self
                .occupants
                .get(occupant)
                .is_some_and(|o| o.flags.contains(BodyFlags::IGNORED_BY_OBJECTS)),
            IgnoreRule::Worms => self.occupants.get(occupant).is_some_and(|o| o.is_worm),
        };
        !ignored
    }
}

impl Grid {
    /// Solidity as seen by `query`. Out-of-bounds cells are never solid.
    #[inline]
    pub fn is_solid_for(&self, x: i32, y: i32, query: &SolidQuery<'_>) -> bool {
        let Some(idx) = self.checked_index(x, y) else {
            return false;
        };
        if self.solid[idx] {
            return true;
        }
        match self.occupant[idx] {
            Some(other) => query.blocks(other),
            None => false,
        }
    }

    /// Any solid cell among `count` cells starting at `start`'s cell and
    /// stepping by `dir`.
    pub fn any_solid_in_run(&self, start: Vec2, dir: IVec2, count: i32, query: &SolidQuery<'_>) -> bool {
        let origin = start.cell();
        (0..count).any(|i| self.is_solid_for(origin.x + i * dir.x, origin.y + i * dir.y, query))
    }

    /// Claim the cells under a `w`×`h` box at `origin` for `id`.
    pub fn write_footprint(&mut self, id: BodyId, origin: IVec2, w: i32, h: i32) {
        for dy in 0..h {
            for dx in 0..w {
                if let Some(idx) = self.checked_index(origin.x + dx, origin.y + dy) {
                    self.occupant[idx] = Some(id);
                }
            }
        }
    }

    /// Release the cells under a box, leaving cells claimed by other bodies alone.
    pub fn clear_footprint(&mut self, id: BodyId, origin: IVec2, w: i32, h: i32) {
        for dy in 0..h {
            for dx in 0..w {
                if let Some(idx) = self.checked_index(origin.x + dx, origin.y + dy) {
                    if self.occupant[idx] == Some(id) {
                        self.occupant[idx] = None;
                    }
                }
            }
        }
    }

    /// True when every in-bounds cell of the box is free of terrain and occupants.
    pub fn footprint_is_free(&self, origin: IVec2, w: i32, h: i32, query: &SolidQuery<'_>) -> bool {
        for dy in 0..h {
            for dx in 0..w {
                if self.is_solid_for(origin.x + dx, origin.y + dy, query) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(id: BodyId, info: OccupantInfo) -> OccupantTable {
        let mut table = OccupantTable::new();
        table.set(id, info);
        table
    }

    #[test]
    fn own_footprint_is_not_solid_but_others_are() {
        let me = BodyId(1);
        let other = BodyId(2);
        let table = table_with(other, OccupantInfo { flags: BodyFlags::empty(), is_worm: false });
        let mut grid = Grid::new(8, 8);
        grid.write_footprint(me, IVec2::new(1, 1), 2, 2);
        grid.write_footprint(other, IVec2::new(5, 1), 1, 1);

        let mut body = Body::new_rect(1.0, 1.0, 2, 2);
        body.id = me;
        let query = SolidQuery::for_body(&body, &table);
        assert!(!grid.is_solid_for(1, 1, &query));
        assert!(!grid.is_solid_for(2, 2, &query));
        assert!(grid.is_solid_for(5, 1, &query));
    }

    #[test]
    fn ignore_rules_filter_occupants() {
        let worm = BodyId(3);
        let table = table_with(worm, OccupantInfo { flags: BodyFlags::IGNORED_BY_OBJECTS, is_worm: true });
        let mut grid = Grid::new(4, 4);
        grid.write_footprint(worm, IVec2::new(0, 0), 1, 1);

        let mut body = Body::new_rect(2.0, 2.0, 1, 1);
        body.id = BodyId(9);
        assert!(grid.is_solid_for(0, 0, &SolidQuery::for_body(&body, &table)));

        body.ignore = IgnoreRule::Worms;
        assert!(!grid.is_solid_for(0, 0, &SolidQuery::for_body(&body, &table)));

        body.ignore = IgnoreRule::IgnoredByObjects;
        let query = SolidQuery::for_body(&body, &table);
        assert!(!grid.is_solid_for(0, 0, &query));
        assert!(grid.is_solid_for(0, 0, &query.strict()));

        body.ignore = IgnoreRule::None;
        body.flags = BodyFlags::DISABLE_OBJECT_COLLISIONS;
        assert!(!grid.is_solid_for(0, 0, &SolidQuery::for_body(&body, &table)));
    }

    #[test]
    fn clearing_a_footprint_keeps_foreign_claims() {
        let mut grid = Grid::new(4, 4);
        grid.write_footprint(BodyId(1), IVec2::new(0, 0), 2, 1);
        grid.write_footprint(BodyId(2), IVec2::new(1, 0), 1, 1);
        grid.clear_footprint(BodyId(1), IVec2::new(0, 0), 2, 1);
        assert_eq!(grid.occupant(0, 0), None);
        assert_eq!(grid.occupant(1, 0), Some(BodyId(2)));
    }

    #[test]
    fn run_scan_fails_open_outside_the_map() {
        let table = OccupantTable::new();
        let query = SolidQuery::everything(&table);
        let grid = Grid::from_rows(&["....", "##.."]);
        assert!(grid.any_solid_in_run(Vec2::new(0.5, 0.0), IVec2::RIGHT, 2, &query));
        assert!(!grid.any_solid_in_run(Vec2::new(2.0, 0.0), IVec2::RIGHT, 5, &query));
        assert!(!grid.any_solid_in_run(Vec2::new(-3.0, 0.0), IVec2::RIGHT, 2, &query));
    }
}
