use super::*;

impl Grid {
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    /// Row-major offset of an in-bounds cell. Row 0 is the bottom of the map.
    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y)
    }

    #[inline]
    pub fn in_bounds_cell(&self, cell: IVec2) -> bool {
        self.in_bounds(cell.x, cell.y)
    }

    /// Offset of `(x, y)`, or `None` when it lies outside the map.
    #[inline]
    pub fn checked_index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| self.index(x as u32, y as u32))
    }
}
