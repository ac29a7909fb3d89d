//! Dense row-major cell storage shared by the engines.

use grid_arcade_core::{BoardSize, Point};

/// Fixed-size two-dimensional array indexed by [`Point`].
///
/// Cells are stored row by row so that `cells()[y * width + x]` is the cell at
/// `(x, y)`. Lookups outside the board return `None` instead of panicking.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    size: BoardSize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid where every cell holds a copy of `fill`.
    #[must_use]
    pub fn new(size: BoardSize, fill: T) -> Self {
        Self {
            size,
            cells: vec![fill; size.cell_count()],
        }
    }
}

impl<T> Grid<T> {
    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the cell at `point`, if it lies on the grid.
    #[must_use]
    pub fn get(&self, point: Point) -> Option<&T> {
        self.index(point).and_then(|index| self.cells.get(index))
    }

    /// Returns a mutable reference to the cell at `point`, if it lies on the grid.
    pub fn get_mut(&mut self, point: Point) -> Option<&mut T> {
        self.index(point).and_then(|index| self.cells.get_mut(index))
    }

    /// Row-major storage index of `point`.
    #[must_use]
    pub fn index(&self, point: Point) -> Option<usize> {
        if !self.size.contains(point) {
            return None;
        }
        let row = usize::try_from(point.y()).ok()?;
        let column = usize::try_from(point.x()).ok()?;
        let width = usize::try_from(self.size.width()).ok()?;
        Some(row * width + column)
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterates over the grid one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        let width = usize::try_from(self.size.width()).unwrap_or(0).max(1);
        self.cells.chunks(width)
    }
}
