use core::fmt;
use core::ops::{Index, IndexMut};

use grid_util::grid::SimpleGrid;
use grid_util::point::Point;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::error::FieldError;
use crate::N_SMALLVEC_SIZE;

pub use grid_util::grid::Grid as ValueGrid;

/// Linear indices of neighbouring cells, returned by the neighbour queries of [Grid].
pub type Neighbours = SmallVec<[usize; N_SMALLVEC_SIZE]>;

/// Dense row-major 2-D container. A cell at `(x, y)` lives at index `y * width + x`.
/// The dimensions are fixed at construction. Cell access goes through [ValueGrid]; out-of-range
/// coordinates panic.
#[derive(Clone, Debug, Default)]
pub struct Grid<T: Copy> {
    grid: SimpleGrid<T>,
}

impl<T: Copy> ValueGrid<T> for Grid<T> {
    /// Creates a `width` by `height` grid with every cell set to `default_value`.
    fn new(width: usize, height: usize, default_value: T) -> Self {
        Grid {
            grid: SimpleGrid::new(width, height, default_value),
        }
    }
    fn get(&self, x: usize, y: usize) -> T {
        assert!(
            self.index_in_bounds(x, y),
            "Cannot get grid value at ({x}, {y}), grid is {}x{}",
            self.width(),
            self.height()
        );
        self.grid.get(x, y)
    }
    fn set(&mut self, x: usize, y: usize, value: T) {
        assert!(
            self.index_in_bounds(x, y),
            "Cannot set grid value at ({x}, {y}), grid is {}x{}",
            self.width(),
            self.height()
        );
        self.grid.set(x, y, value);
    }
    fn width(&self) -> usize {
        self.grid.width
    }
    fn height(&self) -> usize {
        self.grid.height
    }
}

impl<T: Copy> Grid<T> {
    /// Wraps row-major `cells`, which must hold exactly `width * height` values.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Result<Self, FieldError> {
        if cells.len() != width * height {
            return Err(FieldError::CellCount {
                expected: width * height,
                found: cells.len(),
            });
        }
        Ok(Grid {
            grid: SimpleGrid {
                width,
                height,
                values: cells,
            },
        })
    }
    /// Overwrites every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.grid.values.fill(value);
    }
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
    /// Number of cells.
    pub fn area(&self) -> usize {
        self.grid.values.len()
    }
    pub fn cells(&self) -> &[T] {
        &self.grid.values
    }
    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.grid.values
    }
    pub fn same_dimensions<U: Copy>(&self, other: &Grid<U>) -> bool {
        self.dimensions() == other.dimensions()
    }
    /// Returns an error naming both shapes if `other` does not match this grid.
    pub(crate) fn check_dimensions<U: Copy>(&self, other: &Grid<U>) -> Result<(), FieldError> {
        if self.same_dimensions(other) {
            Ok(())
        } else {
            Err(FieldError::DimensionMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            })
        }
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.area()
    }
    /// Inverse of [get_ix](ValueGrid::get_ix).
    pub fn coordinate(&self, index: usize) -> (usize, usize) {
        (index % self.width(), index / self.width())
    }
    pub fn point(&self, index: usize) -> Point {
        let (x, y) = self.coordinate(index);
        Point::new(x as i32, y as i32)
    }
    pub fn get_index(&self, index: usize) -> T {
        self.grid.values[index]
    }
    pub fn set_index(&mut self, index: usize, value: T) {
        self.grid.values[index] = value;
    }

    /// The in-bounds 4-connected neighbours of `(x, y)`: left, right, up (`y - 1`) and down
    /// (`y + 1`), in that order.
    pub fn direct_neighbours(&self, x: usize, y: usize) -> Neighbours {
        let mut neighbours = Neighbours::new();
        if x > 0 {
            neighbours.push(self.get_ix(x - 1, y));
        }
        if x + 1 < self.width() {
            neighbours.push(self.get_ix(x + 1, y));
        }
        if y > 0 {
            neighbours.push(self.get_ix(x, y - 1));
        }
        if y + 1 < self.height() {
            neighbours.push(self.get_ix(x, y + 1));
        }
        neighbours
    }
    /// The in-bounds corner neighbours of `(x, y)`, left column first.
    pub fn diagonal_neighbours(&self, x: usize, y: usize) -> Neighbours {
        let mut neighbours = Neighbours::new();
        let up = y > 0;
        let down = y + 1 < self.height();
        if x > 0 {
            if up {
                neighbours.push(self.get_ix(x - 1, y - 1));
            }
            if down {
                neighbours.push(self.get_ix(x - 1, y + 1));
            }
        }
        if x + 1 < self.width() {
            if up {
                neighbours.push(self.get_ix(x + 1, y - 1));
            }
            if down {
                neighbours.push(self.get_ix(x + 1, y + 1));
            }
        }
        neighbours
    }
    /// Direct neighbours followed by diagonal neighbours.
    pub fn all_neighbours(&self, x: usize, y: usize) -> Neighbours {
        let mut neighbours = self.direct_neighbours(x, y);
        neighbours.extend(self.diagonal_neighbours(x, y));
        neighbours
    }
}

impl<T: Copy + PartialEq> PartialEq for Grid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_dimensions(other) && self.cells() == other.cells()
    }
}

impl<T: Copy + Eq> Eq for Grid<T> {}

impl<T: Copy> Index<usize> for Grid<T> {
    type Output = T;
    fn index(&self, index: usize) -> &T {
        &self.grid.values[index]
    }
}

impl<T: Copy> IndexMut<usize> for Grid<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.grid.values[index]
    }
}

impl<T: Copy> Index<(usize, usize)> for Grid<T> {
    type Output = T;
    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(self.index_in_bounds(x, y));
        &self.grid.values[self.get_ix(x, y)]
    }
}

impl<T: Copy> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(self.index_in_bounds(x, y));
        let ix = self.get_ix(x, y);
        &mut self.grid.values[ix]
    }
}

impl<T: Copy + fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.width() == 0 {
            return Ok(());
        }
        for row in self.cells().chunks(self.width()) {
            writeln!(f, "{}", row.iter().join(", "))?;
        }
        Ok(())
    }
}
