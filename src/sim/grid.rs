//! Grid geometry and cell sets
//!
//! Cells are integer `IVec2` coordinates with `0 <= x < cols` and `0 <= y < rows`.
//! Everything here is pure; the game state owns the only mutable data.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::{MAX_DIMENSION, MIN_COLS};

/// Off-grid food marker used when no cell is free
pub const NO_FOOD: IVec2 = IVec2::NEG_ONE;

/// Orthogonal neighbor offsets in search order (+x, -x, +y, -y)
pub const NEIGHBOR_OFFSETS: [IVec2; 4] = [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y];

/// Board dimensions, fixed for the life of a game
///
/// Deserializing goes through `Grid::new`, so a snapshot can't smuggle in a
/// board the constructor would reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows: i32,
    cols: i32,
}

/// Unchecked wire form of `Grid`
#[derive(Deserialize)]
struct RawGrid {
    rows: u32,
    cols: u32,
}

impl TryFrom<RawGrid> for Grid {
    type Error = ConfigError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Grid::new(raw.rows, raw.cols)
    }
}

impl Grid {
    /// Validate dimensions and build a grid
    pub fn new(rows: u32, cols: u32) -> Result<Self, ConfigError> {
        if rows == 0 || cols < MIN_COLS || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(ConfigError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows: rows as i32,
            cols: cols as i32,
        })
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells
    #[inline]
    pub fn area(&self) -> usize {
        (self.rows * self.cols) as usize
    }

    /// Middle cell, rounding toward the origin
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.cols / 2, self.rows / 2)
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    /// Canonical key of an in-bounds cell (row-major index)
    #[inline]
    pub fn index_of(&self, cell: IVec2) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| (cell.y * self.cols + cell.x) as usize)
    }

    /// All cells in row-major order (y outer, x inner)
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| IVec2::new(x, y)))
    }

    /// In-bounds orthogonal neighbors in search order
    pub fn neighbors(&self, cell: IVec2) -> impl Iterator<Item = IVec2> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |offset| cell + *offset)
            .filter(move |next| self.in_bounds(*next))
    }

    /// Short label used in run records, e.g. "15x15"
    pub fn label(&self) -> String {
        format!("{}x{}", self.cols, self.rows)
    }
}

/// Manhattan distance between two cells
#[inline]
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// True for the off-grid food marker (or any negative coordinate)
#[inline]
pub fn is_no_food(cell: IVec2) -> bool {
    cell.x < 0 || cell.y < 0
}

/// Dense membership set over one grid's cells
///
/// Off-grid cells are never members; inserting one is ignored.
#[derive(Debug, Clone)]
pub struct CellSet {
    grid: Grid,
    bits: Vec<bool>,
}

impl CellSet {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            bits: vec![false; grid.area()],
        }
    }

    /// Build a set from any cell iterator
    pub fn from_cells(grid: Grid, cells: impl IntoIterator<Item = IVec2>) -> Self {
        let mut set = Self::new(grid);
        set.extend(cells);
        set
    }

    /// Insert a cell, returning true if it was not already present
    pub fn insert(&mut self, cell: IVec2) -> bool {
        match self.grid.index_of(cell) {
            Some(idx) => !std::mem::replace(&mut self.bits[idx], true),
            None => false,
        }
    }

    pub fn remove(&mut self, cell: IVec2) -> bool {
        match self.grid.index_of(cell) {
            Some(idx) => std::mem::replace(&mut self.bits[idx], false),
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        self.grid.index_of(cell).is_some_and(|idx| self.bits[idx])
    }

    pub fn len(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|b| *b)
    }
}

impl Extend<IVec2> for CellSet {
    fn extend<T: IntoIterator<Item = IVec2>>(&mut self, iter: T) {
        for cell in iter {
            self.insert(cell);
        }
    }
}
