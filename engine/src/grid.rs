use crate::config::Density;
use crate::error::{LifeError, Result};
use rand::Rng;
use CellState::{Alive, Dead};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == Alive
    }
}

/// Fixed-size toroidal grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Allocates a `rows` x `cols` grid with every cell dead.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::Config(format!(
                "grid dimensions must be positive, got {rows}x{cols}"
            )));
        }
        Ok(Grid {
            rows,
            cols,
            cells: vec![Dead; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState> {
        self.index(row, col).map(|index| self.cells[index])
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        let index = self.index(row, col)?;
        self.cells[index] = state;
        Ok(())
    }

    /// Sets every cell dead.
    pub fn clear(&mut self) {
        self.cells.fill(Dead);
    }

    /// Re-rolls every cell from the thread-local RNG.
    pub fn randomize(&mut self, density: Density) {
        self.randomize_with(density, &mut rand::rng());
    }

    pub fn randomize_with<R: Rng + ?Sized>(&mut self, density: Density, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = if rng.random_range(0..density.denominator()) == density.numerator() {
                Alive
            } else {
                Dead
            };
        }
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// All cells with their coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, &cell)| (index / cols, index % cols, cell))
    }

    /// Unchecked read for coordinates already reduced into range.
    pub(crate) fn cell_at(&self, row: usize, col: usize) -> CellState {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn as_slice(&self) -> &[CellState] {
        &self.cells
    }

    /// Replaces the whole generation at once. `next` receives the old cells.
    pub(crate) fn commit(&mut self, next: &mut Vec<CellState>) {
        debug_assert_eq!(next.len(), self.cells.len());
        std::mem::swap(&mut self.cells, next);
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::Index {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }
}
