use crate::grid::CellState::{self, Alive, Dead};
use crate::grid::Grid;
use crate::neighbors;

/// Computes generations into a scratch buffer it owns, then commits them to
/// the grid in one swap.
#[derive(Debug, Default)]
pub struct GenerationStepper {
    scratch: Vec<CellState>,
}

impl GenerationStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the grid by one generation.
    ///
    /// Every cell is computed from the previous generation only; the grid is
    /// not touched until the whole pass is done. Returns whether anything
    /// changed.
    pub fn step(&mut self, grid: &mut Grid) -> bool {
        self.scratch.clear();
        self.scratch.reserve(grid.rows() * grid.cols());

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let alive_neighbors = neighbors::count(grid, row, col);
                self.scratch.push(next_state(grid.cell_at(row, col), alive_neighbors));
            }
        }

        if self.scratch.as_slice() == grid.as_slice() {
            return false;
        }
        grid.commit(&mut self.scratch);
        true
    }
}

/// B3/S23.
pub fn next_state(cell: CellState, alive_neighbors: usize) -> CellState {
    match (cell, alive_neighbors) {
        (Alive, 2..=3) => Alive, // Survives
        (Dead, 3) => Alive,      // Becomes alive
        _ => Dead,               // Dies or remains dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            let survives = if n == 2 || n == 3 { Alive } else { Dead };
            let born = if n == 3 { Alive } else { Dead };
            assert_eq!(next_state(Alive, n), survives, "alive with {n}");
            assert_eq!(next_state(Dead, n), born, "dead with {n}");
        }
    }

    #[test]
    fn blinker_oscillates() {
        let mut grid = Grid::new(5, 5).unwrap();
        for col in 1..4 {
            grid.set(2, col, Alive).unwrap();
        }
        let horizontal = grid.clone();
        let mut stepper = GenerationStepper::new();

        assert!(stepper.step(&mut grid));
        for row in 0..5 {
            for col in 0..5 {
                let expected = if col == 2 && (1..4).contains(&row) { Alive } else { Dead };
                assert_eq!(grid.get(row, col).unwrap(), expected, "({row}, {col})");
            }
        }

        assert!(stepper.step(&mut grid));
        assert_eq!(grid, horizontal);
    }

    #[test]
    fn unchanged_generation_reports_false() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut stepper = GenerationStepper::new();
        assert!(!stepper.step(&mut grid));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn glider_crosses_the_wrapped_edge() {
        let mut grid = Grid::new(6, 6).unwrap();
        for (row, col) in [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)] {
            grid.set(row, col, Alive).unwrap();
        }
        let start = grid.clone();
        let mut stepper = GenerationStepper::new();

        // A glider moves one cell diagonally every 4 generations, so after
        // 4 * 6 it has travelled once around the torus.
        for _ in 0..24 {
            stepper.step(&mut grid);
            assert_eq!(grid.population(), 5);
        }
        assert_eq!(grid, start);
    }
}
