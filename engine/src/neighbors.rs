use crate::grid::Grid;

/// Moore neighbourhood offsets as `(row, col)`, centre excluded.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Counts the live cells among the 8 neighbours of `(row, col)`, wrapping
/// around every edge of the grid.
pub fn count(grid: &Grid, row: usize, col: usize) -> usize {
    OFFSETS
        .iter()
        .filter(|&&(dr, dc)| {
            let neighbor_row = wrap(row, dr, grid.rows());
            let neighbor_col = wrap(col, dc, grid.cols());
            grid.cell_at(neighbor_row, neighbor_col).is_alive()
        })
        .count()
}

/// `(index + offset) mod len` with a non-negative result even when the sum is negative.
fn wrap(index: usize, offset: isize, len: usize) -> usize {
    (index as isize + offset).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Density;
    use crate::grid::CellState::Alive;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_with(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        for &(row, col) in alive {
            grid.set(row, col, Alive).unwrap();
        }
        grid
    }

    #[test]
    fn wrap_stays_in_range_at_both_edges() {
        assert_eq!(wrap(0, -1, 5), 4);
        assert_eq!(wrap(4, 1, 5), 0);
        assert_eq!(wrap(2, 0, 5), 2);
        assert_eq!(wrap(0, -1, 1), 0);
    }

    #[test]
    fn empty_grid_has_no_neighbors() {
        let grid = Grid::new(4, 4).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(count(&grid, row, col), 0);
            }
        }
    }

    #[test]
    fn centre_cell_is_not_its_own_neighbor() {
        let grid = grid_with(5, 5, &[(2, 2)]);
        assert_eq!(count(&grid, 2, 2), 0);
        assert_eq!(count(&grid, 1, 1), 1);
    }

    #[test]
    fn fully_surrounded_cell_counts_eight() {
        let alive: Vec<_> = (0..3).flat_map(|r| (0..3).map(move |c| (r, c))).collect();
        let grid = grid_with(6, 6, &alive);
        assert_eq!(count(&grid, 1, 1), 8);
    }

    #[test]
    fn origin_sees_opposite_corner() {
        let grid = grid_with(6, 9, &[(5, 8)]);
        assert_eq!(count(&grid, 0, 0), 1);
    }

    #[test]
    fn top_row_sees_bottom_row_in_every_column() {
        let rows = 7;
        let cols = 5;
        for col in 0..cols {
            let grid = grid_with(rows, cols, &[(rows - 1, col)]);
            assert_eq!(count(&grid, 0, col), 1, "column {col}");
        }
    }

    #[test]
    fn left_column_sees_right_column() {
        let grid = grid_with(5, 7, &[(2, 6)]);
        assert_eq!(count(&grid, 2, 0), 1);
        assert_eq!(count(&grid, 1, 0), 1);
        assert_eq!(count(&grid, 3, 0), 1);
    }

    #[test]
    fn matches_independent_sum_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(42);
        for (rows, cols) in [(1, 1), (2, 3), (3, 3), (9, 13)] {
            let mut grid = Grid::new(rows, cols).unwrap();
            grid.randomize_with(Density::new(0, 2).unwrap(), &mut rng);
            for row in 0..rows {
                for col in 0..cols {
                    let up = (row + rows - 1) % rows;
                    let down = (row + 1) % rows;
                    let left = (col + cols - 1) % cols;
                    let right = (col + 1) % cols;
                    let expected = [
                        (up, left),
                        (up, col),
                        (up, right),
                        (row, left),
                        (row, right),
                        (down, left),
                        (down, col),
                        (down, right),
                    ]
                    .iter()
                    .filter(|&&(r, c)| grid.get(r, c).unwrap().is_alive())
                    .count();
                    let actual = count(&grid, row, col);
                    assert!(actual <= 8);
                    assert_eq!(actual, expected, "{rows}x{cols} at ({row}, {col})");
                }
            }
        }
    }
}
