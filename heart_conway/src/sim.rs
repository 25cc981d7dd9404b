// sim.rs - Game of Life generation step on the toroidal grid

use crate::grid::{Grid, TRAIL_CAP};

/// The eight neighbor offsets, `(dc, dr)`.
#[rustfmt::skip]
const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// B3/S23.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

#[inline]
fn count_in(current: &[bool], cols: usize, rows: usize, col: usize, row: usize) -> u8 {
    let mut count = 0;
    for &(dc, dr) in &NEIGHBORS {
        let c = (col as i64 + dc).rem_euclid(cols as i64) as usize;
        let r = (row as i64 + dr).rem_euclid(rows as i64) as usize;
        if current[r * cols + c] {
            count += 1;
        }
    }
    count
}

/// Live neighbors of `(col, row)`, wrapping both axes.
///
/// On grids narrower than three cells an offset can land on the same cell as
/// another offset (or on the cell itself); each offset is counted.
pub fn count_neighbors(grid: &Grid, col: usize, row: usize) -> u8 {
    count_in(grid.alive_slice(), grid.cols(), grid.rows(), col, row)
}

/// Advance `grid` by one generation.
///
/// Next states are written to the scratch buffer and swapped in at the end,
/// so a reader only ever sees a whole generation. Protected cells are outside
/// the simulation: they are never alive, so they never count as neighbors,
/// and the step never brings them to life.
pub fn step(grid: &mut Grid) {
    if grid.is_empty() {
        return;
    }

    let buf = grid.step_buffers();
    for row in 0..buf.rows {
        for col in 0..buf.cols {
            let i = row * buf.cols + col;
            if buf.protected[i] {
                buf.next[i] = false;
                continue;
            }

            let was_alive = buf.current[i];
            let n = count_in(buf.current, buf.cols, buf.rows, col, row);
            let alive = next_state(was_alive, n);
            buf.next[i] = alive;

            match (was_alive, alive) {
                (true, true) => buf.age[i] = buf.age[i].saturating_add(1),
                (false, true) => {
                    buf.age[i] = 1;
                    buf.trail[i] = 0;
                }
                (true, false) => {
                    buf.trail[i] = buf.age[i].min(TRAIL_CAP);
                    buf.age[i] = 0;
                }
                (false, false) => {
                    buf.age[i] = 0;
                    buf.trail[i] = buf.trail[i].saturating_sub(1);
                }
            }
        }
    }

    grid.swap_buffers();
    grid.advance_generation();
}

/// Apply `n` generations.
pub fn step_n(grid: &mut Grid, n: usize) {
    for _ in 0..n {
        step(grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::CellMask;

    fn grid_with(cols: usize, rows: usize, cells: &[(i64, i64)]) -> Grid {
        let mut grid = Grid::new(cols, rows);
        for &(c, r) in cells {
            grid.set_alive(c, r);
        }
        grid
    }

    #[test]
    fn test_rule_table() {
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(next_state(false, 3));
        assert!(!next_state(true, 1));
        assert!(!next_state(true, 4));
        assert!(!next_state(false, 2));
        assert!(!next_state(false, 6));
    }

    #[test]
    fn test_dimensions_preserved() {
        for (cols, rows) in [(1, 1), (1, 5), (2, 2), (3, 7), (16, 9)] {
            let mut grid = grid_with(cols, rows, &[(0, 0)]);
            step_n(&mut grid, 3);
            assert_eq!((grid.cols(), grid.rows(), grid.len()), (cols, rows, cols * rows));
            assert_eq!(grid.generation(), 3);
        }
    }

    #[test]
    fn test_neighbors_wrap_diagonally() {
        let grid = grid_with(5, 4, &[(0, 0), (4, 3)]);
        assert_eq!(count_neighbors(&grid, 0, 0), 1);
        assert_eq!(count_neighbors(&grid, 4, 3), 1);
    }

    #[test]
    fn test_lonely_cell_dies() {
        let mut grid = grid_with(3, 3, &[(1, 1)]);
        step(&mut grid);
        assert_eq!(grid.alive_count(), 0);
        assert_eq!(grid.age(1, 1), 0);
    }

    #[test]
    fn test_block_is_still_life() {
        let mut grid = grid_with(6, 6, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
        let before = grid.alive_cells();
        step(&mut grid);
        assert_eq!(grid.alive_cells(), before);
        assert!(before.iter().all(|&(c, r)| count_neighbors(&grid, c, r) == 3));
    }

    #[test]
    fn test_block_across_the_seam_is_still_life() {
        let mut grid = grid_with(6, 5, &[(5, 4), (0, 4), (5, 0), (0, 0)]);
        let before = grid.alive_cells();
        step_n(&mut grid, 4);
        assert_eq!(grid.alive_cells(), before);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut grid = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        step(&mut grid);
        assert_eq!(grid.alive_cells(), vec![(2, 1), (2, 2), (2, 3)]);
        step(&mut grid);
        assert_eq!(grid.alive_cells(), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_ages_follow_transitions() {
        let mut grid = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        step(&mut grid);
        // center survives, ends born
        assert_eq!(grid.age(2, 2), 2);
        assert_eq!(grid.age(2, 1), 1);
        assert_eq!(grid.age(1, 2), 0);
        step(&mut grid);
        assert_eq!(grid.age(2, 2), 3);
        assert_eq!(grid.age(1, 2), 1);
        assert_eq!(grid.age(2, 1), 0);
    }

    #[test]
    fn test_age_increments_while_alive() {
        let mut grid = grid_with(6, 6, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
        for expected in 2..=6 {
            step(&mut grid);
            assert_eq!(grid.age(2, 2), expected);
        }
    }

    #[test]
    fn test_trail_set_on_death_and_decays() {
        let mut lonely = grid_with(5, 5, &[(2, 2)]);
        step(&mut lonely);
        assert_eq!(lonely.trail(2, 2), 1);
        step(&mut lonely);
        assert_eq!(lonely.trail(2, 2), 0);
    }

    #[test]
    fn test_trail_capped() {
        let mut grid = grid_with(8, 8, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
        step_n(&mut grid, 11);
        assert_eq!(grid.age(3, 2), 12);
        // overcrowd the right-hand column of the block
        grid.set_alive(4, 2);
        step(&mut grid);
        assert!(!grid.is_alive(3, 2));
        assert_eq!(grid.trail(3, 2), TRAIL_CAP);
    }

    #[test]
    fn test_protected_cells_never_live() {
        // A blinker whose birth cells sit under the overlay.
        let mut grid = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        grid.set_protected(&CellMask::from_fn(5, 5, |c, r| c == 2 && r == 1));
        for _ in 0..6 {
            step(&mut grid);
            assert!(!grid.is_alive(2, 1));
        }
    }

    #[test]
    fn test_protected_cells_do_not_count() {
        // (2, 0) is under the overlay, so it never supplies a third neighbor.
        let mut grid = grid_with(5, 5, &[(1, 0), (3, 0)]);
        grid.set_protected(&CellMask::from_fn(5, 5, |c, r| c == 2 && r == 0));
        assert_eq!(count_neighbors(&grid, 2, 1), 2);
        step(&mut grid);
        assert!(!grid.is_alive(2, 1));
    }
}
