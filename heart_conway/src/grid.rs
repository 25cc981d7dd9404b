// grid.rs - Toroidal cell buffers for the heart automaton

use crate::shape::CellMask;
use rand::Rng;

/// Longest glow left behind by a dying cell, in generations.
pub const TRAIL_CAP: u32 = 8;

/// `cols × rows` toroidal lattice.
///
/// All buffers are flat, row-major and always the same length. `alive` and
/// `next` form the double buffer swapped after every generation; `protected`
/// is the overlay mask and is never touched by the simulation.
pub struct Grid {
    cols: usize,
    rows: usize,

    alive: Vec<bool>,
    next: Vec<bool>,
    age: Vec<u32>,
    trail: Vec<u32>,
    protected: Vec<bool>,

    generation: u64,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        let mut grid = Self {
            cols: 0,
            rows: 0,
            alive: Vec::new(),
            next: Vec::new(),
            age: Vec::new(),
            trail: Vec::new(),
            protected: Vec::new(),
            generation: 0,
        };
        grid.resize(cols, rows);
        grid
    }

    /// Reallocate every buffer for the new dimensions, zero-filled.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        let n = cols * rows;
        self.cols = cols;
        self.rows = rows;
        self.alive = vec![false; n];
        self.next = vec![false; n];
        self.age = vec![0; n];
        self.trail = vec![0; n];
        self.protected = vec![false; n];
        self.generation = 0;
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Flat index of `(col, row)`, wrapping both axes.
    #[inline]
    pub fn index(&self, col: i64, row: i64) -> usize {
        let c = col.rem_euclid(self.cols as i64) as usize;
        let r = row.rem_euclid(self.rows as i64) as usize;
        r * self.cols + c
    }

    /// Flat index of `(col, row)`, or `None` outside the grid.
    #[inline]
    fn checked(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.cols && row < self.rows).then(|| row * self.cols + col)
    }

    /// `false` outside the grid.
    #[inline]
    pub fn is_alive(&self, col: usize, row: usize) -> bool {
        self.checked(col, row).is_some_and(|i| self.alive[i])
    }

    /// `0` outside the grid.
    #[inline]
    pub fn age(&self, col: usize, row: usize) -> u32 {
        self.checked(col, row).map_or(0, |i| self.age[i])
    }

    #[inline]
    pub fn trail(&self, col: usize, row: usize) -> u32 {
        self.checked(col, row).map_or(0, |i| self.trail[i])
    }

    #[inline]
    pub fn is_protected(&self, col: usize, row: usize) -> bool {
        self.checked(col, row).is_some_and(|i| self.protected[i])
    }

    /// Install the overlay mask. Live cells now under the overlay are killed.
    pub fn set_protected(&mut self, mask: &CellMask) {
        assert_eq!(
            (mask.cols(), mask.rows()),
            (self.cols, self.rows),
            "protected mask must match grid dimensions"
        );
        for i in 0..self.len() {
            let covered = mask.get_index(i);
            self.protected[i] = covered;
            if covered {
                self.alive[i] = false;
                self.age[i] = 0;
                self.trail[i] = 0;
            }
        }
    }

    /// Kill every cell and reset the generation counter. The overlay stays.
    pub fn clear(&mut self) {
        self.alive.fill(false);
        self.next.fill(false);
        self.age.fill(0);
        self.trail.fill(0);
        self.generation = 0;
    }

    /// Reseed from `mask`: each non-protected cell inside it comes alive with
    /// probability `density` and age 1. Everything else is dead.
    pub fn seed<R: Rng + ?Sized>(&mut self, mask: &CellMask, density: f64, rng: &mut R) {
        assert_eq!(
            (mask.cols(), mask.rows()),
            (self.cols, self.rows),
            "seed mask must match grid dimensions"
        );
        self.clear();
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        for i in 0..self.len() {
            if self.protected[i] || !mask.get_index(i) {
                continue;
            }
            if rng.random_bool(density) {
                self.alive[i] = true;
                self.age[i] = 1;
            }
        }
    }

    /// Bring `(col, row)` to life, wrapping out-of-range coordinates.
    ///
    /// Protected cells are skipped. A cell that is already alive keeps its
    /// age. Returns whether the cell is alive afterwards.
    pub fn set_alive(&mut self, col: i64, row: i64) -> bool {
        if self.is_empty() {
            return false;
        }
        let i = self.index(col, row);
        if self.protected[i] {
            return false;
        }
        if !self.alive[i] {
            self.alive[i] = true;
            self.age[i] = 1;
            self.trail[i] = 0;
        }
        true
    }

    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Live cells as `(col, row)`, in row-major order.
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.alive
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a)
            .map(|(i, _)| (i % self.cols, i / self.cols))
            .collect()
    }

    /// Exchange the current and scratch alive-state buffers.
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.alive, &mut self.next);
    }

    pub(crate) fn alive_slice(&self) -> &[bool] {
        &self.alive
    }

    pub(crate) fn protected_slice(&self) -> &[bool] {
        &self.protected
    }

    /// Scratch buffer together with the per-cell ages and trails, for the
    /// engine to write one generation.
    pub(crate) fn step_buffers(&mut self) -> StepBuffers<'_> {
        StepBuffers {
            cols: self.cols,
            rows: self.rows,
            current: &self.alive,
            next: &mut self.next,
            age: &mut self.age,
            trail: &mut self.trail,
            protected: &self.protected,
        }
    }

    pub(crate) fn advance_generation(&mut self) {
        self.generation += 1;
    }
}

pub(crate) struct StepBuffers<'a> {
    pub cols: usize,
    pub rows: usize,
    pub current: &'a [bool],
    pub next: &'a mut [bool],
    pub age: &'a mut [u32],
    pub trail: &'a mut [u32],
    pub protected: &'a [bool],
}
