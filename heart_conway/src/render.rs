// render.rs - Paints the grid onto a PixelSurface

use crate::grid::{Grid, TRAIL_CAP};
use crate::surface::{PixelSurface, Rgba};

/// Upper bounds (exclusive) of the first four age buckets; the fifth bucket
/// is everything from 50 generations on.
pub const AGE_BUCKETS: [u32; 4] = [3, 8, 20, 50];

/// Colours for the automaton. Live cells darken as they mature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba,
    /// Protected (label) cells.
    pub overlay: Rgba,
    /// One colour per age bucket, youngest first.
    pub ages: [Rgba; 5],
    /// Colour of the fading glow left where a cell died.
    pub glow: Rgba,
    /// Glow opacity for a trail at [`TRAIL_CAP`].
    pub glow_alpha: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [18, 6, 14, 255],
            overlay: [255, 244, 248, 255],
            ages: [
                [255, 182, 203, 255],
                [255, 120, 160, 255],
                [232, 62, 110, 255],
                [176, 28, 72, 255],
                [112, 12, 44, 255],
            ],
            glow: [255, 120, 160, 255],
            glow_alpha: 96,
        }
    }
}

impl Palette {
    pub fn bucket(age: u32) -> usize {
        AGE_BUCKETS
            .iter()
            .position(|&limit| age < limit)
            .unwrap_or(AGE_BUCKETS.len())
    }

    pub fn bucket_color(&self, age: u32) -> Rgba {
        self.ages[Self::bucket(age)]
    }

    /// Glow opacity for a cell that died `trail` steps' worth ago.
    pub fn trail_alpha(&self, trail: u32) -> u8 {
        let t = trail.min(TRAIL_CAP);
        (self.glow_alpha as u32 * t / TRAIL_CAP) as u8
    }
}

/// Draw every cell as a `cell_size` square. Cells past the surface edge are
/// clipped.
///
/// Returns `false` without drawing when the surface (or grid) has nothing to
/// draw on yet.
pub fn render(grid: &Grid, palette: &Palette, cell_size: usize, surface: &mut PixelSurface) -> bool {
    if !surface.is_ready() || grid.is_empty() || cell_size == 0 {
        return false;
    }

    surface.fill(palette.background);
    let alive = grid.alive_slice();
    let protected = grid.protected_slice();

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let i = row * grid.cols() + col;
            let (x, y) = (col * cell_size, row * cell_size);
            if protected[i] {
                surface.fill_rect(x, y, cell_size, cell_size, palette.overlay);
            } else if alive[i] {
                let color = palette.bucket_color(grid.age(col, row));
                surface.fill_rect(x, y, cell_size, cell_size, color);
            } else {
                let trail = grid.trail(col, row);
                if trail > 0 {
                    let alpha = palette.trail_alpha(trail);
                    surface.blend_rect(x, y, cell_size, cell_size, palette.glow, alpha);
                }
            }
        }
    }
    true
}
