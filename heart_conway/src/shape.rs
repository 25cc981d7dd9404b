// shape.rs - Turns target shapes (heart curve, label text) into cell masks

use crate::surface::PixelSurface;

/// A `cols × rows` boolean mask at grid resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMask {
    cols: usize,
    rows: usize,
    bits: Vec<bool>,
}

impl CellMask {
    pub fn empty(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            bits: vec![false; cols * rows],
        }
    }

    pub fn from_fn(cols: usize, rows: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut bits = Vec::with_capacity(cols * rows);
        for r in 0..rows {
            for c in 0..cols {
                bits.push(f(c, r));
            }
        }
        Self { cols, rows, bits }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows && self.bits[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn get_index(&self, i: usize) -> bool {
        self.bits[i]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn is_clear(&self) -> bool {
        !self.bits.contains(&true)
    }
}

// -----------------------------
// Heart curve
// -----------------------------

/// Placement of the heart curve, as fractions of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartShape {
    /// Horizontal center, fraction of `cols`.
    pub center_x: f32,
    /// Vertical center of the heart's bounding box, fraction of `rows`.
    pub center_y: f32,
    /// Unit length of the curve, fraction of `min(cols, rows)`.
    pub scale: f32,
}

impl Default for HeartShape {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            scale: 0.36,
        }
    }
}

/// `(x²+y²−1)³ − x²y³ ≤ 0`, with y pointing up.
#[inline]
pub fn inside_heart(x: f32, y: f32) -> bool {
    let a = x * x + y * y - 1.0;
    a * a * a - x * x * y * y * y <= 0.0
}

/// Rasterize the heart curve at cell centers.
pub fn heart_mask(cols: usize, rows: usize, shape: &HeartShape) -> CellMask {
    let s = (cols.min(rows) as f32 * shape.scale).max(f32::EPSILON);
    // The curve spans y in [-1, 1.25]; shift so that range is centered.
    let cx = shape.center_x * cols as f32;
    let cy = shape.center_y * rows as f32 + 0.125 * s;
    CellMask::from_fn(cols, rows, |c, r| {
        let x = (c as f32 + 0.5 - cx) / s;
        let y = (cy - (r as f32 + 0.5)) / s;
        inside_heart(x, y)
    })
}

/// The small heart dropped under the pointer on click, as `(dx, dy)` offsets
/// from the clicked cell.
pub fn heart_stamp() -> Vec<(i64, i64)> {
    const ROWS: [u8; 6] = [
        0b0110110, //
        0b1111111, //
        0b1111111, //
        0b0111110, //
        0b0011100, //
        0b0001000, //
    ];
    let mut cells = Vec::new();
    for (dy, bits) in ROWS.iter().enumerate() {
        for dx in 0..7 {
            if (bits >> (6 - dx)) & 1 == 1 {
                cells.push((dx as i64 - 3, dy as i64 - 2));
            }
        }
    }
    cells
}

// -----------------------------
// Label text
// -----------------------------

/// Renders text onto an offscreen surface.
///
/// Implementations return `None` when no surface can be produced yet (for
/// instance a zero-sized canvas); callers treat that as "retry later".
pub trait GlyphRasterizer {
    fn rasterize(&self, text: &str, width: usize, height: usize) -> Option<PixelSurface>;
}

/// Brightness above which a sampled pixel counts as part of the label.
pub const LABEL_THRESHOLD: u8 = 127;

/// Rasterize `text` at canvas resolution and sample each cell's center pixel.
///
/// Returns an all-false mask when the rasterizer has no surface to give.
pub fn label_mask(
    rasterizer: &dyn GlyphRasterizer,
    text: &str,
    width: usize,
    height: usize,
    cell_size: usize,
) -> CellMask {
    let cell_size = cell_size.max(1);
    let cols = width / cell_size;
    let rows = height / cell_size;

    let Some(surface) = rasterizer.rasterize(text, width, height) else {
        log::warn!("label surface not ready ({width}x{height}); overlay left empty");
        return CellMask::empty(cols, rows);
    };

    let half = cell_size / 2;
    CellMask::from_fn(cols, rows, |c, r| {
        surface.luminance(c * cell_size + half, r * cell_size + half) > LABEL_THRESHOLD
    })
}
