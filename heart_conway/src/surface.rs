// surface.rs - Owned RGBA8 pixel surface (the "canvas")

/// An RGBA colour, one byte per channel.
pub type Rgba = [u8; 4];

/// Alpha blend a single channel.
/// Uses the fast approximation (x + 1 + (x >> 8)) >> 8 instead of x / 255.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Row-major RGBA8 pixel buffer. A zero-sized surface is "not ready":
/// drawing and sampling on it are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height * 4, 0);
    }

    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw bytes, `width * height * 4` long.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn fill(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y * self.width + x) * 4;
        let p = &self.pixels[off..off + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let off = (y * self.width + x) * 4;
        self.pixels[off..off + 4].copy_from_slice(&color);
    }

    /// Perceived brightness (Rec. 601) premultiplied by alpha, 0..=255.
    pub fn luminance(&self, x: usize, y: usize) -> u8 {
        match self.pixel(x, y) {
            Some([r, g, b, a]) => {
                let l = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
                (l * a as u32 / 255) as u8
            }
            None => 0,
        }
    }

    /// Fill an axis-aligned rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgba) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        if x >= x1 || y >= y1 {
            return;
        }
        for py in y..y1 {
            let row = py * self.width * 4;
            for px in self.pixels[row + x * 4..row + x1 * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }

    /// Source-over blend of `color` at `alpha` into a clipped rectangle.
    /// The destination stays opaque.
    pub fn blend_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgba, alpha: u8) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        if x >= x1 || y >= y1 {
            return;
        }
        let a = alpha as u16;
        for py in y..y1 {
            let row = py * self.width * 4;
            for px in self.pixels[row + x * 4..row + x1 * 4].chunks_exact_mut(4) {
                px[0] = blend_channel(color[0], px[0], a);
                px[1] = blend_channel(color[1], px[1], a);
                px[2] = blend_channel(color[2], px[2], a);
                px[3] = 255;
            }
        }
    }
}
