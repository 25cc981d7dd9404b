// font.rs - Tiny 5x7 bitmap font, the built-in GlyphRasterizer

use crate::shape::GlyphRasterizer;
use crate::surface::PixelSurface;

const GLYPH_W: usize = 5;
const GLYPH_H: usize = 7;
/// Horizontal advance per character, in unscaled pixels.
const ADVANCE: usize = GLYPH_W + 1;

fn glyph(c: char) -> [u8; GLYPH_H] {
    match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b10010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],

        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b10000, 0b11110, 0b00001, 0b00001, 0b11110],
        '6' => [0b01110, 0b10000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001, 0b01110],

        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100],
        ':' => [0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000],
        '\'' => [0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        _ => [0; GLYPH_H],
    }
}

/// Draws text with the 5x7 font, white on opaque black, scaled up by the
/// largest integer factor that fits and centered on the canvas.
#[derive(Debug, Clone, Copy)]
pub struct BitmapFont {
    /// Max text width, fraction of `min(width, height)`.
    pub max_width: f32,
    /// Max text height, fraction of `min(width, height)`.
    pub max_height: f32,
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self {
            max_width: 0.5,
            max_height: 0.2,
        }
    }
}

impl BitmapFont {
    /// Unscaled pixel width of `text` (no trailing spacing).
    pub fn text_width(text: &str) -> usize {
        let n = text.chars().count();
        if n == 0 { 0 } else { n * ADVANCE - 1 }
    }

    /// Integer scale used for a `width × height` canvas, at least 1.
    pub fn scale_for(&self, text: &str, width: usize, height: usize) -> usize {
        let unscaled = Self::text_width(text).max(1) as f32;
        let side = width.min(height) as f32;
        let by_w = (side * self.max_width / unscaled).floor() as usize;
        let by_h = (side * self.max_height / GLYPH_H as f32).floor() as usize;
        by_w.min(by_h).max(1)
    }

    fn draw(&self, surface: &mut PixelSurface, text: &str, x0: usize, y0: usize, scale: usize) {
        let mut x = x0;
        for ch in text.chars() {
            for (row, bits) in glyph(ch).iter().enumerate() {
                for col in 0..GLYPH_W {
                    if (bits >> (GLYPH_W - 1 - col)) & 1 == 0 {
                        continue;
                    }
                    surface.fill_rect(
                        x + col * scale,
                        y0 + row * scale,
                        scale,
                        scale,
                        [255, 255, 255, 255],
                    );
                }
            }
            x += ADVANCE * scale;
        }
    }
}

impl GlyphRasterizer for BitmapFont {
    fn rasterize(&self, text: &str, width: usize, height: usize) -> Option<PixelSurface> {
        if width == 0 || height == 0 {
            return None;
        }
        let mut surface = PixelSurface::new(width, height);
        surface.fill([0, 0, 0, 255]);

        let scale = self.scale_for(text, width, height);
        let tw = Self::text_width(text) * scale;
        let th = GLYPH_H * scale;
        let x0 = width.saturating_sub(tw) / 2;
        let y0 = height.saturating_sub(th) / 2;
        self.draw(&mut surface, text, x0, y0, scale);
        Some(surface)
    }
}
