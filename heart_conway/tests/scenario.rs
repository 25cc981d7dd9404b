// End-to-end runs of seed -> step -> render through the public API.

use heart_conway::{CellMask, GlyphRasterizer, Grid, Palette, PixelSurface, label_mask, render, step};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn center_block(cols: usize, rows: usize) -> CellMask {
    CellMask::from_fn(cols, rows, |c, r| (3..7).contains(&c) && (3..7).contains(&r))
}

#[test]
fn test_golden_center_block() {
    let mut grid = Grid::new(10, 10);
    let mut rng = StdRng::seed_from_u64(42);
    grid.seed(&center_block(10, 10), 1.0, &mut rng);

    assert_eq!(grid.alive_count(), 16);
    assert_eq!(grid.generation(), 0);
    for (c, r) in grid.alive_cells() {
        assert!((3..7).contains(&c) && (3..7).contains(&r));
        assert_eq!(grid.age(c, r), 1);
    }

    step(&mut grid);

    let mut expected = vec![
        // corners survive with 3 neighbors each
        (3, 3), (6, 3), (3, 6), (6, 6),
        // births along each side
        (4, 2), (5, 2), (4, 7), (5, 7),
        (2, 4), (2, 5), (7, 4), (7, 5),
    ];
    expected.sort_by_key(|&(c, r)| (r, c));
    assert_eq!(grid.alive_cells(), expected);
    assert_eq!(grid.generation(), 1);
    assert_eq!(grid.age(3, 3), 2);
    assert_eq!(grid.age(4, 2), 1);
    assert_eq!(grid.age(4, 4), 0);
}

#[test]
fn test_reseed_with_zero_density_clears_everything() {
    let mut grid = Grid::new(10, 10);
    let mut rng = StdRng::seed_from_u64(1);
    let all = CellMask::from_fn(10, 10, |_, _| true);
    grid.seed(&all, 0.5, &mut rng);
    step(&mut grid);
    step(&mut grid);

    grid.seed(&all, 0.0, &mut rng);
    assert_eq!(grid.alive_count(), 0);
    assert_eq!(grid.generation(), 0);
}

/// Lights a single vertical bar down the middle of the canvas.
struct Bar;

impl GlyphRasterizer for Bar {
    fn rasterize(&self, _text: &str, width: usize, height: usize) -> Option<PixelSurface> {
        let mut surface = PixelSurface::new(width, height);
        surface.fill([0, 0, 0, 255]);
        surface.fill_rect(width / 2, 0, 4, height, [255, 255, 255, 255]);
        Some(surface)
    }
}

#[test]
fn test_overlay_survives_long_runs() {
    // 20x20 cells of 5px; the bar covers column 10.
    let overlay = label_mask(&Bar, "B + S", 100, 100, 5);
    assert_eq!(overlay.count(), 20);

    let mut grid = Grid::new(20, 20);
    grid.set_protected(&overlay);
    let mut rng = StdRng::seed_from_u64(5);
    grid.seed(&CellMask::from_fn(20, 20, |_, _| true), 0.6, &mut rng);

    let palette = Palette::default();
    let mut surface = PixelSurface::new(100, 100);
    for _ in 0..200 {
        step(&mut grid);
        for r in 0..20 {
            assert!(!grid.is_alive(10, r));
        }
    }
    assert!(render(&grid, &palette, 5, &mut surface));
    for y in (0..100).step_by(7) {
        assert_eq!(surface.pixel(52, y), Some(palette.overlay));
    }
}
