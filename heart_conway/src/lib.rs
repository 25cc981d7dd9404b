//! Heart-shaped Conway's Game of Life.
//!
//! The automaton lives on a toroidal [`Grid`]. A heart curve seeds it, a
//! label rasterized through a [`GlyphRasterizer`] becomes a protected overlay
//! the simulation never touches, and [`AnimationLoop`] drives stepping and
//! drawing from the host's frame callback.

pub mod config;
pub mod error;
pub mod font;
pub mod grid;
pub mod label;
pub mod life;
pub mod render;
pub mod scheduler;
pub mod shape;
pub mod sim;
pub mod surface;
pub mod timer;

pub use config::LifeConfig;
pub use error::{LifeError, Result};
pub use font::BitmapFont;
pub use grid::{Grid, TRAIL_CAP};
pub use label::Label;
pub use life::{AnimationLoop, Tick};
pub use render::{Palette, render};
pub use scheduler::{Phase, Scheduler};
pub use shape::{CellMask, GlyphRasterizer, HeartShape, heart_mask, label_mask};
pub use sim::{count_neighbors, step, step_n};
pub use surface::{PixelSurface, Rgba};
pub use timer::{GraceTimer, RepaintFn};
