// automaton.rs - The heart Game of Life scene

use eframe::egui;
use egui::{Color32, Rect, Sense, TextureHandle, TextureOptions, Vec2};
use heart_conway::{AnimationLoop, BitmapFont, LifeConfig, Phase, PixelSurface, Tick};
use std::sync::Arc;
use tokio::runtime::Handle;

/// What the HUD asked the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneAction {
    Stay,
    Leave,
}

/// Caption of the pause button. Toggling pauses from every phase but
/// `Paused`, including the grace period.
fn toggle_text(phase: Phase) -> &'static str {
    match phase {
        Phase::Paused => "▶ Resume",
        Phase::Seeding | Phase::Running => "⏸ Pause",
    }
}

/// Owns the animation loop and the canvas it draws on. Dropping the scene
/// stops the loop, which aborts any pending grace timer.
pub struct AutomatonScene {
    life: AnimationLoop,
    surface: PixelSurface,
    texture: Option<TextureHandle>,
    font: BitmapFont,
}

impl AutomatonScene {
    pub fn new(config: LifeConfig, runtime: Handle, ctx: &egui::Context, seed: Option<u64>) -> Self {
        let repaint_ctx = ctx.clone();
        let mut life = AnimationLoop::new(config, runtime)
            .with_repaint(Arc::new(move || repaint_ctx.request_repaint()));
        if let Some(seed) = seed {
            life = life.with_seed(seed);
        }
        log::info!("entering automaton scene, label {:?}", life.label().as_str());
        Self {
            life,
            surface: PixelSurface::default(),
            texture: None,
            font: BitmapFont::default(),
        }
    }

    pub fn life(&self) -> &AnimationLoop {
        &self.life
    }

    /// Stop the loop. The scene draws nothing afterwards.
    pub fn exit(&mut self) {
        log::info!("leaving automaton scene at generation {}", self.life.generation());
        self.life.stop();
    }

    /// Keyboard shortcuts: Space toggles, R reseeds, Escape leaves.
    fn handle_keys(&mut self, ctx: &egui::Context) -> SceneAction {
        let (space, reset, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if space {
            self.life.toggle();
        }
        if reset {
            self.life.reseed();
        }
        if escape { SceneAction::Leave } else { SceneAction::Stay }
    }

    pub fn show_hud(&mut self, ui: &mut egui::Ui) -> SceneAction {
        let mut action = SceneAction::Stay;
        ui.horizontal(|ui| {
            if ui.button(toggle_text(self.life.phase())).clicked() {
                self.life.toggle();
            }
            if ui.button("⟲ Reset").clicked() {
                self.life.reseed();
            }
            if ui.button("⬅ Back").clicked() {
                action = SceneAction::Leave;
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.life.generation()));
            ui.label(format!("Live cells: {}", self.life.grid().alive_count()));
            ui.label(self.life.phase().label());
        });
        action
    }

    /// One frame: step if due, draw, handle clicks on the canvas.
    pub fn show_canvas(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) -> SceneAction {
        let action = self.handle_keys(ctx);

        let available = ui.available_size();
        let (width, height) = (available.x.floor().max(0.0) as usize, available.y.floor().max(0.0) as usize);
        if self.life.needs_mount(width, height) {
            self.surface.resize(width, height);
            self.life.mount(width, height, &self.font);
        }

        if let Tick::Continue { .. } = self.life.tick() {
            ctx.request_repaint();
        }

        let (response, painter) = ui.allocate_painter(Vec2::new(width as f32, height as f32), Sense::click());
        if self.life.render(&mut self.surface) {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [self.surface.width(), self.surface.height()],
                self.surface.as_rgba(),
            );
            match self.texture.as_mut() {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("heart-life", image, TextureOptions::NEAREST));
                }
            }
        }

        match &self.texture {
            Some(texture) => {
                let size = Vec2::new(self.surface.width() as f32, self.surface.height() as f32);
                painter.image(
                    texture.id(),
                    Rect::from_min_size(response.rect.min, size),
                    Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            None => {
                painter.rect_filled(response.rect, 0.0, Color32::BLACK);
            }
        }

        // Applied now, visible on the next render even while paused.
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - response.rect.min;
                let placed = self.life.click(local.x, local.y);
                log::debug!("click at ({:.0}, {:.0}) placed {placed} cells", local.x, local.y);
            }
        }

        action
    }
}

impl Drop for AutomatonScene {
    fn drop(&mut self) {
        self.life.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_text_matches_toggle_result() {
        assert_eq!(toggle_text(Phase::Seeding), "⏸ Pause");
        assert_eq!(toggle_text(Phase::Running), "⏸ Pause");
        assert_eq!(toggle_text(Phase::Paused), "▶ Resume");

        // the caption names what the button will do
        let mut scheduler = heart_conway::Scheduler::new(1);
        assert_eq!(scheduler.phase(), Phase::Seeding);
        assert_eq!(scheduler.toggle(), Phase::Paused);
    }
}
