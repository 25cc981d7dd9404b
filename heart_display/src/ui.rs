// ui.rs - Per-frame drawing of each scene

use crate::app::{HeartApp, Scene};
use crate::automaton::SceneAction;
use eframe::egui;
use egui::{Color32, RichText};
use std::time::{Duration, Instant};

const BACKGROUND: Color32 = Color32::from_rgb(18, 6, 14);
const ACCENT: Color32 = Color32::from_rgb(255, 120, 160);
/// The celebration moves on by itself after this long.
const CELEBRATION_TIME: Duration = Duration::from_secs(4);

impl eframe::App for HeartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.scene {
            Scene::Question => self.show_question(ctx),
            Scene::Celebration { since } => self.show_celebration(ctx, since),
            Scene::Automaton(_) => self.show_automaton(ctx),
        }
    }
}

impl HeartApp {
    fn show_question(&mut self, ctx: &egui::Context) {
        let question = self.config.question.clone();
        let yes_size = 20.0 * self.yes_scale();

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.3);
                    ui.label(RichText::new(&question.question).size(36.0).color(ACCENT));
                    ui.add_space(24.0);

                    ui.horizontal(|ui| {
                        ui.add_space((ui.available_width() - 220.0).max(0.0) / 2.0);
                        if ui.button(RichText::new(&question.yes).size(yes_size)).clicked() {
                            self.accept();
                        }
                        ui.add_space(16.0);
                        if ui.button(RichText::new(&question.no).size(20.0)).clicked() {
                            self.decline();
                        }
                    });
                });
            });
    }

    fn show_celebration(&mut self, ctx: &egui::Context, since: Instant) {
        let text = self.config.question.celebration.clone();
        let mut proceed = since.elapsed() >= CELEBRATION_TIME;

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.3);
                    ui.label(RichText::new(&text).size(48.0).color(ACCENT));
                    ui.add_space(24.0);
                    if ui.button(RichText::new("Show me ♥").size(20.0)).clicked() {
                        proceed = true;
                    }
                });
            });

        if proceed {
            self.enter_automaton(ctx);
        } else {
            ctx.request_repaint_after(CELEBRATION_TIME.saturating_sub(since.elapsed()));
        }
    }

    fn show_automaton(&mut self, ctx: &egui::Context) {
        let Scene::Automaton(scene) = &mut self.scene else {
            return;
        };

        let mut action = SceneAction::Stay;
        egui::TopBottomPanel::top("hud").show(ctx, |ui| {
            if scene.show_hud(ui) == SceneAction::Leave {
                action = SceneAction::Leave;
            }
        });
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                if scene.show_canvas(ctx, ui) == SceneAction::Leave {
                    action = SceneAction::Leave;
                }
            });

        if action == SceneAction::Leave {
            self.leave_automaton();
        }
    }
}
