// app.rs - Scene sequencing: question -> celebration -> automaton

use crate::automaton::AutomatonScene;
use crate::settings::AppConfig;
use eframe::egui;
use std::time::Instant;
use tokio::runtime::Runtime;

pub enum Scene {
    Question,
    Celebration { since: Instant },
    Automaton(Box<AutomatonScene>),
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Question => "question",
            Scene::Celebration { .. } => "celebration",
            Scene::Automaton(_) => "automaton",
        }
    }
}

pub struct HeartApp {
    pub config: AppConfig,
    pub scene: Scene,
    /// Times "No" was pressed; the "Yes" button grows with it.
    pub declined: u32,
    pub seed: Option<u64>,

    runtime: Runtime,
}

impl HeartApp {
    pub fn new(config: AppConfig, runtime: Runtime, seed: Option<u64>) -> Self {
        Self {
            config,
            scene: Scene::Question,
            declined: 0,
            seed,
            runtime,
        }
    }

    pub fn accept(&mut self) {
        if matches!(self.scene, Scene::Question) {
            log::info!("accepted after {} refusals", self.declined);
            self.scene = Scene::Celebration { since: Instant::now() };
        }
    }

    pub fn decline(&mut self) {
        self.declined += 1;
    }

    pub fn enter_automaton(&mut self, ctx: &egui::Context) {
        let scene = AutomatonScene::new(
            self.config.life.clone(),
            self.runtime.handle().clone(),
            ctx,
            self.seed,
        );
        self.switch_to(Scene::Automaton(Box::new(scene)));
    }

    /// Back to the question. Stops the automaton if it was showing.
    pub fn leave_automaton(&mut self) {
        self.declined = 0;
        self.switch_to(Scene::Question);
    }

    fn switch_to(&mut self, next: Scene) {
        let previous = std::mem::replace(&mut self.scene, next);
        log::debug!("scene {} -> {}", previous.name(), self.scene.name());
        if let Scene::Automaton(mut scene) = previous {
            log::debug!("automaton had {} live cells", scene.life().grid().alive_count());
            scene.exit();
        }
    }

    /// Scale factor for the "Yes" button.
    pub fn yes_scale(&self) -> f32 {
        (1.0 + 0.25 * self.declined as f32).min(3.0)
    }
}
