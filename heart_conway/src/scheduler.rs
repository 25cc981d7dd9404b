// scheduler.rs - Phase state machine and frame throttle for the animation loop

/// Where the automaton is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Freshly (re)seeded; holding still for the grace period.
    Seeding,
    Running,
    Paused,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Seeding => "seeding",
            Phase::Running => "running",
            Phase::Paused => "paused",
        }
    }
}

/// Decides, frame by frame, whether a generation step is due.
///
/// Knows nothing about wall-clock time: the grace period ends when the owner
/// reports it through [`Scheduler::on_grace_elapsed`].
#[derive(Debug, Clone)]
pub struct Scheduler {
    phase: Phase,
    steps_every: u32,
    since_step: u32,
}

impl Scheduler {
    /// Step once every `steps_every` running frames (clamped to at least 1).
    pub fn new(steps_every: u32) -> Self {
        Self {
            phase: Phase::Seeding,
            steps_every: steps_every.max(1),
            since_step: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn on_reseed(&mut self) {
        self.phase = Phase::Seeding;
        self.since_step = 0;
    }

    /// Leave `Seeding` for `Running`. Ignored in any other phase, so a late
    /// timer can't resume a paused run.
    pub fn on_grace_elapsed(&mut self) -> bool {
        if self.phase == Phase::Seeding {
            self.phase = Phase::Running;
            self.since_step = 0;
            true
        } else {
            false
        }
    }

    /// Flip between running and paused. Toggling while seeding skips the
    /// rest of the grace period and pauses.
    pub fn toggle(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Running | Phase::Seeding => Phase::Paused,
            Phase::Paused => Phase::Running,
        };
        self.phase
    }

    /// Count one rendered frame; returns whether a step is due on it.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.since_step += 1;
        if self.since_step >= self.steps_every {
            self.since_step = 0;
            true
        } else {
            false
        }
    }
}
