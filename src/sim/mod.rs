//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step only (one tick per host frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::player_hits_obstacle;
pub use geom::Rect;
pub use spawn::SpawnScheduler;
pub use state::{Field, GamePhase, Obstacle, Player, RunState};
pub use tick::{TickOutcome, tick};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::snapshot::Snapshot;
use crate::tuning::Tuning;

/// Owns the run state and everything needed to advance it.
///
/// Other components read through `state()` / `snapshot()` and change
/// things only through the command methods below.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: RunState,
    rng: Pcg32,
    tuning: Tuning,
    seed: u64,
}

impl Simulation {
    pub fn new(seed: u64, field: Field, tuning: Tuning) -> Self {
        Self {
            state: RunState::new(field),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            seed,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Reset score, obstacles and player, then enter Running.
    /// Only legal from Idle or GameOver.
    pub fn begin_run(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Idle | GamePhase::GameOver => {
                self.state.reset_run();
                self.state.phase = GamePhase::Running;
                true
            }
            GamePhase::Running => false,
        }
    }

    /// Leave Running for GameOver. Entities are kept for the final frame.
    pub fn end_run(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        self.state.phase = GamePhase::GameOver;
        true
    }

    /// Start a jump. Ignored unless Running and grounded.
    pub fn jump(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        self.state.player.jump(self.tuning.jump_velocity)
    }

    /// Apply new field dimensions from the host. A height change puts the
    /// player back on the (new) ground; score, phase and obstacles stay.
    pub fn resize(&mut self, width: f32, height: f32) {
        let height_changed = self.state.field.height != height;
        self.state.field = Field::new(width, height);
        if height_changed {
            let baseline = self.state.field.baseline();
            self.state.player.land(baseline);
        }
    }

    /// Place an obstacle at the right edge right now, bypassing the
    /// scheduler
    pub fn spawn_obstacle(&mut self) -> u32 {
        self.state
            .spawn_obstacle(self.tuning.obstacle_width, self.tuning.obstacle_height)
    }

    /// Advance one tick. No-op unless Running.
    pub fn tick(&mut self) -> TickOutcome {
        tick(&mut self.state, &mut self.rng, &self.tuning)
    }
}
