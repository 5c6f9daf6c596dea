//! Fixed-step simulation tick
//!
//! One call advances the run by exactly one tick, in this order:
//! player motion, spawn scheduling, then per-obstacle advance / hit test /
//! removal walking the list newest-first.

use rand::Rng;

use super::collision::player_hits_obstacle;
use super::spawn::SpawnScheduler;
use super::state::{GamePhase, RunState};
use crate::tuning::Tuning;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; the state was left untouched
    Skipped,
    /// Tick completed and the run continues
    Advanced {
        /// Obstacle spawned this tick, if any
        spawned: Option<u32>,
        /// Obstacles removed (and scored) this tick
        cleared: u32,
    },
    /// The player hit an obstacle. Remaining obstacles were not processed.
    Collision { obstacle_id: u32 },
}

impl TickOutcome {
    pub fn is_collision(&self) -> bool {
        matches!(self, TickOutcome::Collision { .. })
    }
}

/// Advance the run state by one tick
pub fn tick<R: Rng>(state: &mut RunState, rng: &mut R, tuning: &Tuning) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Skipped;
    }

    state.time_ticks += 1;

    let baseline = state.field.baseline();
    state
        .player
        .step(baseline, tuning.gravity, tuning.run_frame_ticks);

    let mut spawned = None;
    if SpawnScheduler::new(tuning).step(&mut state.spawn_counter, rng) {
        let id = state.spawn_obstacle(tuning.obstacle_width, tuning.obstacle_height);
        log::debug!("Spawned obstacle {} at tick {}", id, state.time_ticks);
        spawned = Some(id);
    }

    // Back-to-front so removal never shifts an unvisited index
    let mut cleared = 0;
    for i in (0..state.obstacles.len()).rev() {
        state.obstacles[i].x -= tuning.obstacle_speed;

        if player_hits_obstacle(
            &state.player,
            &state.obstacles[i],
            &state.field,
            tuning.collision_margin,
        ) {
            return TickOutcome::Collision {
                obstacle_id: state.obstacles[i].id,
            };
        }

        if state.obstacles[i].is_offscreen() {
            let gone = state.obstacles.remove(i);
            state.score += 1;
            cleared += 1;
            log::debug!("Obstacle {} cleared, score {}", gone.id, state.score);
        }
    }

    TickOutcome::Advanced { spawned, cleared }
}
