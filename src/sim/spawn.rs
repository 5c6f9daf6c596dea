//! Obstacle spawn scheduling
//!
//! A counter climbs every tick. Once it is past the window, each tick rolls
//! the spawn chance. When the counter resets depends on `SpawnReset`: the
//! default only resets on a successful roll, which gives a hard minimum
//! spacing of one window between spawns followed by a geometric wait.

use rand::Rng;

use crate::tuning::{SpawnReset, Tuning};

/// Stateless spawn rules applied to the counter kept in `RunState`
#[derive(Debug, Clone, Copy)]
pub struct SpawnScheduler {
    window_ticks: u32,
    chance: f32,
    reset: SpawnReset,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            window_ticks: tuning.spawn_window_ticks,
            chance: tuning.spawn_chance,
            reset: tuning.spawn_reset,
        }
    }

    /// Advance the counter by one tick. Returns true if an obstacle
    /// should spawn this tick.
    pub fn step<R: Rng>(&self, counter: &mut u32, rng: &mut R) -> bool {
        *counter = counter.saturating_add(1);
        if *counter <= self.window_ticks {
            return false;
        }

        // One roll per open-window tick under either policy
        let roll: f32 = rng.random();
        let spawned = roll < self.chance;

        match self.reset {
            SpawnReset::OnSpawn if spawned => *counter = 0,
            SpawnReset::OnSpawn => {}
            SpawnReset::EveryWindow => *counter = 0,
        }
        spawned
    }
}
