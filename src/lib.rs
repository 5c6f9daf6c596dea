//! Dino Run - a single-screen endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `controller`: Phase state machine and tick-loop ownership
//! - `snapshot`: Read-only per-frame view handed to the presentation layer
//! - `input`: Key bindings to controller commands
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (bindings, tuning, seed)
//! - `autopilot`: Demo player used by the headless runner

pub mod autopilot;
pub mod controller;
pub mod error;
pub mod input;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use controller::{Command, Controller, FrameLoop, Presenter};
pub use error::ConfigError;
pub use input::KeyBindings;
pub use settings::Settings;
pub use sim::{GamePhase, Simulation, TickOutcome};
pub use snapshot::Snapshot;
pub use tuning::{SpawnReset, Tuning};

/// Game configuration constants
pub mod consts {
    /// Default play field height (the host only ever sizes the width)
    pub const FIELD_HEIGHT: f32 = 300.0;
    /// Default play field width used before the host reports one
    pub const FIELD_WIDTH: f32 = 800.0;
    /// Ground line sits this far above the bottom of the field
    pub const GROUND_OFFSET: f32 = 20.0;
    /// Player's resting y (top edge) sits this far above the bottom of the field
    pub const BASELINE_OFFSET: f32 = 60.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 44.0;
    pub const PLAYER_HEIGHT: f32 = 47.0;
    /// Initial vertical velocity of a jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -15.0;
    /// Downward acceleration while airborne (units/tick²)
    pub const GRAVITY: f32 = 0.8;
    /// Running animation flips frame every this many grounded ticks
    pub const RUN_FRAME_TICKS: u32 = 6;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 25.0;
    pub const OBSTACLE_HEIGHT: f32 = 50.0;
    /// Horizontal scroll speed (units/tick)
    pub const OBSTACLE_SPEED: f32 = 5.0;
    /// Spawn roll only happens once the counter exceeds this many ticks
    pub const SPAWN_WINDOW_TICKS: u32 = 60;
    /// Per-tick spawn probability once the window is open
    pub const SPAWN_CHANCE: f32 = 0.02;

    /// Hit-box shrink applied to every side of both boxes
    pub const COLLISION_MARGIN: f32 = 10.0;

    /// Sprite sheet frame width (frame index * this = source x)
    pub const PLAYER_FRAME_WIDTH: f32 = 44.0;
}
