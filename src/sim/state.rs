//! Run state and core simulation types
//!
//! Everything the tick pipeline reads or writes lives in `RunState`.

use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;

/// Top-level mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    #[default]
    Idle,
    /// Active gameplay, ticks are delivered
    Running,
    /// Run ended on a collision, waiting for restart
    GameOver,
}

/// Play field dimensions as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Player's resting y (top edge of the sprite)
    #[inline]
    pub fn baseline(&self) -> f32 {
        self.height - BASELINE_OFFSET
    }

    /// y of the ground line obstacles stand on
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.height - GROUND_OFFSET
    }
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity (negative is up)
    pub velocity: f32,
    pub jumping: bool,
    /// Running animation frame (0 or 1)
    pub frame_index: u8,
    /// Grounded ticks since the last frame flip
    pub frame_timer: u32,
}

impl Player {
    /// A player standing on the given baseline
    pub fn grounded(baseline: f32) -> Self {
        Self {
            x: PLAYER_X,
            y: baseline,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            velocity: 0.0,
            jumping: false,
            frame_index: 0,
            frame_timer: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Snap to the baseline and clear all vertical motion
    pub fn land(&mut self, baseline: f32) {
        self.y = baseline;
        self.jumping = false;
        self.velocity = 0.0;
    }

    /// Start a jump. Returns false if already airborne.
    pub fn jump(&mut self, velocity: f32) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.velocity = velocity;
        true
    }

    /// Integrate one tick of vertical motion, or advance the run cycle
    /// when grounded. The top of the field (y = 0) acts as a ceiling.
    pub fn step(&mut self, baseline: f32, gravity: f32, run_frame_ticks: u32) {
        if self.jumping {
            self.y += self.velocity;
            self.velocity += gravity;
            if self.y >= baseline {
                self.land(baseline);
            } else if self.y < 0.0 {
                self.y = 0.0;
                self.velocity = self.velocity.max(0.0);
            }
        } else {
            self.frame_timer += 1;
            if self.frame_timer >= run_frame_ticks {
                self.frame_index = (self.frame_index + 1) % 2;
                self.frame_timer = 0;
            }
        }
    }
}

/// A cactus scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Fully scrolled past the left edge of the field
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }

    /// Bounding box; obstacles always stand on the ground line
    pub fn rect(&self, field: &Field) -> Rect {
        Rect::new(
            self.x,
            field.ground_line() - self.height,
            self.width,
            self.height,
        )
    }
}

/// Complete run state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    /// Obstacles cleared this run
    pub score: u64,
    /// Ticks since the last spawn (see `SpawnScheduler`)
    pub spawn_counter: u32,
    /// Simulation ticks this run
    pub time_ticks: u64,
    pub field: Field,
    pub player: Player,
    /// Spawn order, which is also left-to-right order
    pub obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl RunState {
    pub fn new(field: Field) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            spawn_counter: 0,
            time_ticks: 0,
            field,
            player: Player::grounded(field.baseline()),
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear everything a fresh run starts without. Field and IDs survive.
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.spawn_counter = 0;
        self.time_ticks = 0;
        self.obstacles.clear();
        self.player = Player::grounded(self.field.baseline());
    }

    /// Push a new obstacle at the right edge of the field
    pub fn spawn_obstacle(&mut self, width: f32, height: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            x: self.field.width,
            width,
            height,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lines() {
        let field = Field::new(640.0, 300.0);
        assert_eq!(field.baseline(), 240.0);
        assert_eq!(field.ground_line(), 280.0);
    }

    #[test]
    fn test_new_state_is_idle_and_grounded() {
        let state = RunState::new(Field::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.y, state.field.baseline());
        assert!(!state.player.jumping);
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let mut player = Player::grounded(240.0);
        assert!(player.jump(-15.0));
        player.step(240.0, 0.8, 6);
        assert!(!player.jump(-15.0));
        assert!((player.velocity + 14.2).abs() < 1e-5);
    }

    #[test]
    fn test_jump_stops_at_top_of_short_field() {
        // Baseline 20 leaves far less headroom than a full jump needs
        let mut player = Player::grounded(20.0);
        player.jump(-15.0);
        player.step(20.0, 0.8, 6);
        assert_eq!(player.y, 5.0);
        player.step(20.0, 0.8, 6);
        assert_eq!(player.y, 0.0);
        assert_eq!(player.velocity, 0.0);

        for _ in 0..20 {
            player.step(20.0, 0.8, 6);
            assert!((0.0..=20.0).contains(&player.y));
        }
        assert!(!player.jumping);
        assert_eq!(player.y, 20.0);
    }

    #[test]
    fn test_run_cycle_flips_every_six_ticks() {
        let mut player = Player::grounded(240.0);
        for _ in 0..5 {
            player.step(240.0, 0.8, 6);
        }
        assert_eq!(player.frame_index, 0);
        player.step(240.0, 0.8, 6);
        assert_eq!(player.frame_index, 1);
        assert_eq!(player.frame_timer, 0);
        for _ in 0..6 {
            player.step(240.0, 0.8, 6);
        }
        assert_eq!(player.frame_index, 0);
    }

    #[test]
    fn test_obstacle_rect_anchored_to_ground() {
        let field = Field::new(800.0, 300.0);
        let obstacle = Obstacle {
            id: 1,
            x: 60.0,
            width: 25.0,
            height: 50.0,
        };
        assert_eq!(obstacle.rect(&field), Rect::new(60.0, 230.0, 25.0, 50.0));
    }

    #[test]
    fn test_reset_run_keeps_field() {
        let mut state = RunState::new(Field::new(500.0, 300.0));
        state.score = 9;
        state.spawn_obstacle(25.0, 50.0);
        state.reset_run();
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.field.width, 500.0);
    }
}
