//! Read-only per-frame view of the run for the presentation layer
//!
//! This is the whole contract between the core and whatever draws it.
//! It serializes to JSON so a JS host can consume it directly.

use serde::{Deserialize, Serialize};

use crate::consts::PLAYER_FRAME_WIDTH;
use crate::sim::{Field, GamePhase, Rect, RunState};

/// Player as the renderer needs it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub frame_index: u8,
    pub jumping: bool,
}

impl PlayerView {
    /// x offset of the current frame in the sprite sheet
    pub fn sprite_source_x(&self) -> f32 {
        self.frame_index as f32 * PLAYER_FRAME_WIDTH
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub field: Field,
    pub ground_line: f32,
    pub player: PlayerView,
    /// Obstacle boxes in spawn (left-to-right) order
    pub obstacles: Vec<Rect>,
}

impl Snapshot {
    pub fn capture(state: &RunState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            field: state.field,
            ground_line: state.field.ground_line(),
            player: PlayerView {
                rect: state.player.rect(),
                frame_index: state.player.frame_index,
                jumping: state.player.jumping,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| o.rect(&state.field))
                .collect(),
        }
    }

    /// Centered prompt drawn over the field, if the phase has one
    pub fn overlay_text(&self) -> Option<&'static str> {
        match self.phase {
            GamePhase::Idle => Some("Press Start or Space to play"),
            GamePhase::Running => None,
            GamePhase::GameOver => Some("Game over! Press Space to restart"),
        }
    }
}
