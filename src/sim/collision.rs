//! Player/obstacle hit testing
//!
//! Both boxes are shrunk by the same margin on every side before the
//! overlap test, so grazing contacts near a sprite's transparent border
//! don't end the run. An un-inset overlap has to exceed twice the margin
//! on both axes to register.

use super::state::{Field, Obstacle, Player};

/// Does the player currently touch this obstacle?
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle, field: &Field, margin: f32) -> bool {
    let player_box = player.rect().inset(margin);
    let obstacle_box = obstacle.rect(field).inset(margin);
    player_box.overlaps(&obstacle_box)
}
