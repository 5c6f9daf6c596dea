//! Demo autopilot
//!
//! Jumps when the nearest obstacle still ahead of the player comes within
//! a fixed look-ahead. Drives the native headless runner.

use crate::controller::Command;
use crate::sim::GamePhase;
use crate::snapshot::Snapshot;

/// Gap between player's right edge and obstacle's left edge that triggers a jump
pub const LOOKAHEAD: f32 = 10.0;

/// Command to send before the next tick, if any
pub fn decide(snapshot: &Snapshot) -> Option<Command> {
    match snapshot.phase {
        GamePhase::Running => {}
        _ => return None,
    }
    if snapshot.player.jumping {
        return None;
    }

    let player = snapshot.player.rect;
    let nearest_gap = snapshot
        .obstacles
        .iter()
        .filter(|o| o.right() > player.left())
        .map(|o| o.left() - player.right())
        .fold(f32::INFINITY, f32::min);

    (nearest_gap <= LOOKAHEAD).then_some(Command::Jump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Field, RunState};

    fn running(obstacle_x: Option<f32>) -> Snapshot {
        let mut state = RunState::new(Field::new(800.0, 300.0));
        state.phase = GamePhase::Running;
        if let Some(x) = obstacle_x {
            state.spawn_obstacle(25.0, 50.0);
            state.obstacles[0].x = x;
        }
        Snapshot::capture(&state)
    }

    #[test]
    fn test_waits_for_obstacle() {
        assert_eq!(decide(&running(None)), None);
        assert_eq!(decide(&running(Some(300.0))), None);
    }

    #[test]
    fn test_jumps_inside_lookahead() {
        assert_eq!(decide(&running(Some(104.0))), Some(Command::Jump));
    }

    #[test]
    fn test_ignores_passed_obstacle() {
        assert_eq!(decide(&running(Some(10.0))), None);
    }
}
