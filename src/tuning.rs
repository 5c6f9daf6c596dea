//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a host can
//! ship a JSON override without rebuilding. Defaults match `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// When the spawn-eligibility counter goes back to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpawnReset {
    /// Only after a roll actually spawns an obstacle
    #[default]
    OnSpawn,
    /// Every tick the counter is past the window, whether or not the roll fired
    EveryWindow,
}

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub run_frame_ticks: u32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_speed: f32,
    pub spawn_window_ticks: u32,
    pub spawn_chance: f32,
    pub spawn_reset: SpawnReset,
    pub collision_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            run_frame_ticks: RUN_FRAME_TICKS,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_window_ticks: SPAWN_WINDOW_TICKS,
            spawn_chance: SPAWN_CHANCE,
            spawn_reset: SpawnReset::OnSpawn,
            collision_margin: COLLISION_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the tick pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_chance", self.spawn_chance),
            ("collision_margin", self.collision_margin),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be finite",
                });
            }
        }

        if self.gravity <= 0.0 {
            return invalid("gravity", "must be positive");
        }
        if self.jump_velocity >= 0.0 {
            return invalid("jump_velocity", "must be negative (up)");
        }
        if self.jump_apex() > FIELD_HEIGHT - BASELINE_OFFSET {
            return invalid("jump_velocity", "jump would leave the top of the field");
        }
        if self.run_frame_ticks == 0 {
            return invalid("run_frame_ticks", "must be at least 1");
        }
        if self.obstacle_width <= 0.0 || self.obstacle_height <= 0.0 {
            return invalid("obstacle_size", "must be positive");
        }
        if self.obstacle_speed <= 0.0 {
            return invalid("obstacle_speed", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return invalid("spawn_chance", "must be within [0, 1]");
        }
        if self.collision_margin < 0.0 {
            return invalid("collision_margin", "must not be negative");
        }
        Ok(())
    }

    /// Upper bound on how far a jump rises above the baseline.
    ///
    /// The per-tick rise is `|v| - i * g` while positive, which sums to at
    /// most `(|v| + g / 2)^2 / (2 * g)`.
    pub fn jump_apex(&self) -> f32 {
        let lift = -self.jump_velocity + self.gravity / 2.0;
        lift * lift / (2.0 * self.gravity)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
    Err(ConfigError::InvalidValue { field, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.gravity, 0.8);
        assert_eq!(t.jump_velocity, -15.0);
        assert_eq!(t.obstacle_speed, 5.0);
        assert_eq!(t.spawn_window_ticks, 60);
        assert_eq!(t.spawn_chance, 0.02);
        assert_eq!(t.collision_margin, 10.0);
        assert_eq!(t.spawn_reset, SpawnReset::OnSpawn);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "obstacle_speed": 7.5 }"#).unwrap();
        assert_eq!(t.obstacle_speed, 7.5);
        assert_eq!(t.gravity, GRAVITY);
    }

    #[test]
    fn test_spawn_reset_from_json() {
        let t = Tuning::from_json(r#"{ "spawn_reset": "EveryWindow" }"#).unwrap();
        assert_eq!(t.spawn_reset, SpawnReset::EveryWindow);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "spawn_chance": 1.5 }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                field: "spawn_chance",
                reason: "must be within [0, 1]"
            }
        );

        let err = Tuning::from_json(r#"{ "jump_velocity": 3.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "jump_velocity",
                ..
            }
        ));
    }

    #[test]
    fn test_jump_apex_bounds_default_rise() {
        // The default jump peaks 148.2 above the baseline (tick 19)
        let apex = Tuning::default().jump_apex();
        assert!(apex >= 148.2);
        assert!(apex < 149.0);
    }

    #[test]
    fn test_rejects_jump_higher_than_field() {
        // -30 would carry the player ~337 units above a 240 baseline
        let err = Tuning::from_json(r#"{ "jump_velocity": -30.0 }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                field: "jump_velocity",
                reason: "jump would leave the top of the field"
            }
        );

        // Same velocity is fine once gravity pulls harder
        assert!(Tuning::from_json(r#"{ "jump_velocity": -30.0, "gravity": 2.5 }"#).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ gravity: "),
            Err(ConfigError::Parse { .. })
        ));
    }
}
