//! Configuration errors
//!
//! The simulation itself never fails; only loading tuning/settings can.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Input was not valid JSON for the target type
    #[error("config parse error: {message}")]
    Parse { message: String },
    /// A field parsed but holds a value the simulation cannot run with
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: &'static str },
}

// Kept by hand: `serde_json::Error` is neither Clone nor PartialEq
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = ConfigError::InvalidValue {
            field: "gravity",
            reason: "must be positive",
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for `gravity`: must be positive"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let err: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("config parse error: "));
    }

    #[test]
    fn test_boxes_as_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(ConfigError::InvalidValue {
            field: "spawn_chance",
            reason: "must be within [0, 1]",
        });
        assert!(err.source().is_none());
        assert!(err.to_string().contains("spawn_chance"));
    }
}
