use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::state::Player;

/// Failure to load a [`SessionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for one simulation session.
/// Every field falls back to its default when missing from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Outer table width in table units.
    pub table_width: f32,
    /// Outer table height in table units.
    pub table_height: f32,
    /// Visual pocket radius. Rails sit `2 * pocket_radius` in from the outer bounds.
    pub pocket_radius: f32,
    pub ball_radius: f32,
    /// Per-frame speed multiplier while rolling (below 1.0).
    pub drag: f32,
    /// Speed multiplier applied on every rail bounce and ball impact.
    pub restitution: f32,
    /// Speeds below this snap to exactly zero.
    pub speed_threshold: f32,
    /// Cue speed per unit of pointer distance while dragging.
    pub drag_sensitivity: f32,
    /// Extra push-apart distance after resolving an overlap.
    pub separation_epsilon: f32,
    /// How many frames a foul notice stays up.
    pub foul_notice_frames: u32,
    /// Host cadence in seconds per simulation frame (default: 1/60).
    pub fixed_dt: f32,
    /// Seed for the opening-player draw.
    pub seed: u64,
    /// Skip the draw and give the break to this player.
    pub opening_player: Option<Player>,
    /// Maximum number of game events kept per frame.
    pub max_events: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            table_width: 1050.0,
            table_height: 550.0,
            pocket_radius: 23.0,
            ball_radius: 11.0,
            drag: 0.995,
            restitution: 0.775,
            speed_threshold: 0.01,
            drag_sensitivity: 0.1,
            separation_epsilon: 1.0,
            foul_notice_frames: 180,
            fixed_dt: 1.0 / 60.0,
            seed: 42,
            opening_player: None,
            max_events: 16,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a playable table.
    pub fn validate(&self) -> ConfigResult<()> {
        fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }

        fn unit_factor(field: &'static str, value: f32) -> ConfigResult<()> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be in (0, 1], got {value}"),
                })
            }
        }

        positive("ball_radius", self.ball_radius)?;
        positive("pocket_radius", self.pocket_radius)?;
        positive("speed_threshold", self.speed_threshold)?;
        positive("drag_sensitivity", self.drag_sensitivity)?;
        positive("fixed_dt", self.fixed_dt)?;
        unit_factor("drag", self.drag)?;
        unit_factor("restitution", self.restitution)?;

        if !(self.separation_epsilon >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "separation_epsilon",
                reason: format!("must not be negative, got {}", self.separation_epsilon),
            });
        }

        // Ball centers must have room between the inset rails.
        let inset = 2.0 * (2.0 * self.pocket_radius + self.ball_radius);
        if !(self.table_width > inset) {
            return Err(ConfigError::Invalid {
                field: "table_width",
                reason: format!("must exceed the rail inset {inset}, got {}", self.table_width),
            });
        }
        if !(self.table_height > inset) {
            return Err(ConfigError::Invalid {
                field: "table_height",
                reason: format!("must exceed the rail inset {inset}, got {}", self.table_height),
            });
        }
        if self.max_events == 0 {
            return Err(ConfigError::Invalid {
                field: "max_events",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = SessionConfig::from_json(r#"{ "seed": 7, "opening_player": "Two" }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.opening_player, Some(Player::Two));
        assert_eq!(config.table_width, 1050.0);
        assert_eq!(config.restitution, 0.775);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SessionConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn drag_above_one_is_rejected() {
        let err = SessionConfig::from_json(r#"{ "drag": 1.2 }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "drag"),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn tiny_table_is_rejected() {
        let config = SessionConfig {
            table_height: 100.0,
            ..SessionConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("table_height"));
    }
}
