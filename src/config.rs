//! Game balance configuration
//!
//! Every tunable the simulation reads lives here and is handed to the game at
//! construction. Velocities are in pixels per second, durations in seconds.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to read or parse a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Play field size. Origin is the top-left corner, y grows downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Distance from the bottom edge to the paddle center
    pub bottom_offset: f32,
    pub extend_factor: f32,
    pub shrink_factor: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 15.0,
            speed: 480.0,
            bottom_offset: 50.0,
            extend_factor: 1.5,
            shrink_factor: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    /// Launch speed
    pub speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Smallest upward speed after a paddle bounce
    pub min_upward_speed: f32,
    /// Distance from the bottom edge to a resting ball's center
    pub rest_offset: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            speed: 300.0,
            min_speed: 120.0,
            max_speed: 900.0,
            min_upward_speed: 120.0,
            rest_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    pub base_rows: u32,
    pub max_rows: u32,
    pub cols: u32,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_top: f32,
    pub offset_left: f32,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            base_rows: 5,
            max_rows: 8,
            cols: 10,
            width: 70.0,
            height: 25.0,
            padding: 5.0,
            offset_top: 50.0,
            offset_left: 35.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectibleConfig {
    pub power_up_drop_chance: f32,
    pub penalty_drop_chance: f32,
    pub size: f32,
    pub fall_speed: f32,
    /// Penalties fall this much faster than power-ups
    pub penalty_fall_factor: f32,
    pub hazard_fall_speed: f32,
    /// Added to a hazard's fall speed every second
    pub hazard_acceleration: f32,
    pub hazard_spawn_y: f32,
    /// Max hazard spin in degrees per second (either direction)
    pub hazard_max_spin: f32,
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        Self {
            power_up_drop_chance: 0.25,
            penalty_drop_chance: 0.15,
            size: 25.0,
            fall_speed: 120.0,
            penalty_fall_factor: 1.2,
            hazard_fall_speed: 90.0,
            hazard_acceleration: 72.0,
            hazard_spawn_y: 50.0,
            hazard_max_spin: 120.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub initial_lives: u32,
    pub max_lives: u32,
    pub total_levels: u32,
    pub slow_factor: f32,
    pub speed_up_factor: f32,
    pub score_boost_multiplier: f32,
    /// Flat bonus for shooting down a falling hazard
    pub hazard_bonus: u32,
    /// Height above the bottom edge a shield-saved ball is sent back from
    pub shield_rescue_offset: f32,
    pub max_name_length: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            max_lives: 3,
            total_levels: 5,
            slow_factor: 1.3,
            speed_up_factor: 1.3,
            score_boost_multiplier: 2.0,
            hazard_bonus: 25,
            shield_rescue_offset: 100.0,
            max_name_length: 15,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bricks: BrickConfig,
    pub collectibles: CollectibleConfig,
    pub rules: RulesConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Non-fatal sanity checks; each entry describes one suspicious value.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.field.width <= 0.0 || self.field.height <= 0.0 {
            w.push("field dimensions must be > 0".into());
        }
        if self.ball.min_speed <= 0.0 {
            w.push("ball.min_speed must be > 0".into());
        }
        if self.ball.min_speed > self.ball.max_speed {
            w.push(format!(
                "ball.min_speed ({}) greater than ball.max_speed ({})",
                self.ball.min_speed, self.ball.max_speed
            ));
        }
        if !(self.ball.min_speed..=self.ball.max_speed).contains(&self.ball.speed) {
            w.push(format!(
                "ball.speed {} outside [{}, {}]; launches will be clamped",
                self.ball.speed, self.ball.min_speed, self.ball.max_speed
            ));
        }
        if self.ball.min_upward_speed > self.ball.max_speed {
            w.push("ball.min_upward_speed exceeds ball.max_speed".into());
        }
        let grid_width = self.bricks.offset_left
            + self.bricks.cols as f32 * (self.bricks.width + self.bricks.padding);
        if grid_width > self.field.width + self.bricks.padding {
            w.push(format!(
                "brick grid ({grid_width}px) wider than field ({}px)",
                self.field.width
            ));
        }
        if self.bricks.base_rows > self.bricks.max_rows {
            w.push("bricks.base_rows greater than bricks.max_rows".into());
        }
        for (label, chance) in [
            ("power_up_drop_chance", self.collectibles.power_up_drop_chance),
            ("penalty_drop_chance", self.collectibles.penalty_drop_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                w.push(format!("collectibles.{label} {chance} outside 0..1"));
            }
        }
        if self.rules.initial_lives == 0 {
            w.push("rules.initial_lives is 0; every level ends immediately".into());
        }
        if self.rules.initial_lives > self.rules.max_lives {
            w.push("rules.initial_lives greater than rules.max_lives".into());
        }
        if self.rules.total_levels == 0 {
            w.push("rules.total_levels must be >= 1".into());
        }
        if self.rules.slow_factor <= 1.0 || self.rules.speed_up_factor <= 1.0 {
            w.push("slow_factor and speed_up_factor should be > 1".into());
        }
        w
    }

    /// Paddle center y
    pub fn paddle_y(&self) -> f32 {
        self.field.height - self.paddle.bottom_offset
    }

    /// Resting ball center y
    pub fn ball_rest_y(&self) -> f32 {
        self.field.height - self.ball.rest_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_warnings() {
        assert!(GameConfig::default().validate().is_empty());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: GameConfig =
            serde_json::from_str(r#"{ "rules": { "total_levels": 3 }, "ball": { "radius": 6 } }"#)
                .unwrap();
        assert_eq!(cfg.rules.total_levels, 3);
        assert_eq!(cfg.rules.initial_lives, 3);
        assert_eq!(cfg.ball.radius, 6.0);
        assert_eq!(cfg.ball.speed, BallConfig::default().speed);
        assert_eq!(cfg.field, FieldConfig::default());
    }

    #[test]
    fn validate_flags_inverted_speed_range() {
        let mut cfg = GameConfig::default();
        cfg.ball.min_speed = 1000.0;
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("min_speed")));
    }

    #[test]
    fn load_or_default_reports_missing_file() {
        let (cfg, err) = GameConfig::load_or_default("/definitely/not/here.json");
        assert_eq!(cfg, GameConfig::default());
        assert!(matches!(err, Some(ConfigError::Read { .. })));
    }

    #[test]
    fn rest_positions_follow_field() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.paddle_y(), 550.0);
        assert_eq!(cfg.ball_rest_y(), 520.0);
    }
}
