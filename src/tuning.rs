//! Data-driven game balance
//!
//! Every gameplay knob that is not display geometry lives here, so a
//! build can rebalance the games from a JSON blob without touching the
//! engines. Defaults are the canonical values.

use serde::{Deserialize, Serialize};

/// Balance knobs for both games.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Lane dodger ===
    /// Minimum milliseconds between obstacle spawns
    pub spawn_interval_ms: u32,
    /// Scroll speed at round start
    pub base_speed: f32,
    /// Speed added at each score threshold
    pub speed_step: f32,
    /// Points between speed-ups
    pub points_per_speed_up: u32,

    // === Brick breaker ===
    /// Initial ball speed on both axes
    pub ball_speed: i32,
    /// Points per destroyed brick
    pub brick_points: u32,
    /// Paddle impact offset divisor (smaller = sharper angles)
    pub angle_divisor: i32,
    /// Symmetric clamp on the ball's horizontal speed
    pub max_ball_vx: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 700,
            base_speed: 2.0,
            speed_step: 0.5,
            points_per_speed_up: 10,

            ball_speed: 1,
            brick_points: 10,
            angle_divisor: 3,
            max_ball_vx: 2,
        }
    }
}

impl Tuning {
    /// Parse a tuning blob; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
