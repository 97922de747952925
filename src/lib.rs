//! Brick Breaker - ball-and-paddle arcade simulation
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, effects, game state machine)
//! - `config`: Data-driven game balance
//! - `profile`: Per-level best scores and unlocks
//! - `persistence`: Score storage backends
//! - `audio`: Event to sound routing

pub mod audio;
pub mod config;
pub mod highscores;
pub mod persistence;
pub mod profile;
pub mod settings;
pub mod sim;

pub use config::GameConfig;
pub use highscores::Leaderboard;
pub use profile::PlayerProfile;
pub use settings::Settings;
pub use sim::{Game, GameEvent, GamePhase};

/// Timing constants shared by the simulation and its drivers
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta a driver may feed in (avoids catch-up jumps after a stall)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Rotate a vector by `angle` radians
#[inline]
pub fn rotate(v: glam::Vec2, angle: f32) -> glam::Vec2 {
    glam::Vec2::from_angle(angle).rotate(v)
}
