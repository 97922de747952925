//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids ascending)
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod effects;
pub mod game;
pub mod pickup;
pub mod state;
pub mod tick;

pub use collision::{Circle, ImpactSide, Rect};
pub use effects::{ActiveEffect, EffectCategory, EffectKind, EffectRegistry};
pub use game::Game;
pub use pickup::{
    Collectible, CollectibleKind, FallingHazard, Penalty, PenaltyKind, PowerUp, PowerUpKind,
};
pub use state::{Ball, BallId, BallState, Brick, BrickKind, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{LevelOutcome, generate_level, tick};
