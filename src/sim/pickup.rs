//! Falling collectibles (power-ups, penalties) and falling hazard bricks

use std::fmt::Debug;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, circle_intersects_rect, rect_intersects_rect};
use super::effects::EffectKind;
use super::state::{Ball, Paddle};
use crate::config::{BrickConfig, CollectibleConfig, FieldConfig};

/// Variant set of a collectible with a fixed weighted spawn table
pub trait CollectibleKind: Copy + Eq + Debug + Sized + 'static {
    /// (kind, weight) pairs; weights sum to 1 and order fixes the
    /// cumulative thresholds.
    const TABLE: &'static [(Self, f32)];

    /// Timed effect registered on collection, `None` for instant kinds
    fn effect(self) -> Option<EffectKind>;

    fn symbol(self) -> &'static str;

    fn label(self) -> &'static str;

    /// Display color as 0xRRGGBB
    fn color(self) -> u32;

    /// Map a roll in [0, 1) onto the cumulative table
    fn from_roll(roll: f32) -> Self {
        let mut acc = 0.0;
        for &(kind, weight) in Self::TABLE {
            acc += weight;
            if roll < acc {
                return kind;
            }
        }
        // Rounding in the running sum can leave a sliver below 1.0
        Self::TABLE[Self::TABLE.len() - 1].0
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_roll(rng.random::<f32>())
    }

    fn is_timed(self) -> bool {
        self.effect().is_some()
    }

    /// Seconds the effect lasts (0 for instant kinds)
    fn duration(self) -> f32 {
        self.effect().map_or(0.0, EffectKind::duration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtendPaddle,
    MultiBall,
    SlowBall,
    ExtraLife,
    ScoreBoost,
    StickyPaddle,
    Shield,
}

impl CollectibleKind for PowerUpKind {
    const TABLE: &'static [(Self, f32)] = &[
        (PowerUpKind::ExtendPaddle, 0.25),
        (PowerUpKind::SlowBall, 0.20),
        (PowerUpKind::ScoreBoost, 0.15),
        (PowerUpKind::MultiBall, 0.15),
        (PowerUpKind::StickyPaddle, 0.10),
        (PowerUpKind::Shield, 0.08),
        (PowerUpKind::ExtraLife, 0.07),
    ];

    fn effect(self) -> Option<EffectKind> {
        match self {
            PowerUpKind::ExtendPaddle => Some(EffectKind::ExtendPaddle),
            PowerUpKind::SlowBall => Some(EffectKind::SlowBall),
            PowerUpKind::ScoreBoost => Some(EffectKind::ScoreBoost),
            PowerUpKind::StickyPaddle => Some(EffectKind::StickyPaddle),
            PowerUpKind::Shield => Some(EffectKind::Shield),
            PowerUpKind::MultiBall | PowerUpKind::ExtraLife => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            PowerUpKind::ExtendPaddle => "E",
            PowerUpKind::MultiBall => "M",
            PowerUpKind::SlowBall => "S",
            PowerUpKind::ExtraLife => "♥",
            PowerUpKind::ScoreBoost => "2x",
            PowerUpKind::StickyPaddle => "▬",
            PowerUpKind::Shield => "◊",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PowerUpKind::ExtendPaddle => "Extend Paddle",
            PowerUpKind::MultiBall => "Multi-Ball",
            PowerUpKind::SlowBall => "Slow Ball",
            PowerUpKind::ExtraLife => "Extra Life",
            PowerUpKind::ScoreBoost => "Double Points",
            PowerUpKind::StickyPaddle => "Sticky Paddle",
            PowerUpKind::Shield => "Bottom Shield",
        }
    }

    fn color(self) -> u32 {
        match self {
            PowerUpKind::ExtendPaddle => 0x32CD32,
            PowerUpKind::MultiBall => 0x00FFFF,
            PowerUpKind::SlowBall => 0xADD8E6,
            PowerUpKind::ExtraLife => 0xFF0000,
            PowerUpKind::ScoreBoost => 0xFFD700,
            PowerUpKind::StickyPaddle => 0x800080,
            PowerUpKind::Shield => 0xFFA500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PenaltyKind {
    SpeedUp,
    ShrinkPaddle,
    DoubleBall,
    FallingBrick,
    ReverseControls,
    BlindZone,
}

impl CollectibleKind for PenaltyKind {
    const TABLE: &'static [(Self, f32)] = &[
        (PenaltyKind::SpeedUp, 0.30),
        (PenaltyKind::ShrinkPaddle, 0.25),
        (PenaltyKind::DoubleBall, 0.20),
        (PenaltyKind::ReverseControls, 0.13),
        (PenaltyKind::FallingBrick, 0.07),
        (PenaltyKind::BlindZone, 0.05),
    ];

    fn effect(self) -> Option<EffectKind> {
        match self {
            PenaltyKind::SpeedUp => Some(EffectKind::SpeedUp),
            PenaltyKind::ShrinkPaddle => Some(EffectKind::ShrinkPaddle),
            PenaltyKind::ReverseControls => Some(EffectKind::ReverseControls),
            PenaltyKind::BlindZone => Some(EffectKind::BlindZone),
            PenaltyKind::DoubleBall | PenaltyKind::FallingBrick => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            PenaltyKind::SpeedUp => "⚡",
            PenaltyKind::ShrinkPaddle => "↔",
            PenaltyKind::DoubleBall => "◎",
            PenaltyKind::FallingBrick => "▼",
            PenaltyKind::ReverseControls => "⟷",
            PenaltyKind::BlindZone => "▓",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PenaltyKind::SpeedUp => "Speed Up!",
            PenaltyKind::ShrinkPaddle => "Shrink Paddle",
            PenaltyKind::DoubleBall => "Double Ball",
            PenaltyKind::FallingBrick => "Falling Brick!",
            PenaltyKind::ReverseControls => "Reversed!",
            PenaltyKind::BlindZone => "Blind Zone",
        }
    }

    fn color(self) -> u32 {
        match self {
            PenaltyKind::SpeedUp => 0xFF4500,
            PenaltyKind::ShrinkPaddle => 0x8B0000,
            PenaltyKind::DoubleBall => 0xFF8C00,
            PenaltyKind::FallingBrick => 0xA9A9A9,
            PenaltyKind::ReverseControls => 0x9400D3,
            PenaltyKind::BlindZone => 0x000000,
        }
    }
}

/// A square pickup falling straight down from a destroyed brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible<K> {
    pub id: u32,
    pub kind: K,
    /// Center position
    pub pos: Vec2,
    pub size: f32,
    pub fall_speed: f32,
    pub active: bool,
    /// Seconds of effect carried by this pickup
    pub remaining_duration: f32,
}

pub type PowerUp = Collectible<PowerUpKind>;
pub type Penalty = Collectible<PenaltyKind>;

impl<K: CollectibleKind> Collectible<K> {
    pub fn new(id: u32, kind: K, pos: Vec2, size: f32, fall_speed: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            fall_speed,
            active: true,
            remaining_duration: kind.duration(),
        }
    }

    pub fn update(&mut self, dt: f32, field_height: f32) {
        if !self.active {
            return;
        }
        self.pos.y += self.fall_speed * dt;
        if self.pos.y > field_height + self.size {
            self.active = false;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size))
    }

    pub fn collides_with(&self, paddle: &Paddle) -> bool {
        self.active && rect_intersects_rect(&self.rect(), &paddle.rect())
    }

    pub fn collect(&mut self) {
        self.active = false;
    }
}

impl PowerUp {
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        id: u32,
        pos: Vec2,
        cfg: &CollectibleConfig,
    ) -> Self {
        Self::new(id, PowerUpKind::random(rng), pos, cfg.size, cfg.fall_speed)
    }
}

impl Penalty {
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        id: u32,
        pos: Vec2,
        cfg: &CollectibleConfig,
    ) -> Self {
        Self::new(
            id,
            PenaltyKind::random(rng),
            pos,
            cfg.size,
            cfg.fall_speed * cfg.penalty_fall_factor,
        )
    }
}

/// A brick dropped by the falling-brick penalty. Kills on paddle contact,
/// can be shot down by a ball.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingHazard {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub fall_speed: f32,
    /// Fall speed gained per second
    pub acceleration: f32,
    pub hit_points: u8,
    /// Cosmetic spin angle (radians)
    pub rotation: f32,
    /// Radians per second
    pub rotation_speed: f32,
    pub active: bool,
}

impl FallingHazard {
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        id: u32,
        field: &FieldConfig,
        bricks: &BrickConfig,
        cfg: &CollectibleConfig,
    ) -> Self {
        let size = Vec2::new(bricks.width, bricks.height);
        let left = rng.random::<f32>() * (field.width - size.x).max(0.0);
        let max_spin = cfg.hazard_max_spin.to_radians();
        Self {
            id,
            pos: Vec2::new(left + size.x / 2.0, cfg.hazard_spawn_y),
            size,
            fall_speed: cfg.hazard_fall_speed,
            acceleration: cfg.hazard_acceleration,
            hit_points: 1,
            rotation: 0.0,
            rotation_speed: (rng.random::<f32>() * 2.0 - 1.0) * max_spin,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32, field_height: f32) {
        if !self.active {
            return;
        }
        self.pos.y += self.fall_speed * dt;
        self.fall_speed += self.acceleration * dt;
        self.rotation += self.rotation_speed * dt;
        if self.pos.y > field_height + self.size.y {
            self.active = false;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    pub fn collides_with_paddle(&self, paddle: &Paddle) -> bool {
        self.active && rect_intersects_rect(&self.rect(), &paddle.rect())
    }

    pub fn collides_with_ball(&self, ball: &Ball) -> bool {
        self.active && circle_intersects_rect(&ball.circle(), &self.rect())
    }

    /// Returns true if this hit destroyed it
    pub fn hit(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.hit_points = self.hit_points.saturating_sub(1);
        if self.hit_points == 0 {
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn destroy(&mut self) {
        self.active = false;
    }
}
