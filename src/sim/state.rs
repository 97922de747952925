//! Game state and core simulation types
//!
//! Everything the renderer reads lives here as public fields.

use std::f32::consts::PI;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, Rect, rect_intersects_rect};
use super::effects::EffectRegistry;
use super::pickup::{FallingHazard, Penalty, PenaltyKind, PowerUp, PowerUpKind};
use crate::config::{BallConfig, FieldConfig, GameConfig};

/// Top-level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player typing a display name
    NameInput,
    /// Level selection
    Menu,
    /// Leaderboard overlay on top of the menu
    Leaderboard,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// All lives lost
    GameOver,
    /// Level cleared, next level available
    LevelComplete,
    /// Final level cleared
    Victory,
}

/// Discrete notifications for audio and visual collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallHit,
    PaddleHit,
    /// Brick damaged but still standing (or unbreakable)
    BrickHit,
    BrickDestroyed,
    PowerUpCollected(PowerUpKind),
    PenaltyCollected(PenaltyKind),
    BallLaunched,
    LifeLost,
    LevelComplete { level: u32, score: u32 },
    GameOver { level: u32, score: u32 },
    Victory { score: u32 },
    MenuSelect,
    MenuConfirm,
}

pub type BallId = u32;

/// Ball state - resting on the paddle, moving, or held by a sticky paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    /// Not launched yet, rides on the paddle
    Attached,
    /// Launched and moving
    Free,
    /// Caught by a sticky paddle; `speed` is restored on release
    Stuck { speed: f32 },
}

/// Launch velocity: angle uniform in [-60°, -30°) from the upward vertical,
/// which always sends the ball up and to the left.
pub fn launch_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec2 {
    let angle = rng.random_range(-60.0f32..-30.0).to_radians();
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: BallState,
    /// Spawned by a multi-ball or double-ball effect
    pub is_clone: bool,
}

impl Ball {
    pub fn new(id: BallId, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            state: BallState::Attached,
            is_clone: false,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Launched balls are moving or held by a sticky paddle
    pub fn is_launched(&self) -> bool {
        !matches!(self.state, BallState::Attached)
    }

    pub fn is_free(&self) -> bool {
        matches!(self.state, BallState::Free)
    }

    pub fn is_stuck(&self) -> bool {
        matches!(self.state, BallState::Stuck { .. })
    }

    pub fn launch<R: Rng + ?Sized>(&mut self, rng: &mut R, cfg: &BallConfig) {
        if let BallState::Attached = self.state {
            self.vel = launch_velocity(rng, cfg.speed);
            self.state = BallState::Free;
            self.clamp_speed(cfg);
        }
    }

    /// Integrate one step and reflect off the side walls and ceiling.
    /// Returns true if a wall was hit.
    pub fn update(&mut self, dt: f32, field: &FieldConfig) -> bool {
        if !self.is_free() {
            return false;
        }
        self.pos += self.vel * dt;
        let mut hit = false;

        if self.pos.x - self.radius <= 0.0 {
            self.pos.x = self.radius;
            self.vel.x = self.vel.x.abs();
            hit = true;
        } else if self.pos.x + self.radius >= field.width {
            self.pos.x = field.width - self.radius;
            self.vel.x = -self.vel.x.abs();
            hit = true;
        }

        if self.pos.y - self.radius <= 0.0 {
            self.pos.y = self.radius;
            self.vel.y = self.vel.y.abs();
            hit = true;
        }
        hit
    }

    /// Ride along with the paddle while waiting for launch
    pub fn follow_paddle(&mut self, paddle_x: f32, rest_y: f32) {
        if let BallState::Attached = self.state {
            self.pos = Vec2::new(paddle_x, rest_y);
        }
    }

    /// Reflect off the paddle with an angle chosen by where the ball landed
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle, cfg: &BallConfig) {
        let half_width = paddle.width / 2.0;
        let hit_pos = ((self.pos.x - paddle.pos.x) / half_width).clamp(-1.0, 1.0);

        let speed = self.speed();
        let angle = hit_pos * PI / 3.0;
        self.vel = Vec2::new(speed * angle.sin(), -(speed * angle.cos()).abs());

        // Never let the ball skim off the paddle horizontally
        if self.vel.y > -cfg.min_upward_speed {
            self.vel.y = -cfg.min_upward_speed;
        }

        self.pos.y = paddle.top() - self.radius;
        self.clamp_speed(cfg);
    }

    pub fn reverse_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    pub fn reverse_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    pub fn increase_speed(&mut self, factor: f32, cfg: &BallConfig) {
        self.scale_speed(factor, cfg);
    }

    pub fn decrease_speed(&mut self, factor: f32, cfg: &BallConfig) {
        self.scale_speed(1.0 / factor, cfg);
    }

    fn scale_speed(&mut self, scale: f32, cfg: &BallConfig) {
        if let BallState::Stuck { speed } = &mut self.state {
            *speed = (*speed * scale).clamp(cfg.min_speed, cfg.max_speed);
        } else if self.is_free() {
            self.vel *= scale;
            self.clamp_speed(cfg);
        }
    }

    /// Keep a moving ball within [min_speed, max_speed]
    pub fn clamp_speed(&mut self, cfg: &BallConfig) {
        if self.is_free() && self.vel != Vec2::ZERO {
            self.vel = self.vel.clamp_length(cfg.min_speed, cfg.max_speed);
        }
    }

    /// Copy of this ball heading off at up to ±30° from its current direction
    pub fn spawn_clone<R: Rng + ?Sized>(&self, id: BallId, rng: &mut R) -> Ball {
        let base = match self.state {
            BallState::Stuck { speed } => Vec2::new(0.0, -speed),
            _ => self.vel,
        };
        let deviation = (rng.random::<f32>() - 0.5) * PI / 3.0;
        Ball {
            id,
            pos: self.pos,
            vel: crate::rotate(base, deviation),
            radius: self.radius,
            state: BallState::Free,
            is_clone: true,
        }
    }

    /// Hold the ball just above the paddle, remembering its speed
    pub fn stick(&mut self, paddle_top: f32) {
        if self.is_free() {
            self.state = BallState::Stuck {
                speed: self.speed(),
            };
            self.vel = Vec2::ZERO;
            self.pos.y = paddle_top - self.radius;
        }
    }

    /// Send a stuck ball back up with the speed it had when caught
    pub fn release<R: Rng + ?Sized>(&mut self, rng: &mut R, cfg: &BallConfig) {
        if let BallState::Stuck { speed } = self.state {
            self.vel = launch_velocity(rng, speed);
            self.state = BallState::Free;
            self.clamp_speed(cfg);
        }
    }

    /// Entirely past the bottom edge
    pub fn is_below(&self, height: f32) -> bool {
        self.pos.y - self.radius > height
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position
    pub pos: Vec2,
    pub width: f32,
    /// Width before size modifiers
    pub base_width: f32,
    pub height: f32,
    /// Movement speed (pixels per second)
    pub speed: f32,
    /// Current horizontal velocity
    pub velocity: f32,
    /// Left/right intents are swapped
    pub reversed: bool,
    pub sticky: bool,
    /// Ball currently held; the ball itself is owned by the game state
    pub stuck_ball: Option<BallId>,
}

impl Paddle {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(cfg.field.width / 2.0, cfg.paddle_y()),
            width: cfg.paddle.width,
            base_width: cfg.paddle.width,
            height: cfg.paddle.height,
            speed: cfg.paddle.speed,
            velocity: 0.0,
            reversed: false,
            sticky: false,
            stuck_ball: None,
        }
    }

    /// Back to the center with every modifier cleared
    pub fn reset(&mut self, cfg: &GameConfig) {
        *self = Self::new(cfg);
    }

    pub fn move_left(&mut self) {
        self.velocity = if self.reversed { self.speed } else { -self.speed };
    }

    pub fn move_right(&mut self) {
        self.velocity = if self.reversed { -self.speed } else { self.speed };
    }

    pub fn stop(&mut self) {
        self.velocity = 0.0;
    }

    pub fn update(&mut self, dt: f32, field_width: f32) {
        self.pos.x += self.velocity * dt;
        let half = self.width / 2.0;
        self.pos.x = self.pos.x.clamp(half, (field_width - half).max(half));
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::new(self.width, self.height))
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    /// Only counts while the ball is travelling downward, so one approach
    /// registers a single hit.
    pub fn collides_with(&self, ball: &Ball) -> bool {
        ball.vel.y > 0.0 && rect_intersects_rect(&ball.circle().bounds(), &self.rect())
    }

    /// Widths are whole pixels, truncated
    pub fn extend(&mut self, factor: f32) {
        self.width = (self.base_width * factor).trunc();
    }

    pub fn shrink(&mut self, factor: f32) {
        self.width = (self.base_width * factor).trunc();
    }

    pub fn reset_size(&mut self) {
        self.width = self.base_width;
    }

    /// Toggle sticky mode. Turning it off hands back the held ball so the
    /// caller can release it.
    pub fn set_sticky(&mut self, sticky: bool) -> Option<BallId> {
        self.sticky = sticky;
        if sticky { None } else { self.stuck_ball.take() }
    }

    /// Hold `id` if sticky and empty-handed
    pub fn stick_ball(&mut self, id: BallId) -> bool {
        if self.sticky && self.stuck_ball.is_none() {
            self.stuck_ball = Some(id);
            true
        } else {
            false
        }
    }

    pub fn take_stuck_ball(&mut self) -> Option<BallId> {
        self.stuck_ball.take()
    }

    pub fn has_ball_stuck(&self) -> bool {
        self.stuck_ball.is_some()
    }

    /// Forget `id` if it is the held ball
    pub fn forget_ball(&mut self, id: BallId) {
        if self.stuck_ball == Some(id) {
            self.stuck_ball = None;
        }
    }
}

/// Brick durability classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Normal,
    Hard,
    Tough,
    /// Bonus points
    Gold,
    /// Always drops a power-up
    Power,
    /// Always drops a penalty
    Penalty,
    /// Cannot be destroyed, doesn't count for level clear
    Unbreakable,
}

impl BrickKind {
    pub fn hit_points(self) -> u8 {
        match self {
            BrickKind::Normal | BrickKind::Power | BrickKind::Penalty => 1,
            BrickKind::Hard | BrickKind::Gold => 2,
            BrickKind::Tough => 3,
            BrickKind::Unbreakable => u8::MAX, // Doesn't matter, can't be damaged
        }
    }

    pub fn points(self) -> u32 {
        match self {
            BrickKind::Normal => 10,
            BrickKind::Hard => 25,
            BrickKind::Tough => 50,
            BrickKind::Gold => 100,
            BrickKind::Power => 15,
            BrickKind::Penalty => 5,
            BrickKind::Unbreakable => 0,
        }
    }

    /// Base color as 0xRRGGBB
    pub fn color(self) -> u32 {
        match self {
            BrickKind::Normal => 0x90EE90,
            BrickKind::Hard => 0xFFA500,
            BrickKind::Tough => 0xFF0000,
            BrickKind::Gold => 0xFFD700,
            BrickKind::Power => 0x00FFFF,
            BrickKind::Penalty => 0xA9A9A9,
            BrickKind::Unbreakable => 0x708090,
        }
    }

    pub fn is_breakable(self) -> bool {
        self != BrickKind::Unbreakable
    }
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub kind: BrickKind,
    pub rect: Rect,
    pub hit_points: u8,
    pub max_hit_points: u8,
    pub active: bool,
    /// Guaranteed power-up drop
    pub has_power_up: bool,
    /// Guaranteed penalty drop
    pub has_penalty: bool,
}

impl Brick {
    pub fn new(id: u32, kind: BrickKind, rect: Rect) -> Self {
        Self {
            id,
            kind,
            rect,
            hit_points: kind.hit_points(),
            max_hit_points: kind.hit_points(),
            active: true,
            has_power_up: kind == BrickKind::Power,
            has_penalty: kind == BrickKind::Penalty,
        }
    }

    /// Damage the brick. Returns the kind's points when this hit destroys
    /// it, 0 otherwise.
    pub fn hit(&mut self) -> u32 {
        if !self.active || !self.kind.is_breakable() {
            return 0;
        }
        self.hit_points = self.hit_points.saturating_sub(1);
        if self.hit_points == 0 {
            self.active = false;
            self.kind.points()
        } else {
            0
        }
    }

    /// Remaining durability in (0, 1]; renderers dim damaged bricks by it
    pub fn health_ratio(&self) -> f32 {
        if !self.kind.is_breakable() {
            return 1.0;
        }
        self.hit_points as f32 / self.max_hit_points as f32
    }

    /// Returns true if this brick must still be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        self.active && self.kind.is_breakable()
    }

    pub fn drops_power_up(&self) -> bool {
        self.has_power_up || self.kind == BrickKind::Power
    }

    pub fn drops_penalty(&self) -> bool {
        self.has_penalty || self.kind == BrickKind::Penalty
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Current level (1-based, 0 before the first level starts)
    pub level: u32,
    pub lives: u32,
    pub score: u32,
    /// Score-boost multiplier (1.0 when inactive)
    pub score_multiplier: f32,
    /// Bottom shield armed
    pub shield: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Level attempts started, restarts included
    pub attempt: u32,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    pub penalties: Vec<Penalty>,
    pub hazards: Vec<FallingHazard>,
    pub effects: EffectRegistry,
    /// Pending notifications, drained by the driver
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given configuration and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut state = Self {
            paddle: Paddle::new(&config),
            lives: config.rules.initial_lives,
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NameInput,
            level: 0,
            score: 0,
            score_multiplier: 1.0,
            shield: false,
            time_ticks: 0,
            attempt: 0,
            balls: Vec::new(),
            bricks: Vec::new(),
            power_ups: Vec::new(),
            penalties: Vec::new(),
            hazards: Vec::new(),
            effects: EffectRegistry::default(),
            events: Vec::new(),
            next_id: 1,
        };
        state.spawn_ball_attached();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an unlaunched ball resting on the paddle
    pub fn spawn_ball_attached(&mut self) -> BallId {
        let id = self.next_entity_id();
        let pos = Vec2::new(self.paddle.pos.x, self.config.ball_rest_y());
        self.balls.push(Ball::new(id, pos, self.config.ball.radius));
        id
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn ball_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    /// Drop a ball, clearing the paddle's hold on it
    pub fn remove_ball(&mut self, id: BallId) {
        self.balls.retain(|b| b.id != id);
        self.paddle.forget_ball(id);
    }

    /// Reset everything transient: balls, paddle, falling objects, effects.
    /// Bricks are left alone.
    pub fn reset_entities(&mut self) {
        self.balls.clear();
        self.paddle.reset(&self.config);
        self.spawn_ball_attached();
        self.power_ups.clear();
        self.penalties.clear();
        self.hazards.clear();
        self.effects.clear();
        self.score_multiplier = 1.0;
        self.shield = false;
    }

    /// Fresh attempt at `level`: score and lives reset, new brick grid
    pub fn begin_level(&mut self, level: u32) {
        self.level = level;
        self.attempt += 1;
        self.score = 0;
        self.lives = self.config.rules.initial_lives;
        self.reset_entities();
        super::tick::generate_level(self);
        log::info!(
            "Level {} started: {} bricks, {} lives",
            level,
            self.bricks.len(),
            self.lives
        );
    }

    /// Tear down the level when leaving for the menu
    pub fn clear_level(&mut self) {
        self.reset_entities();
        self.bricks.clear();
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// No breakable brick left standing
    pub fn is_level_complete(&self) -> bool {
        !self.bricks.iter().any(Brick::counts_for_clear)
    }

    pub fn has_blind_zone(&self) -> bool {
        self.effects.is_active(super::effects::EffectKind::BlindZone)
    }

    pub fn is_final_level(&self) -> bool {
        self.level >= self.config.rules.total_levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cfg() -> GameConfig {
        GameConfig::default()
    }

    fn free_ball(vel: Vec2) -> Ball {
        let mut ball = Ball::new(1, Vec2::new(400.0, 300.0), 10.0);
        ball.state = BallState::Free;
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_launch_angle_is_up_and_left() {
        let cfg = cfg();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let mut ball = Ball::new(1, Vec2::new(400.0, 520.0), 10.0);
            ball.launch(&mut rng, &cfg.ball);
            assert!(ball.is_free());
            assert!(ball.vel.x < 0.0 && ball.vel.y < 0.0);
            assert!((ball.speed() - cfg.ball.speed).abs() < 1e-3);
            // Angle from vertical between 30° and 60°
            let from_vertical = (-ball.vel.x).atan2(-ball.vel.y).to_degrees();
            assert!((30.0..=60.0).contains(&from_vertical), "{from_vertical}");
        }
    }

    #[test]
    fn test_launch_twice_is_noop() {
        let cfg = cfg();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ball = Ball::new(1, Vec2::new(400.0, 520.0), 10.0);
        ball.launch(&mut rng, &cfg.ball);
        let vel = ball.vel;
        ball.launch(&mut rng, &cfg.ball);
        assert_eq!(ball.vel, vel);
    }

    #[test]
    fn test_wall_reflections() {
        let cfg = cfg();
        let mut ball = free_ball(Vec2::new(-300.0, 0.0));
        ball.pos = Vec2::new(12.0, 300.0);
        assert!(ball.update(0.1, &cfg.field));
        assert_eq!(ball.pos.x, 10.0);
        assert!(ball.vel.x > 0.0);

        let mut ball = free_ball(Vec2::new(0.0, -300.0));
        ball.pos = Vec2::new(400.0, 15.0);
        assert!(ball.update(0.1, &cfg.field));
        assert_eq!(ball.pos.y, 10.0);
        assert!(ball.vel.y > 0.0);

        let mut ball = free_ball(Vec2::new(100.0, 100.0));
        assert!(!ball.update(0.1, &cfg.field));
    }

    #[test]
    fn test_paddle_bounce_angle_by_offset() {
        let cfg = cfg();
        let paddle = Paddle::new(&cfg);

        // Center hit goes straight up
        let mut ball = free_ball(Vec2::new(0.0, 300.0));
        ball.pos.x = paddle.pos.x;
        ball.bounce_off_paddle(&paddle, &cfg.ball);
        assert!(ball.vel.x.abs() < 1e-3);
        assert!((ball.vel.y + 300.0).abs() < 1e-3);
        assert_eq!(ball.pos.y, paddle.top() - ball.radius);

        // Right edge: 60° to the right, speed preserved
        let mut ball = free_ball(Vec2::new(0.0, 300.0));
        ball.pos.x = paddle.pos.x + paddle.width;
        ball.bounce_off_paddle(&paddle, &cfg.ball);
        let angle = ball.vel.x.atan2(-ball.vel.y).to_degrees();
        assert!((angle - 60.0).abs() < 1e-2);
        assert!((ball.speed() - 300.0).abs() < 1e-2);
    }

    #[test]
    fn test_paddle_bounce_minimum_upward_speed() {
        let mut cfg = cfg();
        cfg.ball.min_upward_speed = 200.0;
        let paddle = Paddle::new(&cfg);
        let mut ball = free_ball(Vec2::new(0.0, 300.0));
        ball.pos.x = paddle.pos.x - paddle.width;
        ball.bounce_off_paddle(&paddle, &cfg.ball);
        // cos(60°) * 300 = 150 < 200
        assert!(ball.vel.y <= -200.0 + 1e-3);
    }

    #[test]
    fn test_clone_keeps_speed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let ball = free_ball(Vec2::new(120.0, -250.0));
        for id in 2..50 {
            let clone = ball.spawn_clone(id, &mut rng);
            assert!(clone.is_clone && clone.is_free());
            assert_eq!(clone.pos, ball.pos);
            assert!((clone.speed() - ball.speed()).abs() < 1e-2);
            let dev = clone.vel.angle_to(ball.vel).abs();
            assert!(dev <= PI / 6.0 + 1e-4);
        }
    }

    #[test]
    fn test_stick_and_release_restores_speed() {
        let cfg = cfg();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut ball = free_ball(Vec2::new(150.0, 400.0));
        let speed = ball.speed();
        ball.stick(542.5);
        assert!(ball.is_stuck());
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.pos.y, 532.5);
        ball.release(&mut rng, &cfg.ball);
        assert!(ball.is_free());
        assert!(ball.vel.y < 0.0);
        assert!((ball.speed() - speed).abs() < 1e-2);
    }

    #[test]
    fn test_paddle_size_modifiers_do_not_compound() {
        let cfg = cfg();
        let mut paddle = Paddle::new(&cfg);
        paddle.extend(1.5);
        paddle.extend(1.5);
        assert_eq!(paddle.width, 150.0);
        paddle.shrink(0.6);
        assert_eq!(paddle.width, 60.0);
        paddle.reset_size();
        assert_eq!(paddle.width, 100.0);
    }

    #[test]
    fn test_paddle_size_truncates_to_whole_pixels() {
        let mut cfg = cfg();
        cfg.paddle.width = 95.0;
        let mut paddle = Paddle::new(&cfg);
        paddle.extend(1.5);
        assert_eq!(paddle.width, 142.0);
        paddle.shrink(0.6);
        assert_eq!(paddle.width, 57.0);
        paddle.reset_size();
        assert_eq!(paddle.width, 95.0);
    }

    #[test]
    fn test_paddle_reversed_and_clamped() {
        let cfg = cfg();
        let mut paddle = Paddle::new(&cfg);
        paddle.reversed = true;
        paddle.move_left();
        assert!(paddle.velocity > 0.0);
        paddle.update(10.0, cfg.field.width);
        assert_eq!(paddle.pos.x, cfg.field.width - paddle.width / 2.0);
        paddle.move_right();
        paddle.update(10.0, cfg.field.width);
        assert_eq!(paddle.pos.x, paddle.width / 2.0);
    }

    #[test]
    fn test_paddle_collision_only_when_descending() {
        let cfg = cfg();
        let paddle = Paddle::new(&cfg);
        let mut ball = free_ball(Vec2::new(0.0, 200.0));
        ball.pos = Vec2::new(paddle.pos.x, paddle.top() - 5.0);
        assert!(paddle.collides_with(&ball));
        ball.vel.y = -200.0;
        assert!(!paddle.collides_with(&ball));
    }

    #[test]
    fn test_sticky_holds_one_ball() {
        let cfg = cfg();
        let mut paddle = Paddle::new(&cfg);
        assert!(!paddle.stick_ball(1));
        paddle.set_sticky(true);
        assert!(paddle.stick_ball(1));
        assert!(!paddle.stick_ball(2));
        assert_eq!(paddle.set_sticky(false), Some(1));
        assert!(!paddle.has_ball_stuck());
    }

    #[test]
    fn test_unbreakable_brick_never_breaks() {
        let rect = Rect::from_top_left(Vec2::ZERO, Vec2::ONE);
        let mut brick = Brick::new(1, BrickKind::Unbreakable, rect);
        for _ in 0..1000 {
            assert_eq!(brick.hit(), 0);
        }
        assert!(brick.active);
        assert!(!brick.counts_for_clear());
        assert_eq!(brick.health_ratio(), 1.0);
    }

    #[test]
    fn test_brick_breaks_on_last_hit() {
        for kind in [
            BrickKind::Normal,
            BrickKind::Hard,
            BrickKind::Tough,
            BrickKind::Gold,
            BrickKind::Power,
            BrickKind::Penalty,
        ] {
            let mut brick = Brick::new(1, kind, Rect::from_top_left(Vec2::ZERO, Vec2::ONE));
            let n = kind.hit_points();
            for i in 1..n {
                assert_eq!(brick.hit(), 0, "{kind:?} hit {i}");
                assert!(brick.active);
                assert!((brick.health_ratio() - (n - i) as f32 / n as f32).abs() < 1e-6);
            }
            assert_eq!(brick.hit(), kind.points());
            assert!(!brick.active);
            // Dead bricks stay dead
            assert_eq!(brick.hit(), 0);
        }
    }

    #[test]
    fn test_remove_ball_clears_paddle_hold() {
        let mut state = GameState::new(cfg(), 5);
        let id = state.balls[0].id;
        state.paddle.set_sticky(true);
        state.paddle.stick_ball(id);
        state.remove_ball(id);
        assert!(state.balls.is_empty());
        assert!(!state.paddle.has_ball_stuck());
    }

    #[test]
    fn test_level_complete_ignores_unbreakable() {
        let mut state = GameState::new(cfg(), 5);
        let rect = Rect::from_top_left(Vec2::ZERO, Vec2::ONE);
        state.bricks = vec![Brick::new(1, BrickKind::Unbreakable, rect)];
        assert!(state.is_level_complete());
        state.bricks.push(Brick::new(2, BrickKind::Normal, rect));
        assert!(!state.is_level_complete());
        state.bricks[1].hit();
        assert!(state.is_level_complete());
    }

    proptest! {
        #[test]
        fn speed_stays_in_bounds(
            vx in -2000.0f32..2000.0,
            vy in -2000.0f32..2000.0,
            factors in proptest::collection::vec((any::<bool>(), 1.01f32..5.0), 1..20),
        ) {
            prop_assume!(Vec2::new(vx, vy).length() > 1.0);
            let cfg = GameConfig::default();
            let mut ball = free_ball(Vec2::new(vx, vy));
            ball.clamp_speed(&cfg.ball);
            for (up, f) in factors {
                if up {
                    ball.increase_speed(f, &cfg.ball);
                } else {
                    ball.decrease_speed(f, &cfg.ball);
                }
                let s = ball.speed();
                prop_assert!(
                    s >= cfg.ball.min_speed - 1e-2 && s <= cfg.ball.max_speed + 1e-2,
                    "speed {}",
                    s
                );
            }
        }
    }
}
