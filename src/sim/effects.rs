//! Timed effects from power-ups and penalties
//!
//! Every timed effect is an [`EffectKind`]. Applying and reverting are two
//! exhaustive matches over the same enum, so adding a variant forces both
//! sides to be written.

use serde::{Deserialize, Serialize};

use super::pickup::{FallingHazard, PenaltyKind, PowerUpKind};
use super::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectCategory {
    PowerUp,
    Penalty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    ExtendPaddle,
    SlowBall,
    ScoreBoost,
    StickyPaddle,
    Shield,
    SpeedUp,
    ShrinkPaddle,
    ReverseControls,
    BlindZone,
}

impl EffectKind {
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::ExtendPaddle => "Extend Paddle",
            EffectKind::SlowBall => "Slow Ball",
            EffectKind::ScoreBoost => "Double Points",
            EffectKind::StickyPaddle => "Sticky Paddle",
            EffectKind::Shield => "Bottom Shield",
            EffectKind::SpeedUp => "Speed Up",
            EffectKind::ShrinkPaddle => "Shrink Paddle",
            EffectKind::ReverseControls => "Reversed Controls",
            EffectKind::BlindZone => "Blind Zone",
        }
    }

    pub fn category(self) -> EffectCategory {
        match self {
            EffectKind::ExtendPaddle
            | EffectKind::SlowBall
            | EffectKind::ScoreBoost
            | EffectKind::StickyPaddle
            | EffectKind::Shield => EffectCategory::PowerUp,
            EffectKind::SpeedUp
            | EffectKind::ShrinkPaddle
            | EffectKind::ReverseControls
            | EffectKind::BlindZone => EffectCategory::Penalty,
        }
    }

    /// Lifetime in seconds
    pub fn duration(self) -> f32 {
        match self {
            EffectKind::ExtendPaddle => 10.0,
            EffectKind::SlowBall => 8.0,
            EffectKind::ScoreBoost => 15.0,
            EffectKind::StickyPaddle => 12.0,
            EffectKind::Shield => 20.0,
            EffectKind::SpeedUp => 10.0,
            EffectKind::ShrinkPaddle => 8.0,
            EffectKind::ReverseControls => 6.0,
            EffectKind::BlindZone => 5.0,
        }
    }

    /// Effect that cannot be active at the same time as this one
    pub fn rival(self) -> Option<EffectKind> {
        match self {
            EffectKind::ExtendPaddle => Some(EffectKind::ShrinkPaddle),
            EffectKind::ShrinkPaddle => Some(EffectKind::ExtendPaddle),
            _ => None,
        }
    }

    pub fn apply(self, state: &mut GameState) {
        let rules = &state.config.rules;
        match self {
            EffectKind::ExtendPaddle => state.paddle.extend(state.config.paddle.extend_factor),
            EffectKind::ShrinkPaddle => state.paddle.shrink(state.config.paddle.shrink_factor),
            EffectKind::SlowBall => {
                for ball in &mut state.balls {
                    ball.decrease_speed(rules.slow_factor, &state.config.ball);
                }
            }
            EffectKind::SpeedUp => {
                for ball in &mut state.balls {
                    ball.increase_speed(rules.speed_up_factor, &state.config.ball);
                }
            }
            EffectKind::ScoreBoost => state.score_multiplier = rules.score_boost_multiplier,
            EffectKind::StickyPaddle => {
                state.paddle.set_sticky(true);
            }
            EffectKind::Shield => state.shield = true,
            EffectKind::ReverseControls => {
                state.paddle.reversed = true;
                // Flip the current motion so a held key changes direction now
                state.paddle.velocity = -state.paddle.velocity;
            }
            // Drawn by the renderer from the registry, no state to touch
            EffectKind::BlindZone => {}
        }
    }

    pub fn revert(self, state: &mut GameState) {
        let rules = &state.config.rules;
        match self {
            EffectKind::ExtendPaddle | EffectKind::ShrinkPaddle => state.paddle.reset_size(),
            EffectKind::SlowBall => {
                for ball in &mut state.balls {
                    ball.increase_speed(rules.slow_factor, &state.config.ball);
                }
            }
            EffectKind::SpeedUp => {
                for ball in &mut state.balls {
                    ball.decrease_speed(rules.speed_up_factor, &state.config.ball);
                }
            }
            EffectKind::ScoreBoost => state.score_multiplier = 1.0,
            EffectKind::StickyPaddle => {
                if let Some(id) = state.paddle.set_sticky(false) {
                    let GameState {
                        balls, rng, config, ..
                    } = &mut *state;
                    if let Some(ball) = balls.iter_mut().find(|b| b.id == id) {
                        ball.release(rng, &config.ball);
                    }
                }
            }
            EffectKind::Shield => state.shield = false,
            EffectKind::ReverseControls => {
                state.paddle.reversed = false;
                state.paddle.velocity = -state.paddle.velocity;
            }
            EffectKind::BlindZone => {}
        }
    }
}

/// A running timed effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    /// Seconds left
    pub remaining: f32,
}

impl ActiveEffect {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn category(&self) -> EffectCategory {
        self.kind.category()
    }

    /// Remaining fraction of the full duration, for HUD timer bars
    pub fn progress(&self) -> f32 {
        (self.remaining / self.kind.duration()).clamp(0.0, 1.0)
    }
}

/// Active effects, at most one per kind, in activation order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectRegistry {
    effects: Vec<ActiveEffect>,
}

impl EffectRegistry {
    /// Start or refresh `kind`. Returns true if it was not already active.
    pub fn activate(&mut self, kind: EffectKind, duration: f32) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.remaining = duration;
            false
        } else {
            self.effects.push(ActiveEffect {
                kind,
                remaining: duration,
            });
            true
        }
    }

    /// Drop the entry without reverting. Returns true if it was present.
    pub fn remove(&mut self, kind: EffectKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn remaining(&self, kind: EffectKind) -> Option<f32> {
        self.effects.iter().find(|e| e.kind == kind).map(|e| e.remaining)
    }

    /// Count down every timer; expired entries are removed and returned
    pub fn advance(&mut self, dt: f32) -> Vec<EffectKind> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|e| {
            e.remaining -= dt;
            if e.remaining <= 0.0 {
                expired.push(e.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Register a timed effect, applying its mutation only on first activation
pub fn activate(state: &mut GameState, kind: EffectKind) {
    if let Some(rival) = kind.rival() {
        if state.effects.remove(rival) {
            log::debug!("{} cancels {}", kind.name(), rival.name());
        }
    }
    if state.effects.activate(kind, kind.duration()) {
        kind.apply(state);
        log::debug!("Effect started: {} ({}s)", kind.name(), kind.duration());
    } else {
        log::debug!("Effect refreshed: {}", kind.name());
    }
}

pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::ExtendPaddle => activate(state, EffectKind::ExtendPaddle),
        PowerUpKind::SlowBall => activate(state, EffectKind::SlowBall),
        PowerUpKind::ScoreBoost => activate(state, EffectKind::ScoreBoost),
        PowerUpKind::StickyPaddle => activate(state, EffectKind::StickyPaddle),
        PowerUpKind::Shield => activate(state, EffectKind::Shield),
        PowerUpKind::MultiBall => spawn_clones(state, 2),
        PowerUpKind::ExtraLife => {
            if state.lives < state.config.rules.max_lives {
                state.lives += 1;
            }
        }
    }
}

pub fn apply_penalty(state: &mut GameState, kind: PenaltyKind) {
    match kind {
        PenaltyKind::SpeedUp => activate(state, EffectKind::SpeedUp),
        PenaltyKind::ShrinkPaddle => activate(state, EffectKind::ShrinkPaddle),
        PenaltyKind::ReverseControls => activate(state, EffectKind::ReverseControls),
        PenaltyKind::BlindZone => activate(state, EffectKind::BlindZone),
        PenaltyKind::DoubleBall => spawn_clones(state, 1),
        PenaltyKind::FallingBrick => {
            let id = state.next_entity_id();
            let GameState { rng, config, .. } = &mut *state;
            let hazard =
                FallingHazard::spawn(rng, id, &config.field, &config.bricks, &config.collectibles);
            state.hazards.push(hazard);
        }
    }
}

/// Clone the first launched ball `count` times
fn spawn_clones(state: &mut GameState, count: usize) {
    let Some(source) = state.balls.iter().find(|b| b.is_launched()).cloned() else {
        log::debug!("No launched ball to clone");
        return;
    };
    for _ in 0..count {
        let id = state.next_entity_id();
        let clone = source.spawn_clone(id, &mut state.rng);
        state.balls.push(clone);
    }
}
