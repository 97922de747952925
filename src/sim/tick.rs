//! Per-frame simulation tick
//!
//! Advances every entity in a fixed order. Later steps see the mutations of
//! earlier ones, and a life loss ends the tick immediately.

use std::ops::ControlFlow;

use glam::Vec2;
use rand::Rng;

use super::collision::{Rect, circle_intersects_rect, classify_impact_side};
use super::effects::{EffectKind, apply_penalty, apply_power_up};
use super::pickup::{Penalty, PowerUp};
use super::state::{BallId, Brick, BrickKind, GameEvent, GamePhase, GameState};
use crate::consts::MAX_FRAME_DT;

/// How a level attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    /// Every breakable brick destroyed
    Cleared { level: u32, score: u32 },
    /// Last life lost
    Failed { level: u32, score: u32 },
}

impl LevelOutcome {
    pub fn level(&self) -> u32 {
        match *self {
            LevelOutcome::Cleared { level, .. } | LevelOutcome::Failed { level, .. } => level,
        }
    }

    pub fn score(&self) -> u32 {
        match *self {
            LevelOutcome::Cleared { score, .. } | LevelOutcome::Failed { score, .. } => score,
        }
    }
}

/// Advance the game by `dt` seconds. Does nothing outside `Playing`.
///
/// Returns the outcome when this tick ended the level.
pub fn tick(state: &mut GameState, dt: f32) -> Option<LevelOutcome> {
    if state.phase != GamePhase::Playing {
        return None;
    }
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    state.time_ticks += 1;

    state.paddle.update(dt, state.config.field.width);
    if let Some(id) = state.paddle.stuck_ball {
        let x = state.paddle.pos.x;
        if let Some(ball) = state.ball_mut(id) {
            ball.pos.x = x;
        }
    }

    if let ControlFlow::Break(outcome) = update_balls(state, dt) {
        return outcome;
    }

    if state.balls.is_empty() {
        log::error!(
            "No balls left after removals (tick {}), recovering with a life loss",
            state.time_ticks
        );
        state.spawn_ball_attached();
        return lose_life(state);
    }

    update_collectibles(state, dt);

    if let ControlFlow::Break(outcome) = update_hazards(state, dt) {
        return outcome;
    }

    for kind in state.effects.advance(dt) {
        kind.revert(state);
        log::debug!("Effect expired: {}", kind.name());
    }

    if state.is_level_complete() {
        return Some(complete_level(state));
    }
    None
}

/// Points for destroying a brick: truncated `points * level * multiplier`
pub fn brick_score(points: u32, level: u32, multiplier: f32) -> u32 {
    (points as f32 * level as f32 * multiplier) as u32
}

fn update_balls(state: &mut GameState, dt: f32) -> ControlFlow<Option<LevelOutcome>> {
    let height = state.config.field.height;
    let mut lost: Vec<BallId> = Vec::new();

    for i in 0..state.balls.len() {
        if state.balls[i].update(dt, &state.config.field) {
            state.emit(GameEvent::WallHit);
        }

        if !state.balls[i].is_launched() {
            let (x, rest_y) = (state.paddle.pos.x, state.config.ball_rest_y());
            state.balls[i].follow_paddle(x, rest_y);
        }
        if state.balls[i].is_free() {
            check_paddle_collision(state, i);
            check_brick_collisions(state, i);
        }
        // Held and resting balls still block falling bricks
        check_hazard_collisions(state, i);

        if !state.balls[i].is_free() || !state.balls[i].is_below(height) {
            continue;
        }
        let (id, is_clone) = (state.balls[i].id, state.balls[i].is_clone);
        if state.shield && !is_clone {
            let ball = &mut state.balls[i];
            ball.pos.y = height - state.config.rules.shield_rescue_offset;
            ball.vel.y = -ball.vel.y.abs();
            state.shield = false;
            state.effects.remove(EffectKind::Shield);
            log::debug!("Shield saved ball {id}");
        } else if state.balls.len() - lost.len() > 1 {
            lost.push(id);
        } else {
            return ControlFlow::Break(lose_life(state));
        }
    }

    for id in lost {
        state.remove_ball(id);
    }
    ControlFlow::Continue(())
}

fn check_paddle_collision(state: &mut GameState, i: usize) {
    if !state.paddle.collides_with(&state.balls[i]) {
        return;
    }
    let id = state.balls[i].id;
    if state.paddle.stick_ball(id) {
        let top = state.paddle.top();
        let x = state.paddle.pos.x;
        let ball = &mut state.balls[i];
        ball.stick(top);
        ball.pos.x = x;
    } else {
        state.balls[i].bounce_off_paddle(&state.paddle, &state.config.ball);
    }
    state.emit(GameEvent::PaddleHit);
}

/// Resolve against the first intersecting brick only
fn check_brick_collisions(state: &mut GameState, i: usize) {
    let circle = state.balls[i].circle();
    let Some(idx) = state
        .bricks
        .iter()
        .position(|b| b.active && circle_intersects_rect(&circle, &b.rect))
    else {
        return;
    };

    if classify_impact_side(&circle, &state.bricks[idx].rect).is_horizontal() {
        state.balls[i].reverse_x();
    } else {
        state.balls[i].reverse_y();
    }

    let points = state.bricks[idx].hit();
    if points == 0 {
        state.emit(GameEvent::BrickHit);
        return;
    }

    state.score += brick_score(points, state.level, state.score_multiplier);
    state.emit(GameEvent::BrickDestroyed);

    let brick = &state.bricks[idx];
    let (center, power_up, penalty) = (
        brick.rect.center(),
        brick.drops_power_up(),
        brick.drops_penalty(),
    );
    if power_up {
        let id = state.next_entity_id();
        let power_up = PowerUp::spawn(&mut state.rng, id, center, &state.config.collectibles);
        log::debug!("Dropped power-up {:?}", power_up.kind);
        state.power_ups.push(power_up);
    } else if penalty {
        let id = state.next_entity_id();
        let penalty = Penalty::spawn(&mut state.rng, id, center, &state.config.collectibles);
        log::debug!("Dropped penalty {:?}", penalty.kind);
        state.penalties.push(penalty);
    }
}

fn check_hazard_collisions(state: &mut GameState, i: usize) {
    for h in 0..state.hazards.len() {
        if !state.hazards[h].collides_with_ball(&state.balls[i]) {
            continue;
        }
        if state.hazards[h].hit() {
            state.score += state.config.rules.hazard_bonus;
            state.emit(GameEvent::BrickDestroyed);
        }
        state.balls[i].reverse_y();
    }
}

fn update_collectibles(state: &mut GameState, dt: f32) {
    let height = state.config.field.height;

    let mut collected = Vec::new();
    for power_up in &mut state.power_ups {
        power_up.update(dt, height);
        if power_up.collides_with(&state.paddle) {
            power_up.collect();
            collected.push(power_up.kind);
        }
    }
    state.power_ups.retain(|p| p.active);
    for kind in collected {
        log::debug!("Collected power-up {kind:?}");
        apply_power_up(state, kind);
        state.emit(GameEvent::PowerUpCollected(kind));
    }

    let mut collected = Vec::new();
    for penalty in &mut state.penalties {
        penalty.update(dt, height);
        if penalty.collides_with(&state.paddle) {
            penalty.collect();
            collected.push(penalty.kind);
        }
    }
    state.penalties.retain(|p| p.active);
    for kind in collected {
        log::debug!("Collected penalty {kind:?}");
        apply_penalty(state, kind);
        state.emit(GameEvent::PenaltyCollected(kind));
    }
}

fn update_hazards(state: &mut GameState, dt: f32) -> ControlFlow<Option<LevelOutcome>> {
    let height = state.config.field.height;
    for hazard in &mut state.hazards {
        hazard.update(dt, height);
    }

    let crushed = state
        .hazards
        .iter()
        .position(|h| h.collides_with_paddle(&state.paddle));
    if let Some(h) = crushed {
        state.hazards[h].destroy();
        log::info!("Falling brick hit the paddle");
        return ControlFlow::Break(lose_life(state));
    }

    state.hazards.retain(|h| h.active);
    ControlFlow::Continue(())
}

/// Take a life. Resets the field (bricks kept) unless it was the last one.
pub(crate) fn lose_life(state: &mut GameState) -> Option<LevelOutcome> {
    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::GameOver {
            level: state.level,
            score: state.score,
        });
        log::info!("Game over on level {} with score {}", state.level, state.score);
        return Some(LevelOutcome::Failed {
            level: state.level,
            score: state.score,
        });
    }

    state.emit(GameEvent::LifeLost);
    state.reset_entities();
    log::info!("Life lost, {} remaining", state.lives);
    None
}

fn complete_level(state: &mut GameState) -> LevelOutcome {
    let (level, score) = (state.level, state.score);
    if state.is_final_level() {
        state.phase = GamePhase::Victory;
        state.emit(GameEvent::Victory { score });
        log::info!("Victory! Final level {level} cleared with score {score}");
    } else {
        state.phase = GamePhase::LevelComplete;
        state.emit(GameEvent::LevelComplete { level, score });
        log::info!("Level {level} complete with score {score}");
    }
    LevelOutcome::Cleared { level, score }
}

/// Lay out the brick grid for `state.level`
pub fn generate_level(state: &mut GameState) {
    state.bricks.clear();

    let level = state.level.max(1);
    let cfg = state.config.bricks.clone();
    let power_up_chance = state.config.collectibles.power_up_drop_chance;
    let penalty_chance = state.config.collectibles.penalty_drop_chance;
    let rows = (cfg.base_rows + level - 1).min(cfg.max_rows);
    let size = Vec2::new(cfg.width, cfg.height);

    for row in 0..rows {
        for col in 0..cfg.cols {
            let pos = Vec2::new(
                cfg.offset_left + col as f32 * (cfg.width + cfg.padding),
                cfg.offset_top + row as f32 * (cfg.height + cfg.padding),
            );
            let roll = state.rng.random::<f32>();
            let kind = determine_brick_kind(row, level, roll);
            let id = state.next_entity_id();
            let mut brick = Brick::new(id, kind, Rect::from_top_left(pos, size));

            if matches!(kind, BrickKind::Normal | BrickKind::Hard) {
                if state.rng.random::<f32>() < power_up_chance {
                    brick.has_power_up = true;
                } else if state.rng.random::<f32>() < penalty_chance {
                    brick.has_penalty = true;
                }
            }
            state.bricks.push(brick);
        }
    }
}

/// Brick kind for a grid cell. First matching rule wins; `roll` is shared by
/// every random rule.
pub fn determine_brick_kind(row: u32, level: u32, roll: f32) -> BrickKind {
    if row == 0 && level >= 4 && roll < 0.2 {
        return BrickKind::Gold;
    }
    if row == 0 && level >= 3 {
        return BrickKind::Tough;
    }
    if row <= 1 && level >= 2 {
        return BrickKind::Hard;
    }
    if roll < 0.05 && level >= 2 {
        return BrickKind::Power;
    }
    // Unreachable: the power rule already takes every roll below 0.05
    if roll < 0.03 && level >= 3 {
        return BrickKind::Penalty;
    }
    if row == 0 {
        return BrickKind::Hard;
    }
    BrickKind::Normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::pickup::{PenaltyKind, PowerUpKind};
    use crate::sim::state::BallState;

    fn playing(level: u32) -> GameState {
        let mut state = GameState::new(GameConfig::default(), 12345);
        state.begin_level(level);
        state.phase = GamePhase::Playing;
        state
    }

    /// Playing state with a single brick far from the action
    fn sparse(level: u32) -> GameState {
        let mut state = playing(level);
        state.bricks.truncate(1);
        state.bricks[0].rect = Rect::from_top_left(Vec2::new(0.0, 0.0), Vec2::new(20.0, 10.0));
        state.bricks[0].kind = BrickKind::Tough;
        state.bricks[0].hit_points = 3;
        state
    }

    fn free_ball_at(state: &mut GameState, pos: Vec2, vel: Vec2) {
        let ball = &mut state.balls[0];
        ball.state = BallState::Free;
        ball.pos = pos;
        ball.vel = vel;
    }

    #[test]
    fn test_grid_rows_grow_with_level() {
        assert_eq!(playing(1).bricks.len(), 50);
        assert_eq!(playing(3).bricks.len(), 70);
        assert_eq!(playing(5).bricks.len(), 80);
    }

    #[test]
    fn test_level_one_layout() {
        let state = playing(1);
        for brick in &state.bricks {
            let row = ((brick.rect.min.y - 50.0) / 30.0).round() as u32;
            let expected = if row == 0 { BrickKind::Hard } else { BrickKind::Normal };
            assert_eq!(brick.kind, expected);
            assert!(!(brick.has_power_up && brick.has_penalty));
        }
        assert_eq!(state.bricks[0].rect.min, Vec2::new(35.0, 50.0));
        assert_eq!(state.bricks[1].rect.min, Vec2::new(110.0, 50.0));
        assert!(state.bricks.iter().all(|b| b.kind != BrickKind::Unbreakable));
    }

    #[test]
    fn test_brick_kind_precedence() {
        assert_eq!(determine_brick_kind(0, 4, 0.1), BrickKind::Gold);
        assert_eq!(determine_brick_kind(0, 4, 0.5), BrickKind::Tough);
        assert_eq!(determine_brick_kind(0, 3, 0.1), BrickKind::Tough);
        assert_eq!(determine_brick_kind(1, 3, 0.01), BrickKind::Hard);
        assert_eq!(determine_brick_kind(0, 2, 0.5), BrickKind::Hard);
        assert_eq!(determine_brick_kind(3, 2, 0.04), BrickKind::Power);
        assert_eq!(determine_brick_kind(3, 3, 0.02), BrickKind::Power);
        assert_eq!(determine_brick_kind(3, 3, 0.5), BrickKind::Normal);
        assert_eq!(determine_brick_kind(0, 1, 0.01), BrickKind::Hard);
        assert_eq!(determine_brick_kind(2, 1, 0.01), BrickKind::Normal);
    }

    #[test]
    fn test_scoring_formula() {
        assert_eq!(brick_score(10, 3, 2.0), 60);
        assert_eq!(brick_score(25, 1, 1.0), 25);
        assert_eq!(brick_score(5, 3, 1.5), 22);
    }

    #[test]
    fn test_brick_destroyed_scores_with_multiplier() {
        let mut state = sparse(3);
        state.bricks[0].kind = BrickKind::Normal;
        state.bricks[0].hit_points = 1;
        state.bricks[0].has_power_up = false;
        state.bricks[0].has_penalty = false;
        state.score_multiplier = 2.0;
        free_ball_at(&mut state, Vec2::new(10.0, 18.0), Vec2::new(0.0, -120.0));

        let outcome = tick(&mut state, 1.0 / 60.0);
        assert_eq!(state.score, 60);
        assert!(state.events.contains(&GameEvent::BrickDestroyed));
        assert!(state.balls[0].vel.y > 0.0);
        assert_eq!(outcome, Some(LevelOutcome::Cleared { level: 3, score: 60 }));
        assert_eq!(state.phase, GamePhase::LevelComplete);
    }

    #[test]
    fn test_only_first_brick_is_hit() {
        let mut state = playing(1);
        state.bricks.truncate(2);
        let size = Vec2::new(20.0, 10.0);
        let left = Rect::from_top_left(Vec2::new(100.0, 100.0), size);
        let right = Rect::from_top_left(Vec2::new(120.0, 100.0), size);
        state.bricks[0] = Brick::new(900, BrickKind::Tough, left);
        state.bricks[1] = Brick::new(901, BrickKind::Tough, right);
        free_ball_at(&mut state, Vec2::new(120.0, 118.0), Vec2::new(0.0, -120.0));

        tick(&mut state, 1.0 / 60.0);
        assert_eq!(state.bricks[0].hit_points, 2);
        assert_eq!(state.bricks[1].hit_points, 3);
        assert_eq!(state.events.iter().filter(|e| **e == GameEvent::BrickHit).count(), 1);
    }

    #[test]
    fn test_level_clears_with_only_unbreakable() {
        let mut state = playing(2);
        for brick in &mut state.bricks {
            brick.kind = BrickKind::Unbreakable;
        }
        let outcome = tick(&mut state, 1.0 / 60.0);
        assert!(matches!(outcome, Some(LevelOutcome::Cleared { level: 2, .. })));
        assert_eq!(state.phase, GamePhase::LevelComplete);
    }

    #[test]
    fn test_final_level_is_victory() {
        let mut state = playing(5);
        state.bricks.clear();
        tick(&mut state, 1.0 / 60.0);
        assert_eq!(state.phase, GamePhase::Victory);
        assert!(matches!(state.events.last(), Some(GameEvent::Victory { .. })));
    }

    #[test]
    fn test_sole_ball_loss_costs_life() {
        let mut state = sparse(1);
        free_ball_at(&mut state, Vec2::new(400.0, 620.0), Vec2::new(0.0, 300.0));
        let outcome = tick(&mut state, 1.0 / 60.0);
        assert_eq!(outcome, None);
        assert_eq!(state.lives, 2);
        assert!(state.events.contains(&GameEvent::LifeLost));
        assert_eq!(state.balls.len(), 1);
        assert!(!state.balls[0].is_launched());
        // Bricks survive a life loss
        assert_eq!(state.bricks.len(), 1);
    }

    #[test]
    fn test_last_life_is_game_over() {
        let mut state = sparse(2);
        state.lives = 1;
        state.score = 40;
        free_ball_at(&mut state, Vec2::new(400.0, 620.0), Vec2::new(0.0, 300.0));
        let outcome = tick(&mut state, 1.0 / 60.0);
        assert_eq!(outcome, Some(LevelOutcome::Failed { level: 2, score: 40 }));
        assert_eq!(state.phase, GamePhase::GameOver);
        // Nothing moves once the game is over
        assert_eq!(tick(&mut state, 1.0 / 60.0), None);
    }

    #[test]
    fn test_extra_ball_removed_without_life_loss() {
        let mut state = sparse(1);
        free_ball_at(&mut state, Vec2::new(400.0, 300.0), Vec2::new(0.0, -300.0));
        let mut clone = state.balls[0].spawn_clone(500, &mut state.rng);
        clone.pos = Vec2::new(400.0, 620.0);
        clone.vel = Vec2::new(0.0, 300.0);
        state.balls.push(clone);

        tick(&mut state, 1.0 / 60.0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.balls.len(), 1);
        assert!(!state.balls[0].is_clone);
    }

    #[test]
    fn test_shield_saves_exactly_once() {
        let mut state = sparse(1);
        crate::sim::effects::apply_power_up(&mut state, PowerUpKind::Shield);
        free_ball_at(&mut state, Vec2::new(400.0, 620.0), Vec2::new(0.0, 300.0));

        tick(&mut state, 1.0 / 60.0);
        assert_eq!(state.lives, 3);
        assert!(!state.shield);
        assert!(!state.effects.is_active(EffectKind::Shield));
        assert_eq!(state.balls[0].pos.y, 500.0);
        assert!(state.balls[0].vel.y < 0.0);

        free_ball_at(&mut state, Vec2::new(400.0, 620.0), Vec2::new(0.0, 300.0));
        tick(&mut state, 1.0 / 60.0);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_sticky_paddle_catches_and_tracks() {
        let mut state = sparse(1);
        crate::sim::effects::apply_power_up(&mut state, PowerUpKind::StickyPaddle);
        let top = state.paddle.top();
        let x = state.paddle.pos.x;
        free_ball_at(&mut state, Vec2::new(x + 20.0, top - 8.0), Vec2::new(0.0, 240.0));

        tick(&mut state, 1.0 / 60.0);
        let id = state.balls[0].id;
        assert_eq!(state.paddle.stuck_ball, Some(id));
        assert!(state.balls[0].is_stuck());
        assert!(state.events.contains(&GameEvent::PaddleHit));

        state.paddle.move_right();
        for _ in 0..10 {
            tick(&mut state, 1.0 / 60.0);
        }
        assert_eq!(state.balls[0].pos.x, state.paddle.pos.x);
        assert!(state.balls[0].is_stuck());
    }

    #[test]
    fn test_paddle_bounce_sends_ball_up() {
        let mut state = sparse(1);
        let top = state.paddle.top();
        let x = state.paddle.pos.x;
        free_ball_at(&mut state, Vec2::new(x, top - 8.0), Vec2::new(0.0, 240.0));
        tick(&mut state, 1.0 / 60.0);
        assert!(state.balls[0].vel.y < 0.0);
        assert_eq!(state.events, vec![GameEvent::PaddleHit]);
    }

    #[test]
    fn test_collecting_penalty_applies_it() {
        let mut state = sparse(1);
        let pos = state.paddle.pos;
        state
            .penalties
            .push(Penalty::new(77, PenaltyKind::ShrinkPaddle, pos, 25.0, 144.0));
        tick(&mut state, 1.0 / 60.0);
        assert!(state.penalties.is_empty());
        assert_eq!(state.paddle.width, 60.0);
        assert!(state.events.contains(&GameEvent::PenaltyCollected(PenaltyKind::ShrinkPaddle)));
    }

    #[test]
    fn test_hazard_on_paddle_costs_life() {
        let mut state = sparse(1);
        crate::sim::effects::apply_power_up(&mut state, PowerUpKind::Shield);
        crate::sim::effects::apply_penalty(&mut state, PenaltyKind::FallingBrick);
        let paddle_pos = state.paddle.pos;
        state.hazards[0].pos = paddle_pos;
        tick(&mut state, 1.0 / 60.0);
        // Shield does not help against falling bricks
        assert_eq!(state.lives, 2);
        assert!(state.hazards.is_empty());
        assert!(!state.shield);
    }

    #[test]
    fn test_ball_shoots_down_hazard() {
        let mut state = sparse(1);
        crate::sim::effects::apply_penalty(&mut state, PenaltyKind::FallingBrick);
        state.hazards[0].pos = Vec2::new(400.0, 200.0);
        state.hazards[0].fall_speed = 0.0;
        state.hazards[0].acceleration = 0.0;
        free_ball_at(&mut state, Vec2::new(400.0, 222.0), Vec2::new(0.0, -120.0));
        tick(&mut state, 1.0 / 60.0);
        assert_eq!(state.score, 25);
        assert!(state.hazards.is_empty());
        assert!(state.balls[0].vel.y > 0.0);
    }

    #[test]
    fn test_held_ball_shoots_down_hazard() {
        let mut state = sparse(1);
        crate::sim::effects::apply_power_up(&mut state, PowerUpKind::StickyPaddle);
        let top = state.paddle.top();
        let x = state.paddle.pos.x;
        free_ball_at(&mut state, Vec2::new(x, top - 20.0), Vec2::new(0.0, 240.0));
        let id = state.balls[0].id;
        state.balls[0].stick(top);
        assert!(state.paddle.stick_ball(id));

        crate::sim::effects::apply_penalty(&mut state, PenaltyKind::FallingBrick);
        let above_ball = state.balls[0].pos - Vec2::new(0.0, 20.0);
        let hazard = &mut state.hazards[0];
        hazard.pos = above_ball;
        hazard.fall_speed = 0.0;
        hazard.acceleration = 0.0;

        tick(&mut state, 1.0 / 60.0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 25);
        assert!(state.hazards.is_empty());
        assert!(state.balls[0].is_stuck());
        assert_eq!(state.paddle.stuck_ball, Some(id));
    }

    #[test]
    fn test_effect_expiry_during_tick() {
        let mut state = sparse(1);
        crate::sim::effects::apply_penalty(&mut state, PenaltyKind::ReverseControls);
        for _ in 0..(6 * 60 + 5) {
            tick(&mut state, 1.0 / 60.0);
        }
        assert!(!state.paddle.reversed);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_empty_ball_list_recovers() {
        let mut state = sparse(1);
        state.balls.clear();
        let outcome = tick(&mut state, 1.0 / 60.0);
        assert_eq!(outcome, None);
        assert_eq!(state.lives, 2);
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = sparse(1);
        free_ball_at(&mut state, Vec2::new(400.0, 300.0), Vec2::new(0.0, -300.0));
        tick(&mut state, 5.0);
        assert!((state.balls[0].pos.y - 270.0).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = GameState::new(GameConfig::default(), 99999);
            state.begin_level(2);
            state.phase = GamePhase::Playing;
            let cfg = state.config.ball.clone();
            state.balls[0].launch(&mut state.rng, &cfg);
            for _ in 0..600 {
                tick(&mut state, 1.0 / 60.0);
            }
            (state.score, state.lives, state.balls[0].pos)
        };
        assert_eq!(run(), run());
    }
}
