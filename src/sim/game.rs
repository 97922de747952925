//! Player-facing game: intents, phase transitions and progress recording
//!
//! Every intent is guarded by the current phase. Calls that make no sense
//! in the current phase are ignored.

use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{self, LevelOutcome};
use crate::config::GameConfig;
use crate::highscores::Leaderboard;
use crate::persistence::ScoreStore;
use crate::profile::PlayerProfile;

/// Shown when the player confirms an empty name
pub const DEFAULT_PLAYER_NAME: &str = "Player";

#[derive(Debug)]
pub struct Game {
    state: GameState,
    profile: PlayerProfile,
    name_input: String,
    selected_level: u32,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64, store: Box<dyn ScoreStore>) -> Self {
        let profile = PlayerProfile::new(config.rules.total_levels, store);
        Self {
            state: GameState::new(config, seed),
            profile,
            name_input: String::new(),
            selected_level: 1,
        }
    }

    /// Read-only snapshot for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tools and tests that need to stage a scene
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn selected_level(&self) -> u32 {
        self.selected_level
    }

    pub fn can_play_selected_level(&self) -> bool {
        self.profile.is_level_unlocked(self.selected_level)
    }

    pub fn leaderboard(&self) -> Leaderboard {
        self.profile.leaderboard()
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Advance one frame. Only does work while playing.
    pub fn tick(&mut self, dt: f32) {
        if let Some(outcome) = tick::tick(&mut self.state, dt) {
            self.record_outcome(outcome);
        }
    }

    fn record_outcome(&mut self, outcome: LevelOutcome) {
        self.profile.record_score(outcome.level(), outcome.score());
        if let LevelOutcome::Cleared { level, .. } = outcome {
            if level < self.state.config.rules.total_levels {
                self.profile.unlock_level(level + 1);
            }
        }
    }

    // ----- Name entry -----

    pub fn add_name_char(&mut self, c: char) {
        if self.state.phase != GamePhase::NameInput {
            return;
        }
        let allowed = c.is_ascii_alphanumeric() || c == ' ' || c == '_';
        if allowed && self.name_input.chars().count() < self.state.config.rules.max_name_length {
            self.name_input.push(c);
        }
    }

    pub fn remove_name_char(&mut self) {
        if self.state.phase == GamePhase::NameInput {
            self.name_input.pop();
        }
    }

    pub fn confirm_name(&mut self) {
        if self.state.phase != GamePhase::NameInput {
            return;
        }
        let name = match self.name_input.trim() {
            "" => DEFAULT_PLAYER_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        self.profile.set_player_name(&name);
        self.name_input = name;
        self.selected_level = 1;
        self.state.phase = GamePhase::Menu;
        self.state.emit(GameEvent::MenuConfirm);
    }

    // ----- Menu -----

    pub fn select_next_level(&mut self) {
        if self.state.phase == GamePhase::Menu
            && self.selected_level < self.state.config.rules.total_levels
        {
            self.selected_level += 1;
            self.state.emit(GameEvent::MenuSelect);
        }
    }

    pub fn select_previous_level(&mut self) {
        if self.state.phase == GamePhase::Menu && self.selected_level > 1 {
            self.selected_level -= 1;
            self.state.emit(GameEvent::MenuSelect);
        }
    }

    pub fn select_level(&mut self, level: u32) {
        if self.state.phase != GamePhase::Menu {
            return;
        }
        if (1..=self.state.config.rules.total_levels).contains(&level) {
            self.selected_level = level;
            self.state.emit(GameEvent::MenuSelect);
        } else {
            log::debug!("Ignoring selection of level {level}");
        }
    }

    pub fn start_selected_level(&mut self) {
        if self.state.phase == GamePhase::Menu && self.can_play_selected_level() {
            self.state.emit(GameEvent::MenuConfirm);
            self.start_level(self.selected_level);
        }
    }

    /// Start `level` from the menu if it exists and is unlocked
    pub fn start_level(&mut self, level: u32) {
        if self.state.phase != GamePhase::Menu {
            return;
        }
        if !(1..=self.state.config.rules.total_levels).contains(&level) {
            log::debug!("Level {level} does not exist");
            return;
        }
        if !self.profile.is_level_unlocked(level) {
            log::debug!("Level {level} is locked");
            return;
        }
        self.selected_level = level;
        self.begin(level);
    }

    fn begin(&mut self, level: u32) {
        self.state.begin_level(level);
        self.state.phase = GamePhase::Playing;
    }

    pub fn show_leaderboard(&mut self) {
        if self.state.phase == GamePhase::Menu {
            self.state.phase = GamePhase::Leaderboard;
            self.state.emit(GameEvent::MenuSelect);
        }
    }

    pub fn hide_leaderboard(&mut self) {
        if self.state.phase == GamePhase::Leaderboard {
            self.state.phase = GamePhase::Menu;
        }
    }

    // ----- Gameplay -----

    pub fn move_left(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.paddle.move_left();
        }
    }

    pub fn move_right(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.paddle.move_right();
        }
    }

    pub fn stop_move(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.paddle.stop();
        }
    }

    /// Release the ball held by a sticky paddle, else launch the first
    /// unlaunched ball
    pub fn launch(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        let GameState {
            balls,
            rng,
            config,
            paddle,
            events,
            ..
        } = &mut self.state;

        if let Some(id) = paddle.take_stuck_ball() {
            if let Some(ball) = balls.iter_mut().find(|b| b.id == id) {
                ball.release(rng, &config.ball);
                events.push(GameEvent::BallLaunched);
            }
            return;
        }

        if let Some(ball) = balls.iter_mut().find(|b| !b.is_launched()) {
            ball.launch(rng, &config.ball);
            events.push(GameEvent::BallLaunched);
        }
    }

    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.paddle.stop();
            self.state.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == GamePhase::Paused {
            self.state.phase = GamePhase::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Replay the current level from scratch
    pub fn restart_level(&mut self) {
        if matches!(
            self.state.phase,
            GamePhase::Playing | GamePhase::Paused | GamePhase::GameOver
        ) {
            let level = self.state.level;
            self.begin(level);
        }
    }

    pub fn continue_to_next_level(&mut self) {
        if self.state.phase != GamePhase::LevelComplete {
            return;
        }
        let next = self.state.level + 1;
        if next <= self.state.config.rules.total_levels {
            self.selected_level = next;
            self.begin(next);
        }
    }

    /// Leave for the level select. An abandoned level still counts towards
    /// the best score.
    pub fn return_to_menu(&mut self) {
        match self.state.phase {
            GamePhase::NameInput | GamePhase::Menu => return,
            GamePhase::Playing | GamePhase::Paused => {
                self.profile.record_score(self.state.level, self.state.score);
            }
            _ => {}
        }
        self.state.clear_level();
        self.state.phase = GamePhase::Menu;
    }
}
