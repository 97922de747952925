//! Brick Breaker headless runner
//!
//! Plays a full run with a simple autopilot at a fixed simulation rate and
//! logs what happens. Usage: `brick-breaker [config.json]`

use anyhow::{Context, Result};

use brick_breaker::audio::{AudioBackend, AudioError, AudioManager, MusicTrack, SoundEffect};
use brick_breaker::consts::*;
use brick_breaker::persistence::JsonFileStore;
use brick_breaker::sim::{Ball, BallState};
use brick_breaker::{Game, GameConfig, GameEvent, GamePhase, Settings};

/// Simulated wall-clock frame length, deliberately off the tick rate
const FRAME_DT: f32 = 1.0 / 45.0;
/// Give up on a level after this many frames (ten simulated minutes)
const MAX_FRAMES_PER_LEVEL: u32 = 45 * 60 * 10;

/// Prints what a real backend would play
struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_sfx(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::trace!("sfx {} @ {volume:.2}", effect.file_name());
        Ok(())
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32) -> Result<(), AudioError> {
        log::debug!("music {} @ {volume:.2}", track.file_name());
        Ok(())
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }

    fn pause_music(&mut self) {
        log::debug!("music paused");
    }

    fn resume_music(&mut self) {
        log::debug!("music resumed");
    }
}

/// Fixed-timestep driver
struct Runner {
    game: Game,
    audio: AudioManager,
    accumulator: f32,
}

impl Runner {
    /// Run simulation ticks for one frame of `dt` seconds
    fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.steer();
            self.game.tick(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            if self.game.phase() != GamePhase::Playing {
                self.accumulator = 0.0;
                break;
            }
        }

        let events = self.game.drain_events();
        self.audio.handle_events(&events);
        for event in &events {
            match event {
                GameEvent::LifeLost => {
                    log::info!("Life lost, {} left", self.game.state().lives)
                }
                GameEvent::PowerUpCollected(kind) => log::debug!("Power-up: {:?}", kind),
                GameEvent::PenaltyCollected(kind) => log::debug!("Penalty: {:?}", kind),
                GameEvent::LevelComplete { level, score } => {
                    log::info!("Level {level} cleared with {score} points")
                }
                _ => {}
            }
        }
        self.audio.sync(self.game.state());
    }

    /// Chase the lowest falling ball and launch whenever one is waiting
    fn steer(&mut self) {
        let state = self.game.state();
        let waiting = state.paddle.has_ball_stuck()
            || state.balls.iter().any(|b| b.state == BallState::Attached);
        let target = state
            .balls
            .iter()
            .filter(|b| b.is_free())
            .max_by(|a, b| {
                let key = |ball: &Ball| (ball.vel.y > 0.0, ball.pos.y);
                key(a).partial_cmp(&key(b)).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|b| b.pos.x);
        let paddle_x = state.paddle.pos.x;
        // Intents are swapped by the game while controls are reversed
        let reversed = state.paddle.reversed;
        let deadband = state.paddle.width / 6.0;

        if waiting {
            self.game.launch();
        }
        match target {
            Some(x) if x < paddle_x - deadband => {
                if reversed {
                    self.game.move_right()
                } else {
                    self.game.move_left()
                }
            }
            Some(x) if x > paddle_x + deadband => {
                if reversed {
                    self.game.move_left()
                } else {
                    self.game.move_right()
                }
            }
            _ => self.game.stop_move(),
        }
    }
}

fn load_config() -> Result<GameConfig> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(&path)
            .with_context(|| format!("loading config {path}"))?,
        None => GameConfig::default(),
    };
    for warning in config.validate() {
        log::warn!("Config: {warning}");
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    let config = load_config()?;
    let dir = std::env::temp_dir();
    let store = JsonFileStore::open(dir.join("brick_breaker_scores.json"))
        .context("opening score file")?;
    let settings = Settings::load(dir.join("brick_breaker_settings.json"));

    let seed: u64 = rand::random();
    log::info!("Game initialized with seed: {}", seed);

    let mut runner = Runner {
        game: Game::new(config, seed, Box::new(store)),
        audio: AudioManager::new(Box::new(LogBackend), settings),
        accumulator: 0.0,
    };

    for c in "Autopilot".chars() {
        runner.game.add_name_char(c);
    }
    runner.game.confirm_name();
    runner.game.start_level(1);

    let mut frames = 0;
    loop {
        runner.update(FRAME_DT);
        frames += 1;

        match runner.game.phase() {
            GamePhase::LevelComplete => {
                runner.game.continue_to_next_level();
                frames = 0;
            }
            GamePhase::GameOver | GamePhase::Victory => break,
            _ if frames >= MAX_FRAMES_PER_LEVEL => {
                log::warn!("Level {} timed out, giving up", runner.game.state().level);
                runner.game.return_to_menu();
                break;
            }
            _ => {}
        }
    }

    let profile = runner.game.profile();
    log::info!(
        "Run over ({:?}): {} level(s) completed, total score {}",
        runner.game.phase(),
        profile.levels_completed(),
        profile.total_score()
    );
    for (rank, entry) in runner.game.leaderboard().top().iter().take(5).enumerate() {
        log::info!(
            "#{} {} - {} pts, {} stars",
            rank + 1,
            entry.name,
            entry.total_score,
            entry.total_stars
        );
    }
    Ok(())
}
