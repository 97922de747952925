//! Audio routing
//!
//! Turns game events and phase changes into sound effect and music requests
//! for a pluggable [`AudioBackend`]. Playback failures are logged and never
//! reach the game.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("missing audio asset {0}")]
    MissingAsset(&'static str),
    #[error("audio device unavailable: {0}")]
    Device(String),
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    BallHitPaddle,
    /// Brick damaged, not destroyed
    BallHitBrick,
    BallHitWall,
    BrickDestroy,
    PowerUpCollect,
    PenaltyCollect,
    LevelComplete,
    GameOver,
    Victory,
    MenuSelect,
    MenuConfirm,
    LifeLost,
    BallLaunch,
}

impl SoundEffect {
    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::BallHitPaddle => "ball_paddle.wav",
            SoundEffect::BallHitBrick => "ball_brick.wav",
            SoundEffect::BallHitWall => "ball_wall.wav",
            SoundEffect::BrickDestroy => "brick_destroy.wav",
            SoundEffect::PowerUpCollect => "powerup.wav",
            SoundEffect::PenaltyCollect => "penalty.wav",
            SoundEffect::LevelComplete => "level_complete.wav",
            SoundEffect::GameOver => "game_over.wav",
            SoundEffect::Victory => "victory.wav",
            SoundEffect::MenuSelect => "menu_select.wav",
            SoundEffect::MenuConfirm => "menu_confirm.wav",
            SoundEffect::LifeLost => "life_lost.wav",
            SoundEffect::BallLaunch => "ball_launch.wav",
        }
    }

    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::WallHit => SoundEffect::BallHitWall,
            GameEvent::PaddleHit => SoundEffect::BallHitPaddle,
            GameEvent::BrickHit => SoundEffect::BallHitBrick,
            GameEvent::BrickDestroyed => SoundEffect::BrickDestroy,
            GameEvent::PowerUpCollected(_) => SoundEffect::PowerUpCollect,
            GameEvent::PenaltyCollected(_) => SoundEffect::PenaltyCollect,
            GameEvent::BallLaunched => SoundEffect::BallLaunch,
            GameEvent::LifeLost => SoundEffect::LifeLost,
            GameEvent::LevelComplete { .. } => SoundEffect::LevelComplete,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
            GameEvent::Victory { .. } => SoundEffect::Victory,
            GameEvent::MenuSelect => SoundEffect::MenuSelect,
            GameEvent::MenuConfirm => SoundEffect::MenuConfirm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    Victory,
    GameOver,
}

impl MusicTrack {
    /// Level theme; levels past the last theme reuse it
    pub fn for_level(level: u32) -> Self {
        match level {
            0 | 1 => MusicTrack::Level1,
            2 => MusicTrack::Level2,
            3 => MusicTrack::Level3,
            4 => MusicTrack::Level4,
            _ => MusicTrack::Level5,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            MusicTrack::Menu => "menu_music.mp3",
            MusicTrack::Level1 => "level1_music.mp3",
            MusicTrack::Level2 => "level2_music.mp3",
            MusicTrack::Level3 => "level3_music.mp3",
            MusicTrack::Level4 => "level4_music.mp3",
            MusicTrack::Level5 => "level5_music.mp3",
            MusicTrack::Victory => "victory_music.mp3",
            MusicTrack::GameOver => "gameover_music.mp3",
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play_sfx(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
    /// Replace the current track, looping
    fn play_music(&mut self, track: MusicTrack, volume: f32) -> Result<(), AudioError>;
    fn stop_music(&mut self);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play_sfx(&mut self, _: SoundEffect, _: f32) -> Result<(), AudioError> {
        Ok(())
    }
    fn play_music(&mut self, _: MusicTrack, _: f32) -> Result<(), AudioError> {
        Ok(())
    }
    fn stop_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    settings: Settings,
    current_track: Option<MusicTrack>,
    last_phase: Option<GamePhase>,
    last_attempt: u32,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, settings: Settings) -> Self {
        Self {
            backend,
            settings,
            current_track: None,
            last_phase: None,
            last_attempt: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap preferences; music stops if it is now silent
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        if self.settings.effective_music_volume() <= 0.0 {
            self.stop_music();
        }
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current_track
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.settings.effective_sfx_volume();
        if volume <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play_sfx(effect, volume) {
            log::warn!("Could not play {}: {e}", effect.file_name());
        }
    }

    pub fn handle_event(&mut self, event: &GameEvent) {
        self.play(SoundEffect::for_event(event));
    }

    pub fn handle_events<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    /// Start `track` unless it is already playing
    pub fn play_music(&mut self, track: MusicTrack) {
        if self.current_track == Some(track) {
            return;
        }
        let volume = self.settings.effective_music_volume();
        if volume <= 0.0 {
            log::debug!("Music disabled, not starting {:?}", track);
            return;
        }
        match self.backend.play_music(track, volume) {
            Ok(()) => self.current_track = Some(track),
            Err(e) => {
                log::warn!("Could not play {}: {e}", track.file_name());
                self.current_track = None;
            }
        }
    }

    pub fn stop_music(&mut self) {
        if self.current_track.take().is_some() {
            self.backend.stop_music();
        }
    }

    /// Follow the game with the matching music
    pub fn sync(&mut self, state: &GameState) {
        self.sync_phase(state.phase, state.level, state.attempt);
    }

    /// Cheap to call every frame; only phase changes and new level attempts
    /// do anything.
    pub fn sync_phase(&mut self, phase: GamePhase, level: u32, attempt: u32) {
        let restarted = std::mem::replace(&mut self.last_attempt, attempt) != attempt;
        let previous = self.last_phase.replace(phase);
        if previous == Some(phase) && !(restarted && phase == GamePhase::Playing) {
            return;
        }
        match phase {
            GamePhase::NameInput | GamePhase::Menu | GamePhase::Leaderboard => {
                self.play_music(MusicTrack::Menu)
            }
            GamePhase::Playing if previous == Some(GamePhase::Paused) && !restarted => {
                if self.current_track.is_some() {
                    self.backend.resume_music();
                }
            }
            GamePhase::Playing => {
                // Every attempt starts its theme from the top
                self.stop_music();
                self.play_music(MusicTrack::for_level(level));
            }
            GamePhase::Paused => {
                if self.current_track.is_some() {
                    self.backend.pause_music();
                }
            }
            GamePhase::LevelComplete => self.stop_music(),
            GamePhase::GameOver => {
                self.stop_music();
                self.play_music(MusicTrack::GameOver);
            }
            GamePhase::Victory => {
                self.stop_music();
                self.play_music(MusicTrack::Victory);
            }
        }
    }
}
