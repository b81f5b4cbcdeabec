//! Sound cue dispatch
//!
//! The simulation reports `GameEvent`s; the frontend maps them to the small
//! `SoundEffect` alphabet here. Playback is fire-and-forget: the terminal
//! backend rings the bell for the heavy hits and stays quiet otherwise, but
//! every cue is still dispatched so a richer backend only needs to swap the
//! `emit` body.

use std::io::Write;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet leaves the ship
    Laser,
    /// Enemy destroyed
    Explosion,
    /// Power-up collected
    Pickup,
    /// Level cleared
    LevelUp,
    /// Run ended
    GameOver,
}

/// Audio manager for the game
pub struct AudioManager {
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            muted: false,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Start the looping background track. Fire-and-forget.
    pub fn start_music(&self) {
        if self.muted || self.music_volume <= 0.0 {
            return;
        }
        log::debug!("music loop started");
    }

    /// Play a one-shot sound effect. Fire-and-forget.
    pub fn play(&self, effect: SoundEffect) {
        if self.muted || self.sfx_volume <= 0.0 {
            return;
        }
        log::trace!("sfx {effect:?}");
        self.emit(effect);
    }

    /// Translate a batch of simulation events into sound cues.
    pub fn play_events(&self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ShotFired => self.play(SoundEffect::Laser),
                GameEvent::EnemyDestroyed { .. } => self.play(SoundEffect::Explosion),
                GameEvent::PowerUpCollected(_) => self.play(SoundEffect::Pickup),
                GameEvent::LevelUp(_) => self.play(SoundEffect::LevelUp),
                GameEvent::GameOver => self.play(SoundEffect::GameOver),
                GameEvent::EnemyBreached | GameEvent::PlayerHit => {
                    self.play(SoundEffect::Explosion)
                }
            }
        }
    }

    fn emit(&self, effect: SoundEffect) {
        // The lasers fire several times a second; only the big hits get the
        // terminal bell
        if matches!(effect, SoundEffect::Explosion | SoundEffect::GameOver) {
            let mut out = std::io::stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}
