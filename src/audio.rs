//! Sound cues for simulation events
//!
//! The simulation only reports what happened; this module decides which
//! cue plays and how loud. Actual playback is behind `AudioBackend`.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ship destroyed
    Death,
    /// Round start and score milestones
    LevelUp,
    /// Shield picked up
    ShieldPowerUp,
    /// Shield absorbed a hit
    LoseShield,
    /// Gem picked up
    Coin,
    /// Menu/shop click
    Select,
    /// Purchase refused
    Fail,
    /// Purchase made
    Buy,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::RoundStarted | GameEvent::MilestoneReached => Some(SoundEffect::LevelUp),
            GameEvent::GemCollected => Some(SoundEffect::Coin),
            GameEvent::ShieldCollected => Some(SoundEffect::ShieldPowerUp),
            GameEvent::ShieldAbsorbedHit => Some(SoundEffect::LoseShield),
            GameEvent::FatalHit => Some(SoundEffect::Death),
            GameEvent::PurchaseSucceeded => Some(SoundEffect::Buy),
            GameEvent::PurchaseFailed => Some(SoundEffect::Fail),
            GameEvent::UiSelect => Some(SoundEffect::Select),
            GameEvent::SaveRequested => None,
        }
    }

    /// Asset path of the clip
    pub fn file(&self) -> &'static str {
        match self {
            SoundEffect::Death => "audio/death-sound.mp3",
            SoundEffect::LevelUp => "audio/level-up.mp3",
            SoundEffect::ShieldPowerUp => "audio/shield-powerup.mp3",
            SoundEffect::LoseShield => "audio/8-bit-explosion.mp3",
            SoundEffect::Coin => "audio/coin.mp3",
            SoundEffect::Select => "audio/collect-item.mp3",
            SoundEffect::Fail => "audio/retro-hurt.mp3",
            SoundEffect::Buy => "audio/buy-item.mp3",
        }
    }

    /// Per-clip gain (the coin clip is mastered hot)
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Coin => 0.3,
            _ => 1.0,
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("♪ {:?} ({}) at {:.2}", effect, effect.file(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set sound effects volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let volume = effect.base_volume() * self.master_volume * self.sfx_volume;
        if volume <= 0.0 {
            return;
        }
        self.backend.play(effect, volume);
    }

    /// Play whatever cue an event maps to
    pub fn handle_event(&mut self, event: GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.push((effect, volume));
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(1.0);
        audio.handle_event(GameEvent::GemCollected);
        audio.handle_event(GameEvent::SaveRequested);
        audio.handle_event(GameEvent::FatalHit);
        assert_eq!(
            audio.backend().0,
            vec![(SoundEffect::Coin, 0.3), (SoundEffect::Death, 1.0)]
        );
    }

    #[test]
    fn test_mute_and_zero_volume_are_silent() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Select);
        audio.set_muted(false);
        audio.set_sfx_volume(0.0);
        audio.play(SoundEffect::Select);
        assert!(audio.backend().0.is_empty());
    }
}
