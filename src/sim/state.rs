//! Session state and core simulation types
//!
//! A `Session` owns the profile for the whole process and, while a round is
//! playing or just ended, the round's entities.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::pool::FallingPool;
use super::powerup::{PowerUp, PowerUpKind};
use super::progression::{Progression, ShieldStack};
use super::sprites::Sprites;
use crate::config::GameConfig;
use crate::profile::Profile;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Main menu, waiting for start
    Menu,
    /// Ship shop
    Shop,
    /// Active gameplay
    Playing,
    /// Round ended, entities frozen until acknowledged
    GameOver,
}

/// Discrete things that happened during a tick, for audio and persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    GemCollected,
    ShieldCollected,
    ShieldAbsorbedHit,
    FatalHit,
    MilestoneReached,
    PurchaseSucceeded,
    PurchaseFailed,
    UiSelect,
    /// The profile changed and should be written out
    SaveRequested,
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::RoundStarted => "round_started",
            GameEvent::GemCollected => "gem_collected",
            GameEvent::ShieldCollected => "shield_collected",
            GameEvent::ShieldAbsorbedHit => "shield_absorbed_hit",
            GameEvent::FatalHit => "fatal_hit",
            GameEvent::MilestoneReached => "milestone_reached",
            GameEvent::PurchaseSucceeded => "purchase_succeeded",
            GameEvent::PurchaseFailed => "purchase_failed",
            GameEvent::UiSelect => "ui_select",
            GameEvent::SaveRequested => "save_requested",
        }
    }
}

/// Shared sprite animation clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Animation {
    counter: u32,
    frame_delay: u32,
    pub asteroid_frame: usize,
    pub shield_frame: usize,
}

impl Animation {
    pub fn new(frame_delay: u32) -> Self {
        Self {
            frame_delay: frame_delay.max(1),
            ..Default::default()
        }
    }

    /// Advance one tick; frames step every `frame_delay` ticks
    pub fn step(&mut self, asteroid_frames: usize, shield_frames: usize) {
        self.counter += 1;
        if self.counter >= self.frame_delay {
            self.counter = 0;
            self.asteroid_frame = (self.asteroid_frame + 1) % asteroid_frames.max(1);
            self.shield_frame = (self.shield_frame + 1) % shield_frames.max(1);
        }
    }
}

/// Everything that lives for one play-through
#[derive(Debug, Clone)]
pub struct Round {
    pub player: Player,
    pub asteroids: FallingPool,
    pub gem: Option<PowerUp>,
    pub shield: Option<PowerUp>,
    pub shields: ShieldStack,
    pub progression: Progression,
    pub animation: Animation,
    /// Ticks simulated this round
    pub time_ticks: u64,
}

impl Round {
    /// Build a fresh round from configuration
    pub fn new(config: &GameConfig, now_ms: u64, rng: &mut Pcg32) -> Self {
        let player = Player::new(
            config.player_start_x(),
            config.player_y,
            config.player_speed,
            config.player_width,
            config.player_height,
            config.screen_width,
        );
        let asteroids = FallingPool::new(
            config.asteroid_count,
            config.spawn_rules(),
            config.screen_height,
            rng,
        );
        let mut power_up = |kind, cfg| {
            PowerUp::new(
                kind,
                cfg,
                config.screen_width,
                config.screen_height,
                config.asteroid_size,
                now_ms,
                &mut *rng,
            )
        };
        let gem = config.gem.map(|cfg| power_up(PowerUpKind::Gem, cfg));
        let shield = config.shield.map(|cfg| power_up(PowerUpKind::Shield, cfg));

        Self {
            player,
            asteroids,
            gem,
            shield,
            shields: ShieldStack::default(),
            progression: Progression::new(
                config.first_milestone,
                config.milestone_step,
                config.milestone_flash_ticks,
            ),
            animation: Animation::new(config.animation_frame_delay),
            time_ticks: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }
}

/// Read-only view of a session for renderers and input sources
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub screen_size: IVec2,
    pub player: Option<IVec2>,
    pub player_size: IVec2,
    pub asteroids: Vec<IVec2>,
    pub asteroid_size: i32,
    pub asteroid_frame: usize,
    pub gem: Option<IVec2>,
    pub shield: Option<IVec2>,
    pub shield_frame: usize,
    pub shields: u32,
    pub score: u32,
    pub flashing: bool,
    pub gems: u32,
    pub high_score: u32,
    pub shop_cursor: usize,
    pub selected_ship: Option<usize>,
}

/// The whole game: profile, phase and the current round
#[derive(Debug, Clone)]
pub struct Session {
    pub config: GameConfig,
    pub sprites: Sprites,
    pub profile: Profile,
    pub phase: GamePhase,
    /// Present while Playing and GameOver
    pub round: Option<Round>,
    /// Ship currently shown in the shop
    pub shop_cursor: usize,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    quit: bool,
    pub(crate) events: Vec<GameEvent>,
}

impl Session {
    /// Create a session in the main menu
    pub fn new(config: GameConfig, profile: Profile, seed: u64) -> Self {
        let sprites = Sprites::procedural(&config);
        Self::with_sprites(config, sprites, profile, seed)
    }

    pub fn with_sprites(config: GameConfig, sprites: Sprites, profile: Profile, seed: u64) -> Self {
        debug_assert!(profile.validate().is_ok(), "session started with invalid profile");
        let shop_cursor = profile.selected_index().unwrap_or(0);
        Self {
            config,
            sprites,
            profile,
            phase: GamePhase::Menu,
            round: None,
            shop_cursor,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            quit: false,
            events: Vec::new(),
        }
    }

    /// Menu → Playing with a freshly built round
    pub fn start_round(&mut self, now_ms: u64) {
        self.round = Some(Round::new(&self.config, now_ms, &mut self.rng));
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RoundStarted);
        log::info!("Round started ({} preset)", self.config.preset.as_str());
    }

    /// Playing → GameOver: record the score and ask for a save
    pub fn end_round(&mut self) {
        let score = self.round.as_ref().map_or(0, Round::score);
        if self.profile.record_score(score) {
            log::info!("New high score: {}", score);
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::SaveRequested);
        log::info!("Game over with score {}", score);
    }

    /// GameOver → Menu, dropping the round
    pub fn return_to_menu(&mut self) {
        self.round = None;
        self.phase = GamePhase::Menu;
        log::info!("Back to menu");
    }

    pub fn open_shop(&mut self) {
        self.shop_cursor = self.profile.selected_index().unwrap_or(0);
        self.phase = GamePhase::Shop;
        log::info!("Shop opened");
    }

    pub fn request_quit(&mut self) {
        if !self.quit {
            log::info!("Quit requested during {:?}", self.phase);
        }
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn emit(&mut self, event: GameEvent) {
        log::debug!("event: {}", event.name());
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let round = self.round.as_ref();
        Snapshot {
            phase: self.phase,
            screen_size: IVec2::new(self.config.screen_width, self.config.screen_height),
            player: round.map(|r| r.player.pos()),
            player_size: self.sprites.player.size(),
            asteroids: round.map_or_else(Vec::new, |r| r.asteroids.positions().collect()),
            asteroid_size: self.config.asteroid_size,
            asteroid_frame: round.map_or(0, |r| r.animation.asteroid_frame),
            gem: round.and_then(|r| r.gem.as_ref()).and_then(PowerUp::pos),
            shield: round.and_then(|r| r.shield.as_ref()).and_then(PowerUp::pos),
            shield_frame: round.map_or(0, |r| r.animation.shield_frame),
            shields: round.map_or(0, |r| r.shields.count()),
            score: round.map_or(0, Round::score),
            flashing: round.is_some_and(|r| r.progression.is_flashing()),
            gems: self.profile.gems,
            high_score: self.profile.high_score,
            shop_cursor: self.shop_cursor,
            selected_ship: self.profile.selected_index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;

    #[test]
    fn test_animation_steps_every_delay() {
        let mut anim = Animation::new(10);
        for _ in 0..9 {
            anim.step(8, 4);
        }
        assert_eq!(anim.asteroid_frame, 0);
        anim.step(8, 4);
        assert_eq!((anim.asteroid_frame, anim.shield_frame), (1, 1));
        for _ in 0..40 {
            anim.step(8, 4);
        }
        assert_eq!((anim.asteroid_frame, anim.shield_frame), (5, 1));
    }

    #[test]
    fn test_round_follows_preset() {
        let mut rng = Pcg32::seed_from_u64(1);
        let round = Round::new(&Preset::Prototype.config(), 0, &mut rng);
        assert_eq!(round.asteroids.len(), 3);
        assert!(round.gem.is_none() && round.shield.is_none());

        let round = Round::new(&Preset::Shop.config(), 0, &mut rng);
        assert_eq!(round.asteroids.len(), 5);
        assert!(round.gem.is_some() && round.shield.is_some());
        assert_eq!(round.player.x, 176);
    }

    #[test]
    fn test_phase_transitions_keep_profile() {
        let mut session = Session::new(GameConfig::default(), Profile::default(), 9);
        session.start_round(0);
        session.round.as_mut().unwrap().progression.on_score_increment();
        session.end_round();
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(session.profile.high_score, 1);
        assert!(session.round.is_some());

        session.return_to_menu();
        assert!(session.round.is_none());
        assert_eq!(session.profile.high_score, 1);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::RoundStarted, GameEvent::SaveRequested]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_snapshot_without_round() {
        let session = Session::new(GameConfig::default(), Profile::default(), 9);
        let snap = session.snapshot();
        assert_eq!(snap.phase, GamePhase::Menu);
        assert!(snap.player.is_none() && snap.asteroids.is_empty());
        assert_eq!(snap.selected_ship, Some(0));
    }
}
