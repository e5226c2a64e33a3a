//! Fixed-rate session tick
//!
//! One call per rendered frame. Every phase is handled here, so a quit
//! request is seen no matter which screen is showing.

use glam::IVec2;

use super::state::{GameEvent, GamePhase, Session};
use crate::ui;

/// Input sampled once per tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Steer left (held)
    pub move_left: bool,
    /// Steer right (held)
    pub move_right: bool,
    /// Enter/confirm (pressed this tick)
    pub confirm: bool,
    /// Pointer position in screen space
    pub pointer: Option<IVec2>,
    /// Primary button pressed this tick
    pub pointer_clicked: bool,
    /// Window close / quit
    pub quit: bool,
}

impl TickInput {
    /// Pointer position if the primary button was pressed this tick
    pub fn click(&self) -> Option<IVec2> {
        if self.pointer_clicked { self.pointer } else { None }
    }
}

/// Advance the session by one tick. `now_ms` is elapsed wall-clock time.
pub fn tick(session: &mut Session, input: &TickInput, now_ms: u64) {
    if input.quit {
        session.request_quit();
    }
    if session.quit_requested() {
        return;
    }

    match session.phase {
        GamePhase::Menu => tick_menu(session, input, now_ms),
        GamePhase::Shop => tick_shop(session, input),
        GamePhase::Playing => {
            if tick_playing(session, input, now_ms) {
                session.emit(GameEvent::FatalHit);
                session.end_round();
            }
        }
        GamePhase::GameOver => {
            if input.confirm {
                session.return_to_menu();
            }
        }
    }
}

fn tick_menu(session: &mut Session, input: &TickInput, now_ms: u64) {
    let width = session.config.screen_width;
    let click = input.click();

    if input.confirm || click.is_some_and(|p| ui::start_button(width).contains(p)) {
        session.start_round(now_ms);
    } else if session.config.shop_enabled
        && click.is_some_and(|p| ui::shop_button(width).contains(p))
    {
        session.emit(GameEvent::UiSelect);
        session.open_shop();
    }
}

fn tick_shop(session: &mut Session, input: &TickInput) {
    let Some(point) = input.click() else {
        return;
    };
    let width = session.config.screen_width;

    if ui::back_button().contains(point) {
        session.emit(GameEvent::UiSelect);
        session.emit(GameEvent::SaveRequested);
        session.phase = GamePhase::Menu;
        log::info!("Shop closed");
        return;
    }

    if let Some(index) = ui::shop_cell_at(point, session.profile.ships.len()) {
        session.emit(GameEvent::UiSelect);
        session.shop_cursor = index;
        if session.profile.ships[index].unlocked {
            if let Err(e) = session.profile.select_ship(index) {
                log::warn!("Could not select ship {}: {}", index, e);
            }
        }
        return;
    }

    let cursor = session.shop_cursor;
    let viewing_locked = session
        .profile
        .ships
        .get(cursor)
        .is_some_and(|ship| !ship.unlocked);
    if viewing_locked && ui::buy_button(width).contains(point) {
        match session.profile.purchase_ship(cursor) {
            Ok(()) => {
                log::info!("Bought ship {} ({} gems left)", cursor, session.profile.gems);
                session.emit(GameEvent::PurchaseSucceeded);
                session.emit(GameEvent::SaveRequested);
            }
            Err(e) => {
                log::debug!("Purchase refused: {}", e);
                session.emit(GameEvent::PurchaseFailed);
            }
        }
    }
}

/// Returns true when an unshielded asteroid hit ends the round
fn tick_playing(session: &mut Session, input: &TickInput, now_ms: u64) -> bool {
    let Session {
        config,
        sprites,
        profile,
        round,
        rng,
        events,
        ..
    } = session;
    let Some(round) = round.as_mut() else {
        log::warn!("Playing without a round; returning to menu");
        session.phase = GamePhase::Menu;
        return false;
    };

    round.time_ticks += 1;
    round
        .animation
        .step(sprites.asteroid_frames.len(), sprites.shield_frames.len());
    round.progression.tick();

    // Player
    round.player.steer(input.move_left, input.move_right);
    let player_pos = round.player.pos();

    // Power-ups fall (or wake up) before the field moves
    if let Some(gem) = &mut round.gem {
        gem.tick(now_ms, rng);
    }
    if let Some(shield) = &mut round.shield {
        shield.tick(now_ms, rng);
    }

    // Asteroids; each one passing the bottom edge scores a point
    let wraps = round.asteroids.tick(config.asteroid_speed, rng);
    let points = if config.scoring { wraps } else { 0 };
    for _ in 0..points {
        if round.progression.on_score_increment() {
            log::info!("Milestone reached at score {}", round.progression.score());
            events.push(GameEvent::MilestoneReached);
        }
    }

    // Pickups are independent of each other
    if let Some(gem) = &mut round.gem {
        if gem.try_pickup(&sprites.gem, &sprites.player, player_pos, now_ms, rng) {
            profile.add_gem();
            events.push(GameEvent::GemCollected);
        }
    }
    if let Some(shield) = &mut round.shield {
        let mask = sprites.shield(round.animation.shield_frame);
        if shield.try_pickup(mask, &sprites.player, player_pos, now_ms, rng) {
            round.shields.push();
            events.push(GameEvent::ShieldCollected);
        }
    }

    // Asteroid hits, in pool order: each shield soaks exactly one
    let rock = sprites.asteroid(round.animation.asteroid_frame);
    let hits = round
        .asteroids
        .check_collisions(rock, &sprites.player, player_pos);
    for index in hits {
        if round.shields.consume() {
            round.asteroids.respawn(index, rng);
            events.push(GameEvent::ShieldAbsorbedHit);
        } else {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Preset};
    use crate::profile::Profile;
    use crate::sim::pool::FallingPool;
    use crate::sim::powerup::PowerUpState;

    fn playing_session(seed: u64) -> Session {
        let mut session = Session::new(GameConfig::default(), Profile::default(), seed);
        tick(
            &mut session,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
            0,
        );
        session.drain_events();
        session
    }

    /// Replace the asteroid field with fixed positions
    fn place_asteroids(session: &mut Session, positions: &[IVec2]) {
        let config = &session.config;
        let pool =
            FallingPool::from_positions(positions, config.spawn_rules(), config.screen_height);
        session.round.as_mut().unwrap().asteroids = pool;
    }

    #[test]
    fn test_menu_to_playing() {
        let mut session = Session::new(GameConfig::default(), Profile::default(), 12345);
        tick(&mut session, &TickInput::default(), 0);
        assert_eq!(session.phase, GamePhase::Menu);

        let click_start = TickInput {
            pointer: Some(ui::start_button(400).center()),
            pointer_clicked: true,
            ..Default::default()
        };
        tick(&mut session, &click_start, 16);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.drain_events(), vec![GameEvent::RoundStarted]);
    }

    #[test]
    fn test_quit_is_honoured_in_every_phase() {
        let quit = TickInput {
            quit: true,
            confirm: true,
            ..Default::default()
        };
        let mut session = Session::new(GameConfig::default(), Profile::default(), 1);
        tick(&mut session, &quit, 0);
        assert!(session.quit_requested());
        assert_eq!(session.phase, GamePhase::Menu);

        let mut session = playing_session(1);
        tick(&mut session, &quit, 16);
        assert!(session.quit_requested());
        assert_eq!(session.round.as_ref().unwrap().time_ticks, 0);
    }

    #[test]
    fn test_wrap_scores_one_point_each() {
        let mut session = playing_session(2);
        place_asteroids(
            &mut session,
            &[IVec2::new(0, 597), IVec2::new(100, 599), IVec2::new(350, 0)],
        );
        tick(&mut session, &TickInput::default(), 16);
        assert_eq!(session.round.as_ref().unwrap().score(), 2);
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_prototype_wraps_do_not_score() {
        let config = GameConfig {
            first_milestone: 1,
            ..Preset::Prototype.config()
        };
        let mut session = Session::new(config, Profile::default(), 2);
        let start = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut session, &start, 0);
        session.drain_events();
        place_asteroids(&mut session, &[IVec2::new(0, 599), IVec2::new(77, 597)]);

        tick(&mut session, &TickInput::default(), 16);
        assert_eq!(session.round.as_ref().unwrap().score(), 0);
        assert!(!session.drain_events().contains(&GameEvent::MilestoneReached));
    }

    #[test]
    fn test_unshielded_hit_ends_round_once() {
        let mut session = playing_session(3);
        let player = session.round.as_ref().unwrap().player.pos();
        place_asteroids(&mut session, &[player - IVec2::new(0, 6)]);

        tick(&mut session, &TickInput::default(), 16);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::FatalHit, GameEvent::SaveRequested]
        );

        // Frozen: further ticks do nothing until confirmed
        let frozen = session.round.as_ref().unwrap().asteroids.entities().to_vec();
        tick(&mut session, &TickInput::default(), 32);
        assert!(session.drain_events().is_empty());
        assert_eq!(session.round.as_ref().unwrap().asteroids.entities(), frozen.as_slice());

        tick(
            &mut session,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
            48,
        );
        assert_eq!(session.phase, GamePhase::Menu);
        assert!(session.round.is_none());
    }

    #[test]
    fn test_gem_and_shield_picked_up_same_tick() {
        let mut session = playing_session(4);
        {
            let round = session.round.as_mut().unwrap();
            let p = round.player.pos();
            round.gem.as_mut().unwrap().state = PowerUpState::Falling {
                pos: p + IVec2::new(5, 0),
            };
            round.shield.as_mut().unwrap().state = PowerUpState::Falling {
                pos: p + IVec2::new(10, 4),
            };
        }
        place_asteroids(&mut session, &[IVec2::new(0, -500)]);

        tick(&mut session, &TickInput::default(), 16);
        let round = session.round.as_ref().unwrap();
        assert_eq!(round.shields.count(), 1);
        assert_eq!(session.profile.gems, 1);
        assert!(!round.gem.as_ref().unwrap().is_active());
        assert!(!round.shield.as_ref().unwrap().is_active());
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::GemCollected, GameEvent::ShieldCollected]
        );
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed produce identical rounds
        let mut a = playing_session(99999);
        let mut b = playing_session(99999);
        let inputs = [
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for t in 0..600u64 {
            let input = &inputs[(t % 3) as usize];
            tick(&mut a, input, t * 16);
            tick(&mut b, input, t * 16);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
