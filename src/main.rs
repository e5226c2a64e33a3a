//! Asteroid Alley entry point
//!
//! Native headless runner: loads the profile, lets the autopilot play a demo
//! round at the fixed tick rate, plays cues through the log backend and saves
//! whenever the session asks.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use asteroid_alley::audio::{AudioManager, LogBackend};
use asteroid_alley::persistence::ProfileStore;
use asteroid_alley::platform::{Autopilot, FrameClock, InputSource};
use asteroid_alley::sim::{GameEvent, GamePhase, Session, tick};
use asteroid_alley::{GameConfig, Preset};

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Asteroid Alley (native) starting...");

    let store = ProfileStore::default();
    let profile = store.load_or_default().with_context(|| {
        format!(
            "cannot start without a readable profile at {}",
            store.path().display()
        )
    })?;
    if let Some(ship) = profile.selected_ship() {
        log::info!("Flying {} ({} gems banked)", ship.name, profile.gems);
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let config = GameConfig::from_preset(Preset::default());
    let mut session = Session::new(config, profile, seed);
    log::info!("Session seed: {}", session.seed);

    let mut audio = AudioManager::new(LogBackend);
    let mut input = Autopilot::new(1);
    let mut clock = FrameClock::default();
    let mut last_phase = session.phase;

    while !session.quit_requested() {
        let view = session.snapshot();
        let tick_input = input.poll(&view);
        tick(&mut session, &tick_input, clock.now_ms());

        for event in session.drain_events() {
            audio.handle_event(event);
            if event == GameEvent::SaveRequested {
                // Unsaved progress is not fatal
                if let Err(e) = store.save(&session.profile) {
                    log::warn!("Profile not saved: {:#}", anyhow::Error::new(e));
                }
            }
        }

        if session.phase != last_phase {
            if session.phase == GamePhase::GameOver {
                let view = session.snapshot();
                println!(
                    "Game over! Score: {}  High score: {}  Gems: {}",
                    view.score, view.high_score, view.gems
                );
            }
            last_phase = session.phase;
        }

        clock.wait();
    }

    log::info!("Exiting after {} frames", clock.frames());
    Ok(())
}
