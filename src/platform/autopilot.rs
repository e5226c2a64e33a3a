//! Demo autopilot
//!
//! Plays the game from a snapshot: starts rounds from the menu, dodges
//! toward the horizontal lane with the most clearance above the ship and
//! detours for power-ups when nothing is close.

use glam::IVec2;

use super::input::InputSource;
use crate::sim::{GamePhase, Snapshot, TickInput};

/// Lane sampling step (pixels)
const LANE_STEP: usize = 8;
/// Close enough to the target lane to stop steering
const DEADBAND: i32 = 3;

/// Bot that plays a fixed number of rounds, then quits
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// How far above the ship asteroids are considered threats
    look_ahead: i32,
    rounds_left: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Autopilot {
    pub fn new(rounds: u32) -> Self {
        Self {
            look_ahead: 220,
            rounds_left: rounds,
        }
    }

    pub fn rounds_left(&self) -> u32 {
        self.rounds_left
    }

    /// Vertical gap between the ship and the nearest threat in a lane;
    /// negative when already overlapping, `look_ahead` when the lane is clear
    fn clearance(&self, view: &Snapshot, player: IVec2, x: i32) -> i32 {
        let size = view.asteroid_size;
        let (w, h) = (view.player_size.x, view.player_size.y);
        view.asteroids
            .iter()
            .filter(|a| a.x < x + w && a.x + size > x)
            .filter(|a| a.y + size > player.y - self.look_ahead && a.y < player.y + h)
            .map(|a| player.y - (a.y + size))
            .min()
            .unwrap_or(self.look_ahead)
            .min(self.look_ahead)
    }

    /// Pick the lane to head for
    fn target_x(&self, view: &Snapshot, player: IVec2) -> i32 {
        let max_x = (view.screen_size.x - view.player_size.x).max(0);

        // Safe where we are: go grab a power-up if one is falling
        if self.clearance(view, player, player.x) >= self.look_ahead {
            let pickup = view.shield.or(view.gem);
            if let Some(p) = pickup {
                let x = p.x.clamp(0, max_x);
                if self.clearance(view, player, x) >= self.look_ahead / 2 {
                    return x;
                }
            }
            return player.x;
        }

        // Most clearance wins; nearer lanes break ties
        (0..=max_x)
            .step_by(LANE_STEP)
            .chain(std::iter::once(max_x))
            .max_by_key(|&x| {
                (
                    self.clearance(view, player, x),
                    -(x - player.x).abs(),
                )
            })
            .unwrap_or(player.x)
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, view: &Snapshot) -> TickInput {
        match view.phase {
            GamePhase::Menu => {
                if self.rounds_left == 0 {
                    return TickInput {
                        quit: true,
                        ..Default::default()
                    };
                }
                self.rounds_left -= 1;
                TickInput {
                    confirm: true,
                    ..Default::default()
                }
            }
            GamePhase::Shop => {
                let back = crate::ui::back_button();
                TickInput {
                    pointer: Some(back.center()),
                    pointer_clicked: true,
                    ..Default::default()
                }
            }
            GamePhase::Playing => {
                let Some(player) = view.player else {
                    return TickInput::default();
                };
                let target = self.target_x(view, player);
                TickInput {
                    move_left: target < player.x - DEADBAND,
                    move_right: target > player.x + DEADBAND,
                    ..Default::default()
                }
            }
            GamePhase::GameOver => TickInput {
                confirm: true,
                ..Default::default()
            },
        }
    }
}
