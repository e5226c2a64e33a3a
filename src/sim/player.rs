//! The player's ship

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// The player's ship. Only `x` changes during a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    pub width: i32,
    pub height: i32,
    screen_width: i32,
}

impl Player {
    pub fn new(x: i32, y: i32, speed: i32, width: i32, height: i32, screen_width: i32) -> Self {
        let mut player = Self {
            x,
            y,
            speed,
            width,
            height,
            screen_width,
        };
        player.x = player.clamp_x(x);
        player
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Rightmost legal x
    #[inline]
    pub fn max_x(&self) -> i32 {
        (self.screen_width - self.width).max(0)
    }

    fn clamp_x(&self, x: i32) -> i32 {
        x.clamp(0, self.max_x())
    }

    /// Apply one tick of horizontal input; holding both directions cancels out
    pub fn steer(&mut self, left: bool, right: bool) {
        let mut dx = 0;
        if left {
            dx -= self.speed;
        }
        if right {
            dx += self.speed;
        }
        self.x = self.clamp_x(self.x + dx);
    }
}
