//! Fixed-rate frame pacing

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::{MAX_CATCH_UP_TICKS, TICK_RATE};

/// Paces the loop at a fixed tick rate and reports elapsed milliseconds
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    frame: Duration,
    next: Instant,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

impl FrameClock {
    pub fn new(rate: u32) -> Self {
        let start = Instant::now();
        let frame = Duration::from_secs(1) / rate.max(1);
        Self {
            start,
            frame,
            next: start + frame,
            frames: 0,
        }
    }

    /// Milliseconds since the clock started
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Frames waited so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Sleep until the next frame deadline
    ///
    /// When the loop falls more than a few frames behind, the schedule is
    /// reset to now instead of bursting through the backlog.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
            self.next += self.frame;
        } else if now - self.next > self.frame * MAX_CATCH_UP_TICKS {
            log::debug!("Frame clock behind by {:?}, resyncing", now - self.next);
            self.next = now + self.frame;
        } else {
            self.next += self.frame;
        }
        self.frames += 1;
    }
}
