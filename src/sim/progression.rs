//! Score, milestones and the shield stack

use serde::{Deserialize, Serialize};

/// Shields held by the player; each one absorbs a single asteroid hit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldStack {
    count: u32,
}

impl ShieldStack {
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn push(&mut self) {
        self.count += 1;
    }

    /// Spend one shield; false when there is none to spend
    pub fn consume(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        true
    }
}

/// Round score with a milestone every `step` points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    score: u32,
    next_milestone: u32,
    step: u32,
    /// Ticks of score-box flashing left
    flash_ticks: u32,
    flash_duration: u32,
}

impl Progression {
    pub fn new(first_milestone: u32, step: u32, flash_duration: u32) -> Self {
        debug_assert!(step > 0, "milestone step must be positive");
        Self {
            score: 0,
            next_milestone: first_milestone,
            step: step.max(1),
            flash_ticks: 0,
            flash_duration,
        }
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn next_milestone(&self) -> u32 {
        self.next_milestone
    }

    /// Whether the score box should be flashing
    #[inline]
    pub fn is_flashing(&self) -> bool {
        self.flash_ticks > 0
    }

    /// Add one point; returns true when this point reaches a milestone
    ///
    /// Uses `>=` so a milestone configured below the current score still
    /// fires once and then steps past it.
    pub fn on_score_increment(&mut self) -> bool {
        self.score += 1;
        if self.score >= self.next_milestone {
            self.next_milestone += self.step;
            self.flash_ticks = self.flash_duration;
            true
        } else {
            false
        }
    }

    /// Count down the flashing cue
    pub fn tick(&mut self) {
        self.flash_ticks = self.flash_ticks.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shield_never_negative() {
        let mut shields = ShieldStack::default();
        assert!(!shields.consume());
        assert_eq!(shields.count(), 0);
        shields.push();
        shields.push();
        assert!(shields.consume());
        assert_eq!(shields.count(), 1);
    }

    #[test]
    fn test_milestone_fires_once_at_100() {
        let mut progress = Progression::new(100, 100, 120);
        let fired: Vec<u32> = (0..250)
            .filter_map(|_| progress.on_score_increment().then_some(progress.score()))
            .collect();
        assert_eq!(fired, vec![100, 200]);
        assert_eq!(progress.next_milestone(), 300);
    }

    #[test]
    fn test_milestone_below_score_fires_on_next_point() {
        let mut progress = Progression::new(0, 100, 120);
        assert!(progress.on_score_increment());
        assert_eq!(progress.next_milestone(), 100);
        assert!(!progress.on_score_increment());
    }

    #[test]
    fn test_flashing_counts_down() {
        let mut progress = Progression::new(1, 100, 2);
        assert!(!progress.is_flashing());
        progress.on_score_increment();
        assert!(progress.is_flashing());
        progress.tick();
        assert!(progress.is_flashing());
        progress.tick();
        assert!(!progress.is_flashing());
        progress.tick();
        assert!(!progress.is_flashing());
    }
}
