//! Frame pacing
//!
//! Speeds are expressed in units per tick. By default every display
//! refresh runs exactly one tick; fixed-step pacing instead runs ticks at
//! 60 Hz regardless of the refresh rate.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_GAP_MS, MAX_SUBSTEPS, SIM_STEP_MS};

/// How refresh callbacks map to simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePacing {
    /// One tick per refresh callback
    #[default]
    PerRefresh,
    /// 60 Hz accumulator
    FixedStep,
}

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    pacing: FramePacing,
    accumulator: f64,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new(pacing: FramePacing) -> Self {
        Self {
            pacing,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Number of ticks to run for a refresh callback at `now_ms`
    pub fn ticks_for(&mut self, now_ms: f64) -> u32 {
        let last = self.last_time.replace(now_ms);
        match self.pacing {
            FramePacing::PerRefresh => 1,
            FramePacing::FixedStep => {
                let Some(last) = last else {
                    // First frame: one tick so something is on screen
                    return 1;
                };
                let dt = (now_ms - last).clamp(0.0, MAX_FRAME_GAP_MS);
                self.accumulator += dt;

                let mut ticks = 0;
                while self.accumulator >= SIM_STEP_MS && ticks < MAX_SUBSTEPS {
                    self.accumulator -= SIM_STEP_MS;
                    ticks += 1;
                }
                // Drop what could not be caught up
                if ticks == MAX_SUBSTEPS {
                    self.accumulator = self.accumulator.min(SIM_STEP_MS);
                }
                ticks
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_refresh_is_one_tick() {
        let mut clock = FrameClock::new(FramePacing::PerRefresh);
        assert_eq!(clock.ticks_for(0.0), 1);
        assert_eq!(clock.ticks_for(7.0), 1);
        assert_eq!(clock.ticks_for(500.0), 1);
    }

    #[test]
    fn test_fixed_step_60hz_display() {
        let mut clock = FrameClock::new(FramePacing::FixedStep);
        assert_eq!(clock.ticks_for(0.0), 1);
        let mut total = 0;
        for frame in 1..=60 {
            total += clock.ticks_for(frame as f64 * SIM_STEP_MS + 0.01);
        }
        assert_eq!(total, 60);
    }

    #[test]
    fn test_fixed_step_120hz_display_halves_ticks() {
        let mut clock = FrameClock::new(FramePacing::FixedStep);
        clock.ticks_for(0.0);
        let mut total = 0;
        for frame in 1..=120 {
            total += clock.ticks_for(frame as f64 * (1000.0 / 120.0));
        }
        assert!((59..=60).contains(&total), "got {total}");
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut clock = FrameClock::new(FramePacing::FixedStep);
        clock.ticks_for(0.0);
        // A two second stall is clamped and capped
        assert_eq!(clock.ticks_for(2000.0), MAX_SUBSTEPS);
        // and does not leave a backlog behind
        assert!(clock.ticks_for(2000.0 + SIM_STEP_MS) <= 2);
    }
}
