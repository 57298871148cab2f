//! Frame pacing: how many simulation ticks each presented frame runs
//!
//! `FrameCoupled` runs one tick per frame, so motion speed follows the
//! display's refresh rate. `Fixed` accumulates real frame time and runs as
//! many 60 Hz ticks as fit, capped at `MAX_SUBSTEPS`. Time left over when
//! the cap binds is dropped rather than replayed on later frames.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::settings::TimestepMode;

#[derive(Debug, Clone)]
pub struct FramePacer {
    mode: TimestepMode,
    accumulator: f32,
    last_time_ms: Option<f64>,
}

impl FramePacer {
    pub fn new(mode: TimestepMode) -> Self {
        Self {
            mode,
            accumulator: 0.0,
            last_time_ms: None,
        }
    }

    /// Seconds since the previous frame timestamp (milliseconds, as handed
    /// out by `requestAnimationFrame`). The first frame counts as one tick.
    pub fn frame_dt(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            Some(_) => 0.0,
            None => SIM_DT,
        };
        self.last_time_ms = Some(now_ms);
        dt
    }

    /// Number of ticks to run for a frame that took `dt` seconds
    pub fn ticks_for_frame(&mut self, dt: f32) -> u32 {
        match self.mode {
            TimestepMode::FrameCoupled => 1,
            TimestepMode::Fixed => {
                // Long stalls (tab in background) are not replayed in full
                self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

                let mut substeps = 0;
                while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                    self.accumulator -= SIM_DT;
                    substeps += 1;
                }
                if substeps == MAX_SUBSTEPS {
                    self.accumulator = 0.0;
                }
                substeps
            }
        }
    }

    /// Drop any banked time and the last timestamp (window lost focus)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_coupled_is_one_to_one() {
        let mut pacer = FramePacer::new(TimestepMode::FrameCoupled);
        assert_eq!(pacer.ticks_for_frame(0.0), 1);
        assert_eq!(pacer.ticks_for_frame(SIM_DT / 2.0), 1);
        assert_eq!(pacer.ticks_for_frame(1.0), 1);
    }

    #[test]
    fn test_fixed_at_native_rate() {
        let mut pacer = FramePacer::new(TimestepMode::Fixed);
        for _ in 0..10 {
            assert_eq!(pacer.ticks_for_frame(SIM_DT), 1);
        }
    }

    #[test]
    fn test_fixed_on_fast_display() {
        // 120 Hz display: a tick every other frame
        let mut pacer = FramePacer::new(TimestepMode::Fixed);
        let half = SIM_DT / 2.0;
        assert_eq!(pacer.ticks_for_frame(half), 0);
        assert_eq!(pacer.ticks_for_frame(half), 1);
        assert_eq!(pacer.ticks_for_frame(half), 0);
        assert_eq!(pacer.ticks_for_frame(half), 1);
    }

    #[test]
    fn test_fixed_caps_long_frames() {
        let mut pacer = FramePacer::new(TimestepMode::Fixed);
        // Clamped to MAX_FRAME_DT (15 ticks' worth), then capped
        assert_eq!(pacer.ticks_for_frame(5.0), MAX_SUBSTEPS);
        // The stall is not replayed afterwards
        assert_eq!(pacer.ticks_for_frame(SIM_DT), 1);
        assert_eq!(pacer.ticks_for_frame(SIM_DT), 1);
    }

    #[test]
    fn test_banked_time_reaches_cap() {
        let slow_frame = SIM_DT * 7.75;

        let mut fresh = FramePacer::new(TimestepMode::Fixed);
        assert_eq!(fresh.ticks_for_frame(slow_frame), 7);

        // Half a tick banked from an earlier short frame tips it over
        let mut banked = FramePacer::new(TimestepMode::Fixed);
        assert_eq!(banked.ticks_for_frame(SIM_DT * 0.5), 0);
        assert_eq!(banked.ticks_for_frame(slow_frame), MAX_SUBSTEPS);
    }

    #[test]
    fn test_reset_drops_banked_time() {
        let mut pacer = FramePacer::new(TimestepMode::Fixed);
        assert_eq!(pacer.ticks_for_frame(SIM_DT * 0.75), 0);
        pacer.reset();
        assert_eq!(pacer.ticks_for_frame(SIM_DT * 0.75), 0);
        assert_eq!(pacer.ticks_for_frame(SIM_DT * 0.5), 1);
    }

    #[test]
    fn test_frame_dt() {
        let mut pacer = FramePacer::new(TimestepMode::Fixed);
        assert_eq!(pacer.frame_dt(1000.0), SIM_DT);
        assert!((pacer.frame_dt(1020.0) - 0.02).abs() < 1e-6);
        // Clock going backwards yields no time
        assert_eq!(pacer.frame_dt(1010.0), 0.0);

        pacer.reset();
        assert_eq!(pacer.frame_dt(5000.0), SIM_DT);
    }

    proptest! {
        #[test]
        fn prop_fixed_never_exceeds_cap(frames in proptest::collection::vec(0.0f32..2.0, 1..100)) {
            let mut pacer = FramePacer::new(TimestepMode::Fixed);
            for dt in frames {
                let ticks = pacer.ticks_for_frame(dt);
                prop_assert!(ticks <= MAX_SUBSTEPS);
            }
        }

        #[test]
        fn prop_fixed_tracks_real_time(frames in proptest::collection::vec(0.0f32..0.03, 1..200)) {
            // Short frames never hit the cap, so ticks follow elapsed time
            let mut pacer = FramePacer::new(TimestepMode::Fixed);
            let mut total_ticks = 0u32;
            let mut elapsed = 0.0f64;
            for dt in frames {
                total_ticks += pacer.ticks_for_frame(dt);
                elapsed += dt as f64;
            }
            let expected = elapsed / SIM_DT as f64;
            prop_assert!((total_ticks as f64 - expected).abs() <= 1.0 + expected * 1e-4);
        }
    }
}
