use std::time::Instant;

use crate::engine::error::GravityError;

/// Longest frame the simulation is allowed to see, in seconds
pub const DEFAULT_MAX_FRAME_TIME: f32 = 0.33;

/// Wall clock for the driver loop.
///
/// A stall (window drag, breakpoint) would otherwise hand the integrator one
/// huge step and fling the bodies apart.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_frame_time: f32,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(max_frame_time: f32) -> Result<Self, GravityError> {
        if !max_frame_time.is_finite() || max_frame_time < 0.0 {
            return Err(GravityError::InvalidFrameTime(max_frame_time));
        }
        Ok(Self {
            max_frame_time,
            last_tick: Instant::now(),
        })
    }

    pub fn max_frame_time(&self) -> f32 {
        self.max_frame_time
    }

    /// Seconds since the previous tick, clamped
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.clamp(frame_time)
    }

    /// Clamp a measured frame time into `[0, max_frame_time]`
    pub fn clamp(&self, frame_time: f32) -> f32 {
        if !frame_time.is_finite() {
            log::warn!("Dropping non-finite frame time {}", frame_time);
            return 0.0;
        }
        if frame_time > self.max_frame_time {
            log::debug!(
                "Frame took {:.3}s, clamping to {:.3}s",
                frame_time,
                self.max_frame_time
            );
        }
        frame_time.clamp(0.0, self.max_frame_time)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            max_frame_time: DEFAULT_MAX_FRAME_TIME,
            last_tick: Instant::now(),
        }
    }
}
