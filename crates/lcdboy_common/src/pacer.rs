use std::time::{Duration, Instant};

/// Simple frame limiter for host loops.
///
/// Sleeps away whatever is left of the target frame time after the frame's
/// work is done. Frames that overrun are not compensated for.
pub struct FramePacer {
    target: Duration,
    last_frame: Instant,
    overruns: u64,
}

impl FramePacer {
    pub fn new(target: Duration) -> Self {
        Self {
            target,
            last_frame: Instant::now(),
            overruns: 0,
        }
    }

    /// Build a pacer from a refresh rate in Hz.
    pub fn from_hz(hz: f64) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / hz))
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    /// Number of frames that took longer than the target so far.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Block until the current frame's time slot has elapsed.
    pub fn wait(&mut self) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.target {
            std::thread::sleep(self.target - elapsed);
        } else {
            self.overruns = self.overruns.wrapping_add(1);
            log::trace!(
                "frame overran target by {:?} ({} overruns)",
                elapsed - self.target,
                self.overruns
            );
        }
        self.last_frame = Instant::now();
    }
}
