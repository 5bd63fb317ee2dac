/// Fixed-cadence accumulator.
///
/// Ball physics is expressed per frame (drag, restitution and speeds are
/// all per-frame quantities), so the host must run simulation frames at a
/// constant rate no matter how often it is called.
pub struct FixedTimestep {
    /// Seconds per simulation frame.
    dt: f32,
    /// Unspent wall-clock time.
    accumulator: f32,
    /// Upper bound on frames run for one host call.
    max_catch_up: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_catch_up: 8,
        }
    }

    pub fn with_max_catch_up(mut self, frames: u32) -> Self {
        self.max_catch_up = frames.max(1);
        self
    }

    /// Add host time and return how many simulation frames are due.
    /// Time beyond the catch-up limit is dropped (e.g. after a tab was hidden).
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * self.max_catch_up as f32);
        let frames = (self.accumulator / self.dt) as u32;
        self.accumulator -= frames as f32 * self.dt;
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_frame_of_time_runs_one_frame() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn partial_frames_carry_over() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut ts = FixedTimestep::new(1.0 / 60.0).with_max_catch_up(4);
        assert_eq!(ts.accumulate(2.0), 4);
        assert_eq!(ts.accumulate(0.0), 0);
    }
}
