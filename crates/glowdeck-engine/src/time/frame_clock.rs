use std::time::{Duration, Instant};

// A stall (debugger, window drag) must not produce a giant animation step,
// and a timer glitch must not produce a zero one.
const MIN_DT: Duration = Duration::from_micros(100);
const MAX_DT: Duration = Duration::from_millis(250);

/// Per-frame delta-time source with clamped steps.
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            frame_index: 0,
        }
    }

    /// Advances the clock and returns the clamped delta since the previous
    /// tick, in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).clamp(MIN_DT, MAX_DT);
        self.last_tick = now;
        self.frame_index += 1;
        dt.as_secs_f32()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_frame_index() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame_index(), 0);
        clock.tick();
        clock.tick();
        assert_eq!(clock.frame_index(), 2);
    }

    #[test]
    fn dt_stays_inside_clamp_window() {
        let mut clock = FrameClock::new();
        let dt = clock.tick();
        assert!(dt >= MIN_DT.as_secs_f32());
        assert!(dt <= MAX_DT.as_secs_f32());
    }
}
