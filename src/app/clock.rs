/// Converts frame time into a fixed logical tick rate.
#[derive(Clone, Copy, Debug, Default)]
pub(in crate::app) struct TickClock {
    accumulator_secs: f32,
}

impl TickClock {
    const TICK_SECS: f32 = 1.0 / 60.0;
    const MAX_TICKS_PER_FRAME: u32 = 4;
    const MAX_FRAME_SECS: f32 = 0.25;

    /// Ticks owed for a frame that took `delta_secs`. Backlog beyond the per-frame
    /// cap is dropped so a stalled window does not fast-forward the layout.
    pub(in crate::app) fn ticks_for(&mut self, delta_secs: f32) -> u32 {
        self.accumulator_secs += delta_secs.clamp(0.0, Self::MAX_FRAME_SECS);

        let owed = ((self.accumulator_secs + 1.0e-6) / Self::TICK_SECS).floor() as u32;
        let ticks = owed.min(Self::MAX_TICKS_PER_FRAME);
        self.accumulator_secs = (self.accumulator_secs - ticks as f32 * Self::TICK_SECS).max(0.0);
        if owed > ticks {
            self.accumulator_secs = 0.0;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_frames_tick_once_each() {
        let mut clock = TickClock::default();
        let total = (0..120)
            .map(|_| clock.ticks_for(1.0 / 60.0))
            .sum::<u32>();
        assert!((119..=120).contains(&total));
    }

    #[test]
    fn fast_frames_accumulate() {
        let mut clock = TickClock::default();
        let ticks = (0..4).map(|_| clock.ticks_for(1.0 / 240.0)).collect::<Vec<_>>();
        assert_eq!(ticks.iter().sum::<u32>(), 1);
    }

    #[test]
    fn stalls_are_capped_and_forgotten() {
        let mut clock = TickClock::default();
        assert_eq!(clock.ticks_for(3.0), TickClock::MAX_TICKS_PER_FRAME);
        assert_eq!(clock.ticks_for(0.0), 0);
        assert_eq!(clock.ticks_for(-1.0), 0);
    }
}
