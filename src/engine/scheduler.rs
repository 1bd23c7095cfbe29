/// Converts wall-clock time into whole grid steps at a fixed cadence.
///
/// Time accumulates across ticks; once it reaches the entity's interval one
/// step fires and the accumulator drops back to zero. Overshoot is discarded
/// rather than carried, so a long frame never produces a burst of steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveClock {
    accumulated_ms: u64,
}

impl MoveClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when a step is due this tick.
    pub fn advance(&mut self, elapsed_ms: u64, interval_ms: u64) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        if self.accumulated_ms >= interval_ms {
            self.accumulated_ms = 0;
            return true;
        }
        false
    }

    #[cfg(test)]
    fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::MoveClock;

    #[test]
    fn steps_exactly_at_threshold() {
        let mut clock = MoveClock::new();
        assert!(!clock.advance(299, 300));
        assert!(clock.advance(1, 300));
        assert_eq!(clock.accumulated_ms(), 0);
    }

    #[test]
    fn overshoot_is_discarded() {
        let mut clock = MoveClock::new();
        assert!(clock.advance(1_000, 300));
        assert_eq!(clock.accumulated_ms(), 0);
        assert!(!clock.advance(299, 300));
    }

    #[test]
    fn a_longer_interval_applies_from_the_next_call() {
        let mut clock = MoveClock::new();
        assert!(clock.advance(350, 350));
        assert!(!clock.advance(350, 525));
        assert!(clock.advance(175, 525));
    }

    proptest! {
        #[test]
        fn any_split_of_one_interval_steps_once(
            interval in 1u64..5_000,
            cuts in proptest::collection::vec(0u64..5_000, 0..12),
        ) {
            let mut points: Vec<u64> = cuts.into_iter().map(|cut| cut % interval).collect();
            points.sort_unstable();
            points.dedup();

            let mut clock = MoveClock::new();
            let mut steps = 0;
            let mut last = 0;
            for point in points.into_iter().chain(std::iter::once(interval)) {
                if clock.advance(point - last, interval) {
                    steps += 1;
                }
                last = point;
            }
            prop_assert_eq!(steps, 1);
            prop_assert_eq!(clock.accumulated_ms(), 0);
        }
    }
}
