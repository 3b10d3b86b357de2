use super::{DebounceState, DebouncerTrait};
use crate::matrix::KeyState;

/// Debouncer counting consecutive samples instead of elapsed time.
///
/// A key's new level is accepted after it disagreed with the stable state on `threshold` consecutive samples.
/// A single agreeing sample resets the count, so a glitch shorter than the threshold is never reported.
pub struct TickDebouncer<const ROW: usize, const COL: usize> {
    threshold: u8,
    counters: [[u8; COL]; ROW],
}

impl<const ROW: usize, const COL: usize> TickDebouncer<ROW, COL> {
    pub fn new(threshold: u8) -> Self {
        TickDebouncer {
            threshold: threshold.max(1),
            counters: [[0; COL]; ROW],
        }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Current disagreement count of a key
    pub fn count(&self, row_idx: usize, col_idx: usize) -> u8 {
        self.counters[row_idx][col_idx]
    }
}

impl<const ROW: usize, const COL: usize> DebouncerTrait<ROW, COL> for TickDebouncer<ROW, COL> {
    fn detect_change_with_debounce(
        &mut self,
        row_idx: usize,
        col_idx: usize,
        key_active: bool,
        key_state: &KeyState,
    ) -> DebounceState {
        let counter = &mut self.counters[row_idx][col_idx];

        if key_state.pressed == key_active {
            *counter = 0;
            return DebounceState::Ignored;
        }

        *counter += 1;
        if *counter >= self.threshold {
            *counter = 0;
            DebounceState::Debounced
        } else {
            DebounceState::InProgress
        }
    }

    fn reset(&mut self) {
        self.counters = [[0; COL]; ROW];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(debouncer: &mut TickDebouncer<2, 2>, active: bool, state: &KeyState) -> DebounceState {
        debouncer.detect_change_with_debounce(1, 0, active, state)
    }

    #[test]
    fn test_change_accepted_after_threshold() {
        let mut debouncer = TickDebouncer::<2, 2>::new(3);
        let state = KeyState::new();

        assert_eq!(sample(&mut debouncer, true, &state), DebounceState::InProgress);
        assert_eq!(sample(&mut debouncer, true, &state), DebounceState::InProgress);
        assert_eq!(debouncer.count(1, 0), 2);
        assert_eq!(sample(&mut debouncer, true, &state), DebounceState::Debounced);
        assert_eq!(debouncer.count(1, 0), 0);
    }

    #[test]
    fn test_glitch_resets_counter() {
        let mut debouncer = TickDebouncer::<2, 2>::new(3);
        let state = KeyState::new();

        assert_eq!(sample(&mut debouncer, true, &state), DebounceState::InProgress);
        assert_eq!(sample(&mut debouncer, true, &state), DebounceState::InProgress);
        // Back to the stable level
        assert_eq!(sample(&mut debouncer, false, &state), DebounceState::Ignored);
        assert_eq!(debouncer.count(1, 0), 0);
        assert_eq!(sample(&mut debouncer, true, &state), DebounceState::InProgress);
        assert_eq!(sample(&mut debouncer, true, &state), DebounceState::InProgress);
        assert_eq!(sample(&mut debouncer, true, &state), DebounceState::Debounced);
    }

    #[test]
    fn test_counters_are_per_key() {
        let mut debouncer = TickDebouncer::<2, 2>::new(2);
        let state = KeyState::new();

        debouncer.detect_change_with_debounce(0, 0, true, &state);
        debouncer.detect_change_with_debounce(0, 1, false, &state);
        assert_eq!(debouncer.count(0, 0), 1);
        assert_eq!(debouncer.count(0, 1), 0);
        assert_eq!(
            debouncer.detect_change_with_debounce(0, 0, true, &state),
            DebounceState::Debounced
        );

        debouncer.detect_change_with_debounce(1, 1, true, &state);
        debouncer.reset();
        assert_eq!(debouncer.count(1, 1), 0);
    }

    #[test]
    fn test_zero_threshold_is_one() {
        let mut debouncer = TickDebouncer::<2, 2>::new(0);
        assert_eq!(debouncer.threshold(), 1);
        assert_eq!(sample(&mut debouncer, true, &KeyState::new()), DebounceState::Debounced);
    }
}
