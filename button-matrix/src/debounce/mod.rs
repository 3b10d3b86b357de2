use crate::matrix::KeyState;

pub mod tick_debouncer;

pub use tick_debouncer::TickDebouncer;

/// Per-key debouncer used by the matrix scanner.
///
/// The scanner calls it once for every sampled key, with the freshly read level and the key's stable state.
pub trait DebouncerTrait<const ROW: usize, const COL: usize> {
    fn detect_change_with_debounce(
        &mut self,
        row_idx: usize,
        col_idx: usize,
        key_active: bool,
        key_state: &KeyState,
    ) -> DebounceState;

    /// Forget every debounce in progress
    fn reset(&mut self);
}

/// Debounce state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    Debounced,
    InProgress,
    Ignored,
}
