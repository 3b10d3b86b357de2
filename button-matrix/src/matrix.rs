use embedded_hal::digital::InputPin;

use crate::debounce::{DebounceState, DebouncerTrait};
use crate::driver::flex_pin::FlexPin;
use crate::event::ButtonId;

/// KeyState represents the debounced state of a key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyState {
    // True if the key is pressed
    pub pressed: bool,
}

impl KeyState {
    pub const fn new() -> Self {
        KeyState { pressed: false }
    }

    pub fn toggle_pressed(&mut self) {
        self.pressed = !self.pressed;
    }
}

/// Matrix is the physical pcb layout of the button matrix.
///
/// One column is strobed per scan tick, round robin. The column read on a tick has been driven
/// since the end of the previous tick, so it gets a full tick period to settle. After reading,
/// the column is released and the next one is driven: exactly one column is active at any time.
pub struct Matrix<In: InputPin, Out: FlexPin, D: DebouncerTrait<ROW, COL>, const ROW: usize, const COL: usize> {
    /// Sensed row pins, with pull ups (or pull downs when `low_active` is false)
    row_pins: [In; ROW],
    /// Strobed column pins
    col_pins: [Out; COL],
    /// Debouncer
    debouncer: D,
    /// Key state matrix, indexed by `[row][col]`
    key_states: [[KeyState; COL]; ROW],
    /// Column driven right now, read on the next tick
    active_col: usize,
    /// Pin active level
    low_active: bool,
}

impl<In: InputPin, Out: FlexPin, D: DebouncerTrait<ROW, COL>, const ROW: usize, const COL: usize>
    Matrix<In, Out, D, ROW, COL>
{
    /// Create a matrix from row and column pins, and strobe the first column.
    pub fn new(row_pins: [In; ROW], col_pins: [Out; COL], debouncer: D, low_active: bool) -> Self {
        const {
            assert!(ROW > 0 && COL > 0, "the matrix needs at least one row and one column");
            assert!(ROW * COL < 256, "button ids must fit in a u8");
        }

        let mut matrix = Matrix {
            row_pins,
            col_pins,
            debouncer,
            key_states: [[KeyState::new(); COL]; ROW],
            active_col: 0,
            low_active,
        };
        matrix.init_pins();
        matrix
    }

    /// Forget every key state and restart scanning from the first column
    pub fn reset(&mut self) {
        self.key_states = [[KeyState::new(); COL]; ROW];
        self.debouncer.reset();
        self.init_pins();
    }

    /// Scan the active column, then move the strobe to the next one.
    ///
    /// `on_change` is called with the button id and its new pressed state for every key whose
    /// change survived debouncing.
    pub fn scan_tick(&mut self, mut on_change: impl FnMut(ButtonId, bool)) {
        let col_idx = self.active_col;

        for row_idx in 0..ROW {
            let level = if self.low_active {
                self.row_pins[row_idx].is_low()
            } else {
                self.row_pins[row_idx].is_high()
            };
            let Ok(key_active) = level else {
                warn!("Failed to read row {} on column {}", row_idx, col_idx);
                continue;
            };

            let debounce_state = self.debouncer.detect_change_with_debounce(
                row_idx,
                col_idx,
                key_active,
                &self.key_states[row_idx][col_idx],
            );

            if let DebounceState::Debounced = debounce_state {
                let key_state = &mut self.key_states[row_idx][col_idx];
                key_state.toggle_pressed();
                let id = ButtonId::from_position(row_idx, col_idx, COL);
                trace!("Key ({}, {}) debounced, {:?} pressed: {}", row_idx, col_idx, id, key_state.pressed);
                on_change(id, key_state.pressed);
            }
        }

        self.release(col_idx);
        self.active_col = (col_idx + 1) % COL;
        self.strobe(self.active_col);
    }

    pub fn key_state(&self, row_idx: usize, col_idx: usize) -> KeyState {
        self.key_states[row_idx][col_idx]
    }

    /// Index of the column that will be read on the next tick
    pub fn active_col(&self) -> usize {
        self.active_col
    }

    pub fn debouncer(&self) -> &D {
        &self.debouncer
    }

    fn init_pins(&mut self) {
        for pin in self.col_pins.iter_mut() {
            pin.set_as_input();
        }
        self.active_col = 0;
        self.strobe(0);
    }

    fn strobe(&mut self, col_idx: usize) {
        if let Some(pin) = self.col_pins.get_mut(col_idx) {
            pin.set_as_output();
            if self.low_active {
                pin.set_low().ok();
            } else {
                pin.set_high().ok();
            }
        }
    }

    fn release(&mut self, col_idx: usize) {
        if let Some(pin) = self.col_pins.get_mut(col_idx) {
            pin.set_as_input();
        }
    }
}
