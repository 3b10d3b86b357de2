#![allow(dead_code)]

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;

use button_matrix::debounce::TickDebouncer;
use button_matrix::driver::flex_pin::FlexPin;
use button_matrix::{ButtonEvent, EventSink, Keypad, MatrixConfig, TickTimer};
use embassy_time::Duration;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const ROW: usize = 4;
pub const COL: usize = 4;

/// Electrical model of a diode matrix: a row reads the level of the driven column when the switch
/// between them is closed, otherwise it floats to its pull resistor level.
pub struct Board {
    pub switches: [[bool; COL]; ROW],
    pub col_output: [bool; COL],
    pub col_level: [bool; COL],
    /// Rows are pulled up
    pub pull_up: bool,
    /// Number of row reads, per row
    pub reads: [usize; ROW],
}

pub type SharedBoard = Rc<RefCell<Board>>;

pub fn new_board(pull_up: bool) -> SharedBoard {
    Rc::new(RefCell::new(Board {
        switches: [[false; COL]; ROW],
        col_output: [false; COL],
        col_level: [false; COL],
        pull_up,
        reads: [0; ROW],
    }))
}

pub struct FakeRow {
    board: SharedBoard,
    row: usize,
}

impl ErrorType for FakeRow {
    type Error = Infallible;
}

impl InputPin for FakeRow {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut board = self.board.borrow_mut();
        board.reads[self.row] += 1;
        for col in 0..COL {
            if board.col_output[col] && board.switches[self.row][col] {
                return Ok(board.col_level[col]);
            }
        }
        Ok(board.pull_up)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

pub struct FakeCol {
    board: SharedBoard,
    col: usize,
}

impl ErrorType for FakeCol {
    type Error = Infallible;
}

impl InputPin for FakeCol {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.board.borrow().col_level[self.col])
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl OutputPin for FakeCol {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.board.borrow_mut().col_level[self.col] = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.board.borrow_mut().col_level[self.col] = true;
        Ok(())
    }
}

impl FlexPin for FakeCol {
    fn set_as_input(&mut self) {
        self.board.borrow_mut().col_output[self.col] = false;
    }

    fn set_as_output(&mut self) {
        self.board.borrow_mut().col_output[self.col] = true;
    }
}

/// Sink recording every event
#[derive(Clone, Default)]
pub struct Recorder(pub Rc<RefCell<Vec<ButtonEvent>>>);

impl Recorder {
    pub fn events(&self) -> Vec<ButtonEvent> {
        self.0.borrow().clone()
    }
}

impl EventSink for Recorder {
    fn emit(&mut self, event: ButtonEvent) {
        self.0.borrow_mut().push(event);
    }
}

pub type TestKeypad<S> = Keypad<FakeRow, FakeCol, TickDebouncer<ROW, COL>, TickTimer, S, ROW, COL>;

/// Debounce threshold 4, 5ms ticks, long press after 200ms (40 ticks)
pub fn test_config() -> MatrixConfig {
    MatrixConfig::new()
        .with_debounce_threshold(4)
        .with_scan_tick_period(Duration::from_millis(5))
        .with_long_press_timeout(Duration::from_millis(200))
}

/// Ticks after which any physical change is debounced: every key is sampled once per COL ticks
pub const SETTLE_TICKS: usize = 4 * COL;

pub fn pins(board: &SharedBoard) -> ([FakeRow; ROW], [FakeCol; COL]) {
    let rows = core::array::from_fn(|row| FakeRow {
        board: board.clone(),
        row,
    });
    let cols = core::array::from_fn(|col| FakeCol {
        board: board.clone(),
        col,
    });
    (rows, cols)
}

pub fn create_test_keypad(config: MatrixConfig, pull_up: bool) -> (TestKeypad<Recorder>, SharedBoard, Recorder) {
    let board = new_board(pull_up);
    let (rows, cols) = pins(&board);
    let recorder = Recorder::default();
    let keypad = TestKeypad::from_config(rows, cols, config.with_low_active(pull_up)).with_event_callback(recorder.clone());
    (keypad, board, recorder)
}

pub fn set_switch(board: &SharedBoard, row: usize, col: usize, closed: bool) {
    board.borrow_mut().switches[row][col] = closed;
}

pub fn run_ticks<S: EventSink>(keypad: &mut TestKeypad<S>, ticks: usize) {
    for _ in 0..ticks {
        keypad.on_scan_tick();
    }
}

/// Close a switch and scan until the press is debounced
pub fn press<S: EventSink>(keypad: &mut TestKeypad<S>, board: &SharedBoard, row: usize, col: usize) {
    set_switch(board, row, col, true);
    run_ticks(keypad, SETTLE_TICKS);
}

/// Open a switch and scan until the release is debounced
pub fn release<S: EventSink>(keypad: &mut TestKeypad<S>, board: &SharedBoard, row: usize, col: usize) {
    set_switch(board, row, col, false);
    run_ticks(keypad, SETTLE_TICKS);
}
