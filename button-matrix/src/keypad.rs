use embassy_time::Ticker;
use embedded_hal::digital::InputPin;

use crate::classifier::PressClassifier;
use crate::config::MatrixConfig;
use crate::debounce::{DebouncerTrait, TickDebouncer};
use crate::driver::flex_pin::FlexPin;
use crate::matrix::Matrix;
use crate::sink::EventSink;
use crate::timer::{LongPressTimer, TickTimer};

/// A scanned button matrix together with its press classifier.
///
/// All the mutable state of one keypad lives here. In an interrupt driven firmware the keypad is
/// stored in a critical section mutex; the scan tick interrupt calls [`Keypad::on_scan_tick`] and
/// a hardware long press timer calls [`Keypad::on_long_press_timeout`]. Events reach the
/// application through the registered [`EventSink`], e.g. an [`crate::EventSlot`] or a channel.
pub struct Keypad<
    In: InputPin,
    Out: FlexPin,
    D: DebouncerTrait<ROW, COL>,
    T: LongPressTimer,
    S: EventSink,
    const ROW: usize,
    const COL: usize,
> {
    matrix: Matrix<In, Out, D, ROW, COL>,
    classifier: PressClassifier,
    timer: T,
    sink: Option<S>,
    config: MatrixConfig,
}

impl<
    In: InputPin,
    Out: FlexPin,
    D: DebouncerTrait<ROW, COL>,
    T: LongPressTimer,
    S: EventSink,
    const ROW: usize,
    const COL: usize,
> Keypad<In, Out, D, T, S, ROW, COL>
{
    /// Create the keypad with every key released, and strobe the first column.
    ///
    /// Row pins must already be configured as inputs with pull ups (pull downs if
    /// `config.low_active` is false). No event is delivered until a sink is registered.
    pub fn new(row_pins: [In; ROW], col_pins: [Out; COL], debouncer: D, mut timer: T, config: MatrixConfig) -> Self {
        timer.stop();
        info!(
            "Button matrix {}x{}, debounce latency {}ms",
            ROW,
            COL,
            config.debounce_latency::<COL>().as_millis()
        );
        Self {
            matrix: Matrix::new(row_pins, col_pins, debouncer, config.low_active),
            classifier: PressClassifier::new(),
            timer,
            sink: None,
            config,
        }
    }

    /// Register the sink receiving classified events, replacing the previous one.
    pub fn set_event_callback(&mut self, sink: S) {
        self.sink = Some(sink);
    }

    pub fn with_event_callback(mut self, sink: S) -> Self {
        self.set_event_callback(sink);
        self
    }

    /// Reset every key and the gesture in progress, as if the keypad was just created.
    pub fn reset(&mut self) {
        self.timer.stop();
        self.matrix.reset();
        self.classifier.reset();
    }

    /// Scan one column and classify the debounced changes.
    pub fn on_scan_tick(&mut self) {
        let Self {
            matrix,
            classifier,
            timer,
            sink,
            ..
        } = self;

        matrix.scan_tick(|button, pressed| classifier.on_button(button, pressed, timer, sink));

        // Polled after the scan, a release seen on this tick has already stopped the timer
        if timer.poll_expired() {
            classifier.on_long_press_timeout(sink);
        }
    }

    /// Long press timer expiry, for timers that don't report it through `poll_expired`.
    pub fn on_long_press_timeout(&mut self) {
        self.classifier.on_long_press_timeout(&mut self.sink);
    }

    /// Scan the matrix forever, one tick every `config.scan_tick_period`.
    pub async fn run(&mut self) {
        let mut ticker = Ticker::every(self.config.scan_tick_period);
        loop {
            ticker.next().await;
            self.on_scan_tick();
        }
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    pub fn matrix(&self) -> &Matrix<In, Out, D, ROW, COL> {
        &self.matrix
    }

    pub fn classifier(&self) -> &PressClassifier {
        &self.classifier
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}

impl<In: InputPin, Out: FlexPin, S: EventSink, const ROW: usize, const COL: usize>
    Keypad<In, Out, TickDebouncer<ROW, COL>, TickTimer, S, ROW, COL>
{
    /// Create a keypad which counts both the debounce and the long press time in scan ticks.
    pub fn from_config(row_pins: [In; ROW], col_pins: [Out; COL], config: MatrixConfig) -> Self {
        Self::new(
            row_pins,
            col_pins,
            TickDebouncer::new(config.effective_debounce_threshold()),
            TickTimer::new(config.long_press_ticks()),
            config,
        )
    }
}
