//! Long press timer.
//!
//! The classifier only starts and stops the timer, the expiry is delivered back to
//! [`crate::Keypad::on_long_press_timeout`]. A hardware one-shot timer does that from its own
//! interrupt handler; [`TickTimer`] instead counts scan ticks and is polled by the keypad.

/// Single-shot long press timer.
///
/// `start` always restarts the full timeout, `stop` cancels a pending expiry.
/// The timer must not fire again until it's started again.
pub trait LongPressTimer {
    fn start(&mut self);

    fn stop(&mut self);

    /// Called once per scan tick, returns true when the timer expired during this tick.
    ///
    /// Timers that deliver their expiry from an interrupt keep the default.
    fn poll_expired(&mut self) -> bool {
        false
    }
}

/// Software one-shot timer counting scan ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickTimer {
    timeout_ticks: u32,
    remaining: Option<u32>,
}

impl TickTimer {
    pub fn new(timeout_ticks: u32) -> Self {
        Self {
            timeout_ticks: timeout_ticks.max(1),
            remaining: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }
}

impl LongPressTimer for TickTimer {
    fn start(&mut self) {
        // The tick the timer is started on is polled too, it doesn't count toward the timeout
        self.remaining = Some(self.timeout_ticks.saturating_add(1));
    }

    fn stop(&mut self) {
        self.remaining = None;
    }

    fn poll_expired(&mut self) -> bool {
        match self.remaining {
            Some(1) => {
                self.remaining = None;
                true
            }
            Some(n) => {
                self.remaining = Some(n - 1);
                false
            }
            None => false,
        }
    }
}
