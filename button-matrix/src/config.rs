use embassy_time::Duration;

/// Tunable configuration of the button matrix.
///
/// The matrix dimensions are const generics of [`crate::Keypad`], everything else lives here.
/// Defaults match a 4x4 keypad scanned every 5ms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixConfig {
    /// Number of consecutive disagreeing samples required to accept a new key state.
    ///
    /// Each key is sampled once per full scan cycle, so the real debounce time is
    /// `debounce_threshold * COL * scan_tick_period`.
    pub debounce_threshold: u8,
    /// Period between two scan ticks, one column is scanned per tick
    pub scan_tick_period: Duration,
    /// How long a gesture must be held to become a long press
    pub long_press_timeout: Duration,
    /// True if a pressed key reads low, i.e. rows are pulled up and the active column is driven low
    pub low_active: bool,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            debounce_threshold: 4,
            scan_tick_period: Duration::from_millis(5),
            long_press_timeout: Duration::from_millis(1000),
            low_active: true,
        }
    }
}

impl MatrixConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce_threshold(mut self, threshold: u8) -> Self {
        self.debounce_threshold = threshold;
        self
    }

    pub fn with_scan_tick_period(mut self, period: Duration) -> Self {
        self.scan_tick_period = period;
        self
    }

    pub fn with_long_press_timeout(mut self, timeout: Duration) -> Self {
        self.long_press_timeout = timeout;
        self
    }

    pub fn with_low_active(mut self, low_active: bool) -> Self {
        self.low_active = low_active;
        self
    }

    /// Debounce threshold actually used, a zero threshold would accept every glitch.
    pub(crate) fn effective_debounce_threshold(&self) -> u8 {
        self.debounce_threshold.max(1)
    }

    /// Time a key must be stable before its new state is accepted.
    pub fn debounce_latency<const COL: usize>(&self) -> Duration {
        self.scan_tick_period * (self.effective_debounce_threshold() as u32) * (COL as u32)
    }

    /// Long press timeout expressed in scan ticks, at least one tick.
    pub fn long_press_ticks(&self) -> u32 {
        let period = self.scan_tick_period.as_ticks().max(1);
        let ticks = self.long_press_timeout.as_ticks() / period;
        (ticks as u32).max(1)
    }
}
