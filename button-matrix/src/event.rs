use core::fmt;

/// Identity of a button in the matrix.
///
/// Buttons are numbered from 1, row by row: the button at `(row, col)` is `col + row * COL + 1`.
/// `ButtonId::NONE` (0) means "no button" and fills unused payload slots of a [`ButtonEvent`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(pub u8);

impl ButtonId {
    pub const NONE: ButtonId = ButtonId(0);

    /// Id of the button at `(row, col)` in a matrix with `cols` columns.
    pub const fn from_position(row: usize, col: usize, cols: usize) -> Self {
        ButtonId((col + row * cols + 1) as u8)
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Classified result of one user gesture.
///
/// Two-button variants always carry `(first pressed, second pressed)`, whatever the release order was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// A single button was released before the long press timeout
    ShortPress(ButtonId),
    /// A single button was held until the long press timeout
    LongPress(ButtonId),
    /// Two buttons were held together and one of them was released before the timeout
    MultipleShortPress(ButtonId, ButtonId),
    /// Two buttons were held together until the long press timeout
    MultipleLongPress(ButtonId, ButtonId),
    /// A third button was pressed while two were already down
    Error,
}

impl ButtonEvent {
    /// The `(button_a, button_b)` payload, unused slots are `ButtonId::NONE`.
    pub fn buttons(&self) -> (ButtonId, ButtonId) {
        match *self {
            ButtonEvent::ShortPress(a) | ButtonEvent::LongPress(a) => (a, ButtonId::NONE),
            ButtonEvent::MultipleShortPress(a, b) | ButtonEvent::MultipleLongPress(a, b) => (a, b),
            ButtonEvent::Error => (ButtonId::NONE, ButtonId::NONE),
        }
    }
}

impl fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonEvent::ShortPress(a) => write!(f, "{} was pressed for a short time!", a),
            ButtonEvent::LongPress(a) => write!(f, "{} was pressed for a long time!", a),
            ButtonEvent::MultipleShortPress(a, b) => write!(f, "{} and {} were pressed for a short time!", a, b),
            ButtonEvent::MultipleLongPress(a, b) => write!(f, "{} and {} were pressed for a long time!", a, b),
            ButtonEvent::Error => f.write_str("Too many buttons are pressed at once!"),
        }
    }
}
