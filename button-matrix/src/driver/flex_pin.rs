use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Pin that can be switched between input and output.
///
/// Matrix columns are strobed by switching them to output for one scan tick,
/// and released to high impedance input the rest of the time.
pub trait FlexPin: ErrorType + InputPin + OutputPin {
    fn set_as_input(&mut self);

    fn set_as_output(&mut self);
}
