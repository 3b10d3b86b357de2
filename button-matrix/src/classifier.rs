//! Press classification.
//!
//! Turns the stream of debounced press/release edges, plus the long press timeout, into one
//! [`ButtonEvent`] per gesture. The state is the list of buttons currently down (at most 3 are
//! tracked) and three flags:
//!
//! - `multiple`: the gesture is overcrowded, or its combination has already been reported
//! - `double`: exactly two buttons are down
//! - `long`: the long press timeout already fired for this gesture

use heapless::Vec;

use crate::event::{ButtonEvent, ButtonId};
use crate::sink::EventSink;
use crate::timer::LongPressTimer;

/// Maximum number of tracked buttons, the third one is only used to detect overcrowding.
pub const MAX_TRACKED_BUTTONS: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClassifierFlags {
    pub multiple: bool,
    pub double: bool,
    pub long: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PressClassifier {
    /// Buttons currently down, in press order
    pressed: Vec<ButtonId, MAX_TRACKED_BUTTONS>,
    flags: ClassifierFlags,
}

impl PressClassifier {
    pub const fn new() -> Self {
        Self {
            pressed: Vec::new(),
            flags: ClassifierFlags {
                multiple: false,
                double: false,
                long: false,
            },
        }
    }

    pub fn reset(&mut self) {
        self.pressed.clear();
        self.flags = ClassifierFlags::default();
    }

    /// Buttons currently tracked as down, in press order
    pub fn pressed(&self) -> &[ButtonId] {
        &self.pressed
    }

    pub fn flags(&self) -> ClassifierFlags {
        self.flags
    }

    /// Process a debounced edge of `button`.
    pub fn on_button(
        &mut self,
        button: ButtonId,
        pressed: bool,
        timer: &mut impl LongPressTimer,
        sink: &mut impl EventSink,
    ) {
        if pressed {
            self.on_press(button, timer, sink);
        } else {
            self.on_release(button, timer, sink);
        }
    }

    fn on_press(&mut self, button: ButtonId, timer: &mut impl LongPressTimer, sink: &mut impl EventSink) {
        match self.pressed.len() {
            0 => {
                // A new gesture starts
                timer.start();
                self.pressed.push(button).ok();
                self.flags = ClassifierFlags::default();
            }
            1 => {
                // The long press window restarts from the second press
                timer.start();
                self.pressed.push(button).ok();
                self.flags = ClassifierFlags {
                    multiple: false,
                    double: true,
                    long: false,
                };
            }
            2 => {
                timer.stop();
                warn!("Too many buttons pressed, {:?} is the third one", button);
                emit(sink, ButtonEvent::Error);
                self.pressed.push(button).ok();
                self.flags = ClassifierFlags {
                    multiple: true,
                    double: false,
                    long: false,
                };
            }
            _ => {
                self.flags.multiple = true;
            }
        }
        debug!("{:?} pressed, tracked: {:?}, flags: {:?}", button, self.pressed.as_slice(), self.flags);
    }

    fn on_release(&mut self, button: ButtonId, timer: &mut impl LongPressTimer, sink: &mut impl EventSink) {
        timer.stop();

        if !self.flags.long && !self.flags.multiple {
            if self.flags.double {
                // Guard against a second report when the other button is released
                self.flags.multiple = true;
                if let [first, second, ..] = self.pressed[..] {
                    emit(sink, ButtonEvent::MultipleShortPress(first, second));
                }
            } else if let Some(&last) = self.pressed.last() {
                emit(sink, ButtonEvent::ShortPress(last));
            }
        }

        // Buttons pressed after the third one are not tracked, releasing them removes nothing
        if let Some(idx) = self.pressed.iter().position(|&b| b == button) {
            self.pressed.remove(idx);
        }
        debug!("{:?} released, tracked: {:?}, flags: {:?}", button, self.pressed.as_slice(), self.flags);
    }

    /// Process the expiry of the long press timer.
    pub fn on_long_press_timeout(&mut self, sink: &mut impl EventSink) {
        // The timer is single-shot, a repeated expiry must not report the gesture again
        if self.flags.long || self.pressed.is_empty() {
            debug!("Ignoring long press timeout");
            return;
        }

        if !self.flags.multiple && !self.flags.double {
            emit(sink, ButtonEvent::LongPress(self.pressed[0]));
        } else if self.flags.double {
            if let [first, second, ..] = self.pressed[..] {
                emit(sink, ButtonEvent::MultipleLongPress(first, second));
            }
        }

        self.flags.long = true;
    }
}

fn emit(sink: &mut impl EventSink, event: ButtonEvent) {
    info!("Button event: {:?}", event);
    sink.emit(event);
}
