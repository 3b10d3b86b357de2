//! Button matrix input pipeline for microcontrollers.
//!
//! The matrix is scanned one column per tick, each key is debounced by counting consecutive
//! samples, and the debounced press/release edges are classified into [`ButtonEvent`]s: short
//! press, long press, two-button combinations, and an error when too many buttons are pressed.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod channel;
pub mod classifier;
pub mod config;
pub mod debounce;
pub mod driver;
pub mod event;
pub mod keypad;
pub mod matrix;
pub mod sink;
pub mod timer;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

pub use channel::BUTTON_EVENT_CHANNEL;
pub use config::MatrixConfig;
pub use event::{ButtonEvent, ButtonId};
pub use keypad::Keypad;
pub use sink::{EventSink, EventSlot};
pub use timer::{LongPressTimer, TickTimer};

pub(crate) type RawMutex = CriticalSectionRawMutex;

/// Capacity of [`BUTTON_EVENT_CHANNEL`]
pub const EVENT_CHANNEL_SIZE: usize = 8;
