//! Traits for the pins the matrix drives.

pub mod flex_pin;
