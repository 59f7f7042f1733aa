//! Tally Hardware Abstraction Layer
//!
//! This crate defines the pin-level traits the calculator is written
//! against, and the keypad matrix scanner built on top of them. Boards
//! provide the pins; anything implementing the `embedded-hal` 1.0 digital
//! traits can be wrapped with [`compat::EhOutput`] and [`compat::EhInput`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (tally-firmware)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tally-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal 1.0 pins (embassy-rp)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`keypad::KeypadScanner`] - Row-at-a-time keypad matrix scanning

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod gpio;
pub mod keypad;

// Re-export key traits at crate root for convenience
pub use compat::{EhInput, EhOutput};
pub use gpio::{InputPin, OutputPin};
pub use keypad::{KeypadScanner, MatrixKeypad, MATRIX_COLUMNS, MATRIX_ROWS};
