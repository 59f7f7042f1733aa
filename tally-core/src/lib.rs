//! Board-agnostic core logic for the keypad calculator firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Keypad decoding and debouncing
//! - Expression engine (entry state machine, deletion, compute)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod engine;
pub mod input;

pub use engine::{Engine, EngineAction, Outcome, View};
pub use input::{decode, KeyEvent};
