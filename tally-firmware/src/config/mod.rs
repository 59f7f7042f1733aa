//! Configuration loading
//!
//! The calculator settings are compiled in from `calculator.toml` and parsed
//! at boot by the `tally-core` reader.

pub mod loader;

pub use loader::load;
