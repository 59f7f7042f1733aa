//! Seven-segment display support for Tally
//!
//! This crate provides:
//! - `encode` from a digit code to a `SegmentPattern`
//! - `Frame`, the four patterns shown at once, built from an engine `View`
//! - `SegmentDriver` trait and `MultiplexedDisplay`, its GPIO implementation
//!
//! # Architecture
//!
//! The four digits share their segment and sign lines; each digit has its
//! own select line. The refresh loop drives one digit at a time and holds
//! it for the configured time, cycling fast enough that all four appear lit.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod frame;
pub mod segments;

// Re-export key types
pub use backend::{MultiplexedDisplay, SegmentDriver, SEGMENT_LINES};
pub use frame::{Frame, DIGIT_COUNT};
pub use segments::{encode, SegmentPattern};
