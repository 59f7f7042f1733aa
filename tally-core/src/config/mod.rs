//! Configuration types
//!
//! Board-agnostic configuration structures for debounce, scanning,
//! display multiplexing and engine policy, plus the reader for the
//! firmware's embedded TOML file.

pub mod parser;
pub mod types;

pub use parser::{parse_config, ParseError};
pub use types::*;
