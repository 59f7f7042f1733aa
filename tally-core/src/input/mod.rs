//! Keypad input handling
//!
//! Raw column masks are filtered by the debouncer, then decoded into
//! semantic key events for the expression engine.

pub mod debounce;
pub mod decoder;
pub mod event;

pub use debounce::{debounce, presses, DebounceEvent, Debouncer};
pub use decoder::{decode, key_at, KEYPAD_COLUMNS, KEYPAD_ROWS};
pub use event::{Digit, KeyEvent, Operator, TerminateKind};
