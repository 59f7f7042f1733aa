//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod calculator;
pub mod diagnostics;
pub mod display;
pub mod keypad;

pub use calculator::calculator_task;
pub use display::display_task;
pub use keypad::keypad_task;
