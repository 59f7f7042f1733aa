//! Expression engine
//!
//! Accepts decoded key events one at a time, builds a two-operand
//! expression, and evaluates it on Enter.

pub mod action;
pub mod compute;
pub mod expression;
pub mod machine;
pub mod session;

pub use action::{EngineAction, Outcome, Rejection, View};
pub use compute::{evaluate, ComputeError, Evaluation};
pub use expression::{Expression, OperandId, SignFlags, Slot, MAX_DIGITS, MAX_MAGNITUDE};
pub use machine::Engine;
pub use session::{EntrySession, EntryState};
