//! Engine results handed back to the caller

use super::compute::ComputeError;
use super::expression::{OperandId, Slot, MAX_DIGITS};
use crate::input::TerminateKind;

/// Why an input was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rejection {
    /// The operand being entered already holds its maximum digits
    OperandFull,
    /// A full operand is waiting for an operator
    ExpectingOperator,
    /// Operator pressed before any digit of operand A
    EmptyOperand,
    /// An operator is already pending
    OperatorPending,
}

/// What happened to a submitted event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// The event changed (or deliberately kept) the entry
    Accepted,
    /// The event means nothing in the current state
    Ignored,
    /// The event was refused
    Rejected(Rejection),
    /// Enter produced a result, now held in operand A
    Computed {
        /// Exact result before the overflow policy
        value: i64,
        /// Result did not fit the display
        overflow: bool,
    },
    /// Enter failed and the expression was discarded
    Failed(ComputeError),
    /// A termination chord ended the session
    Terminated(TerminateKind),
}

impl Outcome {
    /// Check if the session should end
    pub fn is_terminated(&self) -> bool {
        matches!(self, Outcome::Terminated(_))
    }
}

/// What the display should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct View {
    /// Operand being rendered
    pub operand: OperandId,
    /// Its slots, most significant first
    pub slots: [Slot; MAX_DIGITS],
    /// Slot of the most recently entered digit, while that operand is edited
    pub dot: Option<u8>,
    /// Rendered operand is negative
    pub negative: bool,
    /// Last computation failed
    pub error: bool,
}

impl View {
    /// Nothing entered
    pub const fn empty() -> Self {
        Self {
            operand: OperandId::A,
            slots: [None; MAX_DIGITS],
            dot: None,
            negative: false,
            error: false,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::empty()
    }
}

/// Outcome of one event plus the view to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineAction {
    /// What happened
    pub outcome: Outcome,
    /// What to show
    pub view: View,
}
