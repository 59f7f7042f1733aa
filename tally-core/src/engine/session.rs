//! Entry session
//!
//! Wraps the expression with the bookkeeping needed to accept keys one at a
//! time: how many digits the current operand holds, which operand is shown,
//! and where in the entry sequence we are.

use super::action::{Rejection, View};
use super::compute::{evaluate, ComputeError, Evaluation};
use super::expression::{Expression, OperandId, MAX_DIGITS, MAX_MAGNITUDE};
use crate::config::OverflowPolicy;
use crate::input::{Digit, Operator};

/// Entry states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryState {
    /// Accepting digits for the current operand
    #[default]
    AwaitingNumber,
    /// Current operand is full, only an operator (or delete) moves on
    AwaitingOperator,
    /// A computation finished; a digit starts over, an operator chains
    Finished,
}

/// Expression plus entry progress
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntrySession {
    expr: Expression,
    magnitude: u8,
    display: OperandId,
    state: EntryState,
    fault: Option<ComputeError>,
}

impl EntrySession {
    /// Create a fresh session
    pub const fn new() -> Self {
        Self {
            expr: Expression::new(),
            magnitude: 0,
            display: OperandId::A,
            state: EntryState::AwaitingNumber,
            fault: None,
        }
    }

    /// Current expression
    pub fn expression(&self) -> &Expression {
        &self.expr
    }

    /// Digits entered into the current operand
    pub fn magnitude(&self) -> u8 {
        self.magnitude
    }

    /// Operand being rendered
    pub fn display_operand(&self) -> OperandId {
        self.display
    }

    /// Entry state
    pub fn state(&self) -> EntryState {
        self.state
    }

    /// Error left by the last failed computation
    pub fn fault(&self) -> Option<ComputeError> {
        self.fault
    }

    /// Discard everything
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Handle a digit key
    pub(crate) fn insert_digit(&mut self, digit: Digit) -> Result<(), Rejection> {
        match self.state {
            EntryState::Finished => {
                self.reset();
                self.push_digit(digit)
            }
            EntryState::AwaitingNumber => self.push_digit(digit),
            EntryState::AwaitingOperator => Err(Rejection::ExpectingOperator),
        }
    }

    fn push_digit(&mut self, digit: Digit) -> Result<(), Rejection> {
        if self.magnitude >= MAX_MAGNITUDE {
            return Err(Rejection::OperandFull);
        }

        // Leading zero: nothing to write
        if self.magnitude == 0 && digit.is_zero() {
            return Ok(());
        }

        if !self.expr.push(digit) {
            return Err(Rejection::OperandFull);
        }
        self.magnitude += 1;
        self.display = self.entry_operand();

        if self.magnitude == MAX_MAGNITUDE {
            self.state = EntryState::AwaitingOperator;
        }
        Ok(())
    }

    /// Handle an operator key
    pub(crate) fn insert_operator(&mut self, op: Operator) -> Result<(), Rejection> {
        match self.state {
            EntryState::AwaitingOperator if self.expr.operator().is_some() => {
                // B is full, swap the pending operator
                self.expr.set_operator(Some(op));
                Ok(())
            }
            EntryState::AwaitingOperator => {
                self.begin_operand_b(op);
                Ok(())
            }
            EntryState::AwaitingNumber => {
                if self.expr.operator().is_some() {
                    Err(Rejection::OperatorPending)
                } else if self.expr.digit_count(OperandId::A) == 0 {
                    Err(Rejection::EmptyOperand)
                } else {
                    self.begin_operand_b(op);
                    Ok(())
                }
            }
            EntryState::Finished => {
                if self.expr.digit_count(OperandId::A) == 0 {
                    return Err(Rejection::EmptyOperand);
                }
                // Chain onto the previous result
                self.fault = None;
                self.begin_operand_b(op);
                Ok(())
            }
        }
    }

    fn begin_operand_b(&mut self, op: Operator) {
        self.expr.set_operator(Some(op));
        self.expr.set_index(MAX_DIGITS);
        self.magnitude = 0;
        self.display = OperandId::A;
        self.state = EntryState::AwaitingNumber;
    }

    /// Handle the delete key
    pub(crate) fn delete(&mut self) {
        self.fault = None;
        let index = self.expr.index();

        if index == 0 {
            self.expr.clear_slot(0);
            self.expr.set_sign(OperandId::A, false);
            self.magnitude = 0;
            return;
        }

        if index == MAX_DIGITS && self.expr.operator().is_some() {
            // Nothing typed into B yet: cancel the operator
            self.expr.set_operator(None);
            self.expr.set_sign(OperandId::B, false);
            let extent = self.expr.extent(OperandId::A);
            self.expr.set_index(usize::from(extent));
            self.magnitude = extent;
            self.display = OperandId::A;
            self.state = if extent == MAX_MAGNITUDE {
                EntryState::AwaitingOperator
            } else {
                EntryState::AwaitingNumber
            };
            return;
        }

        self.expr.pop();
        if self.expr.index() == 0 {
            // A is empty again, so a stale result sign must not carry over
            self.expr.set_sign(OperandId::A, false);
        }
        self.magnitude = self.magnitude.saturating_sub(1);
        self.display = self.entry_operand();
        self.state = EntryState::AwaitingNumber;
    }

    /// Handle the enter key
    ///
    /// Returns None when there is nothing to compute.
    pub(crate) fn compute(
        &mut self,
        policy: OverflowPolicy,
    ) -> Option<Result<Evaluation, ComputeError>> {
        if self.state == EntryState::Finished || self.expr.operator().is_none() {
            return None;
        }

        match evaluate(&self.expr, policy) {
            Ok(eval) => {
                self.expr.load_result(&eval.digits, eval.len, eval.negative);
                self.magnitude = eval.len;
                self.display = OperandId::A;
                self.state = EntryState::Finished;
                Some(Ok(eval))
            }
            Err(e) => {
                self.reset();
                self.state = EntryState::Finished;
                self.fault = Some(e);
                Some(Err(e))
            }
        }
    }

    /// Operand to show while typing: B only once it has a digit
    fn entry_operand(&self) -> OperandId {
        if self.expr.index() > MAX_DIGITS {
            OperandId::B
        } else {
            OperandId::A
        }
    }

    /// Render the current state
    pub fn view(&self) -> View {
        let operand = self.display;
        let dot = if self.state != EntryState::Finished && self.expr.cursor_operand() == operand {
            let written = self.expr.index() - operand.base();
            written.checked_sub(1).map(|slot| slot as u8)
        } else {
            None
        };

        View {
            operand,
            slots: self.expr.slots(operand),
            dot,
            negative: self.expr.signs().is_negative(operand),
            error: self.fault.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: u8) -> Digit {
        Digit::new(v).unwrap()
    }

    fn typed(values: &[u8]) -> EntrySession {
        let mut s = EntrySession::new();
        for &v in values {
            s.insert_digit(d(v)).unwrap();
        }
        s
    }

    #[test]
    fn test_leading_zero_is_noop() {
        let mut s = EntrySession::new();
        assert_eq!(s.insert_digit(Digit::ZERO), Ok(()));
        assert_eq!(s, EntrySession::new());

        // Zero after a nonzero digit is written
        let mut s = typed(&[3]);
        s.insert_digit(Digit::ZERO).unwrap();
        assert_eq!(s.expression().operand_value(OperandId::A), 30);
    }

    #[test]
    fn test_full_operand_waits_for_operator() {
        let mut s = typed(&[1, 2, 3, 4]);
        assert_eq!(s.state(), EntryState::AwaitingOperator);
        assert_eq!(s.magnitude(), MAX_MAGNITUDE);
        assert_eq!(s.insert_digit(d(5)), Err(Rejection::ExpectingOperator));
    }

    #[test]
    fn test_operator_needs_operand_a() {
        let mut s = EntrySession::new();
        assert_eq!(
            s.insert_operator(Operator::Add),
            Err(Rejection::EmptyOperand)
        );
    }

    #[test]
    fn test_partial_operand_accepts_operator() {
        let mut s = typed(&[5]);
        s.insert_operator(Operator::Divide).unwrap();
        assert_eq!(s.expression().index(), MAX_DIGITS);
        assert_eq!(s.magnitude(), 0);
        assert_eq!(s.state(), EntryState::AwaitingNumber);
        assert_eq!(
            s.insert_operator(Operator::Add),
            Err(Rejection::OperatorPending)
        );
    }

    #[test]
    fn test_full_b_replaces_operator() {
        let mut s = typed(&[1]);
        s.insert_operator(Operator::Add).unwrap();
        for v in [2, 3, 4, 5] {
            s.insert_digit(d(v)).unwrap();
        }
        assert_eq!(s.state(), EntryState::AwaitingOperator);
        assert_eq!(s.insert_digit(d(6)), Err(Rejection::ExpectingOperator));

        s.insert_operator(Operator::Multiply).unwrap();
        assert_eq!(s.expression().operator(), Some(Operator::Multiply));
        assert_eq!(s.state(), EntryState::AwaitingOperator);
    }

    #[test]
    fn test_display_follows_operand_b() {
        let mut s = typed(&[7]);
        s.insert_operator(Operator::Add).unwrap();
        assert_eq!(s.display_operand(), OperandId::A);
        s.insert_digit(d(2)).unwrap();
        assert_eq!(s.display_operand(), OperandId::B);
        assert_eq!(s.view().slots, [Some(d(2)), None, None, None]);
    }

    #[test]
    fn test_delete_at_start_clears_sign() {
        let mut s = EntrySession::new();
        s.expr.set_sign(OperandId::A, true);
        s.delete();
        assert!(!s.expression().signs().is_negative(OperandId::A));
        assert_eq!(s.magnitude(), 0);
        assert_eq!(s.state(), EntryState::AwaitingNumber);
    }

    #[test]
    fn test_delete_cancels_operator() {
        let mut s = typed(&[4, 2]);
        s.insert_operator(Operator::Subtract).unwrap();
        s.delete();

        assert_eq!(s.expression().operator(), None);
        assert_eq!(s.expression().index(), 2);
        assert_eq!(s.magnitude(), 2);
        assert_eq!(s.state(), EntryState::AwaitingNumber);

        // Typing resumes where A left off
        s.insert_digit(d(1)).unwrap();
        assert_eq!(s.expression().operand_value(OperandId::A), 421);
    }

    #[test]
    fn test_delete_cancels_operator_on_full_a() {
        let mut s = typed(&[9, 8, 7, 6]);
        s.insert_operator(Operator::Add).unwrap();
        s.delete();
        assert_eq!(s.state(), EntryState::AwaitingOperator);
        assert_eq!(s.magnitude(), MAX_MAGNITUDE);
        assert_eq!(s.expression().index(), MAX_DIGITS);
    }

    #[test]
    fn test_delete_last_digit_of_full_a() {
        let mut s = typed(&[9, 8, 7, 6]);
        s.delete();
        assert_eq!(s.state(), EntryState::AwaitingNumber);
        assert_eq!(s.magnitude(), 3);
        assert_eq!(s.expression().operand_value(OperandId::A), 987);
    }

    #[test]
    fn test_compute_without_operator() {
        let mut s = typed(&[1, 2]);
        let before = s.clone();
        assert_eq!(s.compute(OverflowPolicy::Wrap), None);
        assert_eq!(s, before);
    }

    #[test]
    fn test_compute_loads_result() {
        let mut s = typed(&[1, 2]);
        s.insert_operator(Operator::Multiply).unwrap();
        s.insert_digit(d(3)).unwrap();
        let eval = s.compute(OverflowPolicy::Wrap).unwrap().unwrap();

        assert_eq!(eval.value, 36);
        assert_eq!(s.state(), EntryState::Finished);
        assert_eq!(s.magnitude(), 2);
        assert_eq!(s.expression().index(), 2);
        assert_eq!(s.expression().operator(), None);
        assert_eq!(s.view().dot, None);

        // Enter again does nothing
        assert_eq!(s.compute(OverflowPolicy::Wrap), None);
    }

    #[test]
    fn test_division_by_zero_resets() {
        let mut s = typed(&[5]);
        s.insert_operator(Operator::Divide).unwrap();
        s.insert_digit(Digit::ZERO).unwrap();
        assert_eq!(
            s.compute(OverflowPolicy::Wrap),
            Some(Err(ComputeError::DivisionByZero))
        );

        assert_eq!(s.state(), EntryState::Finished);
        assert_eq!(s.expression().digit_count(OperandId::A), 0);
        assert!(s.view().error);

        // Nothing to chain onto
        assert_eq!(
            s.insert_operator(Operator::Add),
            Err(Rejection::EmptyOperand)
        );

        // A digit starts over and clears the error
        s.insert_digit(d(8)).unwrap();
        assert!(!s.view().error);
        assert_eq!(s.state(), EntryState::AwaitingNumber);
    }

    #[test]
    fn test_chain_from_result() {
        let mut s = typed(&[2]);
        s.insert_operator(Operator::Add).unwrap();
        s.insert_digit(d(3)).unwrap();
        s.compute(OverflowPolicy::Wrap).unwrap().unwrap();

        s.insert_operator(Operator::Multiply).unwrap();
        s.insert_digit(d(4)).unwrap();
        let eval = s.compute(OverflowPolicy::Wrap).unwrap().unwrap();
        assert_eq!(eval.value, 20);
    }

    #[test]
    fn test_dot_tracks_last_digit() {
        let s = typed(&[1, 2, 3]);
        assert_eq!(s.view().dot, Some(2));

        let s = typed(&[1, 2, 3, 4]);
        assert_eq!(s.view().dot, Some(3));

        let mut s = typed(&[1]);
        s.insert_operator(Operator::Add).unwrap();
        // Showing A while B is being edited
        assert_eq!(s.view().dot, None);
        s.insert_digit(d(6)).unwrap();
        assert_eq!(s.view().dot, Some(0));
    }
}
