//! Expression evaluation
//!
//! Reconstructs both operands from their slots, applies the pending
//! operator and decomposes the result back into display slots.

use super::expression::{Expression, OperandId, Slot, MAX_DIGITS};
use crate::config::OverflowPolicy;
use crate::input::{Digit, Operator};

/// First magnitude that no longer fits in `MAX_DIGITS` digits
pub const DISPLAY_LIMIT: u32 = 10u32.pow(MAX_DIGITS as u32);

/// Evaluation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComputeError {
    /// Divisor evaluated to zero
    DivisionByZero,
    /// No operator is pending
    MissingOperator,
}

/// Result of evaluating an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Evaluation {
    /// Exact arithmetic result before the overflow policy
    pub value: i64,
    /// Retained digits, left-aligned, most significant first
    pub digits: [Slot; MAX_DIGITS],
    /// Number of present digits (1..=MAX_DIGITS)
    pub len: u8,
    /// Retained value is negative
    pub negative: bool,
    /// Exact result did not fit the display
    pub overflow: bool,
}

impl Evaluation {
    /// Signed value of the retained digits
    pub fn shown_value(&self) -> i64 {
        let magnitude = self
            .digits
            .iter()
            .flatten()
            .fold(0i64, |acc, d| acc * 10 + i64::from(d.value()));
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// Evaluate `A op B`
pub fn evaluate(expr: &Expression, policy: OverflowPolicy) -> Result<Evaluation, ComputeError> {
    let op = expr.operator().ok_or(ComputeError::MissingOperator)?;
    let a = expr.operand_value(OperandId::A);
    let b = expr.operand_value(OperandId::B);

    let value = apply(op, a, b)?;
    Ok(decompose(value, policy))
}

/// Apply an operator to two operand values
///
/// Division truncates toward zero with `a` as the dividend.
pub fn apply(op: Operator, a: i64, b: i64) -> Result<i64, ComputeError> {
    let value = match op {
        Operator::Add => a.checked_add(b),
        Operator::Subtract => a.checked_sub(b),
        Operator::Multiply => a.checked_mul(b),
        Operator::Divide => {
            if b == 0 {
                return Err(ComputeError::DivisionByZero);
            }
            a.checked_div(b)
        }
    };

    // Operands are bounded by the slot count, so only a zero divisor fails.
    // Anything else saturates and is flagged as overflow downstream.
    Ok(value.unwrap_or(if (a < 0) ^ (b < 0) { i64::MIN } else { i64::MAX }))
}

/// Split a value into left-aligned display digits
pub fn decompose(value: i64, policy: OverflowPolicy) -> Evaluation {
    let limit = u64::from(DISPLAY_LIMIT);
    let magnitude = value.unsigned_abs();
    let overflow = magnitude >= limit;

    let mut shown = match policy {
        OverflowPolicy::Wrap => magnitude % limit,
        OverflowPolicy::Saturate => magnitude.min(limit - 1),
    };

    let mut raw = [0u8; MAX_DIGITS];
    for place in raw.iter_mut().rev() {
        *place = (shown % 10) as u8;
        shown /= 10;
    }

    // Collapse leading zeros, keeping one digit for zero
    let start = raw
        .iter()
        .position(|&d| d != 0)
        .unwrap_or(MAX_DIGITS - 1);

    let mut digits = [None; MAX_DIGITS];
    for (slot, &d) in digits.iter_mut().zip(&raw[start..]) {
        *slot = Digit::new(d);
    }
    let len = (MAX_DIGITS - start) as u8;
    let zero = start == MAX_DIGITS - 1 && raw[start] == 0;

    Evaluation {
        value,
        digits,
        len,
        negative: value < 0 && !zero,
        overflow,
    }
}
