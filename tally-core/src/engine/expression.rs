//! Two-operand expression buffer
//!
//! Both operands live in one array of digit slots, operand A in the first
//! half and operand B in the second, most significant digit first. A slot
//! is `None` until a digit has been written there.

use crate::input::{Digit, Operator};

/// Digits per operand
pub const MAX_DIGITS: usize = 4;

/// Digits that may be entered into one operand
pub const MAX_MAGNITUDE: u8 = 4;

/// Total slots across both operands
pub const SLOT_COUNT: usize = 2 * MAX_DIGITS;

/// One digit position
pub type Slot = Option<Digit>;

/// Operand selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperandId {
    /// First operand, also holds results
    #[default]
    A,
    /// Second operand
    B,
}

impl OperandId {
    /// Index of the operand's first slot
    pub const fn base(self) -> usize {
        match self {
            OperandId::A => 0,
            OperandId::B => MAX_DIGITS,
        }
    }

    const fn sign_bit(self) -> u8 {
        match self {
            OperandId::A => 0x1,
            OperandId::B => 0x2,
        }
    }
}

/// Per-operand negativity bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignFlags(u8);

impl SignFlags {
    /// Check if an operand is negative
    pub fn is_negative(self, operand: OperandId) -> bool {
        self.0 & operand.sign_bit() != 0
    }

    /// Set or clear an operand's sign
    pub fn set(&mut self, operand: OperandId, negative: bool) {
        if negative {
            self.0 |= operand.sign_bit();
        } else {
            self.0 &= !operand.sign_bit();
        }
    }

    /// Raw bits (bit 0 = A, bit 1 = B)
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// The expression being entered
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Expression {
    operand: [Slot; SLOT_COUNT],
    index: usize,
    op: Option<Operator>,
    signs: SignFlags,
}

impl Default for Expression {
    fn default() -> Self {
        Self::new()
    }
}

impl Expression {
    /// Create an empty expression
    pub const fn new() -> Self {
        Self {
            operand: [None; SLOT_COUNT],
            index: 0,
            op: None,
            signs: SignFlags(0),
        }
    }

    /// Build an expression from digit values, operands left-aligned
    ///
    /// The cursor is placed after the last digit of B when an operator is
    /// given, otherwise after the last digit of A. Returns None if an
    /// operand is too long or a value is not a digit.
    pub fn from_digits(a: &[u8], op: Option<Operator>, b: &[u8]) -> Option<Self> {
        if a.len() > MAX_DIGITS || b.len() > MAX_DIGITS || (op.is_none() && !b.is_empty()) {
            return None;
        }

        let mut expr = Self::new();
        for (slot, &value) in expr.operand[..MAX_DIGITS].iter_mut().zip(a) {
            *slot = Some(Digit::new(value)?);
        }
        for (slot, &value) in expr.operand[MAX_DIGITS..].iter_mut().zip(b) {
            *slot = Some(Digit::new(value)?);
        }
        expr.op = op;
        expr.index = if op.is_some() {
            MAX_DIGITS + b.len()
        } else {
            a.len()
        };
        Some(expr)
    }

    /// Write cursor
    pub fn index(&self) -> usize {
        self.index
    }

    /// Pending operator
    pub fn operator(&self) -> Option<Operator> {
        self.op
    }

    /// Sign bits
    pub fn signs(&self) -> SignFlags {
        self.signs
    }

    /// Slots of one operand, most significant first
    pub fn slots(&self, operand: OperandId) -> [Slot; MAX_DIGITS] {
        let mut out = [None; MAX_DIGITS];
        let base = operand.base();
        out.copy_from_slice(&self.operand[base..base + MAX_DIGITS]);
        out
    }

    /// Operand the cursor is currently writing into
    ///
    /// The cursor sitting exactly on the boundary belongs to B once an
    /// operator is pending.
    pub fn cursor_operand(&self) -> OperandId {
        if self.index > MAX_DIGITS || (self.index == MAX_DIGITS && self.op.is_some()) {
            OperandId::B
        } else {
            OperandId::A
        }
    }

    /// Number of present digits in an operand
    pub fn digit_count(&self, operand: OperandId) -> u8 {
        let base = operand.base();
        self.operand[base..base + MAX_DIGITS]
            .iter()
            .filter(|slot| slot.is_some())
            .count() as u8
    }

    /// Extent of an operand: slots up to and including its last present digit
    pub fn extent(&self, operand: OperandId) -> u8 {
        let base = operand.base();
        let trailing_empty = self.operand[base..base + MAX_DIGITS]
            .iter()
            .rev()
            .take_while(|slot| slot.is_none())
            .count();
        (MAX_DIGITS - trailing_empty) as u8
    }

    /// Signed value of an operand
    ///
    /// Present digits are weighted by consecutive powers of ten from the
    /// last present digit backwards; empty slots are skipped, not read as
    /// zero.
    pub fn operand_value(&self, operand: OperandId) -> i64 {
        let base = operand.base();
        let mut value: i64 = 0;
        let mut factor: i64 = 1;
        for digit in self.operand[base..base + MAX_DIGITS].iter().rev().flatten() {
            value += i64::from(digit.value()) * factor;
            factor *= 10;
        }

        if self.signs.is_negative(operand) {
            -value
        } else {
            value
        }
    }

    /// Write a digit at the cursor and advance it
    ///
    /// Returns false without writing when the cursor is past the last slot.
    pub(crate) fn push(&mut self, digit: Digit) -> bool {
        match self.operand.get_mut(self.index) {
            Some(slot) => {
                *slot = Some(digit);
                self.index += 1;
                true
            }
            None => false,
        }
    }

    /// Step the cursor back and empty the slot it lands on
    pub(crate) fn pop(&mut self) {
        if self.index > 0 {
            self.index -= 1;
            self.operand[self.index] = None;
        }
    }

    /// Empty a single slot without moving the cursor
    pub(crate) fn clear_slot(&mut self, index: usize) {
        if let Some(slot) = self.operand.get_mut(index) {
            *slot = None;
        }
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index.min(SLOT_COUNT);
    }

    pub(crate) fn set_operator(&mut self, op: Option<Operator>) {
        self.op = op;
    }

    pub(crate) fn set_sign(&mut self, operand: OperandId, negative: bool) {
        self.signs.set(operand, negative);
    }

    /// Replace operand A with a computed result and clear everything else
    pub(crate) fn load_result(&mut self, digits: &[Slot; MAX_DIGITS], len: u8, negative: bool) {
        self.operand[..MAX_DIGITS].copy_from_slice(digits);
        self.operand[MAX_DIGITS..].fill(None);
        self.op = None;
        self.signs = SignFlags::default();
        self.signs.set(OperandId::A, negative);
        self.index = usize::from(len).min(MAX_DIGITS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: u8) -> Digit {
        Digit::new(v).unwrap()
    }

    #[test]
    fn test_empty_expression() {
        let expr = Expression::new();
        assert_eq!(expr.index(), 0);
        assert_eq!(expr.operator(), None);
        assert_eq!(expr.operand_value(OperandId::A), 0);
        assert_eq!(expr.digit_count(OperandId::B), 0);
        assert_eq!(expr.cursor_operand(), OperandId::A);
    }

    #[test]
    fn test_from_digits() {
        let expr = Expression::from_digits(&[1, 2], Some(Operator::Add), &[3]).unwrap();
        assert_eq!(expr.index(), 5);
        assert_eq!(expr.slots(OperandId::A), [Some(d(1)), Some(d(2)), None, None]);
        assert_eq!(expr.slots(OperandId::B), [Some(d(3)), None, None, None]);
        assert_eq!(expr.cursor_operand(), OperandId::B);

        assert!(Expression::from_digits(&[1, 2, 3, 4, 5], None, &[]).is_none());
        assert!(Expression::from_digits(&[1], None, &[2]).is_none());
        assert!(Expression::from_digits(&[10], None, &[]).is_none());
    }

    #[test]
    fn test_sparse_operand_value() {
        // Left-aligned partial entry reads as the digits typed
        let expr = Expression::from_digits(&[4, 2], None, &[]).unwrap();
        assert_eq!(expr.operand_value(OperandId::A), 42);

        // A hole is skipped rather than read as zero
        let mut expr = Expression::from_digits(&[4, 0, 2], None, &[]).unwrap();
        expr.clear_slot(1);
        assert_eq!(expr.operand_value(OperandId::A), 42);
    }

    #[test]
    fn test_signed_value() {
        let mut expr = Expression::from_digits(&[1, 5], Some(Operator::Add), &[7]).unwrap();
        expr.set_sign(OperandId::A, true);
        assert_eq!(expr.operand_value(OperandId::A), -15);
        assert_eq!(expr.operand_value(OperandId::B), 7);
        assert_eq!(expr.signs().bits(), 0x1);
    }

    #[test]
    fn test_push_and_pop() {
        let mut expr = Expression::new();
        assert!(expr.push(d(7)));
        assert!(expr.push(d(3)));
        assert_eq!(expr.index(), 2);
        expr.pop();
        assert_eq!(expr.index(), 1);
        assert_eq!(expr.slots(OperandId::A), [Some(d(7)), None, None, None]);

        expr.pop();
        expr.pop();
        assert_eq!(expr.index(), 0);
    }

    #[test]
    fn test_push_stops_at_end() {
        let mut expr = Expression::new();
        for _ in 0..SLOT_COUNT {
            assert!(expr.push(d(1)));
        }
        assert!(!expr.push(d(1)));
        assert_eq!(expr.index(), SLOT_COUNT);
    }

    #[test]
    fn test_extent() {
        let expr = Expression::from_digits(&[9, 9], None, &[]).unwrap();
        assert_eq!(expr.extent(OperandId::A), 2);
        assert_eq!(expr.extent(OperandId::B), 0);
    }

    #[test]
    fn test_load_result_clears_b() {
        let mut expr = Expression::from_digits(&[1, 2, 3, 4], Some(Operator::Add), &[5]).unwrap();
        expr.set_sign(OperandId::B, true);
        expr.load_result(&[Some(d(6)), Some(d(9)), None, None], 2, true);

        assert_eq!(expr.index(), 2);
        assert_eq!(expr.operator(), None);
        assert_eq!(expr.slots(OperandId::B), [None; MAX_DIGITS]);
        assert!(expr.signs().is_negative(OperandId::A));
        assert!(!expr.signs().is_negative(OperandId::B));
        assert_eq!(expr.operand_value(OperandId::A), -69);
    }
}
