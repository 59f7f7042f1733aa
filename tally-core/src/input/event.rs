//! Semantic key events produced by the keypad decoder

/// A decimal digit, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    /// The digit zero
    pub const ZERO: Digit = Digit(0);

    /// Create a digit, returning None for values above 9
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Digit(value))
        } else {
            None
        }
    }

    /// Numeric value of the digit
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Check if this is the digit zero
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Arithmetic operator glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/` (integer division, truncating toward zero)
    Divide,
}

impl Operator {
    /// ASCII glyph for this operator
    pub fn glyph(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Parse an operator from its ASCII glyph
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }
}

/// Which termination chord was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TerminateKind {
    /// End the calculator session (row 3, columns 0b1011)
    Normal,
    /// End or enter the diagnostics session (row 3, columns 0b1101)
    Test,
}

/// Semantic input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEvent {
    /// Nothing pressed
    None,
    /// Digit key
    Digit(Digit),
    /// Operator key
    Operator(Operator),
    /// Enter (evaluate) key
    Enter,
    /// Delete last entry key
    Delete,
    /// Termination chord
    Terminate(TerminateKind),
    /// Adjacent multi-key contact, raw column mask passed through undecoded
    Chord(u8),
}

impl KeyEvent {
    /// Shorthand for a digit event; values above 9 yield `KeyEvent::None`
    pub fn digit(value: u8) -> Self {
        Digit::new(value).map_or(KeyEvent::None, KeyEvent::Digit)
    }

    /// Check if this event carries no input
    pub fn is_none(&self) -> bool {
        matches!(self, KeyEvent::None)
    }

    /// Check if this event ends a session
    pub fn is_terminate(&self) -> bool {
        matches!(self, KeyEvent::Terminate(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_range() {
        assert_eq!(Digit::new(0), Some(Digit::ZERO));
        assert_eq!(Digit::new(9).map(Digit::value), Some(9));
        assert_eq!(Digit::new(10), None);
        assert_eq!(Digit::new(255), None);
    }

    #[test]
    fn test_operator_glyphs() {
        for op in [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
        ] {
            assert_eq!(Operator::from_glyph(op.glyph()), Some(op));
        }
        assert_eq!(Operator::from_glyph('='), None);
    }

    #[test]
    fn test_digit_shorthand() {
        assert_eq!(KeyEvent::digit(7), KeyEvent::Digit(Digit::new(7).unwrap()));
        assert!(KeyEvent::digit(12).is_none());
        assert!(KeyEvent::Terminate(TerminateKind::Test).is_terminate());
    }
}
