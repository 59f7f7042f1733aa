//! Keypad coordinate decoding
//!
//! Physical layout as seen from the front, rows scanned top to bottom and
//! columns numbered by their bit in the column mask:
//!
//! ```text
//!            col 0   col 1   col 2   col 3
//! row 0        /       +       0       -
//! row 1        *       9       8       7
//! row 2       DEL      6       5       4
//! row 3      ENTER     3       2       1
//! ```
//!
//! Row 3 additionally carries the two termination chords: columns 0, 1 and
//! 3 together end the calculator session, columns 0, 2 and 3 together end
//! the diagnostics session.

use super::event::{Digit, KeyEvent, Operator, TerminateKind};

/// Number of keypad rows
pub const KEYPAD_ROWS: u8 = 4;

/// Number of keypad columns
pub const KEYPAD_COLUMNS: u8 = 4;

/// Mask covering every column bit
pub const COLUMN_MASK: u8 = (1 << KEYPAD_COLUMNS) - 1;

/// Row carrying the termination chords
pub const TERMINATION_ROW: u8 = 3;

/// Column mask of the chord that ends the calculator session
pub const TERMINATE_NORMAL_MASK: u8 = 0b1011;

/// Column mask of the chord that ends the diagnostics session
pub const TERMINATE_TEST_MASK: u8 = 0b1101;

/// Decode a raw keypad coordinate into a key event
///
/// - `row`: scanned row (0-3); anything else decodes to `KeyEvent::None`
/// - `column_mask`: asserted columns, bit N = column N (upper bits ignored)
pub fn decode(row: u8, column_mask: u8) -> KeyEvent {
    let mask = column_mask & COLUMN_MASK;

    if row >= KEYPAD_ROWS || mask == 0 {
        return KeyEvent::None;
    }

    if row == TERMINATION_ROW {
        match mask {
            TERMINATE_NORMAL_MASK => return KeyEvent::Terminate(TerminateKind::Normal),
            TERMINATE_TEST_MASK => return KeyEvent::Terminate(TerminateKind::Test),
            _ => {}
        }
    }

    if has_adjacent_columns(mask) {
        return KeyEvent::Chord(mask);
    }

    match lowest_column(mask) {
        Some(col) => key_at(row, col),
        None => KeyEvent::None,
    }
}

/// Key at a single (row, column) position of the layout
pub fn key_at(row: u8, col: u8) -> KeyEvent {
    if row >= KEYPAD_ROWS || col >= KEYPAD_COLUMNS {
        return KeyEvent::None;
    }

    match row * KEYPAD_COLUMNS + col {
        0x0 => KeyEvent::Operator(Operator::Divide),
        0x1 => KeyEvent::Operator(Operator::Add),
        0x3 => KeyEvent::Operator(Operator::Subtract),
        0x4 => KeyEvent::Operator(Operator::Multiply),
        0x8 => KeyEvent::Delete,
        0xC => KeyEvent::Enter,
        0x2 => KeyEvent::Digit(Digit::ZERO),
        _ => KeyEvent::digit((3 - row) * 3 + (4 - col)),
    }
}

/// Index of the lowest asserted column
pub fn lowest_column(mask: u8) -> Option<u8> {
    let mask = mask & COLUMN_MASK;
    if mask == 0 {
        None
    } else {
        Some(mask.trailing_zeros() as u8)
    }
}

/// Check if two neighbouring columns are asserted at once
pub fn has_adjacent_columns(mask: u8) -> bool {
    let mask = mask & COLUMN_MASK;
    mask & (mask >> 1) != 0
}

/// Check if more than one column is asserted
pub fn is_multi_column(mask: u8) -> bool {
    (mask & COLUMN_MASK).count_ones() > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(v: u8) -> KeyEvent {
        KeyEvent::Digit(Digit::new(v).unwrap())
    }

    #[test]
    fn test_full_layout() {
        let expected = [
            [
                KeyEvent::Operator(Operator::Divide),
                KeyEvent::Operator(Operator::Add),
                digit(0),
                KeyEvent::Operator(Operator::Subtract),
            ],
            [KeyEvent::Operator(Operator::Multiply), digit(9), digit(8), digit(7)],
            [KeyEvent::Delete, digit(6), digit(5), digit(4)],
            [KeyEvent::Enter, digit(3), digit(2), digit(1)],
        ];

        for row in 0..KEYPAD_ROWS {
            for col in 0..KEYPAD_COLUMNS {
                let event = decode(row, 1 << col);
                assert_eq!(event, expected[row as usize][col as usize], "row {row} col {col}");
            }
        }
    }

    #[test]
    fn test_every_digit_has_exactly_one_key() {
        let mut seen = [0u8; 10];
        for row in 0..KEYPAD_ROWS {
            for col in 0..KEYPAD_COLUMNS {
                if let KeyEvent::Digit(d) = key_at(row, col) {
                    seen[d.value() as usize] += 1;
                }
            }
        }
        assert_eq!(seen, [1; 10]);
    }

    #[test]
    fn test_no_press() {
        for row in 0..KEYPAD_ROWS {
            assert_eq!(decode(row, 0), KeyEvent::None);
        }
    }

    #[test]
    fn test_termination_chords() {
        assert_eq!(
            decode(3, TERMINATE_NORMAL_MASK),
            KeyEvent::Terminate(TerminateKind::Normal)
        );
        assert_eq!(
            decode(3, TERMINATE_TEST_MASK),
            KeyEvent::Terminate(TerminateKind::Test)
        );

        // Same masks on other rows are ordinary chords
        assert_eq!(decode(0, TERMINATE_NORMAL_MASK), KeyEvent::Chord(0b1011));
        assert_eq!(decode(2, TERMINATE_TEST_MASK), KeyEvent::Chord(0b1101));
    }

    #[test]
    fn test_adjacent_chord_passthrough() {
        assert_eq!(decode(1, 0b0011), KeyEvent::Chord(0b0011));
        assert_eq!(decode(2, 0b0110), KeyEvent::Chord(0b0110));
        assert_eq!(decode(0, 0b1111), KeyEvent::Chord(0b1111));
    }

    #[test]
    fn test_split_chord_uses_lowest_column() {
        // Columns 0 and 2 on row 3: lowest is ENTER
        assert_eq!(decode(3, 0b0101), KeyEvent::Enter);
        // Columns 1 and 3 on row 1: lowest is 9
        assert_eq!(decode(1, 0b1010), digit(9));
    }

    #[test]
    fn test_out_of_range_inputs() {
        assert_eq!(decode(4, 0b0001), KeyEvent::None);
        assert_eq!(decode(255, 0b0001), KeyEvent::None);
        // Upper bits are not columns
        assert_eq!(decode(0, 0xF0), KeyEvent::None);
        assert_eq!(decode(3, 0x18), digit(1));
        assert_eq!(key_at(0, 4), KeyEvent::None);
    }

    #[test]
    fn test_mask_helpers() {
        assert_eq!(lowest_column(0b1000), Some(3));
        assert_eq!(lowest_column(0), None);
        assert!(has_adjacent_columns(0b1100));
        assert!(!has_adjacent_columns(0b1010));
        assert!(is_multi_column(0b1010));
        assert!(!is_multi_column(0b0100));
    }
}
