//! Keypad matrix scanning
//!
//! The keypad is a 4x4 matrix: one row is selected at a time and the four
//! column lines are read back as a mask, bit N = column N.

use crate::gpio::{InputPin, OutputPin};

/// Rows in the matrix
pub const MATRIX_ROWS: usize = 4;

/// Columns in the matrix
pub const MATRIX_COLUMNS: usize = 4;

/// Row-at-a-time keypad access
///
/// Callers that need a settling delay between selecting a row and reading
/// its columns call [`select_row`](Self::select_row) and
/// [`read_columns`](Self::read_columns) separately.
pub trait KeypadScanner {
    /// Select a row; an out-of-range row deselects all of them
    fn select_row(&mut self, row: u8);

    /// Read the asserted columns of the selected row
    ///
    /// Returns 0 when no row is selected.
    fn read_columns(&mut self) -> u8;

    /// Deselect every row
    fn release(&mut self);

    /// Select a row and read its columns immediately
    fn scan(&mut self, row: u8) -> u8 {
        self.select_row(row);
        self.read_columns()
    }
}

/// Keypad matrix on plain GPIO
///
/// With `active_low` set, the selected row is driven low, idle rows are
/// driven high, and a pressed key pulls its column low against the pull-up.
/// Otherwise everything is the other way round.
pub struct MatrixKeypad<R, C> {
    rows: [R; MATRIX_ROWS],
    columns: [C; MATRIX_COLUMNS],
    active_low: bool,
    selected: Option<u8>,
}

impl<R: OutputPin, C: InputPin> MatrixKeypad<R, C> {
    /// Create a scanner with every row deselected
    pub fn new(rows: [R; MATRIX_ROWS], columns: [C; MATRIX_COLUMNS], active_low: bool) -> Self {
        let mut keypad = Self {
            rows,
            columns,
            active_low,
            selected: None,
        };
        keypad.release();
        keypad
    }

    /// Currently selected row
    pub fn selected(&self) -> Option<u8> {
        self.selected
    }
}

impl<R: OutputPin, C: InputPin> KeypadScanner for MatrixKeypad<R, C> {
    fn select_row(&mut self, row: u8) {
        if usize::from(row) >= MATRIX_ROWS {
            self.release();
            return;
        }

        for (i, pin) in self.rows.iter_mut().enumerate() {
            let selected = i == usize::from(row);
            pin.set_state(selected != self.active_low);
        }
        self.selected = Some(row);
    }

    fn read_columns(&mut self) -> u8 {
        if self.selected.is_none() {
            return 0;
        }

        let active_low = self.active_low;
        self.columns
            .iter_mut()
            .enumerate()
            .fold(0u8, |mask, (i, pin)| {
                if pin.is_high() != active_low {
                    mask | (1 << i)
                } else {
                    mask
                }
            })
    }

    fn release(&mut self) {
        let idle = self.active_low;
        for pin in self.rows.iter_mut() {
            pin.set_state(idle);
        }
        self.selected = None;
    }
}
