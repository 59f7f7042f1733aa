//! Display frames
//!
//! A frame holds one pattern per select line. Position 0 is the rightmost
//! digit; operand slots are most significant first, so position `p` shows
//! slot `DIGIT_COUNT - 1 - p`.

use tally_core::engine::{View, MAX_DIGITS};

use crate::segments::{encode, SegmentPattern, ERROR_CODE};

/// Digits on the display
pub const DIGIT_COUNT: usize = MAX_DIGITS;

/// Patterns for all digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    patterns: [SegmentPattern; DIGIT_COUNT],
}

impl Frame {
    /// All digits dark
    pub const fn blank() -> Self {
        Self {
            patterns: [SegmentPattern::BLANK; DIGIT_COUNT],
        }
    }

    /// Every segment of every digit lit
    pub const fn all_lit() -> Self {
        Self {
            patterns: [SegmentPattern::ALL; DIGIT_COUNT],
        }
    }

    /// The same pattern on every digit
    pub const fn filled(pattern: SegmentPattern) -> Self {
        Self {
            patterns: [pattern; DIGIT_COUNT],
        }
    }

    /// `E` on the rightmost digit
    pub fn error() -> Self {
        let mut frame = Self::blank();
        frame.patterns[0] = encode(Some(ERROR_CODE), false, false);
        frame
    }

    /// Frame from digit codes written left to right
    pub fn from_codes(codes: [Option<u8>; DIGIT_COUNT]) -> Self {
        let mut frame = Self::blank();
        for (slot, code) in codes.into_iter().enumerate() {
            frame.patterns[DIGIT_COUNT - 1 - slot] = encode(code, false, false);
        }
        frame
    }

    /// One pattern on one position, the rest dark
    pub fn single(position: usize, pattern: SegmentPattern) -> Self {
        let mut frame = Self::blank();
        if let Some(p) = frame.patterns.get_mut(position) {
            *p = pattern;
        }
        frame
    }

    /// Frame for what the engine wants shown
    pub fn from_view(view: &View) -> Self {
        if view.error {
            return Self::error();
        }

        let mut frame = Self::blank();
        for (position, pattern) in frame.patterns.iter_mut().enumerate() {
            let slot = DIGIT_COUNT - 1 - position;
            let code = view.slots[slot].map(|d| d.value());
            let dot = view.dot == Some(slot as u8);
            *pattern = encode(code, dot, view.negative);
        }
        frame
    }

    /// Pattern at a select position
    pub fn pattern(&self, position: usize) -> SegmentPattern {
        self.patterns
            .get(position)
            .copied()
            .unwrap_or(SegmentPattern::BLANK)
    }

    /// Patterns by select position
    pub fn patterns(&self) -> &[SegmentPattern; DIGIT_COUNT] {
        &self.patterns
    }

    /// Same frame with the sign indicator on every digit set or cleared
    pub fn with_sign(mut self, sign: bool) -> Self {
        for p in self.patterns.iter_mut() {
            *p = p.with_sign(sign);
        }
        self
    }
}

impl From<&View> for Frame {
    fn from(view: &View) -> Self {
        Frame::from_view(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::engine::OperandId;
    use tally_core::input::{Digit, KeyEvent};
    use tally_core::Engine;

    fn view_of(keys: &[KeyEvent]) -> View {
        let mut engine = Engine::default();
        let mut view = engine.view();
        for &k in keys {
            view = engine.submit(k).view;
        }
        view
    }

    #[test]
    fn test_empty_view_is_blank() {
        assert_eq!(Frame::from_view(&View::empty()), Frame::blank());
    }

    #[test]
    fn test_position_maps_to_reversed_slot() {
        let view = View {
            operand: OperandId::A,
            slots: [
                Digit::new(1),
                Digit::new(2),
                Digit::new(3),
                Digit::new(4),
            ],
            dot: None,
            negative: false,
            error: false,
        };
        let frame = Frame::from_view(&view);
        assert_eq!(frame.pattern(3), encode(Some(1), false, false));
        assert_eq!(frame.pattern(0), encode(Some(4), false, false));
    }

    #[test]
    fn test_dot_on_last_entered_digit() {
        let view = view_of(&[KeyEvent::digit(4), KeyEvent::digit(2)]);
        let frame = Frame::from_view(&view);

        // "42" is left-aligned: slots 0 and 1 sit on positions 3 and 2
        assert_eq!(frame.pattern(3), encode(Some(4), false, false));
        assert_eq!(frame.pattern(2), encode(Some(2), true, false));
        assert!(frame.pattern(1).is_blank());
        assert!(frame.pattern(0).is_blank());
    }

    #[test]
    fn test_negative_lights_sign_everywhere() {
        let view = view_of(&[
            KeyEvent::digit(2),
            KeyEvent::Operator(tally_core::input::Operator::Subtract),
            KeyEvent::digit(5),
            KeyEvent::Enter,
        ]);
        let frame = Frame::from_view(&view);
        assert!(frame.patterns().iter().all(|p| p.has_sign()));
        assert_eq!(frame.pattern(3).segments(), 0x4F);
    }

    #[test]
    fn test_error_view() {
        let view = view_of(&[
            KeyEvent::digit(5),
            KeyEvent::Operator(tally_core::input::Operator::Divide),
            KeyEvent::digit(0),
            KeyEvent::Enter,
        ]);
        assert_eq!(Frame::from(&view), Frame::error());
        assert_eq!(Frame::error().pattern(0).bits(), 0x79);
    }

    #[test]
    fn test_from_codes_reads_left_to_right() {
        let frame = Frame::from_codes([Some(1), Some(3), Some(3), Some(7)]);
        assert_eq!(frame.pattern(3), encode(Some(1), false, false));
        assert_eq!(frame.pattern(0), encode(Some(7), false, false));
    }

    #[test]
    fn test_single_and_bounds() {
        let frame = Frame::single(1, SegmentPattern::ALL);
        assert_eq!(frame.pattern(1), SegmentPattern::ALL);
        assert!(frame.pattern(0).is_blank());
        assert!(frame.pattern(9).is_blank());
        assert_eq!(Frame::single(9, SegmentPattern::ALL), Frame::blank());
    }

    #[test]
    fn test_filled() {
        let p = SegmentPattern::ALL.without_segment(6);
        assert!(Frame::filled(p).patterns().iter().all(|&q| q == p));
        assert_eq!(Frame::filled(SegmentPattern::ALL), Frame::all_lit());
    }

    #[test]
    fn test_with_sign() {
        let frame = Frame::blank().with_sign(true);
        assert!(frame.patterns().iter().all(|p| p.has_sign()));
        assert_eq!(frame.with_sign(false), Frame::blank());
    }
}
