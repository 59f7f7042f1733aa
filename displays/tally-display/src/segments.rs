//! Seven-segment glyph encoding
//!
//! Patterns are logical (1 = lit). Bits 0-6 are segments a-g, bit 7 is the
//! decimal point and bit 9 is the shared sign indicator:
//!
//! ```text
//!    aaa
//!   f   b
//!    ggg
//!   e   c
//!    ddd  dp
//! ```

/// Segment a (top)
pub const SEG_A: u16 = 1 << 0;
/// Segment b (top right)
pub const SEG_B: u16 = 1 << 1;
/// Segment c (bottom right)
pub const SEG_C: u16 = 1 << 2;
/// Segment d (bottom)
pub const SEG_D: u16 = 1 << 3;
/// Segment e (bottom left)
pub const SEG_E: u16 = 1 << 4;
/// Segment f (top left)
pub const SEG_F: u16 = 1 << 5;
/// Segment g (middle)
pub const SEG_G: u16 = 1 << 6;
/// Decimal point
pub const SEG_DP: u16 = 1 << 7;
/// Sign indicator
pub const SIGN: u16 = 1 << 9;

/// Every bit a pattern may use
pub const PATTERN_MASK: u16 = 0xFF | SIGN;

/// Hexadecimal glyphs, segments a-g
pub const GLYPHS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71,
];

/// Code of the `E` glyph
pub const ERROR_CODE: u8 = 0xE;

/// Lit segments of one digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(u16);

impl SegmentPattern {
    /// Nothing lit
    pub const BLANK: SegmentPattern = SegmentPattern(0);

    /// Every segment, the point and the sign lit
    pub const ALL: SegmentPattern = SegmentPattern(PATTERN_MASK);

    /// Build from raw bits, dropping unused ones
    pub const fn from_bits(bits: u16) -> Self {
        SegmentPattern(bits & PATTERN_MASK)
    }

    /// Raw bits
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Segments a-g and dp, bit N = segment line N
    pub const fn segments(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Check if the decimal point is lit
    pub const fn has_dot(self) -> bool {
        self.0 & SEG_DP != 0
    }

    /// Check if the sign indicator is lit
    pub const fn has_sign(self) -> bool {
        self.0 & SIGN != 0
    }

    /// Check if nothing is lit
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }

    /// Same pattern with the sign indicator set or cleared
    pub const fn with_sign(self, sign: bool) -> Self {
        if sign {
            SegmentPattern(self.0 | SIGN)
        } else {
            SegmentPattern(self.0 & !SIGN)
        }
    }

    /// Same pattern with one segment line (0-7) switched off
    pub const fn without_segment(self, line: u8) -> Self {
        if line < 8 {
            SegmentPattern(self.0 & !(1 << line))
        } else {
            self
        }
    }
}

/// Glyph for a digit code
pub fn glyph(code: u8) -> Option<u8> {
    GLYPHS.get(usize::from(code)).copied()
}

/// Encode a digit code into a segment pattern
///
/// Codes 0-15 show their hexadecimal glyph. `None` and anything above 15
/// show nothing, and the point is forced off with them; the sign is
/// independent of the digit.
pub fn encode(code: Option<u8>, show_dot: bool, show_sign: bool) -> SegmentPattern {
    let pattern = match code.and_then(glyph) {
        Some(segments) => {
            let dot = if show_dot { SEG_DP } else { 0 };
            SegmentPattern(u16::from(segments) | dot)
        }
        None => SegmentPattern::BLANK,
    };
    pattern.with_sign(show_sign)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_glyphs() {
        assert_eq!(encode(Some(0), false, false).bits(), 0x3F);
        assert_eq!(encode(Some(1), false, false).bits(), SEG_B | SEG_C);
        assert_eq!(
            encode(Some(8), false, false).bits(),
            SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G
        );
        assert_eq!(encode(Some(9), false, false).bits(), 0x6F);
    }

    #[test]
    fn test_hex_glyphs() {
        for (code, &expected) in GLYPHS.iter().enumerate() {
            let pattern = encode(Some(code as u8), false, false);
            assert_eq!(pattern.segments(), expected, "code {code}");
        }
        assert_eq!(encode(Some(ERROR_CODE), false, false).bits(), 0x79);
    }

    #[test]
    fn test_blank_forces_dot_off() {
        assert_eq!(encode(None, true, false), SegmentPattern::BLANK);
        assert_eq!(encode(Some(16), true, false), SegmentPattern::BLANK);
        assert_eq!(encode(Some(255), false, false), SegmentPattern::BLANK);
    }

    #[test]
    fn test_dot_and_sign() {
        let p = encode(Some(3), true, true);
        assert!(p.has_dot());
        assert!(p.has_sign());
        assert_eq!(p.segments(), 0x4F | 0x80);

        // Sign stays with a blank digit
        let p = encode(None, true, true);
        assert!(p.has_sign());
        assert!(!p.has_dot());
    }

    #[test]
    fn test_without_segment() {
        let p = SegmentPattern::ALL.without_segment(0);
        assert_eq!(p.segments(), 0xFE);
        assert!(p.has_sign());
        assert_eq!(p.without_segment(9), p);
    }

    #[test]
    fn test_from_bits_masks() {
        assert_eq!(SegmentPattern::from_bits(0xFFFF), SegmentPattern::ALL);
        assert!(SegmentPattern::from_bits(1 << 8).is_blank());
    }
}
