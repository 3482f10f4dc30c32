//! Low-level mask and shift utilities for words of up to 64 bits.
//!
//! Bits are addressed LSB-first: bit 0 is the least significant bit of the word.

/// Mask literals are never printed with fewer hex digits than this.
pub const MIN_MASK_DIGITS: usize = 5;

/// Number of bits in the inclusive range `high..=low`.
pub fn span_width(high: u32, low: u32) -> u32 {
    high - low + 1
}

/// Returns a mask with ones at bits `low..=high`. Requires `low <= high < 64`.
pub fn mask(high: u32, low: u32) -> u64 {
    let width = span_width(high, low);
    let ones = if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    };

    ones << low
}

/// Renders a mask as lowercase hex with at least one leading zero digit,
/// padded to [MIN_MASK_DIGITS] digits.
pub fn format_mask(mask: u64) -> String {
    let digits = format!("{mask:x}").len();
    let width = (digits + 1).max(MIN_MASK_DIGITS);

    format!("0x{mask:0width$x}")
}

/// Shifts `word` right by a positive `shift`, left by a negative one.
/// Bits shifted past either end are lost.
pub fn shift_word(word: u64, shift: i64) -> u64 {
    let amount = u32::try_from(shift.unsigned_abs()).unwrap_or(u32::MAX);

    if shift >= 0 {
        word.checked_shr(amount).unwrap_or(0)
    } else {
        word.checked_shl(amount).unwrap_or(0)
    }
}

/// Parses a bit position written as plain decimal digits. Signs, spaces and
/// other prefixes that `str::parse` would accept are rejected.
pub fn parse_bit(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    text.parse().ok()
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
pub fn sign_extend(value: u64, bits: u32) -> i64 {
    if bits == 0 || bits >= 64 {
        return value as i64;
    }

    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask(4, 0), 0x1f);
        assert_eq!(mask(11, 5), 0xfe0);
        assert_eq!(mask(0, 0), 1);
        assert_eq!(mask(63, 0), u64::MAX);
        assert_eq!(mask(63, 63), 1 << 63);
    }

    #[test]
    fn test_format_mask_pads_to_minimum() {
        assert_eq!(format_mask(0x1f), "0x0001f");
        assert_eq!(format_mask(0xfe0), "0x00fe0");
        assert_eq!(format_mask(0x1), "0x00001");
    }

    #[test]
    fn test_format_mask_keeps_leading_zero_on_wide_masks() {
        assert_eq!(format_mask(0xfff00000), "0x0fff00000");
        assert_eq!(format_mask(0x7fe00), "0x07fe00");
    }

    #[test]
    fn test_shift_word() {
        assert_eq!(shift_word(0xf0, 4), 0xf);
        assert_eq!(shift_word(0xf, -4), 0xf0);
        assert_eq!(shift_word(0xf, 0), 0xf);
        assert_eq!(shift_word(1, 64), 0);
        assert_eq!(shift_word(1, -64), 0);
    }

    #[test]
    fn test_parse_bit() {
        assert_eq!(parse_bit("0"), Some(0));
        assert_eq!(parse_bit("31"), Some(31));
        assert_eq!(parse_bit("+4"), None);
        assert_eq!(parse_bit("-1"), None);
        assert_eq!(parse_bit(""), None);
        assert_eq!(parse_bit("0x1f"), None);
        assert_eq!(parse_bit("99999999999"), None);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0xfff, 12), -1);
        assert_eq!(sign_extend(0x800, 12), -2048);
        assert_eq!(sign_extend(0x7ff, 12), 2047);
        assert_eq!(sign_extend(0xff, 64), 0xff);
    }
}
