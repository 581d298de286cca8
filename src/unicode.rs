pub const MAX_CP: u32 = 0x10ffff;
pub const REPLACEMENT_CHARACTER: u32 = 0xfffd;

/// Formats a code point as `U+` followed by at least 4 uppercase hex digits.
/// Values above [`MAX_CP`] are formatted the same way.
pub fn cp_to_string(cp: u32) -> String {
    format!("U+{:04X}", cp)
}

/// Parses a decimal code point, or a hex one prefixed with `U+`, after
/// optional leading whitespace.
///
/// Returns the value and the number of bytes consumed, or `None` if there
/// are no digits. Values that don't fit in 32 bits saturate to `u32::MAX`.
/// Neither signs nor `0x` prefixes are accepted: "0x1" is 0 followed by "x1".
pub fn parse_cp(s: &str) -> Option<(u32, usize)> {
    let bytes = s.as_bytes();

    let mut pos = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();

    let radix = if bytes[pos..].starts_with(b"U+") {
        pos += 2;
        16
    } else {
        10
    };

    let digits_start = pos;
    let mut value = 0u32;

    while let Some(digit) = bytes.get(pos).and_then(|&b| (b as char).to_digit(radix)) {
        value = value.saturating_mul(radix).saturating_add(digit);
        pos += 1;
    }

    if pos == digits_start {
        None
    } else {
        Some((value, pos))
    }
}
