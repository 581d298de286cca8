use crate::{
    error::{FontError, FontResult},
    kerning::scale_value,
    parse_binary::{BinaryParser, FontStream},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ValueFormat(pub u16);

impl ValueFormat {
    const X_PLACEMENT: u16 = 1 << 0;
    const Y_PLACEMENT: u16 = 1 << 1;
    const X_ADVANCE: u16 = 1 << 2;
    const Y_ADVANCE: u16 = 1 << 3;
    const X_PLACEMENT_DEVICE: u16 = 1 << 4;
    const Y_PLACEMENT_DEVICE: u16 = 1 << 5;
    const X_ADVANCE_DEVICE: u16 = 1 << 6;
    const Y_ADVANCE_DEVICE: u16 = 1 << 7;

    /// Fields of a value record in the order they are stored
    const FIELDS: [u16; 8] = [
        Self::X_PLACEMENT,
        Self::Y_PLACEMENT,
        Self::X_ADVANCE,
        Self::Y_ADVANCE,
        Self::X_PLACEMENT_DEVICE,
        Self::Y_PLACEMENT_DEVICE,
        Self::X_ADVANCE_DEVICE,
        Self::Y_ADVANCE_DEVICE,
    ];

    fn has(self, field: u16) -> bool {
        self.0 & field != 0
    }

    /// A pair adjustment is plain kerning only when the first glyph's
    /// advance changes and the second glyph's doesn't.
    pub fn is_kerning(first: Self, second: Self) -> bool {
        first.has(Self::X_ADVANCE) && !second.has(Self::X_ADVANCE)
    }
}

/// Reads one value record at the cursor and returns its x advance in
/// pixels, including the device table correction for `px_size`.
///
/// Device offsets are relative to the start of the pair adjustment subtable.
pub(super) fn read_x_advance(
    stream: &mut FontStream,
    subtable_pos: usize,
    format: ValueFormat,
    scale: f32,
    px_size: i32,
) -> FontResult<i32> {
    let mut x_advance = 0;
    let mut x_advance_device = 0;

    for field in ValueFormat::FIELDS {
        if !format.has(field) {
            continue;
        }

        match field {
            ValueFormat::X_ADVANCE => x_advance = scale_value(stream.parse_i16()?, scale),
            ValueFormat::X_ADVANCE_DEVICE => x_advance_device = stream.parse_u16()?,
            _ => stream.skip(2)?,
        }
    }

    if x_advance_device != 0 {
        let resume = stream.cursor();
        stream.seek(subtable_pos + usize::from(x_advance_device))?;
        x_advance += read_device_adjustment(stream, px_size)?;
        stream.seek(resume)?;
    }

    Ok(x_advance)
}

/// Reads a device table at the cursor and returns the correction for
/// `px_size`, or 0 when the size isn't covered.
///
/// Only the packed 2, 4 and 8 bit delta formats are supported; variation
/// index tables and unknown formats yield 0.
pub(super) fn read_device_adjustment(stream: &mut FontStream, px_size: i32) -> FontResult<i32> {
    let start_size = stream.parse_u16()?;
    let end_size = stream.parse_u16()?;
    if start_size > end_size {
        return Err(FontError::stream(format!(
            "Device table start size ({}) > end size ({})",
            start_size, end_size
        )));
    }

    if px_size < i32::from(start_size) || px_size > i32::from(end_size) {
        return Ok(0);
    }

    let delta_format = stream.parse_u16()?;
    if !(1..=3).contains(&delta_format) {
        return Ok(0);
    }

    let value_bits = 1usize << delta_format;
    let values_per_word = 16 / value_bits;
    let value_index = (px_size - i32::from(start_size)) as usize;
    let word_index = value_index / values_per_word;

    stream.skip(word_index * 2)?;
    let word = usize::from(stream.parse_u16()?);

    let shift = ((word_index + 1) * values_per_word - 1 - value_index) * value_bits;
    let mask = 0xffusize >> (8 - value_bits);

    let value = ((word >> shift) & mask) as i32;
    let sign_bit = ((mask + 1) >> 1) as i32;

    Ok(if value >= sign_bit {
        value - (mask as i32 + 1)
    } else {
        value
    })
}
