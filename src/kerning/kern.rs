use crate::{
    error::{FontError, FontResult},
    parse_binary::{BinaryParser, FontStream},
    sfnt::{TableDirectory, TableTag},
};

use super::{scale_value, KerningParams, RawKerningPair};

struct Coverage(u16);

impl Coverage {
    const HORIZONTAL: u16 = 1 << 0;
    const MINIMUM: u16 = 1 << 1;
    const CROSS_STREAM: u16 = 1 << 2;

    /// Horizontal kerning values in the direction of the text, stored as a
    /// format 0 pair list. This is also the only layout Windows accepts.
    fn is_supported(&self) -> bool {
        self.0 & Self::HORIZONTAL != 0
            && self.0 & Self::MINIMUM == 0
            && self.0 & Self::CROSS_STREAM == 0
            && self.format() == 0
    }

    fn format(&self) -> u16 {
        self.0 >> 8
    }
}

/// <https://www.microsoft.com/typography/otspec/kern.htm>
///
/// Unsupported table versions and subtables are skipped without an error.
pub fn read_kerning_pairs_kern(
    stream: &mut FontStream,
    directory: &TableDirectory,
    params: KerningParams,
) -> FontResult<Vec<RawKerningPair>> {
    let table_offset = match directory.find_table_offset(TableTag::KERN) {
        Some(offset) => offset as usize,
        None => return Ok(Vec::new()),
    };

    stream.seek(table_offset)?;

    let version = stream.parse_u16()?;
    if version != 0 {
        log::debug!("ignoring \"kern\" table version {}", version);
        return Ok(Vec::new());
    }

    let num_tables = stream.parse_u16()?;
    if num_tables == 0 {
        return Err(FontError::stream("\"kern\" table has no subtables"));
    }

    let scale = params.scale();

    let mut pairs = Vec::new();
    let mut next_pos = stream.cursor();

    for _ in 0..num_tables {
        // version
        stream.skip(2)?;
        let length = stream.parse_u16()?;
        let coverage = Coverage(stream.parse_u16()?);

        next_pos += usize::from(length);

        if !coverage.is_supported() {
            log::debug!(
                "skipping \"kern\" subtable with coverage 0x{:04x}",
                coverage.0
            );
            stream.seek(next_pos)?;
            continue;
        }

        let num_pairs = stream.parse_u16()?;
        // searchRange, entrySelector, rangeShift
        stream.skip(3 * 2)?;

        pairs.reserve(usize::from(num_pairs));

        // Some Windows fonts list the same pair twice in a row
        let mut prev = None;

        for _ in 0..num_pairs {
            let glyph_idx1 = stream.parse_u16()?;
            let glyph_idx2 = stream.parse_u16()?;
            let amount = stream.parse_i16()?;

            if prev == Some((glyph_idx1, glyph_idx2)) {
                continue;
            }
            prev = Some((glyph_idx1, glyph_idx2));

            let amount = scale_value(amount, scale);
            if amount == 0 {
                continue;
            }

            pairs.push(RawKerningPair::new(glyph_idx1, glyph_idx2, amount));
        }
    }

    Ok(pairs)
}
