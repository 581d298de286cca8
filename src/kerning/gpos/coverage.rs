use crate::{
    error::{FontError, FontResult},
    parse_binary::{BinaryParser, FontStream},
};

/// Reads a coverage table at the cursor, expanding ranges into glyph ids.
///
/// The result keeps the table's order, which is also coverage index order.
pub(super) fn read_coverage_table(stream: &mut FontStream) -> FontResult<Vec<u16>> {
    let format = stream.parse_u16()?;

    match format {
        1 => {
            let glyph_count = stream.parse_u16()?;
            let mut glyphs = Vec::with_capacity(usize::from(glyph_count));

            for _ in 0..glyph_count {
                glyphs.push(stream.parse_u16()?);
            }

            Ok(glyphs)
        }
        2 => {
            let range_count = stream.parse_u16()?;
            let mut glyphs = Vec::new();

            for _ in 0..range_count {
                let start_glyph_id = stream.parse_u16()?;
                let end_glyph_id = stream.parse_u16()?;
                // startCoverageIndex
                stream.skip(2)?;

                if start_glyph_id > end_glyph_id {
                    return Err(FontError::stream(format!(
                        "Coverage table format 2 range start id ({}) > end id ({})",
                        start_glyph_id, end_glyph_id
                    )));
                }

                glyphs.extend(start_glyph_id..=end_glyph_id);
            }

            Ok(glyphs)
        }
        _ => Err(FontError::stream(format!(
            "Unknown format of coverage table: {}",
            format
        ))),
    }
}
