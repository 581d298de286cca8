use crate::{
    error::{FontError, FontResult},
    kerning::RawKerningPair,
    parse_binary::{BinaryParser, FontStream},
};

use super::{
    class_def::read_class_def_table,
    coverage::read_coverage_table,
    value::{read_x_advance, ValueFormat},
    LookupContext,
};

/// Reads a pair adjustment subtable starting at the cursor
pub(super) fn read_pair_adjustment(
    stream: &mut FontStream,
    subtable_pos: usize,
    ctx: &mut LookupContext,
) -> FontResult<()> {
    let pos_format = stream.parse_u16()?;

    match pos_format {
        1 => read_glyph_pairs(stream, subtable_pos, ctx),
        2 => read_class_pairs(stream, subtable_pos, ctx),
        _ => Err(FontError::stream(format!(
            "Unknown format of \"GPOS\" pair adjustment subtable: {}",
            pos_format
        ))),
    }
}

/// Reads the pair of value records that follows the second glyph id (format
/// 1) or fills one class matrix cell (format 2). Only the first record's x
/// advance matters for kerning.
fn read_value_pair(
    stream: &mut FontStream,
    subtable_pos: usize,
    formats: (ValueFormat, ValueFormat),
    ctx: &LookupContext,
) -> FontResult<i32> {
    let x_advance = read_x_advance(stream, subtable_pos, formats.0, ctx.scale, ctx.px_size)?;
    read_x_advance(stream, subtable_pos, formats.1, ctx.scale, ctx.px_size)?;

    Ok(x_advance)
}

/// Format 1: an explicit list of second glyphs for every covered glyph
fn read_glyph_pairs(
    stream: &mut FontStream,
    subtable_pos: usize,
    ctx: &mut LookupContext,
) -> FontResult<()> {
    let coverage_offset = stream.parse_u16()?;
    let value_format1 = ValueFormat(stream.parse_u16()?);
    let value_format2 = ValueFormat(stream.parse_u16()?);

    if !ValueFormat::is_kerning(value_format1, value_format2) {
        log::trace!(
            "skipping \"GPOS\" pair subtable with value formats 0x{:04x}, 0x{:04x}",
            value_format1.0,
            value_format2.0
        );
        return Ok(());
    }

    let pair_set_count = stream.parse_u16()?;
    let pair_set_offsets_pos = stream.cursor();

    stream.seek(subtable_pos + usize::from(coverage_offset))?;
    let coverage = read_coverage_table(stream)?;

    if usize::from(pair_set_count) != coverage.len() {
        return Err(FontError::stream(format!(
            "\"GPOS\" pair adjustment table format 1 pairSetCount ({}) doesn't match the number \
             of glyphs in coverage table ({})",
            pair_set_count,
            coverage.len()
        )));
    }

    for (i, &glyph_idx1) in coverage.iter().enumerate() {
        stream.seek(pair_set_offsets_pos + 2 * i)?;
        let pair_set_offset = stream.parse_u16()?;

        stream.seek(subtable_pos + usize::from(pair_set_offset))?;

        let pair_value_count = stream.parse_u16()?;
        for _ in 0..pair_value_count {
            let glyph_idx2 = stream.parse_u16()?;
            let amount =
                read_value_pair(stream, subtable_pos, (value_format1, value_format2), ctx)?;

            if amount != 0 {
                ctx.pairs
                    .push(RawKerningPair::new(glyph_idx1, glyph_idx2, amount));
            }
        }
    }

    Ok(())
}

/// Format 2: a class matrix, expanded to every glyph pair of each nonzero
/// cell
fn read_class_pairs(
    stream: &mut FontStream,
    subtable_pos: usize,
    ctx: &mut LookupContext,
) -> FontResult<()> {
    let coverage_offset = stream.parse_u16()?;
    let value_format1 = ValueFormat(stream.parse_u16()?);
    let value_format2 = ValueFormat(stream.parse_u16()?);

    if !ValueFormat::is_kerning(value_format1, value_format2) {
        log::trace!(
            "skipping \"GPOS\" class pair subtable with value formats 0x{:04x}, 0x{:04x}",
            value_format1.0,
            value_format2.0
        );
        return Ok(());
    }

    let class_def1_offset = stream.parse_u16()?;
    let class_def2_offset = stream.parse_u16()?;

    let class1_count = stream.parse_u16()?;
    if class1_count == 0 {
        return Err(FontError::stream(
            "\"GPOS\" pair adjustment format 2 class 1 count is 0",
        ));
    }

    let class2_count = stream.parse_u16()?;
    if class2_count == 0 {
        return Err(FontError::stream(
            "\"GPOS\" pair adjustment format 2 class 2 count is 0",
        ));
    }

    let values_pos = stream.cursor();

    stream.seek(subtable_pos + usize::from(coverage_offset))?;
    let coverage = read_coverage_table(stream)?;

    stream.seek(subtable_pos + usize::from(class_def1_offset))?;
    let mut class1 = read_class_def_table(stream, class1_count)?;

    stream.seek(subtable_pos + usize::from(class_def2_offset))?;
    let class2 = read_class_def_table(stream, class2_count)?;

    // Covered glyphs missing from the first class table belong to class 0
    let mut listed = class1.iter().flatten().copied().collect::<Vec<u16>>();
    listed.sort_unstable();

    for glyph_idx in coverage {
        if listed.binary_search(&glyph_idx).is_err() {
            class1[0].push(glyph_idx);
        }
    }

    stream.seek(values_pos)?;

    // Every cell is read, even for empty classes, to keep the cursor in step
    for glyphs1 in &class1 {
        for glyphs2 in &class2 {
            let amount =
                read_value_pair(stream, subtable_pos, (value_format1, value_format2), ctx)?;

            if amount == 0 {
                continue;
            }

            ctx.pairs.reserve(glyphs1.len() * glyphs2.len());
            for &glyph_idx1 in glyphs1 {
                for &glyph_idx2 in glyphs2 {
                    ctx.pairs
                        .push(RawKerningPair::new(glyph_idx1, glyph_idx2, amount));
                }
            }
        }
    }

    Ok(())
}
