//! <https://docs.microsoft.com/en-us/typography/opentype/spec/gpos>
//!
//! Only the lookups referenced by "kern" features are visited, and of those
//! only pair adjustment lookups (directly or through an extension).

mod class_def;
mod coverage;
mod pair_pos;
mod value;

use crate::{
    error::{FontError, FontResult},
    parse_binary::{BinaryParser, FontStream},
    sfnt::{TableDirectory, TableTag},
};

use super::{KerningParams, RawKerningPair};

const KERN_FEATURE: TableTag = TableTag::new(*b"kern");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupType {
    PairAdjustment,
    Extension,
    Other(u16),
}

impl LookupType {
    fn from_u16(n: u16) -> Self {
        match n {
            2 => Self::PairAdjustment,
            9 => Self::Extension,
            _ => Self::Other(n),
        }
    }
}

/// State shared by all subtables of one extraction
struct LookupContext {
    px_size: i32,
    scale: f32,
    pairs: Vec<RawKerningPair>,
}

pub fn read_kerning_pairs_gpos(
    stream: &mut FontStream,
    directory: &TableDirectory,
    params: KerningParams,
) -> FontResult<Vec<RawKerningPair>> {
    let table_offset = match directory.find_table_offset(TableTag::GPOS) {
        Some(offset) => offset as usize,
        None => return Ok(Vec::new()),
    };

    stream.seek(table_offset)?;

    let major_version = stream.parse_u16()?;
    if major_version != 1 {
        return Err(FontError::stream(format!(
            "Unsupported \"GPOS\" major version {}",
            major_version
        )));
    }

    // minorVersion, scriptListOffset
    stream.skip(2 * 2)?;
    let feature_list_offset = stream.parse_u16()?;
    let lookup_list_offset = stream.parse_u16()?;

    let lookup_indices =
        read_kern_lookup_indices(stream, table_offset + usize::from(feature_list_offset))?;

    let mut ctx = LookupContext {
        px_size: params.px_size,
        scale: params.scale(),
        pairs: Vec::new(),
    };

    read_lookups(
        stream,
        table_offset + usize::from(lookup_list_offset),
        &lookup_indices,
        &mut ctx,
    )?;

    Ok(ctx.pairs)
}

/// Collects the lookup indices of every "kern" feature.
///
/// Feature lists are often not optimized and repeat the same "kern" feature
/// for every language of a script, so indices are deduplicated.
fn read_kern_lookup_indices(
    stream: &mut FontStream,
    feature_list_pos: usize,
) -> FontResult<Vec<u16>> {
    let mut lookup_indices = Vec::new();

    stream.seek(feature_list_pos)?;

    let feature_count = stream.parse_u16()?;

    for _ in 0..feature_count {
        let feature_tag = stream.parse_tag()?;
        let feature_offset = stream.parse_u16()?;

        if feature_tag != KERN_FEATURE {
            continue;
        }

        let resume = stream.cursor();
        stream.seek(feature_list_pos + usize::from(feature_offset))?;

        // featureParamsOffset
        stream.skip(2)?;

        let lookup_index_count = stream.parse_u16()?;
        for _ in 0..lookup_index_count {
            let lookup_index = stream.parse_u16()?;
            if !lookup_indices.contains(&lookup_index) {
                lookup_indices.push(lookup_index);
            }
        }

        stream.seek(resume)?;
    }

    Ok(lookup_indices)
}

fn read_lookups(
    stream: &mut FontStream,
    lookup_list_pos: usize,
    lookup_indices: &[u16],
    ctx: &mut LookupContext,
) -> FontResult<()> {
    stream.seek(lookup_list_pos)?;

    let lookup_count = stream.parse_u16()?;

    for &lookup_index in lookup_indices {
        if lookup_index >= lookup_count {
            return Err(FontError::stream(format!(
                "Lookup list lookupIdx ({}) >= lookupCount ({})",
                lookup_index, lookup_count
            )));
        }

        stream.seek(lookup_list_pos + 2 + 2 * usize::from(lookup_index))?;
        let lookup_offset = stream.parse_u16()?;

        read_lookup(stream, lookup_list_pos + usize::from(lookup_offset), ctx)?;
    }

    Ok(())
}

fn read_lookup(
    stream: &mut FontStream,
    lookup_pos: usize,
    ctx: &mut LookupContext,
) -> FontResult<()> {
    stream.seek(lookup_pos)?;

    let lookup_type = LookupType::from_u16(stream.parse_u16()?);
    if let LookupType::Other(n) = lookup_type {
        log::trace!("skipping \"GPOS\" lookup type {}", n);
        return Ok(());
    }

    // lookupFlag
    stream.skip(2)?;

    let subtable_count = stream.parse_u16()?;
    for _ in 0..subtable_count {
        let subtable_offset = stream.parse_u16()?;
        let resume = stream.cursor();

        read_subtable(
            stream,
            lookup_pos + usize::from(subtable_offset),
            lookup_type,
            ctx,
        )?;

        stream.seek(resume)?;
    }

    Ok(())
}

fn read_subtable(
    stream: &mut FontStream,
    subtable_pos: usize,
    lookup_type: LookupType,
    ctx: &mut LookupContext,
) -> FontResult<()> {
    stream.seek(subtable_pos)?;

    match lookup_type {
        LookupType::PairAdjustment => pair_pos::read_pair_adjustment(stream, subtable_pos, ctx),
        LookupType::Extension => read_extension(stream, subtable_pos, ctx),
        LookupType::Other(_) => Ok(()),
    }
}

fn read_extension(
    stream: &mut FontStream,
    subtable_pos: usize,
    ctx: &mut LookupContext,
) -> FontResult<()> {
    let pos_format = stream.parse_u16()?;
    if pos_format != 1 {
        return Err(FontError::stream(format!(
            "Unknown format of \"GPOS\" extension subtable: {}",
            pos_format
        )));
    }

    let extension_lookup_type = LookupType::from_u16(stream.parse_u16()?);
    if extension_lookup_type == LookupType::Extension {
        return Err(FontError::stream(
            "\"GPOS\" extension subtables cannot be nested",
        ));
    }

    let extension_offset = stream.parse_u32()?;

    read_subtable(
        stream,
        subtable_pos + extension_offset as usize,
        extension_lookup_type,
        ctx,
    )
}
