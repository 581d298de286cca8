use serde::Serialize;

use crate::{
    error::FontResult,
    kerning::{read_kerning_pairs_gpos, read_kerning_pairs_kern, KerningParams, RawKerningPair},
    parse_binary::FontStream,
    sfnt::TableDirectory,
};

use super::{glyphs::GlyphIndexView, KerningSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KerningPair {
    #[serde(rename = "codePoint1")]
    pub cp1: u32,

    #[serde(rename = "codePoint2")]
    pub cp2: u32,

    pub amount: i32,
}

impl KerningPair {
    pub const fn new(cp1: u32, cp2: u32, amount: i32) -> Self {
        Self { cp1, cp2, amount }
    }
}

/// Reads raw pairs from the tables `source` selects.
///
/// The "kern" table is meant to be used only when "GPOS" has no kerning,
/// so with [`KerningSource::Both`] it's read only if "GPOS" gave nothing.
pub(super) fn read_raw_kerning_pairs(
    stream: &mut FontStream,
    directory: &TableDirectory,
    source: KerningSource,
    params: KerningParams,
) -> FontResult<Vec<RawKerningPair>> {
    let mut pairs = Vec::new();

    if matches!(source, KerningSource::Gpos | KerningSource::Both) {
        pairs = read_kerning_pairs_gpos(stream, directory, params)?;
        log::debug!("{} kerning pairs in \"GPOS\"", pairs.len());
    }

    if source == KerningSource::Kern || (source == KerningSource::Both && pairs.is_empty()) {
        pairs = read_kerning_pairs_kern(stream, directory, params)?;
        log::debug!("{} kerning pairs in \"kern\"", pairs.len());
    }

    Ok(pairs)
}

/// Maps raw pairs to code points, dropping pairs with a glyph that isn't
/// baked. Code point 0 only stands for the missing glyph and is never
/// kerned.
pub(super) fn to_cp_pairs(
    raw_pairs: &[RawKerningPair],
    glyphs: GlyphIndexView<'_>,
) -> Vec<KerningPair> {
    let lookup = |glyph_idx: u16| {
        glyphs
            .glyph_idx_to_cp(u32::from(glyph_idx))
            .filter(|&cp| cp != 0)
    };

    let mut pairs = Vec::with_capacity(raw_pairs.len());

    // Raw pairs come in runs sharing the first glyph, though a glyph can
    // start several runs when GPOS has more than one kerning lookup
    let mut i = 0;
    while i < raw_pairs.len() {
        let glyph_idx1 = raw_pairs[i].glyph_idx1;
        let cp1 = lookup(glyph_idx1);

        while let Some(raw) = raw_pairs.get(i).filter(|raw| raw.glyph_idx1 == glyph_idx1) {
            i += 1;

            if let (Some(cp1), Some(cp2)) = (cp1, lookup(raw.glyph_idx2)) {
                pairs.push(KerningPair::new(cp1, cp2, raw.amount));
            }
        }
    }

    pairs
}

/// Sorts by code points and keeps only the first pair of every duplicate
pub(super) fn sort_and_dedup(pairs: &mut Vec<KerningPair>) {
    // Stable, so the first pair read is the one that survives
    pairs.sort_by_key(|pair| (pair.cp1, pair.cp2));
    pairs.dedup_by_key(|pair| (pair.cp1, pair.cp2));
}
