use serde::Serialize;

use crate::geometry::{Point, Size};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    #[serde(rename = "codePoint")]
    pub cp: u32,

    #[serde(skip)]
    pub glyph_idx: u32,

    /// Bitmap size, including inner and outer padding
    pub size: Size,

    /// From the pen position to the top left corner of the bitmap, with y
    /// measured down from the top of the line (the ascender)
    pub draw_offset: Point,

    pub advance: i32,

    #[serde(rename = "pageIndex")]
    pub page_idx: usize,

    pub page_pos: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GlyphsOrder {
    Unsorted,
    SizeDescending,
    Cp,
    GlyphIdx,
}

/// Glyphs together with the order they are currently sorted in. Sorting is
/// lazy: asking for the current order again costs nothing.
#[derive(Debug)]
pub(crate) struct GlyphSet {
    glyphs: Vec<Glyph>,
    order: GlyphsOrder,
}

impl GlyphSet {
    pub fn new() -> Self {
        Self {
            glyphs: Vec::new(),
            order: GlyphsOrder::Unsorted,
        }
    }

    pub fn push(&mut self, glyph: Glyph) {
        self.glyphs.push(glyph);
        self.order = GlyphsOrder::Unsorted;
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[cfg(test)]
    pub fn order(&self) -> GlyphsOrder {
        self.order
    }

    fn sort(&mut self, order: GlyphsOrder) {
        if order == self.order || order == GlyphsOrder::Unsorted {
            return;
        }

        match order {
            GlyphsOrder::Unsorted => {}
            // Stable, so equally sized glyphs keep their code point order
            GlyphsOrder::SizeDescending => self.glyphs.sort_by(|a, b| {
                b.size
                    .h
                    .cmp(&a.size.h)
                    .then_with(|| b.size.w.cmp(&a.size.w))
            }),
            GlyphsOrder::Cp => self.glyphs.sort_by_key(|glyph| glyph.cp),
            GlyphsOrder::GlyphIdx => self
                .glyphs
                .sort_by_key(|glyph| (glyph.glyph_idx, glyph.cp)),
        }

        self.order = order;
    }

    /// Tallest first, then widest first: the order glyphs are packed in
    pub fn by_size_descending(&mut self) -> &mut [Glyph] {
        self.sort(GlyphsOrder::SizeDescending);
        &mut self.glyphs
    }

    pub fn by_glyph_index(&mut self) -> GlyphIndexView<'_> {
        self.sort(GlyphsOrder::GlyphIdx);
        GlyphIndexView {
            glyphs: &self.glyphs,
        }
    }

    pub fn into_sorted_by_cp(mut self) -> Vec<Glyph> {
        self.sort(GlyphsOrder::Cp);
        self.glyphs
    }
}

/// Glyphs sorted by glyph index, for mapping glyph indices back to code
/// points. Only [`GlyphSet::by_glyph_index`] creates one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GlyphIndexView<'a> {
    glyphs: &'a [Glyph],
}

impl GlyphIndexView<'_> {
    /// When several code points share a glyph, the smallest one is returned
    pub fn glyph_idx_to_cp(&self, glyph_idx: u32) -> Option<u32> {
        let i = self.glyphs.partition_point(|glyph| glyph.glyph_idx < glyph_idx);

        self.glyphs
            .get(i)
            .filter(|glyph| glyph.glyph_idx == glyph_idx)
            .map(|glyph| glyph.cp)
    }
}
