//! Synthesised fonts and a scripted renderer for driving `Font` end to end

#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
};

use fontbake::{
    geometry::{Point, Size},
    image::ImageRegion,
    renderer::{FontMetrics, FontRenderer, GlyphMetrics, RendererError},
};

#[derive(Default)]
pub struct BeWriter {
    buffer: Vec<u8>,
}

impl BeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u16(&mut self, n: u16) -> &mut Self {
        self.buffer.extend_from_slice(&n.to_be_bytes());
        self
    }

    pub fn i16(&mut self, n: i16) -> &mut Self {
        self.buffer.extend_from_slice(&n.to_be_bytes());
        self
    }

    pub fn u32(&mut self, n: u32) -> &mut Self {
        self.buffer.extend_from_slice(&n.to_be_bytes());
        self
    }

    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(bytes);
        self
    }

    pub fn zeros(&mut self, n: usize) -> &mut Self {
        self.buffer.resize(self.buffer.len() + n, 0);
        self
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }
}

/// A TrueType font with just the tables a bake reads
#[derive(Default)]
pub struct FontBuilder {
    tables: Vec<([u8; 4], Vec<u8>)>,
}

impl FontBuilder {
    pub fn new(units_per_em: u16) -> Self {
        let mut builder = Self::default();
        builder.head(units_per_em, 0);
        builder.name(&[(1, "Test Sans"), (2, "Regular")]);
        builder
    }

    fn table(&mut self, tag: &[u8; 4], data: Vec<u8>) -> &mut Self {
        self.tables.retain(|(t, _)| t != tag);
        self.tables.push((*tag, data));
        self
    }

    pub fn head(&mut self, units_per_em: u16, mac_style: u16) -> &mut Self {
        let mut w = BeWriter::new();
        w.zeros(18)
            .u16(units_per_em)
            .zeros(24)
            .u16(mac_style)
            .zeros(8);
        self.table(b"head", w.into_vec())
    }

    pub fn os2(&mut self, fs_selection: u16) -> &mut Self {
        let mut w = BeWriter::new();
        w.zeros(62).u16(fs_selection).zeros(32);
        self.table(b"OS/2", w.into_vec())
    }

    /// Windows English (US) records, which must be sorted by name id
    pub fn name(&mut self, names: &[(u16, &str)]) -> &mut Self {
        let storage: Vec<Vec<u8>> = names
            .iter()
            .map(|(_, s)| s.encode_utf16().flat_map(u16::to_be_bytes).collect())
            .collect();

        let mut w = BeWriter::new();
        w.u16(0)
            .u16(names.len() as u16)
            .u16(6 + 12 * names.len() as u16);

        let mut offset = 0;
        for ((name_id, _), data) in names.iter().zip(&storage) {
            w.u16(3)
                .u16(1)
                .u16(0x0409)
                .u16(*name_id)
                .u16(data.len() as u16)
                .u16(offset as u16);
            offset += data.len();
        }

        for data in &storage {
            w.bytes(data);
        }

        self.table(b"name", w.into_vec())
    }

    /// Version 0 "kern" table with one format 0 subtable per entry
    pub fn kern(&mut self, subtables: &[&[(u16, u16, i16)]]) -> &mut Self {
        let mut w = BeWriter::new();
        w.u16(0).u16(subtables.len() as u16);

        for pairs in subtables {
            w.u16(0)
                .u16((14 + 6 * pairs.len()) as u16)
                .u16(0x0001)
                .u16(pairs.len() as u16)
                .u16(0)
                .u16(0)
                .u16(0);

            for &(left, right, value) in pairs.iter() {
                w.u16(left).u16(right).i16(value);
            }
        }

        self.table(b"kern", w.into_vec())
    }

    /// "GPOS" with one "kern" feature pointing at a single pair adjustment
    /// lookup of format 1 with x advance values
    pub fn gpos(&mut self, pairs: &[(u16, u16, i16)]) -> &mut Self {
        let mut firsts = pairs.iter().map(|p| p.0).collect::<Vec<_>>();
        firsts.dedup();

        // Pair set per first glyph
        let sets = firsts
            .iter()
            .map(|&first| {
                pairs
                    .iter()
                    .filter(|p| p.0 == first)
                    .map(|p| (p.1, p.2))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let coverage_offset = 10 + 2 * sets.len();
        let mut subtable = BeWriter::new();
        subtable
            .u16(1)
            .u16(coverage_offset as u16)
            .u16(0x0004)
            .u16(0)
            .u16(sets.len() as u16);

        let mut offset = coverage_offset + 4 + 2 * firsts.len();
        for set in &sets {
            subtable.u16(offset as u16);
            offset += 2 + 4 * set.len();
        }

        subtable.u16(1).u16(firsts.len() as u16);
        for &first in &firsts {
            subtable.u16(first);
        }

        for set in &sets {
            subtable.u16(set.len() as u16);
            for &(second, value) in set {
                subtable.u16(second).i16(value);
            }
        }

        let mut lookup = BeWriter::new();
        lookup
            .u16(2)
            .u16(0)
            .u16(1)
            .u16(8)
            .bytes(&subtable.into_vec());

        let mut w = BeWriter::new();
        // header
        w.u16(1).u16(0).u16(0).u16(10).u16(10 + 14);
        // feature list with one "kern" feature
        w.u16(1).bytes(b"kern").u16(8);
        w.u16(0).u16(1).u16(0);
        // lookup list
        w.u16(1).u16(4).bytes(&lookup.into_vec());

        self.table(b"GPOS", w.into_vec())
    }

    pub fn build(&self) -> Vec<u8> {
        let header_len = 12 + 16 * self.tables.len();

        let mut w = BeWriter::new();
        w.u32(0x0001_0000)
            .u16(self.tables.len() as u16)
            .u16(0)
            .u16(0)
            .u16(0);

        let mut offset = header_len;
        for (tag, data) in &self.tables {
            w.bytes(tag)
                .u32(0)
                .u32(offset as u32)
                .u32(data.len() as u32);
            offset += data.len();
        }

        for (_, data) in &self.tables {
            w.bytes(data);
        }

        w.into_vec()
    }
}

/// Renders every glyph as a solid block of its glyph index
pub struct MockRenderer {
    pub metrics: FontMetrics,
    cmap: HashMap<u32, u32>,
    glyphs: HashMap<u32, GlyphMetrics>,
    pub rendered: Rc<RefCell<Vec<(u32, Size)>>>,
}

impl MockRenderer {
    pub fn new(ascender: i32, descender: i32, line_height: i32) -> Self {
        Self {
            metrics: FontMetrics {
                ascender,
                descender,
                line_height,
            },
            cmap: HashMap::new(),
            glyphs: HashMap::new(),
            rendered: Rc::default(),
        }
    }

    /// `offset` is from the pen position to the top left of the bitmap, y up
    pub fn glyph(
        mut self,
        cp: u32,
        glyph_idx: u32,
        size: (i32, i32),
        offset: (i32, i32),
        advance: i32,
    ) -> Self {
        if cp != 0 {
            self.cmap.insert(cp, glyph_idx);
        }

        self.glyphs.insert(
            glyph_idx,
            GlyphMetrics {
                size: Size::new(size.0, size.1),
                offset: Point::new(offset.0, offset.1),
                advance,
            },
        );

        self
    }
}

impl FontRenderer for MockRenderer {
    fn font_metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn glyph_index(&self, cp: u32) -> u32 {
        self.cmap.get(&cp).copied().unwrap_or(0)
    }

    fn glyph_metrics(&mut self, glyph_idx: u32) -> Result<GlyphMetrics, RendererError> {
        self.glyphs
            .get(&glyph_idx)
            .copied()
            .ok_or_else(|| RendererError(format!("no glyph {}", glyph_idx)))
    }

    fn render_glyph(
        &mut self,
        glyph_idx: u32,
        region: &mut ImageRegion<'_>,
    ) -> Result<(), RendererError> {
        self.rendered
            .borrow_mut()
            .push((
                glyph_idx,
                Size::new(region.width() as i32, region.height() as i32),
            ));

        region.fill(glyph_idx as u8);

        Ok(())
    }
}
