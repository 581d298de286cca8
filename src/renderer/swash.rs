use std::rc::Rc;

use ::swash::{
    scale::{image::Image as MaskImage, Render, ScaleContext, Source},
    zeno::Format,
    CacheKey, FontRef,
};

use crate::{
    geometry::{Point, Size},
    image::ImageRegion,
};

use super::{FontMetrics, FontRenderer, GlyphMetrics, Hinting, RendererArgs, RendererError};

pub struct SwashRenderer {
    data: Rc<[u8]>,
    offset: u32,
    key: CacheKey,
    px_size: f32,
    hint: bool,
    context: ScaleContext,
}

impl SwashRenderer {
    pub fn new(args: &RendererArgs) -> Result<Self, RendererError> {
        let font = FontRef::from_index(&args.data, args.font_index as usize).ok_or_else(|| {
            RendererError(format!("Can't load font #{} of the file", args.font_index))
        })?;

        let offset = font.offset;
        let key = font.key;

        Ok(Self {
            data: Rc::clone(&args.data),
            offset,
            key,
            px_size: args.px_size as f32,
            hint: args.hinting == Hinting::Normal,
            context: ScaleContext::new(),
        })
    }

    fn font(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    fn glyph_id(glyph_idx: u32) -> Result<u16, RendererError> {
        u16::try_from(glyph_idx)
            .map_err(|_| RendererError(format!("Glyph index {} is out of range", glyph_idx)))
    }

    fn render_mask(&mut self, glyph_idx: u32) -> Result<Option<MaskImage>, RendererError> {
        let glyph_id = Self::glyph_id(glyph_idx)?;

        let font = FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        };

        let mut scaler = self
            .context
            .builder(font)
            .size(self.px_size)
            .hint(self.hint)
            .build();

        Ok(Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id))
    }
}

impl FontRenderer for SwashRenderer {
    fn font_metrics(&self) -> FontMetrics {
        let metrics = self.font().metrics(&[]).scale(self.px_size);

        FontMetrics {
            ascender: metrics.ascent.round() as i32,
            descender: -metrics.descent.round() as i32,
            line_height: (metrics.ascent + metrics.descent + metrics.leading).round() as i32,
        }
    }

    fn glyph_index(&self, cp: u32) -> u32 {
        u32::from(self.font().charmap().map(cp))
    }

    fn glyph_metrics(&mut self, glyph_idx: u32) -> Result<GlyphMetrics, RendererError> {
        let glyph_id = Self::glyph_id(glyph_idx)?;

        let advance = self
            .font()
            .glyph_metrics(&[])
            .scale(self.px_size)
            .advance_width(glyph_id)
            .round() as i32;

        // Glyphs without an outline, like the space, have no bitmap
        let (size, offset) = match self.render_mask(glyph_idx)? {
            Some(mask) => (
                Size::new(mask.placement.width as i32, mask.placement.height as i32),
                Point::new(mask.placement.left, mask.placement.top),
            ),
            None => (Size::default(), Point::origin()),
        };

        Ok(GlyphMetrics {
            size,
            offset,
            advance,
        })
    }

    fn render_glyph(
        &mut self,
        glyph_idx: u32,
        region: &mut ImageRegion<'_>,
    ) -> Result<(), RendererError> {
        let mask = match self.render_mask(glyph_idx)? {
            Some(mask) => mask,
            None => return Ok(()),
        };

        let width = mask.placement.width as usize;
        let height = mask.placement.height as usize;
        if width == 0 || height == 0 {
            return Ok(());
        }

        let copy_width = width.min(region.width());

        for (y, src) in mask.data.chunks_exact(width).take(height).enumerate() {
            let dst = match region.row_mut(y) {
                Some(row) => row,
                None => break,
            };

            dst[..copy_width].copy_from_slice(&src[..copy_width]);
        }

        Ok(())
    }
}
