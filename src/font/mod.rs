//! The baking pipeline: glyph enumeration, padding, packing, metadata and
//! kerning, producing the records font and image writers consume.

mod glyphs;
mod kerning;
mod options;

use std::{fs, path::Path, rc::Rc};

use serde::Serialize;

use crate::{
    cp_range::CpRange,
    error::{FontError, FontResult},
    geometry::{Edge, Size},
    image::ImageRegion,
    kerning::KerningParams,
    pack::{InsertStatus, RectPacker, SkylinePacker},
    parse_binary::FontStream,
    renderer::{self, FontMetrics, FontRenderer, RendererArgs, RendererError, RendererRegistry},
    sfnt::{read_font_name, read_head, read_os2, TableDirectory},
    unicode::cp_to_string,
};

use self::glyphs::GlyphSet;

pub use self::{
    glyphs::Glyph,
    kerning::KerningPair,
    options::{BakingOptions, KerningSource},
};
pub use crate::sfnt::FontName;

/// Meant to go with [`FontName::group_family`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleFlags {
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Page {
    pub size: Size,

    /// Indices into [`Font::glyphs`]
    pub glyph_indices: Vec<usize>,
}

pub struct Font {
    options: BakingOptions,
    renderer: Box<dyn FontRenderer>,
    style_flags: StyleFlags,
    font_name: FontName,
    pages: Vec<Page>,
    glyphs: Vec<Glyph>,
    kerning_pairs: Vec<KerningPair>,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("options", &self.options)
            .field("style_flags", &self.style_flags)
            .field("font_name", &self.font_name)
            .field("pages", &self.pages.len())
            .field("glyphs", &self.glyphs.len())
            .field("kerning_pairs", &self.kerning_pairs.len())
            .finish()
    }
}

impl Font {
    /// Loads the font from `options.font_path` and bakes it with a built in
    /// renderer
    pub fn new(options: BakingOptions, cp_ranges: &[CpRange]) -> FontResult<Self> {
        let data = load_font_data(&options.font_path)?;

        Self::from_data(options, data, cp_ranges, &renderer::registry())
    }

    /// Bakes a font file already in memory, looking the renderer up in
    /// `renderers`
    pub fn from_data(
        options: BakingOptions,
        data: Vec<u8>,
        cp_ranges: &[CpRange],
        renderers: &RendererRegistry,
    ) -> FontResult<Self> {
        options.validate(renderers)?;

        let data: Rc<[u8]> = data.into();
        let directory =
            TableDirectory::read(&mut FontStream::new(&data), options.font_index as u32)?;

        let factory = renderers.get(&options.font_renderer)?;
        let renderer = factory(&RendererArgs {
            data: Rc::clone(&data),
            font_index: options.font_index as u32,
            px_size: options.font_px_size,
            hinting: options.hinting,
        })
        .map_err(|err| FontError::Renderer {
            renderer: options.font_renderer.clone(),
            context: format!("font #{}", options.font_index),
            message: err.0,
        })?;

        let mut packer = SkylinePacker::new(
            options.image_max_size,
            options.glyph_spacing,
            options.image_padding,
        );

        Self::bake(options, &data, directory, cp_ranges, renderer, &mut packer)
    }

    /// Bakes with a renderer and packer supplied by the caller.
    /// `options.font_renderer` only names the renderer in error messages.
    pub fn with_renderer(
        options: BakingOptions,
        data: &[u8],
        cp_ranges: &[CpRange],
        renderer: Box<dyn FontRenderer>,
        packer: &mut dyn RectPacker,
    ) -> FontResult<Self> {
        options.validate_values()?;

        let directory =
            TableDirectory::read(&mut FontStream::new(data), options.font_index as u32)?;

        Self::bake(options, data, directory, cp_ranges, renderer, packer)
    }

    fn bake(
        options: BakingOptions,
        data: &[u8],
        directory: TableDirectory,
        cp_ranges: &[CpRange],
        mut renderer: Box<dyn FontRenderer>,
        packer: &mut dyn RectPacker,
    ) -> FontResult<Self> {
        let mut glyphs = enumerate_glyphs(&options, &mut *renderer, cp_ranges)?;
        log::debug!("{} glyphs", glyphs.len());

        let mut pages = pack_glyphs(&options, &mut glyphs, packer)?;
        log::debug!("{} pages", pages.len());

        let mut stream = FontStream::new(data);

        let head = read_head(&mut stream, &directory)?;
        let os2 = read_os2(&mut stream, &directory)?;

        // "OS/2" is optional for Mac fonts
        let style_flags = match os2 {
            Some(os2) => StyleFlags {
                bold: os2.fs_selection.is_bold(),
                italic: os2.fs_selection.is_italic(),
            },
            None => StyleFlags {
                bold: head.mac_style.is_bold(),
                italic: head.mac_style.is_italic(),
            },
        };

        let font_name = read_font_name(&mut stream, &directory)?;

        let raw_pairs = kerning::read_raw_kerning_pairs(
            &mut stream,
            &directory,
            options.kerning_source,
            KerningParams {
                px_size: options.font_px_size,
                units_per_em: head.units_per_em,
            },
        )?;

        let mut kerning_pairs = if raw_pairs.is_empty() {
            Vec::new()
        } else {
            kerning::to_cp_pairs(&raw_pairs, glyphs.by_glyph_index())
        };
        kerning::sort_and_dedup(&mut kerning_pairs);
        log::debug!("{} kerning pairs", kerning_pairs.len());

        let glyphs = glyphs.into_sorted_by_cp();

        if pages.is_empty() && !glyphs.is_empty() {
            // Only whitespace; they still need a page to refer to
            pages.push(Page::default());
        }

        for (i, glyph) in glyphs.iter().enumerate() {
            match pages.get_mut(glyph.page_idx) {
                Some(page) => page.glyph_indices.push(i),
                None => {
                    return Err(FontError::stream(format!(
                        "Packer put glyph {} on page {}, but there are only {} pages",
                        cp_to_string(glyph.cp),
                        glyph.page_idx,
                        pages.len()
                    )))
                }
            }
        }

        log::info!(
            "baked \"{} {}\": {} glyphs on {} pages, {} kerning pairs",
            font_name.family,
            font_name.style,
            glyphs.len(),
            pages.len(),
            kerning_pairs.len()
        );

        Ok(Self {
            options,
            renderer,
            style_flags,
            font_name,
            pages,
            glyphs,
            kerning_pairs,
        })
    }

    pub fn baking_options(&self) -> &BakingOptions {
        &self.options
    }

    pub fn style_flags(&self) -> StyleFlags {
        self.style_flags
    }

    pub fn font_name(&self) -> &FontName {
        &self.font_name
    }

    /// Renderer metrics grown by the inner padding. Outer padding never
    /// changes line metrics.
    pub fn font_metrics(&self) -> FontMetrics {
        let mut metrics = self.renderer.font_metrics();
        let inner = self.options.glyph_padding_inner;

        metrics.ascender = metrics.ascender.saturating_add(inner.top);
        metrics.descender = metrics.descender.saturating_sub(inner.bottom);
        metrics.line_height = metrics
            .line_height
            .saturating_add(inner.top)
            .saturating_add(inner.bottom);

        metrics
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Sorted by code point
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Sorted by code points, without duplicates
    pub fn kerning_pairs(&self) -> &[KerningPair] {
        &self.kerning_pairs
    }

    /// Renders a glyph into `region`, which should be the size of the padded
    /// glyph. Nothing is drawn if the padding doesn't fit.
    pub fn render_glyph(&mut self, glyph_idx: u32, region: &mut ImageRegion<'_>) -> FontResult<()> {
        let padding = self.options.glyph_padding();

        render_padded(&mut *self.renderer, padding, glyph_idx, region).map_err(|err| {
            FontError::Renderer {
                renderer: self.options.font_renderer.clone(),
                context: format!("glyph {}", glyph_idx),
                message: err.0,
            }
        })
    }

    /// Renders every glyph of a page at its page position
    pub fn render_page(&mut self, page_idx: usize, canvas: &mut ImageRegion<'_>) -> FontResult<()> {
        let page = self.pages.get(page_idx).ok_or_else(|| {
            FontError::validation(format!(
                "Page {} doesn't exist; the font has {} pages",
                page_idx,
                self.pages.len()
            ))
        })?;

        let padding = self.options.glyph_padding();

        for &i in &page.glyph_indices {
            let glyph = &self.glyphs[i];
            if glyph.size.is_empty() || glyph.size.is_negative() {
                continue;
            }

            let region = canvas.sub_region(
                glyph.page_pos.x.max(0) as usize,
                glyph.page_pos.y.max(0) as usize,
                glyph.size.w as usize,
                glyph.size.h as usize,
            );

            let mut region = match region {
                Some(region) => region,
                None => {
                    log::warn!(
                        "glyph {} at {:?} doesn't fit on a {}x{} image",
                        cp_to_string(glyph.cp),
                        glyph.page_pos,
                        canvas.width(),
                        canvas.height()
                    );
                    continue;
                }
            };

            render_padded(&mut *self.renderer, padding, glyph.glyph_idx, &mut region).map_err(
                |err| FontError::Renderer {
                    renderer: self.options.font_renderer.clone(),
                    context: cp_to_string(glyph.cp),
                    message: err.0,
                },
            )?;
        }

        Ok(())
    }
}

fn load_font_data(path: &Path) -> FontResult<Vec<u8>> {
    let data = fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());

    Ok(data)
}

/// Code point 0 is kept even without a glyph: it stands for the missing
/// glyph. Other code points the font lacks are skipped.
fn enumerate_glyphs(
    options: &BakingOptions,
    renderer: &mut dyn FontRenderer,
    cp_ranges: &[CpRange],
) -> FontResult<GlyphSet> {
    // Unpadded, unlike Font::font_metrics
    let ascender = renderer.font_metrics().ascender;

    let inner = options.glyph_padding_inner;
    let outer = options.glyph_padding_outer;

    let mut glyphs = GlyphSet::new();

    for range in cp_ranges {
        for cp in range.iter() {
            let glyph_idx = renderer.glyph_index(cp);
            if glyph_idx == 0 && cp != 0 {
                continue;
            }

            let metrics = renderer
                .glyph_metrics(glyph_idx)
                .map_err(|err| FontError::Renderer {
                    renderer: options.font_renderer.clone(),
                    context: cp_to_string(cp),
                    message: err.0,
                })?;

            let mut glyph = Glyph {
                cp,
                glyph_idx,
                size: metrics.size,
                advance: metrics.advance,
                ..Glyph::default()
            };
            glyph.draw_offset.x = metrics.offset.x;
            glyph.draw_offset.y = ascender.saturating_sub(metrics.offset.y);

            glyph.size = glyph.size.padded(inner);
            glyph.draw_offset.y = glyph.draw_offset.y.saturating_sub(inner.top);
            glyph.advance = glyph
                .advance
                .saturating_add(inner.left)
                .saturating_add(inner.right);

            glyph.size = glyph.size.padded(outer);
            glyph.draw_offset.x = glyph.draw_offset.x.saturating_sub(outer.left);
            glyph.draw_offset.y = glyph.draw_offset.y.saturating_sub(outer.top);

            glyphs.push(glyph);
        }
    }

    Ok(glyphs)
}

fn pack_glyphs(
    options: &BakingOptions,
    glyphs: &mut GlyphSet,
    packer: &mut dyn RectPacker,
) -> FontResult<Vec<Page>> {
    for glyph in glyphs.by_size_descending() {
        let result = packer.insert(glyph.size);

        match result.status {
            InsertStatus::Ok => {
                glyph.page_idx = result.page_idx;
                glyph.page_pos = result.pos;
            }
            // Whitespace
            InsertStatus::ZeroSize => glyph.page_idx = 0,
            InsertStatus::NegativeSize => {
                log::warn!(
                    "glyph {} has a negative size {}x{}",
                    cp_to_string(glyph.cp),
                    glyph.size.w,
                    glyph.size.h
                );
                glyph.size = Size::default();
                glyph.page_idx = 0;
            }
            InsertStatus::RectTooBig => {
                return Err(FontError::validation(format!(
                    "Glyph {} is too big ({}x{}) for a {}x{} px page",
                    cp_to_string(glyph.cp),
                    glyph.size.w,
                    glyph.size.h,
                    options.image_max_size,
                    options.image_max_size
                )))
            }
        }
    }

    Ok((0..packer.num_pages())
        .map(|i| Page {
            size: packer.page_size(i),
            glyph_indices: Vec::new(),
        })
        .collect())
}

/// Renders into `region` shrunk by `padding` on every edge
fn render_padded(
    renderer: &mut dyn FontRenderer,
    padding: Edge,
    glyph_idx: u32,
    region: &mut ImageRegion<'_>,
) -> Result<(), RendererError> {
    let x_padding = padding.left.saturating_add(padding.right).max(0) as usize;
    let y_padding = padding.top.saturating_add(padding.bottom).max(0) as usize;

    if x_padding > region.width() || y_padding > region.height() {
        return Ok(());
    }

    let width = region.width() - x_padding;
    let height = region.height() - y_padding;

    match region.sub_region(
        padding.left.max(0) as usize,
        padding.top.max(0) as usize,
        width,
        height,
    ) {
        Some(mut inner) => renderer.render_glyph(glyph_idx, &mut inner),
        None => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use crate::{
        geometry::{Edge, Point, Size},
        image::{Image, ImageRegion},
        renderer::{FontMetrics, FontRenderer, GlyphMetrics, RendererError},
    };

    use super::render_padded;

    /// Fills its whole region with 0xff
    struct Filler {
        rendered: Vec<(usize, usize)>,
    }

    impl FontRenderer for Filler {
        fn font_metrics(&self) -> FontMetrics {
            FontMetrics::default()
        }

        fn glyph_index(&self, cp: u32) -> u32 {
            cp
        }

        fn glyph_metrics(&mut self, _glyph_idx: u32) -> Result<GlyphMetrics, RendererError> {
            Ok(GlyphMetrics {
                size: Size::new(1, 1),
                offset: Point::origin(),
                advance: 1,
            })
        }

        fn render_glyph(
            &mut self,
            _glyph_idx: u32,
            region: &mut ImageRegion<'_>,
        ) -> Result<(), RendererError> {
            self.rendered.push((region.width(), region.height()));
            region.fill(0xff);
            Ok(())
        }
    }

    #[test]
    fn padding_is_left_blank() {
        let mut image = Image::new(5, 4);
        let mut renderer = Filler { rendered: vec![] };

        render_padded(
            &mut renderer,
            Edge::new(1, 0, 2, 1),
            7,
            &mut image.region_mut(),
        )
        .unwrap();

        assert_eq!(renderer.rendered, [(2, 3)]);
        #[rustfmt::skip]
        assert_eq!(image.data(), &[
            0, 0, 0, 0, 0,
            0, 0, 0xff, 0xff, 0,
            0, 0, 0xff, 0xff, 0,
            0, 0, 0xff, 0xff, 0,
        ]);
    }

    #[test]
    fn padding_larger_than_region() {
        let mut image = Image::new(2, 2);
        let mut renderer = Filler { rendered: vec![] };

        render_padded(
            &mut renderer,
            Edge::new(1, 1, 1, 2),
            7,
            &mut image.region_mut(),
        )
        .unwrap();

        assert!(renderer.rendered.is_empty());
        assert!(image.data().iter().all(|&p| p == 0));
    }
}
