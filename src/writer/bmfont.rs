use std::io::Write;

use crate::{error::FontResult, font::Font, image_name::ImageNameFormatter};

use super::FontWriter;

/// AngelCode BMFont text format:
/// <http://www.angelcode.com/products/bmfont/doc/file_format.html>
///
/// Only the outer glyph padding is reported as `padding`; the inner padding
/// is part of the glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct BmFontWriter;

impl FontWriter for BmFontWriter {
    fn extension(&self) -> &'static str {
        ".fnt"
    }

    fn write(
        &self,
        out: &mut dyn Write,
        font: &Font,
        image_names: &ImageNameFormatter,
    ) -> FontResult<()> {
        let options = font.baking_options();
        let style = font.style_flags();
        let outer = options.glyph_padding_outer;

        writeln!(
            out,
            "info face=\"{}\" size={} bold={} italic={} charset=\"\" unicode=1 stretchH=100 \
             smooth=1 aa=1 padding={},{},{},{} spacing={},{} outline=0",
            font.font_name().group_family,
            options.font_px_size,
            u8::from(style.bold),
            u8::from(style.italic),
            outer.top,
            outer.right,
            outer.bottom,
            outer.left,
            options.glyph_spacing.x,
            options.glyph_spacing.y,
        )?;

        let metrics = font.font_metrics();
        let pages = font.pages();
        writeln!(
            out,
            "common lineHeight={} base={} scaleW={} scaleH={} pages={} packed=0 alphaChnl=0 \
             redChnl=4 greenChnl=4 blueChnl=4",
            metrics.line_height,
            metrics.ascender,
            options.image_max_size,
            options.image_max_size,
            pages.len(),
        )?;

        for i in 0..pages.len() {
            writeln!(out, "page id={} file=\"{}\"", i, image_names.format(i))?;
        }

        let glyphs = font.glyphs();
        writeln!(out, "chars count={}", glyphs.len())?;
        for glyph in glyphs {
            writeln!(
                out,
                "char id={} x={} y={} width={} height={} xoffset={} yoffset={} xadvance={} \
                 page={} chnl=15",
                glyph.cp,
                glyph.page_pos.x,
                glyph.page_pos.y,
                glyph.size.w,
                glyph.size.h,
                glyph.draw_offset.x,
                glyph.draw_offset.y,
                glyph.advance,
                glyph.page_idx,
            )?;
        }

        let kerning_pairs = font.kerning_pairs();
        if !kerning_pairs.is_empty() {
            writeln!(out, "kernings count={}", kerning_pairs.len())?;

            for pair in kerning_pairs {
                writeln!(
                    out,
                    "kerning first={} second={} amount={}",
                    pair.cp1, pair.cp2, pair.amount
                )?;
            }
        }

        Ok(())
    }
}
