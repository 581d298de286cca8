use std::io::{self, Write};

use serde::Serialize;

use crate::{
    error::FontResult,
    font::{BakingOptions, Font, Glyph, KerningPair, StyleFlags},
    geometry::Size,
    image_name::ImageNameFormatter,
    renderer::FontMetrics,
};

use super::FontWriter;

/// Everything the font knows, as pretty printed JSON with camelCase keys
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFontWriter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFont<'a> {
    name: JsonName<'a>,
    style_flags: StyleFlags,
    metrics: FontMetrics,
    baking_options: &'a BakingOptions,
    pages: Vec<JsonPage>,
    glyphs: &'a [Glyph],
    kerning_pairs: &'a [KerningPair],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonName<'a> {
    family: &'a str,
    style: &'a str,
    group_family: &'a str,
}

#[derive(Serialize)]
struct JsonPage {
    name: String,
    size: Size,
}

impl FontWriter for JsonFontWriter {
    fn extension(&self) -> &'static str {
        ".json"
    }

    fn write(
        &self,
        out: &mut dyn Write,
        font: &Font,
        image_names: &ImageNameFormatter,
    ) -> FontResult<()> {
        let name = font.font_name();

        let json = JsonFont {
            name: JsonName {
                family: &name.family,
                style: &name.style,
                group_family: &name.group_family,
            },
            style_flags: font.style_flags(),
            metrics: font.font_metrics(),
            baking_options: font.baking_options(),
            pages: font
                .pages()
                .iter()
                .enumerate()
                .map(|(i, page)| JsonPage {
                    name: image_names.format(i),
                    size: page.size,
                })
                .collect(),
            glyphs: font.glyphs(),
            kerning_pairs: font.kerning_pairs(),
        };

        serde_json::to_writer_pretty(&mut *out, &json).map_err(io::Error::from)?;
        writeln!(out)?;

        Ok(())
    }
}
