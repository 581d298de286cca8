//! Glyph rasterization backends.
//!
//! The baking pipeline only needs four things from a backend: line metrics,
//! the code point to glyph index map, per glyph metrics and an 8-bit
//! coverage bitmap of each glyph.

mod swash;

use std::{fmt, rc::Rc, str::FromStr};

use serde::Serialize;

use crate::{
    error::{FontError, FontResult},
    geometry::{Point, Size},
    image::ImageRegion,
    registry::Registry,
};

pub use self::swash::SwashRenderer;

/// Line metrics in pixels. `descender` is usually negative.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    pub ascender: i32,
    pub descender: i32,
    pub line_height: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Bitmap size
    pub size: Size,

    /// From the pen position on the baseline to the top left corner of the
    /// bitmap, y growing up
    pub offset: Point,

    pub advance: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hinting {
    #[default]
    Normal,
    Light,
}

impl Hinting {
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Light => "light",
        }
    }
}

impl FromStr for Hinting {
    type Err = FontError;

    fn from_str(s: &str) -> FontResult<Self> {
        match s {
            "normal" => Ok(Self::Normal),
            "light" => Ok(Self::Light),
            _ => Err(FontError::validation(format!(
                "Unknown hinting \"{}\"; expected \"normal\" or \"light\"",
                s
            ))),
        }
    }
}

impl fmt::Display for Hinting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Backend failure, without the glyph context, which the caller adds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererError(pub String);

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for RendererError {}

pub trait FontRenderer {
    fn font_metrics(&self) -> FontMetrics;

    /// Returns 0 if the font has no glyph for `cp`
    fn glyph_index(&self, cp: u32) -> u32;

    fn glyph_metrics(&mut self, glyph_idx: u32) -> Result<GlyphMetrics, RendererError>;

    /// Draws the glyph with its bitmap's top left corner at the top left of
    /// `region`, clipping whatever doesn't fit
    fn render_glyph(
        &mut self,
        glyph_idx: u32,
        region: &mut ImageRegion<'_>,
    ) -> Result<(), RendererError>;
}

#[derive(Debug, Clone)]
pub struct RendererArgs {
    /// The whole font file
    pub data: Rc<[u8]>,
    pub font_index: u32,
    pub px_size: i32,
    pub hinting: Hinting,
}

pub type RendererFactory = fn(&RendererArgs) -> Result<Box<dyn FontRenderer>, RendererError>;

pub type RendererRegistry = Registry<RendererFactory>;

/// All built in renderers; the first one is the default
pub fn registry() -> RendererRegistry {
    let mut registry: RendererRegistry = Registry::new("font renderer");

    registry.register("swash", "Pure Rust rasterizer from the swash crate", |args| {
        Ok(Box::new(SwashRenderer::new(args)?) as Box<dyn FontRenderer>)
    });

    registry
}
