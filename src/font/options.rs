use std::{fmt, path::PathBuf, str::FromStr};

use serde::Serialize;

use crate::{
    error::{FontError, FontResult},
    geometry::{Edge, Point},
    renderer::{Hinting, RendererRegistry},
};

/// Which tables kerning pairs are read from
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KerningSource {
    None,
    Kern,
    Gpos,

    /// "GPOS" first; "kern" only if "GPOS" yields no pairs
    #[default]
    Both,
}

impl KerningSource {
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Kern => "kern",
            Self::Gpos => "gpos",
            Self::Both => "both",
        }
    }
}

impl FromStr for KerningSource {
    type Err = FontError;

    fn from_str(s: &str) -> FontResult<Self> {
        match s {
            "none" => Ok(Self::None),
            "kern" => Ok(Self::Kern),
            "gpos" => Ok(Self::Gpos),
            "both" => Ok(Self::Both),
            _ => Err(FontError::validation(format!("Invalid kerning \"{}\"", s))),
        }
    }
}

impl fmt::Display for KerningSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BakingOptions {
    #[serde(skip)]
    pub font_path: PathBuf,

    #[serde(skip)]
    pub font_renderer: String,

    #[serde(skip)]
    pub font_index: i32,

    pub font_px_size: i32,

    #[serde(skip)]
    pub hinting: Hinting,

    /// Width and height limit of an atlas page
    pub image_max_size: i32,

    pub image_padding: Edge,

    /// Padding that is part of the glyph, like an outline. It grows the
    /// advance.
    pub glyph_padding_inner: Edge,

    /// Padding around the inner padding for effects that must not change
    /// the advance, like shadows.
    pub glyph_padding_outer: Edge,

    pub glyph_spacing: Point,

    #[serde(skip)]
    pub kerning_source: KerningSource,
}

impl Default for BakingOptions {
    fn default() -> Self {
        Self {
            font_path: PathBuf::new(),
            font_renderer: "swash".to_owned(),
            font_index: 0,
            font_px_size: 16,
            hinting: Hinting::Normal,
            image_max_size: 1024,
            image_padding: Edge::all(1),
            glyph_padding_inner: Edge::all(0),
            glyph_padding_outer: Edge::all(0),
            glyph_spacing: Point::new(1, 1),
            kerning_source: KerningSource::Both,
        }
    }
}

impl BakingOptions {
    /// Checks the renderer name, then every numeric option
    pub fn validate(&self, renderers: &RendererRegistry) -> FontResult<()> {
        renderers.get(&self.font_renderer)?;

        self.validate_values()
    }

    pub fn validate_values(&self) -> FontResult<()> {
        if self.font_index < 0 {
            return Err(FontError::validation("Font index should be >= 0"));
        }

        if self.font_px_size <= 0 {
            return Err(FontError::validation("Font size should be > 0"));
        }

        if self.image_max_size <= 0 {
            return Err(FontError::validation("Image max size should be > 0"));
        }

        if self.image_padding.is_negative() {
            return Err(FontError::validation("Image padding should be >= 0"));
        }

        if self.glyph_padding_inner.is_negative() {
            return Err(FontError::validation("Glyph inner padding should be >= 0"));
        }

        if self.glyph_padding_outer.is_negative() {
            return Err(FontError::validation("Glyph outer padding should be >= 0"));
        }

        if self.glyph_spacing.x < 0 || self.glyph_spacing.y < 0 {
            return Err(FontError::validation("Glyph spacing should be >= 0"));
        }

        Ok(())
    }

    /// Inner and outer glyph padding combined
    pub fn glyph_padding(&self) -> Edge {
        self.glyph_padding_inner + self.glyph_padding_outer
    }
}
