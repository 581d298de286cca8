//! Bakes TrueType and OpenType fonts into bitmap atlases: grayscale page
//! images plus a description of every glyph's place, metrics and kerning.

pub mod cp_range;
pub mod error;
pub mod export;
pub mod font;
pub mod geometry;
pub mod image;
pub mod image_name;
pub mod image_writer;
pub mod kerning;
pub mod pack;
pub mod parse_binary;
pub mod registry;
pub mod renderer;
pub mod sfnt;
pub mod unicode;
pub mod writer;

#[cfg(test)]
mod test_util;

pub use crate::{
    error::{FontError, FontResult},
    font::{BakingOptions, Font, Glyph, KerningPair, KerningSource, Page, StyleFlags},
};
