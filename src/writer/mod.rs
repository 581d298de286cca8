//! Font description writers. A writer gets the baked [`Font`] and the names
//! its page images will be saved under.

mod bmfont;
mod json;

use std::io::Write;

use crate::{error::FontResult, font::Font, image_name::ImageNameFormatter, registry::Registry};

pub use self::{bmfont::BmFontWriter, json::JsonFontWriter};

pub trait FontWriter {
    /// Including the leading dot
    fn extension(&self) -> &'static str;

    fn write(
        &self,
        out: &mut dyn Write,
        font: &Font,
        image_names: &ImageNameFormatter,
    ) -> FontResult<()>;
}

pub type FontWriterRegistry = Registry<Box<dyn FontWriter>>;

pub fn registry() -> FontWriterRegistry {
    let mut registry: FontWriterRegistry = Registry::new("font writer");

    registry.register(
        "bmfont",
        "BMFont text (http://www.angelcode.com/products/bmfont/)",
        Box::new(BmFontWriter),
    );
    registry.register("json", "Generic JSON", Box::new(JsonFontWriter));

    registry
}
