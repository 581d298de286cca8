//! Page image writers. Pages are 8-bit grayscale coverage maps.

mod pgm;
mod png;
mod tga;

use std::io::Write;

use crate::{error::FontResult, image::Image, registry::Registry};

pub use self::{pgm::PgmImageWriter, png::PngImageWriter, tga::TgaImageWriter};

pub trait ImageWriter {
    /// Including the leading dot
    fn extension(&self) -> &'static str;

    fn write(&self, out: &mut dyn Write, image: &Image) -> FontResult<()>;
}

pub type ImageWriterRegistry = Registry<Box<dyn ImageWriter>>;

pub fn registry() -> ImageWriterRegistry {
    let mut registry: ImageWriterRegistry = Registry::new("image writer");

    registry.register("png", "Portable Network Graphics", Box::new(PngImageWriter));
    registry.register("pgm", "Netpbm Portable Gray Map", Box::new(PgmImageWriter));
    registry.register("tga", "Truevision TGA", Box::new(TgaImageWriter));

    registry
}
