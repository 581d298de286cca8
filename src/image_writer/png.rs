use std::io::{self, Write};

use crate::{error::FontResult, image::Image};

use super::ImageWriter;

#[derive(Debug, Clone, Copy, Default)]
pub struct PngImageWriter;

impl ImageWriter for PngImageWriter {
    fn extension(&self) -> &'static str {
        ".png"
    }

    fn write(&self, out: &mut dyn Write, image: &Image) -> FontResult<()> {
        let mut encoder = ::png::Encoder::new(out, image.width() as u32, image.height() as u32);
        encoder.set_color(::png::ColorType::Grayscale);
        encoder.set_depth(::png::BitDepth::Eight);

        let mut writer = encoder.write_header().map_err(encoding_error)?;
        writer.write_image_data(image.data()).map_err(encoding_error)?;
        writer.finish().map_err(encoding_error)?;

        Ok(())
    }
}

fn encoding_error(err: ::png::EncodingError) -> io::Error {
    match err {
        ::png::EncodingError::IoError(err) => err,
        err => io::Error::new(io::ErrorKind::InvalidData, err),
    }
}
