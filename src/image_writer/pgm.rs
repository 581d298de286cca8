use std::io::Write;

use crate::{error::FontResult, image::Image};

use super::ImageWriter;

/// Binary ("P5") Netpbm gray map
#[derive(Debug, Clone, Copy, Default)]
pub struct PgmImageWriter;

impl ImageWriter for PgmImageWriter {
    fn extension(&self) -> &'static str {
        ".pgm"
    }

    fn write(&self, out: &mut dyn Write, image: &Image) -> FontResult<()> {
        write!(out, "P5\n{} {}\n255\n", image.width(), image.height())?;
        out.write_all(image.data())?;

        Ok(())
    }
}
