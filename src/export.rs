//! Saving a baked [`Font`]: one font description file plus one image per
//! page, all in the same directory.

use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    error::{FontError, FontResult},
    font::{Font, Page},
    geometry::Size,
    image::Image,
    image_name::ImageNameFormatter,
    image_writer::ImageWriter,
    writer::FontWriter,
};

/// How big page images are
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ImageSizeMode {
    /// Just big enough for the page
    #[default]
    Min,

    /// The page size rounded up to powers of two, but no more than the max
    /// image size
    MinPot,

    /// Always the max image size
    Max,
}

impl ImageSizeMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::MinPot => "minPot",
            Self::Max => "max",
        }
    }

    /// Size of the image for a page of `page_size`
    pub fn image_size(self, page_size: Size, image_max_size: i32) -> Size {
        match self {
            Self::Min => page_size,
            Self::MinPot => Size::new(
                pot(page_size.w).min(image_max_size),
                pot(page_size.h).min(image_max_size),
            ),
            Self::Max => Size::new(image_max_size, image_max_size),
        }
    }

    /// Size of a canvas every page image fits into
    pub fn canvas_size(self, pages: &[Page], image_max_size: i32) -> Size {
        let largest = pages.iter().fold(Size::default(), |max, page| {
            Size::new(max.w.max(page.size.w), max.h.max(page.size.h))
        });

        self.image_size(largest, image_max_size)
    }
}

impl FromStr for ImageSizeMode {
    type Err = FontError;

    fn from_str(s: &str) -> FontResult<Self> {
        match s {
            "min" => Ok(Self::Min),
            "minPot" => Ok(Self::MinPot),
            "max" => Ok(Self::Max),
            _ => Err(FontError::validation(format!("Invalid image size mode \"{}\"", s))),
        }
    }
}

impl fmt::Display for ImageSizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Smallest power of two >= `n`, and 1 for anything below that
fn pot(n: i32) -> i32 {
    let mut result = 1i32;
    while result < n {
        match result.checked_mul(2) {
            Some(next) => result = next,
            None => return n,
        }
    }

    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// File name of the font description without extension, and the prefix
    /// of image names
    pub export_name: String,
    pub image_max_count: usize,
    pub image_size_mode: ImageSizeMode,
    pub out_dir: PathBuf,
}

impl ExportOptions {
    pub fn validate(&self) -> FontResult<()> {
        if self.image_max_count == 0 {
            return Err(FontError::validation("Image max count should be > 0"));
        }

        Ok(())
    }
}

/// Uses the file name of `font_path` without its extension
pub fn export_name_from_path(font_path: &Path) -> String {
    font_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Writes the font description and all page images.
///
/// Fails before anything is written if the font has more pages than
/// `options.image_max_count`.
pub fn export(
    font: &mut Font,
    options: &ExportOptions,
    font_writer: (&str, &dyn FontWriter),
    image_writer: (&str, &dyn ImageWriter),
) -> FontResult<()> {
    options.validate()?;

    let image_count = font.pages().len();
    if image_count > options.image_max_count {
        return Err(FontError::validation(format!(
            "The max image count ({}) exceeds the user limit ({}). Please increase the \
             maximum image count or image size limit.",
            image_count, options.image_max_count
        )));
    }

    let image_names = ImageNameFormatter::new(
        &options.export_name,
        image_count,
        image_writer.1.extension(),
    );

    write_font(font, &image_names, font_writer, options)?;
    write_images(font, &image_names, image_writer, options)?;

    Ok(())
}

fn write_font(
    font: &Font,
    image_names: &ImageNameFormatter,
    (name, writer): (&str, &dyn FontWriter),
    options: &ExportOptions,
) -> FontResult<()> {
    let path = options
        .out_dir
        .join(format!("{}{}", options.export_name, writer.extension()));

    log::info!("writing {}", path.display());

    let result = File::create(&path).map_err(FontError::from).and_then(|file| {
        let mut out = BufWriter::new(file);
        writer.write(&mut out, font, image_names)?;
        out.flush()?;

        Ok(())
    });

    result.map_err(|err| {
        FontError::validation(format!(
            "{} font writer can't write \"{}\": {}",
            name,
            path.display(),
            err
        ))
    })
}

fn write_images(
    font: &mut Font,
    image_names: &ImageNameFormatter,
    (name, writer): (&str, &dyn ImageWriter),
    options: &ExportOptions,
) -> FontResult<()> {
    let image_max_size = font.baking_options().image_max_size;
    let canvas_size = options
        .image_size_mode
        .canvas_size(font.pages(), image_max_size);

    let mut canvas = Image::new(canvas_size.w.max(1) as usize, canvas_size.h.max(1) as usize);

    for page_idx in 0..font.pages().len() {
        canvas.clear();
        font.render_page(page_idx, &mut canvas.region_mut())?;

        let image_size = options
            .image_size_mode
            .image_size(font.pages()[page_idx].size, image_max_size);
        let image = canvas.cropped(image_size.w.max(1) as usize, image_size.h.max(1) as usize);

        let path = options.out_dir.join(image_names.format(page_idx));
        log::info!("writing {}", path.display());

        let result = File::create(&path).map_err(FontError::from).and_then(|file| {
            let mut out = BufWriter::new(file);
            writer.write(&mut out, &image)?;
            out.flush()?;

            Ok(())
        });

        result.map_err(|err| {
            FontError::validation(format!(
                "{} image writer can't write \"{}\": {}",
                name,
                path.display(),
                err
            ))
        })?;
    }

    Ok(())
}
