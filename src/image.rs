//! 8-bit grayscale bitmaps used for atlas pages.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Image {
    /// Creates a zero-filled image
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows of pixels, top to bottom, without any gap between them
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.data[y * self.width + x])
    }

    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }

        self.data.get(y * self.width..(y + 1) * self.width)
    }

    /// Copies the top left `width` x `height` corner. Parts outside this
    /// image are zero.
    pub fn cropped(&self, width: usize, height: usize) -> Image {
        let mut result = Image::new(width, height);

        let copy_width = width.min(self.width);
        for y in 0..height.min(self.height) {
            let src = &self.data[y * self.width..y * self.width + copy_width];
            result.data[y * width..y * width + copy_width].copy_from_slice(src);
        }

        result
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn region_mut(&mut self) -> ImageRegion<'_> {
        ImageRegion {
            width: self.width,
            height: self.height,
            pitch: self.width,
            data: &mut self.data,
        }
    }
}

/// Mutable view of a rectangle inside an [`Image`].
///
/// `pitch` is the distance between the starts of two rows in `data`, so a
/// region can be narrower than the image it borrows from.
#[derive(Debug)]
pub struct ImageRegion<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    pitch: usize,
}

impl<'a> ImageRegion<'a> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn row_mut(&mut self, y: usize) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }

        let start = y * self.pitch;
        self.data.get_mut(start..start + self.width)
    }

    /// Borrows the `width` x `height` rectangle at (`x`, `y`), or returns
    /// `None` if it doesn't fit inside this region
    pub fn sub_region(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Option<ImageRegion<'_>> {
        if x.checked_add(width)? > self.width || y.checked_add(height)? > self.height {
            return None;
        }

        let (start, len) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (y * self.pitch + x, (height - 1) * self.pitch + width)
        };

        Some(ImageRegion {
            data: self.data.get_mut(start..start + len)?,
            width,
            height,
            pitch: self.pitch,
        })
    }

    pub fn fill(&mut self, value: u8) {
        for y in 0..self.height {
            if let Some(row) = self.row_mut(y) {
                row.fill(value);
            }
        }
    }
}
