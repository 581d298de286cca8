//! Atlas page packing.

mod skyline;

pub use skyline::SkylinePacker;

use crate::geometry::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertStatus {
    Ok,

    /// Width or height is 0; nothing was placed
    ZeroSize,

    /// Width or height is negative; nothing was placed
    NegativeSize,

    /// The rectangle doesn't fit even on an empty page
    RectTooBig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertResult {
    pub status: InsertStatus,
    pub page_idx: usize,
    pub pos: Point,
}

impl InsertResult {
    pub(crate) const fn rejected(status: InsertStatus) -> Self {
        Self {
            status,
            page_idx: 0,
            pos: Point::origin(),
        }
    }
}

/// Places rectangles on as many pages as needed
pub trait RectPacker {
    fn insert(&mut self, size: Size) -> InsertResult;

    fn num_pages(&self) -> usize;

    /// Smallest size that holds everything placed on the page, including
    /// the page padding
    fn page_size(&self, page_idx: usize) -> Size;
}
