use serde::Serialize;

use super::Edge;

/// Width and height in pixels. Negative values only ever come from buggy
/// renderers, and the packer reports them instead of placing the glyph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn is_negative(&self) -> bool {
        self.w < 0 || self.h < 0
    }

    /// Grows the size by the padding on every edge, saturating at the `i32`
    /// range
    pub fn padded(self, edge: Edge) -> Self {
        Self {
            w: self.w.saturating_add(edge.left).saturating_add(edge.right),
            h: self.h.saturating_add(edge.top).saturating_add(edge.bottom),
        }
    }
}
