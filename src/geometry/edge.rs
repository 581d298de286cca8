use serde::Serialize;

/// Per-edge thickness, used for padding
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Edge {
    pub const fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    pub const fn all(n: i32) -> Self {
        Self::new(n, n, n, n)
    }

    pub fn is_negative(&self) -> bool {
        self.top < 0 || self.bottom < 0 || self.left < 0 || self.right < 0
    }
}

impl std::ops::Add<Edge> for Edge {
    type Output = Edge;

    fn add(self, rhs: Edge) -> Self::Output {
        Edge {
            top: self.top.saturating_add(rhs.top),
            bottom: self.bottom.saturating_add(rhs.bottom),
            left: self.left.saturating_add(rhs.left),
            right: self.right.saturating_add(rhs.right),
        }
    }
}
