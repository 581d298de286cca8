use crate::geometry::{Edge, Point, Size};

use super::{InsertResult, InsertStatus, RectPacker};

/// A horizontal segment of the skyline at height `y`
#[derive(Debug, Clone, Copy)]
struct SkylineNode {
    x: i32,
    y: i32,
    width: i32,
}

/// One page. Coordinates are relative to the top left of the content area,
/// which is the page without its padding.
///
/// Every rectangle is allocated together with the spacing to its right and
/// bottom, and the area is widened by the same spacing so that rectangles
/// may touch the right and bottom edges.
#[derive(Debug)]
struct SkylinePage {
    width: i32,
    height: i32,
    skyline: Vec<SkylineNode>,
    used: Size,
}

impl SkylinePage {
    fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            skyline: vec![SkylineNode { x: 0, y: 0, width }],
            used: Size::default(),
        }
    }

    fn allocate(&mut self, w: i32, h: i32) -> Option<Point> {
        let mut best: Option<(usize, i32, i64)> = None;

        for i in 0..self.skyline.len() {
            if let Some((y, waste)) = self.fit(i, w, h) {
                let better = match best {
                    Some((_, best_y, best_waste)) => {
                        y < best_y || (y == best_y && waste < best_waste)
                    }
                    None => true,
                };

                if better {
                    best = Some((i, y, waste));
                }
            }
        }

        let (idx, y, _) = best?;
        let x = self.skyline[idx].x;

        let right_edge = x + w;
        while idx < self.skyline.len() {
            let node = self.skyline[idx];
            if node.x >= right_edge {
                break;
            }

            let node_right = node.x + node.width;
            if node_right > right_edge {
                self.skyline[idx] = SkylineNode {
                    x: right_edge,
                    y: node.y,
                    width: node_right - right_edge,
                };
                break;
            }

            self.skyline.remove(idx);
        }

        let node = SkylineNode {
            x,
            y: y + h,
            width: w,
        };
        self.skyline.insert(idx, node);
        self.merge();

        Some(Point::new(x, y))
    }

    /// Returns the top of a `w` x `h` rectangle placed at node `idx`, and the
    /// area wasted below it
    fn fit(&self, idx: usize, w: i32, h: i32) -> Option<(i32, i64)> {
        let x = self.skyline[idx].x;
        if !x.checked_add(w).is_some_and(|right| right <= self.width) {
            return None;
        }

        let mut y = 0;
        let mut waste = 0i64;
        let mut remaining_width = w;

        for node in &self.skyline[idx..] {
            if remaining_width <= 0 {
                break;
            }

            if node.y > y {
                waste += i64::from(node.y - y) * i64::from(remaining_width.min(node.width));
                y = node.y;
            }

            if !y.checked_add(h).is_some_and(|bottom| bottom <= self.height) {
                return None;
            }

            remaining_width -= node.width;
        }

        if remaining_width > 0 {
            return None;
        }

        Some((y, waste))
    }

    fn merge(&mut self) {
        let mut i = 0;
        while i + 1 < self.skyline.len() {
            if self.skyline[i].y == self.skyline[i + 1].y {
                self.skyline[i].width += self.skyline[i + 1].width;
                self.skyline.remove(i + 1);
            } else {
                i += 1;
            }
        }
    }
}

/// Skyline bottom-left packer. New pages are opened when a rectangle fits
/// on none of the existing ones.
#[derive(Debug)]
pub struct SkylinePacker {
    max_size: i32,
    spacing: Point,
    padding: Edge,
    pages: Vec<SkylinePage>,
}

impl SkylinePacker {
    /// `max_size` is the width and height limit of a page, including
    /// `padding`
    pub fn new(max_size: i32, spacing: Point, padding: Edge) -> Self {
        Self {
            max_size,
            spacing,
            padding,
            pages: Vec::new(),
        }
    }

    fn content_size(&self) -> Size {
        let horizontal = self.padding.left.saturating_add(self.padding.right);
        let vertical = self.padding.top.saturating_add(self.padding.bottom);

        Size::new(
            self.max_size.saturating_sub(horizontal),
            self.max_size.saturating_sub(vertical),
        )
    }

    fn new_page(&self) -> SkylinePage {
        let content = self.content_size();

        SkylinePage::new(
            content.w.saturating_add(self.spacing.x),
            content.h.saturating_add(self.spacing.y),
        )
    }
}

impl RectPacker for SkylinePacker {
    fn insert(&mut self, size: Size) -> InsertResult {
        if size.is_negative() {
            return InsertResult::rejected(InsertStatus::NegativeSize);
        }

        if size.is_empty() {
            return InsertResult::rejected(InsertStatus::ZeroSize);
        }

        let content = self.content_size();
        if size.w > content.w || size.h > content.h {
            return InsertResult::rejected(InsertStatus::RectTooBig);
        }

        let w = size.w.saturating_add(self.spacing.x);
        let h = size.h.saturating_add(self.spacing.y);

        let placed = self
            .pages
            .iter_mut()
            .enumerate()
            .find_map(|(page_idx, page)| page.allocate(w, h).map(|pos| (page_idx, pos)));

        let (page_idx, pos) = match placed {
            Some(placed) => placed,
            None => {
                let mut page = self.new_page();
                let pos = match page.allocate(w, h) {
                    Some(pos) => pos,
                    None => return InsertResult::rejected(InsertStatus::RectTooBig),
                };

                self.pages.push(page);
                (self.pages.len() - 1, pos)
            }
        };

        let page = &mut self.pages[page_idx];
        page.used.w = page.used.w.max(pos.x + size.w);
        page.used.h = page.used.h.max(pos.y + size.h);

        InsertResult {
            status: InsertStatus::Ok,
            page_idx,
            pos: Point::new(
                pos.x.saturating_add(self.padding.left),
                pos.y.saturating_add(self.padding.top),
            ),
        }
    }

    fn num_pages(&self) -> usize {
        self.pages.len()
    }

    fn page_size(&self, page_idx: usize) -> Size {
        match self.pages.get(page_idx) {
            Some(page) => page.used.padded(self.padding),
            None => Size::default(),
        }
    }
}
