// Rectangle placement for a single atlas page.
//
// Guillotine free-rectangle search: every accepted placement is carved out
// of one free rectangle and the remainder is reinserted as a right strip
// beside the placement and a bottom strip below it. Selection is
// best-area-fit with ties broken by the earliest free-list entry, so a
// given request sequence always produces the same layout.

#[allow(unused_imports)]
use log::{debug, trace, warn};

/// A placed or free rectangle within one page, in texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn intersects(&self, other: &Region) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Free-space bookkeeping for one fixed-size page. Purely geometric; the
/// pixel data lives with the device.
#[derive(Debug)]
pub struct Allocator {
    width: u32,
    height: u32,
    free: Vec<Region>,
    allocations: usize,
}

impl Allocator {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            free: vec![Region {
                x: 0,
                y: 0,
                width,
                height,
            }],
            allocations: 0,
        }
    }

    /// Finds space for a `width` x `height` rectangle.
    ///
    /// The returned region never overlaps a previously returned one and
    /// lies fully inside the page. `None` means no free rectangle fits:
    /// the page is exhausted for this request. Requests that are empty or
    /// larger than the page can never fit and also return `None`, though
    /// callers are expected to reject those up front.
    pub fn allocate(&mut self, width: u32, height: u32) -> Option<Region> {
        if width == 0 || height == 0 || width > self.width || height > self.height {
            return None;
        }

        let requested = width as u64 * height as u64;
        let mut best: Option<(usize, u64)> = None;

        for (index, region) in self.free.iter().enumerate() {
            if width <= region.width && height <= region.height {
                let leftover = region.area() - requested;
                match best {
                    Some((_, smallest)) if leftover >= smallest => {}
                    _ => best = Some((index, leftover)),
                }
            }
        }

        let (index, _) = best?;
        let free = self.free.remove(index);

        let placed = Region {
            x: free.x,
            y: free.y,
            width,
            height,
        };

        // Right strip spans the placement's rows, bottom strip spans the
        // whole free rectangle.
        let right = Region {
            x: free.x + width,
            y: free.y,
            width: free.width - width,
            height,
        };
        let bottom = Region {
            x: free.x,
            y: free.y + height,
            width: free.width,
            height: free.height - height,
        };

        if right.width > 0 && right.height > 0 {
            self.free.push(right);
        }
        if bottom.width > 0 && bottom.height > 0 {
            self.free.push(bottom);
        }

        self.allocations += 1;
        trace!(
            "placed {}x{} at ({}, {}), {} free rects left",
            width,
            height,
            placed.x,
            placed.y,
            self.free.len()
        );

        Some(placed)
    }

    pub fn allocations(&self) -> usize {
        self.allocations
    }

    pub fn is_empty(&self) -> bool {
        self.allocations == 0
    }
}
