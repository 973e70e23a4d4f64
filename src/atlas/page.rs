// One backing page: the device handle plus its placement state.
//
// Pages never shrink or move; a page that stops being the most recent one
// simply never sees another placement attempt.

use crate::atlas::allocator::{Allocator, Region};

#[derive(Debug)]
pub struct Page<H> {
    handle: H,
    allocator: Allocator,
}

impl<H> Page<H> {
    pub fn new(handle: H, width: u32, height: u32) -> Self {
        Self {
            handle,
            allocator: Allocator::new(width, height),
        }
    }

    pub fn allocate(&mut self, width: u32, height: u32) -> Option<Region> {
        self.allocator.allocate(width, height)
    }

    pub fn allocations(&self) -> usize {
        self.allocator.allocations()
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    pub fn into_handle(self) -> H {
        self.handle
    }
}
