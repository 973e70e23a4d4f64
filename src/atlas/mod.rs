// Sprite atlas module
//
// `SpriteAtlas` packs hashed sprites across a growing list of fixed-size
// pages; `Allocator` handles the rectangle placement within one page.

pub mod allocator;
pub mod atlas;
pub mod page;

pub use allocator::{Allocator, Region};
pub use atlas::SpriteAtlas;
pub use page::Page;

/// Conventional page edge length when the host has no better idea.
pub const DEFAULT_PAGE_SIZE: u32 = 1024 * 4;
