//! Dynamic sprite atlas packing and caching for GPU renderers.
//!
//! Sprites are keyed by a caller-supplied content hash and packed into a
//! growing list of fixed-size texture pages. A sprite is uploaded once and
//! stays at its page and region until the atlas is dropped, so render loops
//! can keep hammering [`SpriteAtlas::insert`] and [`SpriteAtlas::lookup`]
//! without re-uploading anything.
//!
//! The GPU itself sits behind the [`AtlasDevice`] trait; enable the `wgpu`
//! feature for a ready-made backend over a `wgpu::Device`/`wgpu::Queue`
//! pair.

pub mod atlas;
pub mod device;
pub mod error;
#[cfg(feature = "wgpu")]
pub mod wgpu_device;

pub use atlas::allocator::{Allocator, Region};
pub use atlas::{SpriteAtlas, DEFAULT_PAGE_SIZE};
pub use device::{AtlasDevice, PixelFormat};
pub use error::AtlasError;
#[cfg(feature = "wgpu")]
pub use wgpu_device::WgpuAtlasDevice;
