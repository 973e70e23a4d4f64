// Error taxonomy for atlas insertions.
//
// Invalid input and the capacity ceiling are caught before any page or
// device interaction; device errors are wrapped and passed through
// unchanged. Lookups never error.

use thiserror::Error;

use crate::device::PixelFormat;

#[derive(Debug, Error)]
pub enum AtlasError<E> {
    /// Zero-sized sprites cannot be packed.
    #[error("sprite dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: u32, height: u32 },

    /// The pixel buffer length disagrees with the sprite dimensions and
    /// the atlas pixel format.
    #[error("pixel buffer is {actual} bytes, expected {expected} for {width}x{height} {format:?}")]
    PixelSizeMismatch {
        width: u32,
        height: u32,
        format: PixelFormat,
        expected: usize,
        actual: usize,
    },

    /// The sprite is larger than a full page, so no amount of page
    /// growth can ever fit it.
    #[error("sprite {width}x{height} exceeds the {page_width}x{page_height} page size")]
    SpriteExceedsPage {
        width: u32,
        height: u32,
        page_width: u32,
        page_height: u32,
    },

    /// The graphics device refused a page creation or upload. Not retried
    /// here; retrying without freeing memory elsewhere is futile.
    #[error("graphics device error: {0}")]
    Device(#[source] E),
}
