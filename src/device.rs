// The graphics capability consumed by the atlas.
//
// Page creation, region upload and page destruction map 1:1 onto what any
// GPU abstraction offers for 2D textures. `read_page` only exists for the
// diagnostics dump and may stay unimplemented.

use crate::atlas::allocator::Region;

/// Texel layout shared by every page of one atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit RGBA, linear.
    Rgba8,
    /// 8-bit RGBA, sRGB-encoded.
    Rgba8Srgb,
    /// Single 8-bit channel, for glyph and mask sprites.
    R8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::Rgba8 | PixelFormat::Rgba8Srgb => 4,
            PixelFormat::R8 => 1,
        }
    }
}

pub trait AtlasDevice {
    /// One GPU-resident page texture.
    type Page;
    type Error: std::error::Error + 'static;

    fn create_page(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self::Page, Self::Error>;

    /// Uploads tightly packed row-major `pixels` into `region` of `page`.
    ///
    /// The atlas guarantees that `region` lies within the page bounds and
    /// that `pixels` holds exactly
    /// `region.width * region.height * format.bytes_per_pixel()` bytes.
    fn upload_region(
        &mut self,
        page: &mut Self::Page,
        region: Region,
        pixels: &[u8],
    ) -> Result<(), Self::Error>;

    fn destroy_page(&mut self, page: Self::Page);

    /// Reads a full page back as tightly packed bytes, if the device
    /// supports readback. Diagnostics only.
    fn read_page(&mut self, _page: &Self::Page) -> Option<Vec<u8>> {
        None
    }
}
