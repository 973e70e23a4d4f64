// The sprite atlas: a hash-indexed cache of sprites packed across a
// growing list of fixed-size GPU pages.
//
// Pages are append-only. The active page is always the most recently
// created one, so a region handed out once stays valid until the whole
// atlas is dropped. There is no defragmentation and no per-sprite removal.

use std::collections::HashMap;
use std::path::Path;

use bytemuck::Pod;

#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::atlas::allocator::Region;
use crate::atlas::page::Page;
use crate::device::{AtlasDevice, PixelFormat};
use crate::error::AtlasError;

/// Where a packed sprite ended up.
#[derive(Debug, Clone, Copy)]
struct SpriteRecord {
    page: usize,
    region: Region,
}

pub struct SpriteAtlas<D: AtlasDevice> {
    device: D,
    page_width: u32,
    page_height: u32,
    format: PixelFormat,
    pages: Vec<Page<D::Page>>,
    records: HashMap<u32, SpriteRecord>,
    hits: usize,
}

impl<D: AtlasDevice> SpriteAtlas<D> {
    /// Creates an empty atlas over `device`. No page is allocated until
    /// the first sprite arrives.
    pub fn new(device: D, page_width: u32, page_height: u32, format: PixelFormat) -> Self {
        info!(
            "creating sprite atlas with {}x{} {:?} pages",
            page_width, page_height, format
        );

        Self {
            device,
            page_width,
            page_height,
            format,
            pages: Vec::new(),
            records: HashMap::new(),
            hits: 0,
        }
    }

    /// Packs and uploads a sprite under `hash`.
    ///
    /// The hash is trusted as a content digest: a hash the atlas has seen
    /// before is a no-op regardless of `pixels`, so two different images
    /// must never share one. `pixels` is tightly packed row-major data
    /// matching `width`, `height` and the atlas pixel format; any `Pod`
    /// element type works as long as the byte length comes out right.
    ///
    /// On failure the hash index is untouched and the sprite can be
    /// retried later.
    pub fn insert<P: Pod>(
        &mut self,
        hash: u32,
        pixels: &[P],
        width: u32,
        height: u32,
    ) -> Result<(), AtlasError<D::Error>> {
        if self.records.contains_key(&hash) {
            self.hits += 1;
            if self.hits.is_multiple_of(100) {
                debug!(
                    "sprite atlas: {} hits, {} sprites, {} pages",
                    self.hits,
                    self.records.len(),
                    self.pages.len()
                );
            }
            return Ok(());
        }

        if width == 0 || height == 0 {
            warn!(
                "rejecting sprite {:#010x}: empty dimensions {}x{}",
                hash, width, height
            );
            return Err(AtlasError::InvalidDimensions { width, height });
        }

        if width > self.page_width || height > self.page_height {
            warn!(
                "rejecting sprite {:#010x}: {}x{} exceeds the {}x{} page",
                hash, width, height, self.page_width, self.page_height
            );
            return Err(AtlasError::SpriteExceedsPage {
                width,
                height,
                page_width: self.page_width,
                page_height: self.page_height,
            });
        }

        let bytes: &[u8] = bytemuck::cast_slice(pixels);
        let expected = width as usize * height as usize * self.format.bytes_per_pixel() as usize;
        if bytes.len() != expected {
            warn!(
                "rejecting sprite {:#010x}: {} pixel bytes, expected {}",
                hash,
                bytes.len(),
                expected
            );
            return Err(AtlasError::PixelSizeMismatch {
                width,
                height,
                format: self.format,
                expected,
                actual: bytes.len(),
            });
        }

        if self.pages.is_empty() {
            self.grow()?;
        }

        let mut page_index = self.pages.len() - 1;
        let region = match self.pages[page_index].allocate(width, height) {
            Some(region) => region,
            None => {
                // The active page is exhausted. It stays valid for lookups
                // but never accepts another placement; packing moves to a
                // fresh page and is retried exactly once.
                self.grow()?;
                page_index = self.pages.len() - 1;
                match self.pages[page_index].allocate(width, height) {
                    Some(region) => region,
                    None => {
                        return Err(AtlasError::SpriteExceedsPage {
                            width,
                            height,
                            page_width: self.page_width,
                            page_height: self.page_height,
                        })
                    }
                }
            }
        };

        self.device
            .upload_region(self.pages[page_index].handle_mut(), region, bytes)
            .map_err(AtlasError::Device)?;

        // Committed only after the upload went through.
        self.records.insert(hash, SpriteRecord { page: page_index, region });
        debug!(
            "packed sprite {:#010x} at ({}, {}) on page {}",
            hash, region.x, region.y, page_index
        );

        Ok(())
    }

    /// Returns the page and region a sprite was packed into, or `None`
    /// for a hash the atlas has never accepted. O(1), never mutates.
    pub fn lookup(&self, hash: u32) -> Option<(&D::Page, Region)> {
        let record = self.records.get(&hash)?;
        Some((self.pages[record.page].handle(), record.region))
    }

    pub fn contains(&self, hash: u32) -> bool {
        self.records.contains_key(&hash)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn sprite_count(&self) -> usize {
        self.records.len()
    }

    pub fn page_size(&self) -> (u32, u32) {
        (self.page_width, self.page_height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Direct device access. Uploads into atlas-owned pages outside of
    /// [`insert`](Self::insert) are on the caller.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Dumps every readable page to `dir` as `{name}_atlas_{index}.png`
    /// and returns how many pages were written.
    ///
    /// Pages the device cannot read back are skipped. Debug tooling only,
    /// not part of the steady-state contract.
    pub fn save_pages(
        &mut self,
        dir: impl AsRef<Path>,
        name: &str,
    ) -> Result<usize, image::ImageError> {
        let dir = dir.as_ref();
        let mut written = 0;

        for index in 0..self.pages.len() {
            let pixels = match self.device.read_page(self.pages[index].handle()) {
                Some(pixels) => pixels,
                None => {
                    debug!("page {} has no readback, skipping dump", index);
                    continue;
                }
            };

            let color = match self.format {
                PixelFormat::Rgba8 | PixelFormat::Rgba8Srgb => image::ExtendedColorType::Rgba8,
                PixelFormat::R8 => image::ExtendedColorType::L8,
            };

            let path = dir.join(format!("{}_atlas_{}.png", name, index));
            image::save_buffer(&path, &pixels, self.page_width, self.page_height, color)?;
            info!("saved atlas page {} to {}", index, path.display());
            written += 1;
        }

        Ok(written)
    }

    /// Releases every page. Consuming `self` makes further calls
    /// impossible; dropping the atlas has the same effect.
    pub fn dispose(self) {}

    fn grow(&mut self) -> Result<(), AtlasError<D::Error>> {
        let handle = self
            .device
            .create_page(self.page_width, self.page_height, self.format)
            .map_err(AtlasError::Device)?;

        info!(
            "sprite atlas: created page {} ({}x{} {:?})",
            self.pages.len(),
            self.page_width,
            self.page_height,
            self.format
        );
        self.pages
            .push(Page::new(handle, self.page_width, self.page_height));

        Ok(())
    }
}

impl<D: AtlasDevice> Drop for SpriteAtlas<D> {
    fn drop(&mut self) {
        debug!(
            "dropping sprite atlas: {} sprites across {} pages",
            self.records.len(),
            self.pages.len()
        );

        self.records.clear();
        for page in self.pages.drain(..) {
            self.device.destroy_page(page.into_handle());
        }
    }
}
