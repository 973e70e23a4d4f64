// wgpu-backed atlas device.
//
// Pages are plain 2D textures; uploads go through `Queue::write_texture`,
// which handles row alignment on its own. Readback is not wired up, so
// `save_pages` skips wgpu-backed pages.

use std::convert::Infallible;
use std::sync::Arc;

#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::atlas::allocator::Region;
use crate::device::{AtlasDevice, PixelFormat};

pub struct WgpuAtlasDevice {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
}

impl WgpuAtlasDevice {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        Self { device, queue }
    }
}

fn texture_format(format: PixelFormat) -> wgpu::TextureFormat {
    match format {
        PixelFormat::Rgba8 => wgpu::TextureFormat::Rgba8Unorm,
        PixelFormat::Rgba8Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
        PixelFormat::R8 => wgpu::TextureFormat::R8Unorm,
    }
}

impl AtlasDevice for WgpuAtlasDevice {
    type Page = wgpu::Texture;
    type Error = Infallible;

    fn create_page(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<wgpu::Texture, Infallible> {
        debug!("creating {}x{} {:?} atlas page texture", width, height, format);

        Ok(self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("spriteskater atlas page"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: texture_format(format),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        }))
    }

    fn upload_region(
        &mut self,
        page: &mut wgpu::Texture,
        region: Region,
        pixels: &[u8],
    ) -> Result<(), Infallible> {
        // The atlas hands over tightly packed rows, so the row stride
        // falls out of the buffer length.
        let bytes_per_row = pixels.len() as u32 / region.height;

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: page,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: region.x,
                    y: region.y,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(region.height),
            },
            wgpu::Extent3d {
                width: region.width,
                height: region.height,
                depth_or_array_layers: 1,
            },
        );

        Ok(())
    }

    fn destroy_page(&mut self, page: wgpu::Texture) {
        page.destroy();
    }
}
