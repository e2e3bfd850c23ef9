//! Texture Loading Module
//!
//! Loads the grass texture from disk and uploads it to the GPU. There is no
//! generated fallback: a missing or undecodable asset stops startup with a
//! [`TextureError`].

use std::path::Path;

use crate::core::error::TextureError;

/// On-disk location of the ground texture, relative to the working directory.
pub const GRASS_TEXTURE_PATH: &str = "textures/grass.png";

// ============================================================================
// Texture Loading
// ============================================================================

/// Decoded texture data ready for GPU upload.
#[derive(Debug)]
pub struct TextureData {
    /// RGBA pixel data.
    pub data: Vec<u8>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
}

impl TextureData {
    /// Loads and decodes a texture from disk.
    ///
    /// # Arguments
    /// * `path` - Path to the image file.
    ///
    /// # Returns
    /// `TextureData` with RGBA pixels, or a [`TextureError`] naming the path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| TextureError {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        })?;
        let data = Self::from_bytes(&bytes).map_err(|source| TextureError {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Loaded texture: {} ({}x{})",
            path.display(),
            data.width,
            data.height
        );
        Ok(data)
    }

    /// Decodes texture data from an in-memory image file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Uploads the pixel data to a new GPU texture and returns its view.
    ///
    /// # Arguments
    /// * `device` - WebGPU device.
    /// * `queue` - WebGPU queue for data upload.
    /// * `label` - Debug label for the texture.
    pub fn create_texture(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}

// ============================================================================
// Sampler Creation
// ============================================================================

/// Creates the ground sampler: repeat wrapping with nearest filtering, so the
/// grass tiles hard-edged across the plane.
pub fn create_ground_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Ground Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::FilterMode::Nearest,
        lod_min_clamp: 0.0,
        lod_max_clamp: 32.0,
        compare: None,
        anisotropy_clamp: 1,
        border_color: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn decodes_a_generated_png() {
        let img = RgbaImage::from_pixel(4, 2, Rgba([10, 200, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let data = TextureData::from_bytes(&bytes).unwrap();
        assert_eq!(data.width, 4);
        assert_eq!(data.height, 2);
        assert_eq!(data.data.len(), 4 * 2 * 4);
        assert_eq!(&data.data[0..4], &[10, 200, 30, 255]);
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(TextureData::from_bytes(b"not an image").is_err());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = TextureData::from_file("textures/definitely-missing.png").unwrap_err();
        assert_eq!(err.path, Path::new("textures/definitely-missing.png"));
        assert!(err.to_string().contains("definitely-missing.png"));
    }
}
