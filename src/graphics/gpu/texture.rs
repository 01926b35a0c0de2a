use image::GenericImageView;
use thiserror::Error;

use crate::graphics::gpu::GpuContext;

/// Texel data ready to be copied into a texture.
pub struct TextureData {
    rgba: image::RgbaImage,
    width: u32,
    height: u32,
}

impl TextureData {
    /// Bytes per RGBA8 texel.
    pub const BYTES_PER_TEXEL: u32 = 4;

    /// Convert an image into tightly packed RGBA8 rows.
    pub fn from_image(img: &image::DynamicImage) -> TextureResult<Self> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyImage { width, height });
        }
        Ok(Self {
            rgba: img.to_rgba8(),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw texel bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.rgba
    }

    /// The size of the texture this data fills.
    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }

    /// How the bytes are laid out for the copy.
    pub fn layout(&self) -> wgpu::TexelCopyBufferLayout {
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(Self::BYTES_PER_TEXEL * self.width),
            rows_per_image: Some(self.height),
        }
    }
}

/// A sampled image texture.
///
/// Only the view and sampler are kept; the view holds on to the texture itself.
#[derive(Clone, Debug)]
pub struct GpuTexture {
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl GpuTexture {
    /// The format textures loaded from images are stored in.
    pub const IMAGE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// The bind group layout entries for a sampled texture.
    pub const BIND_GROUP_LAYOUT_ENTRIES: [wgpu::BindGroupLayoutEntry; 2] = [
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            // This should match the filterable field of the corresponding Texture entry above.
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        },
    ];

    /// Sampler settings for image textures.
    pub fn sampler_descriptor(label: Option<&str>) -> wgpu::SamplerDescriptor<'_> {
        wgpu::SamplerDescriptor {
            label,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        }
    }

    /// Creates a texture from an image and uploads its texels.
    pub fn from_image(
        gpu: &GpuContext,
        img: &image::DynamicImage,
        label: Option<&str>,
    ) -> TextureResult<Self> {
        let data = TextureData::from_image(img)?;
        log::info!("texture size: {}x{}", data.width(), data.height());

        let device = gpu.device();
        let queue = gpu.queue();

        let size = data.extent();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::IMAGE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            data.bytes(),
            data.layout(),
            size,
        );
        log::info!("copied texture data");

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&Self::sampler_descriptor(label));

        Ok(Self { view, sampler })
    }

    /// The bind group entries matching `BIND_GROUP_LAYOUT_ENTRIES`.
    pub fn bind_group_entries(&self) -> [wgpu::BindGroupEntry<'_>; 2] {
        [
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&self.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&self.sampler),
            },
        ]
    }
}

/// An error from creating a texture.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("Image has no texels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// A result from texture creation.
pub type TextureResult<T> = Result<T, TextureError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32) -> image::DynamicImage {
        image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([10, 20, 30, 255]),
        ))
    }

    #[test]
    fn rows_are_tightly_packed_rgba() {
        let data = TextureData::from_image(&solid(3, 5)).unwrap();
        let layout = data.layout();
        assert_eq!(layout.offset, 0);
        assert_eq!(layout.bytes_per_row, Some(12));
        assert_eq!(layout.rows_per_image, Some(5));
        assert_eq!(data.bytes().len(), 3 * 5 * 4);
    }

    #[test]
    fn extent_is_single_layer() {
        let extent = TextureData::from_image(&solid(7, 2)).unwrap().extent();
        assert_eq!((extent.width, extent.height, extent.depth_or_array_layers), (7, 2, 1));
    }

    #[test]
    fn rgb_images_gain_an_opaque_alpha_channel() {
        let rgb = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            1,
            1,
            image::Rgb([1, 2, 3]),
        ));
        let data = TextureData::from_image(&rgb).unwrap();
        assert_eq!(data.bytes(), &[1, 2, 3, 255]);
    }

    #[test]
    fn empty_image_is_rejected() {
        let err = TextureData::from_image(&solid(0, 4)).err().unwrap();
        assert!(matches!(err, TextureError::EmptyImage { width: 0, height: 4 }));
    }

    #[test]
    fn sampler_clamps_and_filters() {
        let desc = GpuTexture::sampler_descriptor(None);
        assert_eq!(desc.address_mode_u, wgpu::AddressMode::ClampToEdge);
        assert_eq!(desc.address_mode_v, wgpu::AddressMode::ClampToEdge);
        assert_eq!(desc.address_mode_w, wgpu::AddressMode::ClampToEdge);
        assert_eq!(desc.mag_filter, wgpu::FilterMode::Linear);
        assert_eq!(desc.min_filter, wgpu::FilterMode::Nearest);
        assert_eq!(desc.mipmap_filter, wgpu::FilterMode::Nearest);
    }

    #[test]
    fn layout_binds_texture_then_sampler_for_fragment() {
        let [texture, sampler] = GpuTexture::BIND_GROUP_LAYOUT_ENTRIES;
        assert_eq!(texture.binding, 0);
        assert_eq!(sampler.binding, 1);
        assert_eq!(texture.visibility, wgpu::ShaderStages::FRAGMENT);
        assert!(matches!(
            sampler.ty,
            wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering)
        ));
    }
}
