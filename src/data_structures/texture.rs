//! Texture capabilities consumed by meshes and the grid generator.
//!
//! [`TextureData`] is the read-only pixel view needed for heightmap sampling.
//! [`Texture`] wraps the WGPU texture objects together with a bind group so a
//! mesh can bind it to a slot without owning it.

use anyhow::*;
use image::GenericImageView;

/// Number of interleaved channels per texel in [`TextureData::data`].
pub const CHANNEL_STRIDE: usize = 3;

/// Raw RGB pixel access.
///
/// `data()` is expected to hold `width() * height()` texels, row by row, each
/// texel being [`CHANNEL_STRIDE`] bytes with red first.
pub trait TextureData {
    fn data(&self) -> &[u8];
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

impl TextureData for image::RgbImage {
    fn data(&self) -> &[u8] {
        self.as_raw()
    }

    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }
}

/// A GPU texture with a view, sampler and the bind group exposing both.
///
/// The RGB pixels stay available on the CPU so the same texture can also
/// drive [`crate::data_structures::mesh::Mesh::gen_grid`].
#[derive(Clone, Debug)]
pub struct Texture {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
    pixels: image::RgbImage,
}

impl Texture {
    /// Load a texture from raw byte data (image file contents).
    ///
    /// # Arguments
    ///
    /// * `bytes` represent raw image file data (PNG, JPEG, etc.)
    /// * `label` is used as a debug name for the GPU resource
    /// * `layout` is the layout the bind group is created against, usually
    ///   [`crate::resources::texture::texture_layout`]
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
        layout: &wgpu::BindGroupLayout,
    ) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .with_context(|| format!("Unable to decode texture {label}"))?;
        Ok(Self::from_image(device, queue, &img, Some(label), layout))
    }

    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let dimensions = img.dimensions();
        let rgba = img.to_rgba8();

        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
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
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_default_sampler(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label,
        });

        Self {
            texture,
            view,
            sampler,
            bind_group,
            pixels: img.to_rgb8(),
        }
    }

    /// Bind this texture to bind group slot `unit` of the current pass.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>, unit: u32) {
        render_pass.set_bind_group(unit, &self.bind_group, &[]);
    }
}

impl TextureData for Texture {
    fn data(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }
}

pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
