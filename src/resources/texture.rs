use anyhow::Context;

use crate::{data_structures::texture::Texture, resources::load_binary};

/// Layout of a single texture bind group: the view at binding 0 and its
/// sampler at binding 1, both visible to the fragment stage.
pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
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
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("Mesh texture_bind_group_layout"),
    })
}

/// Decodes an image file into RGB pixels usable as a grid heightmap.
pub fn load_heightmap(file_name: &str) -> anyhow::Result<image::RgbImage> {
    let data = load_binary(file_name)?;
    let img = image::load_from_memory(&data)
        .with_context(|| format!("Unable to decode heightmap {file_name}"))?;
    Ok(img.to_rgb8())
}

pub fn load_texture(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<Texture> {
    let data = load_binary(file_name)?;
    Texture::from_bytes(device, queue, &data, file_name, layout)
}
