use crate::constants::{DEPTH_FORMAT, MSAA_SAMPLES, TEXTURE_FORMAT};
use crate::mips::MipLevel;

pub(crate) struct DepthTarget {
    #[allow(dead_code)]
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

fn attachment(
    device: &wgpu::Device,
    label: &str,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: MSAA_SAMPLES,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

/// Multisampled depth buffer matching the colour target.
pub(crate) fn create_depth_target(device: &wgpu::Device, width: u32, height: u32) -> DepthTarget {
    let (texture, view) = attachment(device, "depth_tex", DEPTH_FORMAT, width, height);
    DepthTarget { texture, view }
}

/// Multisampled colour buffer, resolved into the swapchain each frame.
pub(crate) struct MsaaTarget {
    #[allow(dead_code)]
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

pub(crate) fn create_msaa_target(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> MsaaTarget {
    let (texture, view) = attachment(device, "msaa_tex", format, width, height);
    MsaaTarget { texture, view }
}

pub(crate) struct ColorTexture {
    #[allow(dead_code)]
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

/// sRGB colour texture with one mip per entry in `levels` (base first).
/// Callers check `MipLevel::is_consistent` and pass at least one level.
pub(crate) fn create_srgb_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    levels: &[MipLevel],
) -> ColorTexture {
    let (width, height) = levels.first().map_or((1, 1), |l| (l.width, l.height));
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: levels.len().max(1) as u32,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TEXTURE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    for (i, level) in levels.iter().enumerate() {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: i as u32,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &level.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * level.width),
                rows_per_image: Some(level.height),
            },
            wgpu::Extent3d {
                width: level.width,
                height: level.height,
                depth_or_array_layers: 1,
            },
        );
    }
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    ColorTexture { texture, view }
}

/// 1x1 white stand-in shown until a face's image arrives.
pub(crate) fn create_placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> ColorTexture {
    let white = MipLevel {
        width: 1,
        height: 1,
        rgba: vec![0xff; 4],
    };
    create_srgb_texture(device, queue, "placeholder_tex", &[white])
}
