use crate::constants::*;
use crate::mips::{build_mip_chain, MipLevel};
use crate::textures::DecodedTexture;
use glam::{Mat4, Vec3};
use pack_core::material::srgb_hex_to_linear;
use pack_core::{BoxMesh, MaterialSpec, Session, TextureId, TextureSource};
use std::cell::RefCell;
use web_sys as web;
use wgpu::util::DeviceExt;

mod material;
mod mesh;
mod targets;

use material::GpuMaterial;
use mesh::GpuMesh;
use targets::{ColorTexture, DepthTarget, MsaaTarget};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    key_dir: [f32; 4],
    rim_dir: [f32; 4],
    background: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
}

/// A mesh plus its per-object transform and its six face materials.
struct DrawItem {
    mesh: GpuMesh,
    object_buffer: wgpu::Buffer,
    object_bg: wgpu::BindGroup,
    materials: Vec<GpuMaterial>,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    msaa: MsaaTarget,
    depth: DepthTarget,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    material_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    // Indexed by TextureId; None until the image has been uploaded
    textures: Vec<Option<ColorTexture>>,

    pack: DrawItem,
    cards: Vec<DrawItem>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        session: &RefCell<Session>,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let msaa = targets::create_msaa_target(&device, format, width, height);
        let depth = targets::create_depth_target(&device, width, height);

        let globals_bgl = uniform_bgl(&device, "globals_bgl", wgpu::ShaderStages::VERTEX_FRAGMENT);
        let object_bgl = uniform_bgl(&device, "object_bgl", wgpu::ShaderStages::VERTEX);
        let material_bgl = material::material_bgl(&device);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(pack_core::SCENE_WGSL.into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&globals_bgl, &object_bgl, &material_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[mesh::Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: MSAA_SAMPLES,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("face_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            anisotropy_clamp: MAX_ANISOTROPY,
            ..Default::default()
        });
        let placeholder = targets::create_placeholder(&device, &queue);
        let session = session.borrow();

        // The crimp pattern is procedural, so it is ready immediately; URL
        // textures arrive later through `upload_texture`.
        let mut textures: Vec<Option<ColorTexture>> = Vec::with_capacity(session.textures.len());
        for (_, source) in session.textures.iter() {
            let tex = match source {
                TextureSource::Crimp => crimp_levels().map(|levels| {
                    targets::create_srgb_texture(&device, &queue, "crimp_tex", &levels)
                }),
                TextureSource::Url(_) => None,
            };
            textures.push(tex);
        }

        let builder = ItemBuilder {
            device: &device,
            object_bgl: &object_bgl,
            material_bgl: &material_bgl,
            sampler: &sampler,
            placeholder: &placeholder,
            textures: &textures,
        };
        let pack = builder.build("pack", &session.pack.body, &session.pack.materials);
        let cards = session
            .cards
            .iter()
            .map(|c| builder.build("card", &c.mesh, &c.materials))
            .collect();
        log::info!(
            "[gpu] ready {}x{} {:?}, {} cards",
            width,
            height,
            format,
            session.cards.len()
        );

        let [r, g, b] = srgb_hex_to_linear(BACKGROUND_HEX);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            msaa,
            depth,
            globals_buffer,
            globals_bg,
            material_bgl,
            sampler,
            textures,
            pack,
            cards,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    /// Upload a decoded image and rebind every material that samples it.
    pub fn upload_texture(&mut self, decoded: DecodedTexture) {
        let (width, height) = decoded.size();
        let DecodedTexture { id, levels } = decoded;
        let Some(slot) = self.textures.get_mut(id.0) else {
            log::warn!("[texture] unknown id {:?}; dropped", id);
            return;
        };
        if levels.is_empty() || !levels.iter().all(MipLevel::is_consistent) {
            log::warn!("[texture] {:?} has inconsistent size {}x{}", id, width, height);
            return;
        }
        *slot = Some(targets::create_srgb_texture(&self.device, &self.queue, "face_tex", &levels));

        let view = match self.textures.get(id.0).and_then(|t| t.as_ref()) {
            Some(t) => &t.view,
            None => return,
        };
        let items = std::iter::once(&mut self.pack).chain(self.cards.iter_mut());
        for item in items {
            for m in item.materials.iter_mut() {
                if m.spec.texture == Some(id) {
                    m.rebind(&self.device, &self.material_bgl, view, &self.sampler);
                }
            }
        }
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.msaa =
                targets::create_msaa_target(&self.device, self.config.format, width, height);
            self.depth = targets::create_depth_target(&self.device, width, height);
        }
    }

    fn write_globals(&self, session: &Session) {
        let eye = session.camera.eye;
        let ambient = AMBIENT_INTENSITY;
        let [br, bg, bb] = srgb_hex_to_linear(BACKGROUND_HEX);
        let globals = Globals {
            view_proj: session.camera.view_projection().to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, 1.0],
            ambient: [ambient, ambient, ambient, 1.0],
            key_dir: light_dir(KEY_LIGHT_POS, KEY_LIGHT_INTENSITY),
            rim_dir: light_dir(RIM_LIGHT_POS, RIM_LIGHT_INTENSITY),
            background: [br, bg, bb, 1.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }

    fn write_model(&self, item: &DrawItem, model: Mat4) {
        let u = ObjectUniforms {
            model: model.to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&item.object_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub fn render(&mut self, session: &Session) -> Result<(), wgpu::SurfaceError> {
        self.write_globals(session);
        self.write_model(&self.pack, session.pack.model_matrix());
        for (item, card) in self.cards.iter().zip(&session.cards) {
            self.write_model(item, card.model_matrix());
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa.view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            for item in std::iter::once(&self.pack).chain(self.cards.iter()) {
                draw_item(&mut rpass, item);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Reconfigure after the surface was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

fn draw_item(rpass: &mut wgpu::RenderPass<'_>, item: &DrawItem) {
    rpass.set_bind_group(1, &item.object_bg, &[]);
    rpass.set_vertex_buffer(0, item.mesh.vertex_buffer.slice(..));
    rpass.set_index_buffer(item.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    for group in &item.mesh.groups {
        let Some(mat) = item.materials.get(group.material) else {
            continue;
        };
        rpass.set_bind_group(2, &mat.bind_group, &[]);
        rpass.draw_indexed(group.start..group.start + group.count, 0, 0..1);
    }
}

fn crimp_levels() -> Option<Vec<MipLevel>> {
    let base = image::RgbaImage::from_raw(
        pack_core::crimp::CRIMP_WIDTH,
        pack_core::crimp::CRIMP_HEIGHT,
        pack_core::crimp::crimp_pixels(),
    );
    if base.is_none() {
        log::warn!("[texture] crimp pattern has the wrong size; using placeholder");
    }
    base.map(build_mip_chain)
}

#[inline]
fn light_dir(pos: [f32; 3], intensity: f32) -> [f32; 4] {
    let d = Vec3::from(pos).normalize_or_zero();
    [d.x, d.y, d.z, intensity]
}

fn uniform_bgl(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

struct ItemBuilder<'r> {
    device: &'r wgpu::Device,
    object_bgl: &'r wgpu::BindGroupLayout,
    material_bgl: &'r wgpu::BindGroupLayout,
    sampler: &'r wgpu::Sampler,
    placeholder: &'r ColorTexture,
    textures: &'r [Option<ColorTexture>],
}

impl ItemBuilder<'_> {
    fn view_for(&self, texture: Option<TextureId>) -> &wgpu::TextureView {
        texture
            .and_then(|id| self.textures.get(id.0))
            .and_then(|t| t.as_ref())
            .map(|t| &t.view)
            .unwrap_or(&self.placeholder.view)
    }

    fn build(&self, label: &str, body: &BoxMesh, specs: &[MaterialSpec]) -> DrawItem {
        let mesh = mesh::upload_mesh(self.device, label, body);
        let object_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(&ObjectUniforms {
                    model: Mat4::IDENTITY.to_cols_array_2d(),
                }),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let object_bg = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout: self.object_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_buffer.as_entire_binding(),
            }],
        });
        let materials = specs
            .iter()
            .map(|spec| {
                GpuMaterial::new(
                    self.device,
                    self.material_bgl,
                    spec,
                    self.view_for(spec.texture),
                    self.sampler,
                )
            })
            .collect();
        DrawItem {
            mesh,
            object_buffer,
            object_bg,
            materials,
        }
    }
}
