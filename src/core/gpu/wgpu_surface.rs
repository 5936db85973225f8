use std::sync::mpsc;

use log::{debug, info, warn};
use wgpu::util::DeviceExt;

use crate::core::data::colour::Colour;
use crate::core::data::dimensions::Dimensions;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::fractals::strategy::ShaderSource;
use crate::core::gpu::errors::SurfaceError;
use crate::core::gpu::readback::{padded_bytes_per_row, unpad_rows};
use crate::core::gpu::surface::{OffscreenSurface, SurfaceFactory};
use crate::core::gpu::uniforms::UniformBlock;
use crate::core::gpu::SHADER_ENTRY_POINT;

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
const BYTES_PER_PIXEL: u32 = 4;

const QUAD_VERTICES: [f32; 12] = [
    -1.0, 1.0, 0.0, //
    -1.0, -1.0, 0.0, //
    1.0, -1.0, 0.0, //
    1.0, 1.0, 0.0,
];
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];
const QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// Resources built for one size/program/palette combination.
struct Target {
    dimensions: Dimensions,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    palette: wgpu::Texture,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    readback: wgpu::Buffer,
    padded_bytes_per_row: u32,
}

/// Headless wgpu device rendering into an RGBA texture.
pub struct WgpuSurface {
    device: wgpu::Device,
    queue: wgpu::Queue,
    target: Option<Target>,
}

impl WgpuSurface {
    pub fn new() -> Result<Self, SurfaceError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| SurfaceError::Unavailable("no suitable GPU adapter".to_owned()))?;

        info!("GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("fractal offscreen device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
            },
            None,
        ))
        .map_err(|err| SurfaceError::Unavailable(err.to_string()))?;

        device.on_uncaptured_error(Box::new(|error| {
            warn!("uncaptured GPU error: {}", error);
        }));

        Ok(Self {
            device,
            queue,
            target: None,
        })
    }

    /// Factory creating a fresh device each time the renderer needs one.
    #[must_use]
    pub fn factory() -> SurfaceFactory {
        Box::new(|| Ok(Box::new(Self::new()?) as Box<dyn OffscreenSurface>))
    }

    fn build_target(
        &self,
        dimensions: Dimensions,
        vertex: &wgpu::ShaderModule,
        fragment: &wgpu::ShaderModule,
        palette: &[u32],
    ) -> Target {
        let device = &self.device;
        let size = wgpu::Extent3d {
            width: dimensions.width(),
            height: dimensions.height(),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("fractal target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let palette_texture = self.upload_palette(palette);
        let palette_view = palette_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("palette sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fractal uniforms"),
            size: std::mem::size_of::<UniformBlock>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("fractal bind group layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fractal bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&palette_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("fractal pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("fractal pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: vertex,
                entry_point: SHADER_ENTRY_POINT,
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (3 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &QUAD_ATTRIBUTES,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment,
                entry_point: SHADER_ENTRY_POINT,
                targets: &[Some(wgpu::ColorTargetState {
                    format: TARGET_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad vertices"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let padded = padded_bytes_per_row(
            dimensions.width(),
            BYTES_PER_PIXEL,
            wgpu::COPY_BYTES_PER_ROW_ALIGNMENT,
        );
        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fractal readback"),
            size: u64::from(padded) * u64::from(dimensions.height()),
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Target {
            dimensions,
            texture,
            view,
            palette: palette_texture,
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            readback,
            padded_bytes_per_row: padded,
        }
    }

    /// Uploads the palette as an N×1 RGBA texture.
    fn upload_palette(&self, palette: &[u32]) -> wgpu::Texture {
        let mut bytes: Vec<u8> = palette
            .iter()
            .flat_map(|&argb| Colour::from_argb(argb).to_rgba_bytes())
            .collect();
        if bytes.is_empty() {
            bytes.extend_from_slice(&Colour::BLACK.to_rgba_bytes());
        }
        let width = bytes.len() as u32 / BYTES_PER_PIXEL;
        let size = wgpu::Extent3d {
            width,
            height: 1,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("palette"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &bytes,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(width * BYTES_PER_PIXEL),
                rows_per_image: Some(1),
            },
            size,
        );

        texture
    }

    fn pop_error(&self) -> Option<wgpu::Error> {
        pollster::block_on(self.device.pop_error_scope())
    }
}

fn classify(error: wgpu::Error, on_validation: fn(String) -> SurfaceError) -> SurfaceError {
    match error {
        wgpu::Error::OutOfMemory { .. } => SurfaceError::Lost,
        other => on_validation(other.to_string()),
    }
}

impl OffscreenSurface for WgpuSurface {
    fn initialize(
        &mut self,
        dimensions: Dimensions,
        shaders: &ShaderSource,
        palette: &[u32],
    ) -> Result<(), SurfaceError> {
        self.release();

        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let vertex = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fractal vertex shader"),
            source: wgpu::ShaderSource::Wgsl(shaders.vertex.as_str().into()),
        });
        let fragment = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fractal fragment shader"),
            source: wgpu::ShaderSource::Wgsl(shaders.fragment.as_str().into()),
        });
        let target = self.build_target(dimensions, &vertex, &fragment, palette);
        let validation = self.pop_error();
        let memory = self.pop_error();

        if let Some(error) = memory.or(validation) {
            return Err(classify(error, SurfaceError::ShaderCompilation));
        }

        debug!(
            "wgpu surface ready at {}x{} ({} padded bytes per row)",
            dimensions.width(),
            dimensions.height(),
            target.padded_bytes_per_row
        );
        self.target = Some(target);
        Ok(())
    }

    fn draw(&mut self, uniforms: &UniformBlock) -> Result<(), SurfaceError> {
        let target = self.target.as_ref().ok_or(SurfaceError::Lost)?;

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        self.queue
            .write_buffer(&target.uniform_buffer, 0, bytemuck::bytes_of(uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("fractal frame"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("fractal pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&target.pipeline);
            pass.set_bind_group(0, &target.bind_group, &[]);
            pass.set_vertex_buffer(0, target.vertex_buffer.slice(..));
            pass.set_index_buffer(target.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
        }

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &target.readback,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(target.padded_bytes_per_row),
                    rows_per_image: Some(target.dimensions.height()),
                },
            },
            wgpu::Extent3d {
                width: target.dimensions.width(),
                height: target.dimensions.height(),
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(Some(encoder.finish()));

        match self.pop_error() {
            Some(error) => Err(classify(error, SurfaceError::Readback)),
            None => Ok(()),
        }
    }

    fn read_back(&mut self) -> Result<PixelBuffer, SurfaceError> {
        let target = self.target.as_ref().ok_or(SurfaceError::Lost)?;
        let slice = target.readback.slice(..);

        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        match receiver.recv() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!("readback mapping failed: {}", err);
                return Err(SurfaceError::Lost);
            }
            Err(_) => {
                return Err(SurfaceError::Readback(
                    "map callback never ran".to_owned(),
                ));
            }
        }

        let width = target.dimensions.width() as usize;
        let height = target.dimensions.height() as usize;
        let bytes = {
            let mapped = slice.get_mapped_range();
            unpad_rows(
                &mapped,
                width * BYTES_PER_PIXEL as usize,
                target.padded_bytes_per_row as usize,
                height,
            )
        };
        target.readback.unmap();

        PixelBuffer::from_rgba_bytes(target.dimensions, &bytes)
            .map_err(|err| SurfaceError::Readback(err.to_string()))
    }

    fn release(&mut self) {
        if let Some(target) = self.target.take() {
            target.texture.destroy();
            target.palette.destroy();
            target.readback.destroy();
            debug!("wgpu surface released");
        }
    }
}
