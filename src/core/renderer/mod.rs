//! Renderer Module
//!
//! Handles frame rendering using WebGPU.
//! Draws the fixed scene each frame, in this order:
//! - Sky cube around the viewer (depth test disabled)
//! - Player marker cube pinned ahead of the camera
//! - Textured ground plane
//! - Spinning color cube and a white landmark cube
//!
//! Every object owns its own uniform buffer, so all matrix uploads happen
//! before the render pass is encoded.

pub mod camera;
mod context;
pub mod geometry;
pub mod texture;

use std::sync::Arc;

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use winit::window::Window;

use camera::{Camera, ObjectUniform};
use context::RenderContext;
use geometry::{
    ColorVertex, GroundVertex, ShadedVertex, GROUND_INDICES, GROUND_VERTICES,
    SHADED_CUBE_INDICES, SHADED_CUBE_VERTICES, SKY_INDICES, SKY_VERTICES, SPINNER_INDICES,
    SPINNER_VERTICES,
};
use texture::{create_ground_sampler, TextureData, GRASS_TEXTURE_PATH};

use crate::core::error::StartupError;
use crate::game::PlayerState;

// ============================================================================
// Scene Constants
// ============================================================================

/// Light blue clear color, visible wherever the sky cube is culled away.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.6,
    g: 0.7,
    b: 1.0,
    a: 1.0,
};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const MARKER_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// World position of the spinning cube.
const SPINNER_POSITION: Vec3 = Vec3::new(-4.0, 0.75, 4.0);

/// World position of the white landmark cube.
const LANDMARK_POSITION: Vec3 = Vec3::new(4.0, 0.0, 4.0);

/// The ground plane sits half a unit below the origin, flush with the
/// bottom faces of unit cubes resting at y = 0.
const GROUND_OFFSET: Vec3 = Vec3::new(0.0, -0.5, 0.0);

// ============================================================================
// Scene Object
// ============================================================================

/// One drawable object: geometry buffers plus a per-object uniform.
struct SceneObject {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl SceneObject {
    /// Uploads geometry and allocates the object's uniform buffer.
    fn new<V: bytemuck::Pod>(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        vertices: &[V],
        indices: &[u16],
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Uniform Buffer")),
            contents: bytemuck::cast_slice(&[ObjectUniform::new(Mat4::IDENTITY, WHITE)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            uniform_buffer,
            bind_group,
        }
    }

    /// Stages this object's matrix and color for the next submit.
    fn update(&self, queue: &wgpu::Queue, mvp: Mat4, color: [f32; 4]) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[ObjectUniform::new(mvp, color)]),
        );
    }

    /// Records the draw call. The pipeline must already be set.
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Main renderer struct.
///
/// Owns the WebGPU context, the camera, one pipeline per material, and the
/// five scene objects.
pub struct Renderer {
    /// WebGPU context (device, queue, surface, etc.)
    ctx: RenderContext,
    /// 3D perspective camera.
    camera: Camera,
    /// Per-vertex color, depth test disabled. Sky only.
    sky_pipeline: wgpu::RenderPipeline,
    /// Per-vertex color with depth testing. Spinning cube.
    color_pipeline: wgpu::RenderPipeline,
    /// Per-face brightness over a base color. Marker and landmark cubes.
    shaded_pipeline: wgpu::RenderPipeline,
    /// Textured, depth tested. Ground plane.
    ground_pipeline: wgpu::RenderPipeline,
    /// Grass texture and sampler for the ground pipeline (group 1).
    ground_bind_group: wgpu::BindGroup,
    sky: SceneObject,
    marker: SceneObject,
    ground: SceneObject,
    spinner: SceneObject,
    landmark: SceneObject,
    /// Accumulated spinner rotation, advanced one degree per rendered frame.
    spin_degrees: f32,
}

impl Renderer {
    /// Creates a new Renderer with initialized WebGPU context and pipelines.
    ///
    /// Fails if the GPU context cannot be established or the grass texture
    /// cannot be loaded; both are startup errors the caller reports and
    /// exits on.
    pub async fn new(window: Arc<Window>) -> Result<Self, StartupError> {
        let ctx = RenderContext::new(window).await?;

        let aspect = ctx.size.0 as f32 / ctx.size.1 as f32;
        let camera = Camera::new(aspect);

        // Ground texture. Missing or corrupt asset stops startup.
        let grass = TextureData::from_file(GRASS_TEXTURE_PATH)?;
        let grass_view = grass.create_texture(&ctx.device, &ctx.queue, "Grass Texture");
        let grass_sampler = create_ground_sampler(&ctx.device);

        // Bind group layout shared by every object: one uniform with the
        // object's MVP matrix and base color.
        let object_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Texture bind group layout for the ground pipeline.
        let texture_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
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
            });

        let ground_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Ground Texture Bind Group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&grass_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&grass_sampler),
                },
            ],
        });

        // Shader modules, one per material.
        let color_shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Color Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../../assets/shaders/color.wgsl").into(),
            ),
        });
        let cube_shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Cube Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../../assets/shaders/cube.wgsl").into(),
            ),
        });
        let ground_shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Ground Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../../assets/shaders/ground.wgsl").into(),
            ),
        });

        // The sky ignores depth so everything else draws over it.
        let sky_pipeline = Self::create_pipeline(
            &ctx.device,
            ctx.config.format,
            "Sky Pipeline",
            &color_shader,
            ColorVertex::desc(),
            &[&object_layout],
            false,
        );
        let color_pipeline = Self::create_pipeline(
            &ctx.device,
            ctx.config.format,
            "Color Pipeline",
            &color_shader,
            ColorVertex::desc(),
            &[&object_layout],
            true,
        );
        let shaded_pipeline = Self::create_pipeline(
            &ctx.device,
            ctx.config.format,
            "Shaded Pipeline",
            &cube_shader,
            ShadedVertex::desc(),
            &[&object_layout],
            true,
        );
        let ground_pipeline = Self::create_pipeline(
            &ctx.device,
            ctx.config.format,
            "Ground Pipeline",
            &ground_shader,
            GroundVertex::desc(),
            &[&object_layout, &texture_layout],
            true,
        );
        log::info!("Render pipelines created (CCW front face, back-face culling)");

        let sky = SceneObject::new(&ctx.device, &object_layout, "Sky", SKY_VERTICES, SKY_INDICES);
        let marker = SceneObject::new(
            &ctx.device,
            &object_layout,
            "Marker",
            SHADED_CUBE_VERTICES,
            SHADED_CUBE_INDICES,
        );
        let ground = SceneObject::new(
            &ctx.device,
            &object_layout,
            "Ground",
            GROUND_VERTICES,
            GROUND_INDICES,
        );
        let spinner = SceneObject::new(
            &ctx.device,
            &object_layout,
            "Spinner",
            SPINNER_VERTICES,
            SPINNER_INDICES,
        );
        let landmark = SceneObject::new(
            &ctx.device,
            &object_layout,
            "Landmark",
            SHADED_CUBE_VERTICES,
            SHADED_CUBE_INDICES,
        );
        log::info!("Scene geometry uploaded (sky, marker, ground, spinner, landmark)");

        Ok(Self {
            ctx,
            camera,
            sky_pipeline,
            color_pipeline,
            shaded_pipeline,
            ground_pipeline,
            ground_bind_group,
            sky,
            marker,
            ground,
            spinner,
            landmark,
            spin_degrees: 0.0,
        })
    }

    /// Creates one render pipeline.
    ///
    /// All pipelines share the same primitive state: triangle lists with CCW
    /// front faces and back-face culling. `depth_test` selects between the
    /// normal Less test and the sky's always-pass, never-write depth state.
    fn create_pipeline(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        label: &str,
        shader: &wgpu::ShaderModule,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        depth_test: bool,
    ) -> wgpu::RenderPipeline {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: depth_test,
                depth_compare: if depth_test {
                    wgpu::CompareFunction::Less
                } else {
                    wgpu::CompareFunction::Always
                },
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    /// Handles window resize.
    ///
    /// Updates surface configuration, depth texture, and camera aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
        self.camera.update_aspect(width, height);
    }

    /// Renders a single frame for the given player pose.
    ///
    /// A lost or outdated swapchain reconfigures the surface and skips the
    /// frame; the next one renders normally.
    ///
    /// # Returns
    /// `Ok(())` on success, or a `wgpu::SurfaceError` on failure.
    pub fn render(&mut self, player: &PlayerState) -> Result<(), wgpu::SurfaceError> {
        let output = match self.ctx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.ctx.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let projection = self.camera.projection();
        let world_view = camera::world_view(player);

        // Stage every object's uniform before encoding the pass.
        self.sky.update(
            &self.ctx.queue,
            projection * camera::sky_view(player.yaw_degrees),
            WHITE,
        );
        self.marker
            .update(&self.ctx.queue, projection * camera::marker_view(), MARKER_COLOR);
        self.ground.update(
            &self.ctx.queue,
            projection * world_view * Mat4::from_translation(GROUND_OFFSET),
            WHITE,
        );

        let spinner_model = Mat4::from_translation(SPINNER_POSITION)
            * Mat4::from_rotation_y(self.spin_degrees.to_radians())
            * Mat4::from_rotation_x(45.0_f32.to_radians());
        self.spinner
            .update(&self.ctx.queue, projection * world_view * spinner_model, WHITE);
        // One degree per rendered frame, counted after the matrix is built.
        self.spin_degrees += 1.0;

        self.landmark.update(
            &self.ctx.queue,
            projection * world_view * Mat4::from_translation(LANDMARK_POSITION),
            WHITE,
        );

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Sky first, depth off, so all later geometry covers it.
            render_pass.set_pipeline(&self.sky_pipeline);
            self.sky.draw(&mut render_pass);

            render_pass.set_pipeline(&self.shaded_pipeline);
            self.marker.draw(&mut render_pass);

            render_pass.set_pipeline(&self.ground_pipeline);
            render_pass.set_bind_group(1, &self.ground_bind_group, &[]);
            self.ground.draw(&mut render_pass);

            render_pass.set_pipeline(&self.color_pipeline);
            self.spinner.draw(&mut render_pass);

            render_pass.set_pipeline(&self.shaded_pipeline);
            self.landmark.draw(&mut render_pass);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
