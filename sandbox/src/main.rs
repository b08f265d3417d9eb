//! Headless demo host for the outline effect.
//!
//! Implements the scene, target-pool, and encoder contracts with stdout
//! doubles, then renders one frame with two prioritized layers and prints
//! the recorded command stream.

use aureole_core::effect::OutlineEffect;
use aureole_core::graphics::{
    BindGroupId, BufferId, CommandEncoder, IndexFormat, LoadOp, MaskTarget, RenderPass,
    RenderPassDescriptor, RenderPipelineId, TargetError, TargetPool, TextureId, TextureViewId,
};
use aureole_core::layer::OutlineLayer;
use aureole_core::math::{Extent2D, LinearRgba};
use aureole_core::render::{FrameContext, OutlineResources};
use aureole_core::scene::{
    CameraId, Drawable, DrawableId, GpuGeometry, LayerMask, ObjectId, SceneSource,
};
use aureole_core::settings::OutlineRenderFlags;
use std::cell::Cell;
use std::ops::Range;
use std::sync::{Arc, RwLock};

/// A scene with a fixed set of single-drawable objects.
struct DemoScene {
    objects: Vec<ObjectId>,
}

impl SceneSource for DemoScene {
    fn object_alive(&self, object: ObjectId) -> bool {
        self.objects.contains(&object)
    }

    fn object_active(&self, object: ObjectId) -> bool {
        self.object_alive(object)
    }

    fn drawable_alive(&self, _drawable: DrawableId) -> bool {
        true
    }

    fn collect_drawables(
        &self,
        root: ObjectId,
        _ignore_mask: LayerMask,
        _include_inactive: bool,
        out: &mut Vec<Drawable>,
    ) {
        if !self.object_alive(root) {
            return;
        }
        out.push(Drawable {
            id: DrawableId(root.0),
            geometry: GpuGeometry {
                vertex_buffer: BufferId(root.0 as usize * 10),
                index_buffer: BufferId(root.0 as usize * 10 + 1),
                index_format: IndexFormat::Uint16,
                index_count: 36,
            },
            model_bind_group: Some(BindGroupId(root.0 as usize * 10 + 2)),
            model_offset: 0,
            layer_mask: LayerMask::NONE,
        });
    }
}

/// Mints sequential target IDs and logs the acquire/release traffic.
struct LoggingPool {
    next: Cell<usize>,
}

impl TargetPool for LoggingPool {
    fn acquire(&self, size: Extent2D) -> Result<MaskTarget, TargetError> {
        let id = self.next.get();
        self.next.set(id + 3);
        log::info!("pool: acquire {}x{} -> texture #{id}", size.width, size.height);
        Ok(MaskTarget {
            texture: TextureId(id),
            color_view: TextureViewId(id + 1),
            read_bind_group: BindGroupId(id + 2),
            size,
        })
    }

    fn release(&self, target: MaskTarget) {
        log::info!("pool: release texture #{}", target.texture.0);
    }
}

/// Prints every recorded pass and draw call.
#[derive(Default)]
struct ConsoleEncoder {
    passes: u32,
}

impl CommandEncoder for ConsoleEncoder {
    fn begin_render_pass<'encoder>(
        &'encoder mut self,
        descriptor: &RenderPassDescriptor<'encoder>,
    ) -> Box<dyn RenderPass<'encoder> + 'encoder> {
        self.passes += 1;
        let target = descriptor
            .color_attachments
            .first()
            .map(|a| a.view.0)
            .unwrap_or_default();
        let load = match descriptor.color_attachments.first().map(|a| &a.ops.load) {
            Some(LoadOp::Clear(_)) => "clear",
            _ => "load",
        };
        println!(
            "pass {:>2} | {:<20} -> view #{target} ({load}{})",
            self.passes,
            descriptor.label.unwrap_or("unnamed"),
            if descriptor.depth_attachment.is_some() {
                ", depth-tested"
            } else {
                ""
            }
        );
        Box::new(ConsolePass)
    }

    fn write_buffer(&mut self, buffer: &BufferId, _offset: u64, data: &[u8]) {
        println!(
            "        | write {} bytes of pass uniforms to buffer #{}",
            data.len(),
            buffer.0
        );
    }
}

struct ConsolePass;

impl<'encoder> RenderPass<'encoder> for ConsolePass {
    fn set_pipeline(&mut self, pipeline: &'encoder RenderPipelineId) {
        println!("        |   pipeline #{}", pipeline.0);
    }

    fn set_bind_group(&mut self, index: u32, bind_group: &'encoder BindGroupId, _offsets: &[u32]) {
        println!("        |   bind group {index} = #{}", bind_group.0);
    }

    fn set_vertex_buffer(&mut self, _slot: u32, _buffer: &'encoder BufferId, _offset: u64) {}

    fn set_index_buffer(
        &mut self,
        _buffer: &'encoder BufferId,
        _offset: u64,
        _index_format: IndexFormat,
    ) {
    }

    fn draw(&mut self, vertices: Range<u32>, _instances: Range<u32>) {
        println!("        |   draw {} vertices", vertices.len());
    }

    fn draw_indexed(&mut self, indices: Range<u32>, _base_vertex: i32, _instances: Range<u32>) {
        println!("        |   draw {} indices", indices.len());
    }
}

fn demo_resources() -> OutlineResources {
    OutlineResources {
        mask_pipeline: RenderPipelineId(1),
        mask_depth_pipeline: RenderPipelineId(2),
        blur_h_pipeline: RenderPipelineId(3),
        blur_v_pipeline: RenderPipelineId(4),
        composite_pipeline: RenderPipelineId(5),
        quad_vertex_buffer: BufferId(6),
        pass_uniform_buffer: BufferId(7),
        pass_uniform_bind_group: BindGroupId(8),
    }
}

fn main() {
    env_logger::init();

    let scene = DemoScene {
        objects: vec![ObjectId(1), ObjectId(2)],
    };

    let mut selection = OutlineLayer::with_name("selection");
    selection.set_priority(5);
    selection.settings_mut().set_color(LinearRgba::RED);
    selection.settings_mut().set_width(4);
    selection
        .add(&scene, ObjectId(1), LayerMask::NONE)
        .expect("live object");

    let mut hover = OutlineLayer::with_name("hover");
    hover.set_priority(10);
    hover.settings_mut().set_color(LinearRgba::BLUE);
    hover.settings_mut().set_width(2);
    hover
        .settings_mut()
        .set_render_flags(OutlineRenderFlags::BLURRED);
    hover
        .add(&scene, ObjectId(2), LayerMask::NONE)
        .expect("live object");

    let mut effect = OutlineEffect::new(demo_resources());
    {
        let layers = effect.layers();
        let mut layers = layers.write().unwrap();
        layers
            .add(&Arc::new(RwLock::new(selection)))
            .expect("fresh layer");
        layers
            .add(&Arc::new(RwLock::new(hover)))
            .expect("fresh layer");
    }

    let mut encoder = ConsoleEncoder::default();
    let pool = LoggingPool {
        next: Cell::new(100),
    };
    let frame_color = TextureViewId(0);
    let frame = FrameContext::new(&frame_color, None, Extent2D::new(1280, 720));

    println!("rendering one frame (hover layer first: higher priority draws on top)");
    let stats = effect
        .render_camera(CameraId(1), &scene, &mut encoder, &pool, frame)
        .expect("frame");

    println!(
        "frame done: {} layers, {} mask / {} blur / {} composite passes, {} draw calls",
        stats.layers_rendered,
        stats.mask_passes,
        stats.blur_passes,
        stats.composite_passes,
        stats.draw_calls
    );
}
