// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Recording test doubles for the graphics and scene contracts.

use crate::graphics::{
    BindGroupId, BufferId, CommandEncoder, IndexFormat, LoadOp, MaskTarget, RenderPass,
    RenderPassDescriptor, RenderPipelineId, TargetError, TargetPool, TextureId, TextureViewId,
};
use crate::math::Extent2D;
use crate::render::OutlineResources;
use crate::scene::{Drawable, DrawableId, GpuGeometry, LayerMask, ObjectId, SceneSource};
use ahash::{AHashMap, AHashSet};
use std::cell::Cell;
use std::ops::Range;

/// Everything one recorded render pass captured.
#[derive(Debug)]
pub(crate) struct RecordedPass {
    pub label: String,
    pub pipeline: Option<RenderPipelineId>,
    pub bind_groups: Vec<(u32, BindGroupId)>,
    pub vertex_buffers: Vec<BufferId>,
    pub draw_calls: u32,
    pub indexed_draw_calls: u32,
    pub cleared: bool,
    pub color_view: Option<TextureViewId>,
    pub has_depth: bool,
}

/// A [`CommandEncoder`] that records passes and buffer writes for
/// assertions.
#[derive(Debug, Default)]
pub(crate) struct RecordingEncoder {
    pub passes: Vec<RecordedPass>,
    pub writes: Vec<(BufferId, u64, Vec<u8>)>,
}

impl RecordingEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pass_labels(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.label.as_str()).collect()
    }
}

impl CommandEncoder for RecordingEncoder {
    fn begin_render_pass<'encoder>(
        &'encoder mut self,
        descriptor: &RenderPassDescriptor<'encoder>,
    ) -> Box<dyn RenderPass<'encoder> + 'encoder> {
        let first_color = descriptor.color_attachments.first();
        self.passes.push(RecordedPass {
            label: descriptor.label.unwrap_or_default().to_string(),
            pipeline: None,
            bind_groups: Vec::new(),
            vertex_buffers: Vec::new(),
            draw_calls: 0,
            indexed_draw_calls: 0,
            cleared: matches!(
                first_color.map(|a| &a.ops.load),
                Some(LoadOp::Clear(_))
            ),
            color_view: first_color.map(|a| *a.view),
            has_depth: descriptor.depth_attachment.is_some(),
        });
        let recorded = self.passes.last_mut().unwrap();
        Box::new(RecordingPass { recorded })
    }

    fn write_buffer(&mut self, buffer: &BufferId, offset: u64, data: &[u8]) {
        self.writes.push((*buffer, offset, data.to_vec()));
    }
}

struct RecordingPass<'encoder> {
    recorded: &'encoder mut RecordedPass,
}

impl<'encoder> RenderPass<'encoder> for RecordingPass<'encoder> {
    fn set_pipeline(&mut self, pipeline: &'encoder RenderPipelineId) {
        self.recorded.pipeline = Some(*pipeline);
    }

    fn set_bind_group(&mut self, index: u32, bind_group: &'encoder BindGroupId, _offsets: &[u32]) {
        self.recorded.bind_groups.push((index, *bind_group));
    }

    fn set_vertex_buffer(&mut self, _slot: u32, buffer: &'encoder BufferId, _offset: u64) {
        self.recorded.vertex_buffers.push(*buffer);
    }

    fn set_index_buffer(
        &mut self,
        _buffer: &'encoder BufferId,
        _offset: u64,
        _index_format: IndexFormat,
    ) {
    }

    fn draw(&mut self, _vertices: Range<u32>, _instances: Range<u32>) {
        self.recorded.draw_calls += 1;
    }

    fn draw_indexed(&mut self, _indices: Range<u32>, _base_vertex: i32, _instances: Range<u32>) {
        self.recorded.draw_calls += 1;
        self.recorded.indexed_draw_calls += 1;
    }
}

/// A [`TargetPool`] that mints distinct targets and tracks the
/// acquire/release balance, with optional failure injection.
#[derive(Debug)]
pub(crate) struct CountingPool {
    next_id: Cell<usize>,
    live: Cell<i32>,
    acquired_total: Cell<u32>,
    fail_from: Cell<Option<u32>>,
}

impl CountingPool {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1000),
            live: Cell::new(0),
            acquired_total: Cell::new(0),
            fail_from: Cell::new(None),
        }
    }

    /// Makes every acquisition starting with the `n`-th (zero-based) fail.
    pub fn fail_from(&self, n: u32) {
        self.fail_from.set(Some(n));
    }

    /// The number of currently unreleased targets.
    pub fn live(&self) -> i32 {
        self.live.get()
    }

    /// The number of successful acquisitions so far.
    pub fn acquired_total(&self) -> u32 {
        self.acquired_total.get()
    }
}

impl TargetPool for CountingPool {
    fn acquire(&self, size: Extent2D) -> Result<MaskTarget, TargetError> {
        if let Some(n) = self.fail_from.get() {
            if self.acquired_total.get() >= n {
                return Err(TargetError::Exhausted);
            }
        }
        let id = self.next_id.get();
        self.next_id.set(id + 3);
        self.acquired_total.set(self.acquired_total.get() + 1);
        self.live.set(self.live.get() + 1);
        Ok(MaskTarget {
            texture: TextureId(id),
            color_view: TextureViewId(id + 1),
            read_bind_group: BindGroupId(id + 2),
            size,
        })
    }

    fn release(&self, _target: MaskTarget) {
        self.live.set(self.live.get() - 1);
    }
}

/// A table-driven [`SceneSource`].
#[derive(Debug, Default)]
pub(crate) struct TableScene {
    objects: AHashMap<ObjectId, ObjectEntry>,
    dead_drawables: AHashSet<DrawableId>,
}

#[derive(Debug)]
struct ObjectEntry {
    active: bool,
    drawables: Vec<(Drawable, bool)>,
}

impl TableScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, id: u64, active: bool) -> ObjectId {
        let object = ObjectId(id);
        self.objects.insert(
            object,
            ObjectEntry {
                active,
                drawables: Vec::new(),
            },
        );
        object
    }

    pub fn set_active(&mut self, object: ObjectId, active: bool) {
        if let Some(entry) = self.objects.get_mut(&object) {
            entry.active = active;
        }
    }

    pub fn destroy_object(&mut self, object: ObjectId) {
        self.objects.remove(&object);
    }

    pub fn add_drawable(&mut self, object: ObjectId, id: u64, layer_mask: LayerMask) -> DrawableId {
        self.add_drawable_with_activity(object, id, layer_mask, true)
    }

    pub fn add_inactive_drawable(
        &mut self,
        object: ObjectId,
        id: u64,
        layer_mask: LayerMask,
    ) -> DrawableId {
        self.add_drawable_with_activity(object, id, layer_mask, false)
    }

    fn add_drawable_with_activity(
        &mut self,
        object: ObjectId,
        id: u64,
        layer_mask: LayerMask,
        active: bool,
    ) -> DrawableId {
        let drawable_id = DrawableId(id);
        let drawable = Drawable {
            id: drawable_id,
            geometry: GpuGeometry {
                vertex_buffer: BufferId(id as usize * 10),
                index_buffer: BufferId(id as usize * 10 + 1),
                index_format: IndexFormat::Uint32,
                index_count: 36,
            },
            model_bind_group: Some(BindGroupId(id as usize * 10 + 2)),
            model_offset: 0,
            layer_mask,
        };
        if let Some(entry) = self.objects.get_mut(&object) {
            entry.drawables.push((drawable, active));
        }
        drawable_id
    }

    pub fn destroy_drawable(&mut self, drawable: DrawableId) {
        self.dead_drawables.insert(drawable);
    }
}

impl SceneSource for TableScene {
    fn object_alive(&self, object: ObjectId) -> bool {
        self.objects.contains_key(&object)
    }

    fn object_active(&self, object: ObjectId) -> bool {
        self.objects.get(&object).is_some_and(|entry| entry.active)
    }

    fn drawable_alive(&self, drawable: DrawableId) -> bool {
        !self.dead_drawables.contains(&drawable)
            && self
                .objects
                .values()
                .any(|entry| entry.drawables.iter().any(|(d, _)| d.id == drawable))
    }

    fn collect_drawables(
        &self,
        root: ObjectId,
        ignore_mask: LayerMask,
        include_inactive: bool,
        out: &mut Vec<Drawable>,
    ) {
        let Some(entry) = self.objects.get(&root) else {
            return;
        };
        for (drawable, active) in &entry.drawables {
            if self.dead_drawables.contains(&drawable.id) {
                continue;
            }
            if drawable.layer_mask.intersects(ignore_mask) {
                continue;
            }
            if !active && !include_inactive {
                continue;
            }
            out.push(*drawable);
        }
    }
}

/// A complete resource bundle with distinct handles, for assertions.
pub(crate) fn test_resources() -> OutlineResources {
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
