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

//! Command-recording traits implemented by the host backend.

use crate::graphics::handle::{BindGroupId, BufferId, IndexFormat, RenderPipelineId};
use crate::graphics::pass::RenderPassDescriptor;
use std::ops::Range;

/// A trait representing an active render pass, used for recording drawing
/// commands.
///
/// A `RenderPass` object is obtained from a [`CommandEncoder`] and provides
/// methods to bind pipeline state and issue draw calls.
///
/// The `'pass` lifetime ensures that the pass object cannot outlive the
/// [`CommandEncoder`] that created it, and that any resources bound to it
/// also live long enough.
pub trait RenderPass<'pass> {
    /// Sets the active render pipeline for subsequent draw calls.
    fn set_pipeline(&mut self, pipeline: &'pass RenderPipelineId);

    /// Binds a bind group to the given index, with optional dynamic offsets.
    fn set_bind_group(&mut self, index: u32, bind_group: &'pass BindGroupId, offsets: &[u32]);

    /// Binds a vertex buffer to a specific slot.
    fn set_vertex_buffer(&mut self, slot: u32, buffer: &'pass BufferId, offset: u64);

    /// Binds an index buffer for indexed drawing.
    fn set_index_buffer(&mut self, buffer: &'pass BufferId, offset: u64, index_format: IndexFormat);

    /// Records a non-indexed draw call.
    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>);

    /// Records an indexed draw call.
    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32, instances: Range<u32>);
}

/// A trait for an object that records a sequence of GPU commands.
///
/// The recorded commands execute in recording order when the host submits
/// the encoder's output; the core relies on that ordering when it rewrites
/// the per-pass uniform buffer between passes.
pub trait CommandEncoder {
    /// Begins a new render pass, returning a `RenderPass` recording object.
    ///
    /// The returned object borrows the encoder mutably, so only one pass can
    /// be active at a time. Dropping the `RenderPass` ends the pass.
    fn begin_render_pass<'encoder>(
        &'encoder mut self,
        descriptor: &RenderPassDescriptor<'encoder>,
    ) -> Box<dyn RenderPass<'encoder> + 'encoder>;

    /// Records a write of `data` into `buffer` at `offset`.
    ///
    /// The write happens in command order, before any subsequent pass reads
    /// the buffer.
    fn write_buffer(&mut self, buffer: &BufferId, offset: u64, data: &[u8]);
}
