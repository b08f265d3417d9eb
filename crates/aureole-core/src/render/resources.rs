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

//! Host-provisioned resources used by the outline passes.

use crate::graphics::handle::{BindGroupId, BufferId, RenderPipelineId};

/// Bind group index of the per-pass uniform block.
pub const PASS_UNIFORM_GROUP: u32 = 0;
/// Bind group index of the sampled mask/work texture in fullscreen passes,
/// and of per-model uniforms in the mask pass.
pub const PASS_INPUT_GROUP: u32 = 1;

/// The shader/pipeline/buffer handles the outline passes record against.
///
/// The host provisions these once (compiling the mask, blur, and composite
/// pipelines against its own formats) and hands the bundle to the
/// composition roots. Every field is required, so a constructed value is
/// always complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineResources {
    /// Unlit pipeline rasterizing silhouettes into the mask target.
    pub mask_pipeline: RenderPipelineId,
    /// Mask pipeline variant that depth-tests against scene depth without
    /// writing it.
    pub mask_depth_pipeline: RenderPipelineId,
    /// Horizontal pass of the separable Gaussian dilation.
    pub blur_h_pipeline: RenderPipelineId,
    /// Vertical pass of the separable Gaussian dilation.
    pub blur_v_pipeline: RenderPipelineId,
    /// Fused dilate-and-blend pass compositing the mask onto the frame.
    pub composite_pipeline: RenderPipelineId,
    /// Fullscreen triangle-strip quad used by the blur and composite passes.
    pub quad_vertex_buffer: BufferId,
    /// Buffer backing [`OutlinePassUniforms`], rewritten before each pass.
    ///
    /// [`OutlinePassUniforms`]: crate::render::OutlinePassUniforms
    pub pass_uniform_buffer: BufferId,
    /// Bind group exposing [`Self::pass_uniform_buffer`] at group
    /// [`PASS_UNIFORM_GROUP`].
    pub pass_uniform_bind_group: BindGroupId,
}
