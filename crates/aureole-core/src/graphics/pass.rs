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

//! Descriptors for render passes, expressed as plain data.

use crate::graphics::handle::TextureViewId;
use crate::math::LinearRgba;

/// Describes the operation to perform on an attachment at the start of a
/// render pass.
#[derive(Clone, Debug)]
pub enum LoadOp<V> {
    /// The existing contents of the attachment are loaded into the pass.
    Load,
    /// The attachment is cleared to the specified value before the pass
    /// begins.
    Clear(V),
}

/// Describes the operation to perform on an attachment at the end of a
/// render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOp {
    /// The results of the render pass are stored to the attachment's memory.
    Store,
    /// The results are discarded, leaving the attachment's memory undefined.
    Discard,
}

/// Defines the load and store operations for a single render pass attachment.
#[derive(Debug)]
pub struct Operations<V> {
    /// The operation to perform at the beginning of the pass.
    pub load: LoadOp<V>,
    /// The operation to perform at the end of the pass.
    pub store: StoreOp,
}

/// Describes a single color attachment for a render pass.
#[derive(Debug)]
pub struct RenderPassColorAttachment<'a> {
    /// The [`TextureViewId`] that will be rendered to.
    pub view: &'a TextureViewId,
    /// The load and store operations for this color attachment.
    pub ops: Operations<LinearRgba>,
}

/// Describes a depth attachment for a render pass.
///
/// The outline pipeline only ever reads scene depth (for occlusion testing of
/// the mask pass); whether depth writes occur is a property of the bound
/// pipeline, not of this attachment.
#[derive(Debug)]
pub struct RenderPassDepthAttachment<'a> {
    /// The [`TextureViewId`] of the depth texture.
    pub view: &'a TextureViewId,
    /// The load and store operations for the depth aspect.
    pub depth_ops: Operations<f32>,
}

/// A descriptor for a render pass.
#[derive(Debug, Default)]
pub struct RenderPassDescriptor<'a> {
    /// An optional debug label for the render pass.
    pub label: Option<&'a str>,
    /// A slice of color attachments to be used in the pass.
    pub color_attachments: &'a [RenderPassColorAttachment<'a>],
    /// An optional depth attachment for this pass.
    pub depth_attachment: Option<RenderPassDepthAttachment<'a>>,
}
