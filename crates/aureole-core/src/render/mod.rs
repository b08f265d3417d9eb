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

//! The outline pass recorder.
//!
//! [`OutlineRenderer`] is the per-frame core: given drawables, resources, and
//! effective settings it records the mask → (blur) → composite pass sequence
//! onto the host's command encoder. One renderer is created per camera per
//! frame and invoked once per live member object of each enabled layer.
//!
//! Pass structure per invocation:
//!
//! - *solid*: mask pass, then one fused dilate-and-blend composite pass
//!   (one temporary target);
//! - *blurred*: mask pass, separable Gaussian H and V passes ping-ponging
//!   through a second work target, then the composite pass.
//!
//! Temporary targets are scope-guarded: they return to the pool on every
//! exit path, so one failed layer cannot leak targets for the rest of the
//! frame.

pub mod resources;
pub mod stats;
pub mod uniforms;

pub use self::resources::{OutlineResources, PASS_INPUT_GROUP, PASS_UNIFORM_GROUP};
pub use self::stats::OutlineRenderStats;
pub use self::uniforms::{gauss_samples, OutlinePassUniforms, MAX_KERNEL_TAPS};

use crate::graphics::{
    BindGroupId, CommandEncoder, LoadOp, MaskTarget, Operations, RenderPassColorAttachment,
    RenderPassDepthAttachment, RenderPassDescriptor, RenderPipelineId, ScopedTarget, StoreOp,
    TargetError, TargetPool, TextureViewId,
};
use crate::math::{Extent2D, LinearRgba};
use crate::scene::Drawable;
use crate::settings::OutlineSettings;
use std::fmt;

/// The camera frame the outline passes composite onto.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// The camera's color target.
    pub color_target: &'a TextureViewId,
    /// The camera's scene depth, when the host provides it. Required for
    /// depth-tested outlines; without it the depth-test flag is ignored.
    pub depth_target: Option<&'a TextureViewId>,
    /// The pixel dimensions of the color target.
    pub viewport: Extent2D,
}

impl<'a> FrameContext<'a> {
    /// Creates a frame context.
    pub fn new(
        color_target: &'a TextureViewId,
        depth_target: Option<&'a TextureViewId>,
        viewport: Extent2D,
    ) -> Self {
        Self {
            color_target,
            depth_target,
            viewport,
        }
    }
}

/// An error raised while recording one layer's outline passes.
///
/// Fatal for that layer's render call only; other layers of the frame are
/// unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The frame viewport has a zero dimension; no mask target can be sized
    /// to it.
    InvalidViewport(Extent2D),
    /// A temporary target could not be acquired.
    TargetAcquisition(TargetError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidViewport(extent) => {
                write!(
                    f,
                    "Cannot outline a {}x{} viewport.",
                    extent.width, extent.height
                )
            }
            RenderError::TargetAcquisition(err) => {
                write!(f, "Temporary target acquisition failed: {err}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::TargetAcquisition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TargetError> for RenderError {
    fn from(err: TargetError) -> Self {
        RenderError::TargetAcquisition(err)
    }
}

/// Records outline passes for one camera frame.
pub struct OutlineRenderer<'a> {
    encoder: &'a mut dyn CommandEncoder,
    pool: &'a dyn TargetPool,
    frame: FrameContext<'a>,
    stats: OutlineRenderStats,
}

impl fmt::Debug for OutlineRenderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineRenderer")
            .field("frame", &self.frame)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<'a> OutlineRenderer<'a> {
    /// Creates a renderer recording onto `encoder` for the given frame.
    ///
    /// Fails fast when the viewport is degenerate; everything else is
    /// reported per [`render`](Self::render) call.
    pub fn new(
        encoder: &'a mut dyn CommandEncoder,
        pool: &'a dyn TargetPool,
        frame: FrameContext<'a>,
    ) -> Result<Self, RenderError> {
        if frame.viewport.is_empty() {
            return Err(RenderError::InvalidViewport(frame.viewport));
        }
        Ok(Self {
            encoder,
            pool,
            frame,
            stats: OutlineRenderStats::default(),
        })
    }

    /// Records the full pass sequence outlining `drawables` with the given
    /// effective settings.
    ///
    /// An empty drawable list still records the pipeline (an empty mask
    /// composites to nothing), keeping the command-buffer structure stable
    /// across frames.
    pub fn render(
        &mut self,
        drawables: &[Drawable],
        resources: &OutlineResources,
        settings: &OutlineSettings,
    ) -> Result<(), RenderError> {
        let viewport = self.frame.viewport;
        let mask = ScopedTarget::acquire(self.pool, viewport)?;
        let uniforms = OutlinePassUniforms::new(settings, viewport);

        self.record_mask_pass(drawables, resources, settings, mask.target());

        let mask_view = mask.target().color_view;
        let mask_read = mask.target().read_bind_group;

        if uniforms.is_blurred() {
            let work = ScopedTarget::acquire(self.pool, viewport)?;
            let work_view = work.target().color_view;
            let work_read = work.target().read_bind_group;

            self.write_pass_uniforms(resources, &uniforms.for_direction([1.0, 0.0]));
            self.record_fullscreen_pass(
                "outline blur h",
                &work_view,
                LoadOp::Clear(OutlinePassUniforms::clear_color()),
                &resources.blur_h_pipeline,
                resources,
                &mask_read,
            );

            self.write_pass_uniforms(resources, &uniforms.for_direction([0.0, 1.0]));
            self.record_fullscreen_pass(
                "outline blur v",
                &mask_view,
                LoadOp::Clear(OutlinePassUniforms::clear_color()),
                &resources.blur_v_pipeline,
                resources,
                &work_read,
            );
            self.stats.blur_passes += 2;
        }

        self.write_pass_uniforms(resources, &uniforms);
        self.record_fullscreen_pass(
            "outline composite",
            self.frame.color_target,
            LoadOp::Load,
            &resources.composite_pipeline,
            resources,
            &mask_read,
        );
        self.stats.composite_passes += 1;

        Ok(())
    }

    /// The counters accumulated by this renderer so far.
    pub fn stats(&self) -> &OutlineRenderStats {
        &self.stats
    }

    /// Consumes the accumulated counters, resetting them to zero.
    pub fn take_stats(&mut self) -> OutlineRenderStats {
        std::mem::take(&mut self.stats)
    }

    /// Counts a member object skipped by a layer this frame.
    pub(crate) fn note_skipped_object(&mut self) {
        self.stats.objects_skipped += 1;
    }

    fn record_mask_pass(
        &mut self,
        drawables: &[Drawable],
        resources: &OutlineResources,
        settings: &OutlineSettings,
        mask: &MaskTarget,
    ) {
        let depth_tested = settings.requires_camera_depth() && self.frame.depth_target.is_some();
        let mask_view = mask.color_view;
        let color_attachments = [RenderPassColorAttachment {
            view: &mask_view,
            ops: Operations {
                load: LoadOp::Clear(OutlinePassUniforms::clear_color()),
                store: StoreOp::Store,
            },
        }];
        let depth_attachment = if depth_tested {
            self.frame.depth_target.map(|view| RenderPassDepthAttachment {
                view,
                depth_ops: Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                },
            })
        } else {
            None
        };
        let descriptor = RenderPassDescriptor {
            label: Some("outline mask"),
            color_attachments: &color_attachments,
            depth_attachment,
        };

        let pipeline = if depth_tested {
            &resources.mask_depth_pipeline
        } else {
            &resources.mask_pipeline
        };

        {
            let mut pass = self.encoder.begin_render_pass(&descriptor);
            pass.set_pipeline(pipeline);
            for drawable in drawables {
                if let Some(model) = &drawable.model_bind_group {
                    pass.set_bind_group(PASS_INPUT_GROUP, model, &[drawable.model_offset]);
                }
                pass.set_vertex_buffer(0, &drawable.geometry.vertex_buffer, 0);
                pass.set_index_buffer(&drawable.geometry.index_buffer, 0, drawable.geometry.index_format);
                pass.draw_indexed(0..drawable.geometry.index_count, 0, 0..1);
            }
        }

        self.stats.mask_passes += 1;
        self.stats.draw_calls += drawables.len() as u32;
    }

    fn record_fullscreen_pass(
        &mut self,
        label: &str,
        target: &TextureViewId,
        load: LoadOp<LinearRgba>,
        pipeline: &RenderPipelineId,
        resources: &OutlineResources,
        input: &BindGroupId,
    ) {
        let color_attachments = [RenderPassColorAttachment {
            view: target,
            ops: Operations {
                load,
                store: StoreOp::Store,
            },
        }];
        let descriptor = RenderPassDescriptor {
            label: Some(label),
            color_attachments: &color_attachments,
            depth_attachment: None,
        };

        {
            let mut pass = self.encoder.begin_render_pass(&descriptor);
            pass.set_pipeline(pipeline);
            pass.set_bind_group(PASS_UNIFORM_GROUP, &resources.pass_uniform_bind_group, &[]);
            pass.set_bind_group(PASS_INPUT_GROUP, input, &[]);
            pass.set_vertex_buffer(0, &resources.quad_vertex_buffer, 0);
            pass.draw(0..4, 0..1);
        }

        self.stats.draw_calls += 1;
    }

    fn write_pass_uniforms(&mut self, resources: &OutlineResources, uniforms: &OutlinePassUniforms) {
        self.encoder
            .write_buffer(&resources.pass_uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }
}
