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

//! Per-frame counters for the outline pipeline.

/// A collection of counters for one camera's outline rendering in a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutlineRenderStats {
    /// The number of enabled layers that rendered without error.
    pub layers_rendered: u32,
    /// The number of layers skipped because their render pass failed.
    pub layers_failed: u32,
    /// The number of member objects skipped because they were dead or
    /// inactive this frame.
    pub objects_skipped: u32,
    /// The number of mask passes encoded.
    pub mask_passes: u32,
    /// The number of separable blur passes encoded.
    pub blur_passes: u32,
    /// The number of composite passes encoded.
    pub composite_passes: u32,
    /// The number of draw calls encoded across all passes.
    pub draw_calls: u32,
}

impl OutlineRenderStats {
    /// Accumulates `other` into `self`.
    pub fn merge(&mut self, other: &OutlineRenderStats) {
        self.layers_rendered += other.layers_rendered;
        self.layers_failed += other.layers_failed;
        self.objects_skipped += other.objects_skipped;
        self.mask_passes += other.mask_passes;
        self.blur_passes += other.blur_passes;
        self.composite_passes += other.composite_passes;
        self.draw_calls += other.draw_calls;
    }
}
