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

//! Host scene contracts.
//!
//! Outlined objects live in the host's scene graph. The core addresses them
//! through stable opaque handles and queries their drawable sub-objects
//! through the [`SceneSource`] trait, which the host (or a test double)
//! implements. Nothing here owns host objects: a handle may go dead at any
//! time and callers are expected to tolerate that.

pub mod collection;

pub use self::collection::RendererCollection;

use crate::graphics::handle::{BindGroupId, BufferId, IndexFormat};

/// A stable opaque handle to a logical host object (a hierarchy root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// The reserved "no object" handle.
    pub const NONE: Self = Self(0);

    /// Returns `true` if this is the reserved [`ObjectId::NONE`] handle.
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

/// A stable opaque handle to a single drawable sub-object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableId(pub u64);

/// A stable opaque handle to a host camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraId(pub u64);

impl CameraId {
    /// The reserved "no camera" handle.
    pub const NONE: Self = Self(0);

    /// Returns `true` if this is the reserved [`CameraId::NONE`] handle.
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

/// A bit set of host scene layers, used to exclude sub-objects from outline
/// enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// The empty mask: nothing is excluded.
    pub const NONE: Self = Self(0);

    /// Returns `true` if the two masks share any bit.
    pub const fn intersects(&self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

/// The GPU-side geometry of a single drawable, as provisioned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuGeometry {
    /// The vertex buffer containing the geometry.
    pub vertex_buffer: BufferId,
    /// The index buffer defining the draw order.
    pub index_buffer: BufferId,
    /// The format of the indices.
    pub index_format: IndexFormat,
    /// The number of indices to draw.
    pub index_count: u32,
}

/// One drawable sub-object, flattened out of a host hierarchy.
///
/// Carries everything the mask pass needs to rasterize the silhouette: the
/// geometry buffers plus an optional per-model bind group (world transform
/// uniforms) with its dynamic offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawable {
    /// The host handle of this drawable.
    pub id: DrawableId,
    /// The geometry to rasterize.
    pub geometry: GpuGeometry,
    /// An optional bind group carrying model-specific uniforms (group 1).
    pub model_bind_group: Option<BindGroupId>,
    /// Dynamic offset for the model bind group.
    pub model_offset: u32,
    /// The host scene layers this drawable belongs to.
    pub layer_mask: LayerMask,
}

/// The host's per-object hierarchy query.
///
/// Implementations enumerate the drawable sub-objects beneath a root and
/// answer liveness/activity questions about handles the core has cached.
/// Both host backends and test doubles implement this, enabling generic
/// frame loops.
pub trait SceneSource {
    /// Returns `true` if the object handle still refers to a live host
    /// object.
    fn object_alive(&self, object: ObjectId) -> bool;

    /// Returns `true` if the object is live and active (visible) in the
    /// current frame.
    fn object_active(&self, object: ObjectId) -> bool;

    /// Returns `true` if the drawable handle still refers to a live host
    /// drawable.
    fn drawable_alive(&self, drawable: DrawableId) -> bool;

    /// Appends to `out` every drawable beneath `root` whose layer mask does
    /// not intersect `ignore_mask`.
    ///
    /// When `include_inactive` is set, drawables of currently inactive
    /// sub-objects are enumerated as well. A hierarchy with zero matching
    /// sub-objects appends nothing; that is not an error.
    fn collect_drawables(
        &self,
        root: ObjectId,
        ignore_mask: LayerMask,
        include_inactive: bool,
        out: &mut Vec<Drawable>,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_handles_are_none() {
        assert!(ObjectId::NONE.is_none());
        assert!(!ObjectId(7).is_none());
        assert!(CameraId::NONE.is_none());
    }

    #[test]
    fn layer_mask_intersection() {
        let a = LayerMask(0b0110);
        assert!(a.intersects(LayerMask(0b0100)));
        assert!(!a.intersects(LayerMask(0b1001)));
        assert!(!a.intersects(LayerMask::NONE));
    }
}
