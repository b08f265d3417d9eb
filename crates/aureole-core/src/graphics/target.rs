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

//! Temporary render-target acquisition.
//!
//! Mask and work buffers are transient: acquired at the start of a layer's
//! render pass and returned at the end of it, on every exit path. The
//! [`ScopedTarget`] guard enforces the release so a failed pass cannot leak
//! a pooled target for the rest of the frame.

use crate::graphics::handle::{BindGroupId, TextureId, TextureViewId};
use crate::math::Extent2D;
use std::fmt;

/// A pooled temporary render target, bundled with everything the outline
/// passes need to write to it and sample from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskTarget {
    /// The backing texture.
    pub texture: TextureId,
    /// The render-attachment view of the texture.
    pub color_view: TextureViewId,
    /// A bind group exposing the texture (and its sampler) to a sampling
    /// pass.
    pub read_bind_group: BindGroupId,
    /// The pixel dimensions of the target.
    pub size: Extent2D,
}

/// An error raised when a temporary target cannot be provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// The pool cannot allocate any further targets this frame.
    Exhausted,
    /// The requested extent exceeds what the device supports.
    TooLarge {
        /// The extent that was requested.
        requested: Extent2D,
        /// The largest extent the pool can provide.
        max: Extent2D,
    },
    /// An error originating from the host's graphics backend.
    Backend(String),
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::Exhausted => {
                write!(f, "Temporary target pool is exhausted.")
            }
            TargetError::TooLarge { requested, max } => {
                write!(
                    f,
                    "Requested target size {}x{} exceeds the supported maximum {}x{}.",
                    requested.width, requested.height, max.width, max.height
                )
            }
            TargetError::Backend(msg) => {
                write!(f, "Backend-specific target error: {msg}")
            }
        }
    }
}

impl std::error::Error for TargetError {}

/// Provides temporary render targets for the duration of a render pass.
///
/// Methods take `&self`; implementations use interior mutability so that
/// several [`ScopedTarget`] guards can be held at once within a single
/// layer's pass (the blurred pipeline holds two).
pub trait TargetPool {
    /// Acquires a temporary target of at least the given size.
    fn acquire(&self, size: Extent2D) -> Result<MaskTarget, TargetError>;

    /// Returns a previously acquired target to the pool.
    fn release(&self, target: MaskTarget);
}

/// A guard that returns its target to the pool when dropped.
pub struct ScopedTarget<'a> {
    pool: &'a dyn TargetPool,
    target: MaskTarget,
}

impl<'a> ScopedTarget<'a> {
    /// Acquires a target of the given size from `pool`, scoped to the
    /// lifetime of the returned guard.
    pub fn acquire(pool: &'a dyn TargetPool, size: Extent2D) -> Result<Self, TargetError> {
        let target = pool.acquire(size)?;
        Ok(Self { pool, target })
    }

    /// The acquired target.
    pub fn target(&self) -> &MaskTarget {
        &self.target
    }
}

impl Drop for ScopedTarget<'_> {
    fn drop(&mut self) {
        self.pool.release(self.target);
    }
}
