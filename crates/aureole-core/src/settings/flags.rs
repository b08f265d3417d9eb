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

//! Render-mode flags for the outline effect.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Flags selecting how an outline is rendered.
///
/// Without [`BLURRED`](Self::BLURRED) the outline edge is solid (hard-edge
/// dilation only). Flags combine with bitwise operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutlineRenderFlags {
    bits: u32,
}

impl OutlineRenderFlags {
    /// No flags: a solid outline without depth testing.
    pub const NONE: Self = Self { bits: 0 };
    /// Soften the dilated edge with a Gaussian blur, weighted by intensity.
    pub const BLURRED: Self = Self { bits: 1 << 0 };
    /// Depth-test the mask pass against scene depth so occluded silhouette
    /// pixels are discarded.
    pub const DEPTH_TESTING: Self = Self { bits: 1 << 1 };

    /// Creates flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns the union of the two flag sets.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks whether every bit of `other` is set in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Returns `true` if no flag is set.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl BitOr for OutlineRenderFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for OutlineRenderFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Self::BLURRED) {
            write!(f, "blurred")?;
        } else {
            write!(f, "solid")?;
        }
        if self.contains(Self::DEPTH_TESTING) {
            write!(f, "+depth-tested")?;
        }
        Ok(())
    }
}
