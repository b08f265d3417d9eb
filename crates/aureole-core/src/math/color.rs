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

//! Defines the `LinearRgba` color type used for outline tinting.

use serde::{Deserialize, Serialize};

/// Represents a color in a **linear RGBA** color space using `f32` components.
///
/// Linear space is required for correct blending of the composite pass.
/// Components may exceed `1.0` for HDR-tinted outlines.
///
/// `#[repr(C)]` ensures a consistent memory layout, which matters when the
/// color is embedded in a GPU-bound uniform block.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
#[repr(C)]
pub struct LinearRgba {
    /// The red component in linear space.
    pub r: f32,
    /// The green component in linear space.
    pub g: f32,
    /// The blue component in linear space.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl LinearRgba {
    /// Opaque red (`[1.0, 0.0, 0.0, 1.0]`).
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green (`[0.0, 1.0, 0.0, 1.0]`).
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue (`[0.0, 0.0, 1.0, 1.0]`).
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Opaque yellow (`[1.0, 1.0, 0.0, 1.0]`).
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    /// Opaque white (`[1.0, 1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`[0.0, 0.0, 0.0, 1.0]`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent black (`[0.0, 0.0, 0.0, 0.0]`). The mask clear value.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new `LinearRgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `LinearRgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Returns this color with the alpha component replaced.
    #[inline]
    pub const fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    /// Returns the components as a `[r, g, b, a]` array, ready for a uniform
    /// block.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Creates a `LinearRgba` from an sRGB-authored hex string (`#RRGGBB` or
    /// `#RRGGBBAA`). Malformed components decode as zero.
    #[inline]
    pub fn from_hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let channel = |range: core::ops::Range<usize>, default: u8| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(default) as f32
                / 255.0
        };
        let a = if hex.len() > 6 { channel(6..8, 255) } else { 1.0 };
        Self::new(channel(0..2, 0), channel(2..4, 0), channel(4..6, 0), a)
    }
}

impl Default for LinearRgba {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_array_matches_components() {
        let c = LinearRgba::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(c.to_array(), [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn with_alpha_replaces_only_alpha() {
        let c = LinearRgba::RED.with_alpha(0.5);
        assert_eq!(c, LinearRgba::new(1.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn from_hex_parses_rgb_and_rgba() {
        let opaque = LinearRgba::from_hex("#FF0000");
        assert_eq!(opaque, LinearRgba::RED);

        let translucent = LinearRgba::from_hex("00FF0080");
        assert_eq!(translucent.g, 1.0);
        approx::assert_relative_eq!(translucent.a, 128.0 / 255.0);
    }

    #[test]
    fn from_hex_tolerates_garbage() {
        let c = LinearRgba::from_hex("#zz");
        assert_eq!(c, LinearRgba::new(0.0, 0.0, 0.0, 1.0));
    }
}
