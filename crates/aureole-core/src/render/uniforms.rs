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

//! Per-pass GPU parameter block and the CPU-side Gaussian kernel.

use crate::math::{Extent2D, LinearRgba};
use crate::settings::{OutlineRenderFlags, OutlineSettings, MAX_WIDTH};
use bytemuck::{Pod, Zeroable};

/// The number of kernel tap slots in the uniform block. Taps beyond the
/// active width are zero.
pub const MAX_KERNEL_TAPS: usize = MAX_WIDTH as usize;

/// Uniforms shared by the dilation/blur and composite passes.
///
/// Written through [`CommandEncoder::write_buffer`] immediately before each
/// pass that reads it.
///
/// [`CommandEncoder::write_buffer`]: crate::graphics::CommandEncoder::write_buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct OutlinePassUniforms {
    /// The outline color, tinting the composite blend.
    pub color: [f32; 4],
    /// `1 / target size`, the UV step of one pixel.
    pub inv_target_size: [f32; 2],
    /// Sampling direction of a separable blur pass; `[0, 0]` for the
    /// composite pass.
    pub direction: [f32; 2],
    /// Dilation radius in pixels.
    pub width: f32,
    /// Blend strength of the blurred edge.
    pub intensity: f32,
    /// Raw [`OutlineRenderFlags`] bits.
    pub flags: u32,
    /// The number of active kernel taps (`width + 1`).
    pub tap_count: u32,
    /// Gaussian kernel weights; tap 0 is the center.
    pub samples: [f32; MAX_KERNEL_TAPS],
}

impl OutlinePassUniforms {
    /// Builds the parameter block for one layer's passes from its effective
    /// settings and the target size.
    pub fn new(settings: &OutlineSettings, target_size: Extent2D) -> Self {
        let width = settings.width();
        Self {
            color: settings.color().to_array(),
            inv_target_size: [
                1.0 / target_size.width.max(1) as f32,
                1.0 / target_size.height.max(1) as f32,
            ],
            direction: [0.0, 0.0],
            width: width as f32,
            intensity: settings.intensity(),
            flags: settings.render_flags().bits(),
            tap_count: width + 1,
            samples: gauss_samples(width),
        }
    }

    /// Returns a copy configured for a separable pass along `direction`.
    pub fn for_direction(mut self, direction: [f32; 2]) -> Self {
        self.direction = direction;
        self
    }

    /// Clear value used when this block drives a mask or work target clear.
    pub fn clear_color() -> LinearRgba {
        LinearRgba::TRANSPARENT
    }

    /// Returns `true` if the flags request the blurred pipeline.
    pub fn is_blurred(&self) -> bool {
        OutlineRenderFlags::from_bits(self.flags).contains(OutlineRenderFlags::BLURRED)
    }
}

/// Precomputes the normalized half-kernel of a Gaussian with standard
/// deviation `width / 2`.
///
/// Tap `i` holds the weight for offset `i` pixels from the center; the
/// shader mirrors taps `1..=width`. Weights are normalized so that
/// `w[0] + 2 * sum(w[1..=width]) == 1`. Taps beyond `width` are zero.
pub fn gauss_samples(width: u32) -> [f32; MAX_KERNEL_TAPS] {
    let width = width.clamp(1, MAX_WIDTH) as usize;
    let std_dev = width as f32 * 0.5;
    let mut samples = [0.0f32; MAX_KERNEL_TAPS];

    let mut sum = 0.0;
    for (offset, sample) in samples.iter_mut().enumerate().take(width + 1) {
        let x = offset as f32;
        let weight = (-x * x / (2.0 * std_dev * std_dev)).exp();
        *sample = weight;
        sum += if offset == 0 { weight } else { 2.0 * weight };
    }
    for sample in samples.iter_mut().take(width + 1) {
        *sample /= sum;
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_normalized() {
        for width in [1, 4, 15, 32] {
            let samples = gauss_samples(width);
            let sum: f32 = samples[0]
                + samples[1..=width as usize].iter().map(|w| 2.0 * w).sum::<f32>();
            approx::assert_relative_eq!(sum, 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn kernel_decreases_from_center() {
        let samples = gauss_samples(8);
        for offset in 1..=8 {
            assert!(
                samples[offset] <= samples[offset - 1],
                "tap {offset} should not exceed tap {}",
                offset - 1
            );
        }
    }

    #[test]
    fn taps_beyond_width_are_zero() {
        let samples = gauss_samples(4);
        assert!(samples[5..].iter().all(|&w| w == 0.0));
    }

    #[test]
    fn uniforms_capture_settings_and_target() {
        let settings = OutlineSettings::new(
            LinearRgba::BLUE,
            6,
            3.0,
            OutlineRenderFlags::BLURRED,
        );
        let uniforms = OutlinePassUniforms::new(&settings, Extent2D::new(200, 100));

        assert_eq!(uniforms.color, [0.0, 0.0, 1.0, 1.0]);
        approx::assert_relative_eq!(uniforms.inv_target_size[0], 1.0 / 200.0);
        approx::assert_relative_eq!(uniforms.inv_target_size[1], 1.0 / 100.0);
        assert_eq!(uniforms.width, 6.0);
        assert_eq!(uniforms.tap_count, 7);
        assert!(uniforms.is_blurred());

        let horizontal = uniforms.for_direction([1.0, 0.0]);
        assert_eq!(horizontal.direction, [1.0, 0.0]);
    }
}
