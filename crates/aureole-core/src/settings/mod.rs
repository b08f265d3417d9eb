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

//! The outline settings model.
//!
//! [`OutlineSettings`] holds the tunable parameters of one outline style with
//! silent range clamping; [`OutlineSettingsInstance`] adds the sharing
//! mechanism that lets several consumers reference one settings object and
//! fall back to local values when no share is active.

pub mod flags;
pub mod instance;

pub use self::flags::OutlineRenderFlags;
pub use self::instance::{OutlineSettingsInstance, SharedSettings};

use crate::math::LinearRgba;
use serde::{Deserialize, Serialize};

/// The smallest accepted outline width, in pixels.
pub const MIN_WIDTH: u32 = 1;
/// The largest accepted outline width, in pixels.
pub const MAX_WIDTH: u32 = 32;
/// The smallest accepted blur intensity.
pub const MIN_INTENSITY: f32 = 0.01;
/// The largest accepted blur intensity.
pub const MAX_INTENSITY: f32 = 64.0;

/// The tunable parameters of one outline style.
///
/// Width and intensity setters clamp silently to
/// [[`MIN_WIDTH`], [`MAX_WIDTH`]] and [[`MIN_INTENSITY`], [`MAX_INTENSITY`]]
/// respectively; out-of-range input is not an error. Equality is structural
/// over all four attributes.
///
/// The serialized form is the persisted-settings container read and written
/// by the host's asset layer; values are re-clamped on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "OutlineSettingsRecord", into = "OutlineSettingsRecord")]
pub struct OutlineSettings {
    color: LinearRgba,
    width: u32,
    intensity: f32,
    render_flags: OutlineRenderFlags,
}

impl OutlineSettings {
    /// Creates settings from explicit values, clamping width and intensity.
    pub fn new(
        color: LinearRgba,
        width: u32,
        intensity: f32,
        render_flags: OutlineRenderFlags,
    ) -> Self {
        let mut settings = Self {
            color,
            width: MIN_WIDTH,
            intensity: MIN_INTENSITY,
            render_flags,
        };
        settings.set_width(width);
        settings.set_intensity(intensity);
        settings
    }

    /// The outline color.
    pub fn color(&self) -> LinearRgba {
        self.color
    }

    /// Sets the outline color.
    pub fn set_color(&mut self, color: LinearRgba) {
        self.color = color;
    }

    /// The outline width, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Sets the outline width, clamped to [[`MIN_WIDTH`], [`MAX_WIDTH`]].
    pub fn set_width(&mut self, width: u32) {
        self.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
    }

    /// The blur intensity.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Sets the blur intensity, clamped to
    /// [[`MIN_INTENSITY`], [`MAX_INTENSITY`]].
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(MIN_INTENSITY, MAX_INTENSITY);
    }

    /// The render-mode flags.
    pub fn render_flags(&self) -> OutlineRenderFlags {
        self.render_flags
    }

    /// Sets the render-mode flags.
    pub fn set_render_flags(&mut self, flags: OutlineRenderFlags) {
        self.render_flags = flags;
    }

    /// Returns `true` if the mask pass should depth-test against scene
    /// depth. The host uses this to decide whether to provide a depth view
    /// for the frame.
    pub fn requires_camera_depth(&self) -> bool {
        self.render_flags.contains(OutlineRenderFlags::DEPTH_TESTING)
    }
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            color: LinearRgba::RED,
            width: 4,
            intensity: 2.0,
            render_flags: OutlineRenderFlags::NONE,
        }
    }
}

/// The serialized field layout of [`OutlineSettings`].
#[derive(Serialize, Deserialize)]
struct OutlineSettingsRecord {
    color: LinearRgba,
    width: u32,
    intensity: f32,
    render_mode: OutlineRenderFlags,
}

impl From<OutlineSettingsRecord> for OutlineSettings {
    fn from(record: OutlineSettingsRecord) -> Self {
        OutlineSettings::new(
            record.color,
            record.width,
            record.intensity,
            record.render_mode,
        )
    }
}

impl From<OutlineSettings> for OutlineSettingsRecord {
    fn from(settings: OutlineSettings) -> Self {
        OutlineSettingsRecord {
            color: settings.color,
            width: settings.width,
            intensity: settings.intensity,
            render_mode: settings.render_flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_round_trips_through_clamp() {
        let mut settings = OutlineSettings::default();
        for w in [0, 1, 4, 32, 33, 1000] {
            settings.set_width(w);
            assert_eq!(settings.width(), w.clamp(MIN_WIDTH, MAX_WIDTH));
        }
    }

    #[test]
    fn intensity_round_trips_through_clamp() {
        let mut settings = OutlineSettings::default();
        for i in [-1.0, 0.0, 0.01, 2.5, 64.0, 1e6] {
            settings.set_intensity(i);
            approx::assert_relative_eq!(
                settings.intensity(),
                i.clamp(MIN_INTENSITY, MAX_INTENSITY)
            );
        }
    }

    #[test]
    fn constructor_clamps_like_the_setters() {
        let settings = OutlineSettings::new(
            LinearRgba::BLUE,
            u32::MAX,
            -5.0,
            OutlineRenderFlags::BLURRED,
        );
        assert_eq!(settings.width(), MAX_WIDTH);
        assert_eq!(settings.intensity(), MIN_INTENSITY);
    }

    #[test]
    fn equality_is_structural() {
        let a = OutlineSettings::new(LinearRgba::RED, 4, 2.0, OutlineRenderFlags::NONE);
        let b = OutlineSettings::new(LinearRgba::RED, 4, 2.0, OutlineRenderFlags::NONE);
        let c = OutlineSettings::new(LinearRgba::RED, 5, 2.0, OutlineRenderFlags::NONE);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn depth_requirement_follows_the_flag() {
        let mut settings = OutlineSettings::default();
        assert!(!settings.requires_camera_depth());
        settings.set_render_flags(OutlineRenderFlags::DEPTH_TESTING);
        assert!(settings.requires_camera_depth());
    }

    #[test]
    fn persisted_container_round_trips() {
        let settings = OutlineSettings::new(
            LinearRgba::new(0.2, 0.4, 0.6, 0.8),
            7,
            3.5,
            OutlineRenderFlags::BLURRED | OutlineRenderFlags::DEPTH_TESTING,
        );
        let json = serde_json::to_string(&settings).unwrap();
        let back: OutlineSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn deserialization_re_clamps_out_of_range_values() {
        let json = r#"{"color":{"r":1.0,"g":0.0,"b":0.0,"a":1.0},"width":999,"intensity":-3.0,"render_mode":0}"#;
        let settings: OutlineSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.width(), MAX_WIDTH);
        assert_eq!(settings.intensity(), MIN_INTENSITY);
    }
}
