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

//! Settings instances with a shared-reference override.

use crate::math::LinearRgba;
use crate::settings::{OutlineRenderFlags, OutlineSettings};
use std::sync::{Arc, RwLock, Weak};

/// A settings object shared between several consumers.
///
/// Layers and behaviours reference it weakly: dropping the last strong
/// handle reverts every sharer to its local values.
pub type SharedSettings = Arc<RwLock<OutlineSettings>>;

/// A settings holder that either owns local values or delegates to a shared
/// [`SharedSettings`] object.
///
/// While a live share is set, every read and write forwards to it and the
/// local values are inert; switching the share does not copy values, so
/// reads reflect the new source immediately. There is exactly one effective
/// source of truth at any time.
#[derive(Debug, Clone, Default)]
pub struct OutlineSettingsInstance {
    local: OutlineSettings,
    shared: Option<Weak<RwLock<OutlineSettings>>>,
}

impl OutlineSettingsInstance {
    /// Creates an instance with default local values and no share.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an instance with the given local values.
    pub fn with_settings(settings: OutlineSettings) -> Self {
        Self {
            local: settings,
            shared: None,
        }
    }

    /// Creates an instance delegating to `shared`.
    pub fn with_shared(shared: &SharedSettings) -> Self {
        Self {
            local: OutlineSettings::default(),
            shared: Some(Arc::downgrade(shared)),
        }
    }

    /// Sets or clears the shared settings reference.
    ///
    /// The reference is weak: this instance never keeps the shared object
    /// alive.
    pub fn set_shared_settings(&mut self, shared: Option<&SharedSettings>) {
        self.shared = shared.map(Arc::downgrade);
    }

    /// The currently referenced shared settings, if the reference is set and
    /// still alive.
    pub fn shared_settings(&self) -> Option<SharedSettings> {
        self.shared.as_ref().and_then(Weak::upgrade)
    }

    /// Resolves the effective settings: a snapshot of the shared object when
    /// a live share is active, the local values otherwise.
    pub fn resolve(&self) -> OutlineSettings {
        match self.shared_settings() {
            Some(shared) => *shared.read().unwrap(),
            None => self.local,
        }
    }

    /// The effective outline color.
    pub fn color(&self) -> LinearRgba {
        self.resolve().color()
    }

    /// Sets the outline color on the effective source of truth.
    pub fn set_color(&mut self, color: LinearRgba) {
        self.update(|s| s.set_color(color));
    }

    /// The effective outline width.
    pub fn width(&self) -> u32 {
        self.resolve().width()
    }

    /// Sets the outline width (clamped) on the effective source of truth.
    pub fn set_width(&mut self, width: u32) {
        self.update(|s| s.set_width(width));
    }

    /// The effective blur intensity.
    pub fn intensity(&self) -> f32 {
        self.resolve().intensity()
    }

    /// Sets the blur intensity (clamped) on the effective source of truth.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.update(|s| s.set_intensity(intensity));
    }

    /// The effective render-mode flags.
    pub fn render_flags(&self) -> OutlineRenderFlags {
        self.resolve().render_flags()
    }

    /// Sets the render-mode flags on the effective source of truth.
    pub fn set_render_flags(&mut self, flags: OutlineRenderFlags) {
        self.update(|s| s.set_render_flags(flags));
    }

    /// Returns `true` if the effective settings request depth testing.
    pub fn requires_camera_depth(&self) -> bool {
        self.resolve().requires_camera_depth()
    }

    fn update(&mut self, mutate: impl FnOnce(&mut OutlineSettings)) {
        match self.shared_settings() {
            Some(shared) => mutate(&mut shared.write().unwrap()),
            None => mutate(&mut self.local),
        }
    }
}

impl PartialEq for OutlineSettingsInstance {
    /// Structural equality of the effective settings, after resolving any
    /// sharing indirection.
    fn eq(&self, other: &Self) -> bool {
        self.resolve() == other.resolve()
    }
}

impl PartialEq<OutlineSettings> for OutlineSettingsInstance {
    fn eq(&self, other: &OutlineSettings) -> bool {
        self.resolve() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_values_without_a_share() {
        let mut instance = OutlineSettingsInstance::new();
        instance.set_width(9);
        assert_eq!(instance.width(), 9);
    }

    #[test]
    fn reads_follow_the_shared_object() {
        let shared: SharedSettings = Arc::new(RwLock::new(OutlineSettings::default()));
        let mut instance = OutlineSettingsInstance::new();
        instance.set_width(9);
        instance.set_shared_settings(Some(&shared));

        // Mutating the external object changes what the sharer reads: no
        // stale local copy.
        shared.write().unwrap().set_width(12);
        assert_eq!(instance.width(), 12);
    }

    #[test]
    fn writes_forward_to_the_shared_object() {
        let shared: SharedSettings = Arc::new(RwLock::new(OutlineSettings::default()));
        let mut instance = OutlineSettingsInstance::with_shared(&shared);

        instance.set_intensity(5.0);
        approx::assert_relative_eq!(shared.read().unwrap().intensity(), 5.0);
    }

    #[test]
    fn switching_the_share_does_not_copy_values() {
        let a: SharedSettings = Arc::new(RwLock::new(OutlineSettings::new(
            LinearRgba::RED,
            3,
            1.0,
            OutlineRenderFlags::NONE,
        )));
        let b: SharedSettings = Arc::new(RwLock::new(OutlineSettings::new(
            LinearRgba::BLUE,
            8,
            1.0,
            OutlineRenderFlags::NONE,
        )));

        let mut instance = OutlineSettingsInstance::with_shared(&a);
        assert_eq!(instance.width(), 3);

        instance.set_shared_settings(Some(&b));
        assert_eq!(instance.width(), 8);
        assert_eq!(instance.color(), LinearRgba::BLUE);
    }

    #[test]
    fn dead_share_falls_back_to_local_values() {
        let mut instance = OutlineSettingsInstance::new();
        instance.set_width(7);

        let shared: SharedSettings = Arc::new(RwLock::new(OutlineSettings::default()));
        instance.set_shared_settings(Some(&shared));
        drop(shared);

        assert!(instance.shared_settings().is_none());
        assert_eq!(instance.width(), 7);
    }

    #[test]
    fn equality_resolves_indirection() {
        let shared: SharedSettings = Arc::new(RwLock::new(OutlineSettings::new(
            LinearRgba::GREEN,
            6,
            2.0,
            OutlineRenderFlags::BLURRED,
        )));
        let via_share = OutlineSettingsInstance::with_shared(&shared);
        let local = OutlineSettingsInstance::with_settings(OutlineSettings::new(
            LinearRgba::GREEN,
            6,
            2.0,
            OutlineRenderFlags::BLURRED,
        ));

        assert_eq!(via_share, local);
        assert_eq!(via_share, *shared.read().unwrap());
    }
}
