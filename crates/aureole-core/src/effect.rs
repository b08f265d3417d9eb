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

//! Composition roots driving the outline pipeline.
//!
//! The host calls [`OutlineEffect::render_camera`] (per-camera, layered) or
//! [`OutlineBehaviour::render_camera`] (per-object) once per frame per
//! camera, before that camera's frame is submitted. There is no ambient
//! subscription state: everything a frame needs arrives as arguments.
//!
//! Both drivers track the cameras they have rendered to and periodically
//! sweep entries not seen within a maintenance interval, so cameras deleted
//! by the host do not accumulate.

use crate::error::OutlineError;
use crate::graphics::{CommandEncoder, TargetPool};
use crate::layer::OutlineLayerCollection;
use crate::render::{
    FrameContext, OutlineRenderStats, OutlineRenderer, OutlineResources,
};
use crate::scene::{CameraId, LayerMask, ObjectId, RendererCollection, SceneSource};
use crate::settings::OutlineSettingsInstance;
use ahash::AHashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// The default camera maintenance interval.
const DEFAULT_CAMERA_SWEEP_INTERVAL: Duration = Duration::from_secs(16);

/// Last-seen bookkeeping for the cameras a driver has rendered to.
#[derive(Debug)]
struct CameraTracker {
    cameras: AHashMap<CameraId, Instant>,
    last_sweep: Instant,
    interval: Duration,
}

impl CameraTracker {
    fn new() -> Self {
        Self {
            cameras: AHashMap::new(),
            last_sweep: Instant::now(),
            interval: DEFAULT_CAMERA_SWEEP_INTERVAL,
        }
    }

    fn touch(&mut self, camera: CameraId) {
        let now = Instant::now();
        if now.duration_since(self.last_sweep) >= self.interval {
            self.last_sweep = now;
            self.sweep(now);
        }
        self.cameras.insert(camera, now);
    }

    fn sweep(&mut self, now: Instant) {
        let interval = self.interval;
        let before = self.cameras.len();
        self.cameras
            .retain(|_, seen| now.duration_since(*seen) <= interval);
        let removed = before - self.cameras.len();
        if removed > 0 {
            log::debug!("swept {removed} stale outline camera(s)");
        }
    }
}

/// Attach one per camera composite: renders every layer of a shared
/// [`OutlineLayerCollection`] onto that camera's frame, in priority order.
#[derive(Debug)]
pub struct OutlineEffect {
    layers: Arc<RwLock<OutlineLayerCollection>>,
    resources: OutlineResources,
    tracker: CameraTracker,
    last_stats: OutlineRenderStats,
}

impl OutlineEffect {
    /// Creates an effect with its own empty layer collection.
    pub fn new(resources: OutlineResources) -> Self {
        Self::with_layers(resources, Arc::new(RwLock::new(OutlineLayerCollection::new())))
    }

    /// Creates an effect driving an existing shared layer collection.
    /// Several effects (one per camera) may drive one collection.
    pub fn with_layers(
        resources: OutlineResources,
        layers: Arc<RwLock<OutlineLayerCollection>>,
    ) -> Self {
        Self {
            layers,
            resources,
            tracker: CameraTracker::new(),
            last_stats: OutlineRenderStats::default(),
        }
    }

    /// The shared layer collection this effect renders.
    pub fn layers(&self) -> Arc<RwLock<OutlineLayerCollection>> {
        Arc::clone(&self.layers)
    }

    /// The resources this effect records against.
    pub fn resources(&self) -> &OutlineResources {
        &self.resources
    }

    /// Returns `true` if any enabled layer wants scene depth this frame.
    /// Hosts use this to decide whether to populate
    /// [`FrameContext::depth_target`].
    pub fn requires_camera_depth(&self) -> bool {
        self.layers.read().unwrap().requires_camera_depth()
    }

    /// The cameras this effect has rendered to since the last sweep.
    pub fn cameras(&self) -> Vec<CameraId> {
        self.tracker.cameras.keys().copied().collect()
    }

    /// The maintenance interval after which unseen cameras are dropped.
    pub fn camera_sweep_interval(&self) -> Duration {
        self.tracker.interval
    }

    /// Tunes the camera maintenance interval.
    pub fn set_camera_sweep_interval(&mut self, interval: Duration) {
        self.tracker.interval = interval;
    }

    /// Forces a camera sweep immediately, regardless of the interval.
    pub fn sweep_cameras(&mut self) {
        let now = Instant::now();
        self.tracker.last_sweep = now;
        self.tracker.sweep(now);
    }

    /// The counters of the most recent [`render_camera`](Self::render_camera)
    /// call.
    pub fn last_stats(&self) -> &OutlineRenderStats {
        &self.last_stats
    }

    /// Records the outline passes of every enabled layer onto `encoder`, in
    /// (priority desc, index asc) order, for one camera's frame.
    ///
    /// A layer whose render pass fails degrades to no output for this frame;
    /// remaining layers still render. Validation problems (a
    /// [`CameraId::NONE`] camera, a degenerate viewport) are reported to the
    /// caller instead.
    pub fn render_camera(
        &mut self,
        camera: CameraId,
        scene: &dyn SceneSource,
        encoder: &mut dyn CommandEncoder,
        pool: &dyn TargetPool,
        frame: FrameContext<'_>,
    ) -> Result<OutlineRenderStats, OutlineError> {
        if camera.is_none() {
            return Err(OutlineError::InvalidArgument("camera"));
        }
        self.tracker.touch(camera);

        let mut renderer = OutlineRenderer::new(encoder, pool, frame)?;
        let layers = self.layers.write().unwrap().sorted_layers();

        let mut stats = OutlineRenderStats::default();
        for layer in layers {
            let mut layer = layer.write().unwrap();
            if !layer.enabled() {
                continue;
            }
            match layer.render(&mut renderer, &self.resources, scene) {
                Ok(()) => stats.layers_rendered += 1,
                Err(err) => {
                    log::warn!("outline layer '{}' degraded to no output: {err}", &*layer);
                    stats.layers_failed += 1;
                }
            }
        }

        stats.merge(&renderer.take_stats());
        self.last_stats = stats;
        Ok(stats)
    }
}

/// Attach one per outlined object: renders a single object's outline with
/// its own settings, without the layer machinery.
#[derive(Debug)]
pub struct OutlineBehaviour {
    root: ObjectId,
    renderers: RendererCollection,
    settings: OutlineSettingsInstance,
    resources: OutlineResources,
    ignore_mask: LayerMask,
    update_renderers: bool,
    tracker: CameraTracker,
}

impl OutlineBehaviour {
    /// Creates a behaviour outlining `root`, caching its current drawable
    /// hierarchy. Rejects a missing or dead root immediately.
    pub fn new(
        scene: &dyn SceneSource,
        root: ObjectId,
        resources: OutlineResources,
    ) -> Result<Self, OutlineError> {
        if root.is_none() || !scene.object_alive(root) {
            return Err(OutlineError::InvalidArgument("root"));
        }
        let mut renderers = RendererCollection::new(root);
        renderers.reset(scene, true, LayerMask::NONE);
        Ok(Self {
            root,
            renderers,
            settings: OutlineSettingsInstance::new(),
            resources,
            ignore_mask: LayerMask::NONE,
            update_renderers: false,
            tracker: CameraTracker::new(),
        })
    }

    /// The outlined root object.
    pub fn root(&self) -> ObjectId {
        self.root
    }

    /// This object's settings instance.
    pub fn settings(&self) -> &OutlineSettingsInstance {
        &self.settings
    }

    /// This object's settings instance, mutably.
    pub fn settings_mut(&mut self) -> &mut OutlineSettingsInstance {
        &mut self.settings
    }

    /// The cached renderer collection for the root object.
    pub fn renderers(&self) -> &RendererCollection {
        &self.renderers
    }

    /// Whether the drawable list is refreshed every frame. Enable for
    /// hierarchies whose children appear or disappear at runtime.
    pub fn update_renderers(&self) -> bool {
        self.update_renderers
    }

    /// Sets the per-frame refresh flag.
    pub fn set_update_renderers(&mut self, update: bool) {
        self.update_renderers = update;
    }

    /// Rebuilds the drawable cache now, applying `ignore_mask` to this and
    /// all future refreshes.
    pub fn refresh_renderers(&mut self, scene: &dyn SceneSource, ignore_mask: LayerMask) {
        self.ignore_mask = ignore_mask;
        self.renderers.reset(scene, true, ignore_mask);
    }

    /// Returns `true` if this object's settings request scene depth.
    pub fn requires_camera_depth(&self) -> bool {
        self.settings.requires_camera_depth()
    }

    /// The cameras this behaviour has rendered to since the last sweep.
    pub fn cameras(&self) -> Vec<CameraId> {
        self.tracker.cameras.keys().copied().collect()
    }

    /// Tunes the camera maintenance interval.
    pub fn set_camera_sweep_interval(&mut self, interval: Duration) {
        self.tracker.interval = interval;
    }

    /// Forces a camera sweep immediately, regardless of the interval.
    pub fn sweep_cameras(&mut self) {
        let now = Instant::now();
        self.tracker.last_sweep = now;
        self.tracker.sweep(now);
    }

    /// Records this object's outline passes for one camera's frame.
    ///
    /// Renders nothing (successfully) when the root object is inactive or
    /// has been destroyed.
    pub fn render_camera(
        &mut self,
        camera: CameraId,
        scene: &dyn SceneSource,
        encoder: &mut dyn CommandEncoder,
        pool: &dyn TargetPool,
        frame: FrameContext<'_>,
    ) -> Result<OutlineRenderStats, OutlineError> {
        if camera.is_none() {
            return Err(OutlineError::InvalidArgument("camera"));
        }
        self.tracker.touch(camera);

        if !scene.object_active(self.root) {
            return Ok(OutlineRenderStats::default());
        }
        if self.update_renderers {
            self.renderers.reset(scene, false, self.ignore_mask);
        }

        let mut renderer = OutlineRenderer::new(encoder, pool, frame)?;
        let settings = self.settings.resolve();
        renderer.render(self.renderers.get_list(scene), &self.resources, &settings)?;
        Ok(renderer.take_stats())
    }
}
