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

//! Outline layers.
//!
//! An [`OutlineLayer`] is a named group of objects rendered with one shared
//! visual style and priority. A layer can belong to at most one
//! [`OutlineLayerCollection`](collection::OutlineLayerCollection) at a time.

pub mod collection;

pub use self::collection::{CollectionId, OutlineLayerCollection, SharedLayer};

use crate::error::OutlineError;
use crate::render::{OutlineRenderer, OutlineResources, RenderError};
use crate::scene::{LayerMask, ObjectId, RendererCollection, SceneSource};
use crate::settings::{OutlineSettingsInstance, SharedSettings};
use ahash::AHashMap;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// The ownership record a collection stamps onto an attached layer.
///
/// Carries the collection identity (for the exclusivity check) and the
/// collection's order-dirty flag, which priority setters raise.
#[derive(Debug, Clone)]
pub(crate) struct LayerOwner {
    pub(crate) collection: CollectionId,
    pub(crate) order_dirty: Arc<AtomicBool>,
}

/// A collection of objects that share outline settings and draw order.
///
/// Object membership keys are unique; re-adding an existing key is a no-op.
#[derive(Debug)]
pub struct OutlineLayer {
    settings: OutlineSettingsInstance,
    name: Option<String>,
    priority: i32,
    enabled: bool,
    owner: Option<LayerOwner>,
    objects: AHashMap<ObjectId, RendererCollection>,
}

impl Default for OutlineLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineLayer {
    /// Creates an empty, enabled layer with default settings.
    pub fn new() -> Self {
        Self {
            settings: OutlineSettingsInstance::new(),
            name: None,
            priority: 0,
            enabled: true,
            owner: None,
            objects: AHashMap::new(),
        }
    }

    /// Creates an empty layer with the given name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new()
        }
    }

    /// Creates an empty layer delegating its settings to `shared`.
    pub fn with_shared_settings(shared: &SharedSettings) -> Self {
        Self {
            settings: OutlineSettingsInstance::with_shared(shared),
            ..Self::new()
        }
    }

    /// The layer name, if one was set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets or clears the layer name.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Whether the layer renders at all.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the layer. A disabled layer's
    /// [`render`](Self::render) produces zero submissions.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The layer priority. Layers with greater priority render on top;
    /// ties are broken by index in the parent collection.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Sets the layer priority, flagging the parent collection for a
    /// re-sort.
    pub fn set_priority(&mut self, priority: i32) {
        if self.priority != priority {
            if let Some(owner) = &self.owner {
                owner
                    .order_dirty
                    .store(true, std::sync::atomic::Ordering::Relaxed);
            }
            self.priority = priority;
        }
    }

    /// The layer's settings instance.
    pub fn settings(&self) -> &OutlineSettingsInstance {
        &self.settings
    }

    /// The layer's settings instance, mutably.
    pub fn settings_mut(&mut self) -> &mut OutlineSettingsInstance {
        &mut self.settings
    }

    /// Adds an object to the layer, building its renderer cache from the
    /// current hierarchy minus `ignore_mask`.
    ///
    /// Idempotent: an object that is already a member is left untouched.
    /// A [`ObjectId::NONE`] or dead handle is rejected immediately.
    pub fn add(
        &mut self,
        scene: &dyn SceneSource,
        object: ObjectId,
        ignore_mask: LayerMask,
    ) -> Result<(), OutlineError> {
        if object.is_none() || !scene.object_alive(object) {
            return Err(OutlineError::InvalidArgument("object"));
        }
        if !self.objects.contains_key(&object) {
            let mut renderers = RendererCollection::new(object);
            renderers.reset(scene, false, ignore_mask);
            self.objects.insert(object, renderers);
        }
        Ok(())
    }

    /// Removes an object from the layer, discarding its renderer cache.
    /// Returns `false` if the object was not a member.
    pub fn remove(&mut self, object: ObjectId) -> bool {
        self.objects.remove(&object).is_some()
    }

    /// Returns `true` if the object is a member of this layer.
    pub fn contains(&self, object: ObjectId) -> bool {
        self.objects.contains_key(&object)
    }

    /// The number of member objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the layer has no member objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Removes every member object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Iterates over the member object handles, in unspecified order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }

    /// The renderer cache associated with `object`, if it is a member.
    pub fn renderers(&self, object: ObjectId) -> Option<&RendererCollection> {
        self.objects.get(&object)
    }

    /// Records this layer's outline passes: one renderer invocation per
    /// live, active member object, with the effective settings resolved once
    /// per call.
    ///
    /// A no-op when the layer is disabled. Inactive members are skipped
    /// without being removed from membership. An error aborts this layer's
    /// render call only.
    pub fn render(
        &mut self,
        renderer: &mut OutlineRenderer<'_>,
        resources: &OutlineResources,
        scene: &dyn SceneSource,
    ) -> Result<(), RenderError> {
        if !self.enabled {
            return Ok(());
        }
        let settings = self.settings.resolve();
        for (object, renderers) in self.objects.iter_mut() {
            if !scene.object_active(*object) {
                renderer.note_skipped_object();
                continue;
            }
            renderer.render(renderers.get_list(scene), resources, &settings)?;
        }
        Ok(())
    }

    pub(crate) fn attach(&mut self, owner: LayerOwner) -> Result<(), OutlineError> {
        match &self.owner {
            Some(existing) if existing.collection != owner.collection => {
                Err(OutlineError::OwnershipConflict {
                    layer: self.name.clone().unwrap_or_else(|| "outline layer".into()),
                })
            }
            _ => {
                self.owner = Some(owner);
                Ok(())
            }
        }
    }

    pub(crate) fn detach(&mut self, collection: CollectionId) {
        if self
            .owner
            .as_ref()
            .is_some_and(|o| o.collection == collection)
        {
            self.owner = None;
        }
    }

    pub(crate) fn owner_collection(&self) -> Option<CollectionId> {
        self.owner.as_ref().map(|o| o.collection)
    }
}

impl fmt::Display for OutlineLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_deref().unwrap_or("outline layer"))?;
        if self.priority != 0 {
            write!(f, " z{}", self.priority)?;
        }
        if !self.objects.is_empty() {
            write!(f, " ({} objects)", self.objects.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TableScene;

    #[test]
    fn add_is_idempotent() {
        let mut scene = TableScene::new();
        let object = scene.add_object(1, true);
        scene.add_drawable(object, 10, LayerMask::NONE);

        let mut layer = OutlineLayer::new();
        layer.add(&scene, object, LayerMask::NONE).unwrap();
        layer.add(&scene, object, LayerMask::NONE).unwrap();
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn add_rejects_missing_objects() {
        let scene = TableScene::new();
        let mut layer = OutlineLayer::new();

        let err = layer.add(&scene, ObjectId::NONE, LayerMask::NONE).unwrap_err();
        assert!(matches!(err, OutlineError::InvalidArgument("object")));

        let err = layer.add(&scene, ObjectId(42), LayerMask::NONE).unwrap_err();
        assert!(matches!(err, OutlineError::InvalidArgument("object")));
        assert!(layer.is_empty());
    }

    #[test]
    fn remove_reports_membership() {
        let mut scene = TableScene::new();
        let object = scene.add_object(1, true);

        let mut layer = OutlineLayer::new();
        layer.add(&scene, object, LayerMask::NONE).unwrap();
        assert!(layer.remove(object));
        assert!(!layer.remove(object));
    }

    #[test]
    fn display_reflects_name_priority_and_size() {
        let mut scene = TableScene::new();
        let object = scene.add_object(1, true);

        let mut layer = OutlineLayer::with_name("selection");
        layer.set_priority(3);
        layer.add(&scene, object, LayerMask::NONE).unwrap();
        assert_eq!(format!("{layer}"), "selection z3 (1 objects)");
        assert_eq!(format!("{}", OutlineLayer::new()), "outline layer");
    }
}
