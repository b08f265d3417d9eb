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

//! Ordered collections of outline layers.

use crate::error::OutlineError;
use crate::layer::{LayerOwner, OutlineLayer};
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// The stable identity of one [`OutlineLayerCollection`], used to enforce
/// exclusive layer ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(Uuid);

impl CollectionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A layer shared between a collection and its other consumers.
pub type SharedLayer = Arc<RwLock<OutlineLayer>>;

/// An ordered set of layers attached to a composite effect.
///
/// Insertion order is preserved; the draw order re-sorts lazily by
/// (priority descending, insertion index ascending) whenever a priority
/// change or a membership change flags the order dirty. Each layer belongs
/// to at most one collection at a time.
#[derive(Debug)]
pub struct OutlineLayerCollection {
    id: CollectionId,
    layers: Vec<SharedLayer>,
    order_dirty: Arc<AtomicBool>,
    sorted: Vec<usize>,
}

impl Default for OutlineLayerCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineLayerCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            id: CollectionId::new(),
            layers: Vec::new(),
            order_dirty: Arc::new(AtomicBool::new(false)),
            sorted: Vec::new(),
        }
    }

    /// The identity of this collection.
    pub fn id(&self) -> CollectionId {
        self.id
    }

    /// Appends a layer to the collection, taking exclusive ownership.
    ///
    /// Re-adding a layer this collection already owns is a no-op. Attaching
    /// a layer owned by a different collection fails with
    /// [`OutlineError::OwnershipConflict`], leaving the original ownership
    /// unchanged.
    pub fn add(&mut self, layer: &SharedLayer) -> Result<(), OutlineError> {
        if self.index_of(layer).is_some() {
            return Ok(());
        }
        layer.write().unwrap().attach(LayerOwner {
            collection: self.id,
            order_dirty: Arc::clone(&self.order_dirty),
        })?;
        self.layers.push(Arc::clone(layer));
        self.order_dirty.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Removes a layer, releasing its ownership. Returns `false` if the
    /// layer is not a member of this collection.
    pub fn remove(&mut self, layer: &SharedLayer) -> bool {
        match self.index_of(layer) {
            Some(index) => {
                self.layers.remove(index);
                layer.write().unwrap().detach(self.id);
                self.order_dirty.store(true, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// The insertion index of `layer` in this collection.
    pub fn index_of(&self, layer: &SharedLayer) -> Option<usize> {
        self.layers.iter().position(|l| Arc::ptr_eq(l, layer))
    }

    /// The layer at insertion `index`.
    pub fn get(&self, index: usize) -> Option<&SharedLayer> {
        self.layers.get(index)
    }

    /// The display label of the layer at insertion `index`: its name, or a
    /// positional default for unnamed layers.
    pub fn label(&self, index: usize) -> Option<String> {
        self.layers.get(index).map(|layer| {
            layer
                .read()
                .unwrap()
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("outline layer #{index}"))
        })
    }

    /// The number of layers in the collection.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if the collection holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Removes every layer, releasing their ownership.
    pub fn clear(&mut self) {
        for layer in self.layers.drain(..) {
            layer.write().unwrap().detach(self.id);
        }
        self.order_dirty.store(true, Ordering::Relaxed);
    }

    /// Iterates the layers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SharedLayer> {
        self.layers.iter()
    }

    /// Returns the layers in draw order, re-sorting first if a priority or
    /// membership change flagged the order dirty.
    pub fn sorted_layers(&mut self) -> Vec<SharedLayer> {
        if self.order_dirty.swap(false, Ordering::Relaxed) || self.sorted.len() != self.layers.len()
        {
            let mut indices: Vec<usize> = (0..self.layers.len()).collect();
            indices.sort_by_key(|&i| (Reverse(self.layers[i].read().unwrap().priority()), i));
            self.sorted = indices;
        }
        self.sorted
            .iter()
            .map(|&i| Arc::clone(&self.layers[i]))
            .collect()
    }

    /// Returns `true` if any enabled layer's effective settings request
    /// depth testing.
    pub fn requires_camera_depth(&self) -> bool {
        self.layers.iter().any(|layer| {
            let layer = layer.read().unwrap();
            layer.enabled() && layer.settings().requires_camera_depth()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(priority: i32) -> SharedLayer {
        let mut layer = OutlineLayer::new();
        layer.set_priority(priority);
        Arc::new(RwLock::new(layer))
    }

    fn priorities(layers: &[SharedLayer]) -> Vec<i32> {
        layers.iter().map(|l| l.read().unwrap().priority()).collect()
    }

    #[test]
    fn draw_order_is_priority_desc_with_stable_ties() {
        let mut collection = OutlineLayerCollection::new();
        let inserted = [shared(3), shared(1), shared(3), shared(2)];
        for layer in &inserted {
            collection.add(layer).unwrap();
        }

        let sorted = collection.sorted_layers();
        assert_eq!(priorities(&sorted), [3, 3, 2, 1]);
        // Equal priorities preserve insertion order: layer0 before layer2.
        assert!(Arc::ptr_eq(&sorted[0], &inserted[0]));
        assert!(Arc::ptr_eq(&sorted[1], &inserted[2]));
        assert!(Arc::ptr_eq(&sorted[2], &inserted[3]));
        assert!(Arc::ptr_eq(&sorted[3], &inserted[1]));
    }

    #[test]
    fn priority_change_triggers_lazy_resort() {
        let mut collection = OutlineLayerCollection::new();
        let a = shared(1);
        let b = shared(2);
        collection.add(&a).unwrap();
        collection.add(&b).unwrap();
        assert_eq!(priorities(&collection.sorted_layers()), [2, 1]);

        a.write().unwrap().set_priority(5);
        assert_eq!(priorities(&collection.sorted_layers()), [5, 2]);
    }

    #[test]
    fn ownership_is_exclusive() {
        let mut first = OutlineLayerCollection::new();
        let mut second = OutlineLayerCollection::new();
        let layer = shared(0);

        first.add(&layer).unwrap();
        let err = second.add(&layer).unwrap_err();
        assert!(matches!(err, OutlineError::OwnershipConflict { .. }));
        assert_eq!(
            layer.read().unwrap().owner_collection(),
            Some(first.id()),
            "a failed attach must leave the original ownership unchanged"
        );
        assert!(second.is_empty());
    }

    #[test]
    fn reattach_to_same_collection_is_a_no_op() {
        let mut collection = OutlineLayerCollection::new();
        let layer = shared(0);
        collection.add(&layer).unwrap();
        collection.add(&layer).unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn detach_then_attach_elsewhere_succeeds() {
        let mut first = OutlineLayerCollection::new();
        let mut second = OutlineLayerCollection::new();
        let layer = shared(0);

        first.add(&layer).unwrap();
        assert!(first.remove(&layer));
        second.add(&layer).unwrap();
        assert_eq!(layer.read().unwrap().owner_collection(), Some(second.id()));
    }

    #[test]
    fn remove_of_non_member_reports_not_found() {
        let mut collection = OutlineLayerCollection::new();
        let layer = shared(0);
        assert!(!collection.remove(&layer));
    }

    #[test]
    fn unnamed_layers_get_a_positional_label() {
        let mut collection = OutlineLayerCollection::new();
        collection.add(&shared(0)).unwrap();
        collection
            .add(&Arc::new(RwLock::new(OutlineLayer::with_name("hover"))))
            .unwrap();

        assert_eq!(collection.label(0).unwrap(), "outline layer #0");
        assert_eq!(collection.label(1).unwrap(), "hover");
        assert!(collection.label(2).is_none());
    }

    #[test]
    fn depth_requirement_ignores_disabled_layers() {
        use crate::settings::OutlineRenderFlags;

        let mut collection = OutlineLayerCollection::new();
        let layer = shared(0);
        layer
            .write()
            .unwrap()
            .settings_mut()
            .set_render_flags(OutlineRenderFlags::DEPTH_TESTING);
        collection.add(&layer).unwrap();
        assert!(collection.requires_camera_depth());

        layer.write().unwrap().set_enabled(false);
        assert!(!collection.requires_camera_depth());
    }
}
