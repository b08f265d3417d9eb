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

//! Cached drawable lists for outlined objects.

use crate::scene::{Drawable, LayerMask, ObjectId, SceneSource};

/// The flattened list of drawable sub-objects for one logical object.
///
/// The list is a cache: it is rebuilt on [`reset`](Self::reset) (when the
/// owner knows the hierarchy changed, or every frame if the owner opted into
/// continuous refresh) and lazily pruned of dead drawables on
/// [`get_list`](Self::get_list). No rebuild happens implicitly.
#[derive(Debug)]
pub struct RendererCollection {
    root: ObjectId,
    ignore_mask: LayerMask,
    drawables: Vec<Drawable>,
}

impl RendererCollection {
    /// Creates an empty collection for the given root object.
    ///
    /// The cache starts empty; call [`reset`](Self::reset) to populate it.
    pub fn new(root: ObjectId) -> Self {
        Self {
            root,
            ignore_mask: LayerMask::NONE,
            drawables: Vec::new(),
        }
    }

    /// The root object this collection flattens.
    pub fn root(&self) -> ObjectId {
        self.root
    }

    /// The exclusion mask applied by the last reset.
    pub fn ignore_mask(&self) -> LayerMask {
        self.ignore_mask
    }

    /// Repopulates the drawable list from the current hierarchy of the root
    /// object, excluding sub-objects matching `ignore_mask`.
    ///
    /// With `force_rebuild` set, currently inactive sub-objects are cached
    /// too, so they outline as soon as they re-activate without another
    /// reset. A hierarchy with zero matching sub-objects yields an empty
    /// list, not an error.
    pub fn reset(&mut self, scene: &dyn SceneSource, force_rebuild: bool, ignore_mask: LayerMask) {
        self.ignore_mask = ignore_mask;
        self.drawables.clear();
        scene.collect_drawables(self.root, ignore_mask, force_rebuild, &mut self.drawables);
    }

    /// Returns the cached drawables, pruning entries whose host drawable has
    /// been destroyed since the last rebuild.
    ///
    /// Callers must not rely on the returned order surviving a prune.
    pub fn get_list(&mut self, scene: &dyn SceneSource) -> &[Drawable] {
        self.drawables.retain(|d| scene.drawable_alive(d.id));
        &self.drawables
    }

    /// The number of currently cached drawables (including not-yet-pruned
    /// dead entries).
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Returns `true` if the cache holds no drawables.
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}
