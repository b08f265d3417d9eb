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

//! # Aureole Core
//!
//! A backend-agnostic outline post-effect: colored silhouettes around
//! designated sets of objects, optionally blurred, composited onto a
//! camera's frame once per frame.
//!
//! The host engine stays opaque. It implements three small contracts —
//! a hierarchy query ([`scene::SceneSource`]), a temporary-target service
//! ([`graphics::TargetPool`]), and a command recorder
//! ([`graphics::CommandEncoder`]) — and calls a composition root once per
//! camera per frame:
//!
//! ```text
//!   OutlineLayerCollection (sorted by priority)
//!       │  for each enabled OutlineLayer
//!       ▼
//!   OutlineRenderer::render(drawables, resources, settings)
//!       │  mask pass → (blur H/V) → composite pass
//!       ▼
//!   CommandEncoder ──► submitted by the host
//! ```
//!
//! - **[`settings`]** — the tunable outline style (color, width, intensity,
//!   render flags) with clamping and a shared-reference override.
//! - **[`scene`]** — opaque object handles and cached drawable lists.
//! - **[`layer`]** — prioritized, exclusively-owned groups of outlined
//!   objects.
//! - **[`render`]** — the mask/dilate/composite pass recorder.
//! - **[`effect`]** — per-camera and per-object composition roots.
//! - **[`graphics`]** — the GPU contracts all of the above record against.

#![warn(missing_docs)]

pub mod effect;
pub mod error;
pub mod graphics;
pub mod layer;
pub mod math;
pub mod render;
pub mod scene;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

pub use effect::{OutlineBehaviour, OutlineEffect};
pub use error::OutlineError;
