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

//! Backend-agnostic graphics contracts.
//!
//! The outline pipeline never talks to a graphics API directly. It records
//! commands through the traits in this module, using opaque handles minted by
//! the host:
//!
//! - **[`handle`]**: Opaque IDs for GPU resources (buffers, textures, views,
//!   bind groups, pipelines).
//! - **[`pass`]**: Render-pass descriptors — load/store operations and
//!   attachments, expressed as plain data.
//! - **[`encoder`]**: The [`CommandEncoder`](encoder::CommandEncoder) /
//!   [`RenderPass`](encoder::RenderPass) recording traits the host backend
//!   implements.
//! - **[`target`]**: The [`TargetPool`](target::TargetPool) contract for
//!   temporary mask targets, with a scope guard that guarantees release.

pub mod encoder;
pub mod handle;
pub mod pass;
pub mod target;

pub use self::encoder::{CommandEncoder, RenderPass};
pub use self::handle::*;
pub use self::pass::*;
pub use self::target::{MaskTarget, ScopedTarget, TargetError, TargetPool};
