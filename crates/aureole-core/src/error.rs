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

//! The error hierarchy of the outline effect.
//!
//! Validation errors surface synchronously at the mutating call. Per-frame
//! rendering errors ([`RenderError`]) are caught at the layer boundary by
//! the composition roots and degrade that layer only.
//!
//! [`RenderError`]: crate::render::RenderError

use crate::render::RenderError;
use std::fmt;

/// An error raised by a mutating or driving outline operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    /// A missing or dead handle was passed where a live one is required.
    /// The payload names the offending argument.
    InvalidArgument(&'static str),
    /// A layer already owned by another collection was attached to a second
    /// one. The original ownership is left unchanged.
    OwnershipConflict {
        /// The display name of the layer whose attach was rejected.
        layer: String,
    },
    /// A render pass failed while driving the effect.
    Render(RenderError),
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineError::InvalidArgument(what) => {
                write!(f, "Invalid argument: '{what}' is missing or dead.")
            }
            OutlineError::OwnershipConflict { layer } => {
                write!(
                    f,
                    "Layer '{layer}' can only belong to a single collection."
                )
            }
            OutlineError::Render(err) => {
                write!(f, "Outline rendering failed: {err}")
            }
        }
    }
}

impl std::error::Error for OutlineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutlineError::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RenderError> for OutlineError {
    fn from(err: RenderError) -> Self {
        OutlineError::Render(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::TargetError;
    use std::error::Error;

    #[test]
    fn invalid_argument_display() {
        let err = OutlineError::InvalidArgument("object");
        assert_eq!(format!("{err}"), "Invalid argument: 'object' is missing or dead.");
    }

    #[test]
    fn ownership_conflict_display() {
        let err = OutlineError::OwnershipConflict {
            layer: "selection".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Layer 'selection' can only belong to a single collection."
        );
    }

    #[test]
    fn render_error_chains_its_source() {
        let err: OutlineError = RenderError::TargetAcquisition(TargetError::Exhausted).into();
        assert_eq!(
            format!("{err}"),
            "Outline rendering failed: Temporary target acquisition failed: \
             Temporary target pool is exhausted."
        );
        assert!(err.source().is_some());
        assert!(err.source().unwrap().source().is_some());
    }
}
