// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while meshing a ring
///
/// Degenerate rings and aborted rectangle fixes are not errors; they show up
/// as empty meshes or as the general triangulation path. Only library
/// failures and broken output invariants are reported here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Triangulation failed: {0}")]
    TriangulationError(String),

    #[error(
        "Triangle {triangle} has invalid indices {indices:?} (vertex count {vertex_count})"
    )]
    TriangulationInvariantViolation {
        triangle: usize,
        indices: [usize; 3],
        vertex_count: usize,
    },
}
