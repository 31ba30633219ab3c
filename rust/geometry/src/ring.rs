// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ring-to-mesh pipeline
//!
//! dedup → plane fit → rectangle recovery → planar triangulation.

use crate::dedup::{dedup_ring, DedupOutcome};
use crate::diagnostic::Diagnostic;
use crate::mesh::TriangleMesh;
use crate::plane::fit_plane;
use crate::rectangle::{recover_rectangle, RectangleFixConfig};
use crate::triangulation::{signed_double_area, triangulate_ring, SnapPolicy};
use crate::{Point3, Result};

/// Rings whose second principal variance is at most this fraction of the
/// first are collinear and skipped
pub const DEGENERATE_SPREAD_RATIO: f64 = 1e-12;

/// Rings whose doubled area in the fitted plane is at most this fraction of
/// their largest principal variance are skipped.
///
/// Relative to the ring's own size, so millimetre-scale rings are kept. A
/// square of side `s` has doubled area `2s²` against a variance of `s²/4`.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-9;

/// Options for meshing a single ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshingOptions {
    /// Rectangle recovery thresholds; `None` disables the heuristic
    pub rectangle: Option<RectangleFixConfig>,
    pub snap: SnapPolicy,
}

impl Default for MeshingOptions {
    fn default() -> Self {
        Self {
            rectangle: Some(RectangleFixConfig::default()),
            snap: SnapPolicy::Exact,
        }
    }
}

/// Which branch of the pipeline produced a ring's mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshingPath {
    /// Too few points or no area; the mesh is empty
    Degenerate,
    /// Replaced by a recovered rectangle
    Rectangle,
    /// General ear-clipping triangulation
    Triangulated,
}

/// Output for one ring
#[derive(Debug, Clone)]
pub struct RingMesh {
    pub mesh: TriangleMesh,
    pub diagnostics: Vec<Diagnostic>,
    pub path: MeshingPath,
}

impl RingMesh {
    fn degenerate(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            mesh: TriangleMesh::new(),
            diagnostics,
            path: MeshingPath::Degenerate,
        }
    }
}

/// Mesh a single ring.
///
/// Degenerate rings give an empty mesh rather than an error. An `Err` means
/// the triangulator misbehaved and the ring's output cannot be trusted.
pub fn ring_to_mesh(ring: &[Point3<f64>], options: &MeshingOptions) -> Result<RingMesh> {
    let DedupOutcome { ring, diagnostics } = dedup_ring(ring);

    if ring.len() < 3 {
        return Ok(RingMesh::degenerate(diagnostics));
    }

    let fit = fit_plane(&ring);
    if fit.is_degenerate(DEGENERATE_SPREAD_RATIO) {
        return Ok(RingMesh::degenerate(diagnostics));
    }

    let projected = fit.basis.project_all(&ring);
    let double_area = signed_double_area(&projected).abs();
    if double_area <= DEGENERATE_AREA_EPSILON * fit.eigenvalues[0] {
        return Ok(RingMesh::degenerate(diagnostics));
    }

    if let Some(config) = &options.rectangle {
        if let Some(mesh) = recover_rectangle(&ring, &fit.basis, config) {
            return Ok(RingMesh {
                mesh,
                diagnostics,
                path: MeshingPath::Rectangle,
            });
        }
    }

    let mesh = triangulate_ring(&ring, &fit.basis, options.snap)?;
    if mesh.triangles.is_empty() {
        return Ok(RingMesh::degenerate(diagnostics));
    }

    Ok(RingMesh {
        mesh,
        diagnostics,
        path: MeshingPath::Triangulated,
    })
}
