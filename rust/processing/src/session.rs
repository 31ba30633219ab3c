// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Meshing sessions over many rings.
//!
//! Rings are independent, so they are meshed in parallel; their results are
//! then appended to a single [`GlobalMesh`] strictly in input order, which
//! keeps vertex offsets deterministic.

use citymesh_geometry::{
    ring_to_mesh, GlobalMesh, MeshingOptions, MeshingPath, Point3, Result, RingMesh, TriangleMesh,
};
use rayon::prelude::*;
use serde::Serialize;

/// Counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub rings: usize,
    pub degenerate: usize,
    pub rectangles: usize,
    pub triangulated: usize,
    pub failed: usize,
    pub duplicate_vertices: usize,
    pub vertices: usize,
    pub triangles: usize,
}

impl SessionStats {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A ring whose meshing failed; the rest of the session is unaffected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingFailure {
    pub ring: usize,
    pub error: String,
}

/// Accumulates ring meshes into one globally indexed mesh
#[derive(Debug, Default)]
pub struct Session {
    options: MeshingOptions,
    mesh: GlobalMesh,
    stats: SessionStats,
    failures: Vec<RingFailure>,
}

/// Final result of a session
#[derive(Debug, Clone)]
pub struct SessionOutput {
    pub mesh: TriangleMesh,
    pub stats: SessionStats,
    pub failures: Vec<RingFailure>,
}

impl Session {
    pub fn new(options: MeshingOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Mesh one ring and append it.
    ///
    /// Returns the vertex offset assigned to the ring, or `None` when it
    /// failed.
    pub fn push_ring(&mut self, ring: &[Point3<f64>]) -> Option<u32> {
        let result = ring_to_mesh(ring, &self.options);
        self.absorb(result)
    }

    /// Append a ring result computed elsewhere. Must be called in ring order.
    pub fn absorb(&mut self, result: Result<RingMesh>) -> Option<u32> {
        let ring = self.stats.rings;
        self.stats.rings += 1;

        let ring_mesh = match result {
            Ok(ring_mesh) => ring_mesh,
            Err(e) => {
                tracing::error!(ring, error = %e, "Ring meshing failed");
                self.stats.failed += 1;
                self.failures.push(RingFailure {
                    ring,
                    error: e.to_string(),
                });
                return None;
            }
        };

        for d in &ring_mesh.diagnostics {
            tracing::warn!(ring, index = d.index, kind = %d.kind, "{}", d.message);
        }
        self.stats.duplicate_vertices += ring_mesh.diagnostics.len();

        match ring_mesh.path {
            MeshingPath::Degenerate => self.stats.degenerate += 1,
            MeshingPath::Rectangle => self.stats.rectangles += 1,
            MeshingPath::Triangulated => self.stats.triangulated += 1,
        }
        self.stats.vertices += ring_mesh.mesh.vertex_count();
        self.stats.triangles += ring_mesh.mesh.triangle_count();

        let offset = self.mesh.append(&ring_mesh.mesh);
        tracing::debug!(
            ring,
            path = ?ring_mesh.path,
            offset,
            vertices = ring_mesh.mesh.vertex_count(),
            triangles = ring_mesh.mesh.triangle_count(),
            "Meshed ring"
        );
        Some(offset)
    }

    pub fn finish(self) -> SessionOutput {
        tracing::info!(
            rings = self.stats.rings,
            rectangles = self.stats.rectangles,
            triangulated = self.stats.triangulated,
            degenerate = self.stats.degenerate,
            failed = self.stats.failed,
            vertices = self.stats.vertices,
            triangles = self.stats.triangles,
            "Session complete"
        );
        SessionOutput {
            mesh: self.mesh.into_mesh(),
            stats: self.stats,
            failures: self.failures,
        }
    }
}

/// Mesh rings in parallel, then append them in order.
pub fn process_rings<R>(rings: &[R], options: &MeshingOptions) -> SessionOutput
where
    R: AsRef<[Point3<f64>]> + Sync,
{
    let results: Vec<Result<RingMesh>> = rings
        .par_iter()
        .map(|ring| ring_to_mesh(ring.as_ref(), options))
        .collect();

    let mut session = Session::new(*options);
    for result in results {
        session.absorb(result);
    }
    session.finish()
}

/// Single-threaded equivalent of [`process_rings`].
pub fn process_rings_sequential<R>(rings: &[R], options: &MeshingOptions) -> SessionOutput
where
    R: AsRef<[Point3<f64>]>,
{
    let mut session = Session::new(*options);
    for ring in rings {
        session.push_ring(ring.as_ref());
    }
    session.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use citymesh_geometry::{Error, TriangleMesh};

    fn sample_rings() -> Vec<Vec<Point3<f64>>> {
        vec![
            // roof square
            vec![
                Point3::new(0.0, 0.0, 3.0),
                Point3::new(4.0, 0.0, 3.0),
                Point3::new(4.0, 4.0, 3.0),
                Point3::new(0.0, 4.0, 3.0),
                Point3::new(0.0, 0.0, 3.0),
            ],
            // degenerate
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            // wall with an extra vertex on the bottom edge
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 3.0),
                Point3::new(0.0, 0.0, 3.0),
            ],
            // triangle with a repeated vertex
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
        ]
    }

    #[test]
    fn test_stats_and_offsets() {
        let output = process_rings(&sample_rings(), &MeshingOptions::default());

        assert_eq!(
            output.stats,
            SessionStats {
                rings: 4,
                degenerate: 1,
                rectangles: 1,
                triangulated: 2,
                failed: 0,
                duplicate_vertices: 2,
                vertices: 4 + 4 + 3,
                triangles: 2 + 2 + 1,
            }
        );
        assert_eq!(output.mesh.vertex_count(), 11);
        assert!(output.mesh.validate().is_ok());
        // last ring starts after the roof and the wall rectangle
        assert_eq!(output.mesh.triangles.last(), Some(&[8, 9, 10]));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rings = sample_rings();
        let parallel = process_rings(&rings, &MeshingOptions::default());
        let sequential = process_rings_sequential(&rings, &MeshingOptions::default());

        assert_eq!(parallel.mesh, sequential.mesh);
        assert_eq!(parallel.stats, sequential.stats);
    }

    #[test]
    fn test_failure_does_not_stop_session() {
        let mut session = Session::new(MeshingOptions::default());

        assert_eq!(session.push_ring(&sample_rings()[0]), Some(0));
        let failed = session.absorb(Err(Error::TriangulationInvariantViolation {
            triangle: 0,
            indices: [0, 0, 1],
            vertex_count: 3,
        }));
        assert_eq!(failed, None);
        assert_eq!(session.push_ring(&sample_rings()[3]), Some(4));

        let output = session.finish();
        assert_eq!(output.stats.failed, 1);
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures[0].ring, 1);
        assert_eq!(output.mesh.vertex_count(), 7);
    }

    #[test]
    fn test_empty_session() {
        let rings: Vec<Vec<Point3<f64>>> = Vec::new();
        let output = process_rings(&rings, &MeshingOptions::default());

        assert_eq!(output.mesh, TriangleMesh::new());
        assert_eq!(output.stats, SessionStats::default());
    }

    #[test]
    fn test_stats_json() {
        let output = process_rings_sequential(&sample_rings()[..1], &MeshingOptions::default());
        let json = output.stats.to_json().unwrap();

        assert!(json.contains("\"rings\": 1"));
        assert!(json.contains("\"triangles\": 2"));
    }
}
