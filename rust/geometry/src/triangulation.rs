// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Rings are projected into their fitted plane, ear-clipped with earcutr and
//! mapped back to 3D. Vertices that the triangulator echoes from the input
//! are replaced by the original 3D points so real non-planarity survives.
//!
//! Self-intersecting rings are not supported: earcutr may return fewer
//! triangles than expected or overlapping ones.

use rustc_hash::FxHashMap;

use crate::mesh::TriangleMesh;
use crate::plane::PlaneBasis;
use crate::{Error, Point2, Point3, Result};

/// How re-embedded vertices are matched against the projected input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SnapPolicy {
    /// Bit-for-bit equality of the 2D coordinates
    #[default]
    Exact,
    /// Exact match first, then the nearest projected input vertex within
    /// the given distance
    Tolerance(f64),
}

/// Triangulation result in plane coordinates
#[derive(Debug, Clone, Default)]
pub struct Triangulation2D {
    pub vertices: Vec<Point2<f64>>,
    pub triangles: Vec<[usize; 3]>,
}

/// Triangulate a simple polygon (no holes)
/// Returns triangle indices into the input points
#[inline]
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();

    if n < 3 {
        return Err(Error::TriangulationError(
            "Need at least 3 points to triangulate".to_string(),
        ));
    }

    // FAST PATH: Triangle - no triangulation needed
    if n == 3 {
        return Ok(vec![0, 1, 2]);
    }

    // Flatten points for earcutr
    let mut vertices = Vec::with_capacity(n * 2);
    for p in points {
        vertices.push(p.x);
        vertices.push(p.y);
    }

    let indices = earcutr::earcut(&vertices, &[], 2)
        .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

    Ok(indices)
}

/// Triangulate a 2D ring, returning its vertices and index triples
pub fn triangulate_2d(points: &[Point2<f64>]) -> Result<Triangulation2D> {
    let indices = triangulate_polygon(points)?;

    if indices.len() % 3 != 0 {
        return Err(Error::TriangulationError(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        )));
    }

    Ok(Triangulation2D {
        vertices: points.to_vec(),
        triangles: indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect(),
    })
}

/// Exact lookup key for a 2D coordinate
#[inline]
fn coord_key(p: &Point2<f64>) -> (u64, u64) {
    (p.x.to_bits(), p.y.to_bits())
}

/// Map a 2D triangulation back to 3D.
///
/// `projected[i]` must be the projection of `originals[i]` through `basis`.
pub fn reembed(
    triangulation: &Triangulation2D,
    projected: &[Point2<f64>],
    originals: &[Point3<f64>],
    basis: &PlaneBasis,
    snap: SnapPolicy,
) -> TriangleMesh {
    let mut lookup: FxHashMap<(u64, u64), usize> = FxHashMap::default();
    lookup.reserve(projected.len());
    for (i, p) in projected.iter().enumerate() {
        lookup.entry(coord_key(p)).or_insert(i);
    }

    let mut mesh = TriangleMesh::with_capacity(
        triangulation.vertices.len(),
        triangulation.triangles.len(),
    );

    for v in &triangulation.vertices {
        let source = lookup.get(&coord_key(v)).copied().or_else(|| match snap {
            SnapPolicy::Exact => None,
            SnapPolicy::Tolerance(eps) => nearest_within(projected, v, eps),
        });

        let position = match source {
            Some(i) => originals[i],
            None => basis.embed(v),
        };
        mesh.add_vertex(position);
    }

    for &[a, b, c] in &triangulation.triangles {
        mesh.add_triangle(a as u32, b as u32, c as u32);
    }

    mesh
}

fn nearest_within(projected: &[Point2<f64>], target: &Point2<f64>, eps: f64) -> Option<usize> {
    let max_sq = eps * eps;
    projected
        .iter()
        .enumerate()
        .map(|(i, p)| (i, (p - target).norm_squared()))
        .filter(|&(_, d)| d <= max_sq)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}

/// Triangulate a ring of at least 3 points in the given plane.
///
/// Fails only when earcutr errors or emits a triangle without three
/// distinct, valid indices.
pub fn triangulate_ring(
    ring: &[Point3<f64>],
    basis: &PlaneBasis,
    snap: SnapPolicy,
) -> Result<TriangleMesh> {
    let projected = basis.project_all(ring);
    let triangulation = triangulate_2d(&projected)?;
    let mesh = reembed(&triangulation, &projected, ring, basis, snap);
    mesh.validate()?;
    Ok(mesh)
}

/// Twice the signed area of a 2D polygon (shoelace formula)
#[inline]
pub fn signed_double_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        sum += p0.x * p1.y - p1.x * p0.y;
    }
    sum
}
