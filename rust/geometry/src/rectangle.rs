// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rectangle recovery for degraded wall rings
//!
//! Many walls in surveyed city models should be plain rectangles but arrive
//! with dropped or perturbed vertices. When a ring has a clearly vertical
//! edge and a clearly horizontal edge, and every vertex sits close to the
//! bounding box spanned by those two directions, the ring is replaced by
//! that bounding rectangle.
//!
//! World up is `+Z`.

use crate::mesh::TriangleMesh;
use crate::plane::PlaneBasis;
use crate::{Point3, Vector3};

/// Maximum deviation of an edge from pure vertical/horizontal, in degrees
pub const DEFAULT_MAX_TILT_DEGREES: f64 = 3.0;
/// Maximum distance of any vertex from the fitted plane, in meters
pub const DEFAULT_MAX_PLANE_DEVIATION: f64 = 1.0;
/// Maximum distance of any vertex from the nearest bounding-box edge, in meters
pub const DEFAULT_MAX_EDGE_DISTANCE: f64 = 1.0;

/// Thresholds for rectangle recovery
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleFixConfig {
    pub max_tilt_degrees: f64,
    pub max_plane_deviation: f64,
    pub max_edge_distance: f64,
}

impl Default for RectangleFixConfig {
    fn default() -> Self {
        Self {
            max_tilt_degrees: DEFAULT_MAX_TILT_DEGREES,
            max_plane_deviation: DEFAULT_MAX_PLANE_DEVIATION,
            max_edge_distance: DEFAULT_MAX_EDGE_DISTANCE,
        }
    }
}

/// Pick the best-scoring candidate; the first one wins ties
fn best_edge(candidates: impl Iterator<Item = (usize, f64)>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, score) in candidates {
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

#[inline]
fn horizontal_magnitude(v: &Vector3<f64>) -> f64 {
    v.x.hypot(v.y)
}

/// Try to reinterpret a ring as an exact rectangle.
///
/// Returns 4 corners and the triangles `[0, 1, 2]`, `[0, 2, 3]`, or `None`
/// when any check fails; the caller then triangulates the ring as is.
pub fn recover_rectangle(
    ring: &[Point3<f64>],
    basis: &PlaneBasis,
    config: &RectangleFixConfig,
) -> Option<TriangleMesh> {
    let n = ring.len();
    if n < 3 {
        return None;
    }

    let max_tilt = config.max_tilt_degrees.to_radians().sin();
    let normal = basis.normal;

    // Edge from the previous vertex, raw and with the normal component removed
    let raw_edges: Vec<Vector3<f64>> = (0..n).map(|i| ring[i] - ring[(i + n - 1) % n]).collect();
    let edges: Vec<Vector3<f64>> = raw_edges
        .iter()
        .map(|e| e - normal * e.dot(&normal))
        .collect();

    let vertical_index = best_edge(edges.iter().enumerate().filter_map(|(i, e)| {
        let length = e.norm();
        if length <= f64::EPSILON {
            return None;
        }
        let horizontal = horizontal_magnitude(e);
        (horizontal / length < max_tilt).then(|| (i, length / horizontal))
    }))?;

    let mut vertical = edges[vertical_index].normalize();
    if vertical.z < 0.0 {
        vertical = -vertical;
    }

    let horizontal_index = best_edge(edges.iter().enumerate().filter_map(|(i, e)| {
        if i == vertical_index {
            return None;
        }
        let length = e.norm();
        if length <= f64::EPSILON {
            return None;
        }
        let along_vertical = e.dot(&vertical).abs();
        (along_vertical / length < max_tilt).then(|| (i, length / e.z.abs()))
    }))?;

    // The chosen edges must also hold up before projection into the plane
    let raw_vertical = raw_edges[vertical_index];
    if horizontal_magnitude(&raw_vertical) / raw_vertical.norm() > max_tilt {
        return None;
    }
    let raw_horizontal = raw_edges[horizontal_index];
    if raw_horizontal.dot(&normal).abs() / raw_horizontal.norm() > max_tilt {
        return None;
    }

    let h = edges[horizontal_index];
    let horizontal = (h - vertical * h.dot(&vertical)).try_normalize(1e-12)?;

    let anchor = ring[0];
    let anchor_offset = basis.offset(&anchor);
    let mut coords = Vec::with_capacity(n);
    for p in ring {
        if (basis.offset(p) - anchor_offset).abs() > config.max_plane_deviation {
            return None;
        }
        let d = p - anchor;
        coords.push((d.dot(&horizontal), d.dot(&vertical)));
    }

    let (mut u_min, mut u_max) = (f64::MAX, f64::MIN);
    let (mut w_min, mut w_max) = (f64::MAX, f64::MIN);
    for &(u, w) in &coords {
        u_min = u_min.min(u);
        u_max = u_max.max(u);
        w_min = w_min.min(w);
        w_max = w_max.max(w);
    }

    let far_from_box = coords.iter().any(|&(u, w)| {
        let nearest = (u - u_min)
            .abs()
            .min((u - u_max).abs())
            .min((w - w_min).abs())
            .min((w - w_max).abs());
        nearest > config.max_edge_distance
    });
    if far_from_box {
        return None;
    }

    if u_max - u_min <= f64::EPSILON || w_max - w_min <= f64::EPSILON {
        return None;
    }

    let corner = |u: f64, w: f64| anchor + horizontal * u + vertical * w;

    let mut mesh = TriangleMesh::with_capacity(4, 2);
    mesh.add_vertex(corner(u_min, w_min));
    mesh.add_vertex(corner(u_max, w_min));
    mesh.add_vertex(corner(u_max, w_max));
    mesh.add_vertex(corner(u_min, w_max));
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);

    Some(mesh)
}
