// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use crate::{Error, Point3, Result};

/// Triangle mesh produced for a single ring
///
/// Indices refer to positions in `vertices`; the pairing has no meaning on
/// its own once the mesh is appended to a [`GlobalMesh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions in the local Cartesian frame
    pub vertices: Vec<Point3<f64>>,
    /// Triangle indices (i0, i1, i2)
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex and return its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.triangles.push([i0, i1, i2]);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Sum of the 3D areas of all triangles
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                let p0 = self.vertices[a as usize];
                let e1 = self.vertices[b as usize] - p0;
                let e2 = self.vertices[c as usize] - p0;
                e1.cross(&e2).norm() * 0.5
            })
            .sum()
    }

    /// Check that every triangle has three distinct, in-range indices
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        for (triangle, &[a, b, c]) in self.triangles.iter().enumerate() {
            let indices = [a as usize, b as usize, c as usize];
            let in_range = indices.iter().all(|&i| i < vertex_count);
            if !in_range || a == b || b == c || a == c {
                return Err(Error::TriangulationInvariantViolation {
                    triangle,
                    indices,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

/// Concatenation of per-ring meshes with globally consistent indices
///
/// The running vertex offset lives here rather than in the caller, so ring
/// meshes can be computed in any order and appended afterwards.
#[derive(Debug, Clone, Default)]
pub struct GlobalMesh {
    mesh: TriangleMesh,
}

impl GlobalMesh {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ring mesh, rebasing its indices by the current vertex count.
    ///
    /// Returns the offset that was applied.
    pub fn append(&mut self, ring: &TriangleMesh) -> u32 {
        let vertex_offset = self.mesh.vertices.len() as u32;
        if ring.is_empty() {
            return vertex_offset;
        }

        self.mesh.vertices.reserve(ring.vertices.len());
        self.mesh.triangles.reserve(ring.triangles.len());

        self.mesh.vertices.extend_from_slice(&ring.vertices);
        self.mesh.triangles.extend(
            ring.triangles
                .iter()
                .map(|&[a, b, c]| [a + vertex_offset, b + vertex_offset, c + vertex_offset]),
        );

        vertex_offset
    }

    /// Consume the accumulator and return the combined mesh
    pub fn into_mesh(self) -> TriangleMesh {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle(z: f64) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, z));
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, z));
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, z));
        mesh.add_triangle(a, b, c);
        mesh
    }

    #[test]
    fn test_area_of_unit_triangle() {
        let mesh = unit_triangle(0.0);
        assert!((mesh.area() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_repeated_index() {
        let mut mesh = unit_triangle(0.0);
        mesh.add_triangle(0, 1, 1);

        match mesh.validate() {
            Err(Error::TriangulationInvariantViolation { triangle, .. }) => assert_eq!(triangle, 1),
            other => panic!("expected invariant violation, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = unit_triangle(0.0);
        mesh.triangles[0] = [0, 1, 3];
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_global_mesh_rebases_indices() {
        let mut global = GlobalMesh::new();

        assert_eq!(global.append(&unit_triangle(0.0)), 0);
        assert_eq!(global.append(&TriangleMesh::new()), 3);
        assert_eq!(global.append(&unit_triangle(1.0)), 3);
        assert_eq!(global.append(&TriangleMesh::new()), 6);

        let mesh = global.into_mesh();
        assert_eq!(mesh.triangles, vec![[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mesh.vertices[3], Point3::new(0.0, 0.0, 1.0));
        assert!(mesh.validate().is_ok());
    }
}
