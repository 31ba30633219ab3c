// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end checks of the ring pipeline on rings embedded in tilted planes.

use approx::assert_relative_eq;
use citymesh_geometry::{
    dedup_ring, fit_plane, ring_to_mesh, GlobalMesh, MeshingOptions, MeshingPath, Point2, Point3,
    Vector3,
};
use nalgebra::{Rotation3, Unit};

/// Star polygon with alternating radii; simple, no collinear vertices
fn star(points: usize, outer: f64, inner: f64) -> Vec<Point2<f64>> {
    (0..points)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / points as f64;
            let r = if i % 2 == 0 { outer } else { inner };
            Point2::new(r * angle.cos(), r * angle.sin())
        })
        .collect()
}

/// Comb: a row of teeth of varying height, many reflex vertices
fn comb(teeth: usize) -> Vec<Point2<f64>> {
    let right = (2 * teeth - 1) as f64;
    let mut pts = vec![Point2::new(0.0, 0.0), Point2::new(right, 0.0)];
    for t in (0..teeth).rev() {
        let x = 2.0 * t as f64;
        let h = 3.0 + 0.1 * t as f64;
        pts.push(Point2::new(x + 1.0, h));
        pts.push(Point2::new(x, h));
        if t > 0 {
            pts.push(Point2::new(x, 1.0));
            pts.push(Point2::new(x - 1.0, 1.0));
        }
    }
    pts
}

fn polygon_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        .abs()
        * 0.5
}

/// Place a 2D polygon on a tilted plane away from the origin
fn embed(points: &[Point2<f64>]) -> Vec<Point3<f64>> {
    let axis = Unit::new_normalize(Vector3::new(1.0, 2.0, 0.5));
    let rotation = Rotation3::from_axis_angle(&axis, 0.7);
    let offset = Vector3::new(350.0, -120.0, 42.0);
    points
        .iter()
        .map(|p| rotation * Point3::new(p.x, p.y, 0.0) + offset)
        .collect()
}

fn general_options() -> MeshingOptions {
    MeshingOptions {
        rectangle: None,
        ..MeshingOptions::default()
    }
}

#[test]
fn test_simple_polygons_give_n_minus_two_triangles() {
    let shapes = vec![star(6, 5.0, 2.0), star(14, 10.0, 4.0), comb(4), comb(9)];

    for shape in shapes {
        let ring = embed(&shape);
        let out = ring_to_mesh(&ring, &general_options()).unwrap();

        assert_eq!(out.path, MeshingPath::Triangulated);
        assert_eq!(out.mesh.triangle_count(), shape.len() - 2);
        assert_relative_eq!(out.mesh.area(), polygon_area(&shape), epsilon = 1e-6);
        assert!(out.mesh.validate().is_ok());
    }
}

#[test]
fn test_output_vertices_are_input_points() {
    let ring = embed(&comb(5));
    let out = ring_to_mesh(&ring, &general_options()).unwrap();

    for v in &out.mesh.vertices {
        assert!(ring.contains(v), "vertex {:?} not in input", v);
    }
}

#[test]
fn test_non_planar_points_are_not_flattened() {
    let mut ring = embed(&star(8, 6.0, 3.0));
    let fit = fit_plane(&ring);
    // push alternate vertices off the plane by a few centimeters
    for (i, p) in ring.iter_mut().enumerate() {
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        *p += fit.basis.normal * (0.03 * sign);
    }

    let out = ring_to_mesh(&ring, &general_options()).unwrap();

    assert_eq!(out.mesh.vertices, ring);
}

#[test]
fn test_dedup_is_idempotent_on_noisy_ring() {
    let mut ring = embed(&star(10, 4.0, 1.5));
    ring.insert(3, ring[2]);
    ring.insert(7, ring[6]);
    ring.push(ring[0]);

    let once = dedup_ring(&ring);
    let twice = dedup_ring(&once.ring);

    assert_eq!(once.diagnostics.len(), 3);
    assert_eq!(once.ring.len(), 10);
    assert_eq!(once.ring, twice.ring);
    assert!(twice.diagnostics.is_empty());
}

#[test]
fn test_rectangle_recovered_for_wall_with_missing_vertex() {
    // Facade 12 m wide and 9 m tall, top-left corner missing and an extra
    // vertex on the eaves line
    let ring = vec![
        Point3::new(100.0, 50.0, 20.0),
        Point3::new(100.0, 62.0, 20.0),
        Point3::new(100.0, 62.0, 29.0),
        Point3::new(100.0, 54.0, 29.0),
        Point3::new(100.0, 50.0, 29.0),
    ];

    let out = ring_to_mesh(&ring, &MeshingOptions::default()).unwrap();

    assert_eq!(out.path, MeshingPath::Rectangle);
    assert_eq!(out.mesh.vertex_count(), 4);
    assert_eq!(out.mesh.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    assert_relative_eq!(out.mesh.area(), 12.0 * 9.0, epsilon = 1e-6);
}

#[test]
fn test_global_mesh_over_mixed_rings() {
    let rings = vec![
        embed(&star(6, 5.0, 2.0)),
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ],
        embed(&comb(3)),
    ];

    let mut global = GlobalMesh::new();
    let mut offsets = Vec::new();
    let mut expected_vertices = 0;
    for ring in &rings {
        let out = ring_to_mesh(ring, &general_options()).unwrap();
        expected_vertices += out.mesh.vertex_count();
        offsets.push(global.append(&out.mesh));
    }

    assert_eq!(offsets, vec![0, 6, 6, 9]);
    let mesh = global.into_mesh();
    assert_eq!(mesh.vertex_count(), expected_vertices);
    assert!(mesh.validate().is_ok());
    // the triangle ring contributes exactly one face starting at the offset
    assert!(mesh.triangles.contains(&[6, 7, 8]));
}
