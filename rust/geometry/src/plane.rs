// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Best-fit plane estimation
//!
//! Principal component analysis of the ring's vertices: the covariance
//! eigenvectors with the two largest eigenvalues span the plane, the one
//! with the smallest eigenvalue is its normal.

use nalgebra::{Matrix3, SymmetricEigen};

use crate::{Point2, Point3, Vector3};

/// Local 2D frame embedded in 3D
///
/// `tangent1 × tangent2 == normal`, all three unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBasis {
    pub origin: Point3<f64>,
    pub tangent1: Vector3<f64>,
    pub tangent2: Vector3<f64>,
    pub normal: Vector3<f64>,
}

impl PlaneBasis {
    /// Project a 3D point into plane coordinates
    #[inline]
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        let v = point - self.origin;
        Point2::new(v.dot(&self.tangent1), v.dot(&self.tangent2))
    }

    /// Project every point of a ring
    pub fn project_all(&self, points: &[Point3<f64>]) -> Vec<Point2<f64>> {
        points.iter().map(|p| self.project(p)).collect()
    }

    /// Map plane coordinates back to 3D
    #[inline]
    pub fn embed(&self, point: &Point2<f64>) -> Point3<f64> {
        self.origin + self.tangent1 * point.x + self.tangent2 * point.y
    }

    /// Signed distance of a point from the plane along the normal
    #[inline]
    pub fn offset(&self, point: &Point3<f64>) -> f64 {
        (point - self.origin).dot(&self.normal)
    }
}

/// Plane basis plus the covariance spectrum it was derived from
#[derive(Debug, Clone, Copy)]
pub struct PlaneFit {
    pub basis: PlaneBasis,
    /// Covariance eigenvalues, sorted descending
    pub eigenvalues: [f64; 3],
}

impl PlaneFit {
    /// True when the points do not span a plane (collinear or coincident):
    /// the second principal variance is at most `ratio` times the first.
    pub fn is_degenerate(&self, ratio: f64) -> bool {
        self.eigenvalues[1] <= ratio * self.eigenvalues[0]
    }
}

/// Fit a plane to a ring by PCA of the vertex covariance.
///
/// Never fails: collinear or coincident input still produces an orthonormal,
/// right-handed basis, just not a meaningful one.
pub fn fit_plane(points: &[Point3<f64>]) -> PlaneFit {
    if points.is_empty() {
        return PlaneFit {
            basis: PlaneBasis {
                origin: Point3::origin(),
                tangent1: Vector3::x(),
                tangent2: Vector3::y(),
                normal: Vector3::z(),
            },
            eigenvalues: [0.0; 3],
        };
    }

    let count = points.len() as f64;
    let centroid = points
        .iter()
        .fold(Vector3::<f64>::zeros(), |acc, p| acc + p.coords)
        / count;

    let mut covariance = Matrix3::zeros();
    for p in points {
        let d = p.coords - centroid;
        covariance += d * d.transpose();
    }
    covariance /= count;

    let eigen = SymmetricEigen::new(covariance);
    let eigenvalues = eigen.eigenvalues;
    let eigenvectors = eigen.eigenvectors;

    // Sort by eigenvalue (descending)
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| {
        eigenvalues[b]
            .partial_cmp(&eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let tangent1 = unit_or(eigenvectors.column(order[0]).into_owned(), Vector3::x());
    let normal = orthonormal_to(
        &tangent1,
        eigenvectors.column(order[2]).into_owned(),
    );
    let tangent2 = normal.cross(&tangent1).normalize();

    PlaneFit {
        basis: PlaneBasis {
            origin: Point3::from(centroid),
            tangent1,
            tangent2,
            normal,
        },
        eigenvalues: [
            eigenvalues[order[0]],
            eigenvalues[order[1]],
            eigenvalues[order[2]],
        ],
    }
}

fn unit_or(v: Vector3<f64>, fallback: Vector3<f64>) -> Vector3<f64> {
    let len = v.norm();
    if len.is_finite() && len > 1e-12 {
        v / len
    } else {
        fallback
    }
}

/// Make `candidate` a unit vector perpendicular to `axis`, picking an
/// arbitrary perpendicular if it is unusable
fn orthonormal_to(axis: &Vector3<f64>, candidate: Vector3<f64>) -> Vector3<f64> {
    let projected = candidate - axis * candidate.dot(axis);
    let len = projected.norm();
    if len.is_finite() && len > 1e-12 {
        return projected / len;
    }

    // Find the axis least parallel to `axis` for a stable cross product
    let reference = if axis.x.abs() <= axis.y.abs() && axis.x.abs() <= axis.z.abs() {
        Vector3::x()
    } else if axis.y.abs() <= axis.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    axis.cross(&reference).normalize()
}
