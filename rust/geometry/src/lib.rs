// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CityMesh Geometry Processing
//!
//! Turns closed 3D polygon rings from building surfaces into triangle meshes:
//! vertex cleanup, PCA plane fitting, rectangle recovery for degraded walls,
//! and earcutr triangulation in the fitted plane.

pub mod dedup;
pub mod diagnostic;
pub mod error;
pub mod mesh;
pub mod plane;
pub mod rectangle;
pub mod ring;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use dedup::{dedup_ring, DedupOutcome};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{Error, Result};
pub use mesh::{GlobalMesh, TriangleMesh};
pub use plane::{fit_plane, PlaneBasis, PlaneFit};
pub use rectangle::{recover_rectangle, RectangleFixConfig};
pub use ring::{ring_to_mesh, MeshingOptions, MeshingPath, RingMesh};
pub use triangulation::{triangulate_polygon, triangulate_ring, SnapPolicy};
