// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ output.

use std::io::{self, Write};

use citymesh_geometry::TriangleMesh;

/// Write a mesh as OBJ: all `v` lines, then all `f` lines with 1-based indices.
pub fn write_obj<W: Write>(mesh: &TriangleMesh, mut writer: W) -> io::Result<()> {
    writeln!(writer, "# Generated by citymesh")?;
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;

    for v in &mesh.vertices {
        writeln!(writer, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
    }

    for &[a, b, c] in &mesh.triangles {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }

    writer.flush()
}
