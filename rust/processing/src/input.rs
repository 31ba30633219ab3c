// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ring input.
//!
//! Two sources are supported, both in WGS84 `lng,lat,alt` order:
//!
//! - a CityGML document, one ring per polygon outer boundary
//!   ([`read_gml`])
//! - plain text, one GML2 coordinate string per line ([`read_rings`]);
//!   blank lines and lines starting with `#` are ignored

use citymesh_core::{extract_rings, parse_coordinates, Error as CoreError, LocalFrame};
use citymesh_geometry::Point3;

/// A ring read from input, already in the local frame
#[derive(Debug, Clone)]
pub struct RingInput {
    /// 1-based line number for text input, 0-based polygon index for GML
    pub source: usize,
    pub points: Vec<Point3<f64>>,
}

/// Rings read from input plus counts of what was skipped
#[derive(Debug, Clone, Default)]
pub struct RingBatch {
    pub rings: Vec<RingInput>,
    /// Rings whose tuples lacked an elevation
    pub skipped_2d: usize,
    /// Rings that failed to parse
    pub skipped_invalid: usize,
    /// GML polygons with interior boundaries
    pub skipped_with_holes: usize,
}

impl RingBatch {
    fn push(
        &mut self,
        source: usize,
        parsed: citymesh_core::Result<Vec<[f64; 3]>>,
        frame: &LocalFrame,
    ) {
        match parsed {
            Ok(tuples) => {
                let points = frame
                    .tuples_to_local(&tuples)
                    .into_iter()
                    .map(|[x, y, z]| Point3::new(x, y, z))
                    .collect();
                self.rings.push(RingInput { source, points });
            }
            Err(CoreError::MissingElevation { .. }) => {
                tracing::debug!(source, "Skipping 2D coordinate ring");
                self.skipped_2d += 1;
            }
            Err(e) => {
                tracing::warn!(source, error = %e, "Skipping unreadable ring");
                self.skipped_invalid += 1;
            }
        }
    }
}

/// Parse every ring line of `text` and convert it into `frame`.
pub fn read_rings(text: &str, frame: &LocalFrame) -> RingBatch {
    let mut batch = RingBatch::default();

    for (i, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        batch.push(i + 1, parse_coordinates(trimmed), frame);
    }

    batch
}

/// Extract every polygon outer ring of a GML document and convert it into
/// `frame`.
///
/// Fails only on malformed XML.
pub fn read_gml(xml: &str, frame: &LocalFrame) -> citymesh_core::Result<RingBatch> {
    let found = extract_rings(xml)?;

    let mut batch = RingBatch {
        skipped_with_holes: found.skipped_with_holes,
        ..RingBatch::default()
    };
    if found.skipped_with_holes > 0 {
        tracing::debug!(
            polygons = found.skipped_with_holes,
            "Skipping polygons with holes"
        );
    }

    for ring in found.rings {
        batch.push(ring.polygon, ring.coordinates, frame);
    }

    Ok(batch)
}
