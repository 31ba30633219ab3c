// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertex deduplication for closed rings
//!
//! Source rings often repeat a vertex or close the loop explicitly by
//! repeating the first point. Both are removed here using exact coordinate
//! equality; rings are stored open afterwards.

use crate::diagnostic::Diagnostic;
use crate::Point3;

/// A cleaned ring plus one diagnostic per removed vertex
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    pub ring: Vec<Point3<f64>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Remove consecutive duplicate points and a trailing copy of the first point.
///
/// The input is left untouched. Rings with fewer than 2 points are returned
/// unchanged.
pub fn dedup_ring(ring: &[Point3<f64>]) -> DedupOutcome {
    if ring.len() < 2 {
        return DedupOutcome {
            ring: ring.to_vec(),
            diagnostics: Vec::new(),
        };
    }

    let mut kept: Vec<Point3<f64>> = Vec::with_capacity(ring.len());
    // Original index of each kept point, needed to report the closing duplicate
    let mut kept_index: Vec<usize> = Vec::with_capacity(ring.len());
    let mut diagnostics = Vec::new();

    for (i, point) in ring.iter().enumerate() {
        if kept.last() == Some(point) {
            diagnostics.push(Diagnostic::duplicate_vertex(
                i,
                format!("vertex {} repeats vertex {}", i, i - 1),
            ));
            continue;
        }
        kept.push(*point);
        kept_index.push(i);
    }

    if kept.len() >= 2 && kept.first() == kept.last() {
        kept.pop();
        if let Some(index) = kept_index.pop() {
            diagnostics.push(Diagnostic::duplicate_vertex(
                index,
                format!("vertex {} closes the ring onto vertex 0", index),
            ));
        }
    }

    DedupOutcome {
        ring: kept,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    #[test]
    fn test_removes_consecutive_duplicate() {
        let ring = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];

        let outcome = dedup_ring(&ring);

        assert_eq!(outcome.ring.len(), 3);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::DuplicateVertexRemoved);
        assert_eq!(outcome.diagnostics[0].index, 1);
        // input untouched
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_removes_closing_point() {
        let ring = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ];

        let outcome = dedup_ring(&ring);

        assert_eq!(outcome.ring, ring[..3].to_vec());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].index, 3);
    }

    #[test]
    fn test_closing_run_reports_every_index() {
        let ring = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ];

        let outcome = dedup_ring(&ring);

        assert_eq!(outcome.ring.len(), 3);
        let indices: Vec<usize> = outcome.diagnostics.iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![4, 3]);
    }

    #[test]
    fn test_near_duplicates_are_kept() {
        let ring = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1e-12, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];

        let outcome = dedup_ring(&ring);
        assert_eq!(outcome.ring.len(), 3);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_short_rings_pass_through() {
        let single = vec![Point3::new(1.0, 2.0, 3.0)];
        let outcome = dedup_ring(&single);
        assert_eq!(outcome.ring, single);
        assert!(outcome.diagnostics.is_empty());

        assert!(dedup_ring(&[]).ring.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let ring = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 0.0),
        ];

        let once = dedup_ring(&ring);
        let twice = dedup_ring(&once.ring);

        assert_eq!(once.ring, twice.ring);
        assert!(twice.diagnostics.is_empty());
    }

    #[test]
    fn test_all_identical_collapses_to_one() {
        let ring = vec![Point3::new(5.0, 5.0, 5.0); 4];
        let outcome = dedup_ring(&ring);
        assert_eq!(outcome.ring.len(), 1);
        assert_eq!(outcome.diagnostics.len(), 3);
    }
}
