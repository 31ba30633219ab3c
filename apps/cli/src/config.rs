// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Meshing configuration loaded from environment variables.

use citymesh_geometry::{rectangle, MeshingOptions, RectangleFixConfig, SnapPolicy};

/// Tunables that are not worth a command-line flag.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of worker threads for parallel meshing.
    pub worker_threads: usize,
    /// Whether to attempt rectangle recovery on wall rings.
    pub rectangle_fix: bool,
    /// Maximum edge tilt from vertical/horizontal, in degrees.
    pub max_tilt_degrees: f64,
    /// Maximum vertex distance from the fitted plane, in meters.
    pub max_plane_deviation: f64,
    /// Maximum vertex distance from the recovered rectangle edges, in meters.
    pub max_edge_distance: f64,
    /// Snap distance for re-embedding; exact matching when unset.
    pub snap_epsilon: Option<f64>,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            worker_threads: env_or("WORKER_THREADS", num_cpus::get()),
            rectangle_fix: std::env::var("RECT_FIX")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
            max_tilt_degrees: env_or("RECT_MAX_TILT_DEGREES", rectangle::DEFAULT_MAX_TILT_DEGREES),
            max_plane_deviation: env_or(
                "RECT_MAX_PLANE_DEVIATION",
                rectangle::DEFAULT_MAX_PLANE_DEVIATION,
            ),
            max_edge_distance: env_or("RECT_MAX_EDGE_DISTANCE", rectangle::DEFAULT_MAX_EDGE_DISTANCE),
            snap_epsilon: std::env::var("SNAP_EPSILON")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|eps: &f64| *eps > 0.0),
        }
    }

    /// Meshing options for the geometry pipeline.
    pub fn meshing_options(&self) -> MeshingOptions {
        let rectangle = self.rectangle_fix.then(|| RectangleFixConfig {
            max_tilt_degrees: self.max_tilt_degrees,
            max_plane_deviation: self.max_plane_deviation,
            max_edge_distance: self.max_edge_distance,
        });
        let snap = match self.snap_epsilon {
            Some(eps) => SnapPolicy::Tolerance(eps),
            None => SnapPolicy::Exact,
        };
        MeshingOptions { rectangle, snap }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
