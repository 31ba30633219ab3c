// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CityMesh Core
//!
//! Input side of the CityMesh pipeline: pulling polygon rings out of CityGML
//! with [quick-xml](https://docs.rs/quick-xml), reading their coordinate
//! strings with [nom](https://docs.rs/nom) and placing geodetic coordinates
//! in a local metric frame.
//!
//! ## Quick Start
//!
//! ```rust
//! use citymesh_core::{parse_coordinates, LocalFrame};
//!
//! let tuples = parse_coordinates("24.9384,60.1699,12.0 24.9390,60.1699,12.0 24.9390,60.1702,12.0").unwrap();
//! let frame = LocalFrame::new(60.1699, 24.9384, 0.0);
//! let local = frame.tuples_to_local(&tuples);
//! assert_eq!(local.len(), 3);
//! ```
//!
//! Reprojection from arbitrary CRSs is not handled here; input must already
//! be WGS84 longitude/latitude/altitude.

pub mod coordinates;
pub mod error;
pub mod georef;
pub mod gml;

pub use coordinates::{parse_coordinates, parse_pos_list};
pub use error::{Error, Result};
pub use georef::LocalFrame;
pub use gml::{extract_rings, GmlRings, PolygonRing};
