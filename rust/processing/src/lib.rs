// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared processing pipeline for CityMesh: reads CityGML or ring text, meshes rings
//! into one globally indexed mesh and writes OBJ.

pub mod input;
pub mod obj;
pub mod session;

pub use input::{read_gml, read_rings, RingBatch, RingInput};
pub use obj::write_obj;
pub use session::{
    process_rings, process_rings_sequential, RingFailure, Session, SessionOutput, SessionStats,
};
