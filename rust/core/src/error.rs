// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for coordinate parsing and conversion
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading GML documents and coordinate strings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Coordinate tuple {tuple} has {found} components, expected 3")]
    InvalidCoordinate { tuple: usize, found: usize },

    #[error("Coordinate tuple {tuple} has no elevation")]
    MissingElevation { tuple: usize },

    #[error("XML error at byte {position}: {message}")]
    Xml { position: usize, message: String },

    #[error("Empty coordinate list")]
    EmptyInput,
}

impl Error {
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            position,
            message: message.into(),
        }
    }
}
