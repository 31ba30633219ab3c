// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Non-fatal diagnostics emitted while cleaning up rings.

use std::fmt;

/// Kind of a non-fatal diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A vertex equal to its predecessor (or a closing copy of the first
    /// vertex) was dropped
    DuplicateVertexRemoved,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::DuplicateVertexRemoved => "DuplicateVertexRemoved",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A warning about the input, attached to the vertex index it concerns
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Index of the vertex in the ring as it was passed in
    pub index: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn duplicate_vertex(index: usize, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::DuplicateVertexRemoved,
            index,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at vertex {}: {}", self.kind, self.index, self.message)
    }
}
