/// Error types for mesh construction and mesh-file loading
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::stl::ParserState;

/// Errors raised while building a [`Mesh`](crate::Mesh).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A trigon references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Errors raised while reading or parsing an ASCII solid file.
#[derive(Error, Debug)]
pub enum StlError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input ended before the solid was closed.
    #[error("unexpected end of input at line {line} while {state}")]
    UnexpectedEof { state: ParserState, line: usize },

    /// A facet was closed before three vertices had been read.
    #[error("facet closed at line {line} with only {vertices} vertices available")]
    IncompleteFacet { line: usize, vertices: usize },

    #[error(transparent)]
    Mesh(#[from] MeshError),
}
