//! Error types for building model loading and bounds derivation.

use std::path::PathBuf;

/// Result type for building model operations.
pub type BuildingResult<T> = Result<T, BuildingError>;

/// Errors that can occur while loading a building model or deriving its bounds.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildingError {
    /// The model file does not exist.
    #[error("building model not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The model file exists but could not be read.
    #[error("failed to read building model {path}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or not a list of objects.
    #[error("malformed building model: {0}")]
    Json(#[from] serde_json::Error),

    /// An object record is structurally invalid.
    #[error("object {index}: {reason}")]
    InvalidRecord {
        /// Position of the record in the document.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A mesh has no vertices or no faces.
    #[error("{what} mesh has no vertices or faces")]
    EmptyMesh {
        /// Which mesh (e.g. `ceiling`, `obstacle 2`).
        what: String,
    },

    /// A face references a vertex that does not exist.
    #[error("{what} face {face} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        /// Which mesh.
        what: String,
        /// Offending face.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The document contains no floor objects to derive a ceiling from.
    #[error("no floor meshes provided")]
    NoFloorMeshes,

    /// No floor face lies entirely at the floor's maximum Z.
    #[error("no ceiling faces detected at max Z {z_max}")]
    NoCeilingFaces {
        /// The floor's maximum Z.
        z_max: f64,
    },

    /// The vertical extent is empty once the clearance offset is applied.
    #[error("invalid Z bounds: min_z {min_z} >= max_z {max_z}")]
    InvalidZBounds {
        /// Lower bound after subtracting the offset.
        min_z: f64,
        /// Ceiling maximum Z.
        max_z: f64,
    },
}

impl BuildingError {
    /// Creates an `InvalidRecord` error with the given reason.
    #[must_use]
    pub fn invalid_record(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            index,
            reason: reason.into(),
        }
    }

    /// Creates an `EmptyMesh` error for the named mesh.
    #[must_use]
    pub fn empty_mesh(what: impl Into<String>) -> Self {
        Self::EmptyMesh { what: what.into() }
    }

    /// Returns `true` for errors caused by the model's geometry rather than its encoding.
    #[must_use]
    pub const fn is_geometry_error(&self) -> bool {
        matches!(self, Self::InvalidZBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            BuildingError::empty_mesh("obstacle 2").to_string(),
            "obstacle 2 mesh has no vertices or faces"
        );
        assert_eq!(
            BuildingError::invalid_record(3, "missing 'Coords'").to_string(),
            "object 3: missing 'Coords'"
        );
        let err = BuildingError::InvalidZBounds {
            min_z: 10.0,
            max_z: 10.0,
        };
        assert!(err.to_string().contains("min_z 10 >= max_z 10"));
        assert!(err.is_geometry_error());
        assert!(!BuildingError::NoFloorMeshes.is_geometry_error());
    }
}
