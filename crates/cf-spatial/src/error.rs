//! Error types for spatial operations.

use crate::VoxelCoord;

/// Errors that can occur during spatial operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// A coordinate is out of the valid range for grid operations.
    #[error("coordinate {coord:?} is out of bounds")]
    OutOfBounds {
        /// The coordinate that was out of bounds.
        coord: VoxelCoord,
    },

    /// The grid dimensions are invalid.
    #[error("invalid grid dimensions: {width}x{height}x{depth}")]
    InvalidDimensions {
        /// Width dimension.
        width: usize,
        /// Height dimension.
        height: usize,
        /// Depth dimension.
        depth: usize,
    },

    /// A flat buffer does not match the shape it is meant to fill.
    #[error("buffer of {actual} cells does not match shape of {expected} cells")]
    ShapeMismatch {
        /// Number of cells required by the shape.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },

    /// A 2D mask does not cover the columns of the lattice it is applied to.
    #[error("mask of {actual:?} columns does not match lattice of {expected:?} columns")]
    MaskShapeMismatch {
        /// Columns (`nx`, `ny`) of the lattice.
        expected: (usize, usize),
        /// Columns of the supplied mask.
        actual: (usize, usize),
    },

    /// Integer overflow occurred during coordinate calculation.
    #[error("integer overflow during coordinate calculation")]
    IntegerOverflow,
}

impl SpatialError {
    /// Returns `true` if this error reports an out-of-range coordinate.
    #[must_use]
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
