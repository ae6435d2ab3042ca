//! Spatial data structures for the duct router.
//!
//! This crate provides the lattice types shared by the routing crates:
//!
//! - [`VoxelCoord`] - Integer voxel coordinates with 6-connected neighborhoods
//! - [`GridBounds`] - Inclusive axis-aligned boxes in grid space
//! - [`DenseGrid`] - Dense 3D lattice with row-major storage
//! - [`Mask2`] - 2D boolean mask with square-window erosion
//!
//! # Layer 0 Crate
//!
//! This crate has no knowledge of buildings, cables or world units. It can be
//! reused by any tool that needs a bounded voxel lattice.
//!
//! # Coordinate Systems
//!
//! The grid uses a **right-handed coordinate system** consistent with mesh-types:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
//!
//! Grid coordinates are discrete `i32` values. Mapping to world coordinates is
//! the responsibility of the owner of the lattice.
//!
//! # Example
//!
//! ```
//! use cf_spatial::{DenseGrid, GridBounds, VoxelCoord};
//!
//! let mut grid = DenseGrid::filled([10, 10, 10], false).unwrap();
//!
//! // Mark a block as occupied
//! let block = GridBounds::new(VoxelCoord::new(2, 2, 0), VoxelCoord::new(4, 4, 9));
//! grid.fill_bounds(&block, true);
//!
//! assert_eq!(grid.get(VoxelCoord::new(3, 3, 5)), Some(&true));
//! assert_eq!(grid.count_where(|v| *v), 90);
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod grid;
mod mask;
mod voxel;

// Re-export core types
pub use error::SpatialError;
pub use grid::{DenseGrid, GridBounds, GridBoundsIter};
pub use mask::Mask2;
pub use voxel::VoxelCoord;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
