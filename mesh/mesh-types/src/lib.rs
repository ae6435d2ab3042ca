//! Core mesh types for the duct router.
//!
//! This crate provides the surface and solid representation shared by the
//! building loader and the routing grid:
//!
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions and XY projection queries
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`; building
//! models are usually in millimeters.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshBounds, Point3};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 10.0));
//! mesh.vertices.push(Point3::new(20.0, 0.0, 10.0));
//! mesh.vertices.push(Point3::new(0.0, 20.0, 10.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert_eq!(mesh.bounds().max.z, 10.0);
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod traits;
mod triangle;

// Re-export core types
pub use bounds::Aabb;
pub use mesh::{IndexedMesh, box_mesh};
pub use traits::MeshBounds;
pub use triangle::{Triangle, orient_xy, point_on_segment_xy};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
