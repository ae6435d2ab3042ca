//! Shortest-path search over a ceiling routing lattice.
//!
//! Search runs in two phases:
//!
//! 1. [`build_graph`] turns the free cells of a [`RoutingGrid`] into an
//!    immutable [`FreeCellGraph`] with unit-weight edges between face
//!    neighbours (6-connectivity, no diagonal moves).
//! 2. [`find_path`] snaps two world points onto the lattice and runs
//!    Dijkstra from the source, recovering the target through predecessor
//!    links.
//!
//! [`PathFinder`] bundles both for the common case of one grid and many
//! queries.
//!
//! # Quick Start
//!
//! ```
//! use route_pathfind::{build_graph, find_path};
//! use route_grid::{Cell, RoutingGrid};
//! use cf_spatial::VoxelCoord;
//! use nalgebra::Point3;
//!
//! let mut grid = RoutingGrid::from_parts(Point3::origin(), 1.0, [5, 5, 1]).unwrap();
//! for y in 0..4 {
//!     grid.obstacle_mask_mut().set(VoxelCoord::new(2, y, 0), Cell::Blocked).unwrap();
//! }
//!
//! let graph = build_graph(&grid);
//! let path = find_path(&grid, &graph, Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)).unwrap();
//!
//! assert!(path.is_face_connected());
//! assert_eq!(path.step_count(), 12);
//! ```
//!
//! # Re-marking
//!
//! The graph is a snapshot of the grid at build time. After changing cell
//! states, build a new graph; stale graphs are never refreshed implicitly.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod graph;
pub mod search;

pub use graph::{FreeCellGraph, NodeId, build_graph};
pub use search::{PathFinder, find_path};

// Re-export the grid so callers can name it without an extra dependency.
pub use route_grid::{Cell, RoutingGrid};
