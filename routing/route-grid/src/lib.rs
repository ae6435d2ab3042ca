//! Routing lattice for ceiling duct routing.
//!
//! A [`RoutingGrid`] voxelizes the space between the lowest obstacle (minus
//! clearance) and the ceiling into a regular lattice of [`Cell`]s. Two passes
//! shape the traversable region:
//!
//! - [`RoutingGrid::mark_ceiling`] blocks the top layer outside the eroded
//!   ceiling footprint, so a duct hung from the ceiling never overhangs its edge.
//! - [`RoutingGrid::mark_obstacles`] surrounds every obstacle with a thin
//!   blocking shell at clearance distance.
//!
//! # Example
//!
//! ```
//! use route_grid::{Cell, RoutingGrid};
//! use route_building::BuildingModel;
//! use route_types::RoutingConfig;
//! use mesh_types::{box_mesh, IndexedMesh, Point3};
//!
//! let ceiling = IndexedMesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 10.0),
//!         Point3::new(20.0, 0.0, 10.0),
//!         Point3::new(20.0, 20.0, 10.0),
//!         Point3::new(0.0, 20.0, 10.0),
//!     ],
//!     vec![[0, 1, 2], [0, 2, 3]],
//! );
//! let obstacle = box_mesh(Point3::new(5.0, 5.0, 0.0), Point3::new(10.0, 10.0, 5.0));
//! let building = BuildingModel::new(ceiling, vec![obstacle]);
//!
//! let config = RoutingConfig::default()
//!     .with_cell_size(1.0)
//!     .with_routing_offset(2.0)
//!     .with_cable_width(1.0);
//!
//! let mut grid = RoutingGrid::new(&building, &config).unwrap();
//! grid.mark_ceiling();
//! grid.mark_obstacles();
//!
//! assert_eq!(grid.shape(), [21, 21, 13]);
//! assert_eq!(grid.cell([3, 5, 5].into()), Some(Cell::Blocked));
//! assert_eq!(grid.cell([8, 8, 5].into()), Some(Cell::Free));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod footprint;
mod grid;
mod marking;

pub use footprint::Footprint;
pub use grid::{Cell, RoutingGrid};
