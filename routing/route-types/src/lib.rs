//! Core types for ceiling duct routing: configuration, paths, duct boxes and errors.
//!
//! This crate provides the vocabulary shared by the grid, path finder, duct
//! generator and command-line front end.
//!
//! # Overview
//!
//! - **Configuration**: Cell size, clearance and cable dimensions ([`RoutingConfig`], [`Orientation`])
//! - **Paths**: Lattice paths with world positions ([`RoutePath`])
//! - **Ducts**: Axis-aligned duct boxes ([`DuctBox`], [`DuctKind`])
//! - **Errors**: Everything that can go wrong between configuration and search ([`RoutingError`])
//!
//! # Example
//!
//! ```
//! use route_types::{RoutingConfig, RoutePath, DuctBox};
//! use cf_spatial::VoxelCoord;
//! use nalgebra::Point3;
//!
//! let config = RoutingConfig::default().with_cell_size(5.0);
//! config.validate().unwrap();
//!
//! let path = RoutePath::from_cells(
//!     vec![VoxelCoord::new(0, 0, 0), VoxelCoord::new(1, 0, 0)],
//!     Point3::origin(),
//!     config.cell_size(),
//! );
//! assert_eq!(path.length(), 5.0);
//!
//! let duct = DuctBox::segment(Point3::new(2.5, 0.0, 0.0), 5.0, config.cable_width(), config.cable_height());
//! assert_eq!(duct.y_length, 100.0);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization for all types and JSON configuration files

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod duct;
pub mod error;
pub mod path;

// Re-export main types at crate root for convenience
pub use config::{
    DEFAULT_CABLE_HEIGHT, DEFAULT_CABLE_WIDTH, DEFAULT_CELL_SIZE, DEFAULT_ROUTING_OFFSET,
    Orientation, RoutingConfig,
};
pub use duct::{DuctBox, DuctKind};
pub use error::{Endpoint, RoutingError};
pub use path::RoutePath;

// Re-exported so downstream crates can name the propagated error types.
pub use cf_spatial::SpatialError;
pub use route_building::BuildingError;
