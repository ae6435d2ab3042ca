//! Duct geometry for routed paths.
//!
//! [`generate_cable_boxes`] compresses a lattice path into one axis-aligned
//! box per straight run, plus a cube at every change of direction so that
//! consecutive runs join without a gap.
//!
//! # Example
//!
//! ```
//! use route_duct::{generate_cable_boxes, DEFAULT_CABLE_HEIGHT};
//! use route_types::DuctKind;
//! use nalgebra::Point3;
//!
//! // An L: 20 units along X, then 10 along Y.
//! let path = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//!     Point3::new(20.0, 0.0, 0.0),
//!     Point3::new(20.0, 10.0, 0.0),
//! ];
//! let boxes = generate_cable_boxes(&path, 4.0, DEFAULT_CABLE_HEIGHT);
//!
//! assert_eq!(boxes.len(), 3);
//! assert_eq!(boxes[0].x_length, 20.0);
//! assert_eq!(boxes[1].kind, DuctKind::Corner);
//! assert_eq!(boxes[2].y_length, 10.0);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod cable;

pub use cable::{Axis, COLLINEAR_TOLERANCE, generate_cable_boxes, run_axis};
pub use route_types::{DEFAULT_CABLE_HEIGHT, DuctBox, DuctKind};
