//! Building model for ceiling duct routing.
//!
//! Provides the [`BuildingModel`] (a ceiling surface plus obstacle solids),
//! the bounds it contributes to grid sizing, and a loader for the JSON
//! building format.
//!
//! # Example
//!
//! ```
//! use route_building::BuildingModel;
//!
//! let json = r#"[
//!   { "Category": "Floor",
//!     "Coords": [0,0,10, 20,0,10, 20,20,10, 0,20,10],
//!     "Indices": [0,1,2, 0,2,3] },
//!   { "Category": "Column",
//!     "Coords": [5,5,0, 10,5,0, 10,10,0, 5,10,5],
//!     "Indices": [0,1,2, 0,2,3] }
//! ]"#;
//!
//! let model = BuildingModel::from_json_str(json).unwrap();
//! let (min_z, max_z) = model.bounds_z(2.0).unwrap();
//! assert_eq!((min_z, max_z), (-2.0, 10.0));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod loader;
mod model;

pub use error::{BuildingError, BuildingResult};
pub use model::BuildingModel;
