//! Error types for routing operations.
//!
//! This module defines the [`RoutingError`] enum which represents all possible
//! errors that can occur between configuration validation and path search.

use std::fmt;
use std::path::PathBuf;

use cf_spatial::{SpatialError, VoxelCoord};
use nalgebra::Point3;
use route_building::BuildingError;

/// Which end of a routing query an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    /// The point the route starts from.
    Source,
    /// The point the route must reach.
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Errors that can occur during routing operations.
///
/// This enum covers configuration problems, grid construction failures
/// propagated from the building model or the lattice, and query failures
/// from the path finder.
///
/// # Example
///
/// ```
/// use route_types::RoutingError;
/// use cf_spatial::VoxelCoord;
///
/// let error = RoutingError::NoPathFound {
///     from: VoxelCoord::new(0, 0, 0),
///     to: VoxelCoord::new(10, 10, 10),
/// };
///
/// assert!(error.to_string().contains("no path found"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RoutingError {
    /// An invalid configuration parameter was provided.
    ///
    /// Check the configuration values for valid ranges.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be read.
    #[error("failed to read configuration file {path}")]
    ConfigFile {
        /// The file that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration document could not be parsed.
    #[cfg(feature = "serde")]
    #[error("malformed configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A query endpoint snaps to a cell that is outside the lattice or blocked.
    #[error("{endpoint} point ({}, {}, {}) is not navigable (cell {coord:?})", .point.x, .point.y, .point.z)]
    NotNavigable {
        /// Which endpoint failed.
        endpoint: Endpoint,
        /// The world-space point as given.
        point: Point3<f64>,
        /// The snapped lattice index.
        coord: VoxelCoord,
    },

    /// No path exists between two navigable endpoints.
    ///
    /// The endpoints lie in disconnected regions of free space.
    #[error("no path found from {from:?} to {to:?}")]
    NoPathFound {
        /// The snapped source index.
        from: VoxelCoord,
        /// The snapped target index.
        to: VoxelCoord,
    },

    /// The building model could not provide bounds.
    #[error(transparent)]
    Building(#[from] BuildingError),

    /// A lattice operation failed.
    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

impl RoutingError {
    /// Creates an invalid configuration error with the given message.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::RoutingError;
    ///
    /// let error = RoutingError::invalid_config("cell_size must be > 0");
    /// assert!(error.to_string().contains("cell_size"));
    /// ```
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Creates a "not navigable" error for one endpoint.
    #[must_use]
    pub const fn not_navigable(endpoint: Endpoint, point: Point3<f64>, coord: VoxelCoord) -> Self {
        Self::NotNavigable {
            endpoint,
            point,
            coord,
        }
    }

    /// Returns `true` if this is a "no path found" error.
    #[must_use]
    pub const fn is_no_path_found(&self) -> bool {
        matches!(self, Self::NoPathFound { .. })
    }

    /// Returns `true` if an endpoint was rejected as not navigable.
    #[must_use]
    pub const fn is_not_navigable(&self) -> bool {
        matches!(self, Self::NotNavigable { .. })
    }

    /// Returns the endpoint a "not navigable" error refers to.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::{Endpoint, RoutingError};
    /// use cf_spatial::VoxelCoord;
    /// use nalgebra::Point3;
    ///
    /// let error = RoutingError::not_navigable(
    ///     Endpoint::Target,
    ///     Point3::new(1.0, 2.0, 3.0),
    ///     VoxelCoord::new(1, 2, 3),
    /// );
    /// assert_eq!(error.endpoint(), Some(Endpoint::Target));
    /// assert!(error.to_string().starts_with("target point"));
    /// ```
    #[must_use]
    pub const fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::NotNavigable { endpoint, .. } => Some(*endpoint),
            _ => None,
        }
    }

    /// Returns `true` if this error originates from configuration.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        match self {
            Self::InvalidConfig(_) | Self::ConfigFile { .. } => true,
            #[cfg(feature = "serde")]
            Self::ConfigParse(_) => true,
            _ => false,
        }
    }
}
