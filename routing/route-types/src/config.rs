//! Routing configuration.
//!
//! [`RoutingConfig`] carries the four parameters that shape the grid and the
//! duct: cell size, clearance offset, cable width and cable height, plus the
//! grid orientation label.
//!
//! # Example
//!
//! ```
//! use route_types::{Orientation, RoutingConfig};
//!
//! let config = RoutingConfig::default()
//!     .with_cell_size(25.0)
//!     .with_cable_width(120.0)
//!     .with_orientation(Orientation::Xy);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.duct_half_width_cells(), 2);
//! assert_eq!(config.offset_cells(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::RoutingError;

/// Default lattice cell size in world units.
pub const DEFAULT_CELL_SIZE: f64 = 10.0;
/// Default clearance kept around obstacles, in world units.
pub const DEFAULT_ROUTING_OFFSET: f64 = 50.0;
/// Default duct width in world units.
pub const DEFAULT_CABLE_WIDTH: f64 = 100.0;
/// Default duct height in world units.
pub const DEFAULT_CABLE_HEIGHT: f64 = 5.0;

/// Grid orientation label.
///
/// Accepted and validated, but the router itself always works on the full
/// 3D lattice.
///
/// # Example
///
/// ```
/// use route_types::Orientation;
///
/// let o: Orientation = "xz".parse().unwrap();
/// assert_eq!(o, Orientation::Xz);
/// assert_eq!(o.to_string(), "xz");
/// assert!("zx".parse::<Orientation>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// All three axes.
    #[default]
    Xyz,
    /// The horizontal plane.
    Xy,
    /// The X/Z plane.
    Xz,
    /// The Y/Z plane.
    Yz,
}

impl Orientation {
    /// Returns the lowercase label used in configuration files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Xyz => "xyz",
            Self::Xy => "xy",
            Self::Xz => "xz",
            Self::Yz => "yz",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xyz" => Ok(Self::Xyz),
            "xy" => Ok(Self::Xy),
            "xz" => Ok(Self::Xz),
            "yz" => Ok(Self::Yz),
            other => Err(RoutingError::invalid_config(format!(
                "grid.orientation must be one of xyz/xy/xz/yz, got '{other}'"
            ))),
        }
    }
}

/// Configuration for grid construction and duct generation.
///
/// All lengths are in world units (the building model's units).
///
/// With the `serde` feature, the configuration (de)serializes to a sectioned
/// document:
///
/// ```json
/// {
///   "grid":    { "cell_size": 10, "orientation": "xyz" },
///   "routing": { "offset": 50 },
///   "cable":   { "width": 100, "height": 5 }
/// }
/// ```
///
/// Missing sections and keys take their defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "file::ConfigFile", into = "file::ConfigFile")
)]
pub struct RoutingConfig {
    /// Edge length of one lattice cell.
    cell_size: f64,
    /// Grid orientation label.
    orientation: Orientation,
    /// Clearance kept between the duct and obstacles.
    routing_offset: f64,
    /// Duct width (cross-section).
    cable_width: f64,
    /// Duct height (cross-section).
    cable_height: f64,
}

impl RoutingConfig {
    /// Creates a configuration with default settings.
    ///
    /// Defaults:
    /// - Cell size: 10
    /// - Orientation: xyz
    /// - Routing offset: 50
    /// - Cable width: 100
    /// - Cable height: 5
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            orientation: Orientation::Xyz,
            routing_offset: DEFAULT_ROUTING_OFFSET,
            cable_width: DEFAULT_CABLE_WIDTH,
            cable_height: DEFAULT_CABLE_HEIGHT,
        }
    }

    /// Sets the lattice cell size.
    #[must_use]
    pub const fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the orientation label.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the clearance offset around obstacles.
    #[must_use]
    pub const fn with_routing_offset(mut self, offset: f64) -> Self {
        self.routing_offset = offset;
        self
    }

    /// Sets the duct width.
    #[must_use]
    pub const fn with_cable_width(mut self, width: f64) -> Self {
        self.cable_width = width;
        self
    }

    /// Sets the duct height.
    #[must_use]
    pub const fn with_cable_height(mut self, height: f64) -> Self {
        self.cable_height = height;
        self
    }

    /// Returns the lattice cell size.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns the orientation label.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the clearance offset.
    #[must_use]
    pub const fn routing_offset(&self) -> f64 {
        self.routing_offset
    }

    /// Returns the duct width.
    #[must_use]
    pub const fn cable_width(&self) -> f64 {
        self.cable_width
    }

    /// Returns the duct height.
    #[must_use]
    pub const fn cable_height(&self) -> f64 {
        self.cable_height
    }

    /// Duct half-width in whole cells: `floor(cable_width / (2 * cell_size))`.
    ///
    /// Only meaningful on a validated configuration.
    #[must_use]
    pub fn duct_half_width_cells(&self) -> u32 {
        whole_cells(self.cable_width / (2.0 * self.cell_size))
    }

    /// Clearance offset in whole cells: `floor(routing_offset / cell_size)`.
    ///
    /// Only meaningful on a validated configuration.
    #[must_use]
    pub fn offset_cells(&self) -> u32 {
        whole_cells(self.routing_offset / self.cell_size)
    }

    /// Validates every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidConfig`] naming the first offending key
    /// if the cell size or a cable dimension is not a positive finite number,
    /// or the offset is negative or not finite.
    pub fn validate(&self) -> Result<(), RoutingError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(RoutingError::invalid_config(format!(
                "grid.cell_size must be > 0, got {}",
                self.cell_size
            )));
        }
        if !(self.routing_offset.is_finite() && self.routing_offset >= 0.0) {
            return Err(RoutingError::invalid_config(format!(
                "routing.offset must be >= 0, got {}",
                self.routing_offset
            )));
        }
        if !(self.cable_width.is_finite() && self.cable_width > 0.0) {
            return Err(RoutingError::invalid_config(format!(
                "cable.width must be > 0, got {}",
                self.cable_width
            )));
        }
        if !(self.cable_height.is_finite() && self.cable_height > 0.0) {
            return Err(RoutingError::invalid_config(format!(
                "cable.height must be > 0, got {}",
                self.cable_height
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::ConfigParse`] for malformed JSON or wrong value
    /// types, and [`RoutingError::InvalidConfig`] for out-of-range values.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::RoutingConfig;
    ///
    /// let config = RoutingConfig::from_json_str(r#"{ "grid": { "cell_size": 5 } }"#).unwrap();
    /// assert_eq!(config.cell_size(), 5.0);
    /// assert_eq!(config.cable_width(), 100.0);
    ///
    /// assert!(RoutingConfig::from_json_str(r#"{ "routing": { "offset": -1 } }"#).is_err());
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, RoutingError> {
        let file: file::ConfigFile = serde_json::from_str(json)?;
        Self::try_from(file)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::ConfigFile`] if the file cannot be read, plus
    /// the errors of [`RoutingConfig::from_json_str`].
    #[cfg(feature = "serde")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, RoutingError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RoutingError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_cells(ratio: f64) -> u32 {
    // Float-to-int `as` saturates, so oversized ratios clamp to u32::MAX.
    ratio.floor().max(0.0) as u32
}

/// On-disk layout of the configuration document.
#[cfg(feature = "serde")]
mod file {
    use serde::{Deserialize, Serialize};

    use super::{
        DEFAULT_CABLE_HEIGHT, DEFAULT_CABLE_WIDTH, DEFAULT_CELL_SIZE, DEFAULT_ROUTING_OFFSET,
        RoutingConfig,
    };
    use crate::error::RoutingError;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ConfigFile {
        grid: GridSection,
        routing: RoutingSection,
        cable: CableSection,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(default)]
    struct GridSection {
        cell_size: f64,
        orientation: String,
    }

    impl Default for GridSection {
        fn default() -> Self {
            Self {
                cell_size: DEFAULT_CELL_SIZE,
                orientation: "xyz".to_owned(),
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(default)]
    struct RoutingSection {
        offset: f64,
    }

    impl Default for RoutingSection {
        fn default() -> Self {
            Self {
                offset: DEFAULT_ROUTING_OFFSET,
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(default)]
    struct CableSection {
        width: f64,
        height: f64,
    }

    impl Default for CableSection {
        fn default() -> Self {
            Self {
                width: DEFAULT_CABLE_WIDTH,
                height: DEFAULT_CABLE_HEIGHT,
            }
        }
    }

    impl TryFrom<ConfigFile> for RoutingConfig {
        type Error = RoutingError;

        fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
            let config = Self::new()
                .with_cell_size(file.grid.cell_size)
                .with_orientation(file.grid.orientation.parse()?)
                .with_routing_offset(file.routing.offset)
                .with_cable_width(file.cable.width)
                .with_cable_height(file.cable.height);
            config.validate()?;
            Ok(config)
        }
    }

    impl From<RoutingConfig> for ConfigFile {
        fn from(config: RoutingConfig) -> Self {
            Self {
                grid: GridSection {
                    cell_size: config.cell_size,
                    orientation: config.orientation.as_str().to_owned(),
                },
                routing: RoutingSection {
                    offset: config.routing_offset,
                },
                cable: CableSection {
                    width: config.cable_width,
                    height: config.cable_height,
                },
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RoutingConfig::default();
        assert_eq!(config.cell_size(), 10.0);
        assert_eq!(config.orientation(), Orientation::Xyz);
        assert_eq!(config.routing_offset(), 50.0);
        assert_eq!(config.cable_width(), 100.0);
        assert_eq!(config.cable_height(), 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_cells() {
        let config = RoutingConfig::default();
        // 100 / (2 * 10) = 5, 50 / 10 = 5
        assert_eq!(config.duct_half_width_cells(), 5);
        assert_eq!(config.offset_cells(), 5);

        let config = config.with_cell_size(1.0).with_cable_width(1.0).with_routing_offset(2.0);
        assert_eq!(config.duct_half_width_cells(), 0);
        assert_eq!(config.offset_cells(), 2);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            RoutingConfig::new().with_cell_size(0.0),
            RoutingConfig::new().with_cell_size(-1.0),
            RoutingConfig::new().with_cell_size(f64::NAN),
            RoutingConfig::new().with_routing_offset(-0.5),
            RoutingConfig::new().with_cable_width(0.0),
            RoutingConfig::new().with_cable_height(-5.0),
        ];
        for config in bad {
            let err = config.validate().unwrap_err();
            assert!(matches!(err, RoutingError::InvalidConfig(_)), "{config:?}");
        }
    }

    #[test]
    fn test_zero_offset_is_valid() {
        assert!(RoutingConfig::new().with_routing_offset(0.0).validate().is_ok());
    }

    #[test]
    fn test_orientation_roundtrip_labels() {
        for o in [Orientation::Xyz, Orientation::Xy, Orientation::Xz, Orientation::Yz] {
            assert_eq!(o.to_string().parse::<Orientation>().unwrap(), o);
        }
        let err = "XYZ".parse::<Orientation>().unwrap_err();
        assert!(err.to_string().contains("orientation"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_sections() {
        let json = r#"{
            "grid": { "cell_size": 20, "orientation": "xy" },
            "routing": { "offset": 0 },
            "cable": { "width": 60 }
        }"#;
        let config = RoutingConfig::from_json_str(json).unwrap();
        assert_eq!(config.cell_size(), 20.0);
        assert_eq!(config.orientation(), Orientation::Xy);
        assert_eq!(config.routing_offset(), 0.0);
        assert_eq!(config.cable_width(), 60.0);
        assert_eq!(config.cable_height(), DEFAULT_CABLE_HEIGHT);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_empty_document_is_default() {
        let config = RoutingConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RoutingConfig::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_rejects_unknown_orientation() {
        let err = RoutingConfig::from_json_str(r#"{ "grid": { "orientation": "diag" } }"#)
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_rejects_wrong_type() {
        let err = RoutingConfig::from_json_str(r#"{ "cable": { "width": "wide" } }"#).unwrap_err();
        assert!(matches!(err, RoutingError::ConfigParse(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_uses_sections() {
        let json = serde_json::to_value(RoutingConfig::default().with_cable_height(8.0)).unwrap();
        assert_eq!(json["grid"]["orientation"], "xyz");
        assert_eq!(json["cable"]["height"], 8.0);
        let back: RoutingConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.cable_height(), 8.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_missing_file() {
        let err = RoutingConfig::from_json_file("/nonexistent/route-config.json").unwrap_err();
        assert!(matches!(err, RoutingError::ConfigFile { .. }));
    }
}
