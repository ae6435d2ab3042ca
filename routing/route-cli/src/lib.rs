//! Routing pipeline behind the `duct-route` binary.
//!
//! [`route`] runs the whole computation for one source/target pair: size the
//! grid, mark the ceiling edge and obstacle shells, build the free-cell
//! graph, search, and convert the path into duct boxes. The result is a
//! serializable [`RouteReport`].

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::path::Path;

use anyhow::{Context, Result};
use nalgebra::{Point2, Point3};
use route_building::{BuildingError, BuildingModel};
use route_duct::generate_cable_boxes;
use route_grid::RoutingGrid;
use route_pathfind::{build_graph, find_path};
use route_types::{DuctBox, RoutingConfig, RoutingError};
use serde::Serialize;
use tracing::{debug, info};

/// Everything the router produces for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    /// World-space path points, source first.
    pub path: Vec<[f64; 3]>,
    /// Duct and corner boxes along the path.
    pub boxes: Vec<DuctBox>,
    /// Path length in world units.
    pub length: f64,
    /// Lattice the path was found on.
    pub grid: GridSummary,
}

/// Placement and size of the routing lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSummary {
    /// Lattice points per axis.
    pub shape: [usize; 3],
    /// Lattice spacing.
    pub step: f64,
    /// World position of index `(0, 0, 0)`.
    pub grid_min: [f64; 3],
}

/// Parses an `x,y` coordinate pair.
///
/// Used as the clap value parser for `--source` and `--target`.
///
/// # Errors
///
/// Returns a message naming the problem if the input is not two
/// comma-separated finite numbers.
///
/// # Example
///
/// ```
/// use route_cli::parse_xy;
///
/// let p = parse_xy(" 120.5, -4 ").unwrap();
/// assert_eq!((p.x, p.y), (120.5, -4.0));
/// assert!(parse_xy("1;2").is_err());
/// ```
pub fn parse_xy(value: &str) -> Result<Point2<f64>, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y] = parts.as_slice() else {
        return Err(format!(
            "expected two comma-separated numbers 'x,y', got '{value}'"
        ));
    };
    let parse = |axis: &str, s: &str| -> Result<f64, String> {
        let v: f64 = s
            .parse()
            .map_err(|_| format!("invalid {axis} coordinate '{s}' in '{value}'"))?;
        if v.is_finite() {
            Ok(v)
        } else {
            Err(format!("{axis} coordinate must be finite, got '{s}'"))
        }
    };
    Ok(Point2::new(parse("x", x)?, parse("y", y)?))
}

/// Loads the routing configuration, or the defaults when no file is given.
///
/// # Errors
///
/// Fails if the file cannot be read, is malformed, or holds invalid values.
pub fn load_config(path: Option<&Path>) -> Result<RoutingConfig> {
    let config = match path {
        Some(path) => RoutingConfig::from_json_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => {
            let config = RoutingConfig::default();
            config.validate()?;
            config
        }
    };
    debug!(
        cell_size = config.cell_size(),
        orientation = %config.orientation(),
        routing_offset = config.routing_offset(),
        cable_width = config.cable_width(),
        cable_height = config.cable_height(),
        "Using configuration"
    );
    Ok(config)
}

/// Routes a duct between two XY positions on the ceiling.
///
/// Both endpoints are placed at the ceiling's highest Z.
///
/// # Errors
///
/// Propagates grid construction failures and the path finder's
/// [`RoutingError::NotNavigable`] / [`RoutingError::NoPathFound`].
pub fn route(
    building: &BuildingModel,
    config: &RoutingConfig,
    source: Point2<f64>,
    target: Point2<f64>,
) -> Result<RouteReport, RoutingError> {
    let mut grid = RoutingGrid::new(building, config)?;
    grid.mark_ceiling();
    grid.mark_obstacles();
    let graph = build_graph(&grid);

    let z = building
        .ceiling_max_z()
        .ok_or_else(|| BuildingError::empty_mesh("ceiling"))?;
    let source = Point3::new(source.x, source.y, z);
    let target = Point3::new(target.x, target.y, z);

    let path = find_path(&grid, &graph, source, target)?;
    let boxes = generate_cable_boxes(path.points(), config.cable_width(), config.cable_height());
    info!(
        points = path.len(),
        boxes = boxes.len(),
        length = path.length(),
        "Routed duct"
    );

    let grid_min = grid.grid_min();
    Ok(RouteReport {
        path: path.points().iter().map(|p| [p.x, p.y, p.z]).collect(),
        boxes,
        length: path.length(),
        grid: GridSummary {
            shape: grid.shape(),
            step: grid.step(),
            grid_min: [grid_min.x, grid_min.y, grid_min.z],
        },
    })
}
