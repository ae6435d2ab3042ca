//! Shortest-path search between world points.

use nalgebra::Point3;
use pathfinding::prelude::{build_path, dijkstra_all};
use route_grid::RoutingGrid;
use route_types::{Endpoint, RoutePath, RoutingError};
use tracing::{debug, info};

use crate::graph::{FreeCellGraph, NodeId, build_graph};

/// Shortest-path finder over a grid and its free-cell graph.
///
/// # Example
///
/// ```
/// use route_pathfind::PathFinder;
/// use route_grid::RoutingGrid;
/// use nalgebra::Point3;
///
/// let grid = RoutingGrid::from_parts(Point3::origin(), 1.0, [10, 10, 5]).unwrap();
/// let finder = PathFinder::new(&grid);
///
/// let path = finder
///     .find_path(Point3::new(1.0, 1.0, 0.0), Point3::new(8.0, 8.0, 0.0))
///     .unwrap();
/// assert_eq!(path.step_count(), 14);
/// assert_eq!(path.first(), Some(&Point3::new(1.0, 1.0, 0.0)));
/// assert_eq!(path.last(), Some(&Point3::new(8.0, 8.0, 0.0)));
/// ```
#[derive(Debug, Clone)]
pub struct PathFinder<'a> {
    grid: &'a RoutingGrid,
    graph: FreeCellGraph,
}

impl<'a> PathFinder<'a> {
    /// Builds the free-cell graph of `grid` and wraps both.
    #[must_use]
    pub fn new(grid: &'a RoutingGrid) -> Self {
        Self::with_graph(grid, build_graph(grid))
    }

    /// Wraps a grid and a graph previously built from it.
    #[must_use]
    pub const fn with_graph(grid: &'a RoutingGrid, graph: FreeCellGraph) -> Self {
        Self { grid, graph }
    }

    /// Returns the grid.
    #[must_use]
    pub const fn grid(&self) -> &RoutingGrid {
        self.grid
    }

    /// Returns the free-cell graph.
    #[must_use]
    pub const fn graph(&self) -> &FreeCellGraph {
        &self.graph
    }

    /// Finds a shortest path between two world points.
    ///
    /// See [`find_path`].
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::NotNavigable`] or [`RoutingError::NoPathFound`].
    pub fn find_path(
        &self,
        source: Point3<f64>,
        target: Point3<f64>,
    ) -> Result<RoutePath, RoutingError> {
        find_path(self.grid, &self.graph, source, target)
    }
}

/// Finds a shortest path between two world points.
///
/// Each point snaps to its nearest lattice index. The search expands every
/// free cell reachable from the source with unit edge weights and then walks
/// the predecessor chain back from the target. The returned path has the
/// minimum number of steps; when several shortest paths exist, which one is
/// returned is unspecified.
///
/// A source equal to the target yields a one-point path.
///
/// # Errors
///
/// - [`RoutingError::NotNavigable`] if an endpoint snaps outside the lattice
///   or onto a blocked cell, naming which endpoint
/// - [`RoutingError::NoPathFound`] if the endpoints are in disconnected free
///   regions
pub fn find_path(
    grid: &RoutingGrid,
    graph: &FreeCellGraph,
    source: Point3<f64>,
    target: Point3<f64>,
) -> Result<RoutePath, RoutingError> {
    let from = resolve(grid, graph, Endpoint::Source, source)?;
    let to = resolve(grid, graph, Endpoint::Target, target)?;
    let cell = |node: NodeId| graph.cell(node).unwrap_or_default();

    let nodes = if from == to {
        vec![from]
    } else {
        let parents = dijkstra_all(&from, |&node| {
            graph.neighbors(node).iter().map(|&next| (next, 1u32))
        });
        debug!(reached = parents.len() + 1, "Expanded free space from source");
        if !parents.contains_key(&to) {
            return Err(RoutingError::NoPathFound {
                from: cell(from),
                to: cell(to),
            });
        }
        build_path(&to, &parents)
    };

    let cells = nodes.into_iter().map(cell).collect();
    let path = RoutePath::from_cells(cells, grid.grid_min(), grid.step());
    info!(
        points = path.len(),
        length = path.length(),
        "Found route"
    );
    Ok(path)
}

fn resolve(
    grid: &RoutingGrid,
    graph: &FreeCellGraph,
    endpoint: Endpoint,
    point: Point3<f64>,
) -> Result<NodeId, RoutingError> {
    let coord = grid.world_to_index(point);
    graph
        .node_at(coord)
        .ok_or_else(|| RoutingError::not_navigable(endpoint, point, coord))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cf_spatial::VoxelCoord;
    use route_grid::Cell;

    fn open_grid() -> RoutingGrid {
        RoutingGrid::from_parts(Point3::origin(), 1.0, [10, 10, 5]).unwrap()
    }

    fn block(grid: &mut RoutingGrid, x: i32, y: i32, z: i32) {
        grid.obstacle_mask_mut()
            .set(VoxelCoord::new(x, y, z), Cell::Blocked)
            .unwrap();
    }

    fn assert_unit_steps(path: &RoutePath, step: f64) {
        for pair in path.points().windows(2) {
            let d = pair[1] - pair[0];
            let moved: Vec<f64> = d.iter().copied().filter(|c| *c != 0.0).collect();
            assert_eq!(moved.len(), 1, "diagonal move {:?} -> {:?}", pair[0], pair[1]);
            assert_relative_eq!(moved[0].abs(), step);
        }
    }

    #[test]
    fn test_open_grid_path() {
        let grid = open_grid();
        let path = PathFinder::new(&grid)
            .find_path(Point3::new(1.0, 1.0, 0.0), Point3::new(8.0, 8.0, 0.0))
            .unwrap();
        assert_eq!(path.first(), Some(&Point3::new(1.0, 1.0, 0.0)));
        assert_eq!(path.last(), Some(&Point3::new(8.0, 8.0, 0.0)));
        assert_eq!(path.step_count(), 14);
        assert_relative_eq!(path.length(), 14.0);
        assert_unit_steps(&path, 1.0);
    }

    #[test]
    fn test_endpoints_snap() {
        let grid = RoutingGrid::from_parts(Point3::new(-10.0, 0.0, 0.0), 2.0, [6, 6, 2]).unwrap();
        let path = find_path(
            &grid,
            &build_graph(&grid),
            Point3::new(-9.2, 0.9, 0.3),
            Point3::new(-2.9, 5.1, 1.9),
        )
        .unwrap();
        assert_eq!(path.cells().first(), Some(&VoxelCoord::new(0, 0, 0)));
        assert_eq!(path.cells().last(), Some(&VoxelCoord::new(4, 3, 1)));
        assert_eq!(path.last(), Some(&Point3::new(-2.0, 6.0, 2.0)));
        assert_unit_steps(&path, 2.0);
    }

    #[test]
    fn test_same_source_and_target() {
        let grid = open_grid();
        let p = Point3::new(3.0, 4.0, 2.0);
        let path = PathFinder::new(&grid).find_path(p, p).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.first(), Some(&p));
        assert_eq!(path.length(), 0.0);
    }

    #[test]
    fn test_detour_around_wall() {
        let mut grid = RoutingGrid::from_parts(Point3::origin(), 1.0, [7, 7, 1]).unwrap();
        for y in 0..6 {
            block(&mut grid, 3, y, 0);
        }
        let path = PathFinder::new(&grid)
            .find_path(Point3::new(0.0, 0.0, 0.0), Point3::new(6.0, 0.0, 0.0))
            .unwrap();
        // Up to y = 6, across, and back down.
        assert_eq!(path.step_count(), 6 + 6 + 6);
        assert!(path.cells().contains(&VoxelCoord::new(3, 6, 0)));
        assert!(path.is_face_connected());
    }

    #[test]
    fn test_blocked_source() {
        let mut grid = open_grid();
        block(&mut grid, 1, 1, 0);
        let err = PathFinder::new(&grid)
            .find_path(Point3::new(1.0, 1.0, 0.0), Point3::new(8.0, 8.0, 0.0))
            .unwrap_err();
        assert!(err.is_not_navigable());
        assert_eq!(err.endpoint(), Some(Endpoint::Source));
    }

    #[test]
    fn test_target_outside_lattice() {
        let grid = open_grid();
        let err = PathFinder::new(&grid)
            .find_path(Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 1.0, 50.0))
            .unwrap_err();
        assert!(matches!(
            err,
            RoutingError::NotNavigable {
                endpoint: Endpoint::Target,
                coord,
                ..
            } if coord == VoxelCoord::new(1, 1, 50)
        ));
    }

    #[test]
    fn test_disconnected_endpoints() {
        let mut grid = RoutingGrid::from_parts(Point3::origin(), 1.0, [4, 4, 2]).unwrap();
        grid.obstacle_mask_mut().fill(Cell::Blocked);
        grid.obstacle_mask_mut()
            .set(VoxelCoord::new(0, 0, 0), Cell::Free)
            .unwrap();
        grid.obstacle_mask_mut()
            .set(VoxelCoord::new(3, 3, 1), Cell::Free)
            .unwrap();
        let err = PathFinder::new(&grid)
            .find_path(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 3.0, 1.0))
            .unwrap_err();
        assert!(err.is_no_path_found());
        assert!(matches!(
            err,
            RoutingError::NoPathFound { from, to }
                if from == VoxelCoord::new(0, 0, 0) && to == VoxelCoord::new(3, 3, 1)
        ));
    }

    #[test]
    fn test_graph_reused_across_queries() {
        let grid = open_grid();
        let finder = PathFinder::new(&grid);
        let a = finder
            .find_path(Point3::new(0.0, 0.0, 0.0), Point3::new(9.0, 0.0, 0.0))
            .unwrap();
        let b = finder
            .find_path(Point3::new(0.0, 0.0, 4.0), Point3::new(0.0, 9.0, 4.0))
            .unwrap();
        assert_eq!(a.step_count(), 9);
        assert_eq!(b.step_count(), 9);
        assert_eq!(finder.graph().node_count(), 500);
    }
}
