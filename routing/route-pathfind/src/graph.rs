//! Free-cell adjacency graph.
//!
//! The graph has one node per [`Cell::Free`] lattice cell and an undirected
//! edge between every pair of face-adjacent free cells. Storage is
//! compressed sparse rows: node `n`'s neighbours are
//! `targets[offsets[n]..offsets[n + 1]]`. A flat table keyed by the lattice
//! linear index maps cells to nodes.
//!
//! # Example
//!
//! ```
//! use route_pathfind::build_graph;
//! use route_grid::{Cell, RoutingGrid};
//! use cf_spatial::VoxelCoord;
//! use nalgebra::Point3;
//!
//! let mut grid = RoutingGrid::from_parts(Point3::origin(), 1.0, [3, 1, 1]).unwrap();
//! grid.obstacle_mask_mut().set(VoxelCoord::new(1, 0, 0), Cell::Blocked).unwrap();
//!
//! let graph = build_graph(&grid);
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 0);
//! ```

use cf_spatial::{DenseGrid, VoxelCoord};
use route_grid::RoutingGrid;
use tracing::debug;

/// Node identifier within a [`FreeCellGraph`].
pub type NodeId = usize;

/// Immutable adjacency over the free cells of a [`RoutingGrid`].
///
/// The graph is a snapshot: marking the grid afterwards does not change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeCellGraph {
    node_of: DenseGrid<Option<NodeId>>,
    cells: Vec<VoxelCoord>,
    offsets: Vec<usize>,
    targets: Vec<NodeId>,
}

impl FreeCellGraph {
    /// Number of nodes, equal to the number of free cells.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Node for a lattice cell, or `None` if the cell is blocked or outside.
    #[must_use]
    pub fn node_at(&self, coord: VoxelCoord) -> Option<NodeId> {
        self.node_of.get(coord).copied().flatten()
    }

    /// Lattice cell of a node.
    #[must_use]
    pub fn cell(&self, node: NodeId) -> Option<VoxelCoord> {
        self.cells.get(node).copied()
    }

    /// Neighbours of a node; empty for an unknown node.
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        match (self.offsets.get(node), self.offsets.get(node + 1)) {
            (Some(&start), Some(&end)) => &self.targets[start..end],
            _ => &[],
        }
    }

    /// Number of neighbours of a node.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }
}

/// Builds the free-cell graph of a grid.
///
/// Runs in time linear in the lattice size. Call it again after re-marking
/// the grid; nothing is cached between calls.
#[must_use]
pub fn build_graph(grid: &RoutingGrid) -> FreeCellGraph {
    let mask = grid.obstacle_mask();

    let mut cells = Vec::new();
    let node_of = mask.map(|coord, cell| {
        cell.is_free().then(|| {
            cells.push(coord);
            cells.len() - 1
        })
    });

    let mut offsets = Vec::with_capacity(cells.len() + 1);
    let mut targets = Vec::with_capacity(cells.len() * 6);
    offsets.push(0);
    for &coord in &cells {
        targets.extend(
            coord
                .face_neighbors()
                .into_iter()
                .filter_map(|n| node_of.get(n).copied().flatten()),
        );
        offsets.push(targets.len());
    }

    let graph = FreeCellGraph {
        node_of,
        cells,
        offsets,
        targets,
    };
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built free-cell graph"
    );
    graph
}
