//! The routing lattice and its coordinate mapping.

use cf_spatial::{DenseGrid, GridBounds, Mask2, SpatialError, VoxelCoord};
use mesh_types::IndexedMesh;
use nalgebra::Point3;
use route_building::BuildingModel;
use route_types::{RoutingConfig, RoutingError};
use tracing::info;

use crate::footprint::Footprint;

/// State of one lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Traversable.
    #[default]
    Free,
    /// Part of a ceiling edge or an obstacle clearance shell.
    Blocked,
}

impl Cell {
    /// Returns `true` for [`Cell::Free`].
    #[must_use]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }

    /// Returns `true` for [`Cell::Blocked`].
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }
}

/// A regular lattice spanning the routable volume of a building.
///
/// Lattice index `(i, j, k)` sits at world position `grid_min + (i, j, k) * step`.
/// Indices run over `0..=nx`, `0..=ny`, `0..=nz`; the top layer `k = nz` lies
/// at (or just below) the ceiling.
///
/// The grid owns its obstacle mask. Marking passes mutate it in place and
/// are idempotent; a graph built from the mask must be rebuilt after
/// re-marking.
#[derive(Debug, Clone)]
pub struct RoutingGrid {
    grid_min: Point3<f64>,
    step: f64,
    duct_half_width: u32,
    offset_cells: u32,
    ceiling_mask: Mask2,
    obstacle_mask: DenseGrid<Cell>,
    /// Unclipped clearance-expanded index boxes, one per obstacle.
    pub(crate) obstacle_boxes: Vec<GridBounds>,
}

impl RoutingGrid {
    /// Sizes a lattice from a building model and computes its ceiling mask.
    ///
    /// The obstacle mask starts all [`Cell::Free`]; call
    /// [`RoutingGrid::mark_ceiling`] and [`RoutingGrid::mark_obstacles`] to
    /// block cells.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::InvalidConfig`] if `config` fails validation
    /// - [`RoutingError::Building`] if a mesh is empty or the clearance offset
    ///   leaves no headroom below the ceiling
    /// - [`RoutingError::Spatial`] if the lattice would be too large to index
    pub fn new(building: &BuildingModel, config: &RoutingConfig) -> Result<Self, RoutingError> {
        config.validate()?;
        let step = config.cell_size();
        let (min_xy, max_xy) = building.bounds_xy()?;
        let (min_z, max_z) = building.bounds_z(config.routing_offset())?;

        let grid_min = Point3::new(min_xy.x, min_xy.y, min_z);
        let shape = [
            axis_len(min_xy.x, max_xy.x, step)?,
            axis_len(min_xy.y, max_xy.y, step)?,
            axis_len(min_z, max_z, step)?,
        ];

        let mut grid = Self::from_parts(grid_min, step, shape)?
            .with_clearance(config.offset_cells(), config.duct_half_width_cells());

        let footprint = Footprint::from_mesh(building.ceiling());
        grid.ceiling_mask = footprint
            .rasterize(grid_min, step, shape[0], shape[1])
            .erode_square(grid.duct_half_width as usize);

        for obstacle in building.obstacles() {
            grid.add_obstacle(obstacle);
        }

        info!(
            shape = ?shape,
            step,
            duct_half_width = grid.duct_half_width,
            offset_cells = grid.offset_cells,
            ceiling_columns = grid.ceiling_mask.count(),
            obstacles = grid.obstacle_boxes.len(),
            "Built routing grid"
        );
        Ok(grid)
    }

    /// Creates an all-free lattice with explicit placement and shape.
    ///
    /// The ceiling mask is all `true`, clearance is zero and no obstacles are
    /// registered. Combine with [`RoutingGrid::with_clearance`],
    /// [`RoutingGrid::with_ceiling_mask`] and [`RoutingGrid::add_obstacle`]
    /// to describe a lattice without a building model.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidConfig`] if `step` is not a positive
    /// finite number, and [`RoutingError::Spatial`] for an empty or
    /// unrepresentable shape.
    ///
    /// # Example
    ///
    /// ```
    /// use route_grid::RoutingGrid;
    /// use nalgebra::Point3;
    ///
    /// let grid = RoutingGrid::from_parts(Point3::origin(), 1.0, [10, 10, 5]).unwrap();
    /// assert_eq!((grid.nx(), grid.ny(), grid.nz()), (9, 9, 4));
    /// assert_eq!(grid.free_cell_count(), 500);
    /// ```
    pub fn from_parts(
        grid_min: Point3<f64>,
        step: f64,
        shape: [usize; 3],
    ) -> Result<Self, RoutingError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(RoutingError::invalid_config(format!(
                "grid step must be > 0, got {step}"
            )));
        }
        let obstacle_mask = DenseGrid::filled(shape, Cell::Free)?;
        Ok(Self {
            grid_min,
            step,
            duct_half_width: 0,
            offset_cells: 0,
            ceiling_mask: Mask2::from_fn(shape[0], shape[1], |_, _| true),
            obstacle_mask,
            obstacle_boxes: Vec::new(),
        })
    }

    /// Sets the clearance used for obstacles registered afterwards.
    #[must_use]
    pub const fn with_clearance(mut self, offset_cells: u32, duct_half_width: u32) -> Self {
        self.offset_cells = offset_cells;
        self.duct_half_width = duct_half_width;
        self
    }

    /// Replaces the ceiling mask.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::MaskShapeMismatch`] (wrapped) if the mask does not
    /// cover exactly the lattice columns.
    pub fn with_ceiling_mask(mut self, mask: Mask2) -> Result<Self, RoutingError> {
        let expected = (self.shape()[0], self.shape()[1]);
        if mask.shape() != expected {
            return Err(SpatialError::MaskShapeMismatch {
                expected,
                actual: mask.shape(),
            }
            .into());
        }
        self.ceiling_mask = mask;
        Ok(self)
    }

    /// Registers an obstacle for [`RoutingGrid::mark_obstacles`].
    ///
    /// Returns its clearance-expanded index box, or `None` (and registers
    /// nothing) for a mesh without vertices.
    pub fn add_obstacle(&mut self, mesh: &IndexedMesh) -> Option<GridBounds> {
        let bounds = self.obstacle_bounds(mesh)?;
        self.obstacle_boxes.push(bounds);
        Some(bounds)
    }

    /// World position of lattice index `(0, 0, 0)`.
    #[must_use]
    pub const fn grid_min(&self) -> Point3<f64> {
        self.grid_min
    }

    /// Lattice spacing in world units.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Largest X index.
    #[must_use]
    pub const fn nx(&self) -> usize {
        self.obstacle_mask.dims()[0] - 1
    }

    /// Largest Y index.
    #[must_use]
    pub const fn ny(&self) -> usize {
        self.obstacle_mask.dims()[1] - 1
    }

    /// Largest Z index, i.e. the top layer.
    #[must_use]
    pub const fn nz(&self) -> usize {
        self.obstacle_mask.dims()[2] - 1
    }

    /// Number of lattice points per axis: `[nx + 1, ny + 1, nz + 1]`.
    #[must_use]
    pub const fn shape(&self) -> [usize; 3] {
        self.obstacle_mask.dims()
    }

    /// Duct half-width in cells.
    #[must_use]
    pub const fn duct_half_width(&self) -> u32 {
        self.duct_half_width
    }

    /// Obstacle clearance in cells.
    #[must_use]
    pub const fn offset_cells(&self) -> u32 {
        self.offset_cells
    }

    /// Eroded ceiling footprint over the lattice columns.
    #[must_use]
    pub const fn ceiling_mask(&self) -> &Mask2 {
        &self.ceiling_mask
    }

    /// Cell states.
    #[must_use]
    pub const fn obstacle_mask(&self) -> &DenseGrid<Cell> {
        &self.obstacle_mask
    }

    /// Mutable cell states, for callers that block or reopen cells directly.
    pub fn obstacle_mask_mut(&mut self) -> &mut DenseGrid<Cell> {
        &mut self.obstacle_mask
    }

    /// Registered obstacle boxes, unclipped.
    #[must_use]
    pub fn obstacle_boxes(&self) -> &[GridBounds] {
        &self.obstacle_boxes
    }

    /// State of a cell, or `None` outside the lattice.
    #[must_use]
    pub fn cell(&self, coord: VoxelCoord) -> Option<Cell> {
        self.obstacle_mask.get(coord).copied()
    }

    /// Returns `true` if `coord` is inside the lattice and free.
    #[must_use]
    pub fn is_free(&self, coord: VoxelCoord) -> bool {
        self.cell(coord).is_some_and(Cell::is_free)
    }

    /// Number of free cells.
    #[must_use]
    pub fn free_cell_count(&self) -> usize {
        self.obstacle_mask.count_where(|c| c.is_free())
    }

    /// World position of a lattice index.
    #[must_use]
    pub fn index_to_world(&self, coord: VoxelCoord) -> Point3<f64> {
        self.grid_min + coord.to_vector() * self.step
    }

    /// Nearest lattice index to a world point.
    ///
    /// Rounds half to even. The result may lie outside the lattice; non-finite
    /// components map to `i32::MIN`, which is always outside.
    ///
    /// # Example
    ///
    /// ```
    /// use route_grid::RoutingGrid;
    /// use cf_spatial::VoxelCoord;
    /// use nalgebra::Point3;
    ///
    /// let grid = RoutingGrid::from_parts(Point3::new(0.0, 0.0, -2.0), 1.0, [21, 21, 13]).unwrap();
    /// assert_eq!(grid.world_to_index(Point3::new(0.5, 1.5, 10.0)), VoxelCoord::new(0, 2, 12));
    /// ```
    #[must_use]
    pub fn world_to_index(&self, point: Point3<f64>) -> VoxelCoord {
        let rel = (point - self.grid_min) / self.step;
        VoxelCoord::new(snap(rel.x), snap(rel.y), snap(rel.z))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn snap(v: f64) -> i32 {
    if v.is_nan() {
        i32::MIN
    } else {
        v.round_ties_even() as i32
    }
}

/// Lattice points along one axis: `floor((max - min) / step) + 1`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn axis_len(min: f64, max: f64, step: f64) -> Result<usize, SpatialError> {
    let cells = ((max - min) / step).floor();
    if !(cells.is_finite() && cells >= 0.0 && cells < f64::from(i32::MAX)) {
        return Err(SpatialError::IntegerOverflow);
    }
    Ok(cells as usize + 1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::box_mesh;

    fn square_ceiling(size: f64, z: f64) -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, z),
                Point3::new(size, 0.0, z),
                Point3::new(size, size, z),
                Point3::new(0.0, size, z),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    fn building() -> BuildingModel {
        let obstacle = box_mesh(Point3::new(5.0, 5.0, 0.0), Point3::new(10.0, 10.0, 5.0));
        BuildingModel::new(square_ceiling(20.0, 10.0), vec![obstacle])
    }

    fn config(cable_width: f64) -> RoutingConfig {
        RoutingConfig::default()
            .with_cell_size(1.0)
            .with_routing_offset(2.0)
            .with_cable_width(cable_width)
    }

    #[test]
    fn test_shape_from_bounds() {
        let grid = RoutingGrid::new(&building(), &config(1.0)).unwrap();
        assert_eq!(grid.shape(), [21, 21, 13]);
        assert_eq!((grid.nx(), grid.ny(), grid.nz()), (20, 20, 12));
        assert_eq!(grid.grid_min(), Point3::new(0.0, 0.0, -2.0));
        assert_eq!(grid.offset_cells(), 2);
        assert_eq!(grid.duct_half_width(), 0);
        assert_eq!(grid.free_cell_count(), 21 * 21 * 13);
    }

    #[test]
    fn test_shape_floors_partial_cells() {
        let config = config(1.0).with_cell_size(3.0);
        let grid = RoutingGrid::new(&building(), &config).unwrap();
        // floor(20 / 3) + 1 = 7; floor(12 / 3) + 1 = 5
        assert_eq!(grid.shape(), [7, 7, 5]);
    }

    #[test]
    fn test_ceiling_mask_is_strict_interior() {
        let grid = RoutingGrid::new(&building(), &config(1.0)).unwrap();
        let mask = grid.ceiling_mask();
        assert_eq!(mask.shape(), (21, 21));
        assert_eq!(mask.count(), 19 * 19);
        assert!(!mask.get(0, 10));
        assert!(!mask.get(20, 20));
        assert!(mask.get(1, 1));
        assert!(mask.get(10, 10));
    }

    #[test]
    fn test_ceiling_mask_spans_slab_seam() {
        // A 10 x 10 slab meets half of a 20 x 10 slab's top edge at y = 10.
        let quad = |x0: f64, y0: f64, x1: f64, y1: f64| {
            IndexedMesh::from_parts(
                vec![
                    Point3::new(x0, y0, 10.0),
                    Point3::new(x1, y0, 10.0),
                    Point3::new(x1, y1, 10.0),
                    Point3::new(x0, y1, 10.0),
                ],
                vec![[0, 1, 2], [0, 2, 3]],
            )
        };
        let mut ceiling = quad(0.0, 0.0, 20.0, 10.0);
        ceiling.merge(&quad(0.0, 10.0, 10.0, 20.0));
        let grid = RoutingGrid::new(&BuildingModel::new(ceiling, Vec::new()), &config(1.0)).unwrap();

        let mask = grid.ceiling_mask();
        assert!((1..10).all(|x| mask.get(x, 10)));
        assert!(!mask.get(10, 10));
        assert!(!mask.get(15, 10));
        assert!(mask.get(5, 15));
    }

    #[test]
    fn test_ceiling_mask_erodes_by_half_width() {
        let grid = RoutingGrid::new(&building(), &config(4.0)).unwrap();
        assert_eq!(grid.duct_half_width(), 2);
        assert_eq!(grid.ceiling_mask().count(), 15 * 15);
        assert!(!grid.ceiling_mask().get(2, 10));
        assert!(grid.ceiling_mask().get(3, 10));
    }

    #[test]
    fn test_obstacle_box_registered() {
        let grid = RoutingGrid::new(&building(), &config(1.0)).unwrap();
        assert_eq!(
            grid.obstacle_boxes(),
            &[GridBounds {
                min: VoxelCoord::new(3, 3, 0),
                max: VoxelCoord::new(12, 12, 12),
            }]
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = RoutingGrid::new(&building(), &config(1.0).with_cell_size(0.0)).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_loaded_slab_without_obstacles() {
        let json = r#"[{
            "Category": "Floors",
            "Coords": [0,0,0, 20,0,0, 20,20,0, 0,20,0, 0,0,10, 20,0,10, 20,20,10, 0,20,10],
            "Indices": [0,2,1, 0,3,2, 4,5,6, 4,6,7]
        }]"#;
        let slab = BuildingModel::from_json_str(json).unwrap();
        let grid = RoutingGrid::new(&slab, &config(1.0).with_routing_offset(0.0)).unwrap();
        assert_eq!(grid.grid_min(), Point3::origin());
        assert_eq!(grid.shape(), [21, 21, 11]);
        assert!(grid.obstacle_boxes().is_empty());
        assert_eq!(grid.ceiling_mask().count(), 19 * 19);
    }

    #[test]
    fn test_offset_beyond_headroom() {
        let ceiling_only = BuildingModel::new(square_ceiling(20.0, 10.0), Vec::new());
        let err = RoutingGrid::new(&ceiling_only, &config(1.0).with_routing_offset(0.0))
            .unwrap_err();
        assert!(matches!(err, RoutingError::Building(_)));
    }

    #[test]
    fn test_from_parts_rejects_bad_input() {
        let err = RoutingGrid::from_parts(Point3::origin(), -1.0, [2, 2, 2]).unwrap_err();
        assert!(err.is_config_error());
        let err = RoutingGrid::from_parts(Point3::origin(), 1.0, [0, 2, 2]).unwrap_err();
        assert!(matches!(err, RoutingError::Spatial(_)));
    }

    #[test]
    fn test_with_ceiling_mask_checks_shape() {
        let grid = RoutingGrid::from_parts(Point3::origin(), 1.0, [4, 3, 2]).unwrap();
        let err = grid.clone().with_ceiling_mask(Mask2::new(3, 4)).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::Spatial(SpatialError::MaskShapeMismatch {
                expected: (4, 3),
                actual: (3, 4),
            })
        ));
        let grid = grid.with_ceiling_mask(Mask2::new(4, 3)).unwrap();
        assert_eq!(grid.ceiling_mask().count(), 0);
    }

    #[test]
    fn test_index_world_round_trip() {
        let grid =
            RoutingGrid::from_parts(Point3::new(-5.0, 2.0, 1.0), 0.5, [10, 10, 10]).unwrap();
        let coord = VoxelCoord::new(3, 7, 2);
        let world = grid.index_to_world(coord);
        assert_relative_eq!(world.x, -3.5);
        assert_relative_eq!(world.y, 5.5);
        assert_relative_eq!(world.z, 2.0);
        assert_eq!(grid.world_to_index(world), coord);
    }

    #[test]
    fn test_world_to_index_rounds_half_to_even() {
        let grid = RoutingGrid::from_parts(Point3::origin(), 1.0, [5, 5, 5]).unwrap();
        assert_eq!(
            grid.world_to_index(Point3::new(0.5, 1.5, 2.5)),
            VoxelCoord::new(0, 2, 2)
        );
        assert_eq!(
            grid.world_to_index(Point3::new(-0.6, 3.49, 3.51)),
            VoxelCoord::new(-1, 3, 4)
        );
    }

    #[test]
    fn test_non_finite_points_snap_outside() {
        let grid = RoutingGrid::from_parts(Point3::origin(), 1.0, [5, 5, 5]).unwrap();
        let coord = grid.world_to_index(Point3::new(f64::NAN, 0.0, f64::INFINITY));
        assert!(grid.cell(coord).is_none());
        assert!(!grid.is_free(coord));
    }
}
