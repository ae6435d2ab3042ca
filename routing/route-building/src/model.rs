//! The building model: one ceiling surface plus obstacle solids.

use mesh_types::{Aabb, IndexedMesh, MeshBounds};
use nalgebra::Point2;

use crate::error::{BuildingError, BuildingResult};

/// A ceiling surface and the obstacle solids beneath it.
///
/// The model is immutable once built. It supplies the horizontal and
/// vertical extents the routing grid is sized from.
///
/// # Example
///
/// ```
/// use route_building::BuildingModel;
/// use mesh_types::{box_mesh, IndexedMesh, Point3};
///
/// let ceiling = IndexedMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 10.0),
///         Point3::new(20.0, 0.0, 10.0),
///         Point3::new(20.0, 20.0, 10.0),
///         Point3::new(0.0, 20.0, 10.0),
///     ],
///     vec![[0, 1, 2], [0, 2, 3]],
/// );
/// let obstacle = box_mesh(Point3::new(5.0, 5.0, 0.0), Point3::new(10.0, 10.0, 5.0));
///
/// let model = BuildingModel::new(ceiling, vec![obstacle]);
/// assert_eq!(model.bounds_z(2.0).unwrap(), (-2.0, 10.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingModel {
    ceiling: IndexedMesh,
    obstacles: Vec<IndexedMesh>,
}

impl BuildingModel {
    /// Creates a model from in-memory meshes.
    ///
    /// Meshes are not validated here; empty meshes are reported by the bounds
    /// queries.
    #[must_use]
    pub const fn new(ceiling: IndexedMesh, obstacles: Vec<IndexedMesh>) -> Self {
        Self { ceiling, obstacles }
    }

    /// Returns the ceiling surface.
    #[must_use]
    pub const fn ceiling(&self) -> &IndexedMesh {
        &self.ceiling
    }

    /// Returns the obstacle solids.
    #[must_use]
    pub fn obstacles(&self) -> &[IndexedMesh] {
        &self.obstacles
    }

    /// Returns the highest ceiling vertex Z, or `None` for an empty ceiling.
    #[must_use]
    pub fn ceiling_max_z(&self) -> Option<f64> {
        self.ceiling.bounds_opt().map(|b| b.max.z)
    }

    /// Horizontal extent of the ceiling and all obstacles as `(min, max)`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildingError::EmptyMesh`] if the ceiling or any obstacle has
    /// no vertices.
    pub fn bounds_xy(&self) -> BuildingResult<(Point2<f64>, Point2<f64>)> {
        let bounds = self.vertex_bounds()?;
        Ok((
            Point2::new(bounds.min.x, bounds.min.y),
            Point2::new(bounds.max.x, bounds.max.y),
        ))
    }

    /// Vertical extent available for routing as `(min_z, max_z)`.
    ///
    /// `min_z` is the lowest vertex of any mesh lowered by `offset`; `max_z`
    /// is the highest ceiling vertex.
    ///
    /// # Errors
    ///
    /// Returns [`BuildingError::EmptyMesh`] if any mesh has no vertices, and
    /// [`BuildingError::InvalidZBounds`] if `min_z >= max_z`, which happens
    /// when the offset consumes all headroom below the ceiling.
    pub fn bounds_z(&self, offset: f64) -> BuildingResult<(f64, f64)> {
        let bounds = self.vertex_bounds()?;
        let min_z = bounds.min.z - offset;
        let max_z = self.ceiling.bounds().max.z;
        if min_z >= max_z {
            return Err(BuildingError::InvalidZBounds { min_z, max_z });
        }
        Ok((min_z, max_z))
    }

    fn vertex_bounds(&self) -> BuildingResult<Aabb> {
        let mut bounds = self
            .ceiling
            .bounds_opt()
            .ok_or_else(|| BuildingError::empty_mesh("ceiling"))?;
        for (i, obstacle) in self.obstacles.iter().enumerate() {
            let b = obstacle
                .bounds_opt()
                .ok_or_else(|| BuildingError::empty_mesh(format!("obstacle {i}")))?;
            bounds = bounds.union(&b);
        }
        Ok(bounds)
    }
}
