//! Routed paths.
//!
//! A [`RoutePath`] is the output of the path finder: the ordered lattice
//! cells from source to target together with their world-space positions.
//!
//! # Example
//!
//! ```
//! use route_types::RoutePath;
//! use cf_spatial::VoxelCoord;
//! use nalgebra::Point3;
//!
//! let path = RoutePath::from_cells(
//!     vec![
//!         VoxelCoord::new(0, 0, 0),
//!         VoxelCoord::new(1, 0, 0),
//!         VoxelCoord::new(1, 1, 0),
//!     ],
//!     Point3::new(100.0, 0.0, 0.0),
//!     10.0,
//! );
//!
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.points()[2], Point3::new(110.0, 10.0, 0.0));
//! assert!((path.length() - 20.0).abs() < 1e-10);
//! ```

use cf_spatial::VoxelCoord;
use nalgebra::Point3;

/// An ordered lattice path with world-space positions.
///
/// `cells[i]` and `points[i]` describe the same node; the world position is
/// `origin + cell * step`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePath {
    /// Lattice cells from source to target.
    cells: Vec<VoxelCoord>,
    /// World positions of `cells`.
    points: Vec<Point3<f64>>,
    /// Cached path length in world units.
    length: f64,
}

impl RoutePath {
    /// Builds a path from lattice cells and the lattice placement.
    #[must_use]
    pub fn from_cells(cells: Vec<VoxelCoord>, origin: Point3<f64>, step: f64) -> Self {
        let points: Vec<_> = cells
            .iter()
            .map(|cell| origin + cell.to_vector() * step)
            .collect();
        let length = Self::compute_length(&points);
        Self {
            cells,
            points,
            length,
        }
    }

    /// Creates an empty path.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: Vec::new(),
            points: Vec::new(),
            length: 0.0,
        }
    }

    /// Returns the number of nodes in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the path has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the total length in world units.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Returns the number of unit moves, i.e. `len() - 1` for a non-empty path.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Returns the lattice cells.
    #[must_use]
    pub fn cells(&self) -> &[VoxelCoord] {
        &self.cells
    }

    /// Returns the world-space points.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Returns the first world point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    /// Returns the last world point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }

    /// Returns `true` if every consecutive pair of cells shares a face.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::RoutePath;
    /// use cf_spatial::VoxelCoord;
    /// use nalgebra::Point3;
    ///
    /// let stepped = RoutePath::from_cells(
    ///     vec![VoxelCoord::new(0, 0, 0), VoxelCoord::new(0, 0, 1)],
    ///     Point3::origin(),
    ///     1.0,
    /// );
    /// assert!(stepped.is_face_connected());
    ///
    /// let jump = RoutePath::from_cells(
    ///     vec![VoxelCoord::new(0, 0, 0), VoxelCoord::new(1, 1, 0)],
    ///     Point3::origin(),
    ///     1.0,
    /// );
    /// assert!(!jump.is_face_connected());
    /// ```
    #[must_use]
    pub fn is_face_connected(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].is_face_adjacent(w[1]))
    }

    /// Consumes the path, returning its world-space points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }

    fn compute_length(points: &[Point3<f64>]) -> f64 {
        points
            .windows(2)
            .map(|w| nalgebra::distance(&w[0], &w[1]))
            .sum()
    }
}

impl Default for RoutePath {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a RoutePath {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
