//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// This is a utility type for geometric calculations. It stores the actual
/// vertex positions rather than indices.
///
/// Besides the usual 3D quantities it offers queries on the triangle's
/// projection onto the XY plane, which is how ceiling footprints are
/// evaluated.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// // Area of a right triangle with legs 1 and 1
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// assert!(tri.contains_xy(0.25, 0.25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from coordinate arrays.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Triangle;
    ///
    /// let tri = Triangle::from_arrays(
    ///     [0.0, 0.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    /// );
    /// assert_eq!(tri.v1.x, 1.0);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_arrays(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> Self {
        Self {
            v0: Point3::new(v0[0], v0[1], v0[2]),
            v1: Point3::new(v1[0], v1[1], v1[2]),
            v2: Point3::new(v2[0], v2[1], v2[2]),
        }
    }

    /// Compute the (unnormalized) face normal via cross product.
    ///
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the triangle's 3D area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Get the three edges as `(start, end)` pairs, in winding order.
    #[inline]
    #[must_use]
    pub const fn edges(&self) -> [(Point3<f64>, Point3<f64>); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// Get the vertices as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Signed area of the projection onto the XY plane.
    ///
    /// Positive for counter-clockwise winding seen from +Z.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Triangle;
    ///
    /// let ccw = Triangle::from_arrays([0.0, 0.0, 5.0], [2.0, 0.0, 5.0], [0.0, 2.0, 5.0]);
    /// assert_eq!(ccw.signed_area_xy(), 2.0);
    ///
    /// let wall = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 3.0]);
    /// assert_eq!(wall.signed_area_xy(), 0.0);
    /// ```
    #[must_use]
    pub fn signed_area_xy(&self) -> f64 {
        0.5 * orient_xy(
            (self.v0.x, self.v0.y),
            (self.v1.x, self.v1.y),
            (self.v2.x, self.v2.y),
        )
    }

    /// Returns `true` if the XY projection has zero (or non-finite) area.
    ///
    /// Vertical faces and collapsed triangles project to a segment or point
    /// and contribute nothing to a footprint.
    #[must_use]
    pub fn is_degenerate_xy(&self) -> bool {
        let area = self.signed_area_xy();
        !area.is_finite() || area == 0.0
    }

    /// Closed containment test of `(x, y)` against the XY projection.
    ///
    /// Points on the projected edges and vertices count as inside. Degenerate
    /// projections contain nothing.
    #[must_use]
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        if self.is_degenerate_xy() {
            return false;
        }
        let p = (x, y);
        let a = (self.v0.x, self.v0.y);
        let b = (self.v1.x, self.v1.y);
        let c = (self.v2.x, self.v2.y);
        let d0 = orient_xy(a, b, p);
        let d1 = orient_xy(b, c, p);
        let d2 = orient_xy(c, a, p);
        let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
        let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
        !(has_neg && has_pos)
    }

    /// XY-only bounds of the projection as `(min_x, min_y, max_x, max_y)`.
    #[must_use]
    pub fn bounds_xy(&self) -> (f64, f64, f64, f64) {
        let xs = [self.v0.x, self.v1.x, self.v2.x];
        let ys = [self.v0.y, self.v1.y, self.v2.y];
        (
            xs.iter().copied().fold(f64::INFINITY, f64::min),
            ys.iter().copied().fold(f64::INFINITY, f64::min),
            xs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            ys.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        )
    }
}

/// Twice the signed area of the XY triangle `(a, b, c)`.
///
/// Positive when `c` lies to the left of the directed line `a → b`.
#[inline]
#[must_use]
pub fn orient_xy(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

/// Returns `true` if `p` lies on the closed XY segment `a..b`.
///
/// # Example
///
/// ```
/// use mesh_types::point_on_segment_xy;
///
/// assert!(point_on_segment_xy((0.0, 0.0), (4.0, 4.0), (2.0, 2.0)));
/// assert!(point_on_segment_xy((0.0, 0.0), (4.0, 4.0), (4.0, 4.0)));
/// assert!(!point_on_segment_xy((0.0, 0.0), (4.0, 4.0), (5.0, 5.0)));
/// assert!(!point_on_segment_xy((0.0, 0.0), (4.0, 4.0), (2.0, 1.0)));
/// ```
#[must_use]
pub fn point_on_segment_xy(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> bool {
    orient_xy(a, b, p) == 0.0
        && p.0 >= a.0.min(b.0)
        && p.0 <= a.0.max(b.0)
        && p.1 >= a.1.min(b.1)
        && p.1 <= a.1.max(b.1)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_right() -> Triangle {
        Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])
    }

    #[test]
    fn test_area() {
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 4.0, 0.0]);
        assert_relative_eq!(tri.area(), 6.0);
    }

    #[test]
    fn test_signed_area_follows_winding() {
        let tri = unit_right();
        let flipped = Triangle::new(tri.v0, tri.v2, tri.v1);
        assert_relative_eq!(tri.signed_area_xy(), 0.5);
        assert_relative_eq!(flipped.signed_area_xy(), -0.5);
    }

    #[test]
    fn test_contains_xy_either_winding() {
        let tri = unit_right();
        let flipped = Triangle::new(tri.v0, tri.v2, tri.v1);
        for t in [tri, flipped] {
            assert!(t.contains_xy(0.2, 0.2));
            assert!(t.contains_xy(0.5, 0.0));
            assert!(t.contains_xy(0.0, 0.0));
            assert!(!t.contains_xy(0.6, 0.6));
            assert!(!t.contains_xy(-0.1, 0.5));
        }
    }

    #[test]
    fn test_degenerate_contains_nothing() {
        let wall = Triangle::from_arrays([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 0.0, 5.0]);
        assert!(wall.is_degenerate_xy());
        assert!(!wall.contains_xy(1.0, 0.0));
    }

    #[test]
    fn test_nan_vertex_is_degenerate() {
        let tri = Triangle::from_arrays([f64::NAN, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(tri.is_degenerate_xy());
    }

    #[test]
    fn test_bounds_xy() {
        let tri = Triangle::from_arrays([3.0, -1.0, 0.0], [1.0, 4.0, 9.0], [2.0, 0.0, 0.0]);
        assert_eq!(tri.bounds_xy(), (1.0, -1.0, 3.0, 4.0));
    }

    #[test]
    fn test_edges_wrap_around() {
        let tri = unit_right();
        let edges = tri.edges();
        assert_eq!(edges[2].0, tri.v2);
        assert_eq!(edges[2].1, tri.v0);
    }
}
