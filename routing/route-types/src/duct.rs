//! Duct boxes produced from a routed path.

use nalgebra::{Point3, Vector3};

/// What a [`DuctBox`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DuctKind {
    /// A straight run along one axis.
    Segment,
    /// A cube filling the joint where the run changes direction.
    Corner,
}

/// An axis-aligned duct box: center plus full extents along X, Y and Z.
///
/// # Example
///
/// ```
/// use route_types::{DuctBox, DuctKind};
/// use nalgebra::Point3;
///
/// let corner = DuctBox::corner(Point3::new(10.0, 0.0, 0.0), 4.0);
/// assert_eq!(corner.kind, DuctKind::Corner);
/// assert_eq!(corner.min_corner(), Point3::new(8.0, -2.0, -2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuctBox {
    /// Box center in world coordinates.
    pub center: Point3<f64>,
    /// Full extent along X.
    pub x_length: f64,
    /// Full extent along Y.
    pub y_length: f64,
    /// Full extent along Z.
    pub z_length: f64,
    /// Straight run or corner filler.
    pub kind: DuctKind,
}

impl DuctBox {
    /// Creates a straight run box.
    #[must_use]
    pub const fn segment(center: Point3<f64>, x_length: f64, y_length: f64, z_length: f64) -> Self {
        Self {
            center,
            x_length,
            y_length,
            z_length,
            kind: DuctKind::Segment,
        }
    }

    /// Creates a cube corner box with every extent equal to `width`.
    #[must_use]
    pub const fn corner(center: Point3<f64>, width: f64) -> Self {
        Self {
            center,
            x_length: width,
            y_length: width,
            z_length: width,
            kind: DuctKind::Corner,
        }
    }

    /// Returns the extents as a vector.
    #[must_use]
    pub fn extents(&self) -> Vector3<f64> {
        Vector3::new(self.x_length, self.y_length, self.z_length)
    }

    /// Returns `true` for corner boxes.
    #[must_use]
    pub const fn is_corner(&self) -> bool {
        matches!(self.kind, DuctKind::Corner)
    }

    /// Minimum corner of the box.
    #[must_use]
    pub fn min_corner(&self) -> Point3<f64> {
        self.center - self.extents() * 0.5
    }

    /// Maximum corner of the box.
    #[must_use]
    pub fn max_corner(&self) -> Point3<f64> {
        self.center + self.extents() * 0.5
    }

    /// Box volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.x_length * self.y_length * self.z_length
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_bounds() {
        let b = DuctBox::segment(Point3::new(5.0, 0.0, 10.0), 10.0, 2.0, 1.0);
        assert!(!b.is_corner());
        assert_eq!(b.min_corner(), Point3::new(0.0, -1.0, 9.5));
        assert_eq!(b.max_corner(), Point3::new(10.0, 1.0, 10.5));
        assert_eq!(b.volume(), 20.0);
    }

    #[test]
    fn test_corner_is_cube() {
        let b = DuctBox::corner(Point3::origin(), 3.0);
        assert!(b.is_corner());
        assert_eq!(b.extents(), Vector3::new(3.0, 3.0, 3.0));
    }
}
