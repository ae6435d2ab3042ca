//! Duct box generation along a routed path.
//!
//! A path is split into straight runs; each run becomes one segment box and
//! each change of axis between runs gets a corner cube.

use nalgebra::{Point3, Vector3};
use route_types::DuctBox;
use tracing::debug;

/// Cross-product magnitude below which three points count as collinear.
pub const COLLINEAR_TOLERANCE: f64 = 1e-6;

/// Coordinate axis a straight run extends along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// World X.
    X,
    /// World Y.
    Y,
    /// World Z.
    Z,
}

/// Axis with the largest absolute component of `span`, or `None` for a zero
/// span. Ties prefer X, then Y.
#[must_use]
pub fn run_axis(span: &Vector3<f64>) -> Option<Axis> {
    let (ax, ay, az) = (span.x.abs(), span.y.abs(), span.z.abs());
    if ax == 0.0 && ay == 0.0 && az == 0.0 {
        None
    } else if ax >= ay && ax >= az {
        Some(Axis::X)
    } else if ay >= az {
        Some(Axis::Y)
    } else {
        Some(Axis::Z)
    }
}

/// Converts a path into duct boxes.
///
/// Starting at point `i`, the run end `j` advances while `p[i]`, `p[j]` and
/// `p[j + 1]` are collinear (see [`COLLINEAR_TOLERANCE`]). Each run becomes
/// one [`DuctBox`] centred on the run midpoint:
///
/// | Run axis | `x_length` | `y_length` | `z_length` |
/// |----------|------------|------------|------------|
/// | X        | length     | `width`    | `height`   |
/// | Y        | `width`    | length     | `height`   |
/// | Z        | `height`   | `width`    | length     |
///
/// When the following segment runs along a different axis, a cube of side
/// `width` is added at the joint. Runs of zero length produce nothing, and
/// paths with fewer than two points produce no boxes.
#[must_use]
pub fn generate_cable_boxes(points: &[Point3<f64>], width: f64, height: f64) -> Vec<DuctBox> {
    let mut boxes = Vec::new();
    if points.len() < 2 {
        return boxes;
    }

    let last = points.len() - 1;
    let mut i = 0;
    while i < last {
        let mut j = i + 1;
        while j < last && collinear(&points[i], &points[j], &points[j + 1]) {
            j += 1;
        }

        let (start, end) = (points[i], points[j]);
        let span = end - start;
        if let Some(axis) = run_axis(&span) {
            let length = span.amax();
            let center = nalgebra::center(&start, &end);
            boxes.push(match axis {
                Axis::X => DuctBox::segment(center, length, width, height),
                Axis::Y => DuctBox::segment(center, width, length, height),
                Axis::Z => DuctBox::segment(center, height, width, length),
            });

            if j < last {
                let next = run_axis(&(points[j + 1] - end));
                if next.is_some_and(|n| n != axis) {
                    boxes.push(DuctBox::corner(end, width));
                }
            }
        }
        i = j;
    }

    debug!(
        points = points.len(),
        boxes = boxes.len(),
        corners = boxes.iter().filter(|b| b.is_corner()).count(),
        "Generated duct boxes"
    );
    boxes
}

fn collinear(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> bool {
    (p1 - p0).cross(&(p2 - p1)).norm() < COLLINEAR_TOLERANCE
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use route_types::DuctKind;

    fn pts(coords: &[[f64; 3]]) -> Vec<Point3<f64>> {
        coords.iter().map(|&c| Point3::from(c)).collect()
    }

    #[test]
    fn test_straight_path_single_box() {
        let path = pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        let boxes = generate_cable_boxes(&path, 3.0, 5.0);
        assert_eq!(boxes.len(), 1);
        let b = boxes[0];
        assert_eq!(b.kind, DuctKind::Segment);
        assert_eq!(b.center, Point3::new(1.0, 0.0, 0.0));
        assert_eq!((b.x_length, b.y_length, b.z_length), (2.0, 3.0, 5.0));
    }

    #[test]
    fn test_l_shape_has_corner() {
        let path = pts(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 1.0, 0.0],
            [2.0, 2.0, 0.0],
        ]);
        let boxes = generate_cable_boxes(&path, 0.5, 0.25);
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].center, Point3::new(1.0, 0.0, 0.0));
        assert!(boxes[1].is_corner());
        assert_eq!(boxes[1].center, Point3::new(2.0, 0.0, 0.0));
        assert_eq!(boxes[1].z_length, 0.5);
        assert_eq!(boxes[2].center, Point3::new(2.0, 1.0, 0.0));
        assert_eq!(
            (boxes[2].x_length, boxes[2].y_length, boxes[2].z_length),
            (0.5, 2.0, 0.25)
        );
    }

    #[test]
    fn test_vertical_run_extents() {
        let path = pts(&[[0.0, 0.0, 10.0], [0.0, 0.0, 8.0], [0.0, 0.0, 6.0]]);
        let boxes = generate_cable_boxes(&path, 4.0, 1.0);
        assert_eq!(boxes.len(), 1);
        assert_eq!(
            (boxes[0].x_length, boxes[0].y_length, boxes[0].z_length),
            (1.0, 4.0, 4.0)
        );
        assert_eq!(boxes[0].center, Point3::new(0.0, 0.0, 8.0));
    }

    #[test]
    fn test_corner_between_horizontal_and_vertical() {
        let path = pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0]]);
        let boxes = generate_cable_boxes(&path, 0.2, 0.1);
        let corners = boxes.iter().filter(|b| b.is_corner()).count();
        assert_eq!(boxes.len(), 3);
        assert_eq!(corners, 1);
    }

    #[test]
    fn test_staircase() {
        // X, Y, X, Y: four runs and three joints.
        let path = pts(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [2.0, 1.0, 0.0],
            [2.0, 2.0, 0.0],
        ]);
        let boxes = generate_cable_boxes(&path, 0.1, 0.1);
        assert_eq!(boxes.len(), 7);
        let kinds: Vec<_> = boxes.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            [
                DuctKind::Segment,
                DuctKind::Corner,
                DuctKind::Segment,
                DuctKind::Corner,
                DuctKind::Segment,
                DuctKind::Corner,
                DuctKind::Segment,
            ]
        );
    }

    #[test]
    fn test_short_paths() {
        assert!(generate_cable_boxes(&[], 1.0, 1.0).is_empty());
        assert!(generate_cable_boxes(&pts(&[[1.0, 2.0, 3.0]]), 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_duplicate_points_skipped() {
        let path = pts(&[[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        assert!(generate_cable_boxes(&path, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_segment_volume_matches_extents() {
        let path = pts(&[[0.0, 0.0, 0.0], [0.0, 7.5, 0.0]]);
        let boxes = generate_cable_boxes(&path, 2.0, 5.0);
        assert_relative_eq!(boxes[0].volume(), 2.0 * 7.5 * 5.0);
        assert_eq!(boxes[0].min_corner(), Point3::new(-1.0, 0.0, -2.5));
    }

    #[test]
    fn test_run_axis() {
        assert_eq!(run_axis(&Vector3::new(0.0, -3.0, 0.0)), Some(Axis::Y));
        assert_eq!(run_axis(&Vector3::new(0.0, 0.0, 2.0)), Some(Axis::Z));
        assert_eq!(run_axis(&Vector3::new(1.0, 1.0, 0.0)), Some(Axis::X));
        assert_eq!(run_axis(&Vector3::zeros()), None);
    }
}
