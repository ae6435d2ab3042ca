//! Property-based tests for duct box generation.
//!
//! Paths are random axis-aligned polylines sampled at unit spacing, the way
//! the path finder emits them.

#![allow(clippy::unwrap_used)]

use nalgebra::{Point3, Vector3};
use proptest::prelude::*;
use route_duct::generate_cable_boxes;

/// A run: axis index, signed length in steps (never zero).
fn arb_runs() -> impl Strategy<Value = Vec<(usize, i32)>> {
    prop::collection::vec((0..3usize, prop_oneof![-6..=-1i32, 1..=6i32]), 1..8).prop_map(
        |mut runs| {
            // Consecutive runs must change axis to count as separate runs.
            for k in 1..runs.len() {
                if runs[k].0 == runs[k - 1].0 {
                    runs[k].0 = (runs[k].0 + 1) % 3;
                }
            }
            runs
        },
    )
}

fn sample(runs: &[(usize, i32)], step: f64) -> Vec<Point3<f64>> {
    let mut p = Point3::origin();
    let mut points = vec![p];
    for &(axis, len) in runs {
        let mut dir = Vector3::zeros();
        dir[axis] = f64::from(len.signum()) * step;
        for _ in 0..len.abs() {
            p += dir;
            points.push(p);
        }
    }
    points
}

proptest! {
    #[test]
    fn proptest_one_box_per_run_and_corner_per_turn(
        runs in arb_runs(),
        step in 0.5..20.0f64,
        width in 0.1..10.0f64,
    ) {
        let boxes = generate_cable_boxes(&sample(&runs, step), width, 5.0);
        let corners = boxes.iter().filter(|b| b.is_corner()).count();
        prop_assert_eq!(boxes.len() - corners, runs.len());
        prop_assert_eq!(corners, runs.len() - 1);
    }

    #[test]
    fn proptest_segment_lengths_cover_path(
        runs in arb_runs(),
        step in 0.5..20.0f64,
    ) {
        // A cross-section thinner than any run keeps the run axis the longest extent.
        let boxes = generate_cable_boxes(&sample(&runs, step), 1e-3, 1e-3);
        let total: f64 = boxes
            .iter()
            .filter(|b| !b.is_corner())
            .map(|b| b.x_length.max(b.y_length).max(b.z_length))
            .sum();
        let expected: f64 = runs.iter().map(|&(_, len)| f64::from(len.abs()) * step).sum();
        prop_assert!((total - expected).abs() < 1e-6 * expected);
    }

    #[test]
    fn proptest_corners_sit_on_path(runs in arb_runs()) {
        let points = sample(&runs, 1.0);
        let boxes = generate_cable_boxes(&points, 0.5, 0.5);
        for corner in boxes.iter().filter(|b| b.is_corner()) {
            prop_assert!(points.contains(&corner.center));
        }
    }
}
