//! Property tests for the obstacle marking passes.

#![allow(clippy::unwrap_used)]

use cf_spatial::{GridBounds, VoxelCoord};
use mesh_types::{Point3, box_mesh};
use proptest::prelude::*;
use route_grid::{Cell, RoutingGrid};

const SHAPE: [usize; 3] = [16, 16, 8];

fn obstacle() -> impl Strategy<Value = (Point3<f64>, Point3<f64>)> {
    (0.0..15.0f64, 0.0..15.0f64, 0.0..6.0f64, 0.5..6.0f64, 0.5..6.0f64, 0.5..3.0f64).prop_map(
        |(x, y, z, dx, dy, dz)| (Point3::new(x, y, z), Point3::new(x + dx, y + dy, z + dz)),
    )
}

fn marked(min: Point3<f64>, max: Point3<f64>, offset: u32, half_width: u32) -> (RoutingGrid, GridBounds, GridBounds) {
    let mut grid = RoutingGrid::from_parts(Point3::origin(), 1.0, SHAPE)
        .unwrap()
        .with_clearance(offset, half_width);
    let expanded = grid.add_obstacle(&box_mesh(min, max)).unwrap();
    let clipped = grid.clip(&expanded).unwrap();
    grid.mark_obstacles();
    (grid, expanded, clipped)
}

proptest! {
    #[test]
    fn interior_above_base_is_free(
        (min, max) in obstacle(),
        offset in 0u32..3,
        half_width in 0u32..3,
    ) {
        let (grid, _, clipped) = marked(min, max, offset, half_width);
        for coord in GridBounds::new(VoxelCoord::origin(), VoxelCoord::new(15, 15, 7)) {
            let interior = coord.x > clipped.min.x
                && coord.x < clipped.max.x
                && coord.y > clipped.min.y
                && coord.y < clipped.max.y
                && coord.z > clipped.min.z;
            if interior {
                prop_assert_eq!(grid.cell(coord), Some(Cell::Free));
            }
        }
    }

    #[test]
    fn nothing_blocked_outside_clipped_box(
        (min, max) in obstacle(),
        offset in 0u32..3,
        half_width in 0u32..3,
    ) {
        let (grid, _, clipped) = marked(min, max, offset, half_width);
        for (coord, cell) in grid.obstacle_mask().iter() {
            if !clipped.contains(coord) {
                prop_assert_eq!(*cell, Cell::Free);
            }
        }
    }

    #[test]
    fn sides_clear_of_the_edge_are_fenced(
        (min, max) in obstacle(),
        offset in 0u32..3,
    ) {
        let (grid, expanded, clipped) = marked(min, max, offset, 0);
        let off = i32::try_from(offset).unwrap();
        let top = 7;
        for z in clipped.min.z..=top {
            for y in clipped.min.y..=clipped.max.y {
                if expanded.min.x - off >= 0 {
                    prop_assert_eq!(grid.cell(VoxelCoord::new(clipped.min.x, y, z)), Some(Cell::Blocked));
                }
                if expanded.max.x + off <= 15 {
                    prop_assert_eq!(grid.cell(VoxelCoord::new(clipped.max.x, y, z)), Some(Cell::Blocked));
                }
            }
        }
        for x in clipped.min.x..=clipped.max.x {
            for y in clipped.min.y..=clipped.max.y {
                prop_assert_eq!(
                    grid.cell(VoxelCoord::new(x, y, clipped.min.z)),
                    Some(Cell::Blocked)
                );
            }
        }
    }
}
