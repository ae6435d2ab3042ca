//! Ceiling and obstacle marking passes.

use cf_spatial::{GridBounds, VoxelCoord};
use mesh_types::{IndexedMesh, MeshBounds};
use nalgebra::Point3;
use tracing::debug;

use crate::grid::{Cell, RoutingGrid};

impl RoutingGrid {
    /// Blocks the top layer wherever the ceiling mask is `false`.
    ///
    /// Columns inside the mask keep their current state.
    pub fn mark_ceiling(&mut self) {
        let top = to_i32(self.nz());
        let [nx, ny, _] = self.shape();
        let mut blocked = 0usize;
        for x in 0..nx {
            for y in 0..ny {
                let (xi, yi) = (to_i32(x), to_i32(y));
                if self.ceiling_mask().get(i64::from(xi), i64::from(yi)) {
                    continue;
                }
                if let Some(cell) = self.obstacle_mask_mut().get_mut(VoxelCoord::new(xi, yi, top)) {
                    *cell = Cell::Blocked;
                    blocked += 1;
                }
            }
        }
        debug!(blocked, layer = top, "Marked ceiling edge");
    }

    /// Surrounds every registered obstacle with a clearance shell.
    ///
    /// Runs two sweeps. The fence sweep blocks, for each obstacle, the side
    /// planes of its expanded box from the base layer to the top plus the
    /// box footprint at the base layer. A side is skipped unless it stays
    /// inside the lattice when pushed out by a further `offset_cells`, so
    /// obstacles near the lattice edge are left open towards it. The reopen sweep then frees the strict interior of every
    /// clipped box above the base layer. Because reopening follows all
    /// fencing, a shell is reopened where it falls inside another obstacle's
    /// box.
    pub fn mark_obstacles(&mut self) {
        let boxes = self.obstacle_boxes.clone();
        let top = to_i32(self.nz());
        let (max_x, max_y) = (to_i32(self.nx()), to_i32(self.ny()));
        let off = i32::try_from(self.offset_cells()).unwrap_or(i32::MAX);

        let mut fenced = 0usize;
        for expanded in &boxes {
            let Some(clipped) = self.clip(expanded) else {
                continue;
            };
            let (lo, hi) = (clipped.min, clipped.max);
            let mut planes = Vec::with_capacity(5);
            if expanded.min.x.saturating_sub(off) >= 0 {
                planes.push(span([lo.x, lo.y, lo.z], [lo.x, hi.y, top]));
            }
            if expanded.max.x.saturating_add(off) <= max_x {
                planes.push(span([hi.x, lo.y, lo.z], [hi.x, hi.y, top]));
            }
            if expanded.min.y.saturating_sub(off) >= 0 {
                planes.push(span([lo.x, lo.y, lo.z], [hi.x, lo.y, top]));
            }
            if expanded.max.y.saturating_add(off) <= max_y {
                planes.push(span([lo.x, hi.y, lo.z], [hi.x, hi.y, top]));
            }
            planes.push(span([lo.x, lo.y, lo.z], [hi.x, hi.y, lo.z]));

            for plane in planes.iter().flatten() {
                fenced += self.obstacle_mask_mut().fill_bounds(plane, Cell::Blocked);
            }
        }

        let mut reopened = 0usize;
        for expanded in &boxes {
            let Some(clipped) = self.clip(expanded) else {
                continue;
            };
            let (lo, hi) = (clipped.min, clipped.max);
            if let Some(interior) = span([lo.x + 1, lo.y + 1, lo.z + 1], [hi.x - 1, hi.y - 1, top]) {
                reopened += self.obstacle_mask_mut().fill_bounds(&interior, Cell::Free);
            }
        }

        debug!(
            obstacles = boxes.len(),
            fenced,
            reopened,
            "Marked obstacle clearance shells"
        );
    }

    /// Clearance-expanded index box of an obstacle, before clipping.
    ///
    /// The vertex index box `floor((v - grid_min) / step)` grows on X and Y
    /// by `offset_cells + duct_half_width` and its Z minimum drops by
    /// `offset_cells`. The Z maximum is always the top layer. Returns `None`
    /// for a mesh without vertices.
    ///
    /// The box may extend past the lattice, or be inverted on Z for an
    /// obstacle above the top layer; [`RoutingGrid::clip`] resolves both.
    #[must_use]
    pub fn obstacle_bounds(&self, mesh: &IndexedMesh) -> Option<GridBounds> {
        let aabb = mesh.bounds_opt()?;
        let lo = self.floor_index(aabb.min);
        let hi = self.floor_index(aabb.max);

        let grow = i32::try_from(u64::from(self.offset_cells()) + u64::from(self.duct_half_width()))
            .unwrap_or(i32::MAX);
        let drop = i32::try_from(self.offset_cells()).unwrap_or(i32::MAX);

        Some(GridBounds {
            min: VoxelCoord::new(
                lo.x.saturating_sub(grow),
                lo.y.saturating_sub(grow),
                lo.z.saturating_sub(drop),
            ),
            max: VoxelCoord::new(
                hi.x.saturating_add(grow),
                hi.y.saturating_add(grow),
                to_i32(self.nz()),
            ),
        })
    }

    /// Clips an index box to the lattice, or `None` if nothing remains.
    #[must_use]
    pub fn clip(&self, bounds: &GridBounds) -> Option<GridBounds> {
        // Boxes from `obstacle_bounds` may be inverted, which `intersection`
        // rejects along with disjoint boxes.
        GridBounds::from_corners(bounds.min, bounds.max)?.intersection(&self.obstacle_mask().bounds())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn floor_index(&self, point: Point3<f64>) -> VoxelCoord {
        let rel = (point - self.grid_min()) / self.step();
        let floor = |v: f64| if v.is_nan() { i32::MIN } else { v.floor() as i32 };
        VoxelCoord::new(floor(rel.x), floor(rel.y), floor(rel.z))
    }
}

fn span(min: [i32; 3], max: [i32; 3]) -> Option<GridBounds> {
    GridBounds::from_corners(min.into(), max.into())
}

/// Lattice extents are validated to fit `i32` when the grid is created.
fn to_i32(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
