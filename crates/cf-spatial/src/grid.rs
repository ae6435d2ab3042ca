//! Dense voxel lattice and inclusive index boxes.

use crate::error::SpatialError;
use crate::voxel::VoxelCoord;

/// Axis-aligned bounds in grid (voxel) space.
///
/// Represents a rectangular region of voxels defined by minimum and maximum
/// coordinates. Both bounds are inclusive.
///
/// # Example
///
/// ```
/// use cf_spatial::{GridBounds, VoxelCoord};
///
/// let bounds = GridBounds::new(
///     VoxelCoord::new(0, 0, 0),
///     VoxelCoord::new(10, 10, 10),
/// );
///
/// assert!(bounds.contains(VoxelCoord::new(5, 5, 5)));
/// assert!(!bounds.contains(VoxelCoord::new(15, 5, 5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    /// Minimum corner (inclusive).
    pub min: VoxelCoord,
    /// Maximum corner (inclusive).
    pub max: VoxelCoord,
}

impl GridBounds {
    /// Creates new grid bounds from two corners.
    ///
    /// The coordinates are automatically ordered so min ≤ max on each axis.
    #[must_use]
    pub fn new(a: VoxelCoord, b: VoxelCoord) -> Self {
        Self {
            min: VoxelCoord::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: VoxelCoord::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates bounds from corners taken as-is, or `None` if the box is empty
    /// (`min > max` on any axis).
    ///
    /// Used for derived boxes such as the strict interior of a thin box, which
    /// may legitimately contain no voxels.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_spatial::{GridBounds, VoxelCoord};
    ///
    /// assert!(GridBounds::from_corners(VoxelCoord::new(1, 1, 1), VoxelCoord::new(1, 1, 1)).is_some());
    /// assert!(GridBounds::from_corners(VoxelCoord::new(2, 1, 1), VoxelCoord::new(1, 1, 1)).is_none());
    /// ```
    #[must_use]
    pub const fn from_corners(min: VoxelCoord, max: VoxelCoord) -> Option<Self> {
        if min.x <= max.x && min.y <= max.y && min.z <= max.z {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Creates bounds containing a single voxel.
    #[must_use]
    pub const fn from_point(coord: VoxelCoord) -> Self {
        Self {
            min: coord,
            max: coord,
        }
    }

    /// Returns the size of the bounds as (x, y, z) voxel counts.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_spatial::{GridBounds, VoxelCoord};
    ///
    /// let bounds = GridBounds::new(
    ///     VoxelCoord::new(0, 0, 0),
    ///     VoxelCoord::new(9, 19, 29),
    /// );
    /// assert_eq!(bounds.size(), (10, 20, 30));
    /// ```
    #[must_use]
    pub const fn size(&self) -> (u32, u32, u32) {
        (
            self.max.x.abs_diff(self.min.x).saturating_add(1),
            self.max.y.abs_diff(self.min.y).saturating_add(1),
            self.max.z.abs_diff(self.min.z).saturating_add(1),
        )
    }

    /// Returns the total number of voxels in this bounds.
    #[must_use]
    pub fn volume(&self) -> u64 {
        let (w, h, d) = self.size();
        u64::from(w)
            .saturating_mul(u64::from(h))
            .saturating_mul(u64::from(d))
    }

    /// Checks if the bounds contain a coordinate.
    #[must_use]
    pub const fn contains(&self, coord: VoxelCoord) -> bool {
        coord.x >= self.min.x
            && coord.x <= self.max.x
            && coord.y >= self.min.y
            && coord.y <= self.max.y
            && coord.z >= self.min.z
            && coord.z <= self.max.z
    }

    /// Expands the bounds to include a coordinate.
    pub fn expand_to_include(&mut self, coord: VoxelCoord) {
        self.min = VoxelCoord::new(
            self.min.x.min(coord.x),
            self.min.y.min(coord.y),
            self.min.z.min(coord.z),
        );
        self.max = VoxelCoord::new(
            self.max.x.max(coord.x),
            self.max.y.max(coord.y),
            self.max.z.max(coord.z),
        );
    }

    /// Returns the intersection of two bounds, or `None` if they don't overlap.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_spatial::{GridBounds, VoxelCoord};
    ///
    /// let a = GridBounds::new(VoxelCoord::new(0, 0, 0), VoxelCoord::new(10, 10, 10));
    /// let b = GridBounds::new(VoxelCoord::new(5, -5, 5), VoxelCoord::new(15, 15, 15));
    ///
    /// let clipped = a.intersection(&b).unwrap();
    /// assert_eq!(clipped.min, VoxelCoord::new(5, 0, 5));
    /// assert_eq!(clipped.max, VoxelCoord::new(10, 10, 10));
    /// ```
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = VoxelCoord::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = VoxelCoord::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        Self::from_corners(min, max)
    }

    /// Returns an iterator over all coordinates in this bounds.
    ///
    /// Iterates in Z-Y-X order (X varies fastest).
    #[must_use]
    pub const fn iter(&self) -> GridBoundsIter {
        GridBoundsIter {
            bounds: *self,
            current: Some(self.min),
        }
    }
}

impl IntoIterator for GridBounds {
    type Item = VoxelCoord;
    type IntoIter = GridBoundsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &GridBounds {
    type Item = VoxelCoord;
    type IntoIter = GridBoundsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over all coordinates in a [`GridBounds`].
#[derive(Debug, Clone)]
pub struct GridBoundsIter {
    bounds: GridBounds,
    current: Option<VoxelCoord>,
}

impl Iterator for GridBoundsIter {
    type Item = VoxelCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        let mut next = current;
        next.x += 1;
        if next.x > self.bounds.max.x {
            next.x = self.bounds.min.x;
            next.y += 1;
            if next.y > self.bounds.max.y {
                next.y = self.bounds.min.y;
                next.z += 1;
                if next.z > self.bounds.max.z {
                    self.current = None;
                    return Some(current);
                }
            }
        }
        self.current = Some(next);

        Some(current)
    }
}

/// A dense 3D lattice storing one value per cell.
///
/// Cells are addressed by [`VoxelCoord`] with each axis in `0..dims[axis]`.
/// Storage is a single contiguous vector in row-major order over `(x, y, z)`
/// (Z varies fastest), so [`DenseGrid::linear_index`] doubles as a flat key
/// for per-cell side tables.
///
/// All accessors are bounds-checked: out-of-range coordinates (including
/// negative ones) yield `None` or an [`SpatialError::OutOfBounds`] error
/// instead of panicking.
///
/// # Example
///
/// ```
/// use cf_spatial::{DenseGrid, VoxelCoord};
///
/// let mut grid = DenseGrid::filled([4, 3, 2], 0u8).unwrap();
/// grid.set(VoxelCoord::new(3, 2, 1), 7).unwrap();
///
/// assert_eq!(grid.get(VoxelCoord::new(3, 2, 1)), Some(&7));
/// assert_eq!(grid.get(VoxelCoord::new(4, 0, 0)), None);
/// assert_eq!(grid.len(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseGrid<T> {
    dims: [usize; 3],
    data: Vec<T>,
}

impl<T: Clone> DenseGrid<T> {
    /// Creates a lattice of the given dimensions with every cell set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidDimensions`] if any dimension is zero or
    /// does not fit an `i32` coordinate, and [`SpatialError::IntegerOverflow`]
    /// if the cell count overflows `usize`.
    pub fn filled(dims: [usize; 3], value: T) -> Result<Self, SpatialError> {
        let [nx, ny, nz] = dims;
        let representable = dims.iter().all(|&d| d > 0 && i32::try_from(d).is_ok());
        if !representable {
            return Err(SpatialError::InvalidDimensions {
                width: nx,
                height: ny,
                depth: nz,
            });
        }
        let len = nx
            .checked_mul(ny)
            .and_then(|n| n.checked_mul(nz))
            .ok_or(SpatialError::IntegerOverflow)?;

        Ok(Self {
            dims,
            data: vec![value; len],
        })
    }

    /// Sets every cell inside `bounds` (clipped to the lattice) to `value`.
    ///
    /// Returns the number of cells written. Boxes entirely outside the
    /// lattice write nothing.
    pub fn fill_bounds(&mut self, bounds: &GridBounds, value: T) -> usize {
        let Some(clipped) = bounds.intersection(&self.bounds()) else {
            return 0;
        };
        let mut written = 0;
        for coord in clipped {
            if let Some(cell) = self.get_mut(coord) {
                *cell = value.clone();
                written += 1;
            }
        }
        written
    }

    /// Sets every cell of the lattice to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> DenseGrid<T> {
    /// Returns the lattice dimensions `[nx, ny, nz]`.
    #[must_use]
    pub const fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Returns the total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the lattice has no cells.
    ///
    /// Lattices built through [`DenseGrid::filled`] are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the inclusive index box covering the whole lattice.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn bounds(&self) -> GridBounds {
        // Dimensions were checked to fit i32 at construction.
        let [nx, ny, nz] = self.dims;
        GridBounds {
            min: VoxelCoord::origin(),
            max: VoxelCoord::new(nx as i32 - 1, ny as i32 - 1, nz as i32 - 1),
        }
    }

    /// Returns `true` if the coordinate addresses a cell of this lattice.
    #[must_use]
    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.linear_index(coord).is_some()
    }

    /// Maps a coordinate to its row-major storage index, or `None` when it is
    /// outside the lattice.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_spatial::{DenseGrid, VoxelCoord};
    ///
    /// let grid = DenseGrid::filled([2, 3, 4], false).unwrap();
    /// assert_eq!(grid.linear_index(VoxelCoord::new(0, 0, 1)), Some(1));
    /// assert_eq!(grid.linear_index(VoxelCoord::new(0, 1, 0)), Some(4));
    /// assert_eq!(grid.linear_index(VoxelCoord::new(1, 0, 0)), Some(12));
    /// assert_eq!(grid.linear_index(VoxelCoord::new(-1, 0, 0)), None);
    /// ```
    #[must_use]
    pub fn linear_index(&self, coord: VoxelCoord) -> Option<usize> {
        let [nx, ny, nz] = self.dims;
        let x = usize::try_from(coord.x).ok().filter(|&x| x < nx)?;
        let y = usize::try_from(coord.y).ok().filter(|&y| y < ny)?;
        let z = usize::try_from(coord.z).ok().filter(|&z| z < nz)?;
        Some((x * ny + y) * nz + z)
    }

    /// Inverse of [`DenseGrid::linear_index`].
    ///
    /// Returns `None` if `index` is past the end of the lattice.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn coord_at(&self, index: usize) -> Option<VoxelCoord> {
        if index >= self.data.len() {
            return None;
        }
        let [_, ny, nz] = self.dims;
        let z = index % nz;
        let y = (index / nz) % ny;
        let x = index / (nz * ny);
        Some(VoxelCoord::new(x as i32, y as i32, z as i32))
    }

    /// Gets a reference to the value at a coordinate.
    #[must_use]
    pub fn get(&self, coord: VoxelCoord) -> Option<&T> {
        self.linear_index(coord).map(|i| &self.data[i])
    }

    /// Gets a mutable reference to the value at a coordinate.
    pub fn get_mut(&mut self, coord: VoxelCoord) -> Option<&mut T> {
        self.linear_index(coord).map(|i| &mut self.data[i])
    }

    /// Sets the value at a coordinate, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::OutOfBounds`] if the coordinate is outside the lattice.
    pub fn set(&mut self, coord: VoxelCoord, value: T) -> Result<T, SpatialError> {
        let cell = self
            .get_mut(coord)
            .ok_or(SpatialError::OutOfBounds { coord })?;
        Ok(std::mem::replace(cell, value))
    }

    /// Returns the raw cell storage in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns an iterator over `(coordinate, value)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, &T)> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, value)| self.coord_at(i).map(|coord| (coord, value)))
    }

    /// Counts the cells whose value satisfies `predicate`.
    pub fn count_where(&self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        self.data.iter().filter(|v| predicate(v)).count()
    }

    /// Builds a lattice of the same shape by applying `f` to every cell.
    ///
    /// `f` is called in storage order, so it may carry state such as a
    /// running counter.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_spatial::{DenseGrid, VoxelCoord};
    ///
    /// let grid = DenseGrid::filled([2, 2, 1], 3u8).unwrap();
    /// let sums = grid.map(|coord, v| i32::from(*v) + coord.x + coord.y);
    /// assert_eq!(sums.get(VoxelCoord::new(1, 1, 0)), Some(&5));
    /// ```
    pub fn map<U>(&self, mut f: impl FnMut(VoxelCoord, &T) -> U) -> DenseGrid<U> {
        DenseGrid {
            dims: self.dims,
            data: self.iter().map(|(coord, value)| f(coord, value)).collect(),
        }
    }
}
