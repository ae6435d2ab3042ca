//! Voxel coordinate types.

use nalgebra::Vector3;

/// A discrete 3D coordinate in lattice space.
///
/// Uses `i32` coordinates so that expanded or snapped indices that fall
/// outside a lattice (including negative ones) can still be represented
/// and then rejected or clipped by the owner of the lattice.
///
/// # Example
///
/// ```
/// use cf_spatial::VoxelCoord;
///
/// let coord = VoxelCoord::new(1, 2, 3);
/// assert_eq!(coord.x, 1);
/// assert_eq!(<[i32; 3]>::from(coord), [1, 2, 3]);
///
/// let outside = VoxelCoord::new(-1, 0, 0);
/// assert!(outside.x < 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    /// X coordinate (width axis).
    pub x: i32,
    /// Y coordinate (depth axis).
    pub y: i32,
    /// Z coordinate (height axis).
    pub z: i32,
}

impl VoxelCoord {
    /// The six face-adjacent unit offsets, in the order `+X, -X, +Y, -Y, +Z, -Z`.
    pub const FACE_OFFSETS: [Self; 6] = [
        Self::new(1, 0, 0),
        Self::new(-1, 0, 0),
        Self::new(0, 1, 0),
        Self::new(0, -1, 0),
        Self::new(0, 0, 1),
        Self::new(0, 0, -1),
    ];

    /// Creates a new voxel coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate at the origin (0, 0, 0).
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Converts to a floating-point vector (one unit per voxel).
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Returns the 6 face-adjacent neighbors (von Neumann neighborhood).
    ///
    /// Neighbors are listed in [`VoxelCoord::FACE_OFFSETS`] order.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_spatial::VoxelCoord;
    ///
    /// let neighbors = VoxelCoord::new(0, 0, 0).face_neighbors();
    /// assert_eq!(neighbors[0], VoxelCoord::new(1, 0, 0));
    /// assert_eq!(neighbors[5], VoxelCoord::new(0, 0, -1));
    /// ```
    #[must_use]
    pub const fn face_neighbors(self) -> [Self; 6] {
        [
            Self::new(self.x.wrapping_add(1), self.y, self.z),
            Self::new(self.x.wrapping_sub(1), self.y, self.z),
            Self::new(self.x, self.y.wrapping_add(1), self.z),
            Self::new(self.x, self.y.wrapping_sub(1), self.z),
            Self::new(self.x, self.y, self.z.wrapping_add(1)),
            Self::new(self.x, self.y, self.z.wrapping_sub(1)),
        ]
    }

    /// Returns `true` if `other` shares a face with this coordinate.
    #[must_use]
    pub const fn is_face_adjacent(self, other: Self) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        matches!((dx, dy, dz), (1, 0, 0) | (0, 1, 0) | (0, 0, 1))
    }
}

impl From<[i32; 3]> for VoxelCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<VoxelCoord> for [i32; 3] {
    fn from(coord: VoxelCoord) -> Self {
        [coord.x, coord.y, coord.z]
    }
}

impl std::ops::Add for VoxelCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_add(other.x),
            self.y.wrapping_add(other.y),
            self.z.wrapping_add(other.z),
        )
    }
}

impl std::ops::Sub for VoxelCoord {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_sub(other.x),
            self.y.wrapping_sub(other.y),
            self.z.wrapping_sub(other.z),
        )
    }
}
