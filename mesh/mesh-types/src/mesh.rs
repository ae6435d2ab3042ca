//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, Triangle};
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Stores vertex positions and faces separately, with faces referencing
/// vertices by index. Ceiling surfaces and obstacle solids are both
/// represented this way.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Point3<f64>>` - Vertex positions
/// - `faces`: `Vec<[u32; 3]>` - Triangle faces as vertex indices
///
/// Construction does not validate indices; use
/// [`IndexedMesh::first_invalid_index`] before resolving triangles from
/// untrusted data. [`IndexedMesh::triangles`] skips faces that reference
/// missing vertices rather than panicking.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Point3};
///
/// // Create a single triangle
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from raw coordinate and index data.
    ///
    /// # Arguments
    ///
    /// * `positions` - Flat array of vertex positions `[x0, y0, z0, x1, y1, z1, ...]`
    /// * `indices` - Flat array of face indices `[v0a, v1a, v2a, v0b, v1b, v2b, ...]`
    ///
    /// Returns `None` if either length is not a multiple of 3.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::IndexedMesh;
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let indices = [0, 1, 2];
    ///
    /// let mesh = IndexedMesh::from_raw(&positions, &indices).unwrap();
    /// assert_eq!(mesh.vertex_count(), 3);
    /// assert_eq!(mesh.face_count(), 1);
    ///
    /// assert!(IndexedMesh::from_raw(&positions[..4], &indices).is_none());
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Option<Self> {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return None;
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();

        let faces = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        Some(Self { vertices, faces })
    }

    /// Get the number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces (triangles).
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no vertices or no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Finds the first face index that references a missing vertex.
    ///
    /// Returns `(face_index, vertex_index)` for the first offender.
    #[must_use]
    pub fn first_invalid_index(&self) -> Option<(usize, u32)> {
        let n = self.vertices.len();
        self.faces.iter().enumerate().find_map(|(face, indices)| {
            indices
                .iter()
                .find(|&&i| i as usize >= n)
                .map(|&i| (face, i))
        })
    }

    /// Get a triangle by face index with resolved vertex positions.
    ///
    /// Returns `None` if the face index or any of its vertex indices is out
    /// of range.
    #[must_use]
    pub fn triangle(&self, face_index: usize) -> Option<Triangle> {
        self.faces
            .get(face_index)
            .and_then(|face| self.resolve(*face))
    }

    /// Iterate over all triangles with resolved vertex positions.
    ///
    /// Faces referencing missing vertices are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().filter_map(|face| self.resolve(*face))
    }

    /// Builds a new mesh from the faces accepted by `keep`.
    ///
    /// The vertex list is carried over whole, so indices are unchanged and
    /// the result keeps the source's vertex bounds. Faces referencing missing
    /// vertices are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{box_mesh, MeshBounds, Point3};
    ///
    /// let cube = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    /// let top = cube.select_faces(|tri| tri.vertices().iter().all(|v| v.z == 1.0));
    ///
    /// assert_eq!(top.face_count(), 2);
    /// assert_eq!(top.vertex_count(), 8);
    /// assert_eq!(top.bounds().min.z, 0.0);
    /// ```
    #[must_use]
    pub fn select_faces(&self, mut keep: impl FnMut(&Triangle) -> bool) -> Self {
        let faces = self
            .faces
            .iter()
            .copied()
            .filter(|&face| self.resolve(face).is_some_and(|tri| keep(&tri)))
            .collect();
        Self::from_parts(self.vertices.clone(), faces)
    }

    /// Append another mesh to this one, offsetting its face indices.
    ///
    /// This function uses u32 vertex indices, which supports up to ~4 billion
    /// vertices. Meshes exceeding this limit are not supported.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &Self) {
        let vertex_offset = self.vertices.len() as u32;

        self.vertices.extend(other.vertices.iter().copied());

        for face in &other.faces {
            self.faces.push([
                face[0] + vertex_offset,
                face[1] + vertex_offset,
                face[2] + vertex_offset,
            ]);
        }
    }

    fn resolve(&self, [i0, i1, i2]: [u32; 3]) -> Option<Triangle> {
        Some(Triangle::new(
            *self.vertices.get(i0 as usize)?,
            *self.vertices.get(i1 as usize)?,
            *self.vertices.get(i2 as usize)?,
        ))
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }
}

/// Create a closed axis-aligned box mesh spanning `min..max`.
///
/// Eight vertices, twelve triangles with outward (CCW) winding. Handy for
/// obstacle solids in tests and fixtures.
///
/// # Example
///
/// ```
/// use mesh_types::{box_mesh, MeshBounds, Point3};
///
/// let solid = box_mesh(Point3::new(5.0, 5.0, 0.0), Point3::new(10.0, 10.0, 5.0));
/// assert_eq!(solid.vertex_count(), 8);
/// assert_eq!(solid.face_count(), 12);
/// assert_eq!(solid.bounds().max, Point3::new(10.0, 10.0, 5.0));
/// ```
#[must_use]
pub fn box_mesh(min: Point3<f64>, max: Point3<f64>) -> IndexedMesh {
    let (a, b) = (min, max);
    let vertices = vec![
        Point3::new(a.x, a.y, a.z), // 0
        Point3::new(b.x, a.y, a.z), // 1
        Point3::new(b.x, b.y, a.z), // 2
        Point3::new(a.x, b.y, a.z), // 3
        Point3::new(a.x, a.y, b.z), // 4
        Point3::new(b.x, a.y, b.z), // 5
        Point3::new(b.x, b.y, b.z), // 6
        Point3::new(a.x, b.y, b.z), // 7
    ];
    let faces = vec![
        // Bottom (-Z)
        [0, 2, 1],
        [0, 3, 2],
        // Top (+Z)
        [4, 5, 6],
        [4, 6, 7],
        // Front (-Y)
        [0, 1, 5],
        [0, 5, 4],
        // Back (+Y)
        [3, 7, 6],
        [3, 6, 2],
        // Left (-X)
        [0, 4, 7],
        [0, 7, 3],
        // Right (+X)
        [1, 2, 6],
        [1, 6, 5],
    ];
    IndexedMesh::from_parts(vertices, faces)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mesh_is_empty() {
        let mut mesh = IndexedMesh::new();
        assert!(mesh.is_empty());
        mesh.vertices.push(Point3::origin());
        assert!(mesh.is_empty());
    }

    #[test]
    fn mesh_bounds() {
        let mesh = box_mesh(Point3::new(-1.0, 2.0, 0.0), Point3::new(3.0, 4.0, 5.0));
        let bounds = mesh.bounds();
        assert_eq!(bounds.min, Point3::new(-1.0, 2.0, 0.0));
        assert_eq!(bounds.max, Point3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn empty_mesh_bounds() {
        assert!(IndexedMesh::new().bounds().is_empty());
        assert!(IndexedMesh::new().bounds_opt().is_none());
    }

    #[test]
    fn first_invalid_index_reports_face() {
        let mesh = IndexedMesh::from_parts(
            vec![Point3::origin(); 3],
            vec![[0, 1, 2], [0, 7, 1]],
        );
        assert_eq!(mesh.first_invalid_index(), Some((1, 7)));
        assert!(mesh.triangle(1).is_none());
        assert_eq!(mesh.triangles().count(), 1);
    }

    #[test]
    fn box_mesh_top_area() {
        let solid = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 3.0, 1.0));
        let top_area: f64 = solid
            .triangles()
            .filter(|t| t.vertices().iter().all(|v| v.z == 1.0))
            .map(|t| t.area())
            .sum();
        assert_relative_eq!(top_area, 6.0);
    }

    #[test]
    fn select_faces_keeps_vertex_list() {
        let solid = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 2.0));
        let bottom = solid.select_faces(|t| t.vertices().iter().all(|v| v.z == 0.0));
        assert_eq!(bottom.face_count(), 2);
        assert_eq!(bottom.vertices, solid.vertices);
        assert!(bottom.first_invalid_index().is_none());
        assert!(bottom.triangles().all(|t| t.vertices().iter().all(|v| v.z == 0.0)));
        assert_eq!(bottom.bounds().max.z, 2.0);
    }

    #[test]
    fn select_none_is_empty() {
        let solid = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(solid.select_faces(|_| false).is_empty());
    }

    #[test]
    fn mesh_merge() {
        let mut a = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = box_mesh(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0));
        a.merge(&b);
        assert_eq!(a.vertex_count(), 16);
        assert_eq!(a.face_count(), 24);
        assert_eq!(a.faces[12][0], 8);
        assert_eq!(a.bounds().max, Point3::new(6.0, 6.0, 6.0));
    }

    #[test]
    fn from_raw_rejects_ragged_input() {
        assert!(IndexedMesh::from_raw(&[0.0, 1.0], &[]).is_none());
        assert!(IndexedMesh::from_raw(&[0.0; 9], &[0, 1]).is_none());
    }
}
