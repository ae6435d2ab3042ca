//! XY footprint of a ceiling surface.
//!
//! The footprint is the union of the surface's triangles projected onto the
//! XY plane. Membership is the *interior* of that union: points on its outer
//! boundary are outside, while points on a seam between triangles are
//! inside, including seams where one edge meets only part of another
//! (T-junctions) and edges lying across an overlapping triangle.

use cf_spatial::Mask2;
use hashbrown::{HashMap, HashSet};
use mesh_types::{IndexedMesh, Triangle, orient_xy, point_on_segment_xy};
use nalgebra::Point3;
use rayon::prelude::*;
use tracing::debug;

type XY = (f64, f64);

/// Fraction along a boundary candidate where coverage across it is sampled.
/// Off-centre so the sample rarely lands on another triangle's vertex.
const ACROSS_SAMPLE: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Projected triangles plus the outer boundary of their union.
///
/// The boundary is a set of edge pieces. Exactly collinear triangle edges
/// are split at each other's endpoints, and a piece is boundary unless the
/// union covers both of its sides.
#[derive(Debug, Clone)]
pub struct Footprint {
    triangles: Vec<Triangle>,
    boundary: Vec<(XY, XY)>,
}

impl Footprint {
    /// Builds the footprint of a surface mesh.
    ///
    /// Triangles whose projection has zero or non-finite area are excluded.
    #[must_use]
    pub fn from_mesh(mesh: &IndexedMesh) -> Self {
        let triangles: Vec<Triangle> = mesh
            .triangles()
            .filter(|t| !t.is_degenerate_xy())
            .collect();

        let edges = unique_edges(&triangles);
        let pieces: Vec<(XY, XY)> = edges
            .par_iter()
            .flat_map_iter(|edge| boundary_pieces(edge, &edges, &triangles))
            .collect();
        let mut seen = HashSet::with_capacity(pieces.len());
        let boundary: Vec<_> = pieces
            .into_iter()
            .filter(|&(a, b)| seen.insert(segment_key(a, b)))
            .collect();

        debug!(
            triangles = triangles.len(),
            skipped = mesh.face_count() - triangles.len(),
            edges = edges.len(),
            boundary_edges = boundary.len(),
            "Built ceiling footprint"
        );
        Self {
            triangles,
            boundary,
        }
    }

    /// Returns `true` if no triangle contributes area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of triangles contributing to the footprint.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of outer boundary pieces.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.boundary.len()
    }

    /// Interior membership test for `(x, y)`.
    ///
    /// # Example
    ///
    /// ```
    /// use route_grid::Footprint;
    /// use mesh_types::{IndexedMesh, Point3};
    ///
    /// let square = IndexedMesh::from_parts(
    ///     vec![
    ///         Point3::new(0.0, 0.0, 10.0),
    ///         Point3::new(20.0, 0.0, 10.0),
    ///         Point3::new(20.0, 20.0, 10.0),
    ///         Point3::new(0.0, 20.0, 10.0),
    ///     ],
    ///     vec![[0, 1, 2], [0, 2, 3]],
    /// );
    /// let footprint = Footprint::from_mesh(&square);
    ///
    /// assert!(footprint.contains(10.0, 10.0)); // on the shared diagonal
    /// assert!(!footprint.contains(0.0, 5.0)); // on the outer boundary
    /// assert!(!footprint.contains(25.0, 5.0));
    /// ```
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let p = (x, y);
        self.triangles.iter().any(|t| t.contains_xy(x, y))
            && !self
                .boundary
                .iter()
                .any(|&(a, b)| point_on_segment_xy(a, b, p))
    }

    /// Samples the footprint at lattice columns `origin + (i, j) * step`.
    ///
    /// Returns an `nx × ny` mask. Columns are tested in parallel.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rasterize(&self, origin: Point3<f64>, step: f64, nx: usize, ny: usize) -> Mask2 {
        if ny == 0 {
            return Mask2::new(nx, ny);
        }
        let data: Vec<bool> = (0..nx * ny)
            .into_par_iter()
            .map(|k| {
                let (i, j) = (k / ny, k % ny);
                let x = origin.x + i as f64 * step;
                let y = origin.y + j as f64 * step;
                self.contains(x, y)
            })
            .collect();
        // Length is nx * ny by construction.
        Mask2::from_vec(nx, ny, data).unwrap_or_else(|_| Mask2::new(nx, ny))
    }
}

/// Which sides of a directed edge `a -> b` carry a triangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Sides {
    left: bool,
    right: bool,
}

impl Sides {
    const BOTH: Self = Self {
        left: true,
        right: true,
    };

    fn of(a: XY, b: XY, opposite: XY) -> Self {
        let o = orient_xy(a, b, opposite);
        Self {
            left: o > 0.0,
            right: o < 0.0,
        }
    }

    const fn flipped(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }

    fn merge(&mut self, other: Self) {
        self.left |= other.left;
        self.right |= other.right;
    }

    const fn is_both(self) -> bool {
        self.left && self.right
    }
}

/// A projected triangle edge, deduplicated by endpoints.
#[derive(Debug, Clone, Copy)]
struct Edge {
    a: XY,
    b: XY,
    sides: Sides,
}

impl Edge {
    /// Position of `p` along the edge's line: 0 at `a`, 1 at `b`.
    fn param(&self, p: XY) -> f64 {
        let (dx, dy) = (self.b.0 - self.a.0, self.b.1 - self.a.1);
        if dx.abs() >= dy.abs() {
            (p.0 - self.a.0) / dx
        } else {
            (p.1 - self.a.1) / dy
        }
    }

    fn on_line(&self, p: XY) -> bool {
        orient_xy(self.a, self.b, p) == 0.0
    }
}

fn unique_edges(triangles: &[Triangle]) -> Vec<Edge> {
    let mut edges: HashMap<(EdgeKey, EdgeKey), Edge> = HashMap::new();
    for tri in triangles {
        let [p0, p1, p2] = tri.vertices().map(|v| (v.x, v.y));
        for (a, b, opposite) in [(p0, p1, p2), (p1, p2, p0), (p2, p0, p1)] {
            let (a, b) = if edge_key(a) <= edge_key(b) { (a, b) } else { (b, a) };
            edges
                .entry((edge_key(a), edge_key(b)))
                .or_insert(Edge {
                    a,
                    b,
                    sides: Sides::default(),
                })
                .sides
                .merge(Sides::of(a, b, opposite));
        }
    }
    edges.into_values().collect()
}

/// Pieces of `edge` that lie on the outer boundary.
///
/// `edge` is cut at the endpoints of every collinear edge that falls inside
/// it. Each piece collects the sides of the collinear edges covering it; a
/// piece covered on one side only is still interior if a triangle reaches
/// across it.
fn boundary_pieces(edge: &Edge, edges: &[Edge], triangles: &[Triangle]) -> Vec<(XY, XY)> {
    let collinear: Vec<&Edge> = edges
        .iter()
        .filter(|f| edge.on_line(f.a) && edge.on_line(f.b))
        .collect();

    let mut cuts = vec![(0.0, edge.a), (1.0, edge.b)];
    for p in collinear.iter().flat_map(|f| [f.a, f.b]) {
        let t = edge.param(p);
        if t > 0.0 && t < 1.0 {
            cuts.push((t, p));
        }
    }
    cuts.sort_by(|x, y| x.0.total_cmp(&y.0));
    cuts.dedup_by(|x, y| x.0 == y.0);

    let mut pieces = Vec::new();
    for pair in cuts.windows(2) {
        let ((t0, p), (t1, q)) = (pair[0], pair[1]);
        let mut sides = Sides::default();
        for f in &collinear {
            let (s0, s1) = (edge.param(f.a), edge.param(f.b));
            if s0.min(s1) <= t0 && s0.max(s1) >= t1 {
                sides.merge(if s0 <= s1 { f.sides } else { f.sides.flipped() });
            }
        }
        if !sides.is_both() {
            let sample = (
                p.0 + (q.0 - p.0) * ACROSS_SAMPLE,
                p.1 + (q.1 - p.1) * ACROSS_SAMPLE,
            );
            if triangles.iter().any(|t| reaches_across(t, edge, sample)) {
                sides = Sides::BOTH;
            }
        }
        if !sides.is_both() {
            pieces.push((p, q));
        }
    }
    pieces
}

/// Whether `tri` covers both sides of `edge`'s line around `sample`.
///
/// A triangle with an edge on that line touches it from one side only.
fn reaches_across(tri: &Triangle, edge: &Edge, sample: XY) -> bool {
    tri.contains_xy(sample.0, sample.1)
        && !tri
            .edges()
            .iter()
            .any(|(a, b)| edge.on_line((a.x, a.y)) && edge.on_line((b.x, b.y)))
}

type EdgeKey = (u64, u64);

/// Bit-exact key for a projected vertex, with `-0.0` folded into `0.0`.
fn edge_key((x, y): XY) -> EdgeKey {
    (canonical_bits(x), canonical_bits(y))
}

fn segment_key(a: XY, b: XY) -> (EdgeKey, EdgeKey) {
    let (ka, kb) = (edge_key(a), edge_key(b));
    if ka <= kb { (ka, kb) } else { (kb, ka) }
}

fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
}
