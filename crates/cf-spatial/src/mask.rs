//! Two-dimensional boolean masks.

use crate::error::SpatialError;

/// A dense 2D boolean mask over an `nx × ny` lattice.
///
/// Storage is row-major over `(x, y)` with Y varying fastest. Reads outside
/// the lattice return `false`, which is also the border value used by
/// [`Mask2::erode_square`].
///
/// # Example
///
/// ```
/// use cf_spatial::Mask2;
///
/// let mask = Mask2::from_fn(5, 5, |x, y| x >= 1 && y >= 1);
/// assert!(mask.get(2, 2));
/// assert!(!mask.get(0, 2));
/// assert!(!mask.get(-1, 2));
/// assert_eq!(mask.count(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask2 {
    nx: usize,
    ny: usize,
    data: Vec<bool>,
}

impl Mask2 {
    /// Creates an all-`false` mask.
    #[must_use]
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            data: vec![false; nx * ny],
        }
    }

    /// Creates a mask by evaluating `f(x, y)` for every cell.
    #[must_use]
    pub fn from_fn(nx: usize, ny: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(nx * ny);
        for x in 0..nx {
            for y in 0..ny {
                data.push(f(x, y));
            }
        }
        Self { nx, ny, data }
    }

    /// Wraps an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::ShapeMismatch`] if `data.len() != nx * ny`.
    pub fn from_vec(nx: usize, ny: usize, data: Vec<bool>) -> Result<Self, SpatialError> {
        let expected = nx.checked_mul(ny).ok_or(SpatialError::IntegerOverflow)?;
        if data.len() != expected {
            return Err(SpatialError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { nx, ny, data })
    }

    /// Returns the mask shape as `(nx, ny)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Returns the value at `(x, y)`, or `false` outside the lattice.
    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some_and(|i| self.data[i])
    }

    /// Sets the value at `(x, y)`. Writes outside the lattice are ignored.
    pub fn set(&mut self, x: i64, y: i64, value: bool) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = value;
        }
    }

    /// Number of `true` cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.data.iter().filter(|v| **v).count()
    }

    /// Returns the raw row-major storage.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Morphological erosion with a `(2r+1) × (2r+1)` square window.
    ///
    /// A cell survives only if every cell of the window centred on it is
    /// `true`; cells outside the lattice count as `false`, so anything within
    /// `radius` of the border is cleared. `radius == 0` returns a copy.
    ///
    /// The square window is separable, so this runs as a row pass followed by
    /// a column pass, each linear in the mask size.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_spatial::Mask2;
    ///
    /// let full = Mask2::from_fn(5, 5, |_, _| true);
    /// let eroded = full.erode_square(1);
    /// assert_eq!(eroded.count(), 9);
    /// assert!(!eroded.get(0, 0));
    /// assert!(eroded.get(1, 1));
    /// ```
    #[must_use]
    pub fn erode_square(&self, radius: usize) -> Self {
        if radius == 0 {
            return self.clone();
        }

        // Pass along Y within each X row.
        let mut along_y = vec![false; self.data.len()];
        for x in 0..self.nx {
            let row = &self.data[x * self.ny..(x + 1) * self.ny];
            erode_line(row, radius, &mut along_y[x * self.ny..(x + 1) * self.ny]);
        }

        // Pass along X for each Y column.
        let mut out = vec![false; self.data.len()];
        let mut column = vec![false; self.nx];
        let mut eroded = vec![false; self.nx];
        for y in 0..self.ny {
            for (x, slot) in column.iter_mut().enumerate() {
                *slot = along_y[x * self.ny + y];
            }
            erode_line(&column, radius, &mut eroded);
            for (x, value) in eroded.iter().enumerate() {
                out[x * self.ny + y] = *value;
            }
        }

        Self {
            nx: self.nx,
            ny: self.ny,
            data: out,
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.nx)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.ny)?;
        Some(x * self.ny + y)
    }
}

/// 1D erosion with window `[i - r, i + r]` and a `false` border.
fn erode_line(line: &[bool], radius: usize, out: &mut [bool]) {
    let n = line.len();
    let window = 2 * radius + 1;

    // prefix[i] = number of true values in line[..i]
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0usize);
    for value in line {
        let last = prefix.last().copied().unwrap_or(0);
        prefix.push(last + usize::from(*value));
    }

    for (i, slot) in out.iter_mut().enumerate() {
        *slot = i >= radius
            && i + radius < n
            && prefix[i + radius + 1] - prefix[i - radius] == window;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Reference erosion by direct window scan.
    fn erode_naive(mask: &Mask2, radius: i64) -> Mask2 {
        let (nx, ny) = mask.shape();
        Mask2::from_fn(nx, ny, |x, y| {
            let (x, y) = (x as i64, y as i64);
            (-radius..=radius).all(|dx| (-radius..=radius).all(|dy| mask.get(x + dx, y + dy)))
        })
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        let err = Mask2::from_vec(2, 3, vec![true; 5]).unwrap_err();
        assert!(matches!(
            err,
            SpatialError::ShapeMismatch {
                expected: 6,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_set_outside_is_ignored() {
        let mut mask = Mask2::new(2, 2);
        mask.set(5, 0, true);
        mask.set(-1, 0, true);
        assert_eq!(mask.count(), 0);
        mask.set(1, 0, true);
        assert!(mask.get(1, 0));
    }

    #[test]
    fn test_erode_zero_radius_is_identity() {
        let mask = Mask2::from_fn(4, 3, |x, y| (x + y) % 2 == 0);
        assert_eq!(mask.erode_square(0), mask);
    }

    #[test]
    fn test_erode_clears_border() {
        let mask = Mask2::from_fn(7, 6, |_, _| true);
        let eroded = mask.erode_square(2);
        assert_eq!(eroded.count(), 3 * 2);
        assert!(eroded.get(2, 2));
        assert!(eroded.get(4, 3));
        assert!(!eroded.get(5, 3));
        assert!(!eroded.get(2, 4));
    }

    #[test]
    fn test_erode_hole_grows() {
        let mut mask = Mask2::from_fn(9, 9, |_, _| true);
        mask.set(4, 4, false);
        let eroded = mask.erode_square(1);
        for x in 3..=5 {
            for y in 3..=5 {
                assert!(!eroded.get(x, y));
            }
        }
        assert!(eroded.get(2, 2));
        assert!(eroded.get(6, 6));
    }

    #[test]
    fn test_erode_matches_naive() {
        let mask = Mask2::from_fn(11, 8, |x, y| !(x == 7 && y < 3) && (x * 3 + y) % 13 != 0);
        for radius in 1..=3 {
            assert_eq!(
                mask.erode_square(radius),
                erode_naive(&mask, radius as i64),
                "radius {radius}"
            );
        }
    }

    #[test]
    fn test_erode_radius_larger_than_mask() {
        let mask = Mask2::from_fn(3, 3, |_, _| true);
        assert_eq!(mask.erode_square(2).count(), 0);
    }
}
