//! Row-major height matrices and the transforms applied to brush kernels.
//!
//! Rotation is a pure index permutation, so four quarter turns reproduce a
//! matrix bit for bit. Upsampling keeps every source vertex exactly and fills
//! the vertices between them by bilinear interpolation.

use crate::types::Rotation;

/// A dense `rows × cols` matrix of height values stored row-major.
///
/// Row index is the z axis, column index is the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

/// A brush's height-delta matrix. Square for every catalog brush.
pub type Kernel = HeightMatrix;

impl HeightMatrix {
    /// Create a matrix filled with zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// Create a matrix with every entry set to `value`
    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            rows,
            cols,
            values: vec![value; rows * cols],
        }
    }

    /// Build a matrix by evaluating `f(row, col)` for every entry
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut values = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                values.push(f(row, col));
            }
        }
        Self { rows, cols, values }
    }

    /// Build a matrix from nested rows.
    ///
    /// Returns None if the rows are ragged.
    pub fn from_rows(rows: &[Vec<f32>]) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self {
            rows: rows.len(),
            cols,
            values: rows.iter().flatten().copied().collect(),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value at (row, col), or None if out of range
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.values[row * self.cols + col])
    }

    /// Row-major values
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Iterate rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact panics on 0, and a 0-column matrix has no values anyway
        self.values.chunks_exact(self.cols.max(1))
    }

    /// Smallest and largest value, or None for an empty matrix
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let first = *self.values.first()?;
        Some(
            self.values
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Copy with every value multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    /// Rotate a quarter turn clockwise.
    ///
    /// A `rows × cols` matrix becomes `cols × rows` with
    /// `out[j][rows - 1 - i] = in[i][j]`.
    pub fn rotate_cw(&self) -> Self {
        let n = self.rows;
        let m = self.cols;
        let mut values = vec![0.0; n * m];
        for i in 0..n {
            for j in 0..m {
                // out has n columns
                values[j * n + (n - 1 - i)] = self.values[i * m + j];
            }
        }
        Self {
            rows: m,
            cols: n,
            values,
        }
    }

    /// Apply `rotation` clockwise quarter turns
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let mut out = self.clone();
        for _ in 0..rotation.quarter_turns() {
            out = out.rotate_cw();
        }
        out
    }

    /// Bilinearly upsample by an integer factor.
    ///
    /// An `R × C` matrix becomes `((R-1)·k+1) × ((C-1)·k+1)`. Output vertex
    /// `(i·k, j·k)` equals input `(i, j)` exactly. A factor of 1 (or 0) is the
    /// identity.
    pub fn upsample(&self, factor: u32) -> Self {
        let k = factor.max(1) as usize;
        if k == 1 || self.is_empty() {
            return self.clone();
        }

        let out_rows = (self.rows - 1) * k + 1;
        let out_cols = (self.cols - 1) * k + 1;

        Self::from_fn(out_rows, out_cols, |row, col| {
            let (r0, r_rem) = (row / k, row % k);
            let (c0, c_rem) = (col / k, col % k);
            if r_rem == 0 && c_rem == 0 {
                return self.values[r0 * self.cols + c0];
            }
            let r1 = (r0 + 1).min(self.rows - 1);
            let c1 = (c0 + 1).min(self.cols - 1);
            let dz = r_rem as f32 / k as f32;
            let dx = c_rem as f32 / k as f32;
            self.lerp_cell(r0, r1, c0, c1, dx, dz)
        })
    }

    /// Sample at fractional (row, col) coordinates with bilinear filtering.
    ///
    /// Coordinates are clamped to the matrix extent. Returns 0.0 for an
    /// empty matrix.
    pub fn sample_bilinear(&self, row: f32, col: f32) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let row = row.clamp(0.0, (self.rows - 1) as f32);
        let col = col.clamp(0.0, (self.cols - 1) as f32);

        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let r1 = (r0 + 1).min(self.rows - 1);
        let c1 = (c0 + 1).min(self.cols - 1);
        self.lerp_cell(r0, r1, c0, c1, col - c0 as f32, row - r0 as f32)
    }

    #[inline]
    fn lerp_cell(&self, r0: usize, r1: usize, c0: usize, c1: usize, dx: f32, dz: f32) -> f32 {
        let v00 = self.values[r0 * self.cols + c0];
        let v01 = self.values[r0 * self.cols + c1];
        let v10 = self.values[r1 * self.cols + c0];
        let v11 = self.values[r1 * self.cols + c1];

        let top = v00 * (1.0 - dx) + v01 * dx;
        let bottom = v10 * (1.0 - dx) + v11 * dx;
        top * (1.0 - dz) + bottom * dz
    }
}
