//! Column-major dense matrix.
//!
//! [`Matrix`] holds observations (n × d), membership degrees (n × c) and
//! cluster centers (c × d). Data lives in a flat `Vec<f64>` in column-major
//! (Fortran) order, the same layout nalgebra uses, so conversion to
//! [`DMatrix`] is a straight copy.

use nalgebra::DMatrix;

/// Column-major matrix of `f64`.
///
/// Element `(row, col)` is stored at index `row + col * nrows`.
///
/// # Examples
///
/// ```
/// use fcmeans_core::matrix::Matrix;
///
/// // Two regions, three features
/// let mat = Matrix::from_rows(&[vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]]).unwrap();
///
/// assert_eq!(mat.shape(), (2, 3));
/// assert_eq!(mat[(1, 2)], 0.6);
/// assert_eq!(mat.column(0), &[0.1, 0.4]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    nrows: usize,
    ncols: usize,
}

impl Matrix {
    /// Create from flat column-major data.
    ///
    /// Returns `None` if `data.len() != nrows * ncols`.
    pub fn from_column_major(data: Vec<f64>, nrows: usize, ncols: usize) -> Option<Self> {
        if data.len() != nrows * ncols {
            return None;
        }
        Some(Self { data, nrows, ncols })
    }

    /// Create from a slice of equally long rows.
    ///
    /// Returns `None` if the rows are ragged. An empty slice yields a 0 × 0
    /// matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != ncols) {
            return None;
        }
        let mut data = vec![0.0; nrows * ncols];
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                data[i + j * nrows] = v;
            }
        }
        Some(Self { data, nrows, ncols })
    }

    /// Create a zero-filled matrix.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![0.0; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create a matrix with every element set to `value`.
    pub fn filled(nrows: usize, ncols: usize, value: f64) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Dimensions as `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Contiguous column slice.
    ///
    /// # Panics
    /// Panics if `col >= ncols`.
    #[inline]
    pub fn column(&self, col: usize) -> &[f64] {
        let start = col * self.nrows;
        &self.data[start..start + self.nrows]
    }

    /// Copy of a single row. O(ncols), rows are strided in column-major order.
    pub fn row(&self, row: usize) -> Vec<f64> {
        (0..self.ncols)
            .map(|j| self.data[row + j * self.nrows])
            .collect()
    }

    /// Copies of all rows.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.nrows).map(|i| self.row(i)).collect()
    }

    /// Overwrite a row from a slice of length `ncols`.
    pub fn set_row(&mut self, row: usize, values: &[f64]) {
        debug_assert_eq!(values.len(), self.ncols);
        for (j, &v) in values.iter().enumerate() {
            self.data[row + j * self.nrows] = v;
        }
    }

    /// Sum of one row.
    pub fn row_sum(&self, row: usize) -> f64 {
        (0..self.ncols).map(|j| self.data[row + j * self.nrows]).sum()
    }

    /// Flat column-major data.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume and return the underlying column-major data.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Largest absolute element-wise difference to another matrix of the
    /// same shape.
    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        debug_assert_eq!(self.shape(), other.shape());
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Copy into a nalgebra `DMatrix<f64>` for dense linear algebra.
    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_column_slice(self.nrows, self.ncols, &self.data)
    }

    /// Element at (row, col), `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.nrows && col < self.ncols {
            Some(self.data[row + col * self.nrows])
        } else {
            None
        }
    }
}

impl std::ops::Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        debug_assert!(
            row < self.nrows && col < self.ncols,
            "Matrix index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols
        );
        &self.data[row + col * self.nrows]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        debug_assert!(
            row < self.nrows && col < self.ncols,
            "Matrix index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols
        );
        &mut self.data[row + col * self.nrows]
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Matrix({}x{})", self.nrows, self.ncols)
    }
}
