use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{MlErr, Result};

/// A read-only grid of `height` rows by `width` columns.
///
/// Every transformation returns a new `Matrix`, there's no way of mutating one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Array2<f32>,
}

impl Matrix {
    /// Creates a new `Matrix` with every cell set to `value`.
    ///
    /// # Arguments
    /// * `width` - The amount of columns.
    /// * `height` - The amount of rows.
    /// * `value` - The value of every cell.
    ///
    /// # Returns
    /// A new `Matrix` instance.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            data: Array2::from_elem((height, width), value),
        }
    }

    /// Creates a new `Matrix` by calling `f(column, row)` once per cell.
    ///
    /// # Arguments
    /// * `width` - The amount of columns.
    /// * `height` - The amount of rows.
    /// * `f` - The generator of each cell's value.
    ///
    /// # Returns
    /// A new `Matrix` instance.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        Self {
            data: Array2::from_shape_fn((height, width), |(row, col)| f(col, row)),
        }
    }

    /// Wraps an already built array of rows.
    ///
    /// # Arguments
    /// * `rows` - The rows of the matrix, all of them must have the same length.
    ///
    /// # Returns
    /// A new `Matrix` or `MlErr::RaggedMatrix` if any row's length differs from the first one.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(MlErr::RaggedMatrix {
                row,
                got: r.len(),
                expected: width,
            });
        }

        let data: Vec<f32> = rows.into_iter().flatten().collect();
        Self::from_vec(width, height, data)
    }

    /// Wraps a flat, row major, vec of values.
    ///
    /// # Returns
    /// A new `Matrix` or `MlErr::SizeMismatch` if `data` doesn't hold exactly `width * height` values.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        let got = data.len();
        let data = Array2::from_shape_vec((height, width), data).map_err(|_| {
            MlErr::SizeMismatch {
                what: "matrix data",
                got,
                expected: width * height,
            }
        })?;

        Ok(Self { data })
    }

    /// The amount of columns.
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// The amount of rows.
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// The amount of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a copy of the `i`-th row.
    ///
    /// # Returns
    /// The row or `MlErr::IndexOutOfRange` if there's no such row.
    pub fn row(&self, i: usize) -> Result<Array1<f32>> {
        if i >= self.height() {
            return Err(MlErr::IndexOutOfRange {
                what: "row",
                index: i,
                len: self.height(),
            });
        }

        Ok(self.data.row(i).to_owned())
    }

    /// Returns a copy of the `j`-th column.
    ///
    /// # Returns
    /// The column or `MlErr::IndexOutOfRange` if there's no such column.
    pub fn column(&self, j: usize) -> Result<Array1<f32>> {
        if j >= self.width() {
            return Err(MlErr::IndexOutOfRange {
                what: "column",
                index: j,
                len: self.width(),
            });
        }

        Ok(self.data.column(j).to_owned())
    }

    /// Builds a new matrix of the same shape by applying `f(row, row_index, whole)` to every row.
    ///
    /// # Arguments
    /// * `f` - The row mapping, it must return exactly `width` values.
    ///
    /// # Returns
    /// The mapped matrix or `MlErr::RaggedMatrix` if `f` changed the length of some row.
    pub fn map<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(ArrayView1<f32>, usize, ArrayView2<f32>) -> Array1<f32>,
    {
        let width = self.width();
        let mut data = Vec::with_capacity(self.len());

        for (i, row) in self.data.rows().into_iter().enumerate() {
            let mapped = f(row, i, self.data.view());
            if mapped.len() != width {
                return Err(MlErr::RaggedMatrix {
                    row: i,
                    got: mapped.len(),
                    expected: width,
                });
            }

            data.extend(mapped);
        }

        Self::from_vec(width, self.height(), data)
    }

    /// A read-only view over the cells.
    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    /// Iterates the cells in row major order.
    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.data.iter()
    }

    /// The largest absolute value in the matrix, `0` for an empty one.
    pub fn max_abs(&self) -> f32 {
        self.data.iter().fold(0., |acc, x| acc.max(x.abs()))
    }
}
