//! Rectangular grid storage shared by pixel images and quantized code maps
//!
//! Cells are addressed as (x, y) where y selects the row (outer, vertical
//! axis) and x the column. Iteration is always row-major: top to bottom,
//! then left to right within a row.

use ndarray::{Array2, ArrayView1, Axis};

use crate::io::error::{PixelMapError, Result};

/// Rectangular 2D grid backed by an `ndarray` array indexed `[row, col]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Array2<T>,
}

impl<T> Grid<T> {
    /// Build a grid from nested rows
    ///
    /// A grid with zero rows has dimensions (0, 0).
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if any row length differs from the first row
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        let mut flat = Vec::with_capacity(height * width);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(PixelMapError::DimensionMismatch {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            flat.extend(row);
        }

        let cells = Array2::from_shape_vec((height, width), flat).map_err(|e| {
            PixelMapError::InvalidParameter {
                parameter: "rows",
                value: format!("{height}x{width}"),
                reason: e.to_string(),
            }
        })?;

        Ok(Self { cells })
    }

    /// Wrap an existing array indexed `[row, col]`
    pub const fn from_array(cells: Array2<T>) -> Self {
        Self { cells }
    }

    /// Get the number of rows in the grid
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Get the number of columns in the grid
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Check if the grid holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at column x, row y
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.cells.get([y, x])
    }

    /// Iterate rows from top to bottom
    pub fn row_views(&self) -> impl Iterator<Item = ArrayView1<'_, T>> {
        self.cells.axis_iter(Axis(0))
    }

    /// Iterate cells in row-major order as ((x, y), cell)
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((col, row), cell))
    }

    /// Apply a function to every cell, keeping the shape
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            cells: self.cells.map(f),
        }
    }

    /// Underlying array indexed `[row, col]`
    pub const fn as_array(&self) -> &Array2<T> {
        &self.cells
    }
}
