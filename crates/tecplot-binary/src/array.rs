//! Row-major 2-D arrays produced by the zone data decoder.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Array2<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Array2<T> {
    /// Wrap row-major `data`. Returns `None` if the length is not `rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<T>) -> Option<Self> {
        (rows.checked_mul(cols)? == data.len()).then_some(Self { rows, cols, data })
    }

    /// Build `[rows][cols]` from column-major `data` (`cols` runs of `rows` values).
    pub fn from_column_major(rows: usize, cols: usize, data: &[T]) -> Option<Self> {
        if rows.checked_mul(cols)? != data.len() {
            return None;
        }
        let mut out = Vec::with_capacity(data.len());
        for r in 0..rows {
            out.extend((0..cols).map(|c| data[c * rows + r]));
        }
        Some(Self {
            rows,
            cols,
            data: out,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column(&self, col: usize) -> Vec<T> {
        self.data.iter().skip(col).step_by(self.cols.max(1)).copied().collect()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Array2<U> {
        Array2 {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Split into columns `[0, at)` and `[at, cols)`.
    pub fn split_columns(&self, at: usize) -> (Self, Self) {
        let at = at.min(self.cols);
        let mut left = Vec::with_capacity(self.rows * at);
        let mut right = Vec::with_capacity(self.rows * (self.cols - at));
        for r in 0..self.rows {
            let row = self.row(r);
            left.extend_from_slice(&row[..at]);
            right.extend_from_slice(&row[at..]);
        }
        (
            Self {
                rows: self.rows,
                cols: at,
                data: left,
            },
            Self {
                rows: self.rows,
                cols: self.cols - at,
                data: right,
            },
        )
    }
}

impl<T: Copy + Ord> Array2<T> {
    pub fn min(&self) -> Option<T> {
        self.data.iter().copied().min()
    }

    pub fn max(&self) -> Option<T> {
        self.data.iter().copied().max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_major_is_transposed() {
        // two variables, three nodes
        let a = Array2::from_column_major(3, 2, &[1, 2, 3, 10, 20, 30]).unwrap();
        assert_eq!(a.shape(), (3, 2));
        assert_eq!(a.row(0), &[1, 10]);
        assert_eq!(a.row(2), &[3, 30]);
        assert_eq!(a.column(1), vec![10, 20, 30]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert!(Array2::from_row_major(2, 2, vec![1, 2, 3]).is_none());
        assert!(Array2::<i32>::from_column_major(2, 2, &[1]).is_none());
    }

    #[test]
    fn split_columns() {
        let a = Array2::from_row_major(2, 4, vec![0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        let (xyz, rest) = a.split_columns(3);
        assert_eq!(xyz.as_slice(), &[0, 1, 2, 4, 5, 6]);
        assert_eq!(rest.shape(), (2, 1));
        assert_eq!(rest.column(0), vec![3, 7]);
    }

    #[test]
    fn min_max_and_get() {
        let a = Array2::from_row_major(1, 3, vec![4, -1, 9]).unwrap();
        assert_eq!(a.min(), Some(-1));
        assert_eq!(a.max(), Some(9));
        assert_eq!(a.get(0, 2), Some(9));
        assert_eq!(a.get(1, 0), None);
    }
}
