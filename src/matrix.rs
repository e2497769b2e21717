//! Dense row-major buffers the sorting routines operate on.

use std::fmt;

use crate::{
  error::{ensure_shape, Error, Result, Shape},
  relation::Dominance,
  score::Score,
};

/// An `N x M` table of objective scores: one row per solution, one column per
/// objective. Rows are stored contiguously.
#[derive(Clone, PartialEq, Default)]
pub struct ObjectiveMatrix {
  data: Vec<Score>,
  rows: usize,
  cols: usize,
}

impl ObjectiveMatrix {
  /// Creates a zero-filled matrix of `rows` solutions and `cols` objectives.
  ///
  /// # Panics
  ///
  /// Panics if `rows * cols` overflows `usize`.
  pub fn new(rows: usize, cols: usize) -> Self {
    let len = rows.checked_mul(cols).unwrap_or_else(|| {
      panic!("a {rows} x {cols} objective matrix overflows usize")
    });
    Self {
      data: vec![0.0; len],
      rows,
      cols,
    }
  }

  /// Wraps a row-major vector of scores.
  ///
  /// Fails with [`ShapeMismatch`](crate::Error::ShapeMismatch) if
  /// `data.len() != rows * cols`, or if `rows * cols` overflows `usize`.
  pub fn from_vec(rows: usize, cols: usize, data: Vec<Score>) -> Result<Self> {
    let Some(len) = rows.checked_mul(cols) else {
      return Err(Error::ShapeMismatch {
        buffer: "data",
        expected: Shape::Matrix(rows, cols),
        received: Shape::Vector(data.len()),
      });
    };
    ensure_shape("data", Shape::Vector(len), Shape::Vector(data.len()))?;
    Ok(Self { data, rows, cols })
  }

  /// Collects rows of equal length into a matrix.
  ///
  /// Fails with [`ShapeMismatch`](crate::Error::ShapeMismatch) if the rows are
  /// ragged. An empty iterator gives an empty `0 x 0` matrix.
  pub fn from_rows<R, I>(rows: I) -> Result<Self>
  where
    R: AsRef<[Score]>,
    I: IntoIterator<Item = R>,
  {
    let mut matrix = Self::default();
    for (i, row) in rows.into_iter().enumerate() {
      let row = row.as_ref();
      if i == 0 {
        matrix.cols = row.len();
      } else {
        ensure_shape(
          "row",
          Shape::Vector(matrix.cols),
          Shape::Vector(row.len()),
        )?;
      }
      matrix.data.extend_from_slice(row);
      matrix.rows += 1;
    }
    Ok(matrix)
  }

  /// Number of solutions.
  pub fn rows(&self) -> usize {
    self.rows
  }

  /// Number of objectives.
  pub fn cols(&self) -> usize {
    self.cols
  }

  /// Returns `true` if there are no solutions.
  pub fn is_empty(&self) -> bool {
    self.rows == 0
  }

  /// `(rows, cols)`.
  pub fn shape(&self) -> Shape {
    Shape::Matrix(self.rows, self.cols)
  }

  /// Scores of solution `i`.
  ///
  /// # Panics
  ///
  /// Panics if `i >= self.rows()`.
  pub fn row(&self, i: usize) -> &[Score] {
    &self.data[i * self.cols..(i + 1) * self.cols]
  }

  /// Mutable scores of solution `i`.
  ///
  /// # Panics
  ///
  /// Panics if `i >= self.rows()`.
  pub fn row_mut(&mut self, i: usize) -> &mut [Score] {
    &mut self.data[i * self.cols..(i + 1) * self.cols]
  }

  /// Iterates over rows in order.
  pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[Score]> + '_ {
    (0..self.rows).map(move |i| self.row(i))
  }

  /// The underlying row-major buffer.
  pub fn as_slice(&self) -> &[Score] {
    &self.data
  }

  /// Consumes the matrix, returning the row-major buffer.
  pub fn into_vec(self) -> Vec<Score> {
    self.data
  }

  /// Swaps rows `i` and `j` in place.
  ///
  /// # Panics
  ///
  /// Panics if either index is out of bounds.
  pub fn swap_rows(&mut self, i: usize, j: usize) {
    if i == j {
      return;
    }
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    let (head, tail) = self.data.split_at_mut(hi * self.cols);
    head[lo * self.cols..(lo + 1) * self.cols]
      .swap_with_slice(&mut tail[..self.cols]);
  }

  /// Returns a new matrix whose row `k` is row `order[k]` of `self`.
  pub(crate) fn gather_rows(&self, order: &[usize]) -> Self {
    let mut data = Vec::with_capacity(order.len() * self.cols);
    for &i in order {
      data.extend_from_slice(self.row(i));
    }
    Self {
      data,
      rows: order.len(),
      cols: self.cols,
    }
  }

  /// Reorders rows so that row `k` becomes the former row `order[k]`, swapping
  /// `labels` along with them. `visited` is scratch space.
  ///
  /// `order` must be a permutation of `0..rows`, and `labels` and `visited`
  /// must have `rows` entries. Runs in `O(N * M)` without allocating.
  pub(crate) fn permute_rows<T>(
    &mut self,
    order: &[usize],
    labels: &mut [T],
    visited: &mut [bool],
  ) {
    debug_assert_eq!(order.len(), self.rows);
    debug_assert_eq!(labels.len(), self.rows);
    debug_assert_eq!(visited.len(), self.rows);

    visited.fill(false);
    for start in 0..self.rows {
      if visited[start] {
        continue;
      }
      // walk the cycle through `start`, pulling each source into place
      let mut k = start;
      loop {
        visited[k] = true;
        let src = order[k];
        if src == start {
          break;
        }
        self.swap_rows(k, src);
        labels.swap(k, src);
        k = src;
      }
    }
  }
}

impl fmt::Debug for ObjectiveMatrix {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter_rows()).finish()
  }
}

/// Pairwise dominance relationships of a population: cell `(i, j)` holds how
/// row `i` relates to row `j`.
///
/// After [`build_dominance_matrix`](crate::relation::build_dominance_matrix)
/// the diagonal is `NonDominated` and `get(i, j) == get(j, i).reverse()`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct DominanceMatrix {
  data: Vec<Dominance>,
  len: usize,
}

impl DominanceMatrix {
  /// Allocates an `n x n` matrix filled with `NonDominated`.
  ///
  /// # Panics
  ///
  /// Panics if `n * n` overflows `usize`.
  pub fn new(n: usize) -> Self {
    Self {
      data: vec![Dominance::NonDominated; square_len(n)],
      len: n,
    }
  }

  /// Number of rows (and columns).
  pub fn len(&self) -> usize {
    self.len
  }

  /// Returns `true` for a `0 x 0` matrix.
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// `(n, n)`.
  pub fn shape(&self) -> Shape {
    Shape::Matrix(self.len, self.len)
  }

  /// Relationship of solution `i` to solution `j`.
  ///
  /// # Panics
  ///
  /// Panics if either index is out of bounds.
  pub fn get(&self, i: usize, j: usize) -> Dominance {
    debug_assert!(j < self.len);
    self.data[i * self.len + j]
  }

  /// Relationships of solution `i` to every solution.
  pub fn row(&self, i: usize) -> &[Dominance] {
    &self.data[i * self.len..(i + 1) * self.len]
  }

  /// Resizes to `n x n`, reusing the allocation where possible. Contents are
  /// unspecified afterwards.
  pub(crate) fn resize(&mut self, n: usize) {
    self.data.resize(square_len(n), Dominance::NonDominated);
    self.len = n;
  }

  pub(crate) fn as_mut_slice(&mut self) -> &mut [Dominance] {
    &mut self.data
  }
}

fn square_len(n: usize) -> usize {
  n.checked_mul(n)
    .unwrap_or_else(|| panic!("a {n} x {n} dominance matrix overflows usize"))
}

impl fmt::Debug for DominanceMatrix {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list()
      .entries((0..self.len).map(|i| {
        self.row(i).iter().map(|d| d.as_i8()).collect::<Vec<_>>()
      }))
      .finish()
  }
}
