//! Pareto dominance between objective vectors and over whole populations.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::{
  error::{ensure_shape, Result, Shape},
  matrix::{DominanceMatrix, ObjectiveMatrix},
  score::{ParetoDominance, Score},
};

/// How one objective vector relates to another under pareto dominance.
///
/// Encoded as `-1`, `0` and `1` so that relationships of a pair read as a
/// skew-symmetric matrix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(i8)]
pub enum Dominance {
  /// The first vector dominates the second.
  Dominates = -1,
  /// Neither vector dominates the other, including equal vectors.
  #[default]
  NonDominated = 0,
  /// The first vector is dominated by the second.
  Dominated = 1,
}

impl Dominance {
  /// Classifies a pair from whether the first vector is strictly better in
  /// some objective (`better`) and strictly worse in some objective (`worse`).
  pub(crate) fn from_flags(better: bool, worse: bool) -> Self {
    match (better, worse) {
      (true, false) => Dominance::Dominates,
      (false, true) => Dominance::Dominated,
      _ => Dominance::NonDominated,
    }
  }

  /// `-1`, `0` or `1`.
  pub fn as_i8(self) -> i8 {
    self as i8
  }

  /// The relationship seen from the other side of the pair.
  pub fn reverse(self) -> Self {
    match self {
      Dominance::Dominates => Dominance::Dominated,
      Dominance::NonDominated => Dominance::NonDominated,
      Dominance::Dominated => Dominance::Dominates,
    }
  }
}

impl TryFrom<i8> for Dominance {
  type Error = i8;

  fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
    match value {
      -1 => Ok(Dominance::Dominates),
      0 => Ok(Dominance::NonDominated),
      1 => Ok(Dominance::Dominated),
      other => Err(other),
    }
  }
}

/// `Less` means "dominates", mirroring "smaller is better".
impl From<Ordering> for Dominance {
  fn from(ord: Ordering) -> Self {
    match ord {
      Ordering::Less => Dominance::Dominates,
      Ordering::Equal => Dominance::NonDominated,
      Ordering::Greater => Dominance::Dominated,
    }
  }
}

impl From<Dominance> for Ordering {
  fn from(dom: Dominance) -> Self {
    dom.as_i8().cmp(&0)
  }
}

/// Determines the dominance relationship of `x` to `y`, minimizing every
/// objective.
///
/// `x` dominates `y` if no component of `x` is greater than its counterpart
/// in `y` and at least one is strictly less. A vector never dominates itself.
///
/// Fails with [`ShapeMismatch`](crate::Error::ShapeMismatch) if the lengths
/// differ.
///
/// # Examples
/// ```
/// use ndsort::{relation, Dominance};
///
/// assert_eq!(relation(&[0.0, 0.0], &[1.0, 0.0]), Ok(Dominance::Dominates));
/// assert_eq!(relation(&[0.0, 1.0], &[1.0, 0.0]), Ok(Dominance::NonDominated));
/// assert_eq!(relation(&[1.0, 1.0], &[0.0, 1.0]), Ok(Dominance::Dominated));
/// ```
pub fn relation(x: &[Score], y: &[Score]) -> Result<Dominance> {
  ensure_shape("y", Shape::Vector(x.len()), Shape::Vector(y.len()))?;
  Ok(x.dominance(y))
}

/// Determines the dominance relationship of `x` to `y`, maximizing every
/// objective. Equivalent to [`relation`] applied to the negated vectors.
pub fn relation_maximizing(x: &[Score], y: &[Score]) -> Result<Dominance> {
  ensure_shape("y", Shape::Vector(x.len()), Shape::Vector(y.len()))?;
  Ok(x.maximizing_dominance(y))
}

/// Fills `out` with the dominance relationship of every ordered pair of rows
/// of `matrix`, diagonal included. Costs `N^2` comparisons of `M` objectives.
///
/// Fails with [`ShapeMismatch`](crate::Error::ShapeMismatch) before writing
/// anything if `out` is not `N x N`.
pub fn build_dominance_matrix(
  matrix: &ObjectiveMatrix,
  out: &mut DominanceMatrix,
) -> Result<()> {
  check_dominance_shape(matrix, out)?;
  let n = matrix.rows();
  for (i, cell) in out.as_mut_slice().iter_mut().enumerate() {
    *cell = matrix.row(i / n).dominance(matrix.row(i % n));
  }
  Ok(())
}

/// Same as [`build_dominance_matrix`], filling rows of `out` in parallel on
/// the [rayon] global thread pool. The result is identical.
///
/// Worth it only for large populations, benchmark if in doubt.
pub fn par_build_dominance_matrix(
  matrix: &ObjectiveMatrix,
  out: &mut DominanceMatrix,
) -> Result<()> {
  check_dominance_shape(matrix, out)?;
  let n = matrix.rows();
  if n == 0 {
    return Ok(());
  }
  out
    .as_mut_slice()
    .par_chunks_mut(n)
    .enumerate()
    .for_each(|(i, cells)| {
      let x = matrix.row(i);
      for (j, cell) in cells.iter_mut().enumerate() {
        *cell = x.dominance(matrix.row(j));
      }
    });
  Ok(())
}

fn check_dominance_shape(
  matrix: &ObjectiveMatrix,
  out: &DominanceMatrix,
) -> Result<()> {
  let n = matrix.rows();
  ensure_shape("dom", Shape::Matrix(n, n), out.shape())
}
