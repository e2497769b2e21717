//! Lexicographic ordering of solutions by successive objectives.
//!
//! Rows are compared on the first objective, ties are broken on the second,
//! and so on. The sort is stable, so rows equal in every objective keep their
//! relative order. This gives a reproducible total order used to canonicalize
//! the output of [`assign_fronts_naive_precomputed`].
//!
//! [`assign_fronts_naive_precomputed`]: crate::naive::assign_fronts_naive_precomputed

use std::{borrow::Cow, cmp::Ordering};

use crate::{matrix::ObjectiveMatrix, score::Score};

/// Compares two rows lexicographically, ascending.
///
/// Components are compared with [`f64::total_cmp`], so the order is total even
/// for non-finite scores: `NaN` sorts after `+inf` and `-0.0` before `0.0`.
pub fn lexicographic_cmp(a: &[Score], b: &[Score]) -> Ordering {
  a.iter()
    .zip(b)
    .map(|(x, y)| x.total_cmp(y))
    .find(|ord| ord.is_ne())
    .unwrap_or(Ordering::Equal)
}

/// Returns the stable permutation that sorts the rows of `matrix`
/// lexicographically: position `k` holds the index of the `k`-th smallest row.
pub fn lexicographic_order(matrix: &ObjectiveMatrix) -> Vec<usize> {
  let mut order: Vec<usize> = (0..matrix.rows()).collect();
  order.sort_by(|&a, &b| lexicographic_cmp(matrix.row(a), matrix.row(b)));
  order
}

/// Sorts rows of `matrix` lexicographically in place.
pub fn presort_in_place(matrix: &mut ObjectiveMatrix) {
  let order = lexicographic_order(matrix);
  let mut labels = vec![(); order.len()];
  let mut visited = vec![false; order.len()];
  matrix.permute_rows(&order, &mut labels, &mut visited);
}

/// Returns a lexicographically sorted copy of `matrix`.
pub fn presorted(matrix: &ObjectiveMatrix) -> ObjectiveMatrix {
  matrix.gather_rows(&lexicographic_order(matrix))
}

/// Sorts rows of `matrix` lexicographically, ascending on the first
/// objective, then on the second for ties, and so on.
///
/// With `inplace` the buffer itself is reordered and borrowed back. Otherwise
/// `matrix` is left untouched and a sorted copy is returned.
///
/// # Examples
/// ```
/// use std::borrow::Cow;
/// use ndsort::{presort, ObjectiveMatrix};
///
/// let mut x = ObjectiveMatrix::from_rows([[1.0, 0.0], [0.0, 2.0], [0.0, 1.0]])?;
/// let sorted = presort(&mut x, false).into_owned();
/// assert_eq!(sorted.as_slice(), &[0.0, 1.0, 0.0, 2.0, 1.0, 0.0]);
/// assert_eq!(x.row(0), &[1.0, 0.0]);
///
/// assert!(matches!(presort(&mut x, true), Cow::Borrowed(_)));
/// assert_eq!(x, sorted);
/// # Ok::<(), ndsort::Error>(())
/// ```
pub fn presort(
  matrix: &mut ObjectiveMatrix,
  inplace: bool,
) -> Cow<'_, ObjectiveMatrix> {
  if inplace {
    presort_in_place(matrix);
    Cow::Borrowed(matrix)
  } else {
    Cow::Owned(presorted(matrix))
  }
}

#[cfg(test)]
mod tests {
  use rand::prelude::*;

  use super::*;

  /// Random matrix rounded to one decimal so that ties are common.
  fn random_matrix(rows: usize, cols: usize) -> ObjectiveMatrix {
    let mut rng = StdRng::seed_from_u64(7);
    let data = (0..rows * cols)
      .map(|_| (rng.gen::<Score>() * 10.0).round() / 10.0)
      .collect();
    ObjectiveMatrix::from_vec(rows, cols, data).unwrap()
  }

  fn is_sorted(matrix: &ObjectiveMatrix) -> bool {
    (1..matrix.rows()).all(|i| {
      lexicographic_cmp(matrix.row(i - 1), matrix.row(i)) != Ordering::Greater
    })
  }

  #[test]
  fn test_lexicographic_cmp() {
    assert_eq!(lexicographic_cmp(&[0.0, 5.0], &[1.0, 0.0]), Ordering::Less);
    assert_eq!(lexicographic_cmp(&[1.0, 5.0], &[1.0, 0.0]), Ordering::Greater);
    assert_eq!(lexicographic_cmp(&[1.0, 0.0], &[1.0, 0.0]), Ordering::Equal);
    assert_eq!(
      lexicographic_cmp(&[Score::NAN, 0.0], &[1.0, 1.0]),
      Ordering::Greater
    );
    assert_eq!(
      lexicographic_cmp(&[1.0, Score::NAN], &[1.0, Score::INFINITY]),
      Ordering::Greater
    );
    assert_eq!(
      lexicographic_cmp(&[Score::NAN, 2.0], &[Score::NAN, 3.0]),
      Ordering::Less
    );
  }

  #[test]
  fn test_presort_with_nan() {
    let mut rng = StdRng::seed_from_u64(11);
    let data = (0..2000 * 2)
      .map(|_| {
        if rng.gen_bool(0.3) {
          Score::NAN
        } else {
          rng.gen::<Score>()
        }
      })
      .collect();
    let mut x = ObjectiveMatrix::from_vec(2000, 2, data).unwrap();
    let copy = presort(&mut x, false).into_owned();
    assert!(is_sorted(&copy));
    presort(&mut x, true);
    assert!(is_sorted(&x));
    assert_eq!(
      x.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
      copy.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>()
    );
    // every row with a NaN first objective comes last
    let finite = x.iter_rows().take_while(|r| !r[0].is_nan()).count();
    assert!(x.iter_rows().skip(finite).all(|r| r[0].is_nan()));
  }

  #[test]
  fn test_presort_inplace_true() {
    let mut x = random_matrix(100, 5);
    let expected = presorted(&x);
    let ptr: *const ObjectiveMatrix = &x;
    let out = presort(&mut x, true);
    assert!(std::ptr::eq(out.as_ref(), ptr));
    assert!(is_sorted(&out));
    assert_eq!(x, expected);
  }

  #[test]
  fn test_presort_inplace_false() {
    let mut x = random_matrix(100, 5);
    let original = x.clone();
    let out = presort(&mut x, false).into_owned();
    assert!(is_sorted(&out));
    assert_eq!(x, original);
    assert_eq!(out.rows(), original.rows());
  }

  #[test]
  fn test_presort_idempotent() {
    let once = presorted(&random_matrix(50, 3));
    let twice = presorted(&once);
    assert_eq!(once, twice);
    assert_eq!(lexicographic_order(&once), (0..50).collect::<Vec<_>>());
  }

  #[test]
  fn test_presort_stable() {
    let x = ObjectiveMatrix::from_rows([[1.0, 1.0], [0.0, 3.0], [1.0, 1.0]])
      .unwrap();
    assert_eq!(lexicographic_order(&x), vec![1, 0, 2]);
  }

  #[test]
  fn test_presort_empty() {
    let mut x = ObjectiveMatrix::new(0, 3);
    assert_eq!(presort(&mut x, false).cols(), 3);
    assert!(presort(&mut x, true).is_empty());
  }
}
