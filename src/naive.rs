//! Naive non-dominated sorting.
//!
//! Both algorithms repeatedly peel the set of rows that nothing else in the
//! remaining population dominates, labelling it with the next front index.
//! They differ in how dominance is looked up and in how rows end up ordered:
//!
//! - [`assign_fronts_naive`] recomputes dominance on every round
//!   (`O(M * N^3)` worst case) and swaps each front to the head of the
//!   remaining rows, so rows of a front appear in discovery order.
//! - [`assign_fronts_naive_precomputed`] builds the dominance matrix once
//!   (`O(M * N^2)`), peels by matrix lookups, then sorts rows by front and
//!   lexicographically by objectives within a front. Its output order is
//!   canonical.
//!
//! Every buffer is supplied by the caller and nothing population-sized is
//! allocated, so the same buffers can be reused across generations of an
//! evolutionary algorithm. The buffers carry no synchronization; a caller
//! sharing them between threads must serialize access.

use std::borrow::Cow;

use crate::{
  error::{ensure_shape, Result, Shape},
  execution::Execution,
  fronts::FrontIndex,
  matrix::{DominanceMatrix, ObjectiveMatrix},
  presort::lexicographic_cmp,
  relation::Dominance,
  score::ParetoDominance,
};

// marks a row outside of the front being peeled
const UNASSIGNED: FrontIndex = FrontIndex::MAX;

/// Assigns every row of `matrix` a front index, recomputing dominance
/// relationships on each round, and groups rows by front.
///
/// On return `fronts[k]` is the front of row `k` of the returned matrix,
/// rows of front `0` come first, then front `1`, and so on. Within a front
/// rows keep the order in which they were discovered.
///
/// With `inplace` the rows of `matrix` are permuted and the buffer is borrowed
/// back. Otherwise `matrix` is left untouched and the reordered copy is
/// returned.
///
/// Fails with [`ShapeMismatch`](crate::Error::ShapeMismatch) if
/// `fronts.len() != matrix.rows()`.
///
/// # Examples
/// ```
/// use ndsort::{assign_fronts_naive, ObjectiveMatrix};
///
/// let mut x = ObjectiveMatrix::from_rows([[1.0, 1.0], [0.0, 1.0], [1.0, 0.0]])?;
/// let mut fronts = vec![0; 3];
/// let out = assign_fronts_naive(&mut x, &mut fronts, true)?;
/// assert_eq!(out.as_slice(), &[0.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
/// assert_eq!(fronts, [0, 0, 1]);
/// # Ok::<(), ndsort::Error>(())
/// ```
pub fn assign_fronts_naive<'a>(
  matrix: &'a mut ObjectiveMatrix,
  fronts: &mut [FrontIndex],
  inplace: bool,
) -> Result<Cow<'a, ObjectiveMatrix>> {
  ensure_shape(
    "front",
    Shape::Vector(matrix.rows()),
    Shape::Vector(fronts.len()),
  )?;
  if inplace {
    peel_by_swapping(matrix, fronts);
    Ok(Cow::Borrowed(matrix))
  } else {
    let mut out = matrix.clone();
    peel_by_swapping(&mut out, fronts);
    Ok(Cow::Owned(out))
  }
}

/// Assigns every row of `matrix` a front index using a precomputed dominance
/// matrix, then sorts rows by front and, within a front, lexicographically by
/// objectives.
///
/// `dom` must be `N x N`; `fronts`, `rem` and `mask` must have `N` entries.
/// `dom`, `rem` and `mask` are scratch space and their contents on return are
/// unspecified. On return `fronts[k]` is the front of row `k` of `matrix`.
///
/// Fails with [`ShapeMismatch`](crate::Error::ShapeMismatch) before touching
/// any buffer if one of them has the wrong size.
///
/// # Examples
/// ```
/// use ndsort::{assign_fronts_naive_precomputed, DominanceMatrix, ObjectiveMatrix};
///
/// let mut x = ObjectiveMatrix::from_rows([[1.0, 1.0], [1.0, 0.0], [0.0, 1.0]])?;
/// let (mut fronts, mut rem, mut mask) = (vec![0; 3], vec![0; 3], vec![false; 3]);
/// let mut dom = DominanceMatrix::new(3);
/// assign_fronts_naive_precomputed(&mut x, &mut fronts, &mut dom, &mut rem, &mut mask)?;
/// assert_eq!(x.as_slice(), &[0.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
/// assert_eq!(fronts, [0, 0, 1]);
/// # Ok::<(), ndsort::Error>(())
/// ```
pub fn assign_fronts_naive_precomputed(
  matrix: &mut ObjectiveMatrix,
  fronts: &mut [FrontIndex],
  dom: &mut DominanceMatrix,
  rem: &mut [usize],
  mask: &mut [bool],
) -> Result<()> {
  assign_fronts_precomputed_with(
    Execution::Sequential,
    matrix,
    fronts,
    dom,
    rem,
    mask,
  )
  .map(|_| ())
}

/// [`assign_fronts_naive_precomputed`] with a choice of how the dominance
/// matrix is built. Returns the number of fronts.
pub(crate) fn assign_fronts_precomputed_with(
  execution: Execution,
  matrix: &mut ObjectiveMatrix,
  fronts: &mut [FrontIndex],
  dom: &mut DominanceMatrix,
  rem: &mut [usize],
  mask: &mut [bool],
) -> Result<usize> {
  let n = matrix.rows();
  ensure_shape("front", Shape::Vector(n), Shape::Vector(fronts.len()))?;
  ensure_shape("dom", Shape::Matrix(n, n), dom.shape())?;
  ensure_shape("rem", Shape::Vector(n), Shape::Vector(rem.len()))?;
  ensure_shape("mask", Shape::Vector(n), Shape::Vector(mask.len()))?;

  execution.build_dominance_matrix(matrix, dom)?;
  let count = peel_precomputed(dom, fronts, rem, mask);

  // order by front, then objectives; the index tie-break makes the unstable
  // sort agree with a stable one without allocating
  for (i, r) in rem.iter_mut().enumerate() {
    *r = i;
  }
  rem.sort_unstable_by(|&a, &b| {
    fronts[a]
      .cmp(&fronts[b])
      .then_with(|| lexicographic_cmp(matrix.row(a), matrix.row(b)))
      .then(a.cmp(&b))
  });
  matrix.permute_rows(rem, fronts, mask);

  Ok(count)
}

/// Peels fronts off rows `[start, N)`, swapping each found front to `start`.
/// `fronts` doubles as the per-round marker. Returns the number of fronts.
fn peel_by_swapping(
  matrix: &mut ObjectiveMatrix,
  fronts: &mut [FrontIndex],
) -> usize {
  let n = matrix.rows();
  let mut start = 0;
  let mut front = 0;

  while start < n {
    for indiv in start..n {
      let x = matrix.row(indiv);
      let dominated = (start..indiv)
        .chain(indiv + 1..n)
        .any(|other| x.dominance(matrix.row(other)) == Dominance::Dominated);
      fronts[indiv] = if dominated { UNASSIGNED } else { front };
    }

    let round_start = start;
    for ix in start..n {
      if fronts[ix] == front {
        matrix.swap_rows(ix, start);
        fronts.swap(ix, start);
        start += 1;
      }
    }
    // non-finite scores can leave every remaining row dominated
    if start == round_start {
      fronts[start..].fill(front);
      start = n;
    }

    front += 1;
  }

  front
}

/// Peels fronts using lookups into a built dominance matrix, labelling rows by
/// their original index. Returns the number of fronts.
fn peel_precomputed(
  dom: &DominanceMatrix,
  fronts: &mut [FrontIndex],
  rem: &mut [usize],
  mask: &mut [bool],
) -> usize {
  for (i, r) in rem.iter_mut().enumerate() {
    *r = i;
  }
  let mut nrem = rem.len();
  let mut front = 0;

  while nrem > 0 {
    let remaining = &rem[..nrem];
    for (i, &ix) in remaining.iter().enumerate() {
      let relations = dom.row(ix);
      mask[i] = !remaining
        .iter()
        .any(|&jx| relations[jx] == Dominance::Dominated);
      if mask[i] {
        fronts[ix] = front;
      }
    }

    // shift survivors left, keeping their relative order
    let mut kept = 0;
    for i in 0..nrem {
      if !mask[i] {
        rem[kept] = rem[i];
        kept += 1;
      }
    }
    // non-finite scores can leave every remaining row dominated
    if kept == nrem {
      for &ix in &rem[..nrem] {
        fronts[ix] = front;
      }
      kept = 0;
    }

    nrem = kept;
    front += 1;
  }

  front
}

#[cfg(test)]
mod tests {
  use rand::prelude::*;

  use super::*;
  use crate::{fronts::check_fronts, score::Score, Error};

  fn random_matrix(rows: usize, cols: usize, seed: u64) -> ObjectiveMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..rows * cols).map(|_| rng.gen()).collect();
    ObjectiveMatrix::from_vec(rows, cols, data).unwrap()
  }

  fn scenario() -> ObjectiveMatrix {
    ObjectiveMatrix::from_rows([
      [0.0, 0.0],
      [1.0, 1.0],
      [0.0, 1.0],
      [1.0, 0.0],
      [2.0, 2.0],
    ])
    .unwrap()
  }

  fn precomputed(x: &mut ObjectiveMatrix) -> Vec<FrontIndex> {
    let n = x.rows();
    let mut fronts = vec![0; n];
    let mut dom = DominanceMatrix::new(n);
    let mut rem = vec![0; n];
    let mut mask = vec![false; n];
    assign_fronts_naive_precomputed(x, &mut fronts, &mut dom, &mut rem, &mut mask)
      .unwrap();
    fronts
  }

  /// Rows of each front, sorted so that discovery order doesn't matter.
  fn front_sets(x: &ObjectiveMatrix, fronts: &[FrontIndex]) -> Vec<Vec<Vec<u64>>> {
    let count = fronts.iter().max().map_or(0, |f| f + 1);
    let mut sets = vec![Vec::new(); count];
    for (row, &f) in x.iter_rows().zip(fronts) {
      sets[f].push(row.iter().map(|v| v.to_bits()).collect::<Vec<_>>());
    }
    sets.iter_mut().for_each(|s| s.sort());
    sets
  }

  #[test]
  fn test_naive_scenario() {
    let mut x = scenario();
    let mut fronts = vec![0; 5];
    let out = assign_fronts_naive(&mut x, &mut fronts, true).unwrap();
    assert_eq!(
      out.as_slice(),
      &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 2.0, 2.0]
    );
    assert_eq!(fronts, [0, 1, 1, 2, 3]);
  }

  #[test]
  fn test_naive_discovery_order() {
    // [1, 0] sits before [0, 1] and stays there within front 0
    let mut x =
      ObjectiveMatrix::from_rows([[2.0, 2.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
    let mut fronts = vec![0; 3];
    assign_fronts_naive(&mut x, &mut fronts, true).unwrap();
    assert_eq!(x.as_slice(), &[1.0, 0.0, 0.0, 1.0, 2.0, 2.0]);
    assert_eq!(fronts, [0, 0, 1]);
  }

  #[test]
  fn test_naive_inplace_true() {
    let mut x = random_matrix(100, 2, 1);
    let original = x.clone();
    let mut fronts = vec![0; 100];
    let ptr: *const ObjectiveMatrix = &x;
    let out = assign_fronts_naive(&mut x, &mut fronts, true).unwrap();
    assert!(matches!(out, Cow::Borrowed(_)));
    assert!(std::ptr::eq(out.as_ref(), ptr));
    assert_eq!(check_fronts(&out, &fronts), Ok(()));

    let mut rows = front_sets(&out, &fronts).concat();
    rows.sort();
    assert_eq!(rows, front_sets(&original, &[0; 100]).concat());
  }

  #[test]
  fn test_naive_inplace_false() {
    let mut x = random_matrix(100, 2, 2);
    let original = x.clone();
    let mut fronts = vec![0; 100];
    let out = assign_fronts_naive(&mut x, &mut fronts, false)
      .unwrap()
      .into_owned();
    assert_eq!(x, original);
    assert_eq!(out.shape(), x.shape());
    assert_eq!(check_fronts(&out, &fronts), Ok(()));
  }

  #[test]
  fn test_naive_edge_cases() {
    let mut empty = ObjectiveMatrix::new(0, 2);
    assert!(assign_fronts_naive(&mut empty, &mut [], true).is_ok());

    let mut single = ObjectiveMatrix::from_rows([[3.0, 4.0]]).unwrap();
    let mut fronts = [7];
    assign_fronts_naive(&mut single, &mut fronts, true).unwrap();
    assert_eq!(fronts, [0]);

    let mut same = ObjectiveMatrix::from_rows([[1.0, 1.0]; 5]).unwrap();
    let mut fronts = [9; 5];
    assign_fronts_naive(&mut same, &mut fronts, true).unwrap();
    assert_eq!(fronts, [0; 5]);
  }

  /// Every row dominates the next one cyclically, so no row is undominated.
  fn nan_cycle() -> ObjectiveMatrix {
    let nan = Score::NAN;
    ObjectiveMatrix::from_rows([
      [0.0, nan, 1.0],
      [1.0, 0.0, nan],
      [nan, 1.0, 0.0],
    ])
    .unwrap()
  }

  fn bits(x: &ObjectiveMatrix) -> Vec<u64> {
    x.as_slice().iter().map(|v| v.to_bits()).collect()
  }

  #[test]
  fn test_naive_all_dominated() {
    let mut x = nan_cycle();
    let before = bits(&x);
    let mut fronts = vec![9; 3];
    assign_fronts_naive(&mut x, &mut fronts, true).unwrap();
    assert_eq!(fronts, [0, 0, 0]);
    assert_eq!(bits(&x), before);
  }

  #[test]
  fn test_naive_wrong_shape() {
    let mut x = scenario();
    let original = x.clone();
    let mut fronts = vec![42; 4];
    assert_eq!(
      assign_fronts_naive(&mut x, &mut fronts, true),
      Err(Error::ShapeMismatch {
        buffer: "front",
        expected: Shape::Vector(5),
        received: Shape::Vector(4),
      })
    );
    assert_eq!(x, original);
    assert_eq!(fronts, [42; 4]);
  }

  #[test]
  fn test_precomputed_scenario() {
    let mut x = scenario();
    let fronts = precomputed(&mut x);
    assert_eq!(
      x.as_slice(),
      &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 2.0, 2.0]
    );
    assert_eq!(fronts, [0, 1, 1, 2, 3]);
  }

  #[test]
  fn test_precomputed_canonical_order() {
    let mut x =
      ObjectiveMatrix::from_rows([[2.0, 2.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
    let fronts = precomputed(&mut x);
    assert_eq!(x.as_slice(), &[0.0, 1.0, 1.0, 0.0, 2.0, 2.0]);
    assert_eq!(fronts, [0, 0, 1]);

    // any permutation of the input gives the same output
    let mut shuffled = random_matrix(60, 3, 3);
    let mut reference = shuffled.clone();
    let expected_fronts = precomputed(&mut reference);
    let mut order: Vec<usize> = (0..60).collect();
    order.shuffle(&mut StdRng::seed_from_u64(4));
    let mut labels = vec![(); 60];
    shuffled.permute_rows(&order, &mut labels, &mut vec![false; 60]);
    assert_eq!(precomputed(&mut shuffled), expected_fronts);
    assert_eq!(shuffled, reference);
  }

  #[test]
  fn test_precomputed_random() {
    let mut x = random_matrix(100, 2, 5);
    let fronts = precomputed(&mut x);
    assert_eq!(check_fronts(&x, &fronts), Ok(()));
    assert!(fronts.windows(2).all(|w| w[0] <= w[1]));
  }

  #[test]
  fn test_precomputed_edge_cases() {
    let mut empty = ObjectiveMatrix::new(0, 3);
    assert!(precomputed(&mut empty).is_empty());

    let mut same = ObjectiveMatrix::from_rows([[1.0, 1.0]; 5]).unwrap();
    assert_eq!(precomputed(&mut same), [0; 5]);

    let mut chain =
      ObjectiveMatrix::from_rows([[3.0], [1.0], [0.0], [2.0]]).unwrap();
    assert_eq!(precomputed(&mut chain), [0, 1, 2, 3]);
    assert_eq!(chain.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
  }

  #[test]
  fn test_precomputed_all_dominated() {
    let mut x = nan_cycle();
    let before = bits(&x);
    assert_eq!(precomputed(&mut x), [0, 0, 0]);
    // NaN sorts last, which keeps the cycle in its input order
    assert_eq!(bits(&x), before);
  }

  #[test]
  fn test_precomputed_with_nan() {
    let mut rng = StdRng::seed_from_u64(30);
    let data = (0..500 * 2)
      .map(|_| if rng.gen_bool(0.3) { Score::NAN } else { rng.gen() })
      .collect();
    let mut x = ObjectiveMatrix::from_vec(500, 2, data).unwrap();
    let fronts = precomputed(&mut x);
    assert_eq!(fronts.len(), 500);
    assert!(fronts.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(fronts[0], 0);
  }

  #[test]
  fn test_precomputed_wrong_shapes() {
    let mut x = scenario();
    let original = x.clone();
    let mut fronts = vec![0; 5];
    let mut dom = DominanceMatrix::new(5);
    let mut rem = vec![0; 5];
    let mut mask = vec![false; 5];

    let mut short_mask = vec![false; 4];
    assert_eq!(
      assign_fronts_naive_precomputed(
        &mut x,
        &mut fronts,
        &mut dom,
        &mut rem,
        &mut short_mask
      ),
      Err(Error::ShapeMismatch {
        buffer: "mask",
        expected: Shape::Vector(5),
        received: Shape::Vector(4),
      })
    );
    let mut small_dom = DominanceMatrix::new(3);
    assert!(assign_fronts_naive_precomputed(
      &mut x,
      &mut fronts,
      &mut small_dom,
      &mut rem,
      &mut mask
    )
    .is_err());
    let mut long_rem = vec![0; 6];
    assert!(assign_fronts_naive_precomputed(
      &mut x,
      &mut fronts,
      &mut dom,
      &mut long_rem,
      &mut mask
    )
    .is_err());

    assert_eq!(x, original);
    assert_eq!(fronts, [0; 5]);
    assert_eq!(dom, DominanceMatrix::new(5));
    assert_eq!(rem, [0; 5]);
  }

  #[test]
  fn test_variants_agree() {
    for (seed, cols) in [(10, 2), (11, 3), (12, 5)] {
      let mut a = random_matrix(80, cols, seed);
      let mut b = a.clone();
      let mut fronts_a = vec![0; 80];
      assign_fronts_naive(&mut a, &mut fronts_a, true).unwrap();
      let fronts_b = precomputed(&mut b);
      assert_eq!(front_sets(&a, &fronts_a), front_sets(&b, &fronts_b));
    }
  }

  #[test]
  fn test_parallel_build_gives_same_result() {
    let mut a = random_matrix(50, 3, 20);
    let mut b = a.clone();
    let n = a.rows();
    let (mut fronts_a, mut fronts_b) = (vec![0; n], vec![0; n]);
    let mut dom = DominanceMatrix::new(n);
    let (mut rem, mut mask) = (vec![0; n], vec![false; n]);
    let count_a = assign_fronts_precomputed_with(
      Execution::Sequential,
      &mut a,
      &mut fronts_a,
      &mut dom,
      &mut rem,
      &mut mask,
    )
    .unwrap();
    let count_b = assign_fronts_precomputed_with(
      Execution::Parallel,
      &mut b,
      &mut fronts_b,
      &mut dom,
      &mut rem,
      &mut mask,
    )
    .unwrap();
    assert_eq!(count_a, count_b);
    assert_eq!(fronts_a, fronts_b);
    assert_eq!(a, b);
  }
}
