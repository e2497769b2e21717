//! Front labels and utilities to inspect them.

use std::{cmp::Ordering, ops::Range};

use itertools::Itertools;

use crate::{
  error::{ensure_shape, Error, Result, Shape},
  matrix::ObjectiveMatrix,
  relation::Dominance,
  score::ParetoDominance,
};

/// Index of a non-domination front. Front `0` holds the solutions no other
/// solution dominates; the lower, the better.
pub type FrontIndex = usize;

/// Number of fronts in `fronts`, i.e. the greatest label plus one. `0` for an
/// empty population.
pub fn front_count(fronts: &[FrontIndex]) -> usize {
  fronts.iter().max().map_or(0, |&f| f + 1)
}

/// Splits labels sorted in ascending order, as both sorting algorithms leave
/// them, into one range of row indices per front.
///
/// # Examples
/// ```
/// assert_eq!(ndsort::front_ranges(&[0, 0, 1, 2, 2, 2]), [0..2, 2..3, 3..6]);
/// ```
pub fn front_ranges(fronts: &[FrontIndex]) -> Vec<Range<usize>> {
  debug_assert!(
    fronts.windows(2).all(|w| w[0] <= w[1]),
    "front labels must be sorted"
  );
  let mut start = 0;
  fronts
    .iter()
    .dedup_with_count()
    .map(|(len, _)| {
      let range = start..start + len;
      start += len;
      range
    })
    .collect()
}

/// Collects row indices of each front, in row order. Labels need not be
/// sorted.
pub fn front_members(fronts: &[FrontIndex]) -> Vec<Vec<usize>> {
  let mut members = vec![Vec::new(); front_count(fronts)];
  for (row, &front) in fronts.iter().enumerate() {
    members[front].push(row);
  }
  members
}

/// Verifies that `fronts` is a valid non-domination ranking of `matrix`:
/// rows sharing a front don't dominate each other, no row dominates a row of
/// an earlier front, and no front index is skipped.
///
/// Costs `O(M * N^2)`. Fails with the first violation found, or with
/// [`ShapeMismatch`](Error::ShapeMismatch) if `fronts.len() != matrix.rows()`.
pub fn check_fronts(
  matrix: &ObjectiveMatrix,
  fronts: &[FrontIndex],
) -> Result<()> {
  ensure_shape(
    "front",
    Shape::Vector(matrix.rows()),
    Shape::Vector(fronts.len()),
  )?;

  if let Some(missing) = front_members(fronts).iter().position(Vec::is_empty)
  {
    return Err(Error::MissingFront(missing));
  }

  for (i, j) in (0..fronts.len()).tuple_combinations() {
    let (fi, fj) = (fronts[i], fronts[j]);
    let dom = matrix.row(i).dominance(matrix.row(j));
    match (fi.cmp(&fj), dom) {
      (Ordering::Equal, Dominance::NonDominated) => {}
      (Ordering::Equal, _) => {
        return Err(Error::DominatedWithinFront {
          first: i,
          second: j,
          front: fi,
        })
      }
      (Ordering::Less, Dominance::Dominated) => {
        return Err(Error::DominatedAcrossFronts {
          dominating: j,
          later: fj,
          dominated: i,
          earlier: fi,
        })
      }
      (Ordering::Greater, Dominance::Dominates) => {
        return Err(Error::DominatedAcrossFronts {
          dominating: i,
          later: fi,
          dominated: j,
          earlier: fj,
        })
      }
      _ => {}
    }
  }

  Ok(())
}
