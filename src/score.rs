//! Type aliases for objective scores and the unchecked pareto comparison used
//! by the sorting loops.

use crate::relation::Dominance;

/// An alias for a single objective value.
///
/// Objectives are minimized: the smaller the score, the better. Scores are
/// expected to be real numbers or infinities. `NaN` compares as neither better
/// nor worse than anything, which makes the result of a sort meaningless but
/// never panics: rows are still labelled, and the lexicographic order places
/// `NaN` after `+inf`.
pub type Score = f64;

/// Describes pareto dominance for slices of `Score`s.
///
/// Lengths are not checked here, `zip` simply stops at the shorter slice.
/// Public entry points validate shapes before reaching for this trait.
pub(crate) trait ParetoDominance {
  /// Returns `Dominates` if `self` dominates `other`, `Dominated` if `other`
  /// dominates `self`, otherwise `NonDominated`. `self` dominates `other` if
  /// no `self` value is greater than its `other` counterpart and at least one
  /// is strictly less.
  fn dominance(&self, other: &Self) -> Dominance;

  /// Same as [`dominance`](ParetoDominance::dominance) with greater values
  /// treated as better.
  fn maximizing_dominance(&self, other: &Self) -> Dominance;
}

impl ParetoDominance for [Score] {
  fn dominance(&self, other: &Self) -> Dominance {
    let mut better = false;
    let mut worse = false;
    for (a, b) in self.iter().zip(other) {
      if a < b {
        better = true;
      } else if a > b {
        worse = true;
      }
      if better && worse {
        return Dominance::NonDominated;
      }
    }
    Dominance::from_flags(better, worse)
  }

  fn maximizing_dominance(&self, other: &Self) -> Dominance {
    // `self` beats `other` upwards iff `other` beats `self` downwards
    other.dominance(self)
  }
}
