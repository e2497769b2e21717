//! A reusable sorting context for hot loops.

use typed_builder::TypedBuilder;

use crate::{
  error::Result,
  execution::Execution,
  fronts::{front_count, FrontIndex},
  matrix::{DominanceMatrix, ObjectiveMatrix},
  naive::{assign_fronts_naive, assign_fronts_precomputed_with},
};

/// Which naive algorithm a [`NonDominatedSorter`] runs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum SortStrategy {
  /// [`assign_fronts_naive`]: recomputes dominance every round, rows of a
  /// front end up in discovery order. No scratch space needed.
  ///
  /// [`assign_fronts_naive`]: crate::naive::assign_fronts_naive
  Recompute,
  /// [`assign_fronts_naive_precomputed`]: builds the dominance matrix once,
  /// rows end up sorted by front, then objectives.
  ///
  /// [`assign_fronts_naive_precomputed`]: crate::naive::assign_fronts_naive_precomputed
  #[default]
  Precomputed,
}

/// Scratch buffers of the precomputed algorithm for a population of a given
/// size.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Workspace {
  dominance: DominanceMatrix,
  remaining: Vec<usize>,
  mask: Vec<bool>,
}

impl Workspace {
  /// Allocates buffers for `n` solutions.
  pub fn new(n: usize) -> Self {
    Self {
      dominance: DominanceMatrix::new(n),
      remaining: vec![0; n],
      mask: vec![false; n],
    }
  }

  /// Population size the buffers are sized for.
  pub fn len(&self) -> usize {
    self.remaining.len()
  }

  /// Returns `true` if sized for an empty population.
  pub fn is_empty(&self) -> bool {
    self.remaining.is_empty()
  }

  /// Dominance matrix of the last population sorted with it, indexed by the
  /// rows' positions before sorting.
  pub fn dominance(&self) -> &DominanceMatrix {
    &self.dominance
  }

  /// Resizes buffers to `n` solutions. Returns `true` if anything changed.
  fn resize(&mut self, n: usize) -> bool {
    if self.len() == n {
      return false;
    }
    self.dominance.resize(n);
    self.remaining.resize(n, 0);
    self.mask.resize(n, false);
    true
  }
}

/// Sorts populations into non-domination fronts, keeping scratch buffers
/// between calls so that repeated sorts of same-sized populations don't
/// allocate.
///
/// A sorter is a single-writer object: [`sort`](NonDominatedSorter::sort)
/// takes `&mut self` and there is no internal locking. Use one sorter per
/// thread.
///
/// # Examples
/// ```
/// use ndsort::{NonDominatedSorter, ObjectiveMatrix, SortStrategy};
///
/// let mut sorter = NonDominatedSorter::builder()
///   .strategy(SortStrategy::Precomputed)
///   .build();
/// let mut x = ObjectiveMatrix::from_rows([[2.0, 2.0], [0.0, 1.0], [1.0, 0.0]])?;
/// let mut fronts = vec![0; 3];
/// assert_eq!(sorter.sort(&mut x, &mut fronts)?, 2);
/// assert_eq!(x.as_slice(), &[0.0, 1.0, 1.0, 0.0, 2.0, 2.0]);
/// assert_eq!(fronts, [0, 0, 1]);
/// # Ok::<(), ndsort::Error>(())
/// ```
#[derive(TypedBuilder, Clone, Debug)]
pub struct NonDominatedSorter {
  /// Algorithm to run.
  #[builder(default)]
  strategy: SortStrategy,
  /// How the dominance matrix is built by the precomputed algorithm.
  #[builder(default)]
  execution: Execution,
  #[builder(
    default,
    setter(doc = "
Preallocated scratch buffers, see [`Workspace::new`]. Buffers are resized on
demand if omitted or sized for another population.")
  )]
  workspace: Workspace,
}

impl Default for NonDominatedSorter {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl NonDominatedSorter {
  /// The configured algorithm.
  pub fn strategy(&self) -> SortStrategy {
    self.strategy
  }

  /// The configured dominance matrix execution strategy.
  pub fn execution(&self) -> Execution {
    self.execution
  }

  /// The scratch buffers, sized for the last sorted population.
  pub fn workspace(&self) -> &Workspace {
    &self.workspace
  }

  /// Labels every row of `matrix` with its front and reorders rows by front
  /// in place. Returns the number of fronts.
  ///
  /// Fails with [`ShapeMismatch`](crate::Error::ShapeMismatch) if
  /// `fronts.len() != matrix.rows()`, leaving `matrix` and `fronts` untouched.
  pub fn sort(
    &mut self,
    matrix: &mut ObjectiveMatrix,
    fronts: &mut [FrontIndex],
  ) -> Result<usize> {
    let count = match self.strategy {
      SortStrategy::Recompute => {
        assign_fronts_naive(matrix, fronts, true)?;
        front_count(fronts)
      }
      SortStrategy::Precomputed => {
        let n = matrix.rows();
        if self.workspace.resize(n) {
          trace_debug!(population = n, "resized sorter workspace");
        }
        let Workspace {
          dominance,
          remaining,
          mask,
        } = &mut self.workspace;
        assign_fronts_precomputed_with(
          self.execution,
          matrix,
          fronts,
          dominance,
          remaining,
          mask,
        )?
      }
    };
    trace_debug!(
      population = matrix.rows(),
      fronts = count,
      strategy = ?self.strategy,
      "sorted population"
    );
    Ok(count)
  }

  /// Same as [`sort`](NonDominatedSorter::sort), allocating and returning
  /// the front labels.
  pub fn rank(&mut self, matrix: &mut ObjectiveMatrix) -> Result<Vec<FrontIndex>> {
    let mut fronts = vec![0; matrix.rows()];
    self.sort(matrix, &mut fronts)?;
    Ok(fronts)
  }
}
