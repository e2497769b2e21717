//! Execution strategies for building the dominance matrix.

use crate::{
  error::Result,
  matrix::{DominanceMatrix, ObjectiveMatrix},
  relation::{build_dominance_matrix, par_build_dominance_matrix},
};

/// How the `O(M * N^2)` dominance matrix is filled. Peeling fronts off the
/// matrix is always sequential.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Execution {
  /// Single-threaded, no parallelization involved.
  #[default]
  Sequential,
  /// Rows of the matrix are filled in parallel with [rayon].
  ///
  /// **For small populations the overhead usually outweighs the gain.
  /// Benchmark if in doubt.**
  Parallel,
}

impl Execution {
  /// Builds the dominance matrix of `matrix` into `out` with this strategy.
  pub fn build_dominance_matrix(
    self,
    matrix: &ObjectiveMatrix,
    out: &mut DominanceMatrix,
  ) -> Result<()> {
    match self {
      Execution::Sequential => build_dominance_matrix(matrix, out),
      Execution::Parallel => par_build_dominance_matrix(matrix, out),
    }
  }
}
