//! **ndsort** sorts solutions of multi-objective optimization problems into
//! non-domination fronts, the ranking at the heart of NSGA-II and similar
//! evolutionary algorithms.
//!
//! Every solution is a row of an [`ObjectiveMatrix`], one column per
//! objective. All objectives are minimized. A solution *dominates* another if
//! it is no worse in every objective and strictly better in at least one.
//! Front `0` holds the solutions nothing else dominates; front `1` holds the
//! solutions nothing dominates once front `0` is removed; and so on.
//!
//! # Algorithms
//!
//! Only the straightforward pairwise family is implemented:
//!
//! | Function                             | Cost                  | Row order on return                      |
//! |:-------------------------------------|:---------------------:|:-----------------------------------------|
//! | [`assign_fronts_naive`]              | `O(M * N^3)`          | by front, discovery order within a front |
//! | [`assign_fronts_naive_precomputed`]  | `O(M * N^2 + N^3)`    | by front, then lexicographic             |
//!
//! The first one swaps rows as fronts are found and needs no scratch space.
//! The second one precomputes a [`DominanceMatrix`] and finishes with a sort
//! that makes its output independent of the input order.
//!
//! # Buffers
//!
//! Front labels and scratch space are allocated by the caller and passed in,
//! so that sorting inside a generation loop does not allocate. Buffer sizes
//! are validated on every call and a mismatch is reported as
//! [`Error::ShapeMismatch`] before anything is written. Buffers carry no
//! synchronization: a caller sharing them between threads has to serialize
//! access itself.
//!
//! [`NonDominatedSorter`] bundles the scratch space with a choice of algorithm
//! and resizes it on demand.
//!
//! # Example
//! ```
//! use ndsort::{assign_fronts_naive_precomputed, DominanceMatrix, ObjectiveMatrix};
//!
//! let mut x = ObjectiveMatrix::from_rows([
//!   [0.0, 0.0],
//!   [1.0, 1.0],
//!   [0.0, 1.0],
//!   [1.0, 0.0],
//!   [2.0, 2.0],
//! ])?;
//! let n = x.rows();
//! let mut fronts = vec![0; n];
//! let mut dom = DominanceMatrix::new(n);
//! let (mut rem, mut mask) = (vec![0; n], vec![false; n]);
//! assign_fronts_naive_precomputed(&mut x, &mut fronts, &mut dom, &mut rem, &mut mask)?;
//!
//! assert_eq!(fronts, [0, 1, 1, 2, 3]);
//! assert_eq!(x.row(1), &[0.0, 1.0]);
//! assert_eq!(x.row(2), &[1.0, 0.0]);
//! # Ok::<(), ndsort::Error>(())
//! ```
//!
//! # Feature flags
//!
//! | Flag      | What it enables                                          | Default |
//! |:----------|:---------------------------------------------------------|:-------:|
//! | `tracing` | Debug events from [`NonDominatedSorter`] via [`tracing`] | off     |
//!
//! [`tracing`]: https://docs.rs/tracing

#![warn(missing_docs)]

/// Emits a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
  ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
  ($($arg:tt)*) => {};
}

mod error;
pub mod execution;
pub mod fronts;
pub mod matrix;
pub mod naive;
pub mod presort;
pub mod relation;
pub mod score;
pub mod sorter;

pub use error::{Error, Result, Shape};
pub use execution::Execution;
pub use fronts::{
  check_fronts,
  front_count,
  front_members,
  front_ranges,
  FrontIndex,
};
pub use matrix::{DominanceMatrix, ObjectiveMatrix};
pub use naive::{assign_fronts_naive, assign_fronts_naive_precomputed};
pub use presort::{
  lexicographic_cmp,
  lexicographic_order,
  presort,
  presort_in_place,
  presorted,
};
pub use relation::{
  build_dominance_matrix,
  par_build_dominance_matrix,
  relation,
  relation_maximizing,
  Dominance,
};
pub use score::Score;
pub use sorter::{NonDominatedSorter, SortStrategy, Workspace};
