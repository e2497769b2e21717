//! Errors reported by the sorting routines.

use std::fmt;

/// Dimensions of a caller-supplied buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Shape {
  /// A one-dimensional buffer of the given length.
  Vector(usize),
  /// A two-dimensional buffer of `(rows, cols)`.
  Matrix(usize, usize),
}

impl fmt::Display for Shape {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Shape::Vector(n) => write!(f, "({n},)"),
      Shape::Matrix(r, c) => write!(f, "({r}, {c})"),
    }
  }
}

/// Errors returned by this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
  /// A buffer does not have the dimensions required by the operation.
  /// Always reported before anything is written.
  #[error("buffer `{buffer}` is not the correct shape: expected {expected} but received {received}")]
  ShapeMismatch {
    /// Name of the offending buffer.
    buffer: &'static str,
    /// The shape the operation requires.
    expected: Shape,
    /// The shape that was passed in.
    received: Shape,
  },

  /// Two rows sharing a front are not mutually non-dominated.
  #[error("rows {first} and {second} share front {front} but one dominates the other")]
  DominatedWithinFront {
    /// Index of the first row.
    first: usize,
    /// Index of the second row.
    second: usize,
    /// The shared front.
    front: usize,
  },

  /// A row of a later front dominates a row of an earlier one.
  #[error("row {dominating} (front {later}) dominates row {dominated} (front {earlier})")]
  DominatedAcrossFronts {
    /// Index of the dominating row.
    dominating: usize,
    /// Front of the dominating row.
    later: usize,
    /// Index of the dominated row.
    dominated: usize,
    /// Front of the dominated row.
    earlier: usize,
  },

  /// Front labels skip an index.
  #[error("front {0} is empty although later fronts are not")]
  MissingFront(usize),
}

/// A `Result` alias with this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Fails with [`Error::ShapeMismatch`] unless `received == expected`.
pub(crate) fn ensure_shape(
  buffer: &'static str,
  expected: Shape,
  received: Shape,
) -> Result<()> {
  if expected == received {
    Ok(())
  } else {
    Err(Error::ShapeMismatch {
      buffer,
      expected,
      received,
    })
  }
}
