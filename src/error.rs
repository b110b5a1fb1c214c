use std::fmt;

pub type FemResult<T> = Result<T, FemError>;

/// The pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  MeshBuild,
  RhsAssembly,
  BoundaryValues,
  Solve,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::MeshBuild => "mesh build",
      Self::RhsAssembly => "rhs assembly",
      Self::BoundaryValues => "boundary values",
      Self::Solve => "solve",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FemError {
  /// Malformed mesh parameters. Raised before any assembly.
  #[error("invalid geometry: {0}")]
  InvalidGeometry(String),

  /// A field evaluator or caller returned the wrong number of values.
  #[error("dimension mismatch during {stage}: expected {expected} values, got {found}")]
  DimensionMismatch {
    stage: Stage,
    expected: usize,
    found: usize,
  },

  /// The system restricted to the free nodes is not positive definite.
  #[error("singular system during solve: reduced matrix on {nfree} free nodes is not positive definite")]
  SingularSystem { nfree: usize },

  /// A field evaluator returned NaN or an infinite value.
  #[error("non-finite field value during {stage} at point {index}")]
  NonFiniteField { stage: Stage, index: usize },

  #[error("index {index} out of range for size {size} during {stage}")]
  IndexOutOfRange {
    stage: Stage,
    index: usize,
    size: usize,
  },
}

impl FemError {
  pub fn stage(&self) -> Stage {
    match self {
      Self::InvalidGeometry(_) => Stage::MeshBuild,
      Self::DimensionMismatch { stage, .. } => *stage,
      Self::SingularSystem { .. } => Stage::Solve,
      Self::NonFiniteField { stage, .. } => *stage,
      Self::IndexOutOfRange { stage, .. } => *stage,
    }
  }

  pub(crate) fn check_len(stage: Stage, expected: usize, found: usize) -> FemResult<()> {
    if expected == found {
      Ok(())
    } else {
      Err(Self::DimensionMismatch {
        stage,
        expected,
        found,
      })
    }
  }

  pub(crate) fn check_finite(stage: Stage, values: &[f64]) -> FemResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
      None => Ok(()),
      Some(index) => Err(Self::NonFiniteField { stage, index }),
    }
  }
}
