use crate::{FemError, FemResult, Stage};

use faer::solvers::SpSolver;

/// Pivots of a Cholesky factor below this fraction of the largest diagonal
/// entry mark the matrix as numerically singular.
pub const PIVOT_RTOL: f64 = 1e-12;

/// Solves $A x = b$ for symmetric positive definite $A$ with a dense Cholesky
/// factorization.
pub fn solve_spd_dense(a: na::DMatrix<f64>, b: &na::DVector<f64>) -> FemResult<na::DVector<f64>> {
  let nfree = a.nrows();
  FemError::check_len(Stage::Solve, nfree, a.ncols())?;
  FemError::check_len(Stage::Solve, nfree, b.nrows())?;
  let singular = || FemError::SingularSystem { nfree };

  let max_diag = a.diagonal().amax();
  let cholesky = na::Cholesky::new(a).ok_or_else(singular)?;

  let is_regular = cholesky
    .l_dirty()
    .diagonal()
    .iter()
    .all(|&pivot| pivot * pivot > PIVOT_RTOL * max_diag);
  if !is_regular {
    return Err(singular());
  }

  let x = cholesky.solve(b);
  ensure_finite(x, nfree)
}

pub(crate) fn ensure_finite(x: na::DVector<f64>, nfree: usize) -> FemResult<na::DVector<f64>> {
  if x.iter().all(|v| v.is_finite()) {
    Ok(x)
  } else {
    Err(FemError::SingularSystem { nfree })
  }
}

type SparseMatrixFaer = faer::sparse::SparseColMat<usize, f64>;

pub fn nalgebra2faer(m: nas::CscMatrix<f64>) -> SparseMatrixFaer {
  let nrows = m.nrows();
  let ncols = m.ncols();
  let (col_ptrs, row_indices, values) = m.disassemble();

  let symbolic =
    faer::sparse::SymbolicSparseColMat::new_checked(nrows, ncols, col_ptrs, None, row_indices);
  faer::sparse::SparseColMat::new(symbolic, values)
}

pub struct FaerCholesky {
  raw: faer::sparse::linalg::solvers::Cholesky<usize, f64>,
  nrows: usize,
}
impl FaerCholesky {
  pub fn new(a: nas::CscMatrix<f64>) -> FemResult<Self> {
    let nrows = a.nrows();
    FemError::check_len(Stage::Solve, nrows, a.ncols())?;
    let raw = nalgebra2faer(a)
      .sp_cholesky(faer::Side::Upper)
      .map_err(|_| FemError::SingularSystem { nfree: nrows })?;
    Ok(Self { raw, nrows })
  }

  pub fn solve(&self, b: &na::DVector<f64>) -> FemResult<na::DVector<f64>> {
    FemError::check_len(Stage::Solve, self.nrows, b.nrows())?;
    let b = faer::col::from_slice(b.as_slice());
    let x = na::DVector::from_vec(self.raw.solve(b).as_slice().to_vec());
    ensure_finite(x, self.nrows)
  }
}
