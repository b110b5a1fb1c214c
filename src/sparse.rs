use crate::{util, FemError, FemResult, Stage};

/// Triplet (COO) builder for global matrices.
///
/// Duplicate entries are allowed and get summed on conversion, which is
/// what makes element-wise scatter-add assembly work.
#[derive(Default, Debug, Clone)]
pub struct SparseMatrix {
  nrows: usize,
  ncols: usize,
  triplets: Vec<(usize, usize, f64)>,
}

impl SparseMatrix {
  pub fn new(nrows: usize, ncols: usize, triplets: Vec<(usize, usize, f64)>) -> Self {
    Self {
      nrows,
      ncols,
      triplets,
    }
  }

  pub fn nrows(&self) -> usize {
    self.nrows
  }
  pub fn ncols(&self) -> usize {
    self.ncols
  }
  pub fn triplets(&self) -> &[(usize, usize, f64)] {
    &self.triplets
  }

  /// Keeps only the entries whose row and column are both in `dofs`,
  /// renumbered by their position in `dofs`.
  pub fn restrict(&self, dofs: &[usize]) -> FemResult<Self> {
    FemError::check_len(Stage::Solve, self.nrows, self.ncols)?;
    let positions = util::local_positions(dofs, self.nrows)?;
    let triplets = self
      .triplets
      .iter()
      .filter_map(|&(r, c, v)| Some((positions[r]?, positions[c]?, v)))
      .collect();
    Ok(Self::new(dofs.len(), dofs.len(), triplets))
  }

  pub fn to_nalgebra_coo(&self) -> nas::CooMatrix<f64> {
    let mut coo = nas::CooMatrix::new(self.nrows, self.ncols);
    for &(r, c, v) in &self.triplets {
      coo.push(r, c, v);
    }
    coo
  }

  pub fn to_nalgebra_csr(&self) -> nas::CsrMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }

  pub fn to_nalgebra_csc(&self) -> nas::CscMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }

  pub fn to_nalgebra_dense(&self) -> na::DMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }
}

impl From<&nas::CsrMatrix<f64>> for SparseMatrix {
  fn from(csr: &nas::CsrMatrix<f64>) -> Self {
    let triplets = csr.triplet_iter().map(|(r, c, &v)| (r, c, v)).collect();
    Self::new(csr.nrows(), csr.ncols(), triplets)
  }
}
