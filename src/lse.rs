//! Dirichlet boundary values, reduction to the free nodes and the linear solve.

use crate::{
  assemble,
  field::ScalarField,
  linalg::{self, FaerCholesky},
  mesh::Mesh,
  sparse::SparseMatrix,
  util, FemError, FemResult, Stage, VertexIdx,
};

use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinearSolver {
  /// Gathers the reduced matrix densely and factorizes it with nalgebra.
  #[default]
  DenseCholesky,
  /// Keeps the reduced matrix sparse and factorizes it with faer.
  SparseCholesky,
}

#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
  pub solver: LinearSolver,
}

impl SolverOptions {
  pub fn with_solver(solver: LinearSolver) -> Self {
    Self { solver }
  }
}

/// Solves $-Delta u = f$ with $u = g$ on the boundary, where `source` is $f$
/// and `boundary` is $g$. Returns the nodal values of $u$.
pub fn solve(
  mesh: &Mesh,
  source: &impl ScalarField,
  boundary: &impl ScalarField,
) -> FemResult<na::DVector<f64>> {
  solve_with(mesh, source, boundary, &SolverOptions::default())
}

pub fn solve_with(
  mesh: &Mesh,
  source: &impl ScalarField,
  boundary: &impl ScalarField,
  options: &SolverOptions,
) -> FemResult<na::DVector<f64>> {
  let galvec = assemble::assemble_galvec(mesh, source)?;
  let mut galsol = boundary_values(mesh, boundary)?;

  // Move the known boundary contributions to the right hand side.
  let residual = galvec - mesh.stiffness() * &galsol;

  let free_nodes = mesh.free_nodes();
  if free_nodes.is_empty() {
    debug!("no free nodes, solution is fully prescribed");
    return Ok(galsol);
  }
  let residual_free = restrict_vector(&residual, free_nodes)?;

  let sol_free = match options.solver {
    LinearSolver::DenseCholesky => {
      let galmat_free = restrict_dense(mesh.stiffness(), free_nodes)?;
      linalg::solve_spd_dense(galmat_free, &residual_free)?
    }
    LinearSolver::SparseCholesky => {
      let galmat_free = SparseMatrix::from(mesh.stiffness()).restrict(free_nodes)?;
      FaerCholesky::new(galmat_free.to_nalgebra_csc())?.solve(&residual_free)?
    }
  };

  for (&ivertex, &value) in free_nodes.iter().zip(sol_free.iter()) {
    galsol[ivertex] = value;
  }

  info!(
    nfree = free_nodes.len(),
    solver = ?options.solver,
    "solved reduced system"
  );
  Ok(galsol)
}

/// A full nodal vector that holds the Dirichlet data on the boundary nodes
/// and zero on the free nodes.
pub fn boundary_values(
  mesh: &Mesh,
  boundary: &impl ScalarField,
) -> FemResult<na::DVector<f64>> {
  let boundary_nodes = mesh.boundary_nodes();
  let points: Vec<_> = boundary_nodes
    .iter()
    .map(|&ivertex| *mesh.node(ivertex))
    .collect();
  let values = boundary.eval_at(&points);
  FemError::check_len(Stage::BoundaryValues, boundary_nodes.len(), values.len())?;
  FemError::check_finite(Stage::BoundaryValues, &values)?;

  let mut galsol = na::DVector::zeros(mesh.nnodes());
  for (&ivertex, value) in boundary_nodes.iter().zip(values) {
    galsol[ivertex] = value;
  }
  Ok(galsol)
}

pub fn restrict_vector(
  vector: &na::DVector<f64>,
  dofs: &[VertexIdx],
) -> FemResult<na::DVector<f64>> {
  let values = dofs
    .iter()
    .map(|&idof| {
      vector.get(idof).copied().ok_or(FemError::IndexOutOfRange {
        stage: Stage::Solve,
        index: idof,
        size: vector.len(),
      })
    })
    .collect::<FemResult<Vec<_>>>()?;
  Ok(na::DVector::from_vec(values))
}

/// Gathers the dense submatrix `mat[dofs, dofs]`.
pub fn restrict_dense(
  mat: &nas::CsrMatrix<f64>,
  dofs: &[VertexIdx],
) -> FemResult<na::DMatrix<f64>> {
  FemError::check_len(Stage::Solve, mat.nrows(), mat.ncols())?;
  let positions = util::local_positions(dofs, mat.ncols())?;
  let mut restricted = na::DMatrix::zeros(dofs.len(), dofs.len());
  for (ilocal, &iglobal) in dofs.iter().enumerate() {
    let row = mat.row(iglobal);
    for (&jglobal, &value) in row.col_indices().iter().zip(row.values()) {
      if let Some(jlocal) = positions[jglobal] {
        restricted[(ilocal, jlocal)] += value;
      }
    }
  }
  Ok(restricted)
}
