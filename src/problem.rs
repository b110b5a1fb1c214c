use crate::{
  field::{FieldKind, FieldPair},
  lse::{self, SolverOptions},
  mesh::{self, Mesh},
  FemResult,
};

use tracing::info;

/// A solved boundary value problem: the mesh, the fields it was solved with
/// and the nodal solution.
#[derive(Debug, Clone)]
pub struct FiniteElement {
  mesh: Mesh,
  fields: FieldPair,
  solution: na::DVector<f64>,
}

impl FiniteElement {
  /// Meshes `[xmin, xmax, ymin, ymax, n]`, picks the fields named by
  /// `selector` (see [`FieldPair::select`]) and solves.
  pub fn new(params: &[f64], selector: &str) -> FemResult<Self> {
    Self::with_options(params, selector, &SolverOptions::default())
  }

  pub fn with_options(params: &[f64], selector: &str, options: &SolverOptions) -> FemResult<Self> {
    let mesh = mesh::build_mesh(params)?;
    let fields = FieldPair::select(selector);
    info!(?fields, nnodes = mesh.nnodes(), "solving");
    Self::solve_on(mesh, fields, options)
  }

  pub fn solve_on(mesh: Mesh, fields: FieldPair, options: &SolverOptions) -> FemResult<Self> {
    let solution = lse::solve_with(&mesh, &fields.source, &fields.boundary, options)?;
    Ok(Self {
      mesh,
      fields,
      solution,
    })
  }

  pub fn mesh(&self) -> &Mesh {
    &self.mesh
  }
  pub fn fields(&self) -> &FieldPair {
    &self.fields
  }
  pub fn kind(&self) -> Option<FieldKind> {
    self.fields.kind()
  }
  pub fn solution(&self) -> &na::DVector<f64> {
    &self.solution
  }
}
