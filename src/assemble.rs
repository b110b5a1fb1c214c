use crate::{
  fe::{self, ElmatProvider},
  field::ScalarField,
  mesh::{self, Mesh, Triangle},
  sparse::SparseMatrix,
  FemError, FemResult, Point, Stage,
};

use rayon::prelude::*;
use tracing::debug;

pub type GalMat = nas::CsrMatrix<f64>;
pub type GalVec = na::DVector<f64>;

/// Sums `values` into an output of length `size` at the positions given by
/// the parallel `subs`. Positions that never occur stay zero.
///
/// This is the scatter-add underlying all assembly, done in a single pass.
pub fn accum_array<T>(subs: &[usize], values: &[T], size: usize) -> FemResult<na::DVector<T>>
where
  T: na::Scalar + num_traits::Zero + na::ClosedAddAssign,
{
  FemError::check_len(Stage::RhsAssembly, subs.len(), values.len())?;

  let mut accumulated = na::DVector::zeros(size);
  for (&index, value) in subs.iter().zip(values) {
    if index >= size {
      return Err(FemError::IndexOutOfRange {
        stage: Stage::RhsAssembly,
        index,
        size,
      });
    }
    accumulated[index] += value.clone();
  }
  Ok(accumulated)
}

/// Assembly algorithm for the Galerkin Matrix.
///
/// Element matrices are computed in parallel, the sum of contributions
/// sharing a global entry happens on conversion from triplets.
pub fn assemble_galmat(
  nodes: &[Point],
  cells: &[Triangle],
  areas: &[f64],
  elmat: impl ElmatProvider + Sync,
) -> FemResult<GalMat> {
  let nnodes = nodes.len();
  FemError::check_len(Stage::MeshBuild, cells.len(), areas.len())?;
  if let Some(cell) = cells.iter().find(|cell| cell.iter().any(|&v| v >= nnodes)) {
    return Err(FemError::InvalidGeometry(format!(
      "cell {cell:?} refers to a vertex outside of the {nnodes} nodes"
    )));
  }

  let triplets: Vec<(usize, usize, f64)> = cells
    .par_iter()
    .zip(areas.par_iter())
    .flat_map_iter(|(cell, &area)| {
      let elmat = elmat.eval(&mesh::cell_coords(nodes, cell), area);

      let mut local_triplets = Vec::with_capacity(9);
      for (ilocal, &iglobal) in cell.iter().enumerate() {
        for (jlocal, &jglobal) in cell.iter().enumerate() {
          let val = elmat[(ilocal, jlocal)];
          if val != 0.0 {
            local_triplets.push((iglobal, jglobal, val));
          }
        }
      }
      local_triplets
    })
    .collect();

  Ok(SparseMatrix::new(nnodes, nnodes, triplets).to_nalgebra_csr())
}

/// Assembly algorithm for the Galerkin Vector (load vector).
///
/// The source is sampled once per edge midpoint set, in three batches.
/// Contributions are laid out local vertex major and accumulated with
/// [`accum_array`].
pub fn assemble_galvec(mesh: &Mesh, source: &impl ScalarField) -> FemResult<GalVec> {
  let ncells = mesh.ncells();

  let mut midpoints: [Vec<Point>; 3] = Default::default();
  for icell in 0..ncells {
    let cell_midpoints = fe::edge_midpoints(&mesh.cell_coords(icell));
    for (batch, midpoint) in midpoints.iter_mut().zip(cell_midpoints) {
      batch.push(midpoint);
    }
  }

  let mut load_at_midpoints: [Vec<f64>; 3] = Default::default();
  for (values, points) in load_at_midpoints.iter_mut().zip(&midpoints) {
    *values = source.eval_at(points);
    FemError::check_len(Stage::RhsAssembly, ncells, values.len())?;
    FemError::check_finite(Stage::RhsAssembly, values)?;
  }

  let elvecs: Vec<[f64; 3]> = (0..ncells)
    .into_par_iter()
    .map(|icell| {
      let load = [0, 1, 2].map(|k| load_at_midpoints[k][icell]);
      fe::midpoint_load_elvec(mesh.area(icell), load)
    })
    .collect();

  let mut subs = Vec::with_capacity(3 * ncells);
  let mut values = Vec::with_capacity(3 * ncells);
  for ilocal in 0..3 {
    for (cell, elvec) in mesh.cells().iter().zip(&elvecs) {
      subs.push(cell[ilocal]);
      values.push(elvec[ilocal]);
    }
  }

  let galvec = accum_array(&subs, &values, mesh.nnodes())?;
  debug!(ncells, total_load = galvec.sum(), "assembled load vector");
  Ok(galvec)
}
