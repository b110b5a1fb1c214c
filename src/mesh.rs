//! A mesh is the triangulation of a rectangle together with everything the
//! solver needs from it: node coordinates, cell connectivity, cell areas,
//! the assembled stiffness matrix and the boundary/free node partition.
//!
//! Nodes are ordered lexicographically, x fastest. Cells are positively
//! oriented. The mesh is immutable once built.

pub mod boundary;
pub mod cartesian;

pub use boundary::NodePartition;
pub use cartesian::{MeshParameters, Rect};

use crate::{assemble, fe, CellIdx, FemResult, Point, VertexIdx};

use tracing::debug;

/// A triangle given by its three vertices, counter-clockwise.
pub type Triangle = [VertexIdx; 3];

#[derive(Debug, Clone)]
pub struct Mesh {
  rect: Rect,
  nodes: Vec<Point>,
  cells: Vec<Triangle>,
  areas: Vec<f64>,
  stiffness: nas::CsrMatrix<f64>,
  partition: NodePartition,
}

/// Builds a mesh from the flat parameter list `[xmin, xmax, ymin, ymax, n]`.
///
/// Fails with [`crate::FemError::InvalidGeometry`] before any work is done
/// if the parameters do not describe a valid tessellation.
pub fn build_mesh(params: &[f64]) -> FemResult<Mesh> {
  let params = MeshParameters::from_slice(params)?;
  Mesh::from_params(&params)
}

// constructors
impl Mesh {
  pub fn from_params(params: &MeshParameters) -> FemResult<Self> {
    let nodes = params.compute_vertex_coords();
    let cells = params.compute_cells(&nodes);

    let areas: Vec<f64> = cells
      .iter()
      .map(|cell| fe::triangle_signed_area(&cell_coords(&nodes, cell)))
      .collect();

    let stiffness = assemble::assemble_galmat(&nodes, &cells, &areas, fe::laplace_elmat)?;
    let partition = NodePartition::compute(params.rect(), &nodes, params.boundary_tol());

    debug!(
      nnodes = nodes.len(),
      ncells = cells.len(),
      nboundary = partition.boundary_nodes().len(),
      nnz = stiffness.nnz(),
      "built mesh"
    );

    Ok(Self {
      rect: params.rect().clone(),
      nodes,
      cells,
      areas,
      stiffness,
      partition,
    })
  }
}

// getters
impl Mesh {
  pub fn rect(&self) -> &Rect {
    &self.rect
  }
  pub fn nnodes(&self) -> usize {
    self.nodes.len()
  }
  pub fn ncells(&self) -> usize {
    self.cells.len()
  }
  pub fn nodes(&self) -> &[Point] {
    &self.nodes
  }
  pub fn node(&self, ivertex: VertexIdx) -> &Point {
    &self.nodes[ivertex]
  }
  pub fn cells(&self) -> &[Triangle] {
    &self.cells
  }
  pub fn areas(&self) -> &[f64] {
    &self.areas
  }
  pub fn area(&self, icell: CellIdx) -> f64 {
    self.areas[icell]
  }
  /// The assembled (unconstrained) stiffness matrix of the Laplacian.
  pub fn stiffness(&self) -> &nas::CsrMatrix<f64> {
    &self.stiffness
  }
  pub fn partition(&self) -> &NodePartition {
    &self.partition
  }
  pub fn boundary_nodes(&self) -> &[VertexIdx] {
    self.partition.boundary_nodes()
  }
  pub fn free_nodes(&self) -> &[VertexIdx] {
    self.partition.free_nodes()
  }
  pub fn is_boundary(&self) -> &[bool] {
    self.partition.is_boundary()
  }

  pub fn cell_coords(&self, icell: CellIdx) -> [Point; 3] {
    cell_coords(&self.nodes, &self.cells[icell])
  }

  pub fn total_area(&self) -> f64 {
    self.areas.iter().sum()
  }

  /// The mesh width $h$, which is the largest diameter of all cells.
  pub fn mesh_width(&self) -> f64 {
    (0..self.ncells())
      .map(|icell| fe::triangle_diameter(&self.cell_coords(icell)))
      .fold(0.0, f64::max)
  }
}

pub fn cell_coords(nodes: &[Point], cell: &Triangle) -> [Point; 3] {
  cell.map(|ivertex| nodes[ivertex])
}
