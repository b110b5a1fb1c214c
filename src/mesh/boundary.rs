use super::Rect;
use crate::{util, Point, VertexIdx};

/// Split of the mesh nodes into Dirichlet (boundary) nodes and free nodes.
///
/// Both index lists are sorted and together cover every node exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePartition {
  boundary_nodes: Vec<VertexIdx>,
  free_nodes: Vec<VertexIdx>,
  is_boundary: Vec<bool>,
}

impl NodePartition {
  /// A node is on the boundary iff one of its coordinates equals the
  /// minimum or maximum extent of `rect` up to `tol`.
  pub fn compute(rect: &Rect, nodes: &[Point], tol: f64) -> Self {
    let is_boundary: Vec<bool> = nodes
      .iter()
      .map(|node| is_on_perimeter(rect, node, tol))
      .collect();
    Self::from_flags(is_boundary)
  }

  pub fn from_flags(is_boundary: Vec<bool>) -> Self {
    let boundary_nodes = util::flags_to_indicies(&is_boundary);
    let is_free: Vec<bool> = is_boundary.iter().map(|b| !b).collect();
    let free_nodes = util::flags_to_indicies(&is_free);
    Self {
      boundary_nodes,
      free_nodes,
      is_boundary,
    }
  }

  pub fn nnodes(&self) -> usize {
    self.is_boundary.len()
  }
  pub fn boundary_nodes(&self) -> &[VertexIdx] {
    &self.boundary_nodes
  }
  pub fn free_nodes(&self) -> &[VertexIdx] {
    &self.free_nodes
  }
  pub fn is_boundary(&self) -> &[bool] {
    &self.is_boundary
  }
}

pub fn is_on_perimeter(rect: &Rect, node: &Point, tol: f64) -> bool {
  (0..2).any(|d| {
    (node[d] - rect.min()[d]).abs() <= tol || (node[d] - rect.max()[d]).abs() <= tol
  })
}

#[cfg(test)]
mod test {
  use super::NodePartition;
  use crate::mesh::{Mesh, MeshParameters};
  use crate::Point;

  #[test]
  fn partition_is_complete() {
    for n in 1..=7 {
      let params = MeshParameters::from_slice(&[0.1, 0.8, -0.3, 0.4, n as f64]).unwrap();
      let mesh = Mesh::from_params(&params).unwrap();
      let partition = mesh.partition();

      let mut all: Vec<_> = partition
        .boundary_nodes()
        .iter()
        .chain(partition.free_nodes())
        .copied()
        .collect();
      all.sort_unstable();
      assert_eq!(all, (0..mesh.nnodes()).collect::<Vec<_>>());

      assert_eq!(partition.boundary_nodes().len(), 4 * n);
      assert_eq!(partition.free_nodes().len(), (n - 1) * (n - 1));
      for (ivertex, &is_boundary) in partition.is_boundary().iter().enumerate() {
        assert_eq!(partition.boundary_nodes().contains(&ivertex), is_boundary);
      }
    }
  }

  #[test]
  fn unit_square_boundary() {
    let mesh = Mesh::from_params(&MeshParameters::new_unit(2).unwrap()).unwrap();
    assert_eq!(mesh.boundary_nodes(), &[0, 1, 2, 3, 5, 6, 7, 8]);
    assert_eq!(mesh.free_nodes(), &[4]);
    assert_eq!(mesh.node(4), &Point::new(0.5, 0.5));
  }

  #[test]
  fn from_flags() {
    let partition = NodePartition::from_flags(vec![true, false, false, true]);
    assert_eq!(partition.nnodes(), 4);
    assert_eq!(partition.boundary_nodes(), &[0, 3]);
    assert_eq!(partition.free_nodes(), &[1, 2]);
  }
}
