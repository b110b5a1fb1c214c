use super::Triangle;
use crate::{fe, FemError, FemResult, Point, VertexIdx};

use itertools::Itertools;
use tracing::warn;

/// Relative tolerance, w.r.t. the grid spacing, for a node to count as lying
/// on the perimeter.
const BOUNDARY_RTOL: f64 = 1e-6;

/// Upper bound on the number of mesh vertices.
pub const MAX_NVERTICES: usize = 1 << 24;

/// converts linear index to cartesian index
///
/// converts linear index in 0..dim_len^2 to cartesian index in (0,0)..(dim_len,dim_len)
pub fn linear_index2cartesian_index(lin_idx: usize, dim_len: usize) -> [usize; 2] {
  [lin_idx % dim_len, lin_idx / dim_len]
}

/// converts cartesian index to linear index
///
/// converts cartesian index in (0,0)..(dim_len,dim_len) to linear index in 0..dim_len^2
pub fn cartesian_index2linear_index(cart_idx: [usize; 2], dim_len: usize) -> usize {
  cart_idx[1] * dim_len + cart_idx[0]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
  min: Point,
  max: Point,
}

impl Rect {
  pub fn new_min_max(min: Point, max: Point) -> FemResult<Self> {
    if !(min.iter().all(|c| c.is_finite()) && max.iter().all(|c| c.is_finite())) {
      return Err(FemError::InvalidGeometry(format!(
        "non-finite extents {min:?}..{max:?}"
      )));
    }
    let side_lengths = max - min;
    if side_lengths.iter().any(|&l| l <= 0.0) {
      return Err(FemError::InvalidGeometry(format!(
        "non-positive extents: side lengths {} x {}",
        side_lengths.x, side_lengths.y
      )));
    }
    Ok(Self { min, max })
  }
  pub fn new_unit_square() -> Self {
    Self {
      min: Point::zeros(),
      max: Point::from_element(1.0),
    }
  }

  pub fn min(&self) -> &Point {
    &self.min
  }
  pub fn max(&self) -> &Point {
    &self.max
  }
  pub fn side_lengths(&self) -> Point {
    self.max - self.min
  }
  pub fn is_square(&self) -> bool {
    let sides = self.side_lengths();
    (sides.x - sides.y).abs() <= 1e-12 * sides.max()
  }
}

/// Geometry of a rectangle together with the number of grid cells per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshParameters {
  rect: Rect,
  ncells_axis: usize,
}
// constructors
impl MeshParameters {
  pub fn new(rect: Rect, ncells_axis: usize) -> FemResult<Self> {
    if ncells_axis < 1 {
      return Err(FemError::InvalidGeometry(
        "subdivision count must be at least 1".into(),
      ));
    }
    let nvertices = ncells_axis
      .checked_add(1)
      .and_then(|nvertices_axis| nvertices_axis.checked_pow(2))
      .filter(|&nvertices| nvertices <= MAX_NVERTICES);
    if nvertices.is_none() {
      return Err(FemError::InvalidGeometry(format!(
        "subdivision count {ncells_axis} exceeds the limit of {MAX_NVERTICES} vertices"
      )));
    }
    if !rect.is_square() {
      let sides = rect.side_lengths();
      warn!(
        "domain {} x {} is not a square, meshing it with stretched cells",
        sides.x, sides.y
      );
    }
    Ok(Self { rect, ncells_axis })
  }

  pub fn new_min_max(min: Point, max: Point, ncells_axis: usize) -> FemResult<Self> {
    Self::new(Rect::new_min_max(min, max)?, ncells_axis)
  }

  pub fn new_unit(ncells_axis: usize) -> FemResult<Self> {
    Self::new(Rect::new_unit_square(), ncells_axis)
  }

  /// Parses `[xmin, xmax, ymin, ymax, n]`.
  pub fn from_slice(params: &[f64]) -> FemResult<Self> {
    let &[xmin, xmax, ymin, ymax, n] = params else {
      return Err(FemError::InvalidGeometry(format!(
        "expected 5 parameters [xmin, xmax, ymin, ymax, n], got {}",
        params.len()
      )));
    };
    if !n.is_finite() || n < 1.0 || n.fract() != 0.0 {
      return Err(FemError::InvalidGeometry(format!(
        "subdivision count must be a positive integer, got {n}"
      )));
    }
    Self::new_min_max(Point::new(xmin, ymin), Point::new(xmax, ymax), n as usize)
  }

  /// Chooses the subdivision count such that the grid spacing does not exceed `h`.
  pub fn with_mesh_width(rect: Rect, h: f64) -> FemResult<Self> {
    if !h.is_finite() || h <= 0.0 {
      return Err(FemError::InvalidGeometry(format!(
        "mesh width must be positive, got {h}"
      )));
    }
    let ncells_axis = (rect.side_lengths().max() / h).ceil() as usize;
    Self::new(rect, ncells_axis.max(1))
  }
}
// getters
impl MeshParameters {
  pub fn rect(&self) -> &Rect {
    &self.rect
  }
  pub fn min(&self) -> &Point {
    self.rect.min()
  }
  pub fn max(&self) -> &Point {
    self.rect.max()
  }
  pub fn side_lengths(&self) -> Point {
    self.rect.side_lengths()
  }
  pub fn ncells_axis(&self) -> usize {
    self.ncells_axis
  }
  pub fn nvertices_axis(&self) -> usize {
    self.ncells_axis + 1
  }
  /// Number of grid boxes, each split into two triangles.
  pub fn nboxes(&self) -> usize {
    self.ncells_axis.pow(2)
  }
  pub fn ncells(&self) -> usize {
    2 * self.nboxes()
  }
  pub fn nvertices(&self) -> usize {
    self.nvertices_axis().pow(2)
  }
  pub fn grid_spacing(&self) -> Point {
    self.side_lengths() / self.ncells_axis as f64
  }
  pub fn boundary_tol(&self) -> f64 {
    BOUNDARY_RTOL * self.grid_spacing().min()
  }
  pub fn vertex_cart_idx(&self, ivertex: VertexIdx) -> [usize; 2] {
    linear_index2cartesian_index(ivertex, self.nvertices_axis())
  }
  pub fn vertex_pos(&self, ivertex: VertexIdx) -> Point {
    let [ix, iy] = self.vertex_cart_idx(ivertex);
    let frac = Point::new(ix as f64, iy as f64) / self.ncells_axis as f64;
    frac.component_mul(&self.side_lengths()) + self.min()
  }
}

impl MeshParameters {
  pub fn compute_vertex_coords(&self) -> Vec<Point> {
    (0..self.nvertices())
      .map(|ivertex| self.vertex_pos(ivertex))
      .collect()
  }

  /// Splits every grid box into two triangles along its main diagonal.
  pub fn compute_cells(&self, coords: &[Point]) -> Vec<Triangle> {
    let nboxes_axis = self.ncells_axis();
    let mut cells = Vec::with_capacity(self.ncells());

    // iterate through all boxes that make up the mesh
    for ibox in 0..self.nboxes() {
      let vertex_icart_origin = linear_index2cartesian_index(ibox, nboxes_axis);
      let ivertex_origin = cartesian_index2linear_index(vertex_icart_origin, self.nvertices_axis());

      // Each permutation of the two axis directions gives rise to one triangle.
      let box_cells = (0..2).permutations(2).map(|basisdirs| {
        let mut cell = [ivertex_origin; 3];

        // Every shift step along an axis gives us one vertex.
        let mut vertex_icart = vertex_icart_origin;
        for (ishift, &basisdir) in basisdirs.iter().enumerate() {
          vertex_icart[basisdir] += 1;
          cell[ishift + 1] = cartesian_index2linear_index(vertex_icart, self.nvertices_axis());
        }

        // Ensure consistent positive orientation of cells.
        if fe::triangle_signed_area(&super::cell_coords(coords, &cell)) < 0.0 {
          cell.swap(1, 2);
        }
        cell
      });

      cells.extend(box_cells);
    }

    cells
  }
}
