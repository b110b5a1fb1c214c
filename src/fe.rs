//! Element level quantities of piecewise-linear Lagrange elements on triangles.

use crate::{mesh::Mesh, Point};

pub trait ElmatProvider {
  fn eval(&self, coords: &[Point; 3], area: f64) -> na::Matrix3<f64>;
}

impl<F> ElmatProvider for F
where
  F: Fn(&[Point; 3], f64) -> na::Matrix3<f64>,
{
  fn eval(&self, coords: &[Point; 3], area: f64) -> na::Matrix3<f64> {
    self(coords, area)
  }
}

/// Signed area via the cross product of the edge vectors leaving vertex 0.
/// Positive for counter-clockwise vertices.
pub fn triangle_signed_area(coords: &[Point; 3]) -> f64 {
  let e1 = coords[1] - coords[0];
  let e2 = coords[2] - coords[0];
  0.5 * e1.perp(&e2)
}

/// Length of the longest edge.
pub fn triangle_diameter(coords: &[Point; 3]) -> f64 {
  (0..3)
    .map(|i| (coords[(i + 1) % 3] - coords[i]).norm())
    .fold(0.0, f64::max)
}

/// The constant gradients of the three barycentric coordinate functions,
/// one per column.
///
/// The gradient of $lambda_k$ is the inward normal of the opposite edge
/// scaled by its length over twice the area.
pub fn barycentric_gradients(coords: &[Point; 3], area: f64) -> na::Matrix2x3<f64> {
  let mut grads = na::Matrix2x3::zeros();
  for k in 0..3 {
    let edge = coords[(k + 2) % 3] - coords[(k + 1) % 3];
    grads.set_column(k, &na::Vector2::new(-edge.y, edge.x));
  }
  grads / (2.0 * area)
}

/// Exact element matrix of the Laplacian.
///
/// $A = [(grad lambda_j, grad lambda_i)_(L^2(K))]_(i,j)$
pub fn laplace_elmat(coords: &[Point; 3], area: f64) -> na::Matrix3<f64> {
  let grads = barycentric_gradients(coords, area);
  area * grads.transpose() * grads
}

/// Midpoints of the three edges. Entry `k` is the midpoint of the edge
/// opposite local vertex `k`.
pub fn edge_midpoints(coords: &[Point; 3]) -> [Point; 3] {
  [
    (coords[1] + coords[2]) / 2.0,
    (coords[2] + coords[0]) / 2.0,
    (coords[0] + coords[1]) / 2.0,
  ]
}

/// Element load vector from the edge midpoint quadrature rule, given the
/// load evaluated at [`edge_midpoints`].
///
/// The hat function of vertex `k` is one half on the two edges touching `k`
/// and zero on the opposite one, so vertex `k` collects the two midpoints
/// not opposite to it. Exact for linear loads.
pub fn midpoint_load_elvec(area: f64, load_at_midpoints: [f64; 3]) -> [f64; 3] {
  let f = load_at_midpoints;
  [0, 1, 2].map(|k| area * (f[(k + 1) % 3] + f[(k + 2) % 3]) / 6.0)
}

/// $L^2$ norm of a nodal function, computed with the vertex trapezoidal rule.
pub fn l2_norm(fn_coeffs: &na::DVector<f64>, mesh: &Mesh) -> f64 {
  let mut norm: f64 = 0.0;
  for (cell, &area) in mesh.cells().iter().zip(mesh.areas()) {
    let sum: f64 = cell.iter().map(|&ivertex| fn_coeffs[ivertex].powi(2)).sum();
    norm += (area / 3.0) * sum;
  }
  norm.sqrt()
}

#[cfg(test)]
mod test {
  use super::*;

  use approx::assert_relative_eq;

  fn ref_triangle() -> [Point; 3] {
    [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]
  }

  #[test]
  fn ref_elmat() {
    let coords = ref_triangle();
    let area = triangle_signed_area(&coords);
    assert_eq!(area, 0.5);

    #[rustfmt::skip]
    let expected = na::Matrix3::new(
       1.0, -0.5, -0.5,
      -0.5,  0.5,  0.0,
      -0.5,  0.0,  0.5,
    );
    assert_relative_eq!(laplace_elmat(&coords, area), expected, epsilon = 1e-14);
  }

  #[test]
  fn elmat_is_translation_and_rotation_invariant() {
    let coords = ref_triangle();
    let rot = na::Rotation2::new(0.7);
    let shift = Point::new(-3.0, 2.5);
    let moved = coords.map(|p| rot * p + shift);

    let area = triangle_signed_area(&moved);
    assert_relative_eq!(area, 0.5, epsilon = 1e-14);
    assert_relative_eq!(
      laplace_elmat(&moved, area),
      laplace_elmat(&coords, 0.5),
      epsilon = 1e-13
    );
  }

  #[test]
  fn gradients_of_partition_of_unity_sum_to_zero() {
    let coords = [Point::new(0.3, 0.1), Point::new(2.0, 0.4), Point::new(1.1, 1.7)];
    let area = triangle_signed_area(&coords);
    let grads = barycentric_gradients(&coords, area);
    assert_relative_eq!(grads.column_sum(), na::Vector2::zeros(), epsilon = 1e-14);

    // lambda_k is one at vertex k and zero at the others
    for k in 0..3 {
      for j in 0..3 {
        let dx = coords[j] - coords[k];
        let expected = if j == k { 0.0 } else { -1.0 };
        assert_relative_eq!(grads.column(k).dot(&dx), expected, epsilon = 1e-14);
      }
    }
  }

  #[test]
  fn constant_load_is_split_evenly() {
    let elvec = midpoint_load_elvec(0.6, [2.0, 2.0, 2.0]);
    for v in elvec {
      assert_relative_eq!(v, 0.4, epsilon = 1e-15);
    }
  }

  #[test]
  fn linear_load_is_exact() {
    // f(x, y) = x on the reference triangle, (f, lambda_k) = [1/24, 1/12, 1/24]
    let coords = ref_triangle();
    let load = edge_midpoints(&coords).map(|m| m.x);
    let elvec = midpoint_load_elvec(0.5, load);
    assert_relative_eq!(elvec[0], 1.0 / 24.0, epsilon = 1e-15);
    assert_relative_eq!(elvec[1], 1.0 / 12.0, epsilon = 1e-15);
    assert_relative_eq!(elvec[2], 1.0 / 24.0, epsilon = 1e-15);
  }
}
