//! Scalar fields used as source terms and Dirichlet data.

use crate::Point;

/// Evaluates a scalar field at a batch of points, one value per point.
pub trait ScalarField {
  fn eval_at(&self, points: &[Point]) -> Vec<f64>;
}

impl<F> ScalarField for F
where
  F: Fn(&[Point]) -> Vec<f64>,
{
  fn eval_at(&self, points: &[Point]) -> Vec<f64> {
    self(points)
  }
}

/// The built-in fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  /// $f = 1$
  Ones,
  /// $f = 0$
  Zeros,
  /// $f = 2 sin(x) cos(y)$, the negative Laplacian of [`Field::SinCosBoundary`].
  SinCos,
  /// $u = sin(x) cos(y)$
  SinCosBoundary,
}

impl Field {
  pub fn eval_point(&self, p: &Point) -> f64 {
    match self {
      Self::Ones => 1.0,
      Self::Zeros => 0.0,
      Self::SinCos => 2.0 * p.x.sin() * p.y.cos(),
      Self::SinCosBoundary => p.x.sin() * p.y.cos(),
    }
  }
}

impl ScalarField for Field {
  fn eval_at(&self, points: &[Point]) -> Vec<f64> {
    points.iter().map(|p| self.eval_point(p)).collect()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  /// Constant unit source with homogeneous boundary values.
  Bump,
  /// Manufactured smooth problem with exact solution $sin(x) cos(y)$.
  SinCos,
}

/// A source term together with matching Dirichlet data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPair {
  pub source: Field,
  pub boundary: Field,
}

impl FieldPair {
  pub fn bump() -> Self {
    Self {
      source: Field::Ones,
      boundary: Field::Zeros,
    }
  }
  pub fn sincos() -> Self {
    Self {
      source: Field::SinCos,
      boundary: Field::SinCosBoundary,
    }
  }
  pub fn from_kind(kind: FieldKind) -> Self {
    match kind {
      FieldKind::Bump => Self::bump(),
      FieldKind::SinCos => Self::sincos(),
    }
  }

  /// Any name containing "bump", ignoring case, selects [`FieldKind::Bump`].
  /// Everything else selects [`FieldKind::SinCos`].
  pub fn select(name: &str) -> Self {
    Self::from_kind(FieldKind::from_name(name))
  }

  pub fn kind(&self) -> Option<FieldKind> {
    [FieldKind::Bump, FieldKind::SinCos]
      .into_iter()
      .find(|&kind| Self::from_kind(kind) == *self)
  }
}

impl FieldKind {
  pub fn from_name(name: &str) -> Self {
    if name.to_lowercase().contains("bump") {
      Self::Bump
    } else {
      Self::SinCos
    }
  }
}

#[cfg(test)]
mod test {
  use super::{Field, FieldKind, FieldPair, ScalarField};
  use crate::Point;

  #[test]
  fn selection() {
    for name in ["Bump", "bump", "BUMP", "smallBumpField"] {
      assert_eq!(FieldPair::select(name), FieldPair::bump());
      assert_eq!(FieldPair::select(name).kind(), Some(FieldKind::Bump));
    }
    for name in ["", "sincos", "bum p", "default"] {
      assert_eq!(FieldPair::select(name), FieldPair::sincos());
    }
    let custom = FieldPair {
      source: Field::Zeros,
      boundary: Field::Ones,
    };
    assert_eq!(custom.kind(), None);
  }

  #[test]
  fn batch_evaluation() {
    let points = [Point::new(0.0, 0.0), Point::new(1.0, 2.0)];
    assert_eq!(Field::Ones.eval_at(&points), vec![1.0, 1.0]);
    assert_eq!(Field::Zeros.eval_at(&points), vec![0.0, 0.0]);
    assert_eq!(
      Field::SinCosBoundary.eval_at(&points),
      vec![0.0, 1f64.sin() * 2f64.cos()]
    );
    assert_eq!(
      Field::SinCos.eval_at(&points)[1],
      2.0 * Field::SinCosBoundary.eval_at(&points)[1]
    );
  }

  #[test]
  fn closures_are_fields() {
    let field = |points: &[Point]| points.iter().map(|p| p.x + p.y).collect::<Vec<_>>();
    assert_eq!(field.eval_at(&[Point::new(1.0, 2.0)]), vec![3.0]);
  }
}
