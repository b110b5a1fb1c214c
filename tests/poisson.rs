//! End-to-end solves of the Poisson problem on squares.

extern crate nalgebra as na;

use trifem::{
  fe,
  field::{Field, FieldKind, FieldPair, ScalarField},
  lse::{self, LinearSolver, SolverOptions},
  mesh::build_mesh,
  problem::FiniteElement,
  FemError,
};

fn init_tracing() {
  let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn sincos_on_unit_square() {
  init_tracing();

  let problem = FiniteElement::new(&[0.0, 1.0, 0.0, 1.0, 4.0], "sincos").unwrap();
  assert_eq!(problem.kind(), Some(FieldKind::SinCos));

  let mesh = problem.mesh();
  assert_eq!(mesh.nnodes(), 25);
  assert_eq!(mesh.ncells(), 32);
  assert_eq!(problem.solution().len(), 25);

  for &ivertex in mesh.boundary_nodes() {
    let expected = Field::SinCosBoundary.eval_point(mesh.node(ivertex));
    assert_eq!(problem.solution()[ivertex], expected);
  }
}

#[test]
fn bump_on_unit_square() {
  init_tracing();

  let problem = FiniteElement::new(&[0.0, 1.0, 0.0, 1.0, 4.0], "Bump").unwrap();
  assert_eq!(problem.kind(), Some(FieldKind::Bump));
  assert_eq!(*problem.fields(), FieldPair::bump());
  assert_ne!(*problem.fields(), FieldPair::sincos());

  let mesh = problem.mesh();
  assert_eq!(problem.solution().len(), 25);
  for &ivertex in mesh.boundary_nodes() {
    assert_eq!(problem.solution()[ivertex], 0.0);
  }

  // symmetric data gives a symmetric solution, peaked in the center
  let center = 12;
  let max = problem.solution().max();
  assert_eq!(problem.solution()[center], max);
  assert!((problem.solution()[6] - problem.solution()[18]).abs() < 1e-12);
  assert!((problem.solution()[8] - problem.solution()[16]).abs() < 1e-12);
}

#[test]
fn solve_is_idempotent() {
  let mesh = build_mesh(&[0.0, 1.0, 0.0, 1.0, 9.0]).unwrap();
  let fields = FieldPair::sincos();
  for solver in [LinearSolver::DenseCholesky, LinearSolver::SparseCholesky] {
    let options = SolverOptions::with_solver(solver);
    let first = lse::solve_with(&mesh, &fields.source, &fields.boundary, &options).unwrap();
    let second = lse::solve_with(&mesh, &fields.source, &fields.boundary, &options).unwrap();
    assert_eq!(first, second);
  }
}

/// The nodal error of the manufactured problem decays quadratically.
#[test]
fn sincos_converges() {
  init_tracing();

  let mut errors = Vec::new();
  for ncells_axis in [4, 8, 16, 32] {
    let problem = FiniteElement::new(&[0.0, 1.0, 0.0, 1.0, ncells_axis as f64], "").unwrap();
    let mesh = problem.mesh();
    let exact = na::DVector::from_vec(Field::SinCosBoundary.eval_at(mesh.nodes()));
    errors.push(fe::l2_norm(&(problem.solution() - exact), mesh));
  }

  for pair in errors.windows(2) {
    let rate = (pair[0] / pair[1]).log2();
    assert!(rate > 1.7, "convergence rate {rate} for errors {errors:?}");
  }
  assert!(errors[errors.len() - 1] < 1e-3);
}

#[test]
fn stretched_domain_degrades_gracefully() {
  init_tracing();

  let dense = FiniteElement::new(&[0.0, 2.0, 0.0, 1.0, 6.0], "bump").unwrap();
  let sparse = FiniteElement::with_options(
    &[0.0, 2.0, 0.0, 1.0, 6.0],
    "bump",
    &SolverOptions::with_solver(LinearSolver::SparseCholesky),
  )
  .unwrap();
  let diff = (dense.solution() - sparse.solution()).amax();
  assert!(diff < 1e-12);
  assert!(dense.solution().iter().all(|&u| u >= 0.0));
}

#[test]
fn errors_carry_their_stage() {
  let err = FiniteElement::new(&[0.0, -1.0, 0.0, 1.0, 4.0], "bump").unwrap_err();
  assert!(matches!(err, FemError::InvalidGeometry(_)));
  assert_eq!(err.stage(), trifem::Stage::MeshBuild);

  let mesh = build_mesh(&[0.0, 1.0, 0.0, 1.0, 4.0]).unwrap();
  let empty = |_: &[na::Vector2<f64>]| Vec::<f64>::new();
  let err = lse::solve(&mesh, &empty, &Field::Zeros).unwrap_err();
  assert_eq!(err.stage(), trifem::Stage::RhsAssembly);
  let err = lse::solve(&mesh, &Field::Ones, &empty).unwrap_err();
  assert_eq!(err.stage(), trifem::Stage::BoundaryValues);

  let infinite = |points: &[na::Vector2<f64>]| vec![f64::INFINITY; points.len()];
  let err = lse::solve(&mesh, &infinite, &Field::Zeros).unwrap_err();
  assert!(matches!(err, FemError::NonFiniteField { .. }));
  assert_eq!(err.stage(), trifem::Stage::RhsAssembly);
  let err = lse::solve(&mesh, &Field::Ones, &infinite).unwrap_err();
  assert_eq!(err.stage(), trifem::Stage::BoundaryValues);
}
