//! Solves one boundary value problem on a square and prints a summary.
//!
//! Usage: `cargo run --example square -- --params 0 1 0 1 8 --fields bump`

extern crate nalgebra as na;

use clap::Parser;
use trifem::{
  fe,
  field::{Field, FieldKind, ScalarField},
  lse::{LinearSolver, SolverOptions},
  problem::FiniteElement,
};

#[derive(Parser)]
#[command(version, about)]
struct Args {
  /// Domain extents and subdivision count.
  #[arg(
    short,
    long,
    num_args = 5,
    value_names = ["XMIN", "XMAX", "YMIN", "YMAX", "N"],
    default_values_t = [0.0, 1.0, 0.0, 1.0, 4.0],
    allow_negative_numbers = true
  )]
  params: Vec<f64>,

  /// Field selector. Names containing "bump" pick the unit source.
  #[arg(short, long, default_value = "sincos")]
  fields: String,

  /// Factorize the reduced system with the sparse Cholesky solver.
  #[arg(long)]
  sparse: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt::init();
  let args = Args::parse();

  let solver = if args.sparse {
    LinearSolver::SparseCholesky
  } else {
    LinearSolver::DenseCholesky
  };
  let options = SolverOptions::with_solver(solver);
  let problem = FiniteElement::with_options(&args.params, &args.fields, &options)?;
  let mesh = problem.mesh();
  let solution = problem.solution();

  println!("fields:     {:?}", problem.fields());
  println!("nodes:      {}", mesh.nnodes());
  println!("cells:      {}", mesh.ncells());
  println!("free nodes: {}", mesh.free_nodes().len());
  println!("mesh width: {:.3e}", mesh.mesh_width());
  println!("min u:      {:.6}", solution.min());
  println!("max u:      {:.6}", solution.max());
  println!("L2 norm:    {:.6}", fe::l2_norm(solution, mesh));

  if problem.kind() == Some(FieldKind::SinCos) {
    let exact = na::DVector::from_vec(Field::SinCosBoundary.eval_at(mesh.nodes()));
    let error = fe::l2_norm(&(solution - exact), mesh);
    println!("L2 error:   {error:.3e}");
  }

  println!();
  println!("{:>10} {:>10} {:>12}", "x", "y", "u");
  for (node, u) in mesh.nodes().iter().zip(solution.iter()) {
    println!("{:>10.4} {:>10.4} {:>12.6}", node.x, node.y, u);
  }

  Ok(())
}
