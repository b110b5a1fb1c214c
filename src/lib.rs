//! Piecewise-linear finite elements for second-order elliptic problems on a
//! rectangular domain.
//!
//! The pipeline is mesh generation ([`mesh::build_mesh`]), load assembly
//! ([`assemble::assemble_galvec`]), boundary value imposition and the reduced
//! solve ([`lse::solve`]). [`problem::FiniteElement`] runs all of it from a
//! flat parameter list and a field selector.

extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod assemble;
pub mod error;
pub mod fe;
pub mod field;
pub mod linalg;
pub mod lse;
pub mod mesh;
pub mod problem;
pub mod sparse;
pub mod util;

pub use error::{FemError, FemResult, Stage};

pub type VertexIdx = usize;
pub type CellIdx = usize;

/// A point of the plane.
pub type Point = na::Vector2<f64>;
