//! Compiles a revealed Minesweeper board, in two or three dimensions, into a
//! constraint network of finite-domain variables and table constraints.
//!
//! Each revealed cell becomes a constraint over its neighbours whose table
//! lists every way of placing exactly that many mines. Propagation and search
//! over the resulting [`Network`] are left to an external engine.

pub mod board;
pub mod csp;
pub mod error;
pub mod generate;
pub mod model;
pub mod neighbors;
pub mod options;
pub mod tuples;

pub use board::{Board, Cell};
pub use csp::{Constraint, Domain, Network, Tuple, Value, VarId, Variable};
pub use error::{ModelError, Result};
pub use generate::{SampledBoard, sample_board};
pub use model::{Model, VariableGrid, build, build_2d, build_3d, reduce_domains};
pub use neighbors::{Stencil, closed_neighborhood, neighbors};
pub use options::ModelOptions;
