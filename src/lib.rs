//! Exact solver for the dense square linear assignment problem.
//!
//! [`AssignmentProblem`] finds a minimum weight perfect matching of an n×n cost matrix with the
//! successive shortest path primal-dual method: n rounds, each growing the matching by one pair
//! along a shortest augmenting path of a residual graph weighted by reduced costs. The dual
//! potentials it keeps are an optimality certificate that is checked after the last round.
//!
//! ```
//! use dense_linear_assignment::{solve, WeightMatrix};
//!
//! let matrix = WeightMatrix::from_rows(&[[1., 2.], [2., 1.]]).unwrap();
//! let problem = solve(&matrix).unwrap();
//! assert_eq!(problem.weight(), 2.);
//! assert_eq!(problem.sol(0), Ok(0));
//! ```
pub mod augment;
pub mod certify;
pub mod digraph;
pub mod error;
pub mod matrix;
pub mod residual;
pub mod solution;
pub mod solver;

pub use digraph::{DijkstraSP, DirectedEdge, EdgeWeightedDigraph, ShortestPathOracle};
pub use error::AssignmentError;
pub use matrix::WeightMatrix;
pub use solution::{DualState, MatchingState, UnsignedInt, FLOATING_POINT_EPSILON};
pub use solver::{solve, solve_maximize, AssignmentProblem, SolverParams};
