use crate::augment::augment;
use crate::certify;
use crate::digraph::{DijkstraSP, ShortestPathOracle};
use crate::error::{AssignmentError, Result};
use crate::matrix::WeightMatrix;
use crate::residual::ResidualGraph;
use crate::solution::{DualState, MatchingState, UnsignedInt, FLOATING_POINT_EPSILON};
use tracing::{debug, trace};

/// Optional knobs of [`AssignmentProblem::solve_with_params`], `None` keeps the default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolverParams {
    /// relative tolerance for clamping reduced costs to zero, [`FLOATING_POINT_EPSILON`] by default
    pub tolerance: Option<f64>,
    /// verify the optimality certificate, on in tests, debug builds and with the `certify` feature
    pub certify: Option<bool>,
}

impl SolverParams {
    /// Whether certification runs when [`SolverParams::certify`] is `None`.
    pub const fn certify_by_default() -> bool {
        cfg!(any(test, debug_assertions, feature = "certify"))
    }
}

///
/// Optimal solution of the dense square assignment problem
///
/// Finds a minimum weight perfect matching of an n×n cost matrix by n rounds of shortest
/// augmenting paths, keeping a feasible dual solution that certifies optimality.
///
#[derive(Debug, Clone)]
pub struct AssignmentProblem<I = u32>
where
    I: UnsignedInt,
{
    matrix: WeightMatrix,
    duals: DualState,
    matching: MatchingState<I>,
    tolerance: f64,
    maximize: bool,
}

impl<I: UnsignedInt> AssignmentProblem<I> {
    /// Solves the minimization problem with the default shortest path oracle.
    pub fn new(matrix: &WeightMatrix) -> Result<Self> {
        Self::solve_with_params::<DijkstraSP>(matrix.clone(), false, SolverParams::default())
    }

    /// Solves the maximization problem, `weight()` reports the maximum total weight.
    pub fn new_maximize(matrix: &WeightMatrix) -> Result<Self> {
        Self::solve_with_params::<DijkstraSP>(matrix.clone(), true, SolverParams::default())
    }

    /// Solves with explicit knobs, `maximize` negates the matrix first and `O` picks the
    /// shortest path oracle used in every round.
    pub fn solve_with_params<O: ShortestPathOracle>(
        matrix: WeightMatrix,
        maximize: bool,
        params: SolverParams,
    ) -> Result<Self> {
        let tolerance = params.tolerance.unwrap_or(FLOATING_POINT_EPSILON);
        if !(tolerance.is_finite() && tolerance >= 0.) {
            return Err(AssignmentError::InvalidInput(format!(
                "tolerance must be finite and non-negative, got {}",
                tolerance
            )));
        }
        let certify = params
            .certify
            .unwrap_or_else(SolverParams::certify_by_default);

        // maximizing w is minimizing -w
        let matrix = if maximize { matrix.negated() } else { matrix };
        let n = matrix.n();
        let mut problem = Self {
            duals: DualState::new(n),
            matching: MatchingState::new(n)?,
            matrix,
            tolerance,
            maximize,
        };
        debug!("solving {}x{} assignment problem, maximize: {}", n, n, maximize);

        // add n edges to matching
        for round in 0..n {
            if certify {
                certify::is_dual_feasible(&problem.matrix, &problem.duals, tolerance)?;
                certify::is_complementary_slack(
                    &problem.matrix,
                    &problem.duals,
                    &problem.matching,
                    tolerance,
                )?;
            }
            trace!("round {}: {} unmatched rows", round, problem.matching.num_unmatched);
            problem.augment::<O>()?;
        }
        if certify {
            problem.certify()?;
        }
        debug!("optimal weight: {}", problem.weight());
        Ok(problem)
    }

    fn augment<O: ShortestPathOracle>(&mut self) -> Result<()> {
        let residual =
            ResidualGraph::build(&self.matrix, &self.duals, &self.matching, self.tolerance)?;
        augment::<I, O>(&residual, &mut self.matching, &mut self.duals)
    }

    /// Re-runs the optimality certificate checks on the stored solution.
    pub fn certify(&self) -> Result<()> {
        certify::certify_solution(&self.matrix, &self.duals, &self.matching, self.tolerance)
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.matrix.n()
    }

    #[inline]
    fn validate(&self, index: usize) -> Result<()> {
        if index >= self.n() {
            return Err(AssignmentError::IndexOutOfRange {
                index,
                n: self.n(),
            });
        }
        Ok(())
    }

    /// Dual optimal value of row i.
    ///
    /// Potentials are those of the minimization problem; for a maximization they belong to the
    /// negated matrix.
    pub fn dual_row(&self, i: usize) -> Result<f64> {
        self.validate(i)?;
        Ok(self.duals.px[i])
    }

    /// Dual optimal value of column j.
    pub fn dual_col(&self, j: usize) -> Result<f64> {
        self.validate(j)?;
        Ok(self.duals.py[j])
    }

    /// Column matched to row i in the optimal solution.
    pub fn sol(&self, i: usize) -> Result<usize> {
        self.validate(i)?;
        self.matching.col_of(i).ok_or_else(|| {
            AssignmentError::InternalInvariantViolation(format!("row {} is unmatched", i))
        })
    }

    /// Total weight of the optimal solution in terms of the input matrix.
    pub fn weight(&self) -> f64 {
        let total = (0..self.n())
            .filter_map(|i| self.matching.col_of(i).map(|j| self.matrix.get(i, j)))
            .sum::<f64>();
        if self.maximize {
            -total
        } else {
            total
        }
    }

    /// Matched `(row, column)` pairs ordered by row.
    pub fn assignment(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.n()).filter_map(move |i| self.matching.col_of(i).map(|j| (i, j)))
    }

    #[inline]
    pub fn is_maximization(&self) -> bool {
        self.maximize
    }

    /// Row to column mapping, `I::max_value()` marks an unmatched row.
    #[inline]
    pub fn row_to_col(&self) -> &[I] {
        &self.matching.xy
    }

    /// Column to row mapping, `I::max_value()` marks an unmatched column.
    #[inline]
    pub fn col_to_row(&self) -> &[I] {
        &self.matching.yx
    }
}

/// Solves the minimization problem with `u32` indices and the default oracle.
pub fn solve(matrix: &WeightMatrix) -> Result<AssignmentProblem> {
    AssignmentProblem::<u32>::new(matrix)
}

/// Solves the maximization problem with `u32` indices and the default oracle.
pub fn solve_maximize(matrix: &WeightMatrix) -> Result<AssignmentProblem> {
    AssignmentProblem::<u32>::new_maximize(matrix)
}
