//! Optimality certificate checks.
//!
//! A perfect matching together with a feasible dual state satisfying complementary slackness
//! is optimal by linear programming duality, so these checks verify a solution without search.

use crate::error::{AssignmentError, Result};
use crate::matrix::WeightMatrix;
use crate::solution::{DualState, MatchingState, UnsignedInt};
use tracing::{trace, warn};

/// Checks that every arc has non-negative reduced cost.
pub fn is_dual_feasible(matrix: &WeightMatrix, duals: &DualState, tolerance: f64) -> Result<()> {
    let n = matrix.n();
    for i in 0..n {
        for j in 0..n {
            let reduced_cost = duals.reduced_cost(matrix, i, j, tolerance);
            if reduced_cost < 0. {
                warn!("Dual variables are not feasible");
                return Err(AssignmentError::InternalInvariantViolation(format!(
                    "dual variables are not feasible: reduced cost of {}-{} is {}",
                    i, j, reduced_cost
                )));
            }
        }
    }
    Ok(())
}

/// Checks that every matched arc has zero reduced cost.
pub fn is_complementary_slack<I: UnsignedInt>(
    matrix: &WeightMatrix,
    duals: &DualState,
    matching: &MatchingState<I>,
    tolerance: f64,
) -> Result<()> {
    for i in 0..matrix.n() {
        if let Some(j) = matching.col_of(i) {
            let reduced_cost = duals.reduced_cost(matrix, i, j, tolerance);
            if reduced_cost != 0. {
                warn!("Primal and dual variables are not complementary slack");
                return Err(AssignmentError::InternalInvariantViolation(format!(
                    "primal and dual variables are not complementary slack: reduced cost of {}-{} is {}",
                    i, j, reduced_cost
                )));
            }
        }
    }
    Ok(())
}

/// Checks that `xy` is a permutation and `yx` is its inverse.
pub fn is_perfect_matching<I: UnsignedInt>(matching: &MatchingState<I>) -> Result<()> {
    let n = matching.xy.len();
    if matching.yx.len() != n {
        return Err(AssignmentError::InternalInvariantViolation(format!(
            "matching sides differ in size: {} rows, {} columns",
            n,
            matching.yx.len()
        )));
    }

    let mut perm = vec![false; n];
    for i in 0..n {
        match matching.col_of(i) {
            Some(j) if j < n && !perm[j] => perm[j] = true,
            Some(j) if j < n => {
                warn!("Not a perfect matching");
                return Err(AssignmentError::InternalInvariantViolation(format!(
                    "not a perfect matching: column {} is matched twice",
                    j
                )));
            }
            _ => {
                warn!("Not a perfect matching");
                return Err(AssignmentError::InternalInvariantViolation(format!(
                    "not a perfect matching: row {} has no valid column",
                    i
                )));
            }
        }
    }

    for j in 0..n {
        let inverse = matching.row_of(j).and_then(|i| matching.col_of(i));
        if inverse != Some(j) {
            warn!("xy and yx are not inverses");
            return Err(AssignmentError::InternalInvariantViolation(format!(
                "xy and yx are not inverses at column {}",
                j
            )));
        }
    }
    Ok(())
}

/// Runs every optimality check.
pub fn certify_solution<I: UnsignedInt>(
    matrix: &WeightMatrix,
    duals: &DualState,
    matching: &MatchingState<I>,
    tolerance: f64,
) -> Result<()> {
    is_perfect_matching(matching)?;
    is_dual_feasible(matrix, duals, tolerance)?;
    is_complementary_slack(matrix, duals, matching, tolerance)?;
    trace!("solution certified");
    Ok(())
}
