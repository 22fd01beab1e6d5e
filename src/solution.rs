use crate::error::{AssignmentError, Result};
use crate::matrix::WeightMatrix;
use num_traits::{AsPrimitive, FromPrimitive, NumAssign, PrimInt, Unsigned};
use std::fmt::{Debug, Display};

pub trait UnsignedInt:
    PrimInt
    + Unsigned
    + Display
    + Debug
    + AsPrimitive<usize>
    + AsPrimitive<f64>
    + FromPrimitive
    + NumAssign
{
}

impl<T> UnsignedInt for T where
    T: PrimInt
        + Unsigned
        + Display
        + Debug
        + AsPrimitive<usize>
        + AsPrimitive<f64>
        + FromPrimitive
        + NumAssign
{
}

/// Relative tolerance used to clamp reduced costs that are zero up to floating point noise
pub const FLOATING_POINT_EPSILON: f64 = 1.0E-14;

///
/// Row and column potentials of the dual linear program
///
#[derive(Debug, Clone, PartialEq)]
pub struct DualState {
    /// px[i] is the dual variable of row i
    pub px: Vec<f64>,
    /// py[j] is the dual variable of column j
    pub py: Vec<f64>,
}

impl DualState {
    pub fn new(n: usize) -> DualState {
        DualState {
            px: vec![0.; n],
            py: vec![0.; n],
        }
    }

    /// Reduced cost of the arc i-j.
    ///
    /// Subtracting `min_weight` re-weights the matrix to be non-negative, so the all-zero dual
    /// state is feasible whatever the sign of the input. Values within `tolerance` scaled by the
    /// magnitude of the terms are reported as exactly zero.
    #[inline]
    pub fn reduced_cost(&self, matrix: &WeightMatrix, i: usize, j: usize, tolerance: f64) -> f64 {
        let weight = matrix.get(i, j);
        let reduced_cost = (weight - matrix.min_weight()) + self.px[i] - self.py[j];

        let magnitude = weight.abs() + self.px[i].abs() + self.py[j].abs();
        if reduced_cost.abs() <= tolerance * magnitude {
            return 0.;
        }
        reduced_cost
    }
}

///
/// Partial matching between rows and columns
///
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingState<I>
where
    I: UnsignedInt,
{
    /// index i gives the column, j, matched to row i
    ///
    /// Unmatched rows are marked by MAX value of the integer type (u32::MAX for u32)
    pub xy: Vec<I>,
    /// index j gives the row, i, matched to column j
    ///
    /// Unmatched columns are marked by MAX value of the integer type (u32::MAX for u32)
    pub yx: Vec<I>,
    /// number of unmatched rows
    pub num_unmatched: usize,
}

impl<I> MatchingState<I>
where
    I: UnsignedInt,
{
    /// Empty matching for an n×n problem.
    ///
    /// MAX value of the index type is reserved for unmatched entries so `n` has to stay below it.
    pub fn new(n: usize) -> Result<MatchingState<I>> {
        match I::from_usize(n) {
            Some(n_i) if n_i < I::max_value() => Ok(MatchingState {
                xy: vec![I::max_value(); n],
                yx: vec![I::max_value(); n],
                num_unmatched: n,
            }),
            _ => Err(AssignmentError::InvalidInput(format!(
                "matrix dimension {} does not fit the index type",
                n
            ))),
        }
    }

    #[inline]
    pub fn is_row_matched(&self, i: usize) -> bool {
        self.xy[i] != I::max_value()
    }

    #[inline]
    pub fn is_col_matched(&self, j: usize) -> bool {
        self.yx[j] != I::max_value()
    }

    /// Column matched to row i, if any.
    #[inline]
    pub fn col_of(&self, i: usize) -> Option<usize> {
        let j = self.xy[i];
        if j == I::max_value() {
            None
        } else {
            Some(j.as_())
        }
    }

    /// Row matched to column j, if any.
    #[inline]
    pub fn row_of(&self, j: usize) -> Option<usize> {
        let i = self.yx[j];
        if i == I::max_value() {
            None
        } else {
            Some(i.as_())
        }
    }

    /// Records the pair i-j. The previous partners of i and j are left for the caller to rewire.
    #[inline]
    pub fn link(&mut self, i: I, j: I) {
        let i_usize: usize = i.as_();
        let j_usize: usize = j.as_();
        self.xy[i_usize] = j;
        self.yx[j_usize] = i;
    }
}
