use crate::error::{AssignmentError, Result};
use tracing::trace;

///
/// Immutable n×n cost matrix stored row-major in a single buffer
///
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    n: usize,
    // memory view of all values, w[i][j] is values[i * n + j]
    values: Vec<f64>,
    min_weight: f64,
}

impl WeightMatrix {
    /// Copies a square matrix given as a slice of rows.
    ///
    /// Fails with [`AssignmentError::InvalidInput`] if some row length differs from the number of
    /// rows or if any entry is not finite.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let mut values = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(AssignmentError::InvalidInput(format!(
                    "matrix is not square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            values.extend_from_slice(row);
        }
        Self::from_flat(n, values)
    }

    /// Takes ownership of a row-major buffer of `n * n` values.
    pub fn from_flat(n: usize, values: Vec<f64>) -> Result<Self> {
        let expected = n.checked_mul(n).ok_or_else(|| {
            AssignmentError::InvalidInput(format!("matrix dimension {} is too large", n))
        })?;
        if values.len() != expected {
            return Err(AssignmentError::InvalidInput(format!(
                "expected {} values for a {}-by-{} matrix, got {}",
                expected,
                n,
                n,
                values.len()
            )));
        }

        let mut min_weight = f64::INFINITY;
        let mut max_weight = f64::NEG_INFINITY;
        for (idx, value) in values.iter().enumerate() {
            if value.is_nan() {
                return Err(AssignmentError::InvalidInput(format!(
                    "weight {}-{} is NaN",
                    idx / n,
                    idx % n
                )));
            }
            if value.is_infinite() {
                return Err(AssignmentError::InvalidInput(format!(
                    "weight {}-{} is infinite",
                    idx / n,
                    idx % n
                )));
            }
            min_weight = min_weight.min(*value);
            max_weight = max_weight.max(*value);
        }
        if n == 0 {
            min_weight = 0.;
        } else if !(n as f64 * (max_weight - min_weight)).is_finite() {
            // potentials grow by up to the weight range in each of the n rounds
            return Err(AssignmentError::InvalidInput(format!(
                "weight range {}..{} is too wide for a {}-by-{} matrix",
                min_weight, max_weight, n, n
            )));
        }
        trace!("matrix {}x{}, min weight {}", n, n, min_weight);

        Ok(Self {
            n,
            values,
            min_weight,
        })
    }

    /// Matrix with every entry negated, turns a maximization into a minimization.
    pub fn negated(&self) -> Self {
        let values: Vec<f64> = self.values.iter().map(|v| -v).collect();
        let min_weight = values
            .iter()
            .fold(if self.n == 0 { 0. } else { f64::INFINITY }, |acc, v| {
                acc.min(*v)
            });
        Self {
            n: self.n,
            values,
            min_weight,
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Smallest entry of the matrix, `0` for the empty matrix.
    #[inline]
    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }

    /// Entry `w[i][j]`. Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.n && j < self.n);
        self.values[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }
}
