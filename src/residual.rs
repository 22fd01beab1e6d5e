use crate::digraph::{DirectedEdge, EdgeWeightedDigraph};
use crate::error::{AssignmentError, Result};
use crate::matrix::WeightMatrix;
use crate::solution::{DualState, MatchingState, UnsignedInt};
use tracing::trace;

///
/// Residual graph of one augmentation round
///
/// Vertices `0..n` are rows, `n..2n` are columns, `2n` is the super source and `2n + 1` the
/// super sink.
///
#[derive(Debug, Clone)]
pub struct ResidualGraph {
    pub graph: EdgeWeightedDigraph,
    pub n: usize,
}

impl ResidualGraph {
    #[inline]
    pub fn source(&self) -> usize {
        2 * self.n
    }

    #[inline]
    pub fn sink(&self) -> usize {
        2 * self.n + 1
    }

    #[inline]
    pub fn col_vertex(&self, j: usize) -> usize {
        self.n + j
    }

    /// Builds the residual graph from the current matching and dual state.
    ///
    /// Matched pairs become zero cost column -> row arcs so a path can undo them, every other
    /// pair is a row -> column arc weighted by its reduced cost.
    pub fn build<I: UnsignedInt>(
        matrix: &WeightMatrix,
        duals: &DualState,
        matching: &MatchingState<I>,
        tolerance: f64,
    ) -> Result<Self> {
        let n = matrix.n();
        let s = 2 * n;
        let t = 2 * n + 1;
        let mut graph = EdgeWeightedDigraph::new(2 * n + 2);

        let mut num_free_rows = 0;
        for i in 0..n {
            if !matching.is_row_matched(i) {
                graph.add_edge(DirectedEdge::new(s, i, 0.))?;
                num_free_rows += 1;
            }
        }
        let mut num_free_cols = 0;
        for j in 0..n {
            if !matching.is_col_matched(j) {
                graph.add_edge(DirectedEdge::new(n + j, t, duals.py[j]))?;
                num_free_cols += 1;
            }
        }
        if num_free_rows == 0 || num_free_cols == 0 {
            return Err(AssignmentError::InternalInvariantViolation(format!(
                "residual graph without free vertices: {} free rows, {} free columns",
                num_free_rows, num_free_cols
            )));
        }

        for i in 0..n {
            let matched_col = matching.col_of(i);
            for j in 0..n {
                if matched_col == Some(j) {
                    graph.add_edge(DirectedEdge::new(n + j, i, 0.))?;
                } else {
                    let reduced_cost = duals.reduced_cost(matrix, i, j, tolerance);
                    graph.add_edge(DirectedEdge::new(i, n + j, reduced_cost))?;
                }
            }
        }
        trace!(
            "residual graph: {} free rows, {} free columns, {} edges",
            num_free_rows,
            num_free_cols,
            graph.num_edges()
        );

        Ok(Self { graph, n })
    }
}
