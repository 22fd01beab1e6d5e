use crate::digraph::ShortestPathOracle;
use crate::error::{AssignmentError, Result};
use crate::residual::ResidualGraph;
use crate::solution::{DualState, MatchingState, UnsignedInt};
use tracing::trace;

/// Grows the matching by one pair along a shortest s-t path of `residual` and shifts the dual
/// variables by the shortest path distances.
///
/// Edge weights of the residual graph are reduced costs, so they are non-negative as long as
/// the dual state is feasible, which is what the oracle requires.
pub fn augment<I, O>(
    residual: &ResidualGraph,
    matching: &mut MatchingState<I>,
    duals: &mut DualState,
) -> Result<()>
where
    I: UnsignedInt,
    O: ShortestPathOracle,
{
    let n = residual.n;
    let spt = O::search(&residual.graph, residual.source()).map_err(|err| {
        AssignmentError::InternalInvariantViolation(format!(
            "shortest path search on the residual graph failed: {}",
            err
        ))
    })?;

    let path = spt.path_to(residual.sink()).ok_or_else(|| {
        AssignmentError::InternalInvariantViolation(
            "sink is unreachable while rows remain unmatched".to_string(),
        )
    })?;
    trace!("augmenting path: {:?}", path);

    // augment along the alternating path, reverse arcs get overwritten by their neighbours
    for edge in path.iter().filter(|e| e.from < n && e.to >= n && e.to < 2 * n) {
        let i = I::from_usize(edge.from).ok_or_else(|| index_overflow(edge.from))?;
        let j = I::from_usize(edge.to - n).ok_or_else(|| index_overflow(edge.to - n))?;
        matching.link(i, j);
    }
    matching.num_unmatched -= 1;

    for (i, px_ref) in duals.px.iter_mut().enumerate() {
        *px_ref += finite_dist(&spt, i)?;
    }
    for (j, py_ref) in duals.py.iter_mut().enumerate() {
        *py_ref += finite_dist(&spt, residual.col_vertex(j))?;
    }
    trace!("xy: {:?}", matching.xy);
    trace!("px: {:?}, py: {:?}", duals.px, duals.py);
    Ok(())
}

fn finite_dist<O: ShortestPathOracle>(spt: &O, v: usize) -> Result<f64> {
    let dist = spt.dist_to(v);
    if dist.is_finite() {
        Ok(dist)
    } else {
        Err(AssignmentError::InternalInvariantViolation(format!(
            "vertex {} of the residual graph is unreachable",
            v
        )))
    }
}

fn index_overflow(index: usize) -> AssignmentError {
    AssignmentError::InternalInvariantViolation(format!(
        "index {} does not fit the index type",
        index
    ))
}

#[cfg(test)]
mod tests {
    use super::augment;
    use crate::digraph::{DijkstraSP, DirectedEdge, EdgeWeightedDigraph, ShortestPathOracle};
    use crate::error::{AssignmentError, Result};
    use crate::matrix::WeightMatrix;
    use crate::residual::ResidualGraph;
    use crate::solution::{DualState, MatchingState, FLOATING_POINT_EPSILON};

    #[test]
    fn test_first_round_picks_cheapest_arc() {
        let matrix = WeightMatrix::from_rows(&[[4., 1.], [2., 3.]]).unwrap();
        let mut duals = DualState::new(2);
        let mut matching = MatchingState::<u32>::new(2).unwrap();
        let residual =
            ResidualGraph::build(&matrix, &duals, &matching, FLOATING_POINT_EPSILON).unwrap();
        augment::<u32, DijkstraSP>(&residual, &mut matching, &mut duals).unwrap();

        assert_eq!(matching.num_unmatched, 1);
        assert_eq!(matching.col_of(0), Some(1));
        assert_eq!(matching.row_of(1), Some(0));
        assert_eq!(duals.px, [0., 0.]);
        assert_eq!(duals.py, [1., 0.]);
    }

    #[test]
    fn test_second_round_reroutes() {
        // both rows prefer column 0, the second path moves row 0 over to column 1
        let matrix = WeightMatrix::from_rows(&[[1., 2.], [1., 5.]]).unwrap();
        let mut duals = DualState::new(2);
        let mut matching = MatchingState::<u32>::new(2).unwrap();
        for _ in 0..2 {
            let residual =
                ResidualGraph::build(&matrix, &duals, &matching, FLOATING_POINT_EPSILON)
                    .unwrap();
            augment::<u32, DijkstraSP>(&residual, &mut matching, &mut duals).unwrap();
        }
        assert_eq!(matching.num_unmatched, 0);
        assert_eq!(matching.xy, [1, 0]);
        assert_eq!(matching.yx, [1, 0]);
    }

    /// Oracle that never reaches anything but the source
    struct Disconnected;

    impl ShortestPathOracle for Disconnected {
        fn search(_graph: &EdgeWeightedDigraph, _source: usize) -> Result<Self> {
            Ok(Disconnected)
        }
        fn dist_to(&self, _v: usize) -> f64 {
            f64::INFINITY
        }
        fn path_to(&self, _v: usize) -> Option<Vec<DirectedEdge>> {
            None
        }
    }

    #[test]
    fn test_unreachable_sink_is_a_defect() {
        let matrix = WeightMatrix::from_rows(&[[1.]]).unwrap();
        let mut duals = DualState::new(1);
        let mut matching = MatchingState::<u32>::new(1).unwrap();
        let residual =
            ResidualGraph::build(&matrix, &duals, &matching, FLOATING_POINT_EPSILON).unwrap();
        let result = augment::<u32, Disconnected>(&residual, &mut matching, &mut duals);
        assert!(matches!(
            result,
            Err(AssignmentError::InternalInvariantViolation(_))
        ));
        assert_eq!(matching.num_unmatched, 1);
    }
}
