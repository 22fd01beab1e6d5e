use thiserror::Error;

/// Errors reported by the assignment solver and its shortest path collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignmentError {
    /// The cost matrix (or a graph handed to the shortest path oracle) is malformed.
    ///
    /// Raised at construction only, no partially built solver is ever returned.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An accessor was called with a row or column index outside `[0, n)`.
    #[error("index is not between 0 and {}: {index}", last_index(.n))]
    IndexOutOfRange { index: usize, n: usize },

    /// The certifier or the augmentation step detected a broken invariant.
    ///
    /// This is an algorithm defect, valid input never triggers it.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

pub type Result<T, E = AssignmentError> = std::result::Result<T, E>;

fn last_index(n: &usize) -> i64 {
    *n as i64 - 1
}
