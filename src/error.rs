use thiserror::Error;

/// Failure modes surfaced synchronously by this crate's fallible operations.
///
/// `NoPath` is deliberately absent: an unreachable target is not an error
/// condition here, it is represented by an empty path (together with a
/// `cut_short` flag on extractors that track one) or a distance equal to
/// `f32::MAX`.
#[derive(Debug, Error, PartialEq)]
pub enum GridFlowError {
    /// Operated on a [`crate::DistanceField`] whose buffers have not been
    /// allocated by [`crate::DistanceField::initialize`].
    #[error("distance field is not initialized")]
    NotInitialized,

    /// A null/empty map, an unknown graph vertex, or a self-loop edge was
    /// supplied.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `initialize_cost` was given a grid whose dimensions differ from the
    /// field's last physical map.
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    /// Topological sort found a cycle. Non-fatal: callers receive `false`
    /// rather than a panic or partial order.
    #[error("graph contains a cycle")]
    CycleDetected,
}

pub type GridFlowResult<T> = Result<T, GridFlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        assert_eq!(
            GridFlowError::InvalidArgument("unknown vertex".into()).to_string(),
            "invalid argument: unknown vertex"
        );
        assert_eq!(
            GridFlowError::ShapeMismatch {
                expected: (4, 4),
                found: (3, 3)
            }
            .to_string(),
            "shape mismatch: expected (4, 4), found (3, 3)"
        );
    }
}
