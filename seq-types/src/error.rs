//! Error types for stepnet.

use thiserror::Error;

/// Errors that can occur while decoding machine-state frames.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A frame ended before all expected integers were read
    #[error("malformed frame: expected {expected} integers, got {got}")]
    MalformedFrame {
        /// Number of integers a well-formed frame carries.
        expected: usize,
        /// Number of integers actually present.
        got: usize,
    },

    /// A decoded frame violated a state invariant and was rejected
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
