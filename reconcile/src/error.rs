//! Error taxonomy for reconciliation operations

/// Boxed source error for transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for reconciliation operations.
///
/// Every verb propagates the first error it encounters; nothing is retried or
/// swallowed at this layer. `NotFound` on read is a drift signal, not a fault:
/// callers drop their local state instead of failing the run.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport failure: {0}")]
    Transport(#[source] BoxError),
}

impl ReconcileError {
    /// Wrap an arbitrary lower-level failure as a transport error.
    pub fn transport<E: Into<BoxError>>(source: E) -> Self {
        ReconcileError::Transport(source.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ReconcileError::NotFound(_))
    }
}

/// Result type alias for reconciliation operations
pub type Result<T> = std::result::Result<T, ReconcileError>;
