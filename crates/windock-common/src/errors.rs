use crate::id::WindowId;

/// Errors from a single window operation.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    /// The backend has no native support for the requested operation
    /// (for example grouping on a backend without native grouping).
    #[error("not supported")]
    NotSupported,

    /// The window went away while an operation was in flight.
    #[error("window closed: {0}")]
    Closed(WindowId),

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WindockError {
    #[error(transparent)]
    Window(#[from] WindowError),

    #[error("container error: {0}")]
    Container(String),

    #[error("{0}")]
    Other(String),
}

impl WindockError {
    /// True when the underlying cause is a missing backend capability.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, WindockError::Window(WindowError::NotSupported))
    }
}
