use thiserror::Error;

/// Failures a collaborator implementation can report back across the trait
/// boundary (NV store, EC I/O, display, input, audio, kernel loader, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("collaborator I/O failure")]
    Io,
    #[error("collaborator timed out")]
    Timeout,
    #[error("operation unsupported by this collaborator")]
    Unsupported,
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// An NV key was read or written that this store does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownNvKey;
