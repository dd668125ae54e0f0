use thiserror::Error;

/// Errors returned by identity store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The durable representation could not be parsed. The caller decides
    /// whether to start empty or abort.
    #[error("store: corrupt data: {0}")]
    Corrupt(String),

    /// Writing the durable representation failed. The in-memory set is
    /// rolled back before this is returned, so memory and disk stay
    /// consistent.
    #[error("store: persistence failed: {0}")]
    Persistence(String),
}
