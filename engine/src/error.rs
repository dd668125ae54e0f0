use thiserror::Error;
use voiceguard_identity::StoreError;

/// Errors returned by enrollment and verification operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Embedding is missing, wrong-dimension, all-zero, or contains
    /// non-finite values. Such vectors signal an upstream capture failure
    /// and are never stored.
    #[error("invalid embedding: {reason}")]
    InvalidEmbedding { reason: String },

    /// Enrollment metadata failed required-field or parse checks.
    #[error("invalid metadata: {reason}")]
    InvalidMetadata { reason: String },

    /// Policy threshold outside [0, 1].
    #[error("invalid threshold {got}: must be within [0, 1]")]
    InvalidThreshold { got: f32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}
