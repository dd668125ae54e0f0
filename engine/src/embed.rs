use voiceguard_identity::EMBEDDING_DIM;

use crate::EngineError;

/// Produces a fixed-dimension speaker embedding from trimmed audio.
///
/// Implementations must be deterministic for identical input so that
/// verification stays reproducible. The first call may block while model
/// weights load; the engine imposes no timeout of its own.
pub trait SpeakerEmbedder: Send + Sync {
    /// Mono PCM float samples at `sample_rate` Hz -> [`EMBEDDING_DIM`] floats.
    fn embed(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f32>, EngineError>;
}

/// Removes leading and trailing silence from a recording.
pub trait SilenceTrimmer: Send + Sync {
    /// May return an empty buffer when the recording is entirely silence.
    fn trim(&self, samples: &[f32], sample_rate: u32) -> Vec<f32>;
}

/// Runs the capture half of the pipeline: trim, embed, validate.
///
/// An all-silence recording trims to an empty buffer, and the embedding of
/// silence is degenerate, so both are rejected here rather than reaching
/// the store.
pub fn extract_embedding(
    trimmer: &dyn SilenceTrimmer,
    embedder: &dyn SpeakerEmbedder,
    samples: &[f32],
    sample_rate: u32,
) -> Result<Vec<f32>, EngineError> {
    let trimmed = trimmer.trim(samples, sample_rate);
    if trimmed.is_empty() {
        return Err(EngineError::InvalidEmbedding {
            reason: "recording is entirely silence".into(),
        });
    }

    let embedding = embedder.embed(&trimmed, sample_rate)?;
    validate_embedding(&embedding)?;
    Ok(embedding)
}

/// Rejects wrong-dimension, non-finite and all-zero vectors.
pub fn validate_embedding(embedding: &[f32]) -> Result<(), EngineError> {
    if embedding.len() != EMBEDDING_DIM {
        return Err(EngineError::InvalidEmbedding {
            reason: format!("expected {EMBEDDING_DIM} dimensions, got {}", embedding.len()),
        });
    }
    if let Some(i) = embedding.iter().position(|x| !x.is_finite()) {
        return Err(EngineError::InvalidEmbedding {
            reason: format!("non-finite value at index {i}"),
        });
    }
    if embedding.iter().all(|&x| x == 0.0) {
        return Err(EngineError::InvalidEmbedding {
            reason: "all-zero vector".into(),
        });
    }
    Ok(())
}
