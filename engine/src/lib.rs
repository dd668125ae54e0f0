//! Speaker enrollment and verification decision engine.
//!
//! # Architecture
//!
//! The pipeline processes a recording in three stages:
//!
//! 1. [`SilenceTrimmer::trim`]: raw samples -> samples without leading/trailing silence
//! 2. [`SpeakerEmbedder::embed`]: trimmed samples -> 192-dim embedding vector
//! 3. [`Engine`]: embedding + identity snapshot + [`Policy`] -> verdict or record
//!
//! Stages 1 and 2 are external collaborators behind traits; only the
//! decision stage lives here. [`Engine::verify`] is a pure function of the
//! probe embedding, a store snapshot, and the policy threshold — it keeps
//! no state between calls.
//!
//! # Matching
//!
//! Verification scores every enrolled identity with cosine similarity
//! (magnitude carries no speaker information for this model family, only
//! direction does) and accepts the best-scoring identity when its score
//! clears the policy threshold. The best candidate is reported even when
//! it falls short, so callers can show "closest match was X at s".

mod embed;
mod engine;
mod error;
mod similarity;

pub use embed::{extract_embedding, validate_embedding, SilenceTrimmer, SpeakerEmbedder};
pub use engine::{decide, parse_birth_date, Engine, Policy, VerificationResult, DEFAULT_THRESHOLD};
pub use error::EngineError;
pub use similarity::cosine_sim;
