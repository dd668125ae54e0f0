use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use voiceguard_identity::{EnrollmentInfo, IdentityRecord, IdentityStore};

use crate::embed::validate_embedding;
use crate::similarity::cosine_sim;
use crate::EngineError;

/// Default minimum similarity for accepting a verification attempt.
pub const DEFAULT_THRESHOLD: f32 = 0.8;

/// Verification acceptance policy.
///
/// Read from external configuration at invocation time; the engine never
/// persists it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Policy {
    threshold: f32,
}

impl Policy {
    /// Fails with [`EngineError::InvalidThreshold`] outside `[0, 1]`.
    pub fn new(threshold: f32) -> Result<Self, EngineError> {
        if !(0.0..=1.0).contains(&threshold) || threshold.is_nan() {
            return Err(EngineError::InvalidThreshold { got: threshold });
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Outcome of a verification attempt.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    /// True when the best similarity cleared the threshold.
    pub matched: bool,

    /// The accepted identity. Set only when `matched` is true.
    pub identity: Option<IdentityRecord>,

    /// Best similarity across the store; 0.0 when the store is empty.
    pub score: f32,

    /// Best-scoring record even when `matched` is false, so callers can
    /// report "closest match was X at score s, below threshold".
    /// None only when the store is empty.
    pub candidate: Option<IdentityRecord>,
}

/// Enrollment and verification over an owned identity store.
///
/// The store is passed in explicitly; there is no ambient singleton.
pub struct Engine {
    store: Box<dyn IdentityStore>,
}

impl Engine {
    pub fn new(store: Box<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// The underlying store, for listing and administration.
    pub fn store(&self) -> &dyn IdentityStore {
        self.store.as_ref()
    }

    /// Enrolls a new speaker.
    ///
    /// Validates metadata and embedding first; nothing is stored on
    /// rejection. On success the record has a freshly assigned unique ID
    /// and the durable store was updated before this returns.
    pub fn enroll(
        &self,
        info: EnrollmentInfo,
        embedding: Vec<f32>,
    ) -> Result<IdentityRecord, EngineError> {
        validate_metadata(&info)?;
        validate_embedding(&embedding)?;

        let record = self.store.add(info, embedding)?;
        debug!(id = record.id, "enrolled identity");
        Ok(record)
    }

    /// Compares a probe embedding against every enrolled identity and
    /// renders an accept/reject verdict under `policy`.
    pub fn verify(&self, probe: &[f32], policy: Policy) -> Result<VerificationResult, EngineError> {
        validate_embedding(probe)?;
        let snapshot = self.store.all()?;
        let result = decide(&snapshot, probe, policy);
        debug!(
            matched = result.matched,
            score = result.score,
            threshold = policy.threshold(),
            "verification decision"
        );
        Ok(result)
    }
}

/// Selects the best-scoring record from `records` and applies the
/// threshold.
///
/// The scan replaces the running best only on a strictly greater score,
/// so exact ties keep the earlier record: first-inserted wins, and the
/// tie-break is deterministic for a given store ordering. An empty
/// snapshot is "no match" regardless of threshold.
pub fn decide(records: &[IdentityRecord], probe: &[f32], policy: Policy) -> VerificationResult {
    let best = records.iter().fold(None, |best: Option<(&IdentityRecord, f32)>, r| {
        let score = cosine_sim(probe, &r.embedding);
        match best {
            Some((_, s)) if score <= s => best,
            _ => Some((r, score)),
        }
    });

    match best {
        None => VerificationResult {
            matched: false,
            identity: None,
            score: 0.0,
            candidate: None,
        },
        Some((record, score)) => {
            let matched = score >= policy.threshold();
            VerificationResult {
                matched,
                identity: matched.then(|| record.clone()),
                score,
                candidate: Some(record.clone()),
            }
        }
    }
}

/// Parses a `YYYY-MM-DD` date of birth.
///
/// Lives here so unparseable dates surface as [`EngineError::InvalidMetadata`]
/// like every other metadata fault.
pub fn parse_birth_date(s: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| EngineError::InvalidMetadata {
        reason: format!("invalid date of birth {s:?}, use YYYY-MM-DD"),
    })
}

fn validate_metadata(info: &EnrollmentInfo) -> Result<(), EngineError> {
    if info.first_name.trim().is_empty() {
        return Err(EngineError::InvalidMetadata {
            reason: "first name is required".into(),
        });
    }
    if info.last_name.trim().is_empty() {
        return Err(EngineError::InvalidMetadata {
            reason: "last name is required".into(),
        });
    }
    Ok(())
}
