//! Durable identity records for speaker enrollment and verification.
//!
//! An [`IdentityRecord`] pairs display metadata (name, date of birth) with a
//! fixed-dimension speaker embedding, the voiceprint. Records live in an
//! [`IdentityStore`]:
//!
//! - [`MemoryStore`] keeps everything in memory (testing/ephemeral)
//! - [`JsonStore`] is backed by a human-editable JSON file, loaded in full
//!   at startup and rewritten atomically after every mutation
//!
//! Stores hand out point-in-time snapshots via [`IdentityStore::all`]; the
//! decision engine scans those snapshots and never mutates records in place.

mod error;
mod json;
mod memory;
mod record;
mod store;

pub use error::StoreError;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use record::{EnrollmentInfo, IdentityRecord, EMBEDDING_DIM};
pub use store::IdentityStore;
