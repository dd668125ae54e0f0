use crate::{EnrollmentInfo, IdentityRecord, StoreError};

/// Persists enrolled identities.
///
/// Implementations must be safe for concurrent use: `add` and `remove`
/// serialize against each other and against `all` snapshots, so ID
/// assignment stays unique and a verification scan never observes a
/// half-written set. A single mutex around the mutate-and-persist path
/// is sufficient.
pub trait IdentityStore: Send + Sync {
    /// Adds one identity. Assigns a fresh unique ID and persists the
    /// updated set before returning.
    fn add(&self, info: EnrollmentInfo, embedding: Vec<f32>) -> Result<IdentityRecord, StoreError>;

    /// Returns a point-in-time snapshot of all identities in insertion
    /// order. The snapshot is unaffected by later mutations.
    fn all(&self) -> Result<Vec<IdentityRecord>, StoreError>;

    /// Removes an identity by ID and persists the updated set.
    /// Returns `true` if a record was removed.
    fn remove(&self, id: u64) -> Result<bool, StoreError>;

    /// Returns the number of enrolled identities.
    fn len(&self) -> Result<usize, StoreError>;
}
