use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::IdentityStore;
use crate::{EnrollmentInfo, IdentityRecord, StoreError, EMBEDDING_DIM};

/// On-disk document. Pretty-printed JSON so the file stays manually
/// editable.
///
/// `next_id` only ever increases and is persisted so that deleting the
/// newest record cannot cause an ID to be handed out twice across
/// restarts.
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    users: Vec<IdentityRecord>,
}

/// File-backed [`IdentityStore`].
///
/// The full identity set is loaded into memory at [`JsonStore::open`] and
/// rewritten after every mutation. Persistence is write-new-then-rename;
/// the previous file is never truncated in place, so a crash mid-write
/// cannot lose committed records. A failed persist rolls the in-memory
/// set back before the error is returned.
///
/// Embedding dimensionality is checked at load: a file produced against a
/// different model is a configuration fault, reported as
/// [`StoreError::Corrupt`].
pub struct JsonStore {
    path: PathBuf,
    inner: Mutex<JsonStoreInner>,
}

struct JsonStoreInner {
    records: Vec<IdentityRecord>,
    next_id: u64,
}

impl JsonStore {
    /// Opens the store at `path`, creating an empty one if the file does
    /// not exist yet. Fails with [`StoreError::Corrupt`] when the file
    /// cannot be parsed; the caller decides whether to start empty or
    /// abort.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let (next_id, records) = if path.exists() {
            let data = fs::read_to_string(&path).map_err(|e| StoreError::Corrupt(e.to_string()))?;
            parse_document(&data)?
        } else {
            (0, Vec::new())
        };

        for r in &records {
            if r.embedding.len() != EMBEDDING_DIM {
                return Err(StoreError::Corrupt(format!(
                    "record {}: embedding has {} dimensions, want {EMBEDDING_DIM}",
                    r.id,
                    r.embedding.len()
                )));
            }
        }

        // File metadata is read but not trusted: the counter can never sit
        // below an ID that is actually present.
        let max_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        let next_id = next_id.max(max_id + 1);

        debug!(count = records.len(), path = %path.display(), "loaded identity store");

        let store = Self {
            path,
            inner: Mutex::new(JsonStoreInner { records, next_id }),
        };

        // First run: materialize the empty document, so a later corrupt
        // read is distinguishable from "never initialized".
        if !store.path.exists() {
            let inner = store.inner.lock().unwrap();
            store.persist(&inner)?;
        }

        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, inner: &JsonStoreInner) -> Result<(), StoreError> {
        let doc = StoreFile {
            next_id: inner.next_id,
            users: inner.records.clone(),
        };
        let data = serde_json::to_string_pretty(&doc)
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, data).map_err(|e| StoreError::Persistence(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Persistence(e.to_string()))?;

        debug!(count = inner.records.len(), "persisted identity store");
        Ok(())
    }
}

fn parse_document(data: &str) -> Result<(u64, Vec<IdentityRecord>), StoreError> {
    if let Ok(doc) = serde_json::from_str::<StoreFile>(data) {
        return Ok((doc.next_id, doc.users));
    }
    // Legacy layout: a bare array of records.
    match serde_json::from_str::<Vec<IdentityRecord>>(data) {
        Ok(users) => Ok((0, users)),
        Err(e) => Err(StoreError::Corrupt(e.to_string())),
    }
}

impl IdentityStore for JsonStore {
    fn add(&self, info: EnrollmentInfo, embedding: Vec<f32>) -> Result<IdentityRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let record = IdentityRecord {
            id: inner.next_id,
            first_name: info.first_name,
            last_name: info.last_name,
            date_of_birth: info.date_of_birth,
            embedding,
        };
        inner.next_id += 1;
        inner.records.push(record.clone());

        if let Err(e) = self.persist(&inner) {
            inner.records.pop();
            inner.next_id -= 1;
            return Err(e);
        }
        Ok(record)
    }

    fn all(&self) -> Result<Vec<IdentityRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.records.clone())
    }

    fn remove(&self, id: u64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(pos) = inner.records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        let removed = inner.records.remove(pos);

        if let Err(e) = self.persist(&inner) {
            inner.records.insert(pos, removed);
            return Err(e);
        }
        Ok(true)
    }

    fn len(&self) -> Result<usize, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.records.len())
    }
}
