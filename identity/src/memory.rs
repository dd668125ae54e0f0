use std::sync::Mutex;

use crate::store::IdentityStore;
use crate::{EnrollmentInfo, IdentityRecord, StoreError};

/// In-memory [`IdentityStore`] implementation.
/// Data is lost on restart. Suitable for testing or ephemeral use.
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

struct MemoryStoreInner {
    records: Vec<IdentityRecord>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryStoreInner {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStore for MemoryStore {
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
        Ok(record)
    }

    fn all(&self) -> Result<Vec<IdentityRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.records.clone())
    }

    fn remove(&self, id: u64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        Ok(inner.records.len() != before)
    }

    fn len(&self) -> Result<usize, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn info(first: &str) -> EnrollmentInfo {
        EnrollmentInfo {
            first_name: first.into(),
            last_name: "Tester".into(),
            date_of_birth: NaiveDate::parse_from_str("1990-01-01", "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn add_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let a = store.add(info("A"), vec![1.0, 2.0]).unwrap();
        let b = store.add(info("B"), vec![3.0, 4.0]).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len().unwrap(), 2);

        let all = store.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].first_name, "A");
        assert_eq!(all[1].first_name, "B");
    }

    #[test]
    fn remove_by_id() {
        let store = MemoryStore::new();
        let a = store.add(info("A"), vec![1.0]).unwrap();
        store.add(info("B"), vec![2.0]).unwrap();

        assert!(store.remove(a.id).unwrap());
        assert!(!store.remove(a.id).unwrap(), "second remove finds nothing");
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.all().unwrap()[0].first_name, "B");
    }

    #[test]
    fn ids_not_reused_after_remove() {
        let store = MemoryStore::new();
        let a = store.add(info("A"), vec![1.0]).unwrap();
        store.remove(a.id).unwrap();
        let b = store.add(info("B"), vec![2.0]).unwrap();
        assert_eq!(b.id, 2, "id of a removed record must not come back");
    }

    #[test]
    fn all_returns_snapshot() {
        let store = MemoryStore::new();
        store.add(info("A"), vec![1.0]).unwrap();
        let snapshot = store.all().unwrap();
        store.add(info("B"), vec![2.0]).unwrap();
        assert_eq!(snapshot.len(), 1, "earlier snapshot must not grow");
    }
}
