use crate::error::AnalysisError;
use crate::model::AnalysisRecord;
use std::collections::HashMap;
use std::sync::Mutex;

/// Persistence seam for finished analyses.
///
/// The store assigns a stable identifier on insert and serves the record
/// back by that identifier. Records are immutable once stored; there is no
/// update operation. An unknown identifier is a distinct
/// [`AnalysisError::NotFound`], not a generic failure.
pub trait AnalysisStore: Send + Sync {
    /// Persist a record and return its assigned identifier
    fn insert(&self, record: AnalysisRecord) -> u64;

    /// Fetch a stored record by identifier
    fn get(&self, id: u64) -> Result<AnalysisRecord, AnalysisError>;
}

/// In-memory reference implementation, used by the CLI and tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    next_id: u64,
    records: HashMap<u64, AnalysisRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl AnalysisStore for MemoryStore {
    fn insert(&self, record: AnalysisRecord) -> u64 {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.next_id += 1;
        let id = inner.next_id;
        inner.records.insert(id, record);
        id
    }

    fn get(&self, id: u64) -> Result<AnalysisRecord, AnalysisError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        inner
            .records
            .get(&id)
            .cloned()
            .ok_or(AnalysisError::NotFound(id))
    }
}
