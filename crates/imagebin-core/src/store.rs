//! The in-memory image store.
//!
//! [`ImageStore`] is the single source of truth for uploaded images. All
//! contents live on the heap and are lost on process restart; that is a
//! documented property of the service, not a bug.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::ids::ImageId;
use crate::image::{ImageMetadata, ImageRecord};

/// In-memory keyed collection of [`ImageRecord`]s.
///
/// Records are kept in insertion order. Every operation takes the lock
/// exactly once and runs to completion, so concurrent requests never
/// observe a half-applied insert or delete.
#[derive(Debug, Default)]
pub struct ImageStore {
    records: RwLock<Vec<Arc<ImageRecord>>>,
}

impl ImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record. The caller is responsible for having generated
    /// a fresh id (the v4 generator makes collisions a non-concern).
    pub fn put(&self, record: ImageRecord) {
        self.records.write().push(Arc::new(record));
    }

    /// Metadata for every live record, in insertion order.
    ///
    /// Ordering policy beyond that (e.g. newest first) belongs to
    /// presentation layers, not the store.
    pub fn list(&self) -> Vec<ImageMetadata> {
        self.records.read().iter().map(|r| r.metadata()).collect()
    }

    /// Fetch the full record including bytes. Absence is a normal result.
    pub fn get(&self, id: ImageId) -> Option<Arc<ImageRecord>> {
        self.records.read().iter().find(|r| r.id == id).cloned()
    }

    /// Remove the record if present; returns whether one existed.
    pub fn delete(&self, id: ImageId) -> bool {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id != id);
        records.len() != before
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
