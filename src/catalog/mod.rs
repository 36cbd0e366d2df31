//! In-memory catalog of call recordings returned by a search

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Timestamp format the API serves, e.g. `2024-03-18 09:41:07 +0100`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Metadata for one recorded call.
///
/// Immutable once constructed from a search response; a record only ever
/// leaves its catalog after a confirmed server-side delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingRecord {
    /// Server-assigned identifier, unique within a catalog
    pub id: i64,

    /// Creation instant as served, `"yyyy-MM-dd HH:mm:ss Z"`.
    /// Fixed-width and zero-padded, so lexicographic order is chronological.
    pub timestamp: String,

    /// Call duration in whole seconds
    pub duration_secs: u32,

    /// Display name of the calling party
    pub source: Option<String>,

    /// Display name of the called party
    pub destination: Option<String>,

    /// Whether an audio payload exists server-side for this call
    pub has_recording: bool,

    /// Call direction tag (e.g. "incoming", "outgoing"), "unknown" if absent
    pub call_type: String,
}

impl RecordingRecord {
    /// Parse the served timestamp into an absolute instant
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// Ordered collection of recordings from one search, newest first.
#[derive(Debug, Default)]
pub struct RecordingCatalog {
    records: Vec<RecordingRecord>,
}

impl RecordingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `records`, sorted descending by creation
    /// timestamp. Input ids are expected to be distinct (upstream guarantee);
    /// no deduplication is performed.
    pub fn populate(&mut self, mut records: Vec<RecordingRecord>) {
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.records = records;
    }

    /// Remove at most one record by id; no-op if absent.
    pub fn remove(&mut self, id: i64) {
        if let Some(pos) = self.records.iter().position(|r| r.id == id) {
            self.records.remove(pos);
        }
    }

    pub fn find(&self, id: i64) -> Option<&RecordingRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in display order (newest first)
    pub fn iter(&self) -> impl Iterator<Item = &RecordingRecord> {
        self.records.iter()
    }
}
