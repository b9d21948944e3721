//! Record data model
//!
//! A record is one row of the demo table. A [`RecordSet`] is the immutable,
//! shared collection the pipeline reads from; its [`RecordSetId`] stands in
//! for reference identity when deciding whether derived data is stale.

use crate::hash::IncrementalHasher;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Stable identifier assigned when a record is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u32);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One tabular row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique within its record set
    pub id: RecordId,
    /// Display name ("Jane Smith")
    pub name: String,
    /// Contact string ("jane.smith@company.com")
    pub email: String,
    /// Department label from a small fixed vocabulary
    pub category: String,
    /// Compensation
    pub magnitude: u64,
    /// Join date
    pub joined: NaiveDate,
}

impl Record {
    /// Feed every field of this record into a content hasher
    pub fn hash_into(&self, hasher: &mut IncrementalHasher) {
        hasher.update_u64(u64::from(self.id.0));
        hasher.update_str(&self.name);
        hasher.update_str(&self.email);
        hasher.update_str(&self.category);
        hasher.update_u64(self.magnitude);
        hasher.update_u64(self.joined.num_days_from_ce() as u64);
    }
}

/// Process-unique identity of a record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordSetId(u64);

impl RecordSetId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RecordSetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "set#{}", self.0)
    }
}

/// Immutable, cheaply clonable collection of records
///
/// Clones share both the rows and the identity. Building a new set from the
/// same rows yields a new identity, exactly like a fresh array reference.
#[derive(Debug, Clone)]
pub struct RecordSet {
    id: RecordSetId,
    records: Arc<[Record]>,
}

impl RecordSet {
    /// Wrap records in a new set with a fresh identity
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            id: RecordSetId::next(),
            records: records.into(),
        }
    }

    /// Identity used as a cache key
    pub fn id(&self) -> RecordSetId {
        self.id
    }

    /// Borrow the rows
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl Deref for RecordSet {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}
