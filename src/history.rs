//! Session history log.
//!
//! Append-only and in-memory: records live for the lifetime of the
//! process, insertion order is chronological, and the panel view walks
//! them newest-first.

use chrono::{DateTime, Utc};

/// Kind of a history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    /// A local arithmetic evaluation.
    Arithmetic,
    /// A settled advanced-mode request (success or handled failure).
    Advanced,
}

/// One immutable entry in the session history log.
#[derive(Clone, Debug)]
pub struct ComputationRecord {
    pub id: u64,
    pub kind: RecordKind,
    pub input: String,
    pub output: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of completed computations.
#[derive(Clone, Debug, Default)]
pub struct HistoryLog {
    records: Vec<ComputationRecord>,
    next_id: u64,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its id.
    pub fn push(
        &mut self,
        kind: RecordKind,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(ComputationRecord {
            id,
            kind,
            input: input.into(),
            output: output.into(),
            timestamp: Utc::now(),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion (chronological) order.
    pub fn records(&self) -> &[ComputationRecord] {
        &self.records
    }

    /// Records newest-first, the order the panel displays them in.
    pub fn newest_first(&self) -> impl Iterator<Item = &ComputationRecord> {
        self.records.iter().rev()
    }
}
