use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single commit descriptor as delivered by the upstream data source.
///
/// The layout engine only needs the identifier, the ordered parent list and
/// (for date markers) the commit timestamp. Everything else a repository
/// browser knows about a commit (author, message, refs) is renderer-side
/// decoration and never reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Opaque commit identifier, typically a hex sha.
    pub id: String,
    /// Parent identifiers in commit order. Empty for a root commit,
    /// two or more for a merge.
    pub parents: Vec<String>,
    /// Commit timestamp. `None` leaves date bucketing untouched.
    pub when: Option<DateTime<Utc>>,
}

impl CommitRecord {
    pub fn new(id: impl Into<String>, parents: Vec<String>) -> Self {
        Self {
            id: id.into(),
            parents,
            when: None,
        }
    }

    pub fn with_timestamp(mut self, when: DateTime<Utc>) -> Self {
        self.when = Some(when);
        self
    }

    /// A merge commit joins more than one lineage.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}
