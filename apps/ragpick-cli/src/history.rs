use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub query: String,
    pub at: DateTime<Utc>,
}

/// Bounded most-recent-first list of queries seen by the message loop.
#[derive(Debug, Clone)]
pub struct RecentQueries {
    entries: VecDeque<QueryRecord>,
    capacity: usize,
}

impl RecentQueries {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn record(&mut self, query: impl Into<String>) {
        self.record_at(query, Utc::now());
    }

    /// Newest goes in front; anything past capacity falls off the back.
    pub fn record_at(&mut self, query: impl Into<String>, at: DateTime<Utc>) {
        self.entries.push_front(QueryRecord { query: query.into(), at });
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&QueryRecord> { self.entries.front() }

    pub fn iter(&self) -> impl Iterator<Item = &QueryRecord> { self.entries.iter() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn capacity(&self) -> usize { self.capacity }
}
