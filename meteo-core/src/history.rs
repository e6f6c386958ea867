use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Recent search queries, most recent first, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Put `query` at the front. An existing equal entry moves to the front;
    /// the oldest entry is dropped once capacity is exceeded.
    pub fn push(&mut self, query: impl Into<String>) {
        let query = query.into();
        if let Some(pos) = self.entries.iter().position(|q| *q == query) {
            self.entries.remove(pos);
        }
        self.entries.push_front(query);
        self.entries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn most_recent(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_five_most_recent_distinct_queries() {
        let mut history = SearchHistory::new();
        for q in ["Paris", "Tokyo", "Paris", "Berlin", "Rome", "Oslo"] {
            history.push(q);
        }

        assert_eq!(history.to_vec(), ["Oslo", "Rome", "Berlin", "Paris", "Tokyo"]);
    }

    #[test]
    fn oldest_entry_is_evicted() {
        let mut history = SearchHistory::new();
        for q in ["a", "b", "c", "d", "e", "f"] {
            history.push(q);
        }

        assert_eq!(history.len(), 5);
        assert_eq!(history.most_recent(), Some("f"));
        assert!(!history.iter().any(|q| q == "a"));
    }

    #[test]
    fn repeat_of_front_entry_is_a_no_op() {
        let mut history = SearchHistory::new();
        history.push("Paris");
        history.push("Paris");

        assert_eq!(history.to_vec(), ["Paris"]);
    }

    #[test]
    fn starts_empty() {
        let history = SearchHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.most_recent(), None);
    }
}
