use crate::models::PredictionRecord;
use std::collections::VecDeque;

/// Bounded, insertion-ordered monitoring log.
#[derive(Debug, Clone)]
pub struct LogStore {
    entries: VecDeque<PredictionRecord>,
    capacity: usize,
}

impl LogStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, record: PredictionRecord) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(record);
    }

    pub fn snapshot(&self) -> Vec<PredictionRecord> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
