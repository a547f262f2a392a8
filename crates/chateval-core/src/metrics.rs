use serde::{Deserialize, Serialize};

use crate::model::MatchRecord;

/// Final run metrics, recomputed from all recorded matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub accuracy: f64,
    pub avg_similarity: f64,
}

impl AggregateMetrics {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let total = records.len() as f64;
        Self {
            accuracy: accuracy(records),
            avg_similarity: records.iter().map(|r| r.similarity).sum::<f64>() / total,
        }
    }
}

/// Share of correct matches; 0.0 for no records.
pub fn accuracy(records: &[MatchRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    correct_count(records) as f64 / records.len() as f64
}

pub fn correct_count(records: &[MatchRecord]) -> usize {
    records.iter().filter(|r| r.correct).count()
}
