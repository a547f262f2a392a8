use std::sync::Mutex;

use super::Recorder;
use crate::errors::EvalResult;
use crate::model::MatchRecord;

/// Keeps matches in memory only (dry runs, tests).
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    matches: Mutex<Vec<MatchRecord>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Recorder for MemoryRecorder {
    fn record_match(&self, record: MatchRecord) -> EvalResult<()> {
        self.matches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record);
        Ok(())
    }

    fn matches(&self) -> Vec<MatchRecord> {
        self.matches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
