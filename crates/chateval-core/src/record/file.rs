use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};

use super::{Recorder, RESULTS_FILE};
use crate::errors::{EvalError, EvalResult};
use crate::model::MatchRecord;

/// Appends each match as one JSON line to `<output_dir>/results.jsonl`.
///
/// The file is opened in append mode per record and created on first write.
/// Each line goes out in a single `write_all`, so readers never observe a
/// partial record on a completed line.
#[derive(Debug)]
pub struct FileRecorder {
    path: PathBuf,
    matches: Mutex<Vec<MatchRecord>>,
}

impl FileRecorder {
    /// Records into `path` without touching the file system yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            matches: Mutex::new(Vec::new()),
        }
    }

    /// Records into `<dir>/results.jsonl`, creating `dir` if needed.
    pub fn in_dir(dir: &Path) -> EvalResult<Self> {
        std::fs::create_dir_all(dir).map_err(|e| EvalError::io(dir, e))?;
        Ok(Self::new(dir.join(RESULTS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, Vec<MatchRecord>> {
        // A poisoned lock only means another writer panicked; the Vec is still valid.
        self.matches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_error(&self, source: std::io::Error) -> EvalError {
        EvalError::Record {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn append_line(&self, record: &MatchRecord) -> EvalResult<()> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| self.record_error(std::io::Error::other(e)))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.record_error(e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| self.record_error(e))
    }
}

impl Recorder for FileRecorder {
    fn record_match(&self, record: MatchRecord) -> EvalResult<()> {
        let mut matches = self.lock();
        self.append_line(&record)?;
        debug!(sample_id = %record.sample_id, path = %self.path.display(), "recorded match");
        matches.push(record);
        Ok(())
    }

    fn matches(&self) -> Vec<MatchRecord> {
        self.lock().clone()
    }

    fn finalize(&self) -> EvalResult<()> {
        let matches = self.lock();
        if self.path.exists() {
            let file = OpenOptions::new()
                .append(true)
                .open(&self.path)
                .map_err(|e| self.record_error(e))?;
            file.sync_all().map_err(|e| self.record_error(e))?;
        }
        info!(
            path = %self.path.display(),
            records = matches.len(),
            "results finalized"
        );
        Ok(())
    }
}
