//! Match recording.
//!
//! A recorder owns the append-only results store and its in-memory mirror.
//! Both are serialized behind one lock, so a recorder can be shared across
//! tasks even though the driver evaluates samples one at a time.

mod file;
mod memory;

pub use file::FileRecorder;
pub use memory::MemoryRecorder;

use crate::errors::EvalResult;
use crate::metrics;
use crate::model::MatchRecord;

/// File name of the JSONL results store inside the output directory.
pub const RESULTS_FILE: &str = "results.jsonl";

pub trait Recorder: Send + Sync {
    /// Durably records one match, then retains it for aggregation.
    fn record_match(&self, record: MatchRecord) -> EvalResult<()>;

    /// Recorded matches, in recording order.
    fn matches(&self) -> Vec<MatchRecord>;

    fn accuracy(&self) -> f64 {
        metrics::accuracy(&self.matches())
    }

    /// End-of-run hook.
    fn finalize(&self) -> EvalResult<()> {
        Ok(())
    }
}
