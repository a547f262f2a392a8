//! JSONL sample datasets: one `{"input", "ideal", "sample_id"?}` per line.

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::errors::{EvalError, EvalResult};
use crate::model::Sample;

pub fn load_samples(path: &Path) -> EvalResult<Vec<Sample>> {
    let file = std::fs::File::open(path).map_err(|e| EvalError::Dataset {
        path: path.display().to_string(),
        line: 0,
        message: e.to_string(),
    })?;
    let samples = parse_samples(std::io::BufReader::new(file), &path.display().to_string())?;
    debug!(path = %path.display(), samples = samples.len(), "loaded dataset");
    Ok(samples)
}

/// Blank lines are skipped; line numbers in errors are 1-based.
pub fn parse_samples(reader: impl BufRead, source: &str) -> EvalResult<Vec<Sample>> {
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| EvalError::Dataset {
            path: source.to_string(),
            line: line_no,
            message: e.to_string(),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: Sample = serde_json::from_str(&line).map_err(|e| EvalError::Dataset {
            path: source.to_string(),
            line: line_no,
            message: e.to_string(),
        })?;
        samples.push(sample);
    }
    Ok(samples)
}
