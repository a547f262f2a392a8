//! Process exit codes for `chateval`.

pub const SUCCESS: i32 = 0;
pub const CONFIG_ERROR: i32 = 1; // Bad flags, registry, dataset or judge setup
pub const INTERNAL_ERROR: i32 = 2; // Recording failure or anything unclassified

/// Maps a command error to an exit code.
pub fn for_error(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<chateval_core::EvalError>()
        .map(|e| e.exit_code())
        .unwrap_or(INTERNAL_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chateval_core::EvalError;

    #[test]
    fn eval_errors_keep_their_code() {
        let err = anyhow::Error::new(EvalError::config("bad"));
        assert_eq!(for_error(&err), CONFIG_ERROR);
        assert_eq!(for_error(&anyhow::anyhow!("boom")), INTERNAL_ERROR);
    }
}
