use crate::model::{JudgeVerdict, VerdictSource};
use serde_json::Value;

/// Parses the judge's JSON verdict.
///
/// `is_correct` is true only when it equals 1 (absent counts as 0);
/// `similarity` defaults to 0.0 and is clamped to `[0, 1]`. Anything that is
/// not a JSON object, or a field of the wrong type, is an error.
pub(crate) fn parse_verdict(text: &str) -> anyhow::Result<JudgeVerdict> {
    let val: Value = serde_json::from_str(text.trim())
        .map_err(|e| anyhow::anyhow!("Invalid judge JSON: {}", e))?;
    let obj = val
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("Judge output is not a JSON object"))?;

    let is_correct = match obj.get("is_correct") {
        None | Some(Value::Null) => false,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::Bool(b)) => *b,
        Some(other) => anyhow::bail!("Judge JSON has malformed 'is_correct': {}", other),
    };

    let similarity = match obj.get("similarity") {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|s| s.is_finite())
            .ok_or_else(|| anyhow::anyhow!("Judge JSON has non-finite 'similarity'"))?
            .clamp(0.0, 1.0),
        Some(other) => anyhow::bail!("Judge JSON has malformed 'similarity': {}", other),
    };

    Ok(JudgeVerdict {
        is_correct,
        similarity,
        source: VerdictSource::Judge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_verdict() {
        let v = parse_verdict(r#"{"is_correct": 1, "similarity": 0.92}"#).unwrap();
        assert!(v.is_correct);
        assert_eq!(v.similarity, 0.92);
        assert_eq!(v.source, VerdictSource::Judge);
    }

    #[test]
    fn only_one_counts_as_correct() {
        assert!(!parse_verdict(r#"{"is_correct": 0, "similarity": 0.3}"#).unwrap().is_correct);
        assert!(!parse_verdict(r#"{"is_correct": 2}"#).unwrap().is_correct);
        assert!(parse_verdict(r#"{"is_correct": 1.0}"#).unwrap().is_correct);
        assert!(parse_verdict(r#"{"is_correct": true}"#).unwrap().is_correct);
    }

    #[test]
    fn missing_fields_default() {
        let v = parse_verdict(r#"{"is_correct": 1}"#).unwrap();
        assert_eq!(v.similarity, 0.0);
        let v = parse_verdict(r#"{"similarity": 0.4}"#).unwrap();
        assert!(!v.is_correct);
        assert_eq!(v.similarity, 0.4);
    }

    #[test]
    fn similarity_is_clamped() {
        assert_eq!(
            parse_verdict(r#"{"is_correct": 1, "similarity": 7}"#).unwrap().similarity,
            1.0
        );
        assert_eq!(
            parse_verdict(r#"{"is_correct": 0, "similarity": -0.5}"#).unwrap().similarity,
            0.0
        );
    }

    #[test]
    fn malformed_outputs_are_errors() {
        assert!(parse_verdict("Sure! The answers match.").is_err());
        assert!(parse_verdict("[1, 0.9]").is_err());
        assert!(parse_verdict(r#"{"is_correct": "yes", "similarity": 0.9}"#).is_err());
        assert!(parse_verdict(r#"{"is_correct": 1, "similarity": "high"}"#).is_err());
    }
}
