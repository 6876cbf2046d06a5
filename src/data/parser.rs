// ============================================================
// Layer 4 — Record Line Parser
// ============================================================
// Parses one corpus line into a LabeledRecord.
//
// Wire format, one record per line:
//
//   domain;booleanLiteral
//
//   qakbot1x8fh3.biz;True
//   wikipedia.org;False
//
// The label is a STRICT two-value mapping — exactly "True" or
// "False" (surrounding whitespace ignored). Earlier tooling in
// this problem space evaluated the literal as code, which is a
// code-execution hazard the moment the corpus file is not
// trusted; anything other than the two literals is a parse
// failure here.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §9 (Error Handling)

use crate::domain::record::LabeledRecord;
use crate::error::{Error, Result};

/// Parse a single `domain;True|False` line.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_record(line: &str, line_no: usize) -> Result<LabeledRecord> {
    let trimmed = line.trim();

    let mut fields = trimmed.split(';');
    let domain = fields.next().unwrap_or_default().trim();
    let label  = fields.next();

    // Exactly two fields: a missing or extra separator is malformed
    if fields.next().is_some() {
        return Err(parse_error(line_no, line, "expected exactly one ';' separator"));
    }

    let label = match label {
        Some(l) => l.trim(),
        None => return Err(parse_error(line_no, line, "missing ';' separator")),
    };

    if domain.is_empty() {
        return Err(parse_error(line_no, line, "empty domain field"));
    }

    // Strict literal mapping — never evaluated, never coerced
    let is_dga = match label {
        "True"  => true,
        "False" => false,
        other => {
            return Err(parse_error(
                line_no,
                line,
                &format!("label must be \"True\" or \"False\", got {other:?}"),
            ))
        }
    };

    Ok(LabeledRecord::new(domain, is_dga))
}

fn parse_error(line_no: usize, line: &str, reason: &str) -> Error {
    Error::Parse {
        line_no,
        line:   line.trim_end_matches('\n').to_string(),
        reason: reason.to_string(),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_both_labels() {
        let dga = parse_record("qakbot1x8fh3.biz;True", 1).unwrap();
        assert_eq!(dga.domain, "qakbot1x8fh3.biz");
        assert!(dga.is_dga);

        let legit = parse_record("wikipedia.org;False", 2).unwrap();
        assert_eq!(legit.domain, "wikipedia.org");
        assert!(!legit.is_dga);
    }

    #[test]
    fn test_trims_whitespace() {
        let r = parse_record("  example.com ; True \n", 1).unwrap();
        assert_eq!(r.domain, "example.com");
        assert!(r.is_dga);
    }

    // The strict mapping rejects everything eval() would have accepted
    #[test]
    fn test_rejects_non_literal_labels() {
        for bad in ["true", "false", "1", "0", "bool(1)", "TRUE", ""] {
            let line = format!("example.com;{bad}");
            assert!(
                parse_record(&line, 1).is_err(),
                "label {bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        assert!(parse_record("no-separator-here", 1).is_err());
        assert!(parse_record("a.com;True;extra", 1).is_err());
        assert!(parse_record(";True", 1).is_err());
    }

    #[test]
    fn test_error_carries_line_number_and_content() {
        let err = parse_record("garbage", 7).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 7"), "got: {msg}");
        assert!(msg.contains("garbage"), "got: {msg}");
    }
}
