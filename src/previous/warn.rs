use crate::error::LookupError;
use std::error::Error;

fn sanitize_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_sep = false;
    for ch in value.chars() {
        if ch.is_ascii_whitespace() {
            if !out.is_empty() && !prev_sep {
                out.push('_');
                prev_sep = true;
            }
        } else if ch.is_ascii_graphic() {
            out.push(ch);
            prev_sep = false;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "na".to_string()
    } else {
        trimmed.to_string()
    }
}

fn format_line(code: &str, stage: &str, path: &str, reason: &str, err: &str) -> String {
    format!(
        "PREV_WARN code={} stage={} path={} reason={} err={}",
        sanitize_value(code),
        sanitize_value(stage),
        sanitize_value(path),
        sanitize_value(reason),
        sanitize_value(err),
    )
}

/// One stderr line per event. Stdout carries the result only.
pub fn emit(code: &str, stage: &str, path: &str, reason: &str, err: &str) {
    eprintln!("{}", format_line(code, stage, path, reason, err));
}

fn lookup_error_line(err: &LookupError) -> String {
    let path = err
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let cause = err.source().map(ToString::to_string).unwrap_or_default();
    format_line(err.code().as_str(), err.stage(), &path, &err.to_string(), &cause)
}

pub fn emit_lookup_error(err: &LookupError) {
    eprintln!("{}", lookup_error_line(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn sanitize_value_rewrites_whitespace() {
        assert_eq!(sanitize_value("a b\tc"), "a_b_c");
    }

    #[test]
    fn sanitize_value_falls_back_for_empty() {
        assert_eq!(sanitize_value("   "), "na");
    }

    #[test]
    fn lookup_error_without_cause_has_na_err() {
        let err = LookupError::NoMatch(PathBuf::from("archive/data/2024-06-01.csv"));
        let line = lookup_error_line(&err);
        assert_eq!(
            line,
            "PREV_WARN code=E008_NO_MATCH stage=scan path=archive/data/2024-06-01.csv \
             reason=no_record_for_student_in_archive/data/2024-06-01.csv err=na"
        );
        assert!(!line.contains('\n'));
    }

    #[test]
    fn lookup_error_cause_lands_in_err_field() {
        let err = LookupError::Open {
            path: PathBuf::from("a.csv"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let line = lookup_error_line(&err);
        assert!(line.starts_with("PREV_WARN code=E005_OPEN_FAILED stage=read path=a.csv "));
        assert!(line.ends_with(" err=denied"));
    }
}
