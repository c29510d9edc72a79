//! Decoder behavior against recorded analyzer reports.

use std::path::PathBuf;

use gloc::decode::decode;
use gloc::error::DecodeError;
use gloc::model::{LanguageStats, ReportHeader};

fn testdata(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name);
    std::fs::read(&path).expect("should read testdata file")
}

#[test]
fn test_full_report() {
    let report = decode(&testdata("cloc_full.json")).expect("should decode");

    assert_eq!(report.header.cloc_version, "1.98");
    assert_eq!(report.header.n_files, 9);
    assert_eq!(report.header.n_lines, 1603);
    assert!(report.header.elapsed_seconds > 0.04);

    let mut names: Vec<&String> = report.languages.keys().collect();
    names.sort();
    assert_eq!(names, ["Markdown", "Rust", "TOML", "YAML"]);

    assert_eq!(
        report.total,
        LanguageStats {
            files: 9,
            blank: 166,
            comment: 68,
            code: 1369
        }
    );
    assert!(report.is_consistent());
}

#[test]
fn test_missing_header_yields_zero_header() {
    let report = decode(&testdata("cloc_go.json")).expect("should decode");
    assert_eq!(report.header, ReportHeader::default());
}

#[test]
fn test_sum_round_trips_field_for_field() {
    let report = decode(&testdata("cloc_go.json")).expect("should decode");
    assert_eq!(
        report.total,
        LanguageStats {
            files: 3,
            blank: 10,
            comment: 5,
            code: 120
        }
    );
    assert!(!report.languages.contains_key("SUM"));
}

#[test]
fn test_corrupt_entries_are_dropped() {
    let report = decode(&testdata("cloc_corrupt_entry.json")).expect("should decode");

    assert_eq!(report.languages.len(), 1);
    assert_eq!(report.languages["Python"].code, 410);
    assert!(!report.languages.contains_key("Shell"));
    assert!(!report.languages.contains_key("C"));

    // cloc_version has the wrong type; the rest of the header survives
    assert_eq!(report.header.cloc_version, "");
    assert_eq!(report.header.cloc_url, "github.com/AlDanial/cloc");
    assert_eq!(report.header.elapsed_seconds, 1.5);

    // The analyzer's total is kept as-is even though C was dropped
    assert_eq!(report.total.code, 419);
    assert!(!report.is_consistent());
}

#[test]
fn test_non_object_documents_fail() {
    let inputs: [&[u8]; 4] = [b"[]", b"42", b"null", b"true"];
    for input in inputs {
        assert!(
            matches!(decode(input), Err(DecodeError::NotAnObject { .. })),
            "{}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn test_invalid_syntax_fails() {
    let err = decode(b"Cloning into 'repo'...\n{}").unwrap_err();
    assert!(matches!(err, DecodeError::Syntax(_)));
    assert!(err.to_string().starts_with("failed to parse analyzer output"));
}
