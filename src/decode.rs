//! Decoding of the analyzer's JSON report.
//!
//! The analyzer emits one object per language alongside two reserved keys,
//! `header` and `SUM`. The document is parsed into a generic
//! [`serde_json::Value`] tree first, then each sub-tree is extracted into a
//! typed structure on its own. A sub-tree that doesn't fit is dropped and
//! the rest of the report is kept.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::error::DecodeError;
use crate::model::{LanguageStats, Report, ReportHeader};

/// Reserved key holding run metadata.
pub const HEADER_KEY: &str = "header";
/// Reserved key holding the analyzer's total row.
pub const TOTAL_KEY: &str = "SUM";

/// Decode raw analyzer output into a [`Report`].
///
/// Fails only when the top level is not a JSON object. Malformed header
/// fields are left at zero and malformed language entries are skipped.
pub fn decode(bytes: &[u8]) -> Result<Report, DecodeError> {
    let document: Value = serde_json::from_slice(bytes)?;
    let root = match document {
        Value::Object(map) => map,
        other => {
            return Err(DecodeError::NotAnObject {
                found: kind_of(&other),
            })
        }
    };

    let mut report = Report {
        header: ReportHeader::default(),
        languages: HashMap::new(),
        total: LanguageStats::default(),
    };

    for (key, value) in root {
        if key == HEADER_KEY {
            if let Value::Object(fields) = &value {
                report.header = decode_header(fields);
            } else {
                debug!(found = kind_of(&value), "ignoring non-object header");
            }
        } else if key == TOTAL_KEY {
            if let Some(total) = decode_stats(&key, value) {
                report.total = total;
            }
        } else if let Some(stats) = decode_stats(&key, value) {
            report.languages.insert(key, stats);
        }
    }

    Ok(report)
}

fn decode_header(fields: &Map<String, Value>) -> ReportHeader {
    ReportHeader {
        cloc_url: string_field(fields, "cloc_url"),
        cloc_version: string_field(fields, "cloc_version"),
        elapsed_seconds: float_field(fields, "elapsed_seconds"),
        n_files: count_field(fields, "n_files"),
        n_lines: count_field(fields, "n_lines"),
    }
}

fn string_field(fields: &Map<String, Value>, name: &str) -> String {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn float_field(fields: &Map<String, Value>, name: &str) -> f64 {
    fields
        .get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or_default()
}

/// JSON numbers are untyped, so a whole-valued float counts too.
fn count_field(fields: &Map<String, Value>, name: &str) -> u64 {
    let Some(value) = fields.get(name) else {
        return 0;
    };
    if let Some(n) = value.as_u64() {
        return n;
    }
    value
        .as_f64()
        .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u64::MAX as f64)
        .map(|v| v as u64)
        .unwrap_or_default()
}

/// Only objects count as entries. A `null` value is skipped rather than
/// kept as an all-zero language.
fn decode_stats(key: &str, value: Value) -> Option<LanguageStats> {
    if !value.is_object() {
        debug!(language = key, found = kind_of(&value), "skipping non-object entry");
        return None;
    }
    match serde_json::from_value::<LanguageStats>(value) {
        Ok(stats) => Some(stats),
        Err(e) => {
            debug!(language = key, error = %e, "skipping malformed entry");
            None
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
