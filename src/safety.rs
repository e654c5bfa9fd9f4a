//! Safety checks for the `--report-json` output path.
//!
//! Request lists are hand-curated JSON files, so a report written to the
//! wrong path can silently destroy a month's schedule.

use anyhow::{bail, Result};
use std::path::Path;

/// Validates that a report path is safe to overwrite.
///
/// Checks:
/// - Output must have a `.json` extension
/// - Output cannot be the input request list (compared after canonicalization when both exist)
/// - Output cannot be an existing file that parses as a request list
pub fn validate_report_path(output: &Path, input: &Path) -> Result<()> {
    let is_json = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if !is_json {
        bail!(
            "Safety check failed: report file '{}' must have a .json extension",
            output.display()
        );
    }

    if output == input || same_file(output, input) {
        bail!(
            "Safety check failed: report '{}' cannot be the same as input '{}'",
            output.display(),
            input.display()
        );
    }

    if looks_like_request_list(output) {
        bail!(
            "Safety check failed: '{}' already holds a request list",
            output.display()
        );
    }

    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// An existing top-level JSON array is a request list, not a report (reports are objects).
fn looks_like_request_list(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).ok())
        .is_some_and(|v| v.is_array())
}
