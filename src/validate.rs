use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ValidationReport;

static DEEP_INDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^ {4,}-").unwrap());
static TABLE_ROW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)\|.*\|.*\|").unwrap());

/// Read-only lint for content patterns that tend to break the host's block
/// model. Reports, never fixes. No current rule produces an error; `is_valid`
/// tracks errors only, not warnings.
pub fn validate_hierarchy(text: &str) -> ValidationReport {
    let mut warnings = Vec::new();

    if DEEP_INDENT_RE.is_match(text) {
        warnings.push("deeply indented list items may not map onto outline blocks".to_string());
    }
    if text.contains('|') && TABLE_ROW_RE.is_match(text) {
        warnings.push("markdown table syntax does not render inside outline blocks".to_string());
    }
    if text.matches("```").count() >= 4 {
        warnings.push("multiple code fences remain in the content".to_string());
    }

    let errors: Vec<String> = Vec::new();
    ValidationReport {
        is_valid: errors.is_empty(),
        warnings,
        errors,
    }
}
