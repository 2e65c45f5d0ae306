pub mod fences;
pub mod lists;
pub mod pipeline;
pub mod splitters;
pub mod tags;
pub mod types;
pub mod validate;

pub use types::*;

use napi::bindgen_prelude::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde_json::Value;

fn to_napi_error(error: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(error.to_string())
}

fn parse_input<T: DeserializeOwned>(value: Value, label: &str) -> NapiResult<T> {
    serde_json::from_value(value).map_err(|error| to_napi_error(format!("Invalid {label}: {error}")))
}

/// Full sanitization pipeline: raw LLM text in, outline-safe text plus a
/// modification log out.
#[napi(js_name = "sanitizeLlmOutput")]
pub fn sanitize_llm_output(text: String, options: Option<Value>) -> NapiResult<Value> {
    let options = match options {
        Some(value) => parse_input::<SanitizeOptions>(value, "sanitize options")?,
        None => SanitizeOptions::default(),
    };
    serde_json::to_value(pipeline::sanitize(&text, &options)).map_err(to_napi_error)
}

#[napi(js_name = "splitFlashcards")]
pub fn split_flashcards(text: String) -> NapiResult<Value> {
    serde_json::to_value(splitters::split_flashcards(&text)).map_err(to_napi_error)
}

/// Splits flashcard text and returns ready-to-insert block instructions.
#[napi(js_name = "planFlashcardBlocks")]
pub fn plan_flashcard_blocks(text: String) -> NapiResult<Value> {
    let blocks = splitters::split_flashcards(&text);
    serde_json::to_value(splitters::plan_flashcard_blocks(&blocks)).map_err(to_napi_error)
}

#[napi(js_name = "formatTaskList")]
pub fn format_task_list(text: String, marker: String) -> NapiResult<String> {
    let marker = TaskMarker::parse(&marker).map_err(to_napi_error)?;
    Ok(splitters::format_task_list(&text, marker))
}

#[napi(js_name = "formatSummaryList")]
pub fn format_summary_list(text: String) -> String {
    splitters::format_summary_list(&text)
}

#[napi(js_name = "validateBlockHierarchy")]
pub fn validate_block_hierarchy(text: String) -> NapiResult<Value> {
    serde_json::to_value(validate::validate_hierarchy(&text)).map_err(to_napi_error)
}

#[napi(js_name = "parseOutlineTree")]
pub fn parse_outline_tree(text: String) -> NapiResult<Value> {
    serde_json::to_value(lists::parse_nested_list(&text)).map_err(to_napi_error)
}

#[napi(js_name = "normalizeTags")]
pub fn normalize_tags(text: String) -> String {
    tags::normalize_tags(&text)
}

#[napi(js_name = "normalizeListMarkers")]
pub fn normalize_list_markers(text: String) -> String {
    lists::normalize_list_prefixes(&text)
}

#[napi(js_name = "flattenLists")]
pub fn flatten_lists(text: String) -> String {
    lists::flatten_lists(&text)
}

#[napi(js_name = "extractCodeFences")]
pub fn extract_code_fences(text: String) -> String {
    fences::extract_code_fences(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_marker_string_is_rejected_at_the_boundary() {
        assert!(TaskMarker::parse("URGENT").is_err());
    }

    #[test]
    fn sanitized_payload_serializes_without_empty_diagnostic() {
        let output = pipeline::sanitize("* item", &SanitizeOptions::default());
        let value = serde_json::to_value(output).unwrap();
        assert_eq!(value["text"], "- item");
        assert!(value.get("diagnostic").is_none());
    }
}
