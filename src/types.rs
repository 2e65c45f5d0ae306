use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SanitizerError {
    #[error("unknown task marker: {0}")]
    UnknownMarker(String),
}

/// Which assistant command produced the text being sanitized. Flashcard
/// output bypasses the generic pipeline and is handled by its own splitter.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    #[default]
    Ask,
    Summarize,
    Flashcard,
    Tasks,
    Custom,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Ask => "ask",
            CommandKind::Summarize => "summarize",
            CommandKind::Flashcard => "flashcard",
            CommandKind::Tasks => "tasks",
            CommandKind::Custom => "custom",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SanitizeOptions {
    pub enable_formatting: bool,
    pub log_modifications: bool,
    pub preserve_code_blocks: bool,
    pub command: CommandKind,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            enable_formatting: true,
            log_modifications: false,
            preserve_code_blocks: false,
            command: CommandKind::Ask,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedOutput {
    pub text: String,
    pub modifications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<PipelineDiagnostic>,
}

/// One record per pipeline run, emitted only when the host asked for
/// modification logging and at least one step changed the text.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineDiagnostic {
    pub command: String,
    pub modifications: Vec<String>,
    pub input_len: u32,
    pub output_len: u32,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListNode {
    pub content: String,
    pub level: u32,
    pub children: Vec<ListNode>,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlashcardBlockKind {
    Question,
    Answer,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardBlock {
    pub kind: FlashcardBlockKind,
    pub content: String,
    pub has_card: bool,
}

/// One block-insertion instruction for the host editor. `parent` is the index
/// of an earlier instruction in the same plan; `None` targets the insertion
/// point the host picked.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlockInstruction {
    pub parent: Option<u32>,
    pub content: String,
    pub as_child: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Task-state keywords recognized by the host's task system.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskMarker {
    Todo,
    Doing,
    Done,
    Later,
    Now,
    Waiting,
    Cancelled,
}

impl TaskMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskMarker::Todo => "TODO",
            TaskMarker::Doing => "DOING",
            TaskMarker::Done => "DONE",
            TaskMarker::Later => "LATER",
            TaskMarker::Now => "NOW",
            TaskMarker::Waiting => "WAITING",
            TaskMarker::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Result<Self, SanitizerError> {
        match value.trim().to_uppercase().as_str() {
            "TODO" => Ok(TaskMarker::Todo),
            "DOING" => Ok(TaskMarker::Doing),
            "DONE" => Ok(TaskMarker::Done),
            "LATER" => Ok(TaskMarker::Later),
            "NOW" => Ok(TaskMarker::Now),
            "WAITING" => Ok(TaskMarker::Waiting),
            "CANCELLED" => Ok(TaskMarker::Cancelled),
            _ => Err(SanitizerError::UnknownMarker(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_marker_parse_accepts_vocabulary() {
        assert_eq!(TaskMarker::parse("LATER").unwrap(), TaskMarker::Later);
        assert_eq!(TaskMarker::parse(" doing ").unwrap(), TaskMarker::Doing);
    }

    #[test]
    fn task_marker_parse_rejects_unknown() {
        assert!(TaskMarker::parse("SOMEDAY").is_err());
    }

    #[test]
    fn sanitize_options_parse_from_host_json() {
        let value = serde_json::json!({
            "enableFormatting": true,
            "logModifications": true,
            "command": "summarize"
        });
        let options: SanitizeOptions = serde_json::from_value(value).unwrap();
        assert!(options.log_modifications);
        assert!(!options.preserve_code_blocks);
        assert_eq!(options.command, CommandKind::Summarize);
    }
}
